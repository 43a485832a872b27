use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator used by a [`Threshold`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl fmt::Display for ThresholdOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ThresholdOp::Lt => "<",
            ThresholdOp::Le => "<=",
            ThresholdOp::Gt => ">",
            ThresholdOp::Ge => ">=",
            ThresholdOp::Eq => "==",
            ThresholdOp::Ne => "!=",
        };
        write!(f, "{s}")
    }
}

/// A single comparison threshold, e.g. `>=0.5`
///
/// Configuration files spell these as a short string (`"ge0.5"`/`">=0.5"`
/// both parse), matching the compact threshold syntax the original
/// configuration grammar uses for object-definition and filtering
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct Threshold {
    op: ThresholdOp,
    value: f64,
}

impl Threshold {
    pub fn new(op: ThresholdOp, value: f64) -> Self {
        Self { op, value }
    }

    /// Evaluate the threshold against a value
    ///
    /// ```rust
    /// # use stobj_config::{Threshold, ThresholdOp};
    /// let t = Threshold::new(ThresholdOp::Ge, 0.5);
    /// assert!(t.check(0.5));
    /// assert!(t.check(1.0));
    /// assert!(!t.check(0.49));
    /// ```
    pub fn check(&self, x: f64) -> bool {
        match self.op {
            ThresholdOp::Lt => x < self.value,
            ThresholdOp::Le => x <= self.value,
            ThresholdOp::Gt => x > self.value,
            ThresholdOp::Ge => x >= self.value,
            ThresholdOp::Eq => (x - self.value).abs() < 1e-9,
            ThresholdOp::Ne => (x - self.value).abs() >= 1e-9,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.value)
    }
}

impl From<Threshold> for String {
    fn from(t: Threshold) -> Self {
        t.to_string()
    }
}

impl FromStr for Threshold {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (op, rest) = if let Some(rest) = s.strip_prefix(">=") {
            (ThresholdOp::Ge, rest)
        } else if let Some(rest) = s.strip_prefix("<=") {
            (ThresholdOp::Le, rest)
        } else if let Some(rest) = s.strip_prefix("==") {
            (ThresholdOp::Eq, rest)
        } else if let Some(rest) = s.strip_prefix("!=") {
            (ThresholdOp::Ne, rest)
        } else if let Some(rest) = s.strip_prefix("ge") {
            (ThresholdOp::Ge, rest)
        } else if let Some(rest) = s.strip_prefix("le") {
            (ThresholdOp::Le, rest)
        } else if let Some(rest) = s.strip_prefix("eq") {
            (ThresholdOp::Eq, rest)
        } else if let Some(rest) = s.strip_prefix("ne") {
            (ThresholdOp::Ne, rest)
        } else if let Some(rest) = s.strip_prefix('>') {
            (ThresholdOp::Gt, rest)
        } else if let Some(rest) = s.strip_prefix('<') {
            (ThresholdOp::Lt, rest)
        } else if let Some(rest) = s.strip_prefix("gt") {
            (ThresholdOp::Gt, rest)
        } else if let Some(rest) = s.strip_prefix("lt") {
            (ThresholdOp::Lt, rest)
        } else {
            return Err(Error::InvalidThreshold {
                expression: s.to_string(),
            });
        };

        let value: f64 = rest.trim().parse().map_err(|_| Error::InvalidThreshold {
            expression: s.to_string(),
        })?;

        Ok(Threshold::new(op, value))
    }
}

impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Threshold::from_str(&s).map_err(serde::de::Error::custom)
    }
}
