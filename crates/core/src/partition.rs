use log::{log_enabled, Level};

/// A partition of `0..n` into equivalence classes
///
/// Implemented as a list of classes (each a sorted `Vec<i32>`) rather than a
/// path-compressed union-find forest. `n` here is small enough (total
/// forecast + observation object count) that the O(n) `which_class`/merge
/// cost is not worth the extra bookkeeping of a true union-find.
#[derive(Debug, Clone)]
pub struct Partition {
    classes: Vec<Vec<i32>>,
}

impl Partition {
    /// Seed `n` singleton classes, `{0}, {1}, ..., {n-1}`
    pub fn set_size(n: usize) -> Self {
        Self {
            classes: (0..n as i32).map(|i| vec![i]).collect(),
        }
    }

    /// Number of elements the partition was built over
    pub fn n_elements(&self) -> usize {
        self.classes.iter().map(|c| c.len()).sum()
    }

    /// Number of classes currently present (merges reduce this count)
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Index of the class containing `element`, if any
    pub fn which_class(&self, element: i32) -> Option<usize> {
        self.classes.iter().position(|c| c.contains(&element))
    }

    /// The elements of class `index`
    pub fn class(&self, index: usize) -> &[i32] {
        &self.classes[index]
    }

    /// Merge the classes containing `a` and `b`
    ///
    /// A no-op if they are already in the same class. Panics if either value
    /// is not present in any class, since that indicates a caller bug (an
    /// edge referencing an object outside the partition's range).
    pub fn merge_values(&mut self, a: i32, b: i32) {
        let ia = self.which_class(a).expect("merge_values: unknown element");
        let ib = self.which_class(b).expect("merge_values: unknown element");

        if ia == ib {
            return;
        }

        let (keep, drop) = (ia.min(ib), ia.max(ib));
        let mut moved = std::mem::take(&mut self.classes[drop]);
        self.classes[keep].append(&mut moved);
        self.classes.remove(drop);
    }

    /// All classes with more than one element, in the order they were first
    /// formed (ties toward the lowest element are stable since classes are
    /// never reordered, only merged and removed)
    pub fn composites(&self) -> Vec<&[i32]> {
        self.classes
            .iter()
            .filter(|c| c.len() > 1)
            .map(|c| c.as_slice())
            .collect()
    }

    /// Log the full partition state at `Debug` level, only when enabled
    ///
    /// Supplements the bare dump contract with the verbosity gate the
    /// original tool's `partition_dump` applies before paying for the
    /// formatting cost.
    pub fn dump_at(&self, level: Level) {
        if !log_enabled!(level) {
            return;
        }
        for (i, class) in self.classes.iter().enumerate() {
            log::log!(level, "partition class {i}: {class:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_singletons() {
        let p = Partition::set_size(3);
        assert_eq!(p.n_classes(), 3);
        assert_eq!(p.n_elements(), 3);
        assert!(p.composites().is_empty());
    }

    #[test]
    fn merge_combines_two_classes() {
        let mut p = Partition::set_size(4);
        p.merge_values(0, 1);
        assert_eq!(p.n_classes(), 3);
        assert_eq!(p.which_class(0), p.which_class(1));
    }

    #[test]
    fn merges_are_transitive_across_repeated_calls() {
        let mut p = Partition::set_size(5);
        p.merge_values(0, 1);
        p.merge_values(1, 2);
        assert_eq!(p.which_class(0), p.which_class(2));
        assert_eq!(p.composites().len(), 1);
        assert_eq!(p.composites()[0].len(), 3);
    }

    #[test]
    fn merging_already_joined_elements_is_a_no_op() {
        let mut p = Partition::set_size(3);
        p.merge_values(0, 1);
        let before = p.n_classes();
        p.merge_values(1, 0);
        assert_eq!(p.n_classes(), before);
    }
}
