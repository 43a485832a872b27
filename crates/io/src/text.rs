//! Fixed-width text table writers
//!
//! Every row begins with the same block of run-level header columns (the
//! model/description/obtype strings plus the convolution settings that
//! produced the objects being described), matching the convention of
//! repeating run metadata on every data row rather than writing it once at
//! the top of the file. This keeps each table self-describing when read in
//! isolation.

use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use stobj_config::Config;
use stobj_core::{PairAtt3D, SingleAtt3D};

/// Run-level metadata repeated on every row of every table
#[derive(Debug, Clone)]
pub struct RowHeader {
    pub model: String,
    pub desc: String,
    pub obtype: String,
    pub fcst_rad: i64,
    pub fcst_thr: String,
    pub obs_rad: i64,
    pub obs_thr: String,
}

impl RowHeader {
    /// Build the header block from a validated run configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.header.model.clone(),
            desc: config.header.desc.clone(),
            obtype: config.header.obtype.clone(),
            fcst_rad: config.fcst.conv_radius,
            fcst_thr: config.fcst.conv_thresh.to_string(),
            obs_rad: config.obs.conv_radius,
            obs_thr: config.obs.conv_thresh.to_string(),
        }
    }

    fn write_columns(&self, writer: &mut impl Write) -> std::io::Result<()> {
        write!(
            writer,
            "{} {} {} {} {} {} {} ",
            self.model, self.desc, self.obtype, self.fcst_rad, self.fcst_thr, self.obs_rad, self.obs_thr
        )
    }

    fn column_names() -> &'static str {
        "MODEL DESC OBTYPE FCST_RAD FCST_THR OBS_RAD OBS_THR"
    }
}

/// One row of the cluster (composite) summary table
#[derive(Debug, Clone)]
pub struct ClusterRow {
    pub composite_id: usize,
    pub fcst_objects: Vec<i32>,
    pub obs_objects: Vec<i32>,
}

/// One row of the per-timestep 2D slice table
#[derive(Debug, Clone)]
pub struct SliceRow {
    pub object_number: i32,
    pub is_fcst: bool,
    pub time_index: usize,
    pub area: i64,
    pub centroid_x: f64,
    pub centroid_y: f64,
}

fn field_tag(is_fcst: bool) -> &'static str {
    if is_fcst {
        "FCST"
    } else {
        "OBS"
    }
}

/// Write the per-object single-attribute table (3D, one row per object)
pub fn write_single_table<P: AsRef<Path>>(path: P, header: &RowHeader, rows: &[SingleAtt3D]) -> Result<()> {
    let mut writer = init_writer(path)?;

    writeln!(
        writer,
        "{} FIELD OBJECT_ID CLUSTER_ID SIMPLE VOLUME XBAR YBAR TBAR CENTROID_LAT CENTROID_LON \
         XMIN XMAX YMIN YMAX TMIN TMAX COMPLEXITY XVEL YVEL AXIS_ANGLE CDIST_TRAVELLED \
         P10 P25 P50 P75 P90 PCT_VALUE PCT_USER",
        RowHeader::column_names()
    )?;

    for row in rows {
        header.write_columns(&mut writer)?;
        writeln!(
            writer,
            "{} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {}",
            field_tag(row.is_fcst),
            row.object_number,
            row.cluster_number,
            row.is_simple,
            row.volume,
            row.xbar,
            row.ybar,
            row.tbar,
            row.centroid_lat,
            row.centroid_lon,
            row.xmin,
            row.xmax,
            row.ymin,
            row.ymax,
            row.tmin,
            row.tmax,
            row.complexity,
            row.xvelocity,
            row.yvelocity,
            row.spatial_axis_angle,
            row.cdist_travelled,
            row.ptile_10,
            row.ptile_25,
            row.ptile_50,
            row.ptile_75,
            row.ptile_90,
            row.ptile_value,
            row.ptile_user,
        )?;
    }

    Ok(())
}

/// Write the forecast/observation pair-attribute table (3D, one row per pair)
pub fn write_pair_table<P: AsRef<Path>>(path: P, header: &RowHeader, rows: &[PairAtt3D]) -> Result<()> {
    let mut writer = init_writer(path)?;

    writeln!(
        writer,
        "{} FCST_OBJECT_ID OBS_OBJECT_ID FCST_CLUSTER_ID OBS_CLUSTER_ID INTERSECTION_VOLUME \
         SIMPLE SPACE_CENTROID_DIST TIME_CENTROID_DELTA SPEED_DELTA DIRECTION_DIFF VOLUME_RATIO \
         AXIS_DIFF DURATION_DIFF START_TIME_DELTA END_TIME_DELTA TOTAL_INTEREST",
        RowHeader::column_names()
    )?;

    for row in rows {
        header.write_columns(&mut writer)?;
        writeln!(
            writer,
            "{} {} {} {} {} {} {} {} {} {} {} {} {} {} {}",
            row.fcst_object_number,
            row.obs_object_number,
            row.fcst_cluster_number,
            row.obs_cluster_number,
            row.intersection_volume,
            row.is_simple,
            row.space_centroid_dist,
            row.time_centroid_delta,
            row.speed_delta,
            row.direction_diff,
            row.volume_ratio,
            row.axis_diff,
            row.duration_difference,
            row.start_time_delta,
            row.end_time_delta,
        )?;
    }

    Ok(())
}

/// Write the composite (cluster) summary table: one row per match/merge composite
pub fn write_cluster_table<P: AsRef<Path>>(path: P, header: &RowHeader, rows: &[ClusterRow]) -> Result<()> {
    let mut writer = init_writer(path)?;

    writeln!(
        writer,
        "{} COMPOSITE_ID N_FCST N_OBS FCST_OBJECT_IDS OBS_OBJECT_IDS",
        RowHeader::column_names()
    )?;

    for row in rows {
        header.write_columns(&mut writer)?;
        let fcst_list = row
            .fcst_objects
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let obs_list = row
            .obs_objects
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(
            writer,
            "{} {} {} {} {}",
            row.composite_id,
            row.fcst_objects.len(),
            row.obs_objects.len(),
            fcst_list,
            obs_list,
        )?;
    }

    Ok(())
}

/// Write the per-timestep 2D slice table: one row per (object, time) combination
pub fn write_slice_table<P: AsRef<Path>>(path: P, header: &RowHeader, rows: &[SliceRow]) -> Result<()> {
    let mut writer = init_writer(path)?;

    writeln!(
        writer,
        "{} FIELD OBJECT_ID TIME_INDEX AREA CENTROID_X CENTROID_Y",
        RowHeader::column_names()
    )?;

    for row in rows {
        header.write_columns(&mut writer)?;
        writeln!(
            writer,
            "{} {} {} {} {} {}",
            field_tag(row.is_fcst),
            row.object_number,
            row.time_index,
            row.area,
            row.centroid_x,
            row.centroid_y,
        )?;
    }

    Ok(())
}

fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("stobj-io-test-{}-{name}", std::process::id()))
    }

    fn sample_header() -> RowHeader {
        RowHeader {
            model: "WRF".into(),
            desc: "test".into(),
            obtype: "ANALYS".into(),
            fcst_rad: 2,
            fcst_thr: ">=5.0".into(),
            obs_rad: 2,
            obs_thr: ">=5.0".into(),
        }
    }

    fn sample_single() -> SingleAtt3D {
        SingleAtt3D {
            object_number: 1,
            cluster_number: 1,
            is_fcst: true,
            is_simple: true,
            volume: 10,
            xbar: 1.0,
            ybar: 2.0,
            tbar: 3.0,
            centroid_lat: 40.0,
            centroid_lon: -100.0,
            xmin: 0,
            xmax: 2,
            ymin: 0,
            ymax: 2,
            tmin: 0,
            tmax: 2,
            complexity: 0.8,
            xvelocity: 0.5,
            yvelocity: -0.5,
            spatial_axis_angle: 30.0,
            cdist_travelled: 12.3,
            ptile_10: 1.0,
            ptile_25: 2.0,
            ptile_50: 3.0,
            ptile_75: 4.0,
            ptile_90: 5.0,
            ptile_value: 50.0,
            ptile_user: 3.0,
        }
    }

    #[test]
    fn single_table_has_one_data_row_per_object() {
        let path = temp_path("single.txt");
        write_single_table(&path, &sample_header(), &[sample_single(), sample_single()]).unwrap();

        let mut content = String::new();
        File::open(&path).unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content.lines().count(), 3);
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("MODEL"));
        let header_cols = header.split_whitespace().count();
        for row in lines {
            assert_eq!(row.split_whitespace().count(), header_cols);
        }
    }

    #[test]
    fn cluster_table_joins_member_ids() {
        let path = temp_path("cluster.txt");
        let row = ClusterRow {
            composite_id: 0,
            fcst_objects: vec![1, 2],
            obs_objects: vec![1],
        };
        write_cluster_table(&path, &sample_header(), &[row]).unwrap();

        let mut content = String::new();
        File::open(&path).unwrap().read_to_string(&mut content).unwrap();
        assert!(content.contains("1,2"));
    }
}
