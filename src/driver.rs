//! Orchestration of a verification run
//!
//! Mirrors the ten-step pipeline: read, convolve, threshold, label, attribute,
//! pair/match-merge, cluster-attribute, back-annotate, emit. `--single` mode
//! short-circuits after step 6 (single-object attributes only).

use stobj_config::Config;
use stobj_core::{
    calc_3d_pair_atts, calc_3d_single_atts, FloatVolume, IntVolume, InterestCalculator,
    MatchMergeEngine, PairAtt3D, SingleAtt3D,
};
use stobj_geo::GridGeometry;
use stobj_io::{
    write_cluster_table, write_object_netcdf, write_pair_table, write_single_table,
    write_slice_table, ClusterRow, GriddedFieldSource, NcWriteFlags, NetcdfFieldSource, RawField,
    RowHeader, SliceRow,
};

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Run the full pipeline for `cli`
pub fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_path(&cli.config)?;
    let functions = config.validate()?;

    std::fs::create_dir_all(&cli.outdir)?;

    if cli.is_single_mode() {
        run_single(cli, &config)
    } else {
        run_paired(cli, &config, &functions)
    }
}

fn run_single(cli: &Cli, config: &Config) -> Result<()> {
    if cli.single.is_empty() {
        return Err(Error::NoSingleInput);
    }

    log::info!("reading {} single-field file(s)", cli.single.len());
    let source = NetcdfFieldSource::new(cli.single.clone());
    let raw = source.read_field(&cli.field)?;

    let labeled = prepare_objects(&raw, config.fcst.conv_radius, config.fcst.conv_time_window, &config.fcst.conv_thresh, config.min_volume);

    let atts = collect_single_atts(&labeled, &raw.data, true, &raw.geo, config.fcst.inten_perc_value)?;
    log::info!("found {} object(s)", atts.len());

    let header = RowHeader::from_config(config);
    let prefix = output_prefix(config);

    write_single_table(cli.outdir.join(format!("{prefix}3d_single.txt")), &header, &atts)?;
    write_slice_table(cli.outdir.join(format!("{prefix}2d_slice.txt")), &header, &slice_rows(&labeled, true))?;

    if config.output.nc_output.enabled() {
        let flags = to_nc_write_flags(&config.output.nc_output.flags());
        write_object_netcdf(
            cli.outdir.join(format!("{prefix}obj.nc")),
            &labeled,
            Some(&raw.data),
            None,
            &raw.geo,
            "obj",
            flags,
        )?;
    }

    Ok(())
}

fn run_paired(cli: &Cli, config: &Config, functions: &stobj_config::InterestFunctions) -> Result<()> {
    log::info!("reading {} forecast and {} observation file(s)", cli.fcst.len(), cli.obs.len());

    let fcst_source = NetcdfFieldSource::new(cli.fcst.clone());
    let obs_source = NetcdfFieldSource::new(cli.obs.clone());
    let fcst_raw = fcst_source.read_field(&cli.field)?;
    let obs_raw = obs_source.read_field(&cli.field)?;

    if fcst_raw.nx != obs_raw.nx || fcst_raw.ny != obs_raw.ny {
        return Err(Error::GridMismatch {
            fcst_nx: fcst_raw.nx,
            fcst_ny: fcst_raw.ny,
            obs_nx: obs_raw.nx,
            obs_ny: obs_raw.ny,
        });
    }
    if fcst_raw.nt != obs_raw.nt {
        return Err(Error::TimestepMismatch {
            fcst_nt: fcst_raw.nt,
            obs_nt: obs_raw.nt,
        });
    }

    let fcst_labeled = prepare_objects(&fcst_raw, config.fcst.conv_radius, config.fcst.conv_time_window, &config.fcst.conv_thresh, config.min_volume);
    let obs_labeled = prepare_objects(&obs_raw, config.obs.conv_radius, config.obs.conv_time_window, &config.obs.conv_thresh, config.min_volume);

    let calculator = InterestCalculator::from_config(config, functions);

    let mut fcst_atts = collect_single_atts(&fcst_labeled, &fcst_raw.data, true, &fcst_raw.geo, config.fcst.inten_perc_value)?;
    let mut obs_atts = collect_single_atts(&obs_labeled, &obs_raw.data, false, &obs_raw.geo, config.obs.inten_perc_value)?;

    log::info!("{} forecast object(s), {} observation object(s)", fcst_atts.len(), obs_atts.len());

    let header = RowHeader::from_config(config);
    let prefix = output_prefix(config);

    let mut composites_written = Vec::new();
    let mut fcst_clus_ids: Option<Vec<i32>> = None;
    let mut obs_clus_ids: Option<Vec<i32>> = None;

    if !fcst_atts.is_empty() && !obs_atts.is_empty() {
        let mut pairs: Vec<Vec<PairAtt3D>> = Vec::with_capacity(fcst_atts.len());
        for f in &fcst_atts {
            let mut row = Vec::with_capacity(obs_atts.len());
            for o in &obs_atts {
                let mut pair = calc_3d_pair_atts(&fcst_labeled, &obs_labeled, f, o);
                pair.total_interest = calculator.total_interest(&pair);
                row.push(pair);
            }
            pairs.push(row);
        }

        let mut engine = MatchMergeEngine::set_size(fcst_atts.len(), obs_atts.len());
        engine.do_match_merge(&pairs, config.total_interest_thresh);

        // back-annotate cluster numbers into the simple attributes
        for (f, att) in fcst_atts.iter_mut().enumerate() {
            if let Some(composite) = engine.map_fcst_id_to_composite(f) {
                att.cluster_number = composite as i32 + 1;
            }
        }
        for (o, att) in obs_atts.iter_mut().enumerate() {
            if let Some(composite) = engine.map_obs_id_to_composite(o) {
                att.cluster_number = composite as i32 + 1;
            }
        }

        let printed_pairs: Vec<PairAtt3D> = pairs
            .into_iter()
            .flatten()
            .filter(|p| p.total_interest >= config.print_interest_thresh)
            .collect();
        write_pair_table(cli.outdir.join(format!("{prefix}3d_simple_pair.txt")), &header, &printed_pairs)?;

        let (cluster_single, cluster_pair, clusters) = collect_cluster_atts(
            &engine,
            &fcst_labeled,
            &obs_labeled,
            &fcst_raw,
            &obs_raw,
            config,
        )?;
        write_single_table(cli.outdir.join(format!("{prefix}3d_cluster_single.txt")), &header, &cluster_single)?;
        write_pair_table(cli.outdir.join(format!("{prefix}3d_cluster_pair.txt")), &header, &cluster_pair)?;
        composites_written = clusters;

        fcst_clus_ids = Some(clus_id_array(&fcst_labeled, |f| engine.map_fcst_id_to_composite(f)));
        obs_clus_ids = Some(clus_id_array(&obs_labeled, |o| engine.map_obs_id_to_composite(o)));
    } else {
        log::warn!("no objects on one or both sides; skipping pair and cluster computation");
    }

    let all_simple: Vec<SingleAtt3D> = fcst_atts.iter().chain(obs_atts.iter()).copied().collect();
    write_single_table(cli.outdir.join(format!("{prefix}3d_simple_single.txt")), &header, &all_simple)?;

    let mut slices = slice_rows(&fcst_labeled, true);
    slices.extend(slice_rows(&obs_labeled, false));
    write_slice_table(cli.outdir.join(format!("{prefix}2d_slice.txt")), &header, &slices)?;

    write_cluster_table(cli.outdir.join(format!("{prefix}clusters.txt")), &header, &composites_written)?;

    if config.output.nc_output.enabled() {
        let flags = to_nc_write_flags(&config.output.nc_output.flags());
        write_object_netcdf(
            cli.outdir.join(format!("{prefix}fcst_obj.nc")),
            &fcst_labeled,
            Some(&fcst_raw.data),
            fcst_clus_ids.as_deref(),
            &fcst_raw.geo,
            "fcst",
            flags,
        )?;
        write_object_netcdf(
            cli.outdir.join(format!("{prefix}obs_obj.nc")),
            &obs_labeled,
            Some(&obs_raw.data),
            obs_clus_ids.as_deref(),
            &obs_raw.geo,
            "obs",
            flags,
        )?;
    }

    Ok(())
}

/// Per-voxel composite-cluster id for every voxel of `labeled`, `0` where the
/// voxel has no object or the object was never merged into a composite
fn clus_id_array(labeled: &IntVolume, map_to_composite: impl Fn(usize) -> Option<usize>) -> Vec<i32> {
    let (nx, ny, nt) = (labeled.nx(), labeled.ny(), labeled.nt());
    let mut out = Vec::with_capacity(nx * ny * nt);
    for t in 0..nt {
        for y in 0..ny {
            for x in 0..nx {
                let label = labeled.get(x, y, t);
                let id = if label == 0 {
                    0
                } else {
                    map_to_composite(label as usize - 1).map(|c| c as i32 + 1).unwrap_or(0)
                };
                out.push(id);
            }
        }
    }
    out
}

fn to_nc_write_flags(flags: &stobj_config::NcOutputFlags) -> NcWriteFlags {
    NcWriteFlags {
        latlon: flags.latlon_flag,
        raw: flags.raw_flag,
        object_id: flags.object_id_flag,
        cluster_id: flags.cluster_id_flag,
    }
}

/// Convolve, threshold, label and toss small objects: steps 2-4 of the pipeline
fn prepare_objects(
    raw: &RawField,
    conv_radius: i64,
    conv_time_window: i64,
    conv_thresh: &stobj_config::Threshold,
    min_volume: i64,
) -> IntVolume {
    let volume = FloatVolume::new(raw.nx, raw.ny, raw.nt, raw.data.clone(), raw.sentinel)
        .expect("RawField dimensions are internally consistent");
    let convolved = volume.convolve(conv_radius, conv_time_window);
    let mask = convolved.threshold(conv_thresh);
    mask.label_components().toss_small_objects(min_volume)
}

/// Step 6: single-object attributes for every labeled object, 1..=max_label
fn collect_single_atts(
    labeled: &IntVolume,
    raw: &[f64],
    is_fcst: bool,
    geo: &GridGeometry,
    inten_perc_value: f64,
) -> Result<Vec<SingleAtt3D>> {
    let mut out = Vec::with_capacity(labeled.max_label() as usize);
    for label in 1..=labeled.max_label() {
        if labeled.volume(label) == 0 {
            continue;
        }
        out.push(calc_3d_single_atts(labeled, raw, label, is_fcst, geo, inten_perc_value)?);
    }
    Ok(out)
}

/// 2D per-time-slice rows for every labeled object
fn slice_rows(labeled: &IntVolume, is_fcst: bool) -> Vec<SliceRow> {
    let mut out = Vec::new();
    for label in 1..=labeled.max_label() {
        for t in 0..labeled.nt() {
            let Some((cx, cy)) = labeled.calc_2d_centroid_at_t(t, label) else {
                continue;
            };
            let area = labeled.const_t_mask(t, label).iter().filter(|&&on| on).count() as i64;
            out.push(SliceRow {
                object_number: label,
                is_fcst,
                time_index: t,
                area,
                centroid_x: cx,
                centroid_y: cy,
            });
        }
    }
    out
}

/// Steps 8-9: cluster-level single and pair attributes, one pairing per composite
///
/// Each composite's forecast members are unioned into one mask and treated as
/// a single cluster object (and likewise for the observation members), so a
/// composite always yields exactly one forecast cluster attribute and one
/// observation cluster attribute. `TotalInterest` is fixed at `-1.0`: cluster
/// interest has no meaning once objects have already been merged.
fn collect_cluster_atts(
    engine: &MatchMergeEngine,
    fcst_labeled: &IntVolume,
    obs_labeled: &IntVolume,
    fcst_raw: &RawField,
    obs_raw: &RawField,
    config: &Config,
) -> Result<(Vec<SingleAtt3D>, Vec<PairAtt3D>, Vec<ClusterRow>)> {
    let mut single = Vec::new();
    let mut pair = Vec::new();
    let mut clusters = Vec::new();

    for (i, composite) in engine.composites().into_iter().enumerate() {
        let fcst_members: Vec<i32> = engine
            .fcst_composite(composite)
            .into_iter()
            .map(|f| f as i32 + 1)
            .collect();
        let obs_members: Vec<i32> = engine
            .obs_composite(composite)
            .into_iter()
            .map(|o| o as i32 + 1)
            .collect();

        if fcst_members.is_empty() || obs_members.is_empty() {
            continue;
        }

        let fcst_mask = fcst_labeled.select_cluster(&fcst_members);
        let obs_mask = obs_labeled.select_cluster(&obs_members);

        let mut fcst_att = calc_3d_single_atts(&fcst_mask, &fcst_raw.data, 1, true, &fcst_raw.geo, config.fcst.inten_perc_value)?;
        let mut obs_att = calc_3d_single_atts(&obs_mask, &obs_raw.data, 1, false, &obs_raw.geo, config.obs.inten_perc_value)?;

        // pair attributes need the object numbers the masks actually carry (both `1`)
        let mut cluster_pair = calc_3d_pair_atts(&fcst_mask, &obs_mask, &fcst_att, &obs_att);
        cluster_pair.is_simple = false;
        cluster_pair.total_interest = -1.0;
        cluster_pair.fcst_object_number = i as i32 + 1;
        cluster_pair.obs_object_number = i as i32 + 1;
        cluster_pair.fcst_cluster_number = i as i32 + 1;
        cluster_pair.obs_cluster_number = i as i32 + 1;

        fcst_att.is_simple = false;
        obs_att.is_simple = false;
        fcst_att.object_number = i as i32 + 1;
        fcst_att.cluster_number = i as i32 + 1;
        obs_att.object_number = i as i32 + 1;
        obs_att.cluster_number = i as i32 + 1;

        single.push(fcst_att);
        single.push(obs_att);
        pair.push(cluster_pair);
        clusters.push(ClusterRow {
            composite_id: i,
            fcst_objects: fcst_members,
            obs_objects: obs_members,
        });
    }

    Ok((single, pair, clusters))
}

fn output_prefix(config: &Config) -> String {
    if config.output.output_prefix.is_empty() {
        String::new()
    } else {
        format!("{}_", config.output.output_prefix)
    }
}
