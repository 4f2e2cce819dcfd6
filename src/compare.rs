//! Comparison pipeline: statistics, diagrams and report for a set of models.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use skill_diagram::{Figure, MarkerOptions, target_diagram, taylor_diagram};
use skill_metrics::{
    DuplicatePair, StatsKind, StatsReport, TAYLOR_THRESHOLD, TargetReport, TargetSeries, TaylorReport, TaylorSeries,
    check_duplicate_stats, report_duplicate_stats, target_statistics, taylor_statistics, to_json,
};

use crate::config::SkillConfig;
use crate::convert;

/// File name of the rendered target diagram.
pub const TARGET_FILE: &str = "target.svg";
/// File name of the rendered Taylor diagram.
pub const TAYLOR_FILE: &str = "taylor.svg";
/// File name of the statistics report.
pub const STATS_FILE: &str = "statistics.json";

/// Everything computed for one comparison.
#[derive(Debug)]
pub struct Comparison {
    /// Target statistics, one entry per model.
    pub target: TargetSeries,
    /// Taylor statistics; entry 0 is the reference.
    pub taylor: TaylorSeries,
    pub report: StatsReport,
    /// Models whose target markers overlap.
    pub duplicates: Vec<DuplicatePair>,
    pub target_figure: Figure,
    pub taylor_figure: Figure,
    /// Files written to the output directory, if one is configured.
    pub written: Vec<PathBuf>,
}

/// Compare named model series against a reference series.
///
/// Computes target and Taylor statistics for every model, checks the
/// Taylor relation of the collected arrays, reports models whose target
/// markers coincide, lays out both diagrams and, when `[output].dir` is
/// set, writes [`TARGET_FILE`], [`TAYLOR_FILE`] and [`STATS_FILE`] there.
///
/// Markers are labelled with the model names unless the configuration
/// supplies labels.
pub fn compare(reference: &[f64], models: &[(&str, &[f64])], config: &SkillConfig) -> Result<Comparison> {
    let _span = info_span!("compare", n_models = models.len()).entered();
    if models.is_empty() {
        bail!("no models to compare");
    }

    let target_options = convert::build_target_options(&config.target)?;
    let taylor_options = convert::build_taylor_options(&config.taylor)?;
    let names: Vec<String> = models.iter().map(|(name, _)| name.to_string()).collect();
    let target_options = target_options.clone().with_markers(default_labels(target_options.markers(), &names));
    let taylor_options = taylor_options.clone().with_markers(default_labels(taylor_options.markers(), &names));

    // 1. Statistics per model
    let normalize = target_options.normalized();
    let kind = if normalize {
        StatsKind::Normalized
    } else {
        StatsKind::Unnormalized
    };
    let mut target = TargetSeries::new();
    let mut target_report = TargetReport::new(&config.output.title, kind);
    let mut taylor_stats = Vec::with_capacity(models.len());
    for &(name, values) in models {
        let t = target_statistics(values, reference, None, normalize)
            .with_context(|| format!("target statistics failed for model '{name}'"))?;
        debug!(model = name, bias = t.bias, crmsd = t.crmsd, rmsd = t.rmsd, "target statistics");
        target.push(&t);
        target_report.push(name, &t);

        let s = taylor_statistics(values, reference, None)
            .with_context(|| format!("Taylor statistics failed for model '{name}'"))?;
        debug!(model = name, sdev = s.sdev[1], ccoef = s.ccoef[1], "Taylor statistics");
        taylor_stats.push(s);
    }

    let mut taylor = TaylorSeries::new(&taylor_stats[0]);
    let mut taylor_report = TaylorReport::new(&config.output.title, &config.output.reference_label, &taylor_stats[0]);
    for s in &taylor_stats[1..] {
        taylor.push(s);
    }
    for (s, name) in taylor_stats.iter().zip(&names) {
        taylor_report.push(name, s);
    }
    taylor
        .check(TAYLOR_THRESHOLD)
        .context("Taylor statistics are inconsistent")?;

    // 2. Overlapping markers
    let duplicates = check_duplicate_stats(&target.bias, &target.crmsd, config.target.duplicate_threshold)
        .context("duplicate check failed")?;
    report_duplicate_stats(&duplicates);

    // 3. Diagrams
    let mut target_figure = Figure::new().with_width(config.output.width);
    target_diagram(&mut target_figure, &target.bias, &target.crmsd, &target.rmsd, &target_options)
        .context("failed to lay out target diagram")?;
    let mut taylor_figure = Figure::new().with_width(config.output.width);
    taylor_diagram(&mut taylor_figure, &taylor.sdev, &taylor.crmsd, &taylor.ccoef, &taylor_options)
        .context("failed to lay out Taylor diagram")?;
    info!("diagrams laid out");

    let report = StatsReport {
        target: target_report,
        taylor: taylor_report,
    };

    // 4. Output
    let written = match config.output.dir {
        Some(ref dir) => write_outputs(dir, &target_figure, &taylor_figure, &report)?,
        None => Vec::new(),
    };

    Ok(Comparison {
        target,
        taylor,
        report,
        duplicates,
        target_figure,
        taylor_figure,
        written,
    })
}

fn default_labels(markers: &MarkerOptions, names: &[String]) -> MarkerOptions {
    let mut markers = markers.clone();
    if markers.labels.is_empty() {
        markers.labels = names.to_vec();
    }
    markers
}

fn write_outputs(dir: &Path, target: &Figure, taylor: &Figure, report: &StatsReport) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let target_path = dir.join(TARGET_FILE);
    target.save_svg(&target_path)?;
    info!(path = %target_path.display(), "target diagram written");

    let taylor_path = dir.join(TAYLOR_FILE);
    taylor.save_svg(&taylor_path)?;
    info!(path = %taylor_path.display(), "Taylor diagram written");

    let stats_path = dir.join(STATS_FILE);
    let json = to_json(report).context("failed to serialize statistics")?;
    std::fs::write(&stats_path, json)
        .with_context(|| format!("failed to write statistics: {}", stats_path.display()))?;
    info!(path = %stats_path.display(), "statistics written");

    Ok(vec![target_path, taylor_path, stats_path])
}
