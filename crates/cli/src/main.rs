use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use curvearea::api::{AreaCfg, AreaReport, AreaRequest, Placement, Pt2, Rgb, Thumbnail};
use curvearea::entity::curves_from_descriptors;
use curvearea::geom2::cfg;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod input;

#[derive(Parser)]
#[command(name = "curvearea")]
#[command(about = "Area and previews of drawing curves stored as entity descriptors")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Total area enclosed by the curves in a descriptor file
    Area {
        #[arg(long)]
        input: PathBuf,
        /// Only use the stored row with this id
        #[arg(long)]
        id: Option<i64>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        cfg: CfgArgs,
    },
    /// Render a stored block to an SVG thumbnail
    Preview {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        id: Option<i64>,
        /// Thumbnail edge length in pixels
        #[arg(long, default_value_t = 256)]
        size: u32,
        #[arg(long, default_value_t = 8.0)]
        margin: f64,
        #[arg(long, default_value = "#000000")]
        color: Rgb,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        base_x: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        base_y: f64,
        #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
        scale: f64,
        /// Rotation in degrees, counterclockwise
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotation: f64,
        #[command(flatten)]
        cfg: CfgArgs,
    },
    /// Print version and default configuration as JSON
    Report,
}

/// Tolerances and sample counts, defaulting to the library constants.
#[derive(Args, Clone, Copy)]
struct CfgArgs {
    #[arg(long, default_value_t = cfg::EPS)]
    eps: f64,
    #[arg(long, default_value_t = cfg::JOIN_TOLERANCE)]
    join_tolerance: f64,
    #[arg(long, default_value_t = cfg::CLOSURE_TOLERANCE)]
    closure_tolerance: f64,
    #[arg(long, default_value_t = cfg::ARC_SEGMENTS)]
    arc_segments: usize,
    #[arg(long, default_value_t = cfg::SPLINE_SEGMENTS)]
    spline_segments: usize,
}

impl From<CfgArgs> for AreaCfg {
    fn from(a: CfgArgs) -> Self {
        AreaCfg {
            eps: a.eps,
            join_tolerance: a.join_tolerance,
            closure_tolerance: a.closure_tolerance,
            arc_segments: a.arc_segments,
            spline_segments: a.spline_segments,
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Area {
            input,
            id,
            json,
            cfg,
        } => area(&input, id, json, cfg.into()),
        Action::Preview {
            input,
            out,
            id,
            size,
            margin,
            color,
            base_x,
            base_y,
            scale,
            rotation,
            cfg,
        } => {
            let placement = Placement {
                base: Pt2::new(base_x, base_y),
                scale,
                rotation: rotation.to_radians(),
            };
            let opts = PreviewOpts {
                size,
                margin,
                color,
                placement,
            };
            preview(&input, &out, id, &opts, &cfg.into())
        }
        Action::Report => report(),
    }
}

fn area_report(input: &Path, id: Option<i64>, cfg: AreaCfg) -> Result<AreaReport> {
    let list = input::load_descriptors(input, id)?;
    let report = AreaRequest::new(cfg)
        .run_descriptors(&list)
        .with_context(|| format!("calculating area of {}", input.display()))?;
    Ok(report)
}

fn area(input: &Path, id: Option<i64>, json: bool, cfg: AreaCfg) -> Result<()> {
    tracing::info!(input = %input.display(), id = ?id, "area");
    let report = area_report(input, id, cfg)?;
    for issue in &report.skipped {
        tracing::warn!("{issue}");
    }
    for w in &report.warnings {
        tracing::warn!("{w}");
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{:.6}", report.total);
    }
    Ok(())
}

struct PreviewOpts {
    size: u32,
    margin: f64,
    color: Rgb,
    placement: Placement,
}

fn preview(input: &Path, out: &Path, id: Option<i64>, opts: &PreviewOpts, cfg: &AreaCfg) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), size = opts.size, "preview");
    let list = input::load_descriptors(input, id)?;
    let (curves, skipped) = curves_from_descriptors(&list, cfg);
    for issue in &skipped {
        tracing::warn!("{issue}");
    }
    let placed: Vec<_> = curves.iter().map(|(_, c)| c.placed(&opts.placement)).collect();
    let thumb = Thumbnail::render(&placed, opts.size, opts.size, opts.margin, cfg);
    input::write_output(out, thumb.to_svg(opts.color).as_bytes())?;
    tracing::info!(paths = thumb.paths.len(), "preview written");
    Ok(())
}

fn report() -> Result<()> {
    let d = AreaCfg::default();
    let obj = serde_json::json!({
        "name": "curvearea",
        "version": curvearea::VERSION,
        "defaults": {
            "eps": d.eps,
            "join_tolerance": d.join_tolerance,
            "closure_tolerance": d.closure_tolerance,
            "arc_segments": d.arc_segments,
            "spline_segments": d.spline_segments
        }
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
