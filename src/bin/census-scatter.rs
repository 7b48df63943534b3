use anyhow::{Context, Result};
use census_scatter::{ChartConfig, ChartEvent, ChartHost, CsvFile, RetainedScene, Viewport};
use census_scatter::{stats, storage, viz};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "census-scatter",
    version,
    about = "Render the US Census demographics scatter chart, replaying axis-label clicks"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the chart (and optionally click labels, resize, export and print stats).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Census CSV with columns abbr, poverty, age, income, healthcare, obesity, smokes.
    #[arg(short, long)]
    data: PathBuf,
    /// Write the final frame as SVG.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Window width (default 960).
    #[arg(long, default_value_t = 960)]
    width: u32,
    /// Window height (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Axis label to click (poverty, smokes, obesity, age, income, healthcare). Repeatable.
    #[arg(long = "click")]
    clicks: Vec<String>,
    /// Animation time after each click, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    step_ms: u64,
    /// Resize the window to WxH after the clicks (rebuilds the chart).
    #[arg(long)]
    resize: Option<String>,
    /// Animation time before the snapshot, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    elapsed_ms: u64,
    /// Dump the retained scene as JSON.
    #[arg(long)]
    scene_json: Option<PathBuf>,
    /// Chart config (JSON); missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print per-dimension statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let config = match &args.config {
        Some(p) => ChartConfig::from_json_file(p)
            .with_context(|| format!("reading config {}", p.display()))?,
        None => ChartConfig::default(),
    };
    let resize = match &args.resize {
        Some(s) => {
            let size = parse_size(s)
                .ok_or_else(|| anyhow::anyhow!("invalid --resize, expected WxH"))?;
            Some(size)
        }
        None => None,
    };

    let mut host = ChartHost::launch(
        RetainedScene::new(),
        config,
        Viewport::new(args.width as f64, args.height as f64),
        &CsvFile(args.data.clone()),
    )?;

    for key in &args.clicks {
        let outcome = host.dispatch(ChartEvent::LabelClick(key.clone()))?;
        eprintln!("click {key}: {outcome:?}");
        host.dispatch(ChartEvent::Frame(Duration::from_millis(args.step_ms)))?;
    }

    if let Some((w, h)) = resize {
        host.dispatch(ChartEvent::Resize(Viewport::new(w as f64, h as f64)))?;
    }
    host.dispatch(ChartEvent::Frame(Duration::from_millis(args.elapsed_ms)))?;

    let sel = host.session().selection();
    eprintln!(
        "Selection: x={} y={}",
        sel.x.dimension(),
        sel.y.dimension()
    );

    if let Some(path) = args.out.as_ref() {
        let viewport = host.session().viewport();
        let (width, height) = (viewport.width as u32, viewport.height as u32);
        viz::write_svg(host.surface(), path, width, height)?;
        eprintln!("Wrote chart to {}", path.display());
    }

    if let Some(path) = args.scene_json.as_ref() {
        storage::save_scene_json(host.surface(), path)?;
        eprintln!("Saved scene to {}", path.display());
    }

    if args.stats {
        for s in stats::dimension_summary(host.records()) {
            println!(
                "{:<10} count={}  min={} max={} mean={} median={}",
                s.dimension.key(),
                s.count,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
