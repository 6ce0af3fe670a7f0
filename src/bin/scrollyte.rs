use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollyte", version)]
struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a scene JSON and print the schema report.
    Validate(SceneArgs),
    /// Print focal/layer overlap warnings for every section.
    Overlap(OverlapArgs),
    /// Print derived scroll heights, zones and card thresholds.
    Timing(TimingArgs),
    /// Step through the scroll range and print one visibility record per tick.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug, Clone, Copy)]
struct ViewportArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 1080.0)]
    height: f64,
}

impl ViewportArgs {
    fn viewport(self) -> anyhow::Result<scrollyte::Viewport> {
        Ok(scrollyte::Viewport::new(self.width, self.height)?)
    }
}

#[derive(Args, Debug)]
struct OverlapArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    viewport: ViewportArgs,
}

#[derive(Args, Debug)]
struct TimingArgs {
    /// Input scene JSON; without it a table for 0..=4 cards is printed.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Timing constants JSON overriding the defaults.
    #[arg(long)]
    timing: Option<PathBuf>,

    #[command(flatten)]
    viewport: ViewportArgs,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timing constants JSON overriding the defaults.
    #[arg(long)]
    timing: Option<PathBuf>,

    #[command(flatten)]
    viewport: ViewportArgs,

    /// Scroll distance between ticks, in pixels.
    #[arg(long, default_value_t = 120.0)]
    step: f64,

    /// Simulated time between ticks, in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Overlap(args) => cmd_overlap(args),
        Command::Timing(args) => cmd_timing(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "scrollyte=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_scene(path: &Path) -> anyhow::Result<scrollyte::Scene> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    scrollyte::Scene::from_reader(BufReader::new(f))
        .with_context(|| format!("load scene '{}'", path.display()))
}

fn read_timing(path: Option<&Path>) -> anyhow::Result<scrollyte::TimingConstants> {
    match path {
        Some(p) => scrollyte::TimingConstants::from_path(p)
            .with_context(|| format!("load timing constants '{}'", p.display())),
        None => Ok(scrollyte::TimingConstants::default()),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("write JSON to stdout")?;
    writeln!(out).context("write JSON to stdout")?;
    Ok(())
}

fn cmd_validate(args: SceneArgs) -> anyhow::Result<()> {
    let path = &args.in_path;
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse scene JSON")?;

    let report = scrollyte::validate_schema(&value);
    print_json(&report)?;
    if !report.valid {
        anyhow::bail!(
            "scene '{}' has {} schema error(s)",
            path.display(),
            report.errors.len()
        );
    }
    Ok(())
}

fn cmd_overlap(args: OverlapArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let opts = scrollyte::OverlapOpts {
        viewport: args.viewport.viewport()?,
        ..scrollyte::OverlapOpts::default()
    };
    let report = scrollyte::validate_all_sections(&scene, &opts);
    print_json(&report)
}

#[derive(serde::Serialize)]
struct TimingRow {
    section: Option<String>,
    cards: usize,
    hold_vh: f64,
    fade_vh: f64,
    height_vh: u32,
    card_thresholds_px: Vec<f64>,
}

fn cmd_timing(args: TimingArgs) -> anyhow::Result<()> {
    let timing = read_timing(args.timing.as_deref())?;
    let viewport = args.viewport.viewport()?;
    let fraction = scrollyte::DEFAULT_FADE_ZONE_FRACTION;
    let thresholds = |cards: usize| -> Vec<f64> {
        (0..cards)
            .map(|i| timing.card_threshold(viewport.height, i).threshold_px)
            .collect()
    };

    let mut rows = Vec::new();
    match &args.in_path {
        Some(path) => {
            let scene = read_scene(path)?;
            let last = scene.sections.len().saturating_sub(1);
            for (i, section) in scene.sections.iter().enumerate() {
                let cards = section.card_count();
                let (hold, fade) = timing
                    .zone_bounds_vh(&section.scroll, cards, fraction)
                    .with_context(|| format!("resolve zones of section '{}'", section.id))?;
                let height_vh = match section.scroll.height_vh {
                    Some(h) => h,
                    None => timing.section_scroll_height(cards, i == last, fade),
                };
                rows.push(TimingRow {
                    section: Some(section.id.clone()),
                    cards,
                    hold_vh: hold.0,
                    fade_vh: fade.0,
                    height_vh,
                    card_thresholds_px: thresholds(cards),
                });
            }
        }
        None => {
            for cards in 0..=4 {
                let (hold, fade) =
                    timing.zone_bounds_vh(&scrollyte::ScrollConfig::default(), cards, fraction)?;
                rows.push(TimingRow {
                    section: None,
                    cards,
                    hold_vh: hold.0,
                    fade_vh: fade.0,
                    height_vh: timing.section_scroll_height(cards, false, fade),
                    card_thresholds_px: thresholds(cards),
                });
            }
        }
    }

    print_json(&serde_json::json!({
        "viewport": viewport,
        "constants": timing,
        "rows": rows,
    }))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !args.step.is_finite() || args.step <= 0.0 {
        anyhow::bail!("--step must be > 0 (got {})", args.step);
    }
    let mut scene = read_scene(&args.in_path)?;
    let timing = read_timing(args.timing.as_deref())?;
    let viewport = args.viewport.viewport()?;

    let opts = scrollyte::ControllerOpts {
        timing,
        ..scrollyte::ControllerOpts::default()
    };
    scene
        .resolve_scroll_heights(&opts.timing, opts.default_fade_zone_fraction)
        .context("derive scroll heights")?;
    let layout = scrollyte::ScrollLayout::new(&scene, viewport)?;
    let mut controller = scrollyte::ScrollController::setup(&scene, opts)?;
    let mut store = scrollyte::InMemoryVisualStore::new();

    let mut out = std::io::stdout().lock();
    let max_scroll = layout.max_scroll_px();
    let mut scroll_y = 0.0;
    let mut now_ms = 0;
    let mut first = true;
    loop {
        let input = layout.tick_input(scroll_y, now_ms);
        let report = if first {
            first = false;
            controller.on_load(&input, &mut store)?
        } else {
            controller.on_scroll(&input, &mut store)?
        };

        let sections: Vec<_> = store
            .iter()
            .filter(|(_, v)| v.painted)
            .map(|(id, v)| serde_json::json!({ "id": id, "state": v.state, "opacity": v.opacity }))
            .collect();
        let record = serde_json::json!({
            "scroll_y": scroll_y,
            "now_ms": now_ms,
            "sections": sections,
            "trailing_opacity": store.trailing_opacity(),
            "events": report.events,
        });
        serde_json::to_writer(&mut out, &record).context("write trace to stdout")?;
        writeln!(out).context("write trace to stdout")?;

        if scroll_y >= max_scroll {
            break;
        }
        scroll_y = (scroll_y + args.step).min(max_scroll);
        now_ms += args.tick_ms;
    }
    Ok(())
}
