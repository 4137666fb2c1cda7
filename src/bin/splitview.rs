use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use splitview::{
    ContentSize, FitPolicy, LayerSlot, NullHost, Point, SplitGeometry, SplitView,
    SplitViewConfig, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "splitview", version)]
struct Cli {
    /// Log state-machine transitions to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the fit resolution for a content size inside a viewport.
    Fit(FitArgs),
    /// Print the split boundary polygon for a percentage.
    Path(PathArgs),
    /// Tick a view through its animations and print one JSON line per tick.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Intrinsic content size, `WxH`.
    #[arg(long)]
    content: Dims,

    /// Viewport content box, `WxH`.
    #[arg(long)]
    view: Dims,

    #[arg(long, value_parser = FitPolicy::parse, default_value = "align_center")]
    policy: FitPolicy,
}

#[derive(Parser, Debug)]
struct PathArgs {
    /// Split percentage (0-100).
    #[arg(long)]
    percent: u8,

    #[arg(long)]
    content: Dims,

    #[arg(long)]
    view: Dims,

    #[arg(long, value_parser = FitPolicy::parse, default_value = "align_center")]
    policy: FitPolicy,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// View configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "200x100")]
    content: Dims,

    #[arg(long, default_value = "200x100")]
    view: Dims,

    /// Drag to this pointer position (`X,Y`) and release before ticking.
    #[arg(long)]
    drag_to: Option<Pos>,

    /// Clock step per tick in milliseconds.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    #[arg(long, default_value_t = 60)]
    ticks: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Dims {
    w: i32,
    h: i32,
}

impl FromStr for Dims {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .with_context(|| format!("expected WxH, got '{s}'"))?;
        Ok(Self {
            w: w.trim().parse().with_context(|| format!("bad width in '{s}'"))?,
            h: h.trim().parse().with_context(|| format!("bad height in '{s}'"))?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pos(Point);

impl FromStr for Pos {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .trim()
            .split_once(',')
            .with_context(|| format!("expected X,Y, got '{s}'"))?;
        Ok(Self(Point::new(
            x.trim().parse().with_context(|| format!("bad x in '{s}'"))?,
            y.trim().parse().with_context(|| format!("bad y in '{s}'"))?,
        )))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Fit(args) => cmd_fit(args),
        Command::Path(args) => cmd_path(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let fit = splitview::resolve(
        ContentSize::new(args.content.w, args.content.h),
        args.view.w,
        args.view.h,
        args.policy,
        None,
    );
    println!("{}", serde_json::to_string_pretty(&fit)?);
    Ok(())
}

fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    let percent = splitview::checked_percent(i32::from(args.percent))?;
    let geom = SplitGeometry {
        content_max: Some(ContentSize::new(args.content.w, args.content.h)),
        view_w: args.view.w,
        view_h: args.view.h,
        policy: args.policy,
    };
    let poly = splitview::generate(percent, &geom)
        .context("content size must be positive on both axes")?;
    println!("{}", serde_json::to_string_pretty(&poly)?);
    Ok(())
}

fn read_config(path: &Path) -> anyhow::Result<SplitViewConfig> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("open config '{}'", path.display()))?;
    let cfg = SplitViewConfig::from_json(&s).with_context(|| "parse config JSON")?;
    Ok(cfg)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => read_config(path)?,
        None => SplitViewConfig::default(),
    };
    let mut view: SplitView<ContentSize, NullHost> = SplitView::from_config(&cfg, NullHost)?;

    let width = u32::try_from(args.view.w).context("view width must be >= 0")?;
    let height = u32::try_from(args.view.h).context("view height must be >= 0")?;
    view.set_viewport(Viewport::new(width, height));

    let content = ContentSize::new(args.content.w, args.content.h);
    view.set_content(LayerSlot::Background, Some(content));
    view.set_content(LayerSlot::Foreground, Some(content));

    if let Some(Pos(p)) = args.drag_to {
        view.on_drag_start(p);
        view.on_drag_move(p);
        view.on_drag_end(p);
    }

    let mut t_ms = 0u64;
    print_line(&view, t_ms)?;
    for _ in 0..args.ticks {
        t_ms += args.step_ms;
        view.tick(args.step_ms);
        print_line(&view, t_ms)?;
    }
    Ok(())
}

fn print_line(view: &SplitView<ContentSize, NullHost>, t_ms: u64) -> anyhow::Result<()> {
    let line = serde_json::json!({
        "t_ms": t_ms,
        "mode": view.animation_state(),
        "percent": view.percent(),
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}
