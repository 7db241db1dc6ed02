use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glam::Vec3;
use roomview_input::InputEvent;
use roomview_render::DebugTextRenderer;
use roomview_view::{HeadlessHost, RoomView, ViewConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roomview", about = "Headless tools for the animated room")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version and crate info
    Info,
    /// Mount a headless view and run it for a number of ticks
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
struct SimulateArgs {
    /// Number of ticks to run
    #[arg(long, default_value = "120")]
    ticks: u64,

    /// Seconds between ticks
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Normalized pointer x in [-1, 1]
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pointer_x: f32,

    /// Normalized pointer y in [-1, 1], up positive
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pointer_y: f32,

    /// Keys held for the whole run (e.g. w, arrowleft)
    #[arg(long = "hold")]
    hold: Vec<String>,

    /// Seed for cube colours and spin speeds
    #[arg(long, default_value = "0")]
    seed: u64,

    #[arg(long, default_value = "1280")]
    width: u32,

    #[arg(long, default_value = "720")]
    height: u32,

    /// Print a JSON report instead of the last frame
    #[arg(long)]
    json: bool,

    /// List every object in the printed frame
    #[arg(long)]
    objects: bool,
}

#[derive(Debug, Serialize)]
struct CubeReport {
    height: f32,
    spin: f32,
}

/// Where the animated parts ended up after a simulated run.
#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    ticks: u64,
    elapsed: f64,
    camera_eye: Vec3,
    camera_target: Vec3,
    hour_hand: f32,
    minute_hand: f32,
    point_light: f32,
    screen_glow: f32,
    cubes: Vec<CubeReport>,
    state_hash: u64,
}

struct Outcome {
    last_frame: String,
    report: Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("roomview v{}", env!("CARGO_PKG_VERSION"));
            println!("  scene:  {}", roomview_scene::crate_info());
            println!("  input:  {}", roomview_input::crate_info());
            println!("  kernel: {}", roomview_kernel::crate_info());
            println!("  render: {}", roomview_render::crate_info());
            println!("  view:   {}", roomview_view::crate_info());
        }
        Commands::Simulate(args) => {
            let outcome = simulate(&args)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome.report)?);
            } else {
                print!("{}", outcome.last_frame);
                println!("state hash: {:016x}", outcome.report.state_hash);
            }
        }
    }

    Ok(())
}

fn simulate(args: &SimulateArgs) -> Result<Outcome> {
    anyhow::ensure!(args.ticks > 0, "--ticks must be at least 1");
    anyhow::ensure!(
        args.dt.is_finite() && args.dt >= 0.0,
        "--dt must be a non-negative number of seconds"
    );
    anyhow::ensure!(
        (-1.0..=1.0).contains(&args.pointer_x) && (-1.0..=1.0).contains(&args.pointer_y),
        "pointer coordinates must lie in [-1, 1]"
    );

    let mut host = HeadlessHost::new(args.width, args.height);
    if args.objects {
        host = host.listing_objects();
    }
    let mut view: RoomView<DebugTextRenderer> = RoomView::new(ViewConfig::with_seed(args.seed));
    view.mount(&mut host).context("mounting headless view")?;

    let (w, h) = (args.width as f32, args.height as f32);
    view.handle_input(&InputEvent::PointerMoved {
        x: (args.pointer_x + 1.0) / 2.0 * w,
        y: (1.0 - args.pointer_y) / 2.0 * h,
        width: w,
        height: h,
    });
    for key in &args.hold {
        view.handle_input(&InputEvent::KeyDown(key.clone()));
    }

    let mut last_frame = String::new();
    for _ in 0..args.ticks {
        let token = host.queue().take_due().context("no tick pending")?;
        last_frame = view.on_tick(token)?;
        host.time().advance_secs(args.dt);
    }
    tracing::info!(ticks = view.tick_count(), seed = args.seed, "simulation finished");

    let report = report(&view, args)?;
    view.unmount();
    Ok(Outcome { last_frame, report })
}

fn report(view: &RoomView<DebugTextRenderer>, args: &SimulateArgs) -> Result<Report> {
    let scene = view.scene().context("view is not mounted")?;
    let rig = view.rig().context("view is not mounted")?;
    let camera = view.camera().context("view is not mounted")?;

    let rotation_z = |id| scene.transform(id).map_or(0.0, |t| t.rotation.z);
    let cubes = rig
        .cubes
        .iter()
        .filter_map(|c| scene.transform(c.object))
        .map(|t| CubeReport {
            height: t.position.y,
            spin: t.rotation.y,
        })
        .collect();

    Ok(Report {
        seed: args.seed,
        ticks: view.tick_count(),
        elapsed: (args.ticks - 1) as f64 * f64::from(args.dt),
        camera_eye: camera.eye,
        camera_target: camera.target,
        hour_hand: rotation_z(rig.hour_hand),
        minute_hand: rotation_z(rig.minute_hand),
        point_light: scene.light(rig.point_light).map_or(0.0, |l| l.intensity),
        screen_glow: scene
            .object(rig.screen)
            .and_then(|o| o.material())
            .map_or(0.0, |m| m.emissive_intensity),
        cubes,
        state_hash: scene.state_hash(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SimulateArgs {
        SimulateArgs {
            ticks: 30,
            dt: 1.0 / 60.0,
            pointer_x: 0.0,
            pointer_y: 0.0,
            hold: Vec::new(),
            seed: 7,
            width: 800,
            height: 600,
            json: false,
            objects: false,
        }
    }

    #[test]
    fn simulate_runs_every_tick() {
        let outcome = simulate(&args()).unwrap();
        assert_eq!(outcome.report.ticks, 30);
        assert_eq!(outcome.report.cubes.len(), 5);
        assert!(outcome.last_frame.starts_with("=== Frame 30"));
    }

    #[test]
    fn same_seed_same_hash() {
        let a = simulate(&args()).unwrap();
        let b = simulate(&args()).unwrap();
        assert_eq!(a.report.state_hash, b.report.state_hash);
    }

    #[test]
    fn holding_w_moves_camera_forward() {
        let mut a = args();
        a.hold = vec!["w".into()];
        let outcome = simulate(&a).unwrap();
        assert!(outcome.report.camera_eye.z < 8.0);
    }

    #[test]
    fn pointer_pulls_camera_towards_corner() {
        let mut a = args();
        a.pointer_x = 1.0;
        a.pointer_y = 1.0;
        let outcome = simulate(&a).unwrap();
        assert!(outcome.report.camera_eye.x > 0.0);
        assert!(outcome.report.camera_eye.y > 2.0);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        let mut a = args();
        a.ticks = 0;
        assert!(simulate(&a).is_err());

        let mut a = args();
        a.dt = -1.0;
        assert!(simulate(&a).is_err());

        let mut a = args();
        a.pointer_x = 3.0;
        assert!(simulate(&a).is_err());
    }

    #[test]
    fn report_serializes() {
        let outcome = simulate(&args()).unwrap();
        let json = serde_json::to_value(&outcome.report).unwrap();
        assert_eq!(json["seed"], 7);
        assert!(json["camera_eye"].is_array());
    }
}
