//! Yucca CLI - scenario runner for the GNSS position glitch guard.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use nalgebra::Vector2;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yucca_core::GuardConfig;
use yucca_sim::{
    generate_fix_stream, run_guard, simulate_track, FaultKind, FaultWindow, FixNoiseConfig,
    FixStream, GuardRunResult, ScenarioParams, TruthTrack,
};

#[derive(Parser, Debug)]
#[command(name = "yucca-cli")]
#[command(about = "GNSS glitch-guard scenario runner")]
#[command(version)]
struct Args {
    /// Output directory
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Output file format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Run a single scenario
    #[arg(long)]
    single: bool,

    // ── Scenario parameters ───────────────────────────────────
    #[arg(long, default_value_t = 60.0)]
    duration: f64,

    #[arg(long, default_value_t = 5.0)]
    tick_hz: f64,

    #[arg(long, default_value_t = 35.0)]
    origin_lat: f64,

    #[arg(long, default_value_t = -106.0)]
    origin_lon: f64,

    #[arg(long, default_value_t = 5.0)]
    hold: f64,

    #[arg(long, default_value_t = 800.0)]
    cruise_speed: f64, // cm/s

    #[arg(long, default_value_t = 150.0)]
    accel: f64, // cm/s²

    #[arg(long, default_value_t = 45.0)]
    heading: f64, // ° from north

    // ── Receiver noise ────────────────────────────────────────
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 1.0)]
    noise_scale: f64,

    #[arg(long, default_value_t = 150.0)]
    pos_noise: f64, // cm

    #[arg(long, default_value_t = 20.0)]
    vel_noise: f64, // cm/s

    // ── Fault injection ───────────────────────────────────────
    /// Start of a multipath-style position jump, seconds
    #[arg(long)]
    jump_at: Option<f64>,

    #[arg(long, default_value_t = 2.0)]
    jump_duration: f64,

    #[arg(long, default_value_t = 5_000.0)]
    jump_north: f64, // cm

    #[arg(long, default_value_t = 0.0)]
    jump_east: f64, // cm

    /// Start of a loss-of-lock window, seconds
    #[arg(long)]
    lock_loss_at: Option<f64>,

    #[arg(long, default_value_t = 1.0)]
    lock_loss_duration: f64,

    // ── Guard options ─────────────────────────────────────────
    #[arg(long, default_value_t = 200.0)]
    radius: f64, // cm

    #[arg(long, default_value_t = 1000.0)]
    accel_max: f64, // cm/s²

    #[arg(long)]
    disable_guard: bool,

    // ── Sweep options ─────────────────────────────────────────
    #[arg(long, default_value_t = 5)]
    sweep_steps: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    println!("Yucca Glitch-Guard Runner");
    println!("=========================\n");

    if args.single {
        run_single(&args)?;
    } else {
        run_sweep(&args)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Single Run
// ---------------------------------------------------------------------------
fn run_single(args: &Args) -> Result<()> {
    println!("Running single scenario...");

    let track = simulate_track(&build_scenario(args));
    let faults = build_faults(args);
    let stream = generate_fix_stream(&track, &build_noise(args), &faults);

    tracing::info!(
        ticks = stream.fixes.len(),
        faults = faults.len(),
        "fix stream synthesized"
    );

    let config = build_guard_config(args);
    let result = run_guard(&stream, &config);

    print_run_stats(&result);
    write_output(args, &track, &stream, &config, &result)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Sweep Run
// ---------------------------------------------------------------------------
fn run_sweep(args: &Args) -> Result<()> {
    // Sweep the trust radius around the configured value and watch the
    // rejection count move.
    println!("Sweeping trust radius ({} steps)", args.sweep_steps);

    let track = simulate_track(&build_scenario(args));
    let faults = build_faults(args);
    let stream = generate_fix_stream(&track, &build_noise(args), &faults);

    let steps = args.sweep_steps;
    // Stay inside the parameter's valid range while sweeping around the
    // configured value.
    let bounds = yucca_sim::params::guard::TRUST_RADIUS;
    let start_radius = (args.radius * 0.5).max(bounds.min);
    let end_radius = (args.radius * 1.5).min(bounds.max);
    let mut summary_rows = Vec::new();

    for i in 0..steps {
        let radius =
            start_radius + (end_radius - start_radius) * (i as f64 / (steps - 1) as f64);

        let config = GuardConfig {
            radius_cm: radius as f32,
            ..build_guard_config(args)
        };
        let result = run_guard(&stream, &config);

        println!(
            "Run {}/{} | Radius: {:.0} cm -> rejected {} of {} ticks",
            i + 1,
            steps,
            radius,
            result.rejected_ticks,
            stream.fixes.len()
        );

        summary_rows.push((radius, result.accepted_ticks, result.rejected_ticks));
    }

    let path = args.output_dir.join("sweep_summary.csv");
    std::fs::create_dir_all(&args.output_dir)?;
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record(["radius_cm", "accepted_ticks", "rejected_ticks"])?;
    for (radius, accepted, rejected) in summary_rows {
        wtr.write_record(&[
            format!("{:.1}", radius),
            format!("{}", accepted),
            format!("{}", rejected),
        ])?;
    }
    wtr.flush()?;

    println!("\nSweep complete. Summary at {:?}", path);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_scenario(args: &Args) -> ScenarioParams {
    ScenarioParams {
        duration_s: args.duration,
        tick_hz: args.tick_hz,
        origin_lat_deg: args.origin_lat,
        origin_lon_deg: args.origin_lon,
        hold_s: args.hold,
        cruise_speed_cms: args.cruise_speed,
        accel_cmss: args.accel,
        heading_deg: args.heading,
    }
}

fn build_noise(args: &Args) -> FixNoiseConfig {
    FixNoiseConfig {
        noise_scale: args.noise_scale,
        pos_noise_std_cm: args.pos_noise,
        vel_noise_std_cms: args.vel_noise,
        seed: args.seed,
    }
}

fn build_faults(args: &Args) -> Vec<FaultWindow> {
    let mut faults = Vec::new();

    if let Some(start) = args.jump_at {
        faults.push(FaultWindow {
            start_s: start,
            end_s: start + args.jump_duration,
            kind: FaultKind::Jump {
                offset_ne_cm: Vector2::new(args.jump_north, args.jump_east),
            },
        });
    }

    if let Some(start) = args.lock_loss_at {
        faults.push(FaultWindow {
            start_s: start,
            end_s: start + args.lock_loss_duration,
            kind: FaultKind::LockLoss,
        });
    }

    faults
}

fn build_guard_config(args: &Args) -> GuardConfig {
    GuardConfig {
        enabled: !args.disable_guard,
        radius_cm: args.radius as f32,
        accel_max_cmss: args.accel_max as f32,
    }
}

fn print_run_stats(result: &GuardRunResult) {
    let ticks = result.time_s.len();
    let trusted_pct = if ticks > 0 {
        100.0 * result.accepted_ticks as f64 / ticks as f64
    } else {
        0.0
    };

    println!("\nRun Stats:");
    println!("  Ticks:     {}", ticks);
    println!("  Accepted:  {}", result.accepted_ticks);
    println!("  Rejected:  {}", result.rejected_ticks);
    println!("  No lock:   {}", result.no_lock_ticks);
    println!("  Trusted:   {:.1} %", trusted_pct);
    println!("-----------------------------");
}

fn write_output(
    args: &Args,
    track: &TruthTrack,
    stream: &FixStream,
    config: &GuardConfig,
    result: &GuardRunResult,
) -> Result<()> {
    std::fs::create_dir_all(&args.output_dir)?;

    match args.format {
        OutputFormat::Csv => {
            let path = args.output_dir.join("guard_run.csv");
            let mut wtr = csv::Writer::from_path(&path)?;

            wtr.write_record([
                "time",
                // Truth
                "true_pos_n_cm",
                "true_pos_e_cm",
                // Receiver
                "fix_quality",
                "fix_lat_e7",
                "fix_lon_e7",
                // Guard
                "glitching",
                "last_good_lat_e7",
                "last_good_lon_e7",
            ])?;

            for i in 0..result.time_s.len() {
                let fix = &stream.fixes[i];
                let p = track.pos_ne_cm[i];

                wtr.write_record(&[
                    format!("{:.2}", result.time_s[i]),
                    format!("{:.1}", p.x),
                    format!("{:.1}", p.y),
                    fix.quality.label().to_string(),
                    format!("{}", fix.location.lat),
                    format!("{}", fix.location.lon),
                    format!("{}", result.glitching[i]),
                    format!("{}", result.last_good[i].lat),
                    format!("{}", result.last_good[i].lon),
                ])?;
            }

            wtr.flush()?;
            println!("Data written to {:?}", path);
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "config": {
                    "enabled": config.enabled,
                    "radius_cm": config.radius_cm,
                    "accel_max_cmss": config.accel_max_cmss,
                },
                "ticks": result.time_s.len(),
                "accepted_ticks": result.accepted_ticks,
                "rejected_ticks": result.rejected_ticks,
                "no_lock_ticks": result.no_lock_ticks,
            });

            let path = args.output_dir.join("guard_summary.json");
            std::fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
            println!("Summary written to {:?}", path);
        }
    }

    Ok(())
}
