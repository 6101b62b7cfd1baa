use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use parabolic_batch::chart::render_batch_chart;
use parabolic_batch::core::animation::FrameTimeline;
use parabolic_batch::core::batch::{BatchResult, analyze_batch};
use parabolic_batch::core::config::{
    ANIMATION_STEP_S, DENSE_POINT_COUNT, EARTH_GRAVITY_MPS2, LONG_FLIGHT_THRESHOLD_S,
    REPORT_INTERVAL_S, SimulationConfig,
};
use parabolic_batch::report::{build_report, format_summary_table, load_records, write_report};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parabolic_batch")]
#[command(about = "Batch projectile trajectory analysis", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a batch and write the trajectory report
    Analyze {
        /// Launch records (JSON array of {id, velocidad, angulo})
        #[arg(short, long, default_value = "datos.json")]
        input: PathBuf,

        /// Report destination
        #[arg(short, long, default_value = "analisis_trayectorias.json")]
        output: PathBuf,

        /// Also render every trajectory to a PNG or SVG chart
        #[arg(long)]
        chart: Option<PathBuf>,

        #[command(flatten)]
        sim: SimArgs,
    },
    /// Velocity vector at the report sample nearest a horizontal position
    Query {
        #[arg(short, long, default_value = "datos.json")]
        input: PathBuf,

        /// Trajectory id
        #[arg(long)]
        id: String,

        /// Horizontal position (m)
        #[arg(short = 'x', long = "x")]
        x_m: f64,

        /// Render the batch chart with the vector drawn in
        #[arg(long)]
        chart: Option<PathBuf>,

        #[command(flatten)]
        sim: SimArgs,
    },
    /// Print the animation timeline of one trajectory
    Frames {
        #[arg(short, long, default_value = "datos.json")]
        input: PathBuf,

        /// Trajectory id
        #[arg(long)]
        id: String,

        #[command(flatten)]
        sim: SimArgs,
    },
}

#[derive(Args)]
struct SimArgs {
    /// Gravitational acceleration (m/s^2)
    #[arg(long, default_value_t = EARTH_GRAVITY_MPS2)]
    gravity: f64,

    /// Report sampling interval (s)
    #[arg(long, default_value_t = REPORT_INTERVAL_S)]
    interval: f64,

    /// Flights longer than this are listed as long flights (s)
    #[arg(long, default_value_t = LONG_FLIGHT_THRESHOLD_S)]
    long_flight_threshold: f64,

    /// Points per curve in charts
    #[arg(long, default_value_t = DENSE_POINT_COUNT)]
    dense_points: usize,

    /// Animation tick (s)
    #[arg(long, default_value_t = ANIMATION_STEP_S)]
    step: f64,
}

impl From<&SimArgs> for SimulationConfig {
    fn from(args: &SimArgs) -> Self {
        SimulationConfig {
            gravity_mps2: args.gravity,
            sample_interval_s: args.interval,
            long_flight_threshold_s: args.long_flight_threshold,
            dense_point_count: args.dense_points,
            animation_step_s: args.step,
        }
    }
}

fn analyze_file(input: &Path, config: &SimulationConfig) -> Result<BatchResult> {
    let records = load_records(input)?;
    let result = analyze_batch(&records, config)
        .with_context(|| format!("batch '{}' rejected", input.display()))?;
    Ok(result)
}

fn selection_for(result: &BatchResult, id: &str) -> Result<usize> {
    result
        .position_of(id)
        .ok_or_else(|| anyhow!("no trajectory with id '{id}'"))
}

fn run_analyze(
    input: &Path,
    output: &Path,
    chart: Option<&Path>,
    config: &SimulationConfig,
) -> Result<()> {
    let result = analyze_file(input, config)?;

    println!();
    print!("{}", format_summary_table(&result));

    write_report(output, &build_report(&result))?;
    println!("\nReport written to {}", output.display());

    if let Some(chart_path) = chart {
        render_batch_chart(&result, chart_path, None)
            .map_err(|e| anyhow!("could not render chart: {e}"))?;
        println!("Chart written to {}", chart_path.display());
    }
    Ok(())
}

fn run_query(
    input: &Path,
    id: &str,
    x_m: f64,
    chart: Option<&Path>,
    config: &SimulationConfig,
) -> Result<()> {
    let result = analyze_file(input, config)?;
    let selection = selection_for(&result, id)?;
    let hit = result.query(selection, x_m)?;

    println!(
        "{id}: nearest sample t={:.2} s at ({:.2} m, {:.2} m)",
        hit.point.t, hit.point.x, hit.point.y
    );
    println!(
        "Velocity: vx={:.2} m/s, vy={:.2} m/s, |v|={:.2} m/s",
        hit.vector.vx, hit.vector.vy, hit.vector.magnitude
    );

    if let Some(chart_path) = chart {
        render_batch_chart(&result, chart_path, Some(&hit))
            .map_err(|e| anyhow!("could not render chart: {e}"))?;
        println!("Chart written to {}", chart_path.display());
    }
    Ok(())
}

fn run_frames(input: &Path, id: &str, config: &SimulationConfig) -> Result<()> {
    let result = analyze_file(input, config)?;
    let trajectory = result.trajectory(selection_for(&result, id)?)?;

    println!(
        "{:>8} | {:>10} | {:>10} | {:>9} | {:>9} | {:>9}",
        "t (s)", "x (m)", "y (m)", "vx", "vy", "|v|"
    );
    for frame in FrameTimeline::new(
        &trajectory.profile,
        config.gravity_mps2,
        config.animation_step_s,
    ) {
        println!(
            "{:>8.2} | {:>10.2} | {:>10.2} | {:>9.2} | {:>9.2} | {:>9.2}",
            frame.t, frame.x, frame.y, frame.velocity.vx, frame.velocity.vy, frame.velocity.magnitude
        );
    }
    println!(
        "\nFlight complete: range {:.2} m after {:.2} s",
        trajectory.profile.range_m, trajectory.profile.time_of_flight_s
    );
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            chart,
            sim,
        } => run_analyze(&input, &output, chart.as_deref(), &SimulationConfig::from(&sim)),
        Commands::Query {
            input,
            id,
            x_m,
            chart,
            sim,
        } => run_query(&input, &id, x_m, chart.as_deref(), &SimulationConfig::from(&sim)),
        Commands::Frames { input, id, sim } => {
            run_frames(&input, &id, &SimulationConfig::from(&sim))
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
