use anyhow::Context;
use clap::{Parser, Subcommand};
use ring_bench_compare::render::{self, Format};
use ring_bench_compare::{Preset, ReportOptions, Result, SweepConfig, aggregate_file};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ring-bench-compare")]
#[command(about = "Compare consistent hashing and CuckooRings benchmark runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average repeated trials and write the comparison series.
    Report {
        /// Harness output: one `time,cost,max_load` line per run.
        #[arg(long)]
        log: String,

        /// Sweep of the harness variant that produced the log. Every preset
        /// uses 20 steps; logs from the 0..=100000 remove-server harness have
        /// 21 and need `--steps 21`.
        #[arg(long, value_enum, default_value_t = Preset::RemoveServers)]
        preset: Preset,

        /// JSON sweep config; overrides the preset.
        #[arg(long)]
        config: Option<String>,

        #[arg(long)]
        steps: Option<usize>,

        #[arg(long)]
        step_size: Option<u64>,

        #[arg(long)]
        start: Option<u64>,

        /// Divisor for every average.
        #[arg(long)]
        trials: Option<u32>,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Output file. Defaults to stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report {
            log,
            preset,
            config,
            steps,
            step_size,
            start,
            trials,
            format,
            out,
        } => {
            // 1) Resolve the sweep: preset, then config file, then flags.
            let mut sweep = match &config {
                Some(path) => SweepConfig::load_json(path)
                    .with_context(|| format!("load sweep config {}", path))?,
                None => preset.sweep(),
            };
            if let Some(v) = steps {
                sweep.num_sweep_steps = v;
            }
            if let Some(v) = step_size {
                sweep.step_size = v;
            }
            if let Some(v) = start {
                sweep.start_value = v;
            }
            if let Some(v) = trials {
                sweep.trial_count = v;
            }

            let opts = ReportOptions {
                x_label: preset.x_label().to_string(),
            };

            // 2) Aggregate.
            let report = aggregate_file(&log, &sweep, &opts)
                .with_context(|| format!("aggregate benchmark log {}", log))?;

            // 3) Render.
            let text = render::render(&report, format)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, text).with_context(|| format!("write {}", path))?;
                    tracing::info!("wrote {}", path);
                }
                None => print!("{}", text),
            }
        }
    }

    Ok(())
}
