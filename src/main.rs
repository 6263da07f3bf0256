//! AquaShield Core - CLI Entry Point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use aquashield_core::api::commands;
use aquashield_core::constants::{APP_NAME, APP_VERSION, MODEL_DIR_ENV};
use aquashield_core::logic::classifier::PotabilityClassifier;
use aquashield_core::logic::features::WaterSample;
use aquashield_core::logic::model::bundle::ArtifactBundle;

#[derive(Parser, Debug)]
#[command(name = "aquashield-core", version, about = "Water potability classification core")]
struct Cli {
    /// Artifact directory holding model.onnx and scaler.json
    #[arg(long, env = MODEL_DIR_ENV)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one water sample
    Classify {
        #[arg(long)]
        ph: Option<f32>,

        /// Total dissolved solids (mg/l)
        #[arg(long)]
        tds: Option<f32>,

        /// Turbidity (NTU)
        #[arg(long)]
        turbidity: Option<f32>,

        /// Sampling depth (m)
        #[arg(long)]
        depth: Option<f32>,

        /// Flow discharge (l/min)
        #[arg(long)]
        flow: Option<f32>,

        /// JSON file with the five readings, instead of flags
        #[arg(long, conflicts_with_all = ["ph", "tds", "turbidity", "depth", "flow"])]
        input: Option<PathBuf>,

        /// Emit the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show loaded artifact status
    Status,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    // Artifacts load up front; a broken fallback path fails here, not
    // mid-request behind the fast threshold path.
    let bundle = match &cli.model_dir {
        Some(dir) => ArtifactBundle::load(dir),
        None => ArtifactBundle::load_default(),
    }
    .map_err(|e| e.to_string())?;

    let engine = PotabilityClassifier::from_bundle(bundle);

    match cli.command {
        Command::Classify {
            ph,
            tds,
            turbidity,
            depth,
            flow,
            input,
            json,
        } => {
            let response = match input {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
                    let payload: serde_json::Value = serde_json::from_str(&content)
                        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;
                    commands::classify_json(&engine, &payload)?
                }
                None => {
                    let readings = [
                        ("ph", ph),
                        ("tds", tds),
                        ("turbidity", turbidity),
                        ("depth", depth),
                        ("flow", flow),
                    ];
                    for (name, value) in &readings {
                        if value.is_none() {
                            return Err(format!("missing --{} (or use --input)", name));
                        }
                    }
                    let sample = build_sample(ph, tds, turbidity, depth, flow)?;
                    commands::classify_reading(
                        &engine,
                        sample.ph,
                        sample.tds_mg_per_l,
                        sample.turbidity_ntu,
                        sample.depth_m,
                        sample.flow_discharge_lpm,
                    )?
                }
            };

            if json {
                let rendered = serde_json::to_string_pretty(&response)
                    .map_err(|e| format!("failed to render response: {}", e))?;
                println!("{}", rendered);
            } else {
                println!("The water is: {}", response.verdict);
            }
        }

        Command::Status => {
            let status = commands::engine_status(&engine);
            let rendered = serde_json::to_string_pretty(&status)
                .map_err(|e| format!("failed to render status: {}", e))?;
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn build_sample(
    ph: Option<f32>,
    tds: Option<f32>,
    turbidity: Option<f32>,
    depth: Option<f32>,
    flow: Option<f32>,
) -> Result<WaterSample, String> {
    match (ph, tds, turbidity, depth, flow) {
        (Some(ph), Some(tds), Some(turbidity), Some(depth), Some(flow)) => {
            WaterSample::new(ph, tds, turbidity, depth, flow).map_err(|e| e.to_string())
        }
        _ => Err("all five readings are required".to_string()),
    }
}
