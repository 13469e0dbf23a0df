use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zonekit::{init_logging, replay, Config, GestureScript, BUILD_DATE, VERSION};

#[derive(Debug, Parser)]
#[command(
    name = "zonekit",
    about = "Replays zone editing gestures and prints the resulting board zones",
    version
)]
struct Cli {
    /// Settings file (JSON or TOML); defaults to the platform config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a JSON gesture script on an empty board.
    Replay {
        script: PathBuf,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Constrain rubber-band edges to 45 degree directions
        #[arg(long)]
        zone_45: bool,
    },

    /// Write the default settings to the config file.
    #[command(name = "init-config")]
    InitConfig,
}

fn config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(Config::default_path()?),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    tracing::debug!("zonekit {} ({})", VERSION, BUILD_DATE);
    let path = config_path(&cli)?;

    match cli.command {
        Commands::Replay {
            script,
            output,
            zone_45,
        } => {
            let mut config = Config::load_or_default(&path);
            if zone_45 {
                config.editor.zone_45_only = true;
            }
            let gestures = GestureScript::from_file(&script)
                .with_context(|| format!("reading {}", script.display()))?;
            let report = replay(&gestures, &config)?;
            tracing::info!(
                "Replayed {} steps: {} zones, {} rejected",
                gestures.steps.len(),
                report.zones.len(),
                report.rejected.len()
            );

            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", json),
            }
        }
        Commands::InitConfig => {
            Config::default().save_to_file(&path)?;
            tracing::info!("Wrote default settings to {}", path.display());
        }
    }
    Ok(())
}
