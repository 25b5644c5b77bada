use analysis::{load_image, AnalysisCommand};
use clap::{Parser, Subcommand, ValueEnum};
use cli::AnalysisConfig;
use color_eyre::eyre::Result;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every analysis stage on one image and write the results
    Analyze {
        /// Path to the source image
        input: PathBuf,
        /// Optional TOML or JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output directory (overrides the configuration)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the JSON schema of the single-stage commands
    Schema,
    /// Print the default configuration
    Config {
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ConfigFormat {
    Toml,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Analyze { input, config, output_dir } => {
            analyze(input, config.as_deref(), output_dir.as_deref())?;
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&AnalysisCommand::schema())?);
        }
        Commands::Config { format } => {
            let config = AnalysisConfig::default();
            let rendered = match format {
                ConfigFormat::Toml => config.to_toml()?,
                ConfigFormat::Json => config.to_json()?,
            };
            println!("{rendered}");
        }
    }

    Ok(())
}

fn analyze(input: &Path, config_path: Option<&Path>, output_dir: Option<&Path>) -> Result<()> {
    let mut config = match config_path {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = output_dir {
        config.output_dir = dir.to_path_buf();
    }

    let pipeline = config.to_builder().build()?;
    info!("{}", pipeline.info());

    let image = load_image(input)?;
    let report = pipeline.process(&image)?;
    info!("Objects in image: {}", report.object_count);

    let written = report.save(&config.output_dir)?;
    info!("✅ Processing complete, {} files written to {}", written.len(), config.output_dir.display());

    Ok(())
}
