mod config;
mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use localfit_core::{CpuType, GpuVendor, HardwareProfile, ModelDatabase, Query, UseCase, explain};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "localfit")]
#[command(
    about = "Recommend local AI models that fit your hardware and use cases",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output results as JSON (for tool integration)
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend the top models for your hardware
    Recommend {
        /// Use case to cover, by name or slug (repeatable)
        #[arg(short = 'u', long = "use-case", value_name = "USE_CASE")]
        use_cases: Vec<UseCase>,

        #[command(flatten)]
        hardware: HardwareArgs,
    },

    /// Show how a single model scores on your hardware
    Explain {
        /// Model name or partial name
        model: String,

        #[arg(short = 'u', long = "use-case", value_name = "USE_CASE")]
        use_cases: Vec<UseCase>,

        #[command(flatten)]
        hardware: HardwareArgs,
    },

    /// List every model in the catalog
    List,

    /// Search models by name or description
    Search {
        query: String,

        /// Only show models from this provider
        #[arg(long)]
        provider: Option<String>,
    },

    /// List catalog providers
    Providers,

    /// List supported use cases and the capability tags they map to
    UseCases,

    /// Print the hardware profile that would be used
    Profile {
        #[command(flatten)]
        hardware: HardwareArgs,
    },
}

/// Hardware overrides. Each flag replaces the configured value.
#[derive(Args, Debug, Default)]
struct HardwareArgs {
    /// Load the profile from a JSON file before applying other flags
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// GPU vendor: NVIDIA, AMD, Intel, Apple Silicon
    #[arg(long)]
    gpu_vendor: Option<String>,

    /// Dedicated VRAM in GB
    #[arg(long, allow_negative_numbers = true)]
    vram: Option<f64>,

    /// System RAM in GB
    #[arg(long, allow_negative_numbers = true)]
    ram: Option<f64>,

    /// CPU type: Intel/AMD or Apple Silicon
    #[arg(long)]
    cpu: Option<String>,

    #[arg(long)]
    os: Option<String>,

    /// Free disk space in GB
    #[arg(long, allow_negative_numbers = true)]
    disk: Option<f64>,
}

impl HardwareArgs {
    fn resolve(&self, base: &HardwareProfile) -> Result<HardwareProfile> {
        let mut hardware = match &self.profile {
            Some(path) => HardwareProfile::load(path)
                .with_context(|| format!("loading hardware profile {}", path.display()))?,
            None => base.clone(),
        };

        if let Some(vendor) = &self.gpu_vendor {
            hardware.gpu_vendor = GpuVendor::from(vendor.as_str());
        }
        if let Some(vram) = self.vram {
            hardware.vram_gb = vram;
        }
        if let Some(ram) = self.ram {
            hardware.ram_gb = ram;
        }
        if let Some(cpu) = &self.cpu {
            hardware.cpu_type = CpuType::from(cpu.as_str());
        }
        if let Some(os) = &self.os {
            hardware.os = os.clone();
        }
        if let Some(disk) = self.disk {
            hardware.disk_space_gb = disk;
        }

        debug!(class = hardware.class().label(), "resolved hardware profile");
        Ok(hardware)
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "localfit=info,localfit_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("loading configuration")
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let json = cli.json || config.output.json;
    let db = ModelDatabase::new();

    match cli.command {
        Commands::Recommend {
            use_cases,
            hardware,
        } => {
            let hardware = hardware.resolve(&config.hardware)?;
            let result = db.evaluate(&hardware, &use_cases);
            if json {
                display::display_json(&result)?;
            } else {
                display::display_recommendations(&hardware, &result);
            }
        }

        Commands::Explain {
            model,
            use_cases,
            hardware,
        } => {
            let hardware = hardware.resolve(&config.hardware)?;
            let model = db.resolve_model_selector(&model)?;
            let query = Query::new(&hardware, &use_cases);
            let explanation = explain(model, &query);
            if json {
                display::display_json(&explanation)?;
            } else {
                display::display_explanation(model, &explanation);
            }
        }

        Commands::List => {
            if json {
                display::display_json(db.get_all_models())?;
            } else {
                display::display_all_models(db.get_all_models());
            }
        }

        Commands::Search { query, provider } => {
            let mut results = db.find_model(&query);
            if let Some(provider) = &provider {
                results = ModelDatabase::filter_by_provider(results, provider);
            }
            if json {
                display::display_json(&results)?;
            } else {
                display::display_search_results(&results, &query);
            }
        }

        Commands::Providers => {
            let providers = db.providers();
            if json {
                display::display_json(&providers)?;
            } else {
                display::display_providers(&providers);
            }
        }

        Commands::UseCases => {
            if json {
                let listing: Vec<serde_json::Value> = UseCase::ALL
                    .iter()
                    .map(|uc| {
                        serde_json::json!({
                            "name": uc.label(),
                            "slug": uc.slug(),
                            "category": uc.category().label(),
                            "tags": uc.tags(),
                        })
                    })
                    .collect();
                display::display_json(&listing)?;
            } else {
                display::display_use_cases();
            }
        }

        Commands::Profile { hardware } => {
            let hardware = hardware.resolve(&config.hardware)?;
            if json {
                display::display_json(&hardware)?;
            } else {
                display::display_profile(&hardware);
            }
        }
    }

    Ok(())
}
