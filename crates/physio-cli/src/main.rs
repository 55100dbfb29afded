mod config;
mod plan_cmds;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use config::{CliOverrides, PhysioConfig};
use plan_cmds::PlanArgs;

#[derive(Parser)]
#[command(name = "physio", about = "Personalized exercise plans from a text-generation model")]
struct Cli {
    /// Chat-completions base URL (overrides PHYSIO_LLM_BASE_URL env var)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model name (overrides PHYSIO_LLM_MODEL env var)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Profiles TOML file (overrides PHYSIO_PROFILES env var)
    #[arg(long, global = true)]
    profiles: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            profiles: self.profiles.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a physio config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print the prompt that would be sent for a plan
    Prompt(PlanArgs),
    /// Parse raw model output into exercises
    Parse {
        /// File with the model's reply, or `-` for stdin
        input: String,
        /// Print an empty list instead of the fallback plan when nothing parses
        #[arg(long)]
        raw: bool,
    },
    /// Generate a plan end to end
    Generate(PlanArgs),
    /// Start the HTTP endpoint
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

/// Execute the `physio init` command: write config file.
fn cmd_init(overrides: &CliOverrides, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let mut cfg = config::ConfigFile::default();
    if let Some(base_url) = &overrides.base_url {
        cfg.llm.base_url = base_url.clone();
    }
    if let Some(model) = &overrides.model {
        cfg.llm.model = model.clone();
    }
    cfg.profiles.path = overrides.profiles.clone();

    config::save_config_to(&cfg, &path)?;

    println!("Config written to {}", path.display());
    println!("  llm.base_url = {}", cfg.llm.base_url);
    println!("  llm.model = {}", cfg.llm.model);
    if let Some(profiles) = &cfg.profiles.path {
        println!("  profiles.path = {}", profiles.display());
    }
    println!();
    println!("Set {} to authenticate with the model provider.", config::ENV_API_KEY);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = cli.overrides();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(&overrides, force)?;
        }
        Commands::Prompt(args) => {
            let resolved = PhysioConfig::resolve(&overrides)?;
            plan_cmds::run_prompt(&resolved, args).await?;
        }
        Commands::Parse { input, raw } => {
            plan_cmds::run_parse(&input, raw)?;
        }
        Commands::Generate(args) => {
            let resolved = PhysioConfig::resolve(&overrides)?;
            plan_cmds::run_generate(&resolved, args).await?;
        }
        Commands::Serve { bind, port } => {
            let resolved = PhysioConfig::resolve(&overrides)?;
            let service = plan_cmds::build_service(&resolved)?;
            serve_cmd::run_serve(service, &bind, port).await?;
        }
    }

    Ok(())
}
