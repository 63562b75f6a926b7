use anyhow::Result;
use clap::Parser;

use domu::{
    app::{init_config, load_config, AppState},
    cli::{handle_command, Cli, Commands, OutputFormat},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logger(if cli.verbose { "debug" } else { "warn" });

    if let Commands::Init = cli.command {
        let path = init_config()?;
        println!("Configuration initialized at: {}", path.display());
        return Ok(());
    }

    // Load configuration, then apply command-line overrides
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    let format = cli
        .output_format
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));

    let state = AppState::new(config)?;
    let ok = handle_command(&cli.command, &state, format).await?;

    // Exit with appropriate code
    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
