use clap::Parser;

use larder_cli::Cli;
use larder_infra::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    larder_observability::init(config.logging.format, &config.logging.filter);
    tracing::debug!(?config, "loaded configuration");

    larder_cli::run(cli.command, &config)
}
