use clap::Parser;
use route_template::cli::{run_cli, Cli};
use route_template::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging_with_config(&LogConfig::from_env())?;

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run_cli(&cli, &mut stdout.lock())
}
