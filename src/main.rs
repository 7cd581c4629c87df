//! Entry point wiring CLI dispatch to pipeline modules.

use anyhow::Result;
use tracing::info;
use trendscope::{cli::Cli, config::Settings, logging};

fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    info!(?cli, "starting command");
    cli.dispatch(settings)
}
