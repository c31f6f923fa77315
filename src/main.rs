use anyhow::Result;
use cmdtree::{cli, config::Config, setup_logging};

fn main() -> Result<()> {
    // Read configuration from the environment
    let config = Config::from_env();

    // Setup logging based on debug flag
    setup_logging(config.debug)?;

    // Build the command tree and run whatever the arguments select
    let tree = cli::build_tree(&config)?;
    tree.execute(&cli::program_args())?;

    Ok(())
}
