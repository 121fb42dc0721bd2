pub mod args;
mod chains;
mod encode;
mod sign;

use anyhow::Context;
use args::{Cli, Commands};
use tradewire_sdk::ChainRegistry;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = match &cli.chains {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading chain registry {}", path.display()))?;
            ChainRegistry::from_json(&text).context("parsing chain registry")?
        },
        None => ChainRegistry::defaults(),
    };

    match cli.command {
        Commands::Encode { order } => encode::run(&order),
        Commands::Sign { order, private_key } => sign::order(&order, private_key).await,
        Commands::SignMessage { message, private_key } => {
            sign::message(&message, private_key).await
        },
        Commands::Chains => chains::render(&registry),
    }
}
