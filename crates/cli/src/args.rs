use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tradewire-cli", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Chain registry JSON file [default: built-in chains]
    #[arg(long, global = true)]
    pub chains: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode an order and print its signing fields and digest
    Encode {
        /// Order JSON file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        order: PathBuf,
    },
    /// Encode an order and sign its digest with a local private key
    Sign {
        /// Order JSON file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        order: PathBuf,

        /// Signing key in hex [default: $TRADEWIRE_PRIVATE_KEY]
        #[arg(long)]
        private_key: Option<String>,
    },
    /// Personal-sign an arbitrary message with a local private key
    SignMessage {
        /// Message text to sign
        message: String,

        /// Signing key in hex [default: $TRADEWIRE_PRIVATE_KEY]
        #[arg(long)]
        private_key: Option<String>,
    },
    /// List the known chains
    Chains,
}
