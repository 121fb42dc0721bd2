use clap::Parser;

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = tradewire_cli::run(tradewire_cli::args::Cli::parse()).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
