use clap::Parser;
use favorite_chicken::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Usage(args) => cli::usage::run(args).await,
    }
}
