use std::process::ExitCode;

use clap::Parser;
use md2anki::cli::Cli;
use md2anki::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    md2anki::init_tracing(cli.verbose);

    let config = Config::from_cli(&cli);
    match md2anki::run(config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
