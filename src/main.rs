use clap::Parser;

use urlgpt::cli::{Cli, Commands};
use urlgpt::config::init_config;
use urlgpt::interfaces::cli::run_cli_command;
use urlgpt::runtime::modes::run_server;
use urlgpt::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match init_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    match cli.command_or_default() {
        Commands::Serve => {
            let _guard = init_logging(&config.logging)?;
            run_server().await
        }
        cmd => {
            if let Err(e) = run_cli_command(cmd, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
