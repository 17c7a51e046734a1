use std::env;
use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: invest-o-mortgage <serve [port] | project [flags] | crosshair --top T --bottom B --left L --right R [--x-max M]>";

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let raw_args: Vec<String> = env::args().collect();
    let command_args = raw_args.get(1..).unwrap_or_default();
    match command_args.first().map(|s| s.as_str()) {
        Some("serve") => {
            let port = command_args
                .get(1)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            invest_o_mortgage::api::run_http_server(port).await?;
        }
        Some("project") => {
            invest_o_mortgage::api::cli::run_project(command_args, io::stdout().lock())?;
        }
        Some("crosshair") => {
            invest_o_mortgage::api::cli::run_crosshair(
                command_args,
                io::stdin().lock(),
                io::stdout().lock(),
            )?;
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }
    Ok(())
}
