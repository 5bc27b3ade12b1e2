use clap::{Parser, Subcommand};
use serde_json::Value;

use api_relay::client::ApiClient;
use api_relay::config;
use api_relay::resolve;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Inspect endpoint resolution and probe the backend API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the concrete URL a logical path resolves to
    Resolve { path: String },
    /// Issue a GET through the resolver and pretty-print the JSON response
    Get { path: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::from_env()?;

    match cli.command {
        Commands::Resolve { path } => {
            println!("{}", resolve::resolve(&config, &path));
        }
        Commands::Get { path } => {
            let client = ApiClient::new(config);
            match client.get::<Value>(&path).await {
                Ok(Some(json)) => println!("{}", serde_json::to_string_pretty(&json)?),
                Ok(None) => println!("(no content)"),
                Err(err) => {
                    eprintln!("Error: {err}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
