use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "groups-cli")]
#[command(about = "Query CLI for the group reconciler read API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "GROUPS_API_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List on-chain groups administered by an address
    List {
        #[arg(short, long)]
        admin: String,
    },
    /// Show a single on-chain group
    Get { id: String },
    /// Show an on-chain group merged with its off-chain members
    Associated { id: String },
    /// Check gateway and subgraph health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let request = match &cli.command {
        Commands::List { admin } => client
            .get(endpoint(&base, &["groups"])?)
            .query(&[("admin", admin.as_str())]),
        Commands::Get { id } => client.get(endpoint(&base, &["groups", id.as_str()])?),
        Commands::Associated { id } => client.get(endpoint(&base, &["groups", id.as_str(), "associated"])?),
        Commands::Health => client.get(endpoint(&base, &["health"])?),
    };

    let res = request.send().await?;
    print_response(res).await
}

/// Append `segments` to the base URL, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("cannot use '{}' as a base URL", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: group API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
