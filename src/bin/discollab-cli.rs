use clap::{Parser, Subcommand};
use discollab::{ClientConfig, Credentials, DiscogsBridge, DEFAULT_CUTOFF_YEAR};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "discollab-cli")]
#[command(about = "Resolve Discogs artists and their collaborators", long_about = None)]
struct Cli {
    /// Discogs personal access token (can also be set via DISCOGS_TOKEN env var)
    #[arg(long, env = "DISCOGS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Discogs consumer key (can also be set via DISCOGS_CONSUMER_KEY env var)
    #[arg(long, env = "DISCOGS_CONSUMER_KEY", hide_env_values = true, requires = "secret")]
    key: Option<String>,

    /// Discogs consumer secret (can also be set via DISCOGS_CONSUMER_SECRET env var)
    #[arg(long, env = "DISCOGS_CONSUMER_SECRET", hide_env_values = true, requires = "key")]
    secret: Option<String>,

    /// Only releases up to and including this year count
    #[arg(short, long, default_value_t = DEFAULT_CUTOFF_YEAR)]
    year: i32,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one artist
    Artist {
        /// Discogs artist ID
        id: u64,
    },
    /// Resolve several artists
    Artists {
        /// Discogs artist IDs
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Skip artists that fail instead of aborting
        #[arg(long)]
        lenient: bool,
    },
}

fn credentials(cli: &Cli) -> discollab::error::Result<Credentials> {
    match (&cli.token, &cli.key, &cli.secret) {
        (Some(token), _, _) => Credentials::token(token.as_str()),
        (None, Some(key), Some(secret)) => Credentials::key_secret(key.as_str(), secret.as_str()),
        _ => Credentials::from_env(),
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<(), serde_json::Error> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut bridge = DiscogsBridge::new(ClientConfig::new(credentials(&cli)?))?;
    bridge.set_cutoff_year(cli.year);

    match &cli.command {
        Commands::Artist { id } => {
            let artist = bridge.get_artist_by_id(*id).await?;
            print_json(&artist, cli.compact)?;
        }
        Commands::Artists { ids, lenient } => {
            if *lenient {
                let result = bridge.get_artists_from_list_lenient(ids).await?;
                print_json(&result.resolved, cli.compact)?;
                if !result.failed.is_empty() {
                    eprintln!("Failed artists:");
                    for (id, err) in &result.failed {
                        eprintln!("   - {}: {}", id, err);
                    }
                }
            } else {
                let artists = bridge.get_artists_from_list(ids).await?;
                print_json(&artists, cli.compact)?;
            }
        }
    }

    Ok(())
}
