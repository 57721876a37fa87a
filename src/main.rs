//! pitchside - Football statistics from the command line
//!
//! Fetches leagues, standings, scorers, matches, teams and players from the
//! football-data.org API, caching every response in memory so repeated
//! lookups within a run skip the network and upstream outages degrade to
//! stale data instead of failures.

use std::env;
use std::error::Error;

use clap::Parser;
use futures::future::join_all;
use tracing_subscriber::EnvFilter;

use pitchside::cache::ResponseCache;
use pitchside::cli::{Cli, Command};
use pitchside::data::FootballClient;

/// Environment variable holding the football-data.org API token
const TOKEN_ENV_VAR: &str = "FOOTBALL_API_KEY";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let token = cli.token.clone().or_else(|| env::var(TOKEN_ENV_VAR).ok());
    let cache = ResponseCache::new();
    let client = FootballClient::new(cache.clone(), token);

    let output = run_command(&client, &cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    if cli.cache_stats {
        eprintln!("{}", serde_json::to_string_pretty(&cache.stats())?);
    }

    Ok(())
}

/// Executes a subcommand and returns its printable result
async fn run_command(
    client: &FootballClient,
    command: &Command,
) -> Result<serde_json::Value, Box<dyn Error>> {
    let filter = command.match_filter();

    let value = match command {
        Command::Leagues => serde_json::to_value(client.competitions().await?)?,
        Command::League { id } => serde_json::to_value(client.competition(id).await?)?,
        Command::Standings { ids } => {
            // One concurrent lookup per league; distinct leagues are distinct
            // cache keys, so each miss fetches independently
            let results = join_all(ids.iter().map(|id| client.standings(id))).await;
            let tables = results.into_iter().collect::<Result<Vec<_>, _>>()?;
            serde_json::to_value(tables)?
        }
        Command::Scorers { id, limit } => serde_json::to_value(client.scorers(id, *limit).await?)?,
        Command::Matches { id, .. } => {
            serde_json::to_value(client.competition_matches(id, &filter).await?)?
        }
        Command::Teams { id } => serde_json::to_value(client.teams(id).await?)?,
        Command::Team { id } => serde_json::to_value(client.team(*id).await?)?,
        Command::TeamMatches { id, .. } => {
            serde_json::to_value(client.team_matches(*id, &filter).await?)?
        }
        Command::Player { id } => serde_json::to_value(client.person(*id).await?)?,
        Command::Squad { id } => serde_json::to_value(client.squad(*id).await?)?,
    };

    Ok(value)
}
