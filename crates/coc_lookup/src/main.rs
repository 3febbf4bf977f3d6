mod config;

use anyhow::Context;
use clap::Parser;
use coc_client::{ops, CocClient, CocError, LookupResult};
use config::{Cli, Lookup};
use tracing_subscriber::EnvFilter;

async fn run(client: &CocClient, lookup: &Lookup) -> coc_client::Result<LookupResult> {
    match lookup {
        Lookup::Player { tag } => ops::player::get_profile(client, tag).await,
        Lookup::Clan { tag } => ops::clan::get_clan(client, tag).await,
        Lookup::PlayerClan { tag } => ops::player::get_player_clan(client, tag).await,
        Lookup::War { tag } => ops::war::get_current_war(client, tag).await,
        Lookup::Members { tag } => ops::clan::get_clan_members(client, tag).await,
        Lookup::Warlog { tag } => ops::war::get_war_log(client, tag).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = CocClient::new(&cli.token).context("Failed to create API client")?;

    tracing::info!("Running lookup: {:?}", cli.lookup);

    let outcome = run(&client, &cli.lookup).await;
    client.close();

    match outcome {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(result.as_map())?);
            Ok(())
        }
        Err(e @ CocError::NotInWar { .. }) => {
            println!("{}", e);
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Lookup failed for tag {}", cli.lookup.tag())),
    }
}
