use crate::tag::{endpoint_path, Endpoint};
use crate::{CocClient, LookupResult, Result};

/// `GET /players/{playerTag}`
pub async fn get_profile(client: &CocClient, tag: &str) -> Result<LookupResult> {
    client.get(&endpoint_path(Endpoint::Players, tag, None)).await
}

/// Fetches a player's profile, then the clan named in its `clan.tag` field.
///
/// The clan request is only issued once the profile has been decoded. Errors from
/// either request are returned unchanged.
pub async fn get_player_clan(client: &CocClient, tag: &str) -> Result<LookupResult> {
    let profile = get_profile(client, tag).await?;
    let path = clan_path(&profile)?;

    tracing::debug!("Resolved player clan: player={}, path={}", tag, path);

    client.get(&path).await
}

fn clan_path(profile: &LookupResult) -> Result<String> {
    let clan_tag = profile.require_str("clan.tag")?;
    Ok(endpoint_path(Endpoint::Clans, clan_tag, None))
}
