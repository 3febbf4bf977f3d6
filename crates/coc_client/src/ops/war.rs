use crate::tag::{endpoint_path, Endpoint};
use crate::{CocClient, CocError, LookupResult, Result};

/// Present on every current-war payload for a clan that is actually at war.
const TEAM_SIZE: &str = "teamSize";

/// `GET /clans/{clanTag}/currentwar`
///
/// Returns [`CocError::NotInWar`] when the payload has no `teamSize`.
pub async fn get_current_war(client: &CocClient, tag: &str) -> Result<LookupResult> {
    let war = client
        .get(&endpoint_path(Endpoint::Clans, tag, Some("/currentwar")))
        .await?;

    if !war.contains(TEAM_SIZE) {
        tracing::debug!("Clan is not in a war: tag={}", tag);
        return Err(CocError::NotInWar {
            tag: tag.to_string(),
        });
    }

    Ok(war)
}

/// `GET /clans/{clanTag}/warlog`
pub async fn get_war_log(client: &CocClient, tag: &str) -> Result<LookupResult> {
    client.get(&endpoint_path(Endpoint::Clans, tag, Some("/warlog"))).await
}
