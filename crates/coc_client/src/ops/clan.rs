use crate::tag::{endpoint_path, Endpoint};
use crate::{CocClient, LookupResult, Result};

/// `GET /clans/{clanTag}`
pub async fn get_clan(client: &CocClient, tag: &str) -> Result<LookupResult> {
    client.get(&endpoint_path(Endpoint::Clans, tag, None)).await
}

/// `GET /clans/{clanTag}/members`
pub async fn get_clan_members(client: &CocClient, tag: &str) -> Result<LookupResult> {
    client.get(&endpoint_path(Endpoint::Clans, tag, Some("/members"))).await
}
