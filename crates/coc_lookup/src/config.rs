use clap::{Parser, Subcommand};

pub const TOKEN_ENV: &str = "COC_API_TOKEN";

/// Read-only lookups against the Clash of Clans API.
#[derive(Parser, Debug)]
#[command(name = "coc_lookup", version, about, long_about = None)]
pub struct Cli {
    /// API token issued at developer.clashofclans.com
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: String,

    #[command(subcommand)]
    pub lookup: Lookup,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Player profile
    Player { tag: String },
    /// Clan details
    Clan { tag: String },
    /// Clan of the given player
    PlayerClan { tag: String },
    /// Clan's current war
    War { tag: String },
    /// Clan member list
    Members { tag: String },
    /// Clan war log
    Warlog { tag: String },
}

impl Lookup {
    pub fn tag(&self) -> &str {
        match self {
            Lookup::Player { tag }
            | Lookup::Clan { tag }
            | Lookup::PlayerClan { tag }
            | Lookup::War { tag }
            | Lookup::Members { tag }
            | Lookup::Warlog { tag } => tag,
        }
    }
}
