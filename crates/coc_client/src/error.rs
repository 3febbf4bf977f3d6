use thiserror::Error;

#[derive(Error, Debug)]
pub enum CocError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("An error occurred with Clash of Clans API. Error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("An error occurred with Clash of Clans API. Error {status}: could not decode response body ({reason})")]
    Decode { status: u16, reason: String },

    #[error("Response is missing required field '{field}'")]
    MissingField { field: String },

    #[error("Clan {tag} is not currently in a war")]
    NotInWar { tag: String },

    #[error("Invalid API token: {0}")]
    InvalidToken(String),
}

const OK: u16 = 200;

/// Fixed explanation for a non-200 status. Unlisted codes get a fallback.
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Client provided incorrect parameters for the request.",
        403 => "Access denied, either because of missing/incorrect credentials or used API token does not grant access to the requested resource.",
        404 => "Resource was not found.",
        429 => "Request was throttled, because amount of requests was above the threshold defined for the used API token.",
        500 => "Unknown error happened when handling the request.",
        503 => "Service is temprorarily unavailable because of maintenance.",
        _ => "Unexpected response status returned by the API.",
    }
}

impl CocError {
    pub fn api(status: u16) -> Self {
        Self::Api {
            status,
            message: status_message(status).to_string(),
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            status: OK,
            reason: reason.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// HTTP status the error was raised for. `None` when no response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::MissingField { .. } | Self::NotInWar { .. } => Some(OK),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidToken(_) => None,
        }
    }

    /// True for every failure raised by this library rather than the transport.
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }

    pub fn is_not_in_war(&self) -> bool {
        matches!(self, Self::NotInWar { .. })
    }
}
