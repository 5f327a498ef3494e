use thiserror::Error;

/// Why a single Passwork API call did not produce usable data.
#[derive(Debug, Error)]
pub enum ApiFailure {
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("status={code} body={body}")]
    Status { code: u16, body: String },

    #[error("unreadable response: {0}")]
    Decode(reqwest::Error),

    #[error("status={0}")]
    Rejected(String),

    #[error("token empty")]
    MissingToken,

    #[error("response has no data")]
    MissingData,
}

/// Everything that can stop a run. Only `Fetch` is recovered from, by
/// skipping the entry.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("login failed: {0}")]
    Auth(ApiFailure),

    #[error("search failed: {0}")]
    Search(ApiFailure),

    #[error("get password {id} failed: {cause}")]
    Fetch {
        id: String,
        cause: ApiFailure,
    },

    #[error("fzf error: {0}")]
    Selector(String),

    #[error("could not find password for selected id {0}")]
    NotFound(String),

    #[error("selected entry has empty cryptedPassword")]
    EmptySecret,

    #[error("clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, Error>;
