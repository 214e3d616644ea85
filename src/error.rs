use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealsError {
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("network: {0}")]
    Net(#[from] reqwest::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("decode: {0}")]
    Decode(String),
    #[error("config: {0}")]
    Config(String),
}

pub type Result<T, E = DealsError> = std::result::Result<T, E>;
