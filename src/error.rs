use thiserror::Error;

#[derive(Debug, Error)]
pub enum PadError {
    #[error("Connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PadError {
    /// Map a reqwest failure onto the connection/transport split.
    ///
    /// TLS handshake and certificate failures show up as connect errors in
    /// reqwest, so they land in `Connection` as well.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            PadError::Connection {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            PadError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl From<image::ImageError> for PadError {
    fn from(err: image::ImageError) -> Self {
        PadError::Image(err.to_string())
    }
}

impl From<PadError> for String {
    fn from(err: PadError) -> Self {
        err.to_string()
    }
}
