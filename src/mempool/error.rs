use thiserror::Error;

#[derive(Error, Debug)]
pub enum MempoolError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid data format: {0}")]
    InvalidData(String),
}
