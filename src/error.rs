use thiserror::Error;

/// Unified error type for fella
#[derive(Error, Debug)]
pub enum FellaError {
    #[error("asset error: {0}")]
    Asset(String),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal error: {0}")]
    Terminal(String),
}

pub type FellaResult<T> = Result<T, FellaError>;
