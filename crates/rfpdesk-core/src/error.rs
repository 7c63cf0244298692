use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("document not found: {0}")]
    DocumentNotFound(std::path::PathBuf),

    #[error("document path has no file name: {0}")]
    NoFileName(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
