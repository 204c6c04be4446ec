#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum SolrQueryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
