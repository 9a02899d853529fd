use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("No platforms selected")]
    NoPlatforms,
    #[error("Export cancelled")]
    Cancelled,
    /// The worker died or stopped reporting before sending a result.
    #[error("{0}")]
    Unexpected(String),
}
