use content::ContentError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{catalog}: no record with id '{id}'")]
    NotFound { catalog: &'static str, id: String },

    #[error("{catalog}: '{value}' is not a valid category")]
    InvalidCategory {
        catalog: &'static str,
        value: String,
    },

    #[error("unknown specialty '{0}' (expected hematology or neurology)")]
    InvalidSpecialty(String),

    #[error("level {0} is outside 1..=5")]
    InvalidLevel(u8),

    #[error("{catalog}: duplicate id '{id}'")]
    DuplicateId { catalog: &'static str, id: String },

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("failed to read content file (path: {path}): {source}", path = path.display())]
    ContentRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
