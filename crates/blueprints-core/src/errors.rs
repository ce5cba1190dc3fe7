/// Error taxonomy shared by every blueprint source and its callers.
/// Sources are the only place raw transport or store outcomes get translated
/// into these variants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BlueprintError {
    /// The requested author, or author/name key, does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// A create collided with an existing author/name key.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Transport or backing-store failure unrelated to the requested key.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Malformed input, rejected before any source access.
    #[error("validation error: {0}")]
    Validation(String),
}

impl BlueprintError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Short classification string for logging and error bodies.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Validation(_) => "validation",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m) | Self::Conflict(m) | Self::ServiceUnavailable(m) | Self::Validation(m) => m,
        }
    }

    pub fn author_not_found(author: &str) -> Self {
        Self::NotFound(format!("no blueprints found for author: {author}"))
    }

    pub fn blueprint_not_found(author: &str, name: &str) -> Self {
        Self::NotFound(format!("blueprint not found: {author}/{name}"))
    }

    pub fn already_exists(author: &str, name: &str) -> Self {
        Self::Conflict(format!("blueprint already exists: {author}/{name}"))
    }
}
