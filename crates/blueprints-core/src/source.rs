use async_trait::async_trait;

use crate::errors::BlueprintError;
use crate::model::{require_non_blank, Blueprint};

/// Trait implemented by every blueprint backend (in-memory fixtures, remote HTTP).
///
/// Callers hold an `Arc<dyn BlueprintSource>` and never branch on which
/// backend is active. Each call is one request/response exchange; failures
/// are already translated into [`BlueprintError`].
#[async_trait]
pub trait BlueprintSource: Send + Sync {
    /// Short backend label for logs.
    fn name(&self) -> &str;

    /// Every stored blueprint.
    async fn fetch_all(&self) -> Result<Vec<Blueprint>, BlueprintError>;

    /// All blueprints of one author, in store order.
    async fn fetch_by_author(&self, author: &str) -> Result<Vec<Blueprint>, BlueprintError>;

    async fn fetch_by_author_and_name(
        &self,
        author: &str,
        name: &str,
    ) -> Result<Blueprint, BlueprintError>;

    /// Store a new blueprint, returning its canonical stored form.
    async fn create(&self, blueprint: Blueprint) -> Result<Blueprint, BlueprintError>;

    /// Replace the whole record stored under `(author, name)`.
    async fn update(
        &self,
        author: &str,
        name: &str,
        blueprint: Blueprint,
    ) -> Result<Blueprint, BlueprintError>;
}

/// Preconditions for an update: a valid body whose identity matches the key.
pub fn validate_update(author: &str, name: &str, blueprint: &Blueprint) -> Result<(), BlueprintError> {
    require_non_blank("author", author)?;
    require_non_blank("name", name)?;
    blueprint.validate()?;
    if !blueprint.has_key(author, name) {
        return Err(BlueprintError::Validation(format!(
            "blueprint {} does not match key {author}/{name}",
            blueprint.key()
        )));
    }
    Ok(())
}
