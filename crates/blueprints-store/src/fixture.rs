use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use blueprints_core::model::require_non_blank;
use blueprints_core::{validate_update, Blueprint, BlueprintError, BlueprintSource};

use crate::seed;

/// In-memory blueprint source backed by an insertion-ordered list.
/// An author with no stored blueprints is reported as NotFound.
pub struct FixtureSource {
    records: RwLock<Vec<Blueprint>>,
}

impl FixtureSource {
    /// Empty source.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Source preloaded with the demo data set.
    pub fn seeded() -> Self {
        Self {
            records: RwLock::new(seed::seed_blueprints()),
        }
    }

    /// Source preloaded with `blueprints`. Each one goes through the same
    /// checks as `create`, so invalid records or duplicate keys are rejected.
    pub fn with_blueprints(
        blueprints: impl IntoIterator<Item = Blueprint>,
    ) -> Result<Self, BlueprintError> {
        let source = Self::new();
        for bp in blueprints {
            source.insert(bp)?;
        }
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn insert(&self, blueprint: Blueprint) -> Result<Blueprint, BlueprintError> {
        blueprint.validate()?;
        let mut records = self.records.write();
        if records.iter().any(|bp| bp.has_key(&blueprint.author, &blueprint.name)) {
            return Err(BlueprintError::already_exists(&blueprint.author, &blueprint.name));
        }
        records.push(blueprint.clone());
        Ok(blueprint)
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlueprintSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<Blueprint>, BlueprintError> {
        let all = self.records.read().clone();
        debug!(count = all.len(), "fixture fetch all");
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn fetch_by_author(&self, author: &str) -> Result<Vec<Blueprint>, BlueprintError> {
        require_non_blank("author", author)?;
        let found: Vec<Blueprint> = self
            .records
            .read()
            .iter()
            .filter(|bp| bp.author == author)
            .cloned()
            .collect();
        if found.is_empty() {
            return Err(BlueprintError::author_not_found(author));
        }
        debug!(count = found.len(), "fixture lookup by author");
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn fetch_by_author_and_name(
        &self,
        author: &str,
        name: &str,
    ) -> Result<Blueprint, BlueprintError> {
        require_non_blank("author", author)?;
        require_non_blank("name", name)?;
        self.records
            .read()
            .iter()
            .find(|bp| bp.has_key(author, name))
            .cloned()
            .ok_or_else(|| BlueprintError::blueprint_not_found(author, name))
    }

    #[instrument(skip(self, blueprint), fields(key = %blueprint.key()))]
    async fn create(&self, blueprint: Blueprint) -> Result<Blueprint, BlueprintError> {
        let stored = self.insert(blueprint)?;
        debug!("fixture blueprint created");
        Ok(stored)
    }

    #[instrument(skip(self, blueprint))]
    async fn update(
        &self,
        author: &str,
        name: &str,
        blueprint: Blueprint,
    ) -> Result<Blueprint, BlueprintError> {
        validate_update(author, name, &blueprint)?;
        let mut records = self.records.write();
        let slot = records
            .iter_mut()
            .find(|bp| bp.has_key(author, name))
            .ok_or_else(|| BlueprintError::blueprint_not_found(author, name))?;
        *slot = blueprint.clone();
        debug!(points = blueprint.point_count(), "fixture blueprint replaced");
        Ok(blueprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprints_core::Point;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[tokio::test]
    async fn fetch_by_author_preserves_insertion_order() {
        let source = FixtureSource::seeded();
        let found = source.fetch_by_author("johnconnor").await.unwrap();
        let names: Vec<&str> = found.iter().map(|bp| bp.name.as_str()).collect();
        assert_eq!(names, vec!["house", "gear"]);
        assert_eq!(found[0].point_count(), 4);
        assert_eq!(found[1].point_count(), 3);
    }

    #[tokio::test]
    async fn unknown_author_is_not_found() {
        let source = FixtureSource::seeded();
        let err = source.fetch_by_author("nobody").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn blank_author_is_validation_error() {
        let source = FixtureSource::seeded();
        let err = source.fetch_by_author("   ").await.unwrap_err();
        assert!(matches!(err, BlueprintError::Validation(_)));
    }

    #[tokio::test]
    async fn fetch_single_blueprint() {
        let source = FixtureSource::seeded();
        let bp = source.fetch_by_author_and_name("maria", "park_design").await.unwrap();
        assert_eq!(bp.point_count(), 10);

        let err = source.fetch_by_author_and_name("maria", "nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn create_conflict_leaves_record_untouched() {
        let source = FixtureSource::seeded();
        let before = source.fetch_by_author_and_name("johnconnor", "house").await.unwrap();

        let dup = Blueprint::new("johnconnor", "house", pts(&[(0.0, 0.0)]));
        let err = source.create(dup).await.unwrap_err();
        assert!(matches!(err, BlueprintError::Conflict(_)));

        let after = source.fetch_by_author_and_name("johnconnor", "house").await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let source = FixtureSource::new();
        let bp = Blueprint::new("ana", "kite", pts(&[(1.0, 2.0), (3.0, 4.0)]));
        let stored = source.create(bp.clone()).await.unwrap();
        assert_eq!(stored, bp);
        assert_eq!(source.fetch_by_author("ana").await.unwrap(), vec![bp]);
        assert_eq!(source.len(), 1);
    }

    #[tokio::test]
    async fn update_round_trip_preserves_order() {
        let source = FixtureSource::seeded();
        let replacement = Blueprint::new(
            "johnconnor",
            "gear",
            pts(&[(9.0, 9.0), (1.0, 1.0), (5.0, 5.0), (1.0, 1.0)]),
        );
        let stored = source
            .update("johnconnor", "gear", replacement.clone())
            .await
            .unwrap();
        assert_eq!(stored, replacement);

        let fetched = source.fetch_by_author_and_name("johnconnor", "gear").await.unwrap();
        assert_eq!(fetched, replacement);

        // Replacement keeps the record's position.
        let names: Vec<String> = source
            .fetch_by_author("johnconnor")
            .await
            .unwrap()
            .into_iter()
            .map(|bp| bp.name)
            .collect();
        assert_eq!(names, vec!["house", "gear"]);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let source = FixtureSource::seeded();
        let bp = Blueprint::new("johnconnor", "ghost", vec![]);
        let err = source.update("johnconnor", "ghost", bp).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_key_mismatch_is_validation_error() {
        let source = FixtureSource::seeded();
        let bp = Blueprint::new("johnconnor", "gear", vec![]);
        let err = source.update("johnconnor", "house", bp).await.unwrap_err();
        assert!(matches!(err, BlueprintError::Validation(_)));
    }

    #[test]
    fn with_blueprints_rejects_duplicates() {
        let result = FixtureSource::with_blueprints(vec![
            Blueprint::new("a", "b", vec![]),
            Blueprint::new("a", "b", vec![]),
        ]);
        assert!(matches!(result, Err(BlueprintError::Conflict(_))));
    }

    #[tokio::test]
    async fn fetch_all_returns_everything() {
        let source = FixtureSource::seeded();
        assert_eq!(source.fetch_all().await.unwrap().len(), 8);
        assert!(FixtureSource::new().fetch_all().await.unwrap().is_empty());
        assert_eq!(source.name(), "fixture");
    }
}
