use serde::{Deserialize, Serialize};

use blueprints_core::{Blueprint, BlueprintError};

/// One row of an author's listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintSummary {
    pub name: String,
    pub point_count: usize,
}

/// Summary of an author's blueprints. `total_points` is always the sum of
/// the rows' point counts; the fields are private so it cannot drift.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    author: String,
    summaries: Vec<BlueprintSummary>,
    total_points: usize,
}

impl AuthorView {
    /// The documented shape for an author with nothing to show.
    pub fn empty(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            summaries: Vec::new(),
            total_points: 0,
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn summaries(&self) -> &[BlueprintSummary] {
        &self.summaries
    }

    pub fn total_points(&self) -> usize {
        self.total_points
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// Reduce `blueprints` to one summary row each, preserving input order.
pub fn summarize(author: &str, blueprints: &[Blueprint]) -> AuthorView {
    let summaries: Vec<BlueprintSummary> = blueprints
        .iter()
        .map(|bp| BlueprintSummary {
            name: bp.name.clone(),
            point_count: bp.point_count(),
        })
        .collect();
    let total_points = summaries.iter().map(|s| s.point_count).sum();

    AuthorView {
        author: author.to_string(),
        summaries,
        total_points,
    }
}

/// Summarize a source lookup. NotFound is an author with zero blueprints,
/// not a failure; every other error passes through.
pub fn summarize_lookup(
    author: &str,
    lookup: Result<Vec<Blueprint>, BlueprintError>,
) -> Result<AuthorView, BlueprintError> {
    match lookup {
        Ok(blueprints) => Ok(summarize(author, &blueprints)),
        Err(BlueprintError::NotFound(_)) => Ok(AuthorView::empty(author)),
        Err(other) => Err(other),
    }
}
