use std::sync::Arc;

use tracing::{debug, info};

use blueprints_core::model::require_non_blank;
use blueprints_core::{validate_update, Blueprint, BlueprintError, BlueprintSource};

use crate::aggregate::{summarize_lookup, AuthorView};
use crate::render::{to_draw_ops, DrawOp};
use crate::session::Session;

/// Entry point for a presentation layer: look up an author, open one of
/// their blueprints, and submit edits, all against whichever source was
/// configured at startup.
pub struct Viewer {
    source: Arc<dyn BlueprintSource>,
    session: Session,
}

impl Viewer {
    pub fn new(source: Arc<dyn BlueprintSource>) -> Self {
        Self {
            source,
            session: Session::new(),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Select `author` and summarize their blueprints.
    /// An unknown author yields the empty view rather than an error.
    pub async fn lookup_author(&mut self, author: &str) -> Result<AuthorView, BlueprintError> {
        let author = author.trim();
        require_non_blank("author", author)?;

        self.session.set_current_author(author);
        let view = summarize_lookup(author, self.source.fetch_by_author(author).await)?;
        info!(
            author,
            source = self.source.name(),
            rows = view.summaries().len(),
            total_points = view.total_points(),
            "author lookup"
        );
        self.session.remember_view(view.clone());
        Ok(view)
    }

    /// Fetch one blueprint and convert it to draw operations.
    pub async fn open_blueprint(&self, author: &str, name: &str) -> Result<Vec<DrawOp>, BlueprintError> {
        let author = author.trim();
        require_non_blank("author", author)?;
        require_non_blank("name", name)?;

        let blueprint = self.source.fetch_by_author_and_name(author, name).await?;
        let ops = to_draw_ops(&blueprint);
        debug!(author, name, ops = ops.len(), "blueprint opened");
        Ok(ops)
    }

    pub fn current_author(&self) -> Option<&str> {
        self.session.current_author()
    }

    /// Summary from the most recent lookup, if still valid.
    pub fn last_view(&self) -> Option<&AuthorView> {
        self.session.last_view()
    }

    pub async fn create(&mut self, blueprint: Blueprint) -> Result<Blueprint, BlueprintError> {
        blueprint.validate()?;
        let author = blueprint.author.clone();
        let stored = self.source.create(blueprint).await?;
        self.invalidate_if_current(&author);
        Ok(stored)
    }

    pub async fn update(
        &mut self,
        author: &str,
        name: &str,
        blueprint: Blueprint,
    ) -> Result<Blueprint, BlueprintError> {
        validate_update(author, name, &blueprint)?;
        let stored = self.source.update(author, name, blueprint).await?;
        self.invalidate_if_current(author);
        Ok(stored)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    fn invalidate_if_current(&mut self, author: &str) {
        if self.session.current_author() == Some(author) {
            self.session.invalidate_view();
        }
    }
}
