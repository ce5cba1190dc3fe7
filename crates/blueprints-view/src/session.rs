use crate::aggregate::AuthorView;

/// Per-user selection state: the current author and the last summary
/// fetched for them. Selecting an author always discards the held summary.
#[derive(Clone, Debug, Default)]
pub struct Session {
    current_author: Option<String>,
    last_view: Option<AuthorView>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_author(&mut self, author: impl Into<String>) {
        self.current_author = Some(author.into());
        self.last_view = None;
    }

    pub fn current_author(&self) -> Option<&str> {
        self.current_author.as_deref()
    }

    /// Keep `view` for re-display. Ignored unless it belongs to the current author.
    pub fn remember_view(&mut self, view: AuthorView) -> bool {
        if self.current_author() != Some(view.author()) {
            return false;
        }
        self.last_view = Some(view);
        true
    }

    pub fn last_view(&self) -> Option<&AuthorView> {
        self.last_view.as_ref()
    }

    /// Drop the cached summary but keep the selection.
    pub fn invalidate_view(&mut self) {
        self.last_view = None;
    }

    pub fn reset(&mut self) {
        self.current_author = None;
        self.last_view = None;
    }
}
