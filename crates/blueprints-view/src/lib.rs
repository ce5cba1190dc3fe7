//! Display-side pipeline: aggregate an author's blueprints into a summary,
//! turn one blueprint into draw operations, and keep the session's
//! current selection.

pub mod aggregate;
pub mod render;
pub mod session;
pub mod viewer;

pub use aggregate::{summarize, summarize_lookup, AuthorView, BlueprintSummary};
pub use render::{to_draw_ops, DrawOp, MARKER_RADIUS};
pub use session::Session;
pub use viewer::Viewer;
