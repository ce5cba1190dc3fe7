pub mod errors;
pub mod model;
pub mod source;

pub use errors::BlueprintError;
pub use model::{Blueprint, BlueprintKey, Point};
pub use source::{validate_update, BlueprintSource};
