pub mod filter;
pub mod fixture;
pub mod seed;

pub use filter::{BlueprintFilter, FilterKind};
pub use fixture::FixtureSource;
