pub mod remote;

pub use remote::{RemoteConfig, RemoteSource};
