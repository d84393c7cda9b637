#[cfg(feature = "otel")]
mod otel;
#[cfg(feature = "otel")]
pub use otel::{init_otel, shutdown_otel};

#[cfg(feature = "models")]
pub mod db;
#[cfg(feature = "mongo")]
pub use db::init_mongo;

#[cfg(feature = "env")]
mod env;
#[cfg(feature = "env")]
pub use env::env;
