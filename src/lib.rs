pub mod client;
pub mod config;
pub mod enrich;
pub mod error;
pub mod format;
pub mod model;
pub mod names;
pub mod pokemon;
pub mod search;
pub mod server;
pub mod session;

#[cfg(test)]
mod test_support;

pub use client::*;
pub use config::*;
pub use enrich::*;
pub use error::*;
pub use model::*;
pub use names::is_canonical;
pub use search::filter;
pub use session::*;
