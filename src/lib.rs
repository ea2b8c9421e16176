pub mod error;
pub mod types;
pub mod config;
pub mod util;
pub mod budget;
pub mod phone;
pub mod catalog;
pub mod search;
pub mod session;
pub mod lead;
pub mod enrich;
pub mod handoff;
pub mod tool;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const LOGO: &str = "🏠";
