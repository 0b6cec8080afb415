pub mod common;
pub mod config;
pub mod indexing;
pub mod io;
pub mod recommend;
pub mod types;
pub use self::config::Config;
