pub mod error;
pub use error::OrthosError;
