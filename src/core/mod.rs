// Public modules
pub mod defaults;
pub mod error;
pub mod perm;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
