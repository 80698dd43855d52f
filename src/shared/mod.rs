/// Shared utilities used across every layer
pub mod error;
pub mod naming;
mod result;
pub mod security;

pub use result::Result;
