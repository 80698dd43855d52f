/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod archive;
pub mod console;
pub mod detection;
pub mod filesystem;
pub mod formatters;
pub mod system;
