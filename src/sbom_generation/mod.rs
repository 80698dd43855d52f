/// Domain layer - lock file parsing and SBOM assembly
///
/// Everything here is pure: inputs are file contents and instants,
/// outputs are domain values. Filesystem access lives in the adapters.
pub mod domain;
pub mod parsers;
pub mod services;
