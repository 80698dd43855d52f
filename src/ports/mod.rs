/// Ports module defining interfaces for hexagonal architecture
///
/// Use cases are the driving side and are called directly; only the
/// driven (outbound) side is abstracted behind traits.
pub mod outbound;
