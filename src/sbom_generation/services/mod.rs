mod sbom_assembler;
mod sbom_generator;

pub use sbom_assembler::SbomAssembler;
pub use sbom_generator::{SbomGenerator, TOOL_NAME, TOOL_VENDOR, TOOL_VERSION};
