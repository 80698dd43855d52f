/// Archive adapters for unpacking uploaded projects
mod zip_extractor;

pub use zip_extractor::ZipArchiveExtractor;
