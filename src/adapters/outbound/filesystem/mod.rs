/// Filesystem adapters for file I/O operations
mod directory_walker;
mod file_reader;
mod file_writer;

pub use directory_walker::{breadth_first_directories, MAX_SEARCH_DEPTH};
pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
