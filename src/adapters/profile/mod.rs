//! Profile store adapters implementing `ProfileReader`.

mod in_memory;
mod json_file;

pub use in_memory::InMemoryProfileStore;
pub use json_file::FsProfileStore;
