//! Thread persistence adapters

mod file_backend;

pub use file_backend::FileSessionBackend;
