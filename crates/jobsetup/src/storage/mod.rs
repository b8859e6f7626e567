pub mod blob;
pub mod key;

pub use blob::FileBlobStore;
pub use key::{attachment_key, content_type_or_default, file_extension};
