pub mod filename;
pub mod image;
