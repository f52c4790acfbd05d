pub mod delete;
pub mod public_file;
pub mod upload;
