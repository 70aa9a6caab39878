//! Core logic: scanning, value loading, mapping files, and secrets upload.

pub mod github;
pub mod mapping;
pub mod paths;
pub mod scanner;
pub mod seal;
pub mod settings;
pub mod survey;
pub mod upload;
pub mod values;
