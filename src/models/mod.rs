//! Data structures shared by the commands.

pub mod scan;
pub mod secret;
pub mod settings;
