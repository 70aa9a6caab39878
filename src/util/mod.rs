//! Utility modules for filesystem, paths, git, and logging.

pub mod fs;
pub mod git;
pub mod logging;
pub mod path;
