pub mod fs;
pub mod git;
pub mod manifest;
pub mod process;
pub mod prompt;

pub use fs::{find_top_level_files, recursive_find_files};
pub use git::is_dirty;
pub use manifest::{read_version, write_version, ManifestVersion};
pub use process::run_checked;
pub use prompt::{confirm, confirm_or_abort};
