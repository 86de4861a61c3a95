use {
    anyhow::{Context, Result},
    std::{path::Path, process::Command},
};

/// Whether tracked files in the work tree differ from `HEAD`.
///
/// A repository without a `HEAD` commit is reported as dirty.
pub fn is_dirty(dir: &Path) -> Result<bool> {
    let status = Command::new("git")
        .args(["diff-index", "--quiet", "HEAD", "--"])
        .current_dir(dir)
        .status()
        .context(format!("failed to run `git diff-index` in {}", dir.display()))?;
    Ok(!status.success())
}
