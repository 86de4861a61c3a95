//! Reading and writing the version held in a repository's manifest.
//!
//! Both dialects are handled by line search rather than by parsing the
//! manifest, so callers should go through [`read_version`] and
//! [`write_version`] only.

use {
    crate::types::{ecosystem::Repository, version::Version},
    anyhow::{anyhow, Context, Result},
    log::debug,
    regex::Regex,
    std::{fmt, fs},
};

/// The version found in a manifest, with the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestVersion {
    pub raw: String,
    pub version: Version,
}

impl fmt::Display for ManifestVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Extracts the current version from the first manifest line containing the
/// ecosystem's version marker.
pub fn read_version(repo: &Repository) -> Result<ManifestVersion> {
    let manifest = repo.manifest_path();
    let content = fs::read_to_string(&manifest)
        .context(format!("failed to read {}", manifest.display()))?;
    let marker = repo.ecosystem.manifest_marker();
    let line = content
        .lines()
        .find(|line| line.contains(marker))
        .ok_or_else(|| anyhow!("no line containing `{marker}` in {}", manifest.display()))?;
    debug!("version line in {}: {line}", manifest.display());

    let pattern = Regex::new(repo.ecosystem.manifest_pattern())?;
    let raw = pattern
        .captures(line)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| anyhow!("failed to parse version from `{line}`"))?;
    let version = raw
        .parse()
        .context(format!("failed to parse version from `{line}`"))?;
    Ok(ManifestVersion { raw, version })
}

/// Replaces the first occurrence of `old` in the manifest with `new`. Fails
/// if the manifest no longer contains `old`.
pub fn write_version(repo: &Repository, old: &str, new: &Version) -> Result<()> {
    let manifest = repo.manifest_path();
    let content = fs::read_to_string(&manifest)
        .context(format!("failed to read {}", manifest.display()))?;
    if !content.contains(old) {
        return Err(anyhow!("version `{old}` not found in {}", manifest.display()));
    }
    let content = content.replacen(old, &new.to_string(), 1);
    fs::write(&manifest, content).context(format!("failed to write {}", manifest.display()))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        pretty_assertions::assert_eq,
        std::path::{Path, PathBuf},
        tempfile::TempDir,
    };

    fn repo_with_manifest(name: &str, manifest: &str, content: &str) -> (TempDir, Repository) {
        let root = tempfile::tempdir().unwrap();
        let dir: PathBuf = root.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(manifest), content).unwrap();
        let repo = Repository::open(root.path(), Path::new(name)).unwrap();
        (root, repo)
    }

    const SETUP_PY: &str = "\
from setuptools import setup

setup(
    name='score.widget',
    version='2.3.1',
    install_requires=['score.init>=0.3.1'],
)
";

    const PACKAGE_JSON: &str = r#"{
  "name": "score.widget",
  "version": "0.4.2",
  "dependencies": {
    "score.init": "^0.4.2"
  }
}
"#;

    #[test]
    fn test_read_version_setup_py() {
        let (_root, repo) = repo_with_manifest("py.widget", "setup.py", SETUP_PY);
        assert_eq!(read_version(&repo).unwrap().to_string(), "2.3.1");
    }

    #[test]
    fn test_read_version_setup_py_double_quotes() {
        let (_root, repo) =
            repo_with_manifest("py.widget", "setup.py", "setup(\n    version=\"0.3\",\n)\n");
        assert_eq!(read_version(&repo).unwrap().to_string(), "0.3");
    }

    #[test]
    fn test_read_version_package_json() {
        let (_root, repo) = repo_with_manifest("js.widget", "package.json", PACKAGE_JSON);
        assert_eq!(read_version(&repo).unwrap().to_string(), "0.4.2");
    }

    #[test]
    fn test_read_version_missing_line() {
        let (_root, repo) = repo_with_manifest("py.widget", "setup.py", "setup(name='x')\n");
        let err = read_version(&repo).unwrap_err();
        assert!(err.to_string().starts_with("no line containing `version=` in"));
    }

    #[test]
    fn test_read_version_missing_manifest() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("js.widget")).unwrap();
        let repo = Repository::open(root.path(), Path::new("js.widget")).unwrap();
        assert!(read_version(&repo)
            .unwrap_err()
            .to_string()
            .starts_with("failed to read"));
    }

    #[test]
    fn test_write_version_replaces_first_occurrence() {
        let (_root, repo) = repo_with_manifest("js.widget", "package.json", PACKAGE_JSON);
        write_version(&repo, "0.4.2", &"0.4.3".parse().unwrap()).unwrap();

        let content = fs::read_to_string(repo.manifest_path()).unwrap();
        assert_eq!(content, PACKAGE_JSON.replacen("0.4.2", "0.4.3", 1));
        assert!(content.contains("\"score.init\": \"^0.4.2\""));
        assert_eq!(read_version(&repo).unwrap().to_string(), "0.4.3");
    }

    #[test]
    fn test_leading_zero_version_is_rewritten() {
        let (_root, repo) =
            repo_with_manifest("py.widget", "setup.py", "setup(\n    version='1.2.03',\n)\n");
        let current = read_version(&repo).unwrap();
        assert_eq!(current.raw, "1.2.03");
        assert_eq!(current.version.to_string(), "1.2.3");

        let new = current.version.increment();
        write_version(&repo, &current.raw, &new).unwrap();
        assert_eq!(
            fs::read_to_string(repo.manifest_path()).unwrap(),
            "setup(\n    version='1.2.4',\n)\n"
        );
    }

    #[test]
    fn test_write_version_missing_old_version() {
        let (_root, repo) = repo_with_manifest("py.widget", "setup.py", SETUP_PY);
        let err = write_version(&repo, "9.9.9", &"9.9.10".parse().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("version `9.9.9` not found in"));
        assert_eq!(fs::read_to_string(repo.manifest_path()).unwrap(), SETUP_PY);
    }
}
