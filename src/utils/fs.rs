use {
    anyhow::Result,
    std::path::{Path, PathBuf},
    walkdir::WalkDir,
};

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// Every file with the given extension below `path`, sorted. A missing
/// directory yields no files.
pub fn recursive_find_files(path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![]);
    }
    let mut results = vec![];
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.path().is_file() && has_extension(entry.path(), extension) {
            results.push(entry.path().to_path_buf());
        }
    }
    Ok(results)
}

/// Non-hidden files with the given extension directly inside `path`, sorted.
pub fn find_top_level_files(path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut results = vec![];
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if file_name.starts_with('.') || !entry.path().is_file() {
            continue;
        }
        if has_extension(entry.path(), extension) {
            results.push(entry.path().to_path_buf());
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq, std::fs};

    #[test]
    fn test_recursive_find_files() {
        let root_dir = tempfile::tempdir().unwrap();
        let score = root_dir.path().join("score");
        fs::create_dir_all(score.join("tpl/filters")).unwrap();
        fs::write(score.join("__init__.py"), "").unwrap();
        fs::write(score.join("tpl/__init__.py"), "").unwrap();
        fs::write(score.join("tpl/filters/escape.py"), "").unwrap();
        fs::write(score.join("tpl/README.rst"), "").unwrap();
        fs::write(root_dir.path().join("setup.py"), "").unwrap();

        let files = recursive_find_files(&score, "py").unwrap();
        assert_eq!(
            files,
            vec![
                score.join("__init__.py"),
                score.join("tpl/__init__.py"),
                score.join("tpl/filters/escape.py"),
            ]
        );
    }

    #[test]
    fn test_recursive_find_files_missing_dir() {
        let root_dir = tempfile::tempdir().unwrap();
        let files = recursive_find_files(&root_dir.path().join("score"), "py").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_top_level_files() {
        let root_dir = tempfile::tempdir().unwrap();
        let root = root_dir.path();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("score.init.js"), "").unwrap();
        fs::write(root.join("Gruntfile.js"), "").unwrap();
        fs::write(root.join(".eslintrc.js"), "").unwrap();
        fs::write(root.join("package.json"), "").unwrap();
        fs::write(root.join("lib/nested.js"), "").unwrap();

        let files = find_top_level_files(root, "js").unwrap();
        assert_eq!(
            files,
            vec![root.join("Gruntfile.js"), root.join("score.init.js")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_found() {
        use std::os::unix::fs::symlink;

        let root_dir = tempfile::tempdir().unwrap();
        let root = root_dir.path();
        let shared = root.join("shared");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("version.py"), "").unwrap();
        fs::write(shared.join("version.js"), "").unwrap();

        let score = root.join("score");
        fs::create_dir_all(&score).unwrap();
        symlink(shared.join("version.py"), score.join("version.py")).unwrap();
        symlink(shared.join("version.js"), root.join("version.js")).unwrap();
        symlink(root.join("missing.js"), root.join("dangling.js")).unwrap();

        assert_eq!(
            recursive_find_files(&score, "py").unwrap(),
            vec![score.join("version.py")]
        );
        assert_eq!(
            find_top_level_files(root, "js").unwrap(),
            vec![root.join("version.js")]
        );
    }
}
