use {
    anyhow::{anyhow, Context, Result},
    regex::Regex,
    std::{
        fmt,
        path::{Path, PathBuf},
    },
};

/// `__version__ = "X.Y.Z"` on a line of its own.
const PY_DECLARATION: &str = r#"(?m)^(__version__ = ["'])(\d+\.\d+(?:\.\d+)?)(["'])$"#;

/// `foo.__version__ = 'X.Y.Z';` or `"__version__": "X.Y.Z",`.
const JS_DECLARATION: &str = concat!(
    r#"(?m)^(\s*(?:[a-zA-Z_]+\.__version__\s+=|["']?__version__["']?\s*:)"#,
    r#"\s+["'])(\d+\.\d+(?:\.\d+)?)(["'][,;])$"#,
);

/// The package ecosystem of a repository, selected by the `py.`/`js.` prefix
/// of its directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
    PythonPackage,
    JsPackage,
}

impl Ecosystem {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.starts_with("py.") {
            Some(Ecosystem::PythonPackage)
        } else if name.starts_with("js.") {
            Some(Ecosystem::JsPackage)
        } else {
            None
        }
    }

    pub fn manifest_file(self) -> &'static str {
        match self {
            Ecosystem::PythonPackage => "setup.py",
            Ecosystem::JsPackage => "package.json",
        }
    }

    pub fn manifest_marker(self) -> &'static str {
        match self {
            Ecosystem::PythonPackage => "version=",
            Ecosystem::JsPackage => "\"version\": ",
        }
    }

    pub fn manifest_pattern(self) -> &'static str {
        match self {
            Ecosystem::PythonPackage => r"^[^=]+=.([0-9.]+)",
            Ecosystem::JsPackage => r"^[^:]+:.*?([0-9.]+)",
        }
    }

    /// Captures (prefix, version, suffix).
    pub fn declaration_regex(self) -> Regex {
        let pattern = match self {
            Ecosystem::PythonPackage => PY_DECLARATION,
            Ecosystem::JsPackage => JS_DECLARATION,
        };
        Regex::new(pattern).expect("declaration patterns are valid")
    }

    pub fn source_extension(self) -> &'static str {
        match self {
            Ecosystem::PythonPackage => "py",
            Ecosystem::JsPackage => "js",
        }
    }

    /// Directory scanned for source files, relative to the repository (empty
    /// for the repository itself), and whether it is walked recursively.
    pub fn source_dir(self) -> (&'static str, bool) {
        match self {
            Ecosystem::PythonPackage => ("score", true),
            Ecosystem::JsPackage => ("", false),
        }
    }

    pub fn publish_command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Ecosystem::PythonPackage => ("python", &["setup.py", "sdist", "upload"]),
            Ecosystem::JsPackage => ("npm", &["publish"]),
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ecosystem::PythonPackage => f.write_str("python"),
            Ecosystem::JsPackage => f.write_str("js"),
        }
    }
}

/// A package directory inside the monorepo together with its ecosystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub path: PathBuf,
    pub ecosystem: Ecosystem,
}

impl Repository {
    pub fn open(root: &Path, repository: &Path) -> Result<Self> {
        let name = repository
            .file_name()
            .and_then(|name| name.to_str())
            .context(format!("invalid repository path {}", repository.display()))?
            .to_string();
        let ecosystem = Ecosystem::from_name(&name).ok_or_else(|| {
            anyhow!("repository name must start with `py.` or `js.`, got `{name}`")
        })?;
        let path = root.join(repository);
        if !path.is_dir() {
            return Err(anyhow!("{} is not a directory", path.display()));
        }
        Ok(Repository {
            name,
            path,
            ecosystem,
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(self.ecosystem.manifest_file())
    }
}
