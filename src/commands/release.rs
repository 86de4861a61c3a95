use {
    crate::{
        types::{
            ecosystem::{Ecosystem, Repository},
            version::Version,
        },
        utils::{
            fs::{find_top_level_files, recursive_find_files},
            git, manifest, process, prompt,
        },
    },
    anyhow::{anyhow, Context, Result},
    clap::Args,
    log::{debug, info},
    regex::Regex,
    std::{
        fs,
        io::{BufRead, Write},
        path::{Path, PathBuf},
    },
};

#[derive(Args, Debug)]
pub struct CommandArgs {
    /// Package directory, named `py.<name>` or `js.<name>`
    pub repository: PathBuf,

    /// Version to release (defaults to the next patch version)
    #[arg(short, long)]
    pub version: Option<String>,

    /// Print what would be released without changing anything
    #[arg(short, long)]
    pub pretend: bool,

    /// Directory the repository path is resolved against
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

pub fn run(args: CommandArgs) -> Result<()> {
    let stdin = std::io::stdin();
    release(&args, &mut stdin.lock(), &mut std::io::stdout())
}

/// Computes the new version and, unless pretending, rewrites, commits, tags,
/// pushes and publishes the repository.
///
/// `input` and `output` are used for the confirmation prompt and user-facing
/// messages.
pub fn release(
    args: &CommandArgs,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let repo = Repository::open(&args.root, &args.repository)?;
    info!("releasing {} ({} package)", repo.name, repo.ecosystem);

    let old_version = manifest::read_version(&repo).context("failed to get current version")?;
    let new_version = match &args.version {
        None => old_version.version.increment(),
        Some(version) => {
            let new_version = Version::parse_release(version)?;
            if let Some(reason) = old_version.version.confirmation_reason(&new_version) {
                prompt::confirm_or_abort(
                    &format!("{reason}: {old_version} -> {new_version}\ncontinue anyway?"),
                    input,
                    output,
                )?;
            }
            new_version
        }
    };

    if args.pretend {
        writeln!(
            output,
            "Would release {} as {new_version} (current={old_version})",
            args.repository.display()
        )?;
        return Ok(());
    }

    if git::is_dirty(&repo.path)? {
        return Err(anyhow!("Repository contains uncommitted changes"));
    }

    writeln!(output, "{old_version} -> {new_version}")?;
    update_repo_version(&repo, &old_version.raw, &new_version)?;
    publish(&repo, &new_version)
}

/// Rewrites the manifest and every embedded version declaration.
pub fn update_repo_version(repo: &Repository, old: &str, new: &Version) -> Result<()> {
    manifest::write_version(repo, old, new)?;
    info!("bumped {} from {old} to {new}", repo.ecosystem.manifest_file());

    let regex = repo.ecosystem.declaration_regex();
    for file in source_files(repo)? {
        if replace_version_string(&file, &regex, &new.to_string())? {
            info!("  bumped {}", file.display());
        } else {
            debug!("  no version declaration in {}", file.display());
        }
    }
    Ok(())
}

/// Files scanned for embedded version declarations.
pub fn source_files(repo: &Repository) -> Result<Vec<PathBuf>> {
    let (dir, recursive) = repo.ecosystem.source_dir();
    let dir = repo.path.join(dir);
    let extension = repo.ecosystem.source_extension();
    if recursive {
        recursive_find_files(&dir, extension)
    } else {
        find_top_level_files(&dir, extension)
    }
}

/// Replaces the version in the first declaration matching `regex`, keeping
/// its prefix and suffix. Returns whether the file was rewritten.
pub fn replace_version_string(file: &Path, regex: &Regex, new: &str) -> Result<bool> {
    let mut content =
        fs::read_to_string(file).context(format!("failed to read {}", file.display()))?;
    let Some(caps) = regex.captures(&content) else {
        return Ok(false);
    };
    let (Some(whole), Some(prefix), Some(suffix)) = (caps.get(0), caps.get(1), caps.get(3)) else {
        return Ok(false);
    };
    let range = whole.range();
    let line = format!("{}{new}{}", prefix.as_str(), suffix.as_str());

    content.replace_range(range, &line);
    fs::write(file, content).context(format!("failed to write {}", file.display()))?;
    Ok(true)
}

/// A single external command of the release sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl Step {
    fn new(program: &'static str, args: &[&str]) -> Self {
        Step {
            program,
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

pub fn commit_message(version: &Version) -> String {
    format!("Release: {version}")
}

/// Commands run by [`publish`], in order.
pub fn release_steps(ecosystem: Ecosystem, version: &Version) -> Vec<Step> {
    let message = commit_message(version);
    let version = version.to_string();
    let (program, args) = ecosystem.publish_command();
    vec![
        Step::new("git", &["commit", "-m", &message, "--all"]),
        Step::new("git", &["tag", &version]),
        Step::new("git", &["push", "--all"]),
        Step::new("git", &["push", "--tags"]),
        Step::new(program, args),
    ]
}

/// Commits, tags, pushes and publishes. Stops at the first failing step
/// without undoing the earlier ones.
pub fn publish(repo: &Repository, version: &Version) -> Result<()> {
    for step in release_steps(repo.ecosystem, version) {
        let args: Vec<&str> = step.args.iter().map(String::as_str).collect();
        process::run_checked(&repo.path, step.program, &args)?;
    }
    Ok(())
}
