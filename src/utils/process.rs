use {
    anyhow::{anyhow, Context, Result},
    log::info,
    std::{path::Path, process::Command},
};

fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs `program` in `dir` with inherited stdio and fails unless it exits
/// successfully.
pub fn run_checked(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let command = display_command(program, args);
    info!("running `{command}` in {}", dir.display());
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .context(format!("failed to run `{command}` in {}", dir.display()))?;
    if !status.success() {
        return Err(anyhow!("`{command}` exited with {status}"));
    }
    Ok(())
}
