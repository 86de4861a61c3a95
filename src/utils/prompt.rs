use {
    anyhow::{anyhow, Context, Result},
    std::io::{BufRead, Write},
};

/// Asks a yes/no question, defaulting to "no". Re-asks on unrecognised
/// answers; end of input counts as "no".
pub fn confirm(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    loop {
        write!(output, "{question} [y/N]: ")?;
        output.flush()?;
        let mut answer = String::new();
        let read = input
            .read_line(&mut answer)
            .context("failed to read confirmation")?;
        if read == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => writeln!(output, "Error: invalid input")?,
        }
    }
}

/// Like [`confirm`], but declining is an error.
pub fn confirm_or_abort(
    question: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    if confirm(question, input, output)? {
        Ok(())
    } else {
        Err(anyhow!("Aborted!"))
    }
}
