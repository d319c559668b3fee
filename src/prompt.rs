use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Write `message`, read one line from `input`, and return it trimmed.
pub fn prompt_from<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush output")?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Like [`prompt_from`], returning `default` when the answer is empty.
pub fn prompt_with_default_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    let answer = prompt_from(input, output, &format!("{} [{}]: ", message, default))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Prompt user with a message and return their trimmed input.
pub fn prompt(message: &str) -> Result<String> {
    prompt_from(&mut std::io::stdin().lock(), &mut std::io::stdout(), message)
}

/// Prompt user with a message and a default value. Returns default if input is empty.
pub fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    prompt_with_default_from(
        &mut std::io::stdin().lock(),
        &mut std::io::stdout(),
        message,
        default,
    )
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
pub fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Read a password without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = rpassword::prompt_password(message).context("Failed to read password")?;
    Ok(password.trim().to_string())
}
