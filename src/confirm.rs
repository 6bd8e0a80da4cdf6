// src/confirm.rs - Interactive yes/no confirmation
use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use std::path::Path;

/// Parses a yes/no answer, ignoring case and surrounding whitespace.
/// Returns `None` for anything that is neither.
pub fn parse_confirmation(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Writes `prompt` and reads answers from `input` until one parses.
///
/// Fails if `input` is exhausted before a valid answer arrives.
pub fn prompt_confirmation<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<bool> {
    let mut line = String::new();
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for confirmation");
        }
        if let Some(answer) = parse_confirmation(&line) {
            return Ok(answer);
        }
    }
}

pub fn deletion_prompt(path: &Path) -> String {
    format!("Delete path \"{}\"? [Y/N]: ", path.display())
}
