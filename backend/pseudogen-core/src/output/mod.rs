//! Writes the completion to stdout or a file.

use crate::completion::CompletionResult;
use crate::error::OutputError;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;

/// Write `result` followed by a newline.
///
/// With a `destination` the file is opened for writing, created if absent and
/// truncated otherwise. Symlinks and device paths are written through.
///
/// # Errors
///
/// Returns [`OutputError::File`] for destination failures and
/// [`OutputError::Stdout`] if `stdout` cannot be written.
pub fn write<W: Write>(
    result: &CompletionResult,
    destination: Option<&Path>,
    stdout: &mut W,
) -> Result<(), OutputError> {
    match destination {
        Some(path) => write_file(&result.text, path),
        None => {
            writeln!(stdout, "{}", result.text)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn write_file(text: &str, path: &Path) -> Result<(), OutputError> {
    let mut file = File::create(path).map_err(|e| OutputError::file(path, e))?;

    writeln!(file, "{text}")
        .and_then(|_| file.flush())
        .map_err(|e| OutputError::file(path, e))?;

    info!("Wrote {} bytes to {}", text.len() + 1, path.display());
    Ok(())
}
