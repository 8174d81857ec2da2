use std::fs;
use std::path::Path;

use probekit_common::error::{ProbeFileError, Result};
use tracing::debug;

/// Loads a probe file into memory, one entry per line.
///
/// Line terminators (`\n` or `\r\n`) are stripped.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(ProbeFileError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ProbeFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let lines: Vec<String> = content.lines().map(str::to_owned).collect();
    debug!(path = %path.display(), lines = lines.len(), "loaded probe file");
    Ok(lines)
}

/// Writes `lines` to `path` in one pass, each followed by `\n`.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let mut content = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }

    fs::write(path, content).map_err(|source| ProbeFileError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), lines = lines.len(), "wrote probe file");
    Ok(())
}
