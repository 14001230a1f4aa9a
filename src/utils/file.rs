use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes each line followed by a newline, truncating any existing file.
///
/// An empty `lines` slice still creates (or empties) the file.
pub fn write_lines<S: AsRef<str>>(lines: &[S], path: impl AsRef<Path>) -> Result<(), WriteError> {
    let path = path.as_ref();
    let wrap = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(wrap)?);
    for line in lines {
        writer.write_all(line.as_ref().as_bytes()).map_err(wrap)?;
        writer.write_all(b"\n").map_err(wrap)?;
    }
    writer.flush().map_err(wrap)
}
