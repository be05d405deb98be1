use crate::domain::ports::ScriptSink;
use crate::utils::error::Result;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub const STDOUT_FOOTER: &str = "-- Paste the SQL above into your SQL console and run it";

/// Writes the script followed by a blank line and [`STDOUT_FOOTER`].
#[derive(Debug)]
pub struct StdoutSink<W: Write = io::Stdout> {
    writer: W,
}

impl StdoutSink<io::Stdout> {
    pub fn new() -> Self {
        Self {
            writer: io::stdout(),
        }
    }
}

impl Default for StdoutSink<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ScriptSink for StdoutSink<W> {
    fn write_script(&mut self, script: &str) -> Result<String> {
        writeln!(self.writer, "{}", script)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", STDOUT_FOOTER)?;
        self.writer.flush()?;
        Ok("stdout".to_string())
    }
}

/// Writes the script alone to a file, creating parent directories.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl ScriptSink for FileSink {
    fn write_script(&mut self, script: &str) -> Result<String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, format!("{}\n", script))?;
        Ok(self.path.display().to_string())
    }
}
