use super::table::Table;
use crate::domain::Sample;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// One logged sample: `YYYY-MM-DD HH:MM:SS,<temperature>,<humidity>`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub timestamp: String,
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
}

impl LogRow {
    pub fn new(timestamp: String, sample: Sample) -> Self {
        Self {
            timestamp,
            temperature: sample.temperature,
            humidity: sample.relative_humidity,
        }
    }
}

/// Renders a value the way it is stored: shortest round-trip form with at
/// least one decimal, or `None` when missing.
pub(crate) struct Value(pub Option<f32>);

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:?}", v),
            None => f.write_str("None"),
        }
    }
}

impl Display for LogRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.timestamp,
            Value(self.temperature),
            Value(self.humidity)
        )
    }
}

/// Destination for logged rows.
pub trait Sink {
    fn write(&mut self, row: &LogRow) -> io::Result<()>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, row: &LogRow) -> io::Result<()> {
        (**self).write(row)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMode {
    /// Every row is appended.
    Append,
    /// The file only ever holds the most recent row.
    Overwrite,
}

impl Default for FileMode {
    fn default() -> Self {
        FileMode::Append
    }
}

/// Writes rows to a text file, reopening it for every row so the file can
/// be rotated or inspected while logging runs.
pub struct FileSink {
    path: PathBuf,
    mode: FileMode,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(path: P, mode: FileMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> io::Result<File> {
        match self.mode {
            FileMode::Append => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path),
            FileMode::Overwrite => File::create(&self.path),
        }
    }
}

impl Sink for FileSink {
    fn write(&mut self, row: &LogRow) -> io::Result<()> {
        let mut file = self.open()?;
        writeln!(file, "{}", row)
    }
}

/// Inserts one `(time, temp, rh)` row per sample into a [`Table`],
/// optionally mirroring the latest row to a file.
pub struct TableSink {
    table: Table,
    latest: Option<FileSink>,
}

impl TableSink {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            latest: None,
        }
    }

    pub fn with_latest<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.latest = Some(FileSink::new(path, FileMode::Overwrite));
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl Sink for TableSink {
    fn write(&mut self, row: &LogRow) -> io::Result<()> {
        if let Some(latest) = self.latest.as_mut() {
            latest.write(row)?;
        }
        self.table.insert(row)
    }
}
