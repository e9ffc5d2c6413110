use super::sink::LogRow;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const HEADER: &str = "time,temp,rh";

/// A `(time, temp, rh)` table stored as `<dir>/<name>.csv`.
pub struct Table {
    name: String,
    path: PathBuf,
}

impl Table {
    /// Opens the table `name` under `dir`, creating the directory if
    /// needed. The file itself is created on the first insert.
    pub fn open<P: AsRef<Path>>(dir: P, name: &str) -> io::Result<Self> {
        if !valid_name(name) {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid table name {:?}", name),
            ));
        }
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            name: name.to_string(),
            path: dir.as_ref().join(format!("{}.csv", name)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn insert(&mut self, row: &LogRow) -> io::Result<()> {
        let fresh = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if fresh {
            writeln!(file, "{}", HEADER)?;
        }
        writeln!(file, "{}", row)
    }

    /// At most `n` rows, most recent first. A table that was never
    /// written to is empty.
    pub fn latest(&self, n: usize) -> io::Result<Vec<LogRow>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut rows = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.is_empty() || (index == 0 && line == HEADER) {
                continue;
            }
            rows.push(parse_row(&line)?);
        }
        // equal timestamps: most recently inserted first
        rows.reverse();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows.truncate(n);
        Ok(rows)
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_row(line: &str) -> io::Result<LogRow> {
    let mut fields = line.split(',');
    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(timestamp), Some(temperature), Some(humidity), None) => Ok(LogRow {
            timestamp: timestamp.to_string(),
            temperature: parse_value(temperature, line)?,
            humidity: parse_value(humidity, line)?,
        }),
        _ => Err(malformed(line)),
    }
}

fn parse_value(field: &str, line: &str) -> io::Result<Option<f32>> {
    if field == "None" {
        return Ok(None);
    }
    field.parse().map(Some).map_err(|_| malformed(line))
}

fn malformed(line: &str) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, format!("malformed row {:?}", line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_restricted() {
        assert!(valid_name("readings"));
        assert!(valid_name("lab_2"));
        assert!(!valid_name(""));
        assert!(!valid_name("x; DROP TABLE y"));
        assert!(!valid_name("../up"));
    }

    #[test]
    fn rows_parse_with_missing_values() {
        let row = parse_row("2024-03-01 12:00:00,None,41.5").unwrap();
        assert_eq!(row.temperature, None);
        assert_eq!(row.humidity, Some(41.5));
        assert!(parse_row("2024-03-01 12:00:00,1.0").is_err());
        assert!(parse_row("2024-03-01 12:00:00,abc,1.0").is_err());
    }
}
