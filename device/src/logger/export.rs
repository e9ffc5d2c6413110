use super::table::Table;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const DEFAULT_MAX_ROWS: usize = 1000;

/// Writes the latest `max_rows` rows of `table` to `out`, most recent
/// first, one `time,temp,rh` line per row with no header, replacing any
/// existing file. Returns the number of rows written.
pub fn export<P: AsRef<Path>>(table: &Table, max_rows: usize, out: P) -> io::Result<usize> {
    let rows = table.latest(max_rows)?;
    let mut file = BufWriter::new(File::create(out.as_ref())?);
    for row in rows.iter() {
        writeln!(file, "{}", row)?;
    }
    file.flush()?;
    log::info!(
        "[export] {} rows from {} written to {}",
        rows.len(),
        table.name(),
        out.as_ref().display()
    );
    Ok(rows.len())
}
