//! Delimited (CSV/TSV) output
//!
//! Writes one header row of the fixed record field names followed by one row
//! per record. Fields that contain the delimiter, a quote, or a line break
//! are quoted, with quotes doubled.

use crate::config::OutputConfig;
use crate::model::{Aggregate, Record, RECORD_FIELDS};
use crate::output::traits::{OutputError, OutputResult, Sink};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sink writing the aggregate to a delimited text file
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
    delimiter: char,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.path, config.delimiter)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for CsvSink {
    fn write(&self, aggregate: &Aggregate) -> OutputResult<()> {
        let write = || -> io::Result<()> {
            let mut writer = BufWriter::new(File::create(&self.path)?);
            write_delimited(&mut writer, aggregate.iter(), self.delimiter)?;
            writer.flush()
        };

        write().map_err(|source| OutputError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row to any writer
fn write_row<W: Write>(w: &mut W, row: &[&str], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Writes the header row and then every record, in iteration order
pub fn write_delimited<'a, W, I>(w: &mut W, records: I, sep: char) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    write_row(w, &RECORD_FIELDS, sep)?;
    for record in records {
        write_row(w, &record.fields(), sep)?;
    }
    Ok(())
}

/// Formats records as delimited text
pub fn format_delimited<'a, I>(records: I, sep: char) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_delimited(&mut buf, records, sep);
    String::from_utf8_lossy(&buf).into_owned()
}
