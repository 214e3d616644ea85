use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line.
    #[default]
    Ndjson,
    /// A single pretty-printed JSON array.
    Json,
    /// CSV with a header row.
    Csv,
}

/// Streaming writer for serializable rows in one of the output formats.
pub enum RecordSink<W: Write> {
    Ndjson(W),
    Json { out: W, written: usize },
    Csv(csv::Writer<W>),
}

impl<W: Write> RecordSink<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        match format {
            OutputFormat::Ndjson => RecordSink::Ndjson(out),
            OutputFormat::Json => RecordSink::Json { out, written: 0 },
            OutputFormat::Csv => RecordSink::Csv(csv::Writer::from_writer(out)),
        }
    }

    pub fn write<T: Serialize>(&mut self, row: &T) -> Result<()> {
        match self {
            RecordSink::Ndjson(out) => {
                serde_json::to_writer(&mut *out, row)?;
                out.write_all(b"\n")?;
            }
            RecordSink::Json { out, written } => {
                out.write_all(if *written == 0 { b"[\n" } else { b",\n" })?;
                serde_json::to_writer_pretty(&mut *out, row)?;
                *written += 1;
            }
            RecordSink::Csv(w) => w.serialize(row)?,
        }
        Ok(())
    }

    /// Close the JSON array (if any) and flush.
    pub fn finish(self) -> Result<()> {
        match self {
            RecordSink::Ndjson(mut out) => out.flush()?,
            RecordSink::Json { mut out, written } => {
                out.write_all(if written == 0 { b"[]\n" } else { b"\n]\n" })?;
                out.flush()?;
            }
            RecordSink::Csv(mut w) => w.flush()?,
        }
        Ok(())
    }
}

/// Sink over stdout, or over a freshly created file when `path` is given.
pub fn open_sink(format: OutputFormat, path: Option<&Path>) -> Result<RecordSink<Box<dyn Write>>> {
    let out: Box<dyn Write> = match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("create {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(RecordSink::new(format, out))
}
