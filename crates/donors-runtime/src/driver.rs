//! Batch driver for one contributions file.
//!
//! Feeds the file to a [`RecordRouter`] chunk by chunk, streams the zip
//! statistics as they are produced and writes the date statistics once the
//! input is exhausted. Records are applied strictly in file order because
//! every zip line is a snapshot of its aggregate at that point.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use donors_core::settings::{Settings, TruncatedPolicy};
use donors_core::{DonorsError, Result};
use donors_data::reader::ChunkedLineReader;
use donors_data::router::{RecordRouter, Routed};
use donors_data::store::AggregateStore;

use crate::summary::RunSummary;

// ── LineSink ──────────────────────────────────────────────────────────────────

/// Writer for newline-joined output lines, without a trailing newline.
pub struct LineSink<W: Write> {
    inner: W,
    path: Option<PathBuf>,
    started: bool,
}

impl<W: Write> LineSink<W> {
    /// Sink over an in-memory or otherwise unnamed writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            path: None,
            started: false,
        }
    }

    /// Write one line, preceded by a separator unless it is the first.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let res = if self.started {
            self.inner
                .write_all(b"\n")
                .and_then(|_| self.inner.write_all(line.as_bytes()))
        } else {
            self.inner.write_all(line.as_bytes())
        };
        res.map_err(|e| self.write_error(e))?;
        self.started = true;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| self.write_error(e))
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_error(&self, source: io::Error) -> DonorsError {
        match &self.path {
            Some(path) => DonorsError::FileWrite {
                path: path.clone(),
                source,
            },
            None => DonorsError::Io(source),
        }
    }
}

impl LineSink<BufWriter<File>> {
    /// Open `path` for output, truncating it unless `append` is set.
    ///
    /// When appending to a non-empty file the first new line is preceded by
    /// a separator so it does not run into the existing content.
    pub fn create(path: &Path, append: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|source| DonorsError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
        let existing = if append {
            file.metadata().map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };
        Ok(Self {
            inner: BufWriter::new(file),
            path: Some(path.to_path_buf()),
            started: existing > 0,
        })
    }
}

// ── BatchDriver ───────────────────────────────────────────────────────────────

/// Reads, routes and writes one run.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    buffer_bytes: usize,
    on_truncated: TruncatedPolicy,
}

impl BatchDriver {
    pub fn new(buffer_bytes: usize, on_truncated: TruncatedPolicy) -> Self {
        Self {
            buffer_bytes,
            on_truncated,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.buffer_bytes, settings.on_truncated)
    }

    /// Run against the files named in `settings`.
    pub fn run(&self, settings: &Settings) -> Result<RunSummary> {
        settings.validate()?;

        let input = File::open(&settings.input).map_err(|source| DonorsError::FileRead {
            path: settings.input.clone(),
            source,
        })?;
        let mut zip_sink = LineSink::create(&settings.zip_output, settings.append)?;
        let mut date_sink = LineSink::create(&settings.date_output, settings.append)?;

        tracing::info!(
            input = %settings.input.display(),
            zip_output = %settings.zip_output.display(),
            date_output = %settings.date_output.display(),
            buffer_bytes = self.buffer_bytes,
            "processing contributions"
        );

        let summary = self
            .process(BufReader::new(input), &mut zip_sink, &mut date_sink)
            .map_err(|e| match e {
                // Sinks label their own failures, so a bare I/O error is the input.
                DonorsError::Io(source) => DonorsError::FileRead {
                    path: settings.input.clone(),
                    source,
                },
                other => other,
            })?;

        if let Some(path) = &settings.summary_file {
            summary.write_json(path)?;
            tracing::debug!(path = %path.display(), "run summary written");
        }

        Ok(summary)
    }

    /// Route every line of `input`, streaming zip lines to `zip_sink` and
    /// writing the sorted date lines to `date_sink` at the end.
    pub fn process<R, Z, D>(
        &self,
        input: R,
        zip_sink: &mut LineSink<Z>,
        date_sink: &mut LineSink<D>,
    ) -> Result<RunSummary>
    where
        R: BufRead,
        Z: Write,
        D: Write,
    {
        let started = Instant::now();
        let mut summary = RunSummary {
            truncated_policy: self.on_truncated,
            ..Default::default()
        };
        let mut store = AggregateStore::new();
        let mut reader = ChunkedLineReader::new(input, self.buffer_bytes);

        let mut router = RecordRouter::new(&mut store);
        let mut line_no: u64 = 0;
        while let Some(chunk) = reader.next_chunk()? {
            for line in &chunk {
                line_no += 1;
                match router.route_line(line) {
                    Ok(Routed::Dropped) => summary.records_dropped += 1,
                    Ok(Routed::Accepted {
                        date_updated,
                        zip_line,
                    }) => {
                        if date_updated {
                            summary.date_updates += 1;
                        }
                        if let Some(zip_line) = zip_line {
                            zip_sink.write_line(&zip_line.to_string())?;
                            summary.zip_lines_written += 1;
                        }
                    }
                    Err(DonorsError::TruncatedRecord { found, expected }) => {
                        self.handle_truncated(line_no, found, expected)?;
                        summary.lines_truncated += 1;
                    }
                    Err(other) => return Err(other),
                }
            }
            zip_sink.flush()?;
        }

        for date_line in store.dump_date()? {
            date_sink.write_line(&date_line.to_string())?;
            summary.date_lines_written += 1;
        }
        date_sink.flush()?;

        summary.lines_read = reader.lines_read();
        summary.chunks_read = reader.chunks_read();
        summary.zip_keys = store.zip_len();
        summary.date_keys = store.date_len();
        summary.elapsed_seconds = started.elapsed().as_secs_f64();

        tracing::info!(
            lines = summary.lines_read,
            dropped = summary.records_dropped,
            truncated = summary.lines_truncated,
            zip_lines = summary.zip_lines_written,
            date_lines = summary.date_lines_written,
            elapsed_s = summary.elapsed_seconds,
            "run complete"
        );

        Ok(summary)
    }

    fn handle_truncated(&self, line_no: u64, found: usize, expected: usize) -> Result<()> {
        match self.on_truncated {
            TruncatedPolicy::Skip => {
                tracing::warn!(line = line_no, found, expected, "skipping truncated record");
                Ok(())
            }
            TruncatedPolicy::Fail => {
                tracing::error!(line = line_no, found, expected, "truncated record");
                Err(DonorsError::TruncatedRecord { found, expected })
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
