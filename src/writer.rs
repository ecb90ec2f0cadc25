//! Query output for the transport side of a benchmark.

use crate::args::OutputFormat;
use query_gen::Query;
use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

/// Default buffer size for query output.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from a write run.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Number of queries written.
    pub queries_written: u64,
    /// Bytes written, including newlines.
    pub bytes_written: u64,
    /// Time from writer creation to finish.
    pub total_duration: Duration,
}

impl WriteMetrics {
    /// Calculate queries per second.
    pub fn queries_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.queries_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes one query per line, as JSON or bare query text.
pub struct QueryWriter<W: Write> {
    writer: BufWriter<W>,
    format: OutputFormat,
    metrics: WriteMetrics,
    started: Instant,
    line: Vec<u8>,
}

impl<W: Write> QueryWriter<W> {
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, inner),
            format,
            metrics: WriteMetrics::default(),
            started: Instant::now(),
            line: Vec::new(),
        }
    }

    pub fn write(&mut self, query: &Query) -> io::Result<()> {
        self.line.clear();
        match self.format {
            OutputFormat::Jsonl => serde_json::to_writer(&mut self.line, query)?,
            OutputFormat::Text => self.line.extend_from_slice(query.body.as_bytes()),
        }
        self.line.push(b'\n');

        self.writer.write_all(&self.line)?;
        self.metrics.queries_written += 1;
        self.metrics.bytes_written += self.line.len() as u64;
        Ok(())
    }

    /// Flush and return the final metrics.
    pub fn finish(mut self) -> io::Result<WriteMetrics> {
        self.writer.flush()?;
        self.metrics.total_duration = self.started.elapsed();
        Ok(self.metrics)
    }
}
