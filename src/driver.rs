//! Benchmark driver loop: workers generate, one writer emits.
//!
//! ```text
//! worker 0: dispatch(0), dispatch(W), dispatch(2W) ...  ─┐
//! worker 1: dispatch(1), dispatch(W+1) ...               ├─ mpsc ─> QueryWriter ─> release to pool
//! worker W-1: ...                                       ─┘
//! ```
//!
//! Each worker owns a generator seeded at `seed + worker_id`. With one worker
//! the output is fully deterministic for a given seed.

use crate::config::RunSettings;
use crate::writer::{QueryWriter, WriteMetrics};
use anyhow::Context;
use query_gen::{Query, QueryPool};
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Queries buffered between workers and the writer.
pub const CHANNEL_CAPACITY: usize = 256;

/// Generate `settings.queries` queries and write them to the configured output.
pub async fn run_generate(settings: RunSettings) -> anyhow::Result<WriteMetrics> {
    let output: Box<dyn Write + Send> = match &settings.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    generate_into(settings, output).await
}

/// Generate into any writer.
pub async fn generate_into<W: Write>(
    settings: RunSettings,
    output: W,
) -> anyhow::Result<WriteMetrics> {
    let pool = Arc::new(QueryPool::new());
    let base = settings
        .generator_builder()
        .pool(Arc::clone(&pool))
        .build()
        .context("Failed to build query generator")?;

    info!(
        "Generating {} {} queries ({} kind(s)) with {} worker(s), seed {}",
        settings.queries,
        base.dialect(),
        base.dispatch_table().len(),
        settings.workers,
        settings.seed
    );
    info!(
        "Time range: {} .. {}, scale {}",
        base.full_range().start_string(),
        base.full_range().end_string(),
        base.scale()
    );

    let (tx, mut rx) = mpsc::channel::<Query>(CHANNEL_CAPACITY);
    let workers = settings.workers as u64;
    let total = settings.queries;

    let mut handles = Vec::with_capacity(settings.workers);
    for worker_id in 0..workers {
        let mut generator = base.for_worker(worker_id);
        let tx = tx.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let mut generated = 0u64;
            let mut index = worker_id;
            while index < total {
                let query = generator.dispatch(index as usize);
                if tx.blocking_send(query).is_err() {
                    // Writer is gone; it reports its own error.
                    break;
                }
                generated += 1;
                index += workers;
            }
            debug!("Worker {} generated {} queries", worker_id, generated);
            generated
        }));
    }
    drop(tx);

    let mut writer = QueryWriter::new(output, settings.format);
    while let Some(query) = rx.recv().await {
        writer.write(&query).context("Failed to write query")?;
        pool.release(query);
    }

    let mut generated = 0u64;
    for handle in handles {
        generated += handle.await.context("Generator worker panicked")?;
    }

    let metrics = writer.finish().context("Failed to flush query output")?;
    info!(
        "Wrote {} of {} generated queries ({} bytes) in {:?} ({:.0} queries/s)",
        metrics.queries_written,
        generated,
        metrics.bytes_written,
        metrics.total_duration,
        metrics.queries_per_second()
    );
    debug!(
        "Query pool: {} allocated, {} reused",
        pool.allocated(),
        pool.reused()
    );

    Ok(metrics)
}
