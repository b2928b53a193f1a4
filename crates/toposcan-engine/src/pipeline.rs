//! Reading input into batches and driving a job to completion.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use toposcan_config::PipelineConfig;
use toposcan_store::{read_records, InputFormat, ReadSummary};
use tracing::{info, warn};

use crate::error::{EngineError, Result};
use crate::jobs::RecordJob;
use crate::pool::{Batch, PoolOptions, WorkerPool};
use crate::stats::RunSnapshot;

/// What a finished run reports.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub job: &'static str,
    pub read: ReadSummary,
    pub stats: RunSnapshot,
    pub out_dir: PathBuf,
}

/// One run of one job over one input path.
pub struct Pipeline {
    config: PipelineConfig,
    job: Arc<dyn RecordJob>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, job: Arc<dyn RecordJob>) -> Self {
        Self { config, job }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Streams `input` through the pool and waits for every batch.
    ///
    /// `out_dir` is created first. Output already buffered is flushed even
    /// when reading fails.
    ///
    /// # Errors
    ///
    /// The output directory cannot be created, or an explicit database
    /// input cannot be loaded.
    pub fn run(&self, input: &Path, format: InputFormat, out_dir: &Path) -> Result<RunSummary> {
        fs::create_dir_all(out_dir).map_err(|e| EngineError::output(out_dir, e))?;

        let threads = self.config.threads.resolve();
        let options = PoolOptions::default()
            .with_threads(threads)
            .with_flush_threshold(self.config.flush_threshold_bytes);
        let pool = WorkerPool::new(Arc::clone(&self.job), options);

        info!(
            event = "run_started",
            job = self.job.name(),
            input = %input.display(),
            format = %format,
            out_dir = %out_dir.display(),
            threads,
            batch_size = self.config.batch_size,
        );

        let batch_size = self.config.batch_size.max(1);
        let interval = self.config.progress_interval.max(1);
        let mut batch: Batch = Vec::with_capacity(batch_size);
        let mut submitted: u64 = 0;
        let mut next_report = interval;
        let mut closed = false;

        let read = read_records(input, format, |record| {
            if closed {
                return;
            }
            batch.push(record);
            if batch.len() < batch_size {
                return;
            }
            let full = std::mem::replace(&mut batch, Vec::with_capacity(batch_size));
            submitted += full.len() as u64;
            if pool.submit(full).is_err() {
                warn!(event = "pool_closed", submitted);
                closed = true;
                return;
            }
            if submitted >= next_report {
                info!(
                    event = "progress",
                    read = submitted,
                    processed = pool.stats().current_processed(),
                );
                next_report = (submitted / interval + 1) * interval;
            }
        })?;

        if !closed {
            pool.submit(batch)?;
        }
        let stats = pool.shutdown();

        info!(
            event = "run_finished",
            job = self.job.name(),
            inputs = stats.inputs,
            processed = stats.processed,
            derived = stats.derived,
            duplicates = stats.duplicates,
            failures = stats.failures,
            saved_scft = stats.saved_scft,
            saved_lst = stats.saved_lst,
            elapsed_ms = stats.elapsed.as_millis() as u64,
        );

        Ok(RunSummary {
            job: self.job.name(),
            read,
            stats,
            out_dir: out_dir.to_path_buf(),
        })
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
