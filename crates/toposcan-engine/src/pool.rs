//! Fixed-size worker pool fed through a bounded batch queue.
//!
//! Workers pull whole batches, run the job on every record, then check
//! whether buffered output has grown past the flush threshold. The stop
//! flag is only looked at between batches. Dropping the pool closes the
//! queue, joins every worker and flushes what is left, so buffered output
//! always reaches disk.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{bounded, Receiver, Sender};
use toposcan_store::InputRecord;
use tracing::{debug, error};

use crate::error::{EngineError, Result};
use crate::jobs::{JobContext, RecordJob};
use crate::output::OutputBuffer;
use crate::stats::{RunSnapshot, RunStatistics};

/// A unit of queued work.
pub type Batch = Vec<InputRecord>;

/// Sizing for a [`WorkerPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub threads: usize,
    /// Batches that may wait in the queue before `submit` blocks.
    pub queue_capacity: usize,
    /// Buffered bytes above which a worker flushes after its batch.
    pub flush_threshold: usize,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            threads: 4,
            queue_capacity: 8,
            flush_threshold: 64 << 20,
        }
    }
}

impl PoolOptions {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self.queue_capacity = self.threads * 2;
        self
    }

    pub fn with_flush_threshold(mut self, bytes: usize) -> Self {
        self.flush_threshold = bytes;
        self
    }
}

struct Shared {
    job: Arc<dyn RecordJob>,
    output: OutputBuffer,
    stats: Arc<RunStatistics>,
    stop: Arc<AtomicBool>,
    flush_threshold: usize,
}

impl Shared {
    fn flush(&self) {
        if let Err(e) = self.output.flush() {
            error!(event = "flush_failed", job = self.job.name(), error = %e);
        }
    }
}

pub struct WorkerPool {
    sender: Option<Sender<Batch>>,
    workers: Vec<JoinHandle<()>>,
    shared: Arc<Shared>,
}

impl WorkerPool {
    /// Starts `options.threads` workers running `job`.
    pub fn new(job: Arc<dyn RecordJob>, options: PoolOptions) -> Self {
        let (sender, receiver) = bounded::<Batch>(options.queue_capacity.max(1));
        let shared = Arc::new(Shared {
            job,
            output: OutputBuffer::new(),
            stats: Arc::new(RunStatistics::new()),
            stop: Arc::new(AtomicBool::new(false)),
            flush_threshold: options.flush_threshold,
        });

        let workers = (0..options.threads.max(1))
            .map(|index| {
                let receiver = receiver.clone();
                let shared = Arc::clone(&shared);
                thread::spawn(move || worker_loop(index, &receiver, &shared))
            })
            .collect();

        debug!(
            event = "pool_started",
            job = shared.job.name(),
            threads = options.threads.max(1),
            queue_capacity = options.queue_capacity.max(1),
        );

        Self {
            sender: Some(sender),
            workers,
            shared,
        }
    }

    /// Queues a batch, blocking while the queue is full.
    ///
    /// # Errors
    ///
    /// [`EngineError::PoolClosed`] once every worker has exited.
    pub fn submit(&self, batch: Batch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let sender = self.sender.as_ref().ok_or(EngineError::PoolClosed)?;
        let count = batch.len() as u64;
        sender.send(batch).map_err(|_| EngineError::PoolClosed)?;
        self.shared.stats.record_inputs(count);
        Ok(())
    }

    /// Asks workers to stop at their next batch boundary.
    ///
    /// Batches still queued are dropped unprocessed.
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.stop.load(Ordering::SeqCst)
    }

    /// Flag that stops the pool when set from elsewhere.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shared.stop)
    }

    pub fn stats(&self) -> &Arc<RunStatistics> {
        &self.shared.stats
    }

    /// Bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.shared.output.size()
    }

    /// Closes the queue, waits for the workers and flushes all output.
    pub fn shutdown(mut self) -> RunSnapshot {
        self.finish();
        self.shared.stats.snapshot()
    }

    fn finish(&mut self) {
        drop(self.sender.take());
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!(event = "worker_panicked", job = self.shared.job.name());
            }
        }
        self.shared.flush();
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if self.sender.is_some() || !self.workers.is_empty() {
            self.finish();
        }
    }
}

fn worker_loop(index: usize, receiver: &Receiver<Batch>, shared: &Shared) {
    let ctx = JobContext {
        output: &shared.output,
        stats: &shared.stats,
    };
    for batch in receiver.iter() {
        if shared.stop.load(Ordering::SeqCst) {
            debug!(event = "worker_stopped", worker = index);
            break;
        }
        for record in &batch {
            shared.job.process(record, ctx);
        }
        shared.stats.record_processed(batch.len() as u64);
        if shared.output.size() > shared.flush_threshold {
            debug!(
                event = "threshold_flush",
                worker = index,
                bytes = shared.output.size(),
            );
            shared.flush();
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
