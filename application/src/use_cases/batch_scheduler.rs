//! Batch scheduler
//!
//! Splits an ordered list into consecutive batches. Batches run one after
//! another; everything inside a batch runs concurrently on a [`JoinSet`].
//! Each task is tagged with its input index and writes to its own slot, so
//! output order always equals input order.

use crate::ports::progress::ProgressNotifier;
use std::future::Future;
use std::ops::Range;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum BatchError<E> {
    /// A task returned an error; the remaining work was cancelled
    #[error("Item {index} failed: {error}")]
    Failed { index: usize, error: E },

    #[error("Task join error: {0}")]
    Join(String),
}

/// Consecutive index ranges of at most `batch_size` items
pub fn plan_batches(len: usize, batch_size: usize) -> Vec<Range<usize>> {
    let size = batch_size.max(1);
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct BatchScheduler {
    batch_size: usize,
}

impl BatchScheduler {
    /// `batch_size` of zero is treated as one
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Run `task` over every item, returning results in input order.
    ///
    /// The first failure aborts the in-flight batch and no later batch is
    /// started.
    pub async fn run<T, R, E, F, Fut>(
        &self,
        items: Vec<T>,
        progress: &dyn ProgressNotifier,
        task: F,
    ) -> Result<Vec<R>, BatchError<E>>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
    {
        let batches = plan_batches(items.len(), self.batch_size);
        let total_batches = batches.len();
        let mut slots: Vec<Option<R>> = (0..items.len()).map(|_| None).collect();
        let mut items = items.into_iter();

        for (batch_index, range) in batches.into_iter().enumerate() {
            let batch_number = batch_index + 1;
            info!(
                "Batch {}/{}: dispatching {} item(s)",
                batch_number,
                total_batches,
                range.len()
            );
            progress.on_batch_start(batch_number, total_batches, range.len());

            let mut join_set = JoinSet::new();
            for (index, item) in range.clone().zip(items.by_ref()) {
                let fut = task(item);
                join_set.spawn(async move { (index, fut.await) });
            }

            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((index, Ok(result))) => {
                        debug!("Item {} complete", index);
                        progress.on_record_complete(index, true);
                        slots[index] = Some(result);
                    }
                    Ok((index, Err(error))) => {
                        warn!("Item {} failed, aborting remaining work", index);
                        progress.on_record_complete(index, false);
                        join_set.abort_all();
                        return Err(BatchError::Failed { index, error });
                    }
                    Err(e) => {
                        join_set.abort_all();
                        return Err(BatchError::Join(e.to_string()));
                    }
                }
            }

            progress.on_batch_complete(batch_number);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or_else(|| BatchError::Join(format!("item {} produced no result", index))))
            .collect()
    }
}
