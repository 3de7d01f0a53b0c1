//! Bounded pool for per-file blocking work.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::NamespaceError;

/// Runs `work` on every item with at most `jobs` items in flight.
///
/// Work runs on tokio's blocking pool since it is whole-file I/O. Results
/// come back in input order. The first error is returned as soon as it is
/// seen; tasks not yet started are dropped with the pool.
///
/// # Errors
///
/// Returns the first error produced by `work`, or [`NamespaceError::Worker`]
/// if a task panicked.
pub async fn run_bounded<T, R, F>(
    items: Vec<T>,
    jobs: usize,
    work: F,
) -> Result<Vec<R>, NamespaceError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Result<R, NamespaceError> + Send + Sync + 'static,
{
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let work = Arc::new(work);
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(items.len()).collect();
    let mut tasks = JoinSet::new();

    for (index, item) in items.into_iter().enumerate() {
        // Drain finished tasks while waiting so errors surface early.
        let permit = loop {
            tokio::select! {
                permit = Arc::clone(&semaphore).acquire_owned() => {
                    break permit.map_err(|e| NamespaceError::Worker { message: e.to_string() })?;
                }
                Some(joined) = tasks.join_next() => store(&mut slots, joined)?,
            }
        };
        let work = Arc::clone(&work);
        tasks.spawn_blocking(move || {
            let _permit = permit;
            (index, work(item))
        });
    }

    while let Some(joined) = tasks.join_next().await {
        store(&mut slots, joined)?;
    }

    Ok(slots.into_iter().flatten().collect())
}

fn store<R>(
    slots: &mut [Option<R>],
    joined: Result<(usize, Result<R, NamespaceError>), tokio::task::JoinError>,
) -> Result<(), NamespaceError> {
    let (index, result) = joined.map_err(|e| NamespaceError::Worker { message: e.to_string() })?;
    slots[index] = Some(result?);
    Ok(())
}
