//! Concurrent proving of a problem directory.
//!
//! At most `workers` provers run at once. Results are reported as
//! [`BatchEvent`]s over a channel so a single consumer can own the output
//! sink; no failure of one problem stops the others.

use crate::error::ProverError;
use crate::prover::{ProverClient, ProverRun};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;

/// Progress of a batch run.
#[derive(Debug)]
pub enum BatchEvent {
    Started {
        index: usize,
        total: usize,
        problem: PathBuf,
    },
    Finished {
        index: usize,
        total: usize,
        problem: PathBuf,
        run: ProverRun,
    },
}

/// Problem files under `dir` with the given extension, sorted by path.
pub fn discover_problems(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ProverError> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current).map_err(|e| ProverError::Discover {
            path: current.display().to_string(),
            message: e.to_string(),
        })?;
        for entry in entries {
            let path = entry
                .map_err(|e| ProverError::Discover {
                    path: current.display().to_string(),
                    message: e.to_string(),
                })?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == extension) {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Prove every problem with bounded concurrency. Returns the number of
/// problems that produced a `Finished` event.
pub async fn prove_batch(
    client: Arc<ProverClient>,
    problems: Vec<PathBuf>,
    workers: usize,
    events: mpsc::Sender<BatchEvent>,
) -> usize {
    let total = problems.len();
    let permits = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();

    for (index, problem) in problems.into_iter().enumerate() {
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };
        let client = Arc::clone(&client);
        let events = events.clone();
        tasks.spawn(async move {
            let _permit = permit;
            let _ = events
                .send(BatchEvent::Started {
                    index,
                    total,
                    problem: problem.clone(),
                })
                .await;
            let run = client.prove_file(&problem).await;
            let _ = events
                .send(BatchEvent::Finished {
                    index,
                    total,
                    problem,
                    run,
                })
                .await;
        });
    }
    drop(events);

    let mut finished = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(()) => finished += 1,
            Err(e) => tracing::error!(error = %e, "prover task failed"),
        }
    }
    finished
}
