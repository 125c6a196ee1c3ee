//! Timed invocation of an external prover binary.
//!
//! The wall-clock budget is the prover's own cpu limit plus a strictly
//! positive grace period for process start-up. A run that exceeds it is
//! killed; whatever stdout was captured is still scanned, but the verdict is
//! `Timeout` with no positive premises.

use crate::error::ProverError;
use crate::extract::extract_verdict;
use premsel_kernel::{ProverVerdict, SzsStatus};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;

/// How long to keep draining pipes after killing a timed-out process.
const DRAIN_AFTER_KILL: Duration = Duration::from_millis(500);

pub const DEFAULT_CPU_LIMIT_FLAG: &str = "--cpu-limit={secs}";

/// How to run the prover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverConfig {
    pub binary: PathBuf,
    /// Arguments placed before the cpu-limit flag and the problem path.
    pub args: Vec<String>,
    /// Flag template; `{secs}` is replaced by the cpu limit in whole seconds.
    pub cpu_limit_flag: Option<String>,
    pub cpu_limit: Duration,
    pub grace: Duration,
    /// Exported as `TPTP` so the prover can resolve includes itself.
    pub corpus_root: Option<PathBuf>,
}

impl ProverConfig {
    /// E prover defaults: auto mode with a proof object.
    pub fn eprover(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: vec!["--auto".to_string(), "--proof-object".to_string()],
            cpu_limit_flag: Some(DEFAULT_CPU_LIMIT_FLAG.to_string()),
            cpu_limit: Duration::from_secs(5),
            grace: Duration::from_secs(2),
            corpus_root: None,
        }
    }

    pub fn wall_clock_budget(&self) -> Duration {
        self.cpu_limit + self.grace
    }

    pub fn validate(&self) -> Result<(), ProverError> {
        if self.binary.as_os_str().is_empty() {
            return Err(ProverError::InvalidConfig(
                "prover binary must not be empty".to_string(),
            ));
        }
        if self.grace.is_zero() {
            return Err(ProverError::InvalidConfig(
                "grace must be positive so the wall-clock budget exceeds the cpu limit"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Full argument list for one problem.
    pub fn command_args(&self, problem: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        if let Some(template) = &self.cpu_limit_flag {
            let secs = self.cpu_limit.as_secs() + u64::from(self.cpu_limit.subsec_nanos() > 0);
            args.push(template.replace("{secs}", &secs.to_string()).into());
        }
        args.push(problem.as_os_str().to_os_string());
        args
    }
}

/// One finished (or abandoned) prover invocation.
#[derive(Debug, Clone)]
pub struct ProverRun {
    pub verdict: ProverVerdict,
    pub elapsed: Duration,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

/// Runs problems through the configured prover.
#[derive(Debug, Clone)]
pub struct ProverClient {
    config: ProverConfig,
}

impl ProverClient {
    pub fn new(config: ProverConfig) -> Result<Self, ProverError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    /// Run the prover on a problem file and derive the verdict from stdout.
    pub async fn prove_file(&self, problem: &Path) -> ProverRun {
        let started = Instant::now();
        let mut command = Command::new(&self.config.binary);
        command
            .args(self.config.command_args(problem))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(root) = &self.config.corpus_root {
            command.env("TPTP", root);
        }

        tracing::debug!(
            binary = %self.config.binary.display(),
            problem = %problem.display(),
            budget_ms = self.config.wall_clock_budget().as_millis() as u64,
            "starting prover"
        );

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                let message = format!("failed to run {}: {e}", self.config.binary.display());
                return ProverRun {
                    verdict: ProverVerdict::failed(message, ""),
                    elapsed: started.elapsed(),
                    exit_code: None,
                    timed_out: false,
                };
            }
        };

        let stdout = Arc::new(Mutex::new(Vec::new()));
        let stderr = Arc::new(Mutex::new(Vec::new()));
        let stdout_task = child
            .stdout
            .take()
            .map(|pipe| spawn_drain(pipe, Arc::clone(&stdout)));
        let stderr_task = child
            .stderr
            .take()
            .map(|pipe| spawn_drain(pipe, Arc::clone(&stderr)));

        match tokio::time::timeout(self.config.wall_clock_budget(), child.wait()).await {
            Ok(Ok(status)) => {
                join_drain(stdout_task, None).await;
                join_drain(stderr_task, None).await;
                let stdout = lossy(&stdout);
                let stderr = lossy(&stderr);
                let mut verdict = extract_verdict(&stdout);
                if verdict.status() == &SzsStatus::Unknown && !status.success() {
                    verdict = ProverVerdict::failed(failure_message(status.code(), &stderr), stdout);
                }
                ProverRun {
                    verdict,
                    elapsed: started.elapsed(),
                    exit_code: status.code(),
                    timed_out: false,
                }
            }
            Ok(Err(e)) => {
                join_drain(stdout_task, Some(DRAIN_AFTER_KILL)).await;
                join_drain(stderr_task, Some(DRAIN_AFTER_KILL)).await;
                let message = format!("failed waiting for prover: {e}");
                ProverRun {
                    verdict: ProverVerdict::failed(message, lossy(&stdout)),
                    elapsed: started.elapsed(),
                    exit_code: None,
                    timed_out: false,
                }
            }
            Err(_) => {
                if let Err(e) = child.kill().await {
                    tracing::warn!(problem = %problem.display(), error = %e, "failed to kill prover");
                }
                join_drain(stdout_task, Some(DRAIN_AFTER_KILL)).await;
                join_drain(stderr_task, Some(DRAIN_AFTER_KILL)).await;
                let partial = lossy(&stdout);
                let reported = extract_verdict(&partial);
                tracing::debug!(
                    problem = %problem.display(),
                    reported = %reported.status(),
                    captured_bytes = partial.len(),
                    "prover timed out"
                );
                ProverRun {
                    verdict: ProverVerdict::timed_out(partial),
                    elapsed: started.elapsed(),
                    exit_code: None,
                    timed_out: true,
                }
            }
        }
    }

    /// Write `tptp` to a temporary problem file, run it, and clean up.
    pub async fn prove_text(&self, tptp: &str, label: &str) -> ProverRun {
        let path = temp_problem_path(label);
        if let Err(e) = tokio::fs::write(&path, tptp).await {
            return ProverRun {
                verdict: ProverVerdict::failed(
                    format!("failed to write {}: {e}", path.display()),
                    "",
                ),
                elapsed: Duration::ZERO,
                exit_code: None,
                timed_out: false,
            };
        }
        let run = self.prove_file(&path).await;
        let _ = tokio::fs::remove_file(&path).await;
        run
    }
}

fn spawn_drain<R>(mut pipe: R, sink: Arc<Mutex<Vec<u8>>>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut chunk = [0u8; 8192];
        loop {
            match pipe.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => sink
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend_from_slice(&chunk[..n]),
            }
        }
    })
}

async fn join_drain(task: Option<JoinHandle<()>>, limit: Option<Duration>) {
    let Some(task) = task else {
        return;
    };
    match limit {
        Some(limit) => {
            let _ = tokio::time::timeout(limit, task).await;
        }
        None => {
            let _ = task.await;
        }
    }
}

fn lossy(buffer: &Mutex<Vec<u8>>) -> String {
    let bytes = buffer.lock().unwrap_or_else(PoisonError::into_inner);
    String::from_utf8_lossy(&bytes).into_owned()
}

fn failure_message(code: Option<i32>, stderr: &str) -> String {
    let detail = stderr
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .unwrap_or("no SZS status in output");
    match code {
        Some(code) => format!("prover exited with status {code}: {detail}"),
        None => format!("prover terminated by signal: {detail}"),
    }
}

fn temp_problem_path(label: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let label: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    std::env::temp_dir().join(format!(
        "premsel-{label}-{}-{unique}.p",
        std::process::id()
    ))
}
