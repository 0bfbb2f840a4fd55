use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use super::constants::{DISK_FILL_BYTE, DISK_SCRATCH_PREFIX};
use super::{should_abort, BenchmarkResult, Intensity, LoopOutcome, WorkloadDetails, WorkloadKind};
use crate::error::RunnerFailure;
use crate::safety::SafetyHandle;
use crate::traits::WorkloadRunner;

/// Scratch-file disk workload; scores in MB/sec over bytes written and read
#[derive(Debug, Clone)]
pub struct DiskRunner {
    scratch_file: PathBuf,
}

impl DiskRunner {
    /// A runner writing its scratch file into `scratch_dir`
    pub fn new(scratch_dir: impl AsRef<Path>) -> Self {
        let name = format!("{}-{}.tmp", DISK_SCRATCH_PREFIX, std::process::id());
        Self::with_scratch_file(scratch_dir.as_ref().join(name))
    }

    /// A runner using exactly `path` as its scratch file
    pub fn with_scratch_file(path: impl Into<PathBuf>) -> Self {
        Self { scratch_file: path.into() }
    }

    pub fn scratch_file(&self) -> &Path {
        &self.scratch_file
    }

    async fn write_and_read(&self, data: &[u8]) -> Result<(), RunnerFailure> {
        tokio::fs::write(&self.scratch_file, data)
            .await
            .map_err(|e| RunnerFailure::io(format!("writing {}", self.scratch_file.display()), e))?;

        let read_back = tokio::fs::read(&self.scratch_file)
            .await
            .map_err(|e| RunnerFailure::io(format!("reading {}", self.scratch_file.display()), e))?;

        if read_back.len() != data.len() {
            return Err(RunnerFailure::io(
                format!("reading {}", self.scratch_file.display()),
                std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("read {} of {} bytes", read_back.len(), data.len()),
                ),
            ));
        }
        Ok(())
    }
}

impl Default for DiskRunner {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

#[async_trait]
impl WorkloadRunner for DiskRunner {
    fn kind(&self) -> WorkloadKind {
        WorkloadKind::Disk
    }

    async fn run(
        &self,
        duration: Duration,
        intensity: Intensity,
        safety: &SafetyHandle,
    ) -> Result<BenchmarkResult, RunnerFailure> {
        let file_size = intensity.buffer_size();
        let data = vec![DISK_FILL_BYTE; file_size.as_bytes() as usize];

        // Removes the scratch file on completion, abort and error alike
        let _cleanup = scopeguard::guard(self.scratch_file.clone(), |path| {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    debug!(path = %path.display(), error = %e, "could not remove disk scratch file");
                }
            }
        });

        let started = Instant::now();
        let mut writes = 0u64;
        let mut reads = 0u64;
        let mut abort_reason = None;

        loop {
            if let Some(reason) = should_abort(safety) {
                abort_reason = Some(reason);
                break;
            }
            if started.elapsed() >= duration {
                break;
            }
            self.write_and_read(&data).await?;
            writes += 1;
            reads += 1;
        }

        let outcome = LoopOutcome { iterations: writes, elapsed: started.elapsed(), abort_reason };
        let total_mb = (writes + reads) as f64 * file_size.as_mb();
        let score = total_mb * 1000.0 / outcome.elapsed_ms().max(1.0);

        debug!(writes, reads, throughput = score, "disk workload finished");

        Ok(outcome.into_result(
            WorkloadKind::Disk,
            intensity,
            score,
            safety,
            WorkloadDetails::Disk { writes, reads, file_size },
        ))
    }
}
