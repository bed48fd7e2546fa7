//! One pipeline execution as an awaitable, single-resolution unit.

use std::sync::Arc;

use docsync_core::{FileSet, RunContext};

use crate::error::PipelineError;
use crate::pipeline::Pipeline;

/// One execution of a [`Pipeline`], running on the blocking pool.
///
/// Stages return explicit `Result`s and [`BuildRun::join`] consumes the run,
/// so a build resolves exactly once by construction — there is no completion
/// signal to fire twice.
pub struct BuildRun {
    handle: tokio::task::JoinHandle<Result<FileSet, PipelineError>>,
}

impl BuildRun {
    /// Start one run. The pipeline and context are shared, the file-set is
    /// fresh for every run.
    pub fn spawn(pipeline: Arc<Pipeline>, ctx: Arc<RunContext>) -> Self {
        let handle = tokio::task::spawn_blocking(move || pipeline.run(&ctx));
        BuildRun { handle }
    }

    /// Resolve with the captured file-set or the first stage error.
    pub async fn join(self) -> Result<FileSet, PipelineError> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(PipelineError::Runtime(format!(
                "build task join failure: {err}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble;
    use docsync_core::SyncOptions;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test(flavor = "multi_thread")]
    async fn spawned_run_resolves_with_the_captured_set() {
        let source = TempDir::new().expect("source");
        let dest = TempDir::new().expect("dest");
        fs::create_dir_all(source.path().join("foo")).expect("dirs");
        fs::write(
            source.path().join("foo/README.md"),
            "---\npath: intro\n---\n\n# Intro\n",
        )
        .expect("write");
        fs::write(
            source.path().join("foo/package.json"),
            r#"{"name": "foo", "version": "1.0.0"}"#,
        )
        .expect("write");

        let options = SyncOptions::new(source.path(), dest.path());
        let pipeline = Arc::new(assemble::pipeline(&options).expect("pipeline"));
        let ctx = Arc::new(RunContext::from_options(&options));

        let files = BuildRun::spawn(pipeline, ctx).join().await.expect("build");
        assert!(files.contains("intro.md"));
    }
}
