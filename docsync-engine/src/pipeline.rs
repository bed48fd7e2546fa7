//! The execution engine: one ordered list of stages over one file-set.

use docsync_core::{FileSet, Guarantee, RunContext, Stage};

use crate::capture::CaptureSlot;
use crate::error::PipelineError;

/// An ordered, validated list of stages plus the capture slot the run's
/// result is read from.
///
/// Stages execute strictly in sequence: stage N only begins after stage N−1
/// returned `Ok`. The engine holds the only reference to the file-set, so a
/// stage never observes another stage's in-flight state.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    capture: CaptureSlot,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("capture", &self.capture)
            .finish()
    }
}

impl Pipeline {
    /// Validate the declared stage dependencies and construct the pipeline.
    ///
    /// Every `requires()` of a stage must be provided by some earlier stage;
    /// a violation is a construction error, not a runtime surprise.
    pub fn new(stages: Vec<Box<dyn Stage>>, capture: CaptureSlot) -> Result<Self, PipelineError> {
        let mut provided: Vec<Guarantee> = Vec::new();
        for (index, stage) in stages.iter().enumerate() {
            for required in stage.requires() {
                if !provided.contains(required) {
                    return Err(PipelineError::OrderViolation {
                        stage: stage.name(),
                        index,
                        missing: *required,
                    });
                }
            }
            provided.extend_from_slice(stage.provides());
        }
        Ok(Pipeline { stages, capture })
    }

    /// Run every stage in order against a fresh file-set.
    ///
    /// On the first stage failure the run aborts: no later stage is invoked
    /// and the error carries the failing stage's identity. On success the
    /// captured snapshot is returned.
    pub fn run(&self, ctx: &RunContext) -> Result<FileSet, PipelineError> {
        let mut files = FileSet::new();
        for (index, stage) in self.stages.iter().enumerate() {
            tracing::debug!("stage {} '{}': {} records in", index, stage.name(), files.len());
            stage
                .run(&mut files, ctx)
                .map_err(|source| PipelineError::Stage {
                    stage: stage.name(),
                    index,
                    source,
                })?;
        }
        self.capture.take().ok_or(PipelineError::SnapshotMissing)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
