//! Result capture — snapshot the file-set at a fixed pipeline position.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use docsync_core::{FileSet, Guarantee, RunContext, Stage, StageError};

/// Shared slot the capture stage stores its snapshot in; the pipeline takes
/// the snapshot out after a successful run. Runs are serialized, so one slot
/// serves a pipeline across any number of watch rebuilds.
#[derive(Debug, Clone, Default)]
pub struct CaptureSlot(Arc<Mutex<Option<FileSet>>>);

impl CaptureSlot {
    pub fn store(&self, files: FileSet) {
        *self.lock() = Some(files);
    }

    pub fn take(&self) -> Option<FileSet> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<FileSet>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Zero-effect stage that clones the current file-set into its slot, placed
/// after renaming and before metadata serialization so the caller observes
/// final keys and enriched metadata without serialized front-matter.
pub struct CaptureStage {
    slot: CaptureSlot,
}

impl CaptureStage {
    pub fn new(slot: CaptureSlot) -> Self {
        CaptureStage { slot }
    }
}

impl Stage for CaptureStage {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::Renamed]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::Captured]
    }

    fn run(&self, files: &mut FileSet, _ctx: &RunContext) -> Result<(), StageError> {
        self.slot.store(files.clone());
        Ok(())
    }
}
