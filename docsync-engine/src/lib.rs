//! # docsync-engine
//!
//! Pipeline orchestration: ordered stage execution over one shared
//! [`docsync_core::FileSet`], result capture, and the single-resolution
//! [`BuildRun`] wrapper.
//!
//! Call [`assemble::build`] for a one-shot synchronous run — the canonical
//! entrypoint for both the CLI and the watch runtime — or spawn a
//! [`BuildRun`] from async code.

pub mod assemble;
pub mod build;
pub mod capture;
pub mod error;
pub mod pipeline;

pub use build::BuildRun;
pub use capture::{CaptureSlot, CaptureStage};
pub use error::{PipelineError, SyncError};
pub use pipeline::Pipeline;
