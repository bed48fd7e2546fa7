//! The fixed stage order, bound to one configuration.
//!
//! This is the canonical sync entrypoint for both `docsync sync` and the
//! watch runtime: [`build`] validates the configuration, assembles the
//! pipeline, and runs it once.

use docsync_core::{FileSet, RunContext, SharedPackages, Stage, SyncOptions};
use docsync_stages::{
    AddPackageMeta, AnnotateSource, ExtractDocComments, ExtractPackages, FilterByMeta,
    PackageIndex, ParseFrontMatter, RenameByPath, SelectFiles, SyncIgnoreFile, WriteFiles,
    WriteFrontMatter,
};

use crate::capture::{CaptureSlot, CaptureStage};
use crate::error::SyncError;
use crate::pipeline::Pipeline;

/// Assemble the fixed stage order for `options`.
///
/// The order reflects real data dependencies; [`Pipeline::new`] re-checks
/// them against each stage's declared guarantees, so an editing mistake here
/// fails construction rather than corrupting a run.
pub fn pipeline(options: &SyncOptions) -> Result<Pipeline, SyncError> {
    options.validate()?;

    let capture = CaptureSlot::default();
    let packages = SharedPackages::default();
    let meta_log = options.meta_log();

    let mut stages: Vec<Box<dyn Stage>> = vec![
        Box::new(SelectFiles::new(
            options.patterns.clone(),
            options.ignore.clone(),
        )),
        Box::new(ExtractPackages::new(packages.clone())),
        Box::new(ExtractDocComments::new(options.log.clone())),
        Box::new(ParseFrontMatter::new(meta_log.clone())),
        Box::new(FilterByMeta::require_key("path")),
        Box::new(PackageIndex::new(packages.clone(), options.index_path.clone())),
    ];
    if let Some(info) = &options.source_info {
        stages.push(Box::new(AnnotateSource::new(
            info.repo.clone(),
            info.branch.clone(),
        )));
    }
    stages.push(Box::new(AddPackageMeta::new(packages, options.fields.clone())));
    stages.push(Box::new(RenameByPath));
    stages.push(Box::new(CaptureStage::new(capture.clone())));
    stages.push(Box::new(WriteFrontMatter::new(meta_log)));
    stages.push(Box::new(WriteFiles));
    stages.push(Box::new(SyncIgnoreFile::new(options.ignore_file.clone())));

    Ok(Pipeline::new(stages, capture)?)
}

/// Run the pipeline once and return the captured file-set.
pub fn build(options: &SyncOptions) -> Result<FileSet, SyncError> {
    let pipeline = pipeline(options)?;
    let ctx = RunContext::from_options(options);
    Ok(pipeline.run(&ctx)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
