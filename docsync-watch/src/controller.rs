//! The watch controller: serialized, coalescing rebuilds on source changes.
//!
//! A single task owns the state machine. Change events and run completions
//! both arrive over channels, so the loop never blocks on a build; builds
//! run on the blocking pool via [`BuildRun`] and report back through a
//! completion channel.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use docsync_core::{FileSet, RunContext, WatchOptions};
use docsync_engine::{BuildRun, Pipeline, PipelineError};

use crate::debounce::Debounce;
use crate::error::WatchError;

/// Controller states. A change during `Running` moves to `PendingRerun`;
/// any number of further changes coalesce there into exactly one follow-up
/// run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Running,
    PendingRerun,
}

/// Transition on a relevant change event. The boolean says whether to start
/// a run.
pub(crate) fn on_change(state: WatchState) -> (WatchState, bool) {
    match state {
        WatchState::Idle => (WatchState::Running, true),
        WatchState::Running => (WatchState::PendingRerun, false),
        WatchState::PendingRerun => (WatchState::PendingRerun, false),
    }
}

/// Transition when the in-flight run completes.
pub(crate) fn on_run_complete(state: WatchState) -> (WatchState, bool) {
    match state {
        WatchState::PendingRerun => (WatchState::Running, true),
        WatchState::Running | WatchState::Idle => (WatchState::Idle, false),
    }
}

/// Owns the filesystem subscription and the controller task.
///
/// [`WatchHandle::shutdown`] releases the subscription and lets an in-flight
/// run finish without starting a new one.
#[derive(Debug)]
pub struct WatchHandle {
    shutdown: broadcast::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

impl WatchHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "watch task join failed");
        }
    }
}

/// Subscribe to the source tree and spawn the controller.
pub(crate) fn spawn(
    pipeline: Arc<Pipeline>,
    ctx: Arc<RunContext>,
    options: &WatchOptions,
    ignore: Vec<String>,
) -> Result<WatchHandle, WatchError> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
    let mut watcher: RecommendedWatcher = recommended_watcher(move |event| {
        let _ = event_tx.send(event);
    })?;

    // Canonicalize so event paths (which arrive as real paths, e.g.
    // /private/var/... on macOS) match the `starts_with` checks.
    let source = fs::canonicalize(&ctx.source).unwrap_or_else(|_| ctx.source.clone());
    watcher.watch(&source, RecursiveMode::Recursive)?;

    Ok(spawn_with_events(
        Some(watcher),
        source,
        pipeline,
        ctx,
        options.debounce,
        ignore,
        event_rx,
    ))
}

/// Controller over an arbitrary event stream; the notify plumbing above is
/// one producer, tests are another.
pub(crate) fn spawn_with_events(
    watcher: Option<RecommendedWatcher>,
    source: PathBuf,
    pipeline: Arc<Pipeline>,
    ctx: Arc<RunContext>,
    debounce_window: Duration,
    ignore: Vec<String>,
    event_rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
) -> WatchHandle {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(4);
    let task = tokio::spawn(controller_loop(
        watcher,
        source,
        pipeline,
        ctx,
        debounce_window,
        ignore,
        event_rx,
        shutdown_rx,
    ));
    WatchHandle {
        shutdown: shutdown_tx,
        task,
    }
}

async fn controller_loop(
    watcher: Option<RecommendedWatcher>,
    source: PathBuf,
    pipeline: Arc<Pipeline>,
    ctx: Arc<RunContext>,
    debounce_window: Duration,
    ignore: Vec<String>,
    mut event_rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut debounce = Debounce::new(debounce_window);
    let mut state = WatchState::Idle;
    let (done_tx, mut done_rx) = mpsc::channel::<Result<FileSet, PipelineError>>(1);

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                if state != WatchState::Idle {
                    tracing::info!("letting in-flight rebuild finish before shutdown");
                    if let Some(result) = done_rx.recv().await {
                        log_outcome(&result);
                    }
                }
                break;
            }
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = %err, "watcher event error");
                        continue;
                    }
                };
                if !is_relevant_kind(&event.kind) {
                    continue;
                }
                let now = Instant::now();
                let triggered = event.paths.iter().any(|path| {
                    is_relevant_path(path, &source, &ignore)
                        && debounce.should_process(path, now)
                });
                if triggered {
                    let (next, start) = on_change(state);
                    state = next;
                    if start {
                        start_run(&pipeline, &ctx, &done_tx);
                    }
                }
            }
            result = done_rx.recv() => {
                let Some(result) = result else { break };
                log_outcome(&result);
                let (next, start) = on_run_complete(state);
                state = next;
                if start {
                    start_run(&pipeline, &ctx, &done_tx);
                }
            }
        }
    }

    // Dropping the watcher releases the filesystem subscription.
    drop(watcher);
}

fn start_run(
    pipeline: &Arc<Pipeline>,
    ctx: &Arc<RunContext>,
    done: &mpsc::Sender<Result<FileSet, PipelineError>>,
) {
    let run = BuildRun::spawn(pipeline.clone(), ctx.clone());
    let done = done.clone();
    tokio::spawn(async move {
        let _ = done.send(run.join().await).await;
    });
}

fn log_outcome(result: &Result<FileSet, PipelineError>) {
    match result {
        Ok(files) => {
            tracing::info!(files = files.len(), "watch-triggered rebuild completed");
        }
        Err(err) => {
            tracing::error!(error = %err, "watch-triggered rebuild failed");
        }
    }
}

fn is_relevant_kind(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

fn is_relevant_path(path: &Path, source: &Path, ignore: &[String]) -> bool {
    if !path.starts_with(source) {
        return false;
    }
    let rel = path
        .strip_prefix(source)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned();
    !ignore.iter().any(|needle| rel.contains(needle.as_str()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
