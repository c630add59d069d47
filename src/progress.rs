use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

/// the six fixed milestones the pipeline reports progress at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsing,
    GraphBuilt,
    ComponentsAnalyzed,
    Eulerized,
    TraversalComplete,
    Emitted,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub percent: u8,
    pub message: String,
    pub stats: Option<Value>,
}

/// a synchronous progress sink, invoked from the pipeline's own thread at
/// each stage boundary. no queueing or cross-thread delivery is attempted
/// here; a caller that needs to ship progress elsewhere is responsible for
/// that.
pub type ProgressSink<'a> = &'a mut dyn FnMut(ProgressEvent);

pub fn emit(sink: &mut Option<ProgressSink>, stage: Stage, percent: u8, message: impl Into<String>, stats: Option<Value>) {
    if let Some(cb) = sink.as_mut() {
        cb(ProgressEvent {
            stage,
            percent,
            message: message.into(),
            stats,
        });
    }
}

/// cooperative cancellation flag checked between pipeline stages and inside
/// the eulerization and traversal loops.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
