use lazy_static::lazy_static;
use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};
use tracing::debug;

lazy_static! {
    static ref GLOBAL_LOADING_HANDLE: Arc<LoadingHandle> = Arc::new(LoadingHandle::new());
}

/// A busy indicator shown while requests are in flight.
///
/// `close` must be idempotent: concurrent failing requests may all close the
/// same indicator.
pub trait LoadingIndicator: Debug + Send + Sync {
    fn open(&self);
    fn close(&self);
    fn is_open(&self) -> bool;
}

#[derive(Debug, Default)]
pub struct LoadingHandle {
    open: AtomicBool,
    close_calls: AtomicUsize,
}

impl LoadingHandle {
    pub fn new() -> Self {
        Self {
            open: AtomicBool::new(false),
            close_calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `close` has been invoked, whether or not it was open.
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

impl LoadingIndicator for LoadingHandle {
    fn open(&self) {
        if !self.open.swap(true, Ordering::SeqCst) {
            debug!("loading indicator opened");
        }
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        if self.open.swap(false, Ordering::SeqCst) {
            debug!("loading indicator closed");
        }
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

/// The process-wide loading indicator.
pub fn global() -> Arc<LoadingHandle> {
    GLOBAL_LOADING_HANDLE.clone()
}
