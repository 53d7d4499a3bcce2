//! Snapshot access to an index that is periodically rebuilt.
//!
//! Readers take an `Arc<NetexIndex>` and keep using it for as long as they
//! like. A reload parses into a fresh index and swaps it in only once every
//! document has loaded, so readers never see half of a batch.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use crate::error::Result;
use crate::index::NetexIndex;
use crate::loader::parse_paths;
use crate::parser::ParseSummary;

/// Number of indexes swapped in so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Handle to a reload running on a background thread.
pub struct ReloadHandle {
    started: Instant,
    join: Option<JoinHandle<Result<Generation>>>,
}
impl ReloadHandle {
    /// Wait for the reload to finish.
    pub fn join(mut self) -> Option<Result<Generation>> {
        self.join.take().and_then(|j| j.join().ok())
    }
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(|j| j.is_finished())
    }
}

pub struct SharedIndex {
    current: RwLock<Arc<NetexIndex>>,
    generation: Mutex<u64>,
    inputs: Vec<PathBuf>,
    default_time_zone: Option<String>,
}
impl SharedIndex {
    pub fn new(inputs: Vec<PathBuf>, default_time_zone: Option<String>) -> Self {
        Self {
            current: RwLock::new(Arc::new(NetexIndex::new())),
            generation: Mutex::new(0),
            inputs,
            default_time_zone,
        }
    }
    pub fn current(&self) -> Arc<NetexIndex> {
        Arc::clone(&*self.current.read())
    }
    pub fn generation(&self) -> Generation {
        Generation(*self.generation.lock())
    }
    /// Replaces the current index.
    pub fn swap(&self, index: NetexIndex) -> Generation {
        if index.time_zone().is_none()
            && let Some(time_zone) = &self.default_time_zone
        {
            index.set_time_zone(time_zone.as_str());
        }
        let mut generation = self.generation.lock();
        *self.current.write() = Arc::new(index);
        *generation += 1;
        Generation(*generation)
    }
    /// Parses all inputs into a fresh index and swaps it in. On failure the
    /// current index stays in place.
    pub fn reload(&self) -> Result<(Generation, ParseSummary)> {
        let started = Instant::now();
        let (index, summary) = parse_paths(&self.inputs)?;
        let generation = self.swap(index);
        info!(
            generation = generation.0,
            ms = started.elapsed().as_secs_f64() * 1000.0,
            "index reloaded"
        );
        Ok((generation, summary))
    }
    /// Runs [`SharedIndex::reload`] on a background thread.
    pub fn spawn_reload(self: &Arc<Self>) -> ReloadHandle {
        let shared = Arc::clone(self);
        let join = std::thread::spawn(move || {
            shared.reload().map(|(generation, _)| generation).inspect_err(|e| {
                warn!(error = %e, "reload failed, keeping the current index");
            })
        });
        ReloadHandle {
            started: Instant::now(),
            join: Some(join),
        }
    }
}
