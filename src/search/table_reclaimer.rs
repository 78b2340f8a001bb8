//! Transposition-table lifecycle: size ceiling, material-drop reset and
//! background release of retired tables.
//!
//! Dropping a large table is slow, so a retired table is handed to a
//! dedicated worker thread over a channel and freed there. Only one release
//! is in flight at a time: retiring a table first waits for the previous
//! release to be acknowledged.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::errors::{EngineError, EngineResult};
use crate::game_state::checkers_types::Position;
use crate::search::transposition_table::TranspositionTable;

/// Size policy for the live table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLimits {
    /// Estimated footprint above which the table is replaced.
    pub ceiling_bytes: usize,
    /// Capacity reserved for each fresh table.
    pub presize_entries: usize,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            ceiling_bytes: 512 * 1024 * 1024,
            presize_entries: 1 << 16,
        }
    }
}

impl TableLimits {
    pub fn with_ceiling_mb(mut self, megabytes: usize) -> Self {
        self.ceiling_bytes = megabytes.max(1) * 1024 * 1024;
        self
    }
}

/// Acknowledgement sent back once a retired table has been freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReclaimReport {
    pub entries: usize,
}

struct ReclaimWorker {
    tables: Option<Sender<TranspositionTable>>,
    done: Receiver<ReclaimReport>,
    handle: Option<JoinHandle<()>>,
}

/// Owner of the background release thread.
#[derive(Default)]
pub struct TableReclaimer {
    worker: Option<ReclaimWorker>,
    in_flight: bool,
    reclaimed_entries: u64,
}

impl TableReclaimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries freed by completed releases so far.
    pub fn reclaimed_entries(&self) -> u64 {
        self.reclaimed_entries
    }

    /// Blocks until the release in flight (if any) has completed.
    pub fn wait_idle(&mut self) -> EngineResult<Option<ReclaimReport>> {
        if !self.in_flight {
            return Ok(None);
        }
        let Some(worker) = self.worker.as_ref() else {
            self.in_flight = false;
            return Ok(None);
        };
        let report = worker
            .done
            .recv()
            .map_err(|e| EngineError::Reclaimer(e.to_string()))?;
        self.in_flight = false;
        self.reclaimed_entries += report.entries as u64;
        Ok(Some(report))
    }

    /// Hands `table` to the worker, after the previous release finished.
    pub fn retire(&mut self, table: TranspositionTable) -> EngineResult<()> {
        self.wait_idle()?;
        if self.worker.is_none() {
            self.worker = Some(Self::spawn_worker()?);
        }
        let sender = self
            .worker
            .as_ref()
            .and_then(|w| w.tables.as_ref())
            .ok_or_else(|| EngineError::Reclaimer("worker channel closed".to_string()))?;
        sender
            .send(table)
            .map_err(|e| EngineError::Reclaimer(e.to_string()))?;
        self.in_flight = true;
        Ok(())
    }

    fn spawn_worker() -> EngineResult<ReclaimWorker> {
        let (table_tx, table_rx) = bounded::<TranspositionTable>(1);
        let (done_tx, done_rx) = bounded::<ReclaimReport>(1);
        let handle = thread::Builder::new()
            .name("tt-reclaimer".to_string())
            .spawn(move || {
                for table in table_rx {
                    let entries = table.len();
                    drop(table);
                    if done_tx.send(ReclaimReport { entries }).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| EngineError::Reclaimer(e.to_string()))?;
        debug!("spawned table reclaimer thread");
        Ok(ReclaimWorker {
            tables: Some(table_tx),
            done: done_rx,
            handle: Some(handle),
        })
    }
}

impl Drop for TableReclaimer {
    fn drop(&mut self) {
        if let Err(e) = self.wait_idle() {
            warn!("table release did not complete: {e}");
        }
        if let Some(mut worker) = self.worker.take() {
            worker.tables.take();
            if let Some(handle) = worker.handle.take() {
                if handle.join().is_err() {
                    warn!("table reclaimer thread panicked");
                }
            }
        }
    }
}

/// The live table together with its replacement policy.
pub struct ManagedTable {
    live: TranspositionTable,
    limits: TableLimits,
    reclaimer: TableReclaimer,
    last_piece_total: Option<usize>,
}

impl ManagedTable {
    pub fn new(limits: TableLimits) -> Self {
        Self {
            live: TranspositionTable::with_capacity(limits.presize_entries),
            limits,
            reclaimer: TableReclaimer::new(),
            last_piece_total: None,
        }
    }

    #[inline]
    pub fn live(&self) -> &TranspositionTable {
        &self.live
    }

    #[inline]
    pub fn live_mut(&mut self) -> &mut TranspositionTable {
        &mut self.live
    }

    pub fn limits(&self) -> TableLimits {
        self.limits
    }

    pub fn set_limits(&mut self, limits: TableLimits) {
        self.limits = limits;
    }

    pub fn reclaimer(&self) -> &TableReclaimer {
        &self.reclaimer
    }

    /// Called before each search. A capture since the previous search makes
    /// every stored position unreachable, so the table is replaced; it is
    /// also replaced when it has outgrown the ceiling.
    pub fn prepare(&mut self, position: &Position) -> bool {
        let pieces = position.total_pieces();
        let material_dropped = self.last_piece_total.is_some_and(|prev| pieces < prev);
        self.last_piece_total = Some(pieces);

        let footprint = self.live.estimated_bytes();
        let oversized = footprint > self.limits.ceiling_bytes;
        if !(material_dropped || oversized) || self.live.is_empty() {
            return false;
        }

        info!(
            entries = self.live.len(),
            footprint, material_dropped, oversized, "replacing transposition table"
        );
        self.replace_live();
        true
    }

    /// Drops every stored entry, e.g. at the start of a new game.
    pub fn reset(&mut self) {
        self.last_piece_total = None;
        if !self.live.is_empty() {
            self.replace_live();
        }
    }

    fn replace_live(&mut self) {
        let fresh = TranspositionTable::with_capacity(self.limits.presize_entries);
        let retired = std::mem::replace(&mut self.live, fresh);
        if let Err(e) = self.reclaimer.retire(retired) {
            warn!("falling back to inline table release: {e}");
        }
    }
}

impl Default for ManagedTable {
    fn default() -> Self {
        Self::new(TableLimits::default())
    }
}
