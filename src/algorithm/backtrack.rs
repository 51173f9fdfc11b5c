//! Chronological backtracking over the step history
//!
//! Recovery pops history entries newest-first. Propagation entries restore
//! the options they shrank; placement entries restore the options minus the
//! committed id and credit any inventory they charged. The rewind stops at
//! the first collapse whose residual option set is non-empty, leaving the
//! solver free to try a different draw there.

use crate::algorithm::bitset::TileSet;
use crate::algorithm::model::{Step, Wfc, WfcState};
use crate::catalog::tileset::catalog;
use crate::io::error::SolverFailure;

impl Wfc {
    /// Rewind the history until the solver can continue, or give up
    ///
    /// Each call counts one backtrack against the budget; exceeding the
    /// budget or draining the history moves the solver to failed.
    pub(crate) fn recover(&mut self) {
        if !matches!(self.state, WfcState::Recovering(_)) {
            return;
        }
        self.backtracks += 1;
        if self.backtracks > crate::io::configuration::MAX_BACKTRACKS {
            self.state = WfcState::Failed(SolverFailure::BacktrackFailed);
            return;
        }

        let capacity = catalog().capacity();
        loop {
            let Some(entry) = self.history.pop() else {
                self.state = WfcState::Failed(SolverFailure::BacktrackFailed);
                return;
            };
            if let Some(charged) = entry.charged {
                self.inventory_credit(charged);
            }
            match entry.step {
                Step::Propagate(_, to) => {
                    let restored = TileSet::from_ids(capacity, entry.previous_options);
                    self.tilemap.set_superposition_options(to, restored);
                }
                Step::PlaceSubTile(cell, placement) => {
                    // The committed id is the subtile's own; subtile ids are
                    // zero-weight and never sit in a superposition, so this
                    // restores the options unchanged. Stripping the large
                    // tile's id is the anchoring collapse entry's job.
                    let mut restored = TileSet::from_ids(capacity, entry.previous_options);
                    restored.remove(placement.subtile_id);
                    self.tilemap.set_superposition_options(cell, restored);
                }
                Step::Collapse(cell, id) => {
                    let mut residual = TileSet::from_ids(capacity, entry.previous_options);
                    residual.remove(id);
                    let open_again = !residual.is_empty();
                    self.tilemap.set_superposition_options(cell, residual);
                    if open_again {
                        self.state = WfcState::Solving;
                        return;
                    }
                }
            }
        }
    }
}
