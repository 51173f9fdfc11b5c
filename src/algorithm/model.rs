//! The wave function collapse model
//!
//! The solver owns a working copy of the tilemap and drives it through a
//! queue of step values: collapses, subtile placements, and constraint
//! propagations. Propagation steps are processed first-in first-out; the
//! step history is a stack so backtracking is a pure rewind. All random
//! draws go through one seeded selector, making a solve reproducible.

use std::collections::{HashMap, VecDeque};

use crate::algorithm::bitset::TileSet;
use crate::algorithm::selection::RandomSelector;
use crate::catalog::tile::{TileConfig, TileId};
use crate::catalog::tileset::catalog;
use crate::io::error::SolverFailure;
use crate::spatial::cell::{Cell, OrthogonalDirection};
use crate::tilemap::lifecycle::Action;
use crate::tilemap::map::Tilemap;
use crate::tilemap::tile::Tile;

/// Solver status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WfcState {
    /// Steps remain or candidates can still be drawn
    Solving,
    /// Nothing left to do
    Done,
    /// A step failed; the next step call rewinds the history
    Recovering(SolverFailure),
    /// The solver gave up and refuses further steps
    Failed(SolverFailure),
}

/// When the step loop considers itself finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEndCondition {
    /// Stop as soon as the queue drains; used by edit-driven runs
    StopAtEmptySteps,
    /// Keep drawing collapse candidates until every cell is fixed
    StopAtSolved,
}

/// Subtile placement details carried by a subgrid step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubTilePlacement {
    /// Id of the multi-cell tile being placed
    pub parent_id: TileId,
    /// Id of the subtile for this cell
    pub subtile_id: TileId,
    /// Row-major index of this cell in the parent's subgrid
    pub sub_index: usize,
}

/// One unit of solver work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Commit a cell to a tile
    Collapse(Cell, TileId),
    /// Place one subcell of a multi-cell tile
    PlaceSubTile(Cell, SubTilePlacement),
    /// Narrow the second cell's options against the first cell's tile
    Propagate(Cell, Cell),
}

impl Step {
    /// The cell this step writes to
    pub const fn target_cell(&self) -> Cell {
        match *self {
            Self::Collapse(cell, _) | Self::PlaceSubTile(cell, _) => cell,
            Self::Propagate(_, to) => to,
        }
    }
}

/// A processed step with enough context to undo it
#[derive(Debug, Clone)]
pub(crate) struct HistoryEntry {
    pub step: Step,
    pub previous_options: Vec<TileId>,
    /// Inventory charge taken by this entry, credited back on rewind
    pub charged: Option<TileId>,
}

/// Wave function collapse solver over a tilemap snapshot
#[derive(Debug)]
pub struct Wfc {
    pub(crate) tilemap: Tilemap,
    pub(crate) selector: RandomSelector,
    pub(crate) state: WfcState,
    pub(crate) open_steps: VecDeque<Step>,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) inventory: HashMap<TileId, usize>,
    pub(crate) backtracks: usize,
    pub(crate) pending_actions: Vec<Action>,
    pub(crate) current_cell: Option<Cell>,
    pub(crate) target_cell: Option<Cell>,
}

impl Wfc {
    /// Construct a solver over the given tilemap snapshot
    pub fn from_tilemap(tilemap: Tilemap, seed: u64) -> Self {
        Self {
            tilemap,
            selector: RandomSelector::new(seed),
            state: WfcState::Solving,
            open_steps: VecDeque::new(),
            history: Vec::new(),
            inventory: HashMap::new(),
            backtracks: 0,
            pending_actions: Vec::new(),
            current_cell: None,
            target_cell: None,
        }
    }

    /// Limit how many instances of each listed tile may be placed
    ///
    /// Ids missing from the inventory stay unlimited.
    #[must_use]
    pub fn with_tile_inventory(mut self, inventory: HashMap<TileId, usize>) -> Self {
        self.inventory = inventory;
        self
    }

    /// Current solver status
    pub const fn current_state(&self) -> WfcState {
        self.state
    }

    /// The working tilemap
    pub const fn tilemap(&self) -> &Tilemap {
        &self.tilemap
    }

    /// Mutable access to the working tilemap
    ///
    /// Edit-driven callers re-seed cells between solver calls through this.
    pub const fn tilemap_mut(&mut self) -> &mut Tilemap {
        &mut self.tilemap
    }

    /// Surrender the working tilemap
    pub fn into_tilemap(self) -> Tilemap {
        self.tilemap
    }

    /// Cell of the step processed most recently
    pub const fn current_cell(&self) -> Option<Cell> {
        self.current_cell
    }

    /// Cell of the collapse enqueued most recently
    pub const fn target_cell(&self) -> Option<Cell> {
        self.target_cell
    }

    /// Remaining per-tile inventory
    pub const fn tile_inventory(&self) -> &HashMap<TileId, usize> {
        &self.inventory
    }

    /// How many times the solver has backtracked
    pub const fn backtrack_count(&self) -> usize {
        self.backtracks
    }

    /// Seed the queue with propagations outward from a cell
    pub fn propagate_constraints(&mut self, cell: Cell) {
        let size = self.tilemap.grid_size();
        for dir in OrthogonalDirection::ALL {
            if let Some(neighbour) = cell.next_orthogonal(size, dir) {
                self.open_steps.push_back(Step::Propagate(cell, neighbour));
            }
        }
    }

    /// Draw a tile from a cell's superposition and enqueue its collapse
    ///
    /// The draw is weighted by catalogue pick weights. Returns the chosen
    /// descriptor, or `None` when the cell holds no superposition.
    pub fn collapse(&mut self, cell: Cell) -> Option<&'static TileConfig> {
        let options = self
            .tilemap
            .tile_by_cell(cell)
            .and_then(Tile::superposition_options)
            .map(TileSet::ids)?;
        if options.is_empty() {
            return None;
        }
        let weights: Vec<f64> = options.iter().map(|&id| catalog().weight_of(id)).collect();
        let choice = self.selector.weighted_choice(&weights);
        let id = options.get(choice).copied()?;
        self.open_steps.push_back(Step::Collapse(cell, id));
        self.target_cell = Some(cell);
        catalog().get(id)
    }

    /// Drive the loop by one unit of work
    ///
    /// Processes one open step, or — when the queue is empty — finishes or
    /// draws the next collapse candidate depending on the end condition.
    /// While recovering, one call performs the whole history rewind.
    pub fn step(&mut self, end: StepEndCondition) {
        match self.state {
            WfcState::Done | WfcState::Failed(_) => {}
            WfcState::Recovering(_) => self.recover(),
            WfcState::Solving => {
                if let Some(step) = self.open_steps.pop_front() {
                    self.current_cell = Some(step.target_cell());
                    if let Err(failure) = self.process_step(step) {
                        // These two leave the queue full of steps planned
                        // against state the rewind is about to discard.
                        if matches!(
                            failure,
                            SolverFailure::NoSuperpositionOptions
                                | SolverFailure::InvalidLargeTilePlacement { .. }
                        ) {
                            self.open_steps.clear();
                        }
                        self.state = WfcState::Recovering(failure);
                    }
                } else {
                    match end {
                        StepEndCondition::StopAtEmptySteps => self.state = WfcState::Done,
                        StepEndCondition::StopAtSolved => match self.pick_candidate() {
                            Ok(Some((cell, id))) => {
                                self.open_steps.push_back(Step::Collapse(cell, id));
                                self.target_cell = Some(cell);
                            }
                            Ok(None) => self.state = WfcState::Done,
                            Err(failure) => self.state = WfcState::Recovering(failure),
                        },
                    }
                }
            }
        }
    }

    /// Drive the loop by up to `n` units of work
    pub fn step_n(&mut self, end: StepEndCondition, n: usize) {
        for _ in 0..n {
            if matches!(self.state, WfcState::Done | WfcState::Failed(_)) {
                break;
            }
            self.step(end);
        }
    }

    /// Run until the map is solved or the solver gives up
    pub fn solve(&mut self) {
        while !matches!(self.state, WfcState::Done | WfcState::Failed(_)) {
            self.step(StepEndCondition::StopAtSolved);
        }
    }

    /// Consume the queued action list
    ///
    /// Only drains once the solver is done; otherwise returns an empty list
    /// and keeps the queue.
    pub fn flush_pending_actions(&mut self) -> Vec<Action> {
        if matches!(self.state, WfcState::Done) {
            std::mem::take(&mut self.pending_actions)
        } else {
            Vec::new()
        }
    }

    pub(crate) fn inventory_available(&self, id: TileId) -> bool {
        self.inventory.get(&id).is_none_or(|&count| count > 0)
    }

    pub(crate) fn inventory_take(&mut self, id: TileId) {
        if let Some(count) = self.inventory.get_mut(&id) {
            *count = count.saturating_sub(1);
        }
    }

    pub(crate) fn inventory_credit(&mut self, id: TileId) {
        if let Some(count) = self.inventory.get_mut(&id) {
            *count += 1;
        }
    }
}
