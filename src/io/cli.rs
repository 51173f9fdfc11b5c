//! Command-line interface for sketching roads and filling maps
//!
//! The demo binary seeds an empty map, optionally applies a road sketch
//! through the edit orchestrator, runs the solver to completion with a
//! progress bar, and exports the result as a PNG.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::algorithm::model::{StepEndCondition, Wfc, WfcState};
use crate::editor::orchestrator::{UserAction, apply};
use crate::editor::reopen::reopen_roads;
use crate::io::configuration::{
    DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_SEED, WFC_STEPS_PER_CYCLE,
};
use crate::io::error::{GeneratorError, Result, SolverFailure, invalid_parameter};
use crate::io::progress::SolveProgress;
use crate::io::render::export_tilemap_as_png;
use crate::spatial::cell::{Cell, GridSize};
use crate::tilemap::map::Tilemap;

/// Command-line arguments for the map generation tool
#[derive(Parser)]
#[command(name = "roadweave")]
#[command(
    author,
    version,
    about = "Sketch roads and fill the rest of the map with constraint-based tiles"
)]
pub struct Cli {
    /// Map width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_MAP_WIDTH)]
    pub width: usize,

    /// Map height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_MAP_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Road sketch as semicolon-separated x,y cell pairs (e.g. "3,3;4,3")
    #[arg(long)]
    pub sketch: Option<String>,

    /// Solver steps driven between progress updates
    #[arg(long, default_value_t = WFC_STEPS_PER_CYCLE)]
    pub steps_per_cycle: usize,

    /// How many re-open-and-retry rounds a failed solve gets
    #[arg(short, long, default_value_t = 3)]
    pub attempts: usize,

    /// Output PNG path
    #[arg(short, long, default_value = "map.png")]
    pub output: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Drives one sketch-solve-export run from parsed arguments
pub struct SketchRunner {
    cli: Cli,
}

impl SketchRunner {
    /// Create a runner over parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the sketch, solve, and export pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The dimensions or sketch fail validation
    /// - Every solve attempt ends in the failed state
    /// - The PNG export fails
    pub fn run(&mut self) -> Result<()> {
        let size = self.validated_size()?;
        let mut tilemap = Tilemap::seeded(size);

        for cell in self.parsed_sketch(size)? {
            apply(UserAction::Primary(cell), &mut tilemap, self.cli.seed);
            // Settle lifecycles so follow-up edits see built roads.
            tilemap.update(Duration::from_millis(300));
        }

        let progress = SolveProgress::new(size.cell_count(), self.cli.quiet);
        let attempts = self.cli.attempts.max(1);
        let mut solved = false;
        for attempt in 0..attempts {
            progress.start_attempt(attempt);
            let seed = self.cli.seed.wrapping_add(attempt as u64);
            if let Some(done) = self.solve_once(&tilemap, seed, &progress) {
                tilemap = done;
                solved = true;
                break;
            }
            reopen_roads(&mut tilemap);
        }

        if !solved {
            progress.finish("solve failed".to_string());
            return Err(GeneratorError::Solve {
                failure: SolverFailure::BacktrackFailed,
            });
        }

        let output = self.cli.output.to_string_lossy().to_string();
        export_tilemap_as_png(&tilemap, &output)?;
        progress.finish(format!("map written to {output}"));
        Ok(())
    }

    fn validated_size(&self) -> Result<GridSize> {
        if self.cli.width == 0 {
            return Err(invalid_parameter(
                "width",
                &self.cli.width,
                &"map width must be at least 1 cell",
            ));
        }
        if self.cli.height == 0 {
            return Err(invalid_parameter(
                "height",
                &self.cli.height,
                &"map height must be at least 1 cell",
            ));
        }
        Ok(GridSize {
            horizontal_cells: self.cli.width,
            vertical_cells: self.cli.height,
        })
    }

    fn parsed_sketch(&self, size: GridSize) -> Result<Vec<Cell>> {
        let Some(sketch) = &self.cli.sketch else {
            return Ok(Vec::new());
        };
        let mut cells = Vec::new();
        for pair in sketch.split(';').filter(|pair| !pair.is_empty()) {
            let mut parts = pair.split(',');
            let x = parts
                .next()
                .and_then(|part| part.trim().parse::<usize>().ok());
            let y = parts
                .next()
                .and_then(|part| part.trim().parse::<usize>().ok());
            let (Some(x), Some(y)) = (x, y) else {
                return Err(invalid_parameter(
                    "sketch",
                    &pair,
                    &"expected x,y cell pairs separated by semicolons",
                ));
            };
            let Some(cell) = Cell::new(size, x, y) else {
                return Err(invalid_parameter(
                    "sketch",
                    &pair,
                    &"cell lies outside the map",
                ));
            };
            cells.push(cell);
        }
        Ok(cells)
    }

    fn solve_once(
        &self,
        tilemap: &Tilemap,
        seed: u64,
        progress: &SolveProgress,
    ) -> Option<Tilemap> {
        let mut wfc = Wfc::from_tilemap(tilemap.clone(), seed);
        loop {
            wfc.step_n(StepEndCondition::StopAtSolved, self.cli.steps_per_cycle.max(1));
            progress.update(count_fixed(wfc.tilemap()));
            match wfc.current_state() {
                WfcState::Done => {
                    wfc.flush_pending_actions();
                    return Some(wfc.into_tilemap());
                }
                WfcState::Failed(_) => return None,
                WfcState::Solving | WfcState::Recovering(_) => {}
            }
        }
    }
}

fn count_fixed(tilemap: &Tilemap) -> usize {
    tilemap.fold_tiles(0, |count, _, tile| {
        if tile.fixed_id().is_some() {
            count + 1
        } else {
            count
        }
    })
}
