use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::algorithm::candidates::uncertainty;
use crate::algorithm::collapse::collapse;
use crate::algorithm::sampler::Sampler;
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::rules::{RuleTable, TileId};
use crate::spatial::Grid;

/// Where the generation state machine currently stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationState {
    /// Cells remain unresolved and generation can proceed
    Running,
    /// Every cell is resolved; terminal
    Complete,
    /// A cell had no admissible tile; the board is about to be discarded
    Contradiction,
    /// An abort request ended generation; terminal, never retried
    Aborted,
}

/// What a single controller step did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One cell was resolved
    Collapsed {
        /// Position of the resolved cell
        position: [i32; 2],
        /// The tile type it resolved to
        tile: TileId,
    },
    /// A contradiction discarded the board and a fresh attempt began
    Restarted,
    /// The board is complete; stepping further changes nothing
    Finished,
}

/// Shared handle for requesting cooperative cancellation
///
/// The controller observes the flag between collapse steps only, never
/// mid-collapse. Cloning hands out another reference to the same flag.
#[derive(Clone, Debug, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Top-level generation loop: select, collapse, restart on contradiction
///
/// Each step resolves the globally least-constrained unresolved cell, with
/// uniform random tie-breaking so no board region is privileged by scan
/// order. A contradiction is caught exactly here: the whole board is
/// discarded and a fresh attempt begins. Retries are unbounded; a
/// pathological rule table can loop forever.
#[derive(Debug)]
pub struct GenerationController {
    /// The board being generated; replaced wholesale on restart
    pub grid: Grid,
    /// Loaded rule table, shared read-only across attempts
    pub rules: RuleTable,
    sampler: Sampler,
    state: GenerationState,
    attempt: usize,
    abort: AbortFlag,
}

impl GenerationController {
    /// Create a controller with a fresh, fully unresolved board
    ///
    /// # Errors
    ///
    /// Returns an error if either board dimension is zero.
    pub fn new(rules: RuleTable, width: usize, height: usize, seed: u64) -> Result<Self> {
        if width == 0 {
            return Err(invalid_parameter(
                "width",
                &width,
                &"board dimensions must be at least 1",
            ));
        }
        if height == 0 {
            return Err(invalid_parameter(
                "height",
                &height,
                &"board dimensions must be at least 1",
            ));
        }

        Ok(Self {
            grid: Grid::new(width, height),
            rules,
            sampler: Sampler::new(seed),
            state: GenerationState::Running,
            attempt: 1,
            abort: AbortFlag::new(),
        })
    }

    /// Current state of the generation state machine
    pub const fn state(&self) -> GenerationState {
        self.state
    }

    /// Which attempt is in progress, counting from 1
    ///
    /// Increments every time a contradiction discards the board.
    pub const fn attempt(&self) -> usize {
        self.attempt
    }

    /// A handle external code can use to request cancellation
    pub fn abort_flag(&self) -> AbortFlag {
        self.abort.clone()
    }

    /// Perform one state machine transition
    ///
    /// # Errors
    ///
    /// Returns `Aborted` once cancellation has been requested; the abort
    /// wins over any pending restart and is never retried. Contradictions
    /// are not errors at this boundary: they restart the attempt and
    /// report `Restarted`.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.abort.is_requested() || self.state == GenerationState::Aborted {
            self.state = GenerationState::Aborted;
            return Err(GenerationError::Aborted);
        }
        if self.state == GenerationState::Complete {
            return Ok(StepOutcome::Finished);
        }

        let Some(position) = self.pick_lowest_uncertainty() else {
            // No unresolved cell left to pick
            self.state = GenerationState::Complete;
            return Ok(StepOutcome::Finished);
        };

        match collapse(&mut self.grid, &self.rules, &mut self.sampler, position) {
            Ok(tile) => {
                if self.grid.is_complete() {
                    self.state = GenerationState::Complete;
                }
                Ok(StepOutcome::Collapsed { position, tile })
            }
            Err(GenerationError::Contradiction { .. }) => {
                // The recoverable case, caught only here: throw the whole
                // board away and start a new attempt from scratch.
                self.state = GenerationState::Contradiction;
                self.restart();
                Ok(StepOutcome::Restarted)
            }
            Err(other) => Err(other),
        }
    }

    /// Drive the state machine until the board is complete
    ///
    /// Blocks through any number of restarts. Use `step` directly to
    /// interleave progress reporting.
    ///
    /// # Errors
    ///
    /// Returns `Aborted` if cancellation is requested between steps.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if matches!(self.step()?, StepOutcome::Finished) {
                return Ok(());
            }
        }
    }

    /// Find the unresolved cell(s) with the fewest surviving candidates
    /// and pick one uniformly at random among ties
    fn pick_lowest_uncertainty(&mut self) -> Option<[i32; 2]> {
        let mut lowest = usize::MAX;
        let mut collapseable: Vec<[i32; 2]> = Vec::new();

        for position in self.grid.unresolved_positions() {
            let count = uncertainty(&self.grid, &self.rules, position);
            if count < lowest {
                lowest = count;
                collapseable.clear();
                collapseable.push(position);
            } else if count == lowest {
                collapseable.push(position);
            }
        }

        let index = self.sampler.uniform_choice(collapseable.len())?;
        collapseable.get(index).copied()
    }

    /// Discard the board and begin the next attempt
    fn restart(&mut self) {
        self.grid = Grid::new(self.grid.width(), self.grid.height());
        self.attempt += 1;
        self.state = GenerationState::Running;
    }
}
