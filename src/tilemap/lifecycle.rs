//! Per-tile lifecycle state machine
//!
//! States are plain values driven by a small generic engine. A state either
//! carries a timer transition that fires once accumulated time reaches its
//! duration, or waits for a direct transition request; forbidden requests
//! are no-ops. Actions emitted along transitions surface to the caller as
//! values and are never interpreted here.

use std::time::Duration;

use crate::io::configuration::{
    CHANGING_DURATION, CONSTRUCTION_DURATION, GENERATED_DURATION, REMOVAL_DURATION,
};

/// Sound cues the surrounding application may play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// A road build started
    BuildRoadStart,
    /// A road build finished
    BuildRoadEnd,
    /// A road was torn down
    DestroyRoad,
}

/// Side effect emitted by the core for external collaborators
///
/// Consumers must ignore values they do not understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Request playback of a sound cue
    PlayAudio(Sound),
}

/// Behaviour table of a state value
pub trait StateChart: Copy + Eq {
    /// Action values emitted along transitions
    type Action;

    /// Timer transition out of this state, if it has one
    fn timer(self) -> Option<(Duration, Self)>;

    /// Whether a direct transition to `to` is allowed from this state
    fn allows(self, to: Self) -> bool;

    /// Actions emitted when the machine moves from `from` to `to`
    fn emitted(from: Self, to: Self) -> Vec<Self::Action>;
}

/// Generic machine driving any [`StateChart`] state value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine<S: StateChart> {
    state: S,
    elapsed: Duration,
}

impl<S: StateChart> Machine<S> {
    /// Create a machine resting in the given state
    pub const fn new(initial: S) -> Self {
        Self {
            state: initial,
            elapsed: Duration::ZERO,
        }
    }

    /// Current state
    pub const fn state(&self) -> S {
        self.state
    }

    /// Request a direct transition
    ///
    /// Returns the emitted actions, or `None` when the current state forbids
    /// the transition and nothing changed.
    pub fn transition_to(&mut self, to: S) -> Option<Vec<S::Action>> {
        if !self.state.allows(to) {
            return None;
        }
        let from = self.state;
        self.state = to;
        self.elapsed = Duration::ZERO;
        Some(S::emitted(from, to))
    }

    /// Advance time, firing timer transitions that have come due
    ///
    /// Left-over time carries into the next state so a large delta can chain
    /// through several timed states in one call. Returns whether the state
    /// changed and the actions emitted, in firing order.
    pub fn tick(&mut self, delta: Duration) -> (bool, Vec<S::Action>) {
        self.elapsed = self.elapsed.saturating_add(delta);
        let mut changed = false;
        let mut actions = Vec::new();

        while let Some((duration, next)) = self.state.timer() {
            if self.elapsed < duration {
                break;
            }
            let from = self.state;
            self.elapsed -= duration;
            self.state = next;
            actions.extend(S::emitted(from, next));
            changed = true;
        }

        (changed, actions)
    }
}

/// Lifecycle states of a tile on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    /// Fresh tile with no behaviour yet
    Initialized,
    /// User-placed tile being built
    Constructing,
    /// Solver-placed tile settling in
    Generated,
    /// Stable tile
    Built,
    /// Tile swapping its id in place
    Changing,
    /// Tile being torn down
    Removing,
    /// Tear-down finished; the map replaces the tile on its next tick
    Removed,
}

impl StateChart for TileState {
    type Action = Action;

    fn timer(self) -> Option<(Duration, Self)> {
        match self {
            Self::Constructing => Some((CONSTRUCTION_DURATION, Self::Built)),
            Self::Generated => Some((GENERATED_DURATION, Self::Built)),
            Self::Changing => Some((CHANGING_DURATION, Self::Built)),
            Self::Removing => Some((REMOVAL_DURATION, Self::Removed)),
            _ => None,
        }
    }

    fn allows(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Initialized, Self::Constructing | Self::Generated)
                | (Self::Built, Self::Changing | Self::Removing)
        )
    }

    fn emitted(from: Self, to: Self) -> Vec<Action> {
        match (from, to) {
            (_, Self::Constructing) => vec![Action::PlayAudio(Sound::BuildRoadStart)],
            (Self::Constructing, Self::Built) => vec![Action::PlayAudio(Sound::BuildRoadEnd)],
            (_, Self::Removing) => vec![Action::PlayAudio(Sound::DestroyRoad)],
            _ => Vec::new(),
        }
    }
}
