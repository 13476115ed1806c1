//! Player decision policies
//!
//! The engine asks each player's policy for a [`Decision`] before moving it.
//! Policies see the whole world read-only and cannot touch entity
//! collections.

use super::geometry::Location;
use super::player::{Action, Player};
use super::state::GameState;

/// Action and absolute target chosen for the coming tick(s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub target: Location,
}

impl Decision {
    pub fn new(action: Action, target: Location) -> Self {
        Self { action, target }
    }

    /// Steer toward `target` without feeding or splitting
    pub fn move_to(target: Location) -> Self {
        Self::new(Action::None, target)
    }
}

/// Decides what a player does each tick
pub trait Policy: Send {
    fn take_action(&mut self, me: &Player, state: &GameState) -> Decision;
}

impl<F> Policy for F
where
    F: FnMut(&Player, &GameState) -> Decision + Send,
{
    fn take_action(&mut self, me: &Player, state: &GameState) -> Decision {
        self(me, state)
    }
}

/// Keeps whatever action and target were written onto the player externally
#[derive(Debug, Clone, Copy, Default)]
pub struct Manual;

impl Policy for Manual {
    fn take_action(&mut self, me: &Player, _state: &GameState) -> Decision {
        Decision::new(me.action, me.target)
    }
}
