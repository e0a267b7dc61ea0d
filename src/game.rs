//! Game state: grid, player, pending commands and the per-tick update.

use crate::grid::Grid;
use crate::input::Command;
use crate::level::Level;
use crate::player::Player;
use crate::tile::{Interaction, KeyConfig, Tile};
use std::collections::VecDeque;
use tracing::{debug, info};

/// A key picked up during play and how many locks it opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPickup {
    pub tick: u64,
    pub key: KeyConfig,
    pub locks_removed: usize,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub player: Player,
    /// Commands from key presses, drained oldest first at the start of each tick.
    inputs: VecDeque<Command>,
    pub ticks: u64,
    keys_collected: Vec<KeyPickup>,
}

impl GameState {
    pub fn new(level: &Level) -> Self {
        let (x, y) = level.player_start();
        Self {
            grid: Grid::from_level(level),
            player: Player::new(x, y),
            inputs: VecDeque::new(),
            ticks: 0,
            keys_collected: Vec::new(),
        }
    }

    /// Rebuild from the level, dropping pending input.
    pub fn restart(&mut self, level: &Level) {
        *self = Self::new(level);
    }

    pub fn enqueue(&mut self, command: Command) {
        self.inputs.push_back(command);
    }

    pub fn pending(&self) -> usize {
        self.inputs.len()
    }

    pub fn keys_collected(&self) -> &[KeyPickup] {
        &self.keys_collected
    }

    /// One tick: resolve all pending input, then one gravity sweep.
    pub fn update(&mut self) {
        self.handle_inputs();
        self.grid.sweep_update();
        self.ticks += 1;
    }

    fn handle_inputs(&mut self) {
        while let Some(command) = self.inputs.pop_front() {
            match command.handle(&mut self.grid, &mut self.player) {
                Interaction::KeyCollected { key, locks_removed } => {
                    info!(tick = self.ticks, ?key, locks_removed, "key_collected");
                    self.keys_collected.push(KeyPickup {
                        tick: self.ticks,
                        key,
                        locks_removed,
                    });
                }
                Interaction::Pushed => {
                    debug!(tick = self.ticks, ?command, position = ?self.player.position(), "push");
                }
                Interaction::Moved | Interaction::Blocked => {}
            }
        }
    }

    /// The grid holds exactly one player marker and it sits at the player's coordinates.
    pub fn player_consistent(&self) -> bool {
        self.grid.positions(|t| t == Tile::Player) == [self.player.position()]
    }
}
