use crossterm::style::Color;
use glam::Vec2;
use log::debug;

use crate::agent::Agent;
use crate::ghost::Enemy;
use crate::input;
use crate::maze::{Consumed, GridCell, LayoutError, Maze, DEFAULT_LAYOUT};

pub const STARTING_LIVES: u32 = 3;
pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;

/// Enemy roster for the shipped layout: one red chaser in the tunnel row.
pub const DEFAULT_ENEMIES: [(usize, usize, Color); 1] = [(12, 13, Color::Red)];

/// Discrete things that happened during a tick, for the audio sink and the
/// log. The simulation decides *that* they happened, never how they sound.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PelletEaten(Consumed),
    LifeLost,
    MazeCleared,
    GameOver,
}

/// Whole-game state: the grid, the agents, and the score/lives ledger.
/// Owned by the loop; one tick completes before anything reads it.
pub struct Game {
    pub maze: Maze,
    pub player: Agent,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub lives: u32,
    running: bool,
}

impl Game {
    pub fn new(maze: Maze, enemy_spawns: &[(usize, usize, Color)]) -> Self {
        let player = Agent::player(maze.cell_center(maze.player_spawn()));
        let enemies = enemy_spawns
            .iter()
            .map(|&(row, col, tint)| Enemy::new(maze.cell_center(GridCell::new(row, col)), tint))
            .collect();
        Self {
            maze,
            player,
            enemies,
            score: 0,
            lives: STARTING_LIVES,
            running: true,
        }
    }

    /// The shipped game: default layout, default enemy roster.
    pub fn standard() -> Result<Self, LayoutError> {
        Ok(Self::new(Maze::parse(&DEFAULT_LAYOUT)?, &DEFAULT_ENEMIES))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One fixed-timestep simulation step, strictly ordered: player input,
    /// player movement, pellet consumption, then each enemy in turn with its
    /// collision handled immediately. Sequential on purpose: two enemies
    /// overlapping the player in the same tick cost two lives, each with its
    /// own reset.
    pub fn tick(&mut self, input: Vec2) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }

        self.player.set_direction(input::cardinal_or_idle(input));
        self.player.advance(&self.maze);

        let cell = self.maze.cell_at(self.player.pos());
        if let Some(kind) = self.maze.consume_at(cell) {
            self.on_pellet_consumed(kind, &mut events);
        }

        for i in 0..self.enemies.len() {
            if !self.running {
                break;
            }
            let target = self.player.pos();
            self.enemies[i].update(&self.maze, target);
            if self.enemies[i]
                .agent
                .bounds()
                .intersects(&self.player.bounds())
            {
                self.on_agent_collision(&mut events);
            }
        }
        events
    }

    fn on_pellet_consumed(&mut self, kind: Consumed, events: &mut Vec<GameEvent>) {
        self.score += match kind {
            Consumed::Pellet => PELLET_SCORE,
            // Power-up behavior (enemy vulnerability) is an extension point;
            // only the score differs today.
            Consumed::PowerPellet => POWER_PELLET_SCORE,
        };
        events.push(GameEvent::PelletEaten(kind));
        if self.maze.pellets_remaining() == 0 {
            debug!("maze cleared with score {}", self.score);
            self.running = false;
            events.push(GameEvent::MazeCleared);
        }
    }

    fn on_agent_collision(&mut self, events: &mut Vec<GameEvent>) {
        self.lives -= 1;
        debug!("player caught, lives now {}", self.lives);
        if self.lives == 0 {
            // Terminal state: no reset, no further ticks.
            self.running = false;
            events.push(GameEvent::GameOver);
        } else {
            self.player.reset();
            for enemy in &mut self.enemies {
                enemy.agent.reset();
            }
            events.push(GameEvent::LifeLost);
        }
    }
}
