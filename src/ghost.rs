use crossterm::style::Color;
use glam::Vec2;

use crate::agent::Agent;
use crate::maze::Maze;

/// Desired movement direction for an enemy chasing `target`.
///
/// Always a unit vector, except when enemy and target coincide exactly: then
/// the prior direction is kept rather than normalizing a zero vector.
pub fn chase_direction(agent: &Agent, target: Vec2) -> Vec2 {
    let delta = target - agent.pos();
    if delta == Vec2::ZERO {
        agent.direction()
    } else {
        delta.normalize()
    }
}

/// A pursuing enemy: a mobile agent plus the tint it is drawn with.
pub struct Enemy {
    pub agent: Agent,
    pub tint: Color,
}

impl Enemy {
    pub fn new(spawn: Vec2, tint: Color) -> Self {
        Self {
            agent: Agent::enemy(spawn),
            tint,
        }
    }

    /// Aim straight at the target, step, and on any wall hit reverse both
    /// direction components. The reflective bounce is deliberately
    /// simplistic baseline AI: it can shuttle an enemy back and forth
    /// through the same corridor.
    pub fn update(&mut self, maze: &Maze, target: Vec2) {
        let dir = chase_direction(&self.agent, target);
        self.agent.set_direction(dir);
        if self.agent.advance(maze) {
            self.agent.reverse();
        }
    }
}
