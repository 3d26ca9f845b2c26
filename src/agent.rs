use glam::Vec2;

use crate::maze::{GridCell, Maze, Rect, Tile, TILE_SIZE};

/// Pixels moved per simulation tick by every agent.
pub const MOVE_SPEED: f32 = 2.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AgentKind {
    Player,
    Enemy,
}

/// A mobile entity: center position in pixel space, a square bounding box of
/// one tile, a direction, and the spawn it returns to on a life-loss reset.
///
/// The player only ever carries one of the five cardinal/idle directions
/// (enforced at the input-mapping boundary, see `input::cardinal_or_idle`);
/// enemies carry arbitrary-angle unit vectors, so collision resolution tests
/// the sign of each velocity component independently.
#[derive(Clone, Debug)]
pub struct Agent {
    kind: AgentKind,
    pos: Vec2,
    dir: Vec2,
    speed: f32,
    spawn: Vec2,
}

impl Agent {
    pub fn player(spawn: Vec2) -> Self {
        Self::new(AgentKind::Player, spawn)
    }

    pub fn enemy(spawn: Vec2) -> Self {
        Self::new(AgentKind::Enemy, spawn)
    }

    fn new(kind: AgentKind, spawn: Vec2) -> Self {
        Self {
            kind,
            pos: spawn,
            dir: Self::default_direction(kind),
            speed: MOVE_SPEED,
            spawn,
        }
    }

    fn default_direction(kind: AgentKind) -> Vec2 {
        match kind {
            AgentKind::Player => Vec2::ZERO,
            AgentKind::Enemy => Vec2::X,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    pub fn set_direction(&mut self, dir: Vec2) {
        self.dir = dir;
    }

    /// Flip both direction components. Enemy wall bounce.
    pub fn reverse(&mut self) {
        self.dir = -self.dir;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, TILE_SIZE)
    }

    /// Move by `direction * speed`, then push the bounding box out of any
    /// wall it ended up overlapping: the leading edge snaps to the wall's
    /// trailing edge along the axis of motion. Returns whether any wall was
    /// hit.
    ///
    /// Player motion is single-axis, so each wall has exactly one axis to
    /// resolve. Enemy pursuit produces arbitrary-sign components; for those
    /// the wall is resolved along the axis of smaller penetration, which
    /// collapses to the same rule whenever only one axis is moving.
    ///
    /// Only the 3x3 cell neighborhood can overlap a one-tile box, so the
    /// scan stays local instead of walking the whole grid.
    pub fn advance(&mut self, maze: &Maze) -> bool {
        self.pos += self.dir * self.speed;

        let half = TILE_SIZE / 2.0;
        let mut hit = false;
        let center = maze.cell_at(self.pos);
        let row_hi = (center.row + 1).min(maze.height() - 1);
        let col_hi = (center.col + 1).min(maze.width() - 1);
        let moving = self.dir != Vec2::ZERO;
        for row in center.row.saturating_sub(1)..=row_hi {
            for col in center.col.saturating_sub(1)..=col_hi {
                let cell = GridCell::new(row, col);
                if !moving || maze.tile_at(cell) != Tile::Wall {
                    continue;
                }
                let wall = maze.cell_rect(cell);
                let body = self.bounds();
                if !body.intersects(&wall) {
                    continue;
                }
                hit = true;
                let pen_x = if self.dir.x > 0.0 {
                    body.max.x - wall.min.x
                } else if self.dir.x < 0.0 {
                    wall.max.x - body.min.x
                } else {
                    f32::INFINITY
                };
                let pen_y = if self.dir.y > 0.0 {
                    body.max.y - wall.min.y
                } else if self.dir.y < 0.0 {
                    wall.max.y - body.min.y
                } else {
                    f32::INFINITY
                };
                if pen_x <= pen_y {
                    if self.dir.x > 0.0 {
                        self.pos.x = wall.min.x - half;
                    } else {
                        self.pos.x = wall.max.x + half;
                    }
                }
                if pen_y <= pen_x {
                    if self.dir.y > 0.0 {
                        self.pos.y = wall.min.y - half;
                    } else {
                        self.pos.y = wall.max.y + half;
                    }
                }
            }
        }

        // Open layout edges (the tunnel rows) have no wall to push against;
        // keep the bounding box inside the grid regardless.
        let extent = maze.pixel_size();
        self.pos.x = self.pos.x.clamp(half, extent.x - half);
        self.pos.y = self.pos.y.clamp(half, extent.y - half);
        hit
    }

    /// Back to the spawn position and the variant default direction.
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.dir = Self::default_direction(self.kind);
    }
}
