use glam::Vec2;
use thiserror::Error;

/// Side length of one grid tile in pixels. Every spatial computation in the
/// game (agent bounding boxes, wall rects, cell lookup) shares this constant.
pub const TILE_SIZE: f32 = 24.0;

/// The shipped maze, 23x25 tiles. `X` wall, `.` pellet, `o` power pellet,
/// space empty, `P` player spawn (exactly one).
pub const DEFAULT_LAYOUT: [&str; 25] = [
    "XXXXXXXXXXXXXXXXXXXXXXX",
    "X..........X..........X",
    "X.XXXX.XXX.X.XXX.XXXX.X",
    "XoXXXX.XXX.X.XXX.XXXXoX",
    "X.XXXX.XXX.X.XXX.XXXX.X",
    "X.....................X",
    "X.XXXX.X.XXXXX.X.XXXX.X",
    "X......X...X...X......X",
    "XXXXXX.XXX X XXX.XXXXXX",
    "     X.X       X.X     ",
    "     X.X XXXXX X.X     ",
    "XXXXXX.X XXXXX X.XXXXXX",
    "      .          .     ",
    "XXXXXX.X XXXXX X.XXXXXX",
    "     X.X XXXXX X.X     ",
    "     X.X       X.X     ",
    "XXXXXX.X XXXXX X.XXXXXX",
    "X..........X..........X",
    "X.XXXX.XXX.X.XXX.XXXX.X",
    "Xo...X......P....X...oX",
    "XXX.X.X.XXXXX.X.X.XXX.X",
    "X......X...X...X......X",
    "X.XXXXXXXX.X.XXXXXXXX.X",
    "X.....................X",
    "XXXXXXXXXXXXXXXXXXXXXXX",
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    PowerPellet,
    /// Player start marker. Only exists while a layout is being parsed; the
    /// finished grid holds `Empty` at the spawn cell.
    SpawnMarker,
}

/// Integer grid coordinate, row-major with origin at the top-left.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Which consumable a call to [`Maze::consume_at`] removed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Consumed {
    Pellet,
    PowerPellet,
}

/// Axis-aligned pixel-space box.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, side: f32) -> Self {
        let half = Vec2::splat(side / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test: boxes that merely share an edge do not intersect,
    /// so an agent sliding flush along a corridor wall is not a collision.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    EmptyLayout,
    #[error("row {row} is {len} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown tile {ch:?} at row {row}, col {col}")]
    UnknownTile { ch: char, row: usize, col: usize },
    #[error("layout has no player spawn marker")]
    MissingSpawn,
    #[error("layout has more than one player spawn marker")]
    DuplicateSpawn,
}

/// The maze grid. Shape is fixed for the life of the process; only tile
/// contents change, and only one way (consumable -> Empty).
#[derive(Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    player_spawn: GridCell,
    pellets_remaining: usize,
}

impl Maze {
    /// Build a maze from a literal text layout. Fails fast on ragged rows,
    /// unknown characters, and anything other than exactly one `P` marker.
    /// The marker cell is stored as the player spawn and cleared to `Empty`.
    pub fn parse(rows: &[&str]) -> Result<Self, LayoutError> {
        if rows.is_empty() {
            return Err(LayoutError::EmptyLayout);
        }
        let width = rows[0].chars().count();
        if width == 0 {
            return Err(LayoutError::EmptyLayout);
        }
        let height = rows.len();

        let mut tiles = Vec::with_capacity(width * height);
        let mut spawn = None;
        let mut pellets = 0;
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    len,
                    expected: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = match ch {
                    'X' => Tile::Wall,
                    ' ' => Tile::Empty,
                    '.' => Tile::Pellet,
                    'o' => Tile::PowerPellet,
                    'P' => Tile::SpawnMarker,
                    _ => return Err(LayoutError::UnknownTile { ch, row, col }),
                };
                if tile == Tile::SpawnMarker {
                    if spawn.is_some() {
                        return Err(LayoutError::DuplicateSpawn);
                    }
                    spawn = Some(GridCell::new(row, col));
                    tiles.push(Tile::Empty);
                } else {
                    if matches!(tile, Tile::Pellet | Tile::PowerPellet) {
                        pellets += 1;
                    }
                    tiles.push(tile);
                }
            }
        }

        let player_spawn = spawn.ok_or(LayoutError::MissingSpawn)?;
        Ok(Self {
            width,
            height,
            tiles,
            player_spawn,
            pellets_remaining: pellets,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn player_spawn(&self) -> GridCell {
        self.player_spawn
    }

    pub fn pellets_remaining(&self) -> usize {
        self.pellets_remaining
    }

    /// Pixel extent of the whole grid.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    fn clamp_cell(&self, cell: GridCell) -> GridCell {
        GridCell::new(
            cell.row.min(self.height - 1),
            cell.col.min(self.width - 1),
        )
    }

    /// Tile at `cell`. Out-of-bounds queries are a programming error: bounded
    /// agent motion never produces one. Fails loudly in debug, clamps in
    /// release.
    pub fn tile_at(&self, cell: GridCell) -> Tile {
        debug_assert!(
            cell.row < self.height && cell.col < self.width,
            "cell query out of bounds: ({}, {})",
            cell.row,
            cell.col
        );
        let cell = self.clamp_cell(cell);
        self.tiles[cell.row * self.width + cell.col]
    }

    /// If `cell` holds a consumable, clear it to `Empty` and report which
    /// kind was eaten. Any other tile is a no-op returning `None`.
    pub fn consume_at(&mut self, cell: GridCell) -> Option<Consumed> {
        debug_assert!(
            cell.row < self.height && cell.col < self.width,
            "cell query out of bounds: ({}, {})",
            cell.row,
            cell.col
        );
        let cell = self.clamp_cell(cell);
        let idx = cell.row * self.width + cell.col;
        let kind = match self.tiles[idx] {
            Tile::Pellet => Consumed::Pellet,
            Tile::PowerPellet => Consumed::PowerPellet,
            _ => return None,
        };
        self.tiles[idx] = Tile::Empty;
        self.pellets_remaining -= 1;
        Some(kind)
    }

    /// Grid cell containing a pixel-space position, clamped to the grid.
    pub fn cell_at(&self, pos: Vec2) -> GridCell {
        let col = (pos.x / TILE_SIZE).floor().max(0.0) as usize;
        let row = (pos.y / TILE_SIZE).floor().max(0.0) as usize;
        self.clamp_cell(GridCell::new(row, col))
    }

    /// Pixel rectangle covered by `cell`, used for wall collision tests.
    pub fn cell_rect(&self, cell: GridCell) -> Rect {
        let min = Vec2::new(cell.col as f32 * TILE_SIZE, cell.row as f32 * TILE_SIZE);
        Rect {
            min,
            max: min + Vec2::splat(TILE_SIZE),
        }
    }

    /// Pixel-space center of `cell`, where agents spawn.
    pub fn cell_center(&self, cell: GridCell) -> Vec2 {
        self.cell_rect(cell).center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_layout() {
        let maze = Maze::parse(&DEFAULT_LAYOUT).unwrap();
        assert_eq!(maze.width(), 23);
        assert_eq!(maze.height(), 25);
        assert_eq!(maze.player_spawn(), GridCell::new(19, 12));
        // Spawn marker cleared before the player is created.
        assert_eq!(maze.tile_at(GridCell::new(19, 12)), Tile::Empty);
        assert!(maze.pellets_remaining() > 0);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Maze::parse(&["XXX", "XPXX", "XXX"]).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::RaggedRow {
                row: 1,
                len: 4,
                expected: 3
            }
        ));
    }

    #[test]
    fn parse_rejects_missing_spawn() {
        assert!(matches!(
            Maze::parse(&["XXX", "X.X", "XXX"]),
            Err(LayoutError::MissingSpawn)
        ));
    }

    #[test]
    fn parse_rejects_duplicate_spawn() {
        assert!(matches!(
            Maze::parse(&["XXXX", "XPPX", "XXXX"]),
            Err(LayoutError::DuplicateSpawn)
        ));
    }

    #[test]
    fn parse_rejects_unknown_tile() {
        assert!(matches!(
            Maze::parse(&["XXX", "XPX", "XZX"]),
            Err(LayoutError::UnknownTile { ch: 'Z', row: 2, col: 1 })
        ));
    }

    #[test]
    fn consume_transitions_exactly_once() {
        let mut maze = Maze::parse(&["XXXXX", "X.PoX", "XXXXX"]).unwrap();
        assert_eq!(maze.pellets_remaining(), 2);

        let cell = GridCell::new(1, 1);
        assert_eq!(maze.consume_at(cell), Some(Consumed::Pellet));
        assert_eq!(maze.tile_at(cell), Tile::Empty);
        assert_eq!(maze.consume_at(cell), None);
        assert_eq!(maze.pellets_remaining(), 1);

        let power = GridCell::new(1, 3);
        assert_eq!(maze.consume_at(power), Some(Consumed::PowerPellet));
        assert_eq!(maze.consume_at(power), None);
        assert_eq!(maze.pellets_remaining(), 0);
    }

    #[test]
    fn consume_on_wall_and_empty_is_a_noop() {
        let mut maze = Maze::parse(&["XXXXX", "X P.X", "XXXXX"]).unwrap();
        assert_eq!(maze.consume_at(GridCell::new(0, 0)), None);
        assert_eq!(maze.consume_at(GridCell::new(1, 1)), None);
        assert_eq!(maze.pellets_remaining(), 1);
    }

    #[test]
    fn cell_lookup_floors_pixel_positions() {
        let maze = Maze::parse(&["XXX", "XPX", "XXX"]).unwrap();
        assert_eq!(maze.cell_at(Vec2::new(0.0, 0.0)), GridCell::new(0, 0));
        assert_eq!(maze.cell_at(Vec2::new(23.9, 23.9)), GridCell::new(0, 0));
        assert_eq!(maze.cell_at(Vec2::new(24.0, 48.0)), GridCell::new(2, 1));
    }

    #[test]
    fn cell_rect_spans_one_tile() {
        let maze = Maze::parse(&["XXX", "XPX", "XXX"]).unwrap();
        let rect = maze.cell_rect(GridCell::new(1, 2));
        assert_eq!(rect.min, Vec2::new(48.0, 24.0));
        assert_eq!(rect.max, Vec2::new(72.0, 48.0));
        assert_eq!(maze.cell_center(GridCell::new(1, 2)), Vec2::new(60.0, 36.0));
    }

    #[test]
    fn edge_touching_rects_do_not_intersect() {
        let a = Rect::from_center(Vec2::new(12.0, 12.0), TILE_SIZE);
        let b = Rect::from_center(Vec2::new(36.0, 12.0), TILE_SIZE);
        assert!(!a.intersects(&b));
        let c = Rect::from_center(Vec2::new(34.0, 12.0), TILE_SIZE);
        assert!(a.intersects(&c));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_query_fails_loudly_in_debug() {
        let maze = Maze::parse(&["XXX", "XPX", "XXX"]).unwrap();
        maze.tile_at(GridCell::new(9, 9));
    }
}
