use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::Game;
use crate::maze::{GridCell, Tile};

/// Terminal columns per maze tile.
pub const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Glyph {
    Player,
    Enemy,
    Wall,
    Empty,
    Pellet,
    PowerPellet,
}

#[derive(Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

/// Sprite set. Sprites here are glyph strings; when the emoji set is not
/// wanted (MAZECHASE_ASCII) everything degrades to plain ASCII placeholders.
#[derive(Clone, Copy, PartialEq)]
pub enum GlyphSet {
    Emoji,
    Ascii,
}

impl GlyphSet {
    pub fn from_env() -> Self {
        match std::env::var("MAZECHASE_ASCII") {
            Ok(v) if v != "0" => GlyphSet::Ascii,
            _ => GlyphSet::Emoji,
        }
    }

    fn text(self, glyph: Glyph) -> &'static str {
        match (self, glyph) {
            (GlyphSet::Emoji, Glyph::Player) => "😃",
            (GlyphSet::Emoji, Glyph::Enemy) => "👻",
            (GlyphSet::Emoji, Glyph::Wall) => "██",
            (GlyphSet::Emoji, Glyph::Pellet) => "· ",
            (GlyphSet::Emoji, Glyph::PowerPellet) => "● ",
            (GlyphSet::Ascii, Glyph::Player) => "C ",
            (GlyphSet::Ascii, Glyph::Enemy) => "M ",
            (GlyphSet::Ascii, Glyph::Wall) => "##",
            (GlyphSet::Ascii, Glyph::Pellet) => ". ",
            (GlyphSet::Ascii, Glyph::PowerPellet) => "o ",
            (_, Glyph::Empty) => "  ",
        }
    }
}

/// Diff renderer: redraws only the cells that changed since the last frame,
/// plus the HUD line when its text changes.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    glyphs: GlyphSet,
}

impl Renderer {
    pub fn new(width: usize, height: usize, glyphs: GlyphSet) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
            glyphs,
        }
    }
}

pub fn render(stdout: &mut Stdout, game: &Game, renderer: &mut Renderer) -> io::Result<()> {
    let width = game.maze.width();
    let height = game.maze.height();
    let needed_h = (height + 2) as u16;
    let needed_w = (width * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let hud = format!(
        "Score: {}  Lives: {}  Pellets: {}  (q to quit)",
        game.score,
        game.lives,
        game.maze.pellets_remaining()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for row in 0..height {
        for col in 0..width {
            let cell = cell_for(game, GridCell::new(row, col));
            let idx = row * width + col;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, col, row, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

/// What to draw at one grid cell. Agents are drawn at the cell containing
/// their pixel-space center; the player wins ties over enemies.
pub fn cell_for(game: &Game, cell: GridCell) -> Cell {
    if game.maze.cell_at(game.player.pos()) == cell {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    for enemy in &game.enemies {
        if game.maze.cell_at(enemy.agent.pos()) == cell {
            return Cell {
                glyph: Glyph::Enemy,
                color: enemy.tint,
            };
        }
    }
    match game.maze.tile_at(cell) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Pellet => Cell {
            glyph: Glyph::Pellet,
            color: Color::White,
        },
        Tile::PowerPellet => Cell {
            glyph: Glyph::PowerPellet,
            color: Color::Magenta,
        },
        Tile::Empty | Tile::SpawnMarker => Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
    }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    col: usize,
    row: usize,
    cell: Cell,
) -> io::Result<()> {
    let text = renderer.glyphs.text(cell.glyph);
    let x_pos = renderer.origin_x + (col * CELL_W) as u16;
    let y_pos = renderer.origin_y + row as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

/// Final banner under the maze once the run has ended.
pub fn render_end_banner(stdout: &mut Stdout, game: &Game, message: &str) -> io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let needed_h = (game.maze.height() + 2) as u16;
    let needed_w = (game.maze.width() * CELL_W) as u16;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(MoveTo(0, needed_h))?;
    } else {
        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        stdout.queue(MoveTo(origin_x, origin_y + game.maze.height() as u16))?;
    }
    stdout.queue(Print(message))?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::ghost::Enemy;
    use crate::maze::Maze;

    fn tiny_game() -> Game {
        let maze = Maze::parse(&["XXXXX", "XP.oX", "XXXXX"]).unwrap();
        Game::new(maze, &[(1, 2, Color::Red)])
    }

    #[test]
    fn cells_reflect_tiles_and_agents() {
        let game = tiny_game();
        assert_eq!(cell_for(&game, GridCell::new(0, 0)).glyph, Glyph::Wall);
        assert_eq!(cell_for(&game, GridCell::new(1, 1)).glyph, Glyph::Player);
        assert_eq!(cell_for(&game, GridCell::new(1, 2)).glyph, Glyph::Enemy);
        assert_eq!(cell_for(&game, GridCell::new(1, 2)).color, Color::Red);
        assert_eq!(
            cell_for(&game, GridCell::new(1, 3)).glyph,
            Glyph::PowerPellet
        );
    }

    #[test]
    fn player_wins_the_cell_over_an_enemy() {
        let mut game = tiny_game();
        // Park the enemy on the player's cell.
        game.enemies[0] = Enemy::new(game.player.pos(), Color::Red);
        assert_eq!(cell_for(&game, GridCell::new(1, 1)).glyph, Glyph::Player);
    }

    #[test]
    fn ascii_glyphs_fit_the_cell_width() {
        for glyph in [
            Glyph::Player,
            Glyph::Enemy,
            Glyph::Wall,
            Glyph::Empty,
            Glyph::Pellet,
            Glyph::PowerPellet,
        ] {
            let text = GlyphSet::Ascii.text(glyph);
            assert_eq!(UnicodeWidthStr::width(text), CELL_W);
        }
    }
}
