mod agent;
mod audio;
mod game;
mod ghost;
mod input;
mod maze;
mod render;

use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::{debug, info};

use audio::SoundSink;
use game::Game;
use input::{DirKey, HeldKeys};
use render::{GlyphSet, Renderer};

/// 16 ms per simulation step, roughly 60 Hz.
const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_RENDER_FPS: u64 = 120;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Layout problems are fatal before the terminal is touched.
    let game = Game::standard().context("invalid maze layout")?;
    info!(
        "maze {}x{}, {} pellets, {} enemies",
        game.maze.width(),
        game.maze.height(),
        game.maze.pellets_remaining(),
        game.enemies.len()
    );

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, game);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, mut game: Game) -> anyhow::Result<()> {
    let (tick_ms, render_fps) = read_speed_settings();
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    let mut renderer = Renderer::new(game.maze.width(), game.maze.height(), GlyphSet::from_env());
    let mut held = HeldKeys::default();
    let sound = SoundSink::from_env();
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                let now = Instant::now();
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Left | KeyCode::Char('h') => held.press(DirKey::Left, now),
                    KeyCode::Right | KeyCode::Char('l') => held.press(DirKey::Right, now),
                    KeyCode::Up | KeyCode::Char('k') => held.press(DirKey::Up, now),
                    KeyCode::Down | KeyCode::Char('j') => held.press(DirKey::Down, now),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(tick_ms) {
            last_tick = Instant::now();
            let dir = held.direction_at(Instant::now());
            let events = game.tick(dir);
            for event in &events {
                debug!("event: {event:?}");
                sound.play(stdout, event);
            }
            render::render(stdout, &game, &mut renderer)?;
            if !game.is_running() {
                let message = if game.lives == 0 {
                    format!("GAME OVER - Final Score: {} (press q to quit)", game.score)
                } else {
                    format!(
                        "MAZE CLEARED - Final Score: {} (press q to quit)",
                        game.score
                    )
                };
                render::render_end_banner(stdout, &game, &message)?;
                return wait_for_quit();
            }
        } else {
            render::render(stdout, &game, &mut renderer)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn wait_for_quit() -> anyhow::Result<()> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
        }
    }
}

fn read_speed_settings() -> (u64, u64) {
    let tick_ms = std::env::var("MAZECHASE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("MAZECHASE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (tick_ms, render_fps)
}
