//! Audio collaborator. The simulation only decides *that* a sound event
//! happened; this sink maps events to the one instrument a terminal has,
//! the bell. Any failure to sound is swallowed and never reaches the
//! simulation.

use std::io::Write;

use crate::game::GameEvent;

pub struct SoundSink {
    enabled: bool,
}

impl SoundSink {
    /// MAZECHASE_SOUND=0 silences the bell.
    pub fn from_env() -> Self {
        let enabled = !matches!(std::env::var("MAZECHASE_SOUND"), Ok(v) if v == "0");
        Self { enabled }
    }

    /// Ring the bell for life-loss class events. Pellet events arrive too
    /// but render silently; a bell per pellet would be unbearable.
    pub fn play(&self, out: &mut impl Write, event: &GameEvent) {
        if !self.enabled {
            return;
        }
        if matches!(event, GameEvent::LifeLost | GameEvent::GameOver) {
            // Failure degrades to silence.
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}
