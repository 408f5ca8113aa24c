/// Game tunables.  Built once at startup and passed by reference to every
/// constructor and update function; nothing in here changes during a run.

use std::time::Duration;

use anyhow::{ensure, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Play-field size in logical pixels.
    pub width: i32,
    pub height: i32,

    /// Bombs placed at game start.
    pub num_bombs: usize,
    pub bomb_radius: i32,
    /// Initial bomb velocity (per axis, per tick).
    pub bomb_velocity: (i32, i32),

    /// Player sprite box and starting centre.
    pub player_size: (i32, i32),
    pub player_start: (i32, i32),
    /// Distance moved per tick for each held direction key.
    pub player_step: i32,

    /// Beam box when travelling horizontally; swapped for vertical beams.
    pub beam_size: (i32, i32),
    /// Per-axis beam speed (diagonal beams move on both axes).
    pub beam_step: i32,

    pub explosion_size: (i32, i32),
    /// Explosion lifetime in ticks.
    pub explosion_life: u32,
    /// Ticks each explosion frame stays on screen.
    pub explosion_frame_ticks: u32,
    pub explosion_frames: u32,

    /// Points per destroyed bomb.
    pub score_per_bomb: u32,
    /// Top-left of the score label.
    pub score_pos: (i32, i32),

    pub tick_rate_hz: u32,
    /// How long the game-over screen stays up before the process exits.
    pub game_over_hold: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        let width = 1100;
        let height = 650;
        Self {
            width,
            height,
            num_bombs: 5,
            bomb_radius: 10,
            bomb_velocity: (1, 1),
            player_size: (90, 90),
            player_start: (300, 200),
            player_step: 5,
            beam_size: (40, 10),
            beam_step: 5,
            explosion_size: (60, 60),
            explosion_life: 100,
            explosion_frame_ticks: 5,
            explosion_frames: 4,
            score_per_bomb: 1,
            score_pos: (100, height - 50),
            tick_rate_hz: 50,
            game_over_hold: Duration::from_secs(5),
        }
    }
}

impl GameConfig {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "play field must be non-empty, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.bomb_radius > 0, "bomb radius must be > 0");
        ensure!(
            2 * self.bomb_radius < self.width && 2 * self.bomb_radius < self.height,
            "bombs ({}px across) do not fit in the play field",
            2 * self.bomb_radius
        );
        ensure!(
            self.player_size.0 > 0
                && self.player_size.1 > 0
                && self.player_size.0 <= self.width
                && self.player_size.1 <= self.height,
            "player size {:?} does not fit in the play field",
            self.player_size
        );
        ensure!(self.tick_rate_hz > 0, "tick rate must be > 0");
        ensure!(
            self.explosion_frames > 0 && self.explosion_frame_ticks > 0,
            "explosion animation needs at least one frame"
        );
        Ok(())
    }

    /// Duration of one tick at the configured rate.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }
}
