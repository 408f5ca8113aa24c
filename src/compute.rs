/// Pure game-logic functions.
///
/// Every state-level function takes an immutable reference to the current
/// `GameState` (plus the config, input snapshot or RNG it needs) and returns
/// a brand-new `GameState`.  The per-entity `update_*` helpers mutate a
/// single entity in place and are what `tick` is built from.

use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Beam, Bomb, Direction, Explosion, GameState, GameStatus, Player, Pose, Rect,
};
use crate::input::Controls;

// ── Boundary check ───────────────────────────────────────────────────────────

/// `(horizontal, vertical)` in-bounds flags for `rect`; `true` means the box
/// lies fully inside the play field on that axis.
pub fn check_bound(rect: &Rect, config: &GameConfig) -> (bool, bool) {
    let horizontal = rect.left() >= 0 && rect.right() <= config.width;
    let vertical = rect.top() >= 0 && rect.bottom() <= config.height;
    (horizontal, vertical)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: player at its start position and
/// `num_bombs` bombs scattered fully inside the field.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let r = config.bomb_radius;
    let bombs = (0..config.num_bombs)
        .map(|_| {
            let cx = rng.gen_range(r..=config.width - r);
            let cy = rng.gen_range(r..=config.height - r);
            Bomb::new(cx, cy, r, config.bomb_velocity)
        })
        .collect();

    GameState {
        player: Player::new(config),
        bombs,
        beams: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
    }
}

/// Box size of a beam travelling in `heading`.
fn beam_size(heading: Direction, config: &GameConfig) -> (i32, i32) {
    let (long, short) = config.beam_size;
    if heading.is_horizontal() {
        (long, short)
    } else if heading.is_vertical() {
        (short, long)
    } else {
        let side = (long * 3 / 4).max(short);
        (side, side)
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire one beam from the player in the direction it is facing.  The beam
/// starts one sprite-length ahead of the player's centre.
pub fn fire_beam(state: &GameState, config: &GameConfig) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let player = &state.player;
    let heading = player.facing;
    let (sx, sy) = heading.signs();
    let (cx, cy) = player.rect.center();
    let (w, h) = beam_size(heading, config);
    let (vx, vy) = heading.delta(config.beam_step);

    let mut beams = state.beams.clone();
    beams.push(Beam {
        rect: Rect::from_center(cx + player.rect.w * sx, cy + player.rect.h * sy, w, h),
        vx,
        vy,
        heading,
    });
    GameState {
        beams,
        ..state.clone()
    }
}

// ── Per-entity updates ───────────────────────────────────────────────────────

/// Move the player by the held keys.  Each axis that would leave the field
/// is reverted on its own, so the player slides along walls.  Facing only
/// changes on a non-zero net move.
pub fn update_player(player: &mut Player, controls: &Controls, config: &GameConfig) {
    let (dx, dy) = controls.displacement(config.player_step);

    if let Some(dir) = Direction::from_delta(dx, dy) {
        player.facing = dir;
        player.pose = Pose::Normal;
    }

    player.rect.translate(dx, dy);
    let (horizontal, vertical) = check_bound(&player.rect, config);
    if !horizontal {
        player.rect.translate(-dx, 0);
    }
    if !vertical {
        player.rect.translate(0, -dy);
    }
}

/// Reflect off any wall the bomb is past, then move.  Each axis flips on
/// its own; a corner flips both.
pub fn update_bomb(bomb: &mut Bomb, config: &GameConfig) {
    let (horizontal, vertical) = check_bound(&bomb.rect, config);
    if !horizontal {
        bomb.vx = -bomb.vx;
    }
    if !vertical {
        bomb.vy = -bomb.vy;
    }
    bomb.rect.translate(bomb.vx, bomb.vy);
}

pub fn update_beam(beam: &mut Beam) {
    beam.rect.translate(beam.vx, beam.vy);
}

/// Count the explosion down one tick.  Returns whether it is still active.
pub fn update_explosion(explosion: &mut Explosion) -> bool {
    explosion.life = explosion.life.saturating_sub(1);
    explosion.is_active()
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Order: player/bomb collision (ends the run, nothing else moves), then
/// beam/bomb collisions, off-field beam removal, bombs, beams, explosions
/// and finally the player.  A finished game is returned unchanged.
pub fn tick(state: &GameState, controls: &Controls, config: &GameConfig) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    // ── 1. Player ↔ bomb ─────────────────────────────────────────────────────
    if state
        .bombs
        .iter()
        .any(|bomb| state.player.rect.overlaps(&bomb.rect))
    {
        info!("kokaton hit a bomb on frame {}, final score {}", state.frame, state.score);
        let mut player = state.player.clone();
        player.pose = Pose::Hurt;
        return GameState {
            player,
            status: GameStatus::GameOver,
            ..state.clone()
        };
    }

    // ── 2. Beam ↔ bomb ───────────────────────────────────────────────────────
    let mut bombs = state.bombs.clone();
    let mut beams: Vec<Beam> = Vec::with_capacity(state.beams.len());
    let mut explosions = state.explosions.clone();
    let mut player = state.player.clone();
    let mut score = state.score;

    for beam in &state.beams {
        // Newest bomb first; the first overlap takes the beam.
        let hit = (0..bombs.len())
            .rev()
            .find(|&j| beam.rect.overlaps(&bombs[j].rect));
        match hit {
            Some(j) => {
                let bomb = bombs.remove(j);
                let center = bomb.rect.center();
                debug!("beam destroyed bomb at {:?}", center);
                explosions.push(Explosion::new(center, config));
                score += config.score_per_bomb;
                player.pose = Pose::Cheer;
            }
            None => beams.push(beam.clone()),
        }
    }

    // ── 3. Drop beams that have left the field ───────────────────────────────
    beams.retain(|beam| check_bound(&beam.rect, config) == (true, true));

    // ── 4. Move everything ───────────────────────────────────────────────────
    for bomb in &mut bombs {
        update_bomb(bomb, config);
    }
    for beam in &mut beams {
        update_beam(beam);
    }
    explosions.retain_mut(update_explosion);
    update_player(&mut player, controls, config);

    GameState {
        player,
        bombs,
        beams,
        explosions,
        score,
        status: GameStatus::Playing,
        frame: state.frame + 1,
    }
}
