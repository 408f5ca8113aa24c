/// All game entity types — pure data, plus the small geometric helpers
/// every entity needs.

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in play-field units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A `w`×`h` box whose centre lands on `(cx, cy)`.
    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// True when the two boxes share some area.  Touching edges don't count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// The eight directions the player can face.  Screen coordinates: y grows
/// downwards, so `North` is a negative dy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Position in `ALL`; used to index per-direction sprite tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit signs `(sx, sy)` for this direction.
    pub fn signs(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::North => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// `signs()` scaled by `step` on each axis.
    pub fn delta(self, step: i32) -> (i32, i32) {
        let (sx, sy) = self.signs();
        (sx * step, sy * step)
    }

    /// Direction of a displacement, by the sign of each component.
    /// `None` for the zero vector.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Direction::East),
            (1, -1) => Some(Direction::NorthEast),
            (0, -1) => Some(Direction::North),
            (-1, -1) => Some(Direction::NorthWest),
            (-1, 0) => Some(Direction::West),
            (-1, 1) => Some(Direction::SouthWest),
            (0, 1) => Some(Direction::South),
            (1, 1) => Some(Direction::SouthEast),
            _ => None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    /// Drawn facing `Player::facing`.
    Normal,
    /// Shown after a bomb is destroyed, until the player moves again.
    Cheer,
    /// Shown once the player has been hit.
    Hurt,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub facing: Direction,
    pub pose: Pose,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let (cx, cy) = config.player_start;
        let (w, h) = config.player_size;
        Self {
            rect: Rect::from_center(cx, cy, w, h),
            facing: Direction::East,
            pose: Pose::Normal,
        }
    }
}

// ── Projectiles & hazards ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
    /// Facing of the player when this beam was fired.
    pub heading: Direction,
}

#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
}

impl Bomb {
    /// A round bomb of `radius` centred on `(cx, cy)`.
    pub fn new(cx: i32, cy: i32, radius: i32, velocity: (i32, i32)) -> Self {
        Self {
            rect: Rect::from_center(cx, cy, 2 * radius, 2 * radius),
            vx: velocity.0,
            vy: velocity.1,
        }
    }
}

/// A purely cosmetic blast left behind by a destroyed bomb.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    /// Ticks left before the explosion disappears.
    pub life: u32,
    /// Lifetime it started with.
    pub initial_life: u32,
}

impl Explosion {
    pub fn new(center: (i32, i32), config: &GameConfig) -> Self {
        let (w, h) = config.explosion_size;
        Self {
            rect: Rect::from_center(center.0, center.1, w, h),
            life: config.explosion_life,
            initial_life: config.explosion_life,
        }
    }

    pub fn is_active(&self) -> bool {
        self.life > 0
    }

    /// Animation frame to show, cycling every `frame_ticks` ticks.
    pub fn frame_index(&self, frame_ticks: u32, frame_count: u32) -> usize {
        let elapsed = self.initial_life.saturating_sub(self.life);
        ((elapsed / frame_ticks.max(1)) % frame_count.max(1)) as usize
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    pub status: GameStatus,
    /// Completed ticks.
    pub frame: u64,
}
