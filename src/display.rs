/// Rendering layer — all terminal I/O lives here.
///
/// The simulation runs on a fixed logical play field; this module scales
/// that field onto whatever terminal grid is available and paints each
/// entity over every cell its bounding box covers, so what is drawn is what
/// collides.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use fight_kokaton::entities::{Beam, Bomb, Explosion, GameState, Player, Pose, Rect};
use fight_kokaton::GameConfig;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_PLAYER: Color = Color::Yellow;
const C_BOMB: Color = Color::Red;
const C_BEAM: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_SCORE: Color = Color::Blue;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Sprite tables ─────────────────────────────────────────────────────────────

/// Indexed by `Direction::index()`: E, NE, N, NW, W, SW, S, SE.
const PLAYER_SPRITES: [&str; 8] = [
    "(•▸)", "(•◹)", "(•▴)", "(◸•)", "(◂•)", "(◺•)", "(•▾)", "(•◿)",
];
const PLAYER_CHEER: &str = "\\(^o^)/";
const PLAYER_HURT: &str = "(×_×)";

const BEAM_TILES: [char; 8] = ['═', '╱', '║', '╲', '═', '╱', '║', '╲'];

const BOMB_TILE: char = '●';

/// Base explosion image; the other animation frames are its mirrors.
const EXPLOSION_BASE: [&str; 3] = ["`.*", ":#;", "*' "];

/// Outline the player's box is drawn with: corners, horizontal, vertical.
const PLAYER_FRAME: [char; 6] = ['╭', '╮', '╰', '╯', '─', '│'];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps play-field coordinates to terminal cells inside the border.
struct Viewport {
    field_w: i32,
    field_h: i32,
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(config: &GameConfig, term_cols: u16, term_rows: u16) -> Self {
        // Border on every side, controls hint on the last row.
        Self {
            field_w: config.width,
            field_h: config.height,
            left: 1,
            top: 1,
            cols: term_cols.saturating_sub(2).max(1),
            rows: term_rows.saturating_sub(3).max(1),
        }
    }

    fn to_cell(&self, x: i32, y: i32) -> (u16, u16) {
        let cx = (x.clamp(0, self.field_w) as i64 * self.cols as i64 / self.field_w.max(1) as i64)
            .min(self.cols as i64 - 1);
        let cy = (y.clamp(0, self.field_h) as i64 * self.rows as i64 / self.field_h.max(1) as i64)
            .min(self.rows as i64 - 1);
        (self.left + cx as u16, self.top + cy as u16)
    }

    /// Inclusive range of cells covered by `rect`: the cell of its top-left
    /// unit through the cell of its bottom-right unit.
    fn span(&self, rect: &Rect) -> CellSpan {
        let (col0, row0) = self.to_cell(rect.left(), rect.top());
        let (col1, row1) = self.to_cell(
            (rect.right() - 1).max(rect.left()),
            (rect.bottom() - 1).max(rect.top()),
        );
        CellSpan { col0, row0, col1, row1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellSpan {
    col0: u16,
    row0: u16,
    col1: u16,
    row1: u16,
}

impl CellSpan {
    fn width(&self) -> usize {
        (self.col1 - self.col0) as usize + 1
    }

    fn height(&self) -> usize {
        (self.row1 - self.row0) as usize + 1
    }
}

/// A run of text placed at one terminal cell.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Stamp {
    col: u16,
    row: u16,
    text: String,
}

/// One stamp per row of `span`, each cell filled by `tile(dx, dy)`.
fn fill(span: CellSpan, tile: impl Fn(usize, usize) -> char) -> Vec<Stamp> {
    (0..span.height())
        .map(|dy| Stamp {
            col: span.col0,
            row: span.row0 + dy as u16,
            text: (0..span.width()).map(|dx| tile(dx, dy)).collect(),
        })
        .collect()
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    config: &GameConfig,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(config, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, cols, rows)?;

    for bomb in &state.bombs {
        draw_bomb(out, &view, bomb)?;
    }
    for beam in &state.beams {
        draw_beam(out, &view, beam)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, &view, explosion, config)?;
    }
    draw_player(out, &view, &state.player)?;
    draw_score(out, &view, state.score, config)?;
    draw_controls_hint(out, rows)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Overlay the game-over message on the last rendered frame.
pub fn render_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    config: &GameConfig,
) -> std::io::Result<()> {
    render(out, state, config)?;

    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(config, cols, rows);
    let (col, row) = view.to_cell(config.width / 2 - 150, config.height / 2);

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    out.queue(style::SetAttribute(style::Attribute::Bold))?;
    out.queue(Print("Game Over"))?;
    out.queue(style::SetAttribute(style::Attribute::Reset))?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border & hint ─────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;
    let bottom = rows.saturating_sub(2);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / W A S D : Move   SPACE : Beam   Q : Quit"))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_stamps<W: Write>(out: &mut W, stamps: &[Stamp], color: Color) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for stamp in stamps {
        out.queue(cursor::MoveTo(stamp.col, stamp.row))?;
        out.queue(Print(&stamp.text))?;
    }
    Ok(())
}

/// Rounded outline of `span`; a one-cell-thin span is filled solid.
fn frame_tile(span: CellSpan) -> impl Fn(usize, usize) -> char {
    let (w, h) = (span.width(), span.height());
    let [tl, tr, bl, br, horiz, vert] = PLAYER_FRAME;
    move |dx, dy| {
        if w == 1 || h == 1 {
            return '█';
        }
        let (top, bottom) = (dy == 0, dy + 1 == h);
        let (left, right) = (dx == 0, dx + 1 == w);
        match (top, bottom, left, right) {
            (true, _, true, _) => tl,
            (true, _, _, true) => tr,
            (_, true, true, _) => bl,
            (_, true, _, true) => br,
            (true, _, _, _) | (_, true, _, _) => horiz,
            (_, _, true, _) | (_, _, _, true) => vert,
            _ => ' ',
        }
    }
}

/// The player's outline over its whole box, with the pose sprite laid over
/// the middle row.
fn player_stamps(view: &Viewport, player: &Player) -> Vec<Stamp> {
    let span = view.span(&player.rect);
    let mut stamps = fill(span, frame_tile(span));

    let sprite = match player.pose {
        Pose::Normal => PLAYER_SPRITES[player.facing.index()],
        Pose::Cheer => PLAYER_CHEER,
        Pose::Hurt => PLAYER_HURT,
    };
    let len = sprite.chars().count() as u16;
    let mid_col = (span.col0 + span.col1) / 2;
    let max_col = (view.left + view.cols).saturating_sub(len).max(view.left);
    stamps.push(Stamp {
        col: mid_col.saturating_sub(len / 2).clamp(view.left, max_col),
        row: (span.row0 + span.row1) / 2,
        text: sprite.to_string(),
    });
    stamps
}

fn bomb_stamps(view: &Viewport, bomb: &Bomb) -> Vec<Stamp> {
    fill(view.span(&bomb.rect), |_, _| BOMB_TILE)
}

fn beam_stamps(view: &Viewport, beam: &Beam) -> Vec<Stamp> {
    let tile = BEAM_TILES[beam.heading.index()];
    fill(view.span(&beam.rect), move |_, _| tile)
}

/// Frames 0..4 are the base image, mirrored left-right, mirrored
/// top-bottom, and mirrored both ways.
fn explosion_frame(index: usize) -> Vec<String> {
    let flip_x = index % 2 == 1;
    let flip_y = index >= 2;
    let mut rows: Vec<String> = EXPLOSION_BASE
        .iter()
        .map(|row| {
            if flip_x {
                row.chars().rev().collect()
            } else {
                row.to_string()
            }
        })
        .collect();
    if flip_y {
        rows.reverse();
    }
    rows
}

/// The current animation frame tiled across the explosion's box.
fn explosion_stamps(view: &Viewport, explosion: &Explosion, config: &GameConfig) -> Vec<Stamp> {
    let index = explosion.frame_index(config.explosion_frame_ticks, config.explosion_frames);
    let image: Vec<Vec<char>> = explosion_frame(index)
        .iter()
        .map(|row| row.chars().collect())
        .collect();
    fill(view.span(&explosion.rect), |dx, dy| {
        let row = &image[dy % image.len()];
        row[dx % row.len()]
    })
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, player: &Player) -> std::io::Result<()> {
    draw_stamps(out, &player_stamps(view, player), C_PLAYER)
}

fn draw_bomb<W: Write>(out: &mut W, view: &Viewport, bomb: &Bomb) -> std::io::Result<()> {
    draw_stamps(out, &bomb_stamps(view, bomb), C_BOMB)
}

fn draw_beam<W: Write>(out: &mut W, view: &Viewport, beam: &Beam) -> std::io::Result<()> {
    draw_stamps(out, &beam_stamps(view, beam), C_BEAM)
}

fn draw_explosion<W: Write>(
    out: &mut W,
    view: &Viewport,
    explosion: &Explosion,
    config: &GameConfig,
) -> std::io::Result<()> {
    draw_stamps(out, &explosion_stamps(view, explosion, config), C_EXPLOSION)
}

fn draw_score<W: Write>(
    out: &mut W,
    view: &Viewport,
    score: u32,
    config: &GameConfig,
) -> std::io::Result<()> {
    let (col, row) = view.to_cell(config.score_pos.0, config.score_pos.1);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(format!("Score: {}", score)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fight_kokaton::entities::Direction;

    fn view() -> Viewport {
        Viewport::new(&GameConfig::default(), 82, 27)
    }

    fn covers(stamps: &[Stamp], col: u16, row: u16) -> bool {
        stamps.iter().any(|s| {
            s.row == row && col >= s.col && ((col - s.col) as usize) < s.text.chars().count()
        })
    }

    /// Every cell between the cells of the rect's top-left and bottom-right
    /// units is painted.
    fn assert_covers_rect(stamps: &[Stamp], view: &Viewport, rect: &Rect) {
        let (c0, r0) = view.to_cell(rect.left(), rect.top());
        let (c1, r1) = view.to_cell(rect.right() - 1, rect.bottom() - 1);
        for row in r0..=r1 {
            for col in c0..=c1 {
                assert!(covers(stamps, col, row), "cell ({col}, {row}) of {rect:?} not drawn");
            }
        }
    }

    #[test]
    fn explosion_frames_are_mirrors_of_the_base() {
        let base = explosion_frame(0);
        assert_eq!(base, EXPLOSION_BASE.iter().map(|s| s.to_string()).collect::<Vec<_>>());

        let flipped_x = explosion_frame(1);
        assert_eq!(flipped_x[0], "*.`");

        let flipped_y = explosion_frame(2);
        assert_eq!(flipped_y[0], EXPLOSION_BASE[2]);

        let flipped_xy = explosion_frame(3);
        assert_eq!(flipped_xy[2], "*.`");
    }

    #[test]
    fn viewport_maps_field_corners_inside_border() {
        let config = GameConfig::default();
        let view = view();
        assert_eq!(view.to_cell(0, 0), (1, 1));
        let (col, row) = view.to_cell(config.width, config.height);
        assert_eq!(col, 80);
        assert_eq!(row, 24);
    }

    #[test]
    fn span_of_whole_field_is_whole_viewport() {
        let config = GameConfig::default();
        let span = view().span(&Rect::new(0, 0, config.width, config.height));
        assert_eq!(span, CellSpan { col0: 1, row0: 1, col1: 80, row1: 24 });
    }

    #[test]
    fn player_is_drawn_over_its_whole_box() {
        let config = GameConfig::default();
        let view = view();
        let mut player = Player::new(&config);
        for pose in [Pose::Normal, Pose::Cheer, Pose::Hurt] {
            player.pose = pose;
            let stamps = player_stamps(&view, &player);
            assert_covers_rect(&stamps, &view, &player.rect);
        }
        // Default box 255..345 × 155..245 spans several rows and columns.
        let span = view.span(&player.rect);
        assert!(span.width() >= 6);
        assert!(span.height() >= 3);
    }

    #[test]
    fn explosion_is_drawn_over_its_whole_box() {
        let config = GameConfig::default();
        let view = view();
        let mut explosion = Explosion::new((600, 300), &config);
        for life in [100, 93, 87, 81] {
            explosion.life = life;
            let stamps = explosion_stamps(&view, &explosion, &config);
            assert_covers_rect(&stamps, &view, &explosion.rect);
        }
    }

    #[test]
    fn bombs_and_beams_are_drawn_over_their_boxes() {
        let view = view();
        let bomb = Bomb::new(700, 400, 10, (1, 1));
        assert_covers_rect(&bomb_stamps(&view, &bomb), &view, &bomb.rect);

        let beam = Beam {
            rect: Rect::from_center(500, 300, 10, 40),
            vx: 0,
            vy: -5,
            heading: Direction::North,
        };
        let stamps = beam_stamps(&view, &beam);
        assert_covers_rect(&stamps, &view, &beam.rect);
        assert!(stamps.iter().all(|s| s.text.chars().all(|c| c == '║')));
    }

    #[test]
    fn colliding_bomb_is_drawn_touching_the_player() {
        // Overlaps the default player's top-right corner in field units.
        let config = GameConfig::default();
        let view = view();
        let player = Player::new(&config);
        let bomb = Bomb::new(340, 160, config.bomb_radius, (1, 1));
        assert!(player.rect.overlaps(&bomb.rect));

        let player_cells = player_stamps(&view, &player);
        let bomb_cells = bomb_stamps(&view, &bomb);
        let shared = bomb_cells.iter().any(|b| {
            (0..b.text.chars().count() as u16).any(|dx| covers(&player_cells, b.col + dx, b.row))
        });
        assert!(shared, "bomb {bomb_cells:?} drawn apart from player {player_cells:?}");
    }

    #[test]
    fn sprite_sits_inside_the_player_outline() {
        let config = GameConfig::default();
        let view = view();
        let player = Player::new(&config);
        let span = view.span(&player.rect);
        let stamps = player_stamps(&view, &player);
        let sprite = stamps.last().unwrap();
        assert_eq!(sprite.text, PLAYER_SPRITES[Direction::East.index()]);
        assert!(sprite.row > span.row0 && sprite.row < span.row1);
        assert!(sprite.col >= span.col0);
        assert!(sprite.col as usize + sprite.text.chars().count() <= span.col1 as usize + 1);
    }

    #[test]
    fn every_direction_has_sprites() {
        for dir in Direction::ALL {
            assert!(!PLAYER_SPRITES[dir.index()].is_empty());
            assert!(BEAM_TILES[dir.index()] != ' ');
        }
    }
}
