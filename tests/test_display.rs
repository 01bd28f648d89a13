use pointer_shooter::compute::{fire, init_state, pointer_moved, GameState};
use pointer_shooter::config::GameConfig;
use pointer_shooter::display::*;
use pointer_shooter::entities::Enemy;
use pointer_shooter::geometry::{Size, Vector};
use pointer_shooter::terminal::{TerminalSurface, Viewport};

#[derive(Debug, PartialEq)]
enum Op {
    Fill(f64, f64, f64, f64, Rgb),
    Line(f64, f64, f64, f64, f64, Rgb),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Surface for Recorder {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.ops.push(Op::Fill(x, y, w, h, color));
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb) {
        self.ops.push(Op::Line(x1, y1, x2, y2, width, color));
    }
}

fn make_state() -> GameState {
    let mut config = GameConfig::default();
    config.enemy.spawn_probability = 0.0;
    init_state(config)
}

fn add_enemy(state: &mut GameState, x: f64, y: f64) {
    let e = Enemy::new(1, Vector::new(x, y), &state.config.enemy, &state.config.hp_bar);
    state.enemies.push(e);
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn empty_frame_is_background_then_shooter() {
    let state = make_state();
    let mut rec = Recorder::default();
    render(&mut rec, &state);

    assert_eq!(
        rec.ops,
        vec![
            Op::Fill(0.0, 0.0, 400.0, 600.0, C_BACKGROUND),
            Op::Fill(180.0, 560.0, 40.0, 40.0, C_SHOOTER),
        ]
    );
}

#[test]
fn bullet_is_a_square_capped_point() {
    let mut state = make_state();
    fire(&mut state);
    let mut rec = Recorder::default();
    render(&mut rec, &state);

    assert!(rec
        .ops
        .contains(&Op::Line(200.0, 560.0, 200.0, 560.0, 8.0, C_BULLET)));
}

#[test]
fn hidden_hp_bar_is_not_drawn() {
    let mut state = make_state();
    add_enemy(&mut state, 100.0, 100.0);
    let mut rec = Recorder::default();
    render(&mut rec, &state);

    assert!(rec.ops.contains(&Op::Fill(100.0, 100.0, 30.0, 30.0, C_ENEMY)));
    assert!(!rec
        .ops
        .iter()
        .any(|op| matches!(op, Op::Fill(_, _, _, _, c) if *c == C_HP_BAR_BACK)));
}

#[test]
fn shown_hp_bar_fills_by_hp_ratio() {
    let mut state = make_state();
    add_enemy(&mut state, 100.0, 100.0);
    state.enemies[0].receive_hit(Vector::ZERO, 0.0);

    let mut rec = Recorder::default();
    render(&mut rec, &state);

    // Anchor = (100, 100) + (15, -12), bar centred on it.
    assert!(rec.ops.contains(&Op::Fill(95.0, 88.0, 40.0, 8.0, C_HP_BAR_BACK)));
    let fill = rec
        .ops
        .iter()
        .find_map(|op| match op {
            Op::Fill(x, y, w, h, c) if *c == C_HP_BAR_FILL => Some((*x, *y, *w, *h)),
            _ => None,
        })
        .expect("fill bar drawn");
    assert_eq!((fill.0, fill.1, fill.3), (95.0, 88.0, 8.0));
    assert!((fill.2 - 40.0 * 6.0 / 7.0).abs() < 1e-9);
}

#[test]
fn crosshair_only_when_enabled() {
    let mut state = make_state();
    pointer_moved(&mut state, Vector::new(120.0, 250.0));

    let mut rec = Recorder::default();
    render(&mut rec, &state);
    assert!(!rec.ops.iter().any(|op| matches!(op, Op::Line(..))));

    state.config.display.show_crosshair = true;
    let mut rec = Recorder::default();
    render(&mut rec, &state);
    assert!(rec.ops.contains(&Op::Line(120.0, 0.0, 120.0, 600.0, 1.0, C_CROSSHAIR)));
    assert!(rec.ops.contains(&Op::Line(0.0, 250.0, 400.0, 250.0, 1.0, C_CROSSHAIR)));
}

// ── terminal surface ──────────────────────────────────────────────────────────

/// 40×60 cells over a 400×600 arena: one cell per 10×10 units.
fn viewport() -> Viewport {
    Viewport::new(40, 60, Size::new(400.0, 600.0))
}

#[test]
fn viewport_maps_cells_to_centres() {
    let vp = viewport();
    assert_eq!(vp.to_arena(0, 0), Vector::new(5.0, 5.0));
    assert_eq!(vp.to_arena(39, 59), Vector::new(395.0, 595.0));
}

#[test]
fn fill_rect_covers_touched_cells() {
    let mut surface = TerminalSurface::new(viewport());
    surface.fill_rect(0.0, 0.0, 10.0, 10.0, C_ENEMY);
    assert_eq!(surface.cell(0, 0), Some(C_ENEMY));
    assert_eq!(surface.cell(1, 0), None);
    assert_eq!(surface.cell(0, 1), None);

    surface.fill_rect(15.0, 15.0, 10.0, 10.0, C_SHOOTER);
    for (col, row) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
        assert_eq!(surface.cell(col, row), Some(C_SHOOTER));
    }
}

#[test]
fn fill_rect_clips_and_ignores_empty() {
    let mut surface = TerminalSurface::new(viewport());
    surface.fill_rect(-50.0, -50.0, 60.0, 60.0, C_ENEMY);
    assert_eq!(surface.cell(0, 0), Some(C_ENEMY));

    surface.fill_rect(390.0, 590.0, 500.0, 500.0, C_BULLET);
    assert_eq!(surface.cell(39, 59), Some(C_BULLET));

    surface.fill_rect(200.0, 200.0, 0.0, 10.0, C_SHOOTER);
    assert_eq!(surface.cell(20, 20), None);
}

#[test]
fn thin_line_still_covers_a_cell_per_row() {
    let mut surface = TerminalSurface::new(viewport());
    surface.stroke_line(55.0, 0.0, 55.0, 600.0, 1.0, C_CROSSHAIR);
    for row in 0..60 {
        assert_eq!(surface.cell(5, row), Some(C_CROSSHAIR), "row {row}");
    }
    assert_eq!(surface.cell(4, 30), None);
}

#[test]
fn clear_empties_the_buffer() {
    let mut surface = TerminalSurface::new(viewport());
    surface.fill_rect(0.0, 0.0, 400.0, 600.0, C_BACKGROUND);
    surface.clear();
    assert_eq!(surface.cell(10, 10), None);
}

#[test]
fn full_frame_presents_to_writer() -> std::io::Result<()> {
    let mut state = make_state();
    add_enemy(&mut state, 100.0, 100.0);
    fire(&mut state);

    let mut surface = TerminalSurface::new(viewport());
    render(&mut surface, &state);
    assert_eq!(surface.cell(10, 10), Some(C_ENEMY));
    assert_eq!(surface.cell(0, 0), Some(C_BACKGROUND));

    let mut out: Vec<u8> = Vec::new();
    surface.present(&mut out)?;
    let text = String::from_utf8_lossy(&out);
    assert_eq!(text.matches('█').count(), 40 * 60);
    Ok(())
}
