// Character-cell composition of a frame, independent of the terminal backend.

use crate::domain::{Direction, Frame, Position};
use crossterm::style::Color;

const THREAT_GLYPH: char = 'V';
const GROUND_GLYPH: char = '_';
const EXPLOSION_GLYPH: char = '*';
const AIM_LENGTH: i32 = 4;
const CONTROLS: &str = "A/D=Move | W/Q/E/Z/C=Dir | SPACE=Fire | X=Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        color: Color::Reset,
    };
}

/// Fixed-size grid of cells; writes outside the grid are clipped.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn put(&mut self, x: i32, y: i32, ch: char, color: Color) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell { ch, color };
        }
    }

    pub fn text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        for (offset, ch) in (0..).zip(text.chars()) {
            self.put(x + offset, y, ch, color);
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn row_text(&self, y: usize) -> String {
        self.rows()
            .nth(y)
            .map(|row| row.iter().map(|cell| cell.ch).collect())
            .unwrap_or_default()
    }
}

pub fn direction_glyph(direction: Direction) -> char {
    match direction {
        Direction::Straight => '|',
        Direction::DiagonalLeft => '\\',
        Direction::DiagonalRight => '/',
        Direction::HorizontalLeft => '<',
        Direction::HorizontalRight => '>',
    }
}

pub fn compose(frame: &Frame) -> Canvas {
    let layout = frame.layout;
    let mut canvas = Canvas::blank(layout.width as usize, layout.height as usize);
    let ground = layout.ground_line();

    for x in 0..layout.width {
        canvas.put(x, ground, GROUND_GLYPH, Color::Green);
    }

    for threat in frame.threats.iter().filter(|p| layout.contains(**p)) {
        canvas.put(threat.x, threat.y, THREAT_GLYPH, Color::Red);
    }

    for rocket in frame.interceptors.iter().filter(|r| layout.contains(r.position)) {
        let Position { x, y } = rocket.position;
        canvas.put(x, y, direction_glyph(rocket.direction), Color::Yellow);
    }

    draw_battery(&mut canvas, frame);
    draw_explosions(&mut canvas, frame);
    draw_hud(&mut canvas, frame);
    canvas.text(0, layout.height - 1, CONTROLS, Color::White);
    canvas
}

fn draw_battery(canvas: &mut Canvas, frame: &Frame) {
    let layout = frame.layout;
    let ground = layout.ground_line();
    let x = frame.battery.x;

    if x > 0 && x < layout.width - 1 {
        canvas.text(x - 1, ground, "/^\\", Color::Cyan);
    } else {
        canvas.put(x, ground, '^', Color::Cyan);
    }

    let (dx, dy) = frame.battery.aim.velocity();
    let glyph = direction_glyph(frame.battery.aim);
    for step in 1..=AIM_LENGTH {
        let cell = Position::new(x + dx * step, ground + dy * step);
        if layout.contains(cell) {
            canvas.put(cell.x, cell.y, glyph, Color::Blue);
        }
    }
}

fn draw_explosions(canvas: &mut Canvas, frame: &Frame) {
    let layout = frame.layout;
    for explosion in frame.explosions.iter().filter(|e| layout.contains(e.position)) {
        let Position { x, y } = explosion.position;
        // Center plus the four neighbours that stay on the playfield.
        let cross = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]
            .map(|(dx, dy)| Position::new(x + dx, y + dy));
        for cell in cross.into_iter().filter(|c| layout.contains(*c)) {
            canvas.put(cell.x, cell.y, EXPLOSION_GLYPH, Color::Magenta);
        }
    }
}

fn bar(filled: usize, width: usize) -> String {
    (0..width)
        .map(|i| if i < filled { '=' } else { ' ' })
        .collect()
}

fn draw_hud(canvas: &mut Canvas, frame: &Frame) {
    let metrics = &frame.metrics;
    let width = frame.layout.width;
    let remaining = metrics.total.saturating_sub(metrics.handled());

    let status = format!(
        "Score:{:<6} Diff:{:<6} Time:{:>3}s Left:{:<3}",
        metrics.score, frame.difficulty, metrics.elapsed_secs, remaining
    );
    canvas.text(0, 0, &status, Color::White);

    let launchers = frame.launchers.len();
    let loaded = frame.loaded_launchers();
    let bar_x = 58;
    let bar_width: i32 = if width > 60 { width / 5 } else { 12 };
    if bar_x + 2 + bar_width + 8 < width {
        let filled = if launchers > 0 {
            loaded * bar_width as usize / launchers
        } else {
            0
        };
        let rockets = format!(
            "Rockets:[{}] {}/{}",
            bar(filled, bar_width as usize),
            loaded,
            launchers
        );
        canvas.text(bar_x, 0, &rockets, Color::White);
    }

    let accuracy = metrics.accuracy();
    let acc_width = usize::try_from(if width > 40 { width / 4 } else { 18 }).unwrap_or(18);
    let acc_filled = ((accuracy / 100.0) * acc_width as f64) as usize;
    let acc = format!(
        "Acc:[{}] {:>3.0}%",
        bar(acc_filled.min(acc_width), acc_width),
        accuracy
    );
    canvas.text(0, 1, &acc, Color::White);

    let info_x = 12 + acc_width as i32;
    let info = if info_x + 30 < width {
        format!(
            "Hits:{} Shots:{}  Streak:{}/{}  Kills:{} Ground:{}",
            metrics.shots_hit,
            metrics.shots_fired,
            metrics.current_streak,
            metrics.best_streak,
            metrics.destroyed,
            metrics.reached
        )
    } else {
        format!(
            "H:{} S:{} Stk:{}",
            metrics.shots_hit, metrics.shots_fired, metrics.current_streak
        )
    };
    canvas.text(info_x, 1, &info, Color::White);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Battery, Explosion, InterceptorSnapshot, Launcher, Layout, RunMetrics};

    fn frame() -> Frame {
        let layout = Layout::default();
        let mut launchers: Vec<Launcher> = (0..4).map(Launcher::empty).collect();
        launchers[0].load(Direction::Straight);
        Frame {
            difficulty: "Easy",
            layout,
            metrics: RunMetrics::new(30),
            battery: Battery {
                x: 60,
                aim: Direction::DiagonalRight,
            },
            launchers,
            threats: vec![Position::new(10, 5)],
            interceptors: vec![InterceptorSnapshot {
                position: Position::new(20, 12),
                direction: Direction::HorizontalLeft,
            }],
            explosions: vec![Explosion {
                position: Position::new(40, 10),
                frames_left: 3,
            }],
        }
    }

    #[test]
    fn entities_land_on_their_cells() {
        let canvas = compose(&frame());
        assert_eq!(canvas.cell(10, 5).map(|c| c.ch), Some('V'));
        assert_eq!(canvas.cell(20, 12).map(|c| c.ch), Some('<'));
        for (x, y) in [(40, 10), (39, 10), (41, 10), (40, 9), (40, 11)] {
            assert_eq!(canvas.cell(x, y).map(|c| c.ch), Some('*'));
        }
    }

    #[test]
    fn battery_sits_on_the_ground_with_aim_indicator() {
        let canvas = compose(&frame());
        let ground = Layout::default().ground_line() as usize;
        let row = canvas.row_text(ground);
        assert_eq!(&row[59..62], "/^\\");
        assert!(row.starts_with("____"));
        for step in 1..=4 {
            assert_eq!(canvas.cell(60 + step, ground - step).map(|c| c.ch), Some('/'));
        }
    }

    #[test]
    fn hud_and_controls_are_drawn() {
        let canvas = compose(&frame());
        assert!(canvas.row_text(0).starts_with("Score:0"));
        assert!(canvas.row_text(0).contains("Rockets:["));
        assert!(canvas.row_text(0).contains("1/4"));
        assert!(canvas.row_text(1).starts_with("Acc:["));
        assert!(canvas.row_text(31).starts_with(CONTROLS));
    }

    #[test]
    fn writes_outside_the_grid_are_clipped() {
        let mut canvas = Canvas::blank(4, 2);
        canvas.put(-1, 0, 'x', Color::Red);
        canvas.put(4, 1, 'x', Color::Red);
        canvas.text(2, 1, "abc", Color::Red);
        assert_eq!(canvas.row_text(0), "    ");
        assert_eq!(canvas.row_text(1), "  ab");
    }
}
