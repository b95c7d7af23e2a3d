//! Canvas — 2D character grid for painting the text preview.

use super::charset::{Arms, BoxChars, CharSet};

// ─── Rect ────────────────────────────────────────────────────────────────────

/// A rectangle in character-grid coordinates. `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn center_x(&self) -> usize {
        self.x + self.width / 2
    }

    pub fn center_y(&self) -> usize {
        self.y + self.height / 2
    }
}

// ─── Canvas ──────────────────────────────────────────────────────────────────

/// A 2D character grid used as a painting surface.
///
/// Line cells also carry an `Arms` mask, so crossing lines join from the arms
/// actually drawn rather than from whatever glyph the cell shows.
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pub charset: CharSet,
    cells: Vec<Vec<char>>,
    arms: Vec<Vec<Arms>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, charset: CharSet) -> Self {
        Self {
            width,
            height,
            charset,
            cells: vec![vec![' '; width]; height],
            arms: vec![vec![Arms::default(); width]; height],
        }
    }

    pub fn get(&self, col: usize, row: usize) -> char {
        if row < self.height && col < self.width {
            self.cells[row][col]
        } else {
            ' '
        }
    }

    /// Write `ch`, resetting the cell's mask to the arms the glyph draws.
    pub fn set(&mut self, col: usize, row: usize, ch: char) {
        if row < self.height && col < self.width {
            self.cells[row][col] = ch;
            self.arms[row][col] = Arms::from_char(ch).unwrap_or_default();
        }
    }

    /// OR `arms` into the cell's mask and redraw the junction glyph.
    pub fn merge_arms(&mut self, col: usize, row: usize, arms: Arms) {
        if row >= self.height || col >= self.width {
            return;
        }
        let merged = self.arms[row][col].merge(arms);
        self.arms[row][col] = merged;
        self.cells[row][col] = merged.to_char(self.charset);
    }

    /// Draw an orthogonal path through `points`. Segment ends only carry the
    /// arm pointing into the segment, so bends come out as corners.
    pub fn polyline(&mut self, points: &[(usize, usize)]) {
        for pair in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if y0 == y1 {
                let (lo, hi) = (x0.min(x1), x0.max(x1));
                for col in lo..=hi {
                    self.merge_arms(col, y0, Arms::new(false, false, col > lo, col < hi));
                }
            } else if x0 == x1 {
                let (lo, hi) = (y0.min(y1), y0.max(y1));
                for row in lo..=hi {
                    self.merge_arms(x0, row, Arms::new(row > lo, row < hi, false, false));
                }
            }
        }
    }

    /// Blank out a rectangle.
    pub fn clear(&mut self, rect: Rect) {
        for row in rect.y..rect.bottom() {
            for col in rect.x..rect.right() {
                self.set(col, row, ' ');
            }
        }
    }

    /// Draw a box outline using the given characters.
    pub fn draw_box(&mut self, rect: Rect, bc: &BoxChars) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);
        self.set(x0, y0, bc.top_left);
        self.set(x1, y0, bc.top_right);
        self.set(x0, y1, bc.bottom_left);
        self.set(x1, y1, bc.bottom_right);
        for col in (x0 + 1)..x1 {
            self.set(col, y0, bc.horizontal);
            self.set(col, y1, bc.horizontal);
        }
        for row in (y0 + 1)..y1 {
            self.set(x0, row, bc.vertical);
            self.set(x1, row, bc.vertical);
        }
    }

    /// Write a string starting at (col, row), clipped at the right edge.
    pub fn write_str(&mut self, col: usize, row: usize, s: &str) {
        if row >= self.height {
            return;
        }
        for (i, ch) in s.chars().enumerate() {
            let c = col + i;
            if c >= self.width {
                break;
            }
            self.set(c, row, ch);
        }
    }

    /// Render the canvas to a string, trimming trailing whitespace per line.
    pub fn render_to_string(&self) -> String {
        let mut lines: Vec<String> = self
            .cells
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_canvas.rs"]
mod tests;
