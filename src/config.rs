//! Configuration for the layout engine and the text preview.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::syntax::types::Direction;

pub const DEFAULT_HORIZONTAL_SPACING: f64 = 250.0;
pub const DEFAULT_VERTICAL_SPACING: f64 = 150.0;

// ─── LayoutDirection ─────────────────────────────────────────────────────────

/// Which axis levels advance along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    /// Levels grow downward (`y`), siblings spread along `x`.
    #[default]
    TopDown,
    /// Levels grow rightward (`x`), siblings spread along `y`.
    LeftRight,
}

impl LayoutDirection {
    pub fn is_horizontal(self) -> bool {
        self == LayoutDirection::LeftRight
    }
}

impl From<Direction> for LayoutDirection {
    /// Horizontal Mermaid directions lay out left-to-right, vertical ones
    /// top-down. Levels always grow away from the roots, so `RL` collapses to
    /// `LR` and `BT` to `TD`.
    fn from(dir: Direction) -> Self {
        if dir.is_horizontal() {
            LayoutDirection::LeftRight
        } else {
            LayoutDirection::TopDown
        }
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayoutDirection::TopDown => "TD",
            LayoutDirection::LeftRight => "LR",
        })
    }
}

impl FromStr for LayoutDirection {
    type Err = String;

    /// Accepts every Mermaid direction keyword, collapsed as in
    /// `From<Direction>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TD" | "TB" | "BT" => Ok(LayoutDirection::TopDown),
            "LR" | "RL" => Ok(LayoutDirection::LeftRight),
            other => Err(format!("unknown direction '{other}'; use TD, TB, BT, LR or RL")),
        }
    }
}

// ─── LayoutConfig ────────────────────────────────────────────────────────────

/// Spacing and orientation for the auto-layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between neighbouring nodes in a level (top-down), or between
    /// levels (left-right).
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub direction: LayoutDirection,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            direction: LayoutDirection::TopDown,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizontal_spacing(mut self, spacing: f64) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    pub fn with_vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// `(x, y)` for the `index`-th node of `level`.
    pub fn position(&self, level: usize, index: usize) -> (f64, f64) {
        let (level, index) = (level as f64, index as f64);
        match self.direction {
            LayoutDirection::TopDown => (
                index * self.horizontal_spacing,
                level * self.vertical_spacing,
            ),
            LayoutDirection::LeftRight => (
                level * self.horizontal_spacing,
                index * self.vertical_spacing,
            ),
        }
    }
}

// ─── RenderConfig ────────────────────────────────────────────────────────────

/// Configuration for the text preview.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Use Unicode box-drawing characters (true) or plain ASCII (false).
    pub unicode: bool,
    /// Padding inside node boxes (in characters).
    pub padding: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            unicode: true,
            padding: 1,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
