//! Box-drawing character sets and junction merging logic.

// ─── CharSet ─────────────────────────────────────────────────────────────────

/// Which character set to use for box-drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharSet {
    #[default]
    Unicode,
    Ascii,
}

impl CharSet {
    pub fn from_unicode(unicode: bool) -> Self {
        if unicode {
            CharSet::Unicode
        } else {
            CharSet::Ascii
        }
    }
}

// ─── BoxChars ────────────────────────────────────────────────────────────────

/// Characters for one box outline plus the arrowheads used by edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub arrow_right: char,
    pub arrow_down: char,
}

impl BoxChars {
    pub fn unicode() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
            arrow_right: '►',
            arrow_down: '▼',
        }
    }

    pub fn ascii() -> Self {
        Self {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '-',
            vertical: '|',
            arrow_right: '>',
            arrow_down: 'v',
        }
    }

    pub fn for_charset(cs: CharSet) -> Self {
        match cs {
            CharSet::Unicode => Self::unicode(),
            CharSet::Ascii => Self::ascii(),
        }
    }

    /// Replace the outline characters, keeping the arrowheads.
    pub fn with_outline(mut self, corners: [char; 4], horizontal: char, vertical: char) -> Self {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ] = corners;
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }
}

// ─── Arms ────────────────────────────────────────────────────────────────────

/// Which arms of a junction cell are active, as a 4-bit set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Arms(u8);

const UP: u8 = 0b0001;
const DOWN: u8 = 0b0010;
const LEFT: u8 = 0b0100;
const RIGHT: u8 = 0b1000;

/// Unicode glyph for every arm set with two or more arms.
const JUNCTIONS: [(u8, char); 11] = [
    (LEFT | RIGHT, '─'),
    (UP | DOWN, '│'),
    (DOWN | RIGHT, '┌'),
    (DOWN | LEFT, '┐'),
    (UP | RIGHT, '└'),
    (UP | LEFT, '┘'),
    (UP | DOWN | RIGHT, '├'),
    (UP | DOWN | LEFT, '┤'),
    (DOWN | LEFT | RIGHT, '┬'),
    (UP | LEFT | RIGHT, '┴'),
    (UP | DOWN | LEFT | RIGHT, '┼'),
];

impl Arms {
    pub fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        let bit = |on: bool, b: u8| if on { b } else { 0 };
        Self(bit(up, UP) | bit(down, DOWN) | bit(left, LEFT) | bit(right, RIGHT))
    }

    /// Decode a line character into its arms. Returns None for anything else.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Self(LEFT | RIGHT)),
            '|' => Some(Self(UP | DOWN)),
            '+' => Some(Self(UP | DOWN | LEFT | RIGHT)),
            _ => JUNCTIONS
                .iter()
                .find(|(_, glyph)| *glyph == c)
                .map(|(bits, _)| Self(*bits)),
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Line character for these arms. A lone arm draws as a full straight
    /// line; ASCII collapses every junction to `+`.
    pub fn to_char(self, cs: CharSet) -> char {
        let vertical = self.0 & (UP | DOWN) != 0;
        let horizontal = self.0 & (LEFT | RIGHT) != 0;
        match (cs, vertical, horizontal) {
            (_, false, false) => ' ',
            (CharSet::Ascii, true, false) => '|',
            (CharSet::Ascii, false, true) => '-',
            (CharSet::Ascii, true, true) => '+',
            (CharSet::Unicode, true, false) => '│',
            (CharSet::Unicode, false, true) => '─',
            (CharSet::Unicode, true, true) => JUNCTIONS
                .iter()
                .find(|(bits, _)| *bits == self.0)
                .map_or('┼', |(_, glyph)| *glyph),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_charset.rs"]
mod tests;
