//! Monochrome bitmap font used for text overlays.
//!
//! Each glyph is a list of rows where `#` marks a set pixel and any other
//! character is blank. All rows of a glyph have the same length.

pub struct Glyph {
    rows: &'static [&'static str],
}

impl Glyph {
    pub fn width(&self) -> u32 {
        self.rows.first().map(|row| row.len() as u32).unwrap_or(0)
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn is_set(&self, col: u32, row: u32) -> bool {
        self.rows
            .get(row as usize)
            .and_then(|r| r.as_bytes().get(col as usize))
            .is_some_and(|&cell| cell == b'#')
    }
}

/// Line height used when text contains `'\n'`.
pub const LINE_HEIGHT: u32 = 13;

static CRAB: Glyph = Glyph {
    rows: &[
        ".#............#.",
        "##............##",
        "#.#..........#.#",
        "###..........###",
        ".#...#....#...#.",
        ".#..##....##..#.",
        "..############..",
        "...##########...",
        "..############..",
        ".#.#.#....#.#.#.",
        "#..#.#....#.#..#",
        "...#........#...",
    ],
};

static SPACE: Glyph = Glyph {
    rows: &[
        "....", "....", "....", "....", "....", "....", "....", "....", "....", "....",
    ],
};

// Shown for any character the font has no bitmap for.
static MISSING: Glyph = Glyph {
    rows: &[
        "######", "#....#", "#....#", "#....#", "#....#", "#....#", "#....#", "#....#",
        "#....#", "######",
    ],
};

pub fn glyph(c: char) -> &'static Glyph {
    match c {
        '🦀' => &CRAB,
        ' ' => &SPACE,
        _ => &MISSING,
    }
}
