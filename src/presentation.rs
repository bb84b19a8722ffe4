//! Mapping of die faces to what the user sees.

use std::fmt;

/// Unicode die faces for ⚀ through ⚅.
pub const DICE_FACES: [char; 6] = ['⚀', '⚁', '⚂', '⚃', '⚄', '⚅'];

/// What the animated die element currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSymbol {
    Glyph(char),
    Numeral(u32),
    /// Shown before the first roll of a die that has no glyphs.
    Unknown,
}

impl fmt::Display for FaceSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceSymbol::Glyph(c) => write!(f, "{}", c),
            FaceSymbol::Numeral(n) => write!(f, "{}", n),
            FaceSymbol::Unknown => write!(f, "?"),
        }
    }
}

/// Symbol for `face` on a die with `sides` sides.
///
/// Glyphs are only used when the whole die fits in 1..=6, so a D8 landing
/// on 3 still shows the numeral.
pub fn face_symbol(face: u32, sides: u32) -> FaceSymbol {
    if sides as usize <= DICE_FACES.len() {
        if let Some(&glyph) = face.checked_sub(1).and_then(|i| DICE_FACES.get(i as usize)) {
            return FaceSymbol::Glyph(glyph);
        }
    }
    FaceSymbol::Numeral(face)
}

/// Symbol shown after the side count changes and before anything is rolled.
pub fn idle_symbol(sides: u32) -> FaceSymbol {
    if sides as usize <= DICE_FACES.len() {
        FaceSymbol::Glyph(DICE_FACES[0])
    } else {
        FaceSymbol::Unknown
    }
}

/// Label attached to `face`, if the user wrote anything besides whitespace.
pub fn label_for_face(labels: &[String], face: u32) -> Option<&str> {
    let index = face.checked_sub(1)? as usize;
    labels
        .get(index)
        .map(String::as_str)
        .filter(|label| !label.trim().is_empty())
}
