use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The fixed palette a new note draws its color from.
pub const PALETTE: [NoteColor; 3] = [NoteColor::Yellow, NoteColor::Blue, NoteColor::Pink];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteColor {
    Yellow,
    Blue,
    Pink,
}

impl NoteColor {
    /// Uniform pick from [`PALETTE`].
    pub fn random<R: Rng>(rng: &mut R) -> NoteColor {
        PALETTE[rng.random_range(0..PALETTE.len())]
    }

    /// Marker string used in the persisted record.
    pub const fn marker(self) -> &'static str {
        match self {
            NoteColor::Yellow => "note-yellow",
            NoteColor::Blue => "note-blue",
            NoteColor::Pink => "note-pink",
        }
    }

    /// Palette lookup in priority order yellow, blue, pink. Unknown markers
    /// yield `None` rather than a default color.
    pub fn from_marker(raw: &str) -> Option<NoteColor> {
        match raw {
            "note-yellow" | "yellow" => Some(NoteColor::Yellow),
            "note-blue" | "blue" => Some(NoteColor::Blue),
            "note-pink" | "pink" => Some(NoteColor::Pink),
            _ => None,
        }
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    #[serde(with = "color_marker", default)]
    pub color: Option<NoteColor>,
}

impl Note {
    pub fn new(text: impl Into<String>, color: NoteColor) -> Note {
        Note {
            text: text.into(),
            color: Some(color),
        }
    }
}

/// A colorless note is written as `""` and any unrecognized marker reads
/// back as colorless.
mod color_marker {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::NoteColor;

    pub fn serialize<S: Serializer>(color: &Option<NoteColor>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(color.map_or("", NoteColor::marker))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NoteColor>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(NoteColor::from_marker))
    }
}
