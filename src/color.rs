use serde::{Deserialize, Serialize};

/// Color of a block, a block circle or an intersection circle.
///
/// `None` marks a position without a block and never matches a real color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    None,
    Red,
    Blue,
    Yellow,
    Green,
    Black,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::None,
        Color::Red,
        Color::Blue,
        Color::Yellow,
        Color::Green,
        Color::Black,
    ];

    /// Whether this color stands for an actual block.
    pub fn is_block(self) -> bool {
        self != Color::None
    }

    /// Single-letter form used by the board sketches (`O` for no block).
    pub fn letter(self) -> char {
        match self {
            Color::None => 'O',
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Black => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|color| color.letter() == c.to_ascii_uppercase())
    }

    pub(crate) fn fill(self) -> &'static str {
        match self {
            Color::None => "#ffffff",
            Color::Red => "#ff8080",
            Color::Blue => "#8080ff",
            Color::Yellow => "#ffff80",
            Color::Green => "#80ff80",
            Color::Black => "#404040",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip_and_none_is_not_a_block() {
        for color in Color::ALL {
            assert_eq!(Color::from_letter(color.letter()), Some(color));
        }
        assert_eq!(Color::from_letter('k'), Some(Color::Black));
        assert_eq!(Color::from_letter('x'), None);
        assert!(!Color::None.is_block());
        assert!(Color::Black.is_block());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Color::Yellow).unwrap(), "\"yellow\"");
        let c: Color = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(c, Color::None);
    }
}
