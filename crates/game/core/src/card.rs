//! Card identity and attributes.
//!
//! Cards never record who holds them; ownership is positional (which
//! container, deck, discard pile or hand, currently holds the card).

use std::fmt;

/// Stable unique identifier of one physical card in the deck.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card color. `Wild` is only carried by unplayed wild cards.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Wild,
}

impl Color {
    /// The four colors a player may hold or choose.
    pub const SUITS: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    pub const fn is_wild(self) -> bool {
        matches!(self, Color::Wild)
    }
}

/// Card face value.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Value {
    #[strum(serialize = "0")]
    #[cfg_attr(feature = "serde", serde(rename = "0"))]
    Zero,
    #[strum(serialize = "1")]
    #[cfg_attr(feature = "serde", serde(rename = "1"))]
    One,
    #[strum(serialize = "2")]
    #[cfg_attr(feature = "serde", serde(rename = "2"))]
    Two,
    #[strum(serialize = "3")]
    #[cfg_attr(feature = "serde", serde(rename = "3"))]
    Three,
    #[strum(serialize = "4")]
    #[cfg_attr(feature = "serde", serde(rename = "4"))]
    Four,
    #[strum(serialize = "5")]
    #[cfg_attr(feature = "serde", serde(rename = "5"))]
    Five,
    #[strum(serialize = "6")]
    #[cfg_attr(feature = "serde", serde(rename = "6"))]
    Six,
    #[strum(serialize = "7")]
    #[cfg_attr(feature = "serde", serde(rename = "7"))]
    Seven,
    #[strum(serialize = "8")]
    #[cfg_attr(feature = "serde", serde(rename = "8"))]
    Eight,
    #[strum(serialize = "9")]
    #[cfg_attr(feature = "serde", serde(rename = "9"))]
    Nine,
    #[strum(serialize = "skip")]
    #[cfg_attr(feature = "serde", serde(rename = "skip"))]
    Skip,
    #[strum(serialize = "reverse")]
    #[cfg_attr(feature = "serde", serde(rename = "reverse"))]
    Reverse,
    #[strum(serialize = "draw_two")]
    #[cfg_attr(feature = "serde", serde(rename = "draw_two"))]
    DrawTwo,
    #[strum(serialize = "wild")]
    #[cfg_attr(feature = "serde", serde(rename = "wild"))]
    Wild,
    #[strum(serialize = "wild_draw_four")]
    #[cfg_attr(feature = "serde", serde(rename = "wild_draw_four"))]
    WildDrawFour,
}

impl Value {
    /// Returns true for `Wild` and `WildDrawFour`.
    pub const fn is_wild(self) -> bool {
        matches!(self, Value::Wild | Value::WildDrawFour)
    }
}

/// A single card.
///
/// Immutable except that a played wild card's `color` is rewritten to the
/// color its player chose.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardId,
    pub color: Color,
    pub value: Value,
}

impl Card {
    pub fn new(id: impl Into<CardId>, color: Color, value: Value) -> Self {
        Self {
            id: id.into(),
            color,
            value,
        }
    }

    pub const fn is_wild(&self) -> bool {
        self.value.is_wild()
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.color, self.value, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_names_match_wire_names() {
        assert_eq!(Value::Seven.to_string(), "7");
        assert_eq!(Value::DrawTwo.as_ref(), "draw_two");
        assert_eq!("wild_draw_four".parse::<Value>(), Ok(Value::WildDrawFour));
        assert_eq!("RED".parse::<Color>(), Ok(Color::Red));
    }

    #[test]
    fn wild_classification() {
        assert!(Value::Wild.is_wild());
        assert!(Value::WildDrawFour.is_wild());
        assert!(!Value::DrawTwo.is_wild());
        assert!(Color::Wild.is_wild());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_with_wire_names() {
        let card = Card::new("red-draw_two-1", Color::Red, Value::DrawTwo);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "red-draw_two-1", "color": "red", "value": "draw_two"})
        );
    }
}
