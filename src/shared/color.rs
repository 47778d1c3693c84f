use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Display color of a line, parsed from a `#rrggbb` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?.as_bytes();
        if hex.len() != 6 {
            return None;
        }
        let mut channels = [0u8; 3];
        for (channel, pair) in channels.iter_mut().zip(hex.chunks(2)) {
            *channel = hex_digit(pair[0])? * 16 + hex_digit(pair[1])?;
        }
        Some(Self::new(channels[0], channels[1], channels[2]))
    }
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(ColorVisitor)
    }
}

struct ColorVisitor;

impl Visitor<'_> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a color in #rrggbb format")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Color::from_hex(value).ok_or_else(|| E::custom(format!("invalid color: {value}")))
    }
}

#[test]
fn parse_hex_test() {
    assert_eq!(Color::from_hex("#0067ac"), Some(Color::new(0, 103, 172)));
    assert_eq!(Color::from_hex("#FF00ff"), Some(Color::new(255, 0, 255)));
}

#[test]
fn parse_unparse_hex_test() {
    let color = Color::from_hex("#8899aa").unwrap();
    assert_eq!(color.to_string(), "#8899aa");
}

#[test]
fn invalid_hex_test_1() {
    assert!(Color::from_hex("0067ac").is_none());
}

#[test]
fn invalid_hex_test_2() {
    assert!(Color::from_hex("#0067a").is_none());
}

#[test]
fn invalid_hex_test_3() {
    assert!(Color::from_hex("#0067ag").is_none());
}
