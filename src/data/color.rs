//! Per-vertex color arrays.

use rgb::{RGB8, RGBA8};

use crate::error::{Result, ViewerError};

/// Scalar storage of a color array.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValues {
    /// 8-bit integer channels.
    U8(Vec<u8>),
    /// Floating point channels, either normalized or in the 8-bit range.
    F32(Vec<f32>),
}

impl ColorValues {
    /// Returns the number of scalar values.
    fn len(&self) -> usize {
        match self {
            ColorValues::U8(v) => v.len(),
            ColorValues::F32(v) => v.len(),
        }
    }
}

/// Per-vertex color array as stored by an authoring mesh.
///
/// Values are laid out flat, `channels` scalars per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorArray {
    /// Channels per entry, 3 (RGB) or 4 (RGBA).
    channels: usize,
    /// Values.
    values: ColorValues,
}

impl ColorArray {
    /// Creates a new `ColorArray`, checking the layout.
    pub fn new(channels: usize, values: ColorValues) -> Result<Self> {
        let len = values.len();
        if !(channels == 3 || channels == 4) || len % channels != 0 {
            return Err(ViewerError::InvalidColorLayout { channels, len });
        }
        Ok(Self { channels, values })
    }

    /// Creates a 4-channel 8-bit array.
    pub fn from_rgba8(colors: &[RGBA8]) -> Self {
        let values = colors.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect();
        Self {
            channels: 4,
            values: ColorValues::U8(values),
        }
    }

    /// Creates a 3-channel 8-bit array.
    pub fn from_rgb8(colors: &[RGB8]) -> Self {
        let values = colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
        Self {
            channels: 3,
            values: ColorValues::U8(values),
        }
    }

    /// Returns the channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the scalar storage.
    pub fn values(&self) -> &ColorValues {
        &self.values
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len() / self.channels
    }

    /// Returns whether the array has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses a `#rrggbb` color.
pub fn parse_hex_color(s: &str) -> Option<RGB8> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGB8::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Formats a color as `#rrggbb`.
pub fn format_hex_color(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_layouts() {
        assert!(ColorArray::new(2, ColorValues::U8(vec![0; 4])).is_err());
        assert!(ColorArray::new(3, ColorValues::F32(vec![0.0; 4])).is_err());
        let ok = ColorArray::new(4, ColorValues::U8(vec![0; 8])).unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#cccccc"), Some(RGB8::new(0xcc, 0xcc, 0xcc)));
        assert_eq!(parse_hex_color("ff8000"), Some(RGB8::new(255, 128, 0)));
        assert_eq!(parse_hex_color("#ff80"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(format_hex_color(RGB8::new(1, 2, 255)), "#0102ff");
    }
}
