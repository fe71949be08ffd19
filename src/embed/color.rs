use crate::error::BuildError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses exactly six hex digits (`rrggbb`), with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, BuildError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BuildError::InvalidHexColor {
                value: hex.to_string(),
            });
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
            _ => Err(BuildError::InvalidHexColor {
                value: hex.to_string(),
            }),
        }
    }

    /// The color packed as `0xRRGGBB`, which is what the `color` key expects (in decimal).
    #[must_use]
    pub fn to_discord(self) -> u32 {
        let r = u32::from(self.r);
        let g = u32::from(self.g);
        let b = u32::from(self.b);
        (r << 16) | (g << 8) | b
    }
}
