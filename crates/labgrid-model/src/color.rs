//! Cell colors and the process palette.

use crate::error::{Error, Result};

/// Minimum palette length accepted by [`Palette::new`].
pub const MIN_PALETTE_LEN: usize = 5;

/// An opaque 24-bit color, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Rgb(pub u32);

impl Rgb {
    pub const RED: Self = Self(0xff0000);
    pub const YELLOW: Self = Self(0xffff00);
    pub const GREEN: Self = Self(0x00ff00);
    pub const BLUE: Self = Self(0x0000ff);
    pub const MAGENTA: Self = Self(0xff00ff);

    /// Red, green, blue channels in 0..=255.
    pub const fn channels(self) -> [u8; 3] {
        [
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        ]
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xff_ffff)
    }
}

/// Ordered list of colors indexed by process (z) coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>"))]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette of at least [`MIN_PALETTE_LEN`] distinct colors.
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.len() < MIN_PALETTE_LEN {
            return Err(Error::PaletteTooSmall(colors.len()));
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(Error::PaletteDuplicate(*color));
            }
        }
        Ok(Self { colors })
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least [`MIN_PALETTE_LEN`] colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a process coordinate, cycling through the palette.
    #[inline]
    pub fn color_for(&self, z: usize) -> Rgb {
        self.colors[z % self.colors.len()]
    }

    /// The colors in palette order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![Rgb::RED, Rgb::YELLOW, Rgb::GREEN, Rgb::BLUE, Rgb::MAGENTA],
        }
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = Error;

    fn try_from(colors: Vec<Rgb>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack() {
        assert_eq!(Rgb(0x123456).channels(), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Rgb::MAGENTA.to_string(), "#ff00ff");
        assert_eq!(Rgb(0xab).to_string(), "#0000ab");
    }

    #[test]
    fn default_palette_is_valid() {
        let palette = Palette::default();
        assert_eq!(Palette::new(palette.colors().to_vec()), Ok(palette));
    }

    #[test]
    fn color_cycles_with_palette_length() {
        let palette = Palette::default();
        let p = palette.len();
        for z in 0..20 {
            assert_eq!(palette.color_for(z), palette.color_for(z + p));
        }
        assert_eq!(palette.color_for(0), Rgb::RED);
        assert_eq!(palette.color_for(4), Rgb::MAGENTA);
        assert_eq!(palette.color_for(5), Rgb::RED);
    }

    #[test]
    fn short_palette_rejected() {
        let err = Palette::new(vec![Rgb::RED, Rgb::BLUE]).unwrap_err();
        assert_eq!(err, Error::PaletteTooSmall(2));
    }

    #[test]
    fn duplicate_color_rejected() {
        let colors = vec![Rgb::RED, Rgb::YELLOW, Rgb::GREEN, Rgb::BLUE, Rgb::RED];
        assert_eq!(Palette::new(colors), Err(Error::PaletteDuplicate(Rgb::RED)));
    }
}
