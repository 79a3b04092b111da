use std::{fmt, str::FromStr};

use crate::foundation::error::{StackError, StackResult};

/// Pixel dimensions of an image or canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size value. Zero dimensions are allowed here; constructors that need positive
    /// extents validate on their own.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of bytes needed for a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> StackResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| {
                StackError::resource_exhausted(format!(
                    "rgba8 buffer size overflow for {}x{}",
                    self.width, self.height
                ))
            })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Straight-alpha RGBA8 color used for canvas backgrounds and cell padding.
///
/// Serialized as a `#RRGGBB` or `#RRGGBBAA` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the default background.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Build an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels in `[r, g, b, a]` order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from `[r, g, b, a]`.
    pub const fn from_array(px: [u8; 4]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgba8 {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        fn hex_byte(pair: &str) -> StackResult<u8> {
            u8::from_str_radix(pair, 16).map_err(|_| {
                StackError::invalid_argument(format!("invalid hex byte \"{pair}\" in color"))
            })
        }

        if !hex.is_ascii() {
            return Err(StackError::invalid_argument(format!(
                "color \"{s}\" must be #RRGGBB or #RRGGBBAA"
            )));
        }
        match hex.len() {
            6 => Ok(Self::opaque(
                hex_byte(&hex[0..2])?,
                hex_byte(&hex[2..4])?,
                hex_byte(&hex[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&hex[0..2])?,
                g: hex_byte(&hex[2..4])?,
                b: hex_byte(&hex[4..6])?,
                a: hex_byte(&hex[6..8])?,
            }),
            _ => Err(StackError::invalid_argument(format!(
                "color \"{s}\" must be #RRGGBB or #RRGGBBAA"
            ))),
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = StackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_string()
    }
}

/// Target width:height ratio for strip canvases, both terms positive integers.
///
/// Kept as an exact rational so canvas-growth decisions never depend on float rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

impl AspectRatio {
    /// Create a validated ratio; both terms must be non-zero.
    pub fn new(width: u32, height: u32) -> StackResult<Self> {
        if width == 0 || height == 0 {
            return Err(StackError::invalid_argument(format!(
                "aspect ratio terms must be > 0, got {width}:{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width term.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Height term.
    pub fn height(self) -> u32 {
        self.height
    }

    /// Ratio as a float, for logging only.
    pub fn as_f64(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed =
            || StackError::invalid_argument(format!("aspect ratio \"{s}\" must look like W:H"));
        let (w, h) = s.trim().split_once(':').ok_or_else(malformed)?;
        let w = w.trim().parse::<u32>().map_err(|_| malformed())?;
        let h = h.trim().parse::<u32>().map_err(|_| malformed())?;
        Self::new(w, h)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = StackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
