use std::fmt;

use crate::foundation::error::{RastelError, RastelResult};

/// Channel format of a pixel or of a whole buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelMode {
    /// One bit per pixel, on or off.
    Bit,
    /// Single luminance channel.
    L,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, straight (non-premultiplied) alpha.
    Rgba,
}

impl PixelMode {
    /// Number of byte channels a pixel of this mode carries (Bit counts as one).
    pub fn channel_count(self) -> usize {
        match self {
            Self::Bit | Self::L => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bit => "bitpixel",
            Self::L => "L",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for PixelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single on/off pixel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BitPixel(pub bool);

impl BitPixel {
    pub const ON: Self = Self(true);
    pub const OFF: Self = Self(false);

    pub fn value(self) -> bool {
        self.0
    }
}

/// A luminance (grayscale intensity) pixel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct L(pub u8);

impl L {
    pub fn value(self) -> u8 {
        self.0
    }

    /// Build from a wide integer, rejecting values outside `0..=255`.
    pub fn checked(value: i64) -> RastelResult<Self> {
        Ok(Self(channel(value, "luminance")?))
    }
}

/// An RGB pixel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub fn checked(r: i64, g: i64, b: i64) -> RastelResult<Self> {
        Ok(Self {
            r: channel(r, "red")?,
            g: channel(g, "green")?,
            b: channel(b, "blue")?,
        })
    }

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> RastelResult<Self> {
        let (r, g, b, a) = parse_hex(hex)?;
        if a.is_some() {
            return Err(RastelError::InvalidHexCode(format!(
                "'{hex}' carries an alpha component; use Rgba::from_hex"
            )));
        }
        Ok(Self { r, g, b })
    }

    pub fn luminance(self) -> u8 {
        luminance(self.r, self.g, self.b)
    }
}

/// An RGBA pixel with straight alpha; `a == 0` is fully transparent.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn checked(r: i64, g: i64, b: i64, a: i64) -> RastelResult<Self> {
        Ok(Self {
            r: channel(r, "red")?,
            g: channel(g, "green")?,
            b: channel(b, "blue")?,
            a: channel(a, "alpha")?,
        })
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`; missing alpha means opaque.
    pub fn from_hex(hex: &str) -> RastelResult<Self> {
        let (r, g, b, a) = parse_hex(hex)?;
        Ok(Self {
            r,
            g,
            b,
            a: a.unwrap_or(255),
        })
    }

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Any pixel. Buffers hold pixels of exactly one variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Pixel {
    Bit(BitPixel),
    L(L),
    Rgb(Rgb),
    Rgba(Rgba),
}

impl Pixel {
    pub const fn bit(on: bool) -> Self {
        Self::Bit(BitPixel(on))
    }

    pub const fn l(value: u8) -> Self {
        Self::L(L(value))
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::Rgba(Rgba::new(r, g, b, a))
    }

    pub fn mode(self) -> PixelMode {
        match self {
            Self::Bit(_) => PixelMode::Bit,
            Self::L(_) => PixelMode::L,
            Self::Rgb(_) => PixelMode::Rgb,
            Self::Rgba(_) => PixelMode::Rgba,
        }
    }

    /// Build a pixel of `mode` from wide channel values.
    ///
    /// Bit takes one channel that must be 0 (off), 1 or 255 (on); every other mode takes
    /// exactly [`PixelMode::channel_count`] values in `0..=255`.
    pub fn from_channels(mode: PixelMode, channels: &[i64]) -> RastelResult<Self> {
        if channels.len() != mode.channel_count() {
            return Err(RastelError::invalid_pixel_value(format!(
                "{mode} pixel takes {} channel(s), got {}",
                mode.channel_count(),
                channels.len()
            )));
        }
        Ok(match mode {
            PixelMode::Bit => match channels[0] {
                0 => Self::bit(false),
                1 | 255 => Self::bit(true),
                v => {
                    return Err(RastelError::invalid_pixel_value(format!(
                        "bit pixel value must be 0, 1 or 255, got {v}"
                    )));
                }
            },
            PixelMode::L => Self::L(L::checked(channels[0])?),
            PixelMode::Rgb => Self::Rgb(Rgb::checked(channels[0], channels[1], channels[2])?),
            PixelMode::Rgba => Self::Rgba(Rgba::checked(
                channels[0],
                channels[1],
                channels[2],
                channels[3],
            )?),
        })
    }

    /// Opacity of the pixel; alpha-less modes are fully opaque.
    pub fn alpha(self) -> u8 {
        match self {
            Self::Rgba(p) => p.a,
            _ => 255,
        }
    }

    pub fn luminance(self) -> u8 {
        match self {
            Self::Bit(b) => {
                if b.0 {
                    255
                } else {
                    0
                }
            }
            Self::L(l) => l.0,
            Self::Rgb(p) => p.luminance(),
            Self::Rgba(p) => p.rgb().luminance(),
        }
    }

    /// Explicit widening/narrowing to RGBA. Single channels are broadcast.
    pub fn to_rgba(self) -> Rgba {
        match self {
            Self::Bit(_) | Self::L(_) => {
                let v = self.luminance();
                Rgba::new(v, v, v, 255)
            }
            Self::Rgb(p) => Rgba::new(p.r, p.g, p.b, 255),
            Self::Rgba(p) => p,
        }
    }

    /// Convert into `mode`.
    ///
    /// Rgba to Rgb drops alpha, color to L applies the 601-2 luma weights, anything to Bit
    /// thresholds luminance at 128.
    pub fn convert(self, mode: PixelMode) -> Self {
        if self.mode() == mode {
            return self;
        }
        match mode {
            PixelMode::Bit => Self::bit(self.luminance() >= 128),
            PixelMode::L => Self::l(self.luminance()),
            PixelMode::Rgb => Self::Rgb(self.to_rgba().rgb()),
            PixelMode::Rgba => Self::Rgba(self.to_rgba()),
        }
    }

    /// Per-channel complement; alpha is preserved.
    pub fn inverted(self) -> Self {
        match self {
            Self::Bit(b) => Self::bit(!b.0),
            Self::L(l) => Self::l(255 - l.0),
            Self::Rgb(p) => Self::rgb(255 - p.r, 255 - p.g, 255 - p.b),
            Self::Rgba(p) => Self::rgba(255 - p.r, 255 - p.g, 255 - p.b, p.a),
        }
    }

    /// Byte channels in mode order; Bit is 0 or 255.
    pub(crate) fn channels(self) -> [u8; 4] {
        match self {
            Self::Bit(_) | Self::L(_) => [self.luminance(), 0, 0, 0],
            Self::Rgb(p) => [p.r, p.g, p.b, 0],
            Self::Rgba(p) => [p.r, p.g, p.b, p.a],
        }
    }

    /// Inverse of [`Pixel::channels`]; extra entries are ignored.
    pub(crate) fn from_bytes(mode: PixelMode, c: [u8; 4]) -> Self {
        match mode {
            PixelMode::Bit => Self::bit(c[0] >= 128),
            PixelMode::L => Self::l(c[0]),
            PixelMode::Rgb => Self::rgb(c[0], c[1], c[2]),
            PixelMode::Rgba => Self::rgba(c[0], c[1], c[2], c[3]),
        }
    }
}

impl From<BitPixel> for Pixel {
    fn from(p: BitPixel) -> Self {
        Self::Bit(p)
    }
}

impl From<L> for Pixel {
    fn from(p: L) -> Self {
        Self::L(p)
    }
}

impl From<Rgb> for Pixel {
    fn from(p: Rgb) -> Self {
        Self::Rgb(p)
    }
}

impl From<Rgba> for Pixel {
    fn from(p: Rgba) -> Self {
        Self::Rgba(p)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bit(b) => write!(f, "BitPixel({})", b.0),
            Self::L(l) => write!(f, "L({})", l.0),
            Self::Rgb(p) => write!(f, "Rgb({}, {}, {})", p.r, p.g, p.b),
            Self::Rgba(p) => write!(f, "Rgba({}, {}, {}, {})", p.r, p.g, p.b, p.a),
        }
    }
}

fn channel(value: i64, name: &str) -> RastelResult<u8> {
    u8::try_from(value).map_err(|_| {
        RastelError::invalid_pixel_value(format!("{name} channel must be 0..=255, got {value}"))
    })
}

/// ITU-R 601-2 luma, rounded.
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let sum = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    ((sum + 500) / 1000) as u8
}

fn parse_hex(hex: &str) -> RastelResult<(u8, u8, u8, Option<u8>)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let bad = || RastelError::InvalidHexCode(hex.to_string());
    if !digits.is_ascii() {
        return Err(bad());
    }

    let nibble = |c: u8| -> RastelResult<u8> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(bad)
    };

    let bytes = digits.as_bytes();
    let mut out = Vec::with_capacity(4);
    match bytes.len() {
        3 | 4 => {
            for &c in bytes {
                out.push(nibble(c)? * 17);
            }
        }
        6 | 8 => {
            for pair in bytes.chunks_exact(2) {
                out.push(nibble(pair[0])? * 16 + nibble(pair[1])?);
            }
        }
        _ => return Err(bad()),
    }
    Ok((out[0], out[1], out[2], out.get(3).copied()))
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/model.rs"]
mod tests;
