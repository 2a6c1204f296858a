//! Premultiplied linear-space color.
//!
//! All rendering math (interpolation, coverage multiply, compositing)
//! happens in linear premultiplied RGBA; sRGB only appears at the edges,
//! when parsing config values and when encoding raster output.

use std::fmt;
use std::str::FromStr;

use palette::{FromColor, LinSrgba, Srgba};
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Linear premultiplied RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must be #rrggbb or #rrggbbaa: {0:?}")]
    BadLength(String),
    #[error("invalid hex digits in color: {0:?}")]
    BadHex(String),
}

impl Color {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Create from sRGB u8 components (premultiplied in linear space).
    pub fn from_srgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let s = Srgba::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let Some(hex) = s.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(s.to_string()));
        };

        let byte = |i: usize| {
            u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| ColorParseError::BadHex(s.to_string()))
        };

        match hex.len() {
            6 => Ok(Self::from_srgba_u8(byte(0)?, byte(1)?, byte(2)?, 255)),
            8 => Ok(Self::from_srgba_u8(byte(0)?, byte(1)?, byte(2)?, byte(3)?)),
            _ => Err(ColorParseError::BadLength(s.to_string())),
        }
    }

    /// Scale all channels, e.g. by an antialiasing coverage factor.
    /// Valid on premultiplied color only.
    pub fn scaled(&self, f: f32) -> Self {
        Self {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
            a: self.a * f,
        }
    }

    /// Encode back to sRGB u8 RGBA (unpremultiplied).
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };

        let srgb: Srgba = Srgba::from_color(LinSrgba::new(r, g, b, self.a));

        [
            (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Hex form for serialization; alpha digits included only when not opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_srgba_u8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a color string like \"#rrggbb\" or \"#rrggbbaa\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Color, E> {
                Color::from_hex(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}
