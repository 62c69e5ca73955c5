use std::fmt::Display;

use crate::PlaylistError;

/// A video resolution in the `widthxheight` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parses a `widthxheight` pair, both sides positive integers.
    pub fn parse(raw: &str) -> Result<Self, PlaylistError> {
        let malformed = || PlaylistError::MalformedScalar {
            attribute: "RESOLUTION",
            value: raw.to_owned(),
        };

        let (width, height) = raw.trim().split_once('x').ok_or_else(malformed)?;
        let width: u32 = width.parse().map_err(|_| malformed())?;
        let height: u32 = height.parse().map_err(|_| malformed())?;

        if width == 0 || height == 0 {
            return Err(malformed());
        }

        Ok(Self { width, height })
    }

    /// Total number of pixels.
    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// The progressive name, the height with a `P` suffix.
    pub fn progressive_name(&self) -> String {
        format!("{}P", self.height)
    }

    pub fn to_m3u8(&self) -> String {
        format!("RESOLUTION={}", self)
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
