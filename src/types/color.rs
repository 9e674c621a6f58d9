//! RGB color selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// An RGB color with red, green, and blue components (0-255 each).
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub(crate) red: u8,
    pub(crate) green: u8,
    pub(crate) blue: u8,
}

impl Color {
    /// Create a color with the given RGB values.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    fn named(name: &str) -> Option<Self> {
        match name {
            "r" | "red" => Some(Self::rgb(255, 0, 0)),
            "g" | "green" => Some(Self::rgb(0, 255, 0)),
            "b" | "blue" => Some(Self::rgb(0, 0, 255)),
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse a named color (`r`, `g`, `b`, `red`, `green`, `blue`) or a
    /// comma-separated triple.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    /// use wizctl::Color;
    ///
    /// assert_eq!(Color::from_str("green").unwrap(), Color::rgb(0, 255, 0));
    /// assert_eq!(Color::from_str("255,128,0").unwrap(), Color::rgb(255, 128, 0));
    /// assert!(Color::from_str("256,0,0").is_err());
    /// assert!(Color::from_str("1,2").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Error> {
        if let Some(color) = Self::named(s) {
            return Ok(color);
        }

        let parts = s
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidColorString(s.to_string()))?;

        match parts[..] {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            _ => Err(Error::InvalidColorString(s.to_string())),
        }
    }
}
