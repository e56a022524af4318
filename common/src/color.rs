//! 色指定（gerbvに渡す `#RRGGBB` / `#RRGGBBAA` 形式）

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// `None` はアルファ指定なし（`#RRGGBB`）
    pub a: Option<u8>,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// 定数テーブル用。不正な文字列はコンパイル時に弾く。
    pub const fn hex(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() == 7 || bytes.len() == 9);
        assert!(bytes[0] == b'#');
        let r = hex_byte(bytes[1], bytes[2]);
        let g = hex_byte(bytes[3], bytes[4]);
        let b = hex_byte(bytes[5], bytes[6]);
        if bytes.len() == 9 {
            Self::rgba(r, g, b, hex_byte(bytes[7], bytes[8]))
        } else {
            Self::rgb(r, g, b)
        }
    }
}

const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

const fn hex_byte(hi: u8, lo: u8) -> u8 {
    hex_digit(hi) * 16 + hex_digit(lo)
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| (d.len() == 6 || d.len() == 8) && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| Error::Color(s.to_string()))?;

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::Color(s.to_string()))
        };

        let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
        if digits.len() == 8 {
            Ok(Self::rgba(r, g, b, channel(6)?))
        } else {
            Ok(Self::rgb(r, g, b))
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if let Some(a) = self.a {
            write!(f, "{:02X}", a)?;
        }
        Ok(())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
