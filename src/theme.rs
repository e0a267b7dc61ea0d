//! Theme loading: tile palette plus btop-style `theme[key]="value"` overrides.

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Tile and UI colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub tile_flux: Color,
    pub tile_wall: Color,
    pub tile_stone: Color,
    pub tile_box: Color,
    /// Key and lock kind 1.
    pub key_yellow: Color,
    /// Key and lock kind 2.
    pub key_blue: Color,
    pub player: Color,
    /// Board background (Air and the player marker are left this colour).
    pub bg: Color,
    /// Border.
    pub div_line: Color,
    /// Status text.
    pub main_fg: Color,
    pub title: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// The classic palette.
    pub fn classic() -> Self {
        Self {
            tile_flux: Color::Rgb(0xcc, 0xff, 0xcc),
            tile_wall: Color::Rgb(0x99, 0x99, 0x99),
            tile_stone: Color::Rgb(0x00, 0x00, 0xcc),
            tile_box: Color::Rgb(0x8b, 0x45, 0x13),
            key_yellow: Color::Rgb(0xff, 0xcc, 0x00),
            key_blue: Color::Rgb(0x00, 0xcc, 0xff),
            player: Color::Rgb(0xff, 0x00, 0x00),
            bg: Color::Rgb(0x1e, 0x1e, 0x1e),
            div_line: Color::Rgb(0x3f, 0x44, 0x4f),
            main_fg: Color::Rgb(0xab, 0xb2, 0xbf),
            title: Color::Rgb(0xe5, 0xc0, 0x7b),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to the classic palette if path is None or the file does not exist;
    /// keys that are absent or unparsable keep their classic colour.
    pub fn load(path: Option<&Path>) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(path)?;
        Ok(Self::from_map(&parse_theme_file(&s)))
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).and_then(|v| parse_hex(v).ok());
        let base = Self::classic();
        Self {
            tile_flux: get("flux").unwrap_or(base.tile_flux),
            tile_wall: get("wall").unwrap_or(base.tile_wall),
            tile_stone: get("stone").unwrap_or(base.tile_stone),
            tile_box: get("box").unwrap_or(base.tile_box),
            key_yellow: get("key1").unwrap_or(base.key_yellow),
            key_blue: get("key2").unwrap_or(base.key_blue),
            player: get("player").unwrap_or(base.player),
            bg: get("main_bg").or_else(|| get("meter_bg")).unwrap_or(base.bg),
            div_line: get("div_line").unwrap_or(base.div_line),
            main_fg: get("main_fg").unwrap_or(base.main_fg),
            title: get("title").unwrap_or(base.title),
        }
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .ok_or_else(invalid)
    };
    match s.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(invalid()),
    }
}
