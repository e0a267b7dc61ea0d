//! Keystone: a single-screen push-and-gravity puzzle. Push stones and boxes,
//! collect keys to open locks, and let unsupported blocks fall.

pub mod game;
pub mod grid;
pub mod input;
pub mod level;
pub mod player;
pub mod theme;
pub mod tile;
pub mod ui;
