//! Transition orientation for dot navigation.
//!
//! Arrow navigation never consults this module: `next` is always forward and
//! `prev` always backward, whatever the wraparound.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared::{domain::Direction, error::CarouselError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionMode {
    /// Raw index difference. Jumping from the last dot to the first slides backward.
    #[default]
    Linear,
    /// Shortest path around the ring.
    Circular,
}

impl DirectionMode {
    pub fn resolve(self, prev: usize, next: usize, len: usize) -> Direction {
        match self {
            DirectionMode::Linear => resolve(prev, next),
            DirectionMode::Circular => resolve_circular(prev, next, len),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DirectionMode::Linear => "linear",
            DirectionMode::Circular => "circular",
        }
    }
}

impl FromStr for DirectionMode {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "legacy" => Ok(DirectionMode::Linear),
            "circular" => Ok(DirectionMode::Circular),
            other => Err(CarouselError::UnknownDirectionMode(other.to_string())),
        }
    }
}

/// `sign(next - prev)`.
pub fn resolve(prev: usize, next: usize) -> Direction {
    Direction::from_ordering(next.cmp(&prev))
}

/// Sign of `((next - prev + n/2) mod n) - n/2`.
///
/// On even rings the exact half-way target is equidistant both ways; that
/// tie falls back to the linear sign so two-item carousels still slide both ways.
pub fn resolve_circular(prev: usize, next: usize, len: usize) -> Direction {
    if len == 0 || prev == next {
        return Direction::None;
    }

    let n = len as i64;
    let half = n / 2;
    let delta = next as i64 - prev as i64;
    if n % 2 == 0 && delta.rem_euclid(n) == half {
        return resolve(prev, next);
    }

    Direction::from_sign((delta + half).rem_euclid(n) - half)
}
