use crate::timeline::Channel;
use std::fmt;
use thiserror::Error;

/// Which render surface a fault belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Background,
    Hero,
    Tile(u32),
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::Background => write!(f, "background"),
            SurfaceKind::Hero => write!(f, "hero"),
            SurfaceKind::Tile(id) => write!(f, "tile #{}", id),
        }
    }
}

#[derive(Debug, Error)]
pub enum FolioError {
    /// Graphics context or shader program could not be created.
    #[error("{surface} surface unavailable: {reason}")]
    ResourceAcquisition { surface: SurfaceKind, reason: String },

    /// An image asset failed to load; the tile falls back to a placeholder.
    #[error("asset {path} failed to load: {reason}")]
    AssetLoad { path: String, reason: String },

    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

/// Malformed keyframe tables and pin regions. Raised at construction.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TimelineError {
    #[error("{channel}: interval [{start}, {end}] is inverted")]
    InvertedInterval { channel: Channel, start: f32, end: f32 },

    #[error("{channel}: interval [{start}, {end}] lies outside [0, 1]")]
    IntervalOutOfRange { channel: Channel, start: f32, end: f32 },

    #[error("{channel}: segment starting at {start} overlaps the previous one")]
    OverlappingSegments { channel: Channel, start: f32 },

    #[error("{channel}: no initial value declared")]
    MissingInitialValue { channel: Channel },

    #[error("{channel}: non-finite keyframe value")]
    NonFiniteValue { channel: Channel },

    #[error("pin distance must be positive, got {0}")]
    InvalidPinDistance(f32),
}
