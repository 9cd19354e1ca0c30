//! Inputs to a resolution attempt: quality selector, deadline, request.

use crate::error::{MdlError, Result};
use std::time::{Duration, Instant};

/// Audio quality selector understood by the resolution service.
///
/// 0 = best available, 1 = 128kbps MP3/AAC, 2 = 320kbps MP3/AAC,
/// 3 = 16bit 44.1kHz, 4 = 24bit ≤96kHz, 5 = 24bit ≤192kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QualityLevel(u8);

impl QualityLevel {
    pub const BEST: QualityLevel = QualityLevel(0);
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self> {
        if level > Self::MAX {
            return Err(MdlError::invalid_input(format!(
                "quality must be between 0 and {}, got {level}",
                Self::MAX
            )));
        }
        Ok(QualityLevel(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for QualityLevel {
    type Error = MdlError;

    fn try_from(level: u8) -> Result<Self> {
        QualityLevel::new(level)
    }
}

/// Absolute point in time after which a pending job counts as timed out.
///
/// Captured once; every check reads the clock fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    pub fn after(timeout: Duration) -> Self {
        Self::at(Instant::now() + timeout)
    }

    /// Deadline `minutes` + `seconds` from now.
    pub fn from_parts(minutes: u64, seconds: u64) -> Self {
        let total = Duration::from_secs(minutes.saturating_mul(60).saturating_add(seconds));
        Self::after(total)
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Time left before expiry; zero once expired.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn instant(&self) -> Instant {
        self.at
    }
}

/// What to resolve, at which quality, and until when.
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    source_url: String,
    quality: QualityLevel,
    deadline: Deadline,
}

impl ResolutionRequest {
    pub fn new(source_url: impl Into<String>, quality: QualityLevel, deadline: Deadline) -> Self {
        Self {
            source_url: source_url.into(),
            quality,
            deadline,
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn quality(&self) -> QualityLevel {
        self.quality
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }
}
