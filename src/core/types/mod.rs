//! # Core Types Module
//!
//! Small value types shared across the crate.
//!
//! * `Percentage` - A percentage value between 0.0 and 100.0
//! * `ByteSize` - A size in bytes with unit conversions
//!
//! ## Example
//!
//! ```rust
//! use thermal_bench::core::types::ByteSize;
//!
//! let size = ByteSize::new(1024 * 1024);
//! assert_eq!(size.as_mb(), 1.0);
//! ```

use serde::{Deserialize, Serialize};

/// Represents a percentage value between 0.0 and 100.0
///
/// # Examples
///
/// ```rust
/// use thermal_bench::core::types::Percentage;
///
/// let p = Percentage::new(75.0).unwrap();
/// assert_eq!(p.as_f64(), 75.0);
///
/// // Values outside 0-100 range return None
/// assert!(Percentage::new(150.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// Creates a new Percentage from a value between 0 and 100
    /// Returns None if the value is outside the valid range
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=100.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a percentage in a const context; the caller keeps it within 0-100
    pub const fn from_f64_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// Create a new percentage value, clamping it to the range 0.0-100.0
    pub fn from_f64(value: f64) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    /// Returns the percentage value as a float
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

/// Represents a size in bytes with convenient conversion methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteSize(u64);

impl ByteSize {
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn from_kb(kb: u64) -> Self {
        Self(kb * 1024)
    }

    pub fn as_bytes(&self) -> u64 {
        self.0
    }

    pub fn as_kb(&self) -> f64 {
        self.0 as f64 / 1024.0
    }

    pub fn as_mb(&self) -> f64 {
        self.as_kb() / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bounds() {
        assert!(Percentage::new(-1.0).is_none());
        assert_eq!(Percentage::new(100.0).map(|p| p.as_f64()), Some(100.0));
        assert_eq!(Percentage::from_f64(120.0).as_f64(), 100.0);
        assert_eq!(Percentage::from_f64(60.0).to_string(), "60%");
    }

    #[test]
    fn test_byte_size_conversions() {
        let size = ByteSize::from_kb(512);
        assert_eq!(size.as_bytes(), 524_288);
        assert_eq!(size.as_kb(), 512.0);
        assert_eq!(size.as_mb(), 0.5);
    }
}
