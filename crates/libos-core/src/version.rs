//! Semantic version value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `major.minor.patch` version.
///
/// Ordering is lexicographic on `(major, minor, patch)`: `1.9.0 < 2.0.0`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    /// Patch level, or the build number on Windows.
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses `"major.minor.patch"` leniently.
    ///
    /// Never fails: parsing stops at the first character that is neither a
    /// digit nor the expected `.` separator, and every field read up to that
    /// point is kept.  Missing fields are zero.
    ///
    /// ```
    /// use libos_core::Version;
    ///
    /// assert_eq!(Version::parse("5.15.0-91-generic"), Version::new(5, 15, 0));
    /// assert_eq!(Version::parse("23.1"), Version::new(23, 1, 0));
    /// assert_eq!(Version::parse("1.2x.9"), Version::new(1, 2, 0));
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut fields = [0u32; 3];
        let mut chars = text.chars().peekable();
        for field in fields.iter_mut() {
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                *field = field.saturating_mul(10).saturating_add(digit);
                chars.next();
            }
            if chars.next() != Some('.') {
                break;
            }
        }
        let [major, minor, patch] = fields;
        Self::new(major, minor, patch)
    }
}

impl From<&str> for Version {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_version() {
        assert_eq!(Version::parse("10.0.22631"), Version::new(10, 0, 22631));
    }

    #[test]
    fn test_parse_keeps_fields_before_bad_character() {
        assert_eq!(Version::parse("6.8.0-45-generic"), Version::new(6, 8, 0));
        assert_eq!(Version::parse("5.4rc1"), Version::new(5, 4, 0));
        assert_eq!(Version::parse("3-beta"), Version::new(3, 0, 0));
        assert_eq!(Version::parse("v1.2.3"), Version::default());
    }

    #[test]
    fn test_parse_short_and_empty_input() {
        assert_eq!(Version::parse("14"), Version::new(14, 0, 0));
        assert_eq!(Version::parse("14.5"), Version::new(14, 5, 0));
        assert_eq!(Version::parse(""), Version::new(0, 0, 0));
    }

    #[test]
    fn test_parse_ignores_trailing_fields() {
        assert_eq!(Version::parse("1.2.3.4"), Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_saturates_instead_of_overflowing() {
        assert_eq!(Version::parse("99999999999").major, u32::MAX);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        // 1.9.0 has the larger minor but the smaller major.
        assert!(Version::new(1, 9, 0) < Version::new(2, 0, 0));
        assert!(Version::new(2, 0, 9) < Version::new(2, 1, 0));
        assert!(Version::new(2, 1, 0) <= Version::new(2, 1, 0));
        assert!(Version::new(3, 0, 0) > Version::new(2, 99, 99));
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(13, 6, 1).to_string(), "13.6.1");
        assert_eq!(Version::from("7").to_string(), "7.0.0");
    }
}
