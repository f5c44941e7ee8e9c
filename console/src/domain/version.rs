//! Optimistic-concurrency version token.

use std::fmt;

/// Non-negative record version echoed back on every mutating call.
///
/// # Examples
/// ```
/// use console::domain::Version;
///
/// assert_eq!(Version::new(7).if_match(), "W/\"7\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version(u64);

impl Version {
    /// Wrap a raw version number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw version number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Weak entity tag sent in the `If-Match` header.
    #[must_use]
    pub fn if_match(self) -> String {
        format!("W/\"{}\"", self.0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "W/\"0\"")]
    #[case(3, "W/\"3\"")]
    #[case(1_024, "W/\"1024\"")]
    fn if_match_is_a_weak_tag(#[case] raw: u64, #[case] expected: &str) {
        assert_eq!(Version::new(raw).if_match(), expected);
    }
}
