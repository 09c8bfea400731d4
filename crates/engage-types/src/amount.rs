use serde::{Deserialize, Serialize};
use std::fmt;

/// Token amount in indivisible base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn from_base_units(units: u64) -> Self {
        Self(units)
    }

    pub fn to_base_units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(&self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(&self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_arithmetic() {
        let a = TokenAmount::from_base_units(30);
        let b = TokenAmount::from_base_units(10);

        assert_eq!(a.checked_add(b), Some(TokenAmount::from_base_units(40)));
        assert_eq!(a.checked_sub(b), Some(TokenAmount::from_base_units(20)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(b.saturating_sub(a), TokenAmount::ZERO);
    }

    #[test]
    fn test_overflow_guard() {
        let max = TokenAmount::from_base_units(u64::MAX);
        assert_eq!(max.checked_add(TokenAmount::from_base_units(1)), None);
    }

    #[test]
    fn test_zero() {
        assert!(TokenAmount::ZERO.is_zero());
        assert!(!TokenAmount::from_base_units(1).is_zero());
    }
}
