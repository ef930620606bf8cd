//! Component masks
//!
//! Every entity slot owns a [`Mask`] with one bit per registered component
//! type. A set bit means the entity currently owns a live instance of that
//! component. Systems build a required mask by OR-ing the bits they need and
//! visit an entity iff all of them are present.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Maximum number of component types a single world can register
pub const MAX_COMPONENT_TYPES: usize = 64;

/// Fixed-width component bitset
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    /// Mask with no bits set
    pub const EMPTY: Self = Self(0);

    /// Mask with exactly one bit set
    ///
    /// # Panics
    /// Panics if `bit` is not below [`MAX_COMPONENT_TYPES`].
    pub const fn bit(bit: u8) -> Self {
        assert!((bit as usize) < MAX_COMPONENT_TYPES, "component bit out of range");
        Self(1 << bit)
    }

    /// Raw bits
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Set a bit
    pub fn set(&mut self, bit: u8) {
        self.0 |= Self::bit(bit).0;
    }

    /// Clear a bit
    pub fn clear(&mut self, bit: u8) {
        self.0 &= !Self::bit(bit).0;
    }

    /// Test a single bit
    pub const fn test(self, bit: u8) -> bool {
        self.0 & Self::bit(bit).0 != 0
    }

    /// True if every bit of `required` is also set in `self`
    pub const fn contains(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// True if `self` and `other` share at least one bit
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True if no bit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of set bits
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the indices of the set bits, lowest first
    pub fn iter_bits(self) -> impl Iterator<Item = u8> {
        let mut remaining = self.0;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let bit = remaining.trailing_zeros();
            remaining &= remaining - 1;
            u8::try_from(bit).ok()
        })
    }
}

impl BitOr for Mask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Mask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Mask {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({:#b})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_requires_all_bits() {
        let mut mask = Mask::EMPTY;
        mask.set(0);
        mask.set(3);
        mask.set(7);

        assert!(mask.contains(Mask::bit(0) | Mask::bit(3)));
        assert!(!mask.contains(Mask::bit(0) | Mask::bit(4)));
        assert!(mask.contains(Mask::EMPTY));
    }

    #[test]
    fn test_set_and_clear() {
        let mut mask = Mask::EMPTY;
        mask.set(5);
        assert!(mask.test(5));
        mask.clear(5);
        assert!(!mask.test(5));
        assert!(mask.is_empty());
    }

    #[test]
    fn test_iter_bits_lowest_first() {
        let mask = Mask::bit(9) | Mask::bit(1) | Mask::bit(63);
        let bits: Vec<u8> = mask.iter_bits().collect();
        assert_eq!(bits, vec![1, 9, 63]);
        assert_eq!(mask.count(), 3);
    }

    #[test]
    fn test_intersects() {
        let a = Mask::bit(2) | Mask::bit(4);
        assert!(a.intersects(Mask::bit(4)));
        assert!(!a.intersects(Mask::bit(5)));
    }
}
