//! Limits applied while decoding untrusted input.
//!
//! Byte-strings and counted vectors carry their length on the wire. Decoding a
//! length that is absurdly large for the surrounding protocol is not a wire
//! error, so callers narrow the accepted lengths with a [RangeCfg].

use crate::Error;
use core::ops::{Bound, RangeBounds};

/// An accepted range of decoded lengths.
///
/// # Examples
///
/// ```
/// use alephium_codec::RangeCfg;
///
/// let cfg = RangeCfg::new(0..=1024);
/// assert!(cfg.contains(&500));
/// assert!(!cfg.contains(&2000));
///
/// // The default accepts any length
/// assert!(RangeCfg::default().contains(&usize::MAX));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg {
    start: Bound<usize>,
    end: Bound<usize>,
}

impl RangeCfg {
    /// Creates a new `RangeCfg` from any range of lengths.
    pub fn new(r: impl RangeBounds<usize>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Creates a `RangeCfg` that only accepts exactly `len`.
    pub fn exact(len: usize) -> Self {
        Self {
            start: Bound::Included(len),
            end: Bound::Included(len),
        }
    }

    /// Returns true if `len` is within this range.
    pub fn contains(&self, len: &usize) -> bool {
        match self.start {
            Bound::Included(s) if *len < s => return false,
            Bound::Excluded(s) if *len <= s => return false,
            _ => {}
        }
        match self.end {
            Bound::Included(e) if *len > e => return false,
            Bound::Excluded(e) if *len >= e => return false,
            _ => {}
        }
        true
    }

    /// Returns [Error::InvalidLength] if `len` falls outside this range.
    pub fn check(&self, len: usize) -> Result<(), Error> {
        if !self.contains(&len) {
            return Err(Error::InvalidLength(len));
        }
        Ok(())
    }
}

impl Default for RangeCfg {
    fn default() -> Self {
        Self::new(..)
    }
}

impl RangeBounds<usize> for RangeCfg {
    fn start_bound(&self) -> Bound<&usize> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&usize> {
        self.end.as_ref()
    }
}

macro_rules! impl_from_range {
    ($($range:ty),*) => {
        $(
            impl From<$range> for RangeCfg {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}

impl_from_range!(
    core::ops::Range<usize>,
    core::ops::RangeInclusive<usize>,
    core::ops::RangeFrom<usize>,
    core::ops::RangeTo<usize>,
    core::ops::RangeToInclusive<usize>,
    core::ops::RangeFull
);

#[cfg(test)]
mod tests {
    use super::*;
    use core::ops::Bound::{Excluded, Included, Unbounded};

    #[test]
    fn test_range_cfg_from() {
        let cfg: RangeCfg = (..).into();
        assert_eq!(
            cfg,
            RangeCfg {
                start: Unbounded,
                end: Unbounded
            }
        );

        let cfg: RangeCfg = (5..10).into();
        assert_eq!(
            cfg,
            RangeCfg {
                start: Included(5),
                end: Excluded(10)
            }
        );

        let cfg: RangeCfg = (..=10).into();
        assert_eq!(
            cfg,
            RangeCfg {
                start: Unbounded,
                end: Included(10)
            }
        );
    }

    #[test]
    fn test_range_cfg_contains() {
        let cfg = RangeCfg::default();
        assert!(cfg.contains(&0));
        assert!(cfg.contains(&usize::MAX));

        let cfg: RangeCfg = (5..10).into();
        assert!(!cfg.contains(&4));
        assert!(cfg.contains(&5));
        assert!(cfg.contains(&9));
        assert!(!cfg.contains(&10));

        let cfg = RangeCfg::exact(3);
        assert!(!cfg.contains(&2));
        assert!(cfg.contains(&3));
        assert!(!cfg.contains(&4));
    }

    #[test]
    fn test_range_cfg_check() {
        let cfg: RangeCfg = (..=16).into();
        assert!(cfg.check(16).is_ok());
        assert_eq!(cfg.check(17), Err(Error::InvalidLength(17)));
    }
}
