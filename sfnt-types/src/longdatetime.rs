//! a datetime type

/// A simple datetime type.
///
/// This represented as a number of seconds since 12:00 midnight, January 1, 1904, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LongDateTime(i64);

impl LongDateTime {
    /// Seconds between the 1904 epoch and the unix epoch.
    const UNIX_EPOCH_DELTA: i64 = 2_082_844_800;

    /// Create with a number of seconds relative to 1904-01-01 00:00.
    pub const fn new(secs: i64) -> Self {
        Self(secs)
    }

    /// The number of seconds since 00:00 1904-01-01, UTC.
    ///
    /// This can be a negative number, which presumably represents a date prior
    /// to the reference date.
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// The number of seconds since the unix epoch, saturating on overflow.
    pub const fn to_unix_secs(&self) -> i64 {
        self.0.saturating_sub(Self::UNIX_EPOCH_DELTA)
    }
}

crate::newtype_scalar!(LongDateTime, [u8; 8]);
