//! Clock metadata.

use std::fmt;
use std::num::NonZeroU64;

use ctf_ir::Name;

const NS_PER_SEC: u64 = 1_000_000_000;
const NS_PER_SEC_SIGNED: i64 = 1_000_000_000;

const DEFAULT_FREQ: NonZeroU64 = match NonZeroU64::new(NS_PER_SEC) {
    Some(freq) => freq,
    None => NonZeroU64::MIN,
};

/// 128-bit clock UUID. The nil UUID means "no UUID".
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockUuid(u128);

impl ClockUuid {
    pub const NIL: ClockUuid = ClockUuid(0);

    #[inline]
    pub const fn from_u128(value: u128) -> Self {
        ClockUuid(value)
    }

    /// UUID from its 16 bytes in network order.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        ClockUuid(u128::from_be_bytes(bytes))
    }

    #[inline]
    pub const fn as_u128(self) -> u128 {
        self.0
    }

    #[inline]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ClockUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0.to_be_bytes();
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-\
             {:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7], b[8], b[9], b[10], b[11], b[12],
            b[13], b[14], b[15]
        )
    }
}

impl fmt::Debug for ClockUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockUuid({self})")
    }
}

/// A key under which two clocks from different traces are "the same
/// clock". One clock may carry both kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClockIdentity {
    /// Absolute clocks are matched by name.
    Absolute(Name),
    Uuid(ClockUuid),
}

/// A clock described by a trace's metadata.
///
/// Built with [`Clock::new`] and the `with_*` methods; read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    name: Name,
    uuid: ClockUuid,
    absolute: bool,
    offset_s: i64,
    offset: i64,
    freq: NonZeroU64,
    precision: u64,
    description: Option<String>,
}

impl Clock {
    /// A 1 GHz clock with no UUID and zero offset.
    pub fn new(name: Name) -> Self {
        Clock {
            name,
            uuid: ClockUuid::NIL,
            absolute: false,
            offset_s: 0,
            offset: 0,
            freq: DEFAULT_FREQ,
            precision: 0,
            description: None,
        }
    }

    #[must_use]
    pub fn with_uuid(mut self, uuid: ClockUuid) -> Self {
        self.uuid = uuid;
        self
    }

    /// Mark the clock as absolute: it is then matched across traces by name.
    #[must_use]
    pub fn with_absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    /// Offset from the origin, whole seconds part.
    #[must_use]
    pub fn with_offset_s(mut self, offset_s: i64) -> Self {
        self.offset_s = offset_s;
        self
    }

    /// Offset from the origin in nanoseconds, added to `offset_s`.
    #[must_use]
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_freq(mut self, freq: NonZeroU64) -> Self {
        self.freq = freq;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u64) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn uuid(&self) -> ClockUuid {
        self.uuid
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn offset_s(&self) -> i64 {
        self.offset_s
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Frequency in Hz.
    pub fn freq(&self) -> NonZeroU64 {
        self.freq
    }

    pub fn precision(&self) -> u64 {
        self.precision
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Total offset from the origin in nanoseconds, saturating.
    pub fn offset_ns(&self) -> i64 {
        self.offset_s
            .saturating_mul(NS_PER_SEC_SIGNED)
            .saturating_add(self.offset)
    }

    /// Every key this clock can be matched under, UUID first.
    ///
    /// A non-nil UUID matches the same UUID; an absolute clock also matches
    /// an absolute clock of the same name. A non-absolute clock without a
    /// UUID yields nothing and can never be correlated.
    pub fn identities(&self) -> impl Iterator<Item = ClockIdentity> {
        let uuid = (!self.uuid.is_nil()).then_some(ClockIdentity::Uuid(self.uuid));
        let name = self.absolute.then_some(ClockIdentity::Absolute(self.name));
        uuid.into_iter().chain(name)
    }

    /// Whether this clock has any identity at all.
    pub fn is_identifiable(&self) -> bool {
        self.absolute || !self.uuid.is_nil()
    }

    /// Whether `self` and `other` denote the same clock.
    pub fn matches(&self, other: &Clock) -> bool {
        (!self.uuid.is_nil() && self.uuid == other.uuid)
            || (self.absolute && other.absolute && self.name == other.name)
    }

    /// Convert a cycle count of this clock into nanoseconds.
    pub fn cycles_to_ns(&self, cycles: u64) -> u64 {
        let freq = self.freq.get();
        if freq == NS_PER_SEC {
            return cycles;
        }
        let ns = u128::from(cycles) * u128::from(NS_PER_SEC) / u128::from(freq);
        u64::try_from(ns).unwrap_or(u64::MAX)
    }
}
