//! Loader options — capacity and overflow policy.
//!
//! Purpose
//! -------
//! Make the event-count limit an explicit, validated setting instead of a
//! fixed array size. The default keeps the historical limit of 1000 events
//! and truncates with a warning; callers may raise, remove, or enforce it.
//!
//! Invariants
//! ----------
//! - `capacity`, when present, is strictly positive.
use crate::events::errors::{DataError, DataResult};

/// Default maximum number of events read from one input.
pub const DEFAULT_CAPACITY: usize = 1000;

/// What the loader does when the input holds more records than `capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep the first `capacity` events, warn, and mark the sample truncated.
    #[default]
    Truncate,
    /// Fail with [`DataError::CapacityExceeded`].
    Error,
}

/// Loader configuration.
///
/// Default: `capacity = Some(1000)`, `overflow = Truncate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub capacity: Option<usize>,
    pub overflow: OverflowPolicy,
}

impl LoadOptions {
    /// Construct validated loader options. `capacity = None` means unbounded.
    ///
    /// # Errors
    /// - [`DataError::InvalidCapacity`] if `capacity == Some(0)`.
    pub fn new(capacity: Option<usize>, overflow: OverflowPolicy) -> DataResult<Self> {
        if capacity == Some(0) {
            return Err(DataError::InvalidCapacity { capacity: 0 });
        }
        Ok(Self { capacity, overflow })
    }

    /// Unbounded loading; the overflow policy is irrelevant.
    pub fn unbounded() -> Self {
        Self { capacity: None, overflow: OverflowPolicy::Truncate }
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { capacity: Some(DEFAULT_CAPACITY), overflow: OverflowPolicy::Truncate }
    }
}
