//! Change signalling through a monotone version counter.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// A version cell for cheap "did anything change since I last looked"
/// polling.
///
/// Producers call [`mark`](Self::mark) after publishing a change; consumers
/// keep a `u64` snapshot and poll with [`sync`](Self::sync). There are no
/// waiters and nothing blocks; a consumer that wants to react promptly has
/// to poll.
///
/// # Examples
///
/// ```rust
/// use relatch::Changed;
///
/// let changed = Changed::new();
/// let mut seen = changed.version();
///
/// changed.mark();
/// assert!(changed.sync(&mut seen));  // picked up the change
/// assert!(!changed.sync(&mut seen)); // nothing new since
/// ```
pub struct Changed(AtomicU64);

impl Changed {
   /// Creates a new cell at version 0.
   #[inline]
   #[must_use]
   pub const fn new() -> Self {
      Self(AtomicU64::new(0))
   }

   /// Bumps the version, signalling a change.
   ///
   /// Release pairs with the Acquire in [`version`](Self::version), so a
   /// consumer that observes the bump also observes whatever the producer
   /// wrote before calling `mark`.
   #[inline]
   pub fn mark(&self) {
      self.0.fetch_add(1, Ordering::Release);
   }

   /// Returns the current version.
   #[inline]
   pub fn version(&self) -> u64 {
      self.0.load(Ordering::Acquire)
   }

   /// Compares the current version against the caller's snapshot.
   ///
   /// On difference, updates the snapshot and returns `true`. Marks between
   /// two polls coalesce into a single `true`.
   #[inline]
   pub fn sync(&self, seen: &mut u64) -> bool {
      let current = self.version();
      if current == *seen {
         return false;
      }
      *seen = current;
      true
   }
}

impl Default for Changed {
   /// Creates a new cell at version 0.
   #[inline]
   fn default() -> Self {
      Self::new()
   }
}

impl fmt::Debug for Changed {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_tuple("Changed").field(&self.version()).finish()
   }
}
