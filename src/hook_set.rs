//! Ordered batch of deferred callbacks behind an exactly-once latch.
//!
//! [`OnceHookSet`] accumulates closures and runs the whole batch at most
//! once, in registration order. The exactly-once decision is the latch; the
//! list itself is guarded by the crate's futex mutex, which the winning fire
//! holds for the entire batch so registration and execution can never
//! interleave element by element.

use core::fmt;
use core::mem;

use crate::hook::Hook;
use crate::mutex::Mutex;
use crate::state::State;

/// An ordered set of deferred callbacks that runs at most once in total.
///
/// Closures accumulate in registration order; none are dropped or replaced.
/// The winning [`fire`](Self::fire) drains the whole sequence and runs every
/// closure under the lock, so an [`arm`](Self::arm) racing an in-flight
/// batch either completes before the batch begins (and is included) or
/// blocks until it ends (and belongs to a future epoch), never partially.
///
/// # Examples
///
/// ```rust
/// use relatch::OnceHookSet;
///
/// let hooks = OnceHookSet::new();
/// hooks.arm(|| print!("first "));
/// hooks.arm(|| println!("second"));
/// hooks.fire(); // runs both, in that order
/// hooks.fire(); // no effect
/// ```
pub struct OnceHookSet {
   latch: State,
   /// Counter role: number of armed closures, for the unlocked fast path.
   pending: State,
   hooks: Mutex<Vec<Hook>>,
}

impl OnceHookSet {
   /// Creates a new, empty set with the latch armed.
   #[inline]
   #[must_use]
   pub const fn new() -> Self {
      Self {
         latch: State::new(),
         pending: State::new(),
         hooks: Mutex::new(Vec::new()),
      }
   }

   /// Appends `f` to the set.
   ///
   /// Registrations accumulate; nothing is replaced. Blocks while a winning
   /// fire is draining the batch, in which case `f` lands after the drain
   /// and runs only in a future epoch.
   pub fn arm<F>(&self, f: F)
   where
      F: FnOnce() + Send + 'static,
   {
      let mut hooks = self.hooks.lock();
      hooks.push(Box::new(f));
      self.pending.inc();
   }

   /// Runs the batch if this call wins the latch.
   ///
   /// - If the set is currently empty, returns immediately without taking
   ///   the lock. This check is deliberately unlocked: a fire racing the
   ///   first concurrent `arm` may observe "empty" and skip; callers
   ///   needing strict ordering must serialize their registration before
   ///   any fire.
   /// - Otherwise trips the latch; the single winning caller locks the set,
   ///   drains it, and invokes every closure in registration order on its
   ///   own thread, holding the lock for the whole batch. Losing callers do
   ///   nothing.
   ///
   /// A closure must not [`arm`](Self::arm) into the same set it is firing
   /// from: the lock is not reentrant and the call would deadlock. A panic
   /// inside a closure propagates to the winning caller with the rest of
   /// the batch unrun.
   pub fn fire(&self) {
      if self.pending.get() == 0 {
         return;
      }
      if !self.latch.done() {
         return;
      }
      let mut hooks = self.hooks.lock();
      let batch = mem::take(&mut *hooks);
      self.pending.add(-(batch.len() as i32));
      for hook in batch {
         hook();
      }
   }

   /// Returns the number of closures currently armed.
   ///
   /// Lock-free observation via the pending counter; the answer can be
   /// stale by the time it is used.
   #[inline]
   pub fn len(&self) -> usize {
      self.pending.get().max(0) as usize
   }

   /// Returns whether no closures are currently armed.
   #[inline]
   pub fn is_empty(&self) -> bool {
      self.len() == 0
   }

   /// Re-arms the latch, beginning a new epoch.
   ///
   /// Closures armed after the previous drain stay queued and run when the
   /// new epoch's winning fire drains them.
   #[inline]
   pub fn reset(&self) {
      self.latch.set_on();
   }
}

impl Default for OnceHookSet {
   /// Creates a new, empty set.
   #[inline]
   fn default() -> Self {
      Self::new()
   }
}

impl fmt::Debug for OnceHookSet {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("OnceHookSet")
         .field("pending", &self.len())
         .field("latch", &self.latch)
         .finish()
   }
}
