//! Single deferred callback behind an exactly-once latch.
//!
//! [`OnceHook`] holds at most one closure and runs it at most once per
//! epoch: the first [`fire`](OnceHook::fire) whose latch trip wins executes
//! the closure synchronously on its own thread; every other fire is a no-op.
//! There is no lock: the slot is an atomic pointer and the exactly-once
//! decision is the latch, so both `arm` and `fire` are lock-free.

use core::fmt;
use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

use crate::state::State;

/// A registered callback. Boxed twice here so the slot stores a thin pointer.
pub(crate) type Hook = Box<dyn FnOnce() + Send>;

/// A deferred callback that runs at most once.
///
/// The hook starts empty. [`arm`](Self::arm) stores a closure, replacing and
/// dropping any previous one; last registration wins, nothing queues. The
/// winning [`fire`](Self::fire) takes the closure out and calls it; the slot
/// is empty afterwards.
///
/// Arming concurrently with a fire is an inherent race of the contract, not
/// a defect: a closure armed after a winning fire has passed its slot check
/// is simply never run in that epoch. It stays in the slot for a future
/// epoch, or is dropped when replaced.
///
/// # Examples
///
/// ```rust
/// use relatch::OnceHook;
///
/// let hook = OnceHook::new();
/// hook.arm(|| println!("tearing down"));
/// hook.fire(); // runs the closure
/// hook.fire(); // no effect
/// ```
pub struct OnceHook {
   latch: State,
   slot: AtomicPtr<Hook>,
}

impl OnceHook {
   /// Creates a new, empty hook with the latch armed.
   #[inline]
   #[must_use]
   pub const fn new() -> Self {
      Self {
         latch: State::new(),
         slot: AtomicPtr::new(ptr::null_mut()),
      }
   }

   /// Stores `f` as the hook's callback, replacing any previous one.
   ///
   /// The previous closure, if present and unfired, is dropped. Ownership of
   /// `f` moves into the hook and later into the winning
   /// [`fire`](Self::fire) caller.
   pub fn arm<F>(&self, f: F)
   where
      F: FnOnce() + Send + 'static,
   {
      let fresh = Box::into_raw(Box::new(Box::new(f) as Hook));
      // Release publishes the closure to the fire that takes the slot;
      // Acquire synchronizes with whoever produced the previous pointer.
      let prev = self.slot.swap(fresh, Ordering::AcqRel);
      if !prev.is_null() {
         // SAFETY: the swap transferred ownership of the previous
         // registration to us, and nobody else can reach it anymore.
         drop(unsafe { Box::from_raw(prev) });
      }
   }

   /// Runs the callback if this call wins the latch.
   ///
   /// - If no callback is armed, returns immediately with no effect and
   ///   without touching the latch.
   /// - Otherwise trips the latch; the single winning caller takes the
   ///   closure out of the slot and invokes it synchronously on its own
   ///   thread. Losing callers do nothing, even if a different closure was
   ///   armed since.
   ///
   /// A panic inside the closure propagates to the winning caller; the hook
   /// neither catches nor records it.
   pub fn fire(&self) {
      if self.slot.load(Ordering::Acquire).is_null() {
         return;
      }
      if !self.latch.done() {
         return;
      }
      let raw = self.slot.swap(ptr::null_mut(), Ordering::AcqRel);
      // The slot can still be empty here if a fire from a re-armed epoch
      // raced us to it; whoever got the pointer runs the closure.
      if !raw.is_null() {
         // SAFETY: the swap transferred ownership of the registration to
         // us, and nobody else can reach it anymore.
         let hook = unsafe { Box::from_raw(raw) };
         hook();
      }
   }

   /// Returns whether a callback is currently armed.
   ///
   /// Pure observation; the answer can be stale by the time it is used.
   #[inline]
   pub fn is_armed(&self) -> bool {
      !self.slot.load(Ordering::Acquire).is_null()
   }

   /// Re-arms the latch, beginning a new epoch.
   ///
   /// The slot is consumed by a winning fire, so a new epoch usually needs a
   /// new [`arm`](Self::arm) as well.
   #[inline]
   pub fn reset(&self) {
      self.latch.set_on();
   }
}

impl Default for OnceHook {
   /// Creates a new, empty hook.
   #[inline]
   fn default() -> Self {
      Self::new()
   }
}

impl fmt::Debug for OnceHook {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("OnceHook")
         .field("armed", &self.is_armed())
         .field("latch", &self.latch)
         .finish()
   }
}

impl Drop for OnceHook {
   fn drop(&mut self) {
      let raw = *self.slot.get_mut();
      if !raw.is_null() {
         // SAFETY: we have exclusive access and the pointer came from
         // Box::into_raw in `arm`; the closure was never fired.
         drop(unsafe { Box::from_raw(raw) });
      }
   }
}
