//! Crate-internal mutual exclusion.
//!
//! The hook set needs a plain lock around its callback list: append and
//! batch execution must be serialized, and batch execution is bounded by
//! caller-supplied closures, so spinning is not an option. The lock is a
//! single `AtomicU8` carrying LOCKED/WAITING bits with futex-based waiting
//! via `parking_lot_core`, and is not exposed outside the crate.

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU8, Ordering};

use parking_lot_core::{DEFAULT_PARK_TOKEN, DEFAULT_UNPARK_TOKEN};

/// A minimal mutex protecting a value of type `T`.
pub(crate) struct Mutex<T> {
   state: AtomicU8,
   value: UnsafeCell<T>,
}

// SAFETY: the mutex moves `T` across threads only as a whole.
unsafe impl<T: Send> Send for Mutex<T> {}
// SAFETY: access to `T` requires holding the lock, which is exclusive.
unsafe impl<T: Send> Sync for Mutex<T> {}

impl<T> Mutex<T> {
   /// Bit flag: lock is held.
   const LOCKED: u8 = 1;
   /// Bit flag: at least one thread is parked waiting for the lock.
   const WAITING: u8 = 2;

   /// Creates a new, unlocked mutex.
   #[inline]
   pub(crate) const fn new(value: T) -> Self {
      Self {
         state: AtomicU8::new(0),
         value: UnsafeCell::new(value),
      }
   }

   /// Acquires the lock, blocking the calling thread until it is available.
   #[inline]
   pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
      // Fast path: uncontended acquire.
      // Acquire pairs with the Release swap in `unlock` so everything the
      // previous holder wrote under the lock is visible here.
      if self
         .state
         .compare_exchange(0, Self::LOCKED, Ordering::Acquire, Ordering::Relaxed)
         .is_err()
      {
         self.lock_contended();
      }
      MutexGuard { lock: self }
   }

   /// Slow path: the lock was held when we arrived.
   #[cold]
   fn lock_contended(&self) {
      loop {
         let current = self.state.load(Ordering::Relaxed);

         // Try to acquire if it is free, preserving the WAITING bit for
         // whoever else is parked.
         if current & Self::LOCKED == 0 {
            match self.state.compare_exchange_weak(
               current,
               current | Self::LOCKED,
               Ordering::Acquire,
               Ordering::Relaxed,
            ) {
               Ok(_) => return,
               Err(_) => {
                  std::hint::spin_loop();
                  continue;
               }
            }
         }

         // Held by someone else. Make sure the WAITING bit is set before
         // parking so the holder knows to wake us.
         if current & Self::WAITING == 0
            && self
               .state
               .compare_exchange_weak(
                  current,
                  current | Self::WAITING,
                  Ordering::Relaxed,
                  Ordering::Relaxed,
               )
               .is_err()
         {
            // The state changed under us (possibly released); retry.
            std::hint::spin_loop();
            continue;
         }

         self.wait();
      }
   }

   /// Parks the calling thread until the holder releases the lock.
   #[inline]
   fn wait(&self) {
      // SAFETY: the address passed to park must match the address used for
      // unpark. We consistently use the address of the state word.
      unsafe {
         // park() re-validates before sleeping: it only sleeps while the
         // lock is still held with the WAITING bit set. Spurious wakes are
         // fine; the caller loops and re-checks.
         let _ = parking_lot_core::park(
            self.state.as_ptr() as usize,
            || self.state.load(Ordering::Acquire) == Self::LOCKED | Self::WAITING,
            || {},
            |_, _| {},
            DEFAULT_PARK_TOKEN,
            None,
         );
      }
   }

   /// Releases the lock and wakes any parked waiters.
   #[inline]
   fn unlock(&self) {
      // Release publishes everything written under the lock to the next
      // Acquire in `lock`.
      let prev = self.state.swap(0, Ordering::Release);
      if prev & Self::WAITING != 0 {
         // SAFETY: see safety comment in `wait`.
         unsafe {
            parking_lot_core::unpark_all(self.state.as_ptr() as usize, DEFAULT_UNPARK_TOKEN);
         }
      }
   }
}

/// RAII guard providing access to the protected value. Unlocks on drop.
pub(crate) struct MutexGuard<'a, T> {
   lock: &'a Mutex<T>,
}

impl<T> Deref for MutexGuard<'_, T> {
   type Target = T;

   #[inline]
   fn deref(&self) -> &T {
      // SAFETY: the guard proves the lock is held, so access is exclusive.
      unsafe { &*self.lock.value.get() }
   }
}

impl<T> DerefMut for MutexGuard<'_, T> {
   #[inline]
   fn deref_mut(&mut self) -> &mut T {
      // SAFETY: the guard proves the lock is held, so access is exclusive.
      unsafe { &mut *self.lock.value.get() }
   }
}

impl<T> Drop for MutexGuard<'_, T> {
   #[inline]
   fn drop(&mut self) {
      self.lock.unlock();
   }
}
