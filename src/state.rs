//! The tri-purpose atomic state cell.
//!
//! [`State`] is a single `AtomicI32` that callers read in one of three ways:
//!
//! - A binary flag: value `0` is "on", any nonzero value is "off".
//! - A free-running signed counter via [`inc`]/[`dec`]/[`add`]/[`get`].
//! - An exactly-once latch: [`done`] trips the cell off and tells exactly one
//!   of any number of racing callers that it performed the transition.
//!
//! Every transition is a single atomic read-modify-write instruction. There is
//! no read-then-write sequence anywhere in this module, so all operations on
//! one instance are linearizable with respect to each other and no separate
//! lock is ever needed.
//!
//! Flag and counter usage must not be mixed on the same instance: once the
//! cell is treated as a counter, "on" only means "the count happens to be
//! zero". The rest of this crate keeps one `State` per role.
//!
//! [`inc`]: State::inc
//! [`dec`]: State::dec
//! [`add`]: State::add
//! [`get`]: State::get
//! [`done`]: State::done

use core::fmt;
use core::sync::atomic::{AtomicI32, Ordering};

/// An atomic cell usable as an on/off flag, a signed counter, or a
/// re-armable exactly-once latch.
///
/// The cell starts at `0` ("on"). It has no terminal state: [`set_on`] begins
/// a new epoch in which the latch can be tripped exactly once again.
///
/// # Examples
///
/// ```rust
/// use relatch::State;
///
/// let gate = State::new();
/// assert!(gate.done());  // this caller performed the on -> off transition
/// assert!(!gate.done()); // everyone after it did not
///
/// gate.set_on();         // re-arm for a new epoch
/// assert!(gate.done());
/// ```
///
/// [`set_on`]: State::set_on
#[repr(transparent)]
pub struct State(AtomicI32);

impl State {
   /// Creates a new cell with value `0` ("on").
   #[inline]
   #[must_use]
   pub const fn new() -> Self {
      Self(AtomicI32::new(0))
   }

   /// Creates a new cell holding an arbitrary starting value.
   ///
   /// Intended for counter usage; a flag or latch normally starts at
   /// [`new`](Self::new)'s `0`.
   #[inline]
   #[must_use]
   pub const fn with_value(value: i32) -> Self {
      Self(AtomicI32::new(value))
   }

   /// Forces the cell on, returning whether it was already on.
   ///
   /// This is a single atomic exchange of `0`; when used on a latch it
   /// re-arms the cell, beginning a new epoch.
   #[inline]
   pub fn set_on(&self) -> bool {
      // Release publishes writes made before re-arming to whoever trips the
      // new epoch; Acquire on the read half pairs with the previous trip.
      self.0.swap(0, Ordering::AcqRel) == 0
   }

   /// Forces the cell off, returning whether it was already off.
   ///
   /// This is a single atomic exchange of `1`; the caller that observes
   /// `false` is the one that performed the on -> off transition.
   #[inline]
   pub fn set_off(&self) -> bool {
      self.0.swap(1, Ordering::AcqRel) != 0
   }

   /// Returns whether the cell is currently on (value `0`).
   ///
   /// Pure observation, no side effect.
   #[inline]
   pub fn is_on(&self) -> bool {
      self.0.load(Ordering::Acquire) == 0
   }

   /// Returns the raw value of the cell.
   #[inline]
   pub fn get(&self) -> i32 {
      self.0.load(Ordering::Acquire)
   }

   /// Atomically adds `1`, returning the value after the operation.
   #[inline]
   pub fn inc(&self) -> i32 {
      self.add(1)
   }

   /// Atomically subtracts `1`, returning the value after the operation.
   #[inline]
   pub fn dec(&self) -> i32 {
      self.add(-1)
   }

   /// Atomically adds `delta`, returning the value after the operation.
   ///
   /// The addition wraps on overflow, as the underlying atomic does.
   #[inline]
   pub fn add(&self, delta: i32) -> i32 {
      self.0.fetch_add(delta, Ordering::AcqRel).wrapping_add(delta)
   }

   /// Trips the latch, returning whether *this* call performed the
   /// on -> off transition.
   ///
   /// Exactly one caller out of any number racing on the same on-phase
   /// observes `true`; every other caller observes `false`. The gate is
   /// re-armable: a later [`set_on`](Self::set_on) begins a new epoch in
   /// which `done` can again report `true` exactly once. Callers wanting a
   /// single-shot gate for the whole object lifetime simply never re-arm.
   #[inline]
   pub fn done(&self) -> bool {
      !self.set_off()
   }
}

impl Default for State {
   /// Creates a new cell with value `0` ("on").
   #[inline]
   fn default() -> Self {
      Self::new()
   }
}

impl fmt::Debug for State {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_tuple("State").field(&self.get()).finish()
   }
}
