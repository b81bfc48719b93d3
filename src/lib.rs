//! A small set of lock-free and lock-assisted concurrency primitives for
//! atomic bookkeeping inside larger concurrent components.
//!
//! The core is [`State`], a single atomic word read three ways: an on/off
//! flag, a signed counter, and a re-armable exactly-once latch. Everything
//! else is a thin composition over it:
//!
//! - [`OnceHook`]: one deferred callback, run at most once by whichever
//!   caller trips the latch first. Lock-free.
//! - [`OnceHookSet`]: an ordered batch of deferred callbacks, run at most
//!   once in total, in registration order, serialized against concurrent
//!   registration by a futex-based lock.
//! - [`IdSequence`]: a free-running allocator of unique nonzero `u64` ids
//!   with an explicit wraparound reset.
//! - [`Changed`]: a monotone version counter for poll-style change
//!   signalling.
//!
//! # Features
//!
//! - **No blocking on the hot paths**: only the hook set's lock can block,
//!   and only around list append or batch execution.
//! - **Re-armable gating**: every latch can begin a new epoch; exactly one
//!   caller wins per epoch.
//! - **No error surface**: every operation is a total function. Panics from
//!   registered callbacks propagate to the firing caller untouched.
//! - **No heap traffic beyond registration**: arming boxes the closure;
//!   every other operation is a bare atomic instruction.
//!
//! This is not a general-purpose synchronization library: there are no
//! condition variables, channels, or wait/notify. Callers bring their own
//! threads and embed these primitives where one-time or state-gated effects
//! need coordinating without a lock.
//!
//! # Examples
//!
//! ## Exactly-once gating
//!
//! ```rust
//! use relatch::State;
//!
//! static GATE: State = State::new();
//!
//! fn close_listener() {
//!     if GATE.done() {
//!         // exactly one caller gets here per epoch
//!         println!("closing");
//!     }
//! }
//! ```
//!
//! ## Deferred teardown hooks
//!
//! ```rust
//! use relatch::OnceHookSet;
//!
//! let on_shutdown = OnceHookSet::new();
//! on_shutdown.arm(|| println!("flush buffers"));
//! on_shutdown.arm(|| println!("close sockets"));
//!
//! // Any number of threads may race this; the batch runs once, in order.
//! on_shutdown.fire();
//! ```

/// Change signalling through a version counter.
mod changed;

/// Single deferred callback.
mod hook;

/// Ordered deferred callback batch.
mod hook_set;

/// Internal futex-based mutual exclusion.
mod mutex;

/// Wrapping identifier allocation.
mod sequence;

/// The tri-purpose atomic cell.
mod state;

pub use changed::Changed;
pub use hook::OnceHook;
pub use hook_set::OnceHookSet;
pub use sequence::IdSequence;
pub use state::State;
