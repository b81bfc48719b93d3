use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use relatch::State;

#[test]
fn test_new_is_on() {
   let state = State::new();
   assert!(state.is_on());
   assert_eq!(state.get(), 0);
}

#[test]
fn test_flag_transitions() {
   let state = State::new();

   // Fresh cell: already on, so claiming "on" reports prior state.
   assert!(state.set_on());
   // First off claim performs the transition, second finds it already off.
   assert!(!state.set_off());
   assert!(state.set_off());
   assert!(!state.is_on());

   // Turning back on: first claim performs it, second finds it on.
   assert!(!state.set_on());
   assert!(state.set_on());
   assert!(state.is_on());
}

#[test]
fn test_done_is_rearmable() {
   let state = State::new();

   // One winner per on-phase.
   assert!(state.done());
   assert!(!state.done());
   assert!(!state.done());
   assert!(!state.is_on());

   // A new epoch gets a new winner.
   state.set_on();
   assert!(state.done());
   assert!(!state.done());
}

#[test]
fn test_counter_semantics() {
   let state = State::new();
   assert_eq!(state.inc(), 1);
   assert_eq!(state.inc(), 2);
   assert_eq!(state.add(5), 7);
   assert_eq!(state.dec(), 6);
   assert_eq!(state.add(-6), 0);
   assert_eq!(state.get(), 0);

   let offset = State::with_value(-3);
   assert_eq!(offset.get(), -3);
   assert_eq!(offset.inc(), -2);
   // Nonzero counter reads as "off" when interpreted as a flag.
   assert!(!offset.is_on());
}

#[test]
fn test_done_single_winner_concurrent() {
   const THREADS: usize = 16;

   let state = Arc::new(State::new());
   let wins = Arc::new(AtomicUsize::new(0));
   let barrier = Arc::new(Barrier::new(THREADS));

   let handles: Vec<_> = (0..THREADS)
      .map(|_| {
         let state = Arc::clone(&state);
         let wins = Arc::clone(&wins);
         let barrier = Arc::clone(&barrier);
         thread::spawn(move || {
            barrier.wait();
            if state.done() {
               wins.fetch_add(1, Ordering::SeqCst);
            }
         })
      })
      .collect();

   for handle in handles {
      handle.join().unwrap();
   }

   // Exactly one racing caller observed the on -> off transition.
   assert_eq!(wins.load(Ordering::SeqCst), 1);
   assert!(!state.is_on());
}

#[test]
fn test_done_single_winner_per_epoch() {
   const THREADS: usize = 8;
   const EPOCHS: usize = 50;

   let state = Arc::new(State::new());

   for _ in 0..EPOCHS {
      let wins = Arc::new(AtomicUsize::new(0));
      let barrier = Arc::new(Barrier::new(THREADS));
      let handles: Vec<_> = (0..THREADS)
         .map(|_| {
            let state = Arc::clone(&state);
            let wins = Arc::clone(&wins);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
               barrier.wait();
               if state.done() {
                  wins.fetch_add(1, Ordering::SeqCst);
               }
            })
         })
         .collect();
      for handle in handles {
         handle.join().unwrap();
      }
      assert_eq!(wins.load(Ordering::SeqCst), 1);
      state.set_on();
   }
}

#[test]
fn test_concurrent_counting() {
   const THREADS: usize = 8;
   const PER_THREAD: i32 = 1000;

   let state = Arc::new(State::new());
   let handles: Vec<_> = (0..THREADS)
      .map(|_| {
         let state = Arc::clone(&state);
         thread::spawn(move || {
            for _ in 0..PER_THREAD {
               state.inc();
            }
            for _ in 0..PER_THREAD {
               state.dec();
            }
         })
      })
      .collect();

   for handle in handles {
      handle.join().unwrap();
   }

   // Every increment was matched by a decrement.
   assert_eq!(state.get(), 0);
   assert!(state.is_on());
}
