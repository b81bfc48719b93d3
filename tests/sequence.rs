use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use relatch::IdSequence;

#[test]
fn test_first_id_is_one() {
   let ids = IdSequence::new();
   assert_eq!(ids.next(), 1);
}

#[test]
fn test_sequential_ids_are_contiguous() {
   let ids = IdSequence::new();
   for expected in 1..=1000u64 {
      assert_eq!(ids.next(), expected);
   }
}

#[test]
fn test_starting_at_continues_from_value() {
   let ids = IdSequence::starting_at(41);
   assert_eq!(ids.next(), 42);
   assert_eq!(ids.next(), 43);
}

#[test]
fn test_wraparound_resets_to_start() {
   let ids = IdSequence::starting_at(IdSequence::WRAP_AT - 1);

   // The allocation that returns the sentinel performs the reset itself.
   assert_eq!(ids.next(), IdSequence::WRAP_AT);
   assert_eq!(ids.next(), 1);
   assert_eq!(ids.next(), 2);
}

#[test]
fn test_ids_are_never_zero() {
   let ids = IdSequence::starting_at(IdSequence::WRAP_AT - 3);
   for _ in 0..8 {
      assert_ne!(ids.next(), 0);
   }
}

#[test]
fn test_concurrent_ids_are_unique() {
   const THREADS: usize = 8;
   const PER_THREAD: usize = 1000;

   let ids = Arc::new(IdSequence::new());
   let handles: Vec<_> = (0..THREADS)
      .map(|_| {
         let ids = Arc::clone(&ids);
         thread::spawn(move || {
            let mut taken = Vec::with_capacity(PER_THREAD);
            for _ in 0..PER_THREAD {
               taken.push(ids.next());
            }
            taken
         })
      })
      .collect();

   let mut seen = HashSet::new();
   for handle in handles {
      for id in handle.join().unwrap() {
         assert!(seen.insert(id), "duplicate id {id}");
      }
   }
   assert_eq!(seen.len(), THREADS * PER_THREAD);
}

#[test]
fn test_ids_monotonic_per_thread() {
   const THREADS: usize = 4;
   const PER_THREAD: usize = 1000;

   let ids = Arc::new(IdSequence::new());
   let handles: Vec<_> = (0..THREADS)
      .map(|_| {
         let ids = Arc::clone(&ids);
         thread::spawn(move || {
            let mut last = 0;
            for _ in 0..PER_THREAD {
               let id = ids.next();
               assert!(id > last, "id {id} not increasing past {last}");
               last = id;
            }
         })
      })
      .collect();

   for handle in handles {
      handle.join().unwrap();
   }
}
