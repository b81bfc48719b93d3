use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use relatch::State;

static GATE: State = State::new();

fn main() {
   let winners = Arc::new(AtomicUsize::new(0));

   let threads: Vec<_> = (0..8)
      .map(|i| {
         let winners = Arc::clone(&winners);
         thread::spawn(move || {
            if GATE.done() {
               winners.fetch_add(1, Ordering::Relaxed);
               println!("thread {i} tripped the latch");
            } else {
               println!("thread {i} lost the race");
            }
         })
      })
      .collect();

   for t in threads {
      t.join().unwrap();
   }

   assert_eq!(winners.load(Ordering::Relaxed), 1); // one winner per epoch

   // Re-arm and the next caller wins again.
   GATE.set_on();
   assert!(GATE.done());
   println!("re-armed epoch tripped");
}
