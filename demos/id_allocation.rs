use std::collections::HashSet;
use std::thread;

use relatch::IdSequence;

static IDS: IdSequence = IdSequence::new();

fn main() {
   let threads: Vec<_> = (0..4)
      .map(|_| {
         thread::spawn(|| {
            let mut taken = Vec::with_capacity(1000);
            for _ in 0..1000 {
               taken.push(IDS.next());
            }
            taken
         })
      })
      .collect();

   let mut seen = HashSet::new();
   for t in threads {
      for id in t.join().unwrap() {
         assert!(seen.insert(id), "duplicate id {id}");
      }
   }

   println!("allocated {} unique ids", seen.len());

   // The wraparound path, on a local sequence.
   let near_wrap = IdSequence::starting_at(IdSequence::WRAP_AT - 1);
   println!("sentinel allocation: {}", near_wrap.next());
   println!("post-wrap allocation: {}", near_wrap.next());
}
