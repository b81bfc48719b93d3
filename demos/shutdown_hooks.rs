use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use relatch::OnceHookSet;

fn main() {
   let on_shutdown = Arc::new(OnceHookSet::new());
   let ran = Arc::new(AtomicUsize::new(0));

   for name in ["flush buffers", "close sockets", "remove pid file"] {
      let ran = Arc::clone(&ran);
      on_shutdown.arm(move || {
         ran.fetch_add(1, Ordering::Relaxed);
         println!("shutdown: {name}");
      });
   }

   // Every worker may report shutdown; the batch still runs once, in order.
   let workers: Vec<_> = (0..4)
      .map(|i| {
         let on_shutdown = Arc::clone(&on_shutdown);
         thread::spawn(move || {
            println!("worker {i} signalling shutdown");
            on_shutdown.fire();
         })
      })
      .collect();

   for worker in workers {
      worker.join().unwrap();
   }

   assert_eq!(ran.load(Ordering::Relaxed), 3); // each hook ran exactly once
   println!("all hooks done");
}
