//! Main-thread task queue
//!
//! Native UI toolkits only accept work on their main thread and often need
//! a value applied "after the current layout pass". [`MainQueue`] models
//! that: tasks posted now run on the next [`run_pending`](MainQueue::run_pending)
//! call, and tasks posted while a tick is running wait for the following one.
//!
//! ```text
//! post(a) ─┐
//! post(b) ─┼─► tick 1: a, b ──► (a posts c) ──► tick 2: c
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct QueueInner {
    tasks: VecDeque<Task>,
    ticks: u64,
}

/// Single-threaded deferred task queue
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct MainQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl MainQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer `task` to the next tick
    pub fn post(&self, task: impl FnOnce() + 'static) {
        self.inner.borrow_mut().tasks.push_back(Box::new(task));
    }

    /// Number of tasks waiting for the next tick
    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.inner.borrow().ticks
    }

    /// Run one tick: every task posted before this call, in order
    ///
    /// Returns the number of tasks run.
    pub fn run_pending(&self) -> usize {
        let tasks = {
            let mut inner = self.inner.borrow_mut();
            inner.ticks += 1;
            std::mem::take(&mut inner.tasks)
        };
        let count = tasks.len();
        for task in tasks {
            task();
        }
        if count > 0 {
            tracing::trace!("main queue tick ran {} task(s)", count);
        }
        count
    }

    /// Run ticks until the queue is empty or `max_ticks` is reached
    pub fn drain(&self, max_ticks: usize) -> usize {
        let mut total = 0;
        for _ in 0..max_ticks {
            if self.pending() == 0 {
                break;
            }
            total += self.run_pending();
        }
        total
    }
}

impl fmt::Debug for MainQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MainQueue")
            .field("pending", &inner.tasks.len())
            .field("ticks", &inner.ticks)
            .finish()
    }
}
