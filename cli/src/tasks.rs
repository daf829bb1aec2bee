//! Detached-task queue for a short-lived process.
//!
//! The CLI exits as soon as its command finishes, so detached work (the
//! refresh-token revoke after logout) is queued and drained before exit
//! instead of being dropped with the runtime.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use std::cell::RefCell;

use futures::future::LocalBoxFuture;
use session::Spawner;

#[derive(Default)]
pub struct QueueSpawner {
    queue: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl QueueSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run queued tasks to completion, including any they enqueue.
    pub async fn drain(&self) {
        loop {
            let next = self.queue.borrow_mut().pop();
            match next {
                Some(task) => task.await,
                None => return,
            }
        }
    }
}

impl Spawner for QueueSpawner {
    fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>) {
        self.queue.borrow_mut().push(task);
    }
}
