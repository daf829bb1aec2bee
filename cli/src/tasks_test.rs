use std::cell::Cell;
use std::rc::Rc;

use futures::FutureExt as _;

use super::*;

#[tokio::test]
async fn drain_runs_every_queued_task() {
    let spawner = QueueSpawner::new();
    let ran = Rc::new(Cell::new(0));
    for _ in 0..3 {
        let ran = Rc::clone(&ran);
        spawner.spawn_detached(async move { ran.set(ran.get() + 1) }.boxed_local());
    }
    assert_eq!(spawner.pending(), 3);
    assert_eq!(ran.get(), 0);

    spawner.drain().await;
    assert_eq!(ran.get(), 3);
    assert_eq!(spawner.pending(), 0);
}

#[tokio::test]
async fn drain_on_empty_queue_returns() {
    QueueSpawner::new().drain().await;
}
