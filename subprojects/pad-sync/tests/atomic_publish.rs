//! Concurrent publish/read consistency.
//!
//! A reader must never observe a value mixing fields from two different
//! publications, and observed values must never go backwards.

use std::{sync::atomic::AtomicBool, sync::atomic::Ordering, thread};

use pad_sync::Latest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    a: u64,
    b: u64,
    c: u64,
}

#[test]
fn a_reader_never_observes_a_torn_snapshot() {
    const PUBLICATIONS: u64 = 100_000;

    let mut slot: Latest<Snapshot> = Latest::new();
    let (mut publisher, mut watcher) = slot.split();
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        scope.spawn(|| {
            for k in 1..=PUBLICATIONS {
                publisher.publish(Snapshot { a: k, b: k, c: k });
            }
            done.store(true, Ordering::Release);
        });

        scope.spawn(|| {
            let mut newest_seen = 0;
            loop {
                let finished = done.load(Ordering::Acquire);
                if let Some(snapshot) = watcher.read() {
                    assert_eq!(snapshot.a, snapshot.b, "torn snapshot: {snapshot:?}");
                    assert_eq!(snapshot.b, snapshot.c, "torn snapshot: {snapshot:?}");
                    assert!(
                        snapshot.a >= newest_seen,
                        "stale snapshot after a newer one: {} < {}",
                        snapshot.a,
                        newest_seen
                    );
                    newest_seen = snapshot.a;
                }
                if finished {
                    break;
                }
            }
            // The cached fallback means the reader may end a few
            // publications behind, but the final read settles on the last
            // value once the writer is quiet.
            assert_eq!(watcher.read().map(|s| s.a), Some(PUBLICATIONS));
        });
    });
}
