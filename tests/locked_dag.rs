use crossbeam_utils::sync::WaitGroup;
use dagstore::{Dag, DagError, LockedDag, Vertex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn concurrent_add_vertex_loses_no_update() {
    let dag = LockedDag::new();
    let a = Vertex::new("a");
    let b = Vertex::new("b");

    thread::scope(|s| {
        s.spawn(|| dag.add_vertex(a.clone()).unwrap());
        s.spawn(|| dag.add_vertex(b.clone()).unwrap());
    });

    assert!(dag.contains(&a));
    assert!(dag.contains(&b));
    assert_eq!(dag.len(), 2);
    let mut indices = [dag.index_of(&a).unwrap(), dag.index_of(&b).unwrap()];
    indices.sort_unstable();
    assert_eq!(indices, [0, 1]);
}

#[test]
fn many_writers_build_a_consistent_graph() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 50;

    let dag = Arc::new(LockedDag::with_capacity(THREADS * PER_THREAD + 1));
    let root = Vertex::new(usize::MAX);
    dag.add_vertex(root.clone()).unwrap();

    let wg = WaitGroup::new();
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let dag = Arc::clone(&dag);
            let root = root.clone();
            let wg = wg.clone();
            thread::spawn(move || {
                // Start all writers together.
                wg.wait();
                for i in 0..PER_THREAD {
                    let v = Vertex::new(t * PER_THREAD + i);
                    dag.add_vertex(v.clone()).unwrap();
                    dag.set_children(&root, [&v]).unwrap();
                }
            })
        })
        .collect();
    wg.wait();
    for h in handles {
        h.join().unwrap();
    }

    let dag = Arc::try_unwrap(dag).ok().expect("all writers joined").into_inner();
    assert_eq!(dag.len(), THREADS * PER_THREAD + 1);
    assert_eq!(dag.edge_count(), THREADS * PER_THREAD);
    assert_eq!(dag.sources(), vec![root.clone()]);
    assert_eq!(dag.sinks().len(), THREADS * PER_THREAD);
    assert!(dag.validate_invariants());
}

#[test]
fn traversal_holds_the_lock_across_callbacks() {
    let dag = LockedDag::new();
    let vs: Vec<_> = (0..5).map(Vertex::new).collect();
    for v in &vs {
        dag.add_vertex(v.clone()).unwrap();
    }
    for w in vs.windows(2) {
        dag.set_children(&w[0], [&w[1]]).unwrap();
    }

    let visited = AtomicUsize::new(0);
    let (started_tx, started_rx) = mpsc::channel();
    let late = Vertex::new(99);

    let (dag, visited) = (&dag, &visited);
    thread::scope(|s| {
        s.spawn(move || {
            dag.bfs(|_| {
                if visited.fetch_add(1, Ordering::SeqCst) == 0 {
                    started_tx.send(()).unwrap();
                }
                thread::sleep(Duration::from_millis(5));
            });
        });

        started_rx.recv().unwrap();
        // Blocks until the walk, callbacks included, has finished.
        dag.add_vertex(late.clone()).unwrap();
        assert_eq!(visited.load(Ordering::SeqCst), vs.len());
    });

    assert!(dag.contains(&late));
}

#[test]
fn errors_release_the_lock() {
    let dag = LockedDag::new();
    let a = Vertex::new(1);
    dag.add_vertex(a.clone()).unwrap();

    assert_eq!(
        dag.add_vertex(a.clone()),
        Err(DagError::DuplicateVertex { index: 0 })
    );
    assert!(dag.get_children(&Vertex::new(2)).is_err());
    assert!(dag.set_children(&a, [&Vertex::new(3)]).is_err());

    // Still lockable from another thread.
    thread::scope(|s| {
        s.spawn(|| assert_eq!(dag.len(), 1));
    });
}

#[test]
fn walks_under_the_lock_match_the_plain_graph() {
    let mut plain = Dag::new();
    let vs: Vec<_> = (0..6).map(Vertex::new).collect();
    for v in &vs {
        plain.add_vertex(v.clone()).unwrap();
    }
    plain.set_children(&vs[0], [&vs[1], &vs[2]]).unwrap();
    plain.set_children(&vs[1], [&vs[3]]).unwrap();
    plain.set_parents(&vs[4], [&vs[2], &vs[3]]).unwrap();

    let locked = LockedDag::from(plain.clone());
    assert_eq!(record(|op| plain.bfs(op)), record(|op| locked.bfs(op)));
    assert_eq!(
        record(|op| plain.preorder_dfs(op)),
        record(|op| locked.preorder_dfs(op))
    );
    assert_eq!(
        record(|op| plain.postorder_dfs(op)),
        record(|op| locked.postorder_dfs(op))
    );
    assert_eq!(record(|op| locked.bfs(op)).len(), 6);
}

fn record(walk: impl FnOnce(&mut dyn FnMut(&Vertex<i32>))) -> Vec<i32> {
    let mut order = Vec::new();
    walk(&mut |v: &Vertex<i32>| order.push(*v.value()));
    order
}
