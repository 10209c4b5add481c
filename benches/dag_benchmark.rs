use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dagstore::{Dag, LockedDag, Vertex};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Dfs, DfsPostOrder};

/// Layered DAG with a single root: every node links to two nodes of the next
/// layer, so most nodes have two parents.
fn layered_edges(layers: usize, width: usize) -> (usize, Vec<(usize, usize)>) {
    let n = 1 + layers * width;
    let mut edges = Vec::new();
    for j in 0..width {
        edges.push((0, 1 + j));
    }
    for l in 0..layers - 1 {
        for j in 0..width {
            let u = 1 + l * width + j;
            let next = 1 + (l + 1) * width;
            edges.push((u, next + j));
            edges.push((u, next + (j + 1) % width));
        }
    }
    (n, edges)
}

fn build_dag(n: usize, edges: &[(usize, usize)]) -> Dag<usize> {
    let vs: Vec<_> = (0..n).map(Vertex::new).collect();
    let mut dag = Dag::with_capacity(n);
    for v in &vs {
        dag.add_vertex(v.clone()).expect("fresh vertex");
    }
    for &(p, c) in edges {
        dag.set_children(&vs[p], [&vs[c]]).expect("both endpoints added");
    }
    dag
}

fn build_petgraph(n: usize, edges: &[(usize, usize)]) -> DiGraph<usize, ()> {
    let mut g = DiGraph::with_capacity(n, edges.len());
    for i in 0..n {
        g.add_node(i);
    }
    for &(p, c) in edges {
        g.add_edge(NodeIndex::new(p), NodeIndex::new(c), ());
    }
    g
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for &(layers, width) in &[(10, 10), (50, 20)] {
        let (n, edges) = layered_edges(layers, width);
        group.bench_with_input(BenchmarkId::new("dag", n), &edges, |b, edges| {
            b.iter(|| black_box(build_dag(n, edges)));
        });
        group.bench_with_input(BenchmarkId::new("petgraph", n), &edges, |b, edges| {
            b.iter(|| black_box(build_petgraph(n, edges)));
        });
    }
    group.finish();
}

fn bench_walks(c: &mut Criterion) {
    let (n, edges) = layered_edges(50, 20);
    let dag = build_dag(n, &edges);
    let locked = LockedDag::from(dag.clone());
    let g = build_petgraph(n, &edges);
    let root = NodeIndex::new(0);

    let mut group = c.benchmark_group("walks");
    group.bench_function("dag_bfs", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            dag.bfs(|v| sum += *v.value());
            black_box(sum)
        });
    });
    group.bench_function("locked_dag_bfs", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            locked.bfs(|v| sum += *v.value());
            black_box(sum)
        });
    });
    group.bench_function("petgraph_bfs", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            let mut bfs = Bfs::new(&g, root);
            while let Some(nx) = bfs.next(&g) {
                sum += g[nx];
            }
            black_box(sum)
        });
    });
    group.bench_function("dag_preorder_dfs", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            dag.preorder_dfs(|v| sum += *v.value());
            black_box(sum)
        });
    });
    group.bench_function("petgraph_dfs", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            let mut dfs = Dfs::new(&g, root);
            while let Some(nx) = dfs.next(&g) {
                sum += g[nx];
            }
            black_box(sum)
        });
    });
    group.bench_function("dag_postorder_dfs", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            dag.postorder_dfs(|v| sum += *v.value());
            black_box(sum)
        });
    });
    group.bench_function("petgraph_dfs_post_order", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            let mut dfs = DfsPostOrder::new(&g, root);
            while let Some(nx) = dfs.next(&g) {
                sum += g[nx];
            }
            black_box(sum)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_construction, bench_walks);
criterion_main!(benches);
