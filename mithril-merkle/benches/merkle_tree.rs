use blake2::{Blake2b, digest::consts::U32};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mithril_merkle::{MerkleTree, compute_leaf};

type H = Blake2b<U32>;

const K: usize = 1_000;
const TOTAL_LEAVES_BENCHES: &[usize] = &[K, 10 * K, 100 * K];

fn generate_items(total_leaves: usize) -> Vec<String> {
    (0..total_leaves).map(|i| i.to_string()).collect()
}

fn create_merkle_tree_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_merkle_tree");
    for total_leaves in TOTAL_LEAVES_BENCHES.iter() {
        let items = generate_items(*total_leaves);
        group.bench_with_input(
            BenchmarkId::from_parameter(total_leaves),
            total_leaves,
            |b, &_total_leaves| {
                b.iter(|| MerkleTree::<H>::from_items(&items).unwrap());
            },
        );
    }
    group.finish();
}

fn create_merkle_tree_proof_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_merkle_tree_proof");
    for total_leaves in TOTAL_LEAVES_BENCHES.iter() {
        let tree = MerkleTree::<H>::from_items(&generate_items(*total_leaves)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(total_leaves),
            total_leaves,
            |b, &total_leaves| {
                b.iter(|| tree.compute_proof(total_leaves - 1).unwrap());
            },
        );
    }
    group.finish();
}

fn verify_merkle_tree_proof_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify_merkle_tree_proof");
    for total_leaves in TOTAL_LEAVES_BENCHES.iter() {
        let items = generate_items(*total_leaves);
        let tree = MerkleTree::<H>::from_items(&items).unwrap();
        let index = total_leaves - 1;
        let proof = tree.compute_proof(index).unwrap();
        let leaf = compute_leaf::<H, _>(&items[index]);
        group.bench_with_input(
            BenchmarkId::from_parameter(total_leaves),
            total_leaves,
            |b, &_total_leaves| {
                b.iter(|| assert!(proof.verify(&leaf, tree.root())));
            },
        );
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets =
        create_merkle_tree_benches,
        create_merkle_tree_proof_benches,
        verify_merkle_tree_proof_benches
);
criterion_main!(benches);
