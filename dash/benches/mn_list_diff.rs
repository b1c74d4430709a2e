use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dash_mnlistdiff::consensus::{Encodable, deserialize, serialize};
use dash_mnlistdiff::sml::deterministic::{DeterministicMasternode, DeterministicMasternodeList};
use dash_mnlistdiff::sml::masternode_list::SimplifiedMasternodeList;
use dash_mnlistdiff::{BlockHash, MnListDiff, build_simplified_diff};

/// A writer that discards all data written to it.
struct EmptyWrite;

impl std::io::Write for EmptyWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// 3000 masternodes; every tenth one changes its service port in the second list
/// and every hundredth one is replaced.
fn lists() -> (DeterministicMasternodeList, DeterministicMasternodeList) {
    let mut from = DeterministicMasternodeList::new(BlockHash::dummy(1), 1);
    let mut to = DeterministicMasternodeList::new(BlockHash::dummy(2), 2);
    for id in 0..3000 {
        let mn = DeterministicMasternode::dummy(id);
        from.add_masternode(mn.clone());
        if id % 100 == 0 {
            to.add_masternode(DeterministicMasternode::dummy(id + 100_000));
        } else if id % 10 == 0 {
            let mut changed = mn;
            changed.state.service.0.set_port(19999);
            to.add_masternode(changed);
        } else {
            to.add_masternode(mn);
        }
    }
    (from, to)
}

fn bench_build_simplified_diff(c: &mut Criterion) {
    let (from, to) = lists();
    c.bench_function("build_simplified_diff", |b| {
        b.iter(|| black_box(build_simplified_diff(black_box(&from), black_box(&to), true)));
    });
}

fn bench_masternode_list_merkle_root(c: &mut Criterion) {
    let (_, to) = lists();
    let list = SimplifiedMasternodeList::from_deterministic_list(&to);
    c.bench_function("masternode_list_merkle_root", |b| {
        b.iter(|| black_box(list.calculate_merkle_root()));
    });
}

fn bench_mn_list_diff_serialize(c: &mut Criterion) {
    let (from, to) = lists();
    let diff = build_simplified_diff(&from, &to, false);
    c.bench_function("mn_list_diff_serialize", |b| {
        b.iter(|| black_box(diff.consensus_encode(&mut EmptyWrite)));
    });

    let raw = serialize(&diff);
    c.bench_function("mn_list_diff_deserialize", |b| {
        b.iter(|| {
            let diff: MnListDiff = deserialize(black_box(&raw)).unwrap();
            black_box(&diff);
        });
    });
}

criterion_group!(
    benches,
    bench_build_simplified_diff,
    bench_masternode_list_merkle_root,
    bench_mn_list_diff_serialize
);
criterion_main!(benches);
