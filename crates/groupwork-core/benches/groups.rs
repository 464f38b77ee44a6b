use criterion::{black_box, criterion_group, criterion_main, Criterion};
use groupwork_core::prelude::*;
use groupwork_logic::assign::{assign_groups, AssignRequest};
use groupwork_logic::rotate::rotate_groups;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn roster(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("Student {i}")).collect()
}

fn bench_assign(c: &mut Criterion) {
    let roster = roster(120);
    let locked: LockedMembers = roster.iter().step_by(10).map(|n| (n.as_str(), 3)).collect();
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("assign 120 names into 8 groups", |b| {
        b.iter(|| {
            let request = AssignRequest {
                roster: &roster,
                selection: &[],
                config: GroupConfig {
                    num_groups: 8,
                    members_per_group: 0,
                },
                locked: &locked,
                previous: None,
            };
            black_box(assign_groups(&request, &mut rng))
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut room = Classroom::new();
    for name in roster(120) {
        room.add_name(&name);
    }
    room.set_num_groups(12);
    room.generate_groups_with(&mut StdRng::seed_from_u64(2));
    let fixed: FixedSlots = [1, 4, 5, 9].into_iter().collect();

    c.bench_function("rotate 12 groups with 4 fixed", |b| {
        b.iter(|| black_box(rotate_groups(room.groups(), &fixed)))
    });
}

criterion_group!(benches, bench_assign, bench_rotate);
criterion_main!(benches);
