//! Groupwork Headless Property Harness
//!
//! Sweeps the group engine's invariants over many seeds and settings.
//! Runs entirely in-process with no storage and no UI.
//!
//! Usage:
//!   cargo run -p groupwork-simtest
//!   cargo run -p groupwork-simtest -- --verbose
//!   cargo run -p groupwork-simtest -- --roster class.json --seeds 500

use std::collections::{HashMap, HashSet};

use groupwork_core::classroom::Classroom;
use groupwork_core::persistence::{export_entries, import_entries};
use groupwork_logic::assign::{assign_groups, AssignRequest};
use groupwork_logic::config::GroupConfig;
use groupwork_logic::group::GroupSet;
use groupwork_logic::locks::{FixedSlots, LockedMembers};
use groupwork_logic::rotate::rotate_groups;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Sample roster (bundled default) ─────────────────────────────────────
const SAMPLE_ROSTER_JSON: &str = include_str!("../../../data/sample_roster.json");

const DEFAULT_SEEDS: u64 = 200;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    roster_path: Option<String>,
    seeds: u64,
}

fn parse_args() -> Options {
    let mut options = Options {
        verbose: false,
        roster_path: None,
        seeds: DEFAULT_SEEDS,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--roster" => options.roster_path = args.next(),
            "--seeds" => {
                options.seeds = args
                    .next()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SEEDS)
            }
            other => log::warn!("Ignoring unknown argument {}", other),
        }
    }
    options
}

fn main() {
    env_logger::init();
    let options = parse_args();
    println!("=== Groupwork Property Harness ===\n");

    let mut results = Vec::new();

    // 1. Roster loading
    let roster = match load_roster(&options, &mut results) {
        Some(r) => r,
        None => {
            report(&results, options.verbose);
            std::process::exit(1);
        }
    };

    // 2. Assign coverage sweep
    results.extend(validate_coverage(&roster, options.seeds));

    // 3. Lock honoring sweep
    results.extend(validate_locks(&roster, options.seeds));

    // 4. Capacity-bounded assignment
    results.extend(validate_capacity(&roster, options.seeds));

    // 5. Rotation sweep
    results.extend(validate_rotation(&roster, options.seeds));

    // 6. Worked examples
    results.extend(validate_examples(options.seeds));

    // 7. Session + persistence
    results.extend(validate_session(&roster));

    let failed = report(&results, options.verbose);
    if failed > 0 {
        std::process::exit(1);
    }
}

fn report(results: &[TestResult], verbose: bool) -> usize {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );
    failed
}

fn check(name: &str, failures: Vec<String>, ok_detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            ok_detail
        } else {
            format!("{} failures, first: {}", failures.len(), failures[0])
        },
    }
}

fn assign(
    roster: &[String],
    config: GroupConfig,
    locked: &LockedMembers,
    rng: &mut impl Rng,
) -> Option<groupwork_logic::assign::Assignment> {
    let request = AssignRequest {
        roster,
        selection: &[],
        config,
        locked,
        previous: None,
    };
    assign_groups(&request, rng)
}

fn member_counts(groups: &GroupSet) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for name in groups.all_members() {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}

// ── 1. Roster ───────────────────────────────────────────────────────────

fn load_roster(options: &Options, results: &mut Vec<TestResult>) -> Option<Vec<String>> {
    println!("--- Roster ---");
    let (source, raw) = match &options.roster_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(raw) => (path.clone(), raw),
            Err(e) => {
                results.push(TestResult {
                    name: "roster_read".into(),
                    passed: false,
                    detail: format!("cannot read {}: {}", path, e),
                });
                return None;
            }
        },
        None => ("bundled sample".to_string(), SAMPLE_ROSTER_JSON.to_string()),
    };

    let roster: Vec<String> = match serde_json::from_str(&raw) {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult {
                name: "roster_parse".into(),
                passed: false,
                detail: format!("JSON parse error in {}: {}", source, e),
            });
            return None;
        }
    };

    results.push(TestResult {
        name: "roster_not_empty".into(),
        passed: !roster.is_empty(),
        detail: format!("{} names loaded from {}", roster.len(), source),
    });

    let unique: HashSet<&String> = roster.iter().collect();
    results.push(TestResult {
        name: "roster_unique".into(),
        passed: unique.len() == roster.len(),
        detail: format!("{} unique of {}", unique.len(), roster.len()),
    });

    if roster.is_empty() {
        None
    } else {
        Some(roster)
    }
}

// ── 2. Coverage ─────────────────────────────────────────────────────────

fn validate_coverage(roster: &[String], seeds: u64) -> Vec<TestResult> {
    println!("--- Assign coverage ---");
    let locked = LockedMembers::new();
    let mut failures = Vec::new();
    let mut runs = 0;

    for num_groups in 1..=roster.len().min(10) {
        for seed in 0..seeds {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = GroupConfig {
                num_groups,
                members_per_group: 0,
            };
            runs += 1;
            let Some(result) = assign(roster, config, &locked, &mut rng) else {
                failures.push(format!("{} groups seed {}: no result", num_groups, seed));
                continue;
            };
            let counts = member_counts(&result.groups);
            if counts.len() != roster.len() || counts.values().any(|&c| c != 1) {
                failures.push(format!(
                    "{} groups seed {}: {} distinct placed",
                    num_groups,
                    seed,
                    counts.len()
                ));
            }
        }
    }

    vec![check(
        "assign_coverage",
        failures,
        format!("{} runs placed every name exactly once", runs),
    )]
}

// ── 3. Locks ────────────────────────────────────────────────────────────

fn validate_locks(roster: &[String], seeds: u64) -> Vec<TestResult> {
    println!("--- Locked members ---");
    let mut failures = Vec::new();
    let mut ignored_failures = Vec::new();

    for seed in 0..seeds {
        let mut rng = StdRng::seed_from_u64(seed);
        let num_groups = rng.gen_range(1..=6);
        let mut locked = LockedMembers::new();
        for name in roster {
            if rng.gen_bool(0.2) {
                locked.lock(name.as_str(), rng.gen_range(0..num_groups + 2));
            }
        }
        let config = GroupConfig {
            num_groups,
            members_per_group: 0,
        };
        let Some(result) = assign(roster, config, &locked, &mut rng) else {
            failures.push(format!("seed {}: no result", seed));
            continue;
        };

        for (name, slot) in locked.iter() {
            if slot < num_groups {
                if !result.groups.get(slot).is_some_and(|g| g.contains(name)) {
                    failures.push(format!("seed {}: {} not in slot {}", seed, name, slot));
                }
            } else if result.groups.slot_of(name).is_none() {
                ignored_failures.push(format!("seed {}: out-of-range lock dropped {}", seed, name));
            }
        }
    }

    vec![
        check(
            "locks_honored",
            failures,
            format!("{} seeds, every in-range lock honored", seeds),
        ),
        check(
            "out_of_range_locks_fall_through",
            ignored_failures,
            "names with out-of-range locks are still placed".into(),
        ),
    ]
}

// ── 4. Capacity ─────────────────────────────────────────────────────────

fn validate_capacity(roster: &[String], seeds: u64) -> Vec<TestResult> {
    println!("--- Capacity ---");
    let locked = LockedMembers::new();
    let mut failures = Vec::new();
    let mut total_unplaced = 0;

    for seed in 0..seeds {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = GroupConfig {
            num_groups: rng.gen_range(1..=6),
            members_per_group: rng.gen_range(1..=6),
        };
        let Some(result) = assign(roster, config, &locked, &mut rng) else {
            failures.push(format!("seed {}: no result", seed));
            continue;
        };

        if result.groups.iter().any(|g| g.len() > config.members_per_group) {
            failures.push(format!("seed {}: slot over capacity {:?}", seed, config));
        }
        if result.groups.member_count() + result.unplaced.len() != roster.len() {
            failures.push(format!("seed {}: names lost", seed));
        }
        if result.unplaced.len() < config.expected_unplaced(roster.len()) {
            failures.push(format!("seed {}: fewer unplaced than capacity allows", seed));
        }
        total_unplaced += result.unplaced.len();
    }

    vec![check(
        "capacity_bounded",
        failures,
        format!("{} seeds, {} names left unplaced overall", seeds, total_unplaced),
    )]
}

// ── 5. Rotation ─────────────────────────────────────────────────────────

fn validate_rotation(roster: &[String], seeds: u64) -> Vec<TestResult> {
    println!("--- Rotation ---");
    let locked = LockedMembers::new();
    let mut permutation_failures = Vec::new();
    let mut fixed_failures = Vec::new();
    let mut metadata_failures = Vec::new();

    for seed in 0..seeds {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = GroupConfig {
            num_groups: rng.gen_range(1..=8),
            members_per_group: 0,
        };
        let Some(result) = assign(roster, config, &locked, &mut rng) else {
            continue;
        };
        let mut groups = result.groups;
        for slot in 0..groups.len() {
            groups.set_title(slot, &format!("Table {}", slot + 10));
            groups.set_color(slot, rng.gen_range(0..8));
        }
        let fixed: FixedSlots = (0..config.num_groups)
            .filter(|_| rng.gen_bool(0.3))
            .collect();

        let rotated = rotate_groups(&groups, &fixed);

        if member_counts(&rotated) != member_counts(&groups) {
            permutation_failures.push(format!("seed {}: member multiset changed", seed));
        }
        for slot in fixed.iter() {
            if rotated.get(slot) != groups.get(slot) {
                fixed_failures.push(format!("seed {}: fixed slot {} changed", seed, slot));
            }
        }
        if fixed.len() + 1 == config.num_groups {
            let free = (0..config.num_groups).find(|s| !fixed.contains(*s));
            if let Some(free) = free {
                if rotated.get(free) != groups.get(free) {
                    fixed_failures.push(format!("seed {}: lone free slot moved", seed));
                }
            }
        }
        for (before, after) in groups.iter().zip(rotated.iter()) {
            if before.id != after.id
                || before.title != after.title
                || before.color_index != after.color_index
            {
                metadata_failures.push(format!("seed {}: slot {} metadata moved", seed, before.id));
            }
        }
    }

    vec![
        check(
            "rotation_is_permutation",
            permutation_failures,
            format!("{} seeds, no member created or lost", seeds),
        ),
        check(
            "rotation_fixed_invariance",
            fixed_failures,
            "fixed slots never changed".into(),
        ),
        check(
            "rotation_metadata_stable",
            metadata_failures,
            "id/title/color stayed with each slot".into(),
        ),
    ]
}

// ── 6. Worked examples ──────────────────────────────────────────────────

fn validate_examples(seeds: u64) -> Vec<TestResult> {
    println!("--- Examples ---");
    let mut results = Vec::new();
    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // Lock A to slot 1 with two auto groups.
    let roster = names(&["A", "B", "C", "D", "E"]);
    let locked: LockedMembers = [("A", 1)].into_iter().collect();
    let config = GroupConfig {
        num_groups: 2,
        members_per_group: 0,
    };
    let lock_ok = (0..seeds).all(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        assign(&roster, config, &locked, &mut rng).is_some_and(|r| {
            r.groups.slot_of("A") == Some(1) && r.groups.member_count() == 5
        })
    });
    results.push(TestResult {
        name: "example_lock".into(),
        passed: lock_ok,
        detail: "A always lands in slot 1 with all five placed".into(),
    });

    // Rotate three groups with the middle one fixed.
    let groups = GroupSet::from_groups(
        [["A", "B"], ["C", "D"], ["E", "F"]]
            .iter()
            .enumerate()
            .map(|(i, m)| groupwork_logic::group::Group {
                members: names(m),
                ..groupwork_logic::group::Group::new(i)
            })
            .collect(),
    );
    let fixed: FixedSlots = [1].into_iter().collect();
    let rotated = rotate_groups(&groups, &fixed);
    let layout: Vec<Vec<String>> = rotated.iter().map(|g| g.members.clone()).collect();
    results.push(TestResult {
        name: "example_rotate".into(),
        passed: layout == vec![names(&["E", "F"]), names(&["C", "D"]), names(&["A", "B"])],
        detail: format!("{:?}", layout),
    });

    // Three single seats for four names.
    let roster = names(&["A", "B", "C", "D"]);
    let config = GroupConfig {
        num_groups: 3,
        members_per_group: 1,
    };
    let empty = LockedMembers::new();
    let unplaced_ok = (0..seeds).all(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        assign(&roster, config, &empty, &mut rng).is_some_and(|r| r.unplaced.len() == 1)
    });
    results.push(TestResult {
        name: "example_unplaced".into(),
        passed: unplaced_ok,
        detail: "exactly one name left out every time".into(),
    });

    results
}

// ── 7. Session ──────────────────────────────────────────────────────────

fn validate_session(roster: &[String]) -> Vec<TestResult> {
    println!("--- Session & persistence ---");
    let mut results = Vec::new();

    let mut room = Classroom::new();
    for name in roster {
        room.add_name(name);
    }
    room.set_num_groups(4);
    room.toggle_fixed_group(2);
    room.toggle_locked_member(&roster[0], 3);
    let generated = room.generate_groups_with(&mut StdRng::seed_from_u64(99));
    room.set_group_title(0, "Window seats");
    room.rotate_groups();

    results.push(TestResult {
        name: "session_generate".into(),
        passed: generated && room.groups().member_count() == roster.len(),
        detail: format!(
            "{} groups, {} members",
            room.groups().len(),
            room.groups().member_count()
        ),
    });

    let mut buffer = Vec::new();
    let binary = room.save(&mut buffer).and_then(|_| {
        let mut loaded = Classroom::new();
        loaded.load(&buffer[..])?;
        Ok(loaded)
    });
    results.push(match binary {
        Ok(loaded) => TestResult {
            name: "session_binary_roundtrip".into(),
            passed: loaded.groups() == room.groups() && loaded.locked() == room.locked(),
            detail: format!("{} bytes", buffer.len()),
        },
        Err(e) => TestResult {
            name: "session_binary_roundtrip".into(),
            passed: false,
            detail: e.to_string(),
        },
    });

    let storage = export_entries(&room.snapshot()).and_then(|entries| {
        let store: HashMap<&str, String> = entries.into_iter().collect();
        import_entries(|key| store.get(key).cloned())
    });
    results.push(match storage {
        Ok(data) => TestResult {
            name: "session_storage_roundtrip".into(),
            passed: data.groups == *room.groups() && data.fixed == *room.fixed(),
            detail: format!("{} names via storage keys", data.roster.len()),
        },
        Err(e) => TestResult {
            name: "session_storage_roundtrip".into(),
            passed: false,
            detail: e.to_string(),
        },
    });

    results
}
