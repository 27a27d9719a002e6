use std::collections::HashMap;

use campaign_finance_ledger::entities::{Admission, Entry, Leaderboard, LeaderboardLimits};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Weakest first; on equal totals the greater id is weaker.
fn reference_sorted(amts: &HashMap<String, f64>) -> Vec<Entry> {
    let mut entries: Vec<Entry> = amts
        .iter()
        .map(|(id, total)| Entry::new(id.clone(), *total))
        .collect();
    entries.sort_by(|a, b| a.total.total_cmp(&b.total).then_with(|| b.id.cmp(&a.id)));
    entries
}

/// Full-resort admission: add to members, insert below capacity, otherwise
/// replace the true minimum when strictly beaten.
fn reference_admit(
    amts: &mut HashMap<String, f64>,
    capacity: usize,
    id: &str,
    amount: f64,
    absolute: bool,
) {
    if let Some(total) = amts.get_mut(id) {
        if absolute {
            *total = amount;
        } else {
            *total += amount;
        }
        return;
    }
    if amts.len() < capacity {
        amts.insert(id.to_string(), amount);
        return;
    }
    let weakest = reference_sorted(amts).remove(0);
    if amount > weakest.total {
        amts.remove(&weakest.id);
        amts.insert(id.to_string(), amount);
    }
}

fn check_window(board: &Leaderboard, limits: LeaderboardLimits) {
    if board.threshold.is_empty() {
        return;
    }
    assert_eq!(board.len(), limits.capacity, "window on a board below capacity");
    let mut expected = reference_sorted(&board.amts);
    expected.truncate(limits.window);
    assert_eq!(board.threshold, expected);
}

fn run_random_sequence(seed: u64, limits: LeaderboardLimits, ops: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Leaderboard::default();
    let mut reference: HashMap<String, f64> = HashMap::new();

    for _ in 0..ops {
        let id = format!("ID{:02}", rng.gen_range(0..30));
        // Whole-dollar amounts keep the float sums exact.
        let amount = rng.gen_range(-20..200) as f64;
        let absolute = rng.gen_bool(0.15);
        if absolute {
            board.record_total(limits, &id, amount);
        } else {
            board.admit_or_update(limits, &id, amount, 1);
        }
        reference_admit(&mut reference, limits.capacity, &id, amount, absolute);

        assert!(board.len() <= limits.capacity);
        assert_eq!(board.amts, reference, "seed {} diverged", seed);
        check_window(&board, limits);
    }
}

#[test]
fn test_random_sequences_match_full_resort() {
    for seed in 0..20 {
        run_random_sequence(
            seed,
            LeaderboardLimits {
                capacity: 8,
                window: 3,
            },
            400,
        );
    }
}

#[test]
fn test_random_sequences_with_window_equal_to_capacity() {
    for seed in 100..110 {
        run_random_sequence(
            seed,
            LeaderboardLimits {
                capacity: 4,
                window: 4,
            },
            300,
        );
    }
}

#[test]
fn test_random_sequences_with_single_entry_window() {
    for seed in 200..210 {
        run_random_sequence(
            seed,
            LeaderboardLimits {
                capacity: 6,
                window: 1,
            },
            300,
        );
    }
}

const SMALL: LeaderboardLimits = LeaderboardLimits {
    capacity: 3,
    window: 2,
};

fn filled() -> Leaderboard {
    let mut board = Leaderboard::default();
    for (id, amount) in [("A", 10.0), ("B", 20.0), ("C", 30.0)] {
        assert_eq!(board.admit_or_update(SMALL, id, amount, 1), Admission::Added);
    }
    board
}

#[test]
fn test_small_candidate_rejected_and_larger_one_evicts_minimum() {
    let mut board = filled();

    assert_eq!(board.admit_or_update(SMALL, "D", 5.0, 1), Admission::Rejected);
    assert_eq!(board.len(), 3);
    assert_eq!(board.amount("D"), None);

    assert_eq!(
        board.admit_or_update(SMALL, "E", 25.0, 1),
        Admission::Replaced {
            evicted: Entry::new("A", 10.0)
        }
    );
    let expected: HashMap<String, f64> = [("B", 20.0), ("C", 30.0), ("E", 25.0)]
        .into_iter()
        .map(|(id, t)| (id.to_string(), t))
        .collect();
    assert_eq!(board.amts, expected);
}

#[test]
fn test_member_growth_moves_the_admission_bar() {
    let mut board = filled();
    board.admit_or_update(SMALL, "D", 5.0, 1);
    board.admit_or_update(SMALL, "E", 25.0, 1);

    assert_eq!(board.admit_or_update(SMALL, "B", 50.0, 1), Admission::Added);
    assert_eq!(board.amount("B"), Some(70.0));
    assert_eq!(board.count("B"), Some(2));
    assert_eq!(
        board.threshold,
        vec![Entry::new("E", 25.0), Entry::new("C", 30.0)]
    );

    assert_eq!(board.admit_or_update(SMALL, "F", 21.0, 1), Admission::Rejected);
    assert_eq!(board.len(), 3);
    assert_eq!(board.amount("F"), None);
}
