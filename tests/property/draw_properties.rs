//! Property tests for the elimination draw

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use warbot::{draw_round_with, Participant, Roster, Round};

fn roster_strategy() -> impl Strategy<Value = Roster> {
    prop::collection::vec(any::<bool>(), 0..60).prop_map(|flags| {
        // Duplicate names on purpose: identity is positional
        let participants = flags
            .into_iter()
            .enumerate()
            .map(|(i, alive)| Participant::with_status(format!("P{}", i % 3), alive))
            .collect();
        Roster::from_participants(participants).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_draw_kills_exactly_one(roster in roster_strategy(), seed in any::<u64>()) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut after = roster.clone();
        let before_alive = roster.alive_count();

        match draw_round_with(&mut after, &mut rng) {
            Round::GameOver => {
                prop_assert!(before_alive < 2);
                prop_assert_eq!(after, roster);
            }
            Round::Kill(kill) => {
                prop_assert!(before_alive >= 2);
                prop_assert_eq!(after.alive_count(), before_alive - 1);
                prop_assert_eq!(kill.remaining, before_alive - 1);
                prop_assert_ne!(kill.killer_id, kill.victim_id);

                prop_assert!(roster.get(kill.victim_id).unwrap().is_alive());
                prop_assert!(!after.get(kill.victim_id).unwrap().is_alive());
                prop_assert!(after.get(kill.killer_id).unwrap().is_alive());

                // Nobody else changed
                for (id, p) in roster.iter() {
                    if id != kill.victim_id {
                        prop_assert_eq!(after.get(id).unwrap(), p);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_repeated_draws_leave_one(roster in roster_strategy(), seed in any::<u64>()) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut roster = roster;
        let start = roster.alive_count();

        let mut kills = 0;
        while let Round::Kill(_) = draw_round_with(&mut roster, &mut rng) {
            kills += 1;
        }

        prop_assert_eq!(kills, start.saturating_sub(1));
        prop_assert_eq!(roster.alive_count(), start.min(1));
    }
}

#[test]
fn test_victim_and_killer_are_uniform_over_alive() {
    // Dead entries interleaved to check they are never drawn
    let start = Roster::from_participants(vec![
        Participant::new("A"),
        Participant::dead("X"),
        Participant::new("B"),
        Participant::new("C"),
        Participant::dead("Y"),
        Participant::new("D"),
    ])
    .unwrap();
    let alive = start.alive_ids();
    let draws = 8_000;
    let expected = draws / alive.len();
    let tolerance = expected / 10;

    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    let mut victims = vec![0usize; start.len()];
    let mut killers = vec![0usize; start.len()];

    for _ in 0..draws {
        let mut roster = start.clone();
        let kill = draw_round_with(&mut roster, &mut rng).kill().cloned().unwrap();
        victims[kill.victim_id.index()] += 1;
        killers[kill.killer_id.index()] += 1;
    }

    for (id, p) in start.iter() {
        if !p.is_alive() {
            assert_eq!(victims[id.index()], 0, "dead {} drawn as victim", p);
            assert_eq!(killers[id.index()], 0, "dead {} drawn as killer", p);
            continue;
        }
        for (role, counts) in [("victim", &victims), ("killer", &killers)] {
            let n = counts[id.index()];
            assert!(
                n.abs_diff(expected) <= tolerance,
                "{} drawn as {} {} times, expected about {}",
                p,
                role,
                n,
                expected
            );
        }
    }
}
