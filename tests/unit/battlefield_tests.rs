//! Unit tests for the battlefield wrapper

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use warbot::config::BattlefieldConfig;
use warbot::{Battlefield, Participant, Round, WarbotError, MAX_PARTICIPANTS};

use crate::mocks::write_roster;

#[test]
fn test_open_reads_roster_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\nBob\n#Carol\nDave\n");

    let field = Battlefield::open(&path);
    assert_eq!(field.participants().len(), 4);
    assert_eq!(field.alive_count(), 3);
    assert!(!field.is_over());
    assert_eq!(field.roster_path(), path.as_path());
}

#[test]
fn test_from_config_with_picture_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\nBob\n");
    let pictures = dir.path().join("pictures");

    let config = BattlefieldConfig {
        roster_path: path.clone(),
        picture_dir: Some(pictures.clone()),
    };
    let field = Battlefield::from_config(&config);
    assert_eq!(field.picture_dir(), pictures.as_path());
    assert_eq!(field.picture_path("png"), pictures.join("2remaining.png"));
}

#[test]
fn test_reload_replaces_roster() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\nBob\n");
    let mut field = Battlefield::open(&path);
    assert_eq!(field.participants().len(), 2);

    std::fs::write(&path, "Carol\n#Dave\nErin\n").unwrap();
    field.reload().unwrap();

    let names: Vec<&str> = field.participants().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Carol", "Dave", "Erin"]);
    assert_eq!(field.alive_count(), 2);
}

#[test]
fn test_set_participants_rejects_101() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\nBob\n");
    let mut field = Battlefield::open(&path);

    let too_many = (0..=MAX_PARTICIPANTS).map(|i| Participant::new(format!("P{}", i))).collect();
    let err = field.set_participants(too_many).unwrap_err();
    assert!(matches!(err, WarbotError::InvalidArgument { .. }));
    assert_eq!(field.participants().len(), 2);
    assert_eq!(field.alive_count(), 2);
}

#[test]
fn test_fight_until_over() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "A\nB\nC\nD\n#E\n");
    let mut field = Battlefield::open(&path);
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    let mut kills = 0;
    while let Round::Kill(kill) = field.fight_with(&mut rng) {
        kills += 1;
        assert_eq!(kill.remaining, field.alive_count());
    }

    assert_eq!(kills, 3);
    assert!(field.is_over());
    assert_eq!(field.alive_count(), 1);
    assert!(field.fight_with(&mut rng).is_game_over());
}

#[test]
fn test_persist_writes_dead_marks() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "A\nB\n");
    let mut field = Battlefield::open(&path);

    let kill = match field.fight() {
        Round::Kill(kill) => kill,
        Round::GameOver => panic!("two alive participants must produce a kill"),
    };
    assert!(kill.ends_game());
    field.persist().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains(&format!("# {}\n", kill.victim)));
    assert!(text.contains(&format!("{}\n", kill.killer)));
    assert_eq!(text.lines().count(), 2);
}
