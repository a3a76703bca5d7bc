//! A full round against real files with mock collaborators

use std::path::Path;

use warbot::config::RenderConfig;
use warbot::{Battlefield, ImageFormat, RoundReport, RoundRunner, Roster, TableRenderer};

use crate::mocks::{write_roster, FailingRenderer, RecordingPoster};

fn png_renderer() -> Box<TableRenderer> {
    Box::new(TableRenderer::new(RenderConfig {
        format: ImageFormat::Png,
        ..RenderConfig::default()
    }))
}

fn runner(roster_path: &Path, poster: &RecordingPoster) -> RoundRunner {
    RoundRunner::new(Battlefield::open(roster_path), png_renderer(), Box::new(poster.clone()))
}

#[tokio::test]
async fn test_round_persists_renders_and_posts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\nBob\n#Carol\nDave\n");
    let poster = RecordingPoster::new();
    let mut runner = runner(&path, &poster);

    let report = runner.run_round().await;
    let (kill, text, image, receipt) = match report {
        RoundReport::Played {
            kill,
            text,
            persisted,
            image,
            receipt,
        } => {
            assert!(persisted);
            (kill, text, image, receipt)
        }
        RoundReport::GameOver => panic!("three alive participants must produce a kill"),
    };

    assert_eq!(kill.remaining, 2);
    assert_eq!(text, format!("{} kills {} [2 remaining]", kill.killer, kill.victim));
    assert_eq!(receipt.unwrap().id, "post-1");

    // Roster file now carries the new death
    let saved = Roster::load(&path).unwrap();
    assert_eq!(saved.alive_count(), 2);
    assert!(!saved.get(kill.victim_id).unwrap().is_alive());
    assert!(saved.get(kill.killer_id).unwrap().is_alive());

    let image = image.unwrap();
    assert_eq!(image, dir.path().join("2remaining.png"));
    assert!(image.exists());

    let posts = poster.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].text, text);
    assert_eq!(posts[0].image.as_deref(), Some(image.as_path()));
    assert!(posts[0].image_existed);
}

#[tokio::test]
async fn test_failed_post_still_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\nBob\nCarol\n");
    let poster = RecordingPoster::failing();
    let mut runner = runner(&path, &poster);

    match runner.run_round().await {
        RoundReport::Played {
            persisted, receipt, ..
        } => {
            assert!(persisted);
            assert!(receipt.is_none());
        }
        RoundReport::GameOver => panic!("expected a kill"),
    }

    assert_eq!(poster.count(), 1);
    assert_eq!(Roster::load(&path).unwrap().alive_count(), 2);
    assert_eq!(runner.battlefield().alive_count(), 2);
}

#[tokio::test]
async fn test_render_failure_posts_without_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\nBob\nCarol\n");
    let poster = RecordingPoster::new();
    let mut runner = RoundRunner::new(
        Battlefield::open(&path),
        Box::new(FailingRenderer),
        Box::new(poster.clone()),
    );

    match runner.run_round().await {
        RoundReport::Played { image, receipt, .. } => {
            assert!(image.is_none());
            assert!(receipt.is_some());
        }
        RoundReport::GameOver => panic!("expected a kill"),
    }

    let posts = poster.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].image, None);
}

#[tokio::test]
async fn test_persist_failure_still_posts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\nBob\nCarol\n");
    let poster = RecordingPoster::new();
    let mut runner = runner(&path, &poster);
    runner
        .battlefield_mut()
        .set_roster_path(dir.path().join("gone").join("battle.txt"));

    match runner.run_round().await {
        RoundReport::Played { persisted, receipt, .. } => {
            assert!(!persisted);
            assert!(receipt.is_some());
        }
        RoundReport::GameOver => panic!("expected a kill"),
    }

    // Original file untouched
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Alice\nBob\nCarol\n");
    assert_eq!(poster.count(), 1);
}

#[tokio::test]
async fn test_game_over_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\n#Bob\n#Carol\n");
    let poster = RecordingPoster::new();
    let mut runner = runner(&path, &poster);

    assert!(runner.run_round().await.is_game_over());
    assert_eq!(poster.count(), 0);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Alice\n#Bob\n#Carol\n");
    assert!(!dir.path().join("1remaining.png").exists());
}

#[tokio::test]
async fn test_final_kill_announces_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(dir.path(), "Alice\nBob\n");
    let poster = RecordingPoster::new();
    let mut runner = runner(&path, &poster);

    match runner.run_round().await {
        RoundReport::Played { text, kill, .. } => {
            assert!(kill.ends_game());
            assert!(text.ends_with("[1 remaining]. The game has ended"));
        }
        RoundReport::GameOver => panic!("expected a kill"),
    }
    assert!(runner.battlefield().is_over());
    assert!(dir.path().join("1remaining.png").exists());
}
