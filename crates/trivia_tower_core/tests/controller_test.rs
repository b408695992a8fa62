//! Tests for the game controller: dealing, matching, scoring and the level lifecycle.

mod common;

use std::collections::HashMap;
use std::time::Duration;

use common::{RecordingPresentation, Shown, card, flip, settle, started, two_pair_level};
use trivia_tower_core::{
    CardState, Control, GameConfig, GameController, GameError, Level, LevelError, LevelPhase,
    Resolution, TimerQueue, VisualState, water_levels,
};

#[test]
fn test_deal_renders_every_label_once() {
    for (index, level) in water_levels().into_iter().enumerate() {
        let game = started(vec![level.clone()]);
        let cards = game
            .presentation()
            .last_cards()
            .expect("cards rendered")
            .to_vec();

        assert_eq!(cards.len(), 2 * level.pair_count(), "level {}", index + 1);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for view in &cards {
            *counts.entry(view.label().as_str()).or_default() += 1;
        }
        for label in level.labels() {
            assert_eq!(counts.get(label), Some(&1), "label {label}");
        }
        assert_eq!(game.deck().len(), cards.len());
    }
}

#[test]
fn test_same_seed_deals_same_order() {
    let deal = |seed| {
        let mut game = GameController::with_seed(
            GameConfig::default(),
            (),
            TimerQueue::new(),
            seed,
        );
        game.start().expect("valid");
        game.deck()
            .cards()
            .iter()
            .map(|c| c.label().clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(deal(9), deal(9));
}

#[test]
fn test_start_pushes_initial_labels() {
    let game = started(vec![two_pair_level()]);
    let shown = &game.presentation().shown;

    assert!(shown.contains(&Shown::Timer("1:00".to_string())));
    assert!(shown.contains(&Shown::Score(0)));
    assert!(shown.contains(&Shown::Hints(1)));
    assert_eq!(game.presentation().last_enabled(Control::Hint), Some(true));
    assert_eq!(game.presentation().last_enabled(Control::NextLevel), Some(false));
    assert_eq!(game.phase(), LevelPhase::Active);
    assert_eq!(*game.state().seconds_remaining(), 60);
    assert_eq!(*game.state().hints_remaining(), 1);
}

#[test]
fn test_two_pair_scenario_scores_thirty_and_completes() {
    let mut game = started(vec![two_pair_level()]);

    flip(&mut game, "A", "a");
    assert_eq!(game.state().score(), 10);
    assert_eq!(*game.state().matched_pair_count(), 1);
    assert!(*game.state().board_locked());
    settle(&mut game);
    assert!(!*game.state().board_locked());

    flip(&mut game, "B", "b");
    assert_eq!(game.state().combo(), 2);
    assert_eq!(game.state().score(), 30);
    assert_eq!(*game.state().matched_pair_count(), 2);
    assert_eq!(game.phase(), LevelPhase::Resolving(Resolution::Won));
    assert_eq!(game.presentation().count(&Shown::Celebration), 1);
}

#[test]
fn test_mismatch_at_zero_stays_zero_and_breaks_combo() {
    let mut game = started(vec![two_pair_level()]);

    flip(&mut game, "A", "B");
    assert_eq!(game.state().score(), 0);
    assert_eq!(game.state().combo(), 0);
    assert_eq!(game.presentation().last_score(), Some(0));

    let a = card(&game, "A");
    let b = card(&game, "B");
    assert_eq!(game.presentation().last_visual(a), Some(VisualState::Error));

    settle(&mut game);
    assert_eq!(game.presentation().last_visual(a), Some(VisualState::Unmatched));
    assert_eq!(game.presentation().last_visual(b), Some(VisualState::Unmatched));
    assert_eq!(*game.deck().get(a).expect("card").state(), CardState::Unmatched);
    assert!(!*game.state().board_locked());
    assert_eq!(*game.state().first_selected(), None);
    assert_eq!(*game.state().second_selected(), None);
}

#[test]
fn test_mismatch_deducts_two_and_resets_combo() {
    let level = Level::from_pairs([("A", "a"), ("B", "b"), ("C", "c")], 60, 0);
    let mut game = started(vec![level]);

    flip(&mut game, "A", "a");
    settle(&mut game);
    assert_eq!(game.state().score(), 10);

    flip(&mut game, "B", "c");
    assert_eq!(game.state().score(), 8);
    assert_eq!(game.state().combo(), 0);
    assert_eq!(game.state().max_combo(), 1);
    settle(&mut game);

    // The streak starts over: the next match pays no bonus.
    flip(&mut game, "B", "b");
    assert_eq!(game.state().score(), 18);
    assert_eq!(game.state().combo(), 1);
}

#[test]
fn test_third_consecutive_match_pays_twenty_five() {
    let level = Level::from_pairs([("A", "a"), ("B", "b"), ("C", "c"), ("D", "d")], 60, 0);
    let mut game = started(vec![level]);

    flip(&mut game, "A", "a");
    settle(&mut game);
    flip(&mut game, "b", "B");
    settle(&mut game);
    let before = game.state().score();
    flip(&mut game, "C", "c");

    assert_eq!(game.state().score() - before, 25);
    assert!(game.presentation().shown.contains(&Shown::Combo(3, 15)));
    assert!(game.presentation().shown.contains(&Shown::ComboHighlight(true)));

    settle(&mut game);
    assert_eq!(
        game.presentation()
            .shown
            .iter()
            .rev()
            .find(|s| matches!(s, Shown::ComboHighlight(_))),
        Some(&Shown::ComboHighlight(false))
    );
}

#[test]
fn test_locked_board_ignores_clicks() {
    let level = Level::from_pairs([("A", "a"), ("B", "b"), ("C", "c")], 60, 0);
    let mut game = started(vec![level]);

    flip(&mut game, "A", "B");
    assert!(*game.state().board_locked());
    let c = card(&game, "C");
    game.select_card(c);
    assert_eq!(*game.deck().get(c).expect("card").state(), CardState::Unmatched);
    assert_eq!(*game.state().second_selected(), Some(card(&game, "B")));
}

#[test]
fn test_double_click_does_not_pair_card_with_itself() {
    let mut game = started(vec![two_pair_level()]);
    let a = card(&game, "A");

    game.select_card(a);
    game.select_card(a);

    assert_eq!(*game.state().first_selected(), Some(a));
    assert_eq!(*game.state().second_selected(), None);
    assert!(!*game.state().board_locked());
    assert_eq!(game.state().score(), 0);
}

#[test]
fn test_matched_card_is_not_selectable() {
    let mut game = started(vec![Level::from_pairs([("A", "a"), ("B", "b")], 60, 0)]);
    flip(&mut game, "A", "a");
    settle(&mut game);

    let a = card(&game, "A");
    game.select_card(a);
    assert_eq!(*game.state().first_selected(), None);
}

#[test]
fn test_unknown_card_is_ignored() {
    let mut game = started(vec![two_pair_level()]);
    game.select_card(trivia_tower_core::CardId(99));
    assert_eq!(*game.state().first_selected(), None);
}

#[test]
fn test_level_complete_dialog_after_delay() {
    let mut game = started(vec![two_pair_level(), two_pair_level()]);
    flip(&mut game, "A", "a");
    settle(&mut game);
    flip(&mut game, "B", "b");

    assert_eq!(game.presentation().count(&Shown::LevelComplete(1)), 0);
    game.advance(Duration::from_millis(600));
    assert_eq!(game.presentation().count(&Shown::LevelComplete(1)), 1);

    // The match lock persists into resolution.
    assert!(*game.state().board_locked());
    assert_eq!(game.presentation().last_enabled(Control::NextLevel), Some(false));

    game.dismiss_level_complete();
    assert_eq!(game.phase(), LevelPhase::NextLevelReady);
    assert_eq!(game.presentation().last_enabled(Control::NextLevel), Some(true));

    game.next_level().expect("level 2 valid");
    assert_eq!(*game.state().current_level_index(), 1);
    assert_eq!(game.phase(), LevelPhase::Active);
    assert_eq!(*game.state().matched_pair_count(), 0);
    assert_eq!(game.state().combo(), 0);
    assert_eq!(game.state().score(), 30);
    assert_eq!(game.state().max_combo(), 2);
}

#[test]
fn test_next_level_ignored_while_playing_or_before_dismissal() {
    let mut game = started(vec![two_pair_level(), two_pair_level()]);
    game.next_level().expect("no-op");
    assert_eq!(*game.state().current_level_index(), 0);

    flip(&mut game, "A", "a");
    settle(&mut game);
    flip(&mut game, "B", "b");
    game.next_level().expect("no-op");
    assert_eq!(*game.state().current_level_index(), 0);
    assert_eq!(game.phase(), LevelPhase::Resolving(Resolution::Won));
}

#[test]
fn test_last_level_dismissal_reports_final_score() {
    let mut game = started(vec![two_pair_level()]);
    flip(&mut game, "A", "a");
    settle(&mut game);
    flip(&mut game, "B", "b");
    game.advance(Duration::from_millis(600));
    game.dismiss_level_complete();

    assert_eq!(game.phase(), LevelPhase::AllLevelsComplete);
    assert_eq!(game.presentation().count(&Shown::AllComplete(30, 2)), 1);
}

#[test]
fn test_countdown_ticks_and_formats() {
    let mut game = started(vec![Level::from_pairs([("A", "a")], 65, 0)]);
    game.advance(Duration::from_secs(6));
    assert_eq!(*game.state().seconds_remaining(), 59);
    assert!(game.presentation().shown.contains(&Shown::Timer("1:04".to_string())));
    assert!(game.presentation().shown.contains(&Shown::Timer("0:59".to_string())));
}

#[test]
fn test_timeout_locks_board_and_offers_next_level() {
    let mut game = started(vec![
        Level::from_pairs([("A", "a"), ("B", "b")], 3, 1),
        two_pair_level(),
    ]);
    game.advance(Duration::from_secs(3));

    assert_eq!(*game.state().seconds_remaining(), 0);
    assert!(*game.state().board_locked());
    assert_eq!(game.phase(), LevelPhase::Resolving(Resolution::TimedOut));
    assert_eq!(game.presentation().count(&Shown::Timeout), 1);
    assert_eq!(game.presentation().count(&Shown::Celebration), 0);
    assert_eq!(game.presentation().last_enabled(Control::NextLevel), Some(true));

    // No further scoring on this level.
    flip(&mut game, "A", "a");
    assert_eq!(game.state().score(), 0);
    assert_eq!(*game.state().matched_pair_count(), 0);
    game.request_hint();
    assert_eq!(*game.state().hints_remaining(), 1);

    // The countdown stopped: more time changes nothing.
    game.advance(Duration::from_secs(5));
    assert_eq!(game.presentation().count(&Shown::Timeout), 1);

    game.next_level().expect("level 2 valid");
    assert_eq!(*game.state().current_level_index(), 1);
    assert!(!*game.state().board_locked());
}

#[test]
fn test_timeout_on_last_level_then_next_ends_game() {
    let mut game = started(vec![Level::from_pairs([("A", "a")], 1, 0)]);
    game.advance(Duration::from_secs(1));
    assert_eq!(game.phase(), LevelPhase::Resolving(Resolution::TimedOut));

    game.next_level().expect("no more levels");
    assert_eq!(game.phase(), LevelPhase::AllLevelsComplete);
    assert_eq!(game.presentation().count(&Shown::AllComplete(0, 0)), 1);
}

#[test]
fn test_pending_reveal_does_not_unlock_after_timeout() {
    let mut game = started(vec![Level::from_pairs([("A", "a"), ("B", "b")], 1, 0)]);
    game.advance(Duration::from_millis(500));
    flip(&mut game, "A", "B");
    game.advance(Duration::from_millis(900));

    assert_eq!(game.phase(), LevelPhase::Resolving(Resolution::TimedOut));
    assert!(*game.state().board_locked());
}

#[test]
fn test_restart_cancels_previous_countdown() {
    let mut game = started(vec![two_pair_level()]);
    game.advance(Duration::from_millis(1500));
    assert_eq!(*game.state().seconds_remaining(), 59);

    game.start_level(0).expect("valid");
    game.advance(Duration::from_secs(2));
    // One countdown only: two ticks, not four.
    assert_eq!(*game.state().seconds_remaining(), 58);
}

#[test]
fn test_reset_restores_initial_values() {
    let mut game = started(vec![two_pair_level(), two_pair_level()]);
    flip(&mut game, "A", "a");
    settle(&mut game);
    flip(&mut game, "B", "b");
    game.advance(Duration::from_millis(600));
    game.dismiss_level_complete();
    game.next_level().expect("valid");
    game.request_hint();
    game.advance(Duration::from_secs(5));

    game.reset().expect("valid");
    assert_eq!(game.state().score(), 0);
    assert_eq!(game.state().combo(), 0);
    assert_eq!(game.state().max_combo(), 0);
    assert_eq!(*game.state().current_level_index(), 0);
    assert_eq!(*game.state().seconds_remaining(), 60);
    assert_eq!(*game.state().hints_remaining(), 1);
    assert_eq!(game.phase(), LevelPhase::Active);

    game.advance(Duration::from_secs(1));
    assert_eq!(*game.state().seconds_remaining(), 59);
}

#[test]
fn test_passive_decay_runs_after_game_ends() {
    let mut game = started(vec![two_pair_level()]);
    flip(&mut game, "A", "a");
    settle(&mut game);
    flip(&mut game, "B", "b");
    game.advance(Duration::from_millis(600));
    game.dismiss_level_complete();
    assert_eq!(game.phase(), LevelPhase::AllLevelsComplete);
    assert_eq!(game.state().score(), 30);

    // Clock is at 1.5 s; the first decay lands at 10 s.
    game.advance(Duration::from_millis(8500));
    assert_eq!(game.state().score(), 25);
    game.advance(Duration::from_secs(50));
    assert_eq!(game.state().score(), 0);
}

#[test]
fn test_teardown_stops_decay() {
    let mut game = started(vec![two_pair_level()]);
    flip(&mut game, "A", "a");
    game.teardown();
    assert_eq!(game.scheduler().pending(), 0);

    game.advance(Duration::from_secs(30));
    assert_eq!(game.state().score(), 10);
}

#[test]
fn test_reset_does_not_double_decay() {
    let mut game = started(vec![two_pair_level()]);
    game.reset().expect("valid");
    game.reset().expect("valid");
    flip(&mut game, "A", "a");
    settle(&mut game);
    flip(&mut game, "B", "b");
    assert_eq!(game.state().score(), 30);

    game.advance(Duration::from_secs(10));
    assert_eq!(game.state().score(), 25);
}

#[test]
fn test_malformed_level_fails_fast() {
    let levels = vec![
        two_pair_level(),
        Level::from_pairs([("A", "a"), ("a", "b")], 60, 0),
    ];
    let mut game = started(levels);
    game.advance(Duration::from_secs(60));

    let err = game.next_level().expect_err("duplicate label");
    assert_eq!(
        err,
        GameError::Level(LevelError::DuplicateLabel {
            number: 2,
            label: "a".to_string(),
        })
    );
    assert_eq!(*game.state().current_level_index(), 0);
}

#[test]
fn test_start_without_levels_is_an_error() {
    let mut game = GameController::new(
        GameConfig::new(Vec::new()),
        RecordingPresentation::default(),
        TimerQueue::new(),
    );
    let err = game.start().expect_err("no levels");
    assert!(matches!(err, GameError::NoSuchLevel { index: 0, count: 0 }));
    assert_eq!(game.phase(), LevelPhase::Idle);
    assert!(game.presentation().shown.is_empty());
    assert_eq!(game.scheduler().pending(), 0);
}

#[test]
fn test_malformed_first_level_arms_no_timers() {
    let mut game = GameController::new(
        GameConfig::new(vec![Level::from_pairs([("A", "A")], 60, 0)]),
        RecordingPresentation::default(),
        TimerQueue::new(),
    );
    assert!(game.start().is_err());
    assert_eq!(game.scheduler().pending(), 0);

    // No decay fires on the idle controller.
    game.advance(Duration::from_secs(30));
    assert!(game.presentation().shown.is_empty());
}
