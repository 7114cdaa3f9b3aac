use neon_scoreboard::roster::{Confirmation, NotificationKind, Roster, normalize_name};

fn scores(roster: &Roster) -> Vec<u32> {
    roster.players().iter().map(|p| p.score).collect()
}

#[test]
fn new_roster_has_three_default_players() {
    let roster = Roster::new();
    let names: Vec<&str> = roster.players().iter().map(|p| p.name.as_str()).collect();
    let ids: Vec<u32> = roster.players().iter().map(|p| p.id).collect();
    assert_eq!(names, ["PLAYER 1", "PLAYER 2", "PLAYER 3"]);
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(scores(&roster), [0, 0, 0]);
    assert_eq!(roster.next_id(), 4);
    assert_eq!(roster.default_name_for_next(), "PLAYER 4");
}

#[test]
fn three_increments_only_touch_that_player() {
    let mut roster = Roster::new();
    for _ in 0..3 {
        let outcome = roster.adjust_score(2, 1);
        assert!(outcome.rerender);
        assert_eq!(outcome.pulse, Some(2));
        assert!(outcome.notification.is_none());
    }
    assert_eq!(scores(&roster), [0, 3, 0]);
}

#[test]
fn score_never_goes_negative() {
    let mut roster = Roster::new();
    let deltas = [-1, 2, -5, 1, -1, -1, 3, -2, -2, 10, -100];
    for delta in deltas {
        roster.adjust_score(1, delta);
        let score = roster.get(1).map(|p| p.score).unwrap_or_default();
        let expected_floor = i64::from(score).max(0);
        assert_eq!(i64::from(score), expected_floor);
    }
    assert_eq!(roster.get(1).map(|p| p.score), Some(0));

    roster.adjust_score(1, 4);
    roster.adjust_score(1, -3);
    assert_eq!(roster.get(1).map(|p| p.score), Some(1));
}

#[test]
fn adjusting_unknown_id_is_a_noop() {
    let mut roster = Roster::new();
    let outcome = roster.adjust_score(99, 1);
    assert!(outcome.is_noop());
    assert_eq!(scores(&roster), [0, 0, 0]);
}

#[test]
fn large_deltas_saturate_instead_of_wrapping() {
    let mut roster = Roster::new();
    roster.adjust_score(1, i64::from(u32::MAX) + 10);
    assert_eq!(roster.get(1).map(|p| p.score), Some(u32::MAX));
}

#[test]
fn rename_trims_and_uppercases() {
    let mut roster = Roster::new();
    let outcome = roster.rename_player(2, "  bob  ");
    assert!(outcome.rerender);
    assert!(outcome.notification.is_none());
    assert_eq!(roster.get(2).map(|p| p.name.as_str()), Some("BOB"));
}

#[test]
fn rename_with_blank_name_keeps_original() {
    let mut roster = Roster::new();
    assert!(roster.rename_player(1, "   ").is_noop());
    assert!(roster.rename_player(1, "").is_noop());
    assert_eq!(roster.get(1).map(|p| p.name.as_str()), Some("PLAYER 1"));
}

#[test]
fn rename_unknown_id_is_a_noop() {
    let mut roster = Roster::new();
    assert!(roster.rename_player(42, "ghost").is_noop());
    assert!(roster.players().iter().all(|p| p.name != "GHOST"));
}

#[test]
fn add_player_appends_with_next_id() {
    let mut roster = Roster::new();
    let prior_next = roster.next_id();
    let outcome = roster.add_player(Some("dj max"));

    assert!(outcome.rerender);
    let note = outcome.notification.expect("add should notify");
    assert_eq!(note.kind, NotificationKind::Success);
    assert_eq!(note.message, "DJ MAX added to the game!");

    let last = roster.players().last().expect("roster is never empty");
    assert_eq!(last.id, prior_next);
    assert_eq!(last.name, "DJ MAX");
    assert_eq!(last.score, 0);
    assert_eq!(roster.next_id(), prior_next + 1);
    assert_eq!(roster.len(), 4);
}

#[test]
fn add_player_with_blank_or_missing_name_changes_nothing() {
    let mut roster = Roster::new();
    for proposed in [Some(""), Some("   "), Some("\t\n"), None] {
        let outcome = roster.add_player(proposed);
        assert!(outcome.is_noop());
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.next_id(), 4);
    }
}

#[test]
fn remove_last_pops_tail_and_notifies() {
    let mut roster = Roster::new();
    let outcome = roster.remove_last_player();
    assert!(outcome.rerender);
    let note = outcome.notification.expect("remove should notify");
    assert_eq!(note.kind, NotificationKind::Success);
    assert_eq!(note.message, "PLAYER 3 removed from the game!");
    let ids: Vec<u32> = roster.players().iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn remove_last_refuses_on_single_player() {
    let mut roster = Roster::new();
    roster.remove_last_player();
    roster.remove_last_player();
    assert_eq!(roster.len(), 1);
    let before = roster.players().to_vec();

    let outcome = roster.remove_last_player();
    assert!(!outcome.rerender);
    let note = outcome.notification.expect("refusal should notify");
    assert!(note.is_error());
    assert_eq!(note.message, "Cannot remove the last player!");
    assert_eq!(roster.players(), before.as_slice());
}

#[test]
fn ids_are_never_reused_after_removal() {
    let mut roster = Roster::new();
    roster.remove_last_player();
    roster.remove_last_player();
    roster.add_player(Some("a"));
    roster.remove_last_player();
    roster.add_player(Some("b"));

    let ids: Vec<u32> = roster.players().iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 5]);
    assert_eq!(roster.next_id(), 6);
}

#[test]
fn next_id_grows_by_one_per_successful_add() {
    let mut roster = Roster::new();
    let mut seen = vec![1, 2, 3];
    for (i, name) in ["x", "", "y", "  ", "z"].iter().enumerate() {
        let before = roster.next_id();
        let added = !roster.add_player(Some(*name)).is_noop();
        if added {
            assert_eq!(roster.next_id(), before + 1);
            let id = roster.players().last().map(|p| p.id).unwrap_or_default();
            assert!(!seen.contains(&id), "id {id} reused at step {i}");
            seen.push(id);
        } else {
            assert_eq!(roster.next_id(), before);
        }
        if i % 2 == 0 {
            roster.remove_last_player();
        }
    }
}

#[test]
fn confirmed_reset_zeroes_scores_and_keeps_players() {
    let mut roster = Roster::new();
    roster.adjust_score(1, 2);
    roster.adjust_score(2, 5);
    roster.add_player(Some("dj max"));
    roster.adjust_score(4, 1);
    let before: Vec<(u32, String)> = roster
        .players()
        .iter()
        .map(|p| (p.id, p.name.clone()))
        .collect();

    let outcome = roster.reset_all_scores_if(Confirmation::Granted);
    assert!(outcome.rerender);
    assert_eq!(
        outcome.notification.map(|n| n.message).as_deref(),
        Some("All scores have been reset!")
    );
    assert_eq!(scores(&roster), [0, 0, 0, 0]);
    let after: Vec<(u32, String)> = roster
        .players()
        .iter()
        .map(|p| (p.id, p.name.clone()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn declined_reset_changes_nothing() {
    let mut roster = Roster::new();
    roster.adjust_score(3, 7);
    let outcome = roster.reset_all_scores_if(Confirmation::from(false));
    assert!(outcome.is_noop());
    assert_eq!(scores(&roster), [0, 0, 7]);
}

#[test]
fn normalize_name_rules() {
    assert_eq!(normalize_name(Some("  Dj  Max ")).as_deref(), Some("DJ  MAX"));
    assert_eq!(normalize_name(Some("   ")), None);
    assert_eq!(normalize_name(None), None);
}
