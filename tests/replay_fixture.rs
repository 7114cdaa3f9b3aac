use std::fs;
use std::path::Path;

use neon_scoreboard::replay::{self, Action};
use neon_scoreboard::roster::Roster;

fn load_fixture() -> Vec<Action> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/replay_actions.json");
    let raw = fs::read_to_string(&path).expect("fixture readable");
    replay::parse_actions(&raw).expect("fixture parses")
}

#[test]
fn fixture_replays_to_expected_roster() {
    let actions = load_fixture();
    assert_eq!(actions.len(), 10);

    let mut roster = Roster::new();
    let messages: Vec<String> = actions
        .iter()
        .filter_map(|action| action.apply(&mut roster).notification)
        .map(|n| n.message)
        .collect();

    assert_eq!(
        messages,
        ["DJ MAX added to the game!", "DJ MAX removed from the game!"]
    );
    let players: Vec<(u32, &str, u32)> = roster
        .players()
        .iter()
        .map(|p| (p.id, p.name.as_str(), p.score))
        .collect();
    assert_eq!(
        players,
        [(1, "PLAYER 1", 0), (2, "PLAYER 2", 3), (3, "BOB", 0)]
    );
    assert_eq!(roster.next_id(), 5);
}

#[test]
fn missing_optional_fields_take_defaults() {
    let actions = replay::parse_actions(r#"[{"op":"add"},{"op":"reset"}]"#).expect("parses");
    assert_eq!(
        actions,
        [Action::Add { name: None }, Action::Reset { confirm: false }]
    );

    let mut roster = Roster::new();
    for action in &actions {
        assert!(action.apply(&mut roster).is_noop());
    }
    assert_eq!(roster.len(), 3);
}

#[test]
fn unknown_op_is_rejected() {
    assert!(replay::parse_actions(r#"[{"op":"shuffle"}]"#).is_err());
}
