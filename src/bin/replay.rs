use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use neon_scoreboard::replay;
use neon_scoreboard::roster::{NotificationKind, Roster};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/replay_actions.json"));

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let actions = replay::parse_actions(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let mut roster = Roster::new();
    for action in &actions {
        let outcome = action.apply(&mut roster);
        if let Some(notification) = outcome.notification {
            let level = match notification.kind {
                NotificationKind::Success => "OK",
                NotificationKind::Error => "ERR",
            };
            println!("[{level}] {}", notification.message);
        }
    }

    println!("{}", serde_json::to_string_pretty(&roster)?);
    Ok(())
}
