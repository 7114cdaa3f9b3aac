use serde::Deserialize;

use crate::roster::{Confirmation, Outcome, PlayerId, Roster};

/// One scripted roster operation, as read from a replay file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    Add {
        #[serde(default)]
        name: Option<String>,
    },
    Adjust {
        id: PlayerId,
        delta: i64,
    },
    Rename {
        id: PlayerId,
        name: String,
    },
    RemoveLast,
    Reset {
        #[serde(default)]
        confirm: bool,
    },
}

impl Action {
    pub fn apply(&self, roster: &mut Roster) -> Outcome {
        match self {
            Action::Add { name } => roster.add_player(name.as_deref()),
            Action::Adjust { id, delta } => roster.adjust_score(*id, *delta),
            Action::Rename { id, name } => roster.rename_player(*id, name),
            Action::RemoveLast => roster.remove_last_player(),
            Action::Reset { confirm } => roster.reset_all_scores_if(Confirmation::from(*confirm)),
        }
    }
}

pub fn parse_actions(raw: &str) -> serde_json::Result<Vec<Action>> {
    serde_json::from_str(raw)
}
