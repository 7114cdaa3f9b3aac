use serde::{Deserialize, Serialize};

pub type PlayerId = u32;

pub const DEFAULT_PLAYERS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// What the presentation layer should do after a roster operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    pub rerender: bool,
    pub pulse: Option<PlayerId>,
    pub notification: Option<Notification>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    fn rerender() -> Self {
        Self {
            rerender: true,
            ..Self::default()
        }
    }

    fn with_pulse(mut self, id: PlayerId) -> Self {
        self.pulse = Some(id);
        self
    }

    fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }

    pub fn is_noop(&self) -> bool {
        !self.rerender && self.pulse.is_none() && self.notification.is_none()
    }
}

/// Answer to the "reset all scores?" question, collected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confirmation {
    Granted,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Granted
        } else {
            Confirmation::Declined
        }
    }
}

/// Ordered player list plus the id counter.
///
/// Ids are handed out monotonically and never reused, the roster never drops
/// below one player, and scores are floored at zero.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    players: Vec<Player>,
    next_id: PlayerId,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        let players = (1..=DEFAULT_PLAYERS)
            .map(|id| Player {
                id,
                name: format!("PLAYER {id}"),
                score: 0,
            })
            .collect();
        Self {
            players,
            next_id: DEFAULT_PLAYERS + 1,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn next_id(&self) -> PlayerId {
        self.next_id
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Pre-fill for the add-player prompt.
    pub fn default_name_for_next(&self) -> String {
        format!("PLAYER {}", self.next_id)
    }

    pub fn adjust_score(&mut self, id: PlayerId, delta: i64) -> Outcome {
        let Some(player) = self.get_mut(id) else {
            return Outcome::none();
        };
        let next = (i64::from(player.score) + delta).max(0);
        player.score = u32::try_from(next).unwrap_or(u32::MAX);
        Outcome::rerender().with_pulse(id)
    }

    pub fn rename_player(&mut self, id: PlayerId, proposed: &str) -> Outcome {
        let Some(name) = normalize_name(Some(proposed)) else {
            return Outcome::none();
        };
        let Some(player) = self.get_mut(id) else {
            return Outcome::none();
        };
        player.name = name;
        Outcome::rerender()
    }

    /// `None` stands for a cancelled prompt.
    pub fn add_player(&mut self, proposed: Option<&str>) -> Outcome {
        let Some(name) = normalize_name(proposed) else {
            return Outcome::none();
        };
        let id = self.next_id;
        let Some(next_id) = id.checked_add(1) else {
            return Outcome::none().with_notification(Notification::error("No player ids left!"));
        };
        self.next_id = next_id;
        let message = format!("{name} added to the game!");
        self.players.push(Player { id, name, score: 0 });
        Outcome::rerender().with_notification(Notification::success(message))
    }

    pub fn remove_last_player(&mut self) -> Outcome {
        if self.players.len() <= 1 {
            return Outcome::none()
                .with_notification(Notification::error("Cannot remove the last player!"));
        }
        let Some(removed) = self.players.pop() else {
            return Outcome::none();
        };
        Outcome::rerender().with_notification(Notification::success(format!(
            "{} removed from the game!",
            removed.name
        )))
    }

    /// Unconditional apply; the confirmation gate is the caller's job.
    pub fn reset_all_scores(&mut self) -> Outcome {
        for player in &mut self.players {
            player.score = 0;
        }
        Outcome::rerender().with_notification(Notification::success("All scores have been reset!"))
    }

    pub fn reset_all_scores_if(&mut self, confirmation: Confirmation) -> Outcome {
        match confirmation {
            Confirmation::Granted => self.reset_all_scores(),
            Confirmation::Declined => Outcome::none(),
        }
    }
}

/// Trim and uppercase a proposed name; empty or missing input is rejected.
pub fn normalize_name(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_refused_once_ids_run_out() {
        let mut roster = Roster::new();
        roster.next_id = PlayerId::MAX - 1;
        assert!(roster.add_player(Some("last")).rerender);
        assert_eq!(roster.next_id(), PlayerId::MAX);

        let outcome = roster.add_player(Some("one more"));
        assert!(!outcome.rerender);
        assert!(outcome.notification.is_some_and(|n| n.is_error()));
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.next_id(), PlayerId::MAX);
        assert!(roster.players().iter().all(|p| p.name != "ONE MORE"));
    }
}
