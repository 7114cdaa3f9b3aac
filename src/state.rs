use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use chrono::Local;

use crate::decade::{Decade, DecadeState};
use crate::effects::{ConfettiPiece, EffectsState, FloatingSymbol};
use crate::roster::{Confirmation, Notification, NotificationKind, Outcome, PlayerId, Roster};

pub const PULSE_FOR: Duration = Duration::from_millis(300);
pub const DEFAULT_NOTIFY_FOR: Duration = Duration::from_secs(3);
const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Scoreboard,
    Randomizer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AddPlayer,
    Rename(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

impl Prompt {
    pub fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::AddPlayer => "Enter player name:",
            PromptKind::Rename(_) => "Enter new player name:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ResetScores,
}

impl ConfirmAction {
    pub fn question(&self) -> &'static str {
        match self {
            ConfirmAction::ResetScores => "Are you sure you want to reset all scores to 0?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNotification {
    pub notification: Notification,
    pub shown_at: Instant,
}

#[derive(Debug, Clone)]
pub enum Delta {
    SpawnFloating(FloatingSymbol),
    RevealDecade(Decade),
    SpawnConfetti(ConfettiPiece),
    Log(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectCommand {
    RollDecade,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub roster: Roster,
    pub selected: usize,
    pub prompt: Option<Prompt>,
    pub confirm: Option<ConfirmAction>,
    pub notifications: VecDeque<ActiveNotification>,
    pub notify_for: Duration,
    pub pulses: HashMap<PlayerId, Instant>,
    pub decade: DecadeState,
    pub effects: EffectsState,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Scoreboard,
            roster: Roster::new(),
            selected: 0,
            prompt: None,
            confirm: None,
            notifications: VecDeque::with_capacity(4),
            notify_for: DEFAULT_NOTIFY_FOR,
            pulses: HashMap::with_capacity(8),
            decade: DecadeState::Idle,
            effects: EffectsState::default(),
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn selected_player_id(&self) -> Option<PlayerId> {
        self.roster.players().get(self.selected).map(|p| p.id)
    }

    pub fn select_next(&mut self) {
        let total = self.roster.len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.roster.len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if self.selected == 0 {
            total - 1
        } else {
            self.selected - 1
        };
    }

    pub fn clamp_selection(&mut self) {
        let total = self.roster.len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Scoreboard => Screen::Randomizer,
            Screen::Randomizer => Screen::Scoreboard,
        };
    }

    /// True while a prompt or confirmation owns the keyboard.
    pub fn is_modal(&self) -> bool {
        self.prompt.is_some() || self.confirm.is_some()
    }

    pub fn adjust_selected(&mut self, delta: i64, now: Instant) {
        let Some(id) = self.selected_player_id() else {
            return;
        };
        let outcome = self.roster.adjust_score(id, delta);
        self.apply_outcome(outcome, now);
    }

    pub fn begin_add_prompt(&mut self) {
        self.confirm = None;
        self.prompt = Some(Prompt {
            kind: PromptKind::AddPlayer,
            buffer: self.roster.default_name_for_next(),
        });
    }

    pub fn begin_rename_prompt(&mut self) {
        let Some(player) = self.roster.players().get(self.selected) else {
            return;
        };
        self.confirm = None;
        self.prompt = Some(Prompt {
            kind: PromptKind::Rename(player.id),
            buffer: player.name.clone(),
        });
    }

    pub fn prompt_input(&mut self, ch: char) {
        let Some(prompt) = &mut self.prompt else {
            return;
        };
        if !ch.is_control() {
            prompt.buffer.push(ch);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = &mut self.prompt {
            prompt.buffer.pop();
        }
    }

    pub fn prompt_clear(&mut self) {
        if let Some(prompt) = &mut self.prompt {
            prompt.buffer.clear();
        }
    }

    pub fn submit_prompt(&mut self, now: Instant) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        match prompt.kind {
            PromptKind::AddPlayer => {
                let outcome = self.roster.add_player(Some(&prompt.buffer));
                if outcome.rerender {
                    self.selected = self.roster.len().saturating_sub(1);
                }
                self.apply_outcome(outcome, now);
            }
            PromptKind::Rename(id) => {
                let outcome = self.roster.rename_player(id, &prompt.buffer);
                if outcome.rerender
                    && let Some(player) = self.roster.get(id)
                {
                    let line = format!("[INFO] Player {id} is now {}", player.name);
                    self.push_log(line);
                }
                self.apply_outcome(outcome, now);
            }
        }
    }

    /// A dismissed prompt is the same as an empty answer.
    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn request_reset(&mut self) {
        self.prompt = None;
        self.confirm = Some(ConfirmAction::ResetScores);
    }

    pub fn resolve_confirm(&mut self, confirmation: Confirmation, now: Instant) {
        let Some(action) = self.confirm.take() else {
            return;
        };
        match action {
            ConfirmAction::ResetScores => {
                let outcome = self.roster.reset_all_scores_if(confirmation);
                self.apply_outcome(outcome, now);
            }
        }
    }

    pub fn remove_last(&mut self, now: Instant) {
        let outcome = self.roster.remove_last_player();
        self.clamp_selection();
        self.apply_outcome(outcome, now);
    }

    pub fn apply_outcome(&mut self, outcome: Outcome, now: Instant) {
        if let Some(id) = outcome.pulse {
            self.pulses.insert(id, now);
        }
        if let Some(notification) = outcome.notification {
            let level = match notification.kind {
                NotificationKind::Success => "INFO",
                NotificationKind::Error => "WARN",
            };
            self.push_log(format!("[{level}] {}", notification.message));
            self.notifications.push_back(ActiveNotification {
                notification,
                shown_at: now,
            });
        }
    }

    /// Newest notification still on screen.
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.back().map(|n| &n.notification)
    }

    pub fn is_pulsing(&self, id: PlayerId, now: Instant) -> bool {
        self.pulses
            .get(&id)
            .is_some_and(|at| now.saturating_duration_since(*at) < PULSE_FOR)
    }

    /// Drop timed-out notifications, pulses and effect sprites.
    pub fn expire(&mut self, now: Instant) {
        let notify_for = self.notify_for;
        self.notifications
            .retain(|n| now.saturating_duration_since(n.shown_at) < notify_for);
        self.pulses
            .retain(|_, at| now.saturating_duration_since(*at) < PULSE_FOR);
        self.effects.expire(now);
    }

    /// Returns false while a roll is already in flight.
    pub fn begin_roll(&mut self) -> bool {
        if self.decade.is_rolling() {
            return false;
        }
        self.decade = DecadeState::Rolling;
        true
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let stamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SpawnFloating(symbol) => state.effects.floating.push(symbol),
        Delta::SpawnConfetti(piece) => state.effects.confetti.push(piece),
        Delta::RevealDecade(decade) => {
            state.decade = DecadeState::Revealed(decade);
            state.push_log(format!(
                "[INFO] Decade: {} ({})",
                decade.name, decade.description
            ));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
