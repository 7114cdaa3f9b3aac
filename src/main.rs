use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use neon_scoreboard::config::Settings;
use neon_scoreboard::decade::{self, DecadeState, NeonColor};
use neon_scoreboard::effects::{self, ConfettiColor, EffectsState};
use neon_scoreboard::effects_driver::{self, DriverConfig};
use neon_scoreboard::roster::{Confirmation, NotificationKind, Player};
use neon_scoreboard::state::{AppState, Delta, EffectCommand, Screen, apply_delta};

const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 8;

const NEON_PINK: Color = Color::Rgb(255, 0, 128);
const NEON_BLUE: Color = Color::Rgb(0, 200, 255);
const NEON_YELLOW: Color = Color::Rgb(255, 255, 0);

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<EffectCommand>>,
}

impl App {
    fn new(settings: &Settings, cmd_tx: Option<mpsc::Sender<EffectCommand>>) -> Self {
        let mut state = AppState::new();
        state.notify_for = settings.notify_for;
        if settings.effects_enabled {
            let mut rng = rand::thread_rng();
            state.effects = EffectsState::with_particles(
                effects::particle_field(&mut rng, settings.particles),
                Instant::now(),
            );
        }
        state.push_log(format!(
            "[INFO] Scoreboard ready with {} players",
            state.roster.len()
        ));
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let now = Instant::now();

        if self.state.prompt.is_some() {
            self.on_prompt_key(key, now);
            return;
        }
        if self.state.confirm.is_some() {
            self.on_confirm_key(key, now);
            return;
        }

        // Accelerators are consumed here and never fall through to plain keys.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => self.state.begin_add_prompt(),
                KeyCode::Char('r') => self.state.request_reset(),
                KeyCode::Backspace | KeyCode::Char('h') => self.state.remove_last(now),
                KeyCode::Char('c') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            KeyCode::Tab | KeyCode::BackTab => self.state.toggle_screen(),
            _ => match self.state.screen {
                Screen::Scoreboard => self.on_scoreboard_key(key, now),
                Screen::Randomizer => self.on_randomizer_key(key),
            },
        }
    }

    fn on_scoreboard_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('l') => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::Char('h') => self.state.select_prev(),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                self.state.adjust_selected(1, now)
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => {
                self.state.adjust_selected(-1, now)
            }
            KeyCode::Char('e') | KeyCode::Enter => self.state.begin_rename_prompt(),
            KeyCode::Char('a') => self.state.begin_add_prompt(),
            KeyCode::Char('x') => self.state.remove_last(now),
            KeyCode::Char('r') => self.state.request_reset(),
            _ => {}
        }
    }

    fn on_randomizer_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('d')
        ) {
            self.request_roll();
        }
    }

    fn on_prompt_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter => self.state.submit_prompt(now),
            KeyCode::Esc => self.state.cancel_prompt(),
            KeyCode::Backspace => self.state.prompt_backspace(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.prompt_clear()
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.prompt_input(ch)
            }
            _ => {}
        }
    }

    fn on_confirm_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.state.resolve_confirm(Confirmation::Granted, now)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state.resolve_confirm(Confirmation::Declined, now)
            }
            _ => {}
        }
    }

    fn request_roll(&mut self) {
        if !self.state.begin_roll() {
            return;
        }
        let sent = self
            .cmd_tx
            .as_ref()
            .is_some_and(|tx| tx.send(EffectCommand::RollDecade).is_ok());
        if !sent {
            // No timer thread to wait on; reveal right away.
            self.state
                .push_log("[WARN] Effects driver unavailable, revealing immediately");
            let picked = decade::pick_decade(&mut rand::thread_rng());
            apply_delta(&mut self.state, Delta::RevealDecade(picked));
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let settings = Settings::from_env();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend).context("failed to create terminal")?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    effects_driver::spawn_effects_driver(tx, cmd_rx, DriverConfig::from(&settings));

    let mut app = App::new(&settings, Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx, settings.tick_rate);

    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to restore cursor")?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }
        app.state.expire(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let now = Instant::now();
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .style(Style::default().fg(NEON_YELLOW))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_background(frame.buffer_mut(), chunks[1], &state.effects, now);
    match state.screen {
        Screen::Scoreboard => render_scoreboard(frame, chunks[1], state, now),
        Screen::Randomizer => render_randomizer(frame, chunks[1], state),
    }
    render_confetti(frame.buffer_mut(), chunks[1], &state.effects, now);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if let Some(prompt) = &state.prompt {
        render_prompt(frame, frame.size(), prompt.title(), &prompt.buffer);
    } else if let Some(action) = state.confirm {
        render_confirm(frame, frame.size(), action.question());
    } else if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }

    render_notification(frame, frame.size(), state);
}

fn header_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Scoreboard => "SCOREBOARD",
        Screen::Randomizer => "DECADE RANDOMIZER",
    };
    let line1 = format!(
        "  ♪ ♫  NEON SCOREBOARD | {screen} | Players: {}",
        state.roster.len()
    );
    let line2 = " ♬   ♪".to_string();
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    if state.prompt.is_some() {
        return "Enter Save | Esc Cancel | Ctrl+U Clear".to_string();
    }
    if state.confirm.is_some() {
        return "y/Enter Confirm | n/Esc Cancel".to_string();
    }
    match state.screen {
        Screen::Scoreboard => {
            "←/→ or -/+ Score | j/k Move | e Edit | a Add | x Remove | r Reset | Tab Randomizer | ? Help | q Quit".to_string()
        }
        Screen::Randomizer => "Space/Enter Roll | Tab Scoreboard | ? Help | q Quit".to_string(),
    }
}

fn render_scoreboard(frame: &mut Frame, area: Rect, state: &AppState, now: Instant) {
    if area.height < CARD_HEIGHT || area.width < CARD_WIDTH {
        let empty = Paragraph::new("Scoreboard needs a bigger terminal")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let players = state.roster.players();
    let per_row = (area.width / CARD_WIDTH) as usize;
    let rows_visible = (area.height / CARD_HEIGHT) as usize;
    let total_rows = players.len().div_ceil(per_row);
    let selected_row = state.selected / per_row;
    let (start, end) = visible_range(selected_row, total_rows, rows_visible);

    for (i, row) in (start..end).enumerate() {
        let first = row * per_row;
        let in_row = per_row.min(players.len() - first);
        let row_width = in_row as u16 * CARD_WIDTH;
        let x0 = area.x + area.width.saturating_sub(row_width) / 2;
        let y = area.y + i as u16 * CARD_HEIGHT;

        for col in 0..in_row {
            let idx = first + col;
            let card_area = Rect {
                x: x0 + col as u16 * CARD_WIDTH,
                y,
                width: CARD_WIDTH,
                height: CARD_HEIGHT,
            };
            let player = &players[idx];
            render_player_card(
                frame,
                card_area,
                player,
                idx == state.selected,
                state.is_pulsing(player.id, now),
            );
        }
    }
}

fn render_player_card(frame: &mut Frame, area: Rect, player: &Player, selected: bool, pulsing: bool) {
    frame.render_widget(Clear, area);

    let border_style = if selected {
        Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Double
        } else {
            BorderType::Rounded
        })
        .border_style(border_style);

    let mut score_style = Style::default().fg(NEON_YELLOW).add_modifier(Modifier::BOLD);
    if pulsing {
        score_style = score_style.add_modifier(Modifier::REVERSED);
    }

    let lines = vec![
        Line::from(Span::styled(
            clip(&player.name, usize::from(CARD_WIDTH - 4)),
            Style::default().fg(NEON_YELLOW).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(format!(" {} ", player.score), score_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[ − ]", Style::default().fg(NEON_PINK)),
            Span::raw("   "),
            Span::styled("[ + ]", Style::default().fg(NEON_BLUE)),
        ]),
        Line::from(Span::styled(
            "Edit Name",
            Style::default().fg(Color::Magenta),
        )),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(card, area);
}

fn render_randomizer(frame: &mut Frame, area: Rect, state: &AppState) {
    let box_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, box_area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("🎲 {} 🎲", state.decade.button_label()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let border = match state.decade {
        DecadeState::Idle => {
            lines.push(Line::from("Press Space to pick a decade"));
            Color::DarkGray
        }
        DecadeState::Rolling => {
            lines.push(Line::from(Span::styled(
                "🎵 Selecting your decade... 🎵",
                Style::default()
                    .fg(NEON_YELLOW)
                    .add_modifier(Modifier::SLOW_BLINK),
            )));
            NEON_YELLOW
        }
        DecadeState::Revealed(picked) => {
            let color = neon(picked.color);
            lines.push(Line::from(Span::styled(
                format!("🎯 {} 🎯", picked.name),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                picked.description,
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Let the music begin! 🎵",
                Style::default().fg(NEON_YELLOW).add_modifier(Modifier::BOLD),
            )));
            color
        }
    };

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Decade")
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(panel, box_area);
}

fn render_background(buf: &mut Buffer, area: Rect, fx: &EffectsState, now: Instant) {
    if let Some(started) = fx.started {
        let elapsed = now.saturating_duration_since(started);
        for particle in &fx.particles {
            let Some(progress) = particle.progress(elapsed) else {
                continue;
            };
            let mut glyph = [0u8; 4];
            plot(
                buf,
                area,
                particle.left_pct,
                1.0 - progress,
                particle.glyph().encode_utf8(&mut glyph),
                Style::default().fg(Color::DarkGray),
            );
        }
    }
    for symbol in &fx.floating {
        plot(
            buf,
            area,
            symbol.x_pct,
            1.0 - symbol.rise(now),
            symbol.glyph,
            Style::default().fg(neon(symbol.color)),
        );
    }
}

fn render_confetti(buf: &mut Buffer, area: Rect, fx: &EffectsState, now: Instant) {
    for piece in &fx.confetti {
        let color = match piece.color {
            ConfettiColor::Green => Color::Rgb(0, 255, 128),
            ConfettiColor::Pink => NEON_PINK,
            ConfettiColor::Yellow => NEON_YELLOW,
        };
        plot(
            buf,
            area,
            piece.x_pct,
            piece.fall(now),
            "●",
            Style::default().fg(color),
        );
    }
}

/// `y_frac` runs from 0.0 at the top of `area` to 1.0 at the bottom.
fn plot(buf: &mut Buffer, area: Rect, x_pct: f32, y_frac: f32, symbol: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let max_x = f32::from(area.width - 1);
    let max_y = f32::from(area.height - 1);
    let x = area.x + (x_pct / 100.0 * max_x).round().clamp(0.0, max_x) as u16;
    let y = area.y + (y_frac * max_y).round().clamp(0.0, max_y) as u16;
    buf.get_mut(x, y).set_symbol(symbol).set_style(style);
}

fn render_notification(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(notification) = state.current_notification() else {
        return;
    };
    let width = (notification.message.chars().count() as u16 + 4).min(area.width);
    let height = 3u16.min(area.height);
    let toast = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1u16.min(area.height.saturating_sub(height)),
        width,
        height,
    };
    let bg = match notification.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
    };
    frame.render_widget(Clear, toast);
    let paragraph = Paragraph::new(notification.message.as_str())
        .style(
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, toast);
}

fn render_prompt(frame: &mut Frame, area: Rect, title: &str, buffer: &str) {
    let popup_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup_area);
    let text = vec![
        Line::from(title.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            format!("{buffer}_"),
            Style::default().fg(NEON_YELLOW).add_modifier(Modifier::BOLD),
        )),
    ];
    let prompt = Paragraph::new(text)
        .block(Block::default().title("Input").borders(Borders::ALL));
    frame.render_widget(prompt, popup_area);
}

fn render_confirm(frame: &mut Frame, area: Rect, question: &str) {
    let popup_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup_area);
    let text = vec![
        Line::from(question.to_string()),
        Line::from(""),
        Line::from("[y] Yes    [n] No"),
    ];
    let confirm = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Confirm").borders(Borders::ALL));
    frame.render_widget(confirm, popup_area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No events yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display-only shortening; the stored name is untouched.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn neon(color: NeonColor) -> Color {
    match color {
        NeonColor::Blue => NEON_BLUE,
        NeonColor::Pink => NEON_PINK,
        NeonColor::Yellow => NEON_YELLOW,
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Neon Scoreboard - Help",
        "",
        "Scoreboard:",
        "  j/k or ↑/↓     Select player",
        "  + / →          Score +1",
        "  - / ←          Score -1",
        "  e / Enter      Edit name",
        "  a / Ctrl+N     Add player",
        "  x / Ctrl+⌫     Remove last player",
        "  r / Ctrl+R     Reset all scores",
        "",
        "Global:",
        "  Tab            Scoreboard / Randomizer",
        "  Space          Roll a decade (randomizer)",
        "  ?              Toggle help",
        "  q              Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
