use std::time::{Duration, Instant};

use rand::Rng;

use crate::decade::NeonColor;

pub const FLOATING_LIFETIME: Duration = Duration::from_secs(8);
pub const CONFETTI_LIFETIME: Duration = Duration::from_secs(3);
pub const CONFETTI_STAGGER: Duration = Duration::from_millis(50);

const SYMBOLS: [&str; 5] = ["♪", "♫", "♬", "🎵", "🎶"];
const SYMBOL_COLORS: [NeonColor; 3] = [NeonColor::Pink, NeonColor::Blue, NeonColor::Yellow];
const CONFETTI_COLORS: [ConfettiColor; 3] =
    [ConfettiColor::Green, ConfettiColor::Pink, ConfettiColor::Yellow];

/// Background dot that drifts upward on a loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub size: f32,
    pub left_pct: f32,
    pub delay: Duration,
    pub duration: Duration,
}

impl Particle {
    /// Fraction of the current rise cycle, 0.0 at the bottom. `None` until the delay passes.
    pub fn progress(&self, elapsed: Duration) -> Option<f32> {
        let active = elapsed.checked_sub(self.delay)?;
        let cycle = self.duration.as_secs_f32();
        if cycle <= 0.0 {
            return None;
        }
        Some((active.as_secs_f32() % cycle) / cycle)
    }

    pub fn glyph(&self) -> char {
        if self.size >= 5.0 { '•' } else { '·' }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingSymbol {
    pub glyph: &'static str,
    pub color: NeonColor,
    pub x_pct: f32,
    pub born: Instant,
}

impl FloatingSymbol {
    /// 0.0 when spawned at the bottom edge, 1.0 once it has left the top.
    pub fn rise(&self, now: Instant) -> f32 {
        let age = now.saturating_duration_since(self.born).as_secs_f32();
        (age / FLOATING_LIFETIME.as_secs_f32()).min(1.0)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.born) >= FLOATING_LIFETIME
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiColor {
    Green,
    Pink,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiPiece {
    pub x_pct: f32,
    pub color: ConfettiColor,
    pub born: Instant,
}

impl ConfettiPiece {
    pub fn fall(&self, now: Instant) -> f32 {
        let age = now.saturating_duration_since(self.born).as_secs_f32();
        (age / CONFETTI_LIFETIME.as_secs_f32()).min(1.0)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.born) >= CONFETTI_LIFETIME
    }
}

pub fn particle_field<R: Rng>(rng: &mut R, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            size: rng.gen_range(2.0..8.0),
            left_pct: rng.gen_range(0.0..100.0),
            delay: Duration::from_secs_f32(rng.gen_range(0.0..6.0)),
            duration: Duration::from_secs_f32(rng.gen_range(6.0..10.0)),
        })
        .collect()
}

pub fn random_floating<R: Rng>(rng: &mut R, now: Instant) -> FloatingSymbol {
    FloatingSymbol {
        glyph: SYMBOLS[rng.gen_range(0..SYMBOLS.len())],
        color: SYMBOL_COLORS[rng.gen_range(0..SYMBOL_COLORS.len())],
        x_pct: rng.gen_range(0.0..100.0),
        born: now,
    }
}

pub fn random_confetti<R: Rng>(rng: &mut R, now: Instant) -> ConfettiPiece {
    ConfettiPiece {
        x_pct: rng.gen_range(0.0..100.0),
        color: CONFETTI_COLORS[rng.gen_range(0..CONFETTI_COLORS.len())],
        born: now,
    }
}

#[derive(Debug, Clone, Default)]
pub struct EffectsState {
    pub started: Option<Instant>,
    pub particles: Vec<Particle>,
    pub floating: Vec<FloatingSymbol>,
    pub confetti: Vec<ConfettiPiece>,
}

impl EffectsState {
    pub fn with_particles(particles: Vec<Particle>, now: Instant) -> Self {
        Self {
            started: Some(now),
            particles,
            floating: Vec::new(),
            confetti: Vec::new(),
        }
    }

    pub fn expire(&mut self, now: Instant) {
        self.floating.retain(|s| !s.is_expired(now));
        self.confetti.retain(|c| !c.is_expired(now));
    }
}
