use std::time::Duration;

use rand::Rng;

/// How long the randomizer "spins" before revealing a decade.
pub const ROLL_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeonColor {
    Blue,
    Pink,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decade {
    pub name: &'static str,
    pub color: NeonColor,
    pub description: &'static str,
}

pub const DECADES: [Decade; 6] = [
    Decade {
        name: "1980s",
        color: NeonColor::Blue,
        description: "Retro Vibes",
    },
    Decade {
        name: "1990s",
        color: NeonColor::Pink,
        description: "Golden Era",
    },
    Decade {
        name: "2000s",
        color: NeonColor::Yellow,
        description: "Millennium",
    },
    Decade {
        name: "2010s",
        color: NeonColor::Blue,
        description: "Digital Age",
    },
    Decade {
        name: "2020s",
        color: NeonColor::Pink,
        description: "Modern Era",
    },
    Decade {
        name: "2025s",
        color: NeonColor::Yellow,
        description: "Future Hits",
    },
];

pub fn pick_decade<R: Rng>(rng: &mut R) -> Decade {
    DECADES[rng.gen_range(0..DECADES.len())]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecadeState {
    #[default]
    Idle,
    Rolling,
    Revealed(Decade),
}

impl DecadeState {
    pub fn is_rolling(&self) -> bool {
        matches!(self, DecadeState::Rolling)
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            DecadeState::Idle => "RANDOMIZE DECADE",
            DecadeState::Rolling => "RANDOMIZING...",
            DecadeState::Revealed(_) => "RANDOMIZE AGAIN",
        }
    }
}
