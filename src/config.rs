use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tick_rate: Duration,
    pub notify_for: Duration,
    pub float_interval: Duration,
    pub particles: usize,
    pub confetti: usize,
    pub effects_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            notify_for: Duration::from_secs(3),
            float_interval: Duration::from_secs(5),
            particles: 50,
            confetti: 50,
            effects_enabled: true,
        }
    }
}

impl Settings {
    /// Reads `SCOREBOARD_*` variables; call after dotenv files are loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tick_ms = lookup("SCOREBOARD_TICK_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(250)
            .max(16);
        let notify_secs = lookup("SCOREBOARD_NOTIFY_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(3)
            .clamp(1, 30);
        let float_secs = lookup("SCOREBOARD_FLOAT_INTERVAL_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(5)
            .max(1);
        let particles = lookup("SCOREBOARD_PARTICLES")
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(50)
            .min(500);
        let confetti = lookup("SCOREBOARD_CONFETTI")
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(50)
            .min(500);
        let effects_enabled = lookup("SCOREBOARD_EFFECTS")
            .map(|val| parse_switch(&val))
            .unwrap_or(true);

        Self {
            tick_rate: Duration::from_millis(tick_ms),
            notify_for: Duration::from_secs(notify_secs),
            float_interval: Duration::from_secs(float_secs),
            particles,
            confetti,
            effects_enabled,
        }
    }
}

fn parse_switch(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "off" | "false" | "no"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings_from(pairs: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(settings_from(&[]), Settings::default());
    }

    #[test]
    fn values_are_clamped() {
        let s = settings_from(&[
            ("SCOREBOARD_TICK_MS", "1"),
            ("SCOREBOARD_NOTIFY_SECS", "999"),
            ("SCOREBOARD_FLOAT_INTERVAL_SECS", "0"),
            ("SCOREBOARD_PARTICLES", "100000"),
        ]);
        assert_eq!(s.tick_rate, Duration::from_millis(16));
        assert_eq!(s.notify_for, Duration::from_secs(30));
        assert_eq!(s.float_interval, Duration::from_secs(1));
        assert_eq!(s.particles, 500);
    }

    #[test]
    fn garbage_falls_back_to_default() {
        let s = settings_from(&[("SCOREBOARD_CONFETTI", "lots"), ("SCOREBOARD_TICK_MS", "")]);
        assert_eq!(s.confetti, 50);
        assert_eq!(s.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn effects_switch_accepts_off_values() {
        assert!(!settings_from(&[("SCOREBOARD_EFFECTS", "off")]).effects_enabled);
        assert!(!settings_from(&[("SCOREBOARD_EFFECTS", " 0 ")]).effects_enabled);
        assert!(settings_from(&[("SCOREBOARD_EFFECTS", "on")]).effects_enabled);
    }
}
