use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::config::Settings;
use crate::decade::{self, ROLL_DELAY};
use crate::effects::{self, CONFETTI_STAGGER};
use crate::state::{Delta, EffectCommand};

const POLL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    pub float_interval: Duration,
    pub confetti: usize,
    pub effects_enabled: bool,
}

impl From<&Settings> for DriverConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            float_interval: settings.float_interval,
            confetti: settings.confetti,
            effects_enabled: settings.effects_enabled,
        }
    }
}

/// One-shot timers queued by the driver; nothing ever cancels them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Reveal,
    Confetti,
}

pub fn spawn_effects_driver(
    tx: Sender<Delta>,
    cmd_rx: Receiver<EffectCommand>,
    cfg: DriverConfig,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let mut pending: Vec<(Instant, Timer)> = Vec::new();
        let mut last_float = Instant::now();

        loop {
            thread::sleep(POLL);
            let now = Instant::now();

            match cmd_rx.try_recv() {
                Ok(EffectCommand::RollDecade) => {
                    pending.push((now + ROLL_DELAY, Timer::Reveal));
                    let line = format!("[INFO] Rolling a decade ({} ms)", ROLL_DELAY.as_millis());
                    if tx.send(Delta::Log(line)).is_err() {
                        return;
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => return,
            }

            if cfg.effects_enabled && last_float.elapsed() >= cfg.float_interval {
                last_float = now;
                let symbol = effects::random_floating(&mut rng, now);
                if tx.send(Delta::SpawnFloating(symbol)).is_err() {
                    return;
                }
            }

            let mut due = Vec::new();
            pending.retain(|(at, timer)| {
                if *at <= now {
                    due.push(*timer);
                    false
                } else {
                    true
                }
            });

            for timer in due {
                let mut out = Vec::with_capacity(2);
                match timer {
                    Timer::Reveal => {
                        out.push(Delta::RevealDecade(decade::pick_decade(&mut rng)));
                        if cfg.effects_enabled && cfg.confetti > 0 {
                            for i in 0..cfg.confetti {
                                let offset = CONFETTI_STAGGER * i as u32;
                                pending.push((now + offset, Timer::Confetti));
                            }
                            out.push(Delta::Log(format!(
                                "[INFO] Confetti burst of {} pieces",
                                cfg.confetti
                            )));
                        }
                    }
                    Timer::Confetti => {
                        out.push(Delta::SpawnConfetti(effects::random_confetti(&mut rng, now)))
                    }
                }
                for delta in out {
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
            }
        }
    })
}
