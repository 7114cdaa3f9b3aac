use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use neon_scoreboard::roster::Roster;
use neon_scoreboard::state::AppState;

fn large_roster(players: usize) -> Roster {
    let mut roster = Roster::new();
    for i in 0..players {
        roster.add_player(Some(&format!("player {i}")));
    }
    roster
}

fn bench_adjust_score_tail(c: &mut Criterion) {
    let mut roster = large_roster(256);
    let tail = roster.next_id() - 1;
    c.bench_function("adjust_score_tail", |b| {
        b.iter(|| {
            let outcome = roster.adjust_score(black_box(tail), black_box(1));
            black_box(outcome.pulse);
        })
    });
}

fn bench_add_remove_cycle(c: &mut Criterion) {
    let mut roster = Roster::new();
    c.bench_function("add_remove_cycle", |b| {
        b.iter(|| {
            roster.add_player(Some(black_box("  dj max  ")));
            let outcome = roster.remove_last_player();
            black_box(outcome.rerender);
        })
    });
}

fn bench_reset_all(c: &mut Criterion) {
    let mut roster = large_roster(256);
    c.bench_function("reset_all_scores", |b| {
        b.iter(|| {
            let outcome = roster.reset_all_scores();
            black_box(outcome.notification);
        })
    });
}

fn bench_state_expire(c: &mut Criterion) {
    let mut state = AppState::new();
    let now = std::time::Instant::now();
    c.bench_function("state_expire", |b| {
        b.iter(|| {
            state.adjust_selected(1, now);
            state.expire(black_box(now));
        })
    });
}

criterion_group!(
    perf,
    bench_adjust_score_tail,
    bench_add_remove_cycle,
    bench_reset_all,
    bench_state_expire
);
criterion_main!(perf);
