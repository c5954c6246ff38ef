// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_clock_starts_at_fixed_point() {
    let clock = FakeClock::new();
    assert_eq!(clock.now().to_rfc3339(), "2024-03-01T12:00:00+00:00");
}

#[test]
fn fake_clock_advance_is_shared_between_clones() {
    let clock = FakeClock::new();
    let other = clock.clone();
    let before = clock.epoch_ms();
    other.advance(Duration::from_secs(90));
    assert_eq!(clock.epoch_ms() - before, 90_000);
}

#[test]
fn fake_clock_set_overrides_time() {
    let clock = FakeClock::new();
    let target = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
    clock.set(target);
    assert_eq!(clock.now(), target);
}

#[test]
fn system_clock_moves_forward() {
    let clock = SystemClock;
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
}
