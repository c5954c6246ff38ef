// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    unchanged_keeps = { Patch::Unchanged, Some("old"), Some("old") },
    unchanged_keeps_null = { Patch::Unchanged, None, None },
    set_overwrites = { Patch::Set("new"), Some("old"), Some("new") },
    set_fills_null = { Patch::Set("new"), None, Some("new") },
    cleared_nulls = { Patch::Cleared, Some("old"), None },
)]
fn apply_to_nullable_field(patch: Patch<&'static str>, before: Option<&'static str>, after: Option<&'static str>) {
    let mut field = before;
    patch.apply_to(&mut field);
    assert_eq!(field, after);
}

#[test]
fn into_update_distinguishes_all_three_states() {
    assert_eq!(Patch::<i32>::Unchanged.into_update(), None);
    assert_eq!(Patch::Set(4).into_update(), Some(Some(4)));
    assert_eq!(Patch::<i32>::Cleared.into_update(), Some(None));
}

#[test]
fn from_option_maps_none_to_cleared() {
    assert_eq!(Patch::from_option(Some(1)), Patch::Set(1));
    assert_eq!(Patch::<i32>::from_option(None), Patch::Cleared);
}

#[test]
fn try_map_propagates_errors_only_for_set() {
    let ok: Result<Patch<i32>, String> = Patch::Set("12").try_map(|s| s.parse().map_err(|_| s.to_string()));
    assert_eq!(ok, Ok(Patch::Set(12)));

    let err: Result<Patch<i32>, String> = Patch::Set("x").try_map(|s| s.parse().map_err(|_| s.to_string()));
    assert_eq!(err, Err("x".to_string()));

    let cleared: Result<Patch<i32>, String> = Patch::<&str>::Cleared.try_map(|_| Err("never".to_string()));
    assert_eq!(cleared, Ok(Patch::Cleared));
}

#[test]
fn unless_equal_drops_noop_updates() {
    assert_eq!(Patch::Set(3).unless_equal(Some(&3)), Patch::Unchanged);
    assert_eq!(Patch::Set(3).unless_equal(Some(&4)), Patch::Set(3));
    assert_eq!(Patch::<i32>::Cleared.unless_equal(None), Patch::Unchanged);
    assert_eq!(Patch::<i32>::Cleared.unless_equal(Some(&1)), Patch::Cleared);
}

#[test]
fn default_is_unchanged() {
    assert!(Patch::<String>::default().is_unchanged());
}
