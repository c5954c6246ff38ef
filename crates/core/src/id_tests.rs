// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;
use yare::parameterized;

crate::define_id! {
    /// Test ID type for macro verification.
    pub struct TestId;
}

#[test]
fn define_id_new_and_get() {
    let id = TestId::new(42);
    assert_eq!(id.get(), 42);
}

#[test]
fn define_id_display() {
    assert_eq!(TestId::new(7).to_string(), "7");
    assert_eq!(TestId::new(-3).to_string(), "-3");
}

#[parameterized(
    plain = { "15", Some(15) },
    padded = { "  15 ", Some(15) },
    negative = { "-2", Some(-2) },
    empty = { "", None },
    word = { "abc", None },
)]
fn define_id_from_str(input: &str, expected: Option<i64>) {
    let parsed = input.parse::<TestId>().ok().map(TestId::get);
    assert_eq!(parsed, expected);
}

#[test]
fn define_id_serializes_as_bare_number() {
    let json = serde_json::to_string(&TestId::new(9)).unwrap();
    assert_eq!(json, "9");
    let back: TestId = serde_json::from_str("9").unwrap();
    assert_eq!(back, TestId::new(9));
}

#[test]
fn define_id_works_as_hash_key() {
    let mut set = HashSet::new();
    set.insert(AdminId::new(1));
    set.insert(AdminId::new(1));
    set.insert(AdminId::new(2));
    assert_eq!(set.len(), 2);
}

#[test]
fn define_id_orders_numerically() {
    let mut ids = vec![TeamId::new(10), TeamId::new(2), TeamId::new(33)];
    ids.sort();
    assert_eq!(ids, vec![TeamId::new(2), TeamId::new(10), TeamId::new(33)]);
}
