// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::sessions::MemorySessionRepo;
use cb_core::WizardData;
use yare::parameterized;

const ADMIN: AdminId = AdminId::new(100);

fn store() -> (MemorySessionRepo, SessionStore<MemorySessionRepo>) {
    let repo = MemorySessionRepo::new();
    (repo.clone(), SessionStore::new(repo))
}

fn wizard() -> WizardState {
    let mut data = WizardData::new();
    data.set("name", "Eagles");
    data.clear_field("note");
    WizardState {
        flow: "create_team".into(),
        step: 2,
        data,
    }
}

fn nav() -> Vec<NavEntry> {
    vec![
        NavEntry::new("tournaments_page").with("page", 1),
        NavEntry::new("teams_menu"),
    ]
}

#[tokio::test]
async fn load_without_row_is_empty() {
    let (_, store) = store();
    let loaded = store.load(ADMIN).await.unwrap();
    assert_eq!(loaded, LoadedSession::default());
    assert!(loaded.nav.is_empty());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let (_, store) = store();
    let w = wizard();
    store.save(ADMIN, Some("create_team"), Some(&w), &nav()).await.unwrap();

    let loaded = store.load(ADMIN).await.unwrap();
    assert_eq!(loaded.flow.as_deref(), Some("create_team"));
    assert_eq!(loaded.wizard, Some(w));
    assert_eq!(loaded.nav, nav());
    assert!(loaded.updated_at.is_some());
    assert!(loaded.active_wizard().is_some());
}

#[tokio::test]
async fn save_with_nothing_writes_null_blob() {
    let (repo, store) = store();
    store.save(ADMIN, None, None, &[]).await.unwrap();
    let row = repo.row(ADMIN).unwrap();
    assert_eq!(row.flow_state, None);
    assert_eq!(row.current_flow, None);
}

#[tokio::test]
async fn nav_only_save_has_no_wizard() {
    let (_, store) = store();
    store.save(ADMIN, None, None, &nav()).await.unwrap();
    let loaded = store.load(ADMIN).await.unwrap();
    assert_eq!(loaded.wizard, None);
    assert_eq!(loaded.nav, nav());
    assert!(loaded.active_wizard().is_none());
}

#[tokio::test]
async fn legacy_bare_wizard_blob_is_accepted() {
    let (repo, store) = store();
    let legacy = br#"{"flow":"edit_team","step":1,"data":{"id":"4","note_action":"delete"}}"#;
    repo.insert_raw(ADMIN, Some("edit_team"), Some(legacy));

    let loaded = store.load(ADMIN).await.unwrap();
    let w = loaded.wizard.unwrap();
    assert_eq!(w.flow, "edit_team");
    assert_eq!(w.step, 1);
    assert_eq!(w.data.patch("note"), cb_core::Patch::Cleared);
    assert!(loaded.nav.is_empty());
}

#[tokio::test]
async fn clear_deletes_row() {
    let (repo, store) = store();
    store.save(ADMIN, Some("create_team"), Some(&wizard()), &[]).await.unwrap();
    store.clear(ADMIN).await.unwrap();
    assert!(repo.row(ADMIN).is_none());
    assert_eq!(store.load(ADMIN).await.unwrap(), LoadedSession::default());
}

#[tokio::test]
async fn mismatched_flow_column_is_not_active() {
    let (_, store) = store();
    store.save(ADMIN, Some("edit_team"), Some(&wizard()), &[]).await.unwrap();
    let loaded = store.load(ADMIN).await.unwrap();
    assert!(loaded.active_wizard().is_none());
}

#[parameterized(
    empty = { b"" },
    whitespace = { b"  \n" },
    null = { b"null" },
    empty_object = { b"{}" },
    null_parts = { br#"{"wizard":null}"# },
)]
fn decode_empty_shapes(blob: &[u8]) {
    let (wizard, nav) = decode_flow_state(ADMIN, blob).unwrap();
    assert!(wizard.is_none());
    assert!(nav.is_empty());
}

#[parameterized(
    not_json = { b"\x00\x01garbage" },
    array = { b"[1,2]" },
    unknown_object = { br#"{"foo":1}"# },
    bad_wizard_in_envelope = { br#"{"wizard":{"step":"x"}}"# },
    bad_nav = { br#"{"nav":[{"params":{}}]}"# },
)]
fn decode_rejects_corruption(blob: &[u8]) {
    let err = decode_flow_state(ADMIN, blob).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { admin: 100 }));
}

#[test]
fn encoded_envelope_omits_absent_parts() {
    let blob = encode_flow_state(None, &[NavEntry::new("teams_menu")]).unwrap().unwrap();
    assert_eq!(
        String::from_utf8(blob).unwrap(),
        r#"{"nav":[{"action":"teams_menu"}]}"#
    );
}
