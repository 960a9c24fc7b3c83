// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::local::{LocalState, LocalStateFile};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_loads_defaults() {
    let dir: TempDir = TempDir::new().unwrap();
    let file: LocalStateFile = LocalStateFile::new(dir.path().join("state.json"));

    let state: LocalState = file.load();
    assert_eq!(state, LocalState::default());
}

#[test]
fn test_save_then_load_round_trips() {
    let dir: TempDir = TempDir::new().unwrap();
    let file: LocalStateFile = LocalStateFile::new(dir.path().join("state.json"));

    let mut state: LocalState = LocalState::default();
    state.retired.retire("A2");
    state.last_opened_code = Some(String::from("A2"));
    state.day_view_date = Some(String::from("2026-01-15"));
    state
        .day_comments
        .insert(String::from("2026-01-15"), String::from("marea alta"));
    state.hidden_months.push(String::from("2025-06"));
    file.save(&state);

    let loaded: LocalState = file.load();
    assert_eq!(loaded, state);
}

#[test]
fn test_corrupt_file_degrades_to_defaults() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "{ definitely not json").unwrap();

    let file: LocalStateFile = LocalStateFile::new(&path);
    assert_eq!(file.load(), LocalState::default());
}

#[test]
fn test_partial_file_fills_missing_fields() {
    // Older mirror files may lack newer fields; they default in.
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, r#"{"retired":["B9"]}"#).unwrap();

    let file: LocalStateFile = LocalStateFile::new(&path);
    let state: LocalState = file.load();
    assert!(state.retired.contains("B9"));
    assert!(state.cache.passengers.is_empty());
    assert_eq!(state.last_opened_code, None);
}

#[test]
fn test_save_creates_parent_directory() {
    let dir: TempDir = TempDir::new().unwrap();
    let file: LocalStateFile = LocalStateFile::new(dir.path().join("nested/dir/state.json"));

    file.save(&LocalState::default());
    assert!(file.path().exists());
}
