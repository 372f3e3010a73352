//! Theme persistence against a real settings file.

use std::fs;

use spark_storyboard::theme::{self, FileThemeStore, ThemeMode, ThemeStore, THEME_KEY};

fn setup() {
    theme::reset_theme_state();
}

#[test]
fn test_saved_value_wins_over_system() {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

    let mode = theme::init_theme(Box::new(FileThemeStore::new(&path)), ThemeMode::Light);
    assert_eq!(mode, ThemeMode::Dark);
    assert_eq!(theme::active_mode(), ThemeMode::Dark);
}

#[test]
fn test_first_run_writes_system_mode_back() {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mode = theme::init_theme(Box::new(FileThemeStore::new(&path)), ThemeMode::Dark);
    assert_eq!(mode, ThemeMode::Dark);

    let store = FileThemeStore::new(&path);
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_toggle_persists_across_restarts() {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    theme::init_theme(Box::new(FileThemeStore::new(&path)), ThemeMode::Light);
    assert_eq!(theme::toggle_theme(), ThemeMode::Dark);

    // Simulated restart with the opposite system preference.
    setup();
    let mode = theme::init_theme(Box::new(FileThemeStore::new(&path)), ThemeMode::Light);
    assert_eq!(mode, ThemeMode::Dark);
}

#[test]
fn test_other_settings_survive_theme_writes() {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "editor": "vim" }"#).unwrap();

    theme::init_theme(Box::new(FileThemeStore::new(&path)), ThemeMode::Light);
    theme::toggle_theme();

    let store = FileThemeStore::new(&path);
    assert_eq!(store.get("editor").unwrap().as_deref(), Some("vim"));
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_saved_theme_survives_non_string_settings() {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"theme":"dark","fontSize":14}"#).unwrap();

    let mode = theme::init_theme(Box::new(FileThemeStore::new(&path)), ThemeMode::Light);
    assert_eq!(mode, ThemeMode::Dark);

    theme::toggle_theme();
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["theme"], "light");
    assert_eq!(saved["fontSize"], 14);
}

#[test]
fn test_corrupt_settings_fall_back_to_system() {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "not json").unwrap();

    let mode = theme::init_theme(Box::new(FileThemeStore::new(&path)), ThemeMode::Dark);
    assert_eq!(mode, ThemeMode::Dark);

    // The write-back replaced the corrupt file.
    let store = FileThemeStore::new(&path);
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_subscribers_see_toggles_until_unsubscribed() {
    use std::cell::RefCell;
    use std::rc::Rc;

    setup();
    let dir = tempfile::tempdir().unwrap();
    theme::init_theme(
        Box::new(FileThemeStore::new(dir.path().join("settings.json"))),
        ThemeMode::Light,
    );

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let unsubscribe = theme::subscribe(move |mode| sink.borrow_mut().push(mode));

    theme::toggle_theme();
    theme::toggle_theme();
    unsubscribe();
    theme::toggle_theme();

    assert_eq!(*seen.borrow(), vec![ThemeMode::Dark, ThemeMode::Light]);
}
