use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

#[test]
fn empty_file_uses_default_page_size() {
    let settings = parse_settings("").expect("parse empty settings");
    assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn reads_page_size_from_toml() {
    let settings = parse_settings("page_size = 20").expect("parse settings");
    assert_eq!(settings, ListSettings { page_size: 20 });
}

#[test]
fn zero_page_size_falls_back_to_default() {
    let settings = parse_settings("page_size = 0").expect("parse settings");
    assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn rejects_malformed_toml() {
    assert!(parse_settings("page_size = \"many\"").is_err());
}

#[test]
fn env_override_ignores_garbage() {
    let mut settings = ListSettings { page_size: 10 };
    apply_page_size_override(&mut settings, "lots");
    assert_eq!(settings.page_size, 10);

    apply_page_size_override(&mut settings, " 25 ");
    assert_eq!(settings.page_size, 25);
}

#[test]
fn loads_settings_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("secret_list_settings_{suffix}.toml"));
    fs::write(&path, "page_size = 75\n").expect("write settings");

    let settings = read_settings_file(&path);
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.page_size, 75);
    assert_eq!(with_override(settings.clone(), None).page_size, 75);
    assert_eq!(with_override(settings, Some("30")).page_size, 30);
}

#[test]
fn missing_file_yields_defaults() {
    let settings = read_settings_file(Path::new("/nonexistent/secret_list.toml"));
    assert_eq!(settings, ListSettings::default());
}

#[test]
fn malformed_file_yields_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("secret_list_bad_settings_{suffix}.toml"));
    fs::write(&path, "page_size = [").expect("write settings");

    let settings = read_settings_file(&path);
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings, ListSettings::default());
}

#[test]
fn zero_override_falls_back_to_default() {
    let settings = with_override(ListSettings { page_size: 20 }, Some("0"));
    assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
}
