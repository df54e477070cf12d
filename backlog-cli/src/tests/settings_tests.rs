use super::*;

fn write_settings(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.match_limit(), backlog_match::DEFAULT_LIMIT);
    assert!(settings.ignore_list().is_empty());
}

#[test]
fn full_file_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(
        &dir,
        r#"
[library]
db_path = "/tmp/games.db"

[ignore]
names = ["Spacewar"]
identifiers = [480, 228980]

[matching]
limit = 3
"#,
    );
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.library.db_path, Some(PathBuf::from("/tmp/games.db")));
    assert_eq!(settings.ignore.identifiers, vec![480, 228980]);
    assert_eq!(settings.match_limit(), 3);
    assert_eq!(settings.ignore_list().len(), 3);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(&dir, "[ignore]\nnames = [\"Proton\"]\n");
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.library.db_path, None);
    assert_eq!(settings.match_limit(), backlog_match::DEFAULT_LIMIT);
    assert!(settings.ignore_list().contains_name("proton"));
}

#[test]
fn invalid_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(&dir, "[matching]\nlimit = \"many\"\n");
    assert!(matches!(load_settings_from(&path), Err(CliError::Config(_))));
}

#[test]
fn zero_limit_is_clamped() {
    let mut settings = Settings::default();
    settings.matching.limit = 0;
    assert_eq!(settings.match_limit(), 1);
}

#[test]
fn db_path_resolution_order() {
    let mut settings = Settings::default();
    assert_eq!(resolve_db_path(None, &settings), default_db_path());

    settings.library.db_path = Some(PathBuf::from("/saved.db"));
    assert_eq!(resolve_db_path(None, &settings), PathBuf::from("/saved.db"));

    let cli = Some(PathBuf::from("/cli.db"));
    assert_eq!(resolve_db_path(cli, &settings), PathBuf::from("/cli.db"));
}

#[test]
fn ignore_entry_parsing() {
    assert_eq!(IgnoreEntry::parse(" 480 ", true).unwrap(), IgnoreEntry::Identifier(480));
    assert_eq!(
        IgnoreEntry::parse("Spacewar", false).unwrap(),
        IgnoreEntry::Name("Spacewar".into())
    );
    assert!(IgnoreEntry::parse("   ", false).is_err());
}

#[test]
fn numeric_names_stay_names_without_id_flag() {
    assert_eq!(IgnoreEntry::parse("1942", false).unwrap(), IgnoreEntry::Name("1942".into()));
    assert_eq!(IgnoreEntry::parse("2048", true).unwrap(), IgnoreEntry::Identifier(2048));
    assert!(matches!(
        IgnoreEntry::parse("Spacewar", true),
        Err(CliError::InvalidInput(_))
    ));
}

#[test]
fn add_ignore_entry_preserves_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_settings(
        &dir,
        "[library]\ndb_path = \"/x.db\"\n\n[custom]\nkeep = true\n",
    );

    assert!(add_ignore_entry(&path, &IgnoreEntry::Name("Spacewar".into())).unwrap());
    assert!(add_ignore_entry(&path, &IgnoreEntry::Identifier(480)).unwrap());
    assert!(!add_ignore_entry(&path, &IgnoreEntry::Name("spacewar".into())).unwrap());
    assert!(!add_ignore_entry(&path, &IgnoreEntry::Identifier(480)).unwrap());

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.library.db_path, Some(PathBuf::from("/x.db")));
    assert_eq!(settings.ignore.names, vec!["Spacewar".to_string()]);
    assert_eq!(settings.ignore.identifiers, vec![480]);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("keep = true"));
    assert!(!path.with_extension("toml.tmp").exists());
}

#[test]
fn add_ignore_entry_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    assert!(add_ignore_entry(&path, &IgnoreEntry::Name("Proton".into())).unwrap());
    assert!(load_settings_string(&path).unwrap().contains("Proton"));
}
