use backlog_core::*;
use backlog_db::*;
use backlog_import::*;
use chrono::{DateTime, TimeZone, Utc};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, d, 9, 0, 0).unwrap()
}

fn options<'a>(d: u32) -> SyncOptions<'a> {
    SyncOptions {
        now: day(d),
        ..Default::default()
    }
}

fn steam(name: &str, id: u64, minutes: u64) -> ExternalRecord {
    ExternalRecord::new(name, Platform::Steam)
        .with_identifier(id)
        .with_minutes(Some(minutes))
}

#[test]
fn first_sync_adds_everything() {
    let conn = open_memory().unwrap();
    let batch = [steam("Hades", 1145360, 0), steam("Celeste", 504230, 45)];

    let result = sync_records(&conn, PlatformGroup::Steam, &batch, &options(1), &SilentProgress).unwrap();
    assert_eq!(result.added.len(), 2);

    let hades = find_by_identifier(&conn, 1145360).unwrap().unwrap();
    assert_eq!(hades.play_status, Some(PlayStatus::Unplayed));
    let celeste = find_by_identifier(&conn, 504230).unwrap().unwrap();
    assert_eq!(celeste.play_status, Some(PlayStatus::Played));
    assert_eq!(celeste.added_at, Some(day(1)));

    let logs = list_sync_logs(&conn, 5).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].source, "steam");
    assert_eq!(logs[0].records_seen, 2);
    assert_eq!(logs[0].records_added, 2);
}

#[test]
fn resync_updates_removes_and_restores() {
    let conn = open_memory().unwrap();
    let first = [steam("Hades", 1, 10), steam("Celeste", 2, 0)];
    sync_records(&conn, PlatformGroup::Steam, &first, &options(1), &SilentProgress).unwrap();

    // Celeste disappears, Hades gains playtime.
    let second = [steam("Hades", 1, 75)];
    let result = sync_records(&conn, PlatformGroup::Steam, &second, &options(2), &SilentProgress).unwrap();
    assert_eq!(result.updated.len(), 1);
    assert_eq!(result.removed, vec!["Celeste".to_string()]);

    let hades = find_by_identifier(&conn, 1).unwrap().unwrap();
    assert_eq!(hades.minutes_played, 75);
    assert_eq!(hades.play_status, Some(PlayStatus::Playing));
    let celeste = find_by_identifier(&conn, 2).unwrap().unwrap();
    assert_eq!(celeste.play_status.as_ref().map(|s| s.to_string()).as_deref(), Some("Removed | Unplayed"));

    // Same omission again: nothing new to do.
    let result = sync_records(&conn, PlatformGroup::Steam, &second, &options(3), &SilentProgress).unwrap();
    assert!(result.is_noop());
    let celeste = find_by_identifier(&conn, 2).unwrap().unwrap();
    assert_eq!(celeste.play_status, Some(PlayStatus::wrap_removed(Some(PlayStatus::Unplayed))));

    // Celeste comes back.
    let third = [steam("Hades", 1, 75), steam("Celeste", 2, 0)];
    let result = sync_records(&conn, PlatformGroup::Steam, &third, &options(4), &SilentProgress).unwrap();
    assert_eq!(result.restored, vec!["Celeste".to_string()]);
    let celeste = find_by_identifier(&conn, 2).unwrap().unwrap();
    assert_eq!(celeste.play_status, Some(PlayStatus::Unplayed));

    assert_eq!(list_sync_logs(&conn, 10).unwrap().len(), 4);
}

#[test]
fn reported_decrease_keeps_stored_playtime() {
    let conn = open_memory().unwrap();
    sync_records(&conn, PlatformGroup::Steam, &[steam("Hades", 1, 10)], &options(1), &SilentProgress).unwrap();
    let result =
        sync_records(&conn, PlatformGroup::Steam, &[steam("Hades", 1, 5)], &options(2), &SilentProgress).unwrap();
    assert!(result.is_noop());
    let hades = find_by_identifier(&conn, 1).unwrap().unwrap();
    assert_eq!(hades.minutes_played, 10);
    assert_eq!(hades.last_updated, Some(day(1)));
}

#[test]
fn manual_status_is_not_overwritten() {
    let conn = open_memory().unwrap();
    sync_records(&conn, PlatformGroup::Steam, &[steam("Hades", 1, 10)], &options(1), &SilentProgress).unwrap();
    let target = find_by_identifier(&conn, 1).unwrap().unwrap().to_ref();
    set_status(&conn, &target, Some(&PlayStatus::Quit), &day(2)).unwrap();

    sync_records(&conn, PlatformGroup::Steam, &[steam("Hades", 1, 300)], &options(3), &SilentProgress).unwrap();
    let hades = find_by_identifier(&conn, 1).unwrap().unwrap();
    assert_eq!(hades.minutes_played, 300);
    assert_eq!(hades.play_status, Some(PlayStatus::Quit));
}

#[test]
fn dry_run_writes_nothing() {
    let conn = open_memory().unwrap();
    let opts = SyncOptions {
        dry_run: true,
        ..options(1)
    };
    let result = sync_records(&conn, PlatformGroup::Steam, &[steam("Hades", 1, 0)], &opts, &SilentProgress).unwrap();
    assert_eq!(result.added.len(), 1);
    assert!(all_records(&conn).unwrap().is_empty());
    assert!(list_sync_logs(&conn, 5).unwrap().is_empty());
}

#[test]
fn ignore_list_keeps_games_out() {
    let conn = open_memory().unwrap();
    let ignore = IgnoreList::new(["Spacewar"], [228980]);
    let opts = SyncOptions {
        skip: &ignore,
        ..options(1)
    };
    let batch = [
        steam("Spacewar", 480, 5),
        steam("Steamworks Common Redistributables", 228980, 0),
        steam("Hades", 1, 0),
    ];
    let result = sync_records(&conn, PlatformGroup::Steam, &batch, &opts, &SilentProgress).unwrap();
    assert_eq!(result.skipped, 2);
    assert_eq!(all_records(&conn).unwrap().len(), 1);
    assert_eq!(list_sync_logs(&conn, 1).unwrap()[0].records_skipped, 2);
}

#[test]
fn sync_leaves_other_platforms_alone() {
    let conn = open_memory().unwrap();
    insert_record(&conn, &Record::new("Bloodborne", Platform::Ps4).with_status(PlayStatus::Playing)).unwrap();

    sync_records(&conn, PlatformGroup::Steam, &[], &options(1), &SilentProgress).unwrap();
    let bloodborne = find_by_name(&conn, PlatformGroup::PlayStation, "Bloodborne").unwrap().unwrap();
    assert_eq!(bloodborne.play_status, Some(PlayStatus::Playing));
}

#[test]
fn identifier_shared_across_groups_does_not_abort_sync() {
    let conn = open_memory().unwrap();
    sync_records(&conn, PlatformGroup::Steam, &[steam("Hades", 1000, 0)], &options(1), &SilentProgress).unwrap();

    let batch = [
        ExternalRecord::new("Bloodborne", Platform::Ps4).with_minutes(Some(0)),
        ExternalRecord::new("Gravity Rush", Platform::Ps4)
            .with_identifier(1000)
            .with_minutes(Some(0)),
    ];
    let result =
        sync_records(&conn, PlatformGroup::PlayStation, &batch, &options(2), &SilentProgress).unwrap();
    assert_eq!(result.added.len(), 2);

    let bloodborne = find_by_name(&conn, PlatformGroup::PlayStation, "Bloodborne").unwrap();
    assert!(bloodborne.is_some());
    let gravity = find_by_name(&conn, PlatformGroup::PlayStation, "Gravity Rush").unwrap().unwrap();
    assert_eq!(gravity.identifier, None);
    let hades = find_by_identifier(&conn, 1000).unwrap().unwrap();
    assert_eq!(hades.name, "Hades");
    assert_eq!(hades.platform, Platform::Steam);
}

#[test]
fn failed_mutation_rolls_back() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_hades BEFORE INSERT ON games
         WHEN NEW.name = 'Hades'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();

    let batch = [steam("Celeste", 2, 0), steam("Hades", 1, 0)];
    let err = sync_records(&conn, PlatformGroup::Steam, &batch, &options(1), &SilentProgress).unwrap_err();
    assert!(matches!(err, SyncError::Db(_)));

    assert!(find_by_identifier(&conn, 2).unwrap().is_none());
    assert!(list_sync_logs(&conn, 5).unwrap().is_empty());
}

#[test]
fn log_progress_reports_a_full_sync() {
    let conn = open_memory().unwrap();
    let batch = [steam("Hades", 1, 0), steam("Celeste", 2, 45)];
    let result = sync_records(&conn, PlatformGroup::Steam, &batch, &options(1), &LogProgress).unwrap();
    assert_eq!(result.added.len(), 2);
    assert_eq!(all_records(&conn).unwrap().len(), 2);
}
