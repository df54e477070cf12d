use super::*;

fn removed(inner: PlayStatus) -> PlayStatus {
    PlayStatus::Removed(Some(Box::new(inner)))
}

#[test]
fn labels_round_trip() {
    let statuses = [
        PlayStatus::Unplayed,
        PlayStatus::Played,
        PlayStatus::Playing,
        PlayStatus::Finished,
        PlayStatus::Waiting,
        PlayStatus::Quit,
        PlayStatus::MustPlay,
        PlayStatus::Ignore,
        PlayStatus::Demo,
        removed(PlayStatus::Played),
        PlayStatus::Removed(None),
        PlayStatus::Other("Co-op only".to_string()),
    ];
    for status in statuses {
        let text = status.to_string();
        assert_eq!(PlayStatus::parse_loose(&text), Some(status), "'{}'", text);
    }
}

#[test]
fn parse_is_case_insensitive_and_trims() {
    assert_eq!(PlayStatus::parse_loose("  must play "), Some(PlayStatus::MustPlay));
    assert_eq!(PlayStatus::parse_loose("FINISHED"), Some(PlayStatus::Finished));
    assert_eq!(
        PlayStatus::parse_loose("removed | waiting"),
        Some(removed(PlayStatus::Waiting))
    );
}

#[test]
fn empty_text_is_unset() {
    assert_eq!(PlayStatus::parse_loose(""), None);
    assert_eq!(PlayStatus::parse_loose("   "), None);
}

#[test]
fn double_removed_prefix_collapses() {
    assert_eq!(
        PlayStatus::parse_loose("Removed | Removed | Quit"),
        Some(removed(PlayStatus::Quit))
    );
}

#[test]
fn wrap_removed_never_double_wraps() {
    let once = PlayStatus::wrap_removed(Some(PlayStatus::Playing));
    assert_eq!(once.to_string(), "Removed | Playing");
    let twice = PlayStatus::wrap_removed(Some(once.clone()));
    assert_eq!(twice, once);
    assert_eq!(PlayStatus::wrap_removed(None).to_string(), "Removed | ");
}

#[test]
fn unwrap_removed_restores_previous_status() {
    assert_eq!(removed(PlayStatus::Finished).unwrap_removed(), Some(PlayStatus::Finished));
    assert_eq!(PlayStatus::Removed(None).unwrap_removed(), None);
    assert_eq!(PlayStatus::Demo.unwrap_removed(), Some(PlayStatus::Demo));
}

#[test]
fn decide_by_playtime_table() {
    let cases: &[(Option<PlayStatus>, u64, PlayStatus)] = &[
        (None, 0, PlayStatus::Unplayed),
        (None, 29, PlayStatus::Unplayed),
        (None, 30, PlayStatus::Played),
        (None, 59, PlayStatus::Played),
        (None, 60, PlayStatus::Playing),
        (Some(PlayStatus::Unplayed), 45, PlayStatus::Played),
        (Some(PlayStatus::Played), 600, PlayStatus::Playing),
        (Some(PlayStatus::Demo), 10, PlayStatus::Unplayed),
        (Some(PlayStatus::Other("Backlog".into())), 90, PlayStatus::Playing),
        (Some(removed(PlayStatus::Unplayed)), 31, PlayStatus::Played),
    ];
    for (current, minutes, expected) in cases {
        assert_eq!(
            decide(current.as_ref(), Some(*minutes)).as_ref(),
            Some(expected),
            "decide({:?}, {})",
            current,
            minutes
        );
    }
}

#[test]
fn locked_statuses_are_sticky() {
    for locked in [
        PlayStatus::Waiting,
        PlayStatus::Quit,
        PlayStatus::Finished,
        PlayStatus::Ignore,
    ] {
        for minutes in [0, 30, 60, 10_000] {
            assert_eq!(decide(Some(&locked), Some(minutes)), Some(locked.clone()));
        }
    }
}

#[test]
fn must_play_survives_until_played() {
    assert_eq!(decide(Some(&PlayStatus::MustPlay), Some(0)), Some(PlayStatus::MustPlay));
    assert_eq!(decide(Some(&PlayStatus::MustPlay), Some(29)), Some(PlayStatus::MustPlay));
    assert_eq!(decide(Some(&PlayStatus::MustPlay), Some(30)), Some(PlayStatus::Played));
}

#[test]
fn malformed_playtime_passes_current_through() {
    assert_eq!(decide(Some(&PlayStatus::Playing), None), Some(PlayStatus::Playing));
    assert_eq!(decide(None, None), None);
}

#[test]
fn removed_bucket_collapses_variants() {
    assert_eq!(removed(PlayStatus::Played).bucket(), "Removed");
    assert_eq!(PlayStatus::Removed(None).bucket(), "Removed");
}
