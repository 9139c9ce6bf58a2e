// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use vintage_booth::constants::{
    EXPORT_FILE_PREFIX, MAX_SHOTS_PER_RUN, ShotCount, TimerSetting,
};

#[test]
fn test_timer_setting_values() {
    // Test that all selector values exist (Off, 3s, 5s, 10s)
    assert_eq!(TimerSetting::ALL.len(), 4);

    let seconds: Vec<u32> = TimerSetting::ALL.iter().map(|t| t.seconds()).collect();
    assert_eq!(seconds, vec![0, 3, 5, 10]);
}

#[test]
fn test_timer_setting_ordering() {
    // Test that selector values are ordered from shortest to longest
    let mut prev = 0;
    for timer in TimerSetting::ALL {
        assert!(
            timer.seconds() >= prev,
            "Timer settings should be ordered from shortest to longest"
        );
        prev = timer.seconds();
    }
}

#[test]
fn test_timer_setting_cycle() {
    // Cycling from every setting returns to the start after four steps
    for timer in TimerSetting::ALL {
        assert_eq!(timer.next().next().next().next(), timer);
    }
}

#[test]
fn test_timer_setting_from_seconds() {
    for timer in TimerSetting::ALL {
        assert_eq!(TimerSetting::from_seconds(timer.seconds()), Some(timer));
    }
    assert_eq!(TimerSetting::from_seconds(7), None);
}

#[test]
fn test_shot_count_values() {
    assert_eq!(ShotCount::ALL.len(), 4);

    let counts: Vec<u32> = ShotCount::ALL.iter().map(|s| s.count()).collect();
    assert_eq!(counts, vec![1, 2, 3, 4]);
}

#[test]
fn test_shot_count_from_count() {
    for shots in ShotCount::ALL {
        assert_eq!(ShotCount::from_count(shots.count()), Some(shots));
    }
    assert_eq!(ShotCount::from_count(0), None);
    assert_eq!(ShotCount::from_count(5), None);
}

#[test]
fn test_max_shots_matches_largest_selector() {
    assert_eq!(MAX_SHOTS_PER_RUN, ShotCount::Four.count());
}

#[test]
fn test_selector_display_names() {
    // Test that all selectors have non-empty display names
    for timer in TimerSetting::ALL {
        assert!(!timer.display_name().is_empty());
    }
    for shots in ShotCount::ALL {
        assert!(!shots.display_name().is_empty());
    }
}

#[test]
fn test_export_prefix() {
    assert_eq!(EXPORT_FILE_PREFIX, "vintage-photo");
}
