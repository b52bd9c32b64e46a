//! Property tests for the overlap detector.

use chrono::NaiveTime;
use proptest::prelude::*;

use registrar_core::{
    find_overlaps, section_conflict, slot_overlap, MeetingSlot, Section, Semester, Weekday,
};

fn minute(m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap()
}

fn weekday_strategy() -> impl Strategy<Value = Weekday> {
    prop_oneof![
        Just(Weekday::Monday),
        Just(Weekday::Tuesday),
        Just(Weekday::Wednesday),
    ]
}

/// Short slots on a handful of weekdays, dense enough to collide often.
fn slot_strategy() -> impl Strategy<Value = MeetingSlot> {
    (weekday_strategy(), 480u32..1080, 1u32..90).prop_map(|(day, start, len)| {
        MeetingSlot::new(day, minute(start), minute(start + len)).unwrap()
    })
}

/// Sections with unique identifiers spread over a few terms.
fn sections_strategy() -> impl Strategy<Value = Vec<Section>> {
    proptest::collection::vec(
        (
            prop_oneof![Just(Semester::Spring), Just(Semester::Fall)],
            prop_oneof![Just(2023), Just(2024)],
            proptest::collection::vec(slot_strategy(), 0..3),
        ),
        0..10,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (semester, year, slots))| {
                Section::new(format!("C-{i:03}"), "1", semester, year).with_meetings(slots)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_slot_overlap_is_symmetric(a in slot_strategy(), b in slot_strategy()) {
        prop_assert_eq!(slot_overlap(&a, &b), slot_overlap(&b, &a));
    }

    #[test]
    fn prop_window_is_the_exact_intersection(a in slot_strategy(), b in slot_strategy()) {
        if let Some(window) = slot_overlap(&a, &b) {
            prop_assert_eq!(a.day, b.day);
            prop_assert_eq!(window.start, a.start.max(b.start));
            prop_assert_eq!(window.end, a.end.min(b.end));
            prop_assert!(window.start < window.end);
        }
    }

    #[test]
    fn prop_back_to_back_slots_never_overlap(
        day in weekday_strategy(),
        start in 480u32..1000,
        first in 1u32..60,
        second in 1u32..60,
    ) {
        let a = MeetingSlot::new(day, minute(start), minute(start + first)).unwrap();
        let b = MeetingSlot::new(day, minute(start + first), minute(start + first + second)).unwrap();
        prop_assert!(slot_overlap(&a, &b).is_none());
        prop_assert!(slot_overlap(&b, &a).is_none());
    }

    #[test]
    fn prop_scan_is_order_independent(sections in sections_strategy().prop_shuffle()) {
        let mut sorted = sections.clone();
        sorted.sort_by(|a, b| a.id_key().cmp(&b.id_key()));
        prop_assert_eq!(find_overlaps(&sections), find_overlaps(&sorted));
    }

    #[test]
    fn prop_each_conflicting_pair_reported_exactly_once(sections in sections_strategy()) {
        let pairs = find_overlaps(&sections);

        // expected count straight from the pure pair predicate
        let mut expected = 0;
        for i in 0..sections.len() {
            for j in (i + 1)..sections.len() {
                if section_conflict(&sections[i], &sections[j]).is_some() {
                    expected += 1;
                }
            }
        }
        prop_assert_eq!(pairs.len(), expected);

        // no unordered pair appears twice
        let mut seen = std::collections::HashSet::new();
        for pair in &pairs {
            let key = (
                pair.course_id_1.clone(),
                pair.sec_id_1.clone(),
                pair.course_id_2.clone(),
                pair.sec_id_2.clone(),
            );
            prop_assert!(seen.insert(key), "duplicate pair {:?}", pair);
        }
    }

    #[test]
    fn prop_reported_pairs_are_sound(sections in sections_strategy()) {
        let lookup = |course: &str, sec: &str| {
            sections
                .iter()
                .find(|s| s.course_id == course && s.sec_id == sec)
                .unwrap()
        };
        for pair in find_overlaps(&sections) {
            let a = lookup(&pair.course_id_1, &pair.sec_id_1);
            let b = lookup(&pair.course_id_2, &pair.sec_id_2);
            // identifiers come out in canonical order within the pair
            prop_assert!(a.id_key() < b.id_key());
            // both sections belong to the reported term
            prop_assert_eq!(a.term(), (pair.year, pair.semester));
            prop_assert_eq!(b.term(), (pair.year, pair.semester));
            // and they really do conflict
            let (day, window) = section_conflict(a, b).unwrap();
            prop_assert_eq!(day, pair.day);
            prop_assert_eq!(window, pair.window);
        }
    }
}
