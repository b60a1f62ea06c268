use proptest::collection::btree_set;
use proptest::prelude::*;
use resbook_booking::codec::{extract_dates, flatten, group};

fn wire_slot() -> impl Strategy<Value = String> {
    (1u32..=12, 1u32..=28, 0u32..23).prop_map(|(m, d, h)| {
        format!("2026-{m:02}-{d:02} {h:02}:00-{:02}:00", h + 1)
    })
}

proptest! {
    #[test]
    fn flatten_of_group_is_sorted_input(set in btree_set(wire_slot(), 0..40), seed in any::<u64>()) {
        let mut slots: Vec<String> = set.into_iter().collect();
        let expected = slots.clone();

        // Any insertion order must come back sorted.
        let len = slots.len().max(1);
        slots.rotate_left(usize::try_from(seed % len as u64).unwrap());
        slots.reverse();

        prop_assert_eq!(flatten(&group(&slots)), expected);
    }

    #[test]
    fn malformed_entries_never_reach_the_group(
        valid in btree_set(wire_slot(), 0..10),
        junk in proptest::collection::vec("[0-9-]{0,12}", 0..10),
    ) {
        let mut slots: Vec<String> = valid.iter().cloned().collect();
        slots.extend(junk);

        let grouped = group(&slots);
        prop_assert_eq!(grouped.slot_count(), valid.len());
        prop_assert_eq!(extract_dates(&slots).len(), grouped.len());
    }
}
