//! Tests for sorting strategy implementations

#[cfg(test)]
mod tests {
    use crate::config::{FieldMatching, OrderingConfig};
    use crate::query::sorting::{
        ChainedSort, FieldSort, KeyExtractor, KeyRegistry, KeySelector,
        OptionalDateKey, OptionalFloatKey, OptionalU64Key, SortStrategy,
        StringKey,
        utils::is_sorted_by,
    };
    use crate::query::types::SortOrder;
    use crate::record::{FieldDescriptor, FieldValue, Record, ValueKind};
    use chrono::{DateTime, TimeZone, Utc};

    #[derive(Clone, Debug)]
    struct Track {
        title: String,
        rating: Option<f64>,
        plays: u64,
        released: Option<DateTime<Utc>>,
    }

    impl Record for Track {
        const ENTITY: &'static str = "Track";
        const FIELDS: &'static [FieldDescriptor<Self>] = &[
            FieldDescriptor::new("title", ValueKind::Text, |t: &Track| {
                FieldValue::Text(t.title.clone())
            }),
            FieldDescriptor::new("rating", ValueKind::Float, |t: &Track| {
                t.rating.into()
            })
            .nullable(),
            FieldDescriptor::new("plays", ValueKind::UInt, |t: &Track| {
                FieldValue::UInt(t.plays)
            }),
            FieldDescriptor::new("released", ValueKind::Timestamp, |t: &Track| {
                t.released.into()
            })
            .nullable(),
        ];
    }

    fn create_test_track(
        title: &str,
        rating: Option<f64>,
        plays: u64,
        year: Option<i32>,
    ) -> Track {
        Track {
            title: title.to_string(),
            rating,
            plays,
            released: year
                .map(|year| Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    fn tracks() -> Vec<Track> {
        vec![
            create_test_track("Delta", Some(7.5), 40, Some(2019)),
            create_test_track("Alpha", None, 10, None),
            create_test_track("Charlie", Some(9.1), 40, Some(2021)),
            create_test_track("Bravo", Some(7.5), 25, Some(2015)),
        ]
    }

    fn selector(name: &str) -> KeySelector<Track> {
        KeySelector::new(Track::field(name, FieldMatching::Exact).unwrap())
    }

    fn titles(items: &[Track]) -> Vec<&str> {
        items.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_field_sort_by_title() {
        let mut items = tracks();
        let sort = FieldSort::new(
            selector("title").typed::<StringKey>().unwrap(),
            SortOrder::Ascending,
        );
        sort.sort(&mut items).unwrap();

        assert_eq!(titles(&items), vec!["Alpha", "Bravo", "Charlie", "Delta"]);
    }

    #[test]
    fn test_field_sort_reverse() {
        let mut items = tracks();
        let sort = FieldSort::new(
            selector("plays").typed::<OptionalU64Key>().unwrap(),
            SortOrder::Descending,
        );
        sort.sort(&mut items).unwrap();

        // Delta and Charlie tie on plays and keep their input order
        assert_eq!(titles(&items), vec!["Delta", "Charlie", "Bravo", "Alpha"]);
        assert!(is_sorted_by(&items, |a, b| b.plays.cmp(&a.plays)));
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let mut items = tracks();
            FieldSort::new(
                selector("rating").typed::<OptionalFloatKey>().unwrap(),
                order,
            )
            .sort(&mut items)
            .unwrap();

            assert_eq!(items.last().unwrap().title, "Alpha", "{order}");
        }

        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let mut items = tracks();
            FieldSort::new(
                selector("released").typed::<OptionalDateKey>().unwrap(),
                order,
            )
            .sort(&mut items)
            .unwrap();

            assert_eq!(items.last().unwrap().title, "Alpha", "{order}");
        }
    }

    #[test]
    fn test_chained_sort_breaks_ties_in_clause_order() {
        let registry = KeyRegistry::<Track>::standard(&OrderingConfig::default());
        let sort = ChainedSort::new(
            registry
                .bind(selector("rating"), SortOrder::Descending)
                .unwrap(),
        )
        .then_by(
            registry
                .bind(selector("plays"), SortOrder::Ascending)
                .unwrap(),
        );

        let mut items = tracks();
        sort.sort(&mut items).unwrap();

        assert_eq!(titles(&items), vec!["Charlie", "Bravo", "Delta", "Alpha"]);
        assert_eq!(sort.len(), 2);
        assert_eq!(
            sort.rules()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["rating:desc", "plays:asc"]
        );
    }

    #[test]
    fn test_chained_sort_matches_static_sort_by() {
        let registry = KeyRegistry::<Track>::standard(&OrderingConfig::default());
        let sort = ChainedSort::new(
            registry.bind(selector("plays"), SortOrder::Ascending).unwrap(),
        )
        .then_by(
            registry.bind(selector("title"), SortOrder::Descending).unwrap(),
        );

        let mut dynamic = tracks();
        sort.sort(&mut dynamic).unwrap();

        let mut expected = tracks();
        expected.sort_by(|a, b| {
            a.plays.cmp(&b.plays).then_with(|| b.title.cmp(&a.title))
        });

        assert_eq!(titles(&dynamic), titles(&expected));
    }

    #[test]
    fn test_fully_tied_records_keep_input_order() {
        let mut items = vec![
            create_test_track("First", Some(5.0), 1, None),
            create_test_track("Second", Some(5.0), 1, None),
            create_test_track("Third", Some(5.0), 1, None),
        ];
        let registry = KeyRegistry::<Track>::standard(&OrderingConfig::default());
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            ChainedSort::new(registry.bind(selector("rating"), order).unwrap())
                .then_by(registry.bind(selector("released"), order).unwrap())
                .sort(&mut items)
                .unwrap();
            assert_eq!(titles(&items), vec!["First", "Second", "Third"]);
        }
    }

    #[test]
    fn test_already_ordered_input_is_left_alone() {
        let registry = KeyRegistry::<Track>::standard(&OrderingConfig::default());
        let clause = registry.bind(selector("plays"), SortOrder::Descending).unwrap();
        assert_eq!(clause.key_kind(), ValueKind::UInt);

        let mut items = vec![
            create_test_track("Delta", Some(7.5), 40, None),
            create_test_track("Charlie", None, 40, None),
            create_test_track("Alpha", Some(1.0), 10, None),
        ];
        ChainedSort::new(clause).sort(&mut items).unwrap();
        assert_eq!(titles(&items), vec!["Delta", "Charlie", "Alpha"]);
    }

    #[test]
    fn test_empty_input_sorts_cleanly() {
        let registry = KeyRegistry::<Track>::standard(&OrderingConfig::default());
        let mut items: Vec<Track> = Vec::new();
        ChainedSort::new(
            registry.bind(selector("title"), SortOrder::Ascending).unwrap(),
        )
        .sort(&mut items)
        .unwrap();
        assert!(items.is_empty());
    }
}
