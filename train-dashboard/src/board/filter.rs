//! Category and time-window filtering.

use chrono::{DateTime, Utc};

use crate::domain::{ArrivalWindow, Train, TrainCategory};

/// Trains of `category` arriving within the rolling window starting at `now`.
///
/// A train is included iff its label exactly matches the category and its
/// expected arrival parses and lies in `[now, now + 24h]`. Trains whose
/// arrival time does not parse are excluded. The result keeps the order of
/// `trains`; no sort is applied.
pub fn trains_in_category(
    trains: &[Train],
    category: TrainCategory,
    now: DateTime<Utc>,
) -> Vec<&Train> {
    let window = ArrivalWindow::rolling(now);
    trains
        .iter()
        .filter(|train| train.category() == Some(category))
        .filter(|train| {
            train
                .expected_arrival()
                .is_ok_and(|arrival| window.contains(arrival))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Utc};

    use crate::domain::Train;

    pub fn train(name: &str, kind: &str, arrival: DateTime<Utc>) -> Train {
        Train {
            name: name.to_string(),
            kind: kind.to_string(),
            average_speed: 60.0,
            departure_station: "ndls".to_string(),
            expected_arrival_time: arrival.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::train;
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn names(trains: &[&Train]) -> Vec<String> {
        trains.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn goods_within_window_express_outside() {
        let feed = vec![
            train("T1", "Goods", now() + Duration::hours(1)),
            train("T2", "Express", now() + Duration::hours(30)),
        ];

        let goods = trains_in_category(&feed, TrainCategory::Goods, now());
        assert_eq!(names(&goods), ["T1"]);

        let express = trains_in_category(&feed, TrainCategory::Express, now());
        assert!(express.is_empty());
    }

    #[test]
    fn boundaries_are_inclusive() {
        let feed = vec![
            train("AT_NOW", "Goods", now()),
            train("AT_END", "Goods", now() + Duration::hours(24)),
            train("BEFORE", "Goods", now() - Duration::seconds(1)),
            train("AFTER", "Goods", now() + Duration::hours(24) + Duration::seconds(1)),
        ];

        let goods = trains_in_category(&feed, TrainCategory::Goods, now());
        assert_eq!(names(&goods), ["AT_NOW", "AT_END"]);
    }

    #[test]
    fn unparseable_arrival_is_excluded() {
        let mut bad = train("BAD", "Passenger", now());
        bad.expected_arrival_time = "Invalid Date".to_string();
        let feed = vec![bad, train("OK", "Passenger", now() + Duration::minutes(5))];

        let passenger = trains_in_category(&feed, TrainCategory::Passenger, now());
        assert_eq!(names(&passenger), ["OK"]);
    }

    #[test]
    fn unknown_labels_never_match() {
        let feed = vec![
            train("F1", "Freight", now() + Duration::hours(1)),
            train("F2", "goods", now() + Duration::hours(1)),
            train("F3", "Superfast", now() + Duration::hours(1)),
        ];

        for category in TrainCategory::ALL {
            assert!(trains_in_category(&feed, category, now()).is_empty());
        }
    }

    #[test]
    fn preserves_source_order() {
        let feed = vec![
            train("LATE", "Express", now() + Duration::hours(20)),
            train("EARLY", "Express", now() + Duration::hours(1)),
            train("MID", "Express", now() + Duration::hours(10)),
        ];

        let express = trains_in_category(&feed, TrainCategory::Express, now());
        assert_eq!(names(&express), ["LATE", "EARLY", "MID"]);
    }

    #[test]
    fn repeated_calls_agree() {
        let feed = vec![
            train("A", "Goods", now() + Duration::hours(2)),
            train("B", "Goods", now() + Duration::hours(3)),
        ];

        let first = trains_in_category(&feed, TrainCategory::Goods, now());
        let second = trains_in_category(&feed, TrainCategory::Goods, now());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_feed() {
        assert!(trains_in_category(&[], TrainCategory::Goods, now()).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::test_support::train;
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    const LABELS: [&str; 6] = ["Goods", "Super Fast", "Passenger", "Express", "Freight", "goods"];

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    /// (label index, arrival offset from now in seconds)
    fn feed_strategy() -> impl Strategy<Value = Vec<(usize, i64)>> {
        prop::collection::vec((0..LABELS.len(), -3 * 86_400i64..3 * 86_400i64), 0..40)
    }

    fn build(entries: &[(usize, i64)]) -> Vec<Train> {
        entries.iter()
            .enumerate()
            .map(|(i, (label, offset))| {
                train(&format!("T{i}"), LABELS[*label], now() + Duration::seconds(*offset))
            })
            .collect()
    }

    proptest! {
        /// A train is in a category's result iff its label matches and its
        /// arrival is in [now, now + 24h].
        #[test]
        fn membership_matches_rule(entries in feed_strategy(), cat in 0usize..4) {
            let category = TrainCategory::ALL[cat];
            let feed = build(&entries);
            let result = trains_in_category(&feed, category, now());

            for (train, (label, offset)) in feed.iter().zip(&entries) {
                let expected = LABELS[*label] == category.label()
                    && (0..=86_400).contains(offset);
                let present = result.iter().any(|t| t.name == train.name);
                prop_assert_eq!(present, expected, "train {} offset {}", train.name, offset);
            }
        }

        /// Output is a subsequence of the input.
        #[test]
        fn order_is_preserved(entries in feed_strategy(), cat in 0usize..4) {
            let feed = build(&entries);
            let result = trains_in_category(&feed, TrainCategory::ALL[cat], now());

            let positions: Vec<usize> = result
                .iter()
                .map(|t| feed.iter().position(|f| f.name == t.name).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        /// Each train lands in at most one category.
        #[test]
        fn categories_are_disjoint(entries in feed_strategy()) {
            let feed = build(&entries);
            let total: usize = TrainCategory::ALL
                .iter()
                .map(|c| trains_in_category(&feed, *c, now()).len())
                .sum();
            prop_assert!(total <= feed.len());
        }
    }
}
