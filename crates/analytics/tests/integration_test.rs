//! Integration tests for the aggregation core.
//!
//! These run the facade end to end over small hand-built snapshots and
//! check the documented behaviors of each query shape.

use analytics::{Bucket, Field, MovieAnalytics, RankedEntry, count_tokens, rank, split_field};
use data_loader::{MovieCatalog, MovieRecord, MovieStore};

fn with_actors(actors: &[&str]) -> Vec<MovieRecord> {
    actors
        .iter()
        .enumerate()
        .map(|(i, a)| MovieRecord::new(i as i64 + 1, format!("Movie {}", i + 1)).with_actors(*a))
        .collect()
}

#[test]
fn test_top_actors_first_seen_tie_break() {
    let analytics = MovieAnalytics::new(with_actors(&["A, B", "B, C", ""]));
    assert_eq!(
        analytics.top_actors(None),
        vec![
            RankedEntry::new("B", 2),
            RankedEntry::new("A", 1),
            RankedEntry::new("C", 1),
        ]
    );
}

#[test]
fn test_rank_limit_semantics() {
    let records = with_actors(&["A, B, C", "D, E", "A"]);
    let distinct = count_tokens(&records, Field::Actors).len();
    assert_eq!(distinct, 5);

    for limit in [1i64, 3, 5, 9] {
        let ranked = rank(count_tokens(&records, Field::Actors), Some(limit));
        assert_eq!(ranked.len(), (limit as usize).min(distinct));
    }
    for limit in [None, Some(0), Some(-3)] {
        assert_eq!(rank(count_tokens(&records, Field::Actors), limit).len(), distinct);
    }
}

#[test]
fn test_ranking_is_non_increasing() {
    let records = with_actors(&["X, Y, Z", "Y, Z", "Z", "W, X"]);
    let ranked = MovieAnalytics::new(records).top_actors(None);
    assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    assert_eq!(ranked[0], RankedEntry::new("Z", 3));
}

#[test]
fn test_counts_match_raw_occurrences() {
    let records = with_actors(&[" A ,B", "A, A", ",, B", "C"]);
    let counts = count_tokens(&records, Field::Actors);
    for token in ["A", "B", "C"] {
        let expected: usize = records
            .iter()
            .map(|r| {
                split_field(r.actors.as_deref(), ',')
                    .iter()
                    .filter(|t| *t == token)
                    .count()
            })
            .sum();
        assert_eq!(counts.get(token), expected, "token {}", token);
    }
}

#[test]
fn test_director_delimiter_spacing() {
    assert_eq!(split_field(Some("A / B"), '/'), vec!["A", "B"]);
    assert_eq!(split_field(Some("A/B"), '/'), vec!["A", "B"]);

    let records = vec![
        MovieRecord::new(1, "One").with_director("A / B"),
        MovieRecord::new(2, "Two").with_director("A/B"),
    ];
    let ranked = MovieAnalytics::new(records).top_directors(Some(5));
    assert_eq!(ranked, vec![RankedEntry::new("A", 2), RankedEntry::new("B", 2)]);
}

#[test]
fn test_rating_stats_scenario() {
    let records = vec![
        MovieRecord::new(1, "a").with_rating(7.5),
        MovieRecord::new(2, "b").with_rating(7.5),
        MovieRecord::new(3, "c").with_rating(9.0),
        MovieRecord::new(4, "d"),
    ];
    let stats = MovieAnalytics::new(records).rating_stats();

    assert!((stats.average_rating - 8.0).abs() < 1e-9);
    let labels: Vec<_> = stats
        .rating_distribution
        .iter()
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(
        labels,
        vec!["0-1", "1-2", "2-3", "3-4", "4-5", "5-6", "6-7", "7-8", "8-9", "9-10", "10-11"]
    );
    assert_eq!(stats.rating_distribution[7], Bucket::new("7-8", 2));
    assert_eq!(stats.rating_distribution[9], Bucket::new("9-10", 1));

    let highest = stats.highest_rated.unwrap();
    assert_eq!((highest.title.as_str(), highest.rating), ("c", 9.0));
    let lowest = stats.lowest_rated.unwrap();
    assert_eq!((lowest.title.as_str(), lowest.rating), ("a", 7.5));
}

#[test]
fn test_decade_distribution_scenario() {
    let records: Vec<_> = ["1999", "2001", "unknown", "2005"]
        .iter()
        .enumerate()
        .map(|(i, d)| MovieRecord::new(i as i64, "m").with_release_date(*d))
        .collect();

    assert_eq!(
        MovieAnalytics::new(records).decade_distribution(),
        vec![Bucket::new("1990s", 1), Bucket::new("2000s", 2)]
    );
}

#[test]
fn test_rating_filter_is_closed_but_bins_are_half_open() {
    let records = vec![
        MovieRecord::new(1, "nine").with_rating(9.0),
        MovieRecord::new(2, "ten").with_rating(10.0),
    ];
    let analytics = MovieAnalytics::new(records);

    // 9.0 is in bin "9-10", while a 9..=9 range filter still includes it
    assert_eq!(analytics.movies_by_rating(9.0, 9.0).len(), 1);
    assert_eq!(analytics.movies_by_rating(0.0, 10.0).len(), 2);
    assert_eq!(analytics.rating_distribution()[9].count, 1);
}

#[test]
fn test_facade_over_catalog_store() {
    let catalog = MovieCatalog::from_records(vec![
        MovieRecord::new(7, "Heat").with_genres("Crime, Drama").with_release_date("1995"),
        MovieRecord::new(8, "Ronin").with_genres("Action, Crime").with_release_date("1998"),
    ]);
    let snapshot = catalog.fetch_all_movies().unwrap();
    let analytics = MovieAnalytics::new(snapshot);

    assert_eq!(
        analytics.genre_counts(),
        vec![
            RankedEntry::new("Crime", 2),
            RankedEntry::new("Drama", 1),
            RankedEntry::new("Action", 1),
        ]
    );
    assert_eq!(analytics.list_by_year("1998")[0].title, "Ronin");
}
