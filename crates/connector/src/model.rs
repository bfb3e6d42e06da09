//! Connector rating lookups and aggregate statistics.
//!
//! # Aggregation
//!
//! Every (letter, side, variant) entry with a strictly positive rating is
//! one "viable" observation. Each observation adds one unit to its
//! variant's probability bucket and its zero-based variant index to a
//! running sum. After the pass:
//!
//! - `median = 1 + sum / count`, a value in `[1.0, 3.0]` on the 1-based
//!   variant scale
//! - `probabilities[j] = bucket[j] / count`, summing to 1.0

use std::sync::OnceLock;

use matrixrain_common::error::{MatrixRainError, MatrixRainResult};
use serde::Serialize;

use crate::table::PROFILES;

/// Number of letters in the table (`a` through `z`).
pub const LETTER_COUNT: usize = 26;

/// Number of connector variants per side.
pub const CONNECTOR_VARIANTS: usize = 3;

/// Highest rating any entry can carry.
pub const MAX_RATING: u8 = 5;

/// Which neighbour of a letter a connector sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

/// Ratings and relevancy flags for one letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterConnectorProfile {
    pub(crate) letter: char,
    pub(crate) rating_left: [u8; CONNECTOR_VARIANTS],
    pub(crate) rating_right: [u8; CONNECTOR_VARIANTS],
    pub(crate) relevant_left: [bool; CONNECTOR_VARIANTS],
    pub(crate) relevant_right: [bool; CONNECTOR_VARIANTS],
}

impl LetterConnectorProfile {
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Ratings for one side, indexed by zero-based variant.
    pub fn ratings(&self, side: Side) -> &[u8; CONNECTOR_VARIANTS] {
        match side {
            Side::Left => &self.rating_left,
            Side::Right => &self.rating_right,
        }
    }

    /// Relevancy flags for one side, indexed by zero-based variant.
    pub fn relevancy(&self, side: Side) -> &[bool; CONNECTOR_VARIANTS] {
        match side {
            Side::Left => &self.relevant_left,
            Side::Right => &self.relevant_right,
        }
    }
}

/// Statistics derived from every positive rating in the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateStatistics {
    /// Mean 1-based variant index over all viable entries.
    pub median: f64,
    /// Share of viable entries falling in each variant bucket.
    pub probabilities: [f64; CONNECTOR_VARIANTS],
    /// Number of viable entries the statistics were computed from.
    pub viable_entries: usize,
}

impl AggregateStatistics {
    /// Run the aggregation pass over a set of profiles.
    pub fn from_profiles(profiles: &[LetterConnectorProfile]) -> Self {
        let mut sum = 0usize;
        let mut count = 0usize;
        let mut buckets = [0.0_f64; CONNECTOR_VARIANTS];

        for profile in profiles {
            for side in Side::BOTH {
                for (j, rating) in profile.ratings(side).iter().enumerate() {
                    if *rating > 0 {
                        sum += j;
                        count += 1;
                        buckets[j] += 1.0;
                    }
                }
            }
        }

        if count == 0 {
            return Self {
                median: 1.0,
                probabilities: [0.0; CONNECTOR_VARIANTS],
                viable_entries: 0,
            };
        }

        let median = 1.0 + sum as f64 / count as f64;
        let probabilities = buckets.map(|b| b / count as f64);

        Self {
            median,
            probabilities,
            viable_entries: count,
        }
    }
}

/// The built table plus its statistics.
#[derive(Debug)]
pub struct ConnectorMap {
    profiles: [LetterConnectorProfile; LETTER_COUNT],
    stats: AggregateStatistics,
}

impl ConnectorMap {
    fn build() -> Self {
        let profiles = PROFILES;
        let stats = AggregateStatistics::from_profiles(&profiles);
        tracing::debug!(
            median = stats.median,
            viable_entries = stats.viable_entries,
            "Connector table built"
        );
        Self { profiles, stats }
    }

    /// Profile for a lowercase ASCII letter.
    pub fn profile(&self, letter: char) -> MatrixRainResult<&LetterConnectorProfile> {
        if !letter.is_ascii_lowercase() {
            return Err(MatrixRainError::index_range(format!(
                "letter {letter:?} is outside a-z"
            )));
        }
        Ok(&self.profiles[(letter as u8 - b'a') as usize])
    }

    pub fn profiles(&self) -> &[LetterConnectorProfile] {
        &self.profiles
    }

    /// Rating of a 1-based connector variant on one side of a letter.
    pub fn rating(&self, letter: char, side: Side, connector: usize) -> MatrixRainResult<u8> {
        let j = variant_index(connector)?;
        Ok(self.profile(letter)?.ratings(side)[j])
    }

    /// Relevancy of a 1-based connector variant on one side of a letter.
    pub fn is_relevant(
        &self,
        letter: char,
        side: Side,
        connector: usize,
    ) -> MatrixRainResult<bool> {
        let j = variant_index(connector)?;
        Ok(self.profile(letter)?.relevancy(side)[j])
    }

    pub fn statistics(&self) -> &AggregateStatistics {
        &self.stats
    }
}

fn variant_index(connector: usize) -> MatrixRainResult<usize> {
    if !(1..=CONNECTOR_VARIANTS).contains(&connector) {
        return Err(MatrixRainError::index_range(format!(
            "connector {connector} is outside 1..={CONNECTOR_VARIANTS}"
        )));
    }
    Ok(connector - 1)
}

/// The process-wide table, built on first access.
pub fn connector_map() -> &'static ConnectorMap {
    static MAP: OnceLock<ConnectorMap> = OnceLock::new();
    MAP.get_or_init(ConnectorMap::build)
}

pub fn is_relevant_left(letter: char, connector: usize) -> MatrixRainResult<bool> {
    connector_map().is_relevant(letter, Side::Left, connector)
}

pub fn is_relevant_right(letter: char, connector: usize) -> MatrixRainResult<bool> {
    connector_map().is_relevant(letter, Side::Right, connector)
}

pub fn get_rating_left(letter: char, connector: usize) -> MatrixRainResult<u8> {
    connector_map().rating(letter, Side::Left, connector)
}

pub fn get_rating_right(letter: char, connector: usize) -> MatrixRainResult<u8> {
    connector_map().rating(letter, Side::Right, connector)
}

pub fn get_median() -> f64 {
    connector_map().statistics().median
}

pub fn get_probabilities() -> [f64; CONNECTOR_VARIANTS] {
    connector_map().statistics().probabilities
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_letter_a_connector_one() {
        assert_eq!(get_rating_left('a', 1).unwrap(), 2);
        assert_eq!(get_rating_right('a', 1).unwrap(), 2);
        assert!(is_relevant_left('a', 1).unwrap());
        assert!(is_relevant_right('a', 1).unwrap());
    }

    #[test]
    fn test_letter_h_connector_two() {
        assert_eq!(get_rating_left('h', 2).unwrap(), 4);
        assert!(is_relevant_left('h', 2).unwrap());
    }

    #[test]
    fn test_zero_rating_and_irrelevant_variant() {
        // 'c' has no right-side middle connector and it is flagged irrelevant
        assert_eq!(get_rating_right('c', 2).unwrap(), 0);
        assert!(!is_relevant_right('c', 2).unwrap());
        // 'g' differs between sides
        assert!(!is_relevant_left('g', 2).unwrap());
        assert!(is_relevant_right('g', 2).unwrap());
    }

    #[test]
    fn test_profiles_are_in_alphabet_order() {
        for (i, profile) in connector_map().profiles().iter().enumerate() {
            assert_eq!(profile.letter(), (b'a' + i as u8) as char);
        }
    }

    #[test]
    fn test_out_of_table_letters_fail() {
        for letter in ['A', 'Z', '{', '`', '1', 'é'] {
            let err = get_rating_left(letter, 1).unwrap_err();
            assert!(matches!(err, MatrixRainError::IndexRange { .. }), "{letter:?}");
        }
    }

    #[test]
    fn test_out_of_range_connectors_fail() {
        for connector in [0, 4, usize::MAX] {
            assert!(matches!(
                is_relevant_right('m', connector),
                Err(MatrixRainError::IndexRange { .. })
            ));
        }
    }

    #[test]
    fn test_statistics_match_hand_count() {
        // 143 viable entries: 52 / 40 / 51 per variant, index sum 142
        let stats = connector_map().statistics();
        assert_eq!(stats.viable_entries, 143);
        assert!((stats.median - (1.0 + 142.0 / 143.0)).abs() < 1e-12);
        assert!((stats.probabilities[0] - 52.0 / 143.0).abs() < 1e-12);
        assert!((stats.probabilities[1] - 40.0 / 143.0).abs() < 1e-12);
        assert!((stats.probabilities[2] - 51.0 / 143.0).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let probabilities = get_probabilities();
        assert!(probabilities.iter().all(|p| *p >= 0.0));
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_median_range() {
        let median = get_median();
        assert!((1.0..=3.0).contains(&median));
    }

    #[test]
    fn test_aggregation_skips_zero_ratings() {
        let profiles = [LetterConnectorProfile {
            letter: 'a',
            rating_left: [0, 0, 4],
            rating_right: [0, 2, 0],
            relevant_left: [true; 3],
            relevant_right: [true; 3],
        }];
        let stats = AggregateStatistics::from_profiles(&profiles);
        assert_eq!(stats.viable_entries, 2);
        assert!((stats.median - 2.5).abs() < 1e-12);
        assert_eq!(stats.probabilities, [0.0, 0.5, 0.5]);
    }

    #[test]
    fn test_aggregation_of_empty_table() {
        let stats = AggregateStatistics::from_profiles(&[]);
        assert_eq!(stats.viable_entries, 0);
        assert_eq!(stats.probabilities, [0.0; 3]);
    }

    #[test]
    fn test_concurrent_first_access_sees_one_table() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| connector_map() as *const ConnectorMap as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }

    proptest! {
        #[test]
        fn ratings_stay_in_range(
            letter in proptest::char::range('a', 'z'),
            connector in 1usize..=3,
        ) {
            let left = get_rating_left(letter, connector).unwrap();
            let right = get_rating_right(letter, connector).unwrap();
            prop_assert!(left <= MAX_RATING);
            prop_assert!(right <= MAX_RATING);
        }
    }
}
