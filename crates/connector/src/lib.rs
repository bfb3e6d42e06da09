//! MatrixRain Connector Ratings
//!
//! A fixed, hand-curated knowledge base describing how well each of the
//! three decorative connector variants fits next to each lowercase letter,
//! on either side. The glyph-rain renderer consults it to pick plausible
//! connectors between falling title glyphs.
//!
//! The table and its aggregate statistics are built once per process on
//! first use and are read-only afterwards.

pub mod model;
mod table;

pub use model::{
    connector_map, get_median, get_probabilities, get_rating_left, get_rating_right,
    is_relevant_left, is_relevant_right, AggregateStatistics, ConnectorMap,
    LetterConnectorProfile, Side, CONNECTOR_VARIANTS, LETTER_COUNT, MAX_RATING,
};
