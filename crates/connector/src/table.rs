//! The curated letter/connector table.
//!
//! Columns: letter, left ratings, right ratings, left relevancy, right
//! relevancy. Ratings are 0..=5 per variant (0 = unusable on that side).

use crate::model::LetterConnectorProfile;

const fn p(
    letter: char,
    rating_left: [u8; 3],
    rating_right: [u8; 3],
    relevant_left: [bool; 3],
    relevant_right: [bool; 3],
) -> LetterConnectorProfile {
    LetterConnectorProfile {
        letter,
        rating_left,
        rating_right,
        relevant_left,
        relevant_right,
    }
}

const T: bool = true;
const F: bool = false;

#[rustfmt::skip]
pub(crate) const PROFILES: [LetterConnectorProfile; 26] = [
    p('a', [2, 3, 5], [2, 3, 5], [T, T, T], [T, T, T]),
    p('b', [5, 4, 5], [2, 0, 2], [T, T, T], [T, T, T]),
    p('c', [2, 5, 2], [2, 0, 2], [T, F, T], [T, F, T]),
    p('d', [5, 4, 5], [2, 5, 2], [T, F, T], [T, F, T]),
    p('e', [5, 4, 5], [2, 1, 2], [T, T, T], [T, T, T]),
    p('f', [5, 4, 5], [2, 1, 0], [T, T, T], [T, T, T]),
    p('g', [2, 5, 2], [2, 5, 2], [T, F, T], [T, T, T]),
    p('h', [5, 4, 5], [5, 4, 5], [T, T, T], [T, T, T]),
    p('i', [5, 4, 5], [5, 4, 5], [T, F, T], [T, F, T]),
    p('j', [1, 0, 2], [5, 4, 2], [T, F, T], [T, F, T]),
    p('k', [5, 4, 5], [5, 0, 5], [T, F, T], [T, F, T]),
    p('l', [5, 4, 5], [1, 0, 5], [T, F, T], [T, F, T]),
    p('m', [5, 4, 5], [5, 4, 5], [T, F, T], [T, F, T]),
    p('n', [5, 4, 5], [5, 4, 5], [T, F, T], [T, F, T]),
    p('o', [2, 5, 2], [2, 5, 2], [T, F, T], [T, F, T]),
    p('p', [5, 4, 5], [2, 1, 5], [T, T, T], [T, T, T]),
    p('q', [2, 5, 1], [2, 5, 1], [T, F, T], [T, F, T]),
    p('r', [5, 4, 5], [2, 0, 5], [T, T, T], [T, T, T]),
    p('s', [2, 0, 2], [2, 0, 2], [T, F, T], [T, F, T]),
    p('t', [5, 1, 2], [5, 1, 2], [T, F, T], [T, F, T]),
    p('u', [5, 4, 2], [5, 4, 2], [T, F, T], [T, F, T]),
    p('v', [5, 3, 1], [5, 3, 1], [T, F, T], [T, F, T]),
    p('w', [5, 3, 1], [5, 3, 1], [T, F, T], [T, F, T]),
    p('x', [5, 0, 5], [5, 0, 5], [T, F, T], [T, F, T]),
    p('y', [5, 1, 2], [5, 1, 2], [T, F, T], [T, F, T]),
    p('z', [5, 0, 5], [5, 0, 5], [T, F, T], [T, F, T]),
];
