/// Place assignment over scored entries.
///
/// Pure functions shared by the standalone and tandem halves of the ranking
/// engine. Callers pass entries in a deterministic order (the store returns
/// them ordered by id); the sort is stable, so equal scores keep that order
/// and repeated runs produce identical output.
use std::cmp::Ordering;

use crate::indicators::TiePolicy;

/// Sort entries by score and assign places starting at 1.
///
/// `reverse = true` ranks higher scores better; `false` ranks lower values
/// better. NaN scores sort last in either direction. Ties share a place;
/// `TiePolicy` decides whether the numbering continues densely (1, 1, 2) or
/// competition-style (1, 1, 3).
pub fn assign_places<K: Clone>(
    entries: &[(K, f64)],
    reverse: bool,
    tie_policy: TiePolicy,
) -> Vec<(K, i32)> {
    let mut sorted: Vec<(K, f64)> = entries.to_vec();
    sorted.sort_by(|a, b| compare_scores(a.1, b.1, reverse));

    let mut placed = Vec::with_capacity(sorted.len());
    let mut place = 0i32;
    let mut prev_score: Option<f64> = None;

    for (index, (key, score)) in sorted.into_iter().enumerate() {
        let tied = prev_score.is_some_and(|prev| scores_equal(prev, score));
        if !tied {
            place = match tie_policy {
                TiePolicy::Dense => place + 1,
                TiePolicy::Competition => index as i32 + 1,
            };
        }
        prev_score = Some(score);
        placed.push((key, place));
    }

    placed
}

fn compare_scores(a: f64, b: f64, reverse: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        // NaN loses regardless of direction.
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if reverse {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

fn scores_equal(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
