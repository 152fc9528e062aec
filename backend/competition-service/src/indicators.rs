/// Indicator registry
///
/// Every competition indicator ("q1".."q20") shares one engine; what differs
/// between them is pure configuration: which relations hold their rows, how
/// the score is derived, which sort direction wins, how ties are numbered,
/// and whether absent tandem pairs fall back to a floor place. Adding or
/// correcting an indicator is an edit to the table at the bottom of this
/// file, not a new code path.
use serde::{Deserialize, Serialize};

/// How a report's `score` field is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Score is maintained by the aggregator from verified sub-events.
    SubEvents(Reducer),
    /// Score column is authoritative as stored (e.g. a prize place entered
    /// by the verifier).
    Stored,
    /// Score equals the stored measurement, validated non-negative
    /// (payment-amount indicators).
    Payment,
}

/// Reducer applied to a report's verified sub-event values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    Sum,
    Average,
    Count,
}

/// Numbering rule for equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Equal scores share a place and the next distinct score continues at
    /// the previous place + 1. The default.
    Dense,
    /// Equal scores share a place and subsequent places skip positions
    /// (1, 1, 3). Used by prize-place indicators that historically did so.
    Competition,
}

/// Static configuration of one indicator.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    /// Short identifier, "q1".."q20". Used in logs and advisory-lock keys.
    pub slug: &'static str,
    pub label: &'static str,
    pub report_table: &'static str,
    pub ranking_table: &'static str,
    /// Present only for indicators that accept tandem (mentor/junior) reports.
    pub tandem_ranking_table: Option<&'static str>,
    pub score_source: ScoreSource,
    /// true: higher score is better (count/participation indicators).
    /// false: lower value is better (place-achieved indicators).
    pub reverse: bool,
    pub tie_policy: TiePolicy,
    /// Floor place assigned to registered tandem pairs with no verified
    /// report. None means absence = unranked.
    pub tandem_floor: Option<i32>,
}

impl IndicatorConfig {
    /// Expected sub-event relation name, by convention `<report_table>_events`.
    pub fn sub_event_table(&self) -> String {
        format!("{}_events", self.report_table)
    }

    pub fn is_tandem(&self) -> bool {
        self.tandem_ranking_table.is_some()
    }
}

macro_rules! indicator {
    ($slug:literal, $label:literal, source: $source:expr, reverse: $reverse:literal,
     ties: $ties:expr, tandem: $tandem:literal, floor: $floor:expr) => {
        IndicatorConfig {
            slug: $slug,
            label: $label,
            report_table: concat!($slug, "_reports"),
            ranking_table: concat!($slug, "_rankings"),
            tandem_ranking_table: if $tandem {
                Some(concat!($slug, "_tandem_rankings"))
            } else {
                None
            },
            score_source: $source,
            reverse: $reverse,
            tie_policy: $ties,
            tandem_floor: $floor,
        }
    };
}

/// The full indicator table.
///
/// Tie policy and tandem floor follow each indicator's historical semantics
/// and are deliberately explicit rather than defaulted: q13/q19 are
/// prize-place indicators that skip positions after a tie; q3/q4 rank tandem
/// pairs on an 8-place scheme where a pair that never participated lands on
/// the lowest non-medal place.
pub fn registry() -> Vec<IndicatorConfig> {
    use Reducer::*;
    use ScoreSource::*;
    use TiePolicy::*;

    vec![
        indicator!("q1", "Membership fee payment", source: Payment, reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q2", "Project activity participation", source: SubEvents(Count), reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q3", "Professional training uptake", source: Stored, reverse: true, ties: Dense, tandem: true, floor: Some(8)),
        indicator!("q4", "Commander school attendance", source: Stored, reverse: true, ties: Dense, tandem: true, floor: Some(8)),
        indicator!("q5", "Educated-commissioner share", source: Stored, reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q6", "Symbols and attributes compliance", source: Stored, reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q7", "Creative festival participants", source: SubEvents(Sum), reverse: true, ties: Dense, tandem: true, floor: None),
        indicator!("q8", "Professional competition participants", source: SubEvents(Sum), reverse: true, ties: Dense, tandem: true, floor: None),
        indicator!("q9", "Patriotic event participants", source: SubEvents(Sum), reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q10", "Sports event participants", source: SubEvents(Sum), reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q11", "Intellectual game participants", source: SubEvents(Sum), reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q12", "Volunteer action participants", source: SubEvents(Sum), reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q13", "Safe labor competition place", source: Stored, reverse: false, ties: Competition, tandem: true, floor: None),
        indicator!("q14", "Demography project engagement", source: SubEvents(Average), reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q15", "Working-season output", source: Stored, reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q16", "Media activity score", source: SubEvents(Average), reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q17", "Event organization count", source: SubEvents(Count), reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q18", "Detachment growth", source: Stored, reverse: true, ties: Dense, tandem: false, floor: None),
        indicator!("q19", "Spartakiad place", source: Stored, reverse: false, ties: Competition, tandem: true, floor: None),
        indicator!("q20", "Detachment project grants", source: SubEvents(Sum), reverse: true, ties: Dense, tandem: false, floor: None),
    ]
}

/// Look up one indicator by slug.
pub fn find(slug: &str) -> Option<IndicatorConfig> {
    registry().into_iter().find(|i| i.slug == slug)
}
