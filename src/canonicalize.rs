//! Event-type canonicalization.
//!
//! The storm file spells the same phenomenon hundreds of ways
//! ("TSTM WIND", "THUNDERSTORM WINDS", "MARINE TSTM WIND", ...). An ordered
//! table of pattern rules collapses them into 34 canonical labels.
//!
//! Every rule is applied in table order against the *current* value, so a
//! rule sees the label written by an earlier rule rather than the raw
//! text. Order therefore matters: `"THUNDERSTORM WINDS/FLOODING"` becomes
//! `"Flooding"` because the flood rule runs first, and the later
//! thunderstorm and wind rules no longer match `"Flooding"`.
//!
//! Values matching no rule are passed through unchanged.

use crate::types::WorkingRecord;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::{HashMap, HashSet};

struct RuleDef {
    label: &'static str,
    pattern: &'static str,
    case_sensitive: bool,
}

const fn rule(label: &'static str, pattern: &'static str) -> RuleDef {
    RuleDef {
        label,
        pattern,
        case_sensitive: false,
    }
}

// Order is significant, see module docs.
const RULE_TABLE: &[RuleDef] = &[
    rule("Astronomical Low Tide", r"astronomical low tide"),
    rule("Avalanche", r"^avalanc"),
    rule("Blizzard", r"blizzard"),
    rule(
        "Flooding",
        r"erosion|astronomical high tide|coastal flood|high tides|flood|dam break|drowning|high water|urban|rising",
    ),
    rule("Tornado", r"torn|gustnado"),
    rule("Cold/Wind Chill", r"cold|cool|hypothermia|low temp|extreme wind ?c"),
    rule("Freezing Fog", r"freezing fog"),
    // Case-sensitive so the "Freezing Fog" label above is left alone.
    RuleDef {
        label: "Dense Fog",
        pattern: r"FOG|fog",
        case_sensitive: true,
    },
    rule("Dense Smoke", r"dense smoke"),
    rule("Dust Devil/Dust Storm", r"dust|whirl|landspout"),
    rule("Heat/Drought", r"heat|drought|warm|hyper"),
    rule("Wildfire", r"fire"),
    rule("Hurricane (Typhoon)", r"hurricane|typhoon"),
    rule("Tsunami", r"tsunami"),
    rule("Waterspout", r"waterspout"),
    rule("Volcanic Ash", r"volcanic"),
    rule("Tropical Storm", r"tropical storm|coastal ?storm"),
    // Label spelling kept as published in earlier reports.
    rule("Tropial Depression", r"tropical depression"),
    rule(
        "Thunderstorm",
        r"^thu|apache|^tstm|marine tstm|burst|tunderstorm",
    ),
    rule("Hail", r"hail"),
    rule("Rip Current", r"rip current"),
    rule("Storm Surge/Tide", r"surge"),
    rule("Debris Flow", r"slide|slump"),
    rule("Funnel Cloud", r"funnel cloud"),
    rule("Seiche", r"seiche"),
    rule(
        "Heavy Rain",
        r"heavy rain|hvy rain|heavy shower|heavy precip|rainfall|rainstorm|wetness|unseasonal rain|^rain",
    ),
    rule(
        "Heavy Snow",
        r"heavy snow|blowing snow|record snow|excessive snow|squall|lake.?effect|lake|^snow$|snow accumulation|season snow",
    ),
    rule(
        "High Surf",
        r"(?:high|heavy) s(?:ea|urf|we)|high waves|^rough s|hazardous surf|^marine [am]|rogue",
    ),
    rule("Lightning", r"lightning|lighting|ligntning"),
    rule("Winter Storm", r"winter storm"),
    rule(
        "Wind",
        r"high wind|strong wind|^wind|wind$|winds$|wind damage|turbulence|^high$|gusty",
    ),
    rule("Frost/Freeze", r"freeze|frost"),
    rule("Sleet/Ice Storm", r"sleet|ice storm|freezing rain|mix|freezing [ds]"),
    rule(
        "Winter Weather",
        r"winter weather|wintry|black ice|^ice|ice$|light snow|icy roads|glaze",
    ),
];

/// A compiled canonicalization rule.
#[derive(Debug)]
pub struct CanonicalRule {
    pub label: &'static str,
    pub pattern: Regex,
}

impl CanonicalRule {
    pub fn matches(&self, event_type: &str) -> bool {
        self.pattern.is_match(event_type)
    }
}

static RULES: Lazy<Vec<CanonicalRule>> = Lazy::new(|| {
    RULE_TABLE
        .iter()
        .map(|def| CanonicalRule {
            label: def.label,
            pattern: RegexBuilder::new(def.pattern)
                .case_insensitive(!def.case_sensitive)
                .build()
                .expect("valid canonicalization regex"),
        })
        .collect()
});

/// The canonical labels in rule order.
pub static CANONICAL_LABELS: Lazy<Vec<&'static str>> =
    Lazy::new(|| RULE_TABLE.iter().map(|def| def.label).collect());

/// The ordered rule list.
pub fn canonical_rules() -> &'static [CanonicalRule] {
    &RULES
}

pub fn is_canonical(event_type: &str) -> bool {
    CANONICAL_LABELS.iter().any(|label| *label == event_type)
}

/// Run the whole rule table over one value, returning the final value and
/// the indices of the rules that fired.
fn cascade(event_type: &str) -> (String, Vec<usize>) {
    let mut current = event_type.to_string();
    let mut fired = Vec::new();
    for (idx, rule) in canonical_rules().iter().enumerate() {
        if rule.matches(&current) {
            current = rule.label.to_string();
            fired.push(idx);
        }
    }
    (current, fired)
}

pub fn canonicalize_event_type(event_type: &str) -> String {
    cascade(event_type).0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalizeReport {
    pub distinct_before: usize,
    pub distinct_after: usize,
    /// Records rewritten by each rule, in rule order.
    pub rule_hits: Vec<(&'static str, usize)>,
    /// Records whose event type matched no rule.
    pub uncanonicalized: usize,
}

/// Rewrite `event_type` of every record in place.
pub fn canonicalize(records: &mut [WorkingRecord]) -> CanonicalizeReport {
    let rules = canonical_rules();
    let mut hits = vec![0usize; rules.len()];
    // The file has a few hundred spellings across many thousand rows.
    let mut cache: HashMap<String, (String, Vec<usize>)> = HashMap::new();
    let mut before: HashSet<String> = HashSet::new();
    let mut uncanonicalized = 0usize;

    for r in records.iter_mut() {
        if !before.contains(&r.event_type) {
            before.insert(r.event_type.clone());
        }
        let (label, fired) = cache
            .entry(r.event_type.clone())
            .or_insert_with(|| cascade(&r.event_type));
        if fired.is_empty() {
            uncanonicalized += 1;
        }
        for idx in fired.iter() {
            hits[*idx] += 1;
        }
        r.event_type = label.clone();
    }

    let distinct_after = records
        .iter()
        .map(|r| r.event_type.as_str())
        .collect::<HashSet<_>>()
        .len();

    let rule_hits: Vec<(&'static str, usize)> = rules
        .iter()
        .zip(hits)
        .map(|(rule, n)| (rule.label, n))
        .collect();
    for (label, n) in &rule_hits {
        debug!("rule {:<24} matched {} records", label, n);
    }

    let unmatched: HashSet<&str> = cache
        .iter()
        .filter(|(_, (_, fired))| fired.is_empty())
        .map(|(raw, _)| raw.as_str())
        .collect();
    info!(
        "Canonicalized {} event types into {} ({} records in {} spellings unmatched)",
        before.len(),
        distinct_after,
        uncanonicalized,
        unmatched.len()
    );

    CanonicalizeReport {
        distinct_before: before.len(),
        distinct_after,
        rule_hits,
        uncanonicalized,
    }
}
