//! Fuzzy station name search.
//!
//! Scores each station name by the best approximate occurrence of the
//! search term inside it: the fewest character edits needed to turn some
//! substring of the name into the term, plus a penalty for how far from the
//! expected location that substring starts. Matching is case-insensitive.
//!
//! ```text
//! score = edits / term_len + |start - location| / distance
//! ```
//!
//! A score of 0 is a perfect match at the expected location; stations
//! scoring above the threshold are dropped.
//!
//! Surviving stations are ranked on the match score weighted by name
//! length, so that of two equally good matches the name with fewer words
//! comes first:
//!
//! ```text
//! rank = max(score, EPSILON) ^ (1 / sqrt(words))
//! ```
//!
//! The rank is what results report as their score.

use serde::Serialize;

use crate::domain::Station;

/// Default match threshold. Lower is stricter.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Default expected match location (start of the name).
pub const DEFAULT_LOCATION: usize = 0;

/// Default distance over which the location penalty reaches 1.0.
pub const DEFAULT_DISTANCE: usize = 100;

/// Configuration for station search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Maximum score for a station to be returned.
    pub threshold: f64,

    /// Character position where a match is expected to start.
    pub location: usize,

    /// How far from `location` a match may start before the penalty alone
    /// reaches 1.0. Zero means a match must start exactly at `location`.
    pub distance: usize,

    /// Whether results carry their score.
    pub include_score: bool,
}

impl SearchOptions {
    /// Set the match threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the expected location and distance.
    pub fn with_location(mut self, location: usize, distance: usize) -> Self {
        self.location = location;
        self.distance = distance;
        self
    }

    /// Include scores in results.
    pub fn with_score(mut self) -> Self {
        self.include_score = true;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            location: DEFAULT_LOCATION,
            distance: DEFAULT_DISTANCE,
            include_score: false,
        }
    }
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch<T> {
    /// The matched record.
    pub item: T,

    /// Position of the record in the searched list.
    pub ref_index: usize,

    /// Match score, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Searchable index over a station list, keyed by station name.
#[derive(Debug, Clone)]
pub struct StationIndex {
    stations: Vec<Station>,
    keys: Vec<Vec<char>>,
    norms: Vec<f64>,
    options: SearchOptions,
}

impl StationIndex {
    /// Build an index over `stations`.
    pub fn new(stations: Vec<Station>, options: SearchOptions) -> Self {
        let keys = stations.iter().map(|s| normalize(&s.name)).collect();
        let norms = stations.iter().map(|s| field_norm(&s.name)).collect();
        Self {
            stations,
            keys,
            norms,
            options,
        }
    }

    /// Number of indexed stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations whose name matches `term`, best first.
    ///
    /// Equal ranks keep list order. An empty (or all-whitespace) term
    /// matches nothing.
    pub fn search(&self, term: &str) -> Vec<SearchMatch<Station>> {
        let pattern = normalize(term.trim());
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .keys
            .iter()
            .enumerate()
            .filter_map(|(idx, key)| {
                let score = best_score(&pattern, key, &self.options);
                (score <= self.options.threshold).then(|| (idx, rank(score, self.norms[idx])))
            })
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        tracing::debug!(term, stations = self.len(), matches = scored.len(), "station search");

        scored
            .into_iter()
            .map(|(idx, score)| SearchMatch {
                item: self.stations[idx].clone(),
                ref_index: idx,
                score: self.options.include_score.then_some(score),
            })
            .collect()
    }
}

fn normalize(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// `1 / sqrt(words)` to three decimal places; words are space-separated.
fn field_norm(name: &str) -> f64 {
    let words = name.split(' ').filter(|w| !w.is_empty()).count().max(1);
    ((words as f64).sqrt().recip() * 1000.0).round() / 1000.0
}

/// Ranking score. A perfect match still ranks by name length.
fn rank(score: f64, norm: f64) -> f64 {
    let score = if score == 0.0 { f64::EPSILON } else { score };
    score.powf(norm)
}

/// Lowest score of `pattern` against any substring of `text`.
///
/// Semi-global edit distance: the pattern must be consumed entirely, the
/// text may be entered and left anywhere. Alongside the edit count each
/// cell tracks where in `text` its alignment started, for the location
/// penalty.
fn best_score(pattern: &[char], text: &[char], options: &SearchOptions) -> f64 {
    let m = pattern.len();
    let n = text.len();

    // Row 0: empty pattern prefix matches at every text position for free.
    let mut prev: Vec<(usize, usize)> = (0..=n).map(|j| (0, j)).collect();
    let mut curr = vec![(0, 0); n + 1];

    for i in 1..=m {
        curr[0] = (i, 0);
        for j in 1..=n {
            let substitution = usize::from(pattern[i - 1] != text[j - 1]);
            let diagonal = (prev[j - 1].0 + substitution, prev[j - 1].1);
            let skip_pattern = (prev[j].0 + 1, prev[j].1);
            let skip_text = (curr[j - 1].0 + 1, curr[j - 1].1);

            curr[j] = [diagonal, skip_pattern, skip_text]
                .into_iter()
                .min_by_key(|&(edits, start)| (edits, start))
                .unwrap_or(diagonal);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev.iter()
        .map(|&(edits, start)| edits as f64 / m as f64 + proximity(start, options))
        .fold(f64::INFINITY, f64::min)
}

fn proximity(start: usize, options: &SearchOptions) -> f64 {
    let offset = start.abs_diff(options.location);
    if options.distance == 0 {
        if offset == 0 {
            0.0
        } else {
            1.0
        }
    } else {
        offset as f64 / options.distance as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(names: &[&str]) -> StationIndex {
        let stations = names
            .iter()
            .enumerate()
            .map(|(i, name)| Station::new(i.to_string(), *name))
            .collect();
        StationIndex::new(stations, SearchOptions::default())
    }

    fn names(matches: &[SearchMatch<Station>]) -> Vec<&str> {
        matches.iter().map(|m| m.item.name.as_str()).collect()
    }

    fn score(pattern: &str, text: &str) -> f64 {
        best_score(&normalize(pattern), &normalize(text), &SearchOptions::default())
    }

    #[test]
    fn exact_name_only() {
        let idx = index(&["Lisboa", "Porto", "Coimbra"]);
        let matches = idx.search("Lisboa");
        assert_eq!(names(&matches), ["Lisboa"]);
        assert_eq!(matches[0].ref_index, 0);
        assert!(matches[0].score.is_none());
    }

    #[test]
    fn case_insensitive() {
        let idx = index(&["Lisboa", "Porto", "Coimbra"]);
        assert_eq!(names(&idx.search("porto")), ["Porto"]);
        assert_eq!(names(&idx.search("COIMBRA")), ["Coimbra"]);
    }

    #[test]
    fn prefix_of_longer_names() {
        let idx = index(&[
            "Porto - Campanhã",
            "Lisboa - Santa Apolónia",
            "Lisboa - Oriente",
            "Coimbra-B",
        ]);

        let matches = idx.search("Lisboa");
        assert_eq!(names(&matches), ["Lisboa - Oriente", "Lisboa - Santa Apolónia"]);
        assert_eq!(matches[0].ref_index, 2);
        assert_eq!(matches[1].ref_index, 1);
    }

    #[test]
    fn shorter_names_rank_first_on_equal_match() {
        let idx = StationIndex::new(
            vec![
                Station::new("1", "Lisboa - Santa Apolónia"),
                Station::new("2", "Lisboa - Oriente"),
                Station::new("3", "Lisboa"),
            ],
            SearchOptions::default().with_score(),
        );

        let matches = idx.search("lisboa");
        assert_eq!(
            names(&matches),
            ["Lisboa", "Lisboa - Oriente", "Lisboa - Santa Apolónia"]
        );
        assert_eq!(matches[0].score, Some(f64::EPSILON));
        assert!(matches[1].score.unwrap() < matches[2].score.unwrap());
    }

    #[test]
    fn weighting_does_not_affect_threshold() {
        // Raw score 0.09 passes; its rank over five words (0.34) would not.
        let idx = StationIndex::new(
            vec![Station::new("1", "Lisboa - Oriente Norte Sul")],
            SearchOptions::default().with_score(),
        );
        let matches = idx.search("oriente");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].score.unwrap() > DEFAULT_THRESHOLD);
    }

    #[test]
    fn field_norms() {
        assert_eq!(field_norm("Lisboa"), 1.0);
        assert_eq!(field_norm("Lisboa - Oriente"), 0.577);
        assert_eq!(field_norm("Lisboa - Santa Apolónia"), 0.5);
        assert_eq!(field_norm(""), 1.0);
    }

    #[test]
    fn match_far_into_name_is_penalised() {
        // "oriente" starts 9 characters in: penalty 0.09 is within threshold.
        let idx = index(&["Lisboa - Oriente"]);
        assert_eq!(idx.search("oriente").len(), 1);

        // 20+ characters in exceeds the threshold on location alone.
        let idx = index(&["Estação Ferroviária de Entroncamento"]);
        assert!(idx.search("entroncamento").is_empty());
    }

    #[test]
    fn typo_tolerance_depends_on_length() {
        // One edit in 12 characters: 0.083.
        assert!(score("entroncamnto", "Entroncamento") <= DEFAULT_THRESHOLD);
        let idx = index(&["Entroncamento"]);
        assert_eq!(idx.search("Entroncamnto").len(), 1);

        // One edit in 5 characters: 0.2.
        let idx = index(&["Porto"]);
        assert!(idx.search("Purto").is_empty());
    }

    #[test]
    fn results_sorted_by_score_then_position() {
        let idx = StationIndex::new(
            vec![
                Station::new("1", "V. N. Gaia"),
                Station::new("2", "Gaia"),
                Station::new("3", "Gaia"),
            ],
            SearchOptions::default().with_score(),
        );

        let matches = idx.search("gaia");
        let refs: Vec<_> = matches.iter().map(|m| m.ref_index).collect();
        assert_eq!(refs, [1, 2, 0]);
        assert_eq!(matches[0].score, matches[1].score);
        assert!(matches[2].score.unwrap() > matches[0].score.unwrap());
    }

    #[test]
    fn empty_term_matches_nothing() {
        let idx = index(&["Lisboa"]);
        assert_eq!(idx.len(), 1);
        assert!(!idx.is_empty());
        assert!(index(&[]).is_empty());
        assert!(idx.search("").is_empty());
        assert!(idx.search("   ").is_empty());
    }

    #[test]
    fn looser_threshold_admits_more() {
        let stations = vec![Station::new("1", "Porto")];
        let strict = StationIndex::new(stations.clone(), SearchOptions::default());
        let loose = StationIndex::new(stations, SearchOptions::default().with_threshold(0.4));

        assert!(strict.search("Purto").is_empty());
        assert_eq!(loose.search("Purto").len(), 1);
    }

    #[test]
    fn zero_distance_requires_exact_location() {
        let options = SearchOptions::default().with_location(0, 0).with_threshold(0.5);
        let idx = StationIndex::new(
            vec![Station::new("1", "Porto"), Station::new("2", "Gare do Porto")],
            options,
        );
        assert_eq!(names(&idx.search("porto")), ["Porto"]);
    }

    #[test]
    fn scores() {
        assert_eq!(score("lisboa", "Lisboa"), 0.0);
        assert!((score("porto", "xporto") - 0.01).abs() < 1e-9);
        assert!(score("lisboa", "porto") > 0.5);
    }

    #[test]
    fn serializes_like_search_results() {
        let idx = index(&["Lisboa"]);
        let value = serde_json::to_value(idx.search("lisboa")).unwrap();
        assert_eq!(value[0]["refIndex"], 0);
        assert_eq!(value[0]["item"]["name"], "Lisboa");
        assert!(value[0].get("score").is_none());
    }
}
