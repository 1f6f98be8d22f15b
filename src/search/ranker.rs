//! Ranking an in-memory dataset against a query.

use crate::config::SearchConfig;
use crate::record::Record;
use crate::types::MatchResult;

use super::matcher::fuzzy_match;

/// Scores every record against `query` and returns the ranked survivors.
///
/// This is a full scan, O(records × fields × field length); there is no index
/// structure. Per record the best-scoring field wins, with the first field in
/// `search_fields` order keeping exact ties. Only scores strictly above
/// `match_threshold` survive. The final ordering is score-descending and
/// stable, so records with equal scores keep their input order.
///
/// Queries whose normalized form is shorter than `min_query_length` return an
/// empty list before any scanning, independent of the threshold.
pub fn rank(records: &[Record], config: &SearchConfig, query: &str) -> Vec<MatchResult> {
    let query = config.normalize(query);
    if query.chars().count() < config.min_query_length {
        return Vec::new();
    }

    let mut results: Vec<MatchResult> = Vec::new();
    for (record_index, record) in records.iter().enumerate() {
        let mut best: Option<MatchResult> = None;
        for field in &config.search_fields {
            let text = config.normalize(record.field(field).unwrap_or(""));
            if let Some(outcome) = fuzzy_match(&text, &query) {
                let improved = match &best {
                    None => true,
                    Some(current) => outcome.score > current.score,
                };
                if improved {
                    best = Some(MatchResult {
                        record_index,
                        score: outcome.score,
                        field: field.clone(),
                        positions: outcome.positions,
                    });
                }
            }
        }
        match best {
            Some(result) if result.score > config.match_threshold => results.push(result),
            _ => {}
        }
    }

    // sort_by is stable: equal scores keep the original record order.
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(config.max_results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn titled(titles: &[&str]) -> Vec<Record> {
        titles
            .iter()
            .map(|t| Record::new().with_field("title", *t))
            .collect()
    }

    fn config() -> SearchConfig {
        SearchConfig {
            min_query_length: 1,
            match_threshold: 0.0,
            search_fields: vec!["title".into()],
            ..SearchConfig::default()
        }
    }

    #[test]
    fn ranks_matching_records_only() {
        let records = titled(&["Brutal Framework", "Minimal Widget"]);
        let results = rank(&records, &config(), "bru");

        check!(results.len() == 1);
        check!(results[0].record_index == 0);
        check!(results[0].field == "title");
        check!(results[0].score > 0.0);
    }

    #[test]
    fn ranking_is_deterministic() {
        let records = titled(&["alpha beta", "beta gamma", "gamma alpha"]);
        let first = rank(&records, &config(), "am");
        let second = rank(&records, &config(), "am");
        check!(first == second);
    }

    #[test]
    fn score_equal_to_threshold_is_excluded() {
        // "a" against "a bcdefghij": 1 + start bonus 2, over 11 characters.
        let records = titled(&["a bcdefghij"]);
        let boundary = 3.0_f32 / 11.0;

        let at = SearchConfig {
            match_threshold: boundary,
            ..config()
        };
        check!(rank(&records, &at, "a").is_empty());

        let below = SearchConfig {
            match_threshold: boundary - f32::EPSILON,
            ..config()
        };
        check!(rank(&records, &below, "a").len() == 1);
    }

    #[test]
    fn short_query_gates_before_threshold() {
        let records = titled(&["ab initio"]);
        let gated = SearchConfig {
            min_query_length: 3,
            ..config()
        };
        check!(rank(&records, &gated, "ab").is_empty());
        check!(rank(&records, &gated, "abi").len() == 1);
    }

    #[test]
    fn first_field_wins_exact_score_ties() {
        let record = Record::new()
            .with_field("title", "same text")
            .with_field("content", "same text");
        let two_fields = SearchConfig {
            search_fields: vec!["title".into(), "content".into()],
            ..config()
        };

        let results = rank(&[record], &two_fields, "same");
        check!(results.len() == 1);
        check!(results[0].field == "title");
    }

    #[test]
    fn missing_field_scores_nothing_without_error() {
        let records = vec![
            Record::new().with_field("content", "brutal"),
            Record::new().with_field("title", "brutal"),
        ];
        let results = rank(&records, &config(), "brutal");

        check!(results.len() == 1);
        check!(results[0].record_index == 1);
    }

    #[test]
    fn sorted_descending_stable_and_truncated() {
        // "xy" adjacent scores higher than "x.y" split across the field.
        let records = titled(&["xy", "x y", "xy", "zz"]);
        let capped = SearchConfig {
            max_results: 2,
            ..config()
        };

        let results = rank(&records, &capped, "xy");
        check!(results.len() == 2);
        check!(results[0].record_index == 0);
        check!(results[1].record_index == 2);
        check!(results[0].score == results[1].score);
    }

    #[test]
    fn case_insensitive_by_default() {
        let records = titled(&["BRUTAL Framework"]);
        check!(rank(&records, &config(), "Brutal").len() == 1);

        let sensitive = SearchConfig {
            case_sensitive: true,
            ..config()
        };
        check!(rank(&records, &sensitive, "Brutal").is_empty());
    }
}
