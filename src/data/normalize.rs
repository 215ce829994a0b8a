use std::sync::LazyLock;

use regex::Regex;

use super::model::{NormalizedRecord, Record};

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("year regex"));

/// Characters stripped from the end of a topic label.
const TRAILING_PUNCT: [char; 3] = ['.', ',', '"'];

// ---------------------------------------------------------------------------
// Field cleaning
// ---------------------------------------------------------------------------

/// Strip the trailing run of `.`, `,` and `"`, then surrounding whitespace.
///
/// The run is removed once, so punctuation sitting before trailing
/// whitespace survives: `"Tax. "` cleans to `"Tax."`.
pub fn clean_topic(raw: &str) -> String {
    raw.trim_end_matches(TRAILING_PUNCT).trim().to_string()
}

/// First run of four consecutive ASCII digits in `file_name`, as a year.
///
/// Longer digit runs match on their first four digits (`"12345"` → 1234).
pub fn extract_year(file_name: &str) -> Option<i32> {
    YEAR_RE
        .find(file_name)
        .and_then(|m| m.as_str().parse().ok())
}

// ---------------------------------------------------------------------------
// Record normalization
// ---------------------------------------------------------------------------

/// Normalized records plus the number of undated rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub records: Vec<NormalizedRecord>,
    pub undated: usize,
}

/// Clean every topic, parse every year, drop rows with no year.
pub fn normalize(records: &[Record]) -> Normalized {
    let mut out = Normalized {
        records: Vec::with_capacity(records.len()),
        undated: 0,
    };
    for rec in records {
        match extract_year(&rec.file_name) {
            Some(year) => out.records.push(NormalizedRecord {
                year,
                topic: clean_topic(&rec.main_topic_summary),
            }),
            None => {
                log::debug!("No year in file name {:?}; dropping row", rec.file_name);
                out.undated += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_maximal_trailing_run() {
        assert_eq!(clean_topic("Healthcare."), "Healthcare");
        assert_eq!(clean_topic("Budget,"), "Budget");
        assert_eq!(clean_topic("Defense.\",."), "Defense");
        assert_eq!(clean_topic("  Energy Policy  "), "Energy Policy");
        assert_eq!(clean_topic("Trade ."), "Trade");
    }

    #[test]
    fn punctuation_before_trailing_space_is_kept() {
        assert_eq!(clean_topic("Tax. "), "Tax.");
        assert_eq!(clean_topic("a.\" ."), "a.\"");
    }

    #[test]
    fn keeps_inner_punctuation() {
        assert_eq!(clean_topic("U.S. Foreign Aid."), "U.S. Foreign Aid");
        assert_eq!(clean_topic("\"Quoted\" topic"), "\"Quoted\" topic");
    }

    #[test]
    fn punctuation_only_cleans_to_empty() {
        assert_eq!(clean_topic("..,\""), "");
    }

    #[test]
    fn cleaning_is_idempotent() {
        for raw in [
            "Healthcare.",
            " Budget ,",
            "Defense.\",.",
            "Veterans' Affairs\"",
            "  Energy Policy  ",
            "",
            "   ",
        ] {
            let once = clean_topic(raw);
            assert_eq!(clean_topic(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn extracts_first_four_digits() {
        assert_eq!(extract_year("report_2019.xlsx"), Some(2019));
        assert_eq!(extract_year("x2020y.xlsx"), Some(2020));
        assert_eq!(extract_year("2018_vs_2019.pdf"), Some(2018));
        assert_eq!(extract_year("doc12345"), Some(1234));
        assert_eq!(extract_year("v12_3456"), Some(3456));
    }

    #[test]
    fn no_year_when_fewer_than_four_digits() {
        assert_eq!(extract_year("report_no_year.xlsx"), None);
        assert_eq!(extract_year("r_201_9"), None);
        assert_eq!(extract_year(""), None);
    }

    #[test]
    fn normalize_drops_undated_rows() {
        let records = vec![
            Record::new("report_2019.xlsx", "Healthcare."),
            Record::new("report_2019.xlsx", "Healthcare"),
            Record::new("x2020y.xlsx", "Budget,"),
            Record::new("report_no_year.xlsx", "Tax"),
        ];
        let normalized = normalize(&records);

        assert_eq!(normalized.undated, 1);
        let topics: Vec<&str> = normalized.records.iter().map(|r| r.topic.as_str()).collect();
        let years: Vec<i32> = normalized.records.iter().map(|r| r.year).collect();
        assert_eq!(topics, vec!["Healthcare", "Healthcare", "Budget"]);
        assert_eq!(years, vec![2019, 2019, 2020]);
    }
}
