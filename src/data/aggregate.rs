use std::collections::BTreeMap;

use super::model::{CountRow, NormalizedRecord};

/// Count records per (year, topic). One row per observed pair, sorted by key.
pub fn aggregate(records: &[NormalizedRecord]) -> Vec<CountRow> {
    let mut groups: BTreeMap<(i32, &str), u64> = BTreeMap::new();
    for rec in records {
        *groups.entry((rec.year, rec.topic.as_str())).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|((year, topic), count)| CountRow::new(year, topic, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, topic: &str) -> NormalizedRecord {
        NormalizedRecord {
            year,
            topic: topic.to_string(),
        }
    }

    #[test]
    fn counts_per_year_and_topic() {
        let rows = aggregate(&[
            rec(2019, "Healthcare"),
            rec(2019, "Healthcare"),
            rec(2020, "Budget"),
        ]);
        assert_eq!(
            rows,
            vec![
                CountRow::new(2019, "Healthcare", 2),
                CountRow::new(2020, "Budget", 1),
            ]
        );
    }

    #[test]
    fn sum_of_counts_equals_record_count() {
        let records: Vec<NormalizedRecord> = (0..50)
            .map(|i| rec(2000 + (i % 7), ["A", "B", "C"][(i % 3) as usize]))
            .collect();
        let rows = aggregate(&records);
        assert_eq!(rows.iter().map(|r| r.count).sum::<u64>(), 50);
        assert!(rows.iter().all(|r| r.count >= 1));
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut records = vec![rec(2021, "X"), rec(2019, "Y"), rec(2021, "X"), rec(2019, "X")];
        let forward = aggregate(&records);
        records.reverse();
        assert_eq!(aggregate(&records), forward);
    }

    #[test]
    fn sparse_output_has_no_zero_rows() {
        let rows = aggregate(&[rec(2019, "A"), rec(2021, "B")]);
        assert_eq!(rows.len(), 2);
        assert!(!rows.iter().any(|r| r.year == 2020));
    }

    #[test]
    fn empty_input_gives_no_rows() {
        assert!(aggregate(&[]).is_empty());
    }
}
