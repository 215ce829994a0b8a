use std::collections::BTreeMap;

use super::model::CountRow;

/// One chart line: a topic's `[year, count]` points in year order.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSeries {
    pub topic: String,
    pub points: Vec<[f64; 2]>,
}

/// Split a filtered view into one series per topic, topics in lexicographic order.
pub fn topic_series(view: &[CountRow]) -> Vec<TopicSeries> {
    let mut by_topic: BTreeMap<&str, Vec<(i32, u64)>> = BTreeMap::new();
    for row in view {
        by_topic
            .entry(row.topic.as_str())
            .or_default()
            .push((row.year, row.count));
    }
    by_topic
        .into_iter()
        .map(|(topic, mut points)| {
            points.sort_unstable();
            TopicSeries {
                topic: topic.to_string(),
                points: points
                    .into_iter()
                    .map(|(year, count)| [f64::from(year), count as f64])
                    .collect(),
            }
        })
        .collect()
}

/// Tooltip text for one chart point.
pub fn hover_text(topic: &str, year: i32, count: u64) -> String {
    format!("{topic}\nYear: {year}\nMentions: {count}")
}
