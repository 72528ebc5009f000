use crate::sample::Sample;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub value: i64,
    pub count: u64,
    pub cumulative_count: u64,
    pub relative: f64,
    pub cumulative_relative: f64,
}

/// One row per integer of the sample's support range, zero counts included.
pub fn frequency_table(sample: &Sample) -> Vec<FrequencyRow> {
    let mut counts: HashMap<i64, u64> = HashMap::new();
    for &v in sample.values() {
        *counts.entry(v).or_insert(0) += 1;
    }
    let total = sample.len() as f64;
    let range = sample.range();
    let mut running = 0u64;
    (range.min..=range.max)
        .map(|value| {
            let count = counts.get(&value).copied().unwrap_or(0);
            running += count;
            FrequencyRow {
                value,
                count,
                cumulative_count: running,
                relative: count as f64 / total,
                cumulative_relative: running as f64 / total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SupportRange;

    #[test]
    fn rows_span_whole_range() {
        let s = Sample::new(vec![1, 1, 3, 4], SupportRange::new(0, 5).unwrap()).unwrap();
        let t = frequency_table(&s);
        assert_eq!(t.len(), 6);
        let counts: Vec<u64> = t.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![0, 2, 0, 1, 1, 0]);
        let cumulative: Vec<u64> = t.iter().map(|r| r.cumulative_count).collect();
        assert_eq!(cumulative, vec![0, 2, 2, 3, 4, 4]);
        assert!((t[1].relative - 0.5).abs() < 1e-12);
        assert!((t[5].cumulative_relative - 1.0).abs() < 1e-12);
    }
}
