use crate::sample::Sample;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Bins holding fewer observations than this are merged into a neighbour.
pub const MIN_BIN_COUNT: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: i64,
    pub upper: i64,
    pub count: u64,
}

impl Bin {
    pub fn singleton(value: i64, count: u64) -> Self {
        Self { lower: value, upper: value, count }
    }

    /// Number of integers the bin spans.
    pub fn width(&self) -> i64 {
        self.upper - self.lower + 1
    }

    pub fn midpoint(&self) -> f64 {
        (self.lower as f64 + self.upper as f64) / 2.0
    }

    fn absorb(&mut self, other: Bin) {
        self.upper = other.upper;
        self.count += other.count;
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lower == self.upper {
            write!(f, "[{}]", self.lower)
        } else {
            write!(f, "[{}-{}]", self.lower, self.upper)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    pub total_count: u64,
}

impl Histogram {
    pub fn build(sample: &Sample) -> Self {
        let range = sample.range();
        build_histogram(sample.values(), range.min, range.max)
    }

    /// Wraps already-merged bins; `total_count` is their sum.
    pub fn from_bins(bins: Vec<Bin>) -> Self {
        let total_count = bins.iter().map(|b| b.count).sum();
        Self { bins, total_count }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Values outside `[min, max]` are dropped; `total_count` counts only what was binned.
pub fn build_histogram(values: &[i64], min: i64, max: i64) -> Histogram {
    let mut freq: BTreeMap<i64, u64> = BTreeMap::new();
    for &v in values {
        *freq.entry(v).or_insert(0) += 1;
    }
    let singletons: Vec<Bin> = if min <= max {
        freq.range(min..=max)
            .map(|(&v, &c)| Bin::singleton(v, c))
            .collect()
    } else {
        Vec::new()
    };
    let total_count: u64 = singletons.iter().map(|b| b.count).sum();
    if total_count < values.len() as u64 {
        debug!(
            "dropped {} value(s) outside [{min}, {max}]",
            values.len() as u64 - total_count
        );
    }
    Histogram {
        bins: merge_bins(singletons),
        total_count,
    }
}

/// Left-to-right fold state: bins already emitted plus the accumulator still below threshold.
#[derive(Default)]
struct MergeState {
    emitted: Vec<Bin>,
    pending: Option<Bin>,
}

impl MergeState {
    fn push(mut self, next: Bin) -> Self {
        self.pending = Some(match self.pending.take() {
            None => next,
            Some(mut acc) if acc.count < MIN_BIN_COUNT => {
                acc.absorb(next);
                acc
            }
            Some(acc) => {
                self.emitted.push(acc);
                next
            }
        });
        self
    }

    fn finish(mut self) -> Vec<Bin> {
        let Some(last) = self.pending else {
            return self.emitted;
        };
        if last.count < MIN_BIN_COUNT && !self.emitted.is_empty() {
            // short tail goes into the previous bin
            if let Some(prev) = self.emitted.last_mut() {
                prev.absorb(last);
            }
        } else {
            self.emitted.push(last);
        }
        self.emitted
    }
}

pub fn merge_bins(bins: Vec<Bin>) -> Vec<Bin> {
    bins.into_iter()
        .fold(MergeState::default(), MergeState::push)
        .finish()
}
