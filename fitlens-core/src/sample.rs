use fitlens_common::{FitLensError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Closed integer interval every observation must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRange {
    pub min: i64,
    pub max: i64,
}

/// Widest accepted support range. Frequency tables allocate one row per
/// integer, and bin widths and midpoints must stay within `i64`.
pub const MAX_SUPPORT_WIDTH: i64 = 1_000_000;

impl SupportRange {
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(FitLensError::Other(format!(
                "support range min {min} exceeds max {max}"
            )));
        }
        match max.checked_sub(min) {
            Some(width) if width < MAX_SUPPORT_WIDTH => Ok(Self { min, max }),
            _ => Err(FitLensError::Other(format!(
                "support range [{min}, {max}] is wider than {MAX_SUPPORT_WIDTH} values"
            ))),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for SupportRange {
    fn default() -> Self {
        Self { min: 0, max: 20 }
    }
}

impl From<&fitlens_common::SampleConfig> for SupportRange {
    fn from(cfg: &fitlens_common::SampleConfig) -> Self {
        Self {
            min: cfg.min_support,
            max: cfg.max_support,
        }
    }
}

/// Non-empty, range-checked integer observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<i64>,
    range: SupportRange,
}

impl Sample {
    pub fn new(values: Vec<i64>, range: SupportRange) -> Result<Self> {
        if values.is_empty() {
            return Err(FitLensError::EmptySample);
        }
        if let Some(&value) = values.iter().find(|v| !range.contains(**v)) {
            return Err(FitLensError::OutOfRange {
                value,
                min: range.min,
                max: range.max,
            });
        }
        Ok(Self { values, range })
    }

    /// Lenient whitespace-separated parse: non-integer and out-of-range tokens are skipped.
    pub fn parse(text: &str, range: SupportRange) -> Result<Self> {
        let mut values = Vec::new();
        let mut skipped = 0usize;
        for token in text.split_whitespace() {
            match token.parse::<i64>() {
                Ok(v) if range.contains(v) => values.push(v),
                Ok(v) => {
                    debug!("skipping {v}: outside [{}, {}]", range.min, range.max);
                    skipped += 1;
                }
                Err(_) => {
                    debug!("skipping non-integer token {token:?}");
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            warn!("ignored {skipped} invalid token(s) while reading sample");
        }
        Self::new(values, range)
    }

    pub fn from_reader<R: Read>(mut reader: R, range: SupportRange) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text, range)
    }

    pub fn from_path(path: &Path, range: SupportRange) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, range)
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn range(&self) -> SupportRange {
        self.range
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub fn validate_significance(alpha: f64) -> Result<f64> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err(FitLensError::InvalidSignificance(alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_garbage_and_out_of_range() {
        let s = Sample::parse("3 x 21 -1 7\n0 20 4.5", SupportRange::default()).unwrap();
        assert_eq!(s.values(), &[3, 7, 0, 20]);
    }

    #[test]
    fn parse_all_invalid_is_empty() {
        let err = Sample::parse("abc 99", SupportRange::default()).unwrap_err();
        assert!(matches!(err, FitLensError::EmptySample));
    }

    #[test]
    fn strict_constructor_reports_offender() {
        let err = Sample::new(vec![1, 2, 30], SupportRange::new(0, 20).unwrap()).unwrap_err();
        assert!(matches!(err, FitLensError::OutOfRange { value: 30, min: 0, max: 20 }));
    }

    #[test]
    fn inverted_range_rejected() {
        assert!(SupportRange::new(5, 1).is_err());
    }

    #[test]
    fn overly_wide_range_rejected() {
        assert!(SupportRange::new(0, 10_000_000_000).is_err());
        assert!(SupportRange::new(i64::MIN, i64::MAX).is_err());
        assert!(SupportRange::new(0, MAX_SUPPORT_WIDTH).is_err());
        assert!(SupportRange::new(0, MAX_SUPPORT_WIDTH - 1).is_ok());
        assert!(SupportRange::new(-500, 500).is_ok());
    }

    #[test]
    fn significance_bounds() {
        assert!(validate_significance(0.05).is_ok());
        assert!(validate_significance(0.0).is_err());
        assert!(validate_significance(1.0).is_err());
        assert!(validate_significance(f64::NAN).is_err());
    }
}
