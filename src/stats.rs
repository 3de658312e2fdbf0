// src/stats.rs

//! Summaries over a finished run, for whoever plots or aggregates it.

use crate::population::WealthByCategory;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub mean: f64,
    /// Sample standard deviation; 0 for a single observation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub last: f64,
}

impl PriceStats {
    pub fn from_history(history: &[f64]) -> Option<Self> {
        let &last = history.last()?;
        let std_dev = if history.len() > 1 {
            Statistics::std_dev(history.iter())
        } else {
            0.0
        };
        Some(Self {
            mean: Statistics::mean(history.iter()),
            std_dev,
            min: Statistics::min(history.iter()),
            max: Statistics::max(history.iter()),
            last,
        })
    }
}

/// Each variant's slice of total wealth. All zero when nobody holds anything.
pub fn wealth_shares(wealth: &WealthByCategory) -> WealthByCategory {
    let total = wealth.total();
    if !(total > 0.0) {
        return WealthByCategory::default();
    }
    WealthByCategory {
        altruists: wealth.altruists / total,
        miners: wealth.miners / total,
        speculators: wealth.speculators / total,
    }
}

/// Gini coefficient of a set of wealths: 0 is perfect equality, values near
/// 1 mean one holder has everything. Negative wealths are treated as zero.
pub fn gini(wealths: &[f64]) -> f64 {
    let n = wealths.len();
    if n < 2 {
        return 0.0;
    }
    let mut sorted: Vec<f64> = wealths.iter().map(|w| w.max(0.0)).collect();
    sorted.sort_by(f64::total_cmp);

    let total: f64 = sorted.iter().sum();
    if !(total > 0.0) {
        return 0.0;
    }
    // G = (2·Σ i·x_i − (n + 1)·Σ x_i) / (n·Σ x_i), i from 1
    let indexed: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| (i as f64 + 1.0) * x)
        .sum();
    let n = n as f64;
    (2.0 * indexed - (n + 1.0) * total) / (n * total)
}
