//! Batch statistics and the printed report table

use super::RunSummary;
use crate::models::{AchievementTier, Outcome};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentile with linear interpolation between closest ranks
///
/// Sorts `values` in place. Returns 0.0 for an empty slice.
pub fn percentile(values: &mut [f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let n = values.len();
    if n == 1 {
        return values[0];
    }

    let rank = (p / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        values[lower]
    } else {
        let w = rank - lower as f64;
        values[lower] * (1.0 - w) + values[upper] * w
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl Percentiles {
    /// `None` when there are no samples
    pub fn of(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            p10: percentile(&mut values, 10.0),
            p25: percentile(&mut values, 25.0),
            p50: percentile(&mut values, 50.0),
            p75: percentile(&mut values, 75.0),
            p90: percentile(&mut values, 90.0),
        })
    }
}

/// Share of runs whose peak achievement was `tier` (`None` = no tier)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementShare {
    pub tier: Option<AchievementTier>,
    pub share: f64,
}

/// Aggregate of one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub label: String,
    pub runs: usize,
    pub museum_rate: f64,
    /// Founding week percentiles over runs that founded a museum
    pub museum_week: Option<Percentiles>,
    pub bankruptcy_rate: f64,
    pub bankruptcy_median_week: Option<f64>,
    pub timeout_rate: f64,
    /// Peak achievement distribution, lowest first
    pub achievement_distribution: Vec<AchievementShare>,
    pub median_net_worth_52: f64,
}

impl BatchReport {
    pub fn from_summaries(label: impl Into<String>, summaries: &[RunSummary]) -> Self {
        let runs = summaries.len();
        let rate = |count: usize| {
            if runs == 0 {
                0.0
            } else {
                count as f64 / runs as f64
            }
        };
        let count_outcome = |outcome: Outcome| summaries.iter().filter(|s| s.outcome == outcome).count();

        let museum_weeks: Vec<f64> = summaries
            .iter()
            .filter_map(|s| s.first_museum_week)
            .map(f64::from)
            .collect();
        let museum_runs = summaries
            .iter()
            .filter(|s| s.first_museum_week.is_some())
            .count();

        let mut bankruptcy_weeks: Vec<f64> = summaries
            .iter()
            .filter(|s| s.outcome == Outcome::Bankruptcy)
            .map(|s| f64::from(s.end_week))
            .collect();
        let bankruptcy_median_week =
            (!bankruptcy_weeks.is_empty()).then(|| percentile(&mut bankruptcy_weeks, 50.0));

        let tiers = [
            None,
            Some(AchievementTier::Exhibition),
            Some(AchievementTier::Gallery),
            Some(AchievementTier::Wing),
        ];
        let achievement_distribution = tiers
            .iter()
            .map(|&tier| AchievementShare {
                tier,
                share: rate(summaries.iter().filter(|s| s.peak_achievement == tier).count()),
            })
            .collect();

        let mut net_worths: Vec<f64> = summaries.iter().map(|s| s.net_worth_week_52 as f64).collect();

        Self {
            label: label.into(),
            runs,
            museum_rate: rate(museum_runs),
            museum_week: Percentiles::of(museum_weeks),
            bankruptcy_rate: rate(count_outcome(Outcome::Bankruptcy)),
            bankruptcy_median_week,
            timeout_rate: rate(count_outcome(Outcome::Timeout)),
            achievement_distribution,
            median_net_worth_52: percentile(&mut net_worths, 50.0),
        }
    }
}

fn pct(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Group thousands with commas
fn credits(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ({} runs) ==", self.label, self.runs)?;
        writeln!(f, "{:<22}{:>10}", "Museum founded", pct(self.museum_rate))?;
        match &self.museum_week {
            Some(p) => writeln!(
                f,
                "{:<22}p10 {:>5.1}  p25 {:>5.1}  p50 {:>5.1}  p75 {:>5.1}  p90 {:>5.1}",
                "  founding week", p.p10, p.p25, p.p50, p.p75, p.p90
            )?,
            None => writeln!(f, "{:<22}{:>10}", "  founding week", "-")?,
        }
        let median = self
            .bankruptcy_median_week
            .map(|w| format!("{:.1}", w))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            f,
            "{:<22}{:>10}   median week {}",
            "Bankruptcy",
            pct(self.bankruptcy_rate),
            median
        )?;
        writeln!(f, "{:<22}{:>10}", "Timeout", pct(self.timeout_rate))?;
        writeln!(f, "Peak achievement")?;
        for share in &self.achievement_distribution {
            let name = share
                .tier
                .map(|t| t.to_string())
                .unwrap_or_else(|| "none".to_string());
            writeln!(f, "  {:<20}{:>10}", name, pct(share.share))?;
        }
        writeln!(
            f,
            "{:<22}{:>10}",
            "Median net worth @52",
            credits(self.median_net_worth_52)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(outcome: Outcome, end_week: u32, museum: Option<u32>, peak: Option<AchievementTier>) -> RunSummary {
        RunSummary {
            index: 0,
            seed: 0,
            outcome,
            end_week,
            first_museum_week: museum,
            final_cash: 0,
            net_worth_week_52: 1_000_000,
            peak_achievement: peak,
            final_achievement: peak,
            museums_founded: museum.map_or(0, |_| 1),
            total_carry_paid: 0,
            decisions_applied: 0,
            decisions_rejected: 0,
        }
    }

    #[test]
    fn test_percentile_interpolates_between_points() {
        let mut values = vec![1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&mut values, 25.0) - 1.75).abs() < 1e-12);
        assert_eq!(percentile(&mut values, 100.0), 4.0);
        let mut empty: Vec<f64> = Vec::new();
        assert_eq!(percentile(&mut empty, 50.0), 0.0);
    }

    #[test]
    fn test_report_rates() {
        let summaries = vec![
            summary(Outcome::Museum, 40, Some(40), Some(AchievementTier::Wing)),
            summary(Outcome::Bankruptcy, 30, None, Some(AchievementTier::Exhibition)),
            summary(Outcome::Bankruptcy, 50, None, None),
            summary(Outcome::Timeout, 104, None, Some(AchievementTier::Exhibition)),
        ];
        let report = BatchReport::from_summaries("test", &summaries);
        assert_eq!(report.museum_rate, 0.25);
        assert_eq!(report.bankruptcy_rate, 0.5);
        assert_eq!(report.bankruptcy_median_week, Some(40.0));
        assert_eq!(report.timeout_rate, 0.25);
        assert_eq!(report.museum_week.unwrap().p50, 40.0);
        assert_eq!(report.achievement_distribution[1].share, 0.5);
        assert_eq!(report.median_net_worth_52, 1_000_000.0);
    }

    #[test]
    fn test_credits_grouping() {
        assert_eq!(credits(1_234_567.0), "1,234,567");
        assert_eq!(credits(-999.0), "-999");
        assert_eq!(credits(1_000.0), "1,000");
    }

    #[test]
    fn test_table_mentions_every_row() {
        let report = BatchReport::from_summaries("x", &[summary(Outcome::Timeout, 104, None, None)]);
        let table = report.to_string();
        for row in ["Museum founded", "Bankruptcy", "Timeout", "Peak achievement", "Median net worth @52"] {
            assert!(table.contains(row), "missing {}", row);
        }
    }
}
