//! View Calculator Module
//! Grouped sums, counts and maxima behind every dashboard chart.

use crate::data::{TransferMovement, TransferRecord};
use std::collections::BTreeMap;

/// One bar or line point: a category label and its aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

impl CategoryValue {
    fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A single transfer for the season/fee scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct FeePoint {
    pub season: String,
    pub fee: f64,
    pub league: String,
    pub player: String,
}

/// Per-club transfer balance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClubSummary {
    pub club: String,
    pub inbound_spend: f64,
    pub outbound_income: f64,
    pub inbound_count: usize,
    pub outbound_count: usize,
    pub average_fee: Option<f64>,
}

/// Fee distribution for one league.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeStats {
    pub group_name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub p95: f64,
    pub max: f64,
}

impl Default for FeeStats {
    fn default() -> Self {
        Self {
            group_name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            p95: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Value at quantile `q` of ascending `fees`, interpolating between ranks.
fn quantile(fees: &[f64], q: f64) -> f64 {
    let Some(&last) = fees.last() else {
        return f64::NAN;
    };
    let rank = q * (fees.len() - 1) as f64;
    let below = rank.floor() as usize;
    match fees.get(below + 1) {
        Some(&above) => fees[below] + (above - fees[below]) * rank.fract(),
        None => last,
    }
}

impl FeeStats {
    /// Count, mean, median, sample std, p95 and max of one league's fees.
    pub fn from_fees(league: &str, mut fees: Vec<f64>) -> Self {
        if fees.is_empty() {
            return Self {
                group_name: league.to_string(),
                ..Self::default()
            };
        }
        let count = fees.len();
        fees.sort_by(f64::total_cmp);

        let mean = fees.iter().sum::<f64>() / count as f64;
        let squares: f64 = fees.iter().map(|fee| (fee - mean) * (fee - mean)).sum();
        let std = if count > 1 {
            (squares / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        Self {
            group_name: league.to_string(),
            count,
            mean,
            median: quantile(&fees, 0.5),
            std,
            p95: quantile(&fees, 0.95),
            max: fees[count - 1],
        }
    }
}

/// Every aggregate the dashboard shows, for one filtered subset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardViews {
    pub row_count: usize,
    pub max_fee_per_season: Vec<CategoryValue>,
    pub transfers_per_season: Vec<CategoryValue>,
    /// Every row with a known fee; narrowed by `points_above` at draw time.
    pub fee_points: Vec<FeePoint>,
    pub club_summary: Vec<ClubSummary>,
    pub spend_per_league: Vec<CategoryValue>,
    pub transfers_per_age: Vec<CategoryValue>,
    pub spend_per_position: Vec<CategoryValue>,
    pub league_fee_stats: Vec<FeeStats>,
}

impl DashboardViews {
    /// Scatter points at or above the minimum fee.
    pub fn points_above(&self, min_fee: f64) -> impl Iterator<Item = &FeePoint> + '_ {
        self.fee_points.iter().filter(move |p| p.fee >= min_fee)
    }

    /// Largest fee in the subset, 0 when there is none.
    pub fn max_fee(&self) -> f64 {
        self.fee_points
            .iter()
            .map(|p| p.fee)
            .fold(0.0, f64::max)
    }
}

/// Computes dashboard views from filtered rows.
pub struct ViewCalculator;

impl ViewCalculator {
    pub fn compute(rows: &[&TransferRecord]) -> DashboardViews {
        DashboardViews {
            row_count: rows.len(),
            max_fee_per_season: Self::max_fee_per_season(rows),
            transfers_per_season: Self::transfers_per_season(rows),
            fee_points: Self::fee_points(rows),
            club_summary: Self::club_summary(rows),
            spend_per_league: Self::sum_fee_by(rows, |r| &r.league_name),
            transfers_per_age: Self::transfers_per_age(rows),
            spend_per_position: Self::sum_fee_by(rows, |r| &r.position),
            league_fee_stats: Self::league_fee_stats(rows),
        }
    }

    /// Highest fee per season. Seasons without any known fee are omitted.
    pub fn max_fee_per_season(rows: &[&TransferRecord]) -> Vec<CategoryValue> {
        let mut max_by_season: BTreeMap<&str, f64> = BTreeMap::new();
        for row in rows {
            if let Some(fee) = row.fee_cleaned {
                max_by_season
                    .entry(row.season.as_str())
                    .and_modify(|max| *max = max.max(fee))
                    .or_insert(fee);
            }
        }
        max_by_season
            .into_iter()
            .map(|(season, max)| CategoryValue::new(season, max))
            .collect()
    }

    /// Named players per season.
    pub fn transfers_per_season(rows: &[&TransferRecord]) -> Vec<CategoryValue> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for row in rows {
            let count = counts.entry(row.season.as_str()).or_default();
            if !row.player_name.is_empty() {
                *count += 1;
            }
        }
        counts
            .into_iter()
            .map(|(season, count)| CategoryValue::new(season, count as f64))
            .collect()
    }

    pub fn fee_points(rows: &[&TransferRecord]) -> Vec<FeePoint> {
        rows.iter()
            .filter_map(|row| {
                row.fee_cleaned.map(|fee| FeePoint {
                    season: row.season.clone(),
                    fee,
                    league: row.league_name.clone(),
                    player: row.player_name.clone(),
                })
            })
            .collect()
    }

    /// Sum of known fees grouped by a text field, sorted by group.
    pub fn sum_fee_by(
        rows: &[&TransferRecord],
        key: impl Fn(&TransferRecord) -> &String,
    ) -> Vec<CategoryValue> {
        let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
        for row in rows {
            *sums.entry(key(*row).as_str()).or_default() += row.fee_cleaned.unwrap_or(0.0);
        }
        sums.into_iter()
            .map(|(label, sum)| CategoryValue::new(label, sum))
            .collect()
    }

    /// Transfers per known age, ascending. The -1 sentinel is left out.
    pub fn transfers_per_age(rows: &[&TransferRecord]) -> Vec<CategoryValue> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for row in rows.iter().filter(|r| r.has_known_age()) {
            *counts.entry(row.age).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(age, count)| CategoryValue::new(age.to_string(), count as f64))
            .collect()
    }

    /// Club balance, biggest spenders first.
    pub fn club_summary(rows: &[&TransferRecord]) -> Vec<ClubSummary> {
        let mut clubs: BTreeMap<&str, (ClubSummary, f64, usize)> = BTreeMap::new();
        for row in rows {
            let (summary, fee_sum, fee_count) = clubs.entry(row.club_name.as_str()).or_default();
            let fee = row.fee_cleaned.unwrap_or(0.0);
            match row.transfer_movement {
                TransferMovement::Inbound => {
                    summary.inbound_spend += fee;
                    summary.inbound_count += 1;
                }
                TransferMovement::Outbound => {
                    summary.outbound_income += fee;
                    summary.outbound_count += 1;
                }
                TransferMovement::Other(_) => {}
            }
            if let Some(fee) = row.fee_cleaned {
                *fee_sum += fee;
                *fee_count += 1;
            }
        }

        let mut summaries: Vec<ClubSummary> = clubs
            .into_iter()
            .map(|(club, (mut summary, fee_sum, fee_count))| {
                summary.club = club.to_string();
                summary.average_fee = (fee_count > 0).then(|| fee_sum / fee_count as f64);
                summary
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.inbound_spend
                .partial_cmp(&a.inbound_spend)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.club.cmp(&b.club))
        });
        summaries
    }

    /// Fee distribution per league, leagues in name order.
    pub fn league_fee_stats(rows: &[&TransferRecord]) -> Vec<FeeStats> {
        let mut fees: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for row in rows {
            if let Some(fee) = row.fee_cleaned {
                fees.entry(row.league_name.as_str()).or_default().push(fee);
            }
        }
        fees.into_iter()
            .map(|(league, values)| FeeStats::from_fees(league, values))
            .collect()
    }
}
