//! Cost record aggregation and per-service trend classification.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};

/// Change band within which a trend counts as stable, in percent.
const STABLE_BAND_PERCENT: f64 = 5.0;

/// A single billing event from the cost feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub service: String,
    pub date: NaiveDate,
    pub cost: f64,
}

/// One day's spend for a service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCost {
    pub date: NaiveDate,
    pub cost: f64,
}

/// Aggregated spend for one service.
///
/// `daily_costs` is sorted ascending by date; `total_cost` is the sum
/// over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCostSummary {
    pub service: String,
    pub total_cost: f64,
    pub daily_costs: Vec<DailyCost>,
}

/// Direction of a service's cost movement between its first and last
/// observed day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// First-to-last cost movement for one service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostTrend {
    pub service: String,
    pub direction: TrendDirection,
    pub change_percent: f64,
    pub first_cost: Option<f64>,
    pub last_cost: Option<f64>,
}

/// Inclusive span of dates covered by the cost records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Aggregated view over the entire cost feed.
///
/// Maps are keyed by service name so iteration order is deterministic.
/// `date_range` is `None` when the feed held no records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_services: usize,
    pub total_cost: f64,
    pub date_range: Option<DateRange>,
    pub services: BTreeMap<String, ServiceCostSummary>,
    pub trends: BTreeMap<String, CostTrend>,
}

impl CostSummary {
    /// A service's share of total cost, in percent. Zero when there is
    /// no spend at all.
    pub fn share_percent(&self, cost: f64) -> f64 {
        if self.total_cost > 0.0 {
            cost / self.total_cost * 100.0
        } else {
            0.0
        }
    }

    /// Services ordered by total cost descending, ties by name.
    pub fn services_by_cost(&self) -> Vec<&ServiceCostSummary> {
        let mut services: Vec<_> = self.services.values().collect();
        services.sort_by(|a, b| {
            b.total_cost
                .partial_cmp(&a.total_cost)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.service.cmp(&b.service))
        });
        services
    }

    /// One-line summary for the dashboard payload, e.g.
    /// `Total: $500.00, EC2: $200.00, RDS: $150.00, S3: $50.00`.
    pub fn summary_line(&self) -> String {
        let mut parts = vec![format!("Total: ${:.2}", self.total_cost)];
        for summary in self.services_by_cost().into_iter().take(3) {
            parts.push(format!("{}: ${:.2}", summary.service, summary.total_cost));
        }
        parts.join(", ")
    }

    /// Natural-language summary fed to the text analysis service.
    pub fn text_summary(&self) -> String {
        if self.services.is_empty() {
            return "No cost data available for analysis.".to_string();
        }

        let days = self
            .date_range
            .map(|r| (r.end - r.start).num_days() + 1)
            .unwrap_or(0);
        let top = self.services_by_cost();
        let top = &top[0];

        let increasing: Vec<&str> = self
            .trends
            .values()
            .filter(|t| t.direction == TrendDirection::Increasing)
            .map(|t| t.service.as_str())
            .collect();
        let decreasing = self
            .trends
            .values()
            .filter(|t| t.direction == TrendDirection::Decreasing)
            .count();

        let increasing_names = if increasing.is_empty() {
            "none".to_string()
        } else {
            increasing[..increasing.len().min(3)].join(", ")
        };

        format!(
            "Cloud cost analysis shows a total expenditure of ${:.2} across {} services \
             over {} days. The highest cost service is {} with ${:.2} in total spending. \
             {} services show increasing costs, including {}. {} services show decreasing costs.",
            self.total_cost,
            self.total_services,
            days,
            top.service,
            top.total_cost,
            increasing.len(),
            increasing_names,
            decreasing,
        )
    }
}

/// Aggregates raw cost records into per-service summaries and trends.
pub struct CostAggregator;

impl CostAggregator {
    /// Load cost records from a JSON file.
    pub fn load_records(path: impl AsRef<Path>) -> CoreResult<Vec<CostRecord>> {
        let path = path.as_ref();
        debug!("Loading cost data from {:?}", path);

        let content =
            std::fs::read_to_string(path).map_err(|source| CoreError::CostDataUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let records: Vec<CostRecord> =
            serde_json::from_str(&content).map_err(|source| CoreError::CostDataInvalid {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded {} cost records", records.len());
        Ok(records)
    }

    /// Load and aggregate in one step.
    pub fn analyze(path: impl AsRef<Path>) -> CoreResult<CostSummary> {
        let records = Self::load_records(path)?;
        Ok(Self::aggregate(&records))
    }

    /// Group records by service, total them, and classify each
    /// service's trend.
    pub fn aggregate(records: &[CostRecord]) -> CostSummary {
        let mut services: BTreeMap<String, ServiceCostSummary> = BTreeMap::new();
        let mut date_range: Option<DateRange> = None;

        for record in records {
            let entry = services
                .entry(record.service.clone())
                .or_insert_with(|| ServiceCostSummary {
                    service: record.service.clone(),
                    total_cost: 0.0,
                    daily_costs: Vec::new(),
                });
            entry.total_cost += record.cost;
            entry.daily_costs.push(DailyCost {
                date: record.date,
                cost: record.cost,
            });

            date_range = Some(match date_range {
                None => DateRange {
                    start: record.date,
                    end: record.date,
                },
                Some(range) => DateRange {
                    start: range.start.min(record.date),
                    end: range.end.max(record.date),
                },
            });
        }

        for summary in services.values_mut() {
            summary.daily_costs.sort_by_key(|d| d.date);
        }

        let trends = services
            .values()
            .map(|s| (s.service.clone(), Self::trend_for(s)))
            .collect();

        let total_cost = services.values().map(|s| s.total_cost).sum();

        CostSummary {
            total_services: services.len(),
            total_cost,
            date_range,
            services,
            trends,
        }
    }

    /// Classify the first-to-last movement of a service's daily costs.
    ///
    /// Fewer than two days is stable with no change. A zero first-day
    /// baseline cannot be divided by: the change is defined as 0% when
    /// the last day is also zero and 100% otherwise.
    fn trend_for(summary: &ServiceCostSummary) -> CostTrend {
        if summary.daily_costs.len() < 2 {
            return CostTrend {
                service: summary.service.clone(),
                direction: TrendDirection::Stable,
                change_percent: 0.0,
                first_cost: None,
                last_cost: None,
            };
        }

        let first = summary.daily_costs.first().expect("non-empty").cost;
        let last = summary.daily_costs.last().expect("non-empty").cost;

        let change_percent = if first == 0.0 {
            if last == 0.0 {
                0.0
            } else {
                100.0
            }
        } else {
            (last - first) / first * 100.0
        };

        let direction = if change_percent > STABLE_BAND_PERCENT {
            TrendDirection::Increasing
        } else if change_percent < -STABLE_BAND_PERCENT {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };

        CostTrend {
            service: summary.service.clone(),
            direction,
            change_percent,
            first_cost: Some(first),
            last_cost: Some(last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(service: &str, date: &str, cost: f64) -> CostRecord {
        CostRecord {
            service: service.to_string(),
            date: date.parse().unwrap(),
            cost,
        }
    }

    #[test]
    fn test_increasing_trend() {
        let records = vec![
            record("EC2", "2025-01-01", 100.0),
            record("EC2", "2025-01-05", 130.0),
        ];
        let summary = CostAggregator::aggregate(&records);
        let trend = &summary.trends["EC2"];

        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert!((trend.change_percent - 30.0).abs() < 1e-9);
        assert_eq!(trend.first_cost, Some(100.0));
        assert_eq!(trend.last_cost, Some(130.0));
    }

    #[test]
    fn test_decreasing_trend() {
        let records = vec![
            record("RDS", "2025-01-01", 200.0),
            record("RDS", "2025-01-03", 150.0),
        ];
        let summary = CostAggregator::aggregate(&records);
        assert_eq!(summary.trends["RDS"].direction, TrendDirection::Decreasing);
    }

    #[test]
    fn test_stable_within_band() {
        // +5% exactly is still stable; the band is strict.
        let records = vec![
            record("S3", "2025-01-01", 100.0),
            record("S3", "2025-01-02", 105.0),
        ];
        let summary = CostAggregator::aggregate(&records);
        assert_eq!(summary.trends["S3"].direction, TrendDirection::Stable);
    }

    #[test]
    fn test_single_record_is_stable() {
        let records = vec![record("Lambda", "2025-01-01", 10.0)];
        let summary = CostAggregator::aggregate(&records);
        let trend = &summary.trends["Lambda"];

        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.change_percent, 0.0);
        assert_eq!(trend.first_cost, None);
        assert_eq!(trend.last_cost, None);
    }

    #[test]
    fn test_zero_baseline_does_not_panic() {
        let records = vec![
            record("EKS", "2025-01-01", 0.0),
            record("EKS", "2025-01-02", 50.0),
        ];
        let summary = CostAggregator::aggregate(&records);
        let trend = &summary.trends["EKS"];

        assert!((trend.change_percent - 100.0).abs() < 1e-9);
        assert_eq!(trend.direction, TrendDirection::Increasing);
    }

    #[test]
    fn test_zero_to_zero_is_stable() {
        let records = vec![
            record("EKS", "2025-01-01", 0.0),
            record("EKS", "2025-01-02", 0.0),
        ];
        let summary = CostAggregator::aggregate(&records);
        assert_eq!(summary.trends["EKS"].direction, TrendDirection::Stable);
        assert_eq!(summary.trends["EKS"].change_percent, 0.0);
    }

    #[test]
    fn test_unsorted_input_sorted_by_date() {
        let records = vec![
            record("EC2", "2025-01-05", 130.0),
            record("EC2", "2025-01-01", 100.0),
        ];
        let summary = CostAggregator::aggregate(&records);
        let trend = &summary.trends["EC2"];

        assert_eq!(trend.first_cost, Some(100.0));
        assert_eq!(trend.last_cost, Some(130.0));
        assert_eq!(trend.direction, TrendDirection::Increasing);
    }

    #[test]
    fn test_totals_and_date_range() {
        let records = vec![
            record("EC2", "2025-01-02", 10.0),
            record("RDS", "2025-01-01", 5.0),
            record("EC2", "2025-01-04", 20.0),
        ];
        let summary = CostAggregator::aggregate(&records);

        assert_eq!(summary.total_services, 2);
        assert!((summary.total_cost - 35.0).abs() < 1e-9);
        assert!((summary.services["EC2"].total_cost - 30.0).abs() < 1e-9);

        let range = summary.date_range.unwrap();
        assert_eq!(range.start, "2025-01-01".parse().unwrap());
        assert_eq!(range.end, "2025-01-04".parse().unwrap());
    }

    #[test]
    fn test_empty_input_has_no_date_range() {
        let summary = CostAggregator::aggregate(&[]);
        assert_eq!(summary.total_services, 0);
        assert_eq!(summary.total_cost, 0.0);
        assert!(summary.date_range.is_none());
        assert!(summary.trends.is_empty());
    }

    #[test]
    fn test_share_percent_with_zero_total() {
        let summary = CostAggregator::aggregate(&[]);
        assert_eq!(summary.share_percent(0.0), 0.0);
    }

    #[test]
    fn test_summary_line_orders_by_cost() {
        let records = vec![
            record("S3", "2025-01-01", 50.0),
            record("EC2", "2025-01-01", 200.0),
            record("RDS", "2025-01-01", 150.0),
            record("SQS", "2025-01-01", 1.0),
        ];
        let summary = CostAggregator::aggregate(&records);
        assert_eq!(
            summary.summary_line(),
            "Total: $401.00, EC2: $200.00, RDS: $150.00, S3: $50.00"
        );
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = CostAggregator::load_records("nonexistent/cost.json");
        assert!(matches!(
            result,
            Err(CoreError::CostDataUnreadable { .. })
        ));
    }

    #[test]
    fn test_load_records_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let result = CostAggregator::load_records(file.path());
        assert!(matches!(result, Err(CoreError::CostDataInvalid { .. })));
    }

    #[test]
    fn test_load_records_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"service": "EC2", "date": "2025-01-01", "cost": 12.5}}]"#
        )
        .unwrap();

        let records = CostAggregator::load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].service, "EC2");
        assert!((records[0].cost - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let records = vec![
            record("EC2", "2025-01-01", 100.0),
            record("RDS", "2025-01-02", 50.0),
            record("EC2", "2025-01-03", 120.0),
        ];
        let a = CostAggregator::aggregate(&records);
        let b = CostAggregator::aggregate(&records);

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
