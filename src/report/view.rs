//! Display values derived from an [`AnalysisReport`]. Pure, no I/O.

use std::fmt;

use crate::models::{AnalysisReport, OutdatedPackage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Good,
    Warning,
    Critical,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTier::Good
        } else if score >= 60.0 {
            ScoreTier::Warning
        } else {
            ScoreTier::Critical
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreTier::Good => write!(f, "good"),
            ScoreTier::Warning => write!(f, "warning"),
            ScoreTier::Critical => write!(f, "critical"),
        }
    }
}

/// One line of the outdated package list.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRow<'a> {
    /// `name-index`, unique even when the backend repeats a name.
    pub key: String,
    pub package: &'a OutdatedPackage,
}

#[derive(Debug, Clone)]
pub struct ReportView<'a> {
    pub report: &'a AnalysisReport,
    /// Not clamped: a negative value exposes a backend inconsistency.
    pub up_to_date_count: i128,
    pub tier: ScoreTier,
    pub has_outdated_list: bool,
    /// No outdated list and a zero outdated count.
    pub all_clear: bool,
    pub ring_target: f64,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        let has_outdated_list = report
            .outdated_packages
            .as_ref()
            .is_some_and(|pkgs| !pkgs.is_empty());

        Self {
            report,
            up_to_date_count: i128::from(report.total_packages) - i128::from(report.outdated_count),
            tier: ScoreTier::from_score(report.health_score),
            has_outdated_list,
            all_clear: !has_outdated_list && report.outdated_count == 0,
            ring_target: report.health_score,
        }
    }

    pub fn rows(&self) -> Vec<PackageRow<'a>> {
        let report: &'a AnalysisReport = self.report;
        report
            .outdated_packages
            .as_deref()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, package)| PackageRow {
                key: format!("{}-{}", package.name, i),
                package,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(total: u64, outdated: u64, score: f64, pkgs: Option<Vec<&str>>) -> AnalysisReport {
        AnalysisReport {
            total_packages: total,
            outdated_count: outdated,
            health_score: score,
            partial_analysis: false,
            outdated_packages: pkgs.map(|names| {
                names
                    .into_iter()
                    .map(|n| OutdatedPackage {
                        name: n.to_string(),
                        current_version: "1.0.0".to_string(),
                        latest_version: "2.0.0".to_string(),
                    })
                    .collect()
            }),
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::from_score(100.0), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(80.0), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(79.99), ScoreTier::Warning);
        assert_eq!(ScoreTier::from_score(60.0), ScoreTier::Warning);
        assert_eq!(ScoreTier::from_score(59.9), ScoreTier::Critical);
        assert_eq!(ScoreTier::from_score(0.0), ScoreTier::Critical);
    }

    #[test]
    fn test_up_to_date_count_not_clamped() {
        let r = report(10, 2, 82.0, None);
        assert_eq!(ReportView::new(&r).up_to_date_count, 8);

        let broken = report(1, 3, 0.0, None);
        assert_eq!(ReportView::new(&broken).up_to_date_count, -2);
    }

    #[test]
    fn test_up_to_date_count_at_u64_extremes() {
        let all_outdated = report(0, u64::MAX, 0.0, None);
        assert_eq!(
            ReportView::new(&all_outdated).up_to_date_count,
            -i128::from(u64::MAX)
        );

        let none_outdated = report(u64::MAX, 0, 100.0, None);
        assert_eq!(
            ReportView::new(&none_outdated).up_to_date_count,
            i128::from(u64::MAX)
        );
    }

    #[test]
    fn test_all_clear_with_absent_or_empty_list() {
        let absent = report(5, 0, 100.0, None);
        let view = ReportView::new(&absent);
        assert!(!view.has_outdated_list);
        assert!(view.all_clear);

        let empty = report(5, 0, 100.0, Some(vec![]));
        assert!(ReportView::new(&empty).all_clear);
    }

    #[test]
    fn test_count_without_list_is_not_all_clear() {
        let r = report(5, 2, 60.0, None);
        let view = ReportView::new(&r);
        assert!(!view.has_outdated_list);
        assert!(!view.all_clear);
        assert!(view.rows().is_empty());
    }

    #[test]
    fn test_list_length_mismatch_tolerated() {
        let r = report(5, 1, 70.0, Some(vec!["a", "b", "c"]));
        let view = ReportView::new(&r);
        assert!(view.has_outdated_list);
        assert_eq!(view.rows().len(), 3);
    }

    #[test]
    fn test_duplicate_names_get_distinct_keys() {
        let r = report(4, 2, 50.0, Some(vec!["left-pad", "left-pad"]));
        let keys: Vec<_> = ReportView::new(&r).rows().into_iter().map(|row| row.key).collect();
        assert_eq!(keys, vec!["left-pad-0", "left-pad-1"]);
    }

    #[test]
    fn test_ring_target_is_score() {
        let r = report(4, 1, 73.5, None);
        assert_eq!(ReportView::new(&r).ring_target, 73.5);
    }
}
