use serde::{Deserialize, Serialize};

/// Dependency health report produced by the backend's analyze phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_packages: u64,
    pub outdated_count: u64,
    pub health_score: f64,
    /// Set when the backend stopped scanning early (e.g. very large repositories).
    #[serde(default)]
    pub partial_analysis: bool,
    /// May disagree with `outdated_count`; rendered as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdated_packages: Option<Vec<OutdatedPackage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutdatedPackage {
    pub name: String,
    pub current_version: String,
    pub latest_version: String,
}

// Wire envelopes for the backend HTTP contract.

#[derive(Debug, Serialize)]
pub struct FetchRequest<'a> {
    pub repo_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct FetchResponse {
    pub local_path: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub local_path: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis_report: AnalysisReport,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_optional_fields_default() {
        let json = r#"{"total_packages": 3, "outdated_count": 0, "health_score": 100.0}"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert!(!report.partial_analysis);
        assert!(report.outdated_packages.is_none());
    }

    #[test]
    fn test_analyze_envelope_ignores_extra_backend_fields() {
        let json = r#"{
            "analysis_report": {
                "total_packages": 10,
                "outdated_count": 1,
                "health_score": 90,
                "partial_analysis": true,
                "timestamp": "2024-01-01T00:00:00",
                "outdated_packages": [
                    {"name": "react", "current_version": "16.0.0", "latest_version": "18.2.0", "is_outdated": true}
                ]
            }
        }"#;
        let resp: AnalyzeResponse = serde_json::from_str(json).unwrap();
        let report = resp.analysis_report;
        assert!(report.partial_analysis);
        assert_eq!(report.health_score, 90.0);
        assert_eq!(report.outdated_packages.unwrap()[0].name, "react");
    }
}
