//! Derived views screens compute from store snapshots. Pure functions, no state.

use serde::Serialize;

use crate::models::{JobMatch, OptimizationStatus, Resume, ResumeTemplate, TemplateCategory};

const RECENT_LIMIT: usize = 3;
const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Status chip selection on the resume list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OptimizationStatus),
}

impl StatusFilter {
    fn accepts(self, status: OptimizationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Category chip selection on the template browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(TemplateCategory),
}

impl CategoryFilter {
    fn accepts(self, category: TemplateCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Resumes whose file name contains `query` (case-insensitive) and whose
/// status passes `status`. An empty query matches everything.
pub fn filter_resumes<'a>(
    resumes: &'a [Resume],
    query: &str,
    status: StatusFilter,
) -> Vec<&'a Resume> {
    let query = query.to_lowercase();
    resumes
        .iter()
        .filter(|r| contains_ignore_case(&r.file_name, &query))
        .filter(|r| status.accepts(r.optimization_status))
        .collect()
}

/// Templates whose name or description contains `query`, in `category`.
pub fn filter_templates<'a>(
    templates: &'a [ResumeTemplate],
    query: &str,
    category: CategoryFilter,
) -> Vec<&'a ResumeTemplate> {
    let query = query.to_lowercase();
    templates
        .iter()
        .filter(|t| {
            contains_ignore_case(&t.name, &query) || contains_ignore_case(&t.description, &query)
        })
        .filter(|t| category.accepts(t.category))
        .collect()
}

/// Matches whose title or company contains `query`, optionally narrowed to one resume.
pub fn filter_job_matches<'a>(
    matches: &'a [JobMatch],
    query: &str,
    resume_id: Option<&str>,
) -> Vec<&'a JobMatch> {
    let query = query.to_lowercase();
    matches
        .iter()
        .filter(|m| {
            contains_ignore_case(&m.job_title, &query) || contains_ignore_case(&m.company, &query)
        })
        .filter(|m| resume_id.map_or(true, |id| m.resume_id == id))
        .collect()
}

/// Resumes eligible for job matching.
pub fn completed_resumes(resumes: &[Resume]) -> Vec<&Resume> {
    resumes
        .iter()
        .filter(|r| r.optimization_status == OptimizationStatus::Completed)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// First entries of the collection, in listing order.
    pub recent: Vec<Resume>,
}

pub fn dashboard_summary(resumes: &[Resume]) -> DashboardSummary {
    let count = |status: OptimizationStatus| {
        resumes
            .iter()
            .filter(|r| r.optimization_status == status)
            .count()
    };
    DashboardSummary {
        total: resumes.len(),
        completed: count(OptimizationStatus::Completed),
        pending: count(OptimizationStatus::Pending),
        recent: resumes.iter().take(RECENT_LIMIT).cloned().collect(),
    }
}

/// Formats a byte count with 1024-based units and at most two decimals,
/// e.g. `1024000` → `"1000 KB"`, `1536` → `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchTier {
    Excellent,
    Good,
    Low,
}

impl MatchTier {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            MatchTier::Excellent
        } else if percentage >= 60 {
            MatchTier::Good
        } else {
            MatchTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Excellent => "Excellent Match",
            MatchTier::Good => "Good Match",
            MatchTier::Low => "Low Match",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fixtures::{fixture_resumes, fixture_templates};
    use chrono::Utc;

    fn job_match(id: &str, resume_id: &str, title: &str, company: &str) -> JobMatch {
        JobMatch {
            id: id.to_string(),
            resume_id: resume_id.to_string(),
            job_title: title.to_string(),
            company: company.to_string(),
            job_description: String::new(),
            match_percentage: 85,
            matched_skills: vec![],
            missing_skills: vec![],
            suggestions: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_resumes_by_query_and_status() {
        let resumes = fixture_resumes();

        assert_eq!(filter_resumes(&resumes, "", StatusFilter::All).len(), 2);
        assert_eq!(filter_resumes(&resumes, "ENGINEER", StatusFilter::All).len(), 1);

        let pending = filter_resumes(
            &resumes,
            "resume",
            StatusFilter::Only(OptimizationStatus::Pending),
        );
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "2");

        assert!(filter_resumes(
            &resumes,
            "",
            StatusFilter::Only(OptimizationStatus::Failed)
        )
        .is_empty());
    }

    #[test]
    fn test_filter_templates_matches_description() {
        let templates = fixture_templates();

        let senior = filter_templates(&templates, "senior", CategoryFilter::All);
        assert_eq!(senior.len(), 1);
        assert_eq!(senior[0].name, "Executive");

        let creative = filter_templates(
            &templates,
            "",
            CategoryFilter::Only(TemplateCategory::Creative),
        );
        assert_eq!(creative.len(), 1);

        assert!(filter_templates(
            &templates,
            "",
            CategoryFilter::Only(TemplateCategory::Startup)
        )
        .is_empty());
    }

    #[test]
    fn test_category_chips_partition_catalog() {
        let templates = fixture_templates();
        let per_category: usize = TemplateCategory::ALL
            .iter()
            .map(|c| filter_templates(&templates, "", CategoryFilter::Only(*c)).len())
            .sum();
        assert_eq!(per_category, templates.len());
    }

    #[test]
    fn test_status_chips_partition_listing() {
        let resumes = fixture_resumes();
        let per_status: usize = OptimizationStatus::ALL
            .iter()
            .map(|s| filter_resumes(&resumes, "", StatusFilter::Only(*s)).len())
            .sum();
        assert_eq!(per_status, resumes.len());
    }

    #[test]
    fn test_filter_job_matches_by_company_and_resume() {
        let matches = vec![
            job_match("1", "1", "Senior Software Engineer", "TechCorp Inc."),
            job_match("2", "1", "Full Stack Developer", "StartupXYZ"),
            job_match("3", "2", "Product Manager", "TechCorp Inc."),
        ];

        assert_eq!(filter_job_matches(&matches, "techcorp", None).len(), 2);
        assert_eq!(filter_job_matches(&matches, "techcorp", Some("2")).len(), 1);
        assert_eq!(filter_job_matches(&matches, "", Some("1")).len(), 2);
    }

    #[test]
    fn test_completed_resumes() {
        let resumes = fixture_resumes();
        let completed = completed_resumes(&resumes);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "1");
    }

    #[test]
    fn test_dashboard_summary_counts() {
        let mut resumes = fixture_resumes();
        let mut extra = resumes[1].clone();
        extra.id = "3".to_string();
        resumes.push(extra.clone());
        extra.id = "4".to_string();
        extra.optimization_status = OptimizationStatus::Failed;
        resumes.push(extra);

        let summary = dashboard_summary(&resumes);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.pending, 2);
        let recent: Vec<_> = summary.recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(recent, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_dashboard_summary_empty() {
        let summary = dashboard_summary(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_024_000), "1000 KB");
        assert_eq!(format_file_size(2_048_000), "1.95 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn test_format_file_size_caps_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_match_tiers() {
        assert_eq!(MatchTier::from_percentage(85), MatchTier::Excellent);
        assert_eq!(MatchTier::from_percentage(80), MatchTier::Excellent);
        assert_eq!(MatchTier::from_percentage(78), MatchTier::Good);
        assert_eq!(MatchTier::from_percentage(59), MatchTier::Low);
        assert_eq!(MatchTier::Good.label(), "Good Match");
    }
}
