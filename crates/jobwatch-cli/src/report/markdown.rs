//! Markdown status report

use jobwatch_common::types::StatusSummary;
use jobwatch_common::{JobRecord, JobStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const JOB_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render the report. Output depends only on the arguments.
pub fn render(
    summary: &StatusSummary,
    new_jobs: &[JobRecord],
    modified_jobs: &[JobRecord],
) -> String {
    let generated = summary.summary_date.format(TIMESTAMP_FORMAT).to_string();
    let mut md = String::new();

    // Header
    md.push_str("# Job Tracking Status Report\n\n");
    md.push_str(&format!("**Generated:** {}\n\n", generated));

    md.push_str("## Overview\n");
    md.push_str(&format!("- **Total Jobs Tracked:** {}\n", summary.total_jobs));
    md.push_str(&format!(
        "- **Recent Activity** (last 7 days): {} jobs\n",
        summary.recent_activity
    ));
    md.push_str(&format!("- **New Jobs Today:** {}\n", summary.new_jobs_today));

    // Known statuses in lifecycle order, then anything else the store holds
    md.push_str("\n## Status Breakdown\n");
    for status in JobStatus::ALL {
        let count = summary
            .status_breakdown
            .get(status.as_str())
            .copied()
            .unwrap_or(0);
        if count > 0 {
            md.push_str(&format!("- **{}:** {}\n", title_case(status.as_str()), count));
        }
    }
    for (status, count) in &summary.status_breakdown {
        let known = JobStatus::ALL.iter().any(|s| s.as_str() == status);
        if !known && *count > 0 {
            md.push_str(&format!("- **{}:** {}\n", title_case(status), count));
        }
    }

    md.push_str("\n## Company Breakdown\n");
    for (company, count) in &summary.company_breakdown {
        md.push_str(&format!("- **{}:** {} jobs\n", company, count));
    }

    if !new_jobs.is_empty() {
        md.push_str("\n## Recent New Jobs\n");
        for job in new_jobs {
            push_job(&mut md, job, "First Seen", job.date_first_seen.format(JOB_DATE_FORMAT));
        }
    }

    if !modified_jobs.is_empty() {
        md.push_str("\n## Recent Modified Jobs\n");
        for job in modified_jobs {
            push_job(&mut md, job, "Last Updated", job.date_last_seen.format(JOB_DATE_FORMAT));
        }
    }

    // Footer
    md.push_str("\n---\n");
    md.push_str(&format!("*Report generated by jobwatch on {}*\n", generated));

    md
}

fn push_job(md: &mut String, job: &JobRecord, date_label: &str, date: impl std::fmt::Display) {
    md.push_str(&format!("### {}\n", job.job_title));
    md.push_str(&format!("- **Company:** {}\n", job.company_name));
    md.push_str(&format!("- **Location:** {}\n", job.location));
    md.push_str(&format!("- **{}:** {}\n", date_label, date));
    md.push_str(&format!("- **Apply:** {}\n\n", job.url));
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn summary(statuses: &[(&str, u64)], companies: &[(&str, u64)]) -> StatusSummary {
        let status_breakdown: BTreeMap<String, u64> =
            statuses.iter().map(|(s, c)| (s.to_string(), *c)).collect();
        StatusSummary {
            total_jobs: status_breakdown.values().sum(),
            status_breakdown,
            company_breakdown: companies.iter().map(|(s, c)| (s.to_string(), *c)).collect(),
            recent_activity: 2,
            new_jobs_today: 1,
            summary_date: Utc.with_ymd_and_hms(2026, 5, 4, 7, 15, 0).unwrap(),
        }
    }

    #[test]
    fn test_status_order_is_canonical_then_others() {
        let md = render(
            &summary(
                &[("removed", 1), ("archived", 4), ("new", 2), ("seen", 0)],
                &[],
            ),
            &[],
            &[],
        );

        let new = md.find("- **New:** 2").unwrap();
        let removed = md.find("- **Removed:** 1").unwrap();
        let archived = md.find("- **Archived:** 4").unwrap();
        assert!(new < removed && removed < archived);
        assert!(!md.contains("**Seen:**"));
    }

    #[test]
    fn test_overview_and_footer() {
        let md = render(&summary(&[("new", 3)], &[("Globex", 1), ("Acme", 2)]), &[], &[]);

        assert!(md.starts_with("# Job Tracking Status Report\n"));
        assert!(md.contains("**Generated:** 2026-05-04 07:15:00 UTC"));
        assert!(md.contains("- **Total Jobs Tracked:** 3"));
        assert!(md.contains("- **New Jobs Today:** 1"));
        assert!(md.find("**Acme:** 2 jobs").unwrap() < md.find("**Globex:** 1 jobs").unwrap());
        assert!(!md.contains("## Recent New Jobs"));
        assert!(!md.contains("## Recent Modified Jobs"));
        assert!(md.ends_with("*Report generated by jobwatch on 2026-05-04 07:15:00 UTC*\n"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("modified"), "Modified");
        assert_eq!(title_case(""), "");
    }
}
