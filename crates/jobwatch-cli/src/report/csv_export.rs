//! CSV export of job records

use crate::error::Result;
use csv::{QuoteStyle, WriterBuilder};
use jobwatch_common::JobRecord;
use std::io::Write;

/// Column order of every export
pub const CSV_COLUMNS: [&str; 9] = [
    "job_id",
    "company_name",
    "job_title",
    "location",
    "url",
    "description",
    "date_first_seen",
    "date_last_seen",
    "status",
];

/// Exported descriptions keep at most this many characters
pub const DESCRIPTION_LIMIT: usize = 200;

/// Write `jobs` as CSV with every field quoted. Returns the number of rows.
pub fn write_jobs<W: Write>(writer: W, jobs: &[JobRecord]) -> Result<usize> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(CSV_COLUMNS)?;

    for job in jobs {
        let description: String = flatten(&job.description)
            .chars()
            .take(DESCRIPTION_LIMIT)
            .collect();

        wtr.write_record([
            job.job_id.clone(),
            flatten(&job.company_name),
            flatten(&job.job_title),
            flatten(&job.location),
            // Exported verbatim; a rewritten URL no longer resolves
            job.url.clone(),
            description,
            job.date_first_seen.to_rfc3339(),
            job.date_last_seen.to_rfc3339(),
            job.status.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(jobs.len())
}

// Free-text columns lose their commas so naive splitters still line up
fn flatten(value: &str) -> String {
    value.replace(',', ";")
}
