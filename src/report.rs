use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{FilterCriteria, RankedResult};

const SKILLS_SHOWN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct SectorSummary {
    pub sector: String,
    pub listings: usize,
    pub open_positions: u64,
}

pub fn summarize_by_sector(results: &[RankedResult]) -> Vec<SectorSummary> {
    let mut map: std::collections::HashMap<&str, (usize, u64)> = std::collections::HashMap::new();

    for result in results {
        let entry = map.entry(result.record.sector.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += u64::from(result.record.open_positions);
    }

    let mut summaries: Vec<SectorSummary> = map
        .into_iter()
        .map(|(sector, (listings, open_positions))| SectorSummary {
            sector: sector.to_string(),
            listings,
            open_positions,
        })
        .collect();

    summaries.sort_by(|a, b| b.listings.cmp(&a.listings).then_with(|| a.sector.cmp(&b.sector)));
    summaries
}

fn skills_line(skills: &[String]) -> String {
    let mut line = skills
        .iter()
        .take(SKILLS_SHOWN)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if skills.len() > SKILLS_SHOWN {
        let _ = write!(line, " (+{} more)", skills.len() - SKILLS_SHOWN);
    }
    line
}

fn criteria_label(criteria: &FilterCriteria) -> String {
    if criteria.is_empty() {
        return "all internships".to_string();
    }

    [
        ("education", &criteria.education_query),
        ("skills", &criteria.skills_query),
        ("sector", &criteria.sector_query),
        ("location", &criteria.location_query),
    ]
    .iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(name, value)| format!("{name} \"{value}\""))
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn render_card(output: &mut String, result: &RankedResult) {
    let record = &result.record;
    let badge = if result.is_recommended {
        " [Recommended]"
    } else {
        ""
    };

    let _ = writeln!(output, "### {}{}", record.title, badge);
    let _ = writeln!(output, "- Organization: {}", record.organization);
    let _ = writeln!(
        output,
        "- Location: {} | Duration: {}",
        record.location, record.duration_label
    );
    let _ = writeln!(
        output,
        "- Positions: {} | Stipend: ₹{}",
        record.open_positions, record.stipend_label
    );
    let _ = writeln!(output, "- Sector: {}", record.sector);
    let _ = writeln!(output, "- Skills: {}", skills_line(&record.skill_tags));
    if let Some(requirement) = record.display_requirement() {
        let _ = writeln!(output, "- Education: {requirement}");
    }
    let _ = writeln!(output, "- Apply by: {}", record.application_deadline_label);
    let _ = writeln!(output, "- Listing id: {}", record.id);
}

pub fn build_report(
    criteria: &FilterCriteria,
    generated_on: NaiveDate,
    results: &[RankedResult],
) -> String {
    let summaries = summarize_by_sector(results);
    let recommended = results.iter().filter(|r| r.is_recommended).count();

    let mut output = String::new();

    let _ = writeln!(output, "# Available Internships");
    let _ = writeln!(
        output,
        "Generated on {} for {}",
        generated_on,
        criteria_label(criteria)
    );
    let _ = writeln!(
        output,
        "{} matching internships, {} recommended.",
        results.len(),
        recommended
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Sector Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No internships match these filters.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} listings ({} open positions)",
                summary.sector, summary.listings, summary.open_positions
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Listings");

    if results.is_empty() {
        let _ = writeln!(output, "No internships match these filters.");
    } else {
        for result in results {
            let _ = writeln!(output);
            render_card(&mut output, result);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_catalog;
    use crate::filter::{apply_filters, reset_filters};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    #[test]
    fn sector_summary_counts_listings_and_positions() {
        let results = reset_filters(&seed_catalog());
        let summaries = summarize_by_sector(&results);
        assert_eq!(summaries[0].sector, "Technology");
        assert_eq!(summaries[0].listings, 2);
        assert_eq!(summaries[0].open_positions, 23);
        assert_eq!(summaries.len(), 5);
    }

    #[test]
    fn sector_positions_do_not_overflow() {
        let mut catalog = seed_catalog();
        catalog[0].open_positions = u32::MAX;
        catalog[1].open_positions = u32::MAX;
        let summaries = summarize_by_sector(&reset_filters(&catalog));
        let technology = summaries.iter().find(|s| s.sector == "Technology").unwrap();
        assert_eq!(technology.open_positions, 2 * u64::from(u32::MAX));

        let report = build_report(&FilterCriteria::default(), today(), &reset_filters(&catalog));
        assert!(report.contains("- Technology: 2 listings (8589934590 open positions)"));
    }

    #[test]
    fn card_truncates_skills_and_shows_first_requirement() {
        let outcome = apply_filters(&seed_catalog(), &FilterCriteria::default());
        let mut card = String::new();
        render_card(&mut card, &outcome.results[0]);
        assert!(card.contains("### Software Development Intern [Recommended]"));
        assert!(card.contains("- Skills: Java, Python, React (+1 more)"));
        assert!(card.contains("- Education: Bachelor's in Computer Science\n"));
        assert!(card.contains("Stipend: ₹25,000/month"));

        let mut last = String::new();
        render_card(&mut last, &outcome.results[5]);
        assert!(!last.contains("[Recommended]"));
    }

    #[test]
    fn report_describes_filters_and_counts() {
        let criteria = FilterCriteria::new(None, None, Some("technology"), None);
        let outcome = apply_filters(&seed_catalog(), &criteria);
        let report = build_report(&criteria, today(), &outcome.results);
        assert!(report.starts_with("# Available Internships\n"));
        assert!(report.contains("Generated on 2025-01-10 for sector \"technology\""));
        assert!(report.contains("2 matching internships, 2 recommended."));
        assert!(report.contains("- Technology: 2 listings (23 open positions)"));
    }

    #[test]
    fn empty_report_says_so() {
        let report = build_report(&FilterCriteria::default(), today(), &[]);
        assert!(report.contains("for all internships"));
        assert!(report.contains("No internships match these filters."));
    }
}
