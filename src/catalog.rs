use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::models::OpportunityRecord;

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    title: &str,
    organization: &str,
    location: &str,
    duration: &str,
    stipend: &str,
    education: &[&str],
    skills: &[&str],
    sector: &str,
    deadline: &str,
    positions: u32,
) -> OpportunityRecord {
    OpportunityRecord {
        id: id.to_string(),
        title: title.to_string(),
        organization: organization.to_string(),
        location: location.to_string(),
        duration_label: duration.to_string(),
        stipend_label: stipend.to_string(),
        required_education: education.iter().map(|s| s.to_string()).collect(),
        skill_tags: skills.iter().map(|s| s.to_string()).collect(),
        sector: sector.to_string(),
        application_deadline_label: deadline.to_string(),
        open_positions: positions,
        is_recommended: false,
    }
}

/// Built-in listing used when no external catalog is configured.
pub fn seed_catalog() -> Vec<OpportunityRecord> {
    vec![
        record(
            "1",
            "Software Development Intern",
            "Tech Mahindra",
            "Hyderabad, Telangana",
            "6 months",
            "25,000/month",
            &["Bachelor's in Computer Science", "Programming knowledge"],
            &["Java", "Python", "React", "SQL"],
            "Technology",
            "Jan 15, 2025",
            15,
        ),
        record(
            "2",
            "Digital Marketing Intern",
            "Wipro Limited",
            "Bangalore, Karnataka",
            "4 months",
            "20,000/month",
            &["Bachelor's in Marketing/Commerce", "Basic digital skills"],
            &["SEO", "Social Media", "Content Writing", "Analytics"],
            "Technology",
            "Jan 20, 2025",
            8,
        ),
        record(
            "3",
            "Healthcare Analytics Intern",
            "Apollo Hospitals",
            "Chennai, Tamil Nadu",
            "6 months",
            "22,000/month",
            &["Bachelor's in Life Sciences/Statistics", "Data analysis"],
            &["Excel", "R/Python", "Healthcare Domain", "Statistics"],
            "Healthcare",
            "Jan 25, 2025",
            5,
        ),
        record(
            "4",
            "Financial Analyst Intern",
            "ICICI Bank",
            "Mumbai, Maharashtra",
            "5 months",
            "28,000/month",
            &["Bachelor's in Finance/Commerce", "Financial modeling"],
            &["Excel", "Financial Analysis", "PowerBI", "Communication"],
            "Finance",
            "Feb 1, 2025",
            12,
        ),
        record(
            "5",
            "Manufacturing Process Intern",
            "Tata Steel",
            "Jamshedpur, Jharkhand",
            "6 months",
            "30,000/month",
            &["Bachelor's in Mechanical/Chemical Engineering", "Industrial knowledge"],
            &["CAD", "Process Optimization", "Quality Control", "Safety"],
            "Manufacturing",
            "Feb 5, 2025",
            10,
        ),
        record(
            "6",
            "Education Technology Intern",
            "BYJU'S",
            "Bangalore, Karnataka",
            "4 months",
            "18,000/month",
            &["Bachelor's in Education/Subject expertise", "Teaching interest"],
            &["Content Creation", "Video Editing", "Communication", "Subject Knowledge"],
            "Education",
            "Feb 10, 2025",
            20,
        ),
    ]
}

/// Loads a catalog from `.json` (array of records) or CSV. List columns in CSV
/// are `;`-separated.
pub fn load_catalog(path: &Path) -> Result<Vec<OpportunityRecord>, CatalogError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let records = if is_json {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str::<Vec<OpportunityRecord>>(&raw)?
    } else {
        let reader = csv::Reader::from_path(path)?;
        read_csv(reader)?
    };

    validate_catalog(&records)?;
    tracing::debug!(path = %path.display(), records = records.len(), "catalog loaded");
    Ok(records)
}

fn read_csv<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<Vec<OpportunityRecord>, CatalogError> {
    #[derive(Deserialize)]
    struct CsvRow {
        id: String,
        title: String,
        organization: String,
        location: String,
        duration_label: String,
        stipend_label: String,
        required_education: String,
        skill_tags: String,
        sector: String,
        application_deadline_label: String,
        open_positions: u32,
    }

    let split = |cell: &str| -> Vec<String> {
        cell.split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    };

    let mut records = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        records.push(OpportunityRecord {
            id: row.id.trim().to_string(),
            title: row.title,
            organization: row.organization,
            location: row.location,
            duration_label: row.duration_label,
            stipend_label: row.stipend_label,
            required_education: split(&row.required_education),
            skill_tags: split(&row.skill_tags),
            sector: row.sector,
            application_deadline_label: row.application_deadline_label,
            open_positions: row.open_positions,
            is_recommended: false,
        });
    }

    Ok(records)
}

pub fn validate_catalog(records: &[OpportunityRecord]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for (position, record) in records.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(CatalogError::EmptyId(position));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(CatalogError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}

pub fn find_by_id<'a>(catalog: &'a [OpportunityRecord], id: &str) -> Option<&'a OpportunityRecord> {
    catalog.iter().find(|record| record.id == id)
}
