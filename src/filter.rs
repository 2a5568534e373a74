use crate::models::{FilterCriteria, FilterOutcome, Notice, OpportunityRecord, RankedResult};

pub const DEFAULT_RECOMMENDED_LIMIT: usize = 5;

/// Narrows a catalog by the listing criteria and flags the recommended tier.
///
/// The tier is positional: the first `recommended_limit` survivors in catalog
/// order are recommended. There is no relevance score yet.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    recommended_limit: usize,
    apply_skills_filter: bool,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self {
            recommended_limit: DEFAULT_RECOMMENDED_LIMIT,
            apply_skills_filter: true,
        }
    }
}

impl FilterEngine {
    pub fn new(recommended_limit: usize, apply_skills_filter: bool) -> Self {
        Self {
            recommended_limit,
            apply_skills_filter,
        }
    }

    pub fn matches(&self, record: &OpportunityRecord, criteria: &FilterCriteria) -> bool {
        let education = lowered(&criteria.education_query);
        let sector = lowered(&criteria.sector_query);
        let location = lowered(&criteria.location_query);

        if let Some(query) = education {
            if !record
                .required_education
                .iter()
                .any(|requirement| contains_lowered(requirement, &query))
            {
                return false;
            }
        }

        if let Some(query) = sector {
            if !contains_lowered(&record.sector, &query) {
                return false;
            }
        }

        if let Some(query) = location {
            if !contains_lowered(&record.location, &query) {
                return false;
            }
        }

        if self.apply_skills_filter {
            let terms = skill_terms(&criteria.skills_query);
            if !terms.is_empty()
                && !terms.iter().any(|term| {
                    record
                        .skill_tags
                        .iter()
                        .any(|tag| contains_lowered(tag, term))
                })
            {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, catalog: &[OpportunityRecord], criteria: &FilterCriteria) -> FilterOutcome {
        let survivors: Vec<&OpportunityRecord> = catalog
            .iter()
            .filter(|record| self.matches(record, criteria))
            .collect();

        let recommended = survivors.len().min(self.recommended_limit);
        let (top, rest) = survivors.split_at(recommended);

        let results: Vec<RankedResult> = top
            .iter()
            .map(|record| ranked(record, true))
            .chain(rest.iter().map(|record| ranked(record, false)))
            .collect();

        tracing::debug!(
            catalog = catalog.len(),
            matched = results.len(),
            recommended,
            "filters applied"
        );

        FilterOutcome {
            matched: results.len(),
            recommended,
            results,
        }
    }
}

pub fn apply_filters(catalog: &[OpportunityRecord], criteria: &FilterCriteria) -> FilterOutcome {
    FilterEngine::default().apply(catalog, criteria)
}

/// Restores the unfiltered listing; nothing is recommended until the next
/// filter submission.
pub fn reset_filters(catalog: &[OpportunityRecord]) -> Vec<RankedResult> {
    catalog.iter().map(|record| ranked(record, false)).collect()
}

impl FilterOutcome {
    pub fn notice(&self) -> Notice {
        Notice::filters_applied(self.matched, self.recommended)
    }
}

fn ranked(record: &OpportunityRecord, is_recommended: bool) -> RankedResult {
    let mut record = record.clone();
    record.is_recommended = is_recommended;
    RankedResult {
        record,
        is_recommended,
    }
}

fn lowered(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

fn contains_lowered(haystack: &str, lowered_query: &str) -> bool {
    haystack.to_lowercase().contains(lowered_query)
}

fn skill_terms(query: &str) -> Vec<String> {
    query
        .split(',')
        .filter_map(lowered)
        .collect()
}
