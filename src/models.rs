use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub location: String,
    pub duration_label: String,
    pub stipend_label: String,
    /// First entry is the requirement shown on the listing card.
    pub required_education: Vec<String>,
    pub skill_tags: Vec<String>,
    pub sector: String,
    pub application_deadline_label: String,
    pub open_positions: u32,
    /// Mirrors `RankedResult::is_recommended`; never read from or written to
    /// serialized catalogs.
    #[serde(skip)]
    pub is_recommended: bool,
}

impl OpportunityRecord {
    pub fn display_requirement(&self) -> Option<&str> {
        self.required_education.first().map(String::as_str)
    }
}

/// User input from the listing filter form. Values are trimmed on the way in;
/// an empty value means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub education_query: String,
    pub skills_query: String,
    pub sector_query: String,
    pub location_query: String,
}

impl FilterCriteria {
    pub fn new(
        education: Option<&str>,
        skills: Option<&str>,
        sector: Option<&str>,
        location: Option<&str>,
    ) -> Self {
        let clean = |value: Option<&str>| value.map(str::trim).unwrap_or_default().to_string();
        Self {
            education_query: clean(education),
            skills_query: clean(skills),
            sector_query: clean(sector),
            location_query: clean(location),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.education_query.is_empty()
            && self.skills_query.is_empty()
            && self.sector_query.is_empty()
            && self.location_query.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub record: OpportunityRecord,
    pub is_recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub results: Vec<RankedResult>,
    pub matched: usize,
    pub recommended: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Transient user-facing message, the terminal stand-in for a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn filters_applied(matched: usize, recommended: usize) -> Self {
        Self::info(
            "Filters Applied",
            format!(
                "Found {matched} matching internships. Top {recommended} recommended for you."
            ),
        )
    }

    pub fn login_required() -> Self {
        Self::info("Login Required", "Please login to apply for internships.")
    }

    pub fn backend_not_connected(action: &str) -> Self {
        Self::destructive(
            format!("{action} Unavailable"),
            "The authentication backend is not connected yet. Please try again later.",
        )
    }

    pub fn heard(utterance: &str) -> Self {
        Self::info("Command Recognized", format!("You said: \"{utterance}\""))
    }

    pub fn emit(&self) {
        match self.variant {
            NoticeVariant::Default => {
                tracing::debug!(title = %self.title, "{}", self.description)
            }
            NoticeVariant::Destructive => {
                tracing::debug!(title = %self.title, destructive = true, "{}", self.description)
            }
        }
        println!("[{}] {}", self.title, self.description);
    }
}
