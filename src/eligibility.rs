use clap::ValueEnum;
use serde::Serialize;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 25;
pub const MAX_FAMILY_INCOME_LAKHS: f64 = 8.0;

/// Highest completed or ongoing qualification, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    BelowTwelfth,
    Twelfth,
    Iti,
    Diploma,
    Graduate,
    PostGraduate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantProfile {
    pub age: u8,
    pub annual_family_income_lakhs: f64,
    pub education: EducationLevel,
    pub speaks_english_or_hindi: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleResult {
    pub rule: &'static str,
    pub passed: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityReport {
    pub rules: Vec<RuleResult>,
}

impl EligibilityReport {
    pub fn is_eligible(&self) -> bool {
        self.rules.iter().all(|rule| rule.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleResult> {
        self.rules.iter().filter(|rule| !rule.passed)
    }
}

fn rule(name: &'static str, passed: bool, reason: impl FnOnce() -> String) -> RuleResult {
    RuleResult {
        rule: name,
        passed,
        reason: (!passed).then(reason),
    }
}

pub fn check_eligibility(profile: &ApplicantProfile) -> EligibilityReport {
    let age_ok = (MIN_AGE..=MAX_AGE).contains(&profile.age);
    let income = profile.annual_family_income_lakhs;
    let income_valid = income.is_finite() && income >= 0.0;
    let income_ok = income_valid && income <= MAX_FAMILY_INCOME_LAKHS;
    let education_ok = profile.education >= EducationLevel::Twelfth;

    EligibilityReport {
        rules: vec![
            rule("age", age_ok, || {
                format!(
                    "age {} is outside {MIN_AGE}-{MAX_AGE} years",
                    profile.age
                )
            }),
            rule("income", income_ok, || {
                if income_valid {
                    format!(
                        "annual family income {income:.2} lakh exceeds {MAX_FAMILY_INCOME_LAKHS} lakh"
                    )
                } else {
                    "annual family income must be a non-negative amount in lakh".to_string()
                }
            }),
            rule("education", education_ok, || {
                "minimum qualification is 12th standard or equivalent".to_string()
            }),
            rule("language", profile.speaks_english_or_hindi, || {
                "basic proficiency in English or Hindi is required".to_string()
            }),
        ],
    }
}
