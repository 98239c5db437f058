use std::fmt;

use super::error::InvalidFilterError;
use super::model::{Dataset, PassStatus, Record};

/// Selector value meaning "no constraint"; always offered first.
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// Selection for the `passed` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassedFilter {
    #[default]
    All,
    Only(PassStatus),
}

impl PassedFilter {
    /// Selector options in display order.
    pub const OPTIONS: [PassedFilter; 3] = [
        PassedFilter::All,
        PassedFilter::Only(PassStatus::Passed),
        PassedFilter::Only(PassStatus::NotPassed),
    ];

    pub fn label(self) -> &'static str {
        match self {
            PassedFilter::All => ALL,
            PassedFilter::Only(status) => status.label(),
        }
    }

    /// Parse a selector value. Only the exact selector labels are accepted.
    pub fn parse(value: &str) -> Result<Self, InvalidFilterError> {
        Self::OPTIONS
            .into_iter()
            .find(|opt| opt.label() == value)
            .ok_or_else(|| InvalidFilterError {
                filter: "passed",
                value: value.to_string(),
            })
    }

    pub fn matches(self, status: PassStatus) -> bool {
        match self {
            PassedFilter::All => true,
            PassedFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Selection for the `parent_education_level` column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EducationFilter {
    #[default]
    All,
    Level(String),
}

impl EducationFilter {
    pub fn label(&self) -> &str {
        match self {
            EducationFilter::All => ALL,
            EducationFilter::Level(level) => level,
        }
    }

    pub fn matches(&self, level: &str) -> bool {
        match self {
            EducationFilter::All => true,
            EducationFilter::Level(wanted) => wanted == level,
        }
    }
}

// ---------------------------------------------------------------------------
// FilterState – current selections plus their legal domains
// ---------------------------------------------------------------------------

/// The two filter selections of a session and the parent-education domain
/// they are validated against. The domain is taken from the dataset once and
/// never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    passed: PassedFilter,
    parent_education: EducationFilter,
    education_domain: Vec<String>,
}

impl FilterState {
    /// `{All, All}` over the dataset's observed education levels.
    pub fn new(dataset: &Dataset) -> Self {
        Self::with_domain(dataset.education_levels().to_vec())
    }

    pub fn with_domain(education_domain: Vec<String>) -> Self {
        FilterState {
            passed: PassedFilter::All,
            parent_education: EducationFilter::All,
            education_domain,
        }
    }

    pub fn passed(&self) -> PassedFilter {
        self.passed
    }

    pub fn parent_education(&self) -> &EducationFilter {
        &self.parent_education
    }

    /// Select a pass status by its selector label. On error nothing changes.
    pub fn set_passed_filter(&mut self, value: &str) -> Result<(), InvalidFilterError> {
        self.passed = PassedFilter::parse(value)?;
        Ok(())
    }

    /// Select an education level by its selector label. On error nothing
    /// changes.
    pub fn set_parent_education_filter(&mut self, value: &str) -> Result<(), InvalidFilterError> {
        self.parent_education = if value == ALL {
            EducationFilter::All
        } else if self.education_domain.iter().any(|d| d == value) {
            EducationFilter::Level(value.to_string())
        } else {
            return Err(InvalidFilterError {
                filter: "parent_education",
                value: value.to_string(),
            });
        };
        Ok(())
    }

    /// Options for the pass-status selector, `All` first.
    pub fn passed_options(&self) -> Vec<&'static str> {
        PassedFilter::OPTIONS.iter().map(|o| o.label()).collect()
    }

    /// Options for the parent-education selector, `All` first, then the
    /// domain in first-occurrence order.
    pub fn parent_education_options(&self) -> Vec<&str> {
        std::iter::once(ALL)
            .chain(self.education_domain.iter().map(String::as_str))
            .collect()
    }

    /// Conjunction of both predicates.
    pub fn matches(&self, record: &Record) -> bool {
        self.passed.matches(record.passed)
            && self.parent_education.matches(&record.parent_education_level)
    }

    /// Records passing the current filters, in dataset order.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        dataset
            .records()
            .iter()
            .filter(|r| self.matches(r))
            .collect()
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "passed={}, parent_education={}",
            self.passed.label(),
            self.parent_education.label()
        )
    }
}
