//! Survey microdata
//!
//! One yearly survey extract is read into a `MicrodataBatch`, consumed by a
//! calculator and dropped. Person files carry age, enrollment and attainment;
//! household files carry income.

use std::fmt;

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::{extract_f64_column, extract_i64_column};

/// Age in years
pub const AGE_COLUMN: &str = "AGEP";
/// School enrollment code
pub const ENROLLMENT_COLUMN: &str = "SCH";
/// Educational attainment code
pub const ATTAINMENT_COLUMN: &str = "SCHL";
/// Household income
pub const HOUSEHOLD_INCOME_COLUMN: &str = "HINCP";

/// Enrollment codes above this value mean the person attends school
const NOT_ENROLLED_MAX_CODE: i64 = 1;

/// Survey record level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurveyDomain {
    /// Person-level records
    Person,
    /// Household-level records
    Household,
}

impl SurveyDomain {
    /// File name prefix of this domain's yearly extracts
    #[must_use]
    pub const fn file_prefix(self) -> &'static str {
        match self {
            Self::Person => "data_ppr",
            Self::Household => "data_hpr",
        }
    }
}

impl fmt::Display for SurveyDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person => write!(f, "person"),
            Self::Household => write!(f, "household"),
        }
    }
}

/// A single survey response
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MicrodataRecord {
    /// Age in years
    pub age: Option<i64>,
    /// School enrollment code
    pub enrollment: Option<i64>,
    /// Educational attainment code
    pub attainment_code: Option<i64>,
    /// Household income (household records only)
    pub household_income: Option<f64>,
}

impl MicrodataRecord {
    /// Person record
    #[must_use]
    pub const fn person(age: Option<i64>, enrollment: Option<i64>, attainment_code: Option<i64>) -> Self {
        Self {
            age,
            enrollment,
            attainment_code,
            household_income: None,
        }
    }

    /// Household record
    #[must_use]
    pub const fn household(income: Option<f64>) -> Self {
        Self {
            age: None,
            enrollment: None,
            attainment_code: None,
            household_income: income,
        }
    }

    /// Whether the person is enrolled in school; a missing code counts as not enrolled
    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        self.enrollment.is_some_and(|code| code > NOT_ENROLLED_MAX_CODE)
    }
}

/// All records of one domain for one survey year
#[derive(Debug, Clone, PartialEq)]
pub struct MicrodataBatch {
    /// Record level
    pub domain: SurveyDomain,
    /// Survey year
    pub year: i32,
    /// Survey responses
    pub records: Vec<MicrodataRecord>,
}

impl MicrodataBatch {
    /// Create a batch from records
    #[must_use]
    pub const fn new(domain: SurveyDomain, year: i32, records: Vec<MicrodataRecord>) -> Self {
        Self {
            domain,
            year,
            records,
        }
    }

    /// Build a batch from the record batches of one yearly extract
    ///
    /// Person extracts must contain `AGEP`, `SCH` and `SCHL`; household extracts
    /// must contain `HINCP`. Column names are matched case-insensitively and
    /// other columns are ignored.
    ///
    /// # Arguments
    /// * `domain` - Record level of the extract
    /// * `year` - Survey year of the extract
    /// * `batches` - Table contents
    pub fn from_record_batches(
        domain: SurveyDomain,
        year: i32,
        batches: &[RecordBatch],
    ) -> Result<Self> {
        let mut records = Vec::new();
        for batch in batches {
            match domain {
                SurveyDomain::Person => {
                    let ages = extract_i64_column(batch, AGE_COLUMN, true)?.unwrap_or_default();
                    let enrollment =
                        extract_i64_column(batch, ENROLLMENT_COLUMN, true)?.unwrap_or_default();
                    let attainment =
                        extract_i64_column(batch, ATTAINMENT_COLUMN, true)?.unwrap_or_default();
                    records.extend(
                        ages.into_iter()
                            .zip(enrollment)
                            .zip(attainment)
                            .map(|((age, sch), schl)| MicrodataRecord::person(age, sch, schl)),
                    );
                }
                SurveyDomain::Household => {
                    let incomes = extract_f64_column(batch, HOUSEHOLD_INCOME_COLUMN, true)?
                        .unwrap_or_default();
                    records.extend(incomes.into_iter().map(MicrodataRecord::household));
                }
            }
        }
        Ok(Self::new(domain, year, records))
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Household incomes of the batch, nulls included
    pub fn household_incomes(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records.iter().map(|r| r.household_income)
    }
}
