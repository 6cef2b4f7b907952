//! Catalogue of the employee attributes offered by the input collector.
//!
//! Describes each raw attribute's domain and the default the collection form
//! starts from. The prediction pipeline never consults the catalogue: values
//! outside a domain are still encoded (unknown categories become all-zero
//! indicators). [`AttributeCatalog::check`] exists for callers that want to
//! warn about such values before submitting a record.

use std::fmt;

use super::record::{AttributeValue, RawRecord};

/// Domain of a raw attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttributeDomain {
    /// Continuous or integer slider in `[min, max]`.
    Range { min: f64, max: f64, default: f64 },
    /// Discrete numeric levels; the first level is the default.
    Levels(&'static [i64]),
    /// Categorical labels; the first label is the default.
    Categories(&'static [&'static str]),
}

/// One raw attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttributeSpec {
    /// Record key, also the indicator column prefix for categoricals.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub domain: AttributeDomain,
}

impl AttributeSpec {
    /// Returns `true` for categorical attributes.
    pub fn is_categorical(&self) -> bool {
        matches!(self.domain, AttributeDomain::Categories(_))
    }

    /// Value the collection form starts from.
    pub fn default_value(&self) -> AttributeValue {
        match self.domain {
            AttributeDomain::Range { default, .. } => AttributeValue::Numeric(default),
            AttributeDomain::Levels(levels) => AttributeValue::Numeric(levels[0] as f64),
            AttributeDomain::Categories(labels) => AttributeValue::Categorical(labels[0].to_owned()),
        }
    }

    /// Check a value against this attribute's domain.
    pub fn check(&self, value: &AttributeValue) -> Option<CatalogIssue> {
        let attribute = self.name;
        match (self.domain, value) {
            (AttributeDomain::Range { min, max, .. }, AttributeValue::Numeric(x)) => {
                (!(min..=max).contains(x)).then_some(CatalogIssue::OutOfRange {
                    attribute,
                    value: *x,
                    min,
                    max,
                })
            }
            (AttributeDomain::Levels(levels), AttributeValue::Numeric(x)) => {
                let known = levels.iter().any(|&level| level as f64 == *x);
                (!known).then_some(CatalogIssue::UnknownLevel {
                    attribute,
                    value: *x,
                })
            }
            (AttributeDomain::Categories(labels), AttributeValue::Categorical(label)) => {
                (!labels.contains(&label.as_str())).then(|| CatalogIssue::UnknownCategory {
                    attribute,
                    value: label.clone(),
                })
            }
            (AttributeDomain::Categories(_), AttributeValue::Numeric(_)) => {
                Some(CatalogIssue::KindMismatch {
                    attribute,
                    expected: "categorical",
                })
            }
            (_, AttributeValue::Categorical(_)) => Some(CatalogIssue::KindMismatch {
                attribute,
                expected: "numeric",
            }),
        }
    }
}

/// A record value the collection form would not have produced.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogIssue {
    OutOfRange {
        attribute: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    UnknownLevel {
        attribute: &'static str,
        value: f64,
    },
    UnknownCategory {
        attribute: &'static str,
        value: String,
    },
    KindMismatch {
        attribute: &'static str,
        expected: &'static str,
    },
    Missing {
        attribute: &'static str,
    },
    Unrecognized {
        attribute: String,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                attribute,
                value,
                min,
                max,
            } => write!(f, "{attribute} = {value} is outside [{min}, {max}]"),
            Self::UnknownLevel { attribute, value } => {
                write!(f, "{attribute} = {value} is not a known level")
            }
            Self::UnknownCategory { attribute, value } => {
                write!(f, "{attribute} = {value:?} is not a known category")
            }
            Self::KindMismatch {
                attribute,
                expected,
            } => write!(f, "{attribute} should be {expected}"),
            Self::Missing { attribute } => write!(f, "{attribute} is missing"),
            Self::Unrecognized { attribute } => write!(f, "{attribute} is not a known attribute"),
        }
    }
}

const fn range(name: &'static str, label: &'static str, min: f64, max: f64, default: f64) -> AttributeSpec {
    AttributeSpec {
        name,
        label,
        domain: AttributeDomain::Range { min, max, default },
    }
}

const fn levels(name: &'static str, label: &'static str, levels: &'static [i64]) -> AttributeSpec {
    AttributeSpec {
        name,
        label,
        domain: AttributeDomain::Levels(levels),
    }
}

const fn categories(
    name: &'static str,
    label: &'static str,
    labels: &'static [&'static str],
) -> AttributeSpec {
    AttributeSpec {
        name,
        label,
        domain: AttributeDomain::Categories(labels),
    }
}

/// Attributes collected for each employee.
pub const EMPLOYEE_ATTRIBUTES: &[AttributeSpec] = &[
    range("Age", "Age", 18.0, 60.0, 30.0),
    range("DistanceFromHome", "Distance From Home (km)", 1.0, 30.0, 5.0),
    range("MonthlyIncome", "Monthly Income", 1000.0, 20000.0, 5000.0),
    range("HourlyRate", "Hourly Rate", 10.0, 100.0, 50.0),
    range("DailyRate", "Daily Rate", 100.0, 1500.0, 800.0),
    range("MonthlyRate", "Monthly Rate", 1000.0, 30000.0, 15000.0),
    levels("JobLevel", "Job Level", &[1, 2, 3, 4, 5]),
    levels("Education", "Education Level", &[1, 2, 3, 4, 5]),
    range("JobSatisfaction", "Job Satisfaction (1-4)", 1.0, 4.0, 3.0),
    range("WorkLifeBalance", "Work Life Balance (1-4)", 1.0, 4.0, 3.0),
    range("EnvironmentSatisfaction", "Environment Satisfaction (1-4)", 1.0, 4.0, 3.0),
    range("RelationshipSatisfaction", "Relationship Satisfaction (1-4)", 1.0, 4.0, 3.0),
    range("JobInvolvement", "Job Involvement (1-4)", 1.0, 4.0, 3.0),
    range("NumCompaniesWorked", "Number of Companies Worked", 0.0, 10.0, 2.0),
    range("PercentSalaryHike", "Percent Salary Hike", 0.0, 30.0, 10.0),
    levels("PerformanceRating", "Performance Rating", &[1, 2, 3, 4]),
    range("TrainingTimesLastYear", "Training Times Last Year", 0.0, 10.0, 3.0),
    range("TotalWorkingYears", "Total Working Years", 0.0, 40.0, 10.0),
    range("YearsAtCompany", "Years at Company", 0.0, 40.0, 5.0),
    range("YearsInCurrentRole", "Years in Current Role", 0.0, 20.0, 3.0),
    range("YearsSinceLastPromotion", "Years Since Last Promotion", 0.0, 15.0, 1.0),
    range("YearsWithCurrManager", "Years With Current Manager", 0.0, 20.0, 2.0),
    categories(
        "BusinessTravel",
        "Business Travel",
        &["Travel_Rarely", "Travel_Frequently", "Non-Travel"],
    ),
    categories(
        "Department",
        "Department",
        &["Sales", "Research & Development", "Human Resources"],
    ),
    categories(
        "EducationField",
        "Education Field",
        &["Life Sciences", "Medical", "Marketing", "Technical Degree", "Other"],
    ),
    categories("Gender", "Gender", &["Male", "Female"]),
    categories(
        "JobRole",
        "Job Role",
        &[
            "Sales Executive",
            "Research Scientist",
            "Laboratory Technician",
            "Manufacturing Director",
            "Healthcare Representative",
            "Manager",
            "Sales Representative",
            "Research Director",
            "Human Resources",
        ],
    ),
    categories("MaritalStatus", "Marital Status", &["Single", "Married", "Divorced"]),
    categories("OverTime", "OverTime", &["Yes", "No"]),
];

/// Lookup over a static attribute table.
#[derive(Clone, Copy, Debug)]
pub struct AttributeCatalog {
    attributes: &'static [AttributeSpec],
}

impl Default for AttributeCatalog {
    fn default() -> Self {
        Self::employee()
    }
}

impl AttributeCatalog {
    /// The employee attribute table.
    pub fn employee() -> Self {
        Self {
            attributes: EMPLOYEE_ATTRIBUTES,
        }
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the catalogue has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Look up an attribute by record key.
    pub fn get(&self, name: &str) -> Option<&'static AttributeSpec> {
        self.attributes.iter().find(|spec| spec.name == name)
    }

    /// Iterate over attributes in form order.
    pub fn iter(&self) -> impl Iterator<Item = &'static AttributeSpec> {
        self.attributes.iter()
    }

    /// Record holding every attribute's default value.
    pub fn default_record(&self) -> RawRecord {
        self.attributes
            .iter()
            .map(|spec| (spec.name, spec.default_value()))
            .collect()
    }

    /// List values the collection form would not have produced.
    ///
    /// Reports, in form order, missing and out-of-domain attributes, then
    /// record keys the catalogue does not know (in name order).
    pub fn check(&self, record: &RawRecord) -> Vec<CatalogIssue> {
        let mut issues: Vec<CatalogIssue> = self
            .attributes
            .iter()
            .filter_map(|spec| match record.get(spec.name) {
                Some(value) => spec.check(value),
                None => Some(CatalogIssue::Missing {
                    attribute: spec.name,
                }),
            })
            .collect();

        issues.extend(
            record
                .iter()
                .filter(|(name, _)| self.get(name).is_none())
                .map(|(name, _)| CatalogIssue::Unrecognized {
                    attribute: name.to_owned(),
                }),
        );

        issues
    }
}
