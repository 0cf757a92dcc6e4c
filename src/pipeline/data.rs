//! Data structures for bank marketing feature records.

use crate::error::{DepositorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names in the order the model consumes them.
pub const FEATURE_NAMES: [&str; 20] = [
    "age",
    "job",
    "marital",
    "education",
    "default",
    "housing",
    "loan",
    "contact",
    "month",
    "day_of_week",
    "duration",
    "campaign",
    "pdays",
    "previous",
    "poutcome",
    "emp.var.rate",
    "cons.price.idx",
    "cons.conf.idx",
    "euribor3m",
    "nr.employed",
];

const JOBS: &[&str] = &[
    "admin.",
    "blue-collar",
    "entrepreneur",
    "housemaid",
    "management",
    "retired",
    "self-employed",
    "services",
    "student",
    "technician",
    "unemployed",
    "unknown",
];
const MARITAL: &[&str] = &["single", "married", "divorced", "unknown"];
const EDUCATION: &[&str] = &[
    "basic.4y",
    "basic.6y",
    "basic.9y",
    "high.school",
    "illiterate",
    "professional.course",
    "university.degree",
    "unknown",
];
const YES_NO_UNKNOWN: &[&str] = &["no", "yes", "unknown"];
const CONTACT: &[&str] = &["cellular", "telephone"];
const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const DAYS: &[&str] = &["mon", "tue", "wed", "thu", "fri"];
const POUTCOME: &[&str] = &["failure", "nonexistent", "success"];

/// The categorical columns of a feature record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Job,
    Marital,
    Education,
    Default,
    Housing,
    Loan,
    Contact,
    Month,
    DayOfWeek,
    Poutcome,
}

impl CategoricalField {
    /// All categorical fields, in feature order.
    pub const ALL: [CategoricalField; 10] = [
        CategoricalField::Job,
        CategoricalField::Marital,
        CategoricalField::Education,
        CategoricalField::Default,
        CategoricalField::Housing,
        CategoricalField::Loan,
        CategoricalField::Contact,
        CategoricalField::Month,
        CategoricalField::DayOfWeek,
        CategoricalField::Poutcome,
    ];

    /// Column name as used in the training data.
    pub fn name(self) -> &'static str {
        match self {
            CategoricalField::Job => "job",
            CategoricalField::Marital => "marital",
            CategoricalField::Education => "education",
            CategoricalField::Default => "default",
            CategoricalField::Housing => "housing",
            CategoricalField::Loan => "loan",
            CategoricalField::Contact => "contact",
            CategoricalField::Month => "month",
            CategoricalField::DayOfWeek => "day_of_week",
            CategoricalField::Poutcome => "poutcome",
        }
    }

    /// Complete domain of the field, in the order the form presents it.
    pub fn domain(self) -> &'static [&'static str] {
        match self {
            CategoricalField::Job => JOBS,
            CategoricalField::Marital => MARITAL,
            CategoricalField::Education => EDUCATION,
            CategoricalField::Default | CategoricalField::Housing | CategoricalField::Loan => {
                YES_NO_UNKNOWN
            }
            CategoricalField::Contact => CONTACT,
            CategoricalField::Month => MONTHS,
            CategoricalField::DayOfWeek => DAYS,
            CategoricalField::Poutcome => POUTCOME,
        }
    }

    /// Look up a field by its column name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw inputs for one prediction request.
///
/// Categorical values are kept as the strings the user selected. The form
/// selectors check them at assembly, and every record is checked again
/// against the artifact's encoding table when it is encoded, so records built
/// directly by library callers are covered too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub age: u32,
    pub job: String,
    pub marital: String,
    pub education: String,
    pub default: String,
    pub housing: String,
    pub loan: String,
    pub contact: String,
    pub month: String,
    pub day_of_week: String,
    pub duration: u32,
    pub campaign: u32,
    pub pdays: u32,
    pub previous: u32,
    pub poutcome: String,
    #[serde(rename = "emp.var.rate")]
    pub emp_var_rate: f64,
    #[serde(rename = "cons.price.idx")]
    pub cons_price_idx: f64,
    #[serde(rename = "cons.conf.idx")]
    pub cons_conf_idx: f64,
    pub euribor3m: f64,
    #[serde(rename = "nr.employed")]
    pub nr_employed: u32,
}

impl Default for FeatureRecord {
    /// The record the form shows before the user touches anything.
    fn default() -> Self {
        FeatureRecord {
            age: 30,
            job: "admin.".to_string(),
            marital: "single".to_string(),
            education: "basic.4y".to_string(),
            default: "no".to_string(),
            housing: "no".to_string(),
            loan: "no".to_string(),
            contact: "cellular".to_string(),
            month: "jan".to_string(),
            day_of_week: "mon".to_string(),
            duration: 180,
            campaign: 2,
            pdays: 999,
            previous: 0,
            poutcome: "failure".to_string(),
            emp_var_rate: 0.0,
            cons_price_idx: 93.0,
            cons_conf_idx: -30.0,
            euribor3m: 1.0,
            nr_employed: 5000,
        }
    }
}

impl FeatureRecord {
    /// Value of a categorical column.
    pub fn categorical(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Job => &self.job,
            CategoricalField::Marital => &self.marital,
            CategoricalField::Education => &self.education,
            CategoricalField::Default => &self.default,
            CategoricalField::Housing => &self.housing,
            CategoricalField::Loan => &self.loan,
            CategoricalField::Contact => &self.contact,
            CategoricalField::Month => &self.month,
            CategoricalField::DayOfWeek => &self.day_of_week,
            CategoricalField::Poutcome => &self.poutcome,
        }
    }

    pub(crate) fn categorical_mut(&mut self, field: CategoricalField) -> &mut String {
        match field {
            CategoricalField::Job => &mut self.job,
            CategoricalField::Marital => &mut self.marital,
            CategoricalField::Education => &mut self.education,
            CategoricalField::Default => &mut self.default,
            CategoricalField::Housing => &mut self.housing,
            CategoricalField::Loan => &mut self.loan,
            CategoricalField::Contact => &mut self.contact,
            CategoricalField::Month => &mut self.month,
            CategoricalField::DayOfWeek => &mut self.day_of_week,
            CategoricalField::Poutcome => &mut self.poutcome,
        }
    }

    /// Render the record as a one-row CSV table with the training column names.
    pub fn to_table(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(self)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| DepositorError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
