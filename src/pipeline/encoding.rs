//! Categorical encoding against fixed, complete domains.
//!
//! Each categorical column maps its values to integer codes through a lookup
//! table built once from the column's full domain. The table is shipped inside
//! the model artifact so inference always uses the mapping the model was
//! trained with. Codes never depend on the values present in a single request.

use super::data::{CategoricalField, FeatureRecord, FEATURE_NAMES};
use crate::error::{DepositorError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Lookup table from category string to integer code, per categorical column.
///
/// The code of a value is its position in the column's class list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoricalEncoder {
    classes: BTreeMap<String, Vec<String>>,
}

impl Default for CategoricalEncoder {
    fn default() -> Self {
        Self::from_domains()
    }
}

impl CategoricalEncoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        CategoricalEncoder {
            classes: BTreeMap::new(),
        }
    }

    /// Build the encoder from the built-in domain of every categorical field.
    ///
    /// Classes are sorted by byte value, which is the order a label encoder
    /// fit on the complete training column assigns.
    pub fn from_domains() -> Self {
        let mut encoder = Self::new();
        for field in CategoricalField::ALL {
            encoder.fit(field, field.domain().iter().copied());
        }
        encoder
    }

    /// Fit one column from the full set of values observed for it.
    ///
    /// Duplicates are collapsed and the remaining classes sorted.
    pub fn fit<'a, I>(&mut self, field: CategoricalField, values: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(str::to_string).collect();
        classes.sort();
        classes.dedup();
        self.classes.insert(field.name().to_string(), classes);
    }

    /// Ordered classes for a column.
    pub fn classes(&self, field: CategoricalField) -> Option<&[String]> {
        self.classes.get(field.name()).map(Vec::as_slice)
    }

    /// Integer code for `value` in `field`.
    pub fn encode(&self, field: CategoricalField, value: &str) -> Result<u32> {
        let classes = self.classes(field).ok_or_else(|| {
            DepositorError::artifact_invalid(format!("no encoding for column `{}`", field))
        })?;

        classes
            .iter()
            .position(|c| c == value)
            .map(|idx| idx as u32)
            .ok_or_else(|| DepositorError::UnknownCategory {
                field: field.name().to_string(),
                value: value.to_string(),
                expected: classes.join(", "),
            })
    }

    /// Category string for `code` in `field`.
    pub fn decode(&self, field: CategoricalField, code: u32) -> Option<&str> {
        self.classes(field)
            .and_then(|classes| classes.get(code as usize))
            .map(String::as_str)
    }

    /// Encode a record into the numeric feature vector the model consumes.
    ///
    /// Every categorical value is checked before any number is produced, so an
    /// out-of-domain value never reaches the model.
    pub fn transform(&self, record: &FeatureRecord) -> Result<Array1<f64>> {
        let code = |field| self.encode(field, record.categorical(field)).map(f64::from);

        let features = vec![
            f64::from(record.age),
            code(CategoricalField::Job)?,
            code(CategoricalField::Marital)?,
            code(CategoricalField::Education)?,
            code(CategoricalField::Default)?,
            code(CategoricalField::Housing)?,
            code(CategoricalField::Loan)?,
            code(CategoricalField::Contact)?,
            code(CategoricalField::Month)?,
            code(CategoricalField::DayOfWeek)?,
            f64::from(record.duration),
            f64::from(record.campaign),
            f64::from(record.pdays),
            f64::from(record.previous),
            code(CategoricalField::Poutcome)?,
            record.emp_var_rate,
            record.cons_price_idx,
            record.cons_conf_idx,
            record.euribor3m,
            f64::from(record.nr_employed),
        ];
        debug_assert_eq!(features.len(), FEATURE_NAMES.len());

        Ok(Array1::from(features))
    }

    /// Check that the table covers every categorical column and every choice
    /// the form can submit, without duplicate classes.
    pub fn validate(&self) -> Result<()> {
        for field in CategoricalField::ALL {
            let classes = self.classes(field).ok_or_else(|| {
                DepositorError::artifact_invalid(format!("no encoding for column `{}`", field))
            })?;

            let mut seen = HashSet::new();
            if let Some(dup) = classes.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(DepositorError::artifact_invalid(format!(
                    "duplicate class {:?} in column `{}`",
                    dup, field
                )));
            }

            if let Some(missing) = field.domain().iter().find(|v| !seen.contains(**v)) {
                return Err(DepositorError::artifact_invalid(format!(
                    "column `{}` has no code for form choice {:?}",
                    field, missing
                )));
            }

            if let Some(extra) = classes.iter().find(|c| !field.domain().contains(&c.as_str())) {
                return Err(DepositorError::artifact_invalid(format!(
                    "column `{}` has class {:?} outside its domain",
                    field, extra
                )));
            }
        }

        if let Some(extra) = self
            .classes
            .keys()
            .find(|name| CategoricalField::from_name(name).is_none())
        {
            return Err(DepositorError::artifact_invalid(format!(
                "encoding for unknown column `{}`",
                extra
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_contiguous_from_zero() {
        let encoder = CategoricalEncoder::from_domains();
        for field in CategoricalField::ALL {
            let mut codes: Vec<u32> = field
                .domain()
                .iter()
                .map(|v| encoder.encode(field, v).unwrap())
                .collect();
            codes.sort_unstable();
            let expected: Vec<u32> = (0..field.domain().len() as u32).collect();
            assert_eq!(codes, expected, "column {}", field);
        }
    }

    #[test]
    fn test_lexicographic_order() {
        let encoder = CategoricalEncoder::from_domains();
        assert_eq!(encoder.encode(CategoricalField::Marital, "divorced").unwrap(), 0);
        assert_eq!(encoder.encode(CategoricalField::Marital, "married").unwrap(), 1);
        assert_eq!(encoder.encode(CategoricalField::Marital, "single").unwrap(), 2);
        assert_eq!(encoder.encode(CategoricalField::Marital, "unknown").unwrap(), 3);
        assert_eq!(encoder.encode(CategoricalField::Month, "apr").unwrap(), 0);
        assert_eq!(encoder.encode(CategoricalField::Month, "sep").unwrap(), 11);
        assert_eq!(encoder.encode(CategoricalField::Job, "admin.").unwrap(), 0);
        assert_eq!(encoder.encode(CategoricalField::Job, "unknown").unwrap(), 11);
    }

    #[test]
    fn test_encoding_is_stable_across_requests() {
        let first = CategoricalEncoder::from_domains();
        let second = CategoricalEncoder::from_domains();
        for field in CategoricalField::ALL {
            for value in field.domain() {
                assert_eq!(
                    first.encode(field, value).unwrap(),
                    second.encode(field, value).unwrap()
                );
                assert_eq!(
                    first.encode(field, value).unwrap(),
                    first.encode(field, value).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_single_record_does_not_collapse_codes() {
        let encoder = CategoricalEncoder::from_domains();
        let mut record = FeatureRecord::default();
        record.job = "student".to_string();
        let student = encoder.transform(&record).unwrap();
        record.job = "retired".to_string();
        let retired = encoder.transform(&record).unwrap();

        assert_eq!(student[1], 8.0);
        assert_eq!(retired[1], 5.0);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let encoder = CategoricalEncoder::from_domains();
        let mut record = FeatureRecord::default();
        record.job = "astronaut".to_string();

        let err = encoder.transform(&record).unwrap_err();
        match err {
            DepositorError::UnknownCategory { field, value, .. } => {
                assert_eq!(field, "job");
                assert_eq!(value, "astronaut");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_transform_default_record() {
        let encoder = CategoricalEncoder::from_domains();
        let features = encoder.transform(&FeatureRecord::default()).unwrap();

        assert_eq!(features.len(), FEATURE_NAMES.len());
        assert_eq!(features[0], 30.0);
        assert_eq!(features[2], 2.0); // single
        assert_eq!(features[10], 180.0);
        assert_eq!(features[12], 999.0);
        assert_eq!(features[19], 5000.0);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let encoder = CategoricalEncoder::from_domains();
        let code = encoder.encode(CategoricalField::Education, "high.school").unwrap();
        assert_eq!(encoder.decode(CategoricalField::Education, code), Some("high.school"));
        assert_eq!(encoder.decode(CategoricalField::Education, 99), None);
    }

    #[test]
    fn test_validate_detects_incomplete_table() {
        assert!(CategoricalEncoder::from_domains().validate().is_ok());

        let mut encoder = CategoricalEncoder::from_domains();
        encoder.fit(CategoricalField::Contact, ["cellular"]);
        assert!(encoder.validate().is_err());

        let mut encoder = CategoricalEncoder::new();
        encoder.fit(CategoricalField::Job, CategoricalField::Job.domain().iter().copied());
        assert!(encoder.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_classes_outside_domain() {
        let mut encoder = CategoricalEncoder::from_domains();
        let mut jobs = CategoricalField::Job.domain().to_vec();
        jobs.push("astronaut");
        encoder.fit(CategoricalField::Job, jobs);

        let err = encoder.validate().unwrap_err();
        assert!(err.to_string().contains("astronaut"));
    }

    #[test]
    fn test_serialized_layout() {
        let encoder = CategoricalEncoder::from_domains();
        let json = serde_json::to_value(&encoder).unwrap();
        assert_eq!(json["contact"], serde_json::json!(["cellular", "telephone"]));

        let restored: CategoricalEncoder = serde_json::from_value(json).unwrap();
        assert_eq!(restored, encoder);
    }
}
