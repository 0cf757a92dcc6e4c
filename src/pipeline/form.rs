//! Input form schema and record assembly.
//!
//! The form is a fixed table of widgets: range sliders for numeric fields and
//! fixed-choice selectors for categorical ones. Assembly starts from the
//! widget defaults and applies user overrides, refusing anything a slider or
//! selector could not produce.

use super::data::{CategoricalField, FeatureRecord};
use crate::error::{DepositorError, Result};
use tracing::debug;

/// How a field is entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    /// Numeric range slider. Integer sliders only accept whole numbers.
    Slider {
        min: f64,
        max: f64,
        default: f64,
        integer: bool,
    },
    /// Fixed-choice selector over a categorical domain; the first choice is
    /// preselected.
    Select(CategoricalField),
}

/// One form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Record field name
    pub name: &'static str,
    /// Label shown to the user
    pub label: &'static str,
    pub widget: Widget,
}

const fn int(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: Widget::Slider {
            min,
            max,
            default,
            integer: true,
        },
    }
}

const fn float(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: Widget::Slider {
            min,
            max,
            default,
            integer: false,
        },
    }
}

const fn select(field: CategoricalField, name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: Widget::Select(field),
    }
}

/// The form, in feature order.
pub static FORM: [FieldSpec; 20] = [
    int("age", "Age", 18.0, 95.0, 30.0),
    select(CategoricalField::Job, "job", "Job"),
    select(CategoricalField::Marital, "marital", "Marital Status"),
    select(CategoricalField::Education, "education", "Education"),
    select(CategoricalField::Default, "default", "Has credit in default?"),
    select(CategoricalField::Housing, "housing", "Has housing loan?"),
    select(CategoricalField::Loan, "loan", "Has personal loan?"),
    select(CategoricalField::Contact, "contact", "Contact Communication Type"),
    select(CategoricalField::Month, "month", "Last Contact Month"),
    select(CategoricalField::DayOfWeek, "day_of_week", "Day of Week"),
    int("duration", "Last Contact Duration (seconds)", 0.0, 5000.0, 180.0),
    int("campaign", "Number of Contacts During Campaign", 1.0, 50.0, 2.0),
    int("pdays", "Days Since Last Contact", 0.0, 999.0, 999.0),
    int("previous", "Number of Contacts Before Campaign", 0.0, 50.0, 0.0),
    select(CategoricalField::Poutcome, "poutcome", "Previous Outcome"),
    float("emp_var_rate", "Employment Variation Rate", -3.5, 1.5, 0.0),
    float("cons_price_idx", "Consumer Price Index", 92.0, 95.0, 93.0),
    float("cons_conf_idx", "Consumer Confidence Index", -50.0, -20.0, -30.0),
    float("euribor3m", "Euribor 3-Month Rate", 0.0, 5.0, 1.0),
    int("nr_employed", "Number of Employees", 4900.0, 5200.0, 5000.0),
];

/// The form schema: every field in feature order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormSchema;

impl FormSchema {
    /// All fields, in feature order.
    pub fn fields() -> &'static [FieldSpec] {
        &FORM
    }

    /// Look up one field; see [`find_field`].
    pub fn field(name: &str) -> Option<&'static FieldSpec> {
        find_field(name)
    }
}

/// Find a field by name. Hyphens and dots are read as underscores, so
/// `day-of-week` and `emp.var.rate` both resolve.
pub fn find_field(name: &str) -> Option<&'static FieldSpec> {
    let normalized = name.replace(&['-', '.'][..], "_");
    FORM.iter().find(|spec| spec.name == normalized)
}

impl FieldSpec {
    /// Human-readable domain, e.g. `[18, 95]` or `no | yes | unknown`.
    pub fn domain_text(&self) -> String {
        match self.widget {
            Widget::Slider {
                min, max, integer, ..
            } => {
                if integer {
                    format!("[{}, {}]", min, max)
                } else {
                    format!("[{:.1}, {:.1}]", min, max)
                }
            }
            Widget::Select(field) => field.domain().join(" | "),
        }
    }

    /// Default value as the form shows it.
    pub fn default_text(&self) -> String {
        match self.widget {
            Widget::Slider {
                default, integer, ..
            } => {
                if integer {
                    format!("{}", default)
                } else {
                    format!("{:.1}", default)
                }
            }
            Widget::Select(field) => field.domain()[0].to_string(),
        }
    }

    fn parse_number(&self, raw: &str, min: f64, max: f64, integer: bool) -> Result<f64> {
        let value: f64 = raw.trim().parse().map_err(|_| {
            DepositorError::invalid_input(format!("`{}` expects a number, got {:?}", self.name, raw))
        })?;
        if !value.is_finite() || (integer && value.fract() != 0.0) {
            return Err(DepositorError::invalid_input(format!(
                "`{}` expects {}, got {:?}",
                self.name,
                if integer { "a whole number" } else { "a finite number" },
                raw
            )));
        }
        if value < min || value > max {
            return Err(DepositorError::OutOfRange {
                field: self.name.to_string(),
                value,
                min,
                max,
            });
        }
        Ok(value)
    }

    /// Parse `raw` as this widget would accept it and store it in `record`.
    pub fn apply(&self, record: &mut FeatureRecord, raw: &str) -> Result<()> {
        match self.widget {
            Widget::Slider {
                min, max, integer, ..
            } => {
                let value = self.parse_number(raw, min, max, integer)?;
                set_numeric(record, self.name, value);
            }
            Widget::Select(field) => {
                let choice = field.domain().iter().find(|c| **c == raw).ok_or_else(|| {
                    DepositorError::UnknownCategory {
                        field: self.name.to_string(),
                        value: raw.to_string(),
                        expected: field.domain().join(", "),
                    }
                })?;
                *record.categorical_mut(field) = choice.to_string();
            }
        }
        Ok(())
    }
}

// Slider ranges keep integer values non-negative and well inside u32.
fn set_numeric(record: &mut FeatureRecord, name: &str, value: f64) {
    match name {
        "age" => record.age = value as u32,
        "duration" => record.duration = value as u32,
        "campaign" => record.campaign = value as u32,
        "pdays" => record.pdays = value as u32,
        "previous" => record.previous = value as u32,
        "nr_employed" => record.nr_employed = value as u32,
        "emp_var_rate" => record.emp_var_rate = value,
        "cons_price_idx" => record.cons_price_idx = value,
        "cons_conf_idx" => record.cons_conf_idx = value,
        "euribor3m" => record.euribor3m = value,
        _ => {}
    }
}

/// Assemble one record from the form defaults plus `name = value` overrides.
///
/// The defaults are [`FeatureRecord::default`]. Later overrides of the same
/// field win.
pub fn assemble<I, K, V>(overrides: I) -> Result<FeatureRecord>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut record = FeatureRecord::default();
    for (name, raw) in overrides {
        let (name, raw) = (name.as_ref(), raw.as_ref());
        let spec = find_field(name)
            .ok_or_else(|| DepositorError::invalid_input(format!("unknown field `{}`", name)))?;
        spec.apply(&mut record, raw)?;
        debug!(field = spec.name, value = raw, "form field set");
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::data::FEATURE_NAMES;

    #[test]
    fn test_form_follows_feature_order() {
        for (spec, column) in FORM.iter().zip(FEATURE_NAMES.iter()) {
            assert_eq!(spec.name, column.replace('.', "_"));
        }
    }

    #[test]
    fn test_schema_lists_form_in_order() {
        let fields = FormSchema::fields();
        assert_eq!(fields.len(), FEATURE_NAMES.len());
        assert_eq!(fields[0].label, "Age");
        assert_eq!(fields[14].widget, Widget::Select(CategoricalField::Poutcome));
        assert_eq!(FormSchema::field("nr.employed"), fields.last());
        assert!(FormSchema::field("salary").is_none());
    }

    #[test]
    fn test_widget_defaults_match_default_record() {
        let mut record = FeatureRecord::default();
        for spec in FormSchema::fields() {
            spec.apply(&mut record, &spec.default_text()).unwrap();
        }
        assert_eq!(record, FeatureRecord::default());
        assert_eq!(assemble(Vec::<(&str, &str)>::new()).unwrap(), FeatureRecord::default());
    }

    #[test]
    fn test_assemble_overrides() {
        let record = assemble([
            ("age", "45"),
            ("job", "technician"),
            ("day-of-week", "fri"),
            ("emp.var.rate", "-1.8"),
            ("poutcome", "success"),
        ])
        .unwrap();

        assert_eq!(record.age, 45);
        assert_eq!(record.job, "technician");
        assert_eq!(record.day_of_week, "fri");
        assert_eq!(record.emp_var_rate, -1.8);
        assert_eq!(record.poutcome, "success");
        assert_eq!(record.duration, 180);
    }

    #[test]
    fn test_out_of_range_refused() {
        let err = assemble([("age", "17")]).unwrap_err();
        assert!(matches!(err, DepositorError::OutOfRange { .. }));

        let err = assemble([("cons_conf_idx", "-10")]).unwrap_err();
        assert!(matches!(err, DepositorError::OutOfRange { .. }));
    }

    #[test]
    fn test_bad_numbers_refused() {
        assert!(assemble([("campaign", "two")]).unwrap_err().is_validation());
        assert!(assemble([("campaign", "2.5")]).unwrap_err().is_validation());
        assert!(assemble([("euribor3m", "NaN")]).unwrap_err().is_validation());
    }

    #[test]
    fn test_unknown_choice_and_field_refused() {
        let err = assemble([("job", "astronaut")]).unwrap_err();
        assert!(matches!(err, DepositorError::UnknownCategory { .. }));

        let err = assemble([("salary", "100")]).unwrap_err();
        assert!(matches!(err, DepositorError::InvalidInput { .. }));
    }

    #[test]
    fn test_domain_text() {
        assert_eq!(find_field("age").unwrap().domain_text(), "[18, 95]");
        assert_eq!(
            find_field("contact").unwrap().domain_text(),
            "cellular | telephone"
        );
        assert_eq!(find_field("euribor3m").unwrap().default_text(), "1.0");
    }
}
