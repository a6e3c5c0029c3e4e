//! Pre-flight form validation.
//!
//! Validation runs before the submission sequence starts and issues no
//! network calls; a failure here never reaches the orchestrator's upload
//! steps.

use atelier_error::{AtelierResult, ValidationError, ValidationErrorKind};
use derive_getters::Getters;
use serde_json::{Map, Value as JsonValue};

/// Declared bounds for a numeric field.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct NumericBound {
    /// Field name
    field: String,
    /// Inclusive lower bound
    min: f64,
    /// Inclusive upper bound
    max: f64,
}

impl NumericBound {
    /// Declare bounds for a field.
    pub fn new(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            field: field.into(),
            min,
            max,
        }
    }
}

/// The validation rules of one form module.
///
/// # Example
///
/// ```
/// use atelier_staging::{FormRules, NumericBound};
///
/// let rules = FormRules::default()
///     .with_required_fields(vec!["title".to_string()])
///     .with_require_assets(true)
///     .with_numeric_bounds(vec![NumericBound::new("price", 0.0, 1_000_000.0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct FormRules {
    /// Text fields that must be present and non-empty
    required_fields: Vec<String>,
    /// Whether at least one staged asset is required
    require_assets: bool,
    /// Bounds for numeric fields
    numeric_bounds: Vec<NumericBound>,
    /// Category / foreign-key selections that must be present
    required_selections: Vec<String>,
}

impl FormRules {
    /// Validate form fields and staged-asset count against the rules.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a validation error.
    #[tracing::instrument(skip(self, fields))]
    pub fn validate(
        &self,
        fields: &Map<String, JsonValue>,
        staged_asset_count: usize,
    ) -> AtelierResult<()> {
        for name in &self.required_fields {
            let present = match fields.get(name) {
                Some(JsonValue::String(text)) => !text.trim().is_empty(),
                Some(JsonValue::Null) | None => false,
                Some(_) => true,
            };
            if !present {
                return Err(
                    ValidationError::new(ValidationErrorKind::MissingField(name.clone())).into(),
                );
            }
        }

        if self.require_assets && staged_asset_count == 0 {
            return Err(ValidationError::new(ValidationErrorKind::NoAssets).into());
        }

        for bound in &self.numeric_bounds {
            let Some(value) = fields.get(bound.field()) else {
                continue;
            };
            let Some(number) = value.as_f64() else {
                return Err(ValidationError::new(ValidationErrorKind::NotNumeric(
                    bound.field().clone(),
                ))
                .into());
            };
            if number < *bound.min() || number > *bound.max() {
                return Err(ValidationError::new(ValidationErrorKind::OutOfBounds(
                    bound.field().clone(),
                    number,
                    *bound.min(),
                    *bound.max(),
                ))
                .into());
            }
        }

        for name in &self.required_selections {
            let present = matches!(
                fields.get(name),
                Some(value) if !value.is_null()
                    && value.as_str().is_none_or(|s| !s.trim().is_empty())
            );
            if !present {
                return Err(ValidationError::new(ValidationErrorKind::MissingSelection(
                    name.clone(),
                ))
                .into());
            }
        }

        Ok(())
    }
}
