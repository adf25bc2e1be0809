//! Evaluation of a [`SubmissionSchema`] against a submission.

use regex::Regex;
use report_model::{Submission, ValidationErrors, ValidationResult};
use serde_json::Value;

use crate::issue::Violation;
use crate::patterns::{DATE_REGEX, EMAIL_REGEX, TEL_REGEX, URL_REGEX};
use crate::schema::{FieldKind, FieldRule, SubmissionSchema, SubmitterEmail};

/// Path of the submitter email in error maps.
pub const SUBMITTER_EMAIL_PATH: &str = "submitterEmail";

const SUBMITTER_EMAIL_LABEL: &str = "Email";

/// Dot-joined path of a form field's value.
pub fn field_path(id: &str) -> String {
    format!("data.{id}")
}

/// Validate a submission, collecting every violated field.
///
/// Never fails: all problems are reported in the returned result. When a
/// field violates several constraints the first one is reported for its path.
pub fn validate(schema: &SubmissionSchema, submission: &Submission) -> ValidationResult {
    let violations = check(schema, submission);
    let mut errors = ValidationErrors::new();
    for violation in &violations {
        errors.add(violation.path(), violation.message());
    }
    let result = ValidationResult::from_errors(errors);
    tracing::info!(
        fields = schema.len(),
        invalid = result.error_count(),
        valid = result.is_valid,
        "validated submission"
    );
    result
}

/// All violations of `submission`, in schema order, submitter email last.
///
/// A text field can yield a length and a pattern violation together; the
/// first violation per path is the one [`validate`] reports.
pub fn check(schema: &SubmissionSchema, submission: &Submission) -> Vec<Violation> {
    let mut violations = Vec::new();

    for rule in schema.rules() {
        for violation in check_field(rule, submission.value(&rule.id)) {
            tracing::debug!(field = %rule.id, code = violation.code(), "field rejected");
            violations.push(violation);
        }
    }

    if let Some(violation) = check_submitter_email(
        schema.options().submitter_email,
        submission.submitter_email.as_deref(),
    ) {
        violations.push(violation);
    }

    violations
}

fn check_field(rule: &FieldRule, value: Option<&Value>) -> Vec<Violation> {
    let path = field_path(&rule.id);

    let Some(value) = value.filter(|v| !is_blank(v)) else {
        return rule
            .required
            .then(|| Violation::Required {
                path,
                label: rule.label.clone(),
            })
            .into_iter()
            .collect();
    };

    let mut violations = check_kind(rule, &path, value);
    // An unchecked box is present but does not satisfy "required".
    if violations.is_empty()
        && rule.required
        && matches!(rule.kind, FieldKind::Checkbox)
        && value == &Value::Bool(false)
    {
        violations.push(Violation::Required {
            path,
            label: rule.label.clone(),
        });
    }
    violations
}

/// Violations of the field's kind, in rule order.
fn check_kind(rule: &FieldRule, path: &str, value: &Value) -> Vec<Violation> {
    let path = path.to_string();
    let label = rule.label.clone();

    let violation = match &rule.kind {
        FieldKind::Text {
            min_length,
            max_length,
            pattern,
        } => {
            return check_text(path, label, value, *min_length, *max_length, pattern.as_ref());
        }
        FieldKind::Email => {
            let ok = value.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s));
            (!ok).then_some(Violation::InvalidEmail { path })
        }
        FieldKind::Number { min, max } => check_number(path, label, value, *min, *max),
        FieldKind::Tel => {
            let ok = value.as_str().is_some_and(|s| TEL_REGEX.is_match(s));
            (!ok).then_some(Violation::InvalidPhone { path })
        }
        FieldKind::Url => {
            let ok = value.as_str().is_some_and(|s| URL_REGEX.is_match(s));
            (!ok).then_some(Violation::InvalidUrl { path })
        }
        FieldKind::Date => {
            let ok = value.as_str().is_some_and(|s| DATE_REGEX.is_match(s));
            (!ok).then_some(Violation::InvalidDate { path })
        }
        FieldKind::Checkbox => {
            (!value.is_boolean()).then_some(Violation::NotBoolean { path, label })
        }
        FieldKind::Choice { options } => match (value.as_str(), options) {
            (Some(text), Some(options)) if options.iter().any(|o| o == text) => None,
            (Some(_), None) => None,
            (None, None) => Some(Violation::NotText { path, label }),
            (_, Some(_)) => Some(Violation::InvalidOption {
                path,
                label,
                value: display_value(value),
            }),
        },
    };
    violation.into_iter().collect()
}

/// Length is checked before the pattern; both can fail on the same value.
fn check_text(
    path: String,
    label: String,
    value: &Value,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<&Regex>,
) -> Vec<Violation> {
    let Some(text) = value.as_str() else {
        return vec![Violation::NotText { path, label }];
    };

    let mut violations = Vec::new();
    let length = text.chars().count();
    if let Some(min_length) = min_length
        && length < min_length
    {
        violations.push(Violation::TooShort {
            path: path.clone(),
            label: label.clone(),
            min_length,
        });
    } else if let Some(max_length) = max_length
        && length > max_length
    {
        violations.push(Violation::TooLong {
            path: path.clone(),
            label: label.clone(),
            max_length,
        });
    }
    if let Some(pattern) = pattern
        && !pattern.is_match(text)
    {
        violations.push(Violation::PatternMismatch { path, label });
    }
    violations
}

fn check_number(
    path: String,
    label: String,
    value: &Value,
    min: Option<f64>,
    max: Option<f64>,
) -> Option<Violation> {
    let Some(number) = coerce_number(value) else {
        return Some(Violation::NotNumber { path, label });
    };
    if let Some(min) = min
        && number < min
    {
        return Some(Violation::BelowMinimum { path, label, min });
    }
    if let Some(max) = max
        && number > max
    {
        return Some(Violation::AboveMaximum { path, label, max });
    }
    None
}

fn check_submitter_email(policy: SubmitterEmail, email: Option<&str>) -> Option<Violation> {
    match email.filter(|e| !e.is_empty()) {
        Some(email) if !EMAIL_REGEX.is_match(email) => Some(Violation::InvalidEmail {
            path: SUBMITTER_EMAIL_PATH.to_string(),
        }),
        Some(_) => None,
        None if policy == SubmitterEmail::Required => Some(Violation::Required {
            path: SUBMITTER_EMAIL_PATH.to_string(),
            label: SUBMITTER_EMAIL_LABEL.to_string(),
        }),
        None => None,
    }
}

/// Absent, `null` and `""` all count as "no value".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Numbers pass through; numeric strings are parsed. Anything else fails.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
