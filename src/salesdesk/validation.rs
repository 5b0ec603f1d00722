//! # Form Validation
//!
//! Forms hold raw text per field, the way an input widget or a `--set field=value`
//! argument delivers it. Each entity declares a schema: a list of [`FieldRule`]s
//! drawn from a small vocabulary of [`Rule`]s.
//!
//! There are two ways to validate, and they must never disagree:
//!
//! - [`validate_field`] checks one value against one rule. This is the only place
//!   rule semantics live. Draft sessions call it on every edit to show inline errors.
//! - [`validate`] runs [`validate_field`] for every field in a schema and collects
//!   the verdicts. Its result decides whether a form may be submitted.
//!
//! Every field gets an entry in the [`ValidationResult`], passing or not. A passing
//! entry has `has_error == false` and no message.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// The checks a form field can be subject to. All of them reject a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    RequiredString,
    RequiredPositiveNumber,
    RequiredInteger,
    /// A date (or timestamp) no later than the validation instant.
    RequiredDateNotAfter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
}

impl FieldRule {
    pub const fn new(field: &'static str, rule: Rule) -> Self {
        Self { field, rule }
    }
}

/// Raw, unparsed field values of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// The trimmed value of `field`, or `None` when missing or blank.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Outcome of validating a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub has_error: bool,
    pub message: Option<String>,
}

impl FieldVerdict {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            has_error: true,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    fields: BTreeMap<String, FieldVerdict>,
}

impl ValidationResult {
    /// A result with a passing entry for every field of `schema`.
    pub fn cleared(schema: &[FieldRule]) -> Self {
        let fields = schema
            .iter()
            .map(|r| (r.field.to_string(), FieldVerdict::ok()))
            .collect();
        Self { fields }
    }

    pub fn record(&mut self, field: &str, verdict: FieldVerdict) {
        self.fields.insert(field.to_string(), verdict);
    }

    pub fn verdict(&self, field: &str) -> Option<&FieldVerdict> {
        self.fields.get(field)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.message.as_deref())
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|v| v.has_error)
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|v| !v.has_error)
    }

    pub fn failed_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, v)| v.has_error)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(k, v)| v.message.as_deref().map(|m| (k.as_str(), m)))
    }

    /// One line listing every failing field's message.
    pub fn summary(&self) -> String {
        self.errors()
            .map(|(_, message)| message.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Checks one raw value against one rule.
pub fn validate_field(rule: Rule, field: &str, value: Option<&str>, now: NaiveDateTime) -> FieldVerdict {
    let value = match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v,
        None => return FieldVerdict::error(format!("\"{}\" is required", field)),
    };

    match rule {
        Rule::RequiredString => FieldVerdict::ok(),
        Rule::RequiredPositiveNumber => match value.parse::<f64>() {
            Ok(n) if !n.is_finite() => {
                FieldVerdict::error(format!("\"{}\" must be a number", field))
            }
            Ok(n) if n <= 0.0 => {
                FieldVerdict::error(format!("\"{}\" must be a positive number", field))
            }
            Ok(_) => FieldVerdict::ok(),
            Err(_) => FieldVerdict::error(format!("\"{}\" must be a number", field)),
        },
        Rule::RequiredInteger => match value.parse::<i64>() {
            Ok(_) => FieldVerdict::ok(),
            Err(_) => FieldVerdict::error(format!("\"{}\" must be an integer", field)),
        },
        Rule::RequiredDateNotAfter => match parse_date(value) {
            Some(date) if date > now => FieldVerdict::error(format!(
                "\"{}\" must be on or before {}",
                field,
                now.format("%Y-%m-%d")
            )),
            Some(_) => FieldVerdict::ok(),
            None => FieldVerdict::error(format!("\"{}\" must be a valid date", field)),
        },
    }
}

/// Checks every field of `schema`, reporting all failures at once.
pub fn validate(form: &FormValues, schema: &[FieldRule], now: NaiveDateTime) -> ValidationResult {
    let mut result = ValidationResult::default();
    for rule in schema {
        let verdict = validate_field(rule.rule, rule.field, form.get(rule.field), now);
        result.record(rule.field, verdict);
    }
    result
}

/// Accepts `YYYY-MM-DD` (read as midnight) or a full `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    value.parse::<NaiveDateTime>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const PRODUCT: &[FieldRule] = &[
        FieldRule::new("name", Rule::RequiredString),
        FieldRule::new("price", Rule::RequiredPositiveNumber),
    ];

    const SALE: &[FieldRule] = &[
        FieldRule::new("customerId", Rule::RequiredInteger),
        FieldRule::new("productId", Rule::RequiredInteger),
        FieldRule::new("storeId", Rule::RequiredInteger),
        FieldRule::new("dateSold", Rule::RequiredDateNotAfter),
    ];

    fn now() -> NaiveDateTime {
        parse_date("2024-03-15T14:30:00").unwrap()
    }

    fn full_sale() -> FormValues {
        FormValues::new()
            .with("customerId", "1")
            .with("productId", "2")
            .with("storeId", "3")
            .with("dateSold", "2024-03-01")
    }

    #[test]
    fn complete_form_has_no_errors() {
        let result = validate(&full_sale(), SALE, now());
        assert!(result.is_valid());
        assert!(result.failed_fields().is_empty());
        for rule in SALE {
            let verdict = result.verdict(rule.field).unwrap();
            assert!(!verdict.has_error);
            assert_eq!(verdict.message, None);
        }
    }

    #[test]
    fn removing_one_field_fails_only_that_field() {
        for rule in SALE {
            let mut form = full_sale();
            form.remove(rule.field);
            let result = validate(&form, SALE, now());
            assert_eq!(result.failed_fields(), vec![rule.field]);
            assert!(result.message(rule.field).unwrap().contains("is required"));
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let form = FormValues::new().with("name", "   ").with("price", "3");
        let result = validate(&form, PRODUCT, now());
        assert_eq!(result.failed_fields(), vec!["name"]);
    }

    #[test]
    fn positive_number_rule() {
        let check = |v: &str| validate_field(Rule::RequiredPositiveNumber, "price", Some(v), now());
        assert!(check("0").has_error);
        assert!(check("-5").has_error);
        assert!(check("abc").has_error);
        assert!(check("NaN").has_error);
        assert!(!check("0.01").has_error);
        assert!(!check("12").has_error);
    }

    #[test]
    fn integer_rule() {
        let check = |v: &str| validate_field(Rule::RequiredInteger, "storeId", Some(v), now());
        assert!(!check("7").has_error);
        assert!(check("1.5").has_error);
        assert!(check("seven").has_error);
        assert!(check("").has_error);
    }

    #[test]
    fn date_rule_rejects_the_future() {
        let now = now();
        let today = now.date().format("%Y-%m-%d").to_string();
        let yesterday = (now - Duration::days(1)).date().format("%Y-%m-%d").to_string();
        let tomorrow = (now + Duration::days(1)).date().format("%Y-%m-%d").to_string();
        let check = |v: &str| validate_field(Rule::RequiredDateNotAfter, "dateSold", Some(v), now);

        assert!(!check(&today).has_error);
        assert!(!check(&yesterday).has_error);
        assert!(check(&tomorrow).has_error);
        assert!(check("2024-03-15T14:30:01").has_error);
        assert!(!check("2024-03-15T14:30:00").has_error);
        assert!(check("15/03/2024").has_error);
    }

    #[test]
    fn single_field_and_whole_form_agree() {
        let values = ["", "0", "-1", "2.5", "x", "2024-01-01", "2099-01-01"];
        for rule in PRODUCT.iter().chain(SALE) {
            for value in values {
                let form = FormValues::new().with(rule.field, value);
                let whole = validate(&form, &[*rule], now());
                let single = validate_field(rule.rule, rule.field, form.get(rule.field), now());
                assert_eq!(whole.verdict(rule.field), Some(&single));
            }
        }
    }

    #[test]
    fn summary_lists_every_failure() {
        let result = validate(&FormValues::new(), PRODUCT, now());
        let summary = result.summary();
        assert!(summary.contains("\"name\" is required"));
        assert!(summary.contains("\"price\" is required"));
    }
}
