//! # Draft Sessions
//!
//! A [`DraftSession`] is the state of one create or edit dialog. It is created
//! fresh each time a dialog opens and dropped when the dialog closes, so nothing
//! leaks between a cancelled edit and the next create. Editing a draft never
//! touches the collection it came from; the only way out is [`DraftSession::commit`],
//! which yields a typed record for the collection store to send.

use crate::error::{DeskError, Result};
use crate::model::{Entity, RecordId};
use crate::validation::{validate, validate_field, FormValues, ValidationResult};
use chrono::NaiveDateTime;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Edit(RecordId),
}

#[derive(Debug, Clone)]
pub struct DraftSession<E: Entity> {
    mode: DraftMode,
    values: FormValues,
    inline: ValidationResult,
    now: NaiveDateTime,
    _entity: PhantomData<E>,
}

impl<E: Entity> DraftSession<E> {
    /// A blank draft with every field clear of errors.
    pub fn create(now: NaiveDateTime) -> Self {
        Self {
            mode: DraftMode::Create,
            values: FormValues::new(),
            inline: ValidationResult::cleared(E::SCHEMA),
            now,
            _entity: PhantomData,
        }
    }

    /// A draft seeded with a copy of `record`'s values.
    pub fn edit(record: &E, now: NaiveDateTime) -> Self {
        Self {
            mode: DraftMode::Edit(record.id()),
            values: record.to_form(),
            inline: ValidationResult::cleared(E::SCHEMA),
            now,
            _entity: PhantomData,
        }
    }

    pub fn mode(&self) -> DraftMode {
        self.mode
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Inline verdicts, updated field by field as values are set.
    pub fn inline_errors(&self) -> &ValidationResult {
        &self.inline
    }

    /// Stores a raw value and re-checks that field alone.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let rule = E::SCHEMA
            .iter()
            .find(|r| r.field == field)
            .ok_or_else(|| {
                DeskError::Api(format!(
                    "Unknown field '{}' for {} (expected one of: {})",
                    field,
                    E::KIND,
                    field_names::<E>()
                ))
            })?;

        self.values.set(field, value);
        let verdict = validate_field(rule.rule, rule.field, self.values.get(field), self.now);
        self.inline.record(field, verdict);
        Ok(())
    }

    /// Whole-form validation over the current values.
    pub fn validate(&self) -> ValidationResult {
        validate(&self.values, E::SCHEMA, self.now)
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_valid()
    }

    /// Consumes the session, producing the record to send.
    ///
    /// Edits keep the original id; creates carry id `0`.
    pub fn commit(self) -> Result<E> {
        let result = self.validate();
        if !result.is_valid() {
            return Err(DeskError::ValidationRejected(result));
        }

        let mut record = E::from_form(&self.values)?;
        if let DraftMode::Edit(id) = self.mode {
            record.set_id(id);
        }
        Ok(record)
    }
}

fn field_names<E: Entity>() -> String {
    E::SCHEMA
        .iter()
        .map(|r| r.field)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Customer, Product, Sale};
    use crate::validation::parse_date;

    fn now() -> NaiveDateTime {
        parse_date("2024-03-15T09:00:00").unwrap()
    }

    #[test]
    fn new_draft_starts_clear_but_not_submittable() {
        let draft = DraftSession::<Customer>::create(now());
        assert!(draft.inline_errors().is_valid());
        assert!(!draft.can_submit());
        assert_eq!(draft.mode(), DraftMode::Create);
    }

    #[test]
    fn set_validates_only_the_edited_field() {
        let mut draft = DraftSession::<Product>::create(now());
        draft.set("price", "0").unwrap();

        assert!(draft.inline_errors().has_error("price"));
        assert!(!draft.inline_errors().has_error("name"));

        draft.set("price", "0.01").unwrap();
        assert!(!draft.inline_errors().has_error("price"));
    }

    #[test]
    fn inline_and_whole_form_verdicts_match() {
        let mut draft = DraftSession::<Sale>::create(now());
        draft.set("customerId", "x").unwrap();
        draft.set("dateSold", "2024-03-16").unwrap();

        let whole = draft.validate();
        for field in ["customerId", "dateSold"] {
            assert_eq!(whole.verdict(field), draft.inline_errors().verdict(field));
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut draft = DraftSession::<Customer>::create(now());
        let err = draft.set("email", "a@b.c").unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn commit_rejects_invalid_drafts() {
        let mut draft = DraftSession::<Customer>::create(now());
        draft.set("name", "Alice").unwrap();

        match draft.commit() {
            Err(DeskError::ValidationRejected(result)) => {
                assert_eq!(result.failed_fields(), vec!["address"]);
            }
            other => panic!("expected validation rejection, got {:?}", other),
        }
    }

    #[test]
    fn edit_keeps_the_id_and_leaves_the_source_alone() {
        let mut original = Customer::new("Alice", "1 Main St");
        original.set_id(4);

        let mut draft = DraftSession::edit(&original, now());
        draft.set("address", "2 High St").unwrap();
        let committed = draft.commit().unwrap();

        assert_eq!(committed.id, 4);
        assert_eq!(committed.address, "2 High St");
        assert_eq!(original.address, "1 Main St");
    }

    #[test]
    fn create_commit_has_no_id() {
        let mut draft = DraftSession::<Sale>::create(now());
        draft.set("customerId", "1").unwrap();
        draft.set("productId", "2").unwrap();
        draft.set("storeId", "3").unwrap();
        draft.set("dateSold", "2024-03-15").unwrap();

        let sale = draft.commit().unwrap();
        assert_eq!(sale.id, 0);
        assert_eq!(sale.store_id, 3);
    }
}
