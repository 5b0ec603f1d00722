use crate::collection::PageTable;
use crate::model::{Entity, RecordId, SelectOption};
use crate::pagination::PageSize;

pub mod config;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod options;
pub mod show;
pub mod update;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A single record laid out as `(column, value)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetail {
    pub id: RecordId,
    pub title: String,
    pub fields: Vec<(String, String)>,
}

impl RecordDetail {
    pub fn of<E: Entity>(record: &E) -> Self {
        let fields = E::COLUMNS
            .iter()
            .map(|c| c.to_string())
            .zip(record.cells())
            .collect();
        Self {
            id: record.id(),
            title: format!("{} #{}", E::KIND, record.id()),
            fields,
        }
    }

    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub table: Option<PageTable>,
    pub record: Option<RecordDetail>,
    pub options: Vec<SelectOption>,
    pub config: Option<Vec<(String, String)>>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_table(mut self, table: PageTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_record(mut self, record: RecordDetail) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_config(mut self, entries: Vec<(String, String)>) -> Self {
        self.config = Some(entries);
        self
    }
}

/// Which page of a table to show. Unset fields keep the screen's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub page: Option<usize>,
    pub page_size: Option<PageSize>,
}

/// A `field=value` pair typed into a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub field: String,
    pub value: String,
}

impl FieldAssignment {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}
