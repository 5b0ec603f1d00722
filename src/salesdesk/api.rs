//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every salesdesk operation, regardless of the UI driving it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** an [`EntityKind`] to the screen that owns it
//!   (`CollectionStore<Customer>`, `CollectionStore<Product>`,
//!   `CollectionStore<Store>` or `SaleStore`)
//! - **Normalizes inputs** (`field=value` strings into [`FieldAssignment`]s,
//!   the wall clock into the `now` that date rules compare against)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O of its own and formats nothing for a terminal.
//!
//! ## Generic Over Remote
//!
//! `DeskApi<R: Remote>` is generic over the backend:
//! - Production: `DeskApi<HttpRemote>`
//! - Testing: `DeskApi<InMemoryRemote>`

use crate::collection::{CollectionStore, SaleStore};
use crate::commands;
use crate::error::{DeskError, Result};
use crate::model::{Customer, EntityKind, Product, RecordId, Sale, Store};
use crate::pagination::{PageSize, Pager};
use crate::remote::Remote;
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Runs `$body` with `$screen` bound to the screen type for `$kind`.
macro_rules! with_screen {
    ($kind:expr, $screen:ident => $body:expr) => {
        match $kind {
            EntityKind::Customers => {
                type $screen = CollectionStore<Customer>;
                $body
            }
            EntityKind::Products => {
                type $screen = CollectionStore<Product>;
                $body
            }
            EntityKind::Stores => {
                type $screen = CollectionStore<Store>;
                $body
            }
            EntityKind::Sales => {
                type $screen = SaleStore;
                $body
            }
        }
    };
}

/// The main API facade for salesdesk operations.
pub struct DeskApi<R: Remote> {
    remote: R,
    config_dir: PathBuf,
    page_size: PageSize,
}

impl<R: Remote> DeskApi<R> {
    pub fn new(remote: R, config_dir: PathBuf, page_size: PageSize) -> Self {
        Self {
            remote,
            config_dir,
            page_size,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn list_records(
        &self,
        kind: EntityKind,
        request: commands::ListRequest,
    ) -> Result<commands::CmdResult> {
        let pager = self.pager();
        with_screen!(kind, S => commands::list::run::<S, R>(&self.remote, pager, request))
    }

    pub fn show_record(&self, kind: EntityKind, id: RecordId) -> Result<commands::CmdResult> {
        match kind {
            EntityKind::Customers => commands::show::run::<Customer, R>(&self.remote, id),
            EntityKind::Products => commands::show::run::<Product, R>(&self.remote, id),
            EntityKind::Stores => commands::show::run::<Store, R>(&self.remote, id),
            EntityKind::Sales => commands::show::run::<Sale, R>(&self.remote, id),
        }
    }

    pub fn create_record<A: AsRef<str>>(
        &mut self,
        kind: EntityKind,
        assignments: &[A],
    ) -> Result<commands::CmdResult> {
        let assignments = parse_assignments(assignments)?;
        let pager = self.pager();
        let now = now();
        with_screen!(kind, S => commands::create::run::<S, R>(&mut self.remote, pager, &assignments, now))
    }

    pub fn update_record<A: AsRef<str>>(
        &mut self,
        kind: EntityKind,
        id: RecordId,
        assignments: &[A],
    ) -> Result<commands::CmdResult> {
        let assignments = parse_assignments(assignments)?;
        let pager = self.pager();
        let now = now();
        with_screen!(kind, S => commands::update::run::<S, R>(&mut self.remote, pager, id, &assignments, now))
    }

    pub fn delete_record(&mut self, kind: EntityKind, id: RecordId) -> Result<commands::CmdResult> {
        let pager = self.pager();
        with_screen!(kind, S => commands::delete::run::<S, R>(&mut self.remote, pager, id))
    }

    pub fn options(&self, kind: EntityKind) -> Result<commands::CmdResult> {
        commands::options::run(&self.remote, kind)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    fn pager(&self) -> Pager {
        Pager::new(self.page_size)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Splits `field=value` strings. The value may be empty, the field may not.
fn parse_assignments<A: AsRef<str>>(inputs: &[A]) -> Result<Vec<FieldAssignment>> {
    inputs
        .iter()
        .map(|input| {
            let input = input.as_ref();
            match input.split_once('=') {
                Some((field, value)) if !field.trim().is_empty() => {
                    Ok(FieldAssignment::new(field.trim(), value))
                }
                _ => Err(DeskError::Api(format!(
                    "Expected field=value, got: {}",
                    input
                ))),
            }
        })
        .collect()
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::create::rejection_messages;
pub use commands::{CmdMessage, CmdResult, FieldAssignment, ListRequest, MessageLevel, RecordDetail};
