//! # Remote Collaborator
//!
//! Records are owned by a REST backend. The [`Remote`] trait is the client's view
//! of it: one resource per [`EntityKind`] under `/api/<Resource>`, each with list,
//! get, create, update and delete, plus the derived read endpoints.
//!
//! ## Implementations
//!
//! - [`http::HttpRemote`]: talks JSON over HTTP to a running server.
//! - [`memory::InMemoryRemote`]: keeps tables in memory and enforces the same
//!   contract (sequential ids, id checks on update, foreign keys on sales).
//!   Used by tests and for offline runs.
//!
//! ## Error Contract
//!
//! | Outcome                        | Error                                  |
//! |--------------------------------|----------------------------------------|
//! | 404                            | [`DeskError::NotFound`]                |
//! | other 4xx                      | [`DeskError::RemoteValidationRejected`]|
//! | transport failure, 5xx         | [`DeskError::RemoteUnavailable`]       |
//!
//! ## Ordering
//!
//! `list` makes no ordering promise. Callers that need "most recent first" sort by
//! id, which the backend assigns in increasing order.
//!
//! [`DeskError::NotFound`]: crate::error::DeskError::NotFound
//! [`DeskError::RemoteValidationRejected`]: crate::error::DeskError::RemoteValidationRejected
//! [`DeskError::RemoteUnavailable`]: crate::error::DeskError::RemoteUnavailable

use crate::error::Result;
use crate::model::{Entity, EntityKind, RecordId, SaleView, SelectOption};

pub mod http;
pub mod memory;

pub trait Remote {
    /// `GET /api/E`
    fn list<E: Entity>(&self) -> Result<Vec<E>>;

    /// `GET /api/E/{id}`
    fn get<E: Entity>(&self, id: RecordId) -> Result<E>;

    /// `POST /api/E`; returns the record with its assigned id.
    fn create<E: Entity>(&mut self, record: &E) -> Result<E>;

    /// `PUT /api/E/{id}`; the body carries the same id.
    fn update<E: Entity>(&mut self, id: RecordId, record: &E) -> Result<()>;

    /// `DELETE /api/E/{id}`; returns the deleted record.
    fn delete<E: Entity>(&mut self, id: RecordId) -> Result<E>;

    /// `GET /api/E/options` for customers, products and stores.
    fn options(&self, kind: EntityKind) -> Result<Vec<SelectOption>>;

    /// `GET /api/Sales/view`
    fn sales_view(&self) -> Result<Vec<SaleView>>;
}
