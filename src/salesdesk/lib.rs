//! # Salesdesk Architecture
//!
//! Salesdesk is a **UI-agnostic client core** for a small sales back office:
//! customers, products, stores and the sales that tie them together. The records
//! live on a REST backend; this crate keeps a local copy of each table, pages it,
//! validates forms before anything is sent, and keeps the local copy in step with
//! whatever the backend answers.
//!
//! The `salesdesk` binary is one client of this library, not the other way round.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, cli/)                                  │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Maps an EntityKind to its screen, parses field=value     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per operation, returns CmdResult            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Screen Layer (collection.rs, draft.rs, validation.rs,      │
//! │  pagination.rs)                                             │
//! │  - CollectionStore / SaleStore: loaded rows + pager         │
//! │  - DraftSession: form values, inline errors, commit         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Remote Layer (remote/)                                     │
//! │  - Remote trait                                             │
//! │  - HttpRemote (production), InMemoryRemote (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Nothing Leaves a Draft Unvalidated
//!
//! Create and update always go through a [`draft::DraftSession`]. A draft that
//! fails whole-form validation is returned as
//! [`error::DeskError::ValidationRejected`] and the remote never sees it.
//!
//! ## Key Principle: The Remote Is the Source of Truth
//!
//! A local list only changes after the remote confirmed the mutation. When the
//! remote reports a record as missing, the list is reloaded instead of patched.
//!
//! ## Testing Strategy
//!
//! 1. **Screens and validation**: unit tests next to the code.
//! 2. **Commands** (`commands/*.rs`): business flows against `InMemoryRemote`.
//! 3. **API** (`api.rs`): dispatch per kind and argument parsing.
//! 4. **CLI** (`tests/cli.rs`): the binary end to end, with no backend running.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`collection`]: Loaded tables, the sale read model, and the `Screen` trait
//! - [`draft`]: Create/edit form sessions
//! - [`validation`]: Field rules and form validation
//! - [`pagination`]: Page sizes, page counts and visible slices
//! - [`model`]: Records (`Customer`, `Product`, `Store`, `Sale`) and read models
//! - [`remote`]: Backend abstraction and implementations
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod collection;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod model;
pub mod pagination;
pub mod remote;
pub mod validation;
