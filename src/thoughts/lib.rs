//! # Thoughts Architecture
//!
//! Thoughts keeps short notes as plain markdown files in a folder the user
//! chose. The folder is the only source of truth: every run hydrates from
//! it, every edit writes back to it, and deletion moves files into a trash
//! sub-folder instead of erasing them.
//!
//! Like most of its siblings it is a library first. The CLI is one client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, cli/)                               │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs): ThoughtsApi<P: FolderPicker>                 │
//! │  - Thin facade, parses selectors, applies config defaults   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Business logic over the store and the in-memory index    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/)                                             │
//! │  - ThoughtStore: thoughts <-> files                         │
//! │  - DirectoryStore: root + trash handles, per-entry ops      │
//! │  - FolderPicker / FolderHandle: fs and in-memory backends   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`codec`] turns a thought into a markdown document and back, [`naming`]
//! derives file names from titles, and [`index`] holds the working set the
//! UI filters and sorts.
//!
//! ## Testing Strategy
//!
//! Store and command logic are tested against the in-memory backend
//! (`store::mem_folder`), so failure paths such as a trash write that fails
//! or a removal that is refused can be forced. The filesystem backend and
//! the binary are covered from `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`store`]: Folder capability, directory store, reconciliation
//! - [`codec`]: Markdown document format
//! - [`naming`]: Ids and file names
//! - [`model`]: `Thought`
//! - [`index`]: In-memory index, queries and display indexes
//! - [`config`]: `config.json` settings
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod model;
pub mod naming;
pub mod store;
