//! Task board: the client-side controller for a personal task list.
//!
//! The board keeps a local copy of the user's tasks in sync with a remote
//! store, derives the filtered view, drives the add/edit form, and tracks
//! per-item menu and busy state. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
