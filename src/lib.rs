//! Taskboard: client-side controller for a personal task list.
//!
//! This crate reconciles a locally held task list with user-driven
//! mutations against a remote store: it loads, creates, edits, completes,
//! and deletes tasks, derives filtered views, and drives an add/edit form
//! session.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote store and alerts
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`board`]: Task list, filters, form session, and item view state

pub mod board;
