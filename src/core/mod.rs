//! # Core Application Logic
//!
//! The learning hub's domain logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Content (records)    │
//!                    │  • State (selection)    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │ props
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`content`]: the read-only `ContentStore` and its records
//! - [`state`]: the `App` struct, the single owner of the selection
//! - [`action`]: the `Action` enum and `update()`
//! - [`quiz`], [`video`]: per-topic interaction state
//! - [`diagram`]: class/ER diagram parser
//! - [`capability`]: one-time engine acquisition and readiness
//! - [`config`]: settings and their override hierarchy

pub mod action;
pub mod capability;
pub mod config;
pub mod content;
pub mod diagram;
pub mod quiz;
pub mod state;
pub mod video;
