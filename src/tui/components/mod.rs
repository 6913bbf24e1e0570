//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow three patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar` / `Footer`: hub title, key hints, copyright line
//!
//! ### Section Bodies
//!
//! Pieces of a topic page. Each implements `SectionBody`: text laid out for
//! a width, so the topic view can size its canvas before drawing:
//! - `ComparisonTable`: wrapped, box-drawn table
//! - `DiagramView`: class/ER diagram drawn by the `DiagramEngine`
//! - `GlossaryView`: terms and definitions
//! - `QuizView`: prompt, options, feedback
//! - `VideoPanel`: channel buttons and links for the active video
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that own persistent state in `TuiState` and emit events:
//! - `Sidebar` (`SidebarState`): topic list with its own cursor
//! - `TopicView` (`ContentViewState`): scrollable stack of sections
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (constructor arguments), not
//! by reaching into global state:
//!
//! ```rust,ignore
//! Sidebar::new(&mut tui.sidebar, &app.store, app.selection, focused)
//!     .render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── title_bar.rs         (header and footer)
//! ├── sidebar.rs           (topic navigation)
//! ├── topic_view.rs        (scrollable section stack)
//! ├── comparison_table.rs
//! ├── diagram.rs           (diagram engine and view)
//! ├── glossary.rs
//! ├── quiz.rs
//! └── video_chooser.rs
//! ```

pub mod comparison_table;
pub mod diagram;
pub mod glossary;
pub mod quiz;
pub mod sidebar;
mod title_bar;
pub mod topic_view;
pub mod video_chooser;

pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
pub use title_bar::{Footer, HUB_SUBTITLE, HUB_TITLE, TitleBar};
pub use topic_view::{ContentViewState, TopicView};
