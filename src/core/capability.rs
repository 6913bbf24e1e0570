//! # Rendering Capabilities
//!
//! Some sections need an engine before they can be drawn (markdown
//! highlighting sets, the diagram renderer). Engines are acquired lazily,
//! exactly once per process, and the outcome is cached whether it succeeded
//! or not. A failed capability stays failed for the rest of the session and
//! its sections keep showing their placeholder.
//!
//! Two halves:
//!
//! - [`Capabilities`] is plain state on `App`: what the UI believes about
//!   each engine (`Idle → Pending → Ready | Failed`).
//! - [`SharedCapability`] is the process-wide cache holding the engine
//!   itself, filled by a [`CapabilityLoader`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Markdown,
    Diagram,
}

impl CapabilityKind {
    pub fn label(&self) -> &'static str {
        match self {
            CapabilityKind::Markdown => "markdown",
            CapabilityKind::Diagram => "diagram",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Readiness {
    /// Nobody has needed it yet.
    #[default]
    Idle,
    Pending,
    Ready,
    /// Terminal for the session.
    Failed(String),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Readiness of every capability, as seen by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub markdown: Readiness,
    pub diagram: Readiness,
}

impl Capabilities {
    pub fn get(&self, kind: CapabilityKind) -> &Readiness {
        match kind {
            CapabilityKind::Markdown => &self.markdown,
            CapabilityKind::Diagram => &self.diagram,
        }
    }

    fn get_mut(&mut self, kind: CapabilityKind) -> &mut Readiness {
        match kind {
            CapabilityKind::Markdown => &mut self.markdown,
            CapabilityKind::Diagram => &mut self.diagram,
        }
    }

    /// Mark `kind` as requested. Returns `true` only on the `Idle → Pending`
    /// transition, i.e. when the caller should start the acquisition.
    pub fn request(&mut self, kind: CapabilityKind) -> bool {
        let readiness = self.get_mut(kind);
        if *readiness == Readiness::Idle {
            *readiness = Readiness::Pending;
            true
        } else {
            false
        }
    }

    pub fn resolve(&mut self, kind: CapabilityKind, outcome: Result<(), String>) {
        *self.get_mut(kind) = match outcome {
            Ok(()) => Readiness::Ready,
            Err(reason) => Readiness::Failed(reason),
        };
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The configured syntax theme is not in the loaded theme set.
    UnknownTheme(String),
    /// The configured diagram charset is not one we can draw with.
    UnsupportedCharset(String),
    /// The background task panicked or was cancelled.
    TaskFailed(String),
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityError::UnknownTheme(name) => write!(f, "unknown syntax theme '{name}'"),
            CapabilityError::UnsupportedCharset(name) => {
                write!(f, "unsupported diagram charset '{name}'")
            }
            CapabilityError::TaskFailed(msg) => write!(f, "acquisition task failed: {msg}"),
        }
    }
}

impl std::error::Error for CapabilityError {}

// ============================================================================
// Acquisition
// ============================================================================

#[async_trait]
pub trait CapabilityLoader: Send + Sync {
    type Output: Send + Sync + 'static;

    fn kind(&self) -> CapabilityKind;

    /// Build the engine. Called at most once per `SharedCapability`.
    async fn load(&self) -> Result<Self::Output, CapabilityError>;
}

/// Process-wide, acquire-once slot for an engine.
pub struct SharedCapability<T> {
    cell: OnceCell<Result<Arc<T>, CapabilityError>>,
}

impl<T> Default for SharedCapability<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SharedCapability<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// The engine, if acquisition has finished successfully.
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().and_then(|result| result.as_ref().ok().cloned())
    }

    /// Whether acquisition has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.cell.initialized()
    }

    /// Run `loader` unless a previous call already settled this slot.
    /// Concurrent callers wait for the same acquisition.
    pub async fn acquire<L>(&self, loader: &L) -> Result<Arc<T>, CapabilityError>
    where
        L: CapabilityLoader<Output = T>,
    {
        self.cell
            .get_or_init(|| async {
                let label = loader.kind().label();
                info!("Acquiring {label} capability");
                let result = loader.load().await.map(Arc::new);
                match &result {
                    Ok(_) => info!("{label} capability ready"),
                    Err(e) => error!("{label} capability unavailable: {e}"),
                }
                result
            })
            .await
            .clone()
    }
}
