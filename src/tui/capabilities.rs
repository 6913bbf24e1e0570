//! Background acquisition of the rendering engines.
//!
//! `update` decides *when* a capability is needed (`Effect::Acquire`); this
//! module does the work on the tokio runtime and reports back through the
//! action channel, the same way every other background task talks to the
//! event loop.

use std::sync::{Arc, mpsc};

use async_trait::async_trait;
use log::{debug, info};
use tokio::task::JoinHandle;

use crate::core::action::Action;
use crate::core::capability::{
    Capabilities, CapabilityError, CapabilityKind, CapabilityLoader, SharedCapability,
};
use crate::core::config::ResolvedConfig;
use crate::tui::components::diagram::DiagramEngine;
use crate::tui::markdown::MarkdownEngine;

/// Every engine the content view can use.
pub struct Engines {
    pub markdown: SharedCapability<MarkdownEngine>,
    pub diagram: SharedCapability<DiagramEngine>,
}

impl Engines {
    pub const fn new() -> Self {
        Self {
            markdown: SharedCapability::new(),
            diagram: SharedCapability::new(),
        }
    }

    /// Engines the UI may draw with right now.
    ///
    /// Gated on `App` readiness rather than the cache alone, so sections
    /// only switch over once `update` has seen the resolution.
    pub fn loaded(
        &self,
        readiness: &Capabilities,
    ) -> (Option<Arc<MarkdownEngine>>, Option<Arc<DiagramEngine>>) {
        let markdown = readiness
            .markdown
            .is_ready()
            .then(|| self.markdown.get())
            .flatten();
        let diagram = readiness
            .diagram
            .is_ready()
            .then(|| self.diagram.get())
            .flatten();
        (markdown, diagram)
    }
}

impl Default for Engines {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide engine cache.
pub static ENGINES: Engines = Engines::new();

/// Settings the loaders need, detached from the rest of the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub syntax_theme: String,
    pub diagram_charset: String,
}

impl From<&ResolvedConfig> for EngineSettings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            syntax_theme: config.syntax_theme.clone(),
            diagram_charset: config.diagram_charset.clone(),
        }
    }
}

struct MarkdownLoader {
    theme: String,
}

#[async_trait]
impl CapabilityLoader for MarkdownLoader {
    type Output = MarkdownEngine;

    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Markdown
    }

    async fn load(&self) -> Result<MarkdownEngine, CapabilityError> {
        // Loading the default syntax and theme sets is CPU-bound
        let theme = self.theme.clone();
        tokio::task::spawn_blocking(move || MarkdownEngine::load(&theme))
            .await
            .map_err(|e| CapabilityError::TaskFailed(e.to_string()))?
    }
}

struct DiagramLoader {
    charset: String,
}

#[async_trait]
impl CapabilityLoader for DiagramLoader {
    type Output = DiagramEngine;

    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Diagram
    }

    async fn load(&self) -> Result<DiagramEngine, CapabilityError> {
        DiagramEngine::new(&self.charset)
    }
}

/// Acquire `kind` in the background and send `Action::CapabilityResolved`
/// when it settles. If the UI is gone by then the result is dropped.
pub fn spawn_acquisition(
    engines: &'static Engines,
    kind: CapabilityKind,
    settings: &EngineSettings,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning {} acquisition", kind.label());
    let settings = settings.clone();
    tokio::spawn(async move {
        let outcome = match kind {
            CapabilityKind::Markdown => {
                let loader = MarkdownLoader {
                    theme: settings.syntax_theme,
                };
                engines.markdown.acquire(&loader).await.map(|_| ())
            }
            CapabilityKind::Diagram => {
                let loader = DiagramLoader {
                    charset: settings.diagram_charset,
                };
                engines.diagram.acquire(&loader).await.map(|_| ())
            }
        };
        let action = Action::CapabilityResolved {
            kind,
            outcome: outcome.map_err(|e| e.to_string()),
        };
        if tx.send(action).is_err() {
            debug!(
                "{} capability settled after the view closed; ignoring",
                kind.label()
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::Readiness;
    use crate::core::config::DEFAULT_SYNTAX_THEME;

    fn settings(theme: &str, charset: &str) -> EngineSettings {
        EngineSettings {
            syntax_theme: theme.to_string(),
            diagram_charset: charset.to_string(),
        }
    }

    #[tokio::test]
    async fn markdown_acquisition_reports_ready() {
        static LOCAL: Engines = Engines::new();
        let (tx, rx) = mpsc::channel();
        spawn_acquisition(
            &LOCAL,
            CapabilityKind::Markdown,
            &settings(DEFAULT_SYNTAX_THEME, "unicode"),
            tx,
        )
        .await
        .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Action::CapabilityResolved {
                kind: CapabilityKind::Markdown,
                outcome: Ok(()),
            }
        );
        assert!(LOCAL.markdown.get().is_some());
        assert!(!LOCAL.diagram.is_settled());
    }

    #[tokio::test]
    async fn unknown_theme_reports_failure() {
        static LOCAL: Engines = Engines::new();
        let (tx, rx) = mpsc::channel();
        spawn_acquisition(
            &LOCAL,
            CapabilityKind::Markdown,
            &settings("no-such-theme", "unicode"),
            tx,
        )
        .await
        .unwrap();

        match rx.try_recv().unwrap() {
            Action::CapabilityResolved {
                kind: CapabilityKind::Markdown,
                outcome: Err(reason),
            } => assert!(reason.contains("no-such-theme")),
            other => panic!("unexpected action: {other:?}"),
        }
        assert!(LOCAL.markdown.is_settled());
        assert!(LOCAL.markdown.get().is_none());
    }

    #[tokio::test]
    async fn dropped_receiver_is_harmless() {
        static LOCAL: Engines = Engines::new();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let handle = spawn_acquisition(
            &LOCAL,
            CapabilityKind::Diagram,
            &settings(DEFAULT_SYNTAX_THEME, "ascii"),
            tx,
        );
        tokio_test::assert_ok!(handle.await);
        // The engine is still cached for whoever asks next
        assert!(LOCAL.diagram.get().is_some());
    }

    #[tokio::test]
    async fn loaded_waits_for_app_readiness() {
        static LOCAL: Engines = Engines::new();
        let (tx, _rx) = mpsc::channel();
        spawn_acquisition(
            &LOCAL,
            CapabilityKind::Diagram,
            &settings(DEFAULT_SYNTAX_THEME, "unicode"),
            tx,
        )
        .await
        .unwrap();

        let mut readiness = Capabilities::default();
        readiness.diagram = Readiness::Pending;
        assert!(LOCAL.loaded(&readiness).1.is_none());

        readiness.resolve(CapabilityKind::Diagram, Ok(()));
        let (markdown, diagram) = LOCAL.loaded(&readiness);
        assert!(markdown.is_none());
        assert!(diagram.is_some());
    }
}
