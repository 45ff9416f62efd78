//! Builder for constructing decks.

use crate::builder::error::BuildError;
use crate::config::DeckConfig;
use crate::core::{Guard, PresentationState};
use crate::deck::Deck;
use crate::effects::{Document, PageController, Scheduler};

/// Builder for constructing decks with a fluent API.
///
/// # Example
///
/// ```rust
/// use pageflip::builder::DeckBuilder;
/// use pageflip::effects::{ManualScheduler, MemoryDocument};
///
/// let mut deck = DeckBuilder::new()
///     .document(MemoryDocument::deck_markup("page", 3))
///     .scheduler(ManualScheduler::new())
///     .when("skip-none", |_state, target| target >= 1)
///     .build()
///     .unwrap();
///
/// deck.start(None);
/// deck.go_to_page(2).unwrap();
/// deck.finish_transition();
/// assert_eq!(deck.current_page(), 2);
/// ```
pub struct DeckBuilder<D: Document, S: Scheduler> {
    config: DeckConfig,
    document: Option<D>,
    scheduler: Option<S>,
    guards: Vec<Guard>,
}

impl<D: Document, S: Scheduler> DeckBuilder<D, S> {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: DeckConfig::default(),
            document: None,
            scheduler: None,
            guards: Vec::new(),
        }
    }

    /// Replace the configuration.
    pub fn config(mut self, config: DeckConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the configuration with one parsed from TOML.
    /// Returns an error if the text does not parse.
    pub fn config_toml(mut self, content: &str) -> Result<Self, BuildError> {
        self.config = DeckConfig::from_toml_str(content)?;
        Ok(self)
    }

    /// Set the document to render into (required).
    pub fn document(mut self, document: D) -> Self {
        self.document = Some(document);
        self
    }

    /// Set the source of delayed callbacks (required).
    pub fn scheduler(mut self, scheduler: S) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Add a navigation guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Add a navigation guard using a closure.
    pub fn when<F>(self, name: &str, predicate: F) -> Self
    where
        F: Fn(&PresentationState, u32) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(name, predicate))
    }

    /// Build the deck.
    /// Returns an error if required parts are missing or the configuration
    /// is invalid.
    pub fn build(self) -> Result<Deck<D, S>, BuildError> {
        let violations = self.config.violations();
        if !violations.is_empty() {
            return Err(BuildError::InvalidConfig(violations));
        }

        let document = self.document.ok_or(BuildError::MissingDocument)?;
        let scheduler = self.scheduler.ok_or(BuildError::MissingScheduler)?;

        let mut controller = PageController::new(
            self.config.total_pages,
            self.config.page_id_prefix.clone(),
            self.config.timing(),
        );
        for guard in self.guards {
            controller.add_guard(guard);
        }

        Ok(Deck::assemble(self.config, controller, document, scheduler))
    }
}

impl<D: Document, S: Scheduler> Default for DeckBuilder<D, S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::effects::{ManualScheduler, MemoryDocument, NavigationError};

    type TestBuilder = DeckBuilder<MemoryDocument, ManualScheduler>;

    #[test]
    fn builder_requires_document() {
        let result = TestBuilder::new().scheduler(ManualScheduler::new()).build();
        assert!(matches!(result, Err(BuildError::MissingDocument)));
    }

    #[test]
    fn builder_requires_scheduler() {
        let result = TestBuilder::new().document(MemoryDocument::new()).build();
        assert!(matches!(result, Err(BuildError::MissingScheduler)));
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let config = DeckConfig {
            total_pages: 0,
            page_id_prefix: String::new(),
            ..DeckConfig::default()
        };
        let result = TestBuilder::new()
            .config(config)
            .document(MemoryDocument::new())
            .scheduler(ManualScheduler::new())
            .build();

        match result {
            Err(BuildError::InvalidConfig(violations)) => {
                assert_eq!(
                    violations,
                    vec![ConfigError::NoPages, ConfigError::EmptyPagePrefix]
                );
            }
            _ => panic!("Expected InvalidConfig"),
        }
    }

    #[test]
    fn config_toml_applies_settings() {
        let deck = TestBuilder::new()
            .config_toml("total_pages = 5\npage_id_prefix = \"slide\"")
            .unwrap()
            .document(MemoryDocument::deck_markup("slide", 5))
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();

        assert_eq!(deck.total_pages(), 5);
        assert_eq!(deck.config().page_id_prefix, "slide");
    }

    #[test]
    fn config_toml_reports_parse_errors() {
        let result = TestBuilder::new().config_toml("total_pages = [");
        assert!(matches!(result, Err(BuildError::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn guards_are_installed() {
        let mut deck = TestBuilder::new()
            .document(MemoryDocument::deck_markup("page", 3))
            .scheduler(ManualScheduler::new())
            .when("locked", |_s: &PresentationState, _t| false)
            .build()
            .unwrap();

        assert!(matches!(
            deck.go_to_page(2),
            Err(NavigationError::Blocked { .. })
        ));
    }
}
