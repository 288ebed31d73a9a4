//! The dashboard engine facade
//!
//! Owns the collaborator handles and exposes the pipeline end to end:
//! load → validate → render → execute.

use std::sync::Arc;
use std::time::Duration;

use dashcard_config::{
    to_json, to_yaml, ConfigParser, ParseError, ParseOptions, SerializeError,
};
use dashcard_model::{Action, Card, CardId, Dashboard, Entity, View};
use dashcard_render::{
    render_view, RenderError, RenderSession, RenderedNode, Renderer, StateOverlay,
};
use dashcard_runtime::{
    ActionError, ActionExecutor, ActionOutcome, EntityStore, ExecutorConfig, ServiceCall,
    StateCallback,
};
use dashcard_schema::{registry, validate, ValidationReport};

/// Engine configuration
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Container nesting limit applied while parsing
    pub max_parse_depth: usize,
    /// Container nesting limit applied while rendering
    pub max_render_depth: usize,
    /// Budget for external service calls
    pub service_timeout: Duration,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a parse-time nesting limit
    #[inline]
    #[must_use]
    pub fn with_max_parse_depth(mut self, depth: usize) -> Self {
        self.max_parse_depth = depth;
        self
    }

    /// With a render-time nesting limit
    #[inline]
    #[must_use]
    pub fn with_max_render_depth(mut self, depth: usize) -> Self {
        self.max_render_depth = depth;
        self
    }

    /// With a service-call timeout
    #[inline]
    #[must_use]
    pub fn with_service_timeout(mut self, timeout: Duration) -> Self {
        self.service_timeout = timeout;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_parse_depth: dashcard_config::DEFAULT_MAX_DEPTH,
            max_render_depth: dashcard_render::DEFAULT_MAX_DEPTH,
            service_timeout: dashcard_runtime::DEFAULT_SERVICE_TIMEOUT,
        }
    }
}

/// The pipeline facade: parse, validate, render, execute
pub struct DashboardEngine {
    store: Arc<dyn EntityStore>,
    executor: ActionExecutor,
    renderer: Renderer,
    config: EngineConfig,
}

impl DashboardEngine {
    /// Create an engine over the two external collaborators
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>, services: Arc<dyn ServiceCall>) -> Self {
        Self::with_config(store, services, EngineConfig::default())
    }

    /// Create an engine with explicit configuration
    #[must_use]
    pub fn with_config(
        store: Arc<dyn EntityStore>,
        services: Arc<dyn ServiceCall>,
        config: EngineConfig,
    ) -> Self {
        let executor = ActionExecutor::new(Arc::clone(&store), services).with_config(
            ExecutorConfig::new().with_service_timeout(config.service_timeout),
        );
        Self {
            store,
            executor,
            renderer: Renderer::new().with_max_depth(config.max_render_depth),
            config,
        }
    }

    /// The engine's configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Load a dashboard from YAML text
    ///
    /// # Errors
    /// Returns [`ParseError`] on malformed input; nothing partial is
    /// produced.
    pub fn load_yaml(&self, text: &str) -> Result<Dashboard, ParseError> {
        let dashboard = self.parser().parse_yaml(text)?;
        tracing::info!(views = dashboard.views.len(), "dashboard loaded from YAML");
        Ok(dashboard)
    }

    /// Load a dashboard from JSON text
    ///
    /// # Errors
    /// Returns [`ParseError`] on malformed input.
    pub fn load_json(&self, text: &str) -> Result<Dashboard, ParseError> {
        let dashboard = self.parser().parse_json(text)?;
        tracing::info!(views = dashboard.views.len(), "dashboard loaded from JSON");
        Ok(dashboard)
    }

    /// Serialize a dashboard to YAML text (lossless)
    ///
    /// # Errors
    /// Returns [`SerializeError`] if emission fails.
    pub fn save_yaml(&self, dashboard: &Dashboard) -> Result<String, SerializeError> {
        to_yaml(dashboard)
    }

    /// Serialize a dashboard to JSON text (lossless)
    ///
    /// # Errors
    /// Returns [`SerializeError`] if emission fails.
    pub fn save_json(&self, dashboard: &Dashboard) -> Result<String, SerializeError> {
        to_json(dashboard)
    }

    /// Validate one card against its schema (advisory)
    #[must_use]
    pub fn validate_card(&self, card: &Card) -> ValidationReport {
        validate(registry(), card)
    }

    /// Validate every card in a dashboard, nested children included
    ///
    /// Returns only the cards with problems, paired with their reports.
    #[must_use]
    pub fn validate_dashboard(&self, dashboard: &Dashboard) -> Vec<(CardId, ValidationReport)> {
        let mut findings = Vec::new();
        for view in &dashboard.views {
            for card in &view.cards {
                self.validate_subtree(card, &mut findings);
            }
        }
        findings
    }

    /// Render one card to a node tree
    ///
    /// # Errors
    /// Returns [`RenderError`] only for cyclic containment or depth
    /// overflow.
    pub fn render_card(
        &self,
        card: &Card,
        overlay: &StateOverlay,
    ) -> Result<RenderedNode, RenderError> {
        self.renderer.render(card, self.store.as_ref(), overlay)
    }

    /// Render a whole view and subscribe to its referenced entities
    ///
    /// # Errors
    /// Returns [`RenderError`] for structural problems in any card.
    pub fn render_view(
        &self,
        view: &View,
        overlay: &StateOverlay,
        on_change: StateCallback,
    ) -> Result<RenderSession, RenderError> {
        render_view(&self.renderer, view, self.store.as_ref(), overlay, on_change)
    }

    /// Execute an action descriptor
    ///
    /// # Errors
    /// Returns [`ActionError`] as a failed outcome; see the executor.
    pub async fn execute(
        &self,
        action: &Action,
        entity: Option<&Entity>,
    ) -> Result<ActionOutcome, ActionError> {
        self.executor.execute(action, entity).await
    }

    /// Execute a card's effective tap action
    ///
    /// The card's own entity is resolved as the action target when the
    /// action does not name one. Debouncing repeated taps is the
    /// caller's job.
    ///
    /// # Errors
    /// Returns [`ActionError`] as a failed outcome; see the executor.
    pub async fn tap_card(&self, card: &Card) -> Result<ActionOutcome, ActionError> {
        let action = card.actions.tap_or_default();
        let entity = card
            .entity()
            .or_else(|| action.target.clone())
            .and_then(|id| self.store.get(&id));
        self.execute(&action, entity.as_ref()).await
    }

    fn parser(&self) -> ConfigParser<'static> {
        ConfigParser::new()
            .with_options(ParseOptions::new().with_max_depth(self.config.max_parse_depth))
    }

    fn validate_subtree(&self, card: &Card, findings: &mut Vec<(CardId, ValidationReport)>) {
        let report = self.validate_card(card);
        if !report.is_valid() {
            findings.push((card.id, report));
        }
        for child in card.child_cards() {
            self.validate_subtree(child, findings);
        }
    }
}

impl std::fmt::Debug for DashboardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardEngine")
            .field("config", &self.config)
            .finish()
    }
}
