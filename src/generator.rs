//! End-to-end generation facade.
//!
//! Wires the stages together in their fixed order: select the language pair
//! (fatal if unregistered, before anything renders), refine the tree in
//! place, then hand the now read-only tree to the renderer.

use crate::cancellation::CancellationToken;
use crate::config::GenerationConfig;
use crate::errors::Result;
use crate::languages::{refiner_for, writer_for};
use crate::model::CodeModel;
use crate::render::CodeRenderer;

/// Runs one generation pass over a built model.
pub struct Generator {
    config: GenerationConfig,
    cancellation: CancellationToken,
}

impl Generator {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            cancellation: CancellationToken::new(),
        }
    }

    /// Observe an external cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Refine and render `model` into the configured output root.
    pub fn generate(&self, model: &mut CodeModel) -> Result<()> {
        // Resolve both halves of the language pair up front so an
        // unsupported selector fails before any file is touched.
        let refiner = refiner_for(self.config.language)?;
        let writer = writer_for(self.config.language)?;

        let span = tracing::info_span!("generate", language = %self.config.language);
        let _guard = span.enter();

        tracing::info!("refining model");
        refiner.refine(model, &self.config)?;

        tracing::info!(output = %self.config.output_root.display(), "rendering");
        let renderer = CodeRenderer::new(&self.config, writer.as_ref())
            .with_cancellation(self.cancellation.clone());
        renderer.render(model)
    }
}
