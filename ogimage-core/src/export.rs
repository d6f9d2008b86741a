//! Export Pipeline - Design to Image Artifact
//!
//! SVG is encoded in-crate from the rendered scene. Raster formats go through
//! an external [`Rasterizer`]. [`ExportTracker`] drives the export lifecycle
//! in UI state and discards results that a newer request has superseded.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::hashing::design_hash;
use crate::model::{AppState, UiPatch};
use crate::persistence::PersistedState;
use crate::render::{self, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::store::Store;
use crate::templates::TemplateId;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No rasterizer available for {0} export")]
    RasterizerUnavailable(ExportFormat),

    #[error("Rasterization failed: {0}")]
    Rasterization(#[from] RasterizeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RasterizeError(pub String);

/// Turns an SVG master into raster bytes.
pub trait Rasterizer {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RasterizeError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedImage {
    pub id: String,
    pub template: TemplateId,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
    pub design_hash: String,
    pub data_base64: String,
}

impl ExportedImage {
    pub fn filename(&self) -> String {
        format!("og-{}.{}", self.template, self.format.extension())
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.data_base64)
    }

    pub fn bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(&self.data_base64)
    }
}

/// Single entry point for turning a design into an image.
#[derive(Default)]
pub struct ExportPipeline {
    rasterizer: Option<Box<dyn Rasterizer>>,
}

impl ExportPipeline {
    pub fn new() -> Self {
        Self { rasterizer: None }
    }

    pub fn with_rasterizer(rasterizer: impl Rasterizer + 'static) -> Self {
        Self {
            rasterizer: Some(Box::new(rasterizer)),
        }
    }

    pub fn supports(&self, format: ExportFormat) -> bool {
        format == ExportFormat::Svg || self.rasterizer.is_some()
    }

    pub fn export(&self, state: &AppState, format: ExportFormat) -> Result<ExportedImage, ExportError> {
        let scene = render::render_state(state);
        let svg = render::to_svg(&scene);

        let data = match format {
            ExportFormat::Svg => svg.into_bytes(),
            ExportFormat::Png => {
                let rasterizer = self
                    .rasterizer
                    .as_ref()
                    .ok_or(ExportError::RasterizerUnavailable(format))?;
                rasterizer.rasterize(&svg, CANVAS_WIDTH, CANVAS_HEIGHT)?
            }
        };

        let design = PersistedState::partialize(state);
        let image = ExportedImage {
            id: Uuid::new_v4().to_string(),
            template: scene.template,
            format,
            width: scene.width,
            height: scene.height,
            created_at: Utc::now(),
            design_hash: design_hash(format.extension(), &design)?,
            data_base64: base64::engine::general_purpose::STANDARD.encode(&data),
        };

        tracing::info!(id = %image.id, template = %image.template, %format, bytes = data.len(), "exported image");
        Ok(image)
    }
}

/// Stamp identifying one export request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTicket {
    generation: u64,
}

/// Tracks the in-flight export so late results of superseded requests are
/// dropped instead of overwriting newer UI state.
#[derive(Debug, Default)]
pub struct ExportTracker {
    generation: u64,
}

impl ExportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the store busy and returns the stamp for this request.
    pub fn begin(&mut self, store: &mut Store) -> ExportTicket {
        self.generation += 1;
        store.set_ui(UiPatch::new().generating(true).clear_error());
        ExportTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: ExportTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies exactly one of preview URL or error and clears the busy flag.
    /// Returns `false` and leaves the store untouched for stale tickets.
    pub fn complete(
        &mut self,
        store: &mut Store,
        ticket: ExportTicket,
        result: Result<ExportedImage, ExportError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded export result"
            );
            return false;
        }

        let patch = match result {
            Ok(image) => UiPatch::new().preview_url(image.data_url()).clear_error(),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                UiPatch::new().error(e.to_string()).clear_preview_url()
            }
        };
        store.set_ui(patch.generating(false));
        true
    }

    /// begin + export + complete in one call.
    pub fn run(
        &mut self,
        store: &mut Store,
        pipeline: &ExportPipeline,
        format: ExportFormat,
    ) -> Option<ExportedImage> {
        let ticket = self.begin(store);
        let result = pipeline.export(store.state(), format);
        let image = result.as_ref().ok().cloned();
        self.complete(store, ticket, result);
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentPatch, ExtendedField};

    struct FixedRasterizer;

    impl Rasterizer for FixedRasterizer {
        fn rasterize(&self, _svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RasterizeError> {
            Ok(format!("{width}x{height}").into_bytes())
        }
    }

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn rasterize(&self, _svg: &str, _width: u32, _height: u32) -> Result<Vec<u8>, RasterizeError> {
            Err(RasterizeError("font missing".into()))
        }
    }

    #[test]
    fn test_svg_export() {
        let image = ExportPipeline::new()
            .export(&AppState::default(), ExportFormat::Svg)
            .unwrap();
        assert_eq!((image.width, image.height), (1200, 630));
        assert_eq!(image.filename(), "og-gradient.svg");
        assert!(image.data_url().starts_with("data:image/svg+xml;base64,"));

        let svg = String::from_utf8(image.bytes().unwrap()).unwrap();
        assert!(svg.contains("Build faster with Next.js"));
    }

    #[test]
    fn test_png_requires_rasterizer() {
        let pipeline = ExportPipeline::new();
        assert!(!pipeline.supports(ExportFormat::Png));
        let err = pipeline.export(&AppState::default(), ExportFormat::Png).unwrap_err();
        assert!(matches!(err, ExportError::RasterizerUnavailable(ExportFormat::Png)));

        let image = ExportPipeline::with_rasterizer(FixedRasterizer)
            .export(&AppState::default(), ExportFormat::Png)
            .unwrap();
        assert_eq!(image.bytes().unwrap(), b"1200x630".to_vec());
    }

    #[test]
    fn test_design_hash_ignores_ui_state() {
        let pipeline = ExportPipeline::new();
        let mut state = AppState::default();
        let a = pipeline.export(&state, ExportFormat::Svg).unwrap();
        state.ui.is_advanced_open = true;
        let b = pipeline.export(&state, ExportFormat::Svg).unwrap();

        assert_eq!(a.design_hash, b.design_hash);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_failure_lands_in_ui_error_only() {
        let mut store = Store::new();
        store.set_content(ContentPatch::new().field(ExtendedField::Tag, "Keep"));
        let before = store.snapshot();

        let mut tracker = ExportTracker::new();
        let image = tracker.run(&mut store, &ExportPipeline::with_rasterizer(FailingRasterizer), ExportFormat::Png);

        assert!(image.is_none());
        let ui = &store.state().ui;
        assert!(!ui.is_generating);
        assert_eq!(ui.preview_url, None);
        assert_eq!(ui.error.as_deref(), Some("Rasterization failed: font missing"));

        let err = ExportPipeline::with_rasterizer(FailingRasterizer)
            .export(&AppState::default(), ExportFormat::Png)
            .unwrap_err();
        assert!(matches!(err, ExportError::Rasterization(RasterizeError(ref m)) if m == "font missing"));
        assert_eq!(store.state().content, before.content);
        assert_eq!(store.state().style, before.style);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut store = Store::new();
        let mut tracker = ExportTracker::new();
        let pipeline = ExportPipeline::new();

        let first = tracker.begin(&mut store);
        let first_result = pipeline.export(store.state(), ExportFormat::Svg);

        store.load_template(TemplateId::Bold);
        let second = tracker.begin(&mut store);
        let second_result = pipeline.export(store.state(), ExportFormat::Svg);

        assert!(tracker.complete(&mut store, second, second_result));
        let preview = store.state().ui.preview_url.clone();
        assert!(preview.is_some());

        assert!(!tracker.complete(&mut store, first, first_result));
        assert_eq!(store.state().ui.preview_url, preview);
        assert!(!store.state().ui.is_generating);
    }
}
