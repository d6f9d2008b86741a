//! OG Image Core - Template Catalog and Design State
//!
//! # Guarantees
//! 1. One current design, swapped in whole on every mutation
//! 2. The catalog is closed; unknown identifiers fall back, never fail
//! 3. Switching templates rewrites style from a preset, never content
//! 4. Only content, style and advanced options are persisted
//! 5. Stored snapshots merge over defaults field by field
//! 6. Selectors report "unchanged" unless their own group changed

pub mod config;
pub mod export;
pub mod hashing;
pub mod inputs;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod presets;
pub mod render;
pub mod schema;
pub mod selectors;
pub mod store;
pub mod templates;

pub use config::{ConfigError, StudioConfig};
pub use export::{
    ExportError, ExportFormat, ExportPipeline, ExportTracker, ExportedImage, RasterizeError, Rasterizer,
};
pub use inputs::{has_template_inputs, InputForm};
pub use model::{
    AdvancedPatch, AdvancedRecord, AppState, ContentPatch, ContentRecord, ExportTab, ExtendedField,
    FontFamily, FontSize, Layout, StylePatch, StyleRecord, UiPatch, UiState,
};
pub use persistence::{
    FileStorage, KeyValueStorage, MemoryStorage, Persistence, PersistedState, PersistenceError,
    DEFAULT_STORAGE_KEY,
};
pub use presets::{preset_for, StylePreset};
pub use render::{render_state, Scene, TemplateProps, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use schema::{fields_for, fields_for_slug, FieldDescriptor};
pub use selectors::{ChangedGroups, SelectorSet};
pub use store::{Actions, Store};
pub use templates::{
    preview_image_url, Category, TemplateCatalog, TemplateEntry, TemplateId, TemplateSummary,
};
