//! Design State Records
//!
//! Content, style, advanced options and transient UI state, held together as
//! one [`AppState`], plus the partial patches merged into each group.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::templates::TemplateId;

/// Parse a lowercase/camelCase slug through the type's serde representation.
pub fn parse_slug<T: DeserializeOwned>(slug: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(slug.to_string())).ok()
}

// --- Enumerations ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Inter,
    Geist,
    System,
    Serif,
    Mono,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Center,
    Left,
    Split,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTab {
    #[default]
    Nextjs,
    Html,
    Download,
}

/// Keys of the optional, template-specific content fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtendedField {
    Date,
    Location,
    EpisodeNumber,
    Duration,
    ShowName,
    Author,
    ReadTime,
    Category,
    ImageUrl,
    Tag,
    Handle,
    Platform,
    Tagline,
}

impl ExtendedField {
    pub const ALL: [ExtendedField; 13] = [
        ExtendedField::Date,
        ExtendedField::Location,
        ExtendedField::EpisodeNumber,
        ExtendedField::Duration,
        ExtendedField::ShowName,
        ExtendedField::Author,
        ExtendedField::ReadTime,
        ExtendedField::Category,
        ExtendedField::ImageUrl,
        ExtendedField::Tag,
        ExtendedField::Handle,
        ExtendedField::Platform,
        ExtendedField::Tagline,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ExtendedField::Date => "date",
            ExtendedField::Location => "location",
            ExtendedField::EpisodeNumber => "episodeNumber",
            ExtendedField::Duration => "duration",
            ExtendedField::ShowName => "showName",
            ExtendedField::Author => "author",
            ExtendedField::ReadTime => "readTime",
            ExtendedField::Category => "category",
            ExtendedField::ImageUrl => "imageUrl",
            ExtendedField::Tag => "tag",
            ExtendedField::Handle => "handle",
            ExtendedField::Platform => "platform",
            ExtendedField::Tagline => "tagline",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

// --- Records ---

/// Superset of every template's extended fields. Absent is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

impl ExtendedFields {
    fn slot(&self, field: ExtendedField) -> &Option<String> {
        match field {
            ExtendedField::Date => &self.date,
            ExtendedField::Location => &self.location,
            ExtendedField::EpisodeNumber => &self.episode_number,
            ExtendedField::Duration => &self.duration,
            ExtendedField::ShowName => &self.show_name,
            ExtendedField::Author => &self.author,
            ExtendedField::ReadTime => &self.read_time,
            ExtendedField::Category => &self.category,
            ExtendedField::ImageUrl => &self.image_url,
            ExtendedField::Tag => &self.tag,
            ExtendedField::Handle => &self.handle,
            ExtendedField::Platform => &self.platform,
            ExtendedField::Tagline => &self.tagline,
        }
    }

    fn slot_mut(&mut self, field: ExtendedField) -> &mut Option<String> {
        match field {
            ExtendedField::Date => &mut self.date,
            ExtendedField::Location => &mut self.location,
            ExtendedField::EpisodeNumber => &mut self.episode_number,
            ExtendedField::Duration => &mut self.duration,
            ExtendedField::ShowName => &mut self.show_name,
            ExtendedField::Author => &mut self.author,
            ExtendedField::ReadTime => &mut self.read_time,
            ExtendedField::Category => &mut self.category,
            ExtendedField::ImageUrl => &mut self.image_url,
            ExtendedField::Tag => &mut self.tag,
            ExtendedField::Handle => &mut self.handle,
            ExtendedField::Platform => &mut self.platform,
            ExtendedField::Tagline => &mut self.tagline,
        }
    }

    pub fn get(&self, field: ExtendedField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: ExtendedField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Present fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ExtendedField, &str)> + '_ {
        ExtendedField::ALL
            .into_iter()
            .filter_map(move |f| self.get(f).map(|v| (f, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(flatten)]
    pub extended: ExtendedFields,
}

impl Default for ContentRecord {
    fn default() -> Self {
        Self {
            title: "Build faster with Next.js".to_string(),
            description: "The React Framework for Production".to_string(),
            icon: "⚡".to_string(),
            extended: ExtendedFields::default(),
        }
    }
}

/// Colors are kept verbatim; only the renderer interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub template: TemplateId,
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
}

impl Default for StyleRecord {
    fn default() -> Self {
        Self {
            template: TemplateId::Gradient,
            background_color: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_string(),
            text_color: "#ffffff".to_string(),
            accent_color: "#3b82f6".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedRecord {
    pub font_family: FontFamily,
    pub font_size: FontSize,
    pub layout: Layout,
}

/// Session-only state; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub is_generating: bool,
    pub preview_url: Option<String>,
    pub error: Option<String>,
    pub active_export_tab: ExportTab,
    pub is_advanced_open: bool,
}

/// The single "current design" value owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub content: ContentRecord,
    pub style: StyleRecord,
    pub advanced: AdvancedRecord,
    pub ui: UiState,
}

// --- Patches ---

/// Partial content update. Extended entries map to `Some` (set) or `None` (clear).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub extended: BTreeMap<ExtendedField, Option<String>>,
}

impl ContentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn field(mut self, field: ExtendedField, value: impl Into<String>) -> Self {
        self.extended.insert(field, Some(value.into()));
        self
    }

    pub fn clear(mut self, field: ExtendedField) -> Self {
        self.extended.insert(field, None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.icon.is_none() && self.extended.is_empty()
    }
}

impl ContentRecord {
    pub fn apply(&mut self, patch: ContentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        for (field, value) in patch.extended {
            self.extended.set(field, value);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePatch {
    pub template: Option<TemplateId>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub accent_color: Option<String>,
}

impl StylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(mut self, template: TemplateId) -> Self {
        self.template = Some(template);
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = Some(color.into());
        self
    }
}

impl StyleRecord {
    pub fn apply(&mut self, patch: StylePatch) {
        if let Some(template) = patch.template {
            self.template = template;
        }
        if let Some(color) = patch.background_color {
            self.background_color = color;
        }
        if let Some(color) = patch.text_color {
            self.text_color = color;
        }
        if let Some(color) = patch.accent_color {
            self.accent_color = color;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvancedPatch {
    pub font_family: Option<FontFamily>,
    pub font_size: Option<FontSize>,
    pub layout: Option<Layout>,
}

impl AdvancedPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = Some(font_family);
        self
    }

    pub fn font_size(mut self, font_size: FontSize) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }
}

impl AdvancedRecord {
    pub fn apply(&mut self, patch: AdvancedPatch) {
        if let Some(font_family) = patch.font_family {
            self.font_family = font_family;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(layout) = patch.layout {
            self.layout = layout;
        }
    }
}

/// `preview_url`/`error`: outer `None` leaves the field, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiPatch {
    pub is_generating: Option<bool>,
    pub preview_url: Option<Option<String>>,
    pub error: Option<Option<String>>,
    pub active_export_tab: Option<ExportTab>,
    pub is_advanced_open: Option<bool>,
}

impl UiPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generating(mut self, is_generating: bool) -> Self {
        self.is_generating = Some(is_generating);
        self
    }

    pub fn preview_url(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(Some(url.into()));
        self
    }

    pub fn clear_preview_url(mut self) -> Self {
        self.preview_url = Some(None);
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(Some(message.into()));
        self
    }

    pub fn clear_error(mut self) -> Self {
        self.error = Some(None);
        self
    }

    pub fn export_tab(mut self, tab: ExportTab) -> Self {
        self.active_export_tab = Some(tab);
        self
    }

    pub fn advanced_open(mut self, open: bool) -> Self {
        self.is_advanced_open = Some(open);
        self
    }
}

impl UiState {
    pub fn apply(&mut self, patch: UiPatch) {
        if let Some(is_generating) = patch.is_generating {
            self.is_generating = is_generating;
        }
        if let Some(preview_url) = patch.preview_url {
            self.preview_url = preview_url;
        }
        if let Some(error) = patch.error {
            self.error = error;
        }
        if let Some(tab) = patch.active_export_tab {
            self.active_export_tab = tab;
        }
        if let Some(open) = patch.is_advanced_open {
            self.is_advanced_open = open;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_patch_merges_shallow() {
        let mut content = ContentRecord::default();
        content.apply(ContentPatch::new().title("Launch Day").field(ExtendedField::Tag, "New"));

        assert_eq!(content.title, "Launch Day");
        assert_eq!(content.description, "The React Framework for Production");
        assert_eq!(content.extended.get(ExtendedField::Tag), Some("New"));

        content.apply(ContentPatch::new().clear(ExtendedField::Tag));
        assert_eq!(content.extended.get(ExtendedField::Tag), None);
        assert_eq!(content.title, "Launch Day");
    }

    #[test]
    fn test_extended_fields_serialize_flat() {
        let mut content = ContentRecord::default();
        content.extended.set(ExtendedField::EpisodeNumber, Some("Ep. 7".into()));
        let value = serde_json::to_value(&content).unwrap();

        assert_eq!(value["episodeNumber"], "Ep. 7");
        assert!(value.get("tag").is_none());
        assert!(value.get("extended").is_none());
    }

    #[test]
    fn test_extended_field_keys_match_serde() {
        for field in ExtendedField::ALL {
            assert_eq!(parse_slug::<ExtendedField>(field.key()), Some(field));
            assert_eq!(ExtendedField::from_key(field.key()), Some(field));
        }
    }

    #[test]
    fn test_ui_patch_clear_vs_keep() {
        let mut ui = UiState::default();
        ui.apply(UiPatch::new().error("boom"));
        ui.apply(UiPatch::new().generating(true));
        assert_eq!(ui.error.as_deref(), Some("boom"));

        ui.apply(UiPatch::new().clear_error());
        assert_eq!(ui.error, None);
        assert!(ui.is_generating);
    }

    #[test]
    fn test_enum_slugs() {
        assert_eq!(parse_slug::<FontSize>("large"), Some(FontSize::Large));
        assert_eq!(parse_slug::<Layout>("split"), Some(Layout::Split));
        assert_eq!(parse_slug::<ExportTab>("nextjs"), Some(ExportTab::Nextjs));
        assert_eq!(parse_slug::<FontFamily>("comic"), None);
    }
}
