//! Template Catalog - Closed Set of Layouts
//!
//! Every template identifier maps to exactly one entry holding its metadata,
//! its style preset, its content schema and its render function. The table is
//! built at compile time; lookups never fail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::presets::{self, StylePreset};
use crate::render::{layouts, RenderFn};
use crate::schema::{self, FieldDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TemplateId {
    #[default]
    Gradient,
    Minimal,
    Modern,
    Bold,
    Split,
    Glass,
    Startup,
    Blog,
    Hero,
    Notice,
    ImageRight,
    Logos,
    Podcast,
    Event,
    Social,
    Banner,
}

impl TemplateId {
    /// Declaration order of the catalog.
    pub const ALL: [TemplateId; 16] = [
        TemplateId::Gradient,
        TemplateId::Minimal,
        TemplateId::Modern,
        TemplateId::Bold,
        TemplateId::Split,
        TemplateId::Glass,
        TemplateId::Startup,
        TemplateId::Blog,
        TemplateId::Hero,
        TemplateId::Notice,
        TemplateId::ImageRight,
        TemplateId::Logos,
        TemplateId::Podcast,
        TemplateId::Event,
        TemplateId::Social,
        TemplateId::Banner,
    ];

    /// The entry returned for identifiers the catalog does not know.
    pub const FALLBACK: TemplateId = TemplateId::Gradient;

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Gradient => "gradient",
            TemplateId::Minimal => "minimal",
            TemplateId::Modern => "modern",
            TemplateId::Bold => "bold",
            TemplateId::Split => "split",
            TemplateId::Glass => "glass",
            TemplateId::Startup => "startup",
            TemplateId::Blog => "blog",
            TemplateId::Hero => "hero",
            TemplateId::Notice => "notice",
            TemplateId::ImageRight => "imageRight",
            TemplateId::Logos => "logos",
            TemplateId::Podcast => "podcast",
            TemplateId::Event => "event",
            TemplateId::Social => "social",
            TemplateId::Banner => "banner",
        }
    }

    /// Parse a slug, `None` when it names no catalog entry.
    pub fn parse(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == slug)
    }

    /// Parse a slug, resolving unknown values to [`TemplateId::FALLBACK`].
    pub fn parse_or_fallback(slug: &str) -> Self {
        Self::parse(slug).unwrap_or_else(|| {
            tracing::debug!(slug, "unknown template identifier, using fallback");
            Self::FALLBACK
        })
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown template identifier: {0}")]
pub struct UnknownTemplate(pub String);

impl FromStr for TemplateId {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

/// Presentation grouping only; no behavior hangs off a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Startup,
    Blog,
    Product,
    Event,
    Social,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Startup => "Startup",
            Category::Blog => "Blog",
            Category::Product => "Product",
            Category::Event => "Event",
            Category::Social => "Social",
        }
    }
}

/// One catalog row: metadata plus the behaviors selected by the identifier.
#[derive(Clone, Copy)]
pub struct TemplateEntry {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub preset: StylePreset,
    pub fields: &'static [FieldDescriptor],
    pub render: RenderFn,
}

impl TemplateEntry {
    /// Colors the template ships with; identical to its preset.
    pub fn default_style(&self) -> &StylePreset {
        &self.preset
    }

    /// Whether the template accepts fields beyond title, description and icon.
    pub fn has_extra_fields(&self) -> bool {
        !self.fields.is_empty()
    }
}

impl fmt::Debug for TemplateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Serializable summary used by listings and metadata consumers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub default_style: StylePreset,
    pub extra_fields: Vec<&'static str>,
    pub preview_url: String,
}

impl TemplateSummary {
    pub fn new(entry: &TemplateEntry, preview_base_url: &str) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            category: entry.category,
            default_style: entry.preset,
            extra_fields: entry.fields.iter().map(|d| d.key.key()).collect(),
            preview_url: preview_image_url(preview_base_url, entry.id),
        }
    }
}

const fn entry(
    id: TemplateId,
    name: &'static str,
    description: &'static str,
    category: Category,
    render: RenderFn,
) -> TemplateEntry {
    TemplateEntry {
        id,
        name,
        description,
        category,
        preset: presets::preset_for(id),
        fields: schema::fields_for(id),
        render,
    }
}

static CATALOG: [TemplateEntry; 16] = [
    entry(TemplateId::Gradient, "Gradient", "Beautiful gradient backgrounds with centered content", Category::General, layouts::gradient),
    entry(TemplateId::Minimal, "Minimal", "Clean and simple design with lots of whitespace", Category::General, layouts::minimal),
    entry(TemplateId::Modern, "Modern", "Sleek dark design with neon accent colors", Category::Startup, layouts::modern),
    entry(TemplateId::Bold, "Bold", "High contrast, attention-grabbing design", Category::Event, layouts::bold),
    entry(TemplateId::Split, "Split", "Two-column layout with icon on one side", Category::Product, layouts::split),
    entry(TemplateId::Glass, "Glass", "Glassmorphism-inspired design with frosted effect", Category::Startup, layouts::glass),
    entry(TemplateId::Startup, "Startup", "Clean, professional startup vibe with subtle branding", Category::Startup, layouts::startup),
    entry(TemplateId::Blog, "Blog", "Clean reading-focused design for articles", Category::Blog, layouts::blog),
    entry(TemplateId::Hero, "Hero", "Startup landing page style with pill badge", Category::Startup, layouts::hero),
    entry(TemplateId::Notice, "Notice", "Announcement style with prominent icon", Category::General, layouts::notice),
    entry(TemplateId::ImageRight, "Image Right", "Split layout with decorative area", Category::Product, layouts::image_right),
    entry(TemplateId::Logos, "Logos", "Tech company style with decorative elements", Category::Product, layouts::logos),
    entry(TemplateId::Podcast, "Podcast", "Audio episode style with waveform", Category::Social, layouts::podcast),
    entry(TemplateId::Event, "Event", "Conference and event announcement style", Category::Event, layouts::event),
    entry(TemplateId::Social, "Social", "Clean centered design for social sharing", Category::Social, layouts::social),
    entry(TemplateId::Banner, "Banner", "Wide horizontal banner style", Category::Social, layouts::banner),
];

/// Read-only view over the static catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCatalog;

impl TemplateCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Typed lookup; total over the closed set.
    pub fn entry(&self, id: TemplateId) -> &'static TemplateEntry {
        &CATALOG[id as usize]
    }

    /// Slug lookup; unknown slugs resolve to the fallback entry.
    pub fn get(&self, slug: &str) -> &'static TemplateEntry {
        self.entry(TemplateId::parse_or_fallback(slug))
    }

    /// All entries in declaration order.
    pub fn list(&self) -> &'static [TemplateEntry] {
        &CATALOG
    }

    pub fn group_by_category(&self) -> BTreeMap<Category, Vec<&'static TemplateEntry>> {
        let mut groups: BTreeMap<Category, Vec<&'static TemplateEntry>> = BTreeMap::new();
        for entry in self.list() {
            groups.entry(entry.category).or_default().push(entry);
        }
        groups
    }

    /// Reverse lookup `category -> [identifiers]`.
    pub fn ids_in(&self, category: Category) -> Vec<TemplateId> {
        self.list()
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.id)
            .collect()
    }
}

/// Preview image location under the `{base}/{identifier}.png` convention.
pub fn preview_image_url(base: &str, id: TemplateId) -> String {
    format!("{}/{}.png", base.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rows_match_declaration_order() {
        for (i, id) in TemplateId::ALL.iter().enumerate() {
            assert_eq!(CATALOG[i].id, *id);
        }
    }

    #[test]
    fn test_slug_roundtrip() {
        for id in TemplateId::ALL {
            assert_eq!(TemplateId::parse(id.as_str()), Some(id));
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
        assert_eq!(TemplateId::parse("image-right"), None);
    }

    #[test]
    fn test_group_by_category() {
        let groups = TemplateCatalog::new().group_by_category();
        assert_eq!(groups.len(), 6);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, 16);

        let social: Vec<_> = groups[&Category::Social].iter().map(|e| e.id).collect();
        assert_eq!(social, vec![TemplateId::Podcast, TemplateId::Social, TemplateId::Banner]);
    }

    #[test]
    fn test_ids_in_category() {
        let catalog = TemplateCatalog::new();
        assert_eq!(
            catalog.ids_in(Category::General),
            vec![TemplateId::Gradient, TemplateId::Minimal, TemplateId::Notice]
        );
        assert_eq!(
            catalog.ids_in(Category::Startup),
            vec![TemplateId::Modern, TemplateId::Glass, TemplateId::Startup, TemplateId::Hero]
        );
        assert_eq!(catalog.ids_in(Category::Blog), vec![TemplateId::Blog]);
        assert_eq!(
            catalog.ids_in(Category::Product),
            vec![TemplateId::Split, TemplateId::ImageRight, TemplateId::Logos]
        );
        assert_eq!(catalog.ids_in(Category::Event), vec![TemplateId::Bold, TemplateId::Event]);
        assert_eq!(
            catalog.ids_in(Category::Social),
            vec![TemplateId::Podcast, TemplateId::Social, TemplateId::Banner]
        );
    }

    #[test]
    fn test_category_labels() {
        let categories = [
            Category::General,
            Category::Startup,
            Category::Blog,
            Category::Product,
            Category::Event,
            Category::Social,
        ];
        for category in categories {
            let slug = serde_json::to_value(category).unwrap();
            assert_eq!(slug.as_str().map(str::to_lowercase), Some(category.label().to_lowercase()));
        }
        assert_eq!(Category::Product.label(), "Product");
    }

    #[test]
    fn test_unknown_template_error() {
        let err = "carousel".parse::<TemplateId>().unwrap_err();
        assert_eq!(err, UnknownTemplate("carousel".into()));
        assert_eq!(err.to_string(), "unknown template identifier: carousel");
        assert_eq!("imageRight".parse::<TemplateId>(), Ok(TemplateId::ImageRight));
    }

    #[test]
    fn test_preview_url() {
        assert_eq!(
            preview_image_url("https://og-image.org/og-templates/", TemplateId::ImageRight),
            "https://og-image.org/og-templates/imageRight.png"
        );
    }
}
