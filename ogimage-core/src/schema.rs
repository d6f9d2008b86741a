//! Content Schema
//!
//! Which extended content fields each template accepts beyond title,
//! description and icon. Eight templates declare extra fields.

use serde::Serialize;

use crate::model::ExtendedField;
use crate::templates::TemplateId;

/// Editing metadata for one extended field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub key: ExtendedField,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub hint: &'static str,
}

const fn field(
    key: ExtendedField,
    label: &'static str,
    placeholder: &'static str,
    hint: &'static str,
) -> FieldDescriptor {
    FieldDescriptor { key, label, placeholder, hint }
}

const NO_FIELDS: &[FieldDescriptor] = &[];

const EVENT_FIELDS: &[FieldDescriptor] = &[
    field(ExtendedField::Date, "Event Date", "March 15, 2024", "e.g., March 15, 2024 or 2024-03-15"),
    field(ExtendedField::Location, "Location", "San Francisco, CA", "Event venue or city"),
];

const PODCAST_FIELDS: &[FieldDescriptor] = &[
    field(ExtendedField::EpisodeNumber, "Episode Number", "Episode 42", "e.g., Episode 42 or Ep. 42"),
    field(ExtendedField::Duration, "Duration", "32:15", "Episode length in minutes"),
    field(ExtendedField::ShowName, "Show Name", "The Tech Podcast", "Your podcast name"),
];

const BLOG_FIELDS: &[FieldDescriptor] = &[
    field(ExtendedField::Author, "Author", "John Doe", "Author name"),
    field(ExtendedField::ReadTime, "Read Time", "5 min read", "Estimated reading time"),
    field(ExtendedField::Category, "Category", "Technology", "Article category or topic"),
];

const IMAGE_RIGHT_FIELDS: &[FieldDescriptor] = &[
    field(ExtendedField::ImageUrl, "Image URL", "https://example.com/image.png", "URL to a product or feature image"),
    field(ExtendedField::Tag, "Tag", "New Feature", "Category or feature badge"),
];

const SOCIAL_FIELDS: &[FieldDescriptor] = &[
    field(ExtendedField::Handle, "Handle", "@username", "Your social media handle"),
    field(ExtendedField::Platform, "Platform", "Twitter", "Social platform name"),
];

const LOGOS_FIELDS: &[FieldDescriptor] = &[
    field(ExtendedField::Tagline, "Tagline", "Works with your favorite tools", "A catchy tagline for your integration"),
];

const HERO_FIELDS: &[FieldDescriptor] = &[
    field(ExtendedField::Tag, "Badge Text", "New Feature", "Text shown in the badge/pill"),
];

const NOTICE_FIELDS: &[FieldDescriptor] = &[
    field(ExtendedField::Tag, "Notice Type", "Important Update", "e.g., Maintenance, Update, Alert"),
];

/// Ordered extra-field descriptors for `id`.
pub const fn fields_for(id: TemplateId) -> &'static [FieldDescriptor] {
    match id {
        TemplateId::Event => EVENT_FIELDS,
        TemplateId::Podcast => PODCAST_FIELDS,
        TemplateId::Blog => BLOG_FIELDS,
        TemplateId::ImageRight => IMAGE_RIGHT_FIELDS,
        TemplateId::Social => SOCIAL_FIELDS,
        TemplateId::Logos => LOGOS_FIELDS,
        TemplateId::Hero => HERO_FIELDS,
        TemplateId::Notice => NOTICE_FIELDS,
        TemplateId::Gradient
        | TemplateId::Minimal
        | TemplateId::Modern
        | TemplateId::Bold
        | TemplateId::Split
        | TemplateId::Glass
        | TemplateId::Startup
        | TemplateId::Banner => NO_FIELDS,
    }
}

/// Slug variant of [`fields_for`]; unknown slugs accept no extra fields.
pub fn fields_for_slug(slug: &str) -> &'static [FieldDescriptor] {
    TemplateId::parse(slug).map_or(NO_FIELDS, fields_for)
}

/// Whether `id` reads `field` at all.
pub fn declares(id: TemplateId, field: ExtendedField) -> bool {
    fields_for(id).iter().any(|d| d.key == field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_templates_declare_fields() {
        let with_fields = TemplateId::ALL.iter().filter(|id| !fields_for(**id).is_empty()).count();
        assert_eq!(with_fields, 8);
    }

    #[test]
    fn test_podcast_order() {
        let keys: Vec<_> = fields_for(TemplateId::Podcast).iter().map(|d| d.key).collect();
        assert_eq!(
            keys,
            vec![ExtendedField::EpisodeNumber, ExtendedField::Duration, ExtendedField::ShowName]
        );
    }

    #[test]
    fn test_unknown_slug_has_no_fields() {
        assert!(fields_for_slug("carousel").is_empty());
        assert_eq!(fields_for_slug("blog").len(), 3);
    }

    #[test]
    fn test_tag_shared_across_templates() {
        assert!(declares(TemplateId::Hero, ExtendedField::Tag));
        assert!(declares(TemplateId::Notice, ExtendedField::Tag));
        assert!(declares(TemplateId::ImageRight, ExtendedField::Tag));
        assert!(!declares(TemplateId::Minimal, ExtendedField::Tag));
    }
}
