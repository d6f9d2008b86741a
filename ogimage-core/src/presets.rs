//! Style Presets
//!
//! The color bundle (and optional layout override) applied when a template is
//! selected. Presets never carry content.

use serde::Serialize;

use crate::model::{Layout, StylePatch};
use crate::templates::TemplateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreset {
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub accent_color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

impl StylePreset {
    const fn colors(background_color: &'static str, text_color: &'static str, accent_color: &'static str) -> Self {
        Self {
            background_color,
            text_color,
            accent_color,
            layout: None,
        }
    }

    const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Style patch that binds `template` and overwrites all three colors.
    pub fn to_patch(&self, template: TemplateId) -> StylePatch {
        StylePatch::new()
            .template(template)
            .background_color(self.background_color)
            .text_color(self.text_color)
            .accent_color(self.accent_color)
    }
}

/// Preset for `id`. Total over the catalog.
pub const fn preset_for(id: TemplateId) -> StylePreset {
    match id {
        TemplateId::Gradient => StylePreset::colors("linear-gradient(135deg, #667eea 0%, #764ba2 100%)", "#ffffff", "#fbbf24"),
        TemplateId::Minimal => StylePreset::colors("#ffffff", "#171717", "#3b82f6"),
        TemplateId::Modern => StylePreset::colors("#0f172a", "#f8fafc", "#38bdf8"),
        TemplateId::Bold => StylePreset::colors("#dc2626", "#ffffff", "#fbbf24"),
        TemplateId::Split => StylePreset::colors("#000000", "#ffffff", "#22c55e").with_layout(Layout::Split),
        TemplateId::Glass => StylePreset::colors("linear-gradient(135deg, #1e3a5f 0%, #0d1b2a 100%)", "#ffffff", "#60a5fa"),
        TemplateId::Startup => StylePreset::colors("#000000", "#ffffff", "#22c55e"),
        TemplateId::Blog => StylePreset::colors("#fafafa", "#171717", "#8b5cf6"),
        TemplateId::Hero => StylePreset::colors("#0f172a", "#f8fafc", "#fbbf24"),
        TemplateId::Notice => StylePreset::colors("#ffffff", "#171717", "#dc2626"),
        TemplateId::ImageRight => StylePreset::colors("#1e293b", "#f8fafc", "#38bdf8"),
        TemplateId::Logos => StylePreset::colors("#000000", "#ffffff", "#a855f7"),
        TemplateId::Podcast => StylePreset::colors("#18181b", "#f4f4f5", "#f97316"),
        TemplateId::Event => StylePreset::colors("#7c3aed", "#ffffff", "#fbbf24"),
        TemplateId::Social => StylePreset::colors("#000000", "#ffffff", "#1d9bf0"),
        TemplateId::Banner => StylePreset::colors("#15202b", "#ffffff", "#1d9bf0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_split_overrides_layout() {
        for id in TemplateId::ALL {
            let preset = preset_for(id);
            if id == TemplateId::Split {
                assert_eq!(preset.layout, Some(Layout::Split));
            } else {
                assert_eq!(preset.layout, None, "{id} should not override layout");
            }
        }
    }

    #[test]
    fn test_bold_preset() {
        let preset = preset_for(TemplateId::Bold);
        assert_eq!(preset.background_color, "#dc2626");
        assert_eq!(preset.text_color, "#ffffff");
        assert_eq!(preset.accent_color, "#fbbf24");
    }
}
