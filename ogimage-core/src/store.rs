//! State Store - Single Source of Truth
//!
//! Owns the one [`AppState`]. Every mutation builds the next state from a copy
//! and swaps it in whole, so readers only ever see complete merges. Mutations
//! are total: persistence failures are logged, never returned.

use crate::model::{AdvancedPatch, AppState, ContentPatch, StylePatch, UiPatch};
use crate::persistence::Persistence;
use crate::presets;
use crate::templates::TemplateId;

pub struct Store {
    state: AppState,
    revision: u64,
    persistence: Option<Persistence>,
}

impl Store {
    /// In-memory store starting from defaults.
    pub fn new() -> Self {
        Self {
            state: AppState::default(),
            revision: 0,
            persistence: None,
        }
    }

    /// Store backed by durable storage, rehydrated from it.
    pub fn with_persistence(persistence: Persistence) -> Self {
        let state = persistence.rehydrate();
        Self {
            state,
            revision: 0,
            persistence: Some(persistence),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Owned copy for consumers that outlive the borrow.
    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    /// Number of mutations applied since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_content(&mut self, patch: ContentPatch) {
        let mut next = self.state.clone();
        next.content.apply(patch);
        self.commit("setContent", next);
    }

    /// Does not re-apply a preset when `template` changes; see [`Store::load_template`].
    pub fn set_style(&mut self, patch: StylePatch) {
        let mut next = self.state.clone();
        next.style.apply(patch);
        self.commit("setStyle", next);
    }

    pub fn set_advanced(&mut self, patch: AdvancedPatch) {
        let mut next = self.state.clone();
        next.advanced.apply(patch);
        self.commit("setAdvanced", next);
    }

    pub fn set_ui(&mut self, patch: UiPatch) {
        let mut next = self.state.clone();
        next.ui.apply(patch);
        self.commit("setUI", next);
    }

    /// Back to hardcoded defaults, extended fields included.
    pub fn reset(&mut self) {
        self.commit("reset", AppState::default());
    }

    /// Switch template and overwrite style (and layout, if the preset has
    /// one) with its preset. Content, including extended fields, is kept.
    pub fn load_template(&mut self, id: TemplateId) {
        let preset = presets::preset_for(id);
        let mut next = self.state.clone();
        next.style.apply(preset.to_patch(id));
        if let Some(layout) = preset.layout {
            next.advanced.layout = layout;
        }
        self.commit("loadTemplate", next);
    }

    /// Slug variant; unknown slugs load the fallback template.
    pub fn load_template_slug(&mut self, slug: &str) {
        self.load_template(TemplateId::parse_or_fallback(slug));
    }

    /// Mutation-only handle.
    pub fn actions(&mut self) -> Actions<'_> {
        Actions { store: self }
    }

    fn commit(&mut self, action: &'static str, next: AppState) {
        self.state = next;
        self.revision += 1;
        tracing::debug!(action, revision = self.revision, template = %self.state.style.template, "state updated");

        if let Some(persistence) = self.persistence.as_mut() {
            if let Err(e) = persistence.save(&self.state) {
                tracing::warn!(action, key = persistence.key(), error = %e, "failed to persist design state");
            }
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("revision", &self.revision)
            .field("template", &self.state.style.template)
            .field("persistence", &self.persistence)
            .finish()
    }
}

/// The actions-only view of the store: mutations, no reads.
pub struct Actions<'a> {
    store: &'a mut Store,
}

impl Actions<'_> {
    pub fn set_content(&mut self, patch: ContentPatch) {
        self.store.set_content(patch);
    }

    pub fn set_style(&mut self, patch: StylePatch) {
        self.store.set_style(patch);
    }

    pub fn set_advanced(&mut self, patch: AdvancedPatch) {
        self.store.set_advanced(patch);
    }

    pub fn set_ui(&mut self, patch: UiPatch) {
        self.store.set_ui(patch);
    }

    pub fn reset(&mut self) {
        self.store.reset();
    }

    pub fn load_template(&mut self, id: TemplateId) {
        self.store.load_template(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExtendedField, FontSize, Layout};
    use crate::persistence::{KeyValueStorage, MemoryStorage, PersistenceError};

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> crate::persistence::Result<Option<String>> {
            Err(PersistenceError::InvalidKey("unavailable".into()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> crate::persistence::Result<()> {
            Err(PersistenceError::InvalidKey("unavailable".into()))
        }

        fn remove_item(&mut self, _key: &str) -> crate::persistence::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_revision_counts_mutations() {
        let mut store = Store::new();
        assert_eq!(store.revision(), 0);
        store.set_content(ContentPatch::new().title("A"));
        store.set_ui(UiPatch::new().advanced_open(true));
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_split_preset_overrides_layout_only_for_split() {
        let mut store = Store::new();
        store.load_template(TemplateId::Split);
        assert_eq!(store.state().advanced.layout, Layout::Split);

        store.set_advanced(AdvancedPatch::new().layout(Layout::Left));
        store.load_template(TemplateId::Minimal);
        assert_eq!(store.state().advanced.layout, Layout::Left);
    }

    #[test]
    fn test_set_style_does_not_apply_preset() {
        let mut store = Store::new();
        store.set_style(StylePatch::new().template(TemplateId::Bold));
        assert_eq!(store.state().style.template, TemplateId::Bold);
        assert_eq!(store.state().style.background_color, AppState::default().style.background_color);
    }

    #[test]
    fn test_unknown_slug_loads_fallback() {
        let mut store = Store::new();
        store.load_template(TemplateId::Podcast);
        store.load_template_slug("carousel");
        assert_eq!(store.state().style.template, TemplateId::Gradient);
        assert_eq!(store.state().style.accent_color, "#fbbf24");
    }

    #[test]
    fn test_every_mutation_persists() {
        let storage = MemoryStorage::new();
        let mut store = Store::with_persistence(Persistence::new(storage.clone()));
        assert!(storage.is_empty());

        store.set_advanced(AdvancedPatch::new().font_size(FontSize::Large));
        let stored = storage.get_item(crate::DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(stored.contains(r#""fontSize":"large""#));
    }

    #[test]
    fn test_storage_failure_is_not_surfaced() {
        let mut store = Store::with_persistence(Persistence::new(BrokenStorage));
        store.set_content(ContentPatch::new().field(ExtendedField::Date, "May 1"));

        assert_eq!(store.state().content.extended.get(ExtendedField::Date), Some("May 1"));
        assert_eq!(store.state().ui.error, None);
    }

    #[test]
    fn test_actions_handle_mutates() {
        let mut store = Store::new();
        {
            let mut actions = store.actions();
            actions.load_template(TemplateId::Event);
            actions.set_content(ContentPatch::new().title("Summit"));
        }
        assert_eq!(store.state().style.template, TemplateId::Event);
        assert_eq!(store.state().content.title, "Summit");
    }
}
