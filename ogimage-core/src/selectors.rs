//! Selector Layer - Stable Projections
//!
//! A selector projects one group out of [`AppState`] and remembers the last
//! view it handed out. When a new projection is structurally equal to the
//! remembered one, the remembered `Arc` is returned again, so consumers see
//! "unchanged" whether they compare by pointer or by value.

use std::sync::Arc;

use crate::model::{AdvancedRecord, AppState, ContentRecord, StyleRecord, UiState};

pub trait Projection {
    type View: Clone + PartialEq;

    fn project(state: &AppState) -> Self::View;
}

pub struct ContentProjection;
pub struct StyleProjection;
pub struct AdvancedProjection;
pub struct UiProjection;

impl Projection for ContentProjection {
    type View = ContentRecord;

    fn project(state: &AppState) -> ContentRecord {
        state.content.clone()
    }
}

impl Projection for StyleProjection {
    type View = StyleRecord;

    fn project(state: &AppState) -> StyleRecord {
        state.style.clone()
    }
}

impl Projection for AdvancedProjection {
    type View = AdvancedRecord;

    fn project(state: &AppState) -> AdvancedRecord {
        state.advanced
    }
}

impl Projection for UiProjection {
    type View = UiState;

    fn project(state: &AppState) -> UiState {
        state.ui.clone()
    }
}

/// Result of one selector evaluation.
#[derive(Debug, Clone)]
pub struct Selected<V> {
    pub view: Arc<V>,
    pub changed: bool,
}

/// Memoizing selector over projection `P`.
pub struct Selector<P: Projection> {
    last: Option<Arc<P::View>>,
}

impl<P: Projection> Selector<P> {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn select(&mut self, state: &AppState) -> Selected<P::View> {
        let view = P::project(state);
        if let Some(last) = &self.last {
            if **last == view {
                return Selected {
                    view: Arc::clone(last),
                    changed: false,
                };
            }
        }
        let view = Arc::new(view);
        self.last = Some(Arc::clone(&view));
        Selected { view, changed: true }
    }

    /// Last view handed out, if any.
    pub fn current(&self) -> Option<&Arc<P::View>> {
        self.last.as_ref()
    }
}

impl<P: Projection> Default for Selector<P> {
    fn default() -> Self {
        Self::new()
    }
}

pub type ContentSelector = Selector<ContentProjection>;
pub type StyleSelector = Selector<StyleProjection>;
pub type AdvancedSelector = Selector<AdvancedProjection>;
pub type UiSelector = Selector<UiProjection>;

/// Which groups changed since the previous refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangedGroups {
    pub content: bool,
    pub style: bool,
    pub advanced: bool,
    pub ui: bool,
}

impl ChangedGroups {
    pub fn any(&self) -> bool {
        self.content || self.style || self.advanced || self.ui
    }

    /// Whether the rendered image could differ.
    pub fn affects_render(&self) -> bool {
        self.content || self.style
    }
}

/// All four group selectors, refreshed together.
#[derive(Default)]
pub struct SelectorSet {
    pub content: ContentSelector,
    pub style: StyleSelector,
    pub advanced: AdvancedSelector,
    pub ui: UiSelector,
}

impl SelectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, state: &AppState) -> ChangedGroups {
        let changed = ChangedGroups {
            content: self.content.select(state).changed,
            style: self.style.select(state).changed,
            advanced: self.advanced.select(state).changed,
            ui: self.ui.select(state).changed,
        };
        if changed.any() {
            tracing::trace!(?changed, "selectors recomputed");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AdvancedPatch, ContentPatch, FontFamily, UiPatch};
    use crate::store::Store;

    #[test]
    fn test_first_select_is_change() {
        let mut selector = ContentSelector::new();
        assert!(selector.current().is_none());
        assert!(selector.select(&AppState::default()).changed);
    }

    #[test]
    fn test_unrelated_mutation_keeps_same_arc() {
        let mut store = Store::new();
        let mut content = ContentSelector::new();
        let before = content.select(store.state()).view;

        store.set_advanced(AdvancedPatch::new().font_family(FontFamily::Mono));
        let after = content.select(store.state());

        assert!(!after.changed);
        assert!(Arc::ptr_eq(&before, &after.view));
    }

    #[test]
    fn test_equal_value_rewrite_is_unchanged() {
        let mut store = Store::new();
        let mut content = ContentSelector::new();
        content.select(store.state());

        store.set_content(ContentPatch::new().title("Build faster with Next.js"));
        assert!(!content.select(store.state()).changed);
    }

    #[test]
    fn test_set_reports_groups() {
        let mut store = Store::new();
        let mut selectors = SelectorSet::new();
        selectors.refresh(store.state());

        store.set_ui(UiPatch::new().generating(true));
        let changed = selectors.refresh(store.state());
        assert_eq!(
            changed,
            ChangedGroups {
                ui: true,
                ..ChangedGroups::default()
            }
        );
        assert!(!changed.affects_render());

        assert!(!selectors.refresh(store.state()).any());
    }
}
