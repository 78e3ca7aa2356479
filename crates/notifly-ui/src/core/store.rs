//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store so components read consistent slices.
//! - Paginated fetches carry a generation token; a response is applied only
//!   when its token still matches, so a slow request resolving after a
//!   faster, later-issued one can never overwrite the newer page.

use notifly_api_models::{PageMeta, Template, is_empty_page};
use yewdux::store::Store;

use crate::core::pagination::result_message;
use crate::core::selection::SelectionState;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Paginated template list state.
    pub templates: TemplatePage,
}

/// State of the paginated template table.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TemplatePage {
    /// Rows of the current page, in display order.
    pub items: Vec<Template>,
    /// Meta for the current page, absent before the first load.
    pub meta: Option<PageMeta>,
    /// Row selection for the current page.
    pub selection: SelectionState,
    /// Result message shown under the table.
    pub message: String,
    /// Whether a fetch is in flight.
    pub loading: bool,
    generation: u64,
}

impl TemplatePage {
    /// Mark a fetch as started and return the token the response must carry.
    pub const fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Apply a fetched page if its token is still current.
    ///
    /// Returns `false` for a stale response, which is dropped without
    /// touching the displayed page.
    pub fn apply_page(
        &mut self,
        token: u64,
        items: Vec<Template>,
        meta: PageMeta,
        is_new_user: bool,
    ) -> bool {
        if token != self.generation {
            return false;
        }
        self.loading = false;
        let empty_page = is_empty_page(meta.page, meta.total_count, meta.size);
        self.message = result_message(
            meta.item_count,
            meta.page,
            meta.page_count,
            meta.total_count,
            is_new_user,
            empty_page,
        );
        self.items = items;
        self.meta = Some(meta);
        // The backing rows changed; selection does not survive navigation.
        self.selection.clear();
        true
    }

    /// Drop the loading flag after a failed fetch, keeping the stale page.
    pub const fn fail_fetch(&mut self, token: u64) {
        if token == self.generation {
            self.loading = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use notifly_api_models::{TemplateFormat, TemplateLanguage};
    use uuid::Uuid;

    fn template(title: &str) -> Template {
        Template {
            id: Uuid::new_v4(),
            title: title.to_string(),
            body: "Hello".to_string(),
            language: TemplateLanguage::En,
            format: TemplateFormat::Text,
            updated_at: Utc::now(),
        }
    }

    fn meta(page: u32, item_count: u32, total: u64) -> PageMeta {
        PageMeta::compute(page, 10, total, item_count)
    }

    #[test]
    fn apply_page_sets_rows_meta_and_message() {
        let mut state = TemplatePage::default();
        let token = state.begin_fetch();
        assert!(state.loading);
        assert!(state.apply_page(token, vec![template("A")], meta(1, 1, 21), false));
        assert!(!state.loading);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.message, "1 notification from page 1 of 3");
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut state = TemplatePage::default();
        let slow = state.begin_fetch();
        let fast = state.begin_fetch();
        assert!(state.apply_page(fast, vec![template("New")], meta(2, 1, 21), false));
        // The earlier request resolves late and must not overwrite page 2.
        assert!(!state.apply_page(slow, vec![template("Old")], meta(1, 1, 21), false));
        assert_eq!(state.items[0].title, "New");
        assert_eq!(state.meta.as_ref().map(|m| m.page), Some(2));
    }

    #[test]
    fn navigation_clears_the_selection() {
        let mut state = TemplatePage::default();
        let token = state.begin_fetch();
        state.apply_page(
            token,
            vec![template("A"), template("B")],
            meta(1, 2, 2),
            false,
        );
        state.selection.toggle_row(0);
        assert!(state.selection.indeterminate(2));

        let token = state.begin_fetch();
        state.apply_page(token, vec![template("C")], meta(2, 1, 2), false);
        assert_eq!(state.selection.live_count(1), 0);
    }

    #[test]
    fn failed_fetch_keeps_the_current_page() {
        let mut state = TemplatePage::default();
        let token = state.begin_fetch();
        state.apply_page(token, vec![template("A")], meta(1, 1, 1), false);

        let token = state.begin_fetch();
        state.fail_fetch(token);
        assert!(!state.loading);
        assert_eq!(state.items.len(), 1);
    }
}
