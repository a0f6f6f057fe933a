//! Documentation controller
//!
//! The single owner of navigation state. Views read through the accessors
//! and change state only through the transitions below:
//!
//! | Transition | Effect |
//! |------------|--------|
//! | [`select_section`](DocsController::select_section) | active section + `#id` pushed to the location |
//! | [`sync_location`](DocsController::sync_location) | applies external fragment changes |
//! | [`back`](DocsController::back) / [`forward`](DocsController::forward) | history step, then sync |
//! | [`navigate`](DocsController::navigate) | typed address, then sync |
//! | [`set_query`](DocsController::set_query) | replaces the search outcome |
//! | [`toggle_category`](DocsController::toggle_category) | sidebar only |
//!
//! The controller subscribes to the location when it starts and the
//! subscription is released when the controller is dropped.

use super::content::ContentBlock;
use super::docset::DocSet;
use super::location::{Fragment, Location, Subscription};
use super::registry::SectionRegistry;
use super::router::{Navigation, Router};
use super::search::{SearchEntry, SearchOutcome};
use super::section::{CategoryId, Section, SectionId};
use super::sidebar::SidebarState;

/// Behaviour switches for a controller
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    /// Expand the owning category when a section is selected
    pub auto_expand: bool,
    /// Categories expanded at start, in addition to the doc set's defaults
    pub expanded: Vec<CategoryId>,
}

/// Owns router, sidebar and search state for one doc set
#[derive(Debug)]
pub struct DocsController {
    docs: DocSet,
    router: Router,
    sidebar: SidebarState,
    query: String,
    search: SearchOutcome,
    location: Location,
    subscription: Subscription,
    options: ControllerOptions,
}

impl DocsController {
    /// Reads the location once for the initial section and starts listening
    pub fn start(docs: DocSet, location: Location, options: ControllerOptions) -> Self {
        let router = Router::initial(docs.registry(), &location.current());
        let sidebar = SidebarState::new(
            docs.registry(),
            docs.expanded_defaults().iter().chain(&options.expanded),
        );
        let subscription = location.subscribe();

        Self {
            docs,
            router,
            sidebar,
            query: String::new(),
            search: SearchOutcome::Inactive,
            location,
            subscription,
            options,
        }
    }

    // --- Transitions ---

    /// Shows a section and writes `#id` to the location
    ///
    /// Unknown IDs are ignored and leave both state and location untouched.
    pub fn select_section(&mut self, id: &str) -> Navigation {
        let navigation = self.router.select(self.docs.registry(), id);
        if navigation == Navigation::Ignored {
            return navigation;
        }

        self.location.push(Fragment::for_id(self.router.active()));

        if self.options.auto_expand {
            self.expand_active_category();
        }

        navigation
    }

    /// Selects the `index`-th entry of the current search results
    pub fn select_search_result(&mut self, index: usize) -> Navigation {
        let id = match self.search.entries().get(index) {
            Some(entry) => entry.id.clone(),
            None => return Navigation::Ignored,
        };
        self.select_section(id.as_str())
    }

    /// Applies fragment changes made outside the controller
    ///
    /// Returns true if the active section changed.
    pub fn sync_location(&mut self) -> bool {
        let before = self.router.active().clone();

        for change in self.subscription.drain() {
            self.router
                .on_external_fragment_change(self.docs.registry(), &change.fragment);
        }

        let changed = &before != self.router.active();
        if changed && self.options.auto_expand {
            self.expand_active_category();
        }
        changed
    }

    /// History back; returns true if the active section changed
    pub fn back(&mut self) -> bool {
        self.location.back() && self.sync_location()
    }

    /// History forward; returns true if the active section changed
    pub fn forward(&mut self) -> bool {
        self.location.forward() && self.sync_location()
    }

    /// Navigates to a typed or pasted address such as `#installation`
    pub fn navigate(&mut self, raw: &str) -> bool {
        self.location.navigate(Fragment::parse(raw));
        self.sync_location()
    }

    /// Replaces the search outcome with the results for `text`
    pub fn set_query(&mut self, text: &str) -> &SearchOutcome {
        self.query = text.to_string();
        self.search = self.docs.query(text);
        &self.search
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.search = SearchOutcome::Inactive;
    }

    /// Flips a category's expand state; `None` if the category is unknown
    pub fn toggle_category(&mut self, id: &str) -> Option<bool> {
        self.sidebar.toggle(id)
    }

    pub fn expand_all(&mut self) {
        self.sidebar.expand_all();
    }

    pub fn collapse_all(&mut self) {
        self.sidebar.collapse_all();
    }

    /// Swaps in a freshly loaded doc set, keeping as much state as still applies
    ///
    /// Returns true if the active section had to change.
    pub fn reload(&mut self, docs: DocSet) -> bool {
        let known: Vec<CategoryId> = self
            .docs
            .registry()
            .categories()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        let previous = self.sidebar.expanded_ids();
        self.docs = docs;

        // Categories seen before keep their state; new ones start from the defaults
        let fresh = self
            .docs
            .expanded_defaults()
            .iter()
            .chain(&self.options.expanded)
            .filter(|id| !known.contains(id));
        self.sidebar = SidebarState::new(self.docs.registry(), previous.iter().chain(fresh));

        let query = std::mem::take(&mut self.query);
        self.set_query(&query);

        let moved = self.router.revalidate(self.docs.registry()).moved();
        if moved {
            self.location.replace(Fragment::for_id(self.router.active()));
        }
        moved
    }

    fn expand_active_category(&mut self) {
        if let Some(category) = self.docs.registry().category_of(self.router.active().as_str()) {
            let id = category.id.clone();
            self.sidebar.expand(&id);
        }
    }

    // --- Read access ---

    pub fn active(&self) -> &SectionId {
        self.router.active()
    }

    pub fn active_section(&self) -> &Section {
        self.docs.registry().section(self.docs.registry().resolve(self.router.active().as_str()))
    }

    /// Content for the active section
    pub fn render_active(&self) -> &ContentBlock {
        self.docs.render(self.router.active().as_str())
    }

    /// Content for any ID, falling back to the default section
    pub fn render(&self, id: &str) -> &ContentBlock {
        self.docs.render(id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search(&self) -> &SearchOutcome {
        &self.search
    }

    pub fn search_results(&self) -> &[SearchEntry] {
        self.search.entries()
    }

    pub fn sidebar(&self) -> &SidebarState {
        &self.sidebar
    }

    pub fn registry(&self) -> &SectionRegistry {
        self.docs.registry()
    }

    pub fn docs(&self) -> &DocSet {
        &self.docs
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{getting_started_only_docset, sample_docset};
    use proptest::prelude::*;

    fn start(fragment: &str) -> DocsController {
        DocsController::start(
            sample_docset(),
            Location::parse(fragment),
            ControllerOptions::default(),
        )
    }

    #[test]
    fn deep_link_sets_initial_section() {
        let controller = start("#quick-start");
        assert_eq!(controller.active().as_str(), "quick-start");
        assert_eq!(controller.render_active().title, "Quick Start");
    }

    #[test]
    fn unknown_deep_link_uses_default() {
        let controller = start("#missing");
        assert_eq!(controller.active().as_str(), "introduction");
    }

    #[test]
    fn select_updates_fragment() {
        let mut controller = start("#quick-start");

        let nav = controller.select_section("configuration");

        assert!(nav.moved());
        assert_eq!(controller.active().as_str(), "configuration");
        assert_eq!(controller.location().current().to_string(), "#configuration");
    }

    #[test]
    fn select_active_section_still_writes_fragment() {
        let mut controller = start("");
        assert_eq!(controller.select_section("introduction"), Navigation::Unchanged);
        assert_eq!(controller.location().current().to_string(), "#introduction");
    }

    #[test]
    fn select_unknown_is_ignored() {
        let mut controller = start("#installation");
        assert_eq!(controller.select_section("nope"), Navigation::Ignored);
        assert_eq!(controller.active().as_str(), "installation");
        assert_eq!(controller.location().current().to_string(), "#installation");
    }

    #[test]
    fn select_does_not_notify_itself() {
        let mut controller = start("");
        controller.select_section("installation");
        assert!(!controller.sync_location());
        assert_eq!(controller.active().as_str(), "installation");
    }

    #[test]
    fn external_fragment_change_round_trip() {
        let mut controller = start("");
        controller.select_section("installation");

        let location = controller.location().clone();
        location.navigate(Fragment::parse("#installation"));
        assert!(!controller.sync_location());
        assert_eq!(controller.active().as_str(), "installation");

        location.navigate(Fragment::parse("#configuration"));
        assert!(controller.sync_location());
        assert_eq!(controller.active().as_str(), "configuration");
    }

    #[test]
    fn external_empty_fragment_falls_back_to_default() {
        let mut controller = start("#configuration");
        assert!(controller.navigate("#"));
        assert_eq!(controller.active().as_str(), "introduction");
    }

    #[test]
    fn back_and_forward_follow_history() {
        let mut controller = start("#introduction");
        controller.select_section("installation");
        controller.select_section("configuration");

        assert!(controller.back());
        assert_eq!(controller.active().as_str(), "installation");
        assert!(controller.back());
        assert_eq!(controller.active().as_str(), "introduction");
        assert!(!controller.back());

        assert!(controller.forward());
        assert_eq!(controller.active().as_str(), "installation");
    }

    #[test]
    fn search_results_can_be_selected() {
        let mut controller = start("");
        let outcome = controller.set_query("quick");
        assert_eq!(outcome.entries().len(), 1);
        assert_eq!(outcome.entries()[0].category, "Getting Started");

        assert!(controller.select_search_result(0).moved());
        assert_eq!(controller.active().as_str(), "quick-start");
        assert_eq!(controller.select_search_result(5), Navigation::Ignored);
    }

    #[test]
    fn queries_overwrite_previous_results() {
        let mut controller = start("");
        controller.set_query("a");
        assert_eq!(controller.search_results().len(), 4);
        controller.set_query("config");
        assert_eq!(controller.search_results().len(), 1);
        controller.set_query("  ");
        assert!(!controller.search().is_active());
        controller.set_query("quick");
        controller.clear_query();
        assert_eq!(controller.query(), "");
        assert!(controller.search_results().is_empty());
    }

    #[test]
    fn toggling_does_not_change_active_section() {
        let mut controller = start("#installation");
        let before = controller.render_active().clone();

        assert_eq!(controller.toggle_category("guides"), Some(true));
        assert_eq!(controller.toggle_category("getting-started"), Some(false));
        assert_eq!(controller.toggle_category("missing"), None);

        assert_eq!(controller.active().as_str(), "installation");
        assert_eq!(controller.render_active(), &before);
    }

    #[test]
    fn selecting_does_not_change_expand_state() {
        let mut controller = start("");
        let before = controller.sidebar().clone();

        controller.select_section("configuration");
        controller.select_section("quick-start");

        assert_eq!(controller.sidebar(), &before);
        assert!(!controller.sidebar().is_expanded("guides"));
    }

    #[test]
    fn auto_expand_opens_owning_category_only() {
        let mut controller = DocsController::start(
            sample_docset(),
            Location::default(),
            ControllerOptions {
                auto_expand: true,
                expanded: vec![],
            },
        );
        controller.toggle_category("getting-started");
        assert!(!controller.sidebar().is_expanded("getting-started"));

        controller.select_section("configuration");

        assert!(controller.sidebar().is_expanded("guides"));
        assert!(!controller.sidebar().is_expanded("getting-started"));
    }

    #[test]
    fn options_add_expanded_categories() {
        let controller = DocsController::start(
            sample_docset(),
            Location::default(),
            ControllerOptions {
                auto_expand: false,
                expanded: vec![CategoryId::from_title("Guides").unwrap()],
            },
        );
        assert!(controller.sidebar().is_expanded("guides"));
        assert!(controller.sidebar().is_expanded("getting-started"));
    }

    #[test]
    fn subscription_released_on_drop() {
        let location = Location::default();
        let controller =
            DocsController::start(sample_docset(), location.clone(), ControllerOptions::default());
        assert_eq!(location.listener_count(), 1);

        drop(controller);
        assert_eq!(location.listener_count(), 0);
    }

    #[test]
    fn reload_keeps_state_that_still_applies() {
        let mut controller = start("#configuration");
        controller.toggle_category("guides");
        controller.set_query("install");

        let moved = controller.reload(getting_started_only_docset());

        assert!(moved);
        assert_eq!(controller.active().as_str(), "introduction");
        assert_eq!(controller.location().current().to_string(), "#introduction");
        assert_eq!(controller.search_results().len(), 1);
        assert!(controller.sidebar().is_expanded("getting-started"));
    }

    #[test]
    fn reload_keeps_collapsed_defaults_collapsed() {
        let mut controller = start("#introduction");
        controller.toggle_category("getting-started");
        assert!(!controller.sidebar().is_expanded("getting-started"));

        controller.reload(sample_docset());

        assert!(!controller.sidebar().is_expanded("getting-started"));
    }

    #[test]
    fn scenario_from_getting_started_to_guides() {
        let mut controller = start("#quick-start");
        assert_eq!(controller.active().as_str(), "quick-start");

        controller.select_section("configuration");
        assert_eq!(controller.location().current().to_string(), "#configuration");
        assert_eq!(controller.active().as_str(), "configuration");

        let results = controller.set_query("quick").entries().to_vec();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "quick-start");
        assert_eq!(results[0].category, "Getting Started");
    }

    proptest! {
        #[test]
        fn select_then_external_change_is_idempotent(index in 0usize..4) {
            let mut controller = start("");
            let id = controller.registry().sections().nth(index).unwrap().id.clone();

            controller.select_section(id.as_str());
            prop_assert_eq!(controller.location().current().to_string(), format!("#{}", id));

            controller.navigate(&format!("#{}", id));
            prop_assert_eq!(controller.active(), &id);
        }

        #[test]
        fn active_section_always_exists(ops in proptest::collection::vec("[a-z#-]{0,14}", 0..12)) {
            let mut controller = start("");
            for (i, op) in ops.iter().enumerate() {
                match i % 3 {
                    0 => { controller.select_section(op); }
                    1 => { controller.navigate(op); }
                    _ => { controller.back(); }
                }
                prop_assert!(controller.registry().contains(controller.active().as_str()));
            }
        }

        #[test]
        fn unknown_ids_render_default(id in "[a-z]{1,10}") {
            let controller = start("");
            prop_assume!(!controller.registry().contains(&id));
            prop_assert_eq!(controller.render(&id), controller.render("introduction"));
        }
    }
}
