use recall_core::{Card, Page, SortConfig, SortKey};
use services::{CardApiError, CardListParams};

use crate::views::{ViewError, ViewState};

/// Page size the client always sends, so pagination controls don't depend on
/// the server's listing defaults.
pub const PAGE_SIZE: u32 = 20;

/// A stamped listing request. The caller performs the network call and hands
/// the result back to `finish_load` together with the generation; a result
/// carrying a superseded generation is discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingLoad {
    pub generation: u64,
    pub params: CardListParams,
}

/// State machine behind the card table: current sort, search and page, plus
/// the load state of the page under those parameters.
///
/// All methods are synchronous; the suspension point lives between
/// `start_load` and `finish_load` in whatever drives the view model.
pub struct CollectionVm {
    sort: SortConfig,
    page_index: u32,
    search: String,
    state: ViewState<Page<Card>>,
    generation: u64,
}

impl CollectionVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sort: SortConfig::default(),
            page_index: 0,
            search: String::new(),
            state: ViewState::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState<Page<Card>> {
        &self.state
    }

    #[must_use]
    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Toggle the sort column; same key flips direction, a new key resets to
    /// ascending. Paging restarts from the first page.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
        self.page_index = 0;
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.page_index = 0;
    }

    /// Move to the next page if the current one is not the last.
    pub fn next_page(&mut self) -> bool {
        match self.state.ready() {
            Some(page) if !page.last => {
                self.page_index += 1;
                true
            }
            _ => false,
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page_index > 0 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    /// Enter `Loading` and stamp a new request. Any load still in flight is
    /// superseded from this point on.
    pub fn start_load(&mut self) -> PendingLoad {
        self.generation += 1;
        self.state = ViewState::Loading;
        let search = self.search.trim();
        PendingLoad {
            generation: self.generation,
            params: CardListParams {
                sort: self.sort,
                page: Some(self.page_index),
                size: Some(PAGE_SIZE),
                search: (!search.is_empty()).then(|| search.to_owned()),
            },
        }
    }

    /// Apply a load result. Returns false (and changes nothing) when the
    /// result belongs to a superseded request.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<Page<Card>, CardApiError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = match result {
            Ok(page) => ViewState::Ready(page),
            Err(_) => ViewState::Error(ViewError::Api),
        };
        true
    }
}

impl Default for CollectionVm {
    fn default() -> Self {
        Self::new()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::{SortDirection, time::fixed_now};
    use recall_core::{BackText, CardId, FrontText};

    fn card(id: &str, front: &str) -> Card {
        Card::new(
            CardId::new(id),
            FrontText::parse(front).unwrap(),
            BackText::parse("A").unwrap(),
            fixed_now(),
            fixed_now(),
        )
    }

    fn page_of(cards: Vec<Card>, last: bool) -> Page<Card> {
        let len = cards.len();
        Page {
            content: cards,
            page: 0,
            size: PAGE_SIZE,
            total_elements: len as u64,
            total_pages: 1,
            last,
        }
    }

    #[test]
    fn superseded_load_never_overwrites_a_later_one() {
        let mut vm = CollectionVm::new();
        let first = vm.start_load();
        let second = vm.start_load();

        // The later request resolves first.
        let applied = vm.finish_load(second.generation, Ok(page_of(vec![card("2", "new")], true)));
        assert!(applied);

        // The earlier one resolves afterwards and must be dropped.
        let applied = vm.finish_load(first.generation, Ok(page_of(vec![card("1", "old")], true)));
        assert!(!applied);

        let page = vm.state().ready().expect("ready");
        assert_eq!(page.content[0].front(), "new");
    }

    #[test]
    fn toggling_sort_resets_paging_and_changes_params() {
        let mut vm = CollectionVm::new();
        vm.finish_load(vm.start_load().generation, Ok(page_of(vec![card("1", "Q")], false)));
        assert!(vm.next_page());
        assert_eq!(vm.page_index(), 1);

        vm.toggle_sort(SortKey::Front);
        assert_eq!(vm.page_index(), 0);
        let pending = vm.start_load();
        assert_eq!(pending.params.sort.key, SortKey::Front);
        assert_eq!(pending.params.sort.direction, SortDirection::Asc);
        assert_eq!(pending.params.page, Some(0));
    }

    #[test]
    fn failure_drops_the_previous_page() {
        let mut vm = CollectionVm::new();
        vm.finish_load(vm.start_load().generation, Ok(page_of(vec![card("1", "Q")], true)));
        assert!(vm.state().ready().is_some());

        let pending = vm.start_load();
        assert_eq!(*vm.state(), ViewState::Loading);
        vm.finish_load(
            pending.generation,
            Err(CardApiError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY)),
        );
        assert_eq!(*vm.state(), ViewState::Error(ViewError::Api));
    }

    #[test]
    fn blank_search_is_not_sent() {
        let mut vm = CollectionVm::new();
        vm.set_search("   ".to_owned());
        assert_eq!(vm.start_load().params.search, None);

        vm.set_search(" rust ".to_owned());
        assert_eq!(vm.start_load().params.search, Some("rust".to_owned()));
    }

    #[test]
    fn paging_is_guarded_by_the_envelope() {
        let mut vm = CollectionVm::new();
        assert!(!vm.prev_page());
        assert!(!vm.next_page()); // nothing loaded yet

        vm.finish_load(vm.start_load().generation, Ok(page_of(vec![card("1", "Q")], true)));
        assert!(!vm.next_page()); // last page
    }
}
