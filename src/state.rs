//! Session, season, and feed state with pure transition functions.
//!
//! Everything here runs off-wasm so the feed bookkeeping is unit-testable;
//! the components translate events into these transitions.

use crate::api::Product;

/// Items requested for the first seasonal page.
pub const INITIAL_SEASON_PAGE: usize = 8;
/// Items requested per "Load More" click, both feeds.
pub const LOAD_MORE_PAGE: usize = 4;
/// Cap on related items shown in the detail dialog.
pub const MAX_RELATED: usize = 6;
/// Delay between consecutive related-item reveals.
pub const REVEAL_STRIDE_MS: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Season {
    #[default]
    Winter,
    Summer,
    Spring,
    Monsoon,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 5] = [
        Season::Winter,
        Season::Summer,
        Season::Spring,
        Season::Monsoon,
        Season::Autumn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Summer => "Summer",
            Season::Spring => "Spring",
            Season::Monsoon => "Monsoon",
            Season::Autumn => "Autumn",
        }
    }
}

/// The ordered products currently on the grid plus pagination bookkeeping.
///
/// `offset` counts items already requested beyond the initial page. On the
/// guest feed the backend tracks its own cursor, so the offset advances by
/// the page size no matter how many items came back; on the user feed it
/// advances by the genuinely new items only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub products: Vec<Product>,
    pub offset: usize,
    exhausted: bool,
}

impl Feed {
    /// Wholesale replacement on session or season change.
    pub fn replace(&mut self, items: Vec<Product>) {
        self.products = items;
        self.offset = 0;
        self.exhausted = false;
    }

    /// Append a guest page.
    pub fn append_guest(&mut self, items: Vec<Product>) {
        self.append_unique(items);
        self.offset += LOAD_MORE_PAGE;
    }

    /// Append a user page. A page with nothing new marks the feed exhausted
    /// so repeated clicks cannot loop forever without progress.
    pub fn append_user(&mut self, items: Vec<Product>) {
        let added = self.append_unique(items);
        if added == 0 {
            self.exhausted = true;
        } else {
            self.offset += added;
        }
    }

    /// The atomic reset applied on logout.
    pub fn reset(&mut self) {
        *self = Feed::default();
    }

    pub fn more_available(&self) -> bool {
        !self.exhausted && self.offset < self.products.len()
    }

    fn append_unique(&mut self, items: Vec<Product>) -> usize {
        let mut added = 0;
        for item in items {
            if self.products.iter().all(|p| p.product_id != item.product_id) {
                self.products.push(item);
                added += 1;
            }
        }
        added
    }
}

/// Build the candidate list for the detail dialog: the current product never
/// recommends itself, and the grid caps at [`MAX_RELATED`] entries.
pub fn stage_candidates(current_id: &str, fetched: Vec<Product>) -> Vec<Product> {
    fetched
        .into_iter()
        .filter(|p| p.product_id != current_id)
        .take(MAX_RELATED)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            product_id: id.to_string(),
            category: "Electronics".to_string(),
            brand: "Sonic".to_string(),
            features: "test features".to_string(),
            price_inr: 999.0,
        }
    }

    fn products(ids: &[&str]) -> Vec<Product> {
        ids.iter().map(|id| product(id)).collect()
    }

    #[test]
    fn replace_resets_pagination() {
        let mut feed = Feed::default();
        feed.append_user(products(&["A", "B"]));
        feed.append_user(vec![]);
        assert!(!feed.more_available());

        feed.replace(products(&["C", "D", "E"]));
        assert_eq!(feed.offset, 0);
        assert_eq!(feed.products.len(), 3);
        assert!(feed.more_available());
    }

    #[test]
    fn guest_append_advances_offset_by_page_size_even_when_short() {
        let mut feed = Feed::default();
        feed.replace(products(&["A", "B", "C", "D", "E", "F", "G", "H"]));

        feed.append_guest(products(&["I", "J"]));
        assert_eq!(feed.offset, LOAD_MORE_PAGE);
        assert_eq!(feed.products.len(), 10);
    }

    #[test]
    fn guest_append_drops_duplicates() {
        let mut feed = Feed::default();
        feed.replace(products(&["A", "B"]));

        feed.append_guest(products(&["B", "C"]));
        assert_eq!(feed.products.len(), 3);
        assert_eq!(feed.offset, LOAD_MORE_PAGE);
    }

    #[test]
    fn user_append_advances_offset_by_new_items_only() {
        let mut feed = Feed::default();
        feed.replace(products(&["A", "B", "C", "D"]));

        feed.append_user(products(&["C", "D", "E", "F"]));
        assert_eq!(feed.offset, 2);
        assert_eq!(feed.products.len(), 6);
    }

    #[test]
    fn user_append_never_introduces_duplicate_ids() {
        let mut feed = Feed::default();
        feed.replace(products(&["A", "B"]));
        feed.append_user(products(&["B", "C", "A"]));

        let mut ids: Vec<_> = feed.products.iter().map(|p| p.product_id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), feed.products.len());
    }

    #[test]
    fn all_duplicate_user_page_exhausts_the_feed() {
        let mut feed = Feed::default();
        feed.replace(products(&["A", "B"]));

        feed.append_user(products(&["A", "B"]));
        assert_eq!(feed.offset, 0);
        assert!(!feed.more_available());
    }

    #[test]
    fn preserves_display_order_on_append() {
        let mut feed = Feed::default();
        feed.replace(products(&["A", "B"]));
        feed.append_user(products(&["C", "A", "D"]));

        let ids: Vec<_> = feed.products.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C", "D"]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut feed = Feed::default();
        feed.replace(products(&["A"]));
        feed.append_user(vec![]);

        feed.reset();
        assert_eq!(feed, Feed::default());
    }

    #[test]
    fn empty_feed_has_no_more_pages() {
        assert!(!Feed::default().more_available());
    }

    // The worked example from the seasonal flow: 8 items on the first page,
    // a 4-item page after one click.
    #[test]
    fn guest_pagination_example() {
        let mut feed = Feed::default();
        feed.replace(products(&["A", "B", "C", "D", "E", "F", "G", "H"]));
        assert_eq!(feed.offset, 0);
        assert!(feed.more_available());

        feed.append_guest(products(&["I", "J", "K", "L"]));
        assert_eq!(feed.products.len(), 12);
        assert_eq!(feed.offset, 4);
    }

    #[test]
    fn candidates_exclude_current_product() {
        let staged = stage_candidates("A", products(&["A", "B", "C"]));
        assert!(staged.iter().all(|p| p.product_id != "A"));
        assert_eq!(staged.len(), 2);
    }

    #[test]
    fn candidates_cap_at_six() {
        let staged = stage_candidates(
            "X",
            products(&["A", "B", "C", "D", "E", "F", "G", "H"]),
        );
        assert_eq!(staged.len(), MAX_RELATED);
        let ids: Vec<_> = staged.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C", "D", "E", "F"]);
    }
}
