//! Dashboard listing state — app-owned, SDK-provided search/sort/paging.

use super::CoinMarket;
use std::cmp::Ordering;

/// Rows per dashboard page.
pub const PAGE_SIZE: usize = 10;

/// Column the dashboard is sorted by. Every key sorts descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    MarketCap,
    Price,
    Volume,
    Change24h,
}

impl SortKey {
    fn value(&self, coin: &CoinMarket) -> f64 {
        match self {
            Self::MarketCap => coin.market_cap,
            Self::Price => coin.current_price,
            Self::Volume => coin.total_volume,
            Self::Change24h => coin.price_change_percentage_24h,
        }
    }
}

/// The fetched coin list plus the user's search text, sort and page.
///
/// The app owns instances of this type. The SDK provides update methods.
#[derive(Debug, Clone)]
pub struct CoinListing {
    coins: Vec<CoinMarket>,
    search: String,
    sort: SortKey,
    page: usize,
}

impl Default for CoinListing {
    fn default() -> Self {
        Self {
            coins: Vec::new(),
            search: String::new(),
            sort: SortKey::default(),
            page: 1,
        }
    }
}

impl CoinListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing (e.g. after a currency change) and go back to page 1.
    pub fn replace(&mut self, coins: Vec<CoinMarket>) {
        self.coins = coins;
        self.page = 1;
        self.apply_sort();
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.apply_sort();
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Select a 1-based page, clamped to the available range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.coins.len().div_ceil(PAGE_SIZE)
    }

    fn query(&self) -> Option<String> {
        let q = self.search.trim().to_lowercase();
        (!q.is_empty()).then_some(q)
    }

    pub fn is_searching(&self) -> bool {
        self.query().is_some()
    }

    /// Rows to render: every search match while searching, otherwise the current page.
    pub fn visible(&self) -> Vec<&CoinMarket> {
        match self.query() {
            Some(q) => self.coins.iter().filter(|c| c.matches(&q)).collect(),
            None => {
                let start = (self.page - 1) * PAGE_SIZE;
                self.coins.iter().skip(start).take(PAGE_SIZE).collect()
            }
        }
    }

    /// A non-empty search matched nothing.
    pub fn no_results(&self) -> bool {
        self.is_searching() && self.visible().is_empty()
    }

    pub fn coins(&self) -> &[CoinMarket] {
        &self.coins
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    fn apply_sort(&mut self) {
        let key = self.sort;
        self.coins.sort_by(|a, b| {
            key.value(b)
                .partial_cmp(&key.value(a))
                .unwrap_or(Ordering::Equal)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::CoinId;

    fn coin(id: &str, symbol: &str, cap: f64, price: f64) -> CoinMarket {
        CoinMarket {
            id: CoinId::from(id),
            symbol: symbol.to_string(),
            name: id.to_uppercase(),
            image: None,
            current_price: price,
            market_cap: cap,
            market_cap_rank: None,
            total_volume: 0.0,
            high_24h: None,
            low_24h: None,
            price_change_24h: 0.0,
            price_change_percentage_24h: 0.0,
        }
    }

    fn many(n: usize) -> Vec<CoinMarket> {
        (0..n)
            .map(|i| coin(&format!("coin{i}"), &format!("c{i}"), (n - i) as f64, 1.0))
            .collect()
    }

    #[test]
    fn test_pagination() {
        let mut listing = CoinListing::new();
        listing.replace(many(25));
        assert_eq!(listing.page_count(), 3);
        assert_eq!(listing.visible().len(), 10);
        listing.set_page(3);
        let ids: Vec<_> = listing.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(ids[0], "coin20");
    }

    #[test]
    fn test_page_is_clamped() {
        let mut listing = CoinListing::new();
        listing.replace(many(12));
        listing.set_page(9);
        assert_eq!(listing.page(), 2);
        listing.set_page(0);
        assert_eq!(listing.page(), 1);
    }

    #[test]
    fn test_search_matches_name_or_symbol_and_bypasses_paging() {
        let mut listing = CoinListing::new();
        let mut coins = many(30);
        coins.push(coin("bitcoin", "btc", 0.5, 64000.0));
        listing.replace(coins);
        listing.set_page(2);

        listing.set_search("  BTC ");
        let ids: Vec<_> = listing.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["bitcoin"]);

        listing.set_search("coin");
        assert_eq!(listing.visible().len(), 31);
    }

    #[test]
    fn test_no_results() {
        let mut listing = CoinListing::new();
        listing.replace(many(3));
        listing.set_search("   ");
        assert!(!listing.no_results());
        listing.set_search("zzz");
        assert!(listing.no_results());
        listing.clear_search();
        assert!(!listing.is_searching());
    }

    #[test]
    fn test_sort_by_price() {
        let mut listing = CoinListing::new();
        listing.replace(vec![
            coin("a", "a", 3.0, 1.0),
            coin("b", "b", 1.0, 100.0),
            coin("c", "c", 2.0, 10.0),
        ]);
        let by_cap: Vec<_> = listing.coins().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(by_cap, ["a", "c", "b"]);

        listing.set_sort(SortKey::Price);
        let by_price: Vec<_> = listing.coins().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(by_price, ["b", "c", "a"]);
    }
}
