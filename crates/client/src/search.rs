//! Header product search: debounce plus substring filter.
//!
//! The backend has no search endpoint; the header fetches the full product
//! list once and filters client-side by case-insensitive substring match on
//! name or description. Keystrokes are debounced so the filter runs only
//! after 300ms of input inactivity.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::api::types::Product;

/// Input inactivity window before a search runs.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Collapses a burst of calls into the last one.
///
/// Each caller invokes [`Debouncer::settle`]; only the invocation that is
/// still the newest when the window elapses reports `true`. Handles are
/// cheap to clone and share one generation counter.
#[derive(Clone)]
pub struct Debouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the quiet window. Returns `true` if no newer call arrived
    /// meanwhile; a `false` result means this input was superseded and its
    /// work should be skipped.
    pub async fn settle(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.window).await;
        self.generation.load(Ordering::SeqCst) == generation
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

/// Case-insensitive substring filter over name and description.
///
/// An empty or whitespace-only query matches nothing: the closed search
/// surface shows no results.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&query)
                || product.description.to_lowercase().contains(&query)
        })
        .collect()
}

/// Header search surface state: the current query and its result set.
///
/// The caller gates [`HeaderSearch::set_query`] behind
/// [`Debouncer::settle`]; the state itself is synchronous.
#[derive(Default)]
pub struct HeaderSearch {
    products: Vec<Product>,
    query: String,
    results: Vec<Product>,
}

impl HeaderSearch {
    /// Create a search surface over the fetched product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            query: String::new(),
            results: Vec::new(),
        }
    }

    /// Apply a query, replacing the result set.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.results = filter_products(&self.products, query)
            .into_iter()
            .cloned()
            .collect();
    }

    /// The current query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current result set.
    #[must_use]
    pub fn results(&self) -> &[Product] {
        &self.results
    }

    /// Close the surface: clears both the query and the result set.
    pub fn close(&mut self) {
        self.query.clear();
        self.results.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, description: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "description": description,
            "price": 1499.0,
            "category_id": "c-1",
            "created_at": "2025-08-25T10:00:00Z"
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("p-1", "Classic Tee", "Soft cotton crew neck"),
            product("p-2", "Denim Jacket", "Stonewashed blue denim"),
            product("p-3", "Hoodie", "Fleece-lined, cotton blend"),
        ]
    }

    #[test]
    fn test_filter_matches_name_case_insensitive() {
        let products = catalog();
        let results = filter_products(&products, "TEE");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "p-1");
    }

    #[test]
    fn test_filter_matches_description() {
        let products = catalog();
        let results = filter_products(&products, "cotton");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let products = catalog();
        assert!(filter_products(&products, "").is_empty());
        assert!(filter_products(&products, "   ").is_empty());
    }

    #[test]
    fn test_close_clears_query_and_results() {
        let mut search = HeaderSearch::new(catalog());
        search.set_query("denim");
        assert_eq!(search.results().len(), 1);

        search.close();
        assert_eq!(search.query(), "");
        assert!(search.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_last_call_wins() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let first = debouncer.clone();
        let second = debouncer.clone();

        let first_task = tokio::spawn(async move { first.settle().await });
        // Let the first settle() register its generation before superseding it.
        tokio::task::yield_now().await;
        let second_task = tokio::spawn(async move { second.settle().await });
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(301)).await;

        assert!(!first_task.await.unwrap());
        assert!(second_task.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_single_call_settles() {
        let debouncer = Debouncer::default();
        let task = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.settle().await }
        });
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(301)).await;

        assert!(task.await.unwrap());
    }
}
