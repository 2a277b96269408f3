//! Hybrid list-entry search.
//!
//! Keyword searches go to the full-text index (one index per kind) and are
//! stitched into a single sequence: every category hit comes before every
//! product hit, and the caller's window is applied to that combined sequence.
//! Everything else goes to the direct list search.

use std::sync::Arc;

use tracing::debug;

use catalog_core::CatalogResult;
use catalog_model::{EntryKind, ListEntry, ResponseGroup, SearchCriteria, SearchResult};

use crate::indexed_search::{IndexSearchRequest, IndexedSearch};
use crate::list_search::ListEntrySearch;
use crate::settings::{SettingsProvider, USE_INDEXED_SEARCH};

const CATEGORY_INDEX_GROUP: ResponseGroup = ResponseGroup::INFO.union(ResponseGroup::OUTLINES);
const PRODUCT_INDEX_GROUP: ResponseGroup = ResponseGroup::INFO.union(ResponseGroup::OUTLINES);

#[derive(Clone)]
pub struct HybridSearch {
    index: Arc<dyn IndexedSearch>,
    direct: Arc<dyn ListEntrySearch>,
    settings: Arc<dyn SettingsProvider>,
    setting_name: String,
}

impl HybridSearch {
    pub fn new(
        index: Arc<dyn IndexedSearch>,
        direct: Arc<dyn ListEntrySearch>,
        settings: Arc<dyn SettingsProvider>,
    ) -> Self {
        Self {
            index,
            direct,
            settings,
            setting_name: USE_INDEXED_SEARCH.to_string(),
        }
    }

    pub fn with_setting_name(mut self, name: impl Into<String>) -> Self {
        self.setting_name = name.into();
        self
    }

    /// Keyword to run through the index, or `None` for the direct path.
    fn indexed_keyword<'c>(&self, criteria: &'c SearchCriteria) -> Option<&'c str> {
        let keyword = criteria.keyword()?;
        self.settings
            .get_flag(&self.setting_name, true)
            .then_some(keyword)
    }

    /// Search without authorization; callers check `Read` first.
    pub async fn search(&self, criteria: &SearchCriteria) -> CatalogResult<SearchResult> {
        match self.indexed_keyword(criteria) {
            Some(keyword) => self.search_indexed(criteria, keyword).await,
            None => {
                debug!(skip = criteria.skip, take = criteria.take, "direct list-entry search");
                Ok(self.direct.search(criteria).await?)
            }
        }
    }

    async fn search_indexed(&self, criteria: &SearchCriteria, keyword: &str) -> CatalogResult<SearchResult> {
        let window = criteria.window();

        // The product window depends on the category total, so the two index
        // calls cannot run concurrently.
        let categories = self
            .index
            .search(&IndexSearchRequest::from_criteria(
                EntryKind::Category,
                criteria,
                keyword,
                window,
                CATEGORY_INDEX_GROUP,
            ))
            .await?;

        let split = window.consume(categories.total_count);

        let products = self
            .index
            .search(&IndexSearchRequest::from_criteria(
                EntryKind::Product,
                criteria,
                keyword,
                split.remaining,
                PRODUCT_INDEX_GROUP,
            ))
            .await?;

        debug!(
            keyword,
            skip = window.skip,
            take = window.take,
            categories = categories.total_count,
            products = products.total_count,
            "indexed list-entry search"
        );

        let total_count = categories.total_count + products.total_count;
        let results: Vec<ListEntry> = categories
            .items
            .into_iter()
            .chain(products.items)
            .map(ListEntry::from)
            .collect();

        Ok(SearchResult::new(results, total_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::InMemorySettings;
    use crate::testing::{FailingIndex, SearchFixture, StubListSearch};
    use catalog_core::{AdapterError, CatalogError};
    use catalog_model::PaginationWindow;

    #[tokio::test]
    async fn blank_keyword_uses_direct_search() {
        let fixture = SearchFixture::new(3, 4);
        let criteria = SearchCriteria::default().with_keyword("  ");

        let result = fixture.search().search(&criteria).await.unwrap();

        assert!(fixture.index.requests().is_empty());
        assert_eq!(result.total_count, 7);
    }

    #[tokio::test]
    async fn disabled_setting_forces_direct_search() {
        let fixture = SearchFixture::new(3, 4);
        let settings = Arc::new(InMemorySettings::new().with_flag(USE_INDEXED_SEARCH, false));
        let search = HybridSearch::new(fixture.index.clone(), fixture.direct.clone(), settings);

        let result = search
            .search(&SearchCriteria::default().with_keyword("tea"))
            .await
            .unwrap();

        assert!(fixture.index.requests().is_empty());
        assert_eq!(result.total_count, 7);
    }

    #[tokio::test]
    async fn explicit_ids_bypass_keyword() {
        let fixture = SearchFixture::new(3, 4);
        let criteria = SearchCriteria::default()
            .with_keyword("nomatch")
            .with_object_ids(vec!["p-001".into()]);

        let result = fixture.search().search(&criteria).await.unwrap();

        assert!(fixture.index.requests().is_empty());
        assert_eq!(result.total_count, 1);
        let ids: Vec<&str> = result.results.iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["p-001"]);
    }

    #[tokio::test]
    async fn direct_results_pass_through_untouched() {
        let direct = Arc::new(StubListSearch::synthetic_and_product());
        let expected = direct.result().clone();
        let search = HybridSearch::new(
            Arc::new(FailingIndex),
            direct,
            Arc::new(InMemorySettings::new()),
        );

        let result = search.search(&SearchCriteria::default()).await.unwrap();
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn window_past_categories_continues_into_products() {
        let fixture = SearchFixture::new(12, 50);
        let criteria = SearchCriteria::default().with_keyword("tea").paged(15, 10);

        let result = fixture.search().search(&criteria).await.unwrap();

        let requests = fixture.index.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].kind, EntryKind::Category);
        assert_eq!(requests[0].window, PaginationWindow::new(15, 10));
        assert_eq!(requests[1].kind, EntryKind::Product);
        assert_eq!(requests[1].window, PaginationWindow::new(3, 10));

        assert_eq!(result.total_count, 62);
        assert_eq!(result.results.len(), 10);
        assert!(result
            .results
            .iter()
            .all(|e| e.entry_kind() == Some(EntryKind::Product)));
        assert_eq!(result.results[0].id().as_str(), "p-003");
    }

    #[tokio::test]
    async fn zero_take_reports_total_without_rows() {
        let fixture = SearchFixture::new(5, 5);
        let criteria = SearchCriteria::default().with_keyword("tea").paged(0, 0);

        let result = fixture.search().search(&criteria).await.unwrap();

        assert!(result.results.is_empty());
        assert_eq!(result.total_count, 10);
        assert_eq!(fixture.index.requests().len(), 2);
    }

    #[tokio::test]
    async fn skip_beyond_total_returns_empty_page() {
        let fixture = SearchFixture::new(2, 3);
        let criteria = SearchCriteria::default().with_keyword("tea").paged(40, 10);

        let result = fixture.search().search(&criteria).await.unwrap();

        assert!(result.results.is_empty());
        assert_eq!(result.total_count, 5);
    }

    #[tokio::test]
    async fn index_failure_fails_the_whole_search() {
        let fixture = SearchFixture::new(2, 3);
        let search = HybridSearch::new(
            Arc::new(FailingIndex),
            fixture.direct.clone(),
            Arc::new(InMemorySettings::new()),
        );

        let err = search
            .search(&SearchCriteria::default().with_keyword("tea"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Adapter(AdapterError::Index(_))));
    }

    #[tokio::test]
    async fn filters_are_forwarded_to_both_indexes() {
        let fixture = SearchFixture::new(2, 3);
        let criteria = SearchCriteria::default()
            .with_keyword(" tea ")
            .with_catalog("master".into());

        fixture.search().search(&criteria).await.unwrap();

        for request in fixture.index.requests() {
            assert_eq!(request.keyword, "tea");
            assert_eq!(request.catalog_id.as_ref().map(|c| c.as_str()), Some("master"));
            assert!(request.response_group.contains(ResponseGroup::OUTLINES));
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn runtime() -> tokio::runtime::Runtime {
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap()
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// Property: one page of the combined sequence is exactly the
            /// requested slice of "all categories, then all products".
            #[test]
            fn page_is_slice_of_categories_then_products(
                categories in 0usize..30,
                products in 0usize..30,
                skip in 0u32..70,
                take in 0u32..25,
            ) {
                let fixture = SearchFixture::new(categories, products);
                let criteria = SearchCriteria::default().with_keyword("tea").paged(skip, take);

                let result = runtime().block_on(fixture.search().search(&criteria)).unwrap();

                let total = categories + products;
                let expected_len = (take as usize).min(total.saturating_sub(skip as usize));
                prop_assert_eq!(result.total_count, total as u64);
                prop_assert_eq!(result.results.len(), expected_len);

                let expected: Vec<String> = (0..categories)
                    .map(|i| format!("c-{i:03}"))
                    .chain((0..products).map(|i| format!("p-{i:03}")))
                    .skip(skip as usize)
                    .take(take as usize)
                    .collect();
                let actual: Vec<String> = result.results.iter().map(|e| e.id().to_string()).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
