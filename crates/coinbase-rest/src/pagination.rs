//! Paged list requests

use coinbase_types::{map_page, ApiResource, ListRequest, Page, Resource};
use tracing::{debug, instrument};

use crate::client::{expect_resource, CoinbaseClient, HttpVerbs};
use crate::error::RestResult;

impl CoinbaseClient {
    /// Fetch one page of a list
    ///
    /// Follow requests GET the cursor path as given; fresh requests send
    /// only the options that are set.
    #[instrument(skip(self))]
    pub async fn get_page(&self, request: &ListRequest) -> RestResult<Page<Resource>> {
        let (path, query) = request.to_path_and_query();
        let body = self.get_http(&path, &query).await?;
        let page = map_page(body)?;

        debug!(items = page.len(), has_next = page.next_request().is_some(), "Fetched page");
        Ok(page)
    }

    /// Fetch one page of a known model
    pub async fn get_page_of<T: ApiResource>(&self, request: &ListRequest) -> RestResult<Page<T>> {
        self.get_page(request).await?.try_map(expect_resource::<T>)
    }

    /// Walk every page starting from `request` and collect all items
    ///
    /// Stops at the first error; no partial results are returned.
    pub async fn get_all<T: ApiResource>(&self, request: ListRequest) -> RestResult<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(request);

        while let Some(request) = next {
            let page = self.get_page_of::<T>(&request).await?;
            next = page.next_request();
            items.extend(page.items);
        }

        Ok(items)
    }
}
