//! Catalog service
//!
//! Fetches the full category collection page by page and assembles it into a
//! [`CategoryTree`].

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::cancel::CancellationToken;
use crate::application::envelope::CategoryPage;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{Category, CategoryTree, TreeBuilder};
use crate::infrastructure::traits::{HttpRequest, HttpTransport};

/// Header carrying the API client id.
pub const AUTH_CLIENT_HEADER: &str = "X-Auth-Client";
/// Header carrying the API access token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// First page of the collection; the API counts from 1.
pub const FIRST_PAGE: u32 = 1;

/// Where the categories collection lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoint {
    /// Catalog base URL, e.g. `https://api.bigcommerce.com/stores/abc/v3/catalog`
    pub catalog_url: String,
    pub client_id: String,
    pub access_token: String,
}

impl CatalogEndpoint {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            catalog_url: settings.catalog_url(),
            client_id: settings.client_id.clone(),
            access_token: settings.access_token.clone(),
        }
    }

    pub fn categories_url(&self) -> String {
        format!("{}/categories", self.catalog_url.trim_end_matches('/'))
    }
}

/// Service for fetching categories and building the category tree.
///
/// Holds no mutable state: every fetch owns its cursor and accumulator, and
/// every build owns its tree.
pub struct CatalogService {
    transport: Arc<dyn HttpTransport>,
    endpoint: CatalogEndpoint,
    builder: TreeBuilder,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: CatalogEndpoint) -> Self {
        Self {
            transport,
            endpoint,
            builder: TreeBuilder::new(),
        }
    }

    pub fn endpoint(&self) -> &CatalogEndpoint {
        &self.endpoint
    }

    /// GET request for one page, decorated with JSON and auth headers.
    pub fn page_request(&self, page: u32) -> HttpRequest {
        HttpRequest::get(self.endpoint.categories_url())
            .query("page", page)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header(AUTH_CLIENT_HEADER, self.endpoint.client_id.as_str())
            .header(AUTH_TOKEN_HEADER, self.endpoint.access_token.as_str())
    }

    /// Fetch and decode one page.
    ///
    /// A non-success envelope status is not an error here: the returned page
    /// carries both its data and the status. See [`CategoryPage::into_categories`].
    ///
    /// The envelope status wins. When the body carries none (blank body, bare
    /// error document) a non-2xx HTTP status stands in for it, so an error
    /// reply never reads as the empty page that ends pagination.
    #[instrument(level = "debug", skip(self))]
    pub fn fetch_page(&self, page: u32) -> ApplicationResult<CategoryPage> {
        let request = self.page_request(page);
        let response = self.transport.get(&request)?;
        let mut decoded = CategoryPage::decode(page, &response.body)?;
        if decoded.status.is_none() && !response.is_success() {
            debug!("page {}: no envelope status, HTTP {}", page, response.status);
            decoded.status = Some(i64::from(response.status));
        }
        debug!(
            "page {}: {} categories, status {:?}, pagination {:?}",
            page,
            decoded.categories.len(),
            decoded.status,
            decoded.pagination
        );
        Ok(decoded)
    }

    /// Fetch every category, page after page, until a page comes back empty.
    ///
    /// Pages are requested strictly in sequence. Pagination metadata is never
    /// used to stop; only an empty page is. Any failed page aborts the whole
    /// fetch and discards what was accumulated so far.
    ///
    /// # Errors
    /// * [`ApplicationError::Cancelled`] if `cancel` fires between pages
    /// * [`ApplicationError::Transport`], [`ApplicationError::Decode`] or
    ///   [`ApplicationError::NonSuccessStatus`] from the failing page
    #[instrument(level = "debug", skip_all)]
    pub fn fetch_all_categories(
        &self,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Vec<Category>> {
        let mut all = Vec::new();
        let mut page = FIRST_PAGE;

        loop {
            if cancel.is_cancelled() {
                return Err(ApplicationError::Cancelled { page });
            }

            let categories = self.fetch_page(page)?.into_categories()?;
            if categories.is_empty() {
                break;
            }

            all.extend(categories);
            page += 1;
        }

        info!("fetched {} categories in {} pages", all.len(), page - FIRST_PAGE);
        Ok(all)
    }

    /// Assemble categories into a tree.
    pub fn build_tree(&self, categories: Vec<Category>) -> ApplicationResult<CategoryTree> {
        Ok(self.builder.build(categories)?)
    }

    /// Fetch the whole collection and build its tree.
    #[instrument(level = "debug", skip_all)]
    pub fn get_category_tree(&self, cancel: &CancellationToken) -> ApplicationResult<CategoryTree> {
        let categories = self.fetch_all_categories(cancel)?;
        self.build_tree(categories)
    }
}
