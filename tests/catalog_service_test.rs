//! Tests for CatalogService: page fetch, pagination loop and tree assembly

use std::sync::Arc;

use rstest::rstest;

use cattree::application::services::{
    CatalogEndpoint, CatalogService, AUTH_CLIENT_HEADER, AUTH_TOKEN_HEADER,
};
use cattree::application::{ApplicationError, CancellationToken};
use cattree::domain::{Category, DomainError};
use cattree::infrastructure::traits::{HttpRequest, HttpResponse, HttpTransport};
use cattree::infrastructure::TransportResult;
use cattree::util::testing::{init_test_setup, page_body, Reply, ScriptedTransport};

fn endpoint() -> CatalogEndpoint {
    CatalogEndpoint {
        catalog_url: "https://api.example.test/stores/abc/v3/catalog".into(),
        client_id: "client-1".into(),
        access_token: "token-1".into(),
    }
}

fn service(transport: Arc<ScriptedTransport>) -> CatalogService {
    init_test_setup();
    CatalogService::new(transport, endpoint())
}

fn cats(ids: &[u32]) -> Vec<Category> {
    ids.iter()
        .map(|&id| Category::new(id, 0, format!("cat-{}", id)))
        .collect()
}

// ============================================================
// Pagination
// ============================================================

#[test]
fn given_two_full_pages_then_empty_when_fetching_all_then_returns_items_in_page_order() {
    // Arrange
    let transport = Arc::new(ScriptedTransport::with_pages([
        cats(&[1, 2]),
        cats(&[3, 4]),
        Vec::new(),
    ]));
    let service = service(Arc::clone(&transport));

    // Act
    let all = service
        .fetch_all_categories(&CancellationToken::new())
        .unwrap();

    // Assert
    let ids: Vec<_> = all.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(transport.requested_pages(), vec!["1", "2", "3"]);
}

#[test]
fn given_transport_error_on_page_two_when_fetching_all_then_error_and_no_items() {
    let transport = Arc::new(ScriptedTransport::new([
        Reply::Body(page_body(&cats(&[1, 2]))),
        Reply::Fail("connection reset".into()),
        Reply::Body(page_body(&cats(&[3]))),
    ]));
    let service = service(Arc::clone(&transport));

    let result = service.fetch_all_categories(&CancellationToken::new());

    match result {
        Err(ApplicationError::Transport(e)) => assert_eq!(e.context(), "connection reset"),
        other => panic!("expected transport error, got {:?}", other),
    }
    // No retry and no further pages
    assert_eq!(transport.requested_pages(), vec!["1", "2"]);
}

#[test]
fn given_empty_first_page_when_fetching_all_then_returns_nothing_after_one_request() {
    let transport = Arc::new(ScriptedTransport::new([Reply::Body(String::new())]));
    let service = service(Arc::clone(&transport));

    let all = service
        .fetch_all_categories(&CancellationToken::new())
        .unwrap();

    assert!(all.is_empty());
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn given_pagination_meta_claiming_one_page_when_fetching_all_then_still_reads_until_empty() {
    let first = serde_json::json!({
        "status": 200,
        "data": cats(&[1]),
        "meta": { "pagination": { "current_page": 1, "total_pages": 1 } },
    })
    .to_string();
    let transport = Arc::new(ScriptedTransport::new([
        Reply::Body(first),
        Reply::Body(page_body(&cats(&[2]))),
    ]));
    let service = service(Arc::clone(&transport));

    let all = service
        .fetch_all_categories(&CancellationToken::new())
        .unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(transport.requested_pages(), vec!["1", "2", "3"]);
}

#[test]
fn given_malformed_json_on_page_two_when_fetching_all_then_decode_error_keeps_body() {
    let transport = Arc::new(ScriptedTransport::new([
        Reply::Body(page_body(&cats(&[1]))),
        Reply::Body("{\"data\": [".into()),
    ]));
    let service = service(Arc::clone(&transport));

    let result = service.fetch_all_categories(&CancellationToken::new());

    match result {
        Err(ApplicationError::Decode { page, body, .. }) => {
            assert_eq!(page, 2);
            assert_eq!(body, "{\"data\": [");
        }
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[test]
fn given_non_success_status_when_fetching_all_then_error_carries_partial_data() {
    let body = serde_json::json!({ "status": 429, "data": cats(&[7]) }).to_string();
    let transport = Arc::new(ScriptedTransport::new([
        Reply::Body(page_body(&cats(&[1]))),
        Reply::Body(body),
    ]));
    let service = service(Arc::clone(&transport));

    let result = service.fetch_all_categories(&CancellationToken::new());

    match result {
        Err(ApplicationError::NonSuccessStatus {
            page,
            status,
            partial,
        }) => {
            assert_eq!(page, 2);
            assert_eq!(status, 429);
            assert_eq!(partial, cats(&[7]));
        }
        other => panic!("expected non-success status, got {:?}", other),
    }
}

#[test]
fn given_http_error_with_blank_body_on_page_two_when_fetching_all_then_non_success_status() {
    let transport = Arc::new(ScriptedTransport::new([
        Reply::Body(page_body(&cats(&[1]))),
        Reply::Status(503, String::new()),
        Reply::Body(page_body(&cats(&[2]))),
    ]));
    let service = service(Arc::clone(&transport));

    let result = service.fetch_all_categories(&CancellationToken::new());

    match result {
        Err(ApplicationError::NonSuccessStatus {
            page,
            status,
            partial,
        }) => {
            assert_eq!(page, 2);
            assert_eq!(status, 503);
            assert!(partial.is_empty());
        }
        other => panic!("expected non-success status, got {:?}", other),
    }
    assert_eq!(transport.requested_pages(), vec!["1", "2"]);
}

// ============================================================
// Single page
// ============================================================

#[rstest]
#[case::blank_unauthorized(401, "", Some(401))]
#[case::bare_error_document(404, r#"{"title": "Not Found"}"#, Some(404))]
#[case::envelope_status_wins(500, r#"{"status": 429}"#, Some(429))]
#[case::no_content(204, "", None)]
fn given_http_status_when_fetching_page_then_used_only_without_envelope_status(
    #[case] http_status: u16,
    #[case] body: &str,
    #[case] expected: Option<i64>,
) {
    let transport = Arc::new(ScriptedTransport::new([Reply::Status(
        http_status,
        body.to_string(),
    )]));
    let service = service(transport);

    let page = service.fetch_page(1).unwrap();

    assert!(page.categories.is_empty());
    assert_eq!(page.status, expected);
}

#[rstest]
#[case::ok(200, true)]
#[case::absent(0, true)]
#[case::unauthorized(401, false)]
#[case::server_error(500, false)]
fn given_envelope_status_when_fetching_page_then_data_is_returned_either_way(
    #[case] status: i64,
    #[case] success: bool,
) {
    let body = serde_json::json!({ "status": status, "data": cats(&[1, 2]) }).to_string();
    let transport = Arc::new(ScriptedTransport::new([Reply::Body(body)]));
    let service = service(transport);

    let page = service.fetch_page(1).unwrap();

    assert_eq!(page.categories.len(), 2);
    assert_eq!(page.is_success(), success);
    assert_eq!(page.into_categories().is_ok(), success);
}

#[test]
fn given_error_envelope_without_data_when_fetching_page_then_empty_with_status() {
    let body = r#"{"status": 401, "title": "Unauthorized", "type": "about:blank"}"#;
    let transport = Arc::new(ScriptedTransport::new([Reply::Body(body.into())]));
    let service = service(transport);

    let page = service.fetch_page(1).unwrap();

    assert!(page.categories.is_empty());
    assert_eq!(page.status, Some(401));
}

#[test]
fn given_whitespace_body_when_fetching_page_then_zero_categories() {
    let transport = Arc::new(ScriptedTransport::new([Reply::Body(" \n".into())]));
    let service = service(transport);

    let page = service.fetch_page(4).unwrap();

    assert_eq!(page.page, 4);
    assert!(page.categories.is_empty());
    assert!(page.is_success());
}

#[test]
fn given_page_number_when_fetching_page_then_request_is_decorated() {
    let transport = Arc::new(ScriptedTransport::with_pages([cats(&[1])]));
    let service = service(Arc::clone(&transport));

    service.fetch_page(3).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(
        req.url,
        "https://api.example.test/stores/abc/v3/catalog/categories"
    );
    assert_eq!(req.query_value("page"), Some("3"));
    assert_eq!(req.header_value("Content-Type"), Some("application/json"));
    assert_eq!(req.header_value("Accept"), Some("application/json"));
    assert_eq!(req.header_value(AUTH_CLIENT_HEADER), Some("client-1"));
    assert_eq!(req.header_value(AUTH_TOKEN_HEADER), Some("token-1"));
}

// ============================================================
// Cancellation
// ============================================================

/// Cancels the token once a given number of requests have been served.
struct CancellingTransport {
    inner: ScriptedTransport,
    token: CancellationToken,
    after: usize,
}

impl HttpTransport for CancellingTransport {
    fn get(&self, request: &HttpRequest) -> TransportResult<HttpResponse> {
        let response = self.inner.get(request);
        if self.inner.requests().len() >= self.after {
            self.token.cancel();
        }
        response
    }
}

#[test]
fn given_cancelled_token_when_fetching_all_then_no_request_is_sent() {
    let transport = Arc::new(ScriptedTransport::with_pages([cats(&[1])]));
    let service = service(Arc::clone(&transport));
    let token = CancellationToken::new();
    token.cancel();

    let result = service.fetch_all_categories(&token);

    assert!(matches!(result, Err(ApplicationError::Cancelled { page: 1 })));
    assert!(transport.requests().is_empty());
}

#[test]
fn given_cancel_during_page_two_when_fetching_all_then_stops_before_page_three() {
    init_test_setup();
    let token = CancellationToken::new();
    let transport = Arc::new(CancellingTransport {
        inner: ScriptedTransport::with_pages([cats(&[1]), cats(&[2]), cats(&[3])]),
        token: token.clone(),
        after: 2,
    });
    let service = CatalogService::new(transport.clone(), endpoint());

    let result = service.fetch_all_categories(&token);

    assert!(matches!(result, Err(ApplicationError::Cancelled { page: 3 })));
    assert_eq!(transport.inner.requested_pages(), vec!["1", "2"]);
}

// ============================================================
// Tree assembly
// ============================================================

#[test]
fn given_paged_hierarchy_when_getting_tree_then_lookups_work() {
    let transport = Arc::new(ScriptedTransport::with_pages([
        vec![Category::new(1, 0, "Shoes"), Category::new(3, 2, "Winter")],
        vec![Category::new(2, 1, "Boots")],
    ]));
    let service = service(transport);

    let tree = service
        .get_category_tree(&CancellationToken::new())
        .unwrap();

    assert_eq!(tree.len(), 4);
    assert_eq!(
        tree.lookup_by_path("Shoes/Boots/Winter").map(|n| n.id()),
        Some(3)
    );
}

#[test]
fn given_orphan_in_fetched_data_when_getting_tree_then_domain_error() {
    let transport = Arc::new(ScriptedTransport::with_pages([vec![Category::new(5, 9, "Orphan")]]));
    let service = service(transport);

    let result = service.get_category_tree(&CancellationToken::new());

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::DanglingParent {
            id: 5,
            parent_id: 9
        }))
    ));
}
