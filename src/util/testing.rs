//! Test support: logging setup and a scripted HTTP transport.

use std::collections::VecDeque;
use std::env;
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::Category;
use crate::infrastructure::traits::{HttpRequest, HttpResponse, HttpTransport};
use crate::infrastructure::{TransportError, TransportResult};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = match env::var("RUST_LOG") {
        Ok(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        Err(_) => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// One scripted reply of [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with this body and HTTP 200
    Body(String),
    /// Respond with this HTTP status and body
    Status(u16, String),
    /// Fail the exchange like a dropped connection
    Fail(String),
}

/// In-memory transport replaying scripted replies in order and recording
/// every request it receives.
///
/// Runs out of script with an empty body, i.e. an empty page.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script one envelope per page, each holding the given categories.
    pub fn with_pages(pages: impl IntoIterator<Item = Vec<Category>>) -> Self {
        Self::new(pages.into_iter().map(|cats| Reply::Body(page_body(&cats))))
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// The `page` query value of every request received so far.
    pub fn requested_pages(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.query_value("page").map(str::to_string))
            .collect()
    }
}

impl HttpTransport for ScriptedTransport {
    fn get(&self, request: &HttpRequest) -> TransportResult<HttpResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let reply = self
            .replies
            .lock()
            .map_err(|_| TransportError::new("scripted transport poisoned"))?
            .pop_front();
        match reply {
            Some(Reply::Body(body)) => Ok(HttpResponse { status: 200, body }),
            Some(Reply::Status(status, body)) => Ok(HttpResponse { status, body }),
            Some(Reply::Fail(message)) => Err(TransportError::new(message)),
            None => Ok(HttpResponse {
                status: 200,
                body: String::new(),
            }),
        }
    }
}

/// Envelope body with status 200 and the given categories as data.
pub fn page_body(categories: &[Category]) -> String {
    serde_json::json!({
        "status": 200,
        "data": categories,
        "meta": { "pagination": { "count": categories.len() } },
    })
    .to_string()
}
