//! EC2 action trait and dispatch.
//!
//! A backend implements [`QueryAction`] per EC2 action. Dispatch assigns a
//! request id, runs the action against the store, and renders either the
//! `<ActionResponse>` document or the error document.

use std::collections::BTreeMap;
use std::fmt;

use ruststack_core::ResourceStore;
use ruststack_ec2_model::error::Ec2Error;
use ruststack_ec2_model::node::ResponseNode;
use ruststack_ec2_query::QueryParams;
use ruststack_ec2_xml::{RenderOptions, error_to_xml, render_with};

use crate::config::Ec2Config;

/// Content type of every EC2 response body.
pub const XML_CONTENT_TYPE: &str = "text/xml;charset=UTF-8";

/// Header carrying the request id on EC2 responses.
pub const REQUEST_ID_HEADER: &str = "x-amzn-requestid";

/// One EC2 Query API action.
pub trait QueryAction {
    /// The action name, e.g. `DescribeSubnets`.
    fn name(&self) -> &str;

    /// List rendering conventions for this action's response.
    ///
    /// The default keeps every list inline.
    fn render_options(&self, base: RenderOptions) -> RenderOptions {
        base
    }

    /// Run the action.
    fn handle(
        &self,
        params: &QueryParams,
        store: &mut ResourceStore,
        config: &Ec2Config,
    ) -> Result<ResponseNode, Ec2Error>;
}

/// A rendered EC2 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    /// HTTP status code.
    pub status: http::StatusCode,
    /// XML body.
    pub body: String,
    /// The request id echoed in the body.
    pub request_id: String,
}

impl QueryResponse {
    /// Whether the response carries a success document.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Convert into an `http::Response` with XML content type and request id
    /// headers.
    #[must_use]
    pub fn into_http(self) -> http::Response<String> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static(XML_CONTENT_TYPE),
        );
        if let Ok(value) = http::HeaderValue::from_str(&self.request_id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}

/// Render an error as a [`QueryResponse`].
#[must_use]
pub fn error_response(err: &Ec2Error, request_id: String, options: &RenderOptions) -> QueryResponse {
    QueryResponse {
        status: err.status_code,
        body: error_to_xml(&err.envelope(), &request_id, options),
        request_id,
    }
}

/// Run `action` with a fresh request id.
pub fn dispatch<A>(
    action: &A,
    params: &QueryParams,
    store: &mut ResourceStore,
    config: &Ec2Config,
) -> QueryResponse
where
    A: QueryAction + ?Sized,
{
    let request_id = uuid::Uuid::new_v4().to_string();
    dispatch_with_request_id(action, params, store, config, request_id)
}

/// Run `action` with a caller-chosen request id.
pub fn dispatch_with_request_id<A>(
    action: &A,
    params: &QueryParams,
    store: &mut ResourceStore,
    config: &Ec2Config,
    request_id: String,
) -> QueryResponse
where
    A: QueryAction + ?Sized,
{
    let name = action.name();
    let options = action.render_options(config.render_options());
    tracing::debug!(action = name, request_id = %request_id, "dispatching EC2 action");

    match action.handle(params, store, config) {
        Ok(node) => {
            let status = if node.as_error_envelope().is_some() {
                tracing::info!(action = name, "EC2 action returned an error envelope");
                http::StatusCode::BAD_REQUEST
            } else {
                http::StatusCode::OK
            };
            let body = render_with(&node, &format!("{name}Response"), &request_id, &options);
            QueryResponse {
                status,
                body,
                request_id,
            }
        }
        Err(err) => {
            tracing::info!(
                action = name,
                code = err.code.as_str(),
                status = err.status_code.as_u16(),
                message = %err.message,
                "EC2 action failed"
            );
            error_response(&err, request_id, &options)
        }
    }
}

type BoxedAction = Box<dyn QueryAction + Send + Sync>;

/// Routes requests to actions by their `Action` parameter.
///
/// Actions for every resource family of a service share one router and one
/// store.
#[derive(Default)]
pub struct ActionRouter {
    actions: BTreeMap<String, BoxedAction>,
}

impl fmt::Debug for ActionRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRouter")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ActionRouter {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action under its own name, replacing any previous one.
    #[must_use]
    pub fn register<A>(mut self, action: A) -> Self
    where
        A: QueryAction + Send + Sync + 'static,
    {
        self.actions
            .insert(action.name().to_owned(), Box::new(action));
        self
    }

    /// Registered action names in sorted order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Resolve the action named by the `Action` parameter.
    pub fn resolve(
        &self,
        params: &QueryParams,
    ) -> Result<&(dyn QueryAction + Send + Sync), Ec2Error> {
        let name = params.action().ok_or_else(Ec2Error::missing_action)?;
        self.actions
            .get(name)
            .map(|action| &**action)
            .ok_or_else(|| Ec2Error::invalid_action(name))
    }

    /// Resolve and run the requested action.
    pub fn handle(
        &self,
        params: &QueryParams,
        store: &mut ResourceStore,
        config: &Ec2Config,
    ) -> QueryResponse {
        match self.resolve(params) {
            Ok(action) => dispatch(action, params, store, config),
            Err(err) => {
                tracing::info!(code = err.code.as_str(), "cannot route EC2 request");
                error_response(
                    &err,
                    uuid::Uuid::new_v4().to_string(),
                    &config.render_options(),
                )
            }
        }
    }
}
