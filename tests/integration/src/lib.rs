//! End-to-end tests for the RustStack EC2 Query codec.
//!
//! A small backend serving subnets ([`subnet`]) and VPCs ([`vpc`]) from one
//! store is driven through the full path: form decoding, routing, filtering,
//! pagination, and XML rendering. Nothing here needs a running server.
//!
//! Run them with:
//! ```text
//! cargo test -p ruststack-ec2-integration
//! ```

use std::sync::Once;

use quick_xml::Reader;
use quick_xml::events::Event;
use ruststack_core::ResourceStore;
use ruststack_ec2_core::{ActionRouter, Ec2Config, QueryResponse};
use ruststack_ec2_query::QueryParams;


static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        // Another test harness may already own the global subscriber.
        let _ = ruststack_core::init_tracing("warn");
    });
}

/// An in-process EC2 endpoint backed by its own store.
#[derive(Debug, Default)]
pub struct Ec2Harness {
    /// The store shared by every action.
    pub store: ResourceStore,
    /// Codec configuration.
    pub config: Ec2Config,
}

impl Ec2Harness {
    /// Create a harness with default configuration.
    #[must_use]
    pub fn new() -> Self {
        init_tracing();
        Self::default()
    }

    /// Create a harness with the given configuration.
    #[must_use]
    pub fn with_config(config: Ec2Config) -> Self {
        init_tracing();
        Self {
            store: ResourceStore::new(),
            config,
        }
    }

    /// Send a request given as key/value pairs.
    pub fn call(&mut self, pairs: &[(&str, &str)]) -> QueryResponse {
        let params: QueryParams = pairs.iter().copied().collect();
        self.call_params(&params)
    }

    /// Send a form-encoded request body.
    pub fn call_form(&mut self, body: &str) -> QueryResponse {
        self.call_params(&QueryParams::from_urlencoded(body.as_bytes()))
    }

    fn call_params(&mut self, params: &QueryParams) -> QueryResponse {
        tracing::debug!(action = params.action(), params = params.len(), "sending request");
        ec2_router().handle(params, &mut self.store, &self.config)
    }

    /// Create a VPC and return its id.
    pub fn create_vpc(&mut self, cidr_block: &str, extra: &[(&str, &str)]) -> String {
        let mut pairs = vec![("Action", "CreateVpc"), ("CidrBlock", cidr_block)];
        pairs.extend_from_slice(extra);
        let response = self.call(&pairs);
        assert!(response.is_success(), "create failed: {}", response.body);
        element_texts(&response.body, "vpcId")
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Create a subnet and return its id.
    pub fn create_subnet(&mut self, cidr_block: &str, extra: &[(&str, &str)]) -> String {
        let mut pairs = vec![
            ("Action", "CreateSubnet"),
            ("VpcId", "vpc-1"),
            ("CidrBlock", cidr_block),
        ];
        pairs.extend_from_slice(extra);
        let response = self.call(&pairs);
        assert!(response.is_success(), "create failed: {}", response.body);
        element_texts(&response.body, "subnetId")
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

/// Router with every action of the sample backend registered.
#[must_use]
pub fn ec2_router() -> ActionRouter {
    ActionRouter::new()
        .register(subnet::CreateSubnet)
        .register(subnet::DescribeSubnets::default())
        .register(subnet::DeleteSubnet)
        .register(vpc::CreateVpc)
        .register(vpc::DescribeVpcs::default())
        .register(vpc::DeleteVpc)
        .register(tagging::CreateTags)
}

/// A fresh EC2-style id such as `subnet-0123456789abcdef0`.
#[must_use]
pub fn new_resource_id(prefix: &str) -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &simple[..17])
}

/// Collect the text of every `<tag>` element in document order.
#[must_use]
pub fn element_texts(xml: &str, tag: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut texts = Vec::new();
    let mut inside = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => inside = e.name().as_ref() == tag.as_bytes(),
            Ok(Event::Text(e)) if inside => {
                if let Ok(decoded) = e.decode() {
                    if let Ok(text) = quick_xml::escape::unescape(&decoded) {
                        texts.push(text.into_owned());
                    }
                }
            }
            Ok(Event::End(_)) => inside = false,
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    texts
}

/// The error code of an error document, if any.
#[must_use]
pub fn error_code(xml: &str) -> Option<String> {
    element_texts(xml, "Code").into_iter().next()
}

mod test_describe;
mod test_lifecycle;
