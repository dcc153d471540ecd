//! EC2 XML response serialization for RustStack.
//!
//! EC2 speaks the Query protocol: requests arrive as form-encoded parameters
//! and responses are XML documents in the `2016-11-15` namespace. This crate
//! turns a [`ResponseNode`](ruststack_ec2_model::ResponseNode) tree into that
//! document, or into the `<Response><Errors>` document for failures.

pub mod error;
pub mod serialize;

pub use error::error_to_xml;
pub use serialize::{
    DEFAULT_INDENT, EC2_NAMESPACE, ListStyle, RenderOptions, escape, render, render_result,
    render_with,
};
