//! EC2 model types for RustStack.
//!
//! This crate holds the data shared by every EC2 backend and by the query,
//! filter, pagination, and XML layers:
//!
//! - [`error`]: error codes, [`Ec2Error`](error::Ec2Error) and the
//!   [`ErrorEnvelope`](error::ErrorEnvelope) shape
//! - [`node`]: the [`ResponseNode`](node::ResponseNode) tree rendered into XML
//! - [`types`]: tags, parsed filters, tag specifications, and page types

pub mod error;
pub mod node;
pub mod types;

pub use error::{Ec2Error, Ec2ErrorCode, ErrorEnvelope, ErrorKind};
pub use node::{ResponseNode, Scalar, ToResponseNode};
pub use types::{PageRequest, PageResult, ParsedFilter, Tag, TagSpecification};
