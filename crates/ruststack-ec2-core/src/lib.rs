//! EC2 Query API request processing for RustStack.
//!
//! Backends decode parameters with `ruststack-ec2-query`, then use this crate
//! to filter and paginate their resources and to dispatch actions:
//!
//! - [`apply_filters`] evaluates `Describe*` filters through an [`AccessorTable`]
//! - [`paginate`] cuts offset-token pages
//! - [`check_dry_run`] short-circuits `DryRun=true` before any mutation
//! - [`dispatch`] runs a [`QueryAction`] and renders its XML response

pub mod config;
pub mod dry_run;
pub mod filter;
pub mod handler;
pub mod pagination;

pub use config::Ec2Config;
pub use dry_run::check_dry_run;
pub use filter::{AccessorTable, FilterValue, UnknownFilterPolicy, apply_filters, matches_filter};
pub use handler::{
    ActionRouter, QueryAction, QueryResponse, dispatch, dispatch_with_request_id, error_response,
};
pub use pagination::{DEFAULT_MAX_RESULTS, decode_token, encode_token, paginate, paginate_request};
