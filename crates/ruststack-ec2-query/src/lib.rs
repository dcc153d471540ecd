//! EC2 Query API parameter decoding for RustStack.
//!
//! EC2 requests arrive as a flat map of dotted, 1-based indexed keys. This
//! crate turns that map into structured request data:
//!
//! - **Scalars**: strings, integers, booleans, required parameters
//! - **Indexed lists**: `SubnetId.N` under an explicit [`IndexPolicy`]
//! - **Filters**: `Filter.N.Name` / `Filter.N.Values.M`
//! - **Tags**: `TagSpecification.N.*` and flat `Tag.N.*` lists
//! - **Paging**: `MaxResults` / `NextToken` with caller-supplied bounds
//!
//! Decoding is pure. Malformed index fragments are skipped; only explicitly
//! typed fields (integers, booleans, bounded `MaxResults`) produce errors.

pub mod filters;
pub mod index;
pub mod paging;
pub mod params;
pub mod tags;

pub use filters::{FILTER_PREFIX, flatten_filters};
pub use index::{IndexPolicy, parse_index};
pub use paging::MaxResultsBounds;
pub use params::QueryParams;
pub use tags::{TAG_PREFIX, TAG_SPECIFICATION_PREFIX};
