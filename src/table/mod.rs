//! Client-side view over a fetched invoice list: filter, tri-state sort and pagination.
//!
//! [`ViewParams`] holds the current configuration and is only changed through its
//! operations. Everything else in this module is a pure derivation from a record
//! slice and a `&ViewParams`.

mod link;
mod pager;
mod params;
mod view;

pub use link::{from_query_pairs, from_query_string, to_query_pairs, to_query_string};
pub use pager::{page_window, PageLabel};
pub use params::{PageSize, Sort, SortDirection, SortKey, ViewParams, YearFilter};
pub use view::{compute_visible, distinct_years, TableView};
