//! URL handling module for Sumi-Scroll
//!
//! Navigation menus mix root-relative, bare-relative and absolute hrefs. This
//! module turns all of them into absolute URLs on the crawled site's origin.

mod resolve;

pub use resolve::{resolve_link, shares_origin, site_origin};
