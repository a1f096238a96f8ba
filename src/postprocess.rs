//! Post-parse passes over the finished block tree: include expansion and
//! footnote reconciliation.

mod footnotes;
mod includes;

pub(crate) use footnotes::check_footnotes;
pub(crate) use includes::{ExpandContext, expand_includes};
