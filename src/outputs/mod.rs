//! Output generation.
//!
//! - [`json`]: writes the [`NewsDigest`](crate::models::NewsDigest) file read by the site build

pub mod json;
