//! A URL query parameter model.
//!
//! [`QueryUrl`] parses an absolute URL, exposes its query string as a nested
//! [`ParamMap`] addressed with dot-notation keys, prunes empty values after
//! every change, and writes the URL back with bracket-nested parameters
//! (`filter[price][min]=10&tags[0]=new`).
//!
//! ```
//! use query_url::{QueryUrl, Secure};
//!
//! let mut url = QueryUrl::builder()
//!     .url("http://shop.example/listings?page=3&q=")
//!     .secure(Secure::Https)
//!     .build()
//!     .unwrap();
//!
//! url.set_parameter("filter.category", "bikes").remove_parameter("page");
//! assert_eq!(url.build_url(), "https://shop.example/listings?filter[category]=bikes");
//! assert_eq!(url.build_relative_url(), "/listings?filter[category]=bikes");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod checkers;
mod encoding;
mod error;
mod helpers;
mod host;
mod types;
mod url_parts;

mod param_map;
pub mod query;
mod query_url;
mod value;

// Public API
pub use error::{Error, ParseError, Result};
pub use param_map::{PATH_SEPARATOR, ParamMap};
pub use query_url::{
    Builder, CurrentUrl, DEFAULT_NUMERIC_EXCEPTION_KEYS, FromFn, QueryUrl, from_fn,
};
pub use types::Secure;
pub use value::Value;
