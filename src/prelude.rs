//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use templated_uri::prelude::*;
//!
//! let uri = UriBuilder::from_path("/books/{id}").build(&["42"]).unwrap();
//! assert_eq!(uri.as_str(), "/books/42");
//! ```

pub use crate::{BuilderError, InvalidArgument, PathTemplateSource, Uri, UriBuilder};
