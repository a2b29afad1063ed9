//! Fluent URI builder with template placeholders and dual-mode
//! percent-encoding.
//!
//! This crate assembles URIs from structural components — scheme, authority,
//! path segments with per-segment matrix parameters, ordered query
//! parameters, fragment — while resolving `{name}` template placeholders
//! embedded in any textual component.
//!
//! # Overview
//!
//! A [`UriBuilder`] starts empty, seeded from an existing URI, or seeded
//! from a path. Mutation operations chain through `&mut self`; building
//! resolves placeholders from positional or named values and serializes the
//! state. Two encoding disciplines are offered: [`UriBuilder::build`]
//! escapes bound values literally (every `%` becomes `%25`), while
//! [`UriBuilder::build_from_encoded`] preserves valid `%XX` triplets the
//! caller already encoded.
//!
//! # Quick Start
//!
//! ```rust
//! use templated_uri::UriBuilder;
//!
//! let uri = UriBuilder::from_uri("http://example.com")?
//!     .path("/orders/{id}")
//!     .query_param("expand", &["{fields}"])?
//!     .build(&["42", "lines status"])?;
//! assert_eq!(uri.as_str(), "http://example.com/orders/42?expand=lines+status");
//! # Ok::<(), templated_uri::BuilderError>(())
//! ```
//!
//! A builder is reusable and forkable:
//!
//! ```rust
//! use templated_uri::UriBuilder;
//!
//! let base = UriBuilder::from_uri("http://api.example.com/v2")?;
//! let mut books = base.clone();
//! books.path("books");
//! assert_eq!(base.build(&[])?.as_str(), "http://api.example.com/v2");
//! assert_eq!(books.build(&[])?.as_str(), "http://api.example.com/v2/books");
//! # Ok::<(), templated_uri::BuilderError>(())
//! ```
//!
//! # Round-trip fidelity
//!
//! Seeding from a URI and assembling it back reproduces the original text
//! byte for byte: seeded text is never re-encoded. Only freshly substituted
//! template values and parameter values supplied through the builder pass
//! through the encoding engine. The single exception is that query values
//! always render `+` as `%2B`, keeping the escaped-space convention
//! unambiguous.
//!
//! # Concurrency
//!
//! Every operation is a synchronous in-memory transformation. A builder is
//! not shareable across threads without external synchronization; the
//! intended pattern is sequential chaining, forking alternatives via
//! [`Clone`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod assemble;
mod builder;
mod components;
mod encoding;
mod error;
#[cfg(kani)]
mod kani_impls;
mod parse;
pub mod prelude;
mod source;
mod template;
mod uri;

pub use builder::UriBuilder;
pub use error::{BuilderError, InvalidArgument};
pub use source::PathTemplateSource;
pub use uri::Uri;
