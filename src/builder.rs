//! Fluent builder for URIs with template placeholders.

use std::collections::HashMap;

use crate::assemble;
use crate::components::{self, UriComponents, ValueOrigin};
use crate::encoding::Mode;
use crate::error::{BuilderError, InvalidArgument};
use crate::parse;
use crate::source::PathTemplateSource;
use crate::template;
use crate::uri::Uri;

/// A fluent builder for URIs.
///
/// Mutation operations take the builder by exclusive mutable reference and
/// return that same reference, so calls chain without hidden aliasing.
/// Building takes `&self` and leaves the builder reusable; [`Clone`] forks a
/// fully independent copy with deep-copied sequences.
///
/// Textual components may embed `{name}` template placeholders, resolved at
/// build time. [`build`] percent-encodes bound values literally, treating
/// every `%` as a character to escape; [`build_from_encoded`] preserves
/// valid `%XX` triplets already present in the values.
///
/// # Examples
///
/// ```
/// use templated_uri::UriBuilder;
///
/// let uri = UriBuilder::from_path("/index{ind}.jsp")
///     .query_param("a", &["{a}"])?
///     .query_param("b", &["{b}"])?
///     .build(&["1", "valueA", "valueB"])?;
/// assert_eq!(uri.as_str(), "/index1.jsp?a=valueA&b=valueB");
/// # Ok::<(), templated_uri::BuilderError>(())
/// ```
///
/// Seeding from an existing URI keeps its encoding intact:
///
/// ```
/// use templated_uri::UriBuilder;
///
/// let uri = UriBuilder::from_uri("http://bar/foo%20")?.build_from_encoded(&[])?;
/// assert_eq!(uri.as_str(), "http://bar/foo%20");
/// # Ok::<(), templated_uri::BuilderError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct UriBuilder {
    components: UriComponents,
}

impl UriBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded from an existing URI string or value.
    ///
    /// The seed's own percent-encoding is taken as-is and survives
    /// assembly untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::UnparsableUri`] if the input is empty or
    /// cannot be split into URI components.
    pub fn from_uri(uri: impl AsRef<str>) -> Result<Self, BuilderError> {
        Ok(Self { components: parse::parse_uri(uri.as_ref())? })
    }

    /// Creates a builder whose path starts as `path`, with the usual
    /// append semantics of [`path`](Self::path).
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let mut builder = Self::new();
        builder.path(path);
        builder
    }

    /// Sets the scheme.
    ///
    /// The scheme is stored as given; it is not case-normalized.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::InvalidScheme`] unless the value is a
    /// letter followed by letters, digits, `+`, `-`, or `.`.
    pub fn scheme(&mut self, scheme: &str) -> Result<&mut Self, BuilderError> {
        if !parse::is_valid_scheme(scheme) {
            return Err(InvalidArgument::InvalidScheme { scheme: scheme.to_string() }.into());
        }
        self.components.scheme = Some(scheme.to_string());
        Ok(self)
    }

    /// Sets the user-info authority sub-field.
    pub fn user_info(&mut self, user_info: &str) -> &mut Self {
        self.components.leave_opaque();
        self.components.user_info = Some(user_info.to_string());
        self
    }

    /// Sets the host.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyHost`] for an empty string; the
    /// unset state is distinct from empty and is never produced by this
    /// call.
    pub fn host(&mut self, host: &str) -> Result<&mut Self, BuilderError> {
        if host.is_empty() {
            return Err(InvalidArgument::EmptyHost.into());
        }
        self.components.leave_opaque();
        self.components.host = Some(host.to_string());
        Ok(self)
    }

    /// Sets the port. `-1` clears a previously set port.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::InvalidPort`] for any value below `-1`.
    pub fn port(&mut self, port: i32) -> Result<&mut Self, BuilderError> {
        if port < -1 {
            return Err(InvalidArgument::InvalidPort { port }.into());
        }
        self.components.leave_opaque();
        self.components.port = u32::try_from(port).ok();
        Ok(self)
    }

    /// Sets the fragment.
    pub fn fragment(&mut self, fragment: &str) -> &mut Self {
        self.components.fragment = Some(fragment.to_string());
        self
    }

    /// Switches to an opaque URI of the form `scheme:scheme-specific-part`,
    /// discarding any authority, path, and query.
    pub fn scheme_specific_part(&mut self, ssp: &str) -> &mut Self {
        self.components.set_opaque(ssp);
        self
    }

    /// Appends to the path.
    ///
    /// The text splits on `/` with runs of slashes collapsed; an empty
    /// string is a no-op, and a trailing slash is remembered so the
    /// assembled path ends with `/`. A piece such as `seg;k=v` attaches its
    /// matrix entries to the newly appended segment.
    pub fn path(&mut self, path: &str) -> &mut Self {
        self.components.append_path(path, ValueOrigin::Supplied);
        self
    }

    /// Replaces the whole path: `None` clears it, `Some` clears and then
    /// appends with [`path`](Self::path) semantics.
    pub fn replace_path(&mut self, path: Option<&str>) -> &mut Self {
        self.components.clear_path();
        if let Some(path) = path {
            self.components.append_path(path, ValueOrigin::Supplied);
        }
        self
    }

    /// Appends query entries: one `name=value` entry per value, or a bare
    /// `name` flag when `values` is empty. Existing entries for the same
    /// name are kept; repeats are never merged.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyParamName`] for an empty name.
    pub fn query_param(&mut self, name: &str, values: &[&str]) -> Result<&mut Self, BuilderError> {
        check_name(name)?;
        self.components.leave_opaque();
        components::add_params(&mut self.components.query, name, values);
        Ok(self)
    }

    /// Removes every query entry for `name`, then adds replacements at the
    /// position of the first removed entry (at the end if none existed).
    /// With no values this is pure deletion.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyParamName`] for an empty name.
    pub fn replace_query_param(
        &mut self,
        name: &str,
        values: &[&str],
    ) -> Result<&mut Self, BuilderError> {
        check_name(name)?;
        self.components.leave_opaque();
        components::replace_params(&mut self.components.query, name, values);
        Ok(self)
    }

    /// Replaces the whole query: `None` or empty clears it; otherwise the
    /// raw text re-parses as `&`-separated `k=v` pairs, kept in textual
    /// order with their existing escapes preserved.
    pub fn replace_query(&mut self, raw: Option<&str>) -> &mut Self {
        self.components.leave_opaque();
        self.components.query.clear();
        if let Some(raw) = raw {
            self.components.query = components::parse_pairs(raw.split('&'), ValueOrigin::Parsed);
        }
        self
    }

    /// Appends matrix entries to the last path segment, like
    /// [`query_param`](Self::query_param) does for the query.
    ///
    /// With no segment to attach to, an implicit empty leading segment is
    /// created; with a trailing slash pending, the entries attach after it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyParamName`] for an empty name.
    pub fn matrix_param(&mut self, name: &str, values: &[&str]) -> Result<&mut Self, BuilderError> {
        check_name(name)?;
        let segment = self.components.matrix_target();
        components::add_params(&mut segment.matrix, name, values);
        Ok(self)
    }

    /// Removes every matrix entry for `name` on the last path segment, then
    /// adds replacements at the position of the first removed entry. With
    /// no values this is pure deletion.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyParamName`] for an empty name.
    pub fn replace_matrix_param(
        &mut self,
        name: &str,
        values: &[&str],
    ) -> Result<&mut Self, BuilderError> {
        check_name(name)?;
        let segment = self.components.matrix_target();
        components::replace_params(&mut segment.matrix, name, values);
        Ok(self)
    }

    /// Replaces the last segment's matrix block: `None` or empty clears it;
    /// otherwise the raw text re-parses as `;`-separated `k=v` pairs.
    pub fn replace_matrix(&mut self, raw: Option<&str>) -> &mut Self {
        let segment = self.components.matrix_target();
        segment.matrix.clear();
        if let Some(raw) = raw {
            segment.matrix = components::parse_pairs(raw.split(';'), ValueOrigin::Parsed);
        }
        self
    }

    /// Appends the unique path template the source declares for a resource
    /// type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::NoPathTemplate`] when the source has
    /// nothing for the resource and
    /// [`InvalidArgument::AmbiguousPathTemplate`] when it has more than
    /// one.
    pub fn path_from(
        &mut self,
        source: &dyn PathTemplateSource,
        resource: &str,
    ) -> Result<&mut Self, BuilderError> {
        let templates = source.resource_templates(resource);
        match templates.as_slice() {
            [] => Err(InvalidArgument::NoPathTemplate { resource: resource.to_string() }.into()),
            [template] => Ok(self.path(template)),
            _ => Err(InvalidArgument::AmbiguousPathTemplate {
                resource: resource.to_string(),
                count: templates.len(),
            }
            .into()),
        }
    }

    /// Appends the unique path template the source declares for a member
    /// operation of a resource type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::NoSuchMember`] when the source knows no
    /// such member and [`InvalidArgument::AmbiguousPathTemplate`] when
    /// several templates match.
    pub fn path_from_member(
        &mut self,
        source: &dyn PathTemplateSource,
        resource: &str,
        member: &str,
    ) -> Result<&mut Self, BuilderError> {
        let templates = source.member_templates(resource, member);
        match templates.as_slice() {
            [] => Err(InvalidArgument::NoSuchMember {
                resource: resource.to_string(),
                member: member.to_string(),
            }
            .into()),
            [template] => Ok(self.path(template)),
            _ => Err(InvalidArgument::AmbiguousPathTemplate {
                resource: resource.to_string(),
                count: templates.len(),
            }
            .into()),
        }
    }

    /// Builds the URI, resolving placeholders from positional values and
    /// encoding them literally (every `%` in a value is escaped).
    ///
    /// Values bind to distinct placeholders in first-discovery order across
    /// path segments, matrix values, and query values; a repeated name
    /// reuses its first binding. Extra values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MissingTemplateValue`] when fewer values are
    /// supplied than there are distinct placeholders.
    pub fn build(&self, values: &[&str]) -> Result<Uri, BuilderError> {
        self.build_positional(values, Mode::Literal)
    }

    /// [`build`](Self::build) with values that may already contain valid
    /// `%XX` triplets, which are preserved instead of double-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MissingTemplateValue`] when fewer values are
    /// supplied than there are distinct placeholders.
    pub fn build_from_encoded(&self, values: &[&str]) -> Result<Uri, BuilderError> {
        self.build_positional(values, Mode::PreserveEncoded)
    }

    /// Builds the URI, resolving each placeholder by name.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MissingTemplateValue`] when a discovered
    /// placeholder is not a key of the map. Unreferenced keys are ignored.
    pub fn build_from_map(&self, values: &HashMap<&str, &str>) -> Result<Uri, BuilderError> {
        self.build_named(values, Mode::Literal)
    }

    /// [`build_from_map`](Self::build_from_map) preserving valid `%XX`
    /// triplets in the map's values.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MissingTemplateValue`] when a discovered
    /// placeholder is not a key of the map.
    pub fn build_from_encoded_map(
        &self,
        values: &HashMap<&str, &str>,
    ) -> Result<Uri, BuilderError> {
        self.build_named(values, Mode::PreserveEncoded)
    }

    fn build_positional(&self, values: &[&str], mode: Mode) -> Result<Uri, BuilderError> {
        let ordered = assemble::placeholder_names(&self.components);
        let bindings = template::bind_positional(&ordered, values)?;
        assemble::assemble(&self.components, &bindings, mode).map(Uri::from_assembled)
    }

    fn build_named(&self, values: &HashMap<&str, &str>, mode: Mode) -> Result<Uri, BuilderError> {
        let ordered = assemble::placeholder_names(&self.components);
        let bindings = template::bind_named(&ordered, values)?;
        assemble::assemble(&self.components, &bindings, mode).map(Uri::from_assembled)
    }
}

fn check_name(name: &str) -> Result<(), BuilderError> {
    if name.is_empty() {
        return Err(InvalidArgument::EmptyParamName.into());
    }
    Ok(())
}
