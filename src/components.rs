//! Mutable structural state of a URI under construction.
//!
//! The model keeps path segments, per-segment matrix parameters, and query
//! parameters as ordered sequences. Insertion order is significant and
//! round-trips through assembly. Parameter values remember where they came
//! from: text copied out of a seeded URI or a raw replacement string renders
//! under the preserving discipline no matter how the URI is later built,
//! while values supplied through parameter calls follow the build mode.

/// Where a stored parameter value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueOrigin {
    /// Copied from a seed URI or a raw `replace_query`/`replace_matrix`
    /// string; always rendered preserving existing escapes.
    Parsed,
    /// Given to a `query_param`/`matrix_param` call; rendered under the
    /// build call's encoding mode.
    Supplied,
}

/// A query or matrix parameter value and its rendering policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParamValue {
    pub(crate) text: String,
    pub(crate) origin: ValueOrigin,
}

/// One query or matrix entry. `value: None` is a bare flag (`?q` / `;q`),
/// distinct from an empty-string value (`?q=`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Param {
    pub(crate) name: String,
    pub(crate) value: Option<ParamValue>,
}

impl Param {
    pub(crate) fn new(name: &str, text: &str, origin: ValueOrigin) -> Self {
        Self {
            name: name.to_string(),
            value: Some(ParamValue { text: text.to_string(), origin }),
        }
    }

    pub(crate) fn flag(name: &str) -> Self {
        Self { name: name.to_string(), value: None }
    }
}

/// One path segment and the matrix parameters attached to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Segment {
    pub(crate) text: String,
    pub(crate) matrix: Vec<Param>,
}

impl Segment {
    /// Splits a raw piece such as `seg;k=v;flag` into segment text and
    /// matrix entries.
    pub(crate) fn from_raw(piece: &str, origin: ValueOrigin) -> Self {
        let mut parts = piece.split(';');
        let text = parts.next().unwrap_or_default().to_string();
        let matrix = parse_pairs(parts, origin);
        Self { text, matrix }
    }
}

/// The complete mutable state owned by one builder.
#[derive(Debug, Clone, Default)]
pub(crate) struct UriComponents {
    pub(crate) scheme: Option<String>,
    /// Opaque part; set means the URI has no hierarchical structure.
    pub(crate) scheme_specific: Option<String>,
    pub(crate) user_info: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u32>,
    /// An explicit `//` was seen while seeding, so an authority renders
    /// even if all sub-fields are unset.
    pub(crate) authority_present: bool,
    pub(crate) segments: Vec<Segment>,
    /// The path begins with `/`.
    pub(crate) absolute: bool,
    /// The assembled path ends with `/`.
    pub(crate) trailing_slash: bool,
    pub(crate) query: Vec<Param>,
    pub(crate) fragment: Option<String>,
}

impl UriComponents {
    pub(crate) fn has_authority(&self) -> bool {
        self.authority_present
            || self.user_info.is_some()
            || self.host.is_some()
            || self.port.is_some()
    }

    /// Switches to opaque mode, discarding hierarchical structure.
    pub(crate) fn set_opaque(&mut self, ssp: &str) {
        self.scheme_specific = Some(ssp.to_string());
        self.user_info = None;
        self.host = None;
        self.port = None;
        self.authority_present = false;
        self.segments.clear();
        self.absolute = false;
        self.trailing_slash = false;
        self.query.clear();
    }

    /// Any hierarchical mutation leaves opaque mode.
    pub(crate) fn leave_opaque(&mut self) {
        self.scheme_specific = None;
    }

    /// Appends a path fragment: splits on `/`, drops empty pieces from
    /// slash runs, attaches embedded matrix blocks to their segment. An
    /// empty fragment is a no-op; a trailing slash is kept as a marker.
    pub(crate) fn append_path(&mut self, text: &str, origin: ValueOrigin) {
        if text.is_empty() {
            return;
        }
        self.leave_opaque();
        if self.segments.is_empty() && !self.trailing_slash && text.starts_with('/') {
            self.absolute = true;
        }
        for piece in text.split('/').filter(|p| !p.is_empty()) {
            self.segments.push(Segment::from_raw(piece, origin));
        }
        self.trailing_slash = text.ends_with('/');
    }

    pub(crate) fn clear_path(&mut self) {
        self.segments.clear();
        self.absolute = false;
        self.trailing_slash = false;
    }

    /// The segment that matrix operations target. Materializes the implicit
    /// empty segment: a leading one when the path is empty, a trailing one
    /// when the trailing-slash marker is set (so `/bar/` + matrix renders
    /// `/bar/;k=v`).
    pub(crate) fn matrix_target(&mut self) -> &mut Segment {
        self.leave_opaque();
        if self.trailing_slash {
            self.trailing_slash = false;
            self.segments.push(Segment::default());
        } else if self.segments.is_empty() {
            self.segments.push(Segment::default());
        }
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }
}

/// Appends entries for `name`: one per value, or a bare flag for none.
pub(crate) fn add_params(list: &mut Vec<Param>, name: &str, values: &[&str]) {
    if values.is_empty() {
        list.push(Param::flag(name));
        return;
    }
    for value in values {
        list.push(Param::new(name, value, ValueOrigin::Supplied));
    }
}

/// Removes every entry for `name`, then inserts replacements where the
/// first removed entry sat (at the end if none existed). An empty value
/// slice is pure deletion.
pub(crate) fn replace_params(list: &mut Vec<Param>, name: &str, values: &[&str]) {
    let first = list.iter().position(|p| p.name == name);
    list.retain(|p| p.name != name);
    if values.is_empty() {
        return;
    }
    let at = first.unwrap_or(list.len()).min(list.len());
    for (offset, value) in values.iter().enumerate() {
        list.insert(at + offset, Param::new(name, value, ValueOrigin::Supplied));
    }
}

/// Parses raw `k=v` pieces (already split on their separator) into entries,
/// in textual order. Empty pieces are skipped; a piece without `=` becomes
/// a bare flag.
pub(crate) fn parse_pairs<'a>(
    pieces: impl Iterator<Item = &'a str>,
    origin: ValueOrigin,
) -> Vec<Param> {
    let mut out = Vec::new();
    for piece in pieces {
        if piece.is_empty() {
            continue;
        }
        match piece.split_once('=') {
            Some((name, value)) => out.push(Param::new(name, value, origin)),
            None => out.push(Param::flag(piece)),
        }
    }
    out
}
