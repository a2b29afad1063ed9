//! Serialization of builder state into the final URI text.
//!
//! Rendering follows the component order scheme, authority, path, query,
//! fragment. Only template substitutions and supplied parameter values pass
//! through the encoding engine under the build mode; text carried over from
//! a seed renders under the preserving discipline, so a placeholder-free
//! seed assembles back byte-identical — with the single exception that query
//! values always render `+` as `%2B`.

use crate::components::{Param, UriComponents, ValueOrigin};
use crate::encoding::{self, Component, Mode};
use crate::error::BuilderError;
use crate::template::{self, Bindings};

/// Placeholder names across all resolvable texts, in render order: each
/// segment's text, then that segment's matrix values, then query values.
pub(crate) fn placeholder_names(components: &UriComponents) -> Vec<&str> {
    let mut names = Vec::new();
    for segment in &components.segments {
        names.extend(template::placeholder_names(&segment.text));
        for param in &segment.matrix {
            if let Some(value) = &param.value {
                names.extend(template::placeholder_names(&value.text));
            }
        }
    }
    for param in &components.query {
        if let Some(value) = &param.value {
            names.extend(template::placeholder_names(&value.text));
        }
    }
    names
}

/// Renders the complete URI with the given placeholder bindings.
pub(crate) fn assemble(
    components: &UriComponents,
    bindings: &Bindings<'_>,
    mode: Mode,
) -> Result<String, BuilderError> {
    let mut out = String::new();

    if let Some(scheme) = &components.scheme {
        out.push_str(scheme);
        out.push(':');
    }

    if let Some(ssp) = &components.scheme_specific {
        encoding::encode_into(&mut out, ssp, Component::SchemeSpecificPart, Mode::PreserveEncoded);
        push_fragment(&mut out, components);
        return Ok(out);
    }

    if components.has_authority() {
        out.push_str("//");
        if let Some(user_info) = &components.user_info {
            encoding::encode_into(&mut out, user_info, Component::UserInfo, Mode::PreserveEncoded);
            out.push('@');
        }
        if let Some(host) = &components.host {
            encoding::encode_into(&mut out, host, Component::Host, Mode::PreserveEncoded);
        }
        if let Some(port) = components.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
    }

    let path_start = out.len();
    let mut first = true;
    for segment in &components.segments {
        if !first {
            out.push('/');
        }
        first = false;
        template::resolve_into(&mut out, &segment.text, bindings, Component::PathSegment, mode)?;
        for param in &segment.matrix {
            out.push(';');
            render_param(&mut out, param, bindings, Component::MatrixParam, mode)?;
        }
    }
    if components.trailing_slash {
        out.push('/');
    }
    let rooted = components.has_authority() || components.absolute;
    if rooted && out.len() > path_start && !out[path_start..].starts_with('/') {
        out.insert(path_start, '/');
    }

    if !components.query.is_empty() {
        out.push('?');
        let mut first = true;
        for param in &components.query {
            if !first {
                out.push('&');
            }
            first = false;
            render_param(&mut out, param, bindings, Component::QueryParam, mode)?;
        }
    }

    push_fragment(&mut out, components);
    Ok(out)
}

/// Renders `name` or `name=value`. Names render verbatim; values are
/// substituted raw and then encoded as a whole, so literal text and
/// substituted text follow one policy per entry.
fn render_param(
    out: &mut String,
    param: &Param,
    bindings: &Bindings<'_>,
    component: Component,
    mode: Mode,
) -> Result<(), BuilderError> {
    out.push_str(&param.name);
    let Some(value) = &param.value else {
        return Ok(());
    };
    let resolved = template::substitute_raw(&value.text, bindings)?;
    let value_mode = match value.origin {
        ValueOrigin::Parsed => Mode::PreserveEncoded,
        ValueOrigin::Supplied => mode,
    };
    out.push('=');
    encoding::encode_into(out, &resolved, component, value_mode);
    Ok(())
}

fn push_fragment(out: &mut String, components: &UriComponents) {
    if let Some(fragment) = &components.fragment {
        out.push('#');
        encoding::encode_into(out, fragment, Component::Fragment, Mode::PreserveEncoded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_uri;

    fn roundtrip(input: &str) -> String {
        let components = parse_uri(input).unwrap();
        assemble(&components, &Bindings::new(), Mode::PreserveEncoded).unwrap()
    }

    #[test]
    fn seeds_assemble_back_byte_identical() {
        for uri in [
            "http://foo/bar/baz?query=1#fragment",
            "http://bar/",
            "http://bar/foo%20",
            "http://blah/foo;p1=v1/bar;p2=v2",
            "ftp://ftp.is.co.za/rfc/rfc1808.txt",
            "mailto:java-net@java.sun.com",
            "news:comp.lang.java",
            "urn:isbn:096139212y",
            "ldap://[2001:db8::7]/c=GB?objectClass?one",
            "telnet://194.1.2.17:81/",
            "tel:+1-816-555-1212",
            "foo://bar.com:8042/there/here?name=baz#brr",
            "/index.jsp",
        ] {
            assert_eq!(roundtrip(uri), uri, "round-trip failed for {uri}");
        }
    }

    #[test]
    fn seeded_query_plus_normalizes_to_escape() {
        // the one deliberate round-trip exception
        assert_eq!(
            roundtrip("http://bar/foo+%20%2B?q=a+b%20%2B"),
            "http://bar/foo+%20%2B?q=a%2Bb%20%2B"
        );
    }

    #[test]
    fn authority_forces_leading_slash() {
        let mut components = parse_uri("http://bar").unwrap();
        components.append_path("baz", crate::components::ValueOrigin::Supplied);
        let uri = assemble(&components, &Bindings::new(), Mode::Literal).unwrap();
        assert_eq!(uri, "http://bar/baz");
    }

    #[test]
    fn trailing_marker_renders_without_segments() {
        let mut components = parse_uri("http://bar").unwrap();
        components.append_path("/", crate::components::ValueOrigin::Supplied);
        let uri = assemble(&components, &Bindings::new(), Mode::Literal).unwrap();
        assert_eq!(uri, "http://bar/");
    }

    #[test]
    fn bare_flags_render_without_equals() {
        let mut components = parse_uri("http://bar").unwrap();
        crate::components::add_params(&mut components.query, "q", &[]);
        let uri = assemble(&components, &Bindings::new(), Mode::Literal).unwrap();
        assert_eq!(uri, "http://bar?q");
    }

    #[test]
    fn unbound_placeholder_surfaces_as_error() {
        let mut components = parse_uri("http://zzz").unwrap();
        components.append_path("/{b}", crate::components::ValueOrigin::Supplied);
        let err = assemble(&components, &Bindings::new(), Mode::Literal).unwrap_err();
        assert_eq!(err, BuilderError::MissingTemplateValue { name: "b".to_string() });
    }
}
