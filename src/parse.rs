//! Seeding a builder from an existing URI string.
//!
//! The input is assumed to carry its own valid percent-encoding; everything
//! is stored verbatim so that a placeholder-free seed assembles back to the
//! original text. Splitting order: fragment off the end, then query, then
//! scheme, then authority, then path.

use crate::components::{Segment, UriComponents, ValueOrigin, parse_pairs};
use crate::error::{BuilderError, InvalidArgument};

/// Parses an absolute, relative, or opaque URI into builder state.
pub(crate) fn parse_uri(input: &str) -> Result<UriComponents, BuilderError> {
    if input.is_empty() {
        return Err(unparsable(input, "input is empty"));
    }

    let mut components = UriComponents::default();
    let mut rest = input;

    // Fragment first so '#' never confuses later splits. An empty
    // fragment is stripped.
    if let Some((before, fragment)) = rest.split_once('#') {
        if !fragment.is_empty() {
            components.fragment = Some(fragment.to_string());
        }
        rest = before;
    }

    if let Some(scheme) = leading_scheme(rest) {
        if !is_valid_scheme(scheme) {
            return Err(BuilderError::from(InvalidArgument::InvalidScheme {
                scheme: scheme.to_string(),
            }));
        }
        components.scheme = Some(scheme.to_string());
        rest = &rest[scheme.len() + 1..];

        // A scheme-specific part not starting with '/' makes the URI
        // opaque: no authority, path, or query structure.
        if !rest.is_empty() && !rest.starts_with('/') {
            components.scheme_specific = Some(rest.to_string());
            return Ok(components);
        }
    }

    if let Some((before, query)) = rest.split_once('?') {
        if !query.is_empty() {
            components.query = parse_pairs(query.split('&'), ValueOrigin::Parsed);
        }
        rest = before;
    }

    if let Some(after) = rest.strip_prefix("//") {
        components.authority_present = true;
        let authority_end = after.find('/').unwrap_or(after.len());
        let (authority, path) = after.split_at(authority_end);
        parse_authority(authority, &mut components).map_err(|reason| unparsable(input, reason))?;
        rest = path;
    }

    parse_path(rest, &mut components);
    Ok(components)
}

/// The scheme candidate: text before the first ':' that precedes any
/// `/`, `?`, or `#`. Returns `None` for relative references.
fn leading_scheme(input: &str) -> Option<&str> {
    let colon = input.find(':')?;
    if input[..colon].contains(['/', '?']) || colon == 0 {
        return None;
    }
    Some(&input[..colon])
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub(crate) fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn parse_authority(authority: &str, components: &mut UriComponents) -> Result<(), &'static str> {
    let mut rest = authority;

    if let Some((user_info, host_port)) = rest.split_once('@') {
        components.user_info = Some(user_info.to_string());
        rest = host_port;
    }

    // Bracketed IP literals keep their brackets; the port colon can only
    // follow the closing bracket.
    let (host, port) = if rest.starts_with('[') {
        let close = rest.find(']').ok_or("unterminated IP literal")?;
        let host = &rest[..=close];
        match &rest[close + 1..] {
            "" => (host, None),
            p => (host, Some(p.strip_prefix(':').ok_or("junk after IP literal")?)),
        }
    } else {
        match rest.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (rest, None),
        }
    };

    if !host.is_empty() {
        components.host = Some(host.to_string());
    }
    if let Some(port) = port {
        let parsed: u32 = port.parse().map_err(|_| "invalid port")?;
        components.port = Some(parsed);
    }
    Ok(())
}

fn parse_path(path: &str, components: &mut UriComponents) {
    if path.is_empty() {
        return;
    }
    components.absolute = path.starts_with('/');
    components.trailing_slash = path.ends_with('/');
    components.segments = path
        .split('/')
        .filter(|p| !p.is_empty())
        .map(|p| Segment::from_raw(p, ValueOrigin::Parsed))
        .collect();
}

fn unparsable(input: &str, reason: &'static str) -> BuilderError {
    BuilderError::from(InvalidArgument::UnparsableUri { input: input.to_string(), reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_hierarchical_uri() {
        let c = parse_uri("http://foo/bar/baz?query=1#fragment").unwrap();
        assert_eq!(c.scheme.as_deref(), Some("http"));
        assert_eq!(c.host.as_deref(), Some("foo"));
        assert_eq!(c.segments.len(), 2);
        assert_eq!(c.query.len(), 1);
        assert_eq!(c.query[0].name, "query");
        assert_eq!(c.fragment.as_deref(), Some("fragment"));
    }

    #[test]
    fn parses_authority_fields() {
        let c = parse_uri("foo://user@bar.com:8042/there").unwrap();
        assert_eq!(c.user_info.as_deref(), Some("user"));
        assert_eq!(c.host.as_deref(), Some("bar.com"));
        assert_eq!(c.port, Some(8042));
    }

    #[test]
    fn parses_bracketed_ip_literal() {
        let c = parse_uri("ldap://[2001:db8::7]/c=GB?objectClass?one").unwrap();
        assert_eq!(c.host.as_deref(), Some("[2001:db8::7]"));
        assert_eq!(c.port, None);
        assert_eq!(c.segments[0].text, "c=GB");
        // query split happens on '&' only; '?' inside the query is data
        assert_eq!(c.query.len(), 1);
        assert_eq!(c.query[0].name, "objectClass?one");
        assert!(c.query[0].value.is_none());
    }

    #[test]
    fn parses_opaque_uris() {
        let c = parse_uri("mailto:java-net@java.sun.com").unwrap();
        assert_eq!(c.scheme.as_deref(), Some("mailto"));
        assert_eq!(c.scheme_specific.as_deref(), Some("java-net@java.sun.com"));
        assert!(c.segments.is_empty());

        let c = parse_uri("urn:isbn:096139212y").unwrap();
        assert_eq!(c.scheme_specific.as_deref(), Some("isbn:096139212y"));

        let c = parse_uri("tel:+1-816-555-1212").unwrap();
        assert_eq!(c.scheme_specific.as_deref(), Some("+1-816-555-1212"));
    }

    #[test]
    fn single_slash_after_scheme_is_hierarchical() {
        let c = parse_uri("file:/etc/hosts").unwrap();
        assert!(c.scheme_specific.is_none());
        assert!(c.absolute);
        assert_eq!(c.segments.len(), 2);
    }

    #[test]
    fn relative_path_reference() {
        let c = parse_uri("/index.jsp").unwrap();
        assert!(c.scheme.is_none());
        assert!(!c.has_authority());
        assert!(c.absolute);
        assert_eq!(c.segments[0].text, "index.jsp");
    }

    #[test]
    fn rootless_reference_is_not_absolute() {
        let c = parse_uri("test").unwrap();
        assert!(!c.absolute);
        assert_eq!(c.segments[0].text, "test");
    }

    #[test]
    fn trailing_slash_is_kept_as_marker() {
        let c = parse_uri("http://bar/").unwrap();
        assert!(c.segments.is_empty());
        assert!(c.trailing_slash);

        let c = parse_uri("telnet://194.1.2.17:81/").unwrap();
        assert_eq!(c.port, Some(81));
        assert!(c.trailing_slash);
    }

    #[test]
    fn matrix_blocks_attach_to_their_segment() {
        let c = parse_uri("http://blah/foo;p1=v1/bar").unwrap();
        assert_eq!(c.segments[0].text, "foo");
        assert_eq!(c.segments[0].matrix[0].name, "p1");
        assert!(c.segments[1].matrix.is_empty());
    }

    #[test]
    fn repeated_query_names_stay_distinct() {
        let c = parse_uri("http://foo/bar;p1=v1;p2=v2;p1=v3?noise=bazzz").unwrap();
        assert_eq!(c.segments[0].matrix.len(), 3);
        assert_eq!(c.query[0].name, "noise");
    }

    #[test]
    fn empty_query_and_fragment_are_stripped() {
        let c = parse_uri("http://bar/x?").unwrap();
        assert!(c.query.is_empty());
        let c = parse_uri("http://bar/x#").unwrap();
        assert!(c.fragment.is_none());
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = parse_uri("").unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidArgument(InvalidArgument::UnparsableUri { .. })
        ));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = parse_uri("http://foo:bad/x").unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidArgument(InvalidArgument::UnparsableUri { .. })
        ));
    }

    #[test]
    fn unterminated_ip_literal_is_rejected() {
        assert!(parse_uri("http://[2001:db8/x").is_err());
    }

    #[test]
    fn scheme_token_is_validated() {
        assert!(is_valid_scheme("http"));
        assert!(is_valid_scheme("foo+bar-1.2"));
        assert!(!is_valid_scheme(""));
        assert!(!is_valid_scheme("1http"));
        assert!(!is_valid_scheme("ht tp"));
    }
}
