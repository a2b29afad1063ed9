//! Template placeholder scanning and value binding.
//!
//! A placeholder is a `{name}` token with a non-empty, brace-free body.
//! Anything else, including an unpaired `{`, is literal text. Scanning is a
//! single left-to-right pass; substituted values are never re-scanned, so a
//! bound value containing braces comes out percent-encoded rather than
//! re-resolved.

use std::collections::HashMap;

use crate::encoding::{self, Component, Mode};
use crate::error::BuilderError;

/// One piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Chunk<'a> {
    /// Text copied through untouched by the resolver.
    Literal(&'a str),
    /// A `{name}` occurrence; holds the name without braces.
    Placeholder(&'a str),
}

/// Splits `text` into literal runs and placeholder occurrences, in order.
pub(crate) fn chunks(text: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut literal_start = 0usize;
    let bytes = text.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            if let Some(close) = text[i + 1..].find('}') {
                let body = &text[i + 1..i + 1 + close];
                if !body.is_empty() && !body.contains('{') {
                    if literal_start < i {
                        out.push(Chunk::Literal(&text[literal_start..i]));
                    }
                    out.push(Chunk::Placeholder(body));
                    i += close + 2;
                    literal_start = i;
                    continue;
                }
            }
        }
        i += 1;
    }
    if literal_start < text.len() {
        out.push(Chunk::Literal(&text[literal_start..]));
    }
    out
}

/// Placeholder names occurring in `text`, in order, repeats included.
pub(crate) fn placeholder_names(text: &str) -> Vec<&str> {
    chunks(text)
        .into_iter()
        .filter_map(|c| match c {
            Chunk::Placeholder(name) => Some(name),
            Chunk::Literal(_) => None,
        })
        .collect()
}

/// Values bound to placeholder names for one build call.
pub(crate) type Bindings<'a> = HashMap<&'a str, &'a str>;

/// Binds positional values to the distinct placeholder names of `ordered`,
/// in first-discovery order.
///
/// The Nth distinct name consumes the Nth value; a repeated name reuses its
/// existing binding. Supplying more values than distinct names is not an
/// error; supplying fewer fails with [`BuilderError::MissingTemplateValue`]
/// naming the first unbound placeholder.
pub(crate) fn bind_positional<'a>(
    ordered: &[&'a str],
    values: &[&'a str],
) -> Result<Bindings<'a>, BuilderError> {
    let mut bound = Bindings::new();
    let mut next = 0usize;
    for &name in ordered {
        if bound.contains_key(name) {
            continue;
        }
        let Some(&value) = values.get(next) else {
            return Err(BuilderError::MissingTemplateValue { name: name.to_string() });
        };
        bound.insert(name, value);
        next += 1;
    }
    Ok(bound)
}

/// Binds named values: every discovered placeholder must be a key of the
/// map. Unreferenced keys are ignored.
pub(crate) fn bind_named<'a>(
    ordered: &[&'a str],
    values: &'a HashMap<&str, &str>,
) -> Result<Bindings<'a>, BuilderError> {
    let mut bound = Bindings::new();
    for &name in ordered {
        match values.get(name) {
            Some(&value) => {
                bound.insert(name, value);
            }
            None => {
                return Err(BuilderError::MissingTemplateValue { name: name.to_string() });
            }
        }
    }
    Ok(bound)
}

/// Resolves a path-segment template into `out`: literal runs are copied
/// verbatim, each placeholder is replaced by its bound value encoded for
/// `component` under `mode`.
pub(crate) fn resolve_into(
    out: &mut String,
    text: &str,
    bindings: &Bindings<'_>,
    component: Component,
    mode: Mode,
) -> Result<(), BuilderError> {
    for chunk in chunks(text) {
        match chunk {
            Chunk::Literal(lit) => out.push_str(lit),
            Chunk::Placeholder(name) => {
                let Some(value) = bindings.get(name) else {
                    return Err(BuilderError::MissingTemplateValue { name: name.to_string() });
                };
                encoding::encode_into(out, value, component, mode);
            }
        }
    }
    Ok(())
}

/// Substitutes placeholders with their raw bound values, no encoding.
///
/// Used for parameter values, which are encoded as a whole after
/// substitution so that literal text and substituted text follow one policy.
pub(crate) fn substitute_raw(
    text: &str,
    bindings: &Bindings<'_>,
) -> Result<String, BuilderError> {
    let mut out = String::with_capacity(text.len());
    for chunk in chunks(text) {
        match chunk {
            Chunk::Literal(lit) => out.push_str(lit),
            Chunk::Placeholder(name) => {
                let Some(value) = bindings.get(name) else {
                    return Err(BuilderError::MissingTemplateValue { name: name.to_string() });
                };
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_placeholders_in_order() {
        assert_eq!(
            chunks("/index{ind}.jsp"),
            vec![
                Chunk::Literal("/index"),
                Chunk::Placeholder("ind"),
                Chunk::Literal(".jsp"),
            ]
        );
    }

    #[test]
    fn repeated_names_each_occur() {
        assert_eq!(placeholder_names("{b}/{a}/{b}"), vec!["b", "a", "b"]);
    }

    #[test]
    fn unpaired_brace_is_literal() {
        assert_eq!(chunks("a{b"), vec![Chunk::Literal("a{b")]);
        assert_eq!(chunks("a}b"), vec![Chunk::Literal("a}b")]);
    }

    #[test]
    fn empty_body_is_literal() {
        assert_eq!(chunks("a{}b"), vec![Chunk::Literal("a{}b")]);
    }

    #[test]
    fn nested_open_brace_is_literal() {
        assert_eq!(
            chunks("{a{b}c"),
            vec![Chunk::Literal("{a"), Chunk::Placeholder("b"), Chunk::Literal("c")]
        );
    }

    #[test]
    fn positional_binds_distinct_first_occurrences() {
        let bound = bind_positional(&["b", "a", "b"], &["foo", "bar"]).unwrap();
        assert_eq!(bound.get("b"), Some(&"foo"));
        assert_eq!(bound.get("a"), Some(&"bar"));
    }

    #[test]
    fn positional_ignores_extra_values() {
        let bound = bind_positional(&["x"], &["1", "2", "3"]).unwrap();
        assert_eq!(bound.len(), 1);
    }

    #[test]
    fn positional_too_few_values_fails_on_first_unbound() {
        let err = bind_positional(&["b", "a"], &["foo"]).unwrap_err();
        assert_eq!(err, BuilderError::MissingTemplateValue { name: "a".to_string() });
    }

    #[test]
    fn named_requires_every_referenced_key() {
        let mut values = HashMap::new();
        values.insert("b", "foo");
        let err = bind_named(&["b", "a"], &values).unwrap_err();
        assert_eq!(err, BuilderError::MissingTemplateValue { name: "a".to_string() });
    }

    #[test]
    fn resolve_encodes_only_substituted_text() {
        let mut bindings = Bindings::new();
        bindings.insert("a", "x y");
        let mut out = String::new();
        resolve_into(&mut out, "pre {a}", &bindings, Component::PathSegment, Mode::Literal)
            .unwrap();
        assert_eq!(out, "pre x%20y");
    }

    #[test]
    fn substitute_raw_leaves_values_unencoded() {
        let mut bindings = Bindings::new();
        bindings.insert("a", "x y");
        assert_eq!(substitute_raw("{a}!", &bindings).unwrap(), "x y!");
    }
}
