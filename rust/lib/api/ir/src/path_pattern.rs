//! Route patterns: `/blog/:slug`, `/docs/:rest*`, `/files/*`.

use indexmap::IndexMap;

/// Captured route parameters, in pattern order.
pub type PathParams = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `:name`
    Required,
    /// `:name?`
    Optional,
    /// `:name*`
    ZeroOrMore,
}

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    Static(String),
    Param { name: String, modifier: Modifier },
    /// `*`, captured under its positional index.
    Wildcard(usize),
}

pub fn tokenize_pathname_pattern(pattern: &str) -> Vec<PathToken> {
    let mut wildcards = 0;
    split_segments(pattern)
        .map(|segment| {
            if segment == "*" {
                wildcards += 1;
                return PathToken::Wildcard(wildcards - 1);
            }
            let Some(param) = segment.strip_prefix(':') else {
                return PathToken::Static(segment.to_string());
            };
            if let Some(name) = param.strip_suffix('?') {
                PathToken::Param {
                    name: name.to_string(),
                    modifier: Modifier::Optional,
                }
            } else if let Some(name) = param.strip_suffix('*') {
                PathToken::Param {
                    name: name.to_string(),
                    modifier: Modifier::ZeroOrMore,
                }
            } else {
                PathToken::Param {
                    name: param.to_string(),
                    modifier: Modifier::Required,
                }
            }
        })
        .collect()
}

/// Match a concrete pathname against a route pattern.
///
/// Query string and fragment of `pathname` are ignored, as are empty
/// segments (so trailing slashes match). Returns `None` when the pathname
/// does not fit the pattern.
pub fn match_pathname_pattern(pattern: &str, pathname: &str) -> Option<PathParams> {
    let tokens = tokenize_pathname_pattern(pattern);
    let path = pathname
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let segments: Vec<&str> = split_segments(path).collect();
    let mut params = PathParams::new();
    match_tokens(&tokens, &segments, &mut params).then_some(params)
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_tokens(tokens: &[PathToken], segments: &[&str], params: &mut PathParams) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return segments.is_empty();
    };

    match token {
        PathToken::Static(expected) => {
            segments.first() == Some(&expected.as_str())
                && match_tokens(rest, &segments[1..], params)
        }
        PathToken::Param { name, modifier } => match modifier {
            Modifier::Required => capture(name, segments, 1, rest, params),
            Modifier::Optional => {
                capture(name, segments, 1, rest, params) || match_tokens(rest, segments, params)
            }
            Modifier::ZeroOrMore => capture_greedy(name, segments, rest, params),
        },
        PathToken::Wildcard(index) => capture_greedy(&index.to_string(), segments, rest, params),
    }
}

/// Capture exactly `take` segments under `name`, then match the rest.
fn capture(
    name: &str,
    segments: &[&str],
    take: usize,
    rest: &[PathToken],
    params: &mut PathParams,
) -> bool {
    if take == 0 || segments.len() < take {
        return false;
    }
    let previous = params.insert(name.to_string(), segments[..take].join("/"));
    if match_tokens(rest, &segments[take..], params) {
        return true;
    }
    match previous {
        Some(value) => {
            params.insert(name.to_string(), value);
        }
        None => {
            params.shift_remove(name);
        }
    }
    false
}

/// Longest capture first; zero segments leave the parameter unset.
fn capture_greedy(name: &str, segments: &[&str], rest: &[PathToken], params: &mut PathParams) -> bool {
    for take in (1..=segments.len()).rev() {
        if capture(name, segments, take, rest, params) {
            return true;
        }
    }
    match_tokens(rest, segments, params)
}
