//! Vote response parsing
//!
//! Extracts a candidate choice from a collaborator's free-form reply.
//! Pure text matching, no I/O. The collaborator is asked to answer with a
//! bare name, but replies arrive with honorifics, diacritic variants,
//! JSON wrappers, or surrounding prose; matching is conservative and
//! returns `None` rather than guessing between two plausible candidates.

use crate::cardinal::CardinalId;
use unicode_normalization::UnicodeNormalization;

/// Fold a name for comparison: NFKD, strip combining marks, collapse
/// whitespace, lowercase.
pub fn normalize_name(name: &str) -> String {
    name.nfkd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Find the candidate a response names, if any.
///
/// `candidates` are the `(id, name)` pairs the voter may legally choose.
/// Tried in order:
///
/// 1. a JSON object with a `vote` or `candidate` field
/// 2. the whole response as a name
/// 3. each line of the response as a name
/// 4. a unique candidate name contained anywhere in the response
pub fn parse_vote_response(response: &str, candidates: &[(CardinalId, &str)]) -> Option<CardinalId> {
    if let Some(json_choice) = extract_json_choice(response)
        && let Some(id) = match_name(&json_choice, candidates)
    {
        return Some(id);
    }

    if let Some(id) = match_name(response, candidates) {
        return Some(id);
    }

    for line in response.lines() {
        if let Some(id) = match_name(line, candidates) {
            return Some(id);
        }
    }

    contained_unique(response, candidates)
}

/// Exact match of `text` against the candidate names, tolerating an
/// honorific prefix and stray punctuation.
fn match_name(text: &str, candidates: &[(CardinalId, &str)]) -> Option<CardinalId> {
    let cleaned = text.trim().trim_matches(|c: char| {
        c.is_ascii_punctuation() && c != '-' && c != '\''
    });
    let normalized = normalize_name(cleaned);
    if normalized.is_empty() {
        return None;
    }

    let stripped = normalized
        .strip_prefix("cardinal ")
        .unwrap_or(&normalized)
        .to_string();

    candidates
        .iter()
        .find(|(_, name)| {
            let folded = normalize_name(name);
            folded == normalized || folded == stripped
        })
        .map(|(id, _)| *id)
}

/// If exactly one candidate name appears somewhere in the response, take
/// it; two or more matches are ambiguous.
fn contained_unique(response: &str, candidates: &[(CardinalId, &str)]) -> Option<CardinalId> {
    let haystack = normalize_name(response);
    let mut found = None;
    for (id, name) in candidates {
        if haystack.contains(&normalize_name(name)) {
            if found.is_some() {
                return None;
            }
            found = Some(*id);
        }
    }
    found
}

/// Pull a choice out of an embedded JSON object, e.g.
/// `{"vote": "Pietro Rossi", "reasoning": "..."}`.
fn extract_json_choice(response: &str) -> Option<String> {
    let start = response.find('{')?;
    let end = response[start..].rfind('}')?;
    let value: serde_json::Value = serde_json::from_str(&response[start..start + end + 1]).ok()?;
    ["vote", "candidate", "name"]
        .iter()
        .find_map(|key| value.get(key))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
