// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Placeholder identifier for text that sanitizes down to nothing.
pub const PLACEHOLDER_IDENT: &str = "node";

/// Bracket pairs whose content counts as a clarifying aside, not identity.
///
/// NFKC already folds the full-width ASCII variants (`（）`, `［］`, `｛｝`),
/// so only the CJK corner/angle brackets need listing explicitly.
const BRACKET_PAIRS: [(char, char); 7] = [
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('【', '】'),
    ('「', '」'),
    ('『', '』'),
    ('〈', '〉'),
];

fn br_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("static regex"))
}

/// Replaces line-break markup with a space so that `A<br>B` and `A B`
/// compare equal.
fn strip_markup(text: &str) -> String {
    br_tag_regex().replace_all(text, " ").into_owned()
}

/// Removes every matched bracket pair together with its content.
///
/// Unmatched brackets are left in place; later pipeline steps treat them as
/// ordinary punctuation.
fn strip_bracketed(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    loop {
        let mut removed = false;
        'pairs: for (open, close) in BRACKET_PAIRS {
            let mut open_idx = None;
            for (idx, &ch) in chars.iter().enumerate() {
                if ch == open {
                    open_idx = Some(idx);
                } else if ch == close {
                    if let Some(start) = open_idx {
                        chars.drain(start..=idx);
                        removed = true;
                        break 'pairs;
                    }
                }
            }
        }
        if !removed {
            return chars.into_iter().collect();
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}

/// Derives a stable, Mermaid-safe identifier from arbitrary display text.
///
/// Pure: the same input always yields the same output, independent of any
/// previously seen text. Collision handling between *different* inputs that
/// sanitize to the same identifier lives in the resolver, not here.
pub fn synthesize_ident(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    let stripped = strip_bracketed(&strip_markup(&composed));

    let mut ident = String::with_capacity(stripped.len());
    for ch in stripped.chars() {
        if ch.is_whitespace() || matches!(ch, '/' | ',' | '-') {
            if !ident.ends_with('_') {
                ident.push('_');
            }
        } else if ch.is_alphanumeric() {
            ident.push(ch);
        } else if ch == '_' && !ident.ends_with('_') {
            ident.push('_');
        }
        // any other punctuation is dropped; a run that only contained
        // punctuation leaves the separator from its neighbors in place
    }

    let trimmed = ident.trim_matches('_');
    if trimmed.is_empty() {
        return PLACEHOLDER_IDENT.to_owned();
    }
    trimmed.to_owned()
}

/// Normalizes raw text into the lookup key shared by the alias registry and
/// the resolver's seen-table.
///
/// Unlike [`synthesize_ident`], slashes and hyphens survive here: the key
/// must keep "Processor/Service" and "Processor Service" distinct even
/// though both sanitize to the same identifier.
pub fn normalize_key(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    let stripped = strip_bracketed(&strip_markup(&composed));
    collapse_whitespace(&stripped).to_lowercase()
}

/// Cleans raw display text for use as a fallback node label.
///
/// Keeps the input's script and any parenthetical aside; only markup and
/// whitespace runs are normalized.
pub fn sanitize_label(text: &str) -> String {
    collapse_whitespace(&strip_markup(text))
}
