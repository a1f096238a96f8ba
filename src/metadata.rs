//! Initialization-template metadata.
//!
//! The template sits between two underscore-only boundary lines anywhere in
//! the source; its lines carry `[key]=value` pairs. A template without a
//! closing boundary is not a template at all and the whole source stays body.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{FontStyle, Meta};

static META_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+?)\]=([^\[]*)").expect("meta pair pattern"));

static AUTHOR_WITH_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\(([^)]+)\)$").expect("author url pattern"));

/// Split the source into parsed metadata and the remaining body text.
pub(crate) fn extract(source: &str) -> (Option<Meta>, String) {
    let lines: Vec<&str> = source.split('\n').collect();

    let Some(start) = lines.iter().position(|l| is_boundary_line(l)) else {
        return (None, source.to_string());
    };
    let Some(end) = lines[start + 1..]
        .iter()
        .position(|l| is_boundary_line(l))
        .map(|offset| start + 1 + offset)
    else {
        return (None, source.to_string());
    };

    let mut meta = Meta::default();
    for line in &lines[start + 1..end] {
        let Some(bracket) = line.find('[') else {
            continue;
        };
        for captures in META_PAIR.captures_iter(&line[bracket..]) {
            let key = captures[1].trim();
            let value = captures[2].trim();
            apply_meta_key(&mut meta, key, value);
        }
    }

    let body = lines[..start]
        .iter()
        .chain(&lines[end + 1..])
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    if meta.is_empty() {
        (None, body)
    } else {
        (Some(meta), body)
    }
}

fn is_boundary_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '_')
}

fn apply_meta_key(meta: &mut Meta, key: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    match key {
        "title" => meta.title = Some(value.to_string()),
        "author" => {
            // A trailing parenthesized group is the author's URL; earlier
            // parens stay part of the name.
            if let Some(captures) = AUTHOR_WITH_URL.captures(value) {
                meta.author = Some(captures[1].trim().to_string());
                meta.author_url = Some(captures[2].trim().to_string());
            } else {
                meta.author = Some(value.to_string());
            }
        }
        "author_url" => meta.author_url = Some(value.to_string()),
        "time" => meta.time = Some(value.to_string()),
        "add_info" => meta.add_info = Some(value.to_string()),
        // The canonical key is the literal "tag(s)"; plain "tags" is accepted
        // as an alias.
        "tag(s)" | "tags" => {
            meta.tags = value
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }
        "global_font" => {
            meta.global_font = value
                .split(',')
                .filter_map(|part| FontStyle::from_name(part.trim()))
                .collect();
        }
        _ => {}
    }
}
