use crate::tables::LanguageTable;

/// One `Accept-Language` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    pub tag: String,
    pub quality: f32,
}

/// Parses an `Accept-Language` header into ranges ordered by descending
/// quality. Entries with equal quality keep header order; `q=0`, wildcard and
/// malformed entries are dropped.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header
        .split(',')
        .filter_map(|raw| {
            let mut parts = raw.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" || !is_language_tag(tag) {
                return None;
            }

            let mut quality = 1.0_f32;
            for param in parts {
                let Some((key, value)) = param.split_once('=') else {
                    continue;
                };
                if key.trim().eq_ignore_ascii_case("q") {
                    quality = value.trim().parse::<f32>().ok()?;
                }
            }

            if !(quality > 0.0 && quality <= 1.0) {
                return None;
            }

            Some(LanguageRange {
                tag: tag.to_string(),
                quality,
            })
        })
        .collect();

    ranges.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    ranges
}

/// Best supported language for an `Accept-Language` header, or `None` when no
/// entry matches the table.
pub fn best_match<'a>(languages: &'a LanguageTable, header: &str) -> Option<&'a str> {
    parse_accept_language(header)
        .iter()
        .find_map(|range| languages.lookup_tag(&range.tag))
}

fn is_language_tag(tag: &str) -> bool {
    tag.len() <= 64
        && tag
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}

#[cfg(test)]
#[path = "accept_language_test.rs"]
mod accept_language_test;
