//! Cleaning of member-submitted tag lists.

use std::collections::HashSet;

use crate::{model::tags::TagKind, server::error::AppError};

/// Normalizes a submitted tag list.
///
/// Values are trimmed and empty ones dropped. Duplicates are removed ignoring case,
/// keeping the first occurrence. With a non-empty allow-list every value must appear in
/// it and takes its casing; an empty allow-list accepts anything.
///
/// # Returns
/// - `Ok(Vec<String>)` - Cleaned values in submission order
/// - `Err(AppError::BadRequest)` - A value is not allowed, or more than `max` remain
pub fn normalize_tags(
    kind: TagKind,
    values: &[String],
    allowed: &[String],
    max: usize,
) -> Result<Vec<String>, AppError> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        let key = value.to_lowercase();
        if !seen.insert(key.clone()) {
            continue;
        }

        let tag = if allowed.is_empty() {
            value.to_string()
        } else {
            allowed
                .iter()
                .find(|candidate| candidate.trim().to_lowercase() == key)
                .map(|candidate| candidate.trim().to_string())
                .ok_or_else(|| {
                    AppError::BadRequest(format!("'{}' is not an allowed {}", value, kind.label()))
                })?
        };

        tags.push(tag);
    }

    if tags.len() > max {
        return Err(AppError::BadRequest(format!(
            "At most {} {} tags are allowed, got {}",
            max,
            kind.label(),
            tags.len()
        )));
    }

    Ok(tags)
}

/// Appends already-normalized tags to a stored list, skipping ones it holds.
///
/// Stored values are kept as they are even when the guild settings have since
/// tightened. The cap only rejects a merge that grows the list past `max`.
///
/// # Returns
/// - `Ok(Vec<String>)` - Stored values followed by the new ones
/// - `Err(AppError::BadRequest)` - The list would grow past `max`
pub fn merge_tags(
    kind: TagKind,
    current: &[String],
    added: Vec<String>,
    max: usize,
) -> Result<Vec<String>, AppError> {
    let mut seen: HashSet<String> = current.iter().map(|tag| tag.to_lowercase()).collect();
    let mut tags = current.to_vec();

    for tag in added {
        if seen.insert(tag.to_lowercase()) {
            tags.push(tag);
        }
    }

    if tags.len() > current.len() && tags.len() > max {
        return Err(AppError::BadRequest(format!(
            "At most {} {} tags are allowed, adding would make {}",
            max,
            kind.label(),
            tags.len()
        )));
    }

    Ok(tags)
}

/// Drops values from a stored list, ignoring case and surrounding whitespace.
pub fn without_tags(current: &[String], removed: &[String]) -> Vec<String> {
    let removed: HashSet<String> = removed
        .iter()
        .map(|value| value.trim().to_lowercase())
        .collect();

    current
        .iter()
        .filter(|tag| !removed.contains(&tag.to_lowercase()))
        .cloned()
        .collect()
}

/// Splits a comma separated command argument into values.
pub fn split_values(input: &str) -> Vec<String> {
    input.split(',').map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn trims_drops_empties_and_dedupes() {
        let tags = normalize_tags(
            TagKind::Genre,
            &strings(&[" House", "", "techno ", "house", "  ", "Techno"]),
            &[],
            10,
        )
        .unwrap();

        assert_eq!(tags, strings(&["House", "techno"]));
    }

    #[test]
    fn takes_casing_from_allow_list() {
        let allowed = strings(&["Drum & Bass", "FL Studio"]);

        let tags = normalize_tags(TagKind::Daw, &strings(&["fl studio"]), &allowed, 10).unwrap();

        assert_eq!(tags, strings(&["FL Studio"]));
    }

    #[test]
    fn rejects_values_outside_allow_list() {
        let allowed = strings(&["Ableton"]);

        let result = normalize_tags(TagKind::Daw, &strings(&["Ableton", "Reaper"]), &allowed, 10);

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg.contains("Reaper")));
    }

    #[test]
    fn enforces_maximum_after_dedupe() {
        let values = strings(&["a", "b", "A", "c"]);

        assert!(normalize_tags(TagKind::Genre, &values, &[], 3).is_ok());
        assert!(normalize_tags(TagKind::Genre, &values, &[], 2).is_err());
    }

    #[test]
    fn merge_skips_held_tags_and_caps_growth() {
        let current = strings(&["House", "Techno"]);

        let merged = merge_tags(TagKind::Genre, &current, strings(&["techno", "Ambient"]), 3);
        assert_eq!(merged.unwrap(), strings(&["House", "Techno", "Ambient"]));

        let full = merge_tags(TagKind::Genre, &current, strings(&["Ambient"]), 2);
        assert!(matches!(full, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn merge_keeps_lists_already_over_cap() {
        let current = strings(&["a", "b", "c"]);

        let unchanged = merge_tags(TagKind::Genre, &current, strings(&["B"]), 1).unwrap();
        assert_eq!(unchanged, current);

        assert!(merge_tags(TagKind::Genre, &current, strings(&["d"]), 1).is_err());
    }

    #[test]
    fn removal_ignores_case_and_whitespace() {
        let current = strings(&["House", "Techno", "Ambient"]);

        let kept = without_tags(&current, &strings(&[" house", "AMBIENT", "Jazz"]));

        assert_eq!(kept, strings(&["Techno"]));
    }

    #[test]
    fn splits_command_input() {
        assert_eq!(split_values("house, techno"), strings(&["house", " techno"]));
    }
}
