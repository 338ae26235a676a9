use std::sync::Arc;

use dashmap::DashMap;
use serenity::all::RoleId;

use crate::{
    model::word_filter::WordFilterSettings,
    server::{
        error::AppError, plugin::word_filter::matcher::WordMatcher,
        service::settings::PluginSettings,
    },
};

impl PluginSettings for WordFilterSettings {
    const PLUGIN: &'static str = "word-filter";

    fn validate(&self) -> Result<(), AppError> {
        if self.enabled && self.words.iter().all(|word| word.trim().is_empty()) {
            return Err(AppError::BadRequest(
                "Add at least one blocked word before enabling the filter".to_string(),
            ));
        }

        WordMatcher::new(&self.words).map(|_| ())
    }
}

/// Whether any of the author's roles exempts them from filtering.
pub fn is_exempt(settings: &WordFilterSettings, roles: &[RoleId]) -> bool {
    roles
        .iter()
        .any(|role| settings.exempt_role_ids.contains(&role.get()))
}

/// Compiled matchers per guild, rebuilt when a guild's word list changes.
#[derive(Default)]
pub struct MatcherCache {
    matchers: DashMap<u64, Arc<WordMatcher>>,
}

impl MatcherCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, guild_id: u64, words: &[String]) -> Result<Arc<WordMatcher>, AppError> {
        if let Some(matcher) = self.matchers.get(&guild_id) {
            if matcher.is_for(words) {
                return Ok(matcher.clone());
            }
        }

        let matcher = Arc::new(WordMatcher::new(words)?);
        self.matchers.insert(guild_id, matcher.clone());

        Ok(matcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(words: &[&str]) -> WordFilterSettings {
        WordFilterSettings {
            enabled: true,
            words: words.iter().map(|word| word.to_string()).collect(),
            exempt_role_ids: vec![7],
            ..Default::default()
        }
    }

    #[test]
    fn enabled_filter_needs_words() {
        assert!(matches!(
            settings(&[" "]).validate(),
            Err(AppError::BadRequest(_))
        ));
        assert!(settings(&["foo"]).validate().is_ok());
        assert!(WordFilterSettings::default().validate().is_ok());
    }

    #[test]
    fn exempt_role_skips_filter() {
        let settings = settings(&["foo"]);

        assert!(is_exempt(&settings, &[RoleId::new(3), RoleId::new(7)]));
        assert!(!is_exempt(&settings, &[RoleId::new(3)]));
        assert!(!is_exempt(&settings, &[]));
    }

    #[test]
    fn cache_rebuilds_after_word_change() {
        let cache = MatcherCache::new();

        let first = cache.get(1, &["foo".to_string()]).unwrap();
        let same = cache.get(1, &["foo".to_string()]).unwrap();
        let changed = cache.get(1, &["bar".to_string()]).unwrap();

        assert!(Arc::ptr_eq(&first, &same));
        assert_eq!(changed.find("foo bar"), Some("bar"));
    }
}
