use std::num::NonZeroUsize;

const DEFAULT_LISTING_LIMIT: usize = 256;
const FALLBACK_LIMIT: NonZeroUsize = NonZeroUsize::MIN;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub listing_limit: usize,
}

impl CacheConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn listing_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.listing_limit).unwrap_or(FALLBACK_LIMIT)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            listing_limit: DEFAULT_LISTING_LIMIT,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            listing_limit: settings.listing_limit,
        }
    }
}
