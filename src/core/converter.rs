use crate::core::config::QuickConversionSettings;
use crate::core::convert::{ResultItem, convert};
use crate::core::currency::RateProvider;
use crate::core::query::parse;
use crate::core::resolver::RateResolver;
use std::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Host-facing entry point: turns a search string into result items.
pub struct Converter<P: RateProvider> {
    settings: RwLock<QuickConversionSettings>,
    resolver: RateResolver<P>,
}

impl<P: RateProvider> Converter<P> {
    pub fn new(settings: QuickConversionSettings, resolver: RateResolver<P>) -> Self {
        Self {
            settings: RwLock::new(settings),
            resolver,
        }
    }

    pub fn resolver(&self) -> &RateResolver<P> {
        &self.resolver
    }

    pub fn settings(&self) -> QuickConversionSettings {
        self.settings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replaces the settings used by subsequent queries.
    pub fn update_settings(&self, settings: QuickConversionSettings) {
        debug!(?settings, "Updating settings");
        *self.settings.write().unwrap_or_else(|e| e.into_inner()) = settings;
    }

    /// Returns no items when the text is not a conversion, the generic failure
    /// item when the lookup fails, and one converted item otherwise.
    #[instrument(name = "Query", skip(self))]
    pub async fn query(&self, raw_query: &str) -> Vec<ResultItem> {
        let Some(request) = parse(raw_query, &self.settings()) else {
            debug!("Not a conversion query");
            return Vec::new();
        };

        match convert(&request, &self.resolver).await {
            Ok(conversion) => vec![ResultItem::from(&conversion)],
            Err(e) => {
                warn!(error = %e, "Conversion failed");
                vec![ResultItem::failure()]
            }
        }
    }
}
