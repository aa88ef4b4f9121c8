pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod signing;
pub mod storage;

use errors::CoreError;
use models::credentials::Credentials;
use models::document::PriceExport;
use models::item::{Condition, GuideType, ItemIdentifier};
use providers::bricklink::BricklinkProvider;
use providers::traits::PriceGuide;
use services::collector::MultiConditionCollector;

/// Main entry point for the BrickLink price tracker core.
///
/// Owns the signed API provider and drives the fetch → aggregate pipeline;
/// sync against the document store lives in
/// [`services::sync_service::SyncService`].
pub struct PriceTracker {
    provider: BricklinkProvider,
}

impl PriceTracker {
    /// Tracker against the live BrickLink API. Fails with the missing
    /// secret names when credentials are incomplete — before any network
    /// I/O.
    pub fn new(credentials: Credentials) -> Result<Self, CoreError> {
        Ok(Self {
            provider: BricklinkProvider::new(credentials)?,
        })
    }

    /// Credentials from the four `BRICKLINK_*` environment variables.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::new(Credentials::from_env()?)
    }

    /// Single average price for one (guide type, condition) pair.
    pub async fn average_price(
        &self,
        item: &ItemIdentifier,
        guide_type: GuideType,
        condition: Condition,
        currency_code: Option<&str>,
    ) -> Result<f64, CoreError> {
        self.provider
            .price_guide(item, guide_type, condition, currency_code)
            .await?
            .average_price()
    }

    /// Full four-way (guide type × condition) collection, packaged as an
    /// export document ready to be written and later synchronized.
    pub async fn collect(
        &self,
        item: &ItemIdentifier,
        currency_code: Option<&str>,
    ) -> Result<PriceExport, CoreError> {
        let collector = MultiConditionCollector::new(&self.provider);
        let results = collector.collect(item, currency_code).await?;
        Ok(PriceExport::new(
            item,
            currency_code.map(str::to_string),
            results,
        ))
    }
}
