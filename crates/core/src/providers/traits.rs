use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::item::{Condition, GuideType, ItemIdentifier};
use crate::models::price::PriceGuideData;

/// Trait abstraction over the price-guide API.
///
/// The collector and facade depend on this seam only, so tests inject a
/// scripted implementation instead of mocking HTTP — the live
/// `BricklinkProvider` is the one place that knows about signing and
/// transport.
#[async_trait]
pub trait PriceGuide: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the price-guide payload for one
    /// (item, guide type, condition, currency) tuple.
    async fn price_guide(
        &self,
        item: &ItemIdentifier,
        guide_type: GuideType,
        condition: Condition,
        currency_code: Option<&str>,
    ) -> Result<PriceGuideData, CoreError>;
}
