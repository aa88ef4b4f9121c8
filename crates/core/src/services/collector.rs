use crate::errors::CoreError;
use crate::models::document::{result_key, CombinedResult, GuideResult};
use crate::models::item::{Condition, GuideType, ItemIdentifier};
use crate::models::price::{DateField, MonthlyAverage};
use crate::providers::traits::PriceGuide;

use super::aggregator;

/// The fixed fetch order: both guide types, new before used.
pub const GUIDE_PAIRS: [(GuideType, Condition); 4] = [
    (GuideType::Stock, Condition::New),
    (GuideType::Stock, Condition::Used),
    (GuideType::Sold, Condition::New),
    (GuideType::Sold, Condition::Used),
];

/// Drives the price guide across the full (guide type × condition) grid
/// and assembles the combined result set.
///
/// Strictly sequential — one request in flight at a time, which also keeps
/// nonce generation trivially collision-free.
pub struct MultiConditionCollector<'a> {
    source: &'a dyn PriceGuide,
}

impl<'a> MultiConditionCollector<'a> {
    pub fn new(source: &'a dyn PriceGuide) -> Self {
        Self { source }
    }

    /// Collect all four (guide type, condition) results for one item.
    ///
    /// Fail-fast: the first failing fetch aborts the collection and the
    /// prior successes are discarded. A partial grid would silently skew
    /// any price comparison built on top of it.
    pub async fn collect(
        &self,
        item: &ItemIdentifier,
        currency_code: Option<&str>,
    ) -> Result<CombinedResult, CoreError> {
        let mut results = CombinedResult::new();

        for (guide_type, condition) in GUIDE_PAIRS {
            let data = self
                .source
                .price_guide(item, guide_type, condition, currency_code)
                .await?;
            let average_price = data.average_price()?;

            // Sold lots form a time series keyed by order date; stock
            // listings are current inventory and get no monthly breakdown.
            let monthly_averages = match guide_type {
                GuideType::Sold => {
                    aggregator::monthly_averages(&data.price_detail, DateField::DateOrdered)
                }
                GuideType::Stock => MonthlyAverage::new(),
            };

            results.insert(
                result_key(guide_type, condition),
                GuideResult {
                    average_price,
                    price_detail: data.price_detail,
                    monthly_averages,
                },
            );
        }

        Ok(results)
    }
}
