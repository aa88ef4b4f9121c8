// ═══════════════════════════════════════════════════════════════════
// Collector Tests — MultiConditionCollector over a scripted PriceGuide
// ═══════════════════════════════════════════════════════════════════

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use bricklink_price_core::errors::CoreError;
use bricklink_price_core::models::item::{Condition, GuideType, ItemIdentifier};
use bricklink_price_core::models::price::{PriceGuideData, PriceRecord};
use bricklink_price_core::providers::traits::PriceGuide;
use bricklink_price_core::services::collector::{MultiConditionCollector, GUIDE_PAIRS};

// ═══════════════════════════════════════════════════════════════════
// Scripted guide
// ═══════════════════════════════════════════════════════════════════

/// Records every call and optionally fails at a fixed call index.
struct ScriptedGuide {
    fail_at: Option<usize>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGuide {
    fn new() -> Self {
        Self {
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceGuide for ScriptedGuide {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn price_guide(
        &self,
        _item: &ItemIdentifier,
        guide_type: GuideType,
        condition: Condition,
        currency_code: Option<&str>,
    ) -> Result<PriceGuideData, CoreError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(format!(
                "{}_{}{}",
                guide_type.as_str(),
                condition.as_str(),
                currency_code.map(|c| format!("@{c}")).unwrap_or_default()
            ));
            calls.len() - 1
        };

        if self.fail_at == Some(index) {
            return Err(CoreError::Api("scripted failure".into()));
        }

        let price_detail = vec![
            PriceRecord {
                date_ordered: Some("2024-01-05T00:00:00Z".to_string()),
                unit_price: Some(json!("10")),
                ..PriceRecord::default()
            },
            PriceRecord {
                date_ordered: Some("2024-02-01".to_string()),
                unit_price: Some(json!(30)),
                ..PriceRecord::default()
            },
        ];

        Ok(PriceGuideData {
            avg_price: Some(json!("20.0")),
            qty_avg_price: Some(json!("18.0")),
            price_detail,
            ..PriceGuideData::default()
        })
    }
}

// ═══════════════════════════════════════════════════════════════════
// Collection
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn populates_all_four_result_keys() {
    let guide = ScriptedGuide::new();
    let collector = MultiConditionCollector::new(&guide);
    let item = ItemIdentifier::new("SET", "75257");

    let results = collector.collect(&item, None).await.unwrap();

    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["sold_N", "sold_U", "stock_N", "stock_U"]);
    for result in results.values() {
        assert_eq!(result.average_price, 20.0);
        assert_eq!(result.price_detail.len(), 2);
    }
}

#[tokio::test]
async fn fetches_in_the_fixed_order() {
    let guide = ScriptedGuide::new();
    let collector = MultiConditionCollector::new(&guide);
    let item = ItemIdentifier::new("PART", "3001");

    collector.collect(&item, None).await.unwrap();

    let expected: Vec<String> = GUIDE_PAIRS
        .iter()
        .map(|(g, c)| format!("{}_{}", g.as_str(), c.as_str()))
        .collect();
    assert_eq!(guide.calls(), expected);
}

#[tokio::test]
async fn only_sold_results_carry_monthly_averages() {
    let guide = ScriptedGuide::new();
    let collector = MultiConditionCollector::new(&guide);
    let item = ItemIdentifier::new("SET", "75257");

    let results = collector.collect(&item, None).await.unwrap();

    for key in ["sold_N", "sold_U"] {
        let averages = &results[key].monthly_averages;
        assert_eq!(averages.get("2024-01"), Some(&10.0));
        assert_eq!(averages.get("2024-02"), Some(&30.0));
    }
    for key in ["stock_N", "stock_U"] {
        assert!(results[key].monthly_averages.is_empty());
    }
}

#[tokio::test]
async fn aborts_on_the_first_failure_and_reports_no_partial_result() {
    // Third call (index 2) fails: the two prior successes are discarded.
    let guide = ScriptedGuide::failing_at(2);
    let collector = MultiConditionCollector::new(&guide);
    let item = ItemIdentifier::new("SET", "75257");

    let result = collector.collect(&item, None).await;

    assert!(matches!(result, Err(CoreError::Api(_))));
    assert_eq!(guide.calls().len(), 3, "no call after the failing one");
}

#[tokio::test]
async fn currency_code_is_passed_through_to_every_fetch() {
    let guide = ScriptedGuide::new();
    let collector = MultiConditionCollector::new(&guide);
    let item = ItemIdentifier::new("SET", "75257");

    collector.collect(&item, Some("EUR")).await.unwrap();

    assert!(guide.calls().iter().all(|call| call.ends_with("@EUR")));
}
