// ═══════════════════════════════════════════════════════════════════
// Model Tests — ItemIdentifier, GuideType/Condition, PriceRecord,
// result keys
// ═══════════════════════════════════════════════════════════════════

use bricklink_price_core::models::document::result_key;
use bricklink_price_core::models::item::{Condition, GuideType, ItemIdentifier};
use bricklink_price_core::models::price::PriceRecord;
use serde_json::json;

// ═══════════════════════════════════════════════════════════════════
// ItemIdentifier normalization
// ═══════════════════════════════════════════════════════════════════

mod item_identifier {
    use super::*;

    #[test]
    fn set_number_without_suffix_gets_dash_one() {
        let item = ItemIdentifier::new("SET", "75257");
        assert_eq!(item.item_type(), "SET");
        assert_eq!(item.item_no(), "75257-1");
    }

    #[test]
    fn set_number_with_suffix_is_unchanged() {
        let item = ItemIdentifier::new("SET", "75257-1");
        assert_eq!(item.item_no(), "75257-1");
    }

    #[test]
    fn non_set_types_get_no_suffix() {
        let item = ItemIdentifier::new("PART", "3001");
        assert_eq!(item.item_no(), "3001");
    }

    #[test]
    fn item_type_is_uppercased() {
        let item = ItemIdentifier::new("set", "75257");
        assert_eq!(item.item_type(), "SET");
        // The suffix rule applies after uppercasing.
        assert_eq!(item.item_no(), "75257-1");
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = ItemIdentifier::new("SET", "75257");
        let second = ItemIdentifier::new(first.item_type(), first.item_no());
        assert_eq!(first, second);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let item = ItemIdentifier::new(" part ", " 3001 ");
        assert_eq!(item.item_type(), "PART");
        assert_eq!(item.item_no(), "3001");
    }

    #[test]
    fn displays_as_type_and_number() {
        let item = ItemIdentifier::new("SET", "75257");
        assert_eq!(item.to_string(), "SET 75257-1");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Document ids
// ═══════════════════════════════════════════════════════════════════

mod document_id {
    use super::*;

    #[test]
    fn joins_type_and_number_with_underscore() {
        let item = ItemIdentifier::new("SET", "75257");
        assert_eq!(item.document_id(), "SET_75257-1");
    }

    #[test]
    fn replaces_path_separators() {
        let item = ItemIdentifier::new("UNSORTED_LOT", "12/34");
        assert_eq!(item.document_id(), "UNSORTED_LOT_12-34");
    }

    #[test]
    fn is_deterministic() {
        let a = ItemIdentifier::new("PART", "3001").document_id();
        let b = ItemIdentifier::new("part", "3001").document_id();
        assert_eq!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════
// GuideType / Condition / result keys
// ═══════════════════════════════════════════════════════════════════

mod enums {
    use super::*;

    #[test]
    fn guide_type_wire_values() {
        assert_eq!(GuideType::Stock.as_str(), "stock");
        assert_eq!(GuideType::Sold.as_str(), "sold");
        assert_eq!(serde_json::to_string(&GuideType::Sold).unwrap(), "\"sold\"");
    }

    #[test]
    fn condition_wire_values() {
        assert_eq!(Condition::New.as_str(), "N");
        assert_eq!(Condition::Used.as_str(), "U");
        assert_eq!(serde_json::to_string(&Condition::Used).unwrap(), "\"U\"");
    }

    #[test]
    fn result_keys_cover_the_grid() {
        assert_eq!(result_key(GuideType::Stock, Condition::New), "stock_N");
        assert_eq!(result_key(GuideType::Stock, Condition::Used), "stock_U");
        assert_eq!(result_key(GuideType::Sold, Condition::New), "sold_N");
        assert_eq!(result_key(GuideType::Sold, Condition::Used), "sold_U");
    }
}

// ═══════════════════════════════════════════════════════════════════
// PriceRecord passthrough
// ═══════════════════════════════════════════════════════════════════

mod price_record {
    use super::*;

    #[test]
    fn unknown_upstream_fields_round_trip() {
        let raw = json!({
            "date_ordered": "2024-01-05T00:00:00Z",
            "unit_price": "10.5000",
            "quantity": 3,
            "seller_country_code": "DE"
        });

        let record: PriceRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.date_ordered.as_deref(), Some("2024-01-05T00:00:00Z"));
        assert_eq!(record.extra.get("quantity"), Some(&json!(3)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let record: PriceRecord = serde_json::from_value(json!({"quantity": 1})).unwrap();
        assert!(record.date.is_none());
        assert!(record.date_ordered.is_none());
        assert!(record.unit_price.is_none());
    }
}
