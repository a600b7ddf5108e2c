//! Typed boundary for untyped backend payloads.
//!
//! Every external fetch result passes through here before entering the core.
//! A payload that does not match the expected shape becomes a typed empty
//! collection instead of leaking junk into the grid.

use rollout_types::StoreRecord;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize an expected JSON array into `Vec<T>`, degrading to empty on
/// any shape mismatch.
pub fn normalize_vec<T: DeserializeOwned>(value: Value, what: &str) -> Vec<T> {
    if !value.is_array() {
        tracing::warn!(what, "Expected an array payload, using empty");
        return Vec::new();
    }
    match serde_json::from_value(value) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(what, error = %e, "Malformed array payload, using empty");
            Vec::new()
        }
    }
}

/// Store collection response: either a bare record array or split into
/// regular stores and head-office ("matriz") records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoresPayload {
    pub stores: Vec<StoreRecord>,
    pub matrices: Vec<StoreRecord>,
}

impl StoresPayload {
    /// All records, stores first.
    pub fn into_records(self) -> Vec<StoreRecord> {
        let mut records = self.stores;
        records.extend(self.matrices);
        records
    }
}

/// Coerce the `GET /stores` response into a typed payload.
pub fn normalize_stores(value: Value) -> StoresPayload {
    match value {
        Value::Array(_) => StoresPayload {
            stores: normalize_vec(value, "stores"),
            matrices: Vec::new(),
        },
        Value::Object(mut map) => {
            let stores = map
                .remove("stores")
                .map(|v| normalize_vec(v, "stores"))
                .unwrap_or_default();
            let matrices = map
                .remove("matrices")
                .map(|v| normalize_vec(v, "matrices"))
                .unwrap_or_default();
            StoresPayload { stores, matrices }
        }
        _ => {
            tracing::warn!("Unexpected stores payload shape, using empty");
            StoresPayload::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(id: i64) -> Value {
        json!({ "id": id, "name": format!("Loja {id}"), "status": "in_transit" })
    }

    #[test]
    fn bare_array_becomes_stores() {
        let payload = normalize_stores(json!([store(1), store(2)]));
        assert_eq!(payload.stores.len(), 2);
        assert!(payload.matrices.is_empty());
    }

    #[test]
    fn split_object_fills_both_sides() {
        let payload = normalize_stores(json!({
            "stores": [store(1)],
            "matrices": [store(2)],
        }));
        assert_eq!(payload.stores.len(), 1);
        assert_eq!(payload.matrices.len(), 1);
        assert_eq!(payload.into_records().len(), 2);
    }

    #[test]
    fn garbage_payload_degrades_to_empty() {
        assert_eq!(normalize_stores(json!(42)), StoresPayload::default());
        assert_eq!(normalize_stores(Value::Null), StoresPayload::default());

        let items: Vec<StoreRecord> = normalize_vec(json!({"not": "an array"}), "stores");
        assert!(items.is_empty());
    }

    #[test]
    fn malformed_elements_degrade_to_empty() {
        let items: Vec<StoreRecord> = normalize_vec(json!([{"id": "not a number"}]), "stores");
        assert!(items.is_empty());
    }
}
