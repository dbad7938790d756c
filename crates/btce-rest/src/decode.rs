//! Response decoding
//!
//! Most responses map directly onto their structs. Transaction history,
//! trade history and the order list are the exception: their `return`
//! value is an object keyed by decimal order id, e.g.
//!
//! ```json
//! {"success":1,"return":{"123":{"pair":"btc_usd","type":"buy", ...}}}
//! ```
//!
//! [`OrderMap`] turns such an object into an ordered list of
//! [`OrderEntry`] values, generic over the per-order detail type.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

use crate::error::RestResult;

/// Decode a response body
pub fn decode<T: DeserializeOwned>(body: &str) -> RestResult<T> {
    trace!(len = body.len(), "Decoding response body");
    Ok(serde_json::from_str(body)?)
}

/// One entry of an object keyed by order id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderEntry<D> {
    /// Order (or transaction) id taken from the object key
    pub order_id: u64,
    /// Decoded value
    pub details: D,
}

/// Ordered entries of an object keyed by order id
///
/// Entries keep the order in which they appear in the response body; they
/// are not sorted by id. A `return` value that is not an object (missing,
/// `null`, an empty array) decodes to an empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderMap<D>(Vec<OrderEntry<D>>);

impl<D> Default for OrderMap<D> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<D> OrderMap<D> {
    /// Entries in response order
    pub fn entries(&self) -> &[OrderEntry<D>] {
        &self.0
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up an entry by id
    pub fn get(&self, order_id: u64) -> Option<&D> {
        self.0
            .iter()
            .find(|entry| entry.order_id == order_id)
            .map(|entry| &entry.details)
    }

    /// Ids in response order
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().map(|entry| entry.order_id)
    }

    /// Iterate over entries
    pub fn iter(&self) -> std::slice::Iter<'_, OrderEntry<D>> {
        self.0.iter()
    }

    /// Take the entries
    pub fn into_vec(self) -> Vec<OrderEntry<D>> {
        self.0
    }
}

impl<D> From<Vec<OrderEntry<D>>> for OrderMap<D> {
    fn from(entries: Vec<OrderEntry<D>>) -> Self {
        Self(entries)
    }
}

impl<D> IntoIterator for OrderMap<D> {
    type Item = OrderEntry<D>;
    type IntoIter = std::vec::IntoIter<OrderEntry<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, D> IntoIterator for &'a OrderMap<D> {
    type Item = &'a OrderEntry<D>;
    type IntoIter = std::slice::Iter<'a, OrderEntry<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct OrderMapVisitor<D>(PhantomData<D>);

impl<'de, D: Deserialize<'de>> Visitor<'de> for OrderMapVisitor<D> {
    type Value = OrderMap<D>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by numeric order id")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some(key) = map.next_key::<String>()? {
            let order_id = key
                .parse::<u64>()
                .map_err(|_| {
                    <A::Error as de::Error>::custom(format!("invalid order id: {:?}", key))
                })?;
            let details = map.next_value::<D>()?;
            entries.push(OrderEntry { order_id, details });
        }

        Ok(OrderMap(entries))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(OrderMap::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OrderMap::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OrderMap::default())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(OrderMap::default())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(OrderMap::default())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(OrderMap::default())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(OrderMap::default())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(OrderMap::default())
    }
}

impl<'de, D: Deserialize<'de>> Deserialize<'de> for OrderMap<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        deserializer.deserialize_any(OrderMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestError;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Detail {
        pair: String,
        amount: f64,
    }

    #[test]
    fn test_keeps_document_order() {
        let map: OrderMap<Detail> = decode(
            r#"{"900":{"pair":"btc_usd","amount":1.0},
                "12":{"pair":"ltc_btc","amount":2.0},
                "450":{"pair":"btc_eur","amount":3.0}}"#,
        )
        .unwrap();

        assert_eq!(map.ids().collect::<Vec<_>>(), vec![900, 12, 450]);
        assert_eq!(map.get(12).unwrap().pair, "ltc_btc");
        assert!(map.get(1).is_none());
    }

    #[test]
    fn test_non_object_is_empty() {
        for body in ["[]", "null", "[1,2]", "0", "\"\"", "true"] {
            let map: OrderMap<Detail> = decode(body).unwrap();
            assert!(map.is_empty(), "{} should decode to an empty map", body);
        }
    }

    #[test]
    fn test_non_numeric_key_fails() {
        let result: RestResult<OrderMap<Detail>> =
            decode(r#"{"abc":{"pair":"btc_usd","amount":1.0}}"#);
        assert!(matches!(result, Err(RestError::Decode(msg)) if msg.contains("abc")));
    }

    #[test]
    fn test_detail_mismatch_fails() {
        let result: RestResult<OrderMap<Detail>> = decode(r#"{"1":{"pair":"btc_usd"}}"#);
        assert!(matches!(result, Err(RestError::Decode(_))));
    }

    #[test]
    fn test_malformed_json_fails() {
        let result: RestResult<OrderMap<Detail>> = decode(r#"{"1":"#);
        assert!(matches!(result, Err(RestError::Decode(_))));
    }

    #[test]
    fn test_serializes_as_list() {
        let map = OrderMap::from(vec![OrderEntry {
            order_id: 7,
            details: "x".to_string(),
        }]);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"[{"order_id":7,"details":"x"}]"#
        );
    }
}
