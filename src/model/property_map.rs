//! PropertyMap: the key-value store on nodes, relationships and maps.

use std::collections::BTreeMap;
use super::Value;

/// A map of property names to values.
///
/// Ordered by key so encoded output is stable.
pub type PropertyMap = BTreeMap<String, Value>;

/// Collect `(key, value)` pairs into a PropertyMap.
pub fn property_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PropertyMap
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
