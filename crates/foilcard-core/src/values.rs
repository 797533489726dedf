//! Ordered effect/parameter value maps.
//!
//! [`EffectValues`] maps effect id → [`ParamMap`], and [`ParamMap`] maps
//! parameter id → [`ParamValue`]. Both preserve insertion order. A store built
//! from the registry therefore iterates effects in registry declaration order,
//! which is the order the dominant-effect tie-break relies on.
//!
//! The same types describe partial preset overrides, where only a handful of
//! effects and parameters are present.
//!
//! ```rust
//! use foilcard_core::{EffectValues, ParamValue};
//!
//! let preset = EffectValues::new()
//!     .with_param("gold", "intensity", 80.0)
//!     .with_param("gold", "goldTone", "rich");
//!
//! assert_eq!(preset.numeric("gold", "intensity"), Some(80.0));
//! assert_eq!(preset.get("gold", "goldTone"), Some(&ParamValue::from("rich")));
//! assert!(preset.effect("holographic").is_none());
//! ```
//!
//! Lookups are linear scans. Effect and parameter counts are in the tens, and
//! a `Vec` keeps iteration order explicit without another dependency.

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::param::ParamValue;

/// Parameter id → value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, ParamValue)>,
}

impl ParamMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with room for `capacity` parameters.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Value of a parameter.
    pub fn get(&self, param_id: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(id, _)| id == param_id)
            .map(|(_, v)| v)
    }

    /// Mutable value of a parameter.
    pub fn get_mut(&mut self, param_id: &str) -> Option<&mut ParamValue> {
        self.entries
            .iter_mut()
            .find(|(id, _)| id == param_id)
            .map(|(_, v)| v)
    }

    /// Inserts or replaces a value, returning the previous one.
    ///
    /// A replaced parameter keeps its original position.
    pub fn insert(&mut self, param_id: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        let param_id = param_id.into();
        if let Some(slot) = self.get_mut(&param_id) {
            return Some(core::mem::replace(slot, value));
        }
        self.entries.push((param_id, value));
        None
    }

    /// True if the parameter is present.
    pub fn contains(&self, param_id: &str) -> bool {
        self.get(param_id).is_some()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(param_id, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(id, v)| (id.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, ParamValue)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, ParamValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Effect id → [`ParamMap`], in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectValues {
    effects: Vec<(String, ParamMap)>,
}

impl EffectValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: sets one parameter, creating the effect entry if needed.
    pub fn with_param(
        mut self,
        effect_id: &str,
        param_id: &str,
        value: impl Into<ParamValue>,
    ) -> Self {
        self.set(effect_id, param_id, value.into());
        self
    }

    /// Parameters of one effect.
    pub fn effect(&self, effect_id: &str) -> Option<&ParamMap> {
        self.effects
            .iter()
            .find(|(id, _)| id == effect_id)
            .map(|(_, p)| p)
    }

    /// Mutable parameters of one effect.
    pub fn effect_mut(&mut self, effect_id: &str) -> Option<&mut ParamMap> {
        self.effects
            .iter_mut()
            .find(|(id, _)| id == effect_id)
            .map(|(_, p)| p)
    }

    /// Inserts or replaces a whole effect entry, returning the previous one.
    pub fn insert_effect(
        &mut self,
        effect_id: impl Into<String>,
        params: ParamMap,
    ) -> Option<ParamMap> {
        let effect_id = effect_id.into();
        if let Some(slot) = self.effect_mut(&effect_id) {
            return Some(core::mem::replace(slot, params));
        }
        self.effects.push((effect_id, params));
        None
    }

    /// Value of one parameter.
    pub fn get(&self, effect_id: &str, param_id: &str) -> Option<&ParamValue> {
        self.effect(effect_id)?.get(param_id)
    }

    /// Numeric value of one parameter.
    pub fn numeric(&self, effect_id: &str, param_id: &str) -> Option<f64> {
        self.get(effect_id, param_id)?.as_f64()
    }

    /// Sets one parameter, creating the effect entry if needed.
    pub fn set(&mut self, effect_id: &str, param_id: &str, value: ParamValue) -> Option<ParamValue> {
        match self.effect_mut(effect_id) {
            Some(params) => params.insert(param_id, value),
            None => {
                let mut params = ParamMap::new();
                params.insert(param_id, value);
                self.effects.push((effect_id.to_string(), params));
                None
            }
        }
    }

    /// True if the effect has an entry.
    pub fn contains_effect(&self, effect_id: &str) -> bool {
        self.effect(effect_id).is_some()
    }

    /// Number of effect entries.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// True if there are no effect entries.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Total number of `(effect, parameter)` values.
    pub fn param_count(&self) -> usize {
        self.effects.iter().map(|(_, p)| p.len()).sum()
    }

    /// Iterates `(effect_id, params)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamMap)> {
        self.effects.iter().map(|(id, p)| (id.as_str(), p))
    }

    /// Iterates every `(effect_id, param_id, value)` triple.
    pub fn triples(&self) -> impl Iterator<Item = (&str, &str, &ParamValue)> {
        self.iter()
            .flat_map(|(effect, params)| params.iter().map(move |(param, v)| (effect, param, v)))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    //! Map-shaped (de)serialization that keeps insertion order.

    #[cfg(not(feature = "std"))]
    use alloc::string::String;

    use super::{EffectValues, ParamMap};
    use crate::param::ParamValue;
    use core::fmt;
    use core::marker::PhantomData;
    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use serde::ser::{Serialize, SerializeMap, Serializer};

    impl Serialize for ParamMap {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self.iter() {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    impl Serialize for EffectValues {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self.iter() {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    struct OrderedVisitor<T>(PhantomData<T>);

    impl<'de> Visitor<'de> for OrderedVisitor<ParamMap> {
        type Value = ParamMap;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of parameter id to value")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = ParamMap::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((k, v)) = access.next_entry::<String, ParamValue>()? {
                map.insert(k, v);
            }
            Ok(map)
        }
    }

    impl<'de> Visitor<'de> for OrderedVisitor<EffectValues> {
        type Value = EffectValues;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of effect id to parameter map")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut values = EffectValues::new();
            while let Some((k, v)) = access.next_entry::<String, ParamMap>()? {
                values.insert_effect(k, v);
            }
            Ok(values)
        }
    }

    impl<'de> Deserialize<'de> for ParamMap {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(OrderedVisitor::<ParamMap>(PhantomData))
        }
    }

    impl<'de> Deserialize<'de> for EffectValues {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(OrderedVisitor::<EffectValues>(PhantomData))
        }
    }
}
