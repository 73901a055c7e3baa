//! Property helpers used by the editor bindings
//!
//! Reads are strict and writes are not: [`get_property`] treats an absent key
//! as a document/schema mismatch and reports it, while [`set_property`]
//! inserts or overwrites without checking.

use crate::error::{Result, SceneError};
use crate::value::{PropertyMap, Value};

/// Get the value stored under `key`
pub fn get_property<'a>(container: &'a PropertyMap, key: &str) -> Result<&'a Value> {
    container
        .get(key)
        .ok_or_else(|| SceneError::MissingProperty(key.to_string()))
}

/// Get the value stored under `key` in a nested object value
pub fn get_nested_property(container: &Value, key: &str) -> Result<Value> {
    container
        .get(key)
        .ok_or_else(|| SceneError::MissingProperty(key.to_string()))
}

/// Insert or overwrite `key`
pub fn set_property(container: &mut PropertyMap, key: impl Into<String>, value: impl Into<Value>) {
    container.insert(key.into(), value.into());
}

/// Copy the top level of a container.
///
/// Nested objects stay shared with the original.
pub fn shallow_copy(container: &PropertyMap) -> PropertyMap {
    container.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// Fold a sequence of containers into one; later entries win on collision
pub fn merge_data_list<'a, I>(list: I) -> PropertyMap
where
    I: IntoIterator<Item = &'a PropertyMap>,
{
    let mut merged = PropertyMap::new();
    for data in list {
        for (key, value) in data {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// `lower <= x < upper`
pub fn is_in_bounds<T: PartialOrd>(x: T, lower: T, upper: T) -> bool {
    lower <= x && x < upper
}

/// RGBA color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the color components, keeping alpha.
    ///
    /// Used with the darker/lighter factors for pressed and hovered widgets.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |c: f64| (c / factor).clamp(0.0, 1.0);
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

/// Produce an independent copy of a color
pub fn copy_color(color: &Rgba) -> Rgba {
    Rgba::new(color.r, color.g, color.b, color.a)
}
