/// UI authoring hints attached to uniform declarations
///
/// A UI spec is written as an object literal in the comment that trails a
/// declaration:
///
/// ```glsl
/// uniform float uAlpha; // {ui: "slider", min: 0, max: 1}
/// ```
///
/// Values are plain JSON values, so hosts can hand them to any serde-based
/// UI layer unchanged.

use serde_json::{Map, Value};

/// A UI spec mapping (always an object, never a scalar)
pub type UiSpec = Map<String, Value>;

/// Merge `overlay` into `base`
///
/// Keys present only in `overlay` are added. When both sides hold an
/// object under the same key the objects are merged recursively, any other
/// collision is won by `overlay`.
pub fn merge_ui_specs(base: &mut UiSpec, overlay: &UiSpec) {
    for (key, value) in overlay {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) =
            (base.get_mut(key), value)
        {
            merge_ui_specs(existing, incoming);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}
