use serde_json::{Value, json};

use crate::model::Layout;
use crate::stylesheet::group_class;

/// Serialize one group's layout as a JSON manifest.
/// Shape: `{ group, image, width, height, tiles: [{ name, class, x, y, w, h }], meta }`.
/// Lets scripts look up icon offsets without parsing the stylesheet; `class`
/// is the plain class name as used in markup, not a CSS-escaped selector.
pub fn to_json(group: &str, image: &str, layout: &Layout<'_>) -> Value {
    let tiles: Vec<Value> = layout
        .tiles
        .iter()
        .map(|t| {
            json!({
                "name": t.image.name(),
                "class": format!("{}-{}", group_class(group), t.image.name()),
                "x": t.x,
                "y": t.y,
                "w": t.width(),
                "h": t.height(),
            })
        })
        .collect();
    json!({
        "group": group,
        "image": image,
        "width": layout.width,
        "height": layout.height,
        "tiles": tiles,
        "meta": {
            "app": "css-sprite",
            "version": env!("CARGO_PKG_VERSION"),
            "stats": layout.stats(),
        },
    })
}
