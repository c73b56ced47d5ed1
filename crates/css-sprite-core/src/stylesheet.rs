//! CSS generation from a computed layout.
//!
//! Every group yields one shared rule, `.sprite-<group>`, carrying the
//! background image, followed by one rule per tile in tile order:
//!
//! ```text
//! .sprite-ui{background-image:url('sprite-ui.png')}
//! .sprite-ui-home{background-repeat:no-repeat;background-position:0px 0px;width:16px;height:16px;background-image:url('sprite-ui.png')}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Layout, Tile};

/// A single CSS rule with declarations kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    pub fn declare(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push((property.into(), value.into()));
        self
    }

    /// Value of the first declaration of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.selector)?;
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{property}:{value}")?;
        }
        f.write_str("}")
    }
}

/// Optional output styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOptions {
    /// Append `!important` to size, position and image declarations, and pin
    /// `display:block` and a transparent background color on icon rules.
    #[serde(default)]
    pub important: bool,
    /// Also emit a `.--sprite-<group>-<icon>:hover` rule per tile.
    #[serde(default)]
    pub hover: bool,
}

/// Class name of the shared rule for `group`.
pub fn group_class(group: &str) -> String {
    format!("sprite-{group}")
}

/// Class name of the rule for one icon of `group`.
pub fn icon_class(group: &str, icon: &str) -> String {
    format!("sprite-{group}-{}", escape_ident(icon))
}

/// Builds the shared rule plus one rule (two with `hover`) per tile.
pub fn group_rules(
    group: &str,
    image_url: &str,
    layout: &Layout<'_>,
    options: StyleOptions,
) -> Vec<CssRule> {
    let background = important(format!("url('{image_url}')"), options.important);
    let mut rules = Vec::with_capacity(1 + layout.tiles.len() * (1 + options.hover as usize));
    rules.push(
        CssRule::new(format!(".{}", group_class(group)))
            .declare("background-image", background.clone()),
    );
    for tile in &layout.tiles {
        rules.push(tile_rule(group, tile, &background, options));
        if options.hover {
            rules.push(hover_rule(group, tile, &background, options));
        }
    }
    rules
}

fn tile_rule(group: &str, tile: &Tile<'_>, background: &str, options: StyleOptions) -> CssRule {
    let (width, height) = size_values(tile, options);
    let mut rule = CssRule::new(format!(".{}", icon_class(group, tile.image.name())));
    if options.important {
        rule = rule.declare("display", "block");
    }
    rule = rule.declare("background-repeat", "no-repeat");
    if options.important {
        rule = rule.declare("background-color", "transparent");
    }
    rule.declare("background-position", position_value(tile, options))
        .declare("width", width)
        .declare("height", height)
        .declare("background-image", background)
}

fn hover_rule(group: &str, tile: &Tile<'_>, background: &str, options: StyleOptions) -> CssRule {
    let (width, height) = size_values(tile, options);
    CssRule::new(format!(".--{}:hover", icon_class(group, tile.image.name())))
        .declare("width", width)
        .declare("height", height)
        .declare("background-position", position_value(tile, options))
        .declare("background-image", background)
}

fn size_values(tile: &Tile<'_>, options: StyleOptions) -> (String, String) {
    (
        important(format!("{}px", tile.width()), options.important),
        important(format!("{}px", tile.height()), options.important),
    )
}

fn position_value(tile: &Tile<'_>, options: StyleOptions) -> String {
    important(
        format!("{} {}", negated_px(tile.x), negated_px(tile.y)),
        options.important,
    )
}

/// `-<v>px`, or `0px` for a zero offset.
fn negated_px(v: u32) -> String {
    if v == 0 {
        "0px".to_string()
    } else {
        format!("-{v}px")
    }
}

fn important(value: String, on: bool) -> String {
    if on { value + " !important" } else { value }
}

/// Backslash-escapes ASCII characters that are not valid inside a CSS identifier.
fn escape_ident(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii() && !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Renders rules one per line.
pub fn render(rules: &[CssRule]) -> String {
    let mut out = String::new();
    for rule in rules {
        out.push_str(&rule.to_string());
        out.push('\n');
    }
    out
}
