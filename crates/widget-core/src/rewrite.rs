//! Structural rewrite rules applied by every back-end.
//!
//! - `visible: false` and constant-false `visibleIf` remove an element.
//! - Sized spacers and container `spacing` fold into sibling margins.
//! - A `scrollView` never becomes a node: its scroll settings move onto the
//!   first `forEach` in its subtree.

use crate::diagnostics::Diagnostics;
use crate::expr::Literal;
use crate::layout::{Direction, Edges, Element, ElementKind, ScrollView};
use crate::property::PropertyValue;

/// Whether an element is removed regardless of runtime data.
pub fn is_statically_hidden(element: &Element, diag: &mut Diagnostics) -> bool {
    if element.common.visible == Some(false) {
        return true;
    }
    match &element.common.visible_if {
        Some(cond) => cond.resolve(diag).constant_truthiness() == Some(false),
        None => false,
    }
}

/// Margins added to an element by spacer folding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Folded {
    pub margin_top: Option<PropertyValue>,
    pub margin_right: Option<PropertyValue>,
    pub margin_bottom: Option<PropertyValue>,
    pub margin_left: Option<PropertyValue>,
}

impl Folded {
    /// Whether nothing was folded.
    pub fn is_empty(&self) -> bool {
        self.margin_top.is_none()
            && self.margin_right.is_none()
            && self.margin_bottom.is_none()
            && self.margin_left.is_none()
    }

    fn add_trailing(&mut self, axis: Direction, size: &PropertyValue) {
        let slot = match axis {
            Direction::Vertical => &mut self.margin_bottom,
            Direction::Horizontal => &mut self.margin_right,
        };
        *slot = Some(add_sizes(slot.as_ref(), size));
    }

    fn add_leading(&mut self, axis: Direction, size: &PropertyValue) {
        let slot = match axis {
            Direction::Vertical => &mut self.margin_top,
            Direction::Horizontal => &mut self.margin_left,
        };
        *slot = Some(add_sizes(slot.as_ref(), size));
    }
}

/// Sum two sizes when both are numbers; otherwise the newer one wins.
fn add_sizes(existing: Option<&PropertyValue>, size: &PropertyValue) -> PropertyValue {
    match (existing.and_then(PropertyValue::as_number), size.as_number()) {
        (Some(a), Some(b)) => PropertyValue::Literal(Literal::Number(a + b)),
        (None, _) if existing.is_none() => size.clone(),
        _ => {
            tracing::debug!("non-numeric spacer size replaces an earlier folded margin");
            size.clone()
        }
    }
}

/// An element kept in a child list, with the margins folded onto it.
#[derive(Debug, Clone)]
pub struct Placed<'a> {
    pub element: &'a Element,
    pub folded: Folded,
}

/// Apply pruning, spacer folding and spacing to a child list.
///
/// `keep` decides visibility. A sized spacer adds its size to the trailing
/// margin of the previous kept sibling; with no previous sibling it adds to
/// the leading margin of the next one. `spacing` behaves like a sized spacer
/// between each pair of kept siblings.
pub fn place_children<'a>(
    children: &'a [Element],
    axis: Direction,
    spacing: Option<&PropertyValue>,
    mut keep: impl FnMut(&'a Element) -> bool,
) -> Vec<Placed<'a>> {
    let mut placed: Vec<Placed<'a>> = Vec::with_capacity(children.len());
    let mut leading: Option<PropertyValue> = None;

    for child in children {
        if !keep(child) {
            continue;
        }
        if let ElementKind::Spacer(spacer) = &child.kind {
            if let Some(size) = &spacer.size {
                match placed.last_mut() {
                    Some(previous) => previous.folded.add_trailing(axis, size),
                    None => leading = Some(add_sizes(leading.as_ref(), size)),
                }
                continue;
            }
        }

        if let (Some(previous), Some(gap)) = (placed.last_mut(), spacing) {
            previous.folded.add_trailing(axis, gap);
        }
        let mut folded = Folded::default();
        if let Some(size) = leading.take() {
            folded.add_leading(axis, &size);
        }
        placed.push(Placed {
            element: child,
            folded,
        });
    }

    placed
}

/// Element margins combined with folded spacer margins.
pub fn effective_margins(element: &Element, folded: &Folded) -> Edges<PropertyValue> {
    let own = element.common.box_model.margin_edges();
    let merge = |own: Option<PropertyValue>, extra: &Option<PropertyValue>| match extra {
        Some(extra) => Some(add_sizes(own.as_ref(), extra)),
        None => own,
    };
    Edges {
        top: merge(own.top, &folded.margin_top),
        right: merge(own.right, &folded.margin_right),
        bottom: merge(own.bottom, &folded.margin_bottom),
        left: merge(own.left, &folded.margin_left),
    }
}

/// Number of items a `forEach` limit allows: NaN and negatives give 0,
/// fractions round down.
pub fn item_limit(limit: f64) -> usize {
    if limit.is_nan() || limit <= 0.0 {
        0
    } else if limit >= usize::MAX as f64 {
        usize::MAX
    } else {
        limit.floor() as usize
    }
}

/// Scroll settings moved from a `scrollView` onto a `forEach`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollSpec {
    pub direction: Direction,
    pub show_indicator: Option<bool>,
    pub width: Option<PropertyValue>,
    pub height: Option<PropertyValue>,
}

/// First `forEach` in document order below `children`.
pub fn find_first_for_each(children: &[Element]) -> Option<&Element> {
    children.iter().find_map(|child| match child.kind {
        ElementKind::ForEach(_) => Some(child),
        _ => find_first_for_each_in(child),
    })
}

fn find_first_for_each_in(element: &Element) -> Option<&Element> {
    element.child_elements().into_iter().find_map(|child| match child.kind {
        ElementKind::ForEach(_) => Some(child),
        _ => find_first_for_each_in(child),
    })
}

/// `forEach` nodes that received scroll settings, matched by identity.
#[derive(Debug, Default)]
pub struct ScrollTargets<'a> {
    targets: Vec<(&'a Element, ScrollSpec)>,
}

impl<'a> ScrollTargets<'a> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the settings of `scroll_view` onto the first `forEach` below it.
    /// Returns whether a target was found.
    pub fn register(&mut self, scroll_element: &'a Element, scroll_view: &'a ScrollView) -> bool {
        let Some(target) = find_first_for_each(&scroll_view.children) else {
            tracing::debug!("scrollView without forEach; emitting children directly");
            return false;
        };
        let box_model = &scroll_element.common.box_model;
        self.targets.push((
            target,
            ScrollSpec {
                direction: scroll_view.direction,
                show_indicator: scroll_view.show_indicator,
                width: box_model.width.clone(),
                height: box_model.height.clone(),
            },
        ));
        true
    }

    /// Take the scroll settings registered for `element`, if any.
    pub fn take(&mut self, element: &Element) -> Option<ScrollSpec> {
        let index = self
            .targets
            .iter()
            .position(|(target, _)| std::ptr::eq(*target, element))?;
        Some(self.targets.remove(index).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element(value: serde_json::Value) -> Element {
        serde_json::from_value(value).unwrap()
    }

    fn children(el: &Element) -> &[Element] {
        match &el.kind {
            ElementKind::Column(c) | ElementKind::Row(c) | ElementKind::Stack(c) => &c.children,
            ElementKind::ScrollView(sv) => &sv.children,
            _ => &[],
        }
    }

    #[test]
    fn test_spacer_folds_into_previous_sibling() {
        let column = element(json!({
            "type": "column",
            "children": [
                {"type": "label", "text": "A"},
                {"type": "spacer", "size": 12},
                {"type": "label", "text": "B"}
            ]
        }));
        let placed = place_children(children(&column), Direction::Vertical, None, |_| true);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].folded.margin_bottom, Some(PropertyValue::from(12.0)));
        assert!(placed[1].folded.is_empty());
    }

    #[test]
    fn test_row_spacer_uses_margin_right() {
        let row = element(json!({
            "type": "row",
            "children": [{"type": "label"}, {"type": "spacer", "size": 4}, {"type": "spacer", "size": 6}, {"type": "label"}]
        }));
        let placed = place_children(children(&row), Direction::Horizontal, None, |_| true);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].folded.margin_right, Some(PropertyValue::from(10.0)));
    }

    #[test]
    fn test_leading_spacer_folds_forward() {
        let column = element(json!({
            "type": "column",
            "children": [{"type": "spacer", "size": 8}, {"type": "label"}]
        }));
        let placed = place_children(children(&column), Direction::Vertical, None, |_| true);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].folded.margin_top, Some(PropertyValue::from(8.0)));
    }

    #[test]
    fn test_flex_spacer_is_kept() {
        let row = element(json!({
            "type": "row",
            "children": [{"type": "label"}, {"type": "spacer", "flex": 1}, {"type": "label"}]
        }));
        let placed = place_children(children(&row), Direction::Horizontal, None, |_| true);
        assert_eq!(placed.len(), 3);
    }

    #[test]
    fn test_spacing_between_kept_children() {
        let column = element(json!({
            "type": "column",
            "children": [{"type": "label"}, {"type": "label", "visible": false}, {"type": "label"}]
        }));
        let gap = PropertyValue::from(6.0);
        let mut diag = Diagnostics::new();
        let placed = place_children(children(&column), Direction::Vertical, Some(&gap), |e| {
            !is_statically_hidden(e, &mut diag)
        });
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].folded.margin_bottom, Some(PropertyValue::from(6.0)));
        assert!(placed[1].folded.is_empty());
    }

    #[test]
    fn test_effective_margins_add_up() {
        let label = element(json!({"type": "label", "marginBottom": 2}));
        let folded = Folded {
            margin_bottom: Some(PropertyValue::from(12.0)),
            ..Folded::default()
        };
        let margins = effective_margins(&label, &folded);
        assert_eq!(margins.bottom, Some(PropertyValue::from(14.0)));
    }

    #[test]
    fn test_item_limit() {
        assert_eq!(item_limit(3.0), 3);
        assert_eq!(item_limit(2.9), 2);
        assert_eq!(item_limit(-1.0), 0);
        assert_eq!(item_limit(f64::NAN), 0);
        assert_eq!(item_limit(f64::INFINITY), usize::MAX);
    }

    #[test]
    fn test_static_visibility() {
        let mut diag = Diagnostics::new();
        assert!(is_statically_hidden(&element(json!({"type": "label", "visible": false})), &mut diag));
        assert!(is_statically_hidden(&element(json!({"type": "label", "visibleIf": false})), &mut diag));
        assert!(!is_statically_hidden(
            &element(json!({"type": "label", "visibleIf": ["has", "iconPath"]})),
            &mut diag
        ));
    }

    #[test]
    fn test_scroll_targets_nested_for_each() {
        let scroll = element(json!({
            "type": "scrollView",
            "direction": "horizontal",
            "height": 80,
            "children": [{"type": "row", "children": [
                {"type": "forEach", "items": "hourlyData", "itemTemplate": {"type": "label"}}
            ]}]
        }));
        let ElementKind::ScrollView(sv) = &scroll.kind else {
            panic!("expected scrollView");
        };
        let mut targets = ScrollTargets::new();
        assert!(targets.register(&scroll, sv));

        let for_each = find_first_for_each(&sv.children).unwrap();
        let spec = targets.take(for_each).unwrap();
        assert_eq!(spec.direction, Direction::Horizontal);
        assert_eq!(spec.height, Some(PropertyValue::from(80.0)));
        assert!(targets.take(for_each).is_none());
    }

    #[test]
    fn test_scroll_view_without_for_each() {
        let scroll = element(json!({"type": "scrollView", "children": [{"type": "label"}]}));
        let ElementKind::ScrollView(sv) = &scroll.kind else {
            panic!("expected scrollView");
        };
        assert!(!ScrollTargets::new().register(&scroll, sv));
    }
}
