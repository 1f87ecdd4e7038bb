//! Shared lowering of layout trees for the code generators.
//!
//! [`lower_widget`] walks a layout depth-first, left to right, and applies
//! the rewrite rules every back-end agrees on: static pruning, `visibleIf`
//! guards, spacer folding, scroll merging, `forEach` limits and variant
//! selection. What each element turns into is decided by an [`Emitter`].

use std::collections::BTreeSet;

use widget_core::rewrite::{is_statically_hidden, place_children};
use widget_core::theme::is_color_token;
use widget_core::{
    item_limit, Condition, Diagnostics, Direction, Element, ElementKind, Folded, ForEach, Literal,
    Placed, PropertyValue, Scope, ScrollSpec, ScrollTargets, Value, Warning, WidgetLayout,
};
use widget_expr::compile::wrap;
use widget_expr::{Compiler, Target};

/// Token every divider without an explicit color uses.
pub const DIVIDER_DEFAULT_COLOR: &str = "onSurfaceVariant";

/// How many items a list shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Limit {
    /// Known when generating.
    Fixed(usize),
    /// Compiled numeric expression; the emitter floors and clamps it.
    Dynamic(String),
}

/// Everything an emitter needs to produce a list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPlan {
    /// Compiled access of the items list.
    pub source: String,
    pub limit: Option<Limit>,
    pub direction: Direction,
    /// Settings merged from an enclosing `scrollView`.
    pub scroll: Option<ScrollSpec>,
}

/// State threaded through the lowering of one widget.
pub struct LowerContext<'a> {
    target: Target,
    scope: Scope,
    diag: Diagnostics,
    scroll: ScrollTargets<'a>,
    colors: BTreeSet<String>,
}

impl<'a> LowerContext<'a> {
    /// Create a context for `layout`, running the color-token pre-pass.
    pub fn new(target: Target, layout: &WidgetLayout) -> Self {
        Self {
            target,
            scope: Scope::Data,
            diag: Diagnostics::new(),
            scroll: ScrollTargets::new(),
            colors: collect_color_tokens(layout),
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Color tokens referenced anywhere in the widget, sorted.
    pub fn colors(&self) -> &BTreeSet<String> {
        &self.colors
    }

    /// A compiler for the current target and scope.
    pub fn compiler(&mut self) -> Compiler<'_> {
        Compiler::new(self.target, self.scope, &mut self.diag)
    }

    pub fn warn(&mut self, warning: Warning) {
        self.diag.warn(warning);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diag
    }

    fn with_scope<R>(&mut self, scope: Scope, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.scope, scope);
        let result = f(self);
        self.scope = saved;
        result
    }

    /// Truthiness of a condition known without data, if any.
    pub fn static_truth(&mut self, condition: &Condition) -> Option<bool> {
        condition.resolve(&mut self.diag).constant_truthiness()
    }

    fn limit(&mut self, value: &PropertyValue) -> Limit {
        match value {
            PropertyValue::Literal(lit) => Limit::Fixed(item_limit(Value::from(lit).to_number())),
            other => Limit::Dynamic(self.compiler().compile_number(other)),
        }
    }
}

/// Target-specific node construction.
pub trait Emitter {
    type Node;

    /// A `column`, `row` or `stack` around its lowered children.
    fn container(
        &mut self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        children: Vec<Self::Node>,
    ) -> Self::Node;

    /// An element without lowered children: label (with its spans), image,
    /// spacer, divider, clock, date or span.
    fn leaf(&mut self, cx: &mut LowerContext<'_>, placed: &Placed<'_>) -> Self::Node;

    /// A `forEach` around its lowered item template.
    fn list(
        &mut self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        plan: ListPlan,
        body: Vec<Self::Node>,
    ) -> Self::Node;

    /// A runtime choice: the first branch whose condition holds, else
    /// `otherwise`.
    fn guard(&mut self, branches: Vec<(String, Vec<Self::Node>)>, otherwise: Vec<Self::Node>)
        -> Self::Node;

    /// An inert node standing in for an element that produces no output.
    fn placeholder(&mut self, note: &str) -> Self::Node;
}

/// A compiled condition without one redundant outer group: `(a < b)`
/// becomes `a < b`.
pub fn bare_condition(code: &str) -> &str {
    if code.starts_with('(') && code.ends_with(')') && wrap(code) == code {
        &code[1..code.len() - 1]
    } else {
        code
    }
}

/// Lower the default layout and its variants.
///
/// Variants become an if / else-if chain in declaration order with the
/// default layout as the final branch.
pub fn lower_widget<'a, E: Emitter>(
    emitter: &mut E,
    cx: &mut LowerContext<'a>,
    layout: &'a WidgetLayout,
) -> Vec<E::Node> {
    let mut branches = Vec::new();
    for variant in &layout.variants {
        match cx.static_truth(&variant.condition) {
            Some(false) => {}
            Some(true) => {
                let nodes = lower_root(emitter, cx, &variant.layout);
                return close_chain(emitter, branches, nodes);
            }
            None => {
                let condition = cx.compiler().compile_condition(&variant.condition);
                branches.push((condition, lower_root(emitter, cx, &variant.layout)));
            }
        }
    }
    let default = lower_root(emitter, cx, &layout.layout);
    close_chain(emitter, branches, default)
}

fn close_chain<E: Emitter>(
    emitter: &mut E,
    branches: Vec<(String, Vec<E::Node>)>,
    otherwise: Vec<E::Node>,
) -> Vec<E::Node> {
    if branches.is_empty() {
        otherwise
    } else {
        vec![emitter.guard(branches, otherwise)]
    }
}

/// Lower an element that is not part of a child list.
pub fn lower_root<'a, E: Emitter>(
    emitter: &mut E,
    cx: &mut LowerContext<'a>,
    element: &'a Element,
) -> Vec<E::Node> {
    lower(
        emitter,
        cx,
        Placed {
            element,
            folded: Folded::default(),
        },
    )
}

/// Lower one placed element. Returns several nodes when a `scrollView`
/// splices its children into the parent, none when pruned.
pub fn lower<'a, E: Emitter>(
    emitter: &mut E,
    cx: &mut LowerContext<'a>,
    placed: Placed<'a>,
) -> Vec<E::Node> {
    let element = placed.element;
    if element.common.visible == Some(false) {
        return Vec::new();
    }
    if let Some(condition) = &element.common.visible_if {
        match cx.static_truth(condition) {
            Some(false) => return Vec::new(),
            Some(true) => {}
            None => {
                let code = cx.compiler().compile_condition(condition);
                let nodes = lower_kind(emitter, cx, placed);
                return vec![emitter.guard(vec![(code, nodes)], Vec::new())];
            }
        }
    }
    lower_kind(emitter, cx, placed)
}

fn lower_kind<'a, E: Emitter>(
    emitter: &mut E,
    cx: &mut LowerContext<'a>,
    placed: Placed<'a>,
) -> Vec<E::Node> {
    let element = placed.element;
    match &element.kind {
        ElementKind::Column(c) | ElementKind::Row(c) | ElementKind::Stack(c) => {
            let (axis, spacing) = match element.kind {
                ElementKind::Column(_) => (Direction::Vertical, c.spacing.as_ref()),
                ElementKind::Row(_) => (Direction::Horizontal, c.spacing.as_ref()),
                _ => (Direction::Vertical, None),
            };
            let children = lower_children(emitter, cx, &c.children, axis, spacing);
            vec![emitter.container(cx, &placed, children)]
        }
        ElementKind::ScrollView(sv) => {
            cx.scroll.register(element, sv);
            lower_children(emitter, cx, &sv.children, sv.direction, None)
        }
        ElementKind::ForEach(fe) => lower_for_each(emitter, cx, placed, fe),
        ElementKind::Conditional(cond) => {
            let Some(condition) = &cond.condition else {
                cx.warn(Warning::MissingField {
                    element: "conditional",
                    field: "condition",
                });
                return vec![emitter.placeholder("conditional requires condition")];
            };
            match cx.static_truth(condition) {
                Some(true) => lower_branch(emitter, cx, cond.then.as_deref()),
                Some(false) => lower_branch(emitter, cx, cond.otherwise.as_deref()),
                None => {
                    let code = cx.compiler().compile_condition(condition);
                    let then = lower_branch(emitter, cx, cond.then.as_deref());
                    let otherwise = lower_branch(emitter, cx, cond.otherwise.as_deref());
                    vec![emitter.guard(vec![(code, then)], otherwise)]
                }
            }
        }
        ElementKind::Unsupported(name) => {
            cx.warn(Warning::UnsupportedElement {
                type_name: name.clone(),
            });
            vec![emitter.placeholder(&format!("Unknown element type: {name}"))]
        }
        ElementKind::Label(_)
        | ElementKind::Image(_)
        | ElementKind::Spacer(_)
        | ElementKind::Divider(_)
        | ElementKind::Clock(_)
        | ElementKind::Date(_)
        | ElementKind::Span(_) => vec![emitter.leaf(cx, &placed)],
    }
}

fn lower_branch<'a, E: Emitter>(
    emitter: &mut E,
    cx: &mut LowerContext<'a>,
    branch: Option<&'a Element>,
) -> Vec<E::Node> {
    match branch {
        Some(element) => lower_root(emitter, cx, element),
        None => Vec::new(),
    }
}

fn lower_children<'a, E: Emitter>(
    emitter: &mut E,
    cx: &mut LowerContext<'a>,
    children: &'a [Element],
    axis: Direction,
    spacing: Option<&PropertyValue>,
) -> Vec<E::Node> {
    // An invalid condition always prunes its element, so every warning
    // recorded here belongs to a child that is never lowered.
    let mut pruning = Diagnostics::new();
    let placed = place_children(children, axis, spacing, |child| {
        !is_statically_hidden(child, &mut pruning)
    });
    cx.diag.absorb(pruning);
    placed
        .into_iter()
        .flat_map(|child| lower(emitter, cx, child))
        .collect()
}

fn lower_for_each<'a, E: Emitter>(
    emitter: &mut E,
    cx: &mut LowerContext<'a>,
    placed: Placed<'a>,
    fe: &'a ForEach,
) -> Vec<E::Node> {
    let (Some(items), Some(template)) = (&fe.items, &fe.item_template) else {
        let field = if fe.items.is_none() { "items" } else { "itemTemplate" };
        cx.warn(Warning::MissingField {
            element: "forEach",
            field,
        });
        return vec![emitter.placeholder("forEach requires items and itemTemplate")];
    };

    let scroll = cx.scroll.take(placed.element);
    let plan = ListPlan {
        source: cx.compiler().compile_path(items),
        limit: fe.limit.as_ref().map(|limit| cx.limit(limit)),
        direction: scroll.as_ref().map_or(fe.direction, |s| s.direction),
        scroll,
    };
    let body = cx.with_scope(Scope::Item, |cx| lower_root(emitter, cx, template));
    vec![emitter.list(cx, &placed, plan, body)]
}

/// Every theme-color token the widget references: element colors, value
/// leaves of color expressions, the background, variants and the divider
/// default.
pub fn collect_color_tokens(layout: &WidgetLayout) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    if let Some(color) = layout.background.as_ref().and_then(|bg| bg.color.as_ref()) {
        add_color(color, &mut tokens);
    }
    for tree in layout.trees() {
        tree.walk(&mut |element| element_colors(element, &mut tokens));
    }
    tokens
}

fn element_colors(element: &Element, tokens: &mut BTreeSet<String>) {
    if let Some(color) = &element.common.box_model.background_color {
        add_color(color, tokens);
    }
    let style = match &element.kind {
        ElementKind::Label(label) => Some(&label.style),
        ElementKind::Span(span) => Some(&span.style),
        ElementKind::Clock(clock) => Some(&clock.style),
        ElementKind::Date(date) => Some(&date.style),
        ElementKind::Divider(divider) => {
            match &divider.color {
                Some(color) => add_color(color, tokens),
                None => {
                    tokens.insert(DIVIDER_DEFAULT_COLOR.to_string());
                }
            }
            None
        }
        _ => None,
    };
    if let Some(color) = style.and_then(|s| s.color.as_ref()) {
        add_color(color, tokens);
    }
}

fn add_color(value: &PropertyValue, tokens: &mut BTreeSet<String>) {
    match value {
        PropertyValue::Literal(Literal::String(s)) if is_color_token(s) => {
            tokens.insert(s.trim().to_string());
        }
        PropertyValue::Expression(expr) => {
            for leaf in expr.value_leaves() {
                if let Some(s) = leaf.as_literal().and_then(Literal::as_str) {
                    if is_color_token(s) {
                        tokens.insert(s.trim().to_string());
                    }
                }
            }
        }
        _ => {}
    }
}
