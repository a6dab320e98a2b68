//! Classification of tagged dialog nodes.
//!
//! Every composite node of a dialog document carries a discriminator field
//! (`$kind`, or the legacy `$type`). [`DialogNode`] is the closed set of
//! shapes the layout pipeline distinguishes; anything it does not recognize
//! becomes [`DialogNode::Leaf`] with its discriminator preserved, so
//! documents that use schema extensions still render.
//!
//! Classification borrows from the document and never fails. Missing or
//! mistyped child arrays are read as empty step lists, since documents are
//! routinely in a half-edited state.

use std::borrow::Cow;

use serde_json::{Value, json};

/// Field holding the discriminator.
pub const KIND_FIELD: &str = "$kind";

/// Discriminator field used by older documents.
pub const LEGACY_KIND_FIELD: &str = "$type";

/// Discriminator values with a dedicated shape.
pub mod kinds {
    pub const ADAPTIVE_DIALOG: &str = "Microsoft.AdaptiveDialog";
    /// Prefix shared by every trigger kind (`Microsoft.OnIntent`, ...).
    pub const TRIGGER_PREFIX: &str = "Microsoft.On";
    pub const IF_CONDITION: &str = "Microsoft.IfCondition";
    pub const SWITCH_CONDITION: &str = "Microsoft.SwitchCondition";
    pub const FOREACH: &str = "Microsoft.Foreach";
    pub const FOREACH_PAGE: &str = "Microsoft.ForeachPage";
    /// Kind that bare-string steps expand to.
    pub const BEGIN_DIALOG: &str = "Microsoft.BeginDialog";
}

/// Field names read by the classifier.
pub mod fields {
    pub const TRIGGERS: &str = "triggers";
    pub const ACTIONS: &str = "actions";
    pub const ELSE_ACTIONS: &str = "elseActions";
    pub const CONDITION: &str = "condition";
    pub const CASES: &str = "cases";
    pub const VALUE: &str = "value";
    pub const DEFAULT: &str = "default";
    pub const ITEMS_PROPERTY: &str = "itemsProperty";
    pub const DIALOG: &str = "dialog";
}

/// Returns the discriminator of a node, if it has one.
pub fn discriminator(value: &Value) -> Option<&str> {
    value
        .get(KIND_FIELD)
        .or_else(|| value.get(LEGACY_KIND_FIELD))
        .and_then(Value::as_str)
}

/// One element of a step array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<'a> {
    /// A regular node.
    Node(&'a Value),
    /// Bare-string shorthand for invoking a dialog by name.
    DialogRef(&'a str),
}

impl<'a> Step<'a> {
    fn from_value(value: &'a Value) -> Self {
        match value {
            Value::String(name) => Self::DialogRef(name),
            other => Self::Node(other),
        }
    }

    /// The canonical node for this step.
    ///
    /// A [`Step::DialogRef`] expands to a `Microsoft.BeginDialog` node naming
    /// the dialog.
    pub fn to_value(self) -> Cow<'a, Value> {
        match self {
            Self::Node(value) => Cow::Borrowed(value),
            Self::DialogRef(name) => Cow::Owned(json!({
                (KIND_FIELD): kinds::BEGIN_DIALOG,
                (fields::DIALOG): name,
            })),
        }
    }
}

/// Reads an array field as steps; absent or non-array fields read as empty.
fn steps_of<'a>(value: &'a Value, field: &str) -> Vec<Step<'a>> {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(Step::from_value).collect())
        .unwrap_or_default()
}

/// A node holding an ordered array of child steps under one field.
#[derive(Debug, Clone, PartialEq)]
pub struct StepList<'a> {
    kind: &'a str,
    field: &'static str,
    steps: Vec<Step<'a>>,
}

impl<'a> StepList<'a> {
    pub fn kind(&self) -> &'a str {
        self.kind
    }

    /// Name of the field holding the steps, used to build child paths.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn steps(&self) -> &[Step<'a>] {
        &self.steps
    }
}

/// An if/else node.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional<'a> {
    node: &'a Value,
    condition: Option<&'a Value>,
    actions: Vec<Step<'a>>,
    else_actions: Vec<Step<'a>>,
}

impl<'a> Conditional<'a> {
    /// The conditional node itself.
    pub fn node(&self) -> &'a Value {
        self.node
    }

    /// The condition expression, if present.
    pub fn condition(&self) -> Option<&'a Value> {
        self.condition
    }

    pub fn actions(&self) -> &[Step<'a>] {
        &self.actions
    }

    pub fn else_actions(&self) -> &[Step<'a>] {
        &self.else_actions
    }
}

/// One labelled case of a [`Switch`].
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase<'a> {
    label: String,
    actions: Vec<Step<'a>>,
}

impl<'a> SwitchCase<'a> {
    /// The case value rendered as text. String values are used verbatim.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn actions(&self) -> &[Step<'a>] {
        &self.actions
    }
}

/// A multi-way switch node.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch<'a> {
    node: &'a Value,
    condition: Option<&'a Value>,
    cases: Vec<SwitchCase<'a>>,
    default: Vec<Step<'a>>,
}

impl<'a> Switch<'a> {
    pub fn node(&self) -> &'a Value {
        self.node
    }

    pub fn condition(&self) -> Option<&'a Value> {
        self.condition
    }

    pub fn cases(&self) -> &[SwitchCase<'a>] {
        &self.cases
    }

    pub fn default(&self) -> &[Step<'a>] {
        &self.default
    }
}

/// A loop node iterating over a list reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop<'a> {
    node: &'a Value,
    kind: &'a str,
    items_property: Option<&'a str>,
    actions: Vec<Step<'a>>,
}

impl<'a> Loop<'a> {
    pub fn node(&self) -> &'a Value {
        self.node
    }

    pub fn kind(&self) -> &'a str {
        self.kind
    }

    /// The list the loop iterates over.
    pub fn items_property(&self) -> Option<&'a str> {
        self.items_property
    }

    pub fn actions(&self) -> &[Step<'a>] {
        &self.actions
    }
}

/// Any node without a dedicated shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<'a> {
    node: &'a Value,
    kind: &'a str,
}

impl<'a> Leaf<'a> {
    pub fn node(&self) -> &'a Value {
        self.node
    }

    /// The discriminator value, or `""` when the node has none.
    pub fn kind(&self) -> &'a str {
        self.kind
    }
}

/// The closed set of node shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogNode<'a> {
    StepList(StepList<'a>),
    Conditional(Conditional<'a>),
    Switch(Switch<'a>),
    Loop(Loop<'a>),
    Leaf(Leaf<'a>),
}

impl<'a> DialogNode<'a> {
    /// Classify a node by its discriminator.
    ///
    /// Returns `None` for JSON `null`; every other value classifies.
    pub fn classify(value: &'a Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }

        let kind = discriminator(value).unwrap_or("");
        let node = match kind {
            kinds::ADAPTIVE_DIALOG => Self::StepList(StepList {
                kind,
                field: fields::TRIGGERS,
                steps: steps_of(value, fields::TRIGGERS),
            }),
            kinds::IF_CONDITION => Self::Conditional(Conditional {
                node: value,
                condition: value.get(fields::CONDITION),
                actions: steps_of(value, fields::ACTIONS),
                else_actions: steps_of(value, fields::ELSE_ACTIONS),
            }),
            kinds::SWITCH_CONDITION => Self::Switch(Switch {
                node: value,
                condition: value.get(fields::CONDITION),
                cases: cases_of(value),
                default: steps_of(value, fields::DEFAULT),
            }),
            kinds::FOREACH | kinds::FOREACH_PAGE => Self::Loop(Loop {
                node: value,
                kind,
                items_property: value.get(fields::ITEMS_PROPERTY).and_then(Value::as_str),
                actions: steps_of(value, fields::ACTIONS),
            }),
            trigger if trigger.starts_with(kinds::TRIGGER_PREFIX) => Self::StepList(StepList {
                kind,
                field: fields::ACTIONS,
                steps: steps_of(value, fields::ACTIONS),
            }),
            _ => Self::Leaf(Leaf { node: value, kind }),
        };

        Some(node)
    }

    /// The discriminator value this node was classified from.
    pub fn kind(&self) -> &'a str {
        match self {
            Self::StepList(list) => list.kind,
            Self::Conditional(_) => kinds::IF_CONDITION,
            Self::Switch(_) => kinds::SWITCH_CONDITION,
            Self::Loop(node) => node.kind,
            Self::Leaf(leaf) => leaf.kind,
        }
    }
}

fn cases_of(value: &Value) -> Vec<SwitchCase<'_>> {
    value
        .get(fields::CASES)
        .and_then(Value::as_array)
        .map(|cases| {
            cases
                .iter()
                .map(|case| SwitchCase {
                    label: case_label(case.get(fields::VALUE)),
                    actions: steps_of(case, fields::ACTIONS),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn case_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
