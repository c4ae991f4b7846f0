//! Static catalog of node kinds
//!
//! Every polymorphic position in the builder tree belongs to a [`Category`].
//! A category owns an ordered list of [`NodeKind`]s; each kind declares its
//! discriminant value, how the slot is stored ([`KindMode`]) and its fields.
//! Nothing else in the crate hard-codes a kind: mounting, stripping,
//! defaults, collections and path resolution are all driven from here.

mod catalog;

use crate::errors::{BuilderError, Result};
use crate::model::node::discriminant_of;
use crate::model::{NodePath, PathSegment};
use serde_json::{Map, Value};
use std::fmt;

/// Polymorphic positions in a Druid query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Query,
    Filter,
    Aggregation,
    PostAggregation,
    ExtractionFn,
    Dimension,
    Granularity,
    DataSource,
    HavingSpec,
    TopNMetric,
    SearchQuerySpec,
    SearchSortSpec,
    ToInclude,
    LimitSpec,
    OrderByColumnSpec,
    VirtualColumn,
    Lookup,
    Bound,
}

impl Category {
    pub const ALL: [Category; 18] = [
        Category::Query,
        Category::Filter,
        Category::Aggregation,
        Category::PostAggregation,
        Category::ExtractionFn,
        Category::Dimension,
        Category::Granularity,
        Category::DataSource,
        Category::HavingSpec,
        Category::TopNMetric,
        Category::SearchQuerySpec,
        Category::SearchSortSpec,
        Category::ToInclude,
        Category::LimitSpec,
        Category::OrderByColumnSpec,
        Category::VirtualColumn,
        Category::Lookup,
        Category::Bound,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Query => "query",
            Category::Filter => "filter",
            Category::Aggregation => "aggregation",
            Category::PostAggregation => "post-aggregation",
            Category::ExtractionFn => "extraction function",
            Category::Dimension => "dimension",
            Category::Granularity => "granularity",
            Category::DataSource => "data source",
            Category::HavingSpec => "having spec",
            Category::TopNMetric => "topN metric",
            Category::SearchQuerySpec => "search query spec",
            Category::SearchSortSpec => "search sort spec",
            Category::ToInclude => "toInclude",
            Category::LimitSpec => "limit spec",
            Category::OrderByColumnSpec => "order-by column",
            Category::VirtualColumn => "virtual column",
            Category::Lookup => "lookup",
            Category::Bound => "bound",
        }
    }

    /// Key the discriminant is written under
    pub fn discriminant_key(&self) -> &'static str {
        match self {
            Category::Query => "queryType",
            _ => "type",
        }
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            category: *self,
            kinds: catalog::kinds(*self),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A labelled value offered by a choice field or selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: &'static str,
    pub value: &'static str,
}

pub const fn choice(label: &'static str, value: &'static str) -> ChoiceOption {
    ChoiceOption { label, value }
}

/// Element type of a list of plain values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    /// List of strings
    Text,
    /// List of string lists
    List,
}

/// What a field holds and which editor edits it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Text,
    Number,
    Boolean,
    Choice(&'static [ChoiceOption]),
    /// Array of strings with creatable options; the slice seeds suggestions
    MultiValue(&'static [ChoiceOption]),
    /// Array of numbers entered as free text
    NumberList,
    DateTime,
    /// Single `start/stop` interval string
    Interval,
    /// Ordered collection of interval strings
    IntervalList,
    /// Arbitrary JSON edited as text
    Json,
    /// String-to-string object edited as key/value rows
    KeyValueMap,
    Node(Category),
    NodeList(Category),
    ValueList(ElementShape),
}

impl FieldShape {
    pub fn name(&self) -> &'static str {
        match self {
            FieldShape::Text => "text",
            FieldShape::Number => "number",
            FieldShape::Boolean => "boolean",
            FieldShape::Choice(_) => "choice",
            FieldShape::MultiValue(_) => "multi-value",
            FieldShape::NumberList => "number list",
            FieldShape::DateTime => "date-time",
            FieldShape::Interval => "interval",
            FieldShape::IntervalList => "interval list",
            FieldShape::Json => "json",
            FieldShape::KeyValueMap => "key/value map",
            FieldShape::Node(_) => "node",
            FieldShape::NodeList(_) => "node list",
            FieldShape::ValueList(_) => "value list",
        }
    }

    /// Whether the field is an ordered collection with add/remove rows
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            FieldShape::IntervalList | FieldShape::NodeList(_) | FieldShape::ValueList(_)
        )
    }

    /// Shape used to edit one element of a collection in place.
    ///
    /// Node collections return `None`; their elements are edited by path.
    pub fn element_shape(&self) -> Option<FieldShape> {
        match self {
            FieldShape::IntervalList => Some(FieldShape::Interval),
            FieldShape::ValueList(ElementShape::Text) => Some(FieldShape::Text),
            FieldShape::ValueList(ElementShape::List) => Some(FieldShape::MultiValue(&[])),
            _ => None,
        }
    }

    /// Value appended by "add" on a collection of this shape
    pub fn new_element(&self) -> Option<Value> {
        match self {
            FieldShape::IntervalList | FieldShape::ValueList(ElementShape::Text) => {
                Some(Value::String(String::new()))
            }
            FieldShape::ValueList(ElementShape::List) => Some(Value::Array(Vec::new())),
            FieldShape::NodeList(_) => Some(Value::Object(Map::new())),
            _ => None,
        }
    }

    /// Whether `value` already has the JSON type this shape stores
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldShape::Text
            | FieldShape::Choice(_)
            | FieldShape::DateTime
            | FieldShape::Interval => value.is_string(),
            FieldShape::Number => value.is_number(),
            FieldShape::Boolean => value.is_boolean(),
            FieldShape::MultiValue(_)
            | FieldShape::NumberList
            | FieldShape::IntervalList
            | FieldShape::NodeList(_)
            | FieldShape::ValueList(_) => value.is_array(),
            FieldShape::KeyValueMap => value.is_object(),
            FieldShape::Node(_) => value.is_object() || value.is_string(),
            FieldShape::Json => true,
        }
    }
}

/// Value written into an absent field when its kind is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Absent,
    EmptyArray,
    EmptyObject,
}

impl FieldDefault {
    pub fn value(&self) -> Option<Value> {
        match self {
            FieldDefault::Absent => None,
            FieldDefault::EmptyArray => Some(Value::Array(Vec::new())),
            FieldDefault::EmptyObject => Some(Value::Object(Map::new())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub shape: FieldShape,
    pub default: FieldDefault,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, shape: FieldShape) -> Self {
        Self {
            name,
            label,
            shape,
            default: FieldDefault::Absent,
        }
    }

    /// Same field, defaulted when the kind is mounted
    pub const fn or(self, default: FieldDefault) -> Self {
        Self {
            name: self.name,
            label: self.label,
            shape: self.shape,
            default,
        }
    }
}

/// How a kind occupies its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindMode {
    /// Object with a discriminant and declared fields
    Structured,
    /// Bare scalar stored directly in the slot
    Scalar(FieldShape),
    /// Whole slot edited as raw JSON; never stripped
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeKind {
    pub category: Category,
    pub label: &'static str,
    /// `None` for kinds identified by position alone (order-by columns, raw and scalar kinds)
    pub discriminant: Option<&'static str>,
    pub mode: KindMode,
    pub fields: &'static [FieldSpec],
}

impl NodeKind {
    pub const fn structured(
        category: Category,
        label: &'static str,
        discriminant: &'static str,
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            category,
            label,
            discriminant: Some(discriminant),
            mode: KindMode::Structured,
            fields,
        }
    }

    /// Structured kind whose discriminant is implied by its position
    pub const fn implicit(
        category: Category,
        label: &'static str,
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            category,
            label,
            discriminant: None,
            mode: KindMode::Structured,
            fields,
        }
    }

    pub const fn scalar(category: Category, label: &'static str, shape: FieldShape) -> Self {
        Self {
            category,
            label,
            discriminant: None,
            mode: KindMode::Scalar(shape),
            fields: &[],
        }
    }

    pub const fn raw(category: Category, label: &'static str) -> Self {
        Self {
            category,
            label,
            discriminant: None,
            mode: KindMode::Raw,
            fields: &[],
        }
    }

    /// Registry key: the lower-cased label
    pub fn key(&self) -> String {
        self.label.to_ascii_lowercase()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Keys that survive a strip: the discriminant key plus every declared field
    pub fn whitelist(&self) -> Vec<&'static str> {
        let mut keys = Vec::with_capacity(self.fields.len() + 1);
        if self.discriminant.is_some() {
            keys.push(self.category.discriminant_key());
        }
        keys.extend(self.fields.iter().map(|f| f.name));
        keys
    }

    fn covers(&self, map: &Map<String, Value>) -> bool {
        let whitelist = self.whitelist();
        map.keys().all(|k| whitelist.contains(&k.as_str()))
    }
}

/// The kinds of one category, in display order
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    category: Category,
    kinds: &'static [NodeKind],
}

impl Catalog {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn kinds(&self) -> &'static [NodeKind] {
        self.kinds
    }

    /// Look a kind up by key, case-insensitively
    pub fn get(&self, key: &str) -> Option<&'static NodeKind> {
        self.kinds
            .iter()
            .find(|kind| kind.label.eq_ignore_ascii_case(key))
    }

    /// Like [`Catalog::get`] but an error when missing
    pub fn require(&self, key: &str) -> Result<&'static NodeKind> {
        self.get(key).ok_or_else(|| BuilderError::UnknownKind {
            category: self.category.name().to_string(),
            key: key.to_string(),
        })
    }

    /// The kind a stored slot value currently is, if any
    ///
    /// Objects resolve by discriminant (case-insensitive). When several kinds
    /// share a discriminant the one whose label matches wins, then the first
    /// whose fields cover every key present. Strings resolve to the scalar
    /// kind; objects without a discriminant resolve to the implicit kind.
    pub fn resolve(&self, value: &Value) -> Option<&'static NodeKind> {
        match value {
            Value::String(_) => self
                .kinds
                .iter()
                .find(|kind| matches!(kind.mode, KindMode::Scalar(_))),
            Value::Object(map) => {
                match discriminant_of(map) {
                    Some(d) => self.resolve_discriminant(d, map),
                    None => self.kinds.iter().find(|kind| {
                        kind.mode == KindMode::Structured && kind.discriminant.is_none()
                    }),
                }
            }
            _ => None,
        }
    }

    fn resolve_discriminant(&self, d: &str, map: &Map<String, Value>) -> Option<&'static NodeKind> {
        let candidates: Vec<&'static NodeKind> = self
            .kinds
            .iter()
            .filter(|kind| kind.discriminant.is_some_and(|own| own.eq_ignore_ascii_case(d)))
            .collect();
        if candidates.len() <= 1 {
            return candidates.first().copied();
        }
        candidates
            .iter()
            .find(|kind| kind.label.eq_ignore_ascii_case(d) && kind.covers(map))
            .or_else(|| candidates.iter().find(|kind| kind.covers(map)))
            .or_else(|| candidates.first())
            .copied()
    }
}

/// Category of the slot addressed by `path`, walking field shapes from the root query
///
/// Intermediate nodes must exist and resolve to a kind. The final slot may
/// be absent or empty.
pub fn category_at(root: &Value, path: &NodePath) -> Result<Category> {
    let mut category = Category::Query;
    let mut current = Some(root);
    let mut list_of: Option<Category> = None;

    for (depth, segment) in path.segments().iter().enumerate() {
        let prefix = || path.truncated(depth).to_string();
        match segment {
            PathSegment::Field(name) => {
                if list_of.is_some() {
                    return Err(BuilderError::NotANodeSlot { path: prefix() });
                }
                let value = current.ok_or_else(|| BuilderError::PathNotFound { path: prefix() })?;
                if !value.is_object() {
                    return Err(BuilderError::PathNotFound { path: prefix() });
                }
                let kind = category.catalog().resolve(value).ok_or_else(|| {
                    BuilderError::UnknownKind {
                        category: category.name().to_string(),
                        key: value
                            .as_object()
                            .and_then(discriminant_of)
                            .unwrap_or_default()
                            .to_string(),
                    }
                })?;
                let spec = kind.field(name).ok_or_else(|| BuilderError::FieldNotDeclared {
                    kind: kind.label.to_string(),
                    field: name.clone(),
                })?;
                match spec.shape {
                    FieldShape::Node(child) => category = child,
                    FieldShape::NodeList(child) => list_of = Some(child),
                    _ => {
                        return Err(BuilderError::NotANodeSlot {
                            path: path.truncated(depth + 1).to_string(),
                        })
                    }
                }
                current = value.get(name.as_str());
            }
            PathSegment::Index(index) => {
                let child = list_of
                    .take()
                    .ok_or_else(|| BuilderError::NotANodeSlot { path: prefix() })?;
                let items = current
                    .and_then(Value::as_array)
                    .ok_or_else(|| BuilderError::PathNotFound { path: prefix() })?;
                current = Some(items.get(*index).ok_or_else(|| BuilderError::IndexOutOfRange {
                    path: prefix(),
                    index: *index,
                    len: items.len(),
                })?);
                category = child;
            }
        }
    }

    if list_of.is_some() {
        return Err(BuilderError::NotANodeSlot {
            path: path.to_string(),
        });
    }
    Ok(category)
}
