//! Smaller categories: having, topN metric, search specs, limits, lookups, bounds

use super::*;

const PREVIOUS_STOP: FieldSpec = text("previousStop", "Previous stop");

pub(super) static HAVING_SPECS: &[NodeKind] = &[
    NodeKind::structured(
        Category::HavingSpec,
        "And",
        "and",
        &[nodes("havingSpecs", "Having specs", Category::HavingSpec)],
    ),
    NodeKind::structured(
        Category::HavingSpec,
        "DimSelector",
        "dimSelector",
        &[DIMENSION, text("value", "Value"), EXTRACTION_FN],
    ),
    NodeKind::structured(
        Category::HavingSpec,
        "EqualTo",
        "equalTo",
        &[text("aggregation", "Aggregation"), number("value", "Value")],
    ),
    NodeKind::structured(Category::HavingSpec, "Filter", "filter", &[FILTER]),
    NodeKind::structured(
        Category::HavingSpec,
        "GreaterThan",
        "greaterThan",
        &[text("aggregation", "Aggregation"), number("value", "Value")],
    ),
    NodeKind::structured(
        Category::HavingSpec,
        "LessThan",
        "lessThan",
        &[text("aggregation", "Aggregation"), number("value", "Value")],
    ),
    NodeKind::structured(
        Category::HavingSpec,
        "Not",
        "not",
        &[node("havingSpec", "Having spec", Category::HavingSpec)],
    ),
    NodeKind::structured(
        Category::HavingSpec,
        "Or",
        "or",
        &[nodes("havingSpecs", "Having specs", Category::HavingSpec)],
    ),
];

pub(super) static TOPN_METRICS: &[NodeKind] = &[
    NodeKind::structured(Category::TopNMetric, "AlphaNumeric", "alphaNumeric", &[PREVIOUS_STOP]),
    NodeKind::structured(
        Category::TopNMetric,
        "Dimension",
        "dimension",
        &[pick("ordering", "Ordering", ORDERINGS), PREVIOUS_STOP],
    ),
    NodeKind::structured(
        Category::TopNMetric,
        "Inverted",
        "inverted",
        &[node("metric", "Metric", Category::TopNMetric)],
    ),
    NodeKind::structured(Category::TopNMetric, "Lexicographic", "lexicographic", &[PREVIOUS_STOP]),
    NodeKind::structured(Category::TopNMetric, "Numeric", "numeric", &[text("metric", "Metric")]),
];

const CASE_SENSITIVE: FieldSpec = boolean("case_sensitive", "Case sensitive");

pub(super) static SEARCH_QUERY_SPECS: &[NodeKind] = &[
    NodeKind::structured(Category::SearchQuerySpec, "All", "all", &[]),
    NodeKind::structured(
        Category::SearchQuerySpec,
        "Contains",
        "contains",
        &[CASE_SENSITIVE, text("value", "Value")],
    ),
    NodeKind::structured(
        Category::SearchQuerySpec,
        "Fragment",
        "fragment",
        &[CASE_SENSITIVE, values("values", "Values")],
    ),
    NodeKind::structured(
        Category::SearchQuerySpec,
        "InsensitiveContains",
        "insensitive_contains",
        &[text("value", "Value")],
    ),
    NodeKind::structured(Category::SearchQuerySpec, "Regex", "regex", &[text("pattern", "Pattern")]),
];

pub(super) static SEARCH_SORT_SPECS: &[NodeKind] = &[
    NodeKind::structured(Category::SearchSortSpec, "Alphanumeric", "alphanumeric", &[]),
    NodeKind::structured(Category::SearchSortSpec, "Lexicographic", "lexicographic", &[]),
    NodeKind::structured(Category::SearchSortSpec, "Numeric", "numeric", &[]),
    NodeKind::structured(Category::SearchSortSpec, "StrLen", "strlen", &[]),
    NodeKind::structured(Category::SearchSortSpec, "Version", "version", &[]),
];

pub(super) static TO_INCLUDE: &[NodeKind] = &[
    NodeKind::structured(Category::ToInclude, "All", "all", &[]),
    NodeKind::structured(Category::ToInclude, "List", "list", &[values("columns", "Columns")]),
    NodeKind::structured(Category::ToInclude, "None", "none", &[]),
];

pub(super) static LIMIT_SPECS: &[NodeKind] = &[NodeKind::structured(
    Category::LimitSpec,
    "Default",
    "default",
    &[
        number("limit", "Limit"),
        nodes("columns", "Columns", Category::OrderByColumnSpec),
    ],
)];

const DIRECTIONS: &[ChoiceOption] = &[
    choice("Ascending", "ascending"),
    choice("Descending", "descending"),
];

const DIMENSION_ORDERS: &[ChoiceOption] = &[
    choice("Lexicographic", "lexicographic"),
    choice("Alphanumeric", "alphanumeric"),
    choice("String length", "strlen"),
    choice("Numeric", "numeric"),
];

pub(super) static ORDER_BY_COLUMN_SPECS: &[NodeKind] = &[NodeKind::implicit(
    Category::OrderByColumnSpec,
    "OrderByColumnSpec",
    &[
        DIMENSION,
        pick("direction", "Direction", DIRECTIONS),
        pick("dimensionOrder", "Dimension order", DIMENSION_ORDERS),
    ],
)];

pub(super) static VIRTUAL_COLUMN_KINDS: &[NodeKind] = &[NodeKind::structured(
    Category::VirtualColumn,
    "Expression",
    "expression",
    &[
        NAME,
        text("expression", "Expression"),
        pick("outputType", "Output type", OUTPUT_TYPES),
    ],
)];

pub(super) static LOOKUPS: &[NodeKind] = &[NodeKind::structured(
    Category::Lookup,
    "Map",
    "map",
    &[
        FieldSpec::new("map", "Map", FieldShape::KeyValueMap),
        boolean("isOneToOne", "One to one"),
    ],
)];

pub(super) static BOUNDS: &[NodeKind] = &[
    NodeKind::structured(
        Category::Bound,
        "Radius",
        "radius",
        &[numbers("coords", "Coordinates"), number("radius", "Radius")],
    ),
    NodeKind::structured(
        Category::Bound,
        "Rectangular",
        "rectangular",
        &[numbers("minCoords", "Min coordinates"), numbers("maxCoords", "Max coordinates")],
    ),
];
