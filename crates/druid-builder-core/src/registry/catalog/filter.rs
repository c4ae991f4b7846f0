use super::*;

const fn filter(label: &'static str, discriminant: &'static str, fields: &'static [FieldSpec]) -> NodeKind {
    NodeKind::structured(Category::Filter, label, discriminant, fields)
}

pub(super) static FILTERS: &[NodeKind] = &[
    filter("And", "and", &[nodes("fields", "Filters", Category::Filter)]),
    filter(
        "Bound",
        "bound",
        &[
            DIMENSION,
            text("lower", "Lower bound"),
            text("upper", "Upper bound"),
            boolean("lowerStrict", "Lower strict"),
            boolean("upperStrict", "Upper strict"),
            pick("ordering", "Ordering", ORDERINGS),
            EXTRACTION_FN,
        ],
    ),
    filter(
        "ColumnComparison",
        "columnComparison",
        &[nodes("dimensions", "Dimensions", Category::Dimension)],
    ),
    filter("Expression", "expression", &[text("expression", "Expression")]),
    filter(
        "Extraction",
        "extraction",
        &[DIMENSION, text("value", "Value"), EXTRACTION_FN],
    ),
    filter("False", "false", &[]),
    filter(
        "FilterTuning",
        "filterTuning",
        &[
            boolean("useBitmapIndex", "Use bitmap index"),
            number("minCardinalityToUseBitmapIndex", "Min cardinality"),
            number("maxCardinalityToUseBitmapIndex", "Max cardinality"),
        ],
    ),
    filter("In", "in", &[DIMENSION, values("values", "Values"), EXTRACTION_FN]),
    filter("Interval", "interval", &[DIMENSION, INTERVALS, EXTRACTION_FN]),
    filter(
        "Javascript",
        "javascript",
        &[DIMENSION, text("function", "Function"), EXTRACTION_FN],
    ),
    filter(
        "Like",
        "like",
        &[
            DIMENSION,
            text("pattern", "Pattern"),
            text("escape", "Escape"),
            EXTRACTION_FN,
        ],
    ),
    filter("Not", "not", &[node("field", "Filter", Category::Filter)]),
    filter("Or", "or", &[nodes("fields", "Filters", Category::Filter)]),
    filter(
        "Regex",
        "regex",
        &[
            text("expr", "Expression"),
            number("index", "Index"),
            boolean("replaceMissingValue", "Replace missing value"),
            REPLACE_MISSING_VALUE_WITH,
        ],
    ),
    filter(
        "Search",
        "search",
        &[
            DIMENSION,
            node("query", "Query", Category::SearchQuerySpec),
            EXTRACTION_FN,
        ],
    ),
    filter("Selector", "selector", &[DIMENSION, text("value", "Value"), EXTRACTION_FN]),
    filter(
        "Spatial",
        "spatial",
        &[DIMENSION, node("bound", "Bound", Category::Bound)],
    ),
    filter("True", "true", &[]),
];
