use super::*;

const fn aggregation(label: &'static str, discriminant: &'static str, fields: &'static [FieldSpec]) -> NodeKind {
    NodeKind::structured(Category::Aggregation, label, discriminant, fields)
}

const EXPRESSION: FieldSpec = text("expression", "Expression");
const MAX_STRING_BYTES: FieldSpec = number("maxStringBytes", "Max string bytes");

const NUMERIC: &[FieldSpec] = &[NAME, FIELD_NAME, EXPRESSION];
const BY_FIELD: &[FieldSpec] = &[NAME, FIELD_NAME];
const STRING: &[FieldSpec] = &[NAME, FIELD_NAME, MAX_STRING_BYTES];

pub(super) static AGGREGATIONS: &[NodeKind] = &[
    aggregation(
        "Cardinality",
        "cardinality",
        &[
            NAME,
            nodes("fields", "Fields", Category::Dimension),
            boolean("byRow", "By row"),
            boolean("round", "Round"),
        ],
    ),
    aggregation("Count", "count", &[NAME]),
    aggregation("DoubleAny", "doubleAny", BY_FIELD),
    aggregation("DoubleFirst", "doubleFirst", BY_FIELD),
    aggregation("DoubleLast", "doubleLast", BY_FIELD),
    aggregation("DoubleMax", "doubleMax", NUMERIC),
    aggregation("DoubleMean", "doubleMean", BY_FIELD),
    aggregation("DoubleMin", "doubleMin", NUMERIC),
    aggregation("DoubleSum", "doubleSum", NUMERIC),
    aggregation(
        "Filtered",
        "filtered",
        &[
            NAME,
            FILTER,
            node("aggregator", "Aggregator", Category::Aggregation),
        ],
    ),
    aggregation("FloatAny", "floatAny", BY_FIELD),
    aggregation("FloatFirst", "floatFirst", BY_FIELD),
    aggregation("FloatLast", "floatLast", BY_FIELD),
    aggregation("FloatMax", "floatMax", NUMERIC),
    aggregation("FloatMin", "floatMin", NUMERIC),
    aggregation("FloatSum", "floatSum", NUMERIC),
    aggregation(
        "Histogram",
        "histogram",
        &[NAME, FIELD_NAME, numbers("breaks", "Breaks")],
    ),
    aggregation(
        "HyperUnique",
        "hyperUnique",
        &[NAME, FIELD_NAME, boolean("round", "Round")],
    ),
    aggregation(
        "Javascript",
        "javascript",
        &[
            NAME,
            values("fieldNames", "Field names"),
            text("fnAggregate", "Aggregate function"),
            text("fnCombine", "Combine function"),
            text("fnReset", "Reset function"),
        ],
    ),
    aggregation("LongAny", "longAny", BY_FIELD),
    aggregation("LongFirst", "longFirst", BY_FIELD),
    aggregation("LongLast", "longLast", BY_FIELD),
    aggregation("LongMax", "longMax", NUMERIC),
    aggregation("LongMin", "longMin", NUMERIC),
    aggregation("LongSum", "longSum", NUMERIC),
    aggregation("StringAny", "stringAny", STRING),
    aggregation("StringFirst", "stringFirst", STRING),
    aggregation("StringFirstFolding", "stringFirstFolding", STRING),
    aggregation("StringLast", "stringLast", STRING),
    aggregation("StringLastFolding", "stringLastFolding", STRING),
];
