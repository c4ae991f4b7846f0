use super::*;

const fn post_aggregation(
    label: &'static str,
    discriminant: &'static str,
    fields: &'static [FieldSpec],
) -> NodeKind {
    NodeKind::structured(Category::PostAggregation, label, discriminant, fields)
}

const ARITHMETIC_FNS: &[ChoiceOption] = &[
    choice("+", "+"),
    choice("-", "-"),
    choice("*", "*"),
    choice("/", "/"),
    choice("quotient", "quotient"),
];

const ARITHMETIC_ORDERINGS: &[ChoiceOption] = &[choice("Numeric first", "numericFirst")];

const OPERANDS: FieldSpec = nodes("fields", "Fields", Category::PostAggregation);
const GREATEST_LEAST: &[FieldSpec] = &[NAME, OPERANDS];
const ACCESS: &[FieldSpec] = &[NAME, FIELD_NAME];

pub(super) static POST_AGGREGATIONS: &[NodeKind] = &[
    post_aggregation(
        "Arithmetic",
        "arithmetic",
        &[
            NAME,
            pick("fn", "Function", ARITHMETIC_FNS),
            OPERANDS,
            pick("ordering", "Ordering", ARITHMETIC_ORDERINGS),
        ],
    ),
    post_aggregation("Constant", "constant", &[NAME, number("value", "Value")]),
    post_aggregation("DoubleGreatest", "doubleGreatest", GREATEST_LEAST),
    post_aggregation("DoubleLeast", "doubleLeast", GREATEST_LEAST),
    post_aggregation("FieldAccess", "fieldAccess", ACCESS),
    post_aggregation("FinalizingFieldAccess", "finalizingFieldAccess", ACCESS),
    post_aggregation("HyperUniqueCardinality", "hyperUniqueCardinality", ACCESS),
    post_aggregation(
        "Javascript",
        "javascript",
        &[
            NAME,
            values("fieldNames", "Field names"),
            text("function", "Function"),
        ],
    ),
    post_aggregation("LongGreatest", "longGreatest", GREATEST_LEAST),
    post_aggregation("LongLeast", "longLeast", GREATEST_LEAST),
];
