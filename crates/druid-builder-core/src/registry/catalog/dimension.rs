use super::*;

const fn dimension(label: &'static str, discriminant: &'static str, fields: &'static [FieldSpec]) -> NodeKind {
    NodeKind::structured(Category::Dimension, label, discriminant, fields)
}

const OUTPUT_TYPE: FieldSpec = pick("outputType", "Output type", OUTPUT_TYPES);

pub(super) static DIMENSIONS: &[NodeKind] = &[
    dimension("Default", "default", &[DIMENSION, OUTPUT_NAME, OUTPUT_TYPE]),
    dimension(
        "Extraction",
        "extraction",
        &[DIMENSION, OUTPUT_NAME, OUTPUT_TYPE, EXTRACTION_FN],
    ),
    dimension(
        "ListFiltered",
        "listFiltered",
        &[DELEGATE, values("values", "Values"), boolean("isWhitelist", "Is whitelist")],
    ),
    dimension(
        "Lookup",
        "lookup",
        &[
            DIMENSION,
            OUTPUT_NAME,
            LOOKUP,
            RETAIN_MISSING_VALUE,
            REPLACE_MISSING_VALUE_WITH,
            OPTIMIZE,
        ],
    ),
    dimension("PrefixFiltered", "prefixFiltered", &[DELEGATE, text("prefix", "Prefix")]),
    dimension("RegexFiltered", "regexFiltered", &[DELEGATE, text("pattern", "Pattern")]),
    // Druid names registered lookups `lookup` too; the label keeps the keys apart
    dimension(
        "RegisteredLookup",
        "lookup",
        &[
            DIMENSION,
            OUTPUT_NAME,
            text("name", "Lookup name"),
            RETAIN_MISSING_VALUE,
            REPLACE_MISSING_VALUE_WITH,
            OPTIMIZE,
        ],
    ),
];
