use super::*;

const fn extraction_fn(label: &'static str, discriminant: &'static str, fields: &'static [FieldSpec]) -> NodeKind {
    NodeKind::structured(Category::ExtractionFn, label, discriminant, fields)
}

const NULL_HANDLING: &[ChoiceOption] = &[
    choice("nullString", "nullString"),
    choice("emptyString", "emptyString"),
    choice("returnNull", "returnNull"),
];

const LOCALE: FieldSpec = text("locale", "Locale");

pub(super) static EXTRACTION_FNS: &[NodeKind] = &[
    extraction_fn(
        "Bucket",
        "bucket",
        &[number("size", "Size"), number("offset", "Offset")],
    ),
    extraction_fn(
        "Cascade",
        "cascade",
        &[nodes("extractionFns", "Extraction functions", Category::ExtractionFn)],
    ),
    extraction_fn("Identity", "identity", &[]),
    extraction_fn(
        "Javascript",
        "javascript",
        &[text("function", "Function"), INJECTIVE],
    ),
    extraction_fn(
        "Lookup",
        "lookup",
        &[
            LOOKUP,
            RETAIN_MISSING_VALUE,
            REPLACE_MISSING_VALUE_WITH,
            INJECTIVE,
            OPTIMIZE,
        ],
    ),
    extraction_fn("Lower", "lower", &[LOCALE]),
    extraction_fn("Partial", "partial", &[text("expr", "Expression")]),
    extraction_fn(
        "Regex",
        "regex",
        &[
            text("expr", "Expression"),
            number("index", "Index"),
            boolean("replaceMissingValue", "Replace missing value"),
            REPLACE_MISSING_VALUE_WITH,
        ],
    ),
    extraction_fn("SearchQuery", "searchQuery", &[node("query", "Query", Category::SearchQuerySpec)]),
    extraction_fn("StrLen", "strlen", &[]),
    extraction_fn(
        "StringFormat",
        "stringFormat",
        &[
            text("format", "Format"),
            pick("nullHandling", "Null handling", NULL_HANDLING),
        ],
    ),
    extraction_fn(
        "Substring",
        "substring",
        &[number("index", "Index"), number("length", "Length")],
    ),
    extraction_fn(
        "Time",
        "time",
        &[
            text("timeFormat", "Time format"),
            text("resultFormat", "Result format"),
            boolean("joda", "Joda"),
        ],
    ),
    extraction_fn(
        "TimeFormat",
        "timeFormat",
        &[
            text("format", "Format"),
            text("timeZone", "Time zone"),
            LOCALE,
            GRANULARITY,
            boolean("asMillis", "As millis"),
        ],
    ),
    extraction_fn("Upper", "upper", &[LOCALE]),
];
