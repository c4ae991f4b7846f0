use super::*;

const fn query(label: &'static str, discriminant: &'static str, fields: &'static [FieldSpec]) -> NodeKind {
    NodeKind::structured(Category::Query, label, discriminant, fields)
}

const SCAN_ORDERS: &[ChoiceOption] = &[
    choice("None", "none"),
    choice("Ascending", "ascending"),
    choice("Descending", "descending"),
];

const TIME_BOUNDS: &[ChoiceOption] = &[choice("Min time", "minTime"), choice("Max time", "maxTime")];

const ANALYSIS_TYPES: &[ChoiceOption] = &[
    choice("cardinality", "cardinality"),
    choice("minmax", "minmax"),
    choice("size", "size"),
    choice("interval", "interval"),
    choice("timestampSpec", "timestampSpec"),
    choice("queryGranularity", "queryGranularity"),
    choice("aggregators", "aggregators"),
    choice("rollup", "rollup"),
];

const LIMIT: FieldSpec = number("limit", "Limit");

pub(super) static QUERIES: &[NodeKind] = &[
    query("DataSourceMetadata", "dataSourceMetadata", &[DATA_SOURCE]),
    query(
        "GroupBy",
        "groupBy",
        &[
            DATA_SOURCE,
            nodes("dimensions", "Dimensions", Category::Dimension),
            node("limitSpec", "Limit spec", Category::LimitSpec),
            node("having", "Having", Category::HavingSpec),
            GRANULARITY,
            FILTER,
            AGGREGATIONS,
            POST_AGGREGATIONS,
            INTERVALS,
            list_list("subtotalsSpec", "Subtotals"),
            VIRTUAL_COLUMNS,
        ],
    ),
    NodeKind::raw(Category::Query, "Json"),
    query(
        "Scan",
        "scan",
        &[
            DATA_SOURCE,
            INTERVALS,
            FILTER,
            values("columns", "Columns"),
            number("batchSize", "Batch size"),
            LIMIT,
            pick("order", "Order", SCAN_ORDERS),
            VIRTUAL_COLUMNS,
        ],
    ),
    query(
        "Search",
        "search",
        &[
            DATA_SOURCE,
            GRANULARITY,
            FILTER,
            LIMIT,
            INTERVALS,
            text_list("searchDimensions", "Search dimensions"),
            node("query", "Query", Category::SearchQuerySpec),
            node("sort", "Sort", Category::SearchSortSpec),
        ],
    ),
    query(
        "SegmentMetadata",
        "segmentMetadata",
        &[
            DATA_SOURCE,
            INTERVALS,
            node("toInclude", "To include", Category::ToInclude),
            boolean("merge", "Merge"),
            FieldSpec::new("analysisTypes", "Analysis types", FieldShape::MultiValue(ANALYSIS_TYPES))
                .or(FieldDefault::EmptyArray),
            boolean("lenientAggregatorMerge", "Lenient aggregator merge"),
            boolean("usingDefaultInterval", "Using default interval"),
        ],
    ),
    query("Sql", "sql", &[text("query", "Query")]),
    query(
        "TimeBoundary",
        "timeBoundary",
        &[DATA_SOURCE, pick("bound", "Bound", TIME_BOUNDS), FILTER],
    ),
    query(
        "Timeseries",
        "timeseries",
        &[
            DATA_SOURCE,
            boolean("descending", "Descending"),
            INTERVALS,
            GRANULARITY,
            FILTER,
            AGGREGATIONS,
            POST_AGGREGATIONS,
            LIMIT,
            VIRTUAL_COLUMNS,
        ],
    ),
    query(
        "TopN",
        "topN",
        &[
            DATA_SOURCE,
            INTERVALS,
            GRANULARITY,
            FILTER,
            AGGREGATIONS,
            POST_AGGREGATIONS,
            node("dimension", "Dimension", Category::Dimension),
            number("threshold", "Threshold"),
            node("metric", "Metric", Category::TopNMetric),
            VIRTUAL_COLUMNS,
        ],
    ),
];
