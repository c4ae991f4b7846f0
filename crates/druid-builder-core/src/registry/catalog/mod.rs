//! Kind tables, one file per family of categories

mod aggregation;
mod datasource;
mod dimension;
mod extraction_fn;
mod filter;
mod granularity;
mod post_aggregation;
mod query;
mod specs;

use super::{choice, Category, ChoiceOption, ElementShape, FieldDefault, FieldShape, FieldSpec, NodeKind};

pub(super) fn kinds(category: Category) -> &'static [NodeKind] {
    match category {
        Category::Query => query::QUERIES,
        Category::Filter => filter::FILTERS,
        Category::Aggregation => aggregation::AGGREGATIONS,
        Category::PostAggregation => post_aggregation::POST_AGGREGATIONS,
        Category::ExtractionFn => extraction_fn::EXTRACTION_FNS,
        Category::Dimension => dimension::DIMENSIONS,
        Category::Granularity => granularity::GRANULARITIES,
        Category::DataSource => datasource::DATA_SOURCES,
        Category::HavingSpec => specs::HAVING_SPECS,
        Category::TopNMetric => specs::TOPN_METRICS,
        Category::SearchQuerySpec => specs::SEARCH_QUERY_SPECS,
        Category::SearchSortSpec => specs::SEARCH_SORT_SPECS,
        Category::ToInclude => specs::TO_INCLUDE,
        Category::LimitSpec => specs::LIMIT_SPECS,
        Category::OrderByColumnSpec => specs::ORDER_BY_COLUMN_SPECS,
        Category::VirtualColumn => specs::VIRTUAL_COLUMN_KINDS,
        Category::Lookup => specs::LOOKUPS,
        Category::Bound => specs::BOUNDS,
    }
}

// Field constructors shared by the tables

const fn text(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::Text)
}

const fn number(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::Number)
}

const fn boolean(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::Boolean)
}

const fn pick(name: &'static str, label: &'static str, options: &'static [ChoiceOption]) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::Choice(options))
}

const fn values(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::MultiValue(&[])).or(FieldDefault::EmptyArray)
}

const fn numbers(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::NumberList).or(FieldDefault::EmptyArray)
}

const fn node(name: &'static str, label: &'static str, category: Category) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::Node(category))
}

const fn nodes(name: &'static str, label: &'static str, category: Category) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::NodeList(category)).or(FieldDefault::EmptyArray)
}

const fn text_list(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::ValueList(ElementShape::Text)).or(FieldDefault::EmptyArray)
}

const fn list_list(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(name, label, FieldShape::ValueList(ElementShape::List)).or(FieldDefault::EmptyArray)
}

const NAME: FieldSpec = text("name", "Output name");
const FIELD_NAME: FieldSpec = text("fieldName", "Field name");
const DIMENSION: FieldSpec = text("dimension", "Dimension");
const OUTPUT_NAME: FieldSpec = text("outputName", "Output name");
const EXTRACTION_FN: FieldSpec = node("extractionFn", "Extraction function", Category::ExtractionFn);
const FILTER: FieldSpec = node("filter", "Filter", Category::Filter);
const DATA_SOURCE: FieldSpec =
    node("dataSource", "Data source", Category::DataSource).or(FieldDefault::EmptyObject);
const INTERVALS: FieldSpec =
    FieldSpec::new("intervals", "Intervals", FieldShape::IntervalList).or(FieldDefault::EmptyArray);
const GRANULARITY: FieldSpec = node("granularity", "Granularity", Category::Granularity);
const VIRTUAL_COLUMNS: FieldSpec = nodes("virtualColumns", "Virtual columns", Category::VirtualColumn);
const AGGREGATIONS: FieldSpec = nodes("aggregations", "Aggregations", Category::Aggregation);
const POST_AGGREGATIONS: FieldSpec =
    nodes("postAggregations", "Post-aggregations", Category::PostAggregation);
const LOOKUP: FieldSpec = node("lookup", "Lookup", Category::Lookup);
const RETAIN_MISSING_VALUE: FieldSpec = boolean("retainMissingValue", "Retain missing value");
const REPLACE_MISSING_VALUE_WITH: FieldSpec = text("replaceMissingValueWith", "Replace missing value with");
const INJECTIVE: FieldSpec = boolean("injective", "Injective");
const OPTIMIZE: FieldSpec = boolean("optimize", "Optimize");
const DELEGATE: FieldSpec = node("delegate", "Delegate", Category::Dimension);

const ORDERINGS: &[ChoiceOption] = &[
    choice("Lexicographic", "lexicographic"),
    choice("Alphanumeric", "alphanumeric"),
    choice("String length", "strlen"),
    choice("Numeric", "numeric"),
    choice("Version", "version"),
];

const OUTPUT_TYPES: &[ChoiceOption] = &[
    choice("String", "STRING"),
    choice("Long", "LONG"),
    choice("Float", "FLOAT"),
    choice("Double", "DOUBLE"),
];
