use super::*;

const fn data_source(label: &'static str, discriminant: &'static str, fields: &'static [FieldSpec]) -> NodeKind {
    NodeKind::structured(Category::DataSource, label, discriminant, fields)
}

const JOIN_TYPES: &[ChoiceOption] = &[choice("Inner", "INNER"), choice("Left", "LEFT")];

pub(super) static DATA_SOURCES: &[NodeKind] = &[
    data_source("GlobalTable", "globalTable", &[text("name", "Name")]),
    data_source(
        "Inline",
        "inline",
        &[
            values("columnNames", "Column names"),
            values("columnTypes", "Column types"),
            FieldSpec::new("rows", "Rows", FieldShape::Json),
        ],
    ),
    data_source(
        "Join",
        "join",
        &[
            node("left", "Left", Category::DataSource),
            node("right", "Right", Category::DataSource),
            text("rightPrefix", "Right prefix"),
            text("condition", "Condition"),
            pick("joinType", "Join type", JOIN_TYPES),
        ],
    ),
    data_source("Lookup", "lookup", &[text("lookup", "Lookup")]),
    data_source("Query", "query", &[node("query", "Query", Category::Query)]),
    data_source("Table", "table", &[text("name", "Name")]),
    data_source("Union", "union", &[values("dataSources", "Data sources")]),
];
