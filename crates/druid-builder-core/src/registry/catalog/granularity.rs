use super::*;

const SIMPLE: &[ChoiceOption] = &[
    choice("All", "all"),
    choice("None", "none"),
    choice("Second", "second"),
    choice("Minute", "minute"),
    choice("Fifteen minutes", "fifteen_minute"),
    choice("Thirty minutes", "thirty_minute"),
    choice("Hour", "hour"),
    choice("Day", "day"),
    choice("Week", "week"),
    choice("Month", "month"),
    choice("Quarter", "quarter"),
    choice("Year", "year"),
];

const ORIGIN: FieldSpec = FieldSpec::new("origin", "Origin", FieldShape::DateTime);

pub(super) static GRANULARITIES: &[NodeKind] = &[
    NodeKind::structured(
        Category::Granularity,
        "Duration",
        "duration",
        &[number("duration", "Duration (ms)"), ORIGIN],
    ),
    NodeKind::structured(
        Category::Granularity,
        "Period",
        "period",
        &[text("period", "Period"), text("timeZone", "Time zone"), ORIGIN],
    ),
    NodeKind::scalar(Category::Granularity, "Simple", FieldShape::Choice(SIMPLE)),
];
