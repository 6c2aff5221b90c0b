//! Custom property value kinds.
//!
//! Workspaces define their own typed task fields. Each kind has exactly one
//! accepted JSON shape; the `customProperties` union advertised to callers is
//! generated from this enum so the two stay in lockstep.

use std::sync::LazyLock;

use serde_json::Value;

use super::schema::SchemaNode;

const TIME_TRACKING_PATTERN: &str = "^[0-9]+:[0-5][0-9]:[0-5][0-9]$";

const CUSTOM_PROPERTIES_DESCRIPTION: &str = "Custom properties to apply to the task. Use the property names from the config. Examples: { 'customCheckboxProperty': true, 'customTextProperty': 'Some text', 'customNumberProperty': 5, 'customSelectProperty': 'Option Name', 'customDatesProperty': '2025-05-10', 'customDatesPropertyWithRange': ['2025-05-01', '2025-05-30'], 'customMultiselectProperty': ['option1', 'option2'], 'customUserProperty': 'user@example.com', 'customMultipleUserProperty': ['user1@example.com', 'user2@example.com'], 'customTimeTrackingProperty': '1:30:00' }";

/// The closed set of custom property kinds a workspace can define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomPropertyKind {
    Checkbox,
    DatesRange,
    DatesSingle,
    Multiselect,
    Number,
    Select,
    Status,
    Text,
    TimeTracking,
    UserMultiple,
    UserSingle,
}

static KIND_SCHEMAS: LazyLock<Vec<(CustomPropertyKind, SchemaNode)>> = LazyLock::new(|| {
    CustomPropertyKind::ALL
        .into_iter()
        .map(|kind| (kind, kind.build_schema()))
        .collect()
});

impl CustomPropertyKind {
    /// All kinds, in the order they are advertised.
    pub const ALL: [Self; 11] = [
        Self::Checkbox,
        Self::DatesRange,
        Self::DatesSingle,
        Self::Multiselect,
        Self::Number,
        Self::Select,
        Self::Status,
        Self::Text,
        Self::TimeTracking,
        Self::UserMultiple,
        Self::UserSingle,
    ];

    /// Title used for the union variant on the wire.
    pub fn title(self) -> &'static str {
        match self {
            Self::Checkbox => "CustomPropertyCheckbox",
            Self::DatesRange => "CustomPropertyDatesRange",
            Self::DatesSingle => "CustomPropertyDatesSingle",
            Self::Multiselect => "CustomPropertyMultiselect",
            Self::Number => "CustomPropertyNumber",
            Self::Select => "CustomPropertySelect",
            Self::Status => "CustomPropertyStatus",
            Self::Text => "CustomPropertyText",
            Self::TimeTracking => "CustomPropertyTimeTracking",
            Self::UserMultiple => "CustomPropertyUserMultiple",
            Self::UserSingle => "CustomPropertyUserSingle",
        }
    }

    /// Schema of the values this kind accepts.
    pub fn schema(self) -> &'static SchemaNode {
        // ALL is in declaration order, so the discriminant indexes KIND_SCHEMAS
        &KIND_SCHEMAS[self as usize].1
    }

    /// First kind (in advertised order) whose shape admits `value`.
    ///
    /// Shapes overlap (a plain string is a valid Status, Text or Select), so
    /// this answers "could this be a custom property value at all" and which
    /// kind it reads as first; the workspace config decides the real kind.
    pub fn classify(value: &Value) -> Option<Self> {
        KIND_SCHEMAS
            .iter()
            .find(|(_, node)| node.accepts(value))
            .map(|(kind, _)| *kind)
    }

    fn build_schema(self) -> SchemaNode {
        let node = match self {
            Self::Checkbox => SchemaNode::boolean(),
            Self::DatesRange => SchemaNode::array(SchemaNode::string().nullable()).nullable(),
            Self::DatesSingle => SchemaNode::string().nullable(),
            Self::Multiselect => SchemaNode::array(SchemaNode::string()),
            Self::Number => SchemaNode::number().nullable(),
            Self::Select => SchemaNode::string().nullable(),
            Self::Status => SchemaNode::string(),
            Self::Text => SchemaNode::string(),
            Self::TimeTracking => SchemaNode::string()
                .pattern(TIME_TRACKING_PATTERN)
                .describe("Duration in HH:MM:SS format"),
            Self::UserMultiple => SchemaNode::array(SchemaNode::string()),
            Self::UserSingle => SchemaNode::string().nullable(),
        };
        node.title(self.title())
    }
}

/// The `customProperties` object: arbitrary names mapped to any kind's value.
pub fn custom_properties_schema() -> SchemaNode {
    let variants = CustomPropertyKind::ALL
        .into_iter()
        .map(|kind| kind.schema().clone())
        .collect();

    SchemaNode::object()
        .describe(CUSTOM_PROPERTIES_DESCRIPTION)
        .additional(SchemaNode::one_of(variants))
}
