use super::error::ParsingError;

/// PathToUnindexedFieldType
///
/// <xs:complexType name="PathToUnindexedFieldType">
///   <xs:complexContent>
///     <xs:extension base="t:BasePathToElementType">
///       <xs:attribute name="FieldURI" type="t:UnindexedFieldURIType" use="required"/>
///     </xs:extension>
///   </xs:complexContent>
/// </xs:complexType>
///
/// The URI value set is an open-ended enumeration of several hundred
/// literals (`item:Subject`, `message:IsRead`, ...), kept as a plain
/// string that round-trips verbatim.
#[derive(Debug, PartialEq, Clone)]
pub struct FieldUri {
    pub field_uri: String,
}

/// PathToIndexedFieldType, like `contacts:EmailAddress` + `EmailAddress1`
#[derive(Debug, PartialEq, Clone)]
pub struct IndexedFieldUri {
    pub field_uri: String,
    pub field_index: String,
}

/// PathToExtendedFieldType
///
/// Addresses a raw MAPI property. The schema leaves the set-id/tag/name/id
/// attribute combinations to server-side validation; only `PropertyType`
/// is required here.
#[derive(Debug, PartialEq, Clone)]
pub struct ExtendedFieldUri {
    pub distinguished_property_set_id: Option<DistinguishedPropertySet>,
    pub property_set_id: Option<String>,
    pub property_tag: Option<String>,
    pub property_name: Option<String>,
    pub property_id: Option<i32>,
    pub property_type: MapiPropertyType,
}

/// DistinguishedPropertySetType
#[derive(Debug, PartialEq, Clone)]
pub enum DistinguishedPropertySet {
    Meeting,
    Appointment,
    Common,
    PublicStrings,
    Address,
    InternetHeaders,
    CalendarAssistant,
    UnifiedMessaging,
    Task,
}
impl DistinguishedPropertySet {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Meeting => "Meeting",
            Self::Appointment => "Appointment",
            Self::Common => "Common",
            Self::PublicStrings => "PublicStrings",
            Self::Address => "Address",
            Self::InternetHeaders => "InternetHeaders",
            Self::CalendarAssistant => "CalendarAssistant",
            Self::UnifiedMessaging => "UnifiedMessaging",
            Self::Task => "Task",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Meeting" => Ok(Self::Meeting),
            "Appointment" => Ok(Self::Appointment),
            "Common" => Ok(Self::Common),
            "PublicStrings" => Ok(Self::PublicStrings),
            "Address" => Ok(Self::Address),
            "InternetHeaders" => Ok(Self::InternetHeaders),
            "CalendarAssistant" => Ok(Self::CalendarAssistant),
            "UnifiedMessaging" => Ok(Self::UnifiedMessaging),
            "Task" => Ok(Self::Task),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// MapiPropertyTypeType
#[derive(Debug, PartialEq, Clone)]
pub enum MapiPropertyType {
    Binary,
    Boolean,
    Currency,
    Double,
    Integer,
    Long,
    Short,
    String,
    SystemTime,
    CLSID,
}
impl MapiPropertyType {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Boolean => "Boolean",
            Self::Currency => "Currency",
            Self::Double => "Double",
            Self::Integer => "Integer",
            Self::Long => "Long",
            Self::Short => "Short",
            Self::String => "String",
            Self::SystemTime => "SystemTime",
            Self::CLSID => "CLSID",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Binary" => Ok(Self::Binary),
            "Boolean" => Ok(Self::Boolean),
            "Currency" => Ok(Self::Currency),
            "Double" => Ok(Self::Double),
            "Integer" => Ok(Self::Integer),
            "Long" => Ok(Self::Long),
            "Short" => Ok(Self::Short),
            "String" => Ok(Self::String),
            "SystemTime" => Ok(Self::SystemTime),
            "CLSID" => Ok(Self::CLSID),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// The `Path` substitution group. Exactly one alternative, always.
#[derive(Debug, PartialEq, Clone)]
pub enum PropertyPath {
    FieldUri(FieldUri),
    IndexedFieldUri(IndexedFieldUri),
    ExtendedFieldUri(ExtendedFieldUri),
}

/// AggregateOnType, the grouped-item ranking key
#[derive(Debug, PartialEq, Clone)]
pub struct AggregateOn {
    pub aggregate: Aggregate,
    pub path: PropertyPath,
}

/// AggregateType
#[derive(Debug, PartialEq, Clone)]
pub enum Aggregate {
    Minimum,
    Maximum,
}
impl Aggregate {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Minimum" => Ok(Self::Minimum),
            "Maximum" => Ok(Self::Maximum),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// FieldOrderType, one sort key of a SortOrder list
#[derive(Debug, PartialEq, Clone)]
pub struct FieldOrder {
    pub order: SortDirection,
    pub path: PropertyPath,
}

/// SortDirectionType
#[derive(Debug, PartialEq, Clone)]
pub enum SortDirection {
    Ascending,
    Descending,
}
impl SortDirection {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Ascending" => Ok(Self::Ascending),
            "Descending" => Ok(Self::Descending),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}
