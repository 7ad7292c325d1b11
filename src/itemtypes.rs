use chrono::{DateTime, FixedOffset};

use super::attachmenttypes::Attachment;
use super::error::ParsingError;
use super::types::{Body, FolderId, ItemId, Mailbox};

/// ItemType
///
/// Fields shared by every item in the store. The schema expresses this
/// through single inheritance from `t:ItemType`; here the shared fields
/// are one struct composed into each concrete variant of [`RealItem`].
///
/// Children serialize in schema order: ItemId, ParentFolderId, ItemClass,
/// Subject, Sensitivity, Body, Attachments, DateTimeReceived, Size,
/// Categories, Importance, IsDraft, DateTimeSent, ResponseObjects.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ItemProps {
    pub item_id: Option<ItemId>,
    pub parent_folder_id: Option<FolderId>,
    pub item_class: Option<String>,
    pub subject: Option<String>,
    pub sensitivity: Option<Sensitivity>,
    pub body: Option<Body>,
    pub attachments: Vec<Attachment>,
    pub date_time_received: Option<DateTime<FixedOffset>>,
    pub size: Option<i32>,
    pub categories: Vec<String>,
    pub importance: Option<Importance>,
    pub is_draft: Option<bool>,
    pub date_time_sent: Option<DateTime<FixedOffset>>,
    pub response_objects: Vec<ResponseObject>,
}

/// The generic `t:Item` element, carrying only the shared fields.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Item {
    pub props: ItemProps,
}

/// MessageType
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Message {
    pub props: ItemProps,
    pub sender: Option<Mailbox>,
    pub to_recipients: Vec<Mailbox>,
    pub cc_recipients: Vec<Mailbox>,
    pub from: Option<Mailbox>,
    pub internet_message_id: Option<String>,
    pub is_read: Option<bool>,
    pub is_read_receipt_requested: Option<bool>,
}

/// ContactItemType
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Contact {
    pub props: ItemProps,
    pub display_name: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub company_name: Option<String>,
    pub email_addresses: Vec<EmailAddressEntry>,
}

/// EmailAddressDictionaryEntryType
///
/// <xs:complexType name="EmailAddressDictionaryEntryType">
///   <xs:simpleContent>
///     <xs:extension base="xs:string">
///       <xs:attribute name="Key" type="t:EmailAddressKeyType" use="required"/>
///     </xs:extension>
///   </xs:simpleContent>
/// </xs:complexType>
#[derive(Debug, PartialEq, Clone)]
pub struct EmailAddressEntry {
    pub key: EmailAddressKey,
    pub value: String,
}

/// EmailAddressKeyType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum EmailAddressKey {
    EmailAddress1,
    EmailAddress2,
    EmailAddress3,
}

impl EmailAddressKey {
    pub fn value(&self) -> &'static str {
        match self {
            Self::EmailAddress1 => "EmailAddress1",
            Self::EmailAddress2 => "EmailAddress2",
            Self::EmailAddress3 => "EmailAddress3",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "EmailAddress1" => Ok(Self::EmailAddress1),
            "EmailAddress2" => Ok(Self::EmailAddress2),
            "EmailAddress3" => Ok(Self::EmailAddress3),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// CalendarItemType
#[derive(Debug, PartialEq, Clone, Default)]
pub struct CalendarItem {
    pub props: ItemProps,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub is_all_day_event: Option<bool>,
    pub legacy_free_busy_status: Option<LegacyFreeBusy>,
    pub location: Option<String>,
    pub calendar_item_type: Option<CalendarItemKind>,
    pub organizer: Option<Mailbox>,
    pub required_attendees: Vec<Attendee>,
}

/// AttendeeType
#[derive(Debug, PartialEq, Clone)]
pub struct Attendee {
    pub mailbox: Mailbox,
    pub response_type: Option<ResponseKind>,
    pub last_response_time: Option<DateTime<FixedOffset>>,
}

/// ResponseTypeType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ResponseKind {
    Unknown,
    Organizer,
    Tentative,
    Accept,
    Decline,
    NoResponseReceived,
}

impl ResponseKind {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Organizer => "Organizer",
            Self::Tentative => "Tentative",
            Self::Accept => "Accept",
            Self::Decline => "Decline",
            Self::NoResponseReceived => "NoResponseReceived",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Unknown" => Ok(Self::Unknown),
            "Organizer" => Ok(Self::Organizer),
            "Tentative" => Ok(Self::Tentative),
            "Accept" => Ok(Self::Accept),
            "Decline" => Ok(Self::Decline),
            "NoResponseReceived" => Ok(Self::NoResponseReceived),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// SensitivityChoicesType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Sensitivity {
    Normal,
    Personal,
    Private,
    Confidential,
}

impl Sensitivity {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Personal => "Personal",
            Self::Private => "Private",
            Self::Confidential => "Confidential",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Normal" => Ok(Self::Normal),
            "Personal" => Ok(Self::Personal),
            "Private" => Ok(Self::Private),
            "Confidential" => Ok(Self::Confidential),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// ImportanceChoicesType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Importance {
    Low,
    Normal,
    High,
}

impl Importance {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Low" => Ok(Self::Low),
            "Normal" => Ok(Self::Normal),
            "High" => Ok(Self::High),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// LegacyFreeBusyType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LegacyFreeBusy {
    Free,
    Tentative,
    Busy,
    Oof,
    WorkingElsewhere,
    NoData,
}

impl LegacyFreeBusy {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Tentative => "Tentative",
            Self::Busy => "Busy",
            Self::Oof => "OOF",
            Self::WorkingElsewhere => "WorkingElsewhere",
            Self::NoData => "NoData",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Free" => Ok(Self::Free),
            "Tentative" => Ok(Self::Tentative),
            "Busy" => Ok(Self::Busy),
            "OOF" => Ok(Self::Oof),
            "WorkingElsewhere" => Ok(Self::WorkingElsewhere),
            "NoData" => Ok(Self::NoData),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// CalendarItemTypeType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CalendarItemKind {
    Single,
    Occurrence,
    Exception,
    RecurringMaster,
}

impl CalendarItemKind {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Occurrence => "Occurrence",
            Self::Exception => "Exception",
            Self::RecurringMaster => "RecurringMaster",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Single" => Ok(Self::Single),
            "Occurrence" => Ok(Self::Occurrence),
            "Exception" => Ok(Self::Exception),
            "RecurringMaster" => Ok(Self::RecurringMaster),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// The closed substitution group rooted at ItemType, as carried inside
/// `t:Items` or an item attachment. The wire element name tags the
/// variant; a heterogeneous sequence round-trips with order and concrete
/// type of every element preserved.
#[derive(Debug, PartialEq, Clone)]
pub enum RealItem {
    Item(Item),
    Message(Message),
    Contact(Contact),
    CalendarItem(CalendarItem),
}

/// ArrayOfRealItemsType (the `t:Items` element)
#[derive(Debug, PartialEq, Clone)]
pub struct ArrayOfRealItems(pub Vec<RealItem>);

/// The closed substitution group rooted at ResponseObjectType.
///
/// The schema models these as a deep single-inheritance tower
/// (ResponseObjectType -> SmartResponseBaseType -> SmartResponseType, and
/// ResponseObjectType -> WellKnownResponseObjectType). Each layer only
/// adds fields, so the tower flattens into three payload shapes shared
/// across the variants.
#[derive(Debug, PartialEq, Clone)]
pub enum ResponseObject {
    ReplyToItem(SmartResponse),
    ReplyAllToItem(SmartResponse),
    ForwardItem(SmartResponse),
    AcceptItem(WellKnownResponse),
    TentativelyAcceptItem(WellKnownResponse),
    DeclineItem(WellKnownResponse),
    CancelCalendarItem(CancelCalendarItem),
    RemoveItem(RemoveItem),
    SuppressReadReceipt(SuppressReadReceipt),
}

/// SmartResponseType (Reply / ReplyAll / Forward payload)
#[derive(Debug, PartialEq, Clone)]
pub struct SmartResponse {
    pub subject: Option<String>,
    pub body: Option<Body>,
    pub to_recipients: Vec<Mailbox>,
    pub reference_item_id: ItemId,
}

/// WellKnownResponseObjectType (Accept / TentativelyAccept / Decline)
#[derive(Debug, PartialEq, Clone)]
pub struct WellKnownResponse {
    pub body: Option<Body>,
    pub reference_item_id: ItemId,
}

/// CancelCalendarItemType
#[derive(Debug, PartialEq, Clone)]
pub struct CancelCalendarItem {
    pub body: Option<Body>,
    pub reference_item_id: ItemId,
}

/// RemoveItemType
#[derive(Debug, PartialEq, Clone)]
pub struct RemoveItem {
    pub reference_item_id: ItemId,
}

/// SuppressReadReceiptType
#[derive(Debug, PartialEq, Clone)]
pub struct SuppressReadReceipt {
    pub reference_item_id: ItemId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_free_busy_wire_literal_differs_from_variant() {
        assert_eq!(LegacyFreeBusy::Oof.value(), "OOF");
        assert_eq!(
            LegacyFreeBusy::from_value("OOF").unwrap(),
            LegacyFreeBusy::Oof
        );
        assert!(matches!(
            LegacyFreeBusy::from_value("Oof"),
            Err(ParsingError::InvalidEnumValue(_))
        ));
    }

    #[test]
    fn response_kind_bijection() {
        let all = [
            ResponseKind::Unknown,
            ResponseKind::Organizer,
            ResponseKind::Tentative,
            ResponseKind::Accept,
            ResponseKind::Decline,
            ResponseKind::NoResponseReceived,
        ];
        for kind in all {
            assert_eq!(ResponseKind::from_value(kind.value()).unwrap(), kind);
        }
    }
}
