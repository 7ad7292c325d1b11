use chrono::{DateTime, FixedOffset};

use super::itemtypes::RealItem;

/// AttachmentIdType
///
/// <xs:complexType name="AttachmentIdType">
///   <xs:complexContent>
///     <xs:extension base="t:RequestAttachmentIdType">
///       <xs:attribute name="RootItemId" type="xs:string" use="optional"/>
///       <xs:attribute name="RootItemChangeKey" type="xs:string" use="optional"/>
///     </xs:extension>
///   </xs:complexContent>
/// </xs:complexType>
///
/// `Id` comes from the BaseItemIdType ancestor and is required.
#[derive(Debug, PartialEq, Clone)]
pub struct AttachmentId {
    pub id: String,
    pub root_item_id: Option<String>,
    pub root_item_change_key: Option<String>,
}

/// AttachmentType
///
/// Fields shared by both attachment variants, composed into each.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct AttachmentProps {
    pub attachment_id: Option<AttachmentId>,
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub content_id: Option<String>,
    pub content_location: Option<String>,
    pub size: Option<i32>,
    pub last_modified_time: Option<DateTime<FixedOffset>>,
    pub is_inline: Option<bool>,
}

/// The closed AttachmentType pair. The wire element name
/// (ItemAttachment / FileAttachment) tags the variant.
#[derive(Debug, PartialEq, Clone)]
pub enum Attachment {
    Item(ItemAttachment),
    File(FileAttachment),
}

/// ItemAttachmentType
///
/// Carries a whole nested item of any concrete type, so attachments and
/// items are mutually recursive.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ItemAttachment {
    pub props: AttachmentProps,
    pub item: Option<Box<RealItem>>,
}

/// FileAttachmentType
///
/// `Content` is xs:base64Binary on the wire and raw bytes here; the
/// base64 coding happens at the serialization boundary and must be
/// byte-exact through a round-trip.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct FileAttachment {
    pub props: AttachmentProps,
    pub is_contact_photo: Option<bool>,
    pub content: Option<Vec<u8>>,
}
