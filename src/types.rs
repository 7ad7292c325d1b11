use super::error::ParsingError;

/// ItemIdType
///
/// Identifies a specific item in the Exchange store, with an optional
/// change key pinning a specific version of it.
///
/// <xs:complexType name="ItemIdType">
///   <xs:complexContent>
///     <xs:extension base="t:BaseItemIdType">
///       <xs:attribute name="Id" type="xs:string" use="required"/>
///       <xs:attribute name="ChangeKey" type="xs:string" use="optional"/>
///     </xs:extension>
///   </xs:complexContent>
/// </xs:complexType>
#[derive(Debug, PartialEq, Clone)]
pub struct ItemId {
    pub id: String,
    pub change_key: Option<String>,
}

/// FolderIdType
///
/// Same shape as ItemIdType, but identifies a folder. Several elements
/// carry this content model under other names (ParentFolderId, ...).
///
/// <xs:complexType name="FolderIdType">
///   <xs:complexContent>
///     <xs:extension base="t:BaseFolderIdType">
///       <xs:attribute name="Id" type="xs:string" use="required"/>
///       <xs:attribute name="ChangeKey" type="xs:string" use="optional"/>
///     </xs:extension>
///   </xs:complexContent>
/// </xs:complexType>
#[derive(Debug, PartialEq, Clone)]
pub struct FolderId {
    pub id: String,
    pub change_key: Option<String>,
}

/// DistinguishedFolderIdType
///
/// Addresses one of the well-known folders of a mailbox by symbolic name
/// instead of an opaque store identifier.
///
/// <xs:complexType name="DistinguishedFolderIdType">
///   <xs:complexContent>
///     <xs:extension base="t:BaseFolderIdType">
///       <xs:sequence>
///         <xs:element name="Mailbox" type="t:EmailAddressType" minOccurs="0"/>
///       </xs:sequence>
///       <xs:attribute name="Id" type="t:DistinguishedFolderIdNameType" use="required"/>
///       <xs:attribute name="ChangeKey" type="xs:string" use="optional"/>
///     </xs:extension>
///   </xs:complexContent>
/// </xs:complexType>
///
/// The required `Id` attribute is a non-optional field: a value without it
/// cannot be constructed, so serialization never has to decide what to do
/// with a missing required attribute.
#[derive(Debug, PartialEq, Clone)]
pub struct DistinguishedFolderId {
    pub id: DistinguishedFolderIdName,
    pub change_key: Option<String>,
    pub mailbox: Option<Mailbox>,
}

/// DistinguishedFolderIdNameType
///
/// The closed set of well-known folder names. Wire literals are lowercase
/// and differ from the Rust variant spelling.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum DistinguishedFolderIdName {
    Calendar,
    Contacts,
    DeletedItems,
    Drafts,
    Inbox,
    Journal,
    Notes,
    Outbox,
    SentItems,
    Tasks,
    MsgFolderRoot,
    Root,
    JunkEmail,
    SearchFolders,
    VoiceMail,
    ArchiveInbox,
}

impl DistinguishedFolderIdName {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Contacts => "contacts",
            Self::DeletedItems => "deleteditems",
            Self::Drafts => "drafts",
            Self::Inbox => "inbox",
            Self::Journal => "journal",
            Self::Notes => "notes",
            Self::Outbox => "outbox",
            Self::SentItems => "sentitems",
            Self::Tasks => "tasks",
            Self::MsgFolderRoot => "msgfolderroot",
            Self::Root => "root",
            Self::JunkEmail => "junkemail",
            Self::SearchFolders => "searchfolders",
            Self::VoiceMail => "voicemail",
            Self::ArchiveInbox => "archiveinbox",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "calendar" => Ok(Self::Calendar),
            "contacts" => Ok(Self::Contacts),
            "deleteditems" => Ok(Self::DeletedItems),
            "drafts" => Ok(Self::Drafts),
            "inbox" => Ok(Self::Inbox),
            "journal" => Ok(Self::Journal),
            "notes" => Ok(Self::Notes),
            "outbox" => Ok(Self::Outbox),
            "sentitems" => Ok(Self::SentItems),
            "tasks" => Ok(Self::Tasks),
            "msgfolderroot" => Ok(Self::MsgFolderRoot),
            "root" => Ok(Self::Root),
            "junkemail" => Ok(Self::JunkEmail),
            "searchfolders" => Ok(Self::SearchFolders),
            "voicemail" => Ok(Self::VoiceMail),
            "archiveinbox" => Ok(Self::ArchiveInbox),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// BaseFolderIdType
///
/// Abstract base standing for either a store folder identifier or a
/// well-known folder name. The wire element name tags the alternative.
#[derive(Debug, PartialEq, Clone)]
pub enum BaseFolderId {
    FolderId(FolderId),
    DistinguishedFolderId(DistinguishedFolderId),
}

/// EmailAddressType (the `Mailbox` element)
///
/// <xs:complexType name="EmailAddressType">
///   <xs:complexContent>
///     <xs:extension base="t:BaseEmailAddressType">
///       <xs:sequence>
///         <xs:element name="Name" type="xs:string" minOccurs="0"/>
///         <xs:element name="EmailAddress" type="t:NonEmptyStringType" minOccurs="0"/>
///         <xs:element name="RoutingType" type="t:NonEmptyStringType" minOccurs="0"/>
///         <xs:element name="MailboxType" type="t:MailboxTypeType" minOccurs="0"/>
///         <xs:element name="ItemId" type="t:ItemIdType" minOccurs="0"/>
///       </xs:sequence>
///     </xs:extension>
///   </xs:complexContent>
/// </xs:complexType>
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Mailbox {
    pub name: Option<String>,
    pub email_address: Option<String>,
    pub routing_type: Option<String>,
    pub mailbox_type: Option<MailboxType>,
    pub item_id: Option<ItemId>,
}

/// MailboxTypeType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum MailboxType {
    Mailbox,
    PublicDL,
    PrivateDL,
    Contact,
    PublicFolder,
    Unknown,
    OneOff,
    GroupMailbox,
}

impl MailboxType {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Mailbox => "Mailbox",
            Self::PublicDL => "PublicDL",
            Self::PrivateDL => "PrivateDL",
            Self::Contact => "Contact",
            Self::PublicFolder => "PublicFolder",
            Self::Unknown => "Unknown",
            Self::OneOff => "OneOff",
            Self::GroupMailbox => "GroupMailbox",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Mailbox" => Ok(Self::Mailbox),
            "PublicDL" => Ok(Self::PublicDL),
            "PrivateDL" => Ok(Self::PrivateDL),
            "Contact" => Ok(Self::Contact),
            "PublicFolder" => Ok(Self::PublicFolder),
            "Unknown" => Ok(Self::Unknown),
            "OneOff" => Ok(Self::OneOff),
            "GroupMailbox" => Ok(Self::GroupMailbox),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// BodyType
///
/// A message body: text content plus a required `BodyType` attribute and
/// an optional `IsTruncated` attribute. The schema allows foreign
/// attributes here (`xs:anyAttribute`), which are kept verbatim in
/// `open_attrs` so they survive a round-trip.
#[derive(Debug, PartialEq, Clone)]
pub struct Body {
    pub body_type: BodyKind,
    pub is_truncated: Option<bool>,
    pub open_attrs: Vec<(String, String)>,
    pub content: String,
}

/// BodyTypeType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BodyKind {
    Html,
    Text,
    Best,
}

impl BodyKind {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Text => "Text",
            Self::Best => "Best",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "HTML" => Ok(Self::Html),
            "Text" => Ok(Self::Text),
            "Best" => Ok(Self::Best),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinguished_folder_name_bijection() {
        let all = [
            DistinguishedFolderIdName::Calendar,
            DistinguishedFolderIdName::Contacts,
            DistinguishedFolderIdName::DeletedItems,
            DistinguishedFolderIdName::Drafts,
            DistinguishedFolderIdName::Inbox,
            DistinguishedFolderIdName::Journal,
            DistinguishedFolderIdName::Notes,
            DistinguishedFolderIdName::Outbox,
            DistinguishedFolderIdName::SentItems,
            DistinguishedFolderIdName::Tasks,
            DistinguishedFolderIdName::MsgFolderRoot,
            DistinguishedFolderIdName::Root,
            DistinguishedFolderIdName::JunkEmail,
            DistinguishedFolderIdName::SearchFolders,
            DistinguishedFolderIdName::VoiceMail,
            DistinguishedFolderIdName::ArchiveInbox,
        ];
        for name in all {
            assert_eq!(
                DistinguishedFolderIdName::from_value(name.value()).unwrap(),
                name
            );
        }
    }

    #[test]
    fn distinguished_folder_name_is_case_sensitive() {
        assert!(matches!(
            DistinguishedFolderIdName::from_value("Inbox"),
            Err(ParsingError::InvalidEnumValue(s)) if s == "Inbox"
        ));
    }

    #[test]
    fn body_kind_wire_literal_differs_from_variant() {
        assert_eq!(BodyKind::Html.value(), "HTML");
        assert_eq!(BodyKind::from_value("HTML").unwrap(), BodyKind::Html);
        assert!(matches!(
            BodyKind::from_value("html"),
            Err(ParsingError::InvalidEnumValue(_))
        ));
    }
}
