use super::error::ParsingError;
use super::types::FolderId;

/// BaseFolderType
///
/// Fields shared by every concrete folder record. The schema expresses
/// this through single inheritance; here the shared fields are one struct
/// composed into each variant, and the closed subtype list becomes the
/// [`Folder`] sum type.
///
/// <xs:complexType name="BaseFolderType" abstract="true">
///   <xs:sequence>
///     <xs:element name="FolderId" type="t:FolderIdType" minOccurs="0"/>
///     <xs:element name="ParentFolderId" type="t:FolderIdType" minOccurs="0"/>
///     <xs:element name="FolderClass" type="xs:string" minOccurs="0"/>
///     <xs:element name="DisplayName" type="xs:string" minOccurs="0"/>
///     <xs:element name="TotalCount" type="xs:int" minOccurs="0"/>
///     <xs:element name="ChildFolderCount" type="xs:int" minOccurs="0"/>
///     ...
///   </xs:sequence>
/// </xs:complexType>
#[derive(Debug, PartialEq, Clone, Default)]
pub struct BaseFolderProps {
    pub folder_id: Option<FolderId>,
    pub parent_folder_id: Option<FolderId>,
    pub folder_class: Option<String>,
    pub display_name: Option<String>,
    pub total_count: Option<i32>,
    pub child_folder_count: Option<i32>,
}

/// The closed substitution group rooted at BaseFolderType. The wire
/// element name (Folder, CalendarFolder, ...) tags the variant, so a
/// heterogeneous folder list round-trips with each concrete type intact.
#[derive(Debug, PartialEq, Clone)]
pub enum Folder {
    Folder(PlainFolder),
    CalendarFolder(CalendarFolder),
    ContactsFolder(ContactsFolder),
    TasksFolder(TasksFolder),
}

/// FolderType (the generic mail folder)
#[derive(Debug, PartialEq, Clone)]
pub struct PlainFolder {
    pub props: BaseFolderProps,
    pub unread_count: Option<i32>,
}

/// CalendarFolderType
#[derive(Debug, PartialEq, Clone)]
pub struct CalendarFolder {
    pub props: BaseFolderProps,
    pub permission_set: Option<CalendarPermissionSet>,
}

/// ContactsFolderType
#[derive(Debug, PartialEq, Clone)]
pub struct ContactsFolder {
    pub props: BaseFolderProps,
}

/// TasksFolderType
#[derive(Debug, PartialEq, Clone)]
pub struct TasksFolder {
    pub props: BaseFolderProps,
    pub unread_count: Option<i32>,
}

/// CalendarPermissionSetType
///
/// <xs:complexType name="CalendarPermissionSetType">
///   <xs:sequence>
///     <xs:element name="CalendarPermissions" type="t:ArrayOfCalendarPermissionsType"/>
///   </xs:sequence>
/// </xs:complexType>
#[derive(Debug, PartialEq, Clone)]
pub struct CalendarPermissionSet {
    pub permissions: Vec<CalendarPermission>,
}

/// CalendarPermissionType
///
/// The permission level is the only required child; every other child is
/// optional and absent means "not specified", not a default.
#[derive(Debug, PartialEq, Clone)]
pub struct CalendarPermission {
    pub user_id: Option<UserId>,
    pub can_create_items: Option<bool>,
    pub is_folder_owner: Option<bool>,
    pub is_folder_visible: Option<bool>,
    pub edit_items: Option<PermissionAction>,
    pub delete_items: Option<PermissionAction>,
    pub read_items: Option<CalendarPermissionReadAccess>,
    pub calendar_permission_level: CalendarPermissionLevel,
}

/// UserIdType
#[derive(Debug, PartialEq, Clone, Default)]
pub struct UserId {
    pub sid: Option<String>,
    pub primary_smtp_address: Option<String>,
    pub display_name: Option<String>,
    pub distinguished_user: Option<DistinguishedUser>,
}

/// CalendarPermissionLevelType
///
/// <xs:simpleType name="CalendarPermissionLevelType">
///   <xs:restriction base="xs:string">
///     <xs:enumeration value="None"/>
///     <xs:enumeration value="Owner"/>
///     <xs:enumeration value="PublishingEditor"/>
///     <xs:enumeration value="Editor"/>
///     <xs:enumeration value="PublishingAuthor"/>
///     <xs:enumeration value="Author"/>
///     <xs:enumeration value="NoneditingAuthor"/>
///     <xs:enumeration value="Reviewer"/>
///     <xs:enumeration value="Contributor"/>
///     <xs:enumeration value="FreeBusyTimeOnly"/>
///     <xs:enumeration value="FreeBusyTimeAndSubjectAndLocation"/>
///     <xs:enumeration value="Custom"/>
///   </xs:restriction>
/// </xs:simpleType>
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CalendarPermissionLevel {
    None,
    Owner,
    PublishingEditor,
    Editor,
    PublishingAuthor,
    Author,
    NoneditingAuthor,
    Reviewer,
    Contributor,
    FreeBusyTimeOnly,
    FreeBusyTimeAndSubjectAndLocation,
    Custom,
}

impl CalendarPermissionLevel {
    pub fn value(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Owner => "Owner",
            Self::PublishingEditor => "PublishingEditor",
            Self::Editor => "Editor",
            Self::PublishingAuthor => "PublishingAuthor",
            Self::Author => "Author",
            Self::NoneditingAuthor => "NoneditingAuthor",
            Self::Reviewer => "Reviewer",
            Self::Contributor => "Contributor",
            Self::FreeBusyTimeOnly => "FreeBusyTimeOnly",
            Self::FreeBusyTimeAndSubjectAndLocation => "FreeBusyTimeAndSubjectAndLocation",
            Self::Custom => "Custom",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "None" => Ok(Self::None),
            "Owner" => Ok(Self::Owner),
            "PublishingEditor" => Ok(Self::PublishingEditor),
            "Editor" => Ok(Self::Editor),
            "PublishingAuthor" => Ok(Self::PublishingAuthor),
            "Author" => Ok(Self::Author),
            "NoneditingAuthor" => Ok(Self::NoneditingAuthor),
            "Reviewer" => Ok(Self::Reviewer),
            "Contributor" => Ok(Self::Contributor),
            "FreeBusyTimeOnly" => Ok(Self::FreeBusyTimeOnly),
            "FreeBusyTimeAndSubjectAndLocation" => Ok(Self::FreeBusyTimeAndSubjectAndLocation),
            "Custom" => Ok(Self::Custom),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// CalendarPermissionReadAccessType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CalendarPermissionReadAccess {
    None,
    TimeOnly,
    TimeAndSubjectAndLocation,
    FullDetails,
}

impl CalendarPermissionReadAccess {
    pub fn value(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::TimeOnly => "TimeOnly",
            Self::TimeAndSubjectAndLocation => "TimeAndSubjectAndLocation",
            Self::FullDetails => "FullDetails",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "None" => Ok(Self::None),
            "TimeOnly" => Ok(Self::TimeOnly),
            "TimeAndSubjectAndLocation" => Ok(Self::TimeAndSubjectAndLocation),
            "FullDetails" => Ok(Self::FullDetails),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// PermissionActionType (EditItems / DeleteItems)
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PermissionAction {
    None,
    Owned,
    All,
}

impl PermissionAction {
    pub fn value(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Owned => "Owned",
            Self::All => "All",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "None" => Ok(Self::None),
            "Owned" => Ok(Self::Owned),
            "All" => Ok(Self::All),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

/// DistinguishedUserType
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum DistinguishedUser {
    Default,
    Anonymous,
}

impl DistinguishedUser {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Anonymous => "Anonymous",
        }
    }

    pub fn from_value(s: &str) -> Result<Self, ParsingError> {
        match s {
            "Default" => Ok(Self::Default),
            "Anonymous" => Ok(Self::Anonymous),
            _ => Err(ParsingError::InvalidEnumValue(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_permission_level_bijection() {
        let all = [
            (CalendarPermissionLevel::None, "None"),
            (CalendarPermissionLevel::Owner, "Owner"),
            (CalendarPermissionLevel::PublishingEditor, "PublishingEditor"),
            (CalendarPermissionLevel::Editor, "Editor"),
            (CalendarPermissionLevel::PublishingAuthor, "PublishingAuthor"),
            (CalendarPermissionLevel::Author, "Author"),
            (CalendarPermissionLevel::NoneditingAuthor, "NoneditingAuthor"),
            (CalendarPermissionLevel::Reviewer, "Reviewer"),
            (CalendarPermissionLevel::Contributor, "Contributor"),
            (CalendarPermissionLevel::FreeBusyTimeOnly, "FreeBusyTimeOnly"),
            (
                CalendarPermissionLevel::FreeBusyTimeAndSubjectAndLocation,
                "FreeBusyTimeAndSubjectAndLocation",
            ),
            (CalendarPermissionLevel::Custom, "Custom"),
        ];
        for (level, literal) in all {
            assert_eq!(level.value(), literal);
            assert_eq!(CalendarPermissionLevel::from_value(literal).unwrap(), level);
        }
    }

    #[test]
    fn nonediting_author_literal() {
        assert_eq!(
            CalendarPermissionLevel::from_value("NoneditingAuthor").unwrap(),
            CalendarPermissionLevel::NoneditingAuthor
        );
    }

    #[test]
    fn bogus_permission_level_is_rejected() {
        assert!(matches!(
            CalendarPermissionLevel::from_value("Bogus"),
            Err(ParsingError::InvalidEnumValue(s)) if s == "Bogus"
        ));
    }
}
