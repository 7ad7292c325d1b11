use quick_xml::events::Event;

use super::decoder::{maybe_collect_in, maybe_folder_id, maybe_text, parse_bool};
use super::error::ParsingError;
use super::foldertypes::*;
use super::xml::{IRead, QRead, Reader, TYPES_URN};

// ==================== Folder Types Deserialization =========================

/// Try to consume one BaseFolderType child at the current position.
async fn maybe_base_folder_prop(
    xml: &mut Reader<impl IRead>,
    props: &mut BaseFolderProps,
    dirty: &mut bool,
) -> Result<(), ParsingError> {
    xml.maybe_read(&mut props.folder_id, dirty).await?;
    if let Some(pid) = maybe_folder_id(xml, "ParentFolderId").await? {
        props.parent_folder_id = Some(pid);
        *dirty = true;
    }
    if let Some(class) = maybe_text(xml, "FolderClass").await? {
        props.folder_class = Some(class);
        *dirty = true;
    }
    if let Some(name) = maybe_text(xml, "DisplayName").await? {
        props.display_name = Some(name);
        *dirty = true;
    }
    if let Some(total) = maybe_text(xml, "TotalCount").await? {
        props.total_count = Some(total.parse::<i32>()?);
        *dirty = true;
    }
    if let Some(children) = maybe_text(xml, "ChildFolderCount").await? {
        props.child_folder_count = Some(children.parse::<i32>()?);
        *dirty = true;
    }
    Ok(())
}

impl QRead<Folder> for Folder {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        match PlainFolder::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::Folder),
        }
        match CalendarFolder::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::CalendarFolder),
        }
        match ContactsFolder::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::ContactsFolder),
        }
        TasksFolder::qread(xml).await.map(Self::TasksFolder)
    }
}

impl QRead<PlainFolder> for PlainFolder {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "Folder").await?;

        let mut props = BaseFolderProps::default();
        let mut unread_count = None;
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_base_folder_prop(xml, &mut props, &mut dirty).await?;
            if let Some(unread) = maybe_text(xml, "UnreadCount").await? {
                unread_count = Some(unread.parse::<i32>()?);
                dirty = true;
            }

            if !dirty {
                match xml.peek() {
                    Event::End(_) => break,
                    _ => {
                        xml.skip().await?;
                    }
                };
            }
        }

        xml.close().await?;
        Ok(Self {
            props,
            unread_count,
        })
    }
}

impl QRead<CalendarFolder> for CalendarFolder {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "CalendarFolder").await?;

        let mut props = BaseFolderProps::default();
        let mut permission_set = None;
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_base_folder_prop(xml, &mut props, &mut dirty).await?;
            xml.maybe_read(&mut permission_set, &mut dirty).await?;

            if !dirty {
                match xml.peek() {
                    Event::End(_) => break,
                    _ => {
                        xml.skip().await?;
                    }
                };
            }
        }

        xml.close().await?;
        Ok(Self {
            props,
            permission_set,
        })
    }
}

impl QRead<ContactsFolder> for ContactsFolder {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "ContactsFolder").await?;

        let mut props = BaseFolderProps::default();
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_base_folder_prop(xml, &mut props, &mut dirty).await?;

            if !dirty {
                match xml.peek() {
                    Event::End(_) => break,
                    _ => {
                        xml.skip().await?;
                    }
                };
            }
        }

        xml.close().await?;
        Ok(Self { props })
    }
}

impl QRead<TasksFolder> for TasksFolder {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "TasksFolder").await?;

        let mut props = BaseFolderProps::default();
        let mut unread_count = None;
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_base_folder_prop(xml, &mut props, &mut dirty).await?;
            if let Some(unread) = maybe_text(xml, "UnreadCount").await? {
                unread_count = Some(unread.parse::<i32>()?);
                dirty = true;
            }

            if !dirty {
                match xml.peek() {
                    Event::End(_) => break,
                    _ => {
                        xml.skip().await?;
                    }
                };
            }
        }

        xml.close().await?;
        Ok(Self {
            props,
            unread_count,
        })
    }
}

impl QRead<CalendarPermissionSet> for CalendarPermissionSet {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "PermissionSet").await?;

        let mut permissions = None;
        while xml.parent_has_child() {
            if let Some(list) = maybe_collect_in(xml, "CalendarPermissions").await? {
                permissions = Some(list);
            } else {
                match xml.peek() {
                    Event::End(_) => break,
                    _ => {
                        xml.skip().await?;
                    }
                };
            }
        }

        xml.close().await?;
        let permissions = permissions.ok_or(ParsingError::MissingChild)?;
        Ok(Self { permissions })
    }
}

impl QRead<CalendarPermission> for CalendarPermission {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "CalendarPermission").await?;

        let mut user_id = None;
        let (mut can_create_items, mut is_folder_owner, mut is_folder_visible) =
            (None, None, None);
        let (mut edit_items, mut delete_items, mut read_items) = (None, None, None);
        let mut level = None;

        while xml.parent_has_child() {
            let mut dirty = false;

            xml.maybe_read(&mut user_id, &mut dirty).await?;
            if let Some(txt) = maybe_text(xml, "CanCreateItems").await? {
                can_create_items = Some(parse_bool(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "IsFolderOwner").await? {
                is_folder_owner = Some(parse_bool(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "IsFolderVisible").await? {
                is_folder_visible = Some(parse_bool(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "EditItems").await? {
                edit_items = Some(PermissionAction::from_value(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "DeleteItems").await? {
                delete_items = Some(PermissionAction::from_value(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "ReadItems").await? {
                read_items = Some(CalendarPermissionReadAccess::from_value(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "CalendarPermissionLevel").await? {
                level = Some(CalendarPermissionLevel::from_value(&txt)?);
                dirty = true;
            }

            if !dirty {
                match xml.peek() {
                    Event::End(_) => break,
                    _ => {
                        xml.skip().await?;
                    }
                };
            }
        }

        xml.close().await?;
        let calendar_permission_level = level.ok_or(ParsingError::MissingChild)?;
        Ok(Self {
            user_id,
            can_create_items,
            is_folder_owner,
            is_folder_visible,
            edit_items,
            delete_items,
            read_items,
            calendar_permission_level,
        })
    }
}

impl QRead<UserId> for UserId {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "UserId").await?;

        let mut user = UserId::default();
        while xml.parent_has_child() {
            let mut dirty = false;

            if let Some(sid) = maybe_text(xml, "SID").await? {
                user.sid = Some(sid);
                dirty = true;
            }
            if let Some(smtp) = maybe_text(xml, "PrimarySmtpAddress").await? {
                user.primary_smtp_address = Some(smtp);
                dirty = true;
            }
            if let Some(name) = maybe_text(xml, "DisplayName").await? {
                user.display_name = Some(name);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "DistinguishedUser").await? {
                user.distinguished_user = Some(DistinguishedUser::from_value(&txt)?);
                dirty = true;
            }

            if !dirty {
                match xml.peek() {
                    Event::End(_) => break,
                    _ => {
                        xml.skip().await?;
                    }
                };
            }
        }

        xml.close().await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FolderId;
    use crate::xml::{Node, QWrite, Writer};
    use quick_xml::reader::NsReader;
    use tokio::io::AsyncWriteExt;

    async fn deserialize<T: Node<T>>(src: &str) -> T {
        let mut rdr = Reader::new(NsReader::from_reader(src.as_bytes()))
            .await
            .unwrap();
        rdr.find().await.unwrap()
    }

    async fn serialize(elem: &impl QWrite) -> String {
        let mut buffer = Vec::new();
        let mut tokio_buffer = tokio::io::BufWriter::new(&mut buffer);
        let q = quick_xml::writer::Writer::new_with_indent(&mut tokio_buffer, b' ', 4);
        let ns_to_apply = vec![(
            "xmlns:t".into(),
            "http://schemas.microsoft.com/exchange/services/2006/types".into(),
        )];
        let mut writer = Writer { q, ns_to_apply };

        elem.qwrite(&mut writer).await.expect("xml serialization");
        tokio_buffer.flush().await.expect("tokio buffer flush");
        let got = std::str::from_utf8(buffer.as_slice()).unwrap();

        return got.into();
    }

    #[tokio::test]
    async fn calendar_folder_with_permissions() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:CalendarFolder xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:FolderId Id="AQMkAD" ChangeKey="AQAAABY"/>
    <t:DisplayName>Calendar</t:DisplayName>
    <t:PermissionSet>
        <t:CalendarPermissions>
            <t:CalendarPermission>
                <t:UserId>
                    <t:DistinguishedUser>Default</t:DistinguishedUser>
                </t:UserId>
                <t:ReadItems>FullDetails</t:ReadItems>
                <t:CalendarPermissionLevel>Editor</t:CalendarPermissionLevel>
            </t:CalendarPermission>
            <t:CalendarPermission>
                <t:UserId>
                    <t:PrimarySmtpAddress>colleague@contoso.com</t:PrimarySmtpAddress>
                </t:UserId>
                <t:CalendarPermissionLevel>NoneditingAuthor</t:CalendarPermissionLevel>
            </t:CalendarPermission>
        </t:CalendarPermissions>
    </t:PermissionSet>
</t:CalendarFolder>
"#;
        let got = deserialize::<Folder>(src).await;
        assert_eq!(
            got,
            Folder::CalendarFolder(CalendarFolder {
                props: BaseFolderProps {
                    folder_id: Some(FolderId {
                        id: "AQMkAD".into(),
                        change_key: Some("AQAAABY".into()),
                    }),
                    display_name: Some("Calendar".into()),
                    ..BaseFolderProps::default()
                },
                permission_set: Some(CalendarPermissionSet {
                    permissions: vec![
                        CalendarPermission {
                            user_id: Some(UserId {
                                distinguished_user: Some(DistinguishedUser::Default),
                                ..UserId::default()
                            }),
                            can_create_items: None,
                            is_folder_owner: None,
                            is_folder_visible: None,
                            edit_items: None,
                            delete_items: None,
                            read_items: Some(CalendarPermissionReadAccess::FullDetails),
                            calendar_permission_level: CalendarPermissionLevel::Editor,
                        },
                        CalendarPermission {
                            user_id: Some(UserId {
                                primary_smtp_address: Some("colleague@contoso.com".into()),
                                ..UserId::default()
                            }),
                            can_create_items: None,
                            is_folder_owner: None,
                            is_folder_visible: None,
                            edit_items: None,
                            delete_items: None,
                            read_items: None,
                            calendar_permission_level:
                                CalendarPermissionLevel::NoneditingAuthor,
                        },
                    ],
                }),
            })
        );
    }

    #[tokio::test]
    async fn permission_without_level_is_rejected() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:CalendarPermission xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:CanCreateItems>true</t:CanCreateItems>
</t:CalendarPermission>
"#;
        let mut rdr = Reader::new(NsReader::from_reader(src.as_bytes()))
            .await
            .unwrap();
        let got = rdr.find::<CalendarPermission>().await;
        assert!(matches!(got, Err(ParsingError::MissingChild)));
    }

    #[tokio::test]
    async fn bogus_permission_level_surfaces_the_literal() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:CalendarPermission xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:CalendarPermissionLevel>Bogus</t:CalendarPermissionLevel>
</t:CalendarPermission>
"#;
        let mut rdr = Reader::new(NsReader::from_reader(src.as_bytes()))
            .await
            .unwrap();
        let got = rdr.find::<CalendarPermission>().await;
        assert!(matches!(
            got,
            Err(ParsingError::InvalidEnumValue(s)) if s == "Bogus"
        ));
    }

    #[tokio::test]
    async fn folder_round_trip() {
        let folder = Folder::TasksFolder(TasksFolder {
            props: BaseFolderProps {
                folder_id: Some(FolderId {
                    id: "AQMkAF".into(),
                    change_key: None,
                }),
                display_name: Some("Tasks".into()),
                total_count: Some(3),
                ..BaseFolderProps::default()
            },
            unread_count: Some(1),
        });

        let xml = serialize(&folder).await;
        let got = deserialize::<Folder>(&xml).await;
        assert_eq!(got, folder);
    }
}
