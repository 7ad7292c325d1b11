use quick_xml::events::Event;
use quick_xml::Error as QError;

use super::encoder::{bool_str, text_element, write_folder_id};
use super::foldertypes::*;
use super::xml::{IWrite, QWrite, Writer};

// ==================== Folder Types Serialization ===========================

async fn write_base_folder_props(
    xml: &mut Writer<impl IWrite>,
    props: &BaseFolderProps,
) -> Result<(), QError> {
    if let Some(fid) = &props.folder_id {
        fid.qwrite(xml).await?;
    }
    if let Some(pid) = &props.parent_folder_id {
        write_folder_id(xml, "ParentFolderId", pid).await?;
    }
    if let Some(class) = &props.folder_class {
        text_element(xml, "FolderClass", class).await?;
    }
    if let Some(name) = &props.display_name {
        text_element(xml, "DisplayName", name).await?;
    }
    if let Some(total) = &props.total_count {
        text_element(xml, "TotalCount", &total.to_string()).await?;
    }
    if let Some(children) = &props.child_folder_count {
        text_element(xml, "ChildFolderCount", &children.to_string()).await?;
    }
    Ok(())
}

impl QWrite for Folder {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        match self {
            Self::Folder(inner) => inner.qwrite(xml).await,
            Self::CalendarFolder(inner) => inner.qwrite(xml).await,
            Self::ContactsFolder(inner) => inner.qwrite(xml).await,
            Self::TasksFolder(inner) => inner.qwrite(xml).await,
        }
    }
}

impl QWrite for PlainFolder {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("Folder");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_base_folder_props(xml, &self.props).await?;
        if let Some(unread) = &self.unread_count {
            text_element(xml, "UnreadCount", &unread.to_string()).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for CalendarFolder {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("CalendarFolder");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_base_folder_props(xml, &self.props).await?;
        if let Some(permissions) = &self.permission_set {
            permissions.qwrite(xml).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for ContactsFolder {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("ContactsFolder");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_base_folder_props(xml, &self.props).await?;
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for TasksFolder {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("TasksFolder");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_base_folder_props(xml, &self.props).await?;
        if let Some(unread) = &self.unread_count {
            text_element(xml, "UnreadCount", &unread.to_string()).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for CalendarPermissionSet {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("PermissionSet");
        let end = start.to_end();
        let list_start = xml.create_types_element("CalendarPermissions");
        let list_end = list_start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        xml.q
            .write_event_async(Event::Start(list_start.clone()))
            .await?;
        for permission in self.permissions.iter() {
            permission.qwrite(xml).await?;
        }
        xml.q.write_event_async(Event::End(list_end)).await?;
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for CalendarPermission {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("CalendarPermission");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        if let Some(user) = &self.user_id {
            user.qwrite(xml).await?;
        }
        if let Some(create) = &self.can_create_items {
            text_element(xml, "CanCreateItems", bool_str(*create)).await?;
        }
        if let Some(owner) = &self.is_folder_owner {
            text_element(xml, "IsFolderOwner", bool_str(*owner)).await?;
        }
        if let Some(visible) = &self.is_folder_visible {
            text_element(xml, "IsFolderVisible", bool_str(*visible)).await?;
        }
        if let Some(edit) = &self.edit_items {
            text_element(xml, "EditItems", edit.value()).await?;
        }
        if let Some(delete) = &self.delete_items {
            text_element(xml, "DeleteItems", delete.value()).await?;
        }
        if let Some(read) = &self.read_items {
            text_element(xml, "ReadItems", read.value()).await?;
        }
        text_element(
            xml,
            "CalendarPermissionLevel",
            self.calendar_permission_level.value(),
        )
        .await?;
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for UserId {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("UserId");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        if let Some(sid) = &self.sid {
            text_element(xml, "SID", sid).await?;
        }
        if let Some(smtp) = &self.primary_smtp_address {
            text_element(xml, "PrimarySmtpAddress", smtp).await?;
        }
        if let Some(name) = &self.display_name {
            text_element(xml, "DisplayName", name).await?;
        }
        if let Some(distinguished) = &self.distinguished_user {
            text_element(xml, "DistinguishedUser", distinguished.value()).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FolderId;
    use crate::xml::Writer;
    use tokio::io::AsyncWriteExt;

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
        let got = serialize(&Folder::CalendarFolder(CalendarFolder {
            props: BaseFolderProps {
                folder_id: Some(FolderId {
                    id: "AQMkAD".into(),
                    change_key: None,
                }),
                display_name: Some("Calendar".into()),
                total_count: Some(14),
                ..BaseFolderProps::default()
            },
            permission_set: Some(CalendarPermissionSet {
                permissions: vec![CalendarPermission {
                    user_id: Some(UserId {
                        primary_smtp_address: Some("colleague@contoso.com".into()),
                        ..UserId::default()
                    }),
                    can_create_items: Some(true),
                    is_folder_owner: None,
                    is_folder_visible: Some(true),
                    edit_items: Some(PermissionAction::Owned),
                    delete_items: None,
                    read_items: Some(CalendarPermissionReadAccess::TimeOnly),
                    calendar_permission_level: CalendarPermissionLevel::NoneditingAuthor,
                }],
            }),
        }))
        .await;

        let expected = r#"<t:CalendarFolder xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:FolderId Id="AQMkAD"/>
    <t:DisplayName>Calendar</t:DisplayName>
    <t:TotalCount>14</t:TotalCount>
    <t:PermissionSet>
        <t:CalendarPermissions>
            <t:CalendarPermission>
                <t:UserId>
                    <t:PrimarySmtpAddress>colleague@contoso.com</t:PrimarySmtpAddress>
                </t:UserId>
                <t:CanCreateItems>true</t:CanCreateItems>
                <t:IsFolderVisible>true</t:IsFolderVisible>
                <t:EditItems>Owned</t:EditItems>
                <t:ReadItems>TimeOnly</t:ReadItems>
                <t:CalendarPermissionLevel>NoneditingAuthor</t:CalendarPermissionLevel>
            </t:CalendarPermission>
        </t:CalendarPermissions>
    </t:PermissionSet>
</t:CalendarFolder>"#;

        assert_eq!(&got, expected, "\n---GOT---\n{got}\n---EXP---\n{expected}\n");
    }

    #[tokio::test]
    async fn plain_folder() {
        let got = serialize(&PlainFolder {
            props: BaseFolderProps {
                folder_id: Some(FolderId {
                    id: "AQMkAE".into(),
                    change_key: Some("AQAAABY".into()),
                }),
                folder_class: Some("IPF.Note".into()),
                display_name: Some("Inbox".into()),
                child_folder_count: Some(2),
                ..BaseFolderProps::default()
            },
            unread_count: Some(4),
        })
        .await;

        let expected = r#"<t:Folder xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:FolderId Id="AQMkAE" ChangeKey="AQAAABY"/>
    <t:FolderClass>IPF.Note</t:FolderClass>
    <t:DisplayName>Inbox</t:DisplayName>
    <t:ChildFolderCount>2</t:ChildFolderCount>
    <t:UnreadCount>4</t:UnreadCount>
</t:Folder>"#;

        assert_eq!(&got, expected, "\n---GOT---\n{got}\n---EXP---\n{expected}\n");
    }
}
