use quick_xml::events::{BytesText, Event};
use quick_xml::Error as QError;

use super::types::*;
use super::xml::{IWrite, QWrite, Writer};

// ==================== Core Types Serialization =============================

/// An element whose whole content is a text node, like
/// `<t:Subject>...</t:Subject>`. Most scalar fields serialize this way.
pub(crate) async fn text_element(
    xml: &mut Writer<impl IWrite>,
    name: &str,
    content: &str,
) -> Result<(), QError> {
    let start = xml.create_types_element(name);
    let end = start.to_end();

    xml.q.write_event_async(Event::Start(start.clone())).await?;
    xml.q
        .write_event_async(Event::Text(BytesText::new(content)))
        .await?;
    xml.q.write_event_async(Event::End(end)).await
}

/// ItemIdType content under any element name (ItemId, ReferenceItemId, ...)
pub(crate) async fn write_item_id(
    xml: &mut Writer<impl IWrite>,
    name: &str,
    id: &ItemId,
) -> Result<(), QError> {
    let mut start = xml.create_types_element(name);
    start.push_attribute(("Id", id.id.as_str()));
    if let Some(ck) = &id.change_key {
        start.push_attribute(("ChangeKey", ck.as_str()));
    }
    xml.q.write_event_async(Event::Empty(start)).await
}

/// FolderIdType content under any element name (FolderId, ParentFolderId, ...)
pub(crate) async fn write_folder_id(
    xml: &mut Writer<impl IWrite>,
    name: &str,
    id: &FolderId,
) -> Result<(), QError> {
    let mut start = xml.create_types_element(name);
    start.push_attribute(("Id", id.id.as_str()));
    if let Some(ck) = &id.change_key {
        start.push_attribute(("ChangeKey", ck.as_str()));
    }
    xml.q.write_event_async(Event::Empty(start)).await
}

impl QWrite for ItemId {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        write_item_id(xml, "ItemId", self).await
    }
}

impl QWrite for FolderId {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        write_folder_id(xml, "FolderId", self).await
    }
}

impl QWrite for DistinguishedFolderId {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let mut start = xml.create_types_element("DistinguishedFolderId");
        start.push_attribute(("Id", self.id.value()));
        if let Some(ck) = &self.change_key {
            start.push_attribute(("ChangeKey", ck.as_str()));
        }

        match &self.mailbox {
            None => xml.q.write_event_async(Event::Empty(start)).await,
            Some(mbx) => {
                let end = start.to_end();
                xml.q.write_event_async(Event::Start(start.clone())).await?;
                mbx.qwrite(xml).await?;
                xml.q.write_event_async(Event::End(end)).await
            }
        }
    }
}

impl QWrite for BaseFolderId {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        match self {
            Self::FolderId(inner) => inner.qwrite(xml).await,
            Self::DistinguishedFolderId(inner) => inner.qwrite(xml).await,
        }
    }
}

impl QWrite for Mailbox {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("Mailbox");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        if let Some(name) = &self.name {
            text_element(xml, "Name", name).await?;
        }
        if let Some(addr) = &self.email_address {
            text_element(xml, "EmailAddress", addr).await?;
        }
        if let Some(routing) = &self.routing_type {
            text_element(xml, "RoutingType", routing).await?;
        }
        if let Some(mt) = &self.mailbox_type {
            text_element(xml, "MailboxType", mt.value()).await?;
        }
        if let Some(iid) = &self.item_id {
            iid.qwrite(xml).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for Body {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let mut start = xml.create_types_element("Body");
        start.push_attribute(("BodyType", self.body_type.value()));
        if let Some(trunc) = &self.is_truncated {
            start.push_attribute(("IsTruncated", bool_str(*trunc)));
        }
        for (k, v) in self.open_attrs.iter() {
            start.push_attribute((k.as_str(), v.as_str()));
        }
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        xml.q
            .write_event_async(Event::Text(BytesText::new(&self.content)))
            .await?;
        xml.q.write_event_async(Event::End(end)).await
    }
}

pub(crate) fn bool_str(v: bool) -> &'static str {
    match v {
        true => "true",
        false => "false",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    async fn item_id() {
        let got = serialize(&ItemId {
            id: "AAMkAGIm".into(),
            change_key: Some("CQAAABYA".into()),
        })
        .await;

        let expected = r#"<t:ItemId xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types" Id="AAMkAGIm" ChangeKey="CQAAABYA"/>"#;

        assert_eq!(&got, expected, "\n---GOT---\n{got}\n---EXP---\n{expected}\n");
    }

    #[tokio::test]
    async fn distinguished_folder_id_with_mailbox() {
        let got = serialize(&DistinguishedFolderId {
            id: DistinguishedFolderIdName::Inbox,
            change_key: None,
            mailbox: Some(Mailbox {
                email_address: Some("user@contoso.com".into()),
                ..Mailbox::default()
            }),
        })
        .await;

        let expected = r#"<t:DistinguishedFolderId xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types" Id="inbox">
    <t:Mailbox>
        <t:EmailAddress>user@contoso.com</t:EmailAddress>
    </t:Mailbox>
</t:DistinguishedFolderId>"#;

        assert_eq!(&got, expected, "\n---GOT---\n{got}\n---EXP---\n{expected}\n");
    }

    #[tokio::test]
    async fn body_with_open_attrs() {
        let got = serialize(&Body {
            body_type: BodyKind::Text,
            is_truncated: Some(false),
            open_attrs: vec![("x:Custom".into(), "kept".into())],
            content: "Hello from EWS".into(),
        })
        .await;

        let expected = r#"<t:Body xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types" BodyType="Text" IsTruncated="false" x:Custom="kept">Hello from EWS</t:Body>"#;

        assert_eq!(&got, expected, "\n---GOT---\n{got}\n---EXP---\n{expected}\n");
    }

    #[tokio::test]
    async fn optional_mailbox_fields_not_emitted() {
        let got = serialize(&Mailbox {
            email_address: Some("user@contoso.com".into()),
            ..Mailbox::default()
        })
        .await;

        let expected = r#"<t:Mailbox xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:EmailAddress>user@contoso.com</t:EmailAddress>
</t:Mailbox>"#;

        assert_eq!(&got, expected, "\n---GOT---\n{got}\n---EXP---\n{expected}\n");
    }
}
