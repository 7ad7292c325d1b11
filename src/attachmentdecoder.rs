use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use quick_xml::events::Event;

use super::attachmenttypes::*;
use super::decoder::{maybe_text, parse_bool, parse_datetime};
use super::error::ParsingError;
use super::itemtypes::RealItem;
use super::xml::{IRead, QRead, Reader, TYPES_URN};

// ==================== Attachment Types Deserialization =====================

impl QRead<AttachmentId> for AttachmentId {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "AttachmentId").await?;
        let id = xml.prev_attr("Id").ok_or(ParsingError::MissingAttribute)?;
        let root_item_id = xml.prev_attr("RootItemId");
        let root_item_change_key = xml.prev_attr("RootItemChangeKey");
        xml.close().await?;
        Ok(Self {
            id,
            root_item_id,
            root_item_change_key,
        })
    }
}

/// Try to consume one AttachmentType child at the current position.
async fn maybe_attachment_prop(
    xml: &mut Reader<impl IRead>,
    props: &mut AttachmentProps,
    dirty: &mut bool,
) -> Result<(), ParsingError> {
    xml.maybe_read(&mut props.attachment_id, dirty).await?;
    if let Some(name) = maybe_text(xml, "Name").await? {
        props.name = Some(name);
        *dirty = true;
    }
    if let Some(ctype) = maybe_text(xml, "ContentType").await? {
        props.content_type = Some(ctype);
        *dirty = true;
    }
    if let Some(cid) = maybe_text(xml, "ContentId").await? {
        props.content_id = Some(cid);
        *dirty = true;
    }
    if let Some(loc) = maybe_text(xml, "ContentLocation").await? {
        props.content_location = Some(loc);
        *dirty = true;
    }
    if let Some(txt) = maybe_text(xml, "Size").await? {
        props.size = Some(txt.parse::<i32>()?);
        *dirty = true;
    }
    if let Some(txt) = maybe_text(xml, "LastModifiedTime").await? {
        props.last_modified_time = Some(parse_datetime(&txt)?);
        *dirty = true;
    }
    if let Some(txt) = maybe_text(xml, "IsInline").await? {
        props.is_inline = Some(parse_bool(&txt)?);
        *dirty = true;
    }
    Ok(())
}

/// See the serialization side: boxing breaks the item/attachment
/// future cycle. The reader side is not Send, hence the local box.
fn read_nested_item<R: IRead>(
    xml: &mut Reader<R>,
) -> LocalBoxFuture<'_, Result<RealItem, ParsingError>> {
    RealItem::qread(xml).boxed_local()
}

impl QRead<ItemAttachment> for ItemAttachment {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "ItemAttachment").await?;

        let mut att = ItemAttachment::default();
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_attachment_prop(xml, &mut att.props, &mut dirty).await?;
            match read_nested_item(xml).await {
                Ok(item) => {
                    att.item = Some(Box::new(item));
                    dirty = true;
                }
                Err(ParsingError::Recoverable) => (),
                Err(e) => return Err(e),
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
        Ok(att)
    }
}

impl QRead<FileAttachment> for FileAttachment {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "FileAttachment").await?;

        let mut att = FileAttachment::default();
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_attachment_prop(xml, &mut att.props, &mut dirty).await?;
            if let Some(txt) = maybe_text(xml, "IsContactPhoto").await? {
                att.is_contact_photo = Some(parse_bool(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "Content").await? {
                att.content = Some(BASE64.decode(txt.as_bytes())?);
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
        Ok(att)
    }
}

impl QRead<Attachment> for Attachment {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        match ItemAttachment::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::Item),
        }
        FileAttachment::qread(xml).await.map(Self::File)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itemtypes::{ItemProps, Message};
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
    async fn file_attachment_bytes_survive_round_trip() {
        let original = FileAttachment {
            props: AttachmentProps {
                name: Some("blob.bin".into()),
                content_type: Some("application/octet-stream".into()),
                size: Some(4),
                ..AttachmentProps::default()
            },
            is_contact_photo: None,
            content: Some(vec![0x00, 0xff, 0x10, 0x7f]),
        };

        let xml = serialize(&original).await;
        let got = deserialize::<FileAttachment>(&xml).await;
        assert_eq!(got, original);
    }

    #[tokio::test]
    async fn item_attachment_with_nested_message() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:ItemAttachment xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:AttachmentId Id="AAMkAGIm/Att2"/>
    <t:Name>Forwarded mail</t:Name>
    <t:Message>
        <t:Subject>Original</t:Subject>
        <t:IsRead>true</t:IsRead>
    </t:Message>
</t:ItemAttachment>
"#;
        let got = deserialize::<Attachment>(src).await;
        assert_eq!(
            got,
            Attachment::Item(ItemAttachment {
                props: AttachmentProps {
                    attachment_id: Some(AttachmentId {
                        id: "AAMkAGIm/Att2".into(),
                        root_item_id: None,
                        root_item_change_key: None,
                    }),
                    name: Some("Forwarded mail".into()),
                    ..AttachmentProps::default()
                },
                item: Some(Box::new(RealItem::Message(Message {
                    props: ItemProps {
                        subject: Some("Original".into()),
                        ..ItemProps::default()
                    },
                    is_read: Some(true),
                    ..Message::default()
                }))),
            })
        );
    }

    #[tokio::test]
    async fn corrupted_base64_content_is_rejected() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:FileAttachment xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:Content>not&amp;base64!</t:Content>
</t:FileAttachment>
"#;
        let mut rdr = Reader::new(NsReader::from_reader(src.as_bytes()))
            .await
            .unwrap();
        let got = rdr.find::<FileAttachment>().await;
        assert!(matches!(got, Err(ParsingError::Base64(_))));
    }
}
