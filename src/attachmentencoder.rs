use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::future::BoxFuture;
use futures::FutureExt;
use quick_xml::events::Event;
use quick_xml::Error as QError;

use super::attachmenttypes::*;
use super::encoder::{bool_str, text_element};
use super::itemtypes::RealItem;
use super::xml::{IWrite, QWrite, Writer};

// ==================== Attachment Types Serialization =======================

impl QWrite for AttachmentId {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let mut start = xml.create_types_element("AttachmentId");
        start.push_attribute(("Id", self.id.as_str()));
        if let Some(root) = &self.root_item_id {
            start.push_attribute(("RootItemId", root.as_str()));
        }
        if let Some(ck) = &self.root_item_change_key {
            start.push_attribute(("RootItemChangeKey", ck.as_str()));
        }
        xml.q.write_event_async(Event::Empty(start)).await
    }
}

async fn write_attachment_props(
    xml: &mut Writer<impl IWrite>,
    props: &AttachmentProps,
) -> Result<(), QError> {
    if let Some(aid) = &props.attachment_id {
        aid.qwrite(xml).await?;
    }
    if let Some(name) = &props.name {
        text_element(xml, "Name", name).await?;
    }
    if let Some(ctype) = &props.content_type {
        text_element(xml, "ContentType", ctype).await?;
    }
    if let Some(cid) = &props.content_id {
        text_element(xml, "ContentId", cid).await?;
    }
    if let Some(loc) = &props.content_location {
        text_element(xml, "ContentLocation", loc).await?;
    }
    if let Some(size) = &props.size {
        text_element(xml, "Size", &size.to_string()).await?;
    }
    if let Some(at) = &props.last_modified_time {
        text_element(xml, "LastModifiedTime", &at.to_rfc3339()).await?;
    }
    if let Some(inline) = &props.is_inline {
        text_element(xml, "IsInline", bool_str(*inline)).await?;
    }
    Ok(())
}

/// Item attachments nest a whole item, and items in turn hold attachments.
/// Boxing here gives the mutually recursive futures a finite size.
fn write_nested_item<'a, W: IWrite>(
    xml: &'a mut Writer<W>,
    item: &'a RealItem,
) -> BoxFuture<'a, Result<(), QError>> {
    item.qwrite(xml).boxed()
}

impl QWrite for ItemAttachment {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("ItemAttachment");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_attachment_props(xml, &self.props).await?;
        if let Some(item) = &self.item {
            write_nested_item(xml, item).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for FileAttachment {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("FileAttachment");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_attachment_props(xml, &self.props).await?;
        if let Some(photo) = &self.is_contact_photo {
            text_element(xml, "IsContactPhoto", bool_str(*photo)).await?;
        }
        if let Some(content) = &self.content {
            text_element(xml, "Content", &BASE64.encode(content)).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for Attachment {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        match self {
            Self::Item(inner) => inner.qwrite(xml).await,
            Self::File(inner) => inner.qwrite(xml).await,
        }
    }
}
