use super::error::ParsingError;
use super::types::*;
use super::xml::{IRead, QRead, Reader, TYPES_URN};

// ==================== Core Types Deserialization ===========================

/// xs:dateTime, RFC 3339 lexical form
pub(crate) fn parse_datetime(
    s: &str,
) -> Result<chrono::DateTime<chrono::FixedOffset>, ParsingError> {
    Ok(chrono::DateTime::parse_from_rfc3339(s)?)
}

/// xs:boolean, strict lexical form
pub(crate) fn parse_bool(s: &str) -> Result<bool, ParsingError> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParsingError::InvalidValue),
    }
}

/// Read a text-only child element, like `<t:Subject>...</t:Subject>`.
/// Returns None (and does not move) when the next node is something else.
pub(crate) async fn maybe_text(
    xml: &mut Reader<impl IRead>,
    name: &str,
) -> Result<Option<String>, ParsingError> {
    match xml.maybe_open(TYPES_URN, name).await? {
        Some(_) => {
            let txt = xml.tag_string().await?;
            xml.close().await?;
            Ok(Some(txt))
        }
        None => Ok(None),
    }
}

/// ItemIdType content under any element name (ItemId, ReferenceItemId, ...)
pub(crate) async fn read_item_id(
    xml: &mut Reader<impl IRead>,
    name: &str,
) -> Result<ItemId, ParsingError> {
    xml.open(TYPES_URN, name).await?;
    let id = xml.prev_attr("Id").ok_or(ParsingError::MissingAttribute)?;
    let change_key = xml.prev_attr("ChangeKey");
    xml.close().await?;
    Ok(ItemId { id, change_key })
}

/// FolderIdType content under any element name (FolderId, ParentFolderId, ...)
pub(crate) async fn read_folder_id(
    xml: &mut Reader<impl IRead>,
    name: &str,
) -> Result<FolderId, ParsingError> {
    xml.open(TYPES_URN, name).await?;
    let id = xml.prev_attr("Id").ok_or(ParsingError::MissingAttribute)?;
    let change_key = xml.prev_attr("ChangeKey");
    xml.close().await?;
    Ok(FolderId { id, change_key })
}

pub(crate) async fn maybe_item_id(
    xml: &mut Reader<impl IRead>,
    name: &str,
) -> Result<Option<ItemId>, ParsingError> {
    match read_item_id(xml, name).await {
        Ok(v) => Ok(Some(v)),
        Err(ParsingError::Recoverable) => Ok(None),
        Err(e) => Err(e),
    }
}

pub(crate) async fn maybe_folder_id(
    xml: &mut Reader<impl IRead>,
    name: &str,
) -> Result<Option<FolderId>, ParsingError> {
    match read_folder_id(xml, name).await {
        Ok(v) => Ok(Some(v)),
        Err(ParsingError::Recoverable) => Ok(None),
        Err(e) => Err(e),
    }
}

/// A wrapper element holding a homogeneous list, like
/// `<t:CalendarPermissions>` or `<t:ToRecipients>`.
pub(crate) async fn maybe_collect_in<N: crate::xml::Node<N>>(
    xml: &mut Reader<impl IRead>,
    name: &str,
) -> Result<Option<Vec<N>>, ParsingError> {
    match xml.maybe_open(TYPES_URN, name).await? {
        Some(_) => {
            let acc = xml.collect().await?;
            xml.close().await?;
            Ok(Some(acc))
        }
        None => Ok(None),
    }
}

impl QRead<ItemId> for ItemId {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        read_item_id(xml, "ItemId").await
    }
}

impl QRead<FolderId> for FolderId {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        read_folder_id(xml, "FolderId").await
    }
}

impl QRead<DistinguishedFolderId> for DistinguishedFolderId {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "DistinguishedFolderId").await?;
        let id_str = xml.prev_attr("Id").ok_or(ParsingError::MissingAttribute)?;
        let id = DistinguishedFolderIdName::from_value(&id_str)?;
        let change_key = xml.prev_attr("ChangeKey");
        let mailbox = xml.maybe_find().await?;
        xml.close().await?;
        Ok(Self {
            id,
            change_key,
            mailbox,
        })
    }
}

impl QRead<BaseFolderId> for BaseFolderId {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        match FolderId::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::FolderId),
        }
        DistinguishedFolderId::qread(xml)
            .await
            .map(Self::DistinguishedFolderId)
    }
}

impl QRead<Mailbox> for Mailbox {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "Mailbox").await?;

        let mut mbx = Mailbox::default();
        while xml.parent_has_child() {
            let mut dirty = false;

            if let Some(name) = maybe_text(xml, "Name").await? {
                mbx.name = Some(name);
                dirty = true;
            }
            if let Some(addr) = maybe_text(xml, "EmailAddress").await? {
                mbx.email_address = Some(addr);
                dirty = true;
            }
            if let Some(routing) = maybe_text(xml, "RoutingType").await? {
                mbx.routing_type = Some(routing);
                dirty = true;
            }
            if let Some(mt) = maybe_text(xml, "MailboxType").await? {
                mbx.mailbox_type = Some(MailboxType::from_value(&mt)?);
                dirty = true;
            }
            xml.maybe_read(&mut mbx.item_id, &mut dirty).await?;

            if !dirty {
                match xml.peek() {
                    quick_xml::events::Event::End(_) => break,
                    _ => {
                        xml.skip().await?;
                    }
                };
            }
        }

        xml.close().await?;
        Ok(mbx)
    }
}

impl QRead<Body> for Body {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "Body").await?;
        let kind_str = xml
            .prev_attr("BodyType")
            .ok_or(ParsingError::MissingAttribute)?;
        let body_type = BodyKind::from_value(&kind_str)?;
        let is_truncated = xml
            .prev_attr("IsTruncated")
            .map(|v| parse_bool(&v))
            .transpose()?;
        let open_attrs = xml.prev_attrs_except(&["BodyType", "IsTruncated"]);
        let content = xml.tag_string().await?;
        xml.close().await?;
        Ok(Self {
            body_type,
            is_truncated,
            open_attrs,
            content,
        })
    }
}
