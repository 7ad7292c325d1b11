use quick_xml::events::Event;

use super::decoder::{
    maybe_collect_in, maybe_folder_id, maybe_item_id, maybe_text, parse_bool, parse_datetime,
};
use super::error::ParsingError;
use super::itemtypes::*;
use super::types::Mailbox;
use super::xml::{IRead, QRead, Reader, TYPES_URN};

// ==================== Item Types Deserialization ===========================

/// A single-recipient wrapper, like `<t:From><t:Mailbox>...</t:Mailbox></t:From>`
async fn maybe_mailbox_in(
    xml: &mut Reader<impl IRead>,
    name: &str,
) -> Result<Option<Mailbox>, ParsingError> {
    match xml.maybe_open(TYPES_URN, name).await? {
        Some(_) => {
            let mbx = xml.find().await?;
            xml.close().await?;
            Ok(Some(mbx))
        }
        None => Ok(None),
    }
}

/// Try to consume one ItemType child at the current position.
pub(crate) async fn maybe_item_prop(
    xml: &mut Reader<impl IRead>,
    props: &mut ItemProps,
    dirty: &mut bool,
) -> Result<(), ParsingError> {
    xml.maybe_read(&mut props.item_id, dirty).await?;
    if let Some(pid) = maybe_folder_id(xml, "ParentFolderId").await? {
        props.parent_folder_id = Some(pid);
        *dirty = true;
    }
    if let Some(class) = maybe_text(xml, "ItemClass").await? {
        props.item_class = Some(class);
        *dirty = true;
    }
    if let Some(subject) = maybe_text(xml, "Subject").await? {
        props.subject = Some(subject);
        *dirty = true;
    }
    if let Some(txt) = maybe_text(xml, "Sensitivity").await? {
        props.sensitivity = Some(Sensitivity::from_value(&txt)?);
        *dirty = true;
    }
    xml.maybe_read(&mut props.body, dirty).await?;
    if let Some(list) = maybe_collect_in(xml, "Attachments").await? {
        props.attachments = list;
        *dirty = true;
    }
    if let Some(txt) = maybe_text(xml, "DateTimeReceived").await? {
        props.date_time_received = Some(parse_datetime(&txt)?);
        *dirty = true;
    }
    if let Some(txt) = maybe_text(xml, "Size").await? {
        props.size = Some(txt.parse::<i32>()?);
        *dirty = true;
    }
    if xml.maybe_open(TYPES_URN, "Categories").await?.is_some() {
        let mut categories = Vec::new();
        while xml.parent_has_child() {
            if xml.maybe_open(TYPES_URN, "String").await?.is_some() {
                categories.push(xml.tag_string().await?);
                xml.close().await?;
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
        props.categories = categories;
        *dirty = true;
    }
    if let Some(txt) = maybe_text(xml, "Importance").await? {
        props.importance = Some(Importance::from_value(&txt)?);
        *dirty = true;
    }
    if let Some(txt) = maybe_text(xml, "IsDraft").await? {
        props.is_draft = Some(parse_bool(&txt)?);
        *dirty = true;
    }
    if let Some(txt) = maybe_text(xml, "DateTimeSent").await? {
        props.date_time_sent = Some(parse_datetime(&txt)?);
        *dirty = true;
    }
    if let Some(list) = maybe_collect_in(xml, "ResponseObjects").await? {
        props.response_objects = list;
        *dirty = true;
    }
    Ok(())
}

impl QRead<Item> for Item {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "Item").await?;

        let mut props = ItemProps::default();
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_item_prop(xml, &mut props, &mut dirty).await?;

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

impl QRead<Message> for Message {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "Message").await?;

        let mut msg = Message::default();
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_item_prop(xml, &mut msg.props, &mut dirty).await?;
            if let Some(sender) = maybe_mailbox_in(xml, "Sender").await? {
                msg.sender = Some(sender);
                dirty = true;
            }
            if let Some(list) = maybe_collect_in(xml, "ToRecipients").await? {
                msg.to_recipients = list;
                dirty = true;
            }
            if let Some(list) = maybe_collect_in(xml, "CcRecipients").await? {
                msg.cc_recipients = list;
                dirty = true;
            }
            if let Some(from) = maybe_mailbox_in(xml, "From").await? {
                msg.from = Some(from);
                dirty = true;
            }
            if let Some(mid) = maybe_text(xml, "InternetMessageId").await? {
                msg.internet_message_id = Some(mid);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "IsRead").await? {
                msg.is_read = Some(parse_bool(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "IsReadReceiptRequested").await? {
                msg.is_read_receipt_requested = Some(parse_bool(&txt)?);
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
        Ok(msg)
    }
}

impl QRead<Contact> for Contact {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "Contact").await?;

        let mut contact = Contact::default();
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_item_prop(xml, &mut contact.props, &mut dirty).await?;
            if let Some(name) = maybe_text(xml, "DisplayName").await? {
                contact.display_name = Some(name);
                dirty = true;
            }
            if let Some(given) = maybe_text(xml, "GivenName").await? {
                contact.given_name = Some(given);
                dirty = true;
            }
            if let Some(surname) = maybe_text(xml, "Surname").await? {
                contact.surname = Some(surname);
                dirty = true;
            }
            if let Some(company) = maybe_text(xml, "CompanyName").await? {
                contact.company_name = Some(company);
                dirty = true;
            }
            if let Some(list) = maybe_collect_in(xml, "EmailAddresses").await? {
                contact.email_addresses = list;
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
        Ok(contact)
    }
}

impl QRead<EmailAddressEntry> for EmailAddressEntry {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "Entry").await?;
        let key_str = xml.prev_attr("Key").ok_or(ParsingError::MissingAttribute)?;
        let key = EmailAddressKey::from_value(&key_str)?;
        let value = xml.tag_string().await?;
        xml.close().await?;
        Ok(Self { key, value })
    }
}

impl QRead<CalendarItem> for CalendarItem {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "CalendarItem").await?;

        let mut event = CalendarItem::default();
        while xml.parent_has_child() {
            let mut dirty = false;

            maybe_item_prop(xml, &mut event.props, &mut dirty).await?;
            if let Some(txt) = maybe_text(xml, "Start").await? {
                event.start = Some(parse_datetime(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "End").await? {
                event.end = Some(parse_datetime(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "IsAllDayEvent").await? {
                event.is_all_day_event = Some(parse_bool(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "LegacyFreeBusyStatus").await? {
                event.legacy_free_busy_status = Some(LegacyFreeBusy::from_value(&txt)?);
                dirty = true;
            }
            if let Some(location) = maybe_text(xml, "Location").await? {
                event.location = Some(location);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "CalendarItemType").await? {
                event.calendar_item_type = Some(CalendarItemKind::from_value(&txt)?);
                dirty = true;
            }
            if let Some(organizer) = maybe_mailbox_in(xml, "Organizer").await? {
                event.organizer = Some(organizer);
                dirty = true;
            }
            if let Some(list) = maybe_collect_in(xml, "RequiredAttendees").await? {
                event.required_attendees = list;
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
        Ok(event)
    }
}

impl QRead<Attendee> for Attendee {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "Attendee").await?;

        let mut mailbox = None;
        let (mut response_type, mut last_response_time) = (None, None);
        while xml.parent_has_child() {
            let mut dirty = false;

            xml.maybe_read(&mut mailbox, &mut dirty).await?;
            if let Some(txt) = maybe_text(xml, "ResponseType").await? {
                response_type = Some(ResponseKind::from_value(&txt)?);
                dirty = true;
            }
            if let Some(txt) = maybe_text(xml, "LastResponseTime").await? {
                last_response_time = Some(parse_datetime(&txt)?);
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
        let mailbox = mailbox.ok_or(ParsingError::MissingChild)?;
        Ok(Self {
            mailbox,
            response_type,
            last_response_time,
        })
    }
}

impl QRead<RealItem> for RealItem {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        match Item::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::Item),
        }
        match Message::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::Message),
        }
        match Contact::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::Contact),
        }
        CalendarItem::qread(xml).await.map(Self::CalendarItem)
    }
}

impl QRead<ArrayOfRealItems> for ArrayOfRealItems {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "Items").await?;
        let items = xml.collect().await?;
        xml.close().await?;
        Ok(Self(items))
    }
}

async fn read_smart_response(
    xml: &mut Reader<impl IRead>,
) -> Result<SmartResponse, ParsingError> {
    let (mut subject, mut body, mut reference_item_id) = (None, None, None);
    let mut to_recipients = Vec::new();

    while xml.parent_has_child() {
        let mut dirty = false;

        if let Some(txt) = maybe_text(xml, "Subject").await? {
            subject = Some(txt);
            dirty = true;
        }
        xml.maybe_read(&mut body, &mut dirty).await?;
        if let Some(list) = maybe_collect_in(xml, "ToRecipients").await? {
            to_recipients = list;
            dirty = true;
        }
        if let Some(rid) = maybe_item_id(xml, "ReferenceItemId").await? {
            reference_item_id = Some(rid);
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
    let reference_item_id = reference_item_id.ok_or(ParsingError::MissingChild)?;
    Ok(SmartResponse {
        subject,
        body,
        to_recipients,
        reference_item_id,
    })
}

async fn read_body_and_reference(
    xml: &mut Reader<impl IRead>,
) -> Result<(Option<crate::types::Body>, crate::types::ItemId), ParsingError> {
    let (mut body, mut reference_item_id) = (None, None);

    while xml.parent_has_child() {
        let mut dirty = false;

        xml.maybe_read(&mut body, &mut dirty).await?;
        if let Some(rid) = maybe_item_id(xml, "ReferenceItemId").await? {
            reference_item_id = Some(rid);
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
    let reference_item_id = reference_item_id.ok_or(ParsingError::MissingChild)?;
    Ok((body, reference_item_id))
}

impl QRead<ResponseObject> for ResponseObject {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        if xml.maybe_open(TYPES_URN, "ReplyToItem").await?.is_some() {
            return read_smart_response(xml).await.map(Self::ReplyToItem);
        }
        if xml.maybe_open(TYPES_URN, "ReplyAllToItem").await?.is_some() {
            return read_smart_response(xml).await.map(Self::ReplyAllToItem);
        }
        if xml.maybe_open(TYPES_URN, "ForwardItem").await?.is_some() {
            return read_smart_response(xml).await.map(Self::ForwardItem);
        }
        if xml.maybe_open(TYPES_URN, "AcceptItem").await?.is_some() {
            let (body, reference_item_id) = read_body_and_reference(xml).await?;
            return Ok(Self::AcceptItem(WellKnownResponse {
                body,
                reference_item_id,
            }));
        }
        if xml
            .maybe_open(TYPES_URN, "TentativelyAcceptItem")
            .await?
            .is_some()
        {
            let (body, reference_item_id) = read_body_and_reference(xml).await?;
            return Ok(Self::TentativelyAcceptItem(WellKnownResponse {
                body,
                reference_item_id,
            }));
        }
        if xml.maybe_open(TYPES_URN, "DeclineItem").await?.is_some() {
            let (body, reference_item_id) = read_body_and_reference(xml).await?;
            return Ok(Self::DeclineItem(WellKnownResponse {
                body,
                reference_item_id,
            }));
        }
        if xml
            .maybe_open(TYPES_URN, "CancelCalendarItem")
            .await?
            .is_some()
        {
            let (body, reference_item_id) = read_body_and_reference(xml).await?;
            return Ok(Self::CancelCalendarItem(CancelCalendarItem {
                body,
                reference_item_id,
            }));
        }
        if xml.maybe_open(TYPES_URN, "RemoveItem").await?.is_some() {
            let (_, reference_item_id) = read_body_and_reference(xml).await?;
            return Ok(Self::RemoveItem(RemoveItem { reference_item_id }));
        }
        if xml
            .maybe_open(TYPES_URN, "SuppressReadReceipt")
            .await?
            .is_some()
        {
            let (_, reference_item_id) = read_body_and_reference(xml).await?;
            return Ok(Self::SuppressReadReceipt(SuppressReadReceipt {
                reference_item_id,
            }));
        }

        Err(ParsingError::Recoverable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Body, BodyKind, ItemId};
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
    async fn message_with_reply_response_object() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:Message xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:ItemId Id="AAMkAGIm" ChangeKey="CQAAABYA"/>
    <t:Subject>Project status</t:Subject>
    <t:Body BodyType="Text">All green.</t:Body>
    <t:ResponseObjects>
        <t:ReplyToItem>
            <t:ReferenceItemId Id="AAMkAGIm" ChangeKey="CQAAABYA"/>
        </t:ReplyToItem>
        <t:ForwardItem>
            <t:ReferenceItemId Id="AAMkAGIm" ChangeKey="CQAAABYA"/>
        </t:ForwardItem>
    </t:ResponseObjects>
    <t:From>
        <t:Mailbox>
            <t:EmailAddress>carol@contoso.com</t:EmailAddress>
        </t:Mailbox>
    </t:From>
    <t:IsRead>false</t:IsRead>
</t:Message>
"#;
        let reference = ItemId {
            id: "AAMkAGIm".into(),
            change_key: Some("CQAAABYA".into()),
        };
        let got = deserialize::<Message>(src).await;
        assert_eq!(
            got,
            Message {
                props: ItemProps {
                    item_id: Some(reference.clone()),
                    subject: Some("Project status".into()),
                    body: Some(Body {
                        body_type: BodyKind::Text,
                        is_truncated: None,
                        open_attrs: vec![],
                        content: "All green.".into(),
                    }),
                    response_objects: vec![
                        ResponseObject::ReplyToItem(SmartResponse {
                            subject: None,
                            body: None,
                            to_recipients: vec![],
                            reference_item_id: reference.clone(),
                        }),
                        ResponseObject::ForwardItem(SmartResponse {
                            subject: None,
                            body: None,
                            to_recipients: vec![],
                            reference_item_id: reference.clone(),
                        }),
                    ],
                    ..ItemProps::default()
                },
                from: Some(Mailbox {
                    email_address: Some("carol@contoso.com".into()),
                    ..Mailbox::default()
                }),
                is_read: Some(false),
                ..Message::default()
            }
        );
    }

    #[tokio::test]
    async fn heterogeneous_items_round_trip() {
        let items = ArrayOfRealItems(vec![
            RealItem::Message(Message {
                props: ItemProps {
                    subject: Some("First".into()),
                    ..ItemProps::default()
                },
                is_read: Some(true),
                ..Message::default()
            }),
            RealItem::Contact(Contact {
                props: ItemProps::default(),
                display_name: Some("Dora Marsden".into()),
                email_addresses: vec![EmailAddressEntry {
                    key: EmailAddressKey::EmailAddress1,
                    value: "dora@contoso.com".into(),
                }],
                ..Contact::default()
            }),
            RealItem::CalendarItem(CalendarItem {
                props: ItemProps {
                    subject: Some("Third".into()),
                    ..ItemProps::default()
                },
                location: Some("Room 3".into()),
                ..CalendarItem::default()
            }),
            RealItem::Message(Message {
                props: ItemProps {
                    subject: Some("Fourth".into()),
                    ..ItemProps::default()
                },
                ..Message::default()
            }),
        ]);

        let xml = serialize(&items).await;
        let got = deserialize::<ArrayOfRealItems>(&xml).await;
        assert_eq!(got, items);
    }

    #[tokio::test]
    async fn attendee_requires_mailbox() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:Attendee xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:ResponseType>Accept</t:ResponseType>
</t:Attendee>
"#;
        let mut rdr = Reader::new(NsReader::from_reader(src.as_bytes()))
            .await
            .unwrap();
        let got = rdr.find::<Attendee>().await;
        assert!(matches!(got, Err(ParsingError::MissingChild)));
    }

    #[tokio::test]
    async fn calendar_item_with_attendees() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:CalendarItem xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
    <t:Subject>Planning</t:Subject>
    <t:Start>2006-11-02T14:00:00+01:00</t:Start>
    <t:LegacyFreeBusyStatus>OOF</t:LegacyFreeBusyStatus>
    <t:RequiredAttendees>
        <t:Attendee>
            <t:Mailbox>
                <t:EmailAddress>alice@contoso.com</t:EmailAddress>
            </t:Mailbox>
            <t:ResponseType>Accept</t:ResponseType>
        </t:Attendee>
    </t:RequiredAttendees>
</t:CalendarItem>
"#;
        let got = deserialize::<CalendarItem>(src).await;
        assert_eq!(got.props.subject, Some("Planning".into()));
        assert_eq!(
            got.legacy_free_busy_status,
            Some(LegacyFreeBusy::Oof)
        );
        assert_eq!(
            got.start,
            Some(
                chrono::DateTime::parse_from_rfc3339("2006-11-02T14:00:00+01:00").unwrap()
            )
        );
        assert_eq!(
            got.required_attendees,
            vec![Attendee {
                mailbox: Mailbox {
                    email_address: Some("alice@contoso.com".into()),
                    ..Mailbox::default()
                },
                response_type: Some(ResponseKind::Accept),
                last_response_time: None,
            }]
        );
    }
}
