use quick_xml::events::{BytesText, Event};
use quick_xml::Error as QError;

use super::encoder::{bool_str, text_element, write_folder_id, write_item_id};
use super::itemtypes::*;
use super::types::Mailbox;
use super::xml::{IWrite, QWrite, Writer};

// ==================== Item Types Serialization =============================

/// A wrapper element holding a homogeneous list, like `<t:ToRecipients>`.
pub(crate) async fn wrapped_list<N: QWrite + Sync>(
    xml: &mut Writer<impl IWrite>,
    name: &str,
    items: &[N],
) -> Result<(), QError> {
    let start = xml.create_types_element(name);
    let end = start.to_end();

    xml.q.write_event_async(Event::Start(start.clone())).await?;
    for item in items.iter() {
        item.qwrite(xml).await?;
    }
    xml.q.write_event_async(Event::End(end)).await
}

/// A single-recipient wrapper, like `<t:From><t:Mailbox>...</t:Mailbox></t:From>`
async fn mailbox_in(
    xml: &mut Writer<impl IWrite>,
    name: &str,
    mbx: &Mailbox,
) -> Result<(), QError> {
    let start = xml.create_types_element(name);
    let end = start.to_end();

    xml.q.write_event_async(Event::Start(start.clone())).await?;
    mbx.qwrite(xml).await?;
    xml.q.write_event_async(Event::End(end)).await
}

pub(crate) async fn write_item_props(
    xml: &mut Writer<impl IWrite>,
    props: &ItemProps,
) -> Result<(), QError> {
    if let Some(iid) = &props.item_id {
        iid.qwrite(xml).await?;
    }
    if let Some(pid) = &props.parent_folder_id {
        write_folder_id(xml, "ParentFolderId", pid).await?;
    }
    if let Some(class) = &props.item_class {
        text_element(xml, "ItemClass", class).await?;
    }
    if let Some(subject) = &props.subject {
        text_element(xml, "Subject", subject).await?;
    }
    if let Some(sensitivity) = &props.sensitivity {
        text_element(xml, "Sensitivity", sensitivity.value()).await?;
    }
    if let Some(body) = &props.body {
        body.qwrite(xml).await?;
    }
    if !props.attachments.is_empty() {
        wrapped_list(xml, "Attachments", &props.attachments).await?;
    }
    if let Some(received) = &props.date_time_received {
        text_element(xml, "DateTimeReceived", &received.to_rfc3339()).await?;
    }
    if let Some(size) = &props.size {
        text_element(xml, "Size", &size.to_string()).await?;
    }
    if !props.categories.is_empty() {
        let start = xml.create_types_element("Categories");
        let end = start.to_end();
        xml.q.write_event_async(Event::Start(start.clone())).await?;
        for category in props.categories.iter() {
            text_element(xml, "String", category).await?;
        }
        xml.q.write_event_async(Event::End(end)).await?;
    }
    if let Some(importance) = &props.importance {
        text_element(xml, "Importance", importance.value()).await?;
    }
    if let Some(draft) = &props.is_draft {
        text_element(xml, "IsDraft", bool_str(*draft)).await?;
    }
    if let Some(sent) = &props.date_time_sent {
        text_element(xml, "DateTimeSent", &sent.to_rfc3339()).await?;
    }
    if !props.response_objects.is_empty() {
        wrapped_list(xml, "ResponseObjects", &props.response_objects).await?;
    }
    Ok(())
}

impl QWrite for Item {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("Item");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_item_props(xml, &self.props).await?;
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for Message {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("Message");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_item_props(xml, &self.props).await?;
        if let Some(sender) = &self.sender {
            mailbox_in(xml, "Sender", sender).await?;
        }
        if !self.to_recipients.is_empty() {
            wrapped_list(xml, "ToRecipients", &self.to_recipients).await?;
        }
        if !self.cc_recipients.is_empty() {
            wrapped_list(xml, "CcRecipients", &self.cc_recipients).await?;
        }
        if let Some(from) = &self.from {
            mailbox_in(xml, "From", from).await?;
        }
        if let Some(mid) = &self.internet_message_id {
            text_element(xml, "InternetMessageId", mid).await?;
        }
        if let Some(read) = &self.is_read {
            text_element(xml, "IsRead", bool_str(*read)).await?;
        }
        if let Some(rr) = &self.is_read_receipt_requested {
            text_element(xml, "IsReadReceiptRequested", bool_str(*rr)).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for Contact {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("Contact");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_item_props(xml, &self.props).await?;
        if let Some(name) = &self.display_name {
            text_element(xml, "DisplayName", name).await?;
        }
        if let Some(given) = &self.given_name {
            text_element(xml, "GivenName", given).await?;
        }
        if let Some(surname) = &self.surname {
            text_element(xml, "Surname", surname).await?;
        }
        if let Some(company) = &self.company_name {
            text_element(xml, "CompanyName", company).await?;
        }
        if !self.email_addresses.is_empty() {
            wrapped_list(xml, "EmailAddresses", &self.email_addresses).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for EmailAddressEntry {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let mut start = xml.create_types_element("Entry");
        start.push_attribute(("Key", self.key.value()));
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        xml.q
            .write_event_async(Event::Text(BytesText::new(&self.value)))
            .await?;
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for CalendarItem {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("CalendarItem");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        write_item_props(xml, &self.props).await?;
        if let Some(start_at) = &self.start {
            text_element(xml, "Start", &start_at.to_rfc3339()).await?;
        }
        if let Some(end_at) = &self.end {
            text_element(xml, "End", &end_at.to_rfc3339()).await?;
        }
        if let Some(all_day) = &self.is_all_day_event {
            text_element(xml, "IsAllDayEvent", bool_str(*all_day)).await?;
        }
        if let Some(fb) = &self.legacy_free_busy_status {
            text_element(xml, "LegacyFreeBusyStatus", fb.value()).await?;
        }
        if let Some(location) = &self.location {
            text_element(xml, "Location", location).await?;
        }
        if let Some(kind) = &self.calendar_item_type {
            text_element(xml, "CalendarItemType", kind.value()).await?;
        }
        if let Some(organizer) = &self.organizer {
            mailbox_in(xml, "Organizer", organizer).await?;
        }
        if !self.required_attendees.is_empty() {
            wrapped_list(xml, "RequiredAttendees", &self.required_attendees).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for Attendee {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("Attendee");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        self.mailbox.qwrite(xml).await?;
        if let Some(response) = &self.response_type {
            text_element(xml, "ResponseType", response.value()).await?;
        }
        if let Some(at) = &self.last_response_time {
            text_element(xml, "LastResponseTime", &at.to_rfc3339()).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for RealItem {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        match self {
            Self::Item(inner) => inner.qwrite(xml).await,
            Self::Message(inner) => inner.qwrite(xml).await,
            Self::Contact(inner) => inner.qwrite(xml).await,
            Self::CalendarItem(inner) => inner.qwrite(xml).await,
        }
    }
}

impl QWrite for ArrayOfRealItems {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let start = xml.create_types_element("Items");
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        for item in self.0.iter() {
            item.qwrite(xml).await?;
        }
        xml.q.write_event_async(Event::End(end)).await
    }
}

async fn write_smart_response(
    xml: &mut Writer<impl IWrite>,
    name: &str,
    payload: &SmartResponse,
) -> Result<(), QError> {
    let start = xml.create_types_element(name);
    let end = start.to_end();

    xml.q.write_event_async(Event::Start(start.clone())).await?;
    if let Some(subject) = &payload.subject {
        text_element(xml, "Subject", subject).await?;
    }
    if let Some(body) = &payload.body {
        body.qwrite(xml).await?;
    }
    if !payload.to_recipients.is_empty() {
        wrapped_list(xml, "ToRecipients", &payload.to_recipients).await?;
    }
    write_item_id(xml, "ReferenceItemId", &payload.reference_item_id).await?;
    xml.q.write_event_async(Event::End(end)).await
}

async fn write_well_known_response(
    xml: &mut Writer<impl IWrite>,
    name: &str,
    body: &Option<crate::types::Body>,
    reference_item_id: &crate::types::ItemId,
) -> Result<(), QError> {
    let start = xml.create_types_element(name);
    let end = start.to_end();

    xml.q.write_event_async(Event::Start(start.clone())).await?;
    if let Some(body) = body {
        body.qwrite(xml).await?;
    }
    write_item_id(xml, "ReferenceItemId", reference_item_id).await?;
    xml.q.write_event_async(Event::End(end)).await
}

async fn write_reference_only(
    xml: &mut Writer<impl IWrite>,
    name: &str,
    reference_item_id: &crate::types::ItemId,
) -> Result<(), QError> {
    let start = xml.create_types_element(name);
    let end = start.to_end();

    xml.q.write_event_async(Event::Start(start.clone())).await?;
    write_item_id(xml, "ReferenceItemId", reference_item_id).await?;
    xml.q.write_event_async(Event::End(end)).await
}

impl QWrite for ResponseObject {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        match self {
            Self::ReplyToItem(payload) => write_smart_response(xml, "ReplyToItem", payload).await,
            Self::ReplyAllToItem(payload) => {
                write_smart_response(xml, "ReplyAllToItem", payload).await
            }
            Self::ForwardItem(payload) => write_smart_response(xml, "ForwardItem", payload).await,
            Self::AcceptItem(payload) => {
                write_well_known_response(xml, "AcceptItem", &payload.body, &payload.reference_item_id)
                    .await
            }
            Self::TentativelyAcceptItem(payload) => {
                write_well_known_response(
                    xml,
                    "TentativelyAcceptItem",
                    &payload.body,
                    &payload.reference_item_id,
                )
                .await
            }
            Self::DeclineItem(payload) => {
                write_well_known_response(
                    xml,
                    "DeclineItem",
                    &payload.body,
                    &payload.reference_item_id,
                )
                .await
            }
            Self::CancelCalendarItem(payload) => {
                write_well_known_response(
                    xml,
                    "CancelCalendarItem",
                    &payload.body,
                    &payload.reference_item_id,
                )
                .await
            }
            Self::RemoveItem(payload) => {
                write_reference_only(xml, "RemoveItem", &payload.reference_item_id).await
            }
            Self::SuppressReadReceipt(payload) => {
                write_reference_only(xml, "SuppressReadReceipt", &payload.reference_item_id).await
            }
        }
    }
}
