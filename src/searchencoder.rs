use quick_xml::events::Event;
use quick_xml::Error as QError;

use super::searchtypes::*;
use super::xml::{IWrite, QWrite, Writer};

// ==================== Search Types Serialization ===========================

impl QWrite for FieldUri {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let mut start = xml.create_types_element("FieldURI");
        start.push_attribute(("FieldURI", self.field_uri.as_str()));
        xml.q.write_event_async(Event::Empty(start)).await
    }
}

impl QWrite for IndexedFieldUri {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let mut start = xml.create_types_element("IndexedFieldURI");
        start.push_attribute(("FieldURI", self.field_uri.as_str()));
        start.push_attribute(("FieldIndex", self.field_index.as_str()));
        xml.q.write_event_async(Event::Empty(start)).await
    }
}

impl QWrite for ExtendedFieldUri {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let mut start = xml.create_types_element("ExtendedFieldURI");
        if let Some(set) = &self.distinguished_property_set_id {
            start.push_attribute(("DistinguishedPropertySetId", set.value()));
        }
        if let Some(set_id) = &self.property_set_id {
            start.push_attribute(("PropertySetId", set_id.as_str()));
        }
        if let Some(tag) = &self.property_tag {
            start.push_attribute(("PropertyTag", tag.as_str()));
        }
        if let Some(name) = &self.property_name {
            start.push_attribute(("PropertyName", name.as_str()));
        }
        if let Some(id) = &self.property_id {
            start.push_attribute(("PropertyId", id.to_string().as_str()));
        }
        start.push_attribute(("PropertyType", self.property_type.value()));
        xml.q.write_event_async(Event::Empty(start)).await
    }
}

impl QWrite for PropertyPath {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        match self {
            Self::FieldUri(inner) => inner.qwrite(xml).await,
            Self::IndexedFieldUri(inner) => inner.qwrite(xml).await,
            Self::ExtendedFieldUri(inner) => inner.qwrite(xml).await,
        }
    }
}

impl QWrite for AggregateOn {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let mut start = xml.create_types_element("AggregateOn");
        start.push_attribute(("Aggregate", self.aggregate.value()));
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        self.path.qwrite(xml).await?;
        xml.q.write_event_async(Event::End(end)).await
    }
}

impl QWrite for FieldOrder {
    async fn qwrite(&self, xml: &mut Writer<impl IWrite>) -> Result<(), QError> {
        let mut start = xml.create_types_element("FieldOrder");
        start.push_attribute(("Order", self.order.value()));
        let end = start.to_end();

        xml.q.write_event_async(Event::Start(start.clone())).await?;
        self.path.qwrite(xml).await?;
        xml.q.write_event_async(Event::End(end)).await
    }
}
