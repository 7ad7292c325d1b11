use super::error::ParsingError;
use super::searchtypes::*;
use super::xml::{IRead, QRead, Reader, TYPES_URN};

// ==================== Search Types Deserialization =========================

impl QRead<FieldUri> for FieldUri {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "FieldURI").await?;
        let field_uri = xml
            .prev_attr("FieldURI")
            .ok_or(ParsingError::MissingAttribute)?;
        xml.close().await?;
        Ok(Self { field_uri })
    }
}

impl QRead<IndexedFieldUri> for IndexedFieldUri {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "IndexedFieldURI").await?;
        let field_uri = xml
            .prev_attr("FieldURI")
            .ok_or(ParsingError::MissingAttribute)?;
        let field_index = xml
            .prev_attr("FieldIndex")
            .ok_or(ParsingError::MissingAttribute)?;
        xml.close().await?;
        Ok(Self {
            field_uri,
            field_index,
        })
    }
}

impl QRead<ExtendedFieldUri> for ExtendedFieldUri {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "ExtendedFieldURI").await?;
        let distinguished_property_set_id = xml
            .prev_attr("DistinguishedPropertySetId")
            .map(|v| DistinguishedPropertySet::from_value(&v))
            .transpose()?;
        let property_set_id = xml.prev_attr("PropertySetId");
        let property_tag = xml.prev_attr("PropertyTag");
        let property_name = xml.prev_attr("PropertyName");
        let property_id = xml
            .prev_attr("PropertyId")
            .map(|v| v.parse::<i32>())
            .transpose()?;
        let property_type_str = xml
            .prev_attr("PropertyType")
            .ok_or(ParsingError::MissingAttribute)?;
        let property_type = MapiPropertyType::from_value(&property_type_str)?;
        xml.close().await?;
        Ok(Self {
            distinguished_property_set_id,
            property_set_id,
            property_tag,
            property_name,
            property_id,
            property_type,
        })
    }
}

impl QRead<PropertyPath> for PropertyPath {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        match FieldUri::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::FieldUri),
        }
        match IndexedFieldUri::qread(xml).await {
            Err(ParsingError::Recoverable) => (),
            otherwise => return otherwise.map(Self::IndexedFieldUri),
        }
        ExtendedFieldUri::qread(xml)
            .await
            .map(Self::ExtendedFieldUri)
    }
}

impl QRead<AggregateOn> for AggregateOn {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "AggregateOn").await?;
        let aggregate_str = xml
            .prev_attr("Aggregate")
            .ok_or(ParsingError::MissingAttribute)?;
        let aggregate = Aggregate::from_value(&aggregate_str)?;
        let path = xml.find().await?;
        xml.close().await?;
        Ok(Self { aggregate, path })
    }
}

impl QRead<FieldOrder> for FieldOrder {
    async fn qread(xml: &mut Reader<impl IRead>) -> Result<Self, ParsingError> {
        xml.open(TYPES_URN, "FieldOrder").await?;
        let order_str = xml
            .prev_attr("Order")
            .ok_or(ParsingError::MissingAttribute)?;
        let order = SortDirection::from_value(&order_str)?;
        let path = xml.find().await?;
        xml.close().await?;
        Ok(Self { order, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Node;
    use quick_xml::reader::NsReader;

    async fn deserialize<T: Node<T>>(src: &str) -> T {
        let mut rdr = Reader::new(NsReader::from_reader(src.as_bytes()))
            .await
            .unwrap();
        rdr.find().await.unwrap()
    }

    #[tokio::test]
    async fn indexed_field_uri() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:IndexedFieldURI xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"
    FieldURI="contacts:EmailAddress" FieldIndex="EmailAddress1"/>
"#;
        let got = deserialize::<PropertyPath>(src).await;
        assert_eq!(
            got,
            PropertyPath::IndexedFieldUri(IndexedFieldUri {
                field_uri: "contacts:EmailAddress".into(),
                field_index: "EmailAddress1".into(),
            })
        );
    }

    #[tokio::test]
    async fn extended_field_uri_requires_property_type() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:ExtendedFieldURI xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"
    PropertyTag="0x3FFA"/>
"#;
        let mut rdr = Reader::new(NsReader::from_reader(src.as_bytes()))
            .await
            .unwrap();
        let got = rdr.find::<ExtendedFieldUri>().await;
        assert!(matches!(got, Err(ParsingError::MissingAttribute)));
    }

    #[tokio::test]
    async fn field_order_holds_exactly_one_path() {
        let src = r#"<?xml version="1.0" encoding="utf-8" ?>
<t:FieldOrder xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types" Order="Ascending">
    <t:ExtendedFieldURI PropertySetId="c11ff724-aa03-4555-9952-8fa248a11c3e" PropertyId="8004" PropertyType="SystemTime"/>
</t:FieldOrder>
"#;
        let got = deserialize::<FieldOrder>(src).await;
        assert_eq!(
            got,
            FieldOrder {
                order: SortDirection::Ascending,
                path: PropertyPath::ExtendedFieldUri(ExtendedFieldUri {
                    distinguished_property_set_id: None,
                    property_set_id: Some("c11ff724-aa03-4555-9952-8fa248a11c3e".into()),
                    property_tag: None,
                    property_name: None,
                    property_id: Some(8004),
                    property_type: MapiPropertyType::SystemTime,
                }),
            }
        );
    }

    #[tokio::test]
    async fn aggregate_on_round_trip() {
        use crate::xml::{QWrite, Writer};
        use tokio::io::AsyncWriteExt;

        let original = AggregateOn {
            aggregate: Aggregate::Minimum,
            path: PropertyPath::FieldUri(FieldUri {
                field_uri: "calendar:Start".into(),
            }),
        };

        let mut buffer = Vec::new();
        let mut tokio_buffer = tokio::io::BufWriter::new(&mut buffer);
        let q = quick_xml::writer::Writer::new_with_indent(&mut tokio_buffer, b' ', 4);
        let ns_to_apply = vec![(
            "xmlns:t".into(),
            "http://schemas.microsoft.com/exchange/services/2006/types".into(),
        )];
        let mut writer = Writer { q, ns_to_apply };
        original.qwrite(&mut writer).await.expect("xml serialization");
        tokio_buffer.flush().await.expect("tokio buffer flush");
        let xml = String::from_utf8(buffer).unwrap();

        let got = deserialize::<AggregateOn>(&xml).await;
        assert_eq!(got, original);
    }
}
