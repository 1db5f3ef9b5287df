//! Request and response bodies exchanged with the document-creation endpoint.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	document::{Document, DocumentId},
};

/// Request body for `POST /lk/documents/create`.
///
/// The HTTP body carries only these five fields. The [`Document`]/[`Product`] JSON shape lives
/// inside `product_document`: serialized exactly as [`Document`] defines it, then base64-encoded,
/// next to its detached signature.
///
/// [`Product`]: crate::document::Product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
	/// Encoding of `product_document`; always [`Envelope::MANUAL_FORMAT`] for JSON documents.
	pub document_format: String,
	/// Base64 of the serialized [`Document`].
	pub product_document: String,
	/// Product group the document belongs to.
	pub product_group: String,
	/// Detached signature over the document.
	pub signature: String,
	/// Document type; [`Envelope::INTRODUCE_GOODS`] for domestic production.
	#[serde(rename = "type")]
	pub kind: String,
}
impl Envelope {
	/// Document type for introducing domestically produced goods into circulation.
	pub const INTRODUCE_GOODS: &'static str = "LP_INTRODUCE_GOODS";
	/// Document format for JSON payloads.
	pub const MANUAL_FORMAT: &'static str = "MANUAL";

	/// Serializes `document` and wraps it with its signature and product group.
	pub fn introduce_goods(
		document: &Document,
		signature: &str,
		product_group: &str,
	) -> Result<Self, serde_json::Error> {
		let raw = serde_json::to_vec(document)?;

		Ok(Self {
			document_format: Self::MANUAL_FORMAT.into(),
			product_document: STANDARD.encode(raw),
			product_group: product_group.into(),
			signature: signature.into(),
			kind: Self::INTRODUCE_GOODS.into(),
		})
	}
}

/// Success body returned by the document-creation endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Created {
	/// Identifier assigned to the new document.
	pub value: DocumentId,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::document::Product;

	#[test]
	fn envelope_carries_encoded_document() {
		let document = Document::new("111", "111", "2025-08-25", "OWN_PRODUCTION")
			.with_product(Product::default().with_uit_code("U-1"));
		let envelope =
			Envelope::introduce_goods(&document, "SIG", "milk").expect("Envelope should encode.");
		let decoded = STANDARD.decode(&envelope.product_document).expect("Payload is base64.");
		let round: Document = serde_json::from_slice(&decoded).expect("Payload is a document.");
		let wire = serde_json::to_value(&envelope).expect("Envelope should serialize.");

		assert_eq!(round, document);
		assert_eq!(wire["type"], "LP_INTRODUCE_GOODS");
		assert_eq!(wire["document_format"], "MANUAL");
		assert_eq!(wire["product_group"], "milk");
		assert_eq!(wire["signature"], "SIG");
	}

	#[test]
	fn document_shape_lives_only_in_payload() {
		let document = Document::new("111", "222", "2025-08-25", "OWN_PRODUCTION")
			.with_product(Product::default().with_tnved_code("0401"));
		let envelope =
			Envelope::introduce_goods(&document, "SIG", "milk").expect("Envelope should encode.");
		let wire = serde_json::to_value(&envelope).expect("Envelope should serialize.");
		let keys = wire.as_object().expect("Envelope is an object.");
		let decoded = STANDARD.decode(&envelope.product_document).expect("Payload is base64.");
		let payload: serde_json::Value =
			serde_json::from_slice(&decoded).expect("Payload is JSON.");

		assert_eq!(keys.len(), 5);
		assert!(!keys.contains_key("products"));
		assert!(!keys.contains_key("participant_inn"));
		assert_eq!(payload["participant_inn"], "111");
		assert_eq!(payload["producer_inn"], "222");
		assert_eq!(payload["products"][0]["tnved_code"], "0401");
	}

	#[test]
	fn created_requires_value() {
		assert!(serde_json::from_str::<Created>("{}").is_err());
		assert!(serde_json::from_str::<Created>("{\"value\":\"\"}").is_err());

		let created: Created = serde_json::from_str("{\"value\":\"doc-1\",\"extra\":1}")
			.expect("Unknown fields should be ignored.");

		assert_eq!(created.value.as_str(), "doc-1");
	}
}
