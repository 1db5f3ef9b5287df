//! Introduce-goods declarations and the identifiers the registry assigns to them.
//!
//! Field names follow the registry's snake_case wire format. Every field is free-form text at
//! this layer; the remote service owns validation. Optional fields left as `None` are omitted
//! from the serialized document rather than sent as `null`.

pub mod envelope;
pub mod id;

pub use envelope::*;
pub use id::*;

// self
use crate::_prelude::*;

/// One introduce-goods declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
	/// Tax id of the participant filing the declaration.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub participant_inn: Option<String>,
	/// Tax id of the producer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub producer_inn: Option<String>,
	/// Production date as understood by the registry (usually `YYYY-MM-DD`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub production_date: Option<String>,
	/// Production type label such as `OWN_PRODUCTION`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub production_type: Option<String>,
	/// Declared products, in submission order. Always serialized, even when empty.
	#[serde(default)]
	pub products: Vec<Product>,
}
impl Document {
	/// Creates a document with its header fields populated and no products yet.
	pub fn new(
		participant_inn: impl Into<String>,
		producer_inn: impl Into<String>,
		production_date: impl Into<String>,
		production_type: impl Into<String>,
	) -> Self {
		Self {
			participant_inn: Some(participant_inn.into()),
			producer_inn: Some(producer_inn.into()),
			production_date: Some(production_date.into()),
			production_type: Some(production_type.into()),
			products: Vec::new(),
		}
	}

	/// Appends a product entry.
	pub fn with_product(mut self, product: Product) -> Self {
		self.products.push(product);

		self
	}

	/// Appends several product entries.
	pub fn with_products<I>(mut self, products: I) -> Self
	where
		I: IntoIterator<Item = Product>,
	{
		self.products.extend(products);

		self
	}
}

macro_rules! product_setters {
	($($field:ident => $setter:ident, $doc:literal;)+) => {
		impl Product {
			$(
				#[doc = $doc]
				pub fn $setter(mut self, value: impl Into<String>) -> Self {
					self.$field = Some(value.into());

					self
				}
			)+
		}
	};
}

/// Certificate metadata and marking codes for one declared product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
	/// Conformity certificate document kind.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub certificate_document: Option<String>,
	/// Conformity certificate issue date.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub certificate_document_date: Option<String>,
	/// Conformity certificate number.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub certificate_document_number: Option<String>,
	/// Tax id of the goods owner.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub owner_inn: Option<String>,
	/// Tax id of the producer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub producer_inn: Option<String>,
	/// Production date of this product.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub production_date: Option<String>,
	/// Commodity nomenclature code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tnved_code: Option<String>,
	/// Unit marking code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uit_code: Option<String>,
	/// Aggregation-unit marking code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uitu_code: Option<String>,
}
impl Product {
	/// Returns `true` when the product carries a unit or aggregation-unit marking code.
	pub fn has_marking_code(&self) -> bool {
		self.uit_code.is_some() || self.uitu_code.is_some()
	}
}
product_setters! {
	certificate_document => with_certificate_document, "Sets the certificate document kind.";
	certificate_document_date => with_certificate_document_date, "Sets the certificate issue date.";
	certificate_document_number => with_certificate_document_number, "Sets the certificate number.";
	owner_inn => with_owner_inn, "Sets the owner tax id.";
	producer_inn => with_producer_inn, "Sets the producer tax id.";
	production_date => with_production_date, "Sets the production date.";
	tnved_code => with_tnved_code, "Sets the commodity code.";
	uit_code => with_uit_code, "Sets the unit marking code.";
	uitu_code => with_uitu_code, "Sets the aggregation-unit marking code.";
}
