//! Registry-assigned document identifiers.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Error returned when a document identifier fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum DocumentIdError {
	/// The identifier was empty.
	#[error("Document identifier cannot be empty.")]
	Empty,
	/// The identifier starts or ends with whitespace.
	#[error("Document identifier has surrounding whitespace.")]
	SurroundingWhitespace,
}

/// Immutable, non-empty handle the registry returns for an accepted document.
///
/// [`DocumentSubmitter`](crate::submit::DocumentSubmitter) only produces identifiers parsed from
/// a successful response. The public constructors ([`DocumentId::new`], [`FromStr`], serde)
/// exist so callers can re-hydrate identifiers they persisted earlier; all of them apply the
/// same validation, so no path yields an empty or padded identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);
impl DocumentId {
	/// Validates and wraps a previously issued identifier.
	pub fn new(value: impl AsRef<str>) -> Result<Self, DocumentIdError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for DocumentId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for DocumentId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for DocumentId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<DocumentId> for String {
	fn from(value: DocumentId) -> Self {
		value.0
	}
}
impl TryFrom<String> for DocumentId {
	type Error = DocumentIdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for DocumentId {
	type Err = DocumentIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for DocumentId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "DocumentId({})", self.0)
	}
}
impl Display for DocumentId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), DocumentIdError> {
	if view.is_empty() {
		return Err(DocumentIdError::Empty);
	}
	if view.trim() != view {
		return Err(DocumentIdError::SurroundingWhitespace);
	}

	Ok(())
}
