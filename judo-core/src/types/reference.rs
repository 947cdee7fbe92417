use serde::{Deserialize, Serialize};

use crate::{
    errors::JudoError,
    types::{AnyJson, Record},
};

/// Consumer and payment references attached to a transaction, plus free-form metadata.
///
/// Both references must be non-empty; [`Reference::new`] refuses to build one otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawReference")]
pub struct Reference {
    consumer_reference: String,
    payment_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Record<AnyJson>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReference {
    consumer_reference: String,
    payment_reference: String,
    #[serde(default)]
    metadata: Option<Record<AnyJson>>,
}

impl TryFrom<RawReference> for Reference {
    type Error = JudoError;

    fn try_from(raw: RawReference) -> Result<Self, Self::Error> {
        let reference = Reference::new(raw.consumer_reference, raw.payment_reference)?;
        Ok(match raw.metadata {
            Some(metadata) => reference.with_metadata(metadata),
            None => reference,
        })
    }
}

impl Reference {
    pub fn new(
        consumer_reference: impl Into<String>,
        payment_reference: impl Into<String>,
    ) -> Result<Self, JudoError> {
        let consumer_reference = consumer_reference.into();
        let payment_reference = payment_reference.into();

        if consumer_reference.is_empty() {
            return Err(JudoError::parameter("consumer reference must not be empty"));
        }
        if payment_reference.is_empty() {
            return Err(JudoError::parameter("payment reference must not be empty"));
        }

        Ok(Reference {
            consumer_reference,
            payment_reference,
            metadata: None,
        })
    }

    /// Attach metadata. Keys and values are forwarded to the gateway untouched.
    pub fn with_metadata<K, I>(mut self, metadata: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AnyJson)>,
    {
        let metadata: Record<AnyJson> = metadata.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.metadata = (!metadata.is_empty()).then_some(metadata);
        self
    }

    pub fn consumer_reference(&self) -> &str {
        &self.consumer_reference
    }

    pub fn payment_reference(&self) -> &str {
        &self.payment_reference
    }

    pub fn metadata(&self) -> Option<&Record<AnyJson>> {
        self.metadata.as_ref()
    }
}
