use thiserror::Error;

use super::field::FieldErrors;
use super::resource_id::ResourceIdError;

/// Errors raised while converting between representations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A value has no mapping in the target vocabulary.
    ///
    /// Callers decide whether to tolerate it (legacy backend data) or
    /// reject it (client input); see [`is_unknown_value`].
    #[error("cannot convert {from}({value:?}) to {to}: unknown value")]
    UnknownValue {
        from: &'static str,
        value: String,
        to: &'static str,
    },

    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("AuthorizedCIDRs cannot be an empty list")]
    EmptyAuthorizedCidrs,

    #[error("unsupported api-version '{0}'")]
    UnsupportedApiVersion(String),

    #[error("invalid duration {0:?}")]
    InvalidDuration(String),

    #[error("{0}")]
    Fields(#[from] FieldErrors),

    #[error(transparent)]
    ResourceId(#[from] ResourceIdError),
}

impl ConversionError {
    pub fn unknown_value(from: &'static str, value: impl Into<String>, to: &'static str) -> Self {
        ConversionError::UnknownValue {
            from,
            value: value.into(),
            to,
        }
    }

    pub fn is_unknown_value(&self) -> bool {
        matches!(self, ConversionError::UnknownValue { .. })
    }
}

/// Walk an error chain looking for an unknown-value conversion failure
pub fn is_unknown_value(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(conversion) = e.downcast_ref::<ConversionError>() {
            if conversion.is_unknown_value() {
                return true;
            }
        }
        current = e.source();
    }
    false
}
