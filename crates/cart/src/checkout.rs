use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

/// Delivery details entered on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInfo {
    pub address: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl DeliveryInfo {
    pub fn new(address: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            phone: phone.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Check the required fields and return a trimmed copy.
    ///
    /// Whitespace-only values count as missing. A blank comment is dropped.
    pub fn validated(&self) -> DomainResult<Self> {
        let address = self.address.trim();
        let phone = self.phone.trim();

        let missing: Vec<&str> = [("delivery address", address), ("phone", phone)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();

        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "{} required",
                missing.join(" and ")
            )));
        }

        let comment = self
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(Self {
            address: address.to_string(),
            phone: phone.to_string(),
            comment,
        })
    }
}

impl ValueObject for DeliveryInfo {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_address_is_reported() {
        let err = DeliveryInfo::new("", "123").validated().unwrap_err();
        assert_eq!(err, DomainError::validation("delivery address required"));
    }

    #[test]
    fn missing_both_fields_are_reported_together() {
        let err = DeliveryInfo::new(" ", "\t").validated().unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("delivery address and phone required")
        );
    }

    #[test]
    fn valid_info_is_trimmed() {
        let info = DeliveryInfo::new("  12 Main St ", " +7 999 123-45-67 ")
            .with_comment("   ")
            .validated()
            .unwrap();

        assert_eq!(info.address, "12 Main St");
        assert_eq!(info.phone, "+7 999 123-45-67");
        assert_eq!(info.comment, None);
    }

    #[test]
    fn comment_is_optional_on_the_wire() {
        let info: DeliveryInfo =
            serde_json::from_str(r#"{"address":"A","phone":"B"}"#).unwrap();
        assert_eq!(info, DeliveryInfo::new("A", "B"));
    }
}
