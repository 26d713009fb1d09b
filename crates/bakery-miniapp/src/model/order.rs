//! The order draft built by the order form, and the payload it turns into.
use crate::model::{Identity, Product, ProductId};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Packaging options, in display order.
///
/// Serialized with the labels the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Packaging {
    #[default]
    #[serde(rename = "Стандартная")]
    Standard,
    #[serde(rename = "Подарочная")]
    Gift,
    #[serde(rename = "Эко-упаковка")]
    Eco,
    #[serde(rename = "Без упаковки")]
    Bare,
}

impl Packaging {
    pub const ALL: [Packaging; 4] = [
        Packaging::Standard,
        Packaging::Gift,
        Packaging::Eco,
        Packaging::Bare,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Packaging::Standard => "Standard",
            Packaging::Gift => "Gift box",
            Packaging::Eco => "Eco packaging",
            Packaging::Bare => "No packaging",
        }
    }
}

impl Display for Packaging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How the customer receives the order, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DeliveryMethod {
    #[default]
    #[serde(rename = "Самовывоз")]
    Pickup,
    #[serde(rename = "Доставка")]
    Delivery,
}

impl DeliveryMethod {
    pub const ALL: [DeliveryMethod; 2] = [DeliveryMethod::Pickup, DeliveryMethod::Delivery];

    pub fn label(self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "Pickup",
            DeliveryMethod::Delivery => "Delivery",
        }
    }
}

impl Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The order being filled in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftOrder {
    pub product_id: Option<ProductId>,
    pub customer_name: String,
    pub customer_contact: String,
    pub delivery_date: Option<NaiveDate>,
    pub packaging: Packaging,
    pub delivery_method: DeliveryMethod,
    pub additional_comment: String,
}

/// Partial update for a [`DraftOrder`]; `None` fields are left as they are.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderPatch {
    pub product_id: Option<ProductId>,
    pub customer_name: Option<String>,
    pub customer_contact: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub packaging: Option<Packaging>,
    pub delivery_method: Option<DeliveryMethod>,
    pub additional_comment: Option<String>,
}

impl DraftOrder {
    /// A fresh draft, pre-filled with the customer's name and username when known.
    pub fn seeded(identity: Option<&Identity>) -> Self {
        match identity {
            Some(identity) => Self {
                customer_name: identity.full_name.clone(),
                customer_contact: identity.username.clone(),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// Shallow merge: every field set in `patch` replaces the draft's value.
    pub fn merge(&mut self, patch: OrderPatch) {
        if let Some(product_id) = patch.product_id {
            self.product_id = Some(product_id);
        }
        if let Some(name) = patch.customer_name {
            self.customer_name = name;
        }
        if let Some(contact) = patch.customer_contact {
            self.customer_contact = contact;
        }
        if let Some(date) = patch.delivery_date {
            self.delivery_date = Some(date);
        }
        if let Some(packaging) = patch.packaging {
            self.packaging = packaging;
        }
        if let Some(method) = patch.delivery_method {
            self.delivery_method = method;
        }
        if let Some(comment) = patch.additional_comment {
            self.additional_comment = comment;
        }
    }

    /// Checks the required fields and builds the payload for `POST /orders`.
    ///
    /// `today` is the submission date; a delivery date before it is rejected.
    pub fn validate(
        &self,
        product: &Product,
        customer_id: Option<&str>,
        today: NaiveDate,
    ) -> Result<OrderRequest, OrderValidationError> {
        match &self.product_id {
            Some(id) if *id == product.id => {}
            _ => return Err(OrderValidationError::MissingProduct),
        }
        if !product.is_available {
            return Err(OrderValidationError::Unavailable);
        }
        if self.customer_name.trim().is_empty() {
            return Err(OrderValidationError::MissingName);
        }
        if self.customer_contact.trim().is_empty() {
            return Err(OrderValidationError::MissingContact);
        }
        let delivery_date = self
            .delivery_date
            .ok_or(OrderValidationError::MissingDate)?;
        if delivery_date < today {
            return Err(OrderValidationError::DateInPast {
                requested: delivery_date,
                today,
            });
        }

        Ok(OrderRequest {
            customer_id: customer_id.map(str::to_string),
            customer_name: self.customer_name.trim().to_string(),
            customer_contact: self.customer_contact.trim().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            delivery_date,
            packaging: self.packaging,
            delivery_method: self.delivery_method,
            additional_comment: self.additional_comment.clone(),
        })
    }
}

/// Payload for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_contact: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub delivery_date: NaiveDate,
    pub packaging: Packaging,
    pub delivery_method: DeliveryMethod,
    pub additional_comment: String,
}

/// Reasons a draft cannot be submitted. Caught before any network call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderValidationError {
    #[error("No product selected for this order")]
    MissingProduct,

    #[error("This product is currently unavailable")]
    Unavailable,

    #[error("Please enter your name")]
    MissingName,

    #[error("Please enter a phone number or Telegram contact")]
    MissingContact,

    #[error("Please choose the date you need the order by")]
    MissingDate,

    #[error("The delivery date {requested} is in the past (today is {today})")]
    DateInPast { requested: NaiveDate, today: NaiveDate },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HostUser;

    fn cake() -> Product {
        Product {
            id: ProductId::from("p1"),
            name: "Medovik".into(),
            category_id: None,
            description: None,
            ingredients: None,
            price: Some(1800.0),
            images: vec![],
            is_available: true,
            additional_info: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled_draft() -> DraftOrder {
        let mut draft = DraftOrder::default();
        draft.merge(OrderPatch {
            product_id: Some(ProductId::from("p1")),
            customer_name: Some("Anna".into()),
            customer_contact: Some("@anna".into()),
            delivery_date: Some(date(2026, 5, 10)),
            ..OrderPatch::default()
        });
        draft
    }

    #[test]
    fn test_merge_only_touches_given_fields() {
        let mut draft = filled_draft();
        let before = draft.clone();

        draft.merge(OrderPatch {
            packaging: Some(Packaging::Gift),
            ..OrderPatch::default()
        });

        assert_eq!(draft.packaging, Packaging::Gift);
        assert_eq!(
            DraftOrder {
                packaging: before.packaging,
                ..draft.clone()
            },
            before
        );
    }

    #[test]
    fn test_seeded_from_identity() {
        let identity = Identity::from(HostUser {
            id: 1,
            first_name: "Anna".into(),
            last_name: Some("Petrova".into()),
            username: Some("anna_p".into()),
            language_code: None,
        });

        let draft = DraftOrder::seeded(Some(&identity));
        assert_eq!(draft.customer_name, "Anna Petrova");
        assert_eq!(draft.customer_contact, "anna_p");
        assert_eq!(draft.packaging, Packaging::Standard);
        assert_eq!(draft.delivery_method, DeliveryMethod::Pickup);

        assert_eq!(DraftOrder::seeded(None), DraftOrder::default());
    }

    #[test]
    fn test_past_date_rejected() {
        let draft = filled_draft();
        let result = draft.validate(&cake(), None, date(2026, 5, 11));
        assert!(matches!(
            result,
            Err(OrderValidationError::DateInPast { .. })
        ));
    }

    #[test]
    fn test_same_day_accepted() {
        let draft = filled_draft();
        let request = draft
            .validate(&cake(), Some("42"), date(2026, 5, 10))
            .unwrap();

        assert_eq!(request.customer_id.as_deref(), Some("42"));
        assert_eq!(request.product_name, "Medovik");
        assert_eq!(request.delivery_date, date(2026, 5, 10));
    }

    #[test]
    fn test_required_fields() {
        let mut draft = filled_draft();
        draft.customer_contact = "   ".into();
        assert_eq!(
            draft.validate(&cake(), None, date(2026, 1, 1)),
            Err(OrderValidationError::MissingContact)
        );

        let mut draft = filled_draft();
        draft.delivery_date = None;
        assert_eq!(
            draft.validate(&cake(), None, date(2026, 1, 1)),
            Err(OrderValidationError::MissingDate)
        );

        let mut unavailable = cake();
        unavailable.is_available = false;
        assert_eq!(
            filled_draft().validate(&unavailable, None, date(2026, 1, 1)),
            Err(OrderValidationError::Unavailable)
        );
    }

    #[test]
    fn test_payload_uses_backend_labels() {
        let mut draft = filled_draft();
        draft.merge(OrderPatch {
            packaging: Some(Packaging::Eco),
            delivery_method: Some(DeliveryMethod::Delivery),
            ..OrderPatch::default()
        });
        let request = draft.validate(&cake(), None, date(2026, 1, 1)).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["packaging"], "Эко-упаковка");
        assert_eq!(json["deliveryMethod"], "Доставка");
        assert_eq!(json["deliveryDate"], "2026-05-10");
        assert_eq!(json["productId"], "p1");
        assert!(json["customerId"].is_null());
    }

    #[test]
    fn test_option_order_is_stable() {
        assert_eq!(Packaging::ALL[0], Packaging::default());
        assert_eq!(DeliveryMethod::ALL[0], DeliveryMethod::default());
        assert_eq!(Packaging::ALL.len(), 4);
    }
}
