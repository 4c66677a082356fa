//! Customer, delivery and submission records for the order form.

use crate::cart_actor::CartError;
use crate::model::{CartId, CartLine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message shown once an order has been accepted.
pub const CONFIRMATION_MESSAGE: &str =
    "Objednávka byla úspěšně odeslána! Brzy vás budeme kontaktovat.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    Delivery,
    Pickup,
}

/// When the customer wants the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTime {
    Asap,
    #[serde(rename = "30min")]
    In30Minutes,
    #[serde(rename = "1hour")]
    In1Hour,
    /// Free-form time agreed with the customer.
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInfo {
    #[serde(rename = "type")]
    pub kind: DeliveryKind,
    pub address: Option<String>,
    pub time: DeliveryTime,
}

impl DeliveryInfo {
    pub fn pickup(time: DeliveryTime) -> Self {
        Self {
            kind: DeliveryKind::Pickup,
            address: None,
            time,
        }
    }

    pub fn delivery(address: impl Into<String>, time: DeliveryTime) -> Self {
        Self {
            kind: DeliveryKind::Delivery,
            address: Some(address.into()),
            time,
        }
    }
}

/// Everything the order form collects besides the cart itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub customer: CustomerInfo,
    pub delivery: DeliveryInfo,
    pub notes: Option<String>,
}

impl OrderDetails {
    pub fn new(customer: CustomerInfo, delivery: DeliveryInfo) -> Self {
        Self {
            customer,
            delivery,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks the fields the form marks as required.
    pub fn validate(&self) -> Result<(), CartError> {
        let required = [
            ("name", &self.customer.name),
            ("phone", &self.customer.phone),
            ("email", &self.customer.email),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CartError::MissingField(*field));
        }

        let has_address = self
            .delivery
            .address
            .as_deref()
            .is_some_and(|address| !address.trim().is_empty());
        if self.delivery.kind == DeliveryKind::Delivery && !has_address {
            return Err(CartError::MissingDeliveryAddress);
        }
        Ok(())
    }
}

/// The order as it would be sent to the restaurant.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSubmission {
    pub reference: Uuid,
    pub cart_id: CartId,
    pub customer: CustomerInfo,
    pub delivery: DeliveryInfo,
    pub items: Vec<CartLine>,
    pub total: u64,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// What the customer gets back after submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub reference: Uuid,
    pub total: u64,
    pub message: String,
}

impl From<&OrderSubmission> for Confirmation {
    fn from(submission: &OrderSubmission) -> Self {
        Self {
            reference: submission.reference,
            total: submission.total,
            message: CONFIRMATION_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> OrderDetails {
        OrderDetails::new(
            CustomerInfo::new("Vito", "+420 777 123 456", "vito@example.com"),
            DeliveryInfo::pickup(DeliveryTime::Asap),
        )
    }

    #[test]
    fn test_valid_pickup_order() {
        assert_eq!(details().validate(), Ok(()));
    }

    #[test]
    fn test_blank_customer_fields_are_rejected() {
        let mut order = details();
        order.customer.phone = "   ".into();
        assert_eq!(order.validate(), Err(CartError::MissingField("phone")));

        order.customer.name.clear();
        assert_eq!(order.validate(), Err(CartError::MissingField("name")));
    }

    #[test]
    fn test_delivery_requires_address() {
        let mut order = details();
        order.delivery.kind = DeliveryKind::Delivery;
        assert_eq!(order.validate(), Err(CartError::MissingDeliveryAddress));

        order.delivery = DeliveryInfo::delivery("Vinohradská 12, Praha", DeliveryTime::In1Hour);
        assert_eq!(order.validate(), Ok(()));
    }

    #[test]
    fn test_delivery_info_wire_names() {
        let info = DeliveryInfo::delivery("Praha", DeliveryTime::In30Minutes);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "delivery");
        assert_eq!(json["time"], "30min");
    }
}
