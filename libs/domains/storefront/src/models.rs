use serde::{Deserialize, Deserializer, Serialize, de};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Collection holding [`Product`] documents
pub const PRODUCT_COLLECTION: &str = "product";
/// Collection holding [`Category`] documents
pub const CATEGORY_COLLECTION: &str = "category";
/// Collection holding [`Order`] documents
pub const ORDER_COLLECTION: &str = "order";
/// Collection holding [`ContactMessage`] documents
pub const CONTACT_COLLECTION: &str = "contactmessage";

/// Maximum number of documents returned by a listing endpoint
pub const LIST_LIMIT: i64 = 50;

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Accept any integer, or a float with no fractional part (`2.0`).
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct WholeNumber;

    impl de::Visitor<'_> for WholeNumber {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a whole number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}

/// Order status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Paid,
    Pending,
    Failed,
}

/// Product listed in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Product {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    /// Image URL
    pub image: Option<String>,
}

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Category {
    pub name: String,
    /// URL-safe identifier
    pub slug: String,
    pub description: Option<String>,
}

/// One line of an order, snapshotting the product at purchase time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItem {
    /// Referenced product; not checked against the catalogue
    pub product_id: String,
    pub title: String,
    #[serde(deserialize_with = "whole_number")]
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// Recorded checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Order {
    #[validate(nested)]
    pub items: Vec<OrderItem>,
    #[validate(range(min = 0.0))]
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[validate(email)]
    pub customer_email: Option<String>,
}

/// Message sent through the contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactMessage {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Customer record. Not exposed by any endpoint yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct User {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub address: String,
    #[validate(range(min = 0, max = 120))]
    pub age: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request body for `POST /api/contact`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContact {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(email)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<CreateContact> for ContactMessage {
    fn from(input: CreateContact) -> Self {
        Self {
            name: input.name,
            email: input.email,
            subject: input.subject,
            message: input.message,
        }
    }
}

/// Request body for `POST /api/checkout`
///
/// `items` is taken as raw JSON so that each line can be checked against
/// [`OrderItem`] individually and reported by index.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[schema(value_type = Vec<OrderItem>)]
    pub items: Vec<serde_json::Value>,
    #[validate(range(min = 0.0))]
    #[schema(example = 19.98)]
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[validate(email)]
    pub customer_email: Option<String>,
}

/// Query parameters for `GET /api/products`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact category match
    pub category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub success: bool,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_product_defaults_and_ignores_unknown_fields() {
        let product: Product = serde_json::from_value(json!({
            "title": "Widget",
            "price": 9.99,
            "category": "tools",
            "sku": "W-1"
        }))
        .unwrap();

        assert!(product.in_stock);
        assert_eq!(product.description, None);
        assert_eq!(product.image, None);
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_product_rejects_empty_title_and_negative_price() {
        let product = Product {
            title: String::new(),
            description: None,
            price: -1.0,
            category: "tools".into(),
            in_stock: true,
            image: None,
        };

        let errors = product.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("price"));
    }

    #[test]
    fn test_order_item_quantity_must_be_positive() {
        let item = OrderItem {
            product_id: "p1".into(),
            title: "Widget".into(),
            quantity: 0,
            price: 1.0,
        };
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_order_item_quantity_accepts_whole_floats_and_large_values() {
        let item = |quantity: Value| {
            serde_json::from_value::<OrderItem>(json!({
                "product_id": "p1",
                "title": "Widget",
                "quantity": quantity,
                "price": 1.0
            }))
        };

        assert_eq!(item(json!(2.0)).unwrap().quantity, 2);
        assert_eq!(item(json!(3_000_000_000_i64)).unwrap().quantity, 3_000_000_000);
        assert!(item(json!(2.5)).is_err());
        assert!(item(json!("2")).is_err());
    }

    #[test]
    fn test_order_defaults() {
        let order: Order = serde_json::from_value(json!({ "items": [], "total": 0.0 })).unwrap();
        assert_eq!(order.currency, "USD");
        assert_eq!(order.status, OrderStatus::Paid);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_order_validates_nested_items_and_email() {
        let order = Order {
            items: vec![OrderItem {
                product_id: "p1".into(),
                title: "Widget".into(),
                quantity: 1,
                price: -0.5,
            }],
            total: 1.0,
            currency: "USD".into(),
            status: OrderStatus::Paid,
            customer_email: Some("nope".into()),
        };

        let errors = order.validate().unwrap_err();
        assert!(errors.errors().contains_key("items"));
        assert!(errors.field_errors().contains_key("customer_email"));
    }

    #[test]
    fn test_order_status_wire_format() {
        assert_eq!(serde_json::to_value(OrderStatus::Paid).unwrap(), json!("paid"));
        assert_eq!(OrderStatus::Failed.to_string(), "failed");
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
    }

    #[test]
    fn test_user_age_bounds() {
        let mut user = User {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            address: "1 Loop St".into(),
            age: Some(121),
            is_active: true,
        };
        assert!(user.validate().is_err());

        user.age = None;
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_create_order_currency_default() {
        let input: CreateOrder =
            serde_json::from_value(json!({ "items": [], "total": 5.0 })).unwrap();
        assert_eq!(input.currency, "USD");
        assert_eq!(input.customer_email, None);
    }

    #[test]
    fn test_create_order_requires_total() {
        let result = serde_json::from_value::<CreateOrder>(json!({ "items": [] }));
        assert!(result.is_err());
    }
}
