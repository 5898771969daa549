//! Book model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::Record;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

impl Record for Book {
    const KIND: &'static str = "Book";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Book payload; used for both creation and full replacement
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "genre is required"))]
    pub genre: String,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64)]
    pub price: Decimal,
}

impl BookInput {
    pub fn into_book(self, id: String) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            price: self.price,
        }
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_positive() && !price.is_zero() {
        Ok(())
    } else {
        let mut error = ValidationError::new("price");
        error.message = Some("price must be greater than zero".into());
        Err(error)
    }
}
