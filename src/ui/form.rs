//! Product form state and client-side validation.
//!
//! Unlike the server, the form reports every failing field at once so the operator can
//! fix them in one pass. It is also stricter: price must be positive and stock must not be
//! negative.

use crate::{core::product::ProductPayload, entities::ProductModel};
use std::fmt;
use std::str::FromStr;

/// Categories offered by the form's category picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Soft drinks
    Soda,
    /// Fruit juices
    Juice,
    /// Still and sparkling water
    Water,
    /// Shown as "Energy Drink"
    Energy,
}

impl Category {
    /// Every category, in picker order
    pub const ALL: [Self; 4] = [Self::Soda, Self::Juice, Self::Water, Self::Energy];

    /// Value submitted to the API
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Soda => "soda",
            Self::Juice => "juice",
            Self::Water => "water",
            Self::Energy => "energy",
        }
    }

    /// Text shown in the picker
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Soda => "Soda",
            Self::Juice => "Juice",
            Self::Water => "Water",
            Self::Energy => "Energy Drink",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.value() == value)
            .ok_or(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input fields of the product form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Product name
    Name,
    /// Description text
    Description,
    /// Unit price
    Price,
    /// Units on hand
    Stock,
    /// Category picker
    Category,
}

/// One failing field and the message to show next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    /// The failing field
    pub field: FormField,
    /// Text shown next to it
    pub message: &'static str,
}

/// Raw text of the create/edit form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Name input
    pub name: String,
    /// Description textarea
    pub description: String,
    /// Price input, parsed on validation
    pub price: String,
    /// Stock input, parsed on validation
    pub stock: String,
    /// Selected category value, empty when nothing is picked
    pub category: String,
}

impl ProductForm {
    /// Pre-fills the form for editing an existing product.
    #[must_use]
    pub fn from_product(product: &ProductModel) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            category: product.category.clone(),
        }
    }

    /// Sets one field from an input change event.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Description => self.description = value,
            FormField::Price => self.price = value,
            FormField::Stock => self.stock = value,
            FormField::Category => self.category = value,
        }
    }

    /// Checks every field and builds the payload to submit.
    ///
    /// # Errors
    /// Returns all failing fields, in form order.
    pub fn validate(&self) -> Result<ProductPayload, Vec<FormError>> {
        let mut errors = Vec::new();
        let mut fail = |field, message| errors.push(FormError { field, message });

        let name = self.name.trim();
        if name.is_empty() {
            fail(FormField::Name, "Product name is required");
        }

        let description = self.description.trim();
        if description.is_empty() {
            fail(FormField::Description, "Product description is required");
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price > 0.0);
        if price.is_none() {
            fail(FormField::Price, "Please enter a valid price");
        }

        let stock = self
            .stock
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|stock| *stock >= 0);
        if stock.is_none() {
            fail(FormField::Stock, "Please enter a valid stock quantity");
        }

        let category = self.category.parse::<Category>().ok();
        if category.is_none() {
            fail(FormField::Category, "Please select a category");
        }

        match (price, stock, category) {
            (Some(price), Some(stock), Some(category)) if errors.is_empty() => Ok(ProductPayload {
                name: name.to_string(),
                description: description.to_string(),
                price,
                stock,
                category: category.value().to_string(),
            }),
            _ => Err(errors),
        }
    }
}
