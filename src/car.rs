use serde::{Deserialize, Serialize};

/// A car in the inventory.
///
/// `id` is empty until the repository saves the car and assigns one.
/// Missing JSON fields decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Car {
    pub id: String,
    pub make: String,
    pub model: String,
    pub package: String,
    pub color: String,
    pub year: i64,
    /// Serialized as `Category` for compatibility with existing clients.
    #[serde(rename = "Category")]
    pub category: String,
    pub mileage: i64,
    pub price: i64,
}

impl Car {
    /// Create an unsaved car with the given make, model and year.
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i64) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            ..Self::default()
        }
    }

    /// Whether the repository has assigned this car an identifier.
    pub fn is_saved(&self) -> bool {
        !self.id.is_empty()
    }
}
