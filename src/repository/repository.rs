use std::sync::Arc;

use super::error::RepositoryError;
use crate::car::Car;

/// Storage for cars.
///
/// Each operation is atomic with respect to concurrent callers.
pub trait CarRepository: Send + Sync {
    /// Get the car stored under `id`.
    fn find(&self, id: &str) -> Result<Car, RepositoryError>;

    /// Snapshot of every stored car, in no particular order.
    fn list(&self) -> Vec<Car>;

    /// Store a new car under a freshly generated identifier and return it.
    ///
    /// Fails with [`RepositoryError::DuplicateKey`] when a car is already
    /// stored under the identifier `car` carries. That identifier is
    /// otherwise discarded.
    fn save(&self, car: Car) -> Result<Car, RepositoryError>;

    /// Replace the car stored under `car.id` and return the stored value.
    fn update(&self, car: Car) -> Result<Car, RepositoryError>;
}

// Shared handles are repositories too.
impl<R: CarRepository + ?Sized> CarRepository for Arc<R> {
    fn find(&self, id: &str) -> Result<Car, RepositoryError> {
        (**self).find(id)
    }

    fn list(&self) -> Vec<Car> {
        (**self).list()
    }

    fn save(&self, car: Car) -> Result<Car, RepositoryError> {
        (**self).save(car)
    }

    fn update(&self, car: Car) -> Result<Car, RepositoryError> {
        (**self).update(car)
    }
}
