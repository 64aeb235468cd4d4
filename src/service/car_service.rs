use crate::car::Car;
use crate::repository::{CarRepository, RepositoryError};

/// Application-level car operations used by the HTTP handlers.
pub trait CarsService: Send + Sync {
    fn get_car(&self, id: &str) -> Result<Car, RepositoryError>;
    fn get_cars(&self) -> Vec<Car>;
    fn create(&self, car: Car) -> Result<Car, RepositoryError>;
    fn update(&self, car: Car) -> Result<Car, RepositoryError>;
}

/// A [`CarsService`] that forwards every call to a repository.
pub struct RepositoryService<R> {
    repo: R,
}

impl<R: CarRepository> RepositoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }
}

impl<R: CarRepository> CarsService for RepositoryService<R> {
    fn get_car(&self, id: &str) -> Result<Car, RepositoryError> {
        self.repo.find(id)
    }

    fn get_cars(&self) -> Vec<Car> {
        self.repo.list()
    }

    fn create(&self, car: Car) -> Result<Car, RepositoryError> {
        self.repo.save(car)
    }

    fn update(&self, car: Car) -> Result<Car, RepositoryError> {
        self.repo.update(car)
    }
}
