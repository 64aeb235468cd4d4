//! Car service - the seam between HTTP handlers and storage.
//!
//! `CarsService` is what the handlers depend on. `RepositoryService<R>` is a
//! pass-through over any [`CarRepository`](crate::CarRepository): results and
//! errors come back exactly as the repository returned them.
//!
//! ## Quick Start
//!
//! ```
//! use cars::{Car, CarsService, InMemoryCarRepository, RepositoryService};
//!
//! let service = RepositoryService::new(InMemoryCarRepository::new());
//! let car = service.create(Car::new("Honda", "Civic", 2020)).unwrap();
//! assert_eq!(service.get_car(&car.id).unwrap(), car);
//! ```

mod car_service;

pub use car_service::{CarsService, RepositoryService};
