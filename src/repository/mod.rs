//! Repository - storage for cars.
//!
//! [`CarRepository`] is the storage contract; [`InMemoryCarRepository`] is a
//! HashMap behind one exclusive lock.
//!
//! ## Example
//!
//! ```
//! use cars::{Car, CarRepository, InMemoryCarRepository};
//!
//! let repo = InMemoryCarRepository::new();
//! let saved = repo.save(Car::new("Honda", "Civic", 2020)).unwrap();
//! assert_eq!(saved.id.len(), 9);
//! assert_eq!(repo.find(&saved.id).unwrap(), saved);
//! ```

mod error;
mod in_memory;
mod repository;

pub use error::RepositoryError;
pub use in_memory::InMemoryCarRepository;
pub use repository::CarRepository;
