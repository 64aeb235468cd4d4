mod car;
mod id;
pub mod metrics;
mod repository;
mod service;

#[cfg(feature = "http")]
pub mod config;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub mod logging;

pub use car::Car;
pub use id::{generate_id, IdGenerator, DEFAULT_ID_LENGTH, ID_ALPHABET};
pub use metrics::{Counter, Metrics};
pub use repository::{CarRepository, InMemoryCarRepository, RepositoryError};
pub use service::{CarsService, RepositoryService};
