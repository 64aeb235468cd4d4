//! InMemoryCarRepository - HashMap-backed car storage behind a single lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::error::RepositoryError;
use super::repository::CarRepository;
use crate::car::Car;
use crate::id::{IdGenerator, DEFAULT_ID_LENGTH, ID_ALPHABET};

/// Draws of an already-taken identifier tolerated by one save.
const MAX_REDRAWS: usize = 10_000;

/// In-memory car repository.
///
/// One exclusive lock guards the whole map, so every operation runs alone.
/// Clone-friendly via Arc: clones share storage.
///
/// A poisoned lock is recovered, not reported as an error: no operation
/// panics while holding the guard, so the map behind a poisoned lock is
/// still consistent, and `list` stays infallible.
#[derive(Clone)]
pub struct InMemoryCarRepository {
    storage: Arc<Mutex<HashMap<String, Car>>>,
    ids: Arc<IdGenerator>,
    id_length: usize,
}

impl Default for InMemoryCarRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCarRepository {
    /// Create an empty repository assigning 9-character identifiers.
    pub fn new() -> Self {
        Self::with_generator(IdGenerator::new(), DEFAULT_ID_LENGTH)
    }

    /// Create an empty repository drawing `id_length`-character identifiers
    /// from `ids`.
    pub fn with_generator(ids: IdGenerator, id_length: usize) -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
            ids: Arc::new(ids),
            id_length,
        }
    }

    /// Length of the identifiers this repository assigns.
    pub fn id_length(&self) -> usize {
        self.id_length
    }

    /// Number of distinct identifiers of the configured length.
    fn keyspace(&self) -> usize {
        u32::try_from(self.id_length)
            .ok()
            .and_then(|exp| ID_ALPHABET.len().checked_pow(exp))
            .unwrap_or(usize::MAX)
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Car>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CarRepository for InMemoryCarRepository {
    fn find(&self, id: &str) -> Result<Car, RepositoryError> {
        self.storage()
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    fn list(&self) -> Vec<Car> {
        self.storage().values().cloned().collect()
    }

    fn save(&self, mut car: Car) -> Result<Car, RepositoryError> {
        let mut storage = self.storage();

        if storage.contains_key(&car.id) {
            return Err(RepositoryError::DuplicateKey(car.id));
        }

        let exhausted = RepositoryError::IdentifiersExhausted {
            length: self.id_length,
        };
        if storage.len() >= self.keyspace() {
            return Err(exhausted);
        }

        let mut id = self.ids.generate(self.id_length);
        let mut redraws = 0;
        while storage.contains_key(&id) {
            if redraws == MAX_REDRAWS {
                tracing::warn!(length = self.id_length, redraws, "no free identifier found");
                return Err(exhausted);
            }
            tracing::debug!(%id, "generated identifier already taken, drawing again");
            id = self.ids.generate(self.id_length);
            redraws += 1;
        }

        car.id = id;
        storage.insert(car.id.clone(), car.clone());
        Ok(car)
    }

    fn update(&self, car: Car) -> Result<Car, RepositoryError> {
        let mut storage = self.storage();

        match storage.get_mut(&car.id) {
            Some(stored) => {
                *stored = car;
                Ok(stored.clone())
            }
            None => Err(RepositoryError::NotFound(car.id)),
        }
    }
}
