//! The service seam over a shared repository.

use std::sync::Arc;

use cars::{Car, CarRepository, CarsService, InMemoryCarRepository, RepositoryError, RepositoryService};

use crate::support::civic;

#[test]
fn service_and_repository_share_storage() {
    let repo = InMemoryCarRepository::new();
    let service = RepositoryService::new(repo.clone());

    let created = service.create(civic()).unwrap();
    assert_eq!(repo.find(&created.id).unwrap(), created);
    assert_eq!(service.repo().list().len(), 1);
}

#[test]
fn trait_object_service() {
    let service: Arc<dyn CarsService> = Arc::new(RepositoryService::new(InMemoryCarRepository::new()));

    assert!(service.get_cars().is_empty());
    let created = service.create(civic()).unwrap();
    assert_eq!(service.get_cars(), vec![created.clone()]);

    let stale = Car {
        id: "missing00".into(),
        ..created
    };
    assert_eq!(
        service.update(stale).unwrap_err(),
        RepositoryError::NotFound("missing00".into())
    );
}
