//! Repository behaviour under sequences of saves and updates.

use std::collections::HashSet;
use std::sync::Arc;

use cars::{Car, CarRepository, IdGenerator, InMemoryCarRepository, RepositoryError};

use crate::support::{civic, fleet, is_identifier, without_id};

#[test]
fn honda_civic_scenario() {
    let repo = InMemoryCarRepository::new();
    let saved = repo.save(civic()).unwrap();
    assert!(is_identifier(&saved.id));

    let found = repo.find(&saved.id).unwrap();
    assert_eq!(found.make, "Honda");
    assert_eq!(found.model, "Civic");
    assert_eq!(found.year, 2020);
    assert_eq!(found.id, saved.id);
}

#[test]
fn saves_never_share_an_identifier() {
    let repo = InMemoryCarRepository::new();
    let ids: HashSet<String> = fleet(500)
        .into_iter()
        .map(|car| repo.save(car).unwrap().id)
        .collect();
    assert_eq!(ids.len(), 500);
}

#[test]
fn find_returns_what_was_saved() {
    let repo = InMemoryCarRepository::new();
    for car in fleet(20) {
        let saved = repo.save(car.clone()).unwrap();
        let found = repo.find(&saved.id).unwrap();
        assert_eq!(without_id(found), car);
    }
}

#[test]
fn update_of_unknown_id_changes_nothing() {
    let repo = InMemoryCarRepository::new();
    for car in fleet(3) {
        repo.save(car).unwrap();
    }
    let mut before = repo.list();
    before.sort_by(|a, b| a.id.cmp(&b.id));

    let ghost = Car {
        id: "zzzzzzzzz".into(),
        ..civic()
    };
    assert_eq!(
        repo.update(ghost),
        Err(RepositoryError::NotFound("zzzzzzzzz".into()))
    );

    let mut after = repo.list();
    after.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(before, after);
}

#[test]
fn list_reflects_every_save() {
    let repo = InMemoryCarRepository::new();
    assert!(repo.list().is_empty());

    let cars = fleet(12);
    for car in &cars {
        repo.save(car.clone()).unwrap();
    }

    let mut listed: Vec<Car> = repo.list().into_iter().map(without_id).collect();
    let mut expected = cars;
    listed.sort_by(|a, b| a.model.cmp(&b.model));
    expected.sort_by(|a, b| a.model.cmp(&b.model));
    assert_eq!(listed, expected);
}

#[test]
fn concurrent_saves_on_an_empty_store() {
    let repo = Arc::new(InMemoryCarRepository::new());
    let threads = 16;
    let per_thread = 50;

    std::thread::scope(|s| {
        for t in 0..threads {
            let repo = repo.clone();
            s.spawn(move || {
                for car in fleet(per_thread) {
                    let car = Car {
                        color: format!("thread-{t}"),
                        ..car
                    };
                    repo.save(car).unwrap();
                }
            });
        }
    });

    let listed = repo.list();
    assert_eq!(listed.len(), threads * per_thread);
    let ids: HashSet<&str> = listed.iter().map(|car| car.id.as_str()).collect();
    assert_eq!(ids.len(), threads * per_thread);
    assert!(ids.iter().all(|id| is_identifier(id)));
}

#[test]
fn concurrent_updates_and_reads_never_tear() {
    let repo = InMemoryCarRepository::new();
    let saved = repo.save(civic()).unwrap();

    std::thread::scope(|s| {
        for price in 1..=8i64 {
            let repo = repo.clone();
            let id = saved.id.clone();
            s.spawn(move || {
                let car = Car {
                    id,
                    price,
                    mileage: price,
                    ..civic()
                };
                repo.update(car).unwrap();
            });
        }
        for _ in 0..4 {
            let repo = repo.clone();
            let id = saved.id.clone();
            s.spawn(move || {
                for _ in 0..100 {
                    let car = repo.find(&id).unwrap();
                    assert_eq!(car.price, car.mileage);
                }
            });
        }
    });

    let last = repo.find(&saved.id).unwrap();
    assert!((1..=8).contains(&last.price));
}

#[test]
fn applying_an_update_twice_equals_once() {
    let once = InMemoryCarRepository::with_generator(IdGenerator::seeded(11), 9);
    let twice = InMemoryCarRepository::with_generator(IdGenerator::seeded(11), 9);

    let a = once.save(civic()).unwrap();
    let b = twice.save(civic()).unwrap();
    assert_eq!(a.id, b.id);

    let change = Car {
        color: "red".into(),
        price: 21000,
        ..a.clone()
    };
    once.update(change.clone()).unwrap();
    twice.update(change.clone()).unwrap();
    twice.update(change).unwrap();

    assert_eq!(once.list(), twice.list());
}

#[test]
fn repository_behind_arc() {
    let repo: Arc<dyn CarRepository> = Arc::new(InMemoryCarRepository::new());
    let saved = repo.save(civic()).unwrap();
    assert_eq!(repo.find(&saved.id).unwrap(), saved);
}
