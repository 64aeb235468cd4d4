use cars::Car;

pub fn civic() -> Car {
    Car::new("Honda", "Civic", 2020)
}

/// A varied fleet of unsaved cars.
pub fn fleet(n: usize) -> Vec<Car> {
    (0..n)
        .map(|i| Car {
            make: ["Honda", "Toyota", "Ford", "Mazda"][i % 4].to_string(),
            model: format!("model-{i}"),
            package: if i % 2 == 0 { "base".into() } else { "sport".into() },
            color: "silver".into(),
            year: 2000 + (i as i64 % 25),
            category: "Sedan".into(),
            mileage: i as i64 * 1000,
            price: 15000 + i as i64,
            ..Car::default()
        })
        .collect()
}

pub fn without_id(mut car: Car) -> Car {
    car.id.clear();
    car
}

pub fn is_identifier(id: &str) -> bool {
    id.len() == cars::DEFAULT_ID_LENGTH && id.bytes().all(|b| cars::ID_ALPHABET.contains(&b))
}
