use std::time::Instant;

use ordered_trees::{AvlDictionary, BstDictionary, Dictionary, SplayDictionary};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const NAMES: [(i32, &str); 9] = [
    (9, "Elix"),
    (17, "Monsalve"),
    (27, "Juan Pa"),
    (22, "Adrian"),
    (10, "Dcalvog25"),
    (11, "Isa Piedra"),
    (21, "David"),
    (79, "zostercr"),
    (8, "sel_alfaro_"),
];

fn exercise(label: &str, names: &mut dyn Dictionary<i32, String>) {
    println!("== {label}");
    for (key, name) in NAMES {
        names.insert(key, name.to_string()).expect("keys are distinct");
    }
    names.print();

    for key in [22, 8, 17, 79, 10, 100] {
        match names.get_value(&key) {
            Ok(name) => println!("get_value({key}): {name}"),
            Err(err) => println!("get_value({key}): {err}"),
        }
    }

    for key in [79, 21, 27, 9] {
        match names.remove(&key) {
            Ok(name) => println!("remove({key}): {name}"),
            Err(err) => println!("remove({key}): {err}"),
        }
    }
    names.print();

    for (key, name) in [(8, "Sele"), (17, "JC Monsalve")] {
        if let Err(err) = names.set_value(key, name.to_string()) {
            println!("set_value({key}): {err}");
        }
    }
    names.print();
    println!("keys: {:?}", names.keys());
    println!("values: {:?}", names.values());
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    exercise("avl", &mut AvlDictionary::<i32, String>::new());
    exercise("splay", &mut SplayDictionary::<i32, String>::new());
    exercise("bst", &mut BstDictionary::<i32, String>::new());

    let mut numbers = AvlDictionary::<i32, i32>::new();
    let start = Instant::now();
    for i in 0..=1_000_000 {
        numbers.insert(i, i).expect("keys are distinct");
    }
    tracing::info!(
        size = numbers.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "bulk insert into avl dictionary"
    );

    let mut numbers = SplayDictionary::<i32, i32>::new();
    let start = Instant::now();
    for i in 0..=1_000_000 {
        numbers.insert(i, i).expect("keys are distinct");
    }
    tracing::info!(
        size = numbers.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "bulk insert into splay dictionary"
    );
}
