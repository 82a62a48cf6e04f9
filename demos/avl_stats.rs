use ordered_trees::AvlTree;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut tree = AvlTree::new();

    for value in [73, 62, 14, 65, 12, 72, 91, 18, 45, 69, 0, 15, 99, 35] {
        tree.insert(value).expect("values are distinct");
    }
    for value in [15, 14] {
        tree.remove(&value).expect("value was inserted");
    }
    for value in [95, 80, 105, 85] {
        tree.insert(value).expect("values are distinct");
    }
    for value in [0, 12, 95] {
        tree.remove(&value).expect("value was inserted");
    }
    for value in [63, 64] {
        tree.insert(value).expect("values are distinct");
    }
    tree.remove(&45).expect("value was inserted");

    println!("Size: {}", tree.len());
    println!("Height: {}", tree.height());
    print!("Elements: ");
    tree.print();
    println!("Rotations: {}", tree.rotation_count());
    println!("Leaves: {}", tree.leaf_count());
    println!("Internal nodes: {}", tree.internal_node_count());

    let levels: Vec<usize> = tree.nodes_per_level();
    for (level, nodes) in levels.iter().enumerate() {
        println!("Level {level}: {nodes} nodes");
    }
}
