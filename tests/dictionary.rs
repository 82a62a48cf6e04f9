use std::collections::VecDeque;

use ordered_trees::{
    AvlDictionary, AvlTree, BsTree, BstDictionary, Dictionary, DictionaryError, SplayDictionary,
    SplayTree,
};
use rstest::{fixture, rstest};

type Names = Box<dyn Dictionary<i32, String>>;

fn avl() -> Names {
    Box::new(AvlDictionary::<i32, String>::new())
}

fn splay() -> Names {
    Box::new(SplayDictionary::<i32, String>::new())
}

fn bst() -> Names {
    Box::new(BstDictionary::<i32, String>::new())
}

fn fill(names: &mut Names) {
    for (key, name) in [
        (9, "Elix"),
        (17, "Monsalve"),
        (27, "Juan Pa"),
        (22, "Adrian"),
        (10, "Dcalvog25"),
        (11, "Isa Piedra"),
        (21, "David"),
        (79, "zostercr"),
        (8, "sel_alfaro_"),
    ] {
        names.insert(key, name.to_string()).unwrap();
    }
}

#[fixture]
fn splay_names() -> SplayDictionary<i32, &'static str> {
    let mut names = SplayDictionary::new();
    names.insert(9, "Elix").unwrap();
    names.insert(17, "Monsalve").unwrap();
    names.insert(27, "JuanPa").unwrap();
    names
}

#[rstest]
#[case::avl(avl())]
#[case::splay(splay())]
#[case::bst(bst())]
fn test_sample_names(#[case] mut names: Names) {
    fill(&mut names);
    assert_eq!(names.len(), 9);

    assert_eq!(names.get_value(&22).map(String::as_str), Ok("Adrian"));
    assert_eq!(names.get_value(&8).map(String::as_str), Ok("sel_alfaro_"));
    assert_eq!(names.get_value(&17).map(String::as_str), Ok("Monsalve"));
    assert_eq!(names.get_value(&79).map(String::as_str), Ok("zostercr"));
    assert_eq!(names.get_value(&10).map(String::as_str), Ok("Dcalvog25"));

    for (key, name) in [(79, "zostercr"), (21, "David"), (27, "Juan Pa"), (9, "Elix")] {
        assert_eq!(names.remove(&key), Ok(name.to_string()));
    }
    assert_eq!(names.len(), 5);

    names.set_value(8, "Sele".to_string()).unwrap();
    names.set_value(17, "JC Monsalve".to_string()).unwrap();

    assert_eq!(names.keys(), vec![8, 10, 11, 17, 22]);
    assert_eq!(
        names.values(),
        vec!["Sele", "Dcalvog25", "Isa Piedra", "JC Monsalve", "Adrian"]
    );
}

#[rstest]
#[case::avl(avl())]
#[case::splay(splay())]
#[case::bst(bst())]
fn test_missing_key(#[case] mut names: Names) {
    fill(&mut names);
    assert_eq!(names.get_value(&100), Err(DictionaryError::KeyNotFound));
    assert_eq!(names.len(), 9);
    assert!(!names.contains(&100));
    assert_eq!(names.remove(&100), Err(DictionaryError::KeyNotFound));
    assert_eq!(names.len(), 9);
}

#[rstest]
#[case::avl(avl())]
#[case::splay(splay())]
#[case::bst(bst())]
fn test_duplicate_key(#[case] mut names: Names) {
    names.insert(5, "five".to_string()).unwrap();
    assert_eq!(
        names.insert(5, "again".to_string()),
        Err(DictionaryError::DuplicateKey)
    );
    assert_eq!(names.len(), 1);
    assert_eq!(names.get_value(&5).map(String::as_str), Ok("five"));
}

#[rstest]
#[case::avl(avl())]
#[case::splay(splay())]
#[case::bst(bst())]
fn test_set_value_requires_key(#[case] mut names: Names) {
    assert_eq!(
        names.set_value(1, "one".to_string()),
        Err(DictionaryError::KeyNotFound)
    );
    assert!(names.is_empty());
    if !names.contains(&1) {
        names.insert(1, "one".to_string()).unwrap();
    }
    names.set_value(1, "uno".to_string()).unwrap();
    assert_eq!(names.values(), vec!["uno"]);
}

#[rstest]
#[case::avl(avl())]
#[case::splay(splay())]
#[case::bst(bst())]
fn test_clear(#[case] mut names: Names) {
    fill(&mut names);
    names.clear();
    assert!(names.is_empty());
    assert!(names.keys().is_empty());
    names.clear();
    assert_eq!(names.len(), 0);
}

#[rstest]
fn test_splay_get_value_moves_key_to_root(mut splay_names: SplayDictionary<i32, &'static str>) {
    assert_eq!(splay_names.get_value(&17), Ok(&"Monsalve"));
    assert_eq!(splay_names.as_tree().root().map(|pair| pair.key), Some(17));

    // Listing keys and values leaves the tree as it is
    let keys: VecDeque<i32> = splay_names.keys_into::<i32, &str, _>();
    assert_eq!(keys, [9, 17, 27]);
    assert_eq!(splay_names.values(), vec!["Elix", "Monsalve", "JuanPa"]);
    assert_eq!(splay_names.as_tree().root().map(|pair| pair.key), Some(17));

    assert!(splay_names.contains(&9));
    assert_eq!(splay_names.as_tree().root().map(|pair| pair.key), Some(9));
}

#[rstest]
fn test_splay_failed_lookup_keeps_size(mut splay_names: SplayDictionary<i32, &'static str>) {
    assert_eq!(splay_names.get_value(&100), Err(DictionaryError::KeyNotFound));
    assert_eq!(splay_names.len(), 3);
    // The search ended at the largest key
    assert_eq!(splay_names.as_tree().root().map(|pair| pair.key), Some(27));
}

#[rstest]
#[case(&[73, 62, 14, 65, 12, 72, 91, 18, 45, 69, 0, 15, 99, 35])]
#[case(&[1, 2, 3, 4, 5, 6, 7])]
#[case(&[7, 6, 5, 4, 3, 2, 1])]
fn test_trees_agree(#[case] values: &[i32]) {
    let avl: AvlTree<i32> = values.iter().copied().collect();
    let splay: SplayTree<i32> = values.iter().copied().collect();
    let bst: BsTree<i32> = values.iter().copied().collect();
    let mut sorted = values.to_vec();
    sorted.sort();
    assert_eq!(avl.elements::<Vec<i32>>(), sorted);
    assert_eq!(splay.elements::<Vec<i32>>(), sorted);
    assert_eq!(bst.elements::<Vec<i32>>(), sorted);
    assert_eq!(avl.len(), splay.len());
    assert_eq!(avl.len(), bst.len());
}

#[test]
fn test_avl_ascending_height() {
    let mut tree = AvlTree::new();
    for value in 1..=7 {
        tree.insert(value).unwrap();
        assert!(tree.height() <= 3);
    }
    assert_eq!(tree.nodes_per_level::<Vec<usize>>(), vec![1, 2, 4]);
}

#[test]
fn test_bst_dictionary_keeps_insertion_shape() {
    let mut names = BstDictionary::<i32, &str>::new();
    for (key, name) in [(9, "Elix"), (17, "Monsalve"), (27, "JuanPa")] {
        names.insert(key, name).unwrap();
    }
    assert_eq!(names.get_value(&27), Ok(&"JuanPa"));
    assert_eq!(names.as_tree().root().map(|pair| pair.key), Some(9));
    assert_eq!(names.as_tree().height(), 3);
}
