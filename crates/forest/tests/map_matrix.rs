use forest::{
    AvlTree, BinarySearchTree, DoubleThreadedTree, ForestMap, RedBlackTree, SearchTree, TreeError,
};

#[test]
fn map_insert_upsert_update_matrix() {
    let mut map = ForestMap::new(AvlTree::new());
    map.insert("b", 2).unwrap();
    assert_eq!(map.insert("b", 3), Err(TreeError::DuplicateKey("b")));
    assert_eq!(map.get(&"b"), Some(&2));

    assert_eq!(map.upsert("b", 20), Some(2));
    assert_eq!(map.upsert("a", 10), None);
    assert_eq!(map.update("a", 11), Ok(10));
    assert_eq!(map.update("z", 0), Err(TreeError::KeyNotFound("z")));

    *map.get_mut(&"b").unwrap() += 1;
    let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, vec![("a", 11), ("b", 21)]);
    map.tree().assert_valid().unwrap();
}

#[test]
fn map_min_max_and_remove_matrix() {
    let mut map: ForestMap<RedBlackTree<i32, ()>> = ForestMap::default();
    assert_eq!(map.min(), Err(TreeError::EmptyTree));
    assert_eq!(map.max(), Err(TreeError::EmptyTree));

    for k in [5, 1, 9, 3] {
        map.insert(k, ()).unwrap();
    }
    assert_eq!(map.min(), Ok((&1, &())));
    assert_eq!(map.max(), Ok((&9, &())));

    assert!(map.remove(&9));
    assert!(!map.remove(&9));
    assert!(map.contains_key(&5));
    assert_eq!(map.max(), Ok((&5, &())));
    assert_eq!(map.len(), 3);

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.into_tree().len(), 0);
}

#[test]
fn map_collects_with_last_write_winning_matrix() {
    let map: ForestMap<DoubleThreadedTree<u8, char>> =
        [(3, 'c'), (1, 'a'), (3, 'C'), (2, 'b')].into_iter().collect();
    let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, vec![(1, 'a'), (2, 'b'), (3, 'C')]);
    map.tree().assert_valid().unwrap();

    let mut map: ForestMap<BinarySearchTree<u8, char>> = ForestMap::default();
    map.extend([(1, 'x'), (1, 'y')]);
    assert_eq!(map.get(&1), Some(&'y'));
    assert_eq!(map.len(), 1);
}
