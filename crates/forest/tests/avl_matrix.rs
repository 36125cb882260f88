use forest::metrics::MetricsRegistry;
use forest::{AvlTree, BinaryTree, SearchTree, TreeError};

const BASIC: [i32; 11] = [23, 4, 30, 11, 7, 34, 20, 24, 22, 15, 1];

fn tree_of(keys: &[i32]) -> AvlTree<i32, String> {
    let mut tree = AvlTree::new();
    for &k in keys {
        tree.insert(k, k.to_string()).unwrap();
        tree.assert_valid().unwrap();
    }
    tree
}

fn preorder(tree: &AvlTree<i32, String>) -> Vec<i32> {
    tree.preorder_traverse().map(|(k, _)| *k).collect()
}

fn inorder(tree: &AvlTree<i32, String>) -> Vec<(i32, String)> {
    tree.inorder_traverse().map(|(k, v)| (*k, v.clone())).collect()
}

#[test]
fn avl_basic_shape_matrix() {
    let tree = tree_of(&BASIC);
    assert_eq!(preorder(&tree), vec![23, 11, 4, 1, 7, 20, 15, 22, 30, 24, 34]);
    assert_eq!(
        tree.postorder_traverse().map(|(k, _)| *k).collect::<Vec<_>>(),
        vec![1, 7, 4, 15, 22, 20, 11, 24, 34, 30, 23]
    );
    assert_eq!(tree.tree_height(), 3);
    let root = tree.root().unwrap();
    assert_eq!(tree.height(root), 3);
    assert_eq!(tree.balance_factor(root), 1);
}

#[test]
fn avl_rotation_patterns_matrix() {
    // Left-Left, Right-Right, Left-Right, Right-Left.
    for (keys, root) in [
        ([3, 2, 1], 2),
        ([1, 2, 3], 2),
        ([3, 1, 2], 2),
        ([1, 3, 2], 2),
    ] {
        let tree = tree_of(&keys);
        assert_eq!(tree.root().map(|r| *tree.key(r)), Some(root));
        assert_eq!(tree.tree_height(), 1);
    }
}

#[test]
fn avl_delete_sequence_matrix() {
    let mut tree = tree_of(&BASIC);

    tree.delete(&15);
    tree.assert_valid().unwrap();
    assert_eq!(preorder(&tree), vec![23, 11, 4, 1, 7, 20, 22, 30, 24, 34]);

    tree.delete(&20);
    tree.assert_valid().unwrap();
    assert_eq!(preorder(&tree), vec![23, 11, 4, 1, 7, 22, 30, 24, 34]);

    tree.insert(17, "17".to_string()).unwrap();
    tree.assert_valid().unwrap();
    assert_eq!(preorder(&tree), vec![23, 11, 4, 1, 7, 22, 17, 30, 24, 34]);

    tree.delete(&22);
    tree.assert_valid().unwrap();
    assert_eq!(preorder(&tree), vec![23, 11, 4, 1, 7, 17, 30, 24, 34]);

    // Two children, then a left-left rotation below the root.
    tree.delete(&11);
    tree.assert_valid().unwrap();
    assert_eq!(preorder(&tree), vec![23, 4, 1, 17, 7, 30, 24, 34]);
    assert_eq!(
        inorder(&tree),
        [1, 4, 7, 17, 23, 24, 30, 34]
            .into_iter()
            .map(|k| (k, k.to_string()))
            .collect::<Vec<_>>()
    );
}

#[test]
fn avl_delete_two_children_right_left_matrix() {
    let mut tree = tree_of(&[37, 29, 55, 17, 41, 63, 57]);
    tree.delete(&37);
    tree.assert_valid().unwrap();
    assert_eq!(preorder(&tree), vec![41, 29, 17, 57, 55, 63]);
}

#[test]
fn avl_delete_two_children_left_right_matrix() {
    let mut tree = tree_of(&[37, 29, 55, 17, 35, 63, 31]);
    tree.delete(&37);
    tree.assert_valid().unwrap();
    assert_eq!(preorder(&tree), vec![35, 29, 17, 31, 55, 63]);
}

#[test]
fn avl_delete_rotates_on_several_levels_matrix() {
    // Minimal height-4 AVL tree; removing the leaf on its short side
    // unbalances two ancestors in turn.
    let keys = [8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1];
    let mut registry = MetricsRegistry::new();
    let mut tree = AvlTree::with_registry(&mut registry);
    for k in keys {
        tree.insert(k, ()).unwrap();
    }
    let rotations = registry.counter("avlt.rotate").unwrap();
    let before = rotations.count();

    tree.delete(&12);
    tree.assert_valid().unwrap();
    assert_eq!(rotations.count() - before, 2);
    assert_eq!(tree.root().map(|r| *tree.key(r)), Some(5));
    assert_eq!(tree.tree_height(), 3);
}

#[test]
fn avl_duplicate_insert_matrix() {
    let mut tree = tree_of(&BASIC);
    let before = preorder(&tree);
    assert_eq!(tree.insert(7, "x".to_string()), Err(TreeError::DuplicateKey(7)));
    assert_eq!(preorder(&tree), before);
    tree.assert_valid().unwrap();
}

#[test]
fn avl_ladder_insert_delete_matrix() {
    let mut tree = AvlTree::new();
    for i in 0..300 {
        tree.insert(i, i).unwrap();
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 300);
    assert!(tree.tree_height() <= 9);

    for i in (0..300).step_by(3) {
        tree.delete(&i);
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 200);

    for i in 0..300 {
        assert_eq!(tree.get(&i).is_some(), i % 3 != 0);
    }
}

#[test]
fn avl_metrics_matrix() {
    let mut registry = MetricsRegistry::new();
    let mut tree = AvlTree::with_registry(&mut registry);
    for k in BASIC {
        tree.insert(k, ()).unwrap();
    }

    assert_eq!(registry.counter("avlt.rotate").unwrap().count(), 6);
    let heights = registry.histogram("avlt.height").unwrap();
    assert_eq!(heights.len(), BASIC.len());
    assert_eq!(heights.values().last(), Some(&3));

    // A rejected insert records nothing.
    assert!(tree.insert(23, ()).is_err());
    assert_eq!(heights.len(), BASIC.len());
}
