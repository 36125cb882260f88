//! Box-drawing tree dumps for debugging.

use std::fmt::Debug;

use crate::types::{BinaryTree, KvNode, Node};

type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Renders `children` under a parent line, one branch each.
pub fn print_tree(tab: &str, children: &[&PrintChild<'_>]) -> String {
    let mut out = String::new();
    let Some(last) = children.len().checked_sub(1) else {
        return out;
    };

    for (i, child_fn) in children.iter().enumerate() {
        let is_last = i == last;
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
        let child = child_fn(&child_tab);
        let branch = if child.is_empty() {
            "│"
        } else if is_last {
            "└─"
        } else {
            "├─"
        };

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        if !child.is_empty() {
            out.push(' ');
            out.push_str(&child);
        }
    }

    out
}

/// Renders the subtree at `root` given a node's `(left, right)` children and
/// its label.
///
/// Leaves print on one line; an inner node lists both sides, an absent side
/// as `∅`.
pub fn render<C, L>(root: Option<u32>, children: C, label: L) -> String
where
    C: Fn(u32) -> (Option<u32>, Option<u32>),
    L: Fn(u32) -> String,
{
    fn node(
        children: &dyn Fn(u32) -> (Option<u32>, Option<u32>),
        label: &dyn Fn(u32) -> String,
        idx: Option<u32>,
        tab: &str,
    ) -> String {
        let Some(i) = idx else {
            return "∅".to_string();
        };
        let (l, r) = children(i);
        let mut out = label(i);
        if l.is_none() && r.is_none() {
            return out;
        }
        let left = |tab: &str| format!("← {}", node(children, label, l, tab));
        let right = |tab: &str| format!("→ {}", node(children, label, r, tab));
        let branches: [&PrintChild<'_>; 2] = [&left, &right];
        out.push_str(&print_tree(tab, &branches));
        out
    }

    node(&children, &label, root, "")
}

/// `key = data` with the tree's per-node tag in brackets.
pub fn label<K: Debug, V: Debug>(key: &K, data: &V, tag: Option<String>) -> String {
    match tag {
        Some(tag) => format!("{key:?} = {data:?} [{tag}]"),
        None => format!("{key:?} = {data:?}"),
    }
}

/// Dumps a plain, AVL or red-black tree.
pub fn print<T>(tree: &T) -> String
where
    T: BinaryTree + ?Sized,
    T::Key: Debug,
    T::Data: Debug,
{
    render(
        tree.root(),
        |i| (tree.node(i).l(), tree.node(i).r()),
        |i| {
            let n = tree.node(i);
            label(n.key(), n.data(), tree.node_tag(i))
        },
    )
}
