//! Line-oriented driver behind the `forest` binary.
//!
//! One command per line, applied to a single tree of the chosen kind with
//! `i64` keys and `String` data. Results go to the output as JSON (or as a
//! plain text dump for `print`); per-command failures go to the error
//! stream and processing continues.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use serde_json::{json, Value};
use thiserror::Error;

use crate::avl::AvlTree;
use crate::bst::BinarySearchTree;
use crate::error::TreeError;
use crate::print;
use crate::red_black::RedBlackTree;
use crate::threaded::{DoubleThreadedTree, LeftThreadedTree, RightThreadedTree};
use crate::types::{BinaryTree, Pairs, SearchTree};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tree(#[from] TreeError<i64>),
    #[error("unknown tree kind `{0}`")]
    UnknownKind(String),
    #[error("cannot parse `{line}`: {reason}")]
    Parse { line: String, reason: String },
    #[error("`{command}` is not supported by {kind} trees")]
    Unsupported { command: &'static str, kind: TreeKind },
    #[error("invariant violated: {0}")]
    Invalid(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Errors that end the session instead of being reported per line.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CliError::Parse { .. } | CliError::Json(_) | CliError::Io(_))
    }
}

// ── Tree kinds ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeKind {
    Bst,
    Avl,
    RedBlack,
    RightThreaded,
    LeftThreaded,
    DoubleThreaded,
}

impl TreeKind {
    pub const ALL: [TreeKind; 6] = [
        TreeKind::Bst,
        TreeKind::Avl,
        TreeKind::RedBlack,
        TreeKind::RightThreaded,
        TreeKind::LeftThreaded,
        TreeKind::DoubleThreaded,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TreeKind::Bst => "bst",
            TreeKind::Avl => "avl",
            TreeKind::RedBlack => "rb",
            TreeKind::RightThreaded => "right-threaded",
            TreeKind::LeftThreaded => "left-threaded",
            TreeKind::DoubleThreaded => "double-threaded",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bst" => Ok(TreeKind::Bst),
            "avl" | "avlt" => Ok(TreeKind::Avl),
            "rb" | "rbt" | "red-black" => Ok(TreeKind::RedBlack),
            "right-threaded" | "rtbst" => Ok(TreeKind::RightThreaded),
            "left-threaded" | "ltbst" => Ok(TreeKind::LeftThreaded),
            "double-threaded" | "dtbst" => Ok(TreeKind::DoubleThreaded),
            other => Err(CliError::UnknownKind(other.to_string())),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Insert(i64, String),
    Delete(i64),
    Search(i64),
    Min,
    Max,
    Height,
    Len,
    Inorder,
    Preorder,
    Postorder,
    Reverse,
    Levelorder,
    Print,
    Check,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Insert(..) => "insert",
            Command::Delete(_) => "delete",
            Command::Search(_) => "search",
            Command::Min => "min",
            Command::Max => "max",
            Command::Height => "height",
            Command::Len => "len",
            Command::Inorder => "inorder",
            Command::Preorder => "preorder",
            Command::Postorder => "postorder",
            Command::Reverse => "reverse",
            Command::Levelorder => "levelorder",
            Command::Print => "print",
            Command::Check => "check",
        }
    }
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &str| CliError::Parse {
            line: line.to_string(),
            reason: reason.to_string(),
        };
        let key = |arg: Option<&str>| -> Result<i64, CliError> {
            let arg = arg.ok_or_else(|| fail("missing key"))?;
            arg.parse().map_err(|_| fail("key must be an integer"))
        };

        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();
        let command = match word {
            "insert" => {
                let k = key(args.next())?;
                // Data is the remainder of the line and may contain spaces.
                let data = rest
                    .split_once(char::is_whitespace)
                    .map(|(_, d)| d.trim().to_string())
                    .unwrap_or_default();
                if data.is_empty() {
                    return Err(fail("missing data"));
                }
                return Ok(Command::Insert(k, data));
            }
            "delete" => Command::Delete(key(args.next())?),
            "search" => Command::Search(key(args.next())?),
            "min" => Command::Min,
            "max" => Command::Max,
            "height" => Command::Height,
            "len" => Command::Len,
            "inorder" => Command::Inorder,
            "preorder" => Command::Preorder,
            "postorder" => Command::Postorder,
            "reverse" => Command::Reverse,
            "levelorder" => Command::Levelorder,
            "print" => Command::Print,
            "check" => Command::Check,
            _ => return Err(fail("unknown command")),
        };
        if args.next().is_some() {
            return Err(fail("unexpected argument"));
        }
        Ok(command)
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────

/// Result of one command.
#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    Silent,
    Json(Value),
    Text(String),
}

/// A tree of any kind with `i64` keys and `String` data.
#[derive(Clone, Debug)]
pub enum AnyTree {
    Bst(BinarySearchTree<i64, String>),
    Avl(AvlTree<i64, String>),
    RedBlack(RedBlackTree<i64, String>),
    RightThreaded(RightThreadedTree<i64, String>),
    LeftThreaded(LeftThreadedTree<i64, String>),
    DoubleThreaded(DoubleThreadedTree<i64, String>),
}

/// Runs `$body` with `$t` bound to the inner tree, whatever its kind.
macro_rules! each_tree {
    ($tree:expr, $t:ident => $body:expr) => {
        match $tree {
            AnyTree::Bst($t) => $body,
            AnyTree::Avl($t) => $body,
            AnyTree::RedBlack($t) => $body,
            AnyTree::RightThreaded($t) => $body,
            AnyTree::LeftThreaded($t) => $body,
            AnyTree::DoubleThreaded($t) => $body,
        }
    };
}

fn pairs_json(pairs: Pairs<'_, i64, String>) -> Value {
    Value::Array(pairs.map(|(k, v)| json!([k, v])).collect())
}

fn pair_json<T: SearchTree<Key = i64, Data = String>>(tree: &T, idx: u32) -> Value {
    json!([tree.key(idx), tree.data(idx)])
}

impl AnyTree {
    pub fn new(kind: TreeKind) -> Self {
        match kind {
            TreeKind::Bst => AnyTree::Bst(BinarySearchTree::new()),
            TreeKind::Avl => AnyTree::Avl(AvlTree::new()),
            TreeKind::RedBlack => AnyTree::RedBlack(RedBlackTree::new()),
            TreeKind::RightThreaded => AnyTree::RightThreaded(RightThreadedTree::new()),
            TreeKind::LeftThreaded => AnyTree::LeftThreaded(LeftThreadedTree::new()),
            TreeKind::DoubleThreaded => AnyTree::DoubleThreaded(DoubleThreadedTree::new()),
        }
    }

    pub fn kind(&self) -> TreeKind {
        match self {
            AnyTree::Bst(_) => TreeKind::Bst,
            AnyTree::Avl(_) => TreeKind::Avl,
            AnyTree::RedBlack(_) => TreeKind::RedBlack,
            AnyTree::RightThreaded(_) => TreeKind::RightThreaded,
            AnyTree::LeftThreaded(_) => TreeKind::LeftThreaded,
            AnyTree::DoubleThreaded(_) => TreeKind::DoubleThreaded,
        }
    }

    pub fn execute(&mut self, command: &Command) -> Result<Output, CliError> {
        let output = match command {
            Command::Insert(k, data) => {
                each_tree!(self, t => t.insert(*k, data.clone()))?;
                Output::Silent
            }
            Command::Delete(k) => {
                each_tree!(self, t => t.delete(k));
                Output::Silent
            }
            Command::Search(k) => {
                let found = each_tree!(&*self, t => t.search(k).map(|i| pair_json(t, i)));
                Output::Json(found.unwrap_or(Value::Null))
            }
            Command::Min => {
                let found = each_tree!(&*self, t => t.minimum().map(|i| pair_json(t, i)));
                Output::Json(found.ok_or(TreeError::<i64>::EmptyTree)?)
            }
            Command::Max => {
                let found = each_tree!(&*self, t => t.maximum().map(|i| pair_json(t, i)));
                Output::Json(found.ok_or(TreeError::<i64>::EmptyTree)?)
            }
            Command::Height => Output::Json(json!(each_tree!(&*self, t => t.tree_height()))),
            Command::Len => Output::Json(json!(each_tree!(&*self, t => t.len()))),
            Command::Inorder => Output::Json(pairs_json(each_tree!(&*self, t => t.ordered()))),
            Command::Print => Output::Text(match &*self {
                AnyTree::Bst(t) => print::print(t),
                AnyTree::Avl(t) => print::print(t),
                AnyTree::RedBlack(t) => print::print(t),
                AnyTree::RightThreaded(t) => t.print(),
                AnyTree::LeftThreaded(t) => t.print(),
                AnyTree::DoubleThreaded(t) => t.print(),
            }),
            Command::Check => {
                each_tree!(&*self, t => t.assert_valid()).map_err(CliError::Invalid)?;
                Output::Json(json!("ok"))
            }
            Command::Preorder | Command::Postorder | Command::Reverse | Command::Levelorder => {
                let pairs = self.walk(command).ok_or(CliError::Unsupported {
                    command: command.name(),
                    kind: self.kind(),
                })?;
                Output::Json(pairs_json(pairs))
            }
        };
        Ok(output)
    }

    /// The kind-specific orders, `None` where the kind has no such walk.
    fn walk(&self, command: &Command) -> Option<Pairs<'_, i64, String>> {
        fn binary<'a, T: BinaryTree<Key = i64, Data = String>>(
            tree: &'a T,
            command: &Command,
        ) -> Option<Pairs<'a, i64, String>> {
            match command {
                Command::Preorder => Some(tree.preorder_traverse()),
                Command::Postorder => Some(tree.postorder_traverse()),
                Command::Reverse => Some(tree.reverse_inorder_traverse()),
                Command::Levelorder => Some(tree.levelorder_traverse()),
                _ => None,
            }
        }

        match (self, command) {
            (AnyTree::Bst(t), _) => binary(t, command),
            (AnyTree::Avl(t), _) => binary(t, command),
            (AnyTree::RedBlack(t), _) => binary(t, command),
            (AnyTree::RightThreaded(t), Command::Preorder) => Some(t.preorder_traverse()),
            (AnyTree::LeftThreaded(t), Command::Reverse) => Some(t.reverse_inorder_traverse()),
            (AnyTree::DoubleThreaded(t), Command::Preorder) => Some(t.preorder_traverse()),
            (AnyTree::DoubleThreaded(t), Command::Reverse) => Some(t.reverse_inorder_traverse()),
            _ => None,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────

/// Feeds every line of `input` to a fresh tree of `kind`.
///
/// Blank lines and lines starting with `#` are skipped. Returns the first
/// fatal error; tree errors and unsupported commands are written to `err`.
pub fn run<R, W, E>(kind: TreeKind, input: R, mut out: W, mut err: E) -> Result<AnyTree, CliError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut tree = AnyTree::new(kind);
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command: Command = line.parse()?;
        match tree.execute(&command) {
            Ok(Output::Silent) => {}
            Ok(Output::Json(value)) => writeln!(out, "{}", serde_json::to_string(&value)?)?,
            Ok(Output::Text(text)) => writeln!(out, "{text}")?,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => writeln!(err, "error: {e}")?,
        }
    }
    out.flush()?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(kind: TreeKind, script: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(kind, script.as_bytes(), &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn kinds_parse_from_names_and_aliases() {
        for kind in TreeKind::ALL {
            assert_eq!(kind.name().parse::<TreeKind>().unwrap(), kind);
        }
        assert_eq!("RBT".parse::<TreeKind>().unwrap(), TreeKind::RedBlack);
        assert!(matches!("splay".parse::<TreeKind>(), Err(CliError::UnknownKind(_))));
    }

    #[test]
    fn commands_parse() {
        assert_eq!(
            "insert 4 four and more".parse::<Command>().unwrap(),
            Command::Insert(4, "four and more".to_string())
        );
        assert_eq!("delete -3".parse::<Command>().unwrap(), Command::Delete(-3));
        assert_eq!("levelorder".parse::<Command>().unwrap(), Command::Levelorder);
        assert!("insert 4".parse::<Command>().is_err());
        assert!("search x".parse::<Command>().is_err());
        assert!("len 1".parse::<Command>().is_err());
        assert!("fly".parse::<Command>().is_err());
    }

    #[test]
    fn session_prints_json() {
        let (out, err) = session(
            TreeKind::Avl,
            "insert 2 two\ninsert 1 one\ninsert 3 three\n# comment\n\nsearch 3\nsearch 9\ninorder\nmin\nheight\nlen\ncheck\n",
        );
        assert_eq!(
            out,
            "[3,\"three\"]\nnull\n[[1,\"one\"],[2,\"two\"],[3,\"three\"]]\n[1,\"one\"]\n1\n3\n\"ok\"\n"
        );
        assert_eq!(err, "");
    }

    #[test]
    fn tree_errors_do_not_stop_the_session() {
        let (out, err) = session(TreeKind::RedBlack, "max\ninsert 1 a\ninsert 1 b\nlen\n");
        assert_eq!(out, "1\n");
        assert_eq!(err, "error: The tree is empty.\nerror: 1 already exists.\n");
    }

    #[test]
    fn unsupported_orders_are_reported() {
        let (out, err) = session(TreeKind::LeftThreaded, "insert 1 a\ninsert 2 b\nreverse\npreorder\n");
        assert_eq!(out, "[[2,\"b\"],[1,\"a\"]]\n");
        assert_eq!(err, "error: `preorder` is not supported by left-threaded trees\n");
    }

    #[test]
    fn binary_kinds_support_every_order() {
        let script = "insert 2 b\ninsert 1 a\ninsert 3 c\npreorder\npostorder\nreverse\nlevelorder\n";
        for kind in [TreeKind::Bst, TreeKind::Avl, TreeKind::RedBlack] {
            let (out, err) = session(kind, script);
            assert_eq!(
                out,
                "[[2,\"b\"],[1,\"a\"],[3,\"c\"]]\n\
                 [[1,\"a\"],[3,\"c\"],[2,\"b\"]]\n\
                 [[3,\"c\"],[2,\"b\"],[1,\"a\"]]\n\
                 [[2,\"b\"],[1,\"a\"],[3,\"c\"]]\n"
            );
            assert_eq!(err, "");
        }
    }

    #[test]
    fn height_of_a_long_chain() {
        let script: String = (0..5_000).map(|k| format!("insert {k} v\n")).collect::<String>() + "height\n";
        let (out, _) = session(TreeKind::Bst, &script);
        assert_eq!(out, "4999\n");
    }

    #[test]
    fn malformed_line_is_fatal() {
        let mut sink = Vec::new();
        let result = run(TreeKind::Bst, "insert 1 a\nbogus\nlen\n".as_bytes(), &mut sink, std::io::sink());
        assert!(matches!(result, Err(CliError::Parse { .. })));
    }
}
