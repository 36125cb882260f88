//! `forest`: drive a tree from a command script.
//!
//! Usage:
//!   forest <kind> < script
//!
//! `<kind>` is one of `bst`, `avl`, `rb`, `right-threaded`, `left-threaded`,
//! `double-threaded`. Each line of stdin is one command, e.g.
//! `insert 23 twenty-three`, `delete 23`, `search 23`, `inorder`, `print`.

use std::io;

use forest::cli::{run, TreeKind};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let kind = match args.get(1).map(|a| a.parse::<TreeKind>()) {
        Some(Ok(kind)) => kind,
        Some(Err(e)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        None => {
            let kinds: Vec<&str> = TreeKind::ALL.iter().map(|k| k.name()).collect();
            eprintln!("First argument must be a tree kind: {}.", kinds.join(", "));
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    if let Err(e) = run(kind, stdin.lock(), io::stdout().lock(), io::stderr()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
