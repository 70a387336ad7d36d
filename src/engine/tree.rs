//! 静的ドキュメントで使用する汎用ツリー構造の実装
//!
//! # 概要
//! `TreeNode` はノードの値・子ノード・親ノードへの弱参照を持ち、
//! `Tree` はルートノードを保持する汎用的な木構造を表します。
//!
//! 親へのリンクは `Weak` なので、ツリーを手放せば循環せずに解放されます。

use std::cell::RefCell;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::{Rc, Weak};

pub type NodeRef<T> = Rc<RefCell<TreeNode<T>>>;

/// ツリーノード
#[derive(Debug)]
pub struct TreeNode<T> {
    pub value: T,
    pub children: Vec<NodeRef<T>>,
    pub parent: Option<Weak<RefCell<TreeNode<T>>>>,
}

impl<T> TreeNode<T> {
    /// 新しいノードを作成
    pub fn new(value: T) -> NodeRef<T> {
        Rc::new(RefCell::new(TreeNode {
            value,
            children: Vec::new(),
            parent: None,
        }))
    }

    /// 子ノードを追加
    pub fn add_child(parent: &NodeRef<T>, child: NodeRef<T>) {
        child.borrow_mut().parent = Some(Rc::downgrade(parent));
        parent.borrow_mut().children.push(child);
    }

    /// 値から子ノードを作成して追加し、そのノードを返す
    pub fn add_child_value(parent: &NodeRef<T>, value: T) -> NodeRef<T> {
        let child = TreeNode::new(value);
        TreeNode::add_child(parent, Rc::clone(&child));
        child
    }

    pub fn parent(&self) -> Option<NodeRef<T>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn children(&self) -> &Vec<NodeRef<T>> {
        &self.children
    }
}

/// ツリー本体
#[derive(Clone)]
pub struct Tree<T> {
    pub root: NodeRef<T>,
}

impl<T> Tree<T> {
    pub fn new(root_value: T) -> Self {
        Tree {
            root: TreeNode::new(root_value),
        }
    }

    /// 先行順（描画順）でノードを訪問する
    pub fn traverse_preorder(&self, f: &mut impl FnMut(&NodeRef<T>)) {
        fn walk<T>(node: &NodeRef<T>, f: &mut impl FnMut(&NodeRef<T>)) {
            f(node);
            for child in node.borrow().children() {
                walk(child, f);
            }
        }
        walk(&self.root, f);
    }
}

impl<T: Debug> Display for Tree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_tree_node(&self.root, f, &[])
    }
}

/// 再帰的にツリーを表示するヘルパー関数
fn fmt_tree_node<T: Debug>(
    node: &NodeRef<T>,
    f: &mut Formatter<'_>,
    ancestors_last: &[bool],
) -> fmt::Result {
    let n = node.borrow();

    let is_last = *ancestors_last.last().unwrap_or(&true);
    let connector = if ancestors_last.is_empty() {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let mut prefix = String::new();
    for &ancestor_last in &ancestors_last[..ancestors_last.len().saturating_sub(1)] {
        prefix.push_str(if ancestor_last { "    " } else { "│   " });
    }

    writeln!(f, "{}{}{:?}", prefix, connector, n.value)?;

    let child_count = n.children.len();
    for (i, child) in n.children.iter().enumerate() {
        let child_is_last = i == child_count - 1;
        let mut new_ancestors = ancestors_last.to_vec();
        new_ancestors.push(child_is_last);
        fmt_tree_node(child, f, &new_ancestors)?;
    }

    Ok(())
}
