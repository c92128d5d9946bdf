use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::arena::{FileTree, NodeKind};

/// Conversion into a displayable [`termtree::Tree`] for consumers that
/// render the hierarchy as text.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for FileTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn label(tree: &FileTree, idx: Index) -> String {
            match tree.get_node(idx) {
                Some(node) if node.kind == NodeKind::Folder => format!("{}/", node.name),
                Some(node) => node.name.clone(),
                None => String::new(),
            }
        }

        fn build(tree: &FileTree, idx: Index, out: &mut Tree<String>) {
            if let Some(node) = tree.get_node(idx) {
                for &child_idx in &node.children {
                    let mut child_tree = Tree::new(label(tree, child_idx));
                    build(tree, child_idx, &mut child_tree);
                    out.push(child_tree);
                }
            }
        }

        let mut tree = Tree::new(label(self, self.root()));
        build(self, self.root(), &mut tree);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{NodeKind, ROOT_ID};

    #[test]
    fn test_rendering_marks_folders_and_keeps_sibling_order() {
        let mut tree = FileTree::new();
        let docs = tree.insert(ROOT_ID, "Documents", NodeKind::Folder).unwrap();
        let docs_id = tree.get_node(docs).unwrap().id.clone();
        tree.insert(&docs_id, "MyFile.txt", NodeKind::File).unwrap();
        tree.insert(ROOT_ID, "notes.md", NodeKind::File).unwrap();

        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Root/");
        assert!(lines[1].contains("Documents/"));
        assert!(lines[2].contains("MyFile.txt"));
        assert!(lines[3].contains("notes.md"));
    }
}
