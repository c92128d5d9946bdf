use generational_arena::{Arena, Index};
use std::fmt;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::{TreeError, TreeResult};

/// Reserved identifier of the permanent root folder.
pub const ROOT_ID: &str = "root";

const ROOT_NAME: &str = "Root";

/// Kind of a tree node. Folders can hold children, files stay leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Folder => write!(f, "folder"),
            NodeKind::File => write!(f, "file"),
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Identifier, unique across the whole tree
    pub id: String,
    /// Display name, not required to be unique among siblings
    pub name: String,
    /// Node kind, fixed at insertion
    pub kind: NodeKind,
    /// Index of the parent node in the arena, None only for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based file tree for a file-manager data model.
///
/// Uses a generational arena for memory-safe node references: children are
/// owned index lists, the parent back-reference is a plain index, so the
/// child/parent pairing never forms an ownership cycle. Each store owns
/// exactly one permanent root folder with id [`ROOT_ID`].
#[derive(Debug)]
pub struct FileTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, live for the lifetime of the store
    root: Index,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            id: ROOT_ID.to_string(),
            name: ROOT_NAME.to_string(),
            kind: NodeKind::Folder,
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Adds a new leaf node under an existing folder and returns its index.
    ///
    /// `name` and `kind` are taken as given; validating emptiness or
    /// duplicate names among siblings is the caller's job. Fails without
    /// mutating the tree when `parent_id` does not resolve to a folder.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, parent_id: &str, name: &str, kind: NodeKind) -> TreeResult<Index> {
        let parent_idx = match self.find_by_id(parent_id) {
            Some(idx) if self.arena.get(idx).is_some_and(|n| n.kind == NodeKind::Folder) => idx,
            _ => return Err(TreeError::InvalidParent(parent_id.to_string())),
        };

        let id = self.fresh_id();
        let node_idx = self.arena.insert(TreeNode {
            id,
            name: name.to_string(),
            kind,
            parent: Some(parent_idx),
            children: Vec::new(),
        });

        if let Some(parent) = self.arena.get_mut(parent_idx) {
            parent.children.push(node_idx);
        }

        Ok(node_idx)
    }

    /// Removes a node together with its whole subtree.
    ///
    /// Returns true only on an actual structural change; the reason for a
    /// rejection is logged. The root can never be removed.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, node_id: &str) -> bool {
        match self.try_remove(node_id) {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "remove rejected");
                false
            }
        }
    }

    /// Fallible variant of [`remove`](Self::remove).
    #[instrument(level = "trace", skip(self))]
    pub fn try_remove(&mut self, node_id: &str) -> TreeResult<()> {
        let not_removable = || TreeError::NodeNotRemovable(node_id.to_string());

        let node_idx = self.find_by_id(node_id).ok_or_else(not_removable)?;
        let parent_idx = self
            .get_node(node_idx)
            .and_then(|node| node.parent)
            .ok_or_else(not_removable)?;

        if let Some(parent) = self.arena.get_mut(parent_idx) {
            parent.children.retain(|&child| child != node_idx);
        }

        // Free the detached subtree bottom-up so children never reference a
        // vacated parent slot.
        for idx in self.subtree_postorder(node_idx) {
            self.arena.remove(idx);
        }

        Ok(())
    }

    /// Finds a node by identifier, depth-first pre-order from the root.
    ///
    /// The first match wins. A miss is a normal negative result, not an
    /// error.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_id(&self, id: &str) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.id == id)
            .map(|(idx, _)| idx)
    }

    /// Slash-joined names from the root down to the node, both inclusive,
    /// e.g. `Root/Documents/MyFile.txt`.
    #[instrument(level = "trace", skip(self))]
    pub fn absolute_path(&self, node_id: &str) -> Option<String> {
        let mut current = self.find_by_id(node_id)?;
        let mut names = Vec::new();

        while let Some(node) = self.get_node(current) {
            names.push(node.name.clone());
            match node.parent {
                Some(parent_idx) => current = parent_idx,
                None => break,
            }
        }

        names.reverse();
        Some(names.join("/"))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Index {
        self.root
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false: the permanent root keeps `len()` at 1 or more.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    /// Bottom-up traversal of the whole tree.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> impl Iterator<Item = (Index, &TreeNode)> + '_ {
        self.subtree_postorder(self.root)
            .into_iter()
            .filter_map(|idx| self.get_node(idx).map(|node| (idx, node)))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    #[instrument(level = "trace", skip(self))]
    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Generates an identifier not currently used by any node in the tree.
    ///
    /// Short random token, verified against the live tree and regenerated
    /// on collision, so uniqueness holds for the lifetime of the store.
    fn fresh_id(&self) -> String {
        loop {
            let token = Uuid::new_v4().simple().to_string()[..7].to_string();
            if self.find_by_id(&token).is_none() {
                return token;
            }
        }
    }

    /// Post-order listing of the subtree rooted at `start`.
    fn subtree_postorder(&self, start: Index) -> Vec<Index> {
        let mut order = Vec::new();
        let mut stack = vec![(start, false)];

        while let Some((idx, visited)) = stack.pop() {
            if let Some(node) = self.get_node(idx) {
                if visited {
                    order.push(idx);
                } else {
                    stack.push((idx, true));
                    for &child in node.children.iter().rev() {
                        stack.push((child, false));
                    }
                }
            }
        }

        order
    }
}

/// Depth-first pre-order iterator over `(Index, &TreeNode)` pairs.
pub struct TreeIterator<'a> {
    tree: &'a FileTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a FileTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileTree {
        // Root/
        // ├── docs/
        // │   └── a.txt
        // └── b.txt
        let mut tree = FileTree::new();
        let docs = tree.insert(ROOT_ID, "docs", NodeKind::Folder).unwrap();
        let docs_id = tree.get_node(docs).unwrap().id.clone();
        tree.insert(&docs_id, "a.txt", NodeKind::File).unwrap();
        tree.insert(ROOT_ID, "b.txt", NodeKind::File).unwrap();
        tree
    }

    #[test]
    fn test_preorder_visits_parent_before_children_left_to_right() {
        let tree = sample_tree();
        let names: Vec<&str> = tree.iter().map(|(_, node)| node.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "docs", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_postorder_visits_children_before_parent() {
        let tree = sample_tree();
        let names: Vec<&str> = tree
            .iter_postorder()
            .map(|(_, node)| node.name.as_str())
            .collect();
        assert_eq!(names, vec!["a.txt", "docs", "b.txt", "Root"]);
    }

    #[test]
    fn test_depth_counts_levels_from_root() {
        assert_eq!(FileTree::new().depth(), 1);
        assert_eq!(sample_tree().depth(), 3);
    }

    #[test]
    fn test_fresh_ids_are_short_alphanumeric_tokens() {
        let mut tree = FileTree::new();
        for _ in 0..10 {
            let idx = tree.insert(ROOT_ID, "n", NodeKind::File).unwrap();
            let id = &tree.get_node(idx).unwrap().id;
            assert_eq!(id.len(), 7);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }
}
