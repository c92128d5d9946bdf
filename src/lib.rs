//! In-memory hierarchical file tree for a minimal file-manager UI.
//!
//! The store owns a single permanent root folder and supports four
//! operations: inserting a node under a folder, removing a node together
//! with its subtree, depth-first lookup by identifier, and absolute-path
//! derivation from the root.
//!
//! Nodes live in a generational arena. The parent back-reference is an
//! arena index rather than a pointer, so the child/parent pairing never
//! forms an ownership cycle while path walks stay O(depth).
//!
//! ```
//! use filetree::{FileTree, NodeKind, ROOT_ID};
//!
//! let mut tree = FileTree::new();
//! let docs = tree.insert(ROOT_ID, "Documents", NodeKind::Folder).unwrap();
//! let docs_id = tree.get_node(docs).unwrap().id.clone();
//! let file = tree.insert(&docs_id, "MyFile.txt", NodeKind::File).unwrap();
//! let file_id = tree.get_node(file).unwrap().id.clone();
//!
//! assert_eq!(
//!     tree.absolute_path(&file_id).as_deref(),
//!     Some("Root/Documents/MyFile.txt")
//! );
//! ```

pub mod arena;
pub mod errors;
pub mod tree_traits;

pub use arena::{FileTree, NodeKind, TreeIterator, TreeNode, ROOT_ID};
pub use errors::{TreeError, TreeResult};
pub use tree_traits::TreeNodeConvert;
