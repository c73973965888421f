//! Fragment trees.
//!
//! The tree is an arena: every entry stores its parent index and the indices
//! of its children. Index `0` is the root sentinel, which has no chunk.

use crate::Chunk;

/// Index of an entry in a [`FragmentTree`].
pub type TreeId = usize;

#[derive(Debug, Clone)]
struct Entry<I> {
    chunk: Option<Chunk>,
    info: Option<I>,
    parent: TreeId,
    children: Vec<TreeId>,
}

#[derive(Debug, Clone)]
pub struct FragmentTree<I> {
    entries: Vec<Entry<I>>,
}

impl<I> FragmentTree<I> {
    pub const ROOT: TreeId = 0;

    /// Stack chunks into a tree in one left-to-right pass.
    ///
    /// `chunks` must be laminar and sorted by start, longer chunks first
    /// among chunks with the same start. Each chunk becomes a child of the
    /// nearest open branch that ends at or after it.
    pub fn assemble<F>(chunks: &[Chunk], mut info: F) -> Self
    where
        F: FnMut(&Chunk) -> I,
    {
        let mut entries = Vec::with_capacity(chunks.len() + 1);
        entries.push(Entry {
            chunk: None,
            info: None,
            parent: Self::ROOT,
            children: Vec::new(),
        });

        let mut rightmost = Self::ROOT;
        for chunk in chunks {
            let mut branch = rightmost;
            while branch != Self::ROOT {
                match entries[branch].chunk {
                    Some(open) if chunk.end <= open.end => break,
                    _ => branch = entries[branch].parent,
                }
            }

            let id = entries.len();
            entries.push(Entry {
                chunk: Some(*chunk),
                info: Some(info(chunk)),
                parent: branch,
                children: Vec::new(),
            });
            entries[branch].children.push(id);
            rightmost = id;
        }

        Self { entries }
    }

    /// Children of the root sentinel.
    pub fn root_children(&self) -> &[TreeId] {
        self.children(Self::ROOT)
    }

    pub fn children(&self, id: TreeId) -> &[TreeId] {
        self.entries
            .get(id)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of an entry; `None` for the root.
    pub fn parent(&self, id: TreeId) -> Option<TreeId> {
        if id == Self::ROOT {
            return None;
        }
        self.entries.get(id).map(|entry| entry.parent)
    }

    pub fn chunk(&self, id: TreeId) -> Option<&Chunk> {
        self.entries.get(id).and_then(|entry| entry.chunk.as_ref())
    }

    pub fn info(&self, id: TreeId) -> Option<&I> {
        self.entries.get(id).and_then(|entry| entry.info.as_ref())
    }

    /// Number of chunks in the tree (the root is not counted).
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth-first, pre-order walk over all entries with their depth,
    /// starting with the root at depth 0.
    pub fn iter(&self) -> TreeIter<'_, I> {
        TreeIter {
            tree: self,
            stack: vec![(Self::ROOT, 0)],
        }
    }

    /// The tree as nested `(chunk, children)` pairs, for comparisons.
    pub fn shape(&self) -> Vec<Shape> {
        self.root_children()
            .iter()
            .map(|&id| self.shape_of(id))
            .collect()
    }

    fn shape_of(&self, id: TreeId) -> Shape {
        let children = self.children(id).iter().map(|&c| self.shape_of(c)).collect();
        // only the root lacks a chunk, and the root is never a child
        let chunk = self.entries[id].chunk.unwrap_or(Chunk::new(0, 0, 0));
        Shape(chunk, children)
    }
}

/// A subtree as a chunk with nested children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape(pub Chunk, pub Vec<Shape>);

pub struct TreeIter<'a, I> {
    tree: &'a FragmentTree<I>,
    stack: Vec<(TreeId, usize)>,
}

impl<'a, I> Iterator for TreeIter<'a, I> {
    type Item = (TreeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((id, depth))
    }
}
