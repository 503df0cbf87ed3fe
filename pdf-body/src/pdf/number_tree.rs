//! Number trees map non-negative integers to objects.
//!
//! Small trees are a single `<< /Nums [k1 v1 k2 v2 ...] >>` dictionary. Larger
//! ones are split into leaves of [`LEAF_SIZE`] pairs that are stored as
//! indirect objects and referenced from intermediate nodes:
//!
//! ```text
//! << /Kids [ 10 0 R 11 0 R ] >>                         root, no /Limits
//!   << /Limits [ 0 4095 ] /Kids [ 1 0 R ... 64 0 R ] >>  intermediate
//!     << /Limits [ 0 63 ] /Nums [ 0 (a) ... 63 (z) ] >>  leaf
//! ```

use std::collections::{btree_map, BTreeMap};

use crate::{
    graph::ObjectGraph,
    pdf::{
        document::{K_KIDS, K_LIMITS, K_NUMS},
        Array, Dictionary, Name, Object, Reference,
    },
    BodyError,
};

/// Maximum number of pairs in a leaf and of kids in an intermediate node.
pub const LEAF_SIZE: usize = 64;

/// Nesting limit when reading. `LEAF_SIZE^32` keys is far beyond anything a
/// real document holds, deeper trees are cyclic or crafted.
pub const MAX_TREE_DEPTH: usize = 32;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberTree(BTreeMap<u32, Object>);

/// A written node together with the key range below it.
struct Kid {
    reference: Reference,
    first: u32,
    last: u32,
}

impl NumberTree {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: u32, value: Object) -> Option<Object> {
        self.0.insert(key, value)
    }

    pub fn remove(&mut self, key: u32) -> Option<Object> {
        self.0.remove(&key)
    }

    pub fn get(&self, key: u32) -> Option<&Object> {
        self.0.get(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, u32, Object> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<u32, Object> {
        self.0
    }

    /// Build the tree and return its root dictionary.
    ///
    /// Leaves and intermediate nodes are allocated in `graph`, the root is
    /// returned as a direct dictionary for the caller to embed or allocate. An
    /// empty tree has no root at all and yields `None`.
    pub fn write<G: ObjectGraph + ?Sized>(&self, graph: &mut G) -> Result<Option<Dictionary>, BodyError> {
        if self.0.is_empty() {
            return Ok(None);
        }

        let entries: Vec<(u32, &Object)> = self.0.iter().map(|(&k, v)| (k, v)).collect();
        if entries.len() <= LEAF_SIZE {
            return Ok(Some(nums_node(&entries)));
        }

        let mut level = Vec::with_capacity((entries.len() + LEAF_SIZE - 1) / LEAF_SIZE);
        for chunk in entries.chunks(LEAF_SIZE) {
            let (first, last) = (chunk[0].0, chunk[chunk.len() - 1].0);
            let mut leaf = nums_node(chunk);
            leaf.insert(Name::from(K_LIMITS), limits(first, last));
            level.push(Kid {
                reference: graph.allocate(leaf.into())?,
                first,
                last,
            });
        }

        let mut depth = 1;
        while level.len() > LEAF_SIZE {
            let mut parents = Vec::with_capacity((level.len() + LEAF_SIZE - 1) / LEAF_SIZE);
            for kids in level.chunks(LEAF_SIZE) {
                let (first, last) = (kids[0].first, kids[kids.len() - 1].last);
                let mut node = kids_node(kids);
                node.insert(Name::from(K_LIMITS), limits(first, last));
                parents.push(Kid {
                    reference: graph.allocate(node.into())?,
                    first,
                    last,
                });
            }
            level = parents;
            depth += 1;
        }

        log::debug!(
            "number tree with {} entries written as {} levels below the root",
            entries.len(),
            depth
        );
        Ok(Some(kids_node(&level)))
    }

    /// Read a tree back from its root dictionary. `None`, a missing tree, reads
    /// as an empty tree.
    pub fn read<G: ObjectGraph + ?Sized>(root: Option<&Dictionary>, graph: &G) -> Result<Self, BodyError> {
        let mut tree = NumberTree::new();
        if let Some(root) = root {
            read_node(root, graph, 0, &mut tree.0)?;
        }
        Ok(tree)
    }
}

impl From<BTreeMap<u32, Object>> for NumberTree {
    fn from(map: BTreeMap<u32, Object>) -> Self {
        Self(map)
    }
}

impl FromIterator<(u32, Object)> for NumberTree {
    fn from_iter<T: IntoIterator<Item = (u32, Object)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NumberTree {
    type Item = (&'a u32, &'a Object);
    type IntoIter = btree_map::Iter<'a, u32, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn limits(first: u32, last: u32) -> Object {
    Object::from(vec![Object::from(first), Object::from(last)])
}

fn nums_node(entries: &[(u32, &Object)]) -> Dictionary {
    let mut nums = Array::with_capacity(entries.len() * 2);
    for &(key, value) in entries {
        nums.push(Object::from(key));
        nums.push(value.clone());
    }
    Dictionary::from([(Name::from(K_NUMS), Object::Array(nums))])
}

fn kids_node(kids: &[Kid]) -> Dictionary {
    let kids: Array = kids.iter().map(|kid| Object::Reference(kid.reference.clone())).collect();
    Dictionary::from([(Name::from(K_KIDS), Object::Array(kids))])
}

fn read_node<G: ObjectGraph + ?Sized>(
    node: &Dictionary,
    graph: &G,
    depth: usize,
    out: &mut BTreeMap<u32, Object>,
) -> Result<(), BodyError> {
    if depth > MAX_TREE_DEPTH {
        return Err(BodyError::TreeTooDeep(MAX_TREE_DEPTH));
    }

    if let Some(nums) = node.get(K_NUMS) {
        let nums = graph
            .follow(nums)?
            .array()
            .ok_or(BodyError::MalformedTree("/Nums is not an array"))?;

        let mut pairs = nums.chunks_exact(2);
        for pair in &mut pairs {
            let key = graph
                .follow(&pair[0])?
                .integer()
                .and_then(|k| u32::try_from(k).ok())
                .ok_or(BodyError::MalformedTree("key is not a non-negative integer"))?;
            out.insert(key, pair[1].clone());
        }
        if !pairs.remainder().is_empty() {
            log::warn!("ignoring unpaired trailing entry in /Nums");
        }
        Ok(())
    } else if let Some(kids) = node.get(K_KIDS) {
        let kids = graph
            .follow(kids)?
            .array()
            .ok_or(BodyError::MalformedTree("/Kids is not an array"))?;

        for kid in kids.iter() {
            match kid {
                Object::Reference(r) => {
                    let kid_node = graph
                        .resolve(r)
                        .and_then(|obj| obj.dictionary().ok_or(BodyError::MalformedTree("kid is not a dictionary")))
                        .map_err(|err| err.in_object(r))?;
                    read_node(kid_node, graph, depth + 1, out).map_err(|err| err.in_object(r))?;
                }
                Object::Dictionary(d) => read_node(d, graph, depth + 1, out)?,
                _ => return Err(BodyError::MalformedTree("kid is not a dictionary")),
            }
        }
        Ok(())
    } else {
        Err(BodyError::MalformedTree("node has neither /Nums nor /Kids"))
    }
}
