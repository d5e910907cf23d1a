use log::trace;
use std::fmt::Debug;

use crate::{Error, Result};

/// Index of the sentinel head in front of the head list
const HEADER: usize = 0;

/// Index of the sentinel head closing the head list
const TAIL: usize = 1;

/// Root slot of the two sentinel heads, never dereferenced
const NO_NODE: usize = usize::MAX;

/// An inserted key/value pair, linked into the item list of one node
#[derive(Debug)]
struct Cell<K, V> {
    /// Taken out when the pair is returned
    entry: Option<(K, V)>,
    next: Option<usize>,
}

/// A tree node of the soft heap.
///
/// `next` and `child` are either both set or both empty. The item list is
/// shared with `next` (the node mirrors it one rank up), while `child` owns
/// an independent subtree.
#[derive(Debug, Clone)]
struct Node<K> {
    /// Representative key, never below the key of an item it represents
    ckey: K,
    rank: usize,
    next: Option<usize>,
    child: Option<usize>,
    il: Option<usize>,
    il_tail: Option<usize>,
}

/// An entry of the rank-ordered head list, owning one tree
#[derive(Debug, Clone, Copy)]
struct Head {
    queue: usize,
    next: usize,
    prev: usize,
    /// Head with the smallest root key among this one and all following
    suffix_min: usize,
    rank: usize,
}

/// Implementation of Chazelle's soft heap
///
/// An approximate min-priority queue: to keep insertions and deletions at
/// amortized O(log 1/ε) regardless of size, items may be "corrupted", meaning
/// grouped under a representative key larger than their own. At any time at
/// most ε·n of the stored items are corrupted, where n is the number of
/// insertions. Keys are only ever overestimated, so a returned key is never
/// smaller than the true key of the returned item.
///
/// Nodes, heads and items live in arenas addressed by index. Slots are
/// recycled through free lists, and everything is released once the heap
/// drains.
#[derive(Debug)]
pub struct SoftHeap<K, V>
where
    K: Ord + Clone + Debug,
{
    error_rate: f64,

    /// Softening is only allowed above this rank
    min_rank: usize,

    /// Sentinel marking exhausted subtrees, every key must stay below it
    key_max_value: K,

    len: usize,
    cells: Vec<Cell<K, V>>,
    nodes: Vec<Node<K>>,
    heads: Vec<Head>,
    free_cells: Vec<usize>,
    free_nodes: Vec<usize>,
    free_heads: Vec<usize>,
}

impl<K, V> SoftHeap<K, V>
where
    K: Ord + Clone + Debug,
{
    /// Creates an empty soft heap.
    ///
    /// `error_rate` must be in (0, 0.5]; `key_max_value` is a sentinel that
    /// every inserted key must be strictly smaller than.
    pub fn new(error_rate: f64, key_max_value: K) -> Result<Self> {
        if !(error_rate > 0.0 && error_rate <= 0.5) {
            return Err(Error::InvalidArgument(format!(
                "error rate must be in (0, 0.5], got {}",
                error_rate
            )));
        }

        let min_rank = 2 + 2 * (1.0 / error_rate).log2().ceil() as usize;

        Ok(SoftHeap {
            error_rate,
            min_rank,
            key_max_value,
            len: 0,
            cells: Vec::new(),
            nodes: Vec::new(),
            heads: Self::sentinel_heads(),
            free_cells: Vec::new(),
            free_nodes: Vec::new(),
            free_heads: Vec::new(),
        })
    }

    fn sentinel_heads() -> Vec<Head> {
        vec![
            Head {
                queue: NO_NODE,
                next: TAIL,
                prev: HEADER,
                suffix_min: HEADER,
                rank: 0,
            },
            Head {
                queue: NO_NODE,
                next: TAIL,
                prev: HEADER,
                suffix_min: TAIL,
                rank: usize::MAX,
            },
        ]
    }

    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    /// Minimal rank at which nodes get softened, `2 + 2⌈log2(1/ε)⌉`
    pub fn min_rank(&self) -> usize {
        self.min_rank
    }

    pub fn key_max_value(&self) -> &K {
        &self.key_max_value
    }

    /// Number of items stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value` under `key`.
    ///
    /// Fails with `InvalidArgument` if `key` is not strictly below the
    /// sentinel maximum key.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if key >= self.key_max_value {
            return Err(Error::InvalidArgument(format!(
                "key {:?} is not below the maximum key {:?}",
                key, self.key_max_value
            )));
        }

        let cell = self.alloc_cell(Cell {
            entry: Some((key.clone(), value)),
            next: None,
        });
        let node = self.alloc_node(Node {
            ckey: key,
            rank: 0,
            next: None,
            child: None,
            il: Some(cell),
            il_tail: Some(cell),
        });

        self.meld(node);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the item with the smallest representative key.
    ///
    /// The returned key is the item's own key; when the item was corrupted it
    /// may be smaller than keys returned earlier. Fails with `EmptyHeap` when
    /// no item is left.
    pub fn delete_min(&mut self) -> Result<(K, V)> {
        if self.len == 0 {
            return Err(Error::EmptyHeap);
        }

        let mut head = self.first_suffix_min();
        while head != TAIL && self.nodes[self.heads[head].queue].il.is_none() {
            let root = self.heads[head].queue;
            let chain = self.next_chain(root);

            if chain.len() - 1 < self.heads[head].rank / 2 {
                // Too few children left: dissolve the tree into its subtrees
                trace!(
                    "soft heap dissolving head of rank {} with {} children",
                    self.heads[head].rank,
                    chain.len() - 1
                );
                let prev = self.heads[head].prev;
                self.unlink_head(head);
                self.fix_min_list(prev);

                let children: Vec<usize> = chain
                    .iter()
                    .filter_map(|&node| self.nodes[node].child)
                    .collect();
                self.free_nodes.extend(chain);
                for child in children {
                    self.meld(child);
                }
            } else {
                self.shift(root);
                if self.nodes[root].ckey == self.key_max_value {
                    trace!("soft heap dropping exhausted head of rank {}", self.heads[head].rank);
                    let prev = self.heads[head].prev;
                    self.unlink_head(head);
                    self.free_nodes.push(root);
                    head = prev;
                }
                self.fix_min_list(head);
            }

            head = self.first_suffix_min();
        }

        if head == TAIL {
            return Err(Error::EmptyHeap);
        }

        let root = self.heads[head].queue;
        let cell = self.nodes[root].il.ok_or(Error::EmptyHeap)?;
        let entry = self.cells[cell].entry.take();
        let next = self.cells[cell].next;
        self.nodes[root].il = next;
        if next.is_none() {
            self.nodes[root].il_tail = None;
        }
        self.free_cells.push(cell);

        let entry = entry.ok_or(Error::EmptyHeap)?;
        self.len -= 1;
        if self.len == 0 {
            self.reset();
        }
        Ok(entry)
    }

    /// Number of stored items whose representative key is larger than their
    /// own key. Walks the whole structure.
    pub fn corrupted_count(&self) -> usize {
        let mut count = 0;
        let mut head = self.heads[HEADER].next;
        while head != TAIL {
            count += self.corrupted_in_tree(self.heads[head].queue);
            head = self.heads[head].next;
        }
        count
    }

    fn corrupted_in_tree(&self, root: usize) -> usize {
        // Only the root list is live along a next chain, the rest mirror it
        let ckey = &self.nodes[root].ckey;
        let mut count = 0;
        let mut cell = self.nodes[root].il;
        while let Some(index) = cell {
            if let Some((key, _)) = &self.cells[index].entry {
                if key < ckey {
                    count += 1;
                }
            }
            cell = self.cells[index].next;
        }

        let mut current = Some(root);
        while let Some(node) = current {
            if let Some(child) = self.nodes[node].child {
                count += self.corrupted_in_tree(child);
            }
            current = self.nodes[node].next;
        }
        count
    }

    fn first_suffix_min(&self) -> usize {
        let first = self.heads[HEADER].next;
        if first == TAIL {
            TAIL
        } else {
            self.heads[first].suffix_min
        }
    }

    fn root_key(&self, head: usize) -> &K {
        &self.nodes[self.heads[head].queue].ckey
    }

    /// The root followed by every node reachable through `next` links
    fn next_chain(&self, root: usize) -> Vec<usize> {
        let mut chain = vec![root];
        let mut current = root;
        while let Some(next) = self.nodes[current].next {
            chain.push(next);
            current = next;
        }
        chain
    }

    fn alloc_cell(&mut self, cell: Cell<K, V>) -> usize {
        match self.free_cells.pop() {
            Some(index) => {
                self.cells[index] = cell;
                index
            }
            None => {
                self.cells.push(cell);
                self.cells.len() - 1
            }
        }
    }

    fn alloc_node(&mut self, node: Node<K>) -> usize {
        match self.free_nodes.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn alloc_head(&mut self, head: Head) -> usize {
        match self.free_heads.pop() {
            Some(index) => {
                self.heads[index] = head;
                index
            }
            None => {
                self.heads.push(head);
                self.heads.len() - 1
            }
        }
    }

    fn unlink_head(&mut self, head: usize) {
        let Head { prev, next, .. } = self.heads[head];
        self.heads[prev].next = next;
        self.heads[next].prev = prev;
        self.free_heads.push(head);
    }

    /// Merges a tree into the head list, combining trees of equal rank like
    /// carries in a binary counter.
    fn meld(&mut self, mut node: usize) {
        let mut to_head = self.heads[HEADER].next;
        while self.nodes[node].rank > self.heads[to_head].rank {
            to_head = self.heads[to_head].next;
        }

        let prev_head = self.heads[to_head].prev;
        let first_consumed = to_head;
        while self.nodes[node].rank == self.heads[to_head].rank {
            let queued = self.heads[to_head].queue;
            let (top, bottom) = if self.nodes[queued].ckey > self.nodes[node].ckey {
                (node, queued)
            } else {
                (queued, node)
            };

            let top_node = &self.nodes[top];
            let combined = Node {
                ckey: top_node.ckey.clone(),
                rank: top_node.rank + 1,
                next: Some(top),
                child: Some(bottom),
                il: top_node.il,
                il_tail: top_node.il_tail,
            };
            node = self.alloc_node(combined);

            let consumed = to_head;
            to_head = self.heads[to_head].next;
            if consumed != first_consumed {
                self.free_heads.push(consumed);
            }
        }

        let head = Head {
            queue: node,
            next: to_head,
            prev: prev_head,
            suffix_min: TAIL,
            rank: self.nodes[node].rank,
        };
        let head = if to_head == first_consumed {
            self.alloc_head(head)
        } else {
            self.heads[first_consumed] = head;
            first_consumed
        };

        self.heads[prev_head].next = head;
        self.heads[to_head].prev = head;
        self.fix_min_list(head);
    }

    /// Recomputes suffix-min pointers from `head` back to the front of the list
    fn fix_min_list(&mut self, mut head: usize) {
        if head == HEADER {
            return;
        }

        let next = self.heads[head].next;
        let mut min = if next == TAIL {
            head
        } else {
            self.heads[next].suffix_min
        };

        while head != HEADER {
            if self.root_key(min) > self.root_key(head) {
                min = head;
            }
            self.heads[head].suffix_min = min;
            head = self.heads[head].prev;
        }
    }

    /// Refills the item list of `v` from below after it was consumed.
    ///
    /// Pulls the list of the smaller of its two subtrees up, and above the
    /// minimal rank pulls a second list and concatenates both under the larger
    /// key. An exhausted leaf gets the sentinel key.
    fn shift(&mut self, v: usize) {
        self.nodes[v].il = None;
        self.nodes[v].il_tail = None;

        let (Some(next), Some(_)) = (self.nodes[v].next, self.nodes[v].child) else {
            self.nodes[v].ckey = self.key_max_value.clone();
            return;
        };

        self.shift(next);
        self.order_children(v);
        if let Some(next) = self.nodes[v].next {
            let next_node = &self.nodes[next];
            let (il, il_tail, ckey) = (next_node.il, next_node.il_tail, next_node.ckey.clone());
            let node = &mut self.nodes[v];
            node.il = il;
            node.il_tail = il_tail;
            node.ckey = ckey;
        }

        self.soften(v);
        self.prune(v);
    }

    /// Keeps the smaller key on the `next` side
    fn order_children(&mut self, v: usize) {
        if let (Some(next), Some(child)) = (self.nodes[v].next, self.nodes[v].child) {
            if self.nodes[next].ckey > self.nodes[child].ckey {
                self.nodes[v].next = Some(child);
                self.nodes[v].child = Some(next);
            }
        }
    }

    fn soften(&mut self, v: usize) {
        let (Some(next), Some(child)) = (self.nodes[v].next, self.nodes[v].child) else {
            return;
        };

        let rank = self.nodes[v].rank;
        if rank <= self.min_rank || (rank % 2 == 0 && self.nodes[child].rank + 1 >= rank) {
            return;
        }

        self.shift(next);
        self.order_children(v);

        let Some(next) = self.nodes[v].next else {
            return;
        };
        let next_node = &self.nodes[next];
        if next_node.ckey == self.key_max_value {
            return;
        }
        if let (Some(il), Some(il_tail)) = (next_node.il, next_node.il_tail) {
            let ckey = next_node.ckey.clone();
            self.cells[il_tail].next = self.nodes[v].il;
            let node = &mut self.nodes[v];
            node.il = Some(il);
            if node.il_tail.is_none() {
                node.il_tail = Some(il_tail);
            }
            node.ckey = ckey;
        }
    }

    /// Drops an exhausted child, lifting the grandchildren of `next` if it
    /// still holds items
    fn prune(&mut self, v: usize) {
        let (Some(next), Some(child)) = (self.nodes[v].next, self.nodes[v].child) else {
            return;
        };
        if self.nodes[child].ckey != self.key_max_value {
            return;
        }

        if self.nodes[next].ckey == self.key_max_value {
            self.nodes[v].next = None;
            self.nodes[v].child = None;
        } else {
            self.nodes[v].child = self.nodes[next].child;
            self.nodes[v].next = self.nodes[next].next;
        }
        self.free_nodes.push(next);
        self.free_nodes.push(child);
    }

    fn reset(&mut self) {
        self.cells.clear();
        self.nodes.clear();
        self.heads = Self::sentinel_heads();
        self.free_cells.clear();
        self.free_nodes.clear();
        self.free_heads.clear();
    }
}
