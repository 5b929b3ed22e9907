// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::item::Item;
use fnv::FnvHashMap;

/// Identifies one tree branch by its traversal numbers, with the
/// transaction weight flowing through it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeCode {
    pub pre_order: u32,
    pub post_order: u32,
    pub tw: f64,
}

impl NodeCode {
    pub fn new(pre_order: u32, post_order: u32, tw: f64) -> NodeCode {
        NodeCode {
            pre_order,
            post_order,
            tw,
        }
    }

    pub fn is_ancestor_of(&self, other: &NodeCode) -> bool {
        self.pre_order < other.pre_order && self.post_order > other.post_order
    }

    pub fn same_node(&self, other: &NodeCode) -> bool {
        self.pre_order == other.pre_order && self.post_order == other.post_order
    }
}

#[derive(Debug)]
struct PpNode {
    item: Item,
    tw: f64,
    children: Vec<usize>,
    pre_order: u32,
    post_order: u32,
}

impl PpNode {
    fn new(item: Item) -> PpNode {
        PpNode {
            item,
            tw: 0.0,
            children: Vec::with_capacity(1),
            pre_order: 0,
            post_order: 0,
        }
    }

    fn is_root(&self) -> bool {
        self.item.is_null()
    }
}

/// Prefix tree of weighted transactions whose nodes carry pre-order and
/// post-order numbers, so containment between branches is an interval test.
pub struct PpTree {
    nodes: Vec<PpNode>,
}

impl PpTree {
    pub fn new() -> PpTree {
        PpTree {
            // Root.
            nodes: vec![PpNode::new(Item::null())],
        }
    }

    fn add_node(&mut self, parent: usize, item: Item) -> usize {
        let id = self.nodes.len();
        self.nodes.push(PpNode::new(item));
        self.nodes[parent].children.push(id);
        id
    }

    pub fn child_of(&self, id: usize, item: Item) -> Option<usize> {
        self.nodes[id]
            .children
            .iter()
            .cloned()
            .find(|&child_id| self.nodes[child_id].item == item)
    }

    fn insert_child(&mut self, id: usize, item: Item, tw: f64) -> usize {
        let child_id = match self.child_of(id, item) {
            Some(child_id) => child_id,
            None => self.add_node(id, item),
        };
        self.nodes[child_id].tw += tw;
        child_id
    }

    /// Inserts a transaction whose items are already in rank order.
    pub fn insert(&mut self, transaction: &[Item], tw: f64) {
        // Start iterating at the root node.
        let mut id = 0;
        for &item in transaction {
            id = self.insert_child(id, item, tw);
        }
    }

    /// Number of nodes, root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Numbers every node depth first: pre-order on the way down,
    /// post-order on the way back up, children in insertion order.
    pub fn assign_order(&mut self) {
        let mut pre = 0;
        let mut post = 0;
        // (node, index of the next child to visit)
        let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
        self.nodes[0].pre_order = pre;
        pre += 1;
        while let Some(top) = stack.last_mut() {
            let (id, next_child) = *top;
            if next_child < self.nodes[id].children.len() {
                top.1 += 1;
                let child = self.nodes[id].children[next_child];
                self.nodes[child].pre_order = pre;
                pre += 1;
                stack.push((child, 0));
            } else {
                self.nodes[id].post_order = post;
                post += 1;
                stack.pop();
            }
        }
    }

    /// The node codes of every item, each list in pre-order. Call after
    /// `assign_order`.
    pub fn node_codes(&self) -> FnvHashMap<Item, Vec<NodeCode>> {
        let mut by_pre_order: Vec<usize> = vec![0; self.nodes.len()];
        for (id, node) in self.nodes.iter().enumerate() {
            by_pre_order[node.pre_order as usize] = id;
        }
        let mut codes: FnvHashMap<Item, Vec<NodeCode>> = FnvHashMap::default();
        for &id in &by_pre_order {
            let node = &self.nodes[id];
            if node.is_root() {
                continue;
            }
            codes
                .entry(node.item)
                .or_insert_with(Vec::new)
                .push(NodeCode::new(node.pre_order, node.post_order, node.tw));
        }
        codes
    }
}
