/*!
A directed graph whose nodes are owned by a single table.

A [`Graph`] owns every [`Node`] it creates, and each node owns its outgoing
[`Edge`]s. An edge refers to its destination only through a [`NodeId`], so
there is never any question of who owns what: the graph owns all nodes, and
edges hold handles. Nodes are never removed individually. The only way to drop
nodes is [`Graph::retain`], which rebuilds the table and renumbers the
survivors.

Every buffer in a graph is charged against an [`Arena`].
*/

use core::fmt;

use crate::util::{arena::Arena, id::NodeId, seq::Seq, set::Set};

/// An edge: a payload plus the node it leads to.
#[derive(Clone, Debug)]
pub struct Edge<E> {
    dest: NodeId,
    /// The payload attached to this edge.
    pub data: E,
}

impl<E> Edge<E> {
    /// The node this edge leads to.
    pub fn dest(&self) -> NodeId {
        self.dest
    }
}

/// A node: a payload plus its outgoing edges, in the order they were added.
#[derive(Clone, Debug)]
pub struct Node<N, E> {
    /// The payload attached to this node.
    pub data: N,
    edges: Seq<Edge<E>>,
}

impl<N, E> Node<N, E> {
    /// The outgoing edges of this node.
    pub fn edges(&self) -> &Seq<Edge<E>> {
        &self.edges
    }

    /// The outgoing edges of this node, mutably.
    ///
    /// Destinations cannot be changed through this, only payloads, order
    /// and membership.
    pub fn edges_mut(&mut self) -> &mut Seq<Edge<E>> {
        &mut self.edges
    }
}

/// A directed graph with node payloads `N` and edge payloads `E`.
#[derive(Clone)]
pub struct Graph<N, E> {
    nodes: Seq<Node<N, E>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Graph<N, E> {
        Graph::new()
    }
}

impl<N, E> Graph<N, E> {
    /// Create an empty graph.
    pub const fn new() -> Graph<N, E> {
        Graph { nodes: Seq::new() }
    }

    /// Returns the number of nodes in this graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if and only if this graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node carrying `data` and return its ID.
    ///
    /// The ID is the number of nodes added before it.
    pub fn add_node(&mut self, arena: &mut Arena, data: N) -> NodeId {
        let id = NodeId::must(self.nodes.len());
        self.nodes.push_back(arena, Node { data, edges: Seq::new() });
        id
    }

    /// Add an edge from `source` to `dest` carrying `data`, and return it so
    /// that callers may adjust its payload.
    ///
    /// # Panics
    ///
    /// When either node ID is not in this graph.
    pub fn link(
        &mut self,
        arena: &mut Arena,
        source: NodeId,
        dest: NodeId,
        data: E,
    ) -> &mut Edge<E> {
        assert!(
            dest.as_usize() < self.nodes.len(),
            "destination {:?} is not in the graph",
            dest,
        );
        let edges = &mut self.nodes[source].edges;
        edges.push_back(arena, Edge { dest, data });
        let last = edges.len() - 1;
        &mut edges[last]
    }

    /// Returns the node with the given ID.
    ///
    /// # Panics
    ///
    /// When the ID is not in this graph.
    pub fn node(&self, id: NodeId) -> &Node<N, E> {
        &self.nodes[id]
    }

    /// Returns the node with the given ID mutably.
    ///
    /// # Panics
    ///
    /// When the ID is not in this graph.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<N, E> {
        &mut self.nodes[id]
    }

    /// Iterate over every node in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<N, E>)> + '_ {
        NodeId::iter(self.len()).zip(self.nodes.iter())
    }

    /// Iterate mutably over every node's payload in insertion order.
    pub fn data_mut(
        &mut self,
    ) -> impl Iterator<Item = (NodeId, &mut N)> + '_ {
        let len = self.len();
        let data = self.nodes.iter_mut().map(|n| &mut n.data);
        NodeId::iter(len).zip(data)
    }

    /// Returns every node in depth first post order.
    ///
    /// Roots are taken in insertion order, skipping nodes already reached
    /// from an earlier root, and edges are followed in the order they were
    /// added. A node is emitted only after everything reachable from it that
    /// was not already on the path. The result is one interleaved order over
    /// the whole graph in which every node appears exactly once, cycles
    /// included.
    pub fn post_order(&self, arena: &mut Arena) -> Seq<NodeId> {
        let mut order = Seq::new();
        order.reserve(arena, self.len());
        let mut visited = Set::new();
        let mut stack: Seq<(NodeId, usize)> = Seq::new();
        for root in NodeId::iter(self.len()) {
            if visited.insert(arena, root).is_some() {
                continue;
            }
            stack.push_back(arena, (root, 0));
            while let Some(&mut (id, ref mut next)) = stack.back_mut() {
                match self.nodes[id].edges.get(*next) {
                    Some(edge) => {
                        *next += 1;
                        let dest = edge.dest;
                        if visited.insert(arena, dest).is_none() {
                            stack.push_back(arena, (dest, 0));
                        }
                    }
                    None => {
                        stack.pop_back();
                        order.push_back(arena, id);
                    }
                }
            }
        }
        order
    }

    /// Drop every node for which `keep` returns false, along with every edge
    /// that leads to a dropped node.
    ///
    /// Survivors keep their relative order and are renumbered densely. The
    /// returned table maps each old ID to its new ID, if it survived.
    pub fn retain(
        &mut self,
        arena: &mut Arena,
        mut keep: impl FnMut(NodeId, &Node<N, E>) -> bool,
    ) -> Seq<Option<NodeId>> {
        let mut remap = Seq::new();
        remap.reserve(arena, self.len());
        let mut survivors = 0;
        for (id, node) in self.iter() {
            if keep(id, node) {
                remap.push_back(arena, Some(NodeId::must(survivors)));
                survivors += 1;
            } else {
                remap.push_back(arena, None);
            }
        }

        let old = core::mem::replace(&mut self.nodes, Seq::new());
        self.nodes.reserve(arena, survivors);
        for (index, mut node) in old.into_iter().enumerate() {
            if remap[index].is_none() {
                continue;
            }
            node.edges.retain(|edge| remap[edge.dest].is_some());
            for edge in node.edges.iter_mut() {
                if let Some(dest) = remap[edge.dest] {
                    edge.dest = dest;
                }
            }
            self.nodes.push_back(arena, node);
        }
        remap
    }
}

impl<N: fmt::Debug, E: fmt::Debug> fmt::Debug for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph(")?;
        for (id, node) in self.iter() {
            write!(f, "{:06?}: {:?}", id.as_usize(), node.data)?;
            for edge in node.edges.iter() {
                write!(f, " {:?} => {:?}", edge.data, edge.dest.as_usize())?;
            }
            writeln!(f)?;
        }
        writeln!(f, ")")?;
        Ok(())
    }
}
