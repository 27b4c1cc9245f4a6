use crate::{
    graph::Graph,
    nfa::{builder::Config, error::Error, parse, reduce},
    util::{
        arena::{Arena, ArenaStats},
        id::NodeId,
        seq::Seq,
        set::Set,
    },
};

/// The payload of a single automaton node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FaNode {
    /// The node's position in the node table. This matches the node's
    /// [`NodeId`] after construction and again after reduction.
    pub id: u32,
    /// The token reported when input ends in this node, or
    /// [`FaNode::NO_ACCEPT`]. Lower tokens take priority.
    pub accept_token: u32,
    /// Scratch flag used by traversals. Always false between operations.
    pub visited: bool,
    /// How many edges lead here. After reduction, only edges leaving live
    /// nodes are counted, and the entry node holds one extra reference on
    /// behalf of the context. Zero means the node is dead.
    pub reference_count: u32,
}

impl FaNode {
    /// The accept token meaning "this node does not accept".
    pub const NO_ACCEPT: u32 = u32::MAX;

    fn new(id: NodeId) -> FaNode {
        FaNode {
            id: id.as_u32(),
            accept_token: FaNode::NO_ACCEPT,
            visited: false,
            reference_count: 0,
        }
    }

    /// Returns the accept token of this node, if it accepts.
    pub fn accept(&self) -> Option<u32> {
        if self.accept_token == FaNode::NO_ACCEPT {
            None
        } else {
            Some(self.accept_token)
        }
    }

    /// Returns true if this node can no longer be reached.
    pub fn is_dead(&self) -> bool {
        self.reference_count == 0
    }
}

/// The payload of a single automaton edge: the byte it consumes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FaEdge {
    /// The byte consumed by this edge, or [`FaEdge::EPSILON`].
    pub symbol: u8,
}

impl FaEdge {
    /// The symbol of an edge that consumes nothing.
    pub const EPSILON: u8 = 0;

    /// Returns true if this edge consumes no input.
    pub fn is_epsilon(&self) -> bool {
        self.symbol == FaEdge::EPSILON
    }
}

/// The automaton graph type.
pub type FaGraph = Graph<FaNode, FaEdge>;

/// Everything needed to build and reduce one automaton.
///
/// A context owns its arena and its graph. Every node and edge is charged
/// against the arena, and all of it is released together when the context is
/// dropped. There is no way to free part of an automaton.
///
/// Every context starts out with a single entry node. Patterns added with
/// [`Context::add_pattern`] hang off it by epsilon edges, so a context holds
/// the union of every pattern added to it.
#[derive(Clone, Debug)]
pub struct Context {
    pub(crate) arena: Arena,
    pub(crate) graph: FaGraph,
    pub(crate) entry: NodeId,
    /// Nodes whose `visited` flag was set by the current traversal.
    pub(crate) visited: Seq<NodeId>,
    /// Edges already present on the node being reduced.
    pub(crate) seen: Set<(u8, NodeId)>,
    pub(crate) config: Config,
}

impl Default for Context {
    fn default() -> Context {
        Context::new(Config::default())
    }
}

impl Context {
    /// Create a context with a fresh arena and a lone entry node.
    pub fn new(config: Config) -> Context {
        let mut ctx = Context {
            arena: Arena::new(config.get_arena_capacity()),
            graph: Graph::new(),
            entry: NodeId::ZERO,
            visited: Seq::new(),
            seen: Set::new(),
            config,
        };
        ctx.entry = ctx.add_node();
        ctx.graph.node_mut(ctx.entry).data.reference_count = 1;
        ctx
    }

    /// The configuration this context was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The designated entry node.
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// The automaton built so far.
    pub fn graph(&self) -> &FaGraph {
        &self.graph
    }

    /// The arena every node and edge is charged against.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// A snapshot of this context's arena usage.
    pub fn stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// Add a node that does not accept and has no edges.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::must(self.graph.len());
        self.graph.add_node(&mut self.arena, FaNode::new(id))
    }

    /// Add an edge from `source` to `dest` consuming `symbol`, and count the
    /// new reference to `dest`.
    ///
    /// Use [`FaEdge::EPSILON`] for an edge that consumes nothing.
    pub fn add_transition(
        &mut self,
        source: NodeId,
        symbol: u8,
        dest: NodeId,
    ) {
        self.graph.link(&mut self.arena, source, dest, FaEdge { symbol });
        self.graph.node_mut(dest).data.reference_count += 1;
    }

    /// Compile `pattern` and link it to the entry node by an epsilon edge.
    ///
    /// On success, returns the entry node of the pattern's own fragment. On
    /// failure, nothing is linked and the context is otherwise usable.
    pub fn add_pattern(
        &mut self,
        accept_token: u32,
        pattern: &str,
    ) -> Result<NodeId, Error> {
        let start = parse::generate_nfa(self, accept_token, pattern)?;
        self.add_transition(self.entry, FaEdge::EPSILON, start);
        Ok(start)
    }

    /// Eliminate every epsilon edge. See
    /// [`reduce_nfa`](crate::nfa::reduce_nfa).
    pub fn reduce(&mut self) {
        reduce::reduce_nfa(self);
    }

    /// Iterate over the nodes that are still reachable.
    pub fn live_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph
            .iter()
            .filter(|(_, node)| !node.data.is_dead())
            .map(|(id, _)| id)
    }

    /// Count the epsilon edges left in the automaton.
    pub fn epsilon_count(&self) -> usize {
        self.graph
            .iter()
            .flat_map(|(_, node)| node.edges().iter())
            .filter(|edge| edge.data.is_epsilon())
            .count()
    }
}
