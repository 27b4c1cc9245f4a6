use std::collections::BTreeSet;

use lexer_automata::{nfa::Context, util::id::NodeId};

/// Run `ctx`'s automaton over `input` from its entry node and return the
/// lowest accept token among the nodes it ends in.
///
/// Epsilon edges are followed, so this works both before and after
/// reduction.
pub fn run(ctx: &Context, input: &[u8]) -> Option<u32> {
    let mut current = closure(ctx, Some(ctx.entry()));
    for &byte in input {
        let mut next = BTreeSet::new();
        for &id in current.iter() {
            for edge in ctx.graph().node(id).edges().iter() {
                if !edge.data.is_epsilon() && edge.data.symbol == byte {
                    next.insert(edge.dest());
                }
            }
        }
        current = closure(ctx, next);
        if current.is_empty() {
            return None;
        }
    }
    current.iter().filter_map(|&id| ctx.graph().node(id).data.accept()).min()
}

fn closure(
    ctx: &Context,
    start: impl IntoIterator<Item = NodeId>,
) -> BTreeSet<NodeId> {
    let mut set = BTreeSet::new();
    let mut stack: Vec<NodeId> = start.into_iter().collect();
    while let Some(id) = stack.pop() {
        if !set.insert(id) {
            continue;
        }
        for edge in ctx.graph().node(id).edges().iter() {
            if edge.data.is_epsilon() {
                stack.push(edge.dest());
            }
        }
    }
    set
}
