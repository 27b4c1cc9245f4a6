use crate::{
    nfa::context::Context,
    util::id::NodeId,
};

/// Eliminate every epsilon edge from the automaton in `ctx`, preserving the
/// language accepted from the entry node and the token each input accepts
/// with.
///
/// Nodes are visited in depth first post order. For each node `N`, every node
/// `D` reachable from `N` by epsilon edges alone (its epsilon closure)
/// contributes its consuming edges to `N`, and `N` takes on the smallest
/// accept token found anywhere in the closure. `N`'s own epsilon edges are
/// then removed. Visiting successors first means most closures are already
/// flat by the time they are walked. Cycles of epsilon edges are handled by
/// the walk itself.
///
/// Afterwards, reference counts are recomputed from the entry node so that
/// only edges leaving reachable nodes are counted. Nodes that can no longer
/// be reached end up with a count of zero. If [`Config::compact`] is enabled,
/// those nodes are removed from the table outright.
///
/// Finally, every node's `id` field is set to its index in the table.
///
/// Running this on an automaton that is already reduced changes nothing.
///
/// [`Config::compact`]: crate::nfa::Config::compact
#[cfg_attr(not(feature = "logging"), allow(unused_variables))]
pub fn reduce_nfa(ctx: &mut Context) {
    let order = ctx.graph.post_order(&mut ctx.arena);
    let removed: usize = order.iter().map(|&id| collapse(ctx, id)).sum();
    let live = sweep(ctx);
    trace!(
        "reduced {} nodes: removed {} epsilon edges, {} nodes still live",
        order.len(),
        removed,
        live,
    );

    if ctx.config.get_compact() {
        let remap = ctx.graph.retain(&mut ctx.arena, |_, node| {
            !node.data.is_dead()
        });
        if let Some(entry) = remap[ctx.entry] {
            ctx.entry = entry;
        }
        trace!("compacted node table to {} nodes", ctx.graph.len());
    }
    for (id, data) in ctx.graph.data_mut() {
        data.id = id.as_u32();
    }
}

/// Fold the epsilon closure of `id` into `id` itself and drop its epsilon
/// edges. Returns the number of epsilon edges dropped.
fn collapse(ctx: &mut Context, id: NodeId) -> usize {
    closure(ctx, id);

    ctx.seen.clear();
    for edge in ctx.graph.node(id).edges().iter() {
        if !edge.data.is_epsilon() {
            ctx.seen.insert(&mut ctx.arena, (edge.data.symbol, edge.dest()));
        }
    }
    let mut accept = ctx.graph.node(id).data.accept_token;
    // The first entry in the closure is 'id'.
    for i in 1..ctx.visited.len() {
        let member = ctx.visited[i];
        accept = accept.min(ctx.graph.node(member).data.accept_token);
        let mut j = 0;
        while let Some(edge) = ctx.graph.node(member).edges().get(j) {
            j += 1;
            let (symbol, dest) = (edge.data.symbol, edge.dest());
            if edge.data.is_epsilon() {
                continue;
            }
            if ctx.seen.insert(&mut ctx.arena, (symbol, dest)).is_none() {
                ctx.add_transition(id, symbol, dest);
            }
        }
    }
    ctx.graph.node_mut(id).data.accept_token = accept;
    clear_visited(ctx);

    let mut removed = 0;
    let mut i = 0;
    while i < ctx.graph.node(id).edges().len() {
        let edge = &ctx.graph.node(id).edges()[i];
        if !edge.data.is_epsilon() {
            i += 1;
            continue;
        }
        // The last edge moves into slot 'i', so 'i' is examined again.
        let dest = ctx.graph.node_mut(id).edges_mut().swap_remove(i).dest();
        let count = &mut ctx.graph.node_mut(dest).data.reference_count;
        *count = count.saturating_sub(1);
        removed += 1;
    }
    removed
}

/// Record the epsilon closure of `start` in `ctx.visited`, with `start`
/// first, and set the `visited` flag of every node in it.
fn closure(ctx: &mut Context, start: NodeId) {
    debug_assert!(ctx.visited.is_empty());
    mark(ctx, start);
    let mut next = 0;
    while let Some(&id) = ctx.visited.get(next) {
        next += 1;
        let mut j = 0;
        while let Some(edge) = ctx.graph.node(id).edges().get(j) {
            j += 1;
            let dest = edge.dest();
            if edge.data.is_epsilon() && !ctx.graph.node(dest).data.visited {
                mark(ctx, dest);
            }
        }
    }
}

/// Recompute every reference count from the entry node and return how many
/// nodes are live.
fn sweep(ctx: &mut Context) -> usize {
    for (_, data) in ctx.graph.data_mut() {
        data.reference_count = 0;
    }
    let entry = ctx.entry;
    mark(ctx, entry);
    let mut next = 0;
    while let Some(&id) = ctx.visited.get(next) {
        next += 1;
        let mut j = 0;
        while let Some(edge) = ctx.graph.node(id).edges().get(j) {
            j += 1;
            let dest = edge.dest();
            if !ctx.graph.node(dest).data.visited {
                mark(ctx, dest);
            }
        }
    }
    let live = ctx.visited.len();
    for i in 0..live {
        let id = ctx.visited[i];
        let mut j = 0;
        while let Some(edge) = ctx.graph.node(id).edges().get(j) {
            j += 1;
            let dest = edge.dest();
            ctx.graph.node_mut(dest).data.reference_count += 1;
        }
    }
    ctx.graph.node_mut(entry).data.reference_count += 1;
    clear_visited(ctx);
    live
}

fn mark(ctx: &mut Context, id: NodeId) {
    ctx.graph.node_mut(id).data.visited = true;
    ctx.visited.push_back(&mut ctx.arena, id);
}

fn clear_visited(ctx: &mut Context) {
    let Context { ref mut graph, ref mut visited, .. } = *ctx;
    while let Some(id) = visited.pop_back() {
        graph.node_mut(id).data.visited = false;
    }
}
