use quickcheck::{Arbitrary, Gen, QuickCheck};

use lexer_automata::nfa::{Config, Context};

use crate::util::run;

/// A syntactically valid pattern over the alphabet `abc`.
#[derive(Clone, Debug)]
struct Pattern(String);

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Pattern {
        let mut pattern = String::new();
        let depth = u8::arbitrary(g) % 4;
        expr(g, depth, &mut pattern);
        Pattern(pattern)
    }
}

fn expr(g: &mut Gen, depth: u8, out: &mut String) {
    let choice = if depth == 0 { 0 } else { u8::arbitrary(g) % 6 };
    match choice {
        0 | 1 => out.push(*g.choose(&['a', 'b', 'c']).unwrap()),
        2 => {
            expr(g, depth - 1, out);
            expr(g, depth - 1, out);
        }
        3 => {
            expr(g, depth - 1, out);
            out.push('|');
            expr(g, depth - 1, out);
        }
        4 => {
            out.push('(');
            expr(g, depth - 1, out);
            out.push_str(")*");
        }
        _ => {
            out.push('(');
            expr(g, depth - 1, out);
            out.push(')');
        }
    }
}

/// A short input over the alphabet `abc`.
#[derive(Clone, Debug)]
struct Input(Vec<u8>);

impl Arbitrary for Input {
    fn arbitrary(g: &mut Gen) -> Input {
        let len = usize::arbitrary(g) % 7;
        Input((0..len).map(|_| b'a' + u8::arbitrary(g) % 3).collect())
    }
}

fn thompson(config: Config, patterns: &[Pattern]) -> Context {
    let mut ctx = Context::new(config);
    for (token, pattern) in patterns.iter().enumerate() {
        ctx.add_pattern(token as u32, &pattern.0).unwrap();
    }
    ctx
}

fn preserved(
    compact: bool,
    patterns: Vec<Pattern>,
    inputs: Vec<Input>,
) -> bool {
    let patterns = &patterns[..patterns.len().min(3)];
    let original = thompson(Config::new().compact(compact), patterns);
    let mut reduced = original.clone();
    reduced.reduce();
    if reduced.epsilon_count() != 0 {
        return false;
    }
    inputs
        .iter()
        .all(|input| run(&original, &input.0) == run(&reduced, &input.0))
}

#[test]
fn reduction_preserves_language() {
    fn prop(patterns: Vec<Pattern>, inputs: Vec<Input>) -> bool {
        preserved(false, patterns, inputs)
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<Pattern>, Vec<Input>) -> bool);
}

#[test]
fn compaction_preserves_language() {
    fn prop(patterns: Vec<Pattern>, inputs: Vec<Input>) -> bool {
        preserved(true, patterns, inputs)
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<Pattern>, Vec<Input>) -> bool);
}

#[test]
fn reduced_ids_are_dense() {
    fn prop(patterns: Vec<Pattern>) -> bool {
        let patterns = &patterns[..patterns.len().min(3)];
        let mut ctx = thompson(Config::new(), patterns);
        ctx.reduce();
        let dense = ctx.graph().iter().all(|(id, node)| {
            id.as_u32() == node.data.id && !node.data.visited
        });
        dense
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<Pattern>) -> bool);
}

#[test]
fn live_nodes_are_reachable() {
    fn prop(patterns: Vec<Pattern>) -> bool {
        let patterns = &patterns[..patterns.len().min(3)];
        let mut ctx = thompson(Config::new(), patterns);
        ctx.reduce();
        // Every edge leaving a live node leads to a live node.
        let closed = ctx.live_nodes().all(|id| {
            ctx.graph()
                .node(id)
                .edges()
                .iter()
                .all(|e| !ctx.graph().node(e.dest()).data.is_dead())
        });
        closed
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<Pattern>) -> bool);
}
