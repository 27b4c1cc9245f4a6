use lexer_automata::{
    nfa::{generate_nfa, reduce_nfa, Builder, Config, Context, ErrorKind},
    util::id::NodeId,
};

use crate::util::run;

fn symbols(ctx: &Context, id: NodeId) -> Vec<u8> {
    let mut symbols: Vec<u8> = ctx
        .graph()
        .node(id)
        .edges()
        .iter()
        .map(|e| e.data.symbol)
        .collect();
    symbols.sort();
    symbols
}

fn live_edge_count(ctx: &Context) -> usize {
    ctx.live_nodes().map(|id| ctx.graph().node(id).edges().len()).sum()
}

#[test]
fn concatenation_is_a_chain() {
    let ctx = Builder::new().build(0, "ab").unwrap();
    assert_eq!(0, ctx.epsilon_count());
    assert_eq!(3, ctx.live_nodes().count());
    assert_eq!(2, live_edge_count(&ctx));
    assert_eq!(Some(0), run(&ctx, b"ab"));
    assert_eq!(None, run(&ctx, b"a"));
    assert_eq!(None, run(&ctx, b"abb"));

    let mut builder = Builder::new();
    builder.configure(Config::new().compact(true));
    let ctx = builder.build(0, "ab").unwrap();
    assert_eq!(3, ctx.graph().len());
    assert_eq!(2, live_edge_count(&ctx));
}

#[test]
fn alternation_branches_from_entry() {
    let ctx = Builder::new().build(6, "a|b").unwrap();
    assert_eq!(0, ctx.epsilon_count());
    let entry = ctx.graph().node(ctx.entry());
    assert_eq!(b"ab".to_vec(), symbols(&ctx, ctx.entry()));
    for edge in entry.edges().iter() {
        assert_eq!(Some(6), ctx.graph().node(edge.dest()).data.accept());
    }
}

#[test]
fn star_accepts_at_entry() {
    let ctx = Builder::new().build(2, "(ab|c)*").unwrap();
    assert_eq!(0, ctx.epsilon_count());
    assert_eq!(Some(2), ctx.graph().node(ctx.entry()).data.accept());
    assert_eq!(b"ac".to_vec(), symbols(&ctx, ctx.entry()));
    for input in [&b""[..], b"c", b"ab", b"abcab", b"ccc"] {
        assert_eq!(Some(2), run(&ctx, input), "{:?}", input);
    }
    for input in [&b"a"[..], b"b", b"abb", b"ca"] {
        assert_eq!(None, run(&ctx, input), "{:?}", input);
    }
}

#[test]
fn earlier_patterns_win() {
    let ctx = Builder::new()
        .build_many(&["if", "[a-z]", "(i|f)*"])
        .unwrap();
    assert_eq!(Some(0), run(&ctx, b"if"));
    assert_eq!(Some(2), run(&ctx, b"fi"));
    assert_eq!(Some(2), run(&ctx, b""));
    assert_eq!(Some(1), run(&ctx, b"[a-z]"));
    assert_eq!(None, run(&ctx, b"a"));
}

#[test]
fn explicit_tokens() {
    let ctx = Builder::new()
        .build_tokens(&[(10, "a*"), (3, "aa")])
        .unwrap();
    assert_eq!(Some(10), run(&ctx, b"a"));
    assert_eq!(Some(3), run(&ctx, b"aa"));
    assert_eq!(Some(10), run(&ctx, b"aaa"));
}

#[test]
fn unclosed_group() {
    let mut ctx = Context::default();
    let err = ctx.add_pattern(0, "(a").unwrap_err();
    assert_eq!(ErrorKind::UnclosedGroup, err.kind());
    assert_eq!(Some(2), err.index());
    assert_eq!(Some("(a"), err.pattern());
    assert_eq!(
        "in regex at 2 in '(a': expected ) to match previous (",
        err.to_string(),
    );
    // Nothing was linked to the entry node.
    assert!(ctx.graph().node(ctx.entry()).edges().is_empty());
}

#[test]
fn non_ascii_stops_immediately() {
    let mut ctx = Context::default();
    let err = ctx.add_pattern(0, "\u{e9}ab").unwrap_err();
    assert_eq!(ErrorKind::NonAscii, err.kind());
    assert_eq!(Some(0), err.index());
    assert_eq!(1, ctx.graph().len());
}

#[test]
fn error_is_std_error() {
    let err = Builder::new().build(0, "a)").unwrap_err();
    let err: Box<dyn std::error::Error> = Box::new(err);
    assert_eq!("in regex at 1 in 'a)': unexpected )", err.to_string());
}

#[test]
fn stepwise_pipeline() {
    let mut ctx = Context::default();
    let start = generate_nfa(&mut ctx, 4, "x*y").unwrap();
    // The fragment is not reachable from the entry node yet.
    assert_eq!(None, run(&ctx, b"y"));
    ctx.add_transition(ctx.entry(), 0, start);
    assert_eq!(Some(4), run(&ctx, b"xxy"));
    reduce_nfa(&mut ctx);
    assert_eq!(0, ctx.epsilon_count());
    assert_eq!(Some(4), run(&ctx, b"xxy"));
    assert_eq!(Some(4), run(&ctx, b"y"));
    assert_eq!(None, run(&ctx, b"x"));
}

#[test]
fn deep_nesting() {
    let depth = 200;
    let pattern = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
    let ctx = Builder::new().build(0, &pattern).unwrap();
    assert_eq!(Some(0), run(&ctx, b"a"));

    let mut builder = Builder::new();
    builder.configure(Config::new().nest_limit(10));
    let err = builder.build(0, &pattern).unwrap_err();
    assert_eq!(ErrorKind::NestLimitExceeded { limit: 10 }, err.kind());
}

#[test]
fn arena_statistics() {
    let ctx = Builder::new().build(0, "(ab|c)*").unwrap();
    let stats = ctx.stats();
    assert_eq!(1024 * 1024, stats.capacity);
    assert!(stats.bytes_requested > 0);
    assert!(stats.bytes_requested <= stats.bytes_used);
    assert_eq!(ctx.arena().used(), stats.bytes_used);
}

#[test]
#[should_panic(expected = "arena cannot exceed total of 1024 bytes")]
fn arena_exhaustion_panics() {
    let mut builder = Builder::new();
    builder.configure(Config::new().arena_capacity(1024));
    let _ = builder.build(0, "abcdefghijklmnopqrstuvwxyz");
}
