use bstr::ByteSlice;

use lexer_automata::nfa::{dot, Builder, Config, Context};

fn render(ctx: &Context) -> Vec<u8> {
    let mut out = vec![];
    dot::write(ctx, &mut out).unwrap();
    out
}

#[test]
fn framing() {
    let ctx = Builder::new().build(0, "a|b").unwrap();
    let out = render(&ctx);
    let lines: Vec<&[u8]> = out.lines().collect();
    assert_eq!(b"digraph G {", lines[0]);
    assert_eq!(b"}", lines[lines.len() - 1]);
    assert!(out.ends_with(b"}\n"));
    for line in &lines[1..lines.len() - 1] {
        assert!(line.starts_with(b"  n"), "{:?}", line.as_bstr());
    }
}

#[test]
fn one_line_per_node_and_edge() {
    let ctx = Builder::new().build(0, "(ab|c)*").unwrap();
    let out = render(&ctx);
    let nodes = out.lines().filter(|l| l.contains_str("[shape=")).count();
    let edges = out.lines().filter(|l| l.contains_str("->")).count();
    assert_eq!(ctx.graph().len(), nodes);
    let total: usize =
        ctx.graph().iter().map(|(_, n)| n.edges().len()).sum();
    assert_eq!(total, edges);
    // Reduction leaves no epsilon edges to draw dotted.
    assert!(!out.contains_str("style=dotted"));
}

#[test]
fn shapes() {
    let ctx = Builder::new().build(7, "(ab|c)*").unwrap();
    let out = render(&ctx);
    let lines: Vec<&[u8]> = out.lines().collect();
    let entry = b"  n0[shape=doublecircle,label=\"n0\\n7\"]";
    assert!(lines.contains(&&entry[..]));
    assert!(lines.contains(&&b"  n2[shape=circle]"[..]));
    assert!(lines.contains(&&b"  n1[shape=rectangle]"[..]));
    assert!(lines.contains(&&b"  n0->n2[label=\"a\"]"[..]));
    assert!(lines.contains(&&b"  n0->n6[label=\"c\"]"[..]));
}

#[test]
fn thompson_edges_are_dotted() {
    let mut ctx = Context::default();
    ctx.add_pattern(0, "a*").unwrap();
    let out = render(&ctx);
    let dotted = out.lines().filter(|l| l.ends_with(b"[style=dotted]"));
    assert_eq!(ctx.epsilon_count(), dotted.count());
    assert!(out.contains_str("  n0->n3[style=dotted]\n"));
}

#[test]
fn compacted_output_has_no_dead_nodes() {
    let mut builder = Builder::new();
    builder.configure(Config::new().compact(true));
    let ctx = builder.build_many(&["ab", "a|b", "(ab|c)*"]).unwrap();
    let out = render(&ctx);
    assert!(!out.contains_str("rectangle"));
    assert_eq!(ctx.to_string().as_bytes(), &out[..]);
}
