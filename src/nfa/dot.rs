/*!
Export an automaton in the Graphviz DOT format.

The output lists every node in table order, each followed by its outgoing
edges:

```text
digraph G {
  n0[shape=doublecircle,label="n0\n1"]
  n0->n2[label="a"]
  n1[shape=rectangle]
  n1->n2[label="a"]
  n2[shape=circle]
  ...
}
```

Dead nodes are drawn as rectangles, accepting nodes as double circles
labeled with their accept token, and every other node as a plain circle.
Epsilon edges are dotted. The same text is produced by the `Display`
implementation of [`Context`].
*/

use core::fmt;

use crate::nfa::context::Context;

/// Write `ctx`'s automaton to `wtr` in the DOT format.
#[cfg(feature = "std")]
pub fn write<W: std::io::Write>(
    ctx: &Context,
    mut wtr: W,
) -> std::io::Result<()> {
    write!(wtr, "{}", ctx)
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph G {{")?;
        for (_, node) in self.graph().iter() {
            let data = &node.data;
            let shape = if data.is_dead() {
                "rectangle"
            } else if data.accept().is_some() {
                "doublecircle"
            } else {
                "circle"
            };
            write!(f, "  n{}[shape={}", data.id, shape)?;
            if let Some(token) = data.accept() {
                write!(f, ",label=\"n{}\\n{}\"", data.id, token)?;
            }
            writeln!(f, "]")?;
            for edge in node.edges().iter() {
                let dest = self.graph().node(edge.dest()).data.id;
                write!(f, "  n{}->n{}", data.id, dest)?;
                if edge.data.is_epsilon() {
                    writeln!(f, "[style=dotted]")?;
                } else {
                    writeln!(f, "[label=\"{}\"]", Symbol(edge.data.symbol))?;
                }
            }
        }
        writeln!(f, "}}")
    }
}

/// A byte as it appears inside a quoted DOT label.
struct Symbol(u8);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b'"' => write!(f, "\\\""),
            b'\\' => write!(f, "\\\\"),
            b => write!(f, "{}", char::from(b)),
        }
    }
}
