/*!
Compile regular expressions into a Thompson NFA and eliminate its epsilon
edges.

The usual way in is [`Builder`], which compiles a list of patterns into a
single [`Context`] and reduces it:

```
use lexer_automata::nfa::Builder;

let ctx = Builder::new().build_many(&["ab", "a|b"]).unwrap();
assert_eq!(0, ctx.epsilon_count());
```

The individual steps are also exposed. [`Context::add_pattern`] (or
[`generate_nfa`] for an unlinked fragment) builds the Thompson automaton, and
[`reduce_nfa`] (or [`Context::reduce`]) removes its epsilon edges in place.
The [`dot`] module renders a context for Graphviz at any point along the way.

Patterns are ASCII only and have no escapes: every byte other than `(`, `)`,
`|` and `*` is a literal.
*/

pub use self::{
    builder::{Builder, Config},
    context::{Context, FaEdge, FaGraph, FaNode},
    error::{Error, ErrorKind},
    parse::generate_nfa,
    reduce::reduce_nfa,
};

mod builder;
mod context;
pub mod dot;
mod error;
mod parse;
mod reduce;
