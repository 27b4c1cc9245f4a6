/*!
Build the automata behind a lexer: compile a set of token patterns into one
Thompson NFA, then eliminate its epsilon transitions so that a later stage can
determinize it.

# Overview

* [`nfa`] parses patterns, builds the automaton and reduces it. Start with
  [`nfa::Builder`].
* [`graph`] is the directed graph the automaton lives in.
* [`util`] holds the arena and the containers charged against it: a growable
  sequence, a Robin Hood hash map and set, and the node ID handle.

Every container in a single automaton draws from one fixed-size
[`Arena`](util::arena::Arena). Exceeding it panics. Malformed patterns are
reported as [`nfa::Error`] values.

# Example

```
use lexer_automata::nfa::Builder;

let ctx = Builder::new().build_tokens(&[(1, "(ab|c)*")]).unwrap();
let entry = ctx.graph().node(ctx.entry());
// Zero repetitions are allowed, so the entry node accepts.
assert_eq!(Some(1), entry.data.accept());

let mut symbols: Vec<u8> =
    entry.edges().iter().map(|e| e.data.symbol).collect();
symbols.sort();
assert_eq!(b"ac".to_vec(), symbols);
```

# Crate features

* **std** - Enabled by default. Adds `std::error::Error` for
  [`nfa::Error`] and [`nfa::dot::write`].
* **logging** - Emits `debug` messages for rejected patterns and `trace`
  summaries of each build step through the `log` crate.
*/

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(any(
    target_pointer_width = "16",
    target_pointer_width = "32",
    target_pointer_width = "64"
)))]
compile_error!("lexer-automata currently not supported on non-{16,32,64}");

extern crate alloc;

#[macro_use]
mod macros;

pub mod graph;
pub mod nfa;
pub mod util;
