/*!
A recursive descent parser that emits a Thompson NFA as it goes.

The supported syntax is deliberately tiny. Every ASCII byte other than the
operators below is a literal:

* `(e)` groups `e`.
* `e*` matches `e` zero or more times. Binds tightest.
* `ef` matches `e` then `f`.
* `e|f` matches `e` or `f`. Binds loosest.

Each parsed subexpression becomes a fragment with one entry node and one exit
node, wired together with epsilon edges following the usual Thompson rules.
Concatenation and alternation are parsed in a loop, so the parser only
recurses when it enters a group, and the depth of that recursion is bounded
by [`Config::nest_limit`](crate::nfa::Config::nest_limit).
*/

use crate::{
    nfa::{
        context::{Context, FaEdge, FaNode},
        error::{Error, ErrorKind},
    },
    util::id::NodeId,
};

const PREC_UNION: u8 = 1;
const PREC_CONCAT: u8 = 2;
const PREC_STAR: u8 = 3;

/// Compile `pattern` into a fresh fragment of `ctx`'s graph and return the
/// fragment's entry node.
///
/// The fragment's exit node is marked as accepting with `accept_token`.
/// Nothing links the fragment to the rest of the graph. That is up to the
/// caller, usually through [`Context::add_pattern`].
///
/// On failure, the nodes already allocated for the fragment stay in the
/// graph, unlinked, until the context is dropped. A pattern containing a NUL
/// byte is rejected before anything is allocated.
pub fn generate_nfa(
    ctx: &mut Context,
    accept_token: u32,
    pattern: &str,
) -> Result<NodeId, Error> {
    if accept_token == FaNode::NO_ACCEPT {
        debug!("rejecting reserved accept token {}", accept_token);
        return Err(Error::invalid_accept_token(accept_token));
    }
    if let Some(index) = memchr::memchr(0, pattern.as_bytes()) {
        debug!("rejecting pattern with NUL at {}", index);
        return Err(Error::syntax(ErrorKind::NulByte, index, pattern));
    }

    let mut parser =
        Parser { ctx: &mut *ctx, pattern, index: 0, depth: 0 };
    let frag = parser.parse_infix(0)?;
    if !parser.is_end() {
        // The only byte that stops the top level loop early is ')'.
        return Err(parser.error(ErrorKind::UnopenedGroup));
    }
    ctx.graph.node_mut(frag.exit).data.accept_token = accept_token;
    trace!(
        "compiled pattern '{}', graph now has {} nodes, {}",
        pattern,
        ctx.graph.len(),
        ctx.arena.stats(),
    );
    Ok(frag.entry)
}

/// A compiled subexpression.
#[derive(Clone, Copy, Debug)]
struct Fragment {
    entry: NodeId,
    exit: NodeId,
}

struct Parser<'a> {
    ctx: &'a mut Context,
    pattern: &'a str,
    index: usize,
    depth: u32,
}

impl<'a> Parser<'a> {
    fn is_end(&self) -> bool {
        self.index == self.pattern.len()
    }

    fn peek(&self) -> Option<u8> {
        self.pattern.as_bytes().get(self.index).copied()
    }

    fn bump(&mut self) {
        self.index += 1;
    }

    fn error(&self, kind: ErrorKind) -> Error {
        let err = Error::syntax(kind, self.index, self.pattern);
        debug!("{}", err);
        err
    }

    /// Parse a run of operators that bind at least as tightly as
    /// `min_precedence`.
    fn parse_infix(&mut self, min_precedence: u8) -> Result<Fragment, Error> {
        let mut lhs = self.parse_operand()?;
        loop {
            let byte = match self.peek() {
                None | Some(b')') => break,
                Some(byte) => byte,
            };
            let precedence = match byte {
                b'*' => PREC_STAR,
                b'|' => PREC_UNION,
                _ => PREC_CONCAT,
            };
            if precedence < min_precedence {
                break;
            }
            lhs = match byte {
                b'*' => {
                    self.bump();
                    self.star(lhs)
                }
                b'|' => {
                    self.bump();
                    let rhs = self.parse_infix(precedence + 1)?;
                    self.union(lhs, rhs)
                }
                _ => {
                    let rhs = self.parse_infix(precedence + 1)?;
                    self.concat(lhs, rhs)
                }
            };
        }
        Ok(lhs)
    }

    /// Parse a literal or a parenthesized group.
    fn parse_operand(&mut self) -> Result<Fragment, Error> {
        match self.peek() {
            None => Err(self.error(ErrorKind::ExpectedOperand)),
            Some(b'|') | Some(b'*') => {
                Err(self.error(ErrorKind::UnexpectedOperator))
            }
            Some(b')') => Err(self.error(ErrorKind::UnopenedGroup)),
            Some(b'(') => {
                let limit = self.ctx.config.get_nest_limit();
                if self.depth >= limit {
                    return Err(
                        self.error(ErrorKind::NestLimitExceeded { limit })
                    );
                }
                self.bump();
                self.depth += 1;
                let inner = self.parse_infix(0)?;
                self.depth -= 1;
                if self.peek() != Some(b')') {
                    return Err(self.error(ErrorKind::UnclosedGroup));
                }
                self.bump();
                Ok(inner)
            }
            Some(byte) if byte >= 0x80 => {
                Err(self.error(ErrorKind::NonAscii))
            }
            Some(byte) => {
                let frag = self.fragment();
                self.ctx.add_transition(frag.entry, byte, frag.exit);
                self.bump();
                Ok(frag)
            }
        }
    }

    fn fragment(&mut self) -> Fragment {
        let entry = self.ctx.add_node();
        let exit = self.ctx.add_node();
        Fragment { entry, exit }
    }

    fn epsilon(&mut self, source: NodeId, dest: NodeId) {
        self.ctx.add_transition(source, FaEdge::EPSILON, dest);
    }

    fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.epsilon(first.exit, second.entry);
        Fragment { entry: first.entry, exit: second.exit }
    }

    fn union(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let frag = self.fragment();
        self.epsilon(frag.entry, left.entry);
        self.epsilon(frag.entry, right.entry);
        self.epsilon(left.exit, frag.exit);
        self.epsilon(right.exit, frag.exit);
        frag
    }

    fn star(&mut self, inner: Fragment) -> Fragment {
        let frag = self.fragment();
        // repeat
        self.epsilon(inner.exit, inner.entry);
        // skip
        self.epsilon(frag.entry, frag.exit);
        self.epsilon(frag.entry, inner.entry);
        self.epsilon(inner.exit, frag.exit);
        frag
    }
}
