use core::convert::TryFrom;

use crate::{
    nfa::{context::Context, error::Error, FaNode},
    util::arena,
};

/// The configuration used for building an NFA.
///
/// Every option is unset by default, in which case the `get_*` accessor
/// reports the documented default.
#[derive(Clone, Debug, Default)]
pub struct Config {
    arena_capacity: Option<usize>,
    nest_limit: Option<u32>,
    compact: Option<bool>,
}

impl Config {
    /// Return a new default configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Set the fixed number of bytes available to the arena backing the
    /// automaton.
    ///
    /// Every node, edge list and scratch table is charged against this
    /// budget. Exceeding it panics, so this should be sized for the largest
    /// set of patterns the caller intends to compile.
    ///
    /// The default is 1 MiB.
    pub fn arena_capacity(mut self, bytes: usize) -> Config {
        self.arena_capacity = Some(bytes);
        self
    }

    /// Set how deeply groups may be nested in a single pattern.
    ///
    /// The parser recurses once per nesting level, so this bounds its stack
    /// usage. Exceeding the limit is reported as
    /// [`ErrorKind::NestLimitExceeded`](crate::nfa::ErrorKind).
    ///
    /// The default is 250.
    pub fn nest_limit(mut self, limit: u32) -> Config {
        self.nest_limit = Some(limit);
        self
    }

    /// Whether reduction should drop dead nodes from the node table.
    ///
    /// Epsilon elimination leaves behind nodes that can no longer be reached
    /// from the entry node. When this is disabled, those nodes stay in the
    /// table with a reference count of zero and no live edge leading to
    /// them. When enabled, they are removed and the survivors are renumbered
    /// so that node IDs remain dense.
    ///
    /// This is disabled by default.
    pub fn compact(mut self, yes: bool) -> Config {
        self.compact = Some(yes);
        self
    }

    pub fn get_arena_capacity(&self) -> usize {
        self.arena_capacity.unwrap_or(arena::DEFAULT_CAPACITY)
    }

    pub fn get_nest_limit(&self) -> u32 {
        self.nest_limit.unwrap_or(250)
    }

    pub fn get_compact(&self) -> bool {
        self.compact.unwrap_or(false)
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    pub(crate) fn overwrite(self, o: Config) -> Config {
        Config {
            arena_capacity: o.arena_capacity.or(self.arena_capacity),
            nest_limit: o.nest_limit.or(self.nest_limit),
            compact: o.compact.or(self.compact),
        }
    }
}

/// A builder for compiling one or more patterns into a single reduced NFA.
///
/// Each pattern is compiled into its own Thompson fragment, and every
/// fragment is reachable from the context's entry node by an epsilon edge.
/// The combined automaton is then reduced, so the result has no epsilon
/// edges at all.
///
/// # Example
///
/// ```
/// use lexer_automata::nfa::Builder;
///
/// let ctx = Builder::new().build_many(&["if", "(i|f)*"]).unwrap();
/// let entry = ctx.graph().node(ctx.entry());
/// // The second pattern matches the empty string.
/// assert_eq!(Some(1), entry.data.accept());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new builder with a default configuration.
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Apply the given configuration options to this builder.
    pub fn configure(&mut self, config: Config) -> &mut Builder {
        self.config = self.config.clone().overwrite(config);
        self
    }

    /// Compile a single pattern that accepts with the given token.
    pub fn build(
        &self,
        accept_token: u32,
        pattern: &str,
    ) -> Result<Context, Error> {
        let mut ctx = Context::new(self.config.clone());
        ctx.add_pattern(accept_token, pattern)?;
        ctx.reduce();
        Ok(ctx)
    }

    /// Compile every pattern into one automaton.
    ///
    /// The pattern at index `i` accepts with token `i`, so when two patterns
    /// can accept in the same state, the one given first wins.
    pub fn build_many<P: AsRef<str>>(
        &self,
        patterns: &[P],
    ) -> Result<Context, Error> {
        let mut ctx = Context::new(self.config.clone());
        for (i, pattern) in patterns.iter().enumerate() {
            let token = u32::try_from(i).unwrap_or(FaNode::NO_ACCEPT);
            ctx.add_pattern(token, pattern.as_ref())?;
        }
        ctx.reduce();
        Ok(ctx)
    }

    /// Like [`Builder::build_many`], but with explicit accept tokens.
    pub fn build_tokens<P: AsRef<str>>(
        &self,
        patterns: &[(u32, P)],
    ) -> Result<Context, Error> {
        let mut ctx = Context::new(self.config.clone());
        for &(token, ref pattern) in patterns.iter() {
            ctx.add_pattern(token, pattern.as_ref())?;
        }
        ctx.reduce();
        Ok(ctx)
    }
}
