use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::automata::closure;
use crate::automata::program::{Inst, InstPtr, Program};
use crate::automata::sparse::SparseSet;
use crate::dfa::{Dfa, State, StateId};
use crate::errors::{Error, Result};

/// Default maximum number of states a build may discover.
pub const STATE_LIMIT: usize = 10_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// A build fails once it holds more states than this.
    pub state_limit: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            state_limit: STATE_LIMIT,
        }
    }
}

impl Config {
    pub fn state_limit(mut self, limit: usize) -> Config {
        self.state_limit = limit;
        self
    }
}

/// Interns closures as DFA states, keyed on their significant instructions in
/// closure order. Two closures holding the same instructions in a different
/// order are different states.
struct StateCache {
    map: FxHashMap<Box<[InstPtr]>, StateId>,
    insts: Vec<InstPtr>,
}

impl StateCache {
    fn new() -> StateCache {
        let mut map = FxHashMap::default();
        map.reserve(1024);
        StateCache { map, insts: vec![] }
    }

    /// Returns the state for `set`, creating it if needed. `None` means the
    /// closure holds no `Range` or `Match`, i.e. it can only reject.
    fn cached_state(&mut self, dfa: &mut Dfa, set: &SparseSet) -> Option<StateId> {
        self.insts.clear();
        let mut is_match = false;
        for &ip in set {
            let inst = &dfa.program[ip];
            if inst.is_significant() {
                self.insts.push(ip);
                is_match |= *inst == Inst::Match;
            }
        }
        if self.insts.is_empty() {
            return None;
        }
        if let Some(&id) = self.map.get(&self.insts[..]) {
            return Some(id);
        }

        let id = dfa.states.len();
        let insts: Box<[InstPtr]> = self.insts.as_slice().into();
        dfa.states.push(State::new(insts.clone(), is_match));
        self.map.insert(insts, id);
        trace!(state = id, insts = ?self.insts, is_match, "new state");
        Some(id)
    }
}

/// Subset construction from a [`Program`] to a [`Dfa`].
///
/// A builder is consumed by [`Builder::build`]; its scratch sets and cache
/// live exactly as long as one build.
pub struct Builder {
    config: Config,
    dfa: Dfa,
    cache: StateCache,
    cur: SparseSet,
    next: SparseSet,
    stack: Vec<InstPtr>,
    worklist: Vec<StateId>,
}

impl Builder {
    pub fn new(program: Program) -> Builder {
        Builder::with_config(program, Config::default())
    }

    pub fn with_config(program: Program, config: Config) -> Builder {
        let len = program.len();
        Builder {
            config,
            dfa: Dfa::new(program),
            cache: StateCache::new(),
            cur: SparseSet::new(len),
            next: SparseSet::new(len),
            stack: vec![],
            worklist: vec![],
        }
    }

    pub fn build(mut self) -> Result<Dfa> {
        let limit = self.config.state_limit;
        debug!(insts = self.dfa.program.len(), limit, "dfa build starting");
        if self.dfa.program.is_empty() {
            return Ok(self.dfa);
        }

        closure::add(&self.dfa.program, &mut self.cur, 0, &mut self.stack);
        match self.cache.cached_state(&mut self.dfa, &self.cur) {
            Some(start) => self.worklist.push(start),
            None => debug!("start closure has no range or match, dfa is empty"),
        }

        while let Some(s) = self.worklist.pop() {
            trace!(state = s, pending = self.worklist.len(), "visiting state");
            self.cur.clear();
            for &ip in self.dfa.states[s].insts.iter() {
                self.cur.insert(ip);
            }
            for b in 0..=255u8 {
                self.run_state(s, b);
                if self.dfa.states.len() > limit {
                    warn!(limit, "dfa build aborted, too many states");
                    return Err(Error::TooManyStates { limit });
                }
            }
        }

        debug!(states = self.dfa.states.len(), "dfa build complete");
        Ok(self.dfa)
    }

    /// Fills in the transition of state `s` on byte `b`. `self.cur` must hold
    /// the signature of `s`.
    fn run_state(&mut self, s: StateId, b: u8) {
        closure::step(
            &self.dfa.program,
            &self.cur,
            &mut self.next,
            b,
            &mut self.stack,
        );
        let known = self.dfa.states.len();
        let ns = self.cache.cached_state(&mut self.dfa, &self.next);
        self.dfa.states[s].next[b as usize] = ns;
        if let Some(ns) = ns {
            if ns >= known {
                // cached_state only appends, so a new state is always the last one
                debug_assert_eq!(ns, known);
                self.worklist.push(ns);
            }
        }
    }
}
