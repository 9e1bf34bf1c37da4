use std::fmt;

use crate::automata::program::{InstPtr, Program};

pub mod builder;

pub use builder::{Builder, Config, STATE_LIMIT};

pub type StateId = usize;

/// One DFA state: the significant instructions it stands for, whether it
/// accepts, and where each byte leads.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State {
    insts: Box<[InstPtr]>,
    next: Box<[Option<StateId>; 256]>,
    is_match: bool,
}

impl State {
    fn new(insts: Box<[InstPtr]>, is_match: bool) -> State {
        State {
            insts,
            next: Box::new([None; 256]),
            is_match,
        }
    }

    /// `Range` and `Match` instruction indices in closure order.
    pub fn insts(&self) -> &[InstPtr] {
        &self.insts
    }

    pub fn is_match(&self) -> bool {
        self.is_match
    }

    /// Target on byte `b`, `None` meaning reject.
    pub fn next(&self, b: u8) -> Option<StateId> {
        self.next[b as usize]
    }

    pub fn transitions(&self) -> &[Option<StateId>; 256] {
        &self.next
    }
}

/// A deterministic automaton compiled from a [`Program`].
///
/// Immutable once built. State 0, when present, is the start state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dfa {
    program: Program,
    states: Vec<State>,
}

impl Dfa {
    fn new(program: Program) -> Dfa {
        Dfa {
            program,
            states: Vec::with_capacity(16),
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The closure of instruction 0, or `None` if nothing can ever match.
    pub fn start(&self) -> Option<StateId> {
        if self.states.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn next_state(&self, id: StateId, b: u8) -> Option<StateId> {
        self.states[id].next(b)
    }

    pub fn is_match(&self, id: StateId) -> bool {
        self.states[id].is_match
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (id, state) in self.states.iter().enumerate() {
            let mark = if state.is_match { "*" } else { " " };
            writeln!(f, "{}{:>4}: {:?}", mark, id, state.insts)?;

            let mut b = 0;
            while b < 256 {
                let target = state.next[b];
                let start = b;
                while b + 1 < 256 && state.next[b + 1] == target {
                    b += 1;
                }
                if let Some(to) = target {
                    if start == b {
                        writeln!(f, "        {:#04x} => {}", start, to)?;
                    } else {
                        writeln!(f, "        {:#04x}-{:#04x} => {}", start, b, to)?;
                    }
                }
                b += 1;
            }
        }
        Ok(())
    }
}
