//! Subset construction for byte programs.
//!
//! A [`Program`] is a flat list of `Split`, `Jmp`, `Range` and `Match`
//! instructions, as emitted by a pattern compiler. [`Builder`] turns it into a
//! [`Dfa`] whose states each carry a 256-entry transition table, so a matcher
//! can advance one byte at a time without tracking threads.
//!
//! ```
//! use regex_dfa::{Builder, Inst, Program};
//!
//! // a|b
//! let program = Program::new(vec![
//!     Inst::Split { a: 1, b: 3 },
//!     Inst::Range { lo: b'a', hi: b'a' },
//!     Inst::Jmp { to: 4 },
//!     Inst::Range { lo: b'b', hi: b'b' },
//!     Inst::Match,
//! ]);
//! let dfa = Builder::new(program).build().unwrap();
//! let start = dfa.start().unwrap();
//! let next = dfa.next_state(start, b'b').unwrap();
//! assert!(dfa.is_match(next));
//! assert_eq!(dfa.next_state(start, b'c'), None);
//! ```

pub mod automata;
pub mod dfa;
pub mod errors;

pub use automata::program::{Inst, InstPtr, Program};
pub use dfa::{Builder, Config, Dfa, State, StateId, STATE_LIMIT};
pub use errors::{Error, Result};
