//! Epsilon closure and byte stepping over a [`Program`].
//!
//! Both functions take the caller's scratch `stack` so that a builder can run
//! thousands of closures without allocating.

use crate::automata::program::{Inst, InstPtr, Program};
use crate::automata::sparse::SparseSet;

/// Adds `ip` and everything reachable from it through `Jmp`/`Split` to `set`.
///
/// Members already in `set` are not followed again, which bounds the walk by
/// the program length even when the instruction graph has cycles. Insertion
/// order is depth first with the `a` side of a split before the `b` side.
pub fn add(program: &Program, set: &mut SparseSet, ip: InstPtr, stack: &mut Vec<InstPtr>) {
    stack.push(ip);
    while let Some(mut ip) = stack.pop() {
        loop {
            if set.contains(ip) {
                break;
            }
            set.insert(ip);
            match program[ip] {
                Inst::Match | Inst::Range { .. } => break,
                Inst::Jmp { to } => ip = to,
                Inst::Split { a, b } => {
                    stack.push(b);
                    ip = a;
                }
            }
        }
    }
}

/// Moves every thread in `from` over byte `b`, leaving the closure of the
/// survivors in `to`.
///
/// Returns whether `from` held a `Match`, i.e. whether the state being left
/// was accepting.
pub fn step(
    program: &Program,
    from: &SparseSet,
    to: &mut SparseSet,
    b: u8,
    stack: &mut Vec<InstPtr>,
) -> bool {
    to.clear();
    let mut is_match = false;
    for &ip in from {
        match program[ip] {
            Inst::Match => is_match = true,
            Inst::Range { lo, hi } if lo <= b && b <= hi => add(program, to, ip + 1, stack),
            _ => {}
        }
    }
    is_match
}
