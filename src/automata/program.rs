use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::errors::Error;

pub type InstPtr = usize;

/// A single instruction of a byte program.
///
/// Instructions point at each other by index only, so loops through
/// `Split`/`Jmp` are fine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Inst {
    /// Zero-width accept.
    Match,
    /// Continue at `to` without consuming input.
    Jmp { to: InstPtr },
    /// Continue at both `a` and `b`, `a` first.
    Split { a: InstPtr, b: InstPtr },
    /// Consume one byte in `lo..=hi` and fall through to the next instruction.
    Range { lo: u8, hi: u8 },
}

impl Inst {
    /// `Range` and `Match` are the only instructions that survive a closure
    /// into a DFA state signature.
    pub fn is_significant(&self) -> bool {
        matches!(*self, Inst::Range { .. } | Inst::Match)
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Inst::Match => write!(f, "match"),
            Inst::Jmp { to } => write!(f, "jmp {}", to),
            Inst::Split { a, b } => write!(f, "split {} {}", a, b),
            Inst::Range { lo, hi } => write!(f, "range {:#04x} {:#04x}", lo, hi),
        }
    }
}

/// An immutable instruction sequence. Instruction 0 is the start.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program {
    insts: Vec<Inst>,
}

impl Program {
    pub fn new(insts: Vec<Inst>) -> Program {
        Program { insts }
    }

    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }
}

impl Index<InstPtr> for Program {
    type Output = Inst;

    fn index(&self, ip: InstPtr) -> &Inst {
        &self.insts[ip]
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for inst in &self.insts {
            writeln!(f, "{}", inst)?;
        }
        Ok(())
    }
}

impl FromStr for Program {
    type Err = Error;

    /// Reads the listing format written by `Display`: one instruction per
    /// line, blank lines and `#` comments ignored.
    fn from_str(s: &str) -> Result<Program, Error> {
        let mut insts = vec![];
        let mut lines = vec![];
        for (n, line) in s.lines().enumerate() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            insts.push(parse_inst(n + 1, &fields)?);
            lines.push(n + 1);
        }

        let len = insts.len();
        for (ip, (inst, line)) in insts.iter().zip(lines).enumerate() {
            let msg = match *inst {
                Inst::Jmp { to } if to >= len => "jumps outside",
                Inst::Split { a, b } if a >= len || b >= len => "jumps outside",
                Inst::Range { .. } if ip + 1 >= len => "falls through past the end of",
                _ => continue,
            };
            return Err(syntax(
                line,
                format!("`{}` {} a program of {} instructions", inst, msg, len),
            ));
        }
        Ok(Program::new(insts))
    }
}

fn parse_inst(line: usize, fields: &[&str]) -> Result<Inst, Error> {
    let (op, args) = (fields[0], &fields[1..]);
    let arity = match op {
        "match" => 0,
        "jmp" => 1,
        "split" | "range" => 2,
        _ => return Err(syntax(line, format!("unknown instruction `{}`", op))),
    };
    if args.len() != arity {
        return Err(syntax(
            line,
            format!("`{}` takes {} operands, found {}", op, arity, args.len()),
        ));
    }
    let inst = match op {
        "match" => Inst::Match,
        "jmp" => Inst::Jmp {
            to: parse_ptr(line, args[0])?,
        },
        "split" => Inst::Split {
            a: parse_ptr(line, args[0])?,
            b: parse_ptr(line, args[1])?,
        },
        _ => Inst::Range {
            lo: parse_byte(line, args[0])?,
            hi: parse_byte(line, args[1])?,
        },
    };
    Ok(inst)
}

fn parse_ptr(line: usize, s: &str) -> Result<InstPtr, Error> {
    s.parse::<InstPtr>()
        .map_err(|_| syntax(line, format!("invalid instruction index `{}`", s)))
}

fn parse_byte(line: usize, s: &str) -> Result<u8, Error> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|_| syntax(line, format!("invalid byte `{}`", s)))
}

fn syntax(line: usize, msg: String) -> Error {
    Error::Syntax(format!("line {}: {}", line, msg))
}

#[cfg(test)]
mod test {
    use super::{Inst, Program};
    use crate::errors::Error;
    use pretty_assertions::assert_eq;

    fn i_range(lo: char, hi: char) -> Inst {
        Inst::Range {
            lo: lo as u8,
            hi: hi as u8,
        }
    }

    fn syntax_err(s: &str) -> String {
        match s.parse::<Program>() {
            Err(Error::Syntax(msg)) => msg,
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn display() {
        let p = Program::new(vec![
            Inst::Split { a: 1, b: 3 },
            i_range('a', 'a'),
            Inst::Jmp { to: 4 },
            i_range('b', 'b'),
            Inst::Match,
        ]);
        assert_eq!(
            p.to_string(),
            "split 1 3\nrange 0x61 0x61\njmp 4\nrange 0x62 0x62\nmatch\n"
        );
        assert_eq!(p.to_string().parse::<Program>(), Ok(p));
    }

    #[test]
    fn parse() {
        let listing = "
            # (a)*
            split 1 3
            range 97 0x61   # decimal and hex both work
            jmp 0

            match
        ";
        assert_eq!(
            listing.parse::<Program>(),
            Ok(Program::new(vec![
                Inst::Split { a: 1, b: 3 },
                i_range('a', 'a'),
                Inst::Jmp { to: 0 },
                Inst::Match,
            ]))
        );
        assert_eq!("".parse::<Program>(), Ok(Program::default()));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(syntax_err("match\nfoo 1"), "line 2: unknown instruction `foo`");
        assert_eq!(
            syntax_err("split 1"),
            "line 1: `split` takes 2 operands, found 1"
        );
        assert_eq!(syntax_err("range 0 256"), "line 1: invalid byte `256`");
        assert_eq!(syntax_err("jmp -1"), "line 1: invalid instruction index `-1`");
        assert_eq!(
            syntax_err("match\n\nsplit 0 3\nmatch"),
            "line 3: `split 0 3` jumps outside a program of 3 instructions"
        );
        assert_eq!(
            syntax_err("range 97 97"),
            "line 1: `range 0x61 0x61` falls through past the end of a program of 1 instructions"
        );
        assert_eq!(
            syntax_err("split 1 2\nmatch\n# trailing\nrange 0x61 0x62\n"),
            "line 4: `range 0x61 0x62` falls through past the end of a program of 3 instructions"
        );
    }

    #[test]
    fn significant() {
        assert!(Inst::Match.is_significant());
        assert!(i_range('a', 'z').is_significant());
        assert!(!Inst::Jmp { to: 0 }.is_significant());
        assert!(!Inst::Split { a: 0, b: 1 }.is_significant());
    }
}
