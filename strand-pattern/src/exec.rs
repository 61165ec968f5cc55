//! Back-end: bytecode execution with bounded backtracking.
//!
//! The matcher holds an input cursor, a program counter and a frame stack.
//! A `Match` that consumed more than its minimum leaves a quantifier frame
//! behind; a `Branch` leaves a choice frame with the input position and
//! capture boundaries to restore. On failure the stack unwinds: quantifier
//! frames give back one atom at a time (rewinding by the atom's stride, so
//! multibyte atoms rewind whole codepoints), choice frames divert to their
//! alternative. Matching is unanchored; the driver advances the start
//! offset one byte at a time.

use strand_types::{Error, Result};

use crate::atom::Atom;
use crate::compile::{compile, Program};
use crate::opcode::{read_word, Opcode, MATCHER_DEPTH, WORD};

/// A compiled pattern, ready to match.
pub struct Pattern {
    program: Program,
}

/// Capture results of a successful match; every capture is a borrowed
/// slice of the input. Capture `0` is the whole match.
pub struct Captures<'a> {
    input: &'a [u8],
    spans: Vec<Option<(usize, usize)>>,
}

impl<'a> Captures<'a> {
    /// Number of capture slots, the whole-match slot included.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// There is always at least the whole-match slot.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The bytes of capture `i`, if that group participated in the match.
    pub fn get(&self, i: usize) -> Option<&'a [u8]> {
        let (start, end) = self.spans.get(i).copied().flatten()?;
        Some(&self.input[start..end])
    }

    /// The byte range of capture `i` within the input.
    pub fn span(&self, i: usize) -> Option<(usize, usize)> {
        self.spans.get(i).copied().flatten()
    }
}

enum Frame {
    /// A greedy `Match` that may give repetitions back.
    Quant {
        match_pc: usize,
        after_pc: usize,
        entry: usize,
        repeats: usize,
    },
    /// A `Branch` alternative with the state to restore.
    Choice {
        branch_pc: usize,
        alt_pc: usize,
        pos: usize,
        starts: Vec<Option<usize>>,
        ends: Vec<Option<usize>>,
    },
}

impl Pattern {
    /// Compile `pattern`.
    pub fn new(pattern: &[u8]) -> Result<Self> {
        Ok(Self {
            program: compile(pattern)?,
        })
    }

    /// Capture slots a match will report (groups plus the whole match).
    pub fn capture_count(&self) -> usize {
        self.program.captures + 1
    }

    /// Whether the pattern matches anywhere in `input`.
    pub fn is_match(&self, input: &[u8]) -> Result<bool> {
        Ok(self.captures(input)?.is_some())
    }

    /// The first (leftmost) match, as a slice of the input.
    pub fn find<'a>(&self, input: &'a [u8]) -> Result<Option<&'a [u8]>> {
        Ok(self
            .captures(input)?
            .map(|caps| caps.get(0).expect("capture zero is the match")))
    }

    /// The first (leftmost) match with its captures.
    pub fn captures<'a>(&self, input: &'a [u8]) -> Result<Option<Captures<'a>>> {
        for start in 0..=input.len() {
            if let Some(spans) = self.run(input, start)? {
                return Ok(Some(Captures { input, spans }));
            }
        }
        Ok(None)
    }

    /// Execute the program against `input` anchored at `start`.
    fn run(&self, input: &[u8], start: usize) -> Result<Option<Vec<Option<(usize, usize)>>>> {
        let code = &self.program.code[..];
        let ncaps = self.program.captures;
        let mut starts: Vec<Option<usize>> = vec![None; ncaps + 1];
        let mut ends: Vec<Option<usize>> = vec![None; ncaps + 1];
        let mut stack: Vec<Frame> = Vec::new();
        let mut pc = 0usize;
        let mut pos = start;

        loop {
            if pc >= code.len() {
                let mut spans = vec![None; ncaps + 1];
                spans[0] = Some((start, pos));
                for id in 1..=ncaps {
                    if let (Some(s), Some(e)) = (starts[id], ends[id]) {
                        spans[id] = Some((s, e));
                    }
                }
                return Ok(Some(spans));
            }
            match Opcode::try_from(code[pc])? {
                Opcode::Nop => pc += 1,
                Opcode::CaptureStart => {
                    let id = read_word(code, pc + 1);
                    starts[id] = Some(pos);
                    pc += 1 + WORD;
                }
                Opcode::CaptureEnd => {
                    let id = read_word(code, pc + 1);
                    ends[id] = Some(pos);
                    pc += 1 + WORD;
                }
                Opcode::Jump => {
                    let after = pc + 1 + WORD;
                    let dist = read_word(code, pc + 1) as isize;
                    pc = (after as isize + dist) as usize;
                }
                Opcode::Branch => {
                    let after = pc + 1 + WORD;
                    let dist = read_word(code, pc + 1) as isize;
                    let alt = (after as isize + dist) as usize;
                    // Loop guard: re-entering the same choice without having
                    // consumed input means a zero-width loop body; take the
                    // exit instead of spinning.
                    let stale = stack.iter().rev().find_map(|frame| match frame {
                        Frame::Choice { branch_pc, pos: fpos, .. } if *branch_pc == pc => {
                            Some(*fpos == pos)
                        }
                        _ => None,
                    });
                    if stale == Some(true) {
                        pc = alt;
                    } else {
                        if stack.len() == MATCHER_DEPTH {
                            return Err(Error::OutOfRange);
                        }
                        stack.push(Frame::Choice {
                            branch_pc: pc,
                            alt_pc: alt,
                            pos,
                            starts: starts.clone(),
                            ends: ends.clone(),
                        });
                        pc = after;
                    }
                }
                Opcode::Match => {
                    let min = read_word(code, pc + 1);
                    let max = read_word(code, pc + 1 + WORD);
                    let (atom, after) = Atom::decode(code, pc + 1 + 2 * WORD)?;

                    let entry = pos;
                    let mut repeats = 0usize;
                    let mut cursor = pos;
                    while repeats < max {
                        match atom.match_at(input, cursor) {
                            Some(stride) if stride > 0 => {
                                cursor += stride;
                                repeats += 1;
                            }
                            _ => break,
                        }
                    }

                    if repeats < min {
                        if !unwind(code, input, &mut stack, &mut pc, &mut pos, &mut starts, &mut ends)? {
                            return Ok(None);
                        }
                        continue;
                    }
                    if repeats > min {
                        if stack.len() == MATCHER_DEPTH {
                            return Err(Error::OutOfRange);
                        }
                        stack.push(Frame::Quant {
                            match_pc: pc,
                            after_pc: after,
                            entry,
                            repeats,
                        });
                    }
                    pos = cursor;
                    pc = after;
                }
            }
        }
    }
}

/// Pop frames until one offers a way forward; `false` means this start
/// offset is exhausted.
fn unwind(
    code: &[u8],
    input: &[u8],
    stack: &mut Vec<Frame>,
    pc: &mut usize,
    pos: &mut usize,
    starts: &mut Vec<Option<usize>>,
    ends: &mut Vec<Option<usize>>,
) -> Result<bool> {
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Choice {
                alt_pc,
                pos: saved_pos,
                starts: saved_starts,
                ends: saved_ends,
                ..
            } => {
                *pc = alt_pc;
                *pos = saved_pos;
                *starts = saved_starts;
                *ends = saved_ends;
                return Ok(true);
            }
            Frame::Quant {
                match_pc,
                after_pc,
                entry,
                repeats,
            } => {
                let min = read_word(code, match_pc + 1);
                let repeats = repeats - 1;
                if repeats < min {
                    continue;
                }
                // Re-consume from the entry position; variable-stride atoms
                // rewind by whole strides this way.
                let (atom, _) = Atom::decode(code, match_pc + 1 + 2 * WORD)?;
                let mut cursor = entry;
                for _ in 0..repeats {
                    cursor += atom
                        .match_at(input, cursor)
                        .ok_or(Error::InvalidArgument)?;
                }
                if repeats > min {
                    stack.push(Frame::Quant {
                        match_pc,
                        after_pc,
                        entry,
                        repeats,
                    });
                }
                *pos = cursor;
                *pc = after_pc;
                return Ok(true);
            }
        }
    }
    Ok(false)
}
