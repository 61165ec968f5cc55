//! Concatenative directive printer.
//!
//! [`print_into`] walks a format byte string, copying literal runs and
//! dispatching one directive at a time. Rust has no varargs, so the
//! arguments arrive as an [`Arg`] slice consumed left to right; a directive
//! finding the wrong argument kind (or none) fails with
//! [`Error::InvalidArgument`] and a partially written prefix.

use chrono::NaiveDateTime;

use strand_str::ByteStr;
use strand_types::{Error, Result};

use crate::stream::{write_all_dyn, SerialValue, Stream};
use crate::string::StrStream;

/// One printer argument.
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    /// A string value, for `%P`/`%s` (and the format operand of `%D`).
    Str(&'a ByteStr),
    /// Raw bytes, interchangeable with [`Arg::Str`].
    Bytes(&'a [u8]),
    /// A single byte, for `%c`.
    Char(u8),
    /// Signed integer, for `%d`/`%i` and the `%I*` width family.
    Int(i64),
    /// Unsigned integer, for `%u`/`%x`/`%X`/`%o` and the `%U*` family.
    Uint(u64),
    /// Float, for `%f`/`%e`/`%g`.
    Float(f64),
    /// Broken-down calendar time, the second operand of `%D`.
    Time(NaiveDateTime),
    /// A typed value handed to the stream's `serialize`, for `%?`.
    Value(SerialValue<'a>),
}

fn next_bytes<'a>(args: &mut core::slice::Iter<'_, Arg<'a>>) -> Result<&'a [u8]> {
    match args.next().copied() {
        Some(Arg::Str(s)) => Ok(s.as_slice()),
        Some(Arg::Bytes(b)) => Ok(b),
        _ => Err(Error::InvalidArgument),
    }
}

fn next_int(args: &mut core::slice::Iter<'_, Arg<'_>>) -> Result<i64> {
    match args.next() {
        Some(Arg::Int(v)) => Ok(*v),
        _ => Err(Error::InvalidArgument),
    }
}

fn next_uint(args: &mut core::slice::Iter<'_, Arg<'_>>) -> Result<u64> {
    match args.next() {
        Some(Arg::Uint(v)) => Ok(*v),
        _ => Err(Error::InvalidArgument),
    }
}

fn emit(stream: &mut dyn Stream, text: &str, total: &mut usize) -> Result<()> {
    write_all_dyn(stream, text.as_bytes())?;
    *total += text.len();
    Ok(())
}

/// Walk `fmt`, writing literals and directives into `stream`; returns the
/// bytes written.
pub fn print_into(stream: &mut dyn Stream, fmt: &[u8], args: &[Arg<'_>]) -> Result<usize> {
    let mut args = args.iter();
    let mut total = 0usize;
    let mut i = 0;

    while i < fmt.len() {
        let run_end = fmt[i..]
            .iter()
            .position(|&b| b == b'%')
            .map_or(fmt.len(), |p| i + p);
        if run_end > i {
            write_all_dyn(stream, &fmt[i..run_end])?;
            total += run_end - i;
            i = run_end;
            continue;
        }

        // A directive; the '%' is at `i`.
        let Some(&directive) = fmt.get(i + 1) else {
            return Err(Error::InvalidArgument);
        };
        i += 2;
        match directive {
            b'%' => {
                write_all_dyn(stream, b"%")?;
                total += 1;
            }
            b'P' | b's' => {
                let bytes = next_bytes(&mut args)?;
                write_all_dyn(stream, bytes)?;
                total += bytes.len();
            }
            b'c' => match args.next() {
                Some(Arg::Char(c)) => {
                    write_all_dyn(stream, &[*c])?;
                    total += 1;
                }
                _ => return Err(Error::InvalidArgument),
            },
            b'd' | b'i' => emit(stream, &format!("{}", next_int(&mut args)?), &mut total)?,
            b'u' => emit(stream, &format!("{}", next_uint(&mut args)?), &mut total)?,
            b'x' => emit(stream, &format!("{:x}", next_uint(&mut args)?), &mut total)?,
            b'X' => emit(stream, &format!("{:X}", next_uint(&mut args)?), &mut total)?,
            b'o' => emit(stream, &format!("{:o}", next_uint(&mut args)?), &mut total)?,
            b'f' => match args.next() {
                Some(Arg::Float(v)) => emit(stream, &format!("{v:.6}"), &mut total)?,
                _ => return Err(Error::InvalidArgument),
            },
            b'e' => match args.next() {
                Some(Arg::Float(v)) => emit(stream, &format!("{v:e}"), &mut total)?,
                _ => return Err(Error::InvalidArgument),
            },
            b'g' => match args.next() {
                Some(Arg::Float(v)) => emit(stream, &format!("{v}"), &mut total)?,
                _ => return Err(Error::InvalidArgument),
            },
            b'D' => {
                let spec = next_bytes(&mut args)?;
                let when = match args.next() {
                    Some(Arg::Time(t)) => *t,
                    _ => return Err(Error::InvalidArgument),
                };
                let spec = core::str::from_utf8(spec).map_err(|_| Error::InvalidArgument)?;
                let mut text = String::new();
                // An unknown strftime item surfaces as a fmt error here
                // instead of panicking in Display::to_string.
                use core::fmt::Write;
                write!(text, "{}", when.format(spec)).map_err(|_| Error::InvalidArgument)?;
                emit(stream, &text, &mut total)?;
            }
            b'?' => match args.next() {
                Some(Arg::Value(v)) => total += stream.serialize(*v)?,
                _ => return Err(Error::InvalidArgument),
            },
            b'I' => {
                let Some(&width) = fmt.get(i) else {
                    return Err(Error::InvalidArgument);
                };
                i += 1;
                let v = next_int(&mut args)?;
                let v = match width {
                    b'b' => v as i8 as i64,
                    b'w' => v as i16 as i64,
                    b'd' => v as i32 as i64,
                    b'q' | b'm' => v,
                    b'p' | b'P' => v as isize as i64,
                    _ => return Err(Error::InvalidArgument),
                };
                emit(stream, &format!("{v}"), &mut total)?;
            }
            b'U' => {
                let Some(&width) = fmt.get(i) else {
                    return Err(Error::InvalidArgument);
                };
                i += 1;
                let v = next_uint(&mut args)?;
                let v = match width {
                    b'b' => v as u8 as u64,
                    b'w' => v as u16 as u64,
                    b'd' => v as u32 as u64,
                    b'q' | b'm' => v,
                    b'p' | b's' => v as usize as u64,
                    _ => return Err(Error::InvalidArgument),
                };
                emit(stream, &format!("{v}"), &mut total)?;
            }
            _ => return Err(Error::InvalidArgument),
        }
    }
    Ok(total)
}

/// Print into a fresh string value.
pub fn sprint(fmt: &[u8], args: &[Arg<'_>]) -> Result<ByteStr> {
    let mut out = ByteStr::new();
    {
        let mut stream = StrStream::new(&mut out);
        print_into(&mut stream, fmt, args)?;
    }
    Ok(out)
}
