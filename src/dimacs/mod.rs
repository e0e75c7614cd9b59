// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Reading and writing max flow networks in DIMACS format.
//!
//! This module contains the line based tokenizer, the max flow format
//! itself lives in [`max`].

pub mod max;
pub use self::max::{read_from_file, Instance};

use std::error;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::str::{FromStr, SplitWhitespace};

/// Error when reading a file in DIMACS format.
#[derive(Debug)]
pub enum Error {
    /// The underlying reader failed.
    Io(io::Error),
    /// The file does not follow the line grammar.
    Format { line: usize, msg: String },
    /// The file is well formed but contains invalid values.
    Data { line: usize, msg: String },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Io(err) => err.fmt(fmt),
            Format { line, msg } => write!(fmt, "Format error on line {}: {}", line, msg),
            Data { line, msg } => write!(fmt, "Data error on line {}: {}", line, msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A reader returning the non-comment lines of a DIMACS file.
///
/// Empty lines and lines starting with `c` are skipped.
pub struct DimacsReader<R: Read> {
    io: BufReader<R>,

    line: String,
    line_number: usize,
}

impl<R: Read> DimacsReader<R> {
    pub fn new(reader: R) -> Self {
        DimacsReader {
            io: BufReader::new(reader),
            line: String::new(),
            line_number: 0,
        }
    }

    /// Return the tokens of the next non-comment line.
    ///
    /// Returns `None` at the end of the file.
    pub fn read_line(&mut self) -> Result<Option<Tokens>> {
        let line = &mut self.line;
        loop {
            line.clear();
            if self.io.read_line(line)? == 0 {
                return Ok(None);
            }

            self.line_number += 1;
            match line.trim_start().chars().next() {
                None | Some('c') => continue,
                Some(_) => {
                    return Ok(Some(Tokens {
                        it: line.split_whitespace(),
                        line: self.line_number,
                    }))
                }
            }
        }
    }

    /// Expect a line with the given descriptor.
    ///
    /// If the next line does not have this descriptor, an error is returned.
    /// Otherwise the *remaining* tokens are returned.
    pub fn expect_line(&mut self, descriptor: char) -> Result<Tokens> {
        let line_number = self.line_number;
        let mut toks = self.read_line()?.ok_or_else(|| Error::Format {
            line: line_number,
            msg: format!("unexpected end of file, expected '{}' line", descriptor),
        })?;
        match toks.next() {
            Some(d) if d.len() == 1 && d.starts_with(descriptor) => Ok(toks),
            Some(d) => Err(Error::Format {
                line: toks.line,
                msg: format!("unexpected line, expected '{}', got '{}'", descriptor, d),
            }),
            None => Err(Error::Format {
                line: toks.line,
                msg: "unexpected empty line".to_string(),
            }),
        }
    }

    /// Ensure that there are no more non-comment lines.
    pub fn expect_eof(&mut self) -> Result<()> {
        match self.read_line()? {
            Some(toks) => Err(Error::Format {
                line: toks.line,
                msg: "unexpected line at the end of file".to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Iterates over the tokens in a line.
pub struct Tokens<'a> {
    it: SplitWhitespace<'a>,
    pub line: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.it.next()
    }
}

impl<'a> Tokens<'a> {
    /// Return an error if the next token is not the given token.
    pub fn expect(&mut self, tok: &str) -> Result<()> {
        let nxt = self.str()?;
        if nxt == tok {
            Ok(())
        } else {
            Err(Error::Format {
                line: self.line,
                msg: format!("expected '{}', got '{}'", tok, nxt),
            })
        }
    }

    /// Returns the next token as `&str`.
    pub fn str(&mut self) -> Result<&'a str> {
        self.it.next().ok_or_else(|| Error::Format {
            line: self.line,
            msg: "expected token".to_string(),
        })
    }

    /// Returns the next token converted to a number.
    pub fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let line = self.line;
        self.it
            .next()
            .ok_or_else(|| Error::Format {
                line,
                msg: "expected number".to_string(),
            })?
            .parse()
            .map_err(|e| Error::Format {
                line,
                msg: format!("{}", e),
            })
    }

    /// Returns the next token as a 1-based node number in `1..=n`.
    ///
    /// The returned node id is 0-based.
    pub fn node(&mut self, n: usize) -> Result<usize> {
        let u: usize = self.number()?;
        if u < 1 || u > n {
            return Err(Error::Data {
                line: self.line,
                msg: format!("invalid node id {} (must be in 1..={})", u, n),
            });
        }
        Ok(u - 1)
    }

    /// Ensures that there is no next token.
    pub fn end(&mut self) -> Result<()> {
        if let Some(s) = self.it.next() {
            Err(Error::Format {
                line: self.line,
                msg: format!("unexpected token at end of line: {}", s),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DimacsReader, Error};
    use std::io::Cursor;

    #[test]
    fn test_tokens() {
        let mut r = DimacsReader::new(Cursor::new("c comment\n\n  p max 3 x\nn 4 s\n"));

        let mut toks = r.expect_line('p').unwrap();
        assert_eq!(toks.line, 3);
        toks.expect("max").unwrap();
        assert_eq!(toks.number::<usize>().unwrap(), 3);
        match toks.number::<usize>() {
            Err(Error::Format { line: 3, .. }) => {}
            _ => panic!("expected format error"),
        }

        let mut toks = r.expect_line('n').unwrap();
        match toks.node(3) {
            Err(Error::Data { line: 4, .. }) => {}
            _ => panic!("expected data error"),
        }

        assert!(r.expect_eof().is_ok());
        match r.expect_line('a') {
            Err(Error::Format { .. }) => {}
            _ => panic!("expected format error"),
        }
    }
}
