// ABOUTME: Tokenizer for the period terms of a relative time expression
// ABOUTME: Turns "1m0d,0m-5d" into an ordered list of month/day offsets

use super::error::{PeriodError, Result};

/// One `<months>m<days>d` offset. Both components are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTerm {
    pub months: i32,
    pub days: i64,
}

impl PeriodTerm {
    pub fn new(months: i32, days: i64) -> Self {
        Self { months, days }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Months,
    Days,
}

#[derive(Debug, Clone, Copy)]
struct Component {
    value: i64,
    unit: Unit,
}

/// Split a comma-separated term list and parse each term in order
pub fn tokenize(terms: &str) -> Result<Vec<PeriodTerm>> {
    terms.split(',').map(parse_term).collect()
}

/// Parse a single `<signed-int>m<signed-int>d` term
pub fn parse_term(term: &str) -> Result<PeriodTerm> {
    if term.is_empty() {
        return Err(PeriodError::malformed(term, "empty term"));
    }

    let mut scanner = Scanner::new(term);
    let mut components = Vec::with_capacity(2);
    while let Some(component) = scanner.next_component()? {
        components.push(component);
    }

    match components.as_slice() {
        [Component {
            value: months,
            unit: Unit::Months,
        }, Component {
            value: days,
            unit: Unit::Days,
        }] => {
            let months = i32::try_from(*months)
                .map_err(|_| PeriodError::malformed(term, "months component out of range"))?;
            Ok(PeriodTerm::new(months, *days))
        }
        [Component {
            unit: Unit::Days, ..
        }, Component {
            unit: Unit::Months,
            ..
        }] => Err(PeriodError::OutOfOrder {
            term: term.to_string(),
        }),
        [Component {
            unit: Unit::Months,
            ..
        }] => Err(PeriodError::malformed(term, "missing days component")),
        [Component {
            unit: Unit::Days, ..
        }] => Err(PeriodError::malformed(term, "missing months component")),
        _ => Err(PeriodError::malformed(
            term,
            "expected exactly one months component followed by one days component",
        )),
    }
}

struct Scanner<'a> {
    term: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(term: &'a str) -> Self {
        Self {
            term,
            bytes: term.as_bytes(),
            pos: 0,
        }
    }

    fn next_component(&mut self) -> Result<Option<Component>> {
        if self.pos >= self.bytes.len() {
            return Ok(None);
        }

        let start = self.pos;
        if matches!(self.bytes[self.pos], b'+' | b'-') {
            self.pos += 1;
        }
        let digits_start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == digits_start {
            return Err(PeriodError::malformed(
                self.term,
                format!("expected a number at offset {}", start),
            ));
        }

        let value: i64 = self.term[start..self.pos]
            .parse()
            .map_err(|_| PeriodError::malformed(self.term, "number out of range"))?;

        let unit = match self.bytes.get(self.pos) {
            Some(b'm') => Unit::Months,
            Some(b'd') => Unit::Days,
            Some(_) => {
                let found = self.term[self.pos..].chars().next().unwrap_or('?');
                return Err(PeriodError::malformed(
                    self.term,
                    format!("unknown unit '{}'", found),
                ));
            }
            None => {
                return Err(PeriodError::malformed(
                    self.term,
                    "number is missing its unit",
                ))
            }
        };
        self.pos += 1;

        Ok(Some(Component { value, unit }))
    }
}
