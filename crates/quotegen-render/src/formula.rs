//! A1 references and a small formula evaluator
//!
//! Every formula the assembler writes goes through the helpers here, and the
//! consistency audit evaluates them again with [`evaluate`]. The evaluator
//! understands exactly what the workbook uses:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := ('-' | '+') factor | number | '(' expr ')' | SUM '(' arg (',' arg)* ')' | ref
//! arg     := ref ':' ref | expr
//! ref     := [sheet '!'] ['$'] LETTERS ['$'] DIGITS
//! sheet   := 'quoted name' | bare_name
//! ```

use thiserror::Error;

/// Formula evaluation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("syntax error at position {pos} in '{formula}'")]
    Syntax { formula: String, pos: usize },

    #[error("unsupported function: {0}")]
    UnknownFunction(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("{0} does not hold a number")]
    NotANumber(String),

    #[error("unknown sheet: {0}")]
    UnknownSheet(String),

    #[error("reference chain too deep at {0}")]
    TooDeep(String),
}

/// What a referenced cell holds, as far as arithmetic is concerned
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Empty,
    Number(f64),
    Text,
}

/// Source of cell values for [`evaluate`]
pub trait CellLookup {
    fn lookup(&self, sheet: &str, row: u32, col: u16) -> Result<Operand, FormulaError>;
}

// ============================================================================
// References
// ============================================================================

/// Convert column number to letter (0 -> A, 25 -> Z, 26 -> AA)
pub fn col_to_letter(col: u16) -> String {
    let mut result = String::new();
    let mut n = col as u32;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Convert column letters back to a 0-based column number
pub fn letter_to_col(letters: &str) -> Option<u16> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut n: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        n = n * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    u16::try_from(n - 1).ok()
}

/// A1 reference for a 0-based cell
pub fn cell_ref(row: u32, col: u16) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

/// Quote a sheet name for use in a formula; embedded quotes are doubled
pub fn quote_sheet(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// Sheet-qualified A1 reference, always quoted
pub fn sheet_cell_ref(sheet: &str, row: u32, col: u16) -> String {
    format!("{}!{}", quote_sheet(sheet), cell_ref(row, col))
}

/// `=SUM(..)` over a single column between two 0-based rows, inclusive
pub fn sum_column(col: u16, first_row: u32, last_row: u32) -> String {
    format!("=SUM({}:{})", cell_ref(first_row, col), cell_ref(last_row, col))
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate a formula (with or without the leading `=`) on `sheet`
pub fn evaluate<L>(formula: &str, sheet: &str, cells: &L) -> Result<f64, FormulaError>
where
    L: CellLookup + ?Sized,
{
    let body = formula.strip_prefix('=').unwrap_or(formula);
    let mut parser = Parser {
        formula: body,
        chars: body.chars().collect(),
        pos: 0,
        sheet,
        cells,
    };
    let value = parser.expr()?;
    parser.skip_ws();
    if parser.pos != parser.chars.len() {
        return Err(parser.syntax());
    }
    Ok(value)
}

struct Reference {
    sheet: Option<String>,
    row: u32,
    col: u16,
}

struct Parser<'a, L: CellLookup + ?Sized> {
    formula: &'a str,
    chars: Vec<char>,
    pos: usize,
    sheet: &'a str,
    cells: &'a L,
}

impl<L: CellLookup + ?Sized> Parser<'_, L> {
    fn syntax(&self) -> FormulaError {
        FormulaError::Syntax {
            formula: self.formula.to_string(),
            pos: self.pos,
        }
    }

    fn skip_ws(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.chars.get(self.pos).copied()
    }

    fn expect(&mut self, expected: char) -> Result<(), FormulaError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.syntax())
        }
    }

    fn expr(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some('-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.factor()?;
        loop {
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(FormulaError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, FormulaError> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('+') => {
                self.pos += 1;
                self.factor()
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expr()?;
                self.expect(')')?;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) if c.is_alphabetic() || c == '$' || c == '\'' || c == '_' => {
                if let Some(name) = self.function_name() {
                    return self.function(&name);
                }
                let reference = self.reference()?;
                self.value_of(&reference)
            }
            _ => Err(self.syntax()),
        }
    }

    fn number(&mut self) -> Result<f64, FormulaError> {
        let start = self.pos;
        while self
            .chars
            .get(self.pos)
            .is_some_and(|c| c.is_ascii_digit() || *c == '.')
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse().map_err(|_| FormulaError::Syntax {
            formula: self.formula.to_string(),
            pos: start,
        })
    }

    /// Consume `NAME(` if the input continues with a function call
    fn function_name(&mut self) -> Option<String> {
        let start = self.pos;
        let mut end = start;
        while self.chars.get(end).is_some_and(|c| c.is_ascii_alphabetic()) {
            end += 1;
        }
        if end > start && self.chars.get(end) == Some(&'(') {
            self.pos = end + 1;
            Some(self.chars[start..end].iter().collect::<String>().to_ascii_uppercase())
        } else {
            None
        }
    }

    fn function(&mut self, name: &str) -> Result<f64, FormulaError> {
        if name != "SUM" {
            return Err(FormulaError::UnknownFunction(name.to_string()));
        }
        let mut total = 0.0;
        loop {
            total += self.sum_argument()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') => {
                    self.pos += 1;
                    return Ok(total);
                }
                _ => return Err(self.syntax()),
            }
        }
    }

    fn sum_argument(&mut self) -> Result<f64, FormulaError> {
        let start = self.pos;
        if let Some(c) = self.peek() {
            if c.is_alphabetic() || c == '$' || c == '\'' || c == '_' {
                if let Ok(first) = self.reference() {
                    if self.peek() == Some(':') {
                        self.pos += 1;
                        let last = self.reference()?;
                        return self.sum_range(&first, &last);
                    }
                }
                self.pos = start;
            }
        }
        self.expr()
    }

    fn sum_range(&self, first: &Reference, last: &Reference) -> Result<f64, FormulaError> {
        let sheet = first.sheet.as_deref().unwrap_or(self.sheet);
        let mut total = 0.0;
        for row in first.row.min(last.row)..=first.row.max(last.row) {
            for col in first.col.min(last.col)..=first.col.max(last.col) {
                if let Operand::Number(v) = self.cells.lookup(sheet, row, col)? {
                    total += v;
                }
            }
        }
        Ok(total)
    }

    fn value_of(&self, reference: &Reference) -> Result<f64, FormulaError> {
        let sheet = reference.sheet.as_deref().unwrap_or(self.sheet);
        match self.cells.lookup(sheet, reference.row, reference.col)? {
            Operand::Number(v) => Ok(v),
            Operand::Empty => Ok(0.0),
            Operand::Text => Err(FormulaError::NotANumber(sheet_cell_ref(
                sheet,
                reference.row,
                reference.col,
            ))),
        }
    }

    fn reference(&mut self) -> Result<Reference, FormulaError> {
        self.skip_ws();
        let sheet = if self.chars.get(self.pos) == Some(&'\'') {
            let name = self.quoted_name()?;
            if self.chars.get(self.pos) != Some(&'!') {
                return Err(self.syntax());
            }
            self.pos += 1;
            Some(name)
        } else {
            let start = self.pos;
            let mut end = start;
            while self
                .chars
                .get(end)
                .is_some_and(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
            {
                end += 1;
            }
            if self.chars.get(end) == Some(&'!') {
                self.pos = end + 1;
                Some(self.chars[start..end].iter().collect())
            } else {
                None
            }
        };
        let (row, col) = self.cell()?;
        Ok(Reference { sheet, row, col })
    }

    fn quoted_name(&mut self) -> Result<String, FormulaError> {
        // opening quote
        self.pos += 1;
        let mut name = String::new();
        loop {
            match self.chars.get(self.pos) {
                Some('\'') if self.chars.get(self.pos + 1) == Some(&'\'') => {
                    name.push('\'');
                    self.pos += 2;
                }
                Some('\'') => {
                    self.pos += 1;
                    return Ok(name);
                }
                Some(c) => {
                    name.push(*c);
                    self.pos += 1;
                }
                None => return Err(self.syntax()),
            }
        }
    }

    fn cell(&mut self) -> Result<(u32, u16), FormulaError> {
        if self.chars.get(self.pos) == Some(&'$') {
            self.pos += 1;
        }
        let start = self.pos;
        while self.chars.get(self.pos).is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let letters: String = self.chars[start..self.pos].iter().collect();
        if self.chars.get(self.pos) == Some(&'$') {
            self.pos += 1;
        }
        let digits_start = self.pos;
        while self.chars.get(self.pos).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits: String = self.chars[digits_start..self.pos].iter().collect();

        let col = letter_to_col(&letters).ok_or_else(|| self.syntax())?;
        let row: u32 = digits.parse().map_err(|_| self.syntax())?;
        if row == 0 {
            return Err(self.syntax());
        }
        Ok((row - 1, col))
    }
}
