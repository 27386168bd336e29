//! Imports-only Go source parser
//!
//! Reads the package clause and the leading import declarations of a file.
//! Everything after the last import declaration is never looked at, so a
//! file with syntax errors in its function bodies still yields its imports.

use std::fs;
use std::path::Path;

use crate::domain::ports::{SourceImports, SourceParser};
use crate::error::{GoliveError, GoliveResult};

/// cgo pseudo-package, not a real import
const CGO_PSEUDO_PACKAGE: &str = "C";

/// `SourceParser` for `.go` files on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct GoSourceParser;

impl SourceParser for GoSourceParser {
    fn parse_imports(&self, file: &Path) -> GoliveResult<SourceImports> {
        let src = fs::read_to_string(file)?;
        parse_imports_str(&src).map_err(|message| GoliveError::Parse {
            file: file.to_path_buf(),
            message,
        })
    }
}

/// Parse the package clause and import declarations of Go source text
pub fn parse_imports_str(src: &str) -> Result<SourceImports, String> {
    let mut scanner = Scanner::new(src);

    scanner.skip_trivia();
    if scanner.ident() != Some("package") {
        return Err("expected 'package' clause".to_string());
    }
    scanner.skip_trivia();
    let package = match scanner.ident() {
        Some(name) => name.to_string(),
        None => return Err("expected package name".to_string()),
    };

    let mut imports = Vec::new();
    loop {
        scanner.skip_trivia_and_semicolons();
        let checkpoint = scanner.pos;
        if scanner.ident() != Some("import") {
            scanner.pos = checkpoint;
            break;
        }

        scanner.skip_trivia();
        if scanner.eat('(') {
            loop {
                scanner.skip_trivia_and_semicolons();
                if scanner.eat(')') {
                    break;
                }
                if scanner.at_end() {
                    return Err("unterminated import group".to_string());
                }
                imports.push(scanner.import_spec()?);
            }
        } else {
            imports.push(scanner.import_spec()?);
        }
    }

    imports.retain(|path| path != CGO_PSEUDO_PACKAGE);
    Ok(SourceImports { package, imports })
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        // BOM is legal at the start of a Go file
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                match trimmed.find('\n') {
                    Some(end) => self.pos += end + 1,
                    None => self.pos = self.src.len(),
                }
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                match body.find("*/") {
                    Some(end) => self.pos += 2 + end + 2,
                    None => self.pos = self.src.len(),
                }
            } else {
                return;
            }
        }
    }

    fn skip_trivia_and_semicolons(&mut self) {
        loop {
            self.skip_trivia();
            if !self.eat(';') {
                return;
            }
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_alphabetic() || c == '_' => {}
            _ => return None,
        }
        let end = chars
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += end;
        Some(&rest[..end])
    }

    /// `[name | . | _] "path"`
    fn import_spec(&mut self) -> Result<String, String> {
        if !self.eat('.') {
            self.ident();
        }
        self.skip_trivia();
        self.string_lit()
    }

    fn string_lit(&mut self) -> Result<String, String> {
        if self.eat('`') {
            let rest = self.rest();
            return match rest.find('`') {
                Some(end) => {
                    self.pos += end + 1;
                    Ok(rest[..end].to_string())
                }
                None => Err("unterminated raw string in import".to_string()),
            };
        }

        if !self.eat('"') {
            return Err(format!(
                "expected import path, found {}",
                self.peek()
                    .map(|c| format!("'{}'", c))
                    .unwrap_or_else(|| "end of file".to_string())
            ));
        }

        let mut value = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(value);
                }
                '\n' => break,
                '\\' => match chars.next() {
                    Some((_, escaped)) => value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        other => other,
                    }),
                    None => break,
                },
                other => value.push(other),
            }
        }
        Err("unterminated import path".to_string())
    }
}
