//! Recursive-descent parsers for call and wait lines.
//!
//! A call line is parsed in three parts:
//! 1. the head, `name(args)`, which ends at the `)` balancing its `(`
//! 2. the argument list, with at most one level of nested tuple
//! 3. trailing annotations keyed by label: `Time delay:`, `from:`, `Block delay:`
//!
//! Because the head is bounded by its parentheses, annotation text can never
//! leak into the arguments and vice versa.

use super::lexer::{tokenize, Token, TokenKind};
use super::schema::{Argument, ArgumentToken, CallEvent, RawLine, Scalar, TraceEvent};
use crate::utils::config::{
    ReplayConfig, BLOCK_DELAY_LABEL, CALLER_LABEL, DELAY_UNITS, MAX_NESTING_DEPTH,
    TIME_DELAY_LABEL,
};
use crate::utils::error::ParseError;
use log::debug;

/// Cursor over a token stream
struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consume `label` words followed by a colon, if present
    fn eat_label(&mut self, label: &[&str]) -> bool {
        let words = label.len();
        let Some(window) = self.tokens.get(self.pos..self.pos + words + 1) else {
            return false;
        };
        let matches = window[..words]
            .iter()
            .zip(label)
            .all(|(token, word)| token.is_word(word))
            && window[words].kind == TokenKind::Colon;

        if matches {
            self.pos += words + 1;
        }
        matches
    }

    /// Consume a unit word such as `seconds`, if present
    fn eat_unit(&mut self) {
        if let Some(token) = self.peek() {
            if DELAY_UNITS.iter().any(|unit| token.is_word(unit)) {
                self.pos += 1;
            }
        }
    }
}

/// Parse an unsigned quantity following a label
fn parse_quantity(cursor: &mut Cursor<'_, '_>, what: &str) -> Result<u64, String> {
    match cursor.next() {
        Some(token) if token.kind == TokenKind::Word => token
            .text
            .parse::<u64>()
            .map_err(|_| format!("invalid {} '{}'", what, token.text)),
        Some(token) => Err(format!("expected {} but found '{}'", what, token.text)),
        None => Err(format!("missing {}", what)),
    }
}

/// Where an argument list stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// The `)` closing the call; consumed
    RParen,
    /// End of the token stream
    End,
}

/// Parse a comma separated argument list
///
/// Spans are made relative to `base`, the offset of the argument text in the
/// lexed input.
fn parse_argument_list(
    cursor: &mut Cursor<'_, '_>,
    base: usize,
    terminator: Terminator,
) -> Result<Vec<Argument>, String> {
    let mut arguments = Vec::new();

    let closes = |kind: Option<TokenKind>| match terminator {
        Terminator::RParen => kind == Some(TokenKind::RParen),
        Terminator::End => kind.is_none(),
    };

    if closes(cursor.peek_kind()) {
        cursor.next();
        return Ok(arguments);
    }

    loop {
        arguments.push(parse_argument(cursor, base)?);

        let kind = cursor.peek_kind();
        if closes(kind) {
            cursor.next();
            return Ok(arguments);
        }
        match cursor.next() {
            Some(token) if token.kind == TokenKind::Comma => continue,
            Some(token) => return Err(format!("unexpected '{}' in argument list", token.text)),
            None => return Err("unclosed argument list".to_string()),
        }
    }
}

/// Parse one argument: a scalar word or a parenthesized tuple
fn parse_argument(cursor: &mut Cursor<'_, '_>, base: usize) -> Result<Argument, String> {
    let Some(first) = cursor.next() else {
        return Err("unclosed argument list".to_string());
    };

    match first.kind {
        TokenKind::Word => Ok(Argument {
            token: ArgumentToken::Scalar(Scalar::from_word(first.text)),
            start: first.span.start - base,
            end: first.span.end - base,
        }),
        TokenKind::LParen => {
            let items = parse_tuple_items(cursor)?;
            // parse_tuple_items consumed the closing paren
            let close = &cursor.tokens[cursor.pos - 1];
            Ok(Argument {
                token: ArgumentToken::Tuple(items),
                start: first.span.start - base,
                end: close.span.end - base,
            })
        }
        _ => Err(format!("empty argument before '{}'", first.text)),
    }
}

/// Parse the scalars of a tuple up to and including its `)`
fn parse_tuple_items(cursor: &mut Cursor<'_, '_>) -> Result<Vec<Scalar>, String> {
    let mut items = Vec::new();

    loop {
        match cursor.next() {
            Some(token) if token.kind == TokenKind::Word => {
                items.push(Scalar::from_word(token.text));
            }
            Some(token) if token.kind == TokenKind::LParen => {
                return Err(format!(
                    "tuple nesting deeper than {} levels",
                    MAX_NESTING_DEPTH
                ));
            }
            Some(token) if token.kind == TokenKind::RParen && items.is_empty() => {
                return Err("empty tuple".to_string());
            }
            Some(token) => return Err(format!("empty tuple element before '{}'", token.text)),
            None => return Err("unclosed tuple".to_string()),
        }

        match cursor.next() {
            Some(token) if token.kind == TokenKind::Comma => continue,
            Some(token) if token.kind == TokenKind::RParen => return Ok(items),
            Some(token) => return Err(format!("unexpected '{}' in tuple", token.text)),
            None => return Err("unclosed tuple".to_string()),
        }
    }
}

/// Parse free-standing argument text such as `(1, 2, true),57`
///
/// Used by the tuple normalizer when it is handed raw text.
pub(crate) fn parse_arguments_text(text: &str) -> Result<Vec<Argument>, String> {
    let tokens = tokenize(text);
    let mut cursor = Cursor::new(&tokens);
    parse_argument_list(&mut cursor, 0, Terminator::End)
}

/// Parse a call line
///
/// # Arguments
/// * `line` - A line classified as [`LineKind::CallLine`](super::LineKind::CallLine)
/// * `config` - Supplies the call prefix
///
/// # Errors
/// * `ParseError::MalformedCall` - the line has no `name(args)` head, the
///   parentheses do not balance, or an annotation carries no valid value
pub fn parse_call(line: &RawLine<'_>, config: &ReplayConfig) -> Result<TraceEvent, ParseError> {
    let stripped = line.stripped();
    let malformed = |reason: String| ParseError::MalformedCall {
        line: line.number,
        content: stripped.to_string(),
        reason,
    };

    let rest = stripped
        .strip_prefix(config.call_prefix.as_str())
        .ok_or_else(|| malformed(format!("missing call prefix '{}'", config.call_prefix)))?;

    let tokens = tokenize(rest);
    let mut cursor = Cursor::new(&tokens);

    // Head: name "(" args ")"
    let function_name = match cursor.next() {
        Some(token) if token.kind == TokenKind::Word => token.text.to_string(),
        _ => return Err(malformed("missing function name".to_string())),
    };

    let open = match cursor.next() {
        Some(token) if token.kind == TokenKind::LParen => token,
        _ => return Err(malformed("expected '(' after function name".to_string())),
    };
    let base = open.span.end;

    let arguments =
        parse_argument_list(&mut cursor, base, Terminator::RParen).map_err(&malformed)?;
    let close = &tokens[cursor.pos - 1];
    let arguments_text = rest[base..close.span.start].to_string();

    // Annotations
    let mut call = CallEvent {
        function_name,
        arguments,
        arguments_text,
        caller: None,
        delay_seconds: None,
        block_delay: None,
    };

    while !cursor.is_done() {
        if cursor.eat_label(TIME_DELAY_LABEL) {
            let delay = parse_quantity(&mut cursor, "time delay").map_err(&malformed)?;
            cursor.eat_unit();
            if call.delay_seconds.replace(delay).is_some() {
                return Err(malformed("duplicate time delay".to_string()));
            }
        } else if cursor.eat_label(BLOCK_DELAY_LABEL) {
            let blocks = parse_quantity(&mut cursor, "block delay").map_err(&malformed)?;
            cursor.eat_unit();
            if call.block_delay.replace(blocks).is_some() {
                return Err(malformed("duplicate block delay".to_string()));
            }
        } else if cursor.eat_label(CALLER_LABEL) {
            let caller = match cursor.next() {
                Some(token) if token.kind == TokenKind::Word => token.text.to_string(),
                _ => return Err(malformed("missing caller address".to_string())),
            };
            if call.caller.replace(caller).is_some() {
                return Err(malformed("duplicate caller".to_string()));
            }
        } else if let Some(token) = cursor.next() {
            if matches!(token.kind, TokenKind::LParen | TokenKind::RParen) {
                return Err(malformed(format!(
                    "unbalanced '{}' after call head",
                    token.text
                )));
            }
            debug!(
                "line {}: ignoring trailing token '{}'",
                line.number, token.text
            );
        }
    }

    Ok(TraceEvent::Call(call))
}

/// Parse a wait line
///
/// # Errors
/// * `ParseError::MalformedWait` - no `Time delay: <N>` clause, or its value
///   is not an unsigned integer
pub fn parse_wait(line: &RawLine<'_>, config: &ReplayConfig) -> Result<TraceEvent, ParseError> {
    let stripped = line.stripped();
    let malformed = || ParseError::MalformedWait {
        line: line.number,
        content: stripped.to_string(),
    };

    let rest = stripped
        .strip_prefix(config.wait_marker.as_str())
        .ok_or_else(malformed)?;

    let tokens = tokenize(rest);
    let mut cursor = Cursor::new(&tokens);
    let mut delay_seconds = None;
    let mut block_delay = None;

    while !cursor.is_done() {
        if cursor.eat_label(TIME_DELAY_LABEL) {
            let delay = parse_quantity(&mut cursor, "time delay").map_err(|_| malformed())?;
            delay_seconds = Some(delay);
            cursor.eat_unit();
        } else if cursor.eat_label(BLOCK_DELAY_LABEL) {
            let blocks = parse_quantity(&mut cursor, "block delay").map_err(|_| malformed())?;
            block_delay = Some(blocks);
            cursor.eat_unit();
        } else {
            cursor.next();
        }
    }

    let delay_seconds = delay_seconds.ok_or_else(malformed)?;
    Ok(TraceEvent::Wait {
        delay_seconds,
        block_delay,
    })
}
