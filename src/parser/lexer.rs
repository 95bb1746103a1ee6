//! Tokenizer for trace lines.
//!
//! The grammar only needs four punctuation tokens; everything else between
//! whitespace and punctuation is a word. Lexing never fails, so every
//! structural problem is reported by the parser with full context.

use std::ops::Range;

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LParen,
    RParen,
    Comma,
    Colon,
    Word,
}

/// A token and the byte range it covers in the lexed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text == word
    }
}

fn punctuation(c: char) -> Option<TokenKind> {
    match c {
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        ',' => Some(TokenKind::Comma),
        ':' => Some(TokenKind::Colon),
        _ => None,
    }
}

/// Split text into tokens, dropping whitespace
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (index, c) in input.char_indices() {
        let kind = punctuation(c);
        if kind.is_some() || c.is_whitespace() {
            if let Some(start) = word_start.take() {
                tokens.push(Token {
                    kind: TokenKind::Word,
                    text: &input[start..index],
                    span: start..index,
                });
            }
            if let Some(kind) = kind {
                let end = index + c.len_utf8();
                tokens.push(Token {
                    kind,
                    text: &input[index..end],
                    span: index..end,
                });
            }
        } else if word_start.is_none() {
            word_start = Some(index);
        }
    }

    if let Some(start) = word_start {
        tokens.push(Token {
            kind: TokenKind::Word,
            text: &input[start..],
            span: start..input.len(),
        });
    }

    tokens
}
