//! Lexer (tokenizer) for JavaSST source code
//!
//! Produces [`Token`]s on demand (pull model); the parser drives it one
//! token at a time. Whitespace and `/* ... */` block comments are skipped
//! transparently and never appear in the token stream.
//!
//! Keywords are recognised with a longest-match-then-boundary-check
//! strategy: the whole keyword is matched via lookahead and only accepted
//! if the character after it cannot continue an identifier, so `classify`
//! lexes as a single identifier rather than `class` + `ify`.

use log::trace;

use crate::error::{LexError, LexErrorKind};
use crate::scanner::source::SourceStream;
use crate::scanner::token::{Position, Token, TokenKind};

/// All keywords, paired with their token kinds. Lookahead for the keyword
/// check is bounded by the longest entry plus one boundary character.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("class", TokenKind::Class),
    ("else", TokenKind::Else),
    ("final", TokenKind::Final),
    ("if", TokenKind::If),
    ("int", TokenKind::Int),
    ("public", TokenKind::Public),
    ("return", TokenKind::Return),
    ("void", TokenKind::Void),
    ("while", TokenKind::While),
];

/// Pull-based lexer over a [`SourceStream`].
pub struct Lexer {
    source: SourceStream,
}

impl Lexer {
    pub fn new(source: SourceStream) -> Self {
        Self { source }
    }

    /// Produce the next token. After the end of input every call returns
    /// an `Eof` token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        let position = self.source.peek_position();
        let Some(ch) = self.source.peek_char() else {
            return Ok(Token::new(String::new(), TokenKind::Eof, position));
        };

        let token = match ch {
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '<' => self.operator(TokenKind::Lt, TokenKind::Le),
            '>' => self.operator(TokenKind::Gt, TokenKind::Ge),
            '=' => self.operator(TokenKind::Eq, TokenKind::EqEq),
            '0'..='9' => self.number(),
            'a'..='z' | 'A'..='Z' => self.keyword_or_identifier(),
            _ => {
                self.source.next();
                return Err(LexError {
                    position,
                    kind: LexErrorKind::UnexpectedCharacter(ch),
                });
            }
        };

        trace!("lexed {} at {}", token, token.position);
        Ok(token)
    }

    /// Tokenize the remaining input, `Eof` token included. Convenience for
    /// tests and tooling; the parser pulls tokens lazily instead.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Skip whitespace (any character `<= ' '`) and block comments. A stray
    /// `*/` outside a comment is skipped as well, matching the reference
    /// behaviour of treating it as a comment terminator with no effect.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.source.peek_char() {
                Some(c) if c <= ' ' => {
                    self.source.next();
                }
                Some('/') if self.source.peek(2) == ['/', '*'] => {
                    let start = self.source.peek_position();
                    self.source.next();
                    self.source.next();
                    self.skip_comment(start)?;
                }
                Some('*') if self.source.peek(2) == ['*', '/'] => {
                    self.source.next();
                    self.source.next();
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consume input up to and including the first `*/`. Comments do not
    /// nest. The opening `/*` has already been consumed.
    fn skip_comment(&mut self, start: Position) -> Result<(), LexError> {
        loop {
            if self.source.peek(2) == ['*', '/'] {
                self.source.next();
                self.source.next();
                trace!("skipped comment starting at {}", start);
                return Ok(());
            }
            if self.source.next().is_none() {
                return Err(LexError {
                    position: start,
                    kind: LexErrorKind::UnterminatedComment,
                });
            }
        }
    }

    /// Consume one character and emit it as `kind`.
    fn single(&mut self, kind: TokenKind) -> Token {
        let position = self.source.peek_position();
        let mut lexeme = String::new();
        if let Some(ch) = self.source.next() {
            lexeme.push(ch);
        }
        Token::new(lexeme, kind, position)
    }

    /// Emit `single` or, if the next character is `=`, the combined
    /// two-character operator `combined`.
    fn operator(&mut self, single: TokenKind, combined: TokenKind) -> Token {
        if self.source.peek(2).get(1) == Some(&'=') {
            let position = self.source.peek_position();
            let mut lexeme = String::new();
            if let Some(ch) = self.source.next() {
                lexeme.push(ch);
            }
            if let Some(ch) = self.source.next() {
                lexeme.push(ch);
            }
            Token::new(lexeme, combined, position)
        } else {
            self.single(single)
        }
    }

    /// Greedily consume digits into a `Number` token.
    fn number(&mut self) -> Token {
        let position = self.source.peek_position();
        let mut lexeme = String::new();
        while let Some(c) = self.source.peek_char() {
            if !c.is_ascii_digit() {
                break;
            }
            lexeme.push(c);
            self.source.next();
        }
        Token::new(lexeme, TokenKind::Number, position)
    }

    /// Recognise a keyword via longest-match-then-boundary-check, or fall
    /// through to identifier scanning.
    fn keyword_or_identifier(&mut self) -> Token {
        for (word, kind) in KEYWORDS {
            let ahead = self.source.peek(word.len() + 1);
            if ahead.len() < word.len() {
                continue;
            }
            if !ahead[..word.len()].iter().copied().eq(word.chars()) {
                continue;
            }
            // Boundary check: the next character must not continue an
            // identifier, otherwise this is a longer identifier.
            if let Some(after) = ahead.get(word.len()) {
                if after.is_ascii_alphanumeric() {
                    continue;
                }
            }

            let position = self.source.peek_position();
            for _ in 0..word.len() {
                self.source.next();
            }
            return Token::new((*word).to_string(), *kind, position);
        }

        self.identifier()
    }

    /// Greedily consume letters and digits into an `Ident` token. The first
    /// character is known to be a letter.
    fn identifier(&mut self) -> Token {
        let position = self.source.peek_position();
        let mut lexeme = String::new();
        while let Some(c) = self.source.peek_char() {
            if !c.is_ascii_alphanumeric() {
                break;
            }
            lexeme.push(c);
            self.source.next();
        }
        Token::new(lexeme, TokenKind::Ident, position)
    }
}
