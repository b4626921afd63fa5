use crate::token::{Token, TokenType};
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub LexError

    UnexpectedCharacter{line: usize, ch: char} = "LexError at line {line}: unexpected character '{ch}'",
    UnterminatedString{line: usize} = "LexError at line {line}: unterminated string literal",
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    read_position: usize,
    ch: Option<char>,
    line: usize,
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Scans the whole source, stopping at the first malformed token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token()?;
        let done = token.is(TokenType::Eof);
        tokens.push(token);
        if done {
            break;
        }
    }
    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            read_position: 0,
            ch: None,
            line: 1,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        if self.ch == Some('\n') {
            self.line += 1;
        }
        self.ch = self.input.get(self.read_position).copied();
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.read_position).copied()
    }

    fn single(&self, token_type: TokenType, ch: char) -> Token {
        Token::new(token_type, ch.to_string(), self.line)
    }

    /// Emits `two` if the next character is `=`, otherwise `one`.
    fn with_eq(&mut self, one: TokenType, two: TokenType, ch: char) -> Token {
        if self.peek_char() == Some('=') {
            self.read_char();
            Token::new(two, format!("{}=", ch), self.line)
        } else {
            self.single(one, ch)
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();

        let c = match self.ch {
            None => return Ok(Token::new(TokenType::Eof, "", self.line)),
            Some(c) => c,
        };

        let token = match c {
            '=' => self.with_eq(TokenType::Assign, TokenType::Eq, c),
            '!' => self.with_eq(TokenType::Bang, TokenType::NotEq, c),
            '<' => self.with_eq(TokenType::LT, TokenType::LTEq, c),
            '>' => self.with_eq(TokenType::GT, TokenType::GTEq, c),
            '+' => self.single(TokenType::Plus, c),
            '-' => self.single(TokenType::Minus, c),
            '*' => self.single(TokenType::Asterisk, c),
            '/' => self.single(TokenType::Slash, c),
            '%' => self.single(TokenType::Percent, c),
            ',' => self.single(TokenType::Comma, c),
            ':' => self.single(TokenType::Colon, c),
            '(' => self.single(TokenType::LParen, c),
            ')' => self.single(TokenType::RParen, c),
            '{' => self.single(TokenType::LBrace, c),
            '}' => self.single(TokenType::RBrace, c),
            '[' => self.single(TokenType::LBracket, c),
            ']' => self.single(TokenType::RBracket, c),
            '"' => return self.read_string(),
            c if is_letter(c) => {
                let line = self.line;
                let word = self.read_identifier();
                return Ok(Token::from_word(&word, line));
            }
            c if c.is_ascii_digit() => return Ok(self.read_number()),
            '.' if self.peek_char().map_or(false, |p| p.is_ascii_digit()) => {
                return Ok(self.read_number())
            }
            c => {
                return Err(LexError::UnexpectedCharacter {
                    line: self.line,
                    ch: c,
                })
            }
        };
        self.read_char();
        Ok(token)
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while let Some(c) = self.ch {
            if !(is_letter(c) || c.is_ascii_digit()) {
                break;
            }
            self.read_char();
        }
        self.input[start..self.position].iter().collect()
    }

    fn read_digits(&mut self) {
        while self.ch.map_or(false, |c| c.is_ascii_digit()) {
            self.read_char();
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.position;
        let line = self.line;
        self.read_digits();
        if self.ch == Some('.') && self.peek_char().map_or(false, |p| p.is_ascii_digit()) {
            self.read_char();
            self.read_digits();
        }
        let literal: String = self.input[start..self.position].iter().collect();
        Token::new(TokenType::Number, literal, line)
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let mut value = String::new();
        // skip the opening quote
        self.read_char();
        loop {
            match self.ch {
                None => return Err(LexError::UnterminatedString { line }),
                Some('"') => break,
                Some('\\') => {
                    self.read_char();
                    match self.ch {
                        None => return Err(LexError::UnterminatedString { line }),
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('r') => value.push('\r'),
                        Some(other) => value.push(other),
                    }
                }
                Some(c) => value.push(c),
            }
            self.read_char();
        }
        // skip the closing quote
        self.read_char();
        Ok(Token::new(TokenType::String, value, line))
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.ch {
                Some(c) if c.is_whitespace() => self.read_char(),
                Some('#') => self.skip_line(),
                Some('/') if self.peek_char() == Some('/') => self.skip_line(),
                _ => break,
            }
        }
    }

    fn skip_line(&mut self) {
        while self.ch.map_or(false, |c| c != '\n') {
            self.read_char();
        }
    }
}
