use std::fmt::{self, Display, Formatter};
use strum_macros::{Display, EnumString};

/// The closed set of reserved words. Matching is always against a whole
/// identifier, so `illai_flag` never lexes as `illai`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Keyword {
    Karuthu,
    Vaippu,
    Vagai,
    Ennam,
    Ezhuthu,
    UnmaiPoi,
    Maaththu,
    Kanakku,
    Listu,
    Ottu,
    Settu,
    Agarathi,
    Endraal,
    Illai,
    Matchu,
    Thirumba,
    Foru,
    Varambu,
    Seyal,
    Thiruppu,
    Arrayu,
    Suththi,
    Thoguppu,
    Thethi,
    KanakkuMath,
    Kaattu,
}

impl Keyword {
    /// Reserved words that double as native function names in call position.
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            Self::Thoguppu | Self::Varambu | Self::KanakkuMath | Self::Ennam | Self::Ezhuthu
        )
    }

    pub fn is_type_hint(self) -> bool {
        matches!(self, Self::Ennam | Self::Ezhuthu | Self::UnmaiPoi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Eof,

    // Identifiers and literals
    Ident,
    Number,
    String,
    True,
    False,

    Keyword(Keyword),

    // Operators
    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Bang,
    LT,
    GT,
    LTEq,
    GTEq,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Colon,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Eof => write!(f, "end of input"),
            Self::Ident => write!(f, "identifier"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::True => write!(f, "'unmai'"),
            Self::False => write!(f, "'poi'"),
            Self::Keyword(kw) => write!(f, "'{}'", kw),
            Self::Assign => write!(f, "'='"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Asterisk => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Percent => write!(f, "'%'"),
            Self::Bang => write!(f, "'!'"),
            Self::LT => write!(f, "'<'"),
            Self::GT => write!(f, "'>'"),
            Self::LTEq => write!(f, "'<='"),
            Self::GTEq => write!(f, "'>='"),
            Self::Eq => write!(f, "'=='"),
            Self::NotEq => write!(f, "'!='"),
            Self::Comma => write!(f, "','"),
            Self::Colon => write!(f, "':'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::LBracket => write!(f, "'['"),
            Self::RBracket => write!(f, "']'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
    pub line: usize,
}

impl Token {
    pub fn new(token_type: TokenType, literal: impl Into<String>, line: usize) -> Self {
        Self {
            token_type,
            literal: literal.into(),
            line,
        }
    }

    /// Classifies a scanned word: boolean literal, keyword or identifier.
    pub fn from_word(word: &str, line: usize) -> Self {
        let token_type = match word {
            "unmai" => TokenType::True,
            "poi" => TokenType::False,
            _ => match word.parse::<Keyword>() {
                Ok(kw) => TokenType::Keyword(kw),
                Err(_) => TokenType::Ident,
            },
        };
        Self::new(token_type, word, line)
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.token_type == TokenType::Keyword(keyword)
    }

    /// How the token reads in a diagnostic's "found ..." position.
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::Ident => format!("identifier '{}'", self.literal),
            TokenType::Number => format!("number {}", self.literal),
            TokenType::String => format!("string \"{}\"", self.literal),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keywords_match_whole_words() {
        let cases = vec![
            ("illai", TokenType::Keyword(Keyword::Illai)),
            ("illai_flag", TokenType::Ident),
            ("unmai_poi", TokenType::Keyword(Keyword::UnmaiPoi)),
            ("kanakku_math", TokenType::Keyword(Keyword::KanakkuMath)),
            ("kanakku", TokenType::Keyword(Keyword::Kanakku)),
            ("kaattuX", TokenType::Ident),
            ("unmai", TokenType::True),
            ("poi", TokenType::False),
            ("poiyaana", TokenType::Ident),
        ];

        for (word, expected) in cases.into_iter() {
            assert_eq!(Token::from_word(word, 1).token_type, expected, "{}", word);
        }
    }

    #[test]
    fn test_keyword_display_round_trips() {
        assert_eq!(Keyword::UnmaiPoi.to_string(), "unmai_poi");
        assert_eq!(Keyword::Thirumba.to_string(), "thirumba");
        assert_eq!(TokenType::Keyword(Keyword::Seyal).to_string(), "'seyal'");
    }
}
