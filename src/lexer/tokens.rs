use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

lazy_static! {
    /// Identifier-shaped words that lex as [`TokenKind::Keyword`].
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("fn");
        set.insert("match");
        set.insert("if");
        set.insert("else");
        set.insert("true");
        set.insert("false");
        set.insert("null");
        set.insert("use");
        set.insert("module");
        set.insert("type");
        set.insert("as");
        set.insert("new");
        set.insert("extern");
        set.insert("let");
        set
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Float,
    Integer,
    String,

    LParen,
    RParen,

    /// Punctuation: `::`, `:`, `->`, `,`, `[`, `]`, `{`, `}`, `=`, `|`
    Special,
    Operator,

    Constant,
    Identifier,
    Keyword,

    // Synthesized from whitespace
    Indent,
    Outdent,
    Newline,

    EOF,
}

impl TokenKind {
    /// Whether the lexer synthesizes this kind rather than matching it
    /// against source text.
    pub fn is_synthetic(&self) -> bool {
        matches!(
            self,
            TokenKind::Indent | TokenKind::Outdent | TokenKind::Newline | TokenKind::EOF
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub column: usize,
    pub line: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind.is_synthetic() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} ({})", self.kind, self.value)
        }
    }
}

impl Token {
    /// Whether the token's text is exactly `value`, regardless of kind.
    pub fn is(&self, value: &str) -> bool {
        self.value == value
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether the token is of `kind` and its text is exactly `value`.
    pub fn is_kind_with(&self, kind: TokenKind, value: &str) -> bool {
        self.is_kind(kind) && self.is(value)
    }

    pub fn is_operator(&self, value: &str) -> bool {
        self.is_kind_with(TokenKind::Operator, value)
    }

    pub fn is_keyword(&self, value: &str) -> bool {
        self.is_kind_with(TokenKind::Keyword, value)
    }

    pub fn is_constant(&self) -> bool {
        self.is_kind(TokenKind::Constant)
    }

    pub fn is_identifier(&self) -> bool {
        self.is_kind(TokenKind::Identifier)
    }

    pub fn is_eof(&self) -> bool {
        self.is_kind(TokenKind::EOF)
    }

    /// Length of the span a diagnostic should underline for this token.
    pub fn underline_length(&self) -> usize {
        self.value.chars().count().max(1)
    }
}
