/// Represents the different kinds of tokens that the lexer can produce.
/// The markup is line oriented, so every token covers one whole line.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // == Special Tokens ==
    /// Represents the end of the input.
    Eof,
    /// A line holding nothing but whitespace. Separates blocks.
    BlankLine,

    // == Block Tokens ==
    /// A line starting with one to six `#` followed by a space (or nothing).
    /// The title has surrounding whitespace removed and may be empty.
    Heading { level: u32, title: String },
    /// Any other line, trimmed.
    Text(String),
}

/// A token with its type and position
#[derive(Debug, Clone)]
pub struct Token {
    pub ttype: TokenType,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Token {
    pub fn new(ttype: TokenType, pos_start: usize, pos_end: usize) -> Token {
        Token {
            ttype,
            pos_start,
            pos_end,
        }
    }
}

const MAX_HEADING_LEVEL: usize = 6;

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub fn lex(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.ttype == TokenType::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    fn next_token(&mut self) -> Token {
        let rest = &self.input[self.position..];
        if rest.is_empty() {
            return Token::new(TokenType::Eof, self.position, self.position);
        }

        let line_len = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let start = self.position;
        self.position += line_len;

        // Span covers the line without its terminator.
        let line = rest[..line_len].trim_end_matches(['\n', '\r']);
        let end = start + line.len();

        Token::new(Self::classify(line), start, end)
    }

    fn classify(line: &str) -> TokenType {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return TokenType::BlankLine;
        }

        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        if (1..=MAX_HEADING_LEVEL).contains(&hashes) {
            let after = &trimmed[hashes..];
            if after.is_empty() || after.starts_with([' ', '\t']) {
                return TokenType::Heading {
                    level: hashes as u32,
                    title: after.trim().to_string(),
                };
            }
        }

        TokenType::Text(trimmed.to_string())
    }
}
