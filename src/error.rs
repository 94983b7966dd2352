//! Error types for parsing and validation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .unwrap();
            }
        }
        String::from_utf8(buf).unwrap()
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        // Check if we found a reserved keyword where a name was expected
        let found_token = err.found().cloned();
        let reserved = found_token.as_ref().and_then(keyword_name);

        // Format the message based on the reason
        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                if let Some(keyword) = reserved {
                    format!(
                        "Cannot use '{}' as a name - it's a reserved keyword",
                        keyword
                    )
                } else {
                    let found_str = match found {
                        Some(tok) => format_token(tok),
                        None => "end of input".to_string(),
                    };
                    format!("Unexpected {}", found_str)
                }
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        // Format expected tokens nicely
        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| {
                match e {
                    chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                    chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                    chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                    chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                    chumsky::error::RichPattern::Any => Some("any token".to_string()),
                    chumsky::error::RichPattern::SomethingElse => None, // Skip "something else"
                }
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Keyword spelling for tokens that cannot be used as names
fn keyword_name(tok: &crate::parser::lexer::Token) -> Option<&'static str> {
    use crate::parser::lexer::Token;
    match tok {
        Token::Job => Some("job"),
        Token::Text => Some("text"),
        Token::Select => Some("select"),
        Token::From => Some("from"),
        Token::Env => Some("env"),
        Token::Platform => Some("platform"),
        Token::Command => Some("command"),
        Token::Prompt => Some("prompt"),
        Token::Required => Some("required"),
        Token::Desc => Some("desc"),
        Token::Linux => Some("linux"),
        Token::Windows => Some("windows"),
        Token::Macos => Some("macos"),
        _ => None,
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::String(s) => format!("string \"{}\"", s),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Colon => "':'".to_string(),
        other => match keyword_name(other) {
            Some(kw) => format!("keyword '{}'", kw),
            None => format!("{:?}", other),
        },
    }
}
