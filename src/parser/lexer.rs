//! Lexer for the jobforge definition language using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Declaration keywords
    #[token("job")]
    Job,
    #[token("text")]
    Text,
    #[token("select")]
    Select,
    #[token("from")]
    From,
    #[token("env")]
    Env,
    #[token("platform")]
    Platform,
    #[token("command")]
    Command,

    // Modifier keywords
    #[token("prompt")]
    Prompt,
    #[token("required")]
    Required,
    #[token("desc")]
    Desc,

    // Platform tag keywords
    #[token("linux")]
    Linux,
    #[token("windows")]
    Windows,
    #[token("macos")]
    Macos,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // Literals - identifiers must come after keywords. Dotted segments are
    // part of the identifier so CI-style names like `additional.gradle.parameters`
    // lex as one token (and `text.mode` never splits into keyword + dot).
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z0-9_]+)*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len()-1])
    })]
    String(String),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

/// Process escape sequences inside a string literal. Job definitions carry
/// Windows paths (`\\`) and quoted command fragments (`\"`), so escapes are
/// resolved at lex time rather than left to every consumer.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_keywords() {
        let tokens: Vec<_> = lex("job text select env platform command")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Job,
                Token::Text,
                Token::Select,
                Token::Env,
                Token::Platform,
                Token::Command
            ]
        );
    }

    #[test]
    fn test_modifier_keywords() {
        let tokens: Vec<_> = lex("prompt required desc").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Prompt, Token::Required, Token::Desc]);
    }

    #[test]
    fn test_platform_tags() {
        let tokens: Vec<_> = lex("linux, windows, macos").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Linux,
                Token::Comma,
                Token::Windows,
                Token::Comma,
                Token::Macos
            ]
        );
    }

    #[test]
    fn test_identifiers_and_strings() {
        let tokens: Vec<_> = lex(r#"runs "10""#).map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("runs".to_string()),
                Token::String("10".to_string())
            ]
        );
    }

    #[test]
    fn test_dotted_identifiers() {
        let tokens: Vec<_> = lex("additional.gradle.parameters performance.baselines")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("additional.gradle.parameters".to_string()),
                Token::Ident("performance.baselines".to_string()),
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_stays_identifier() {
        // Maximal munch: a dotted name starting with a keyword is one identifier.
        let tokens: Vec<_> = lex("env.PATH text.mode").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("env.PATH".to_string()),
                Token::Ident("text.mode".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let tokens: Vec<_> = lex(r#""C:\\Program Files\\jprofiler" "say \"hi\"""#)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::String(r"C:\Program Files\jprofiler".to_string()),
                Token::String(r#"say "hi""#.to_string()),
            ]
        );
    }

    #[test]
    fn test_placeholders_stay_inside_strings() {
        let tokens: Vec<_> = lex(r#""%env.PATH%:/opt/tool/bin""#).map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![Token::String("%env.PATH%:/opt/tool/bin".to_string())]
        );
    }

    #[test]
    fn test_comments_skipped() {
        let tokens: Vec<_> = lex("job // comment\nperf").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Job, Token::Ident("perf".to_string())]);
    }

    #[test]
    fn test_block_comments_skipped() {
        let tokens: Vec<_> = lex("job /* block comment */ perf")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(tokens, vec![Token::Job, Token::Ident("perf".to_string())]);
    }

    #[test]
    fn test_delimiters() {
        let tokens: Vec<_> = lex("{ } [ ] , :").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::BracketOpen,
                Token::BracketClose,
                Token::Comma,
                Token::Colon
            ]
        );
    }

    #[test]
    fn test_complete_example() {
        let input = r#"
            job perf "Performance Test" {
                text runs "10"
                select vendor "openjdk" from ["openjdk", "adoptopenjdk"]
                command "gradle clean"
            }
        "#;
        let tokens: Vec<_> = lex(input).map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Job,
                Token::Ident("perf".to_string()),
                Token::String("Performance Test".to_string()),
                Token::BraceOpen,
                Token::Text,
                Token::Ident("runs".to_string()),
                Token::String("10".to_string()),
                Token::Select,
                Token::Ident("vendor".to_string()),
                Token::String("openjdk".to_string()),
                Token::From,
                Token::BracketOpen,
                Token::String("openjdk".to_string()),
                Token::Comma,
                Token::String("adoptopenjdk".to_string()),
                Token::BracketClose,
                Token::Command,
                Token::String("gradle clean".to_string()),
                Token::BraceClose,
            ]
        );
    }

    #[test]
    fn test_modifier_list() {
        let tokens: Vec<_> = lex(r#"[prompt, required, desc: "Target project"]"#)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::BracketOpen,
                Token::Prompt,
                Token::Comma,
                Token::Required,
                Token::Comma,
                Token::Desc,
                Token::Colon,
                Token::String("Target project".to_string()),
                Token::BracketClose,
            ]
        );
    }
}
