//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse definition source code into an AST
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Basic token parsers
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    let string_literal = select! {
        Token::String(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    // Modifier: prompt | required | desc: "..."
    let modifier = choice((
        just(Token::Prompt).to(Modifier::Prompt),
        just(Token::Required).to(Modifier::Required),
        just(Token::Desc)
            .ignore_then(just(Token::Colon))
            .ignore_then(string_literal.clone())
            .map(|s| Modifier::Description(s.node)),
    ))
    .map_with(|m, e| Spanned::new(m, span_range(&e.span())));

    let modifier_block = modifier
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    // Text parameter: text name "default" [modifiers]
    let text_param = just(Token::Text)
        .ignore_then(identifier.clone())
        .then(string_literal.clone())
        .then(modifier_block.clone().or_not())
        .map(|((name, default), modifiers)| ParamDecl {
            name,
            kind: ParamKindDecl::Text,
            default,
            modifiers: modifiers.unwrap_or_default(),
        });

    // Select option list: ["a", "b", ...]
    let option_list = string_literal
        .clone()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .at_least(1)
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    // Select parameter: select name "default" from ["a", "b"] [modifiers]
    let select_param = just(Token::Select)
        .ignore_then(identifier.clone())
        .then(string_literal.clone())
        .then_ignore(just(Token::From))
        .then(option_list)
        .then(modifier_block.clone().or_not())
        .map(|(((name, default), options), modifiers)| ParamDecl {
            name,
            kind: ParamKindDecl::Select { options },
            default,
            modifiers: modifiers.unwrap_or_default(),
        });

    let param_decl = choice((text_param, select_param));

    // Environment entry: env NAME "value template"
    let env_decl = just(Token::Env)
        .ignore_then(identifier.clone())
        .then(string_literal.clone())
        .map(|(name, value)| EnvDecl { name, value });

    // Platform tag keyword
    let platform_tag = choice((
        just(Token::Linux).to(PlatformTag::Linux),
        just(Token::Windows).to(PlatformTag::Windows),
        just(Token::Macos).to(PlatformTag::Macos),
    ))
    .map_with(|t, e| Spanned::new(t, span_range(&e.span())));

    // Variant bodies hold parameters and environment entries only
    let variant_item = choice((
        param_decl.clone().map(VariantItemDecl::Param),
        env_decl.clone().map(VariantItemDecl::Env),
    ))
    .map_with(|item, e| Spanned::new(item, span_range(&e.span())));

    // Platform block: platform linux, macos { ... }
    let platform_decl = just(Token::Platform)
        .ignore_then(
            platform_tag
                .separated_by(just(Token::Comma))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .then(
            variant_item
                .repeated()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
        )
        .map(|(tags, items)| PlatformDecl { tags, items });

    // Command template: command "fragment" "fragment" ...
    // Fragments end at the next keyword or closing brace since no item starts
    // with a string literal.
    let command_decl = just(Token::Command)
        .ignore_then(
            string_literal
                .clone()
                .repeated()
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .map(|fragments| CommandDecl { fragments });

    // Items inside a job body
    let item = choice((
        platform_decl.map(ItemDecl::Platform),
        command_decl.map(ItemDecl::Command),
        param_decl.map(ItemDecl::Param),
        env_decl.map(ItemDecl::Env),
    ))
    .map_with(|item, e| Spanned::new(item, span_range(&e.span())));

    // Job declaration: job name "Display Name" { items }
    let job = just(Token::Job)
        .ignore_then(identifier)
        .then(string_literal.or_not())
        .then(
            item.repeated()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
        )
        .map(|((name, display_name), items)| JobDecl {
            name,
            display_name,
            items,
        })
        .map_with(|j, e| Spanned::new(j, span_range(&e.span())));

    // Document is a list of jobs
    job.repeated()
        .collect()
        .then_ignore(end())
        .map(|jobs| Document { jobs })
}
