use std::collections::HashMap;

use log::trace;

use crate::{
    errors::{ParseErrReason, ParseError},
    source_pos::Span,
    syntax::{
        postfix::Postfix,
        shunting_yard::Context,
        tokens::{Delimiter, Operator, Spanned, SpannedTok, Token},
    },
};

/// Rule nesting allowed before giving up on a line, well within a 2 MiB thread stack.
const MAX_DEPTH: usize = 512;

/// `Ok(None)` is a silent "no match", the caller is free to try another alternative.
/// `Err` aborts the whole parse.
type Attempt<'a> = Result<Option<Context<'a>>, ParseError>;

macro_rules! token {
    ($name: ident, $($p: pat)|+, $expected: literal) => {
        fn $name(&mut self, ctx: &Context<'a>) -> Attempt<'a> {
            match self.tokens.get(ctx.cursor) {
                Some(Spanned { elem, span }) if matches!(elem, $($p)|+) => {
                    self.accept(ctx, *elem, span)
                }
                _ => {
                    self.expected_at(ctx.cursor, $expected);
                    Ok(None)
                }
            }
        }
    };
}

/// Runs the rules one after the other, threading the context through.
/// Stops at the first rule that does not match.
macro_rules! seq {
    ($self: ident, $ctx: expr $(, $rule: ident)+) => {{
        let ctx = Some($ctx.clone());
        $(
            let ctx = match ctx {
                Some(c) => $self.$rule(&c)?,
                None => None,
            };
        )+
        ctx
    }};
}

/// Recursive descent recognizer over
///
/// ```text
/// expr          := term (add-op expr)?
/// term          := signed-factor (mult-op term)?
/// signed-factor := "-" signed-factor | factor
/// factor        := element ("^" factor)?
/// element       := "(" expr ")" | number
/// ```
///
/// Alternatives are ordered, the first one that matches wins. Accepted tokens go
/// through the shunting-yard [`Context`], which decides the order operators are
/// emitted in.
pub struct Parser<'t, 'a> {
    tokens: &'t [SpannedTok<'a>],
    elements: HashMap<Context<'a>, Option<Context<'a>>>,
    furthest: Option<(usize, &'static str)>,
    depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [SpannedTok<'a>]) -> Self {
        Self {
            tokens,
            elements: HashMap::new(),
            furthest: None,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Postfix<'a>, ParseError> {
        match self.expr(&Context::default())? {
            Some(ctx) if ctx.cursor == self.tokens.len() => {
                ctx.terminate().map_err(|reason| ParseError {
                    span: self.span_at(self.tokens.len()),
                    reason,
                    expected: None,
                })
            }
            Some(ctx) => match self.furthest {
                // something further in failed to match, that is the real culprit
                Some((pos, expected)) if pos > ctx.cursor => {
                    Err(self.unexpected_tok_or_eof(pos, Some(expected)))
                }
                furthest => Err(ParseError {
                    span: self.span_at(ctx.cursor),
                    reason: ParseErrReason::TrailingTokens,
                    expected: furthest
                        .filter(|(pos, _)| *pos == ctx.cursor)
                        .map(|(_, expected)| expected),
                }),
            },
            None => {
                let (pos, expected) = match self.furthest {
                    Some((pos, expected)) => (pos, Some(expected)),
                    None => (0, None),
                };
                Err(self.unexpected_tok_or_eof(pos, expected))
            }
        }
    }

    pub fn expr(&mut self, ctx: &Context<'a>) -> Attempt<'a> {
        self.nested(ctx, |p, ctx| {
            if let Some(c) = seq!(p, ctx, term, add_op, expr) {
                return Ok(Some(c));
            }
            Ok(seq!(p, ctx, term))
        })
    }

    fn term(&mut self, ctx: &Context<'a>) -> Attempt<'a> {
        self.nested(ctx, |p, ctx| {
            if let Some(c) = seq!(p, ctx, signed_factor, mult_op, term) {
                return Ok(Some(c));
            }
            Ok(seq!(p, ctx, signed_factor))
        })
    }

    fn signed_factor(&mut self, ctx: &Context<'a>) -> Attempt<'a> {
        self.nested(ctx, |p, ctx| {
            if let Some(c) = seq!(p, ctx, unary_minus, signed_factor) {
                return Ok(Some(c));
            }
            Ok(seq!(p, ctx, factor))
        })
    }

    fn factor(&mut self, ctx: &Context<'a>) -> Attempt<'a> {
        self.nested(ctx, |p, ctx| {
            if let Some(c) = seq!(p, ctx, element, pow, factor) {
                return Ok(Some(c));
            }
            Ok(seq!(p, ctx, element))
        })
    }

    /// Runs a recursive rule one level deeper. The grammar recurses once per operator,
    /// so long flat lines nest as deeply as parenthesized ones.
    fn nested(
        &mut self,
        ctx: &Context<'a>,
        rule: impl FnOnce(&mut Self, &Context<'a>) -> Attempt<'a>,
    ) -> Attempt<'a> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError {
                span: self.span_at(ctx.cursor),
                reason: ParseErrReason::TooDeep,
                expected: None,
            });
        }
        self.depth += 1;
        let attempt = rule(self, ctx);
        self.depth -= 1;
        attempt
    }

    /// The only rule reached from several callers at the same context, so its
    /// outcome is remembered for the rest of the parse.
    fn element(&mut self, ctx: &Context<'a>) -> Attempt<'a> {
        if let Some(known) = self.elements.get(ctx) {
            trace!("element at token {} already derived", ctx.cursor);
            return Ok(known.clone());
        }
        let derived = match seq!(self, ctx, lparen, expr, rparen) {
            Some(c) => Some(c),
            None => seq!(self, ctx, num),
        };
        self.elements.insert(ctx.clone(), derived.clone());
        Ok(derived)
    }

    /// A prefix `-` is accepted as the unary marker, not as subtraction.
    fn unary_minus(&mut self, ctx: &Context<'a>) -> Attempt<'a> {
        match self.tokens.get(ctx.cursor) {
            Some(Spanned {
                elem: Token::Op(Operator::Sub),
                span,
            }) => self.accept(ctx, Token::Op(Operator::Neg), span),
            _ => Ok(None),
        }
    }

    token!(
        add_op,
        Token::Op(Operator::Add) | Token::Op(Operator::Sub),
        "`+` or `-`"
    );
    token!(
        mult_op,
        Token::Op(Operator::Mul) | Token::Op(Operator::Div) | Token::Op(Operator::Rem),
        "`*`, `/` or `%`"
    );
    token!(pow, Token::Op(Operator::Pow), "`^`");
    token!(lparen, Token::Delimiter(Delimiter::LParen), "`(`");
    token!(rparen, Token::Delimiter(Delimiter::RParen), "`)`");
    token!(num, Token::Num(_), "a number");

    fn accept(&self, ctx: &Context<'a>, tok: Token<'a>, span: &Span) -> Attempt<'a> {
        ctx.push(tok).map(Some).map_err(|reason| ParseError {
            span: span.clone(),
            reason,
            expected: None,
        })
    }

    fn expected_at(&mut self, pos: usize, expected: &'static str) {
        match self.furthest {
            Some((furthest, _)) if furthest > pos => (),
            _ => self.furthest = Some((pos, expected)),
        }
    }

    fn span_at(&self, pos: usize) -> Span {
        match self.tokens.get(pos) {
            Some(tok) => tok.span.clone(),
            None => {
                let end = self.tokens.last().map_or(0, |tok| tok.span.end);
                end..end
            }
        }
    }

    fn unexpected_tok_or_eof(&self, pos: usize, expected: Option<&'static str>) -> ParseError {
        let reason = match self.tokens.get(pos) {
            Some(tok) => ParseErrReason::UnexpectedTok(tok.elem.text().to_owned()),
            None => ParseErrReason::UnexpectedEOF,
        };
        ParseError {
            span: self.span_at(pos),
            reason,
            expected,
        }
    }
}

/// Turns an infix token list (whitespace already dropped) into its postfix form.
pub fn parse<'a>(tokens: &[SpannedTok<'a>]) -> Result<Postfix<'a>, ParseError> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn postfix(source: &str) -> String {
        parse(&tokenize(source).unwrap()).unwrap().to_string()
    }

    fn error(source: &str) -> ParseError {
        parse(&tokenize(source).unwrap()).unwrap_err()
    }

    #[test]
    fn precedence() {
        assert_eq!(postfix("1+2*3"), "1 2 3 * +");
        assert_eq!(postfix("(1+2)*3"), "1 2 + 3 *");
        assert_eq!(postfix("1*2+3%4"), "1 2 * 3 4 % +");
        assert_eq!(postfix("2*3^2"), "2 3 2 ^ *");
    }

    #[test]
    fn associativity() {
        assert_eq!(postfix("1-2-3"), "1 2 - 3 -");
        assert_eq!(postfix("8/4/2"), "8 4 / 2 /");
        assert_eq!(postfix("2^3^2"), "2 3 2 ^ ^");
        assert_eq!(postfix("(2^3)^2"), "2 3 ^ 2 ^");
    }

    #[test]
    fn unary_minus() {
        assert_eq!(postfix("-2^2"), "2 2 ^ ~");
        assert_eq!(postfix("--2"), "2 ~ ~");
        assert_eq!(postfix("-2*3"), "2 ~ 3 *");
        assert_eq!(postfix("2*-3"), "2 3 ~ *");
        assert_eq!(postfix("1--1"), "1 1 ~ -");
        assert_eq!(postfix("2^(-2)"), "2 2 ~ ^");
        assert_eq!(postfix("-(1+2)"), "1 2 + ~");
    }

    #[test]
    fn whitespace_and_leading_zeros() {
        assert_eq!(postfix(" 007 +\t1 "), "007 1 +");
        assert_eq!(postfix("((42))"), "42");
    }

    #[test]
    fn unbalanced() {
        assert_eq!(
            error("(1+2"),
            ParseError {
                span: 4..4,
                reason: ParseErrReason::UnexpectedEOF,
                expected: Some("`)`"),
            }
        );
        assert_eq!(error("1+2)").reason, ParseErrReason::TrailingTokens);
        assert_eq!(error("1+2)").span, 3..4);
        assert_eq!(error(")").reason, ParseErrReason::UnexpectedTok(")".into()));
    }

    #[test]
    fn missing_operands() {
        assert_eq!(
            error("1++2"),
            ParseError {
                span: 2..3,
                reason: ParseErrReason::UnexpectedTok("+".into()),
                expected: Some("a number"),
            }
        );
        assert_eq!(error("2^-2").span, 2..3);
        assert_eq!(error("1+").reason, ParseErrReason::UnexpectedEOF);
        assert_eq!(error("()").reason, ParseErrReason::UnexpectedTok(")".into()));
        assert_eq!(error("*1").reason, ParseErrReason::UnexpectedTok("*".into()));
    }

    #[test]
    fn missing_operator() {
        let err = error("1 2");
        assert_eq!(err.reason, ParseErrReason::TrailingTokens);
        assert_eq!(err.span, 2..3);
        assert_eq!(error("(1)(2)").reason, ParseErrReason::TrailingTokens);
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            error(""),
            ParseError {
                span: 0..0,
                reason: ParseErrReason::UnexpectedEOF,
                expected: Some("a number"),
            }
        );
    }

    #[test]
    fn long_flat_lines_are_refused() {
        let source = format!("1{}", "+1".repeat(10_000));
        let err = error(&source);
        assert_eq!(err.reason, ParseErrReason::TooDeep);
        assert_eq!(error(&"-".repeat(5_000)).reason, ParseErrReason::TooDeep);
        assert_eq!(
            error(&format!("2{}", "^2".repeat(5_000))).reason,
            ParseErrReason::TooDeep
        );
    }

    #[test]
    fn moderately_long_lines_still_parse() {
        let source = format!("1{}", "*1".repeat(300));
        assert_eq!(postfix(&source), format!("1{}", " 1 *".repeat(300)));
    }

    #[test]
    fn deep_nesting_stays_cheap() {
        let depth = 100;
        let source = format!("{}1{}", "(".repeat(depth), "+1)".repeat(depth));
        let expected = format!("1{}", " 1 +".repeat(depth));
        assert_eq!(postfix(&source), expected);
    }
}
