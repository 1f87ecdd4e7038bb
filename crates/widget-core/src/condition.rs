//! Restricted grammar for condition strings.
//!
//! Condition strings such as `"size.width < 200 && size.height >= 100"`
//! select variants and guard visibility. They are parsed here into an
//! [`Expression`] over comparisons, `all`, `any`, `get`, `has` and
//! literals. There are no calls, no arithmetic and no parentheses.
//!
//! ```text
//! or      := and ( "||" and )*
//! and     := cmp ( "&&" cmp )*
//! cmp     := operand ( op operand )?
//! operand := number | "true" | "false" | path | "{{" path "}}"
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    multi::{many0_count, separated_list1},
    sequence::{delimited, pair, tuple},
    IResult,
};

use crate::error::{LayoutError, Result};
use crate::expr::{Expression, Operator};

#[derive(Debug, Clone, PartialEq)]
enum Operand<'a> {
    Number(f64),
    Bool(bool),
    Path(&'a str),
}

impl Operand<'_> {
    /// The operand as a comparison side.
    fn into_value(self) -> Expression {
        match self {
            Operand::Number(n) => Expression::number(n),
            Operand::Bool(b) => Expression::bool(b),
            Operand::Path(p) => Expression::get(p),
        }
    }

    /// The operand standing alone: paths test for presence.
    fn into_condition(self) -> Expression {
        match self {
            Operand::Path(p) => Expression::has(p),
            other => other.into_value(),
        }
    }
}

/// Parse a condition string into an expression.
pub fn parse_condition(input: &str) -> Result<Expression> {
    match all_consuming(ws(disjunction))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(LayoutError::InvalidCondition {
            text: input.to_string(),
            offset: input.len() - e.input.len(),
            message: "expected a comparison, number, boolean or path".to_string(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(LayoutError::InvalidCondition {
            text: input.to_string(),
            offset: input.len(),
            message: "unexpected end of input".to_string(),
        }),
    }
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn disjunction(input: &str) -> IResult<&str, Expression> {
    map(separated_list1(ws(tag("||")), conjunction), |parts| {
        combine(Operator::Any, parts)
    })(input)
}

fn conjunction(input: &str) -> IResult<&str, Expression> {
    map(separated_list1(ws(tag("&&")), comparison), |parts| {
        combine(Operator::All, parts)
    })(input)
}

fn combine(op: Operator, mut parts: Vec<Expression>) -> Expression {
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        Expression::call(op.name(), parts)
    }
}

fn comparison(input: &str) -> IResult<&str, Expression> {
    let (input, left) = ws(operand)(input)?;
    let (input, rest) = opt(pair(ws(comparator), ws(operand)))(input)?;
    let expr = match rest {
        Some((op, right)) => Expression::call(op, vec![left.into_value(), right.into_value()]),
        None => left.into_condition(),
    };
    Ok((input, expr))
}

fn comparator(input: &str) -> IResult<&str, &'static str> {
    alt((
        value("<=", tag("<=")),
        value(">=", tag(">=")),
        value("==", tag("==")),
        value("!=", tag("!=")),
        value("<", tag("<")),
        value(">", tag(">")),
    ))(input)
}

fn operand(input: &str) -> IResult<&str, Operand<'_>> {
    alt((
        map(number, Operand::Number),
        map(binding, Operand::Path),
        map(path, |p| match p {
            "true" => Operand::Bool(true),
            "false" => Operand::Bool(false),
            other => Operand::Path(other),
        }),
    ))(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

fn path(input: &str) -> IResult<&str, &str> {
    recognize(pair(identifier, many0_count(pair(char('.'), identifier))))(input)
}

fn binding(input: &str) -> IResult<&str, &str> {
    delimited(tag("{{"), ws(path), tag("}}"))(input)
}
