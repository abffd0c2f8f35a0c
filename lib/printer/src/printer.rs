//! Linear renderings of an expression tree.
//!
//! [`infix`] concatenates the tree back into source-like text without any
//! spacing, [`polish`] then runs an operator-precedence pass over that text,
//! giving reverse Polish (postfix) order.

use log::trace;
use parser::{Expr, LiteralValue};

/// Renders `expr` in infix order with no separators, keeping every grouping.
/// `nil` renders as nothing.
pub fn infix(expr: &Expr) -> String {
    match expr {
        Expr::Binary { left, operator, right } => {
            format!("{}{}{}", infix(left), operator.lexeme, infix(right))
        }
        Expr::Grouping(expression) => format!("({})", infix(expression)),
        Expr::Unary { operator, right } => format!("{}{}", operator.lexeme, infix(right)),
        Expr::Literal(LiteralValue::Nil) => String::new(),
        Expr::Literal(value) => value.to_string(),
    }
}

/// Renders `expr` in reverse Polish (postfix) notation: operators follow their
/// operands and there are no parentheses.
pub fn polish(expr: &Expr) -> String {
    to_polish(&infix(expr))
}

fn precedence(c: char) -> Option<u8> {
    match c {
        '(' => Some(0),
        '+' | '-' => Some(1),
        '*' | '/' => Some(2),
        _ => None,
    }
}

/// Rewrites rendered infix text into reverse Polish (postfix) order with a
/// shunting pass over its characters.
///
/// Only `+ - * /` count as operators. Every other character, including the
/// characters of a multi-digit number, is copied to the output as it comes.
pub fn to_polish(infix: &str) -> String {
    let mut output = String::with_capacity(infix.len());
    let mut stack: Vec<(char, u8)> = Vec::new();

    for c in infix.chars() {
        if c == ')' {
            while let Some((op, _)) = stack.pop() {
                if op == '(' {
                    break;
                }
                output.push(op);
            }
            continue;
        }

        let Some(incoming) = precedence(c) else {
            output.push(c);
            continue;
        };

        match stack.last() {
            _ if c == '(' => (),
            None | Some(('(', _)) => (),
            Some(&(_, top)) if incoming > top => (),
            _ => {
                while let Some(&(op, top)) = stack.last() {
                    if top < incoming {
                        break;
                    }
                    output.push(op);
                    stack.pop();
                }
            }
        }
        stack.push((c, incoming));
    }

    output.extend(stack.into_iter().rev().map(|(op, _)| op));
    trace!("{infix:?} -> {output:?}");
    output
}
