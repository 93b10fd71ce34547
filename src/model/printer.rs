//! Prints source-language attributes and expressions back to text.
//!
//! Used for the `///` documentation lines that carry non-target attributes
//! into the generated schema, and for the double-quoted argument text of
//! field references inside target attributes.

use super::ast::{Argument, Attribute, AttributeArg, Expression, Literal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    fn char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// Source-syntax printer
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelPrinter {
    quote: QuoteStyle,
}

impl ModelPrinter {
    pub fn new(quote: QuoteStyle) -> Self {
        ModelPrinter { quote }
    }

    /// `@@allow('read', auth() != null)`; the parentheses are omitted without arguments
    pub fn attribute(&self, attr: &Attribute) -> String {
        if attr.args.is_empty() {
            return attr.name.clone();
        }
        let args: Vec<String> = attr.args.iter().map(|a| self.attribute_arg(a)).collect();
        format!("{}({})", attr.name, args.join(", "))
    }

    fn attribute_arg(&self, arg: &AttributeArg) -> String {
        match &arg.name {
            Some(name) => format!("{}: {}", name, self.expression(&arg.value)),
            None => self.expression(&arg.value),
        }
    }

    fn argument(&self, arg: &Argument) -> String {
        match &arg.name {
            Some(name) => format!("{}: {}", name, self.expression(&arg.value)),
            None => self.expression(&arg.value),
        }
    }

    fn arguments(&self, args: &[Argument]) -> String {
        args.iter()
            .map(|a| self.argument(a))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::String(s) => {
                let q = self.quote.char();
                let escaped = s
                    .replace('\\', "\\\\")
                    .replace(q, &format!("\\{}", q));
                format!("{q}{escaped}{q}")
            }
            other => other.to_string(),
        }
    }

    pub fn expression(&self, expr: &Expression) -> String {
        match expr {
            Expression::Literal(l) => self.literal(l),
            Expression::Array(items) => {
                let items: Vec<String> = items.iter().map(|i| self.expression(i)).collect();
                format!("[{}]", items.join(", "))
            }
            Expression::Reference(r) if r.args.is_empty() => r.target.clone(),
            Expression::Reference(r) => format!("{}({})", r.target, self.arguments(&r.args)),
            Expression::Invocation(inv) => {
                format!("{}({})", inv.function, self.arguments(&inv.args))
            }
            Expression::Member(m) => {
                format!("{}.{}", self.operand(&m.operand, u8::MAX), m.member)
            }
            Expression::Unary(u) => format!("{}{}", u.op, self.operand(&u.operand, u8::MAX)),
            Expression::Binary(b) => {
                let prec = precedence(&b.op);
                let left = self.operand(&b.left, prec);
                if is_collection_predicate(&b.op) {
                    format!("{}{}[{}]", left, b.op, self.expression(&b.right))
                } else {
                    // right-hand side of equal precedence needs parentheses to keep
                    // left associativity
                    let right = self.operand(&b.right, prec.saturating_add(1));
                    format!("{} {} {}", left, b.op, right)
                }
            }
            Expression::This => "this".to_string(),
            Expression::Null => "null".to_string(),
        }
    }

    /// Print `expr`, parenthesized if it binds looser than `min_precedence`
    fn operand(&self, expr: &Expression, min_precedence: u8) -> String {
        match expr {
            Expression::Binary(b)
                if !is_collection_predicate(&b.op) && precedence(&b.op) < min_precedence =>
            {
                format!("({})", self.expression(expr))
            }
            _ => self.expression(expr),
        }
    }
}

fn is_collection_predicate(op: &str) -> bool {
    matches!(op, "?" | "!" | "^")
}

fn precedence(op: &str) -> u8 {
    match op {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" => 3,
        "<" | "<=" | ">" | ">=" => 4,
        "in" => 5,
        _ => 6,
    }
}
