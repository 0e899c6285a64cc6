//! Single-line rendering of expressions
//!
//! Used for leaf labels and for embedding sub-expressions in parent
//! labels (field types, call targets, composite literal types). Bodies,
//! argument lists and type internals are elided.

use std::fmt;

use crate::syntax::ast::{ChanDir, Expr};

/// Render an optional expression; `None` is the only input that yields ""
pub fn expr_to_string(expr: Option<&Expr>) -> String {
    expr.map(ToString::to_string).unwrap_or_default()
}

/// Writes an optional sub-expression, writing nothing for `None`
struct Opt<'a>(Option<&'a Expr>);

impl fmt::Display for Opt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(expr) => write!(f, "{}", expr),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::BasicLit { value, .. } => f.write_str(value),
            Expr::Selector { x, sel } => write!(f, "{}.{}", x, sel),
            Expr::Star(x) => write!(f, "*{}", x),
            Expr::ArrayType { len: Some(len), elt } => write!(f, "[{}]{}", len, elt),
            Expr::ArrayType { len: None, elt } => write!(f, "[]{}", elt),
            Expr::MapType { key, value } => write!(f, "map[{}]{}", key, value),
            Expr::ChanType { dir, value } => match dir {
                ChanDir::Send => write!(f, "chan<- {}", value),
                ChanDir::Recv => write!(f, "<-chan {}", value),
                ChanDir::Both => write!(f, "chan {}", value),
            },
            Expr::FuncType(_) => f.write_str("func(...)"),
            Expr::InterfaceType(_) => f.write_str("interface{}"),
            Expr::StructType(_) => f.write_str("struct{...}"),
            Expr::Ellipsis(elt) => write!(f, "...{}", Opt(elt.as_deref())),
            Expr::Call { fun, .. } => write!(f, "{}(...)", fun),
            Expr::Index { x, index } => write!(f, "{}[{}]", x, index),
            Expr::IndexList { x, .. } => write!(f, "{}[...]", x),
            Expr::Binary { x, op, y } => write!(f, "{} {} {}", x, op, y),
            Expr::Unary { op, x } => write!(f, "{}{}", op, x),
            Expr::Paren(x) => write!(f, "({})", x),
            Expr::CompositeLit { ty: Some(ty), .. } => write!(f, "{}{{...}}", ty),
            Expr::CompositeLit { ty: None, .. } => f.write_str("{...}"),
            Expr::FuncLit { .. } => f.write_str("func(){...}"),
            other => f.write_str(other.kind_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ast::{LitKind, Token};

    fn ident(name: &str) -> Box<Expr> {
        Box::new(Expr::ident(name))
    }

    #[test]
    fn test_none_is_empty() {
        assert_eq!(expr_to_string(None), "");
    }

    #[test]
    fn test_slice_of_pointer() {
        let ty = Expr::ArrayType {
            len: None,
            elt: Box::new(Expr::Star(ident("StructName"))),
        };
        assert_eq!(expr_to_string(Some(&ty)), "[]*StructName");
    }

    #[test]
    fn test_map_type() {
        let ty = Expr::MapType {
            key: ident("KeyType"),
            value: ident("ValueType"),
        };
        assert_eq!(ty.to_string(), "map[KeyType]ValueType");
    }

    #[test]
    fn test_array_with_length_and_ellipsis() {
        let fixed = Expr::ArrayType {
            len: Some(Box::new(Expr::BasicLit {
                kind: LitKind::Int,
                value: "4".into(),
            })),
            elt: ident("byte"),
        };
        assert_eq!(fixed.to_string(), "[4]byte");

        let implicit = Expr::ArrayType {
            len: Some(Box::new(Expr::Ellipsis(None))),
            elt: ident("int"),
        };
        assert_eq!(implicit.to_string(), "[...]int");
    }

    #[test]
    fn test_channel_directions() {
        let chan = |dir| Expr::ChanType {
            dir,
            value: ident("int"),
        };
        assert_eq!(chan(ChanDir::Both).to_string(), "chan int");
        assert_eq!(chan(ChanDir::Send).to_string(), "chan<- int");
        assert_eq!(chan(ChanDir::Recv).to_string(), "<-chan int");
    }

    #[test]
    fn test_opaque_placeholders() {
        assert_eq!(Expr::StructType(Vec::new()).to_string(), "struct{...}");
        assert_eq!(Expr::InterfaceType(Vec::new()).to_string(), "interface{}");
        let lit = Expr::CompositeLit {
            ty: None,
            elts: vec![Expr::ident("x")],
        };
        assert_eq!(lit.to_string(), "{...}");
    }

    #[test]
    fn test_generic_index_forms() {
        let single = Expr::Index {
            x: ident("List"),
            index: ident("T"),
        };
        assert_eq!(single.to_string(), "List[T]");
        let multi = Expr::IndexList {
            x: ident("Map"),
            indices: vec![Expr::ident("K"), Expr::ident("V")],
        };
        assert_eq!(multi.to_string(), "Map[...]");
    }

    #[test]
    fn test_operators_and_calls() {
        let call = Expr::Call {
            fun: Box::new(Expr::Selector {
                x: ident("fmt"),
                sel: "Println".into(),
            }),
            args: vec![Expr::ident("x")],
            ellipsis: false,
        };
        assert_eq!(call.to_string(), "fmt.Println(...)");

        let sum = Expr::Binary {
            x: ident("a"),
            op: Token::Add,
            y: Box::new(Expr::Paren(Box::new(Expr::Unary {
                op: Token::Sub,
                x: ident("b"),
            }))),
        };
        assert_eq!(sum.to_string(), "a + (-b)");
        assert_eq!(Expr::Ellipsis(Some(ident("string"))).to_string(), "...string");
    }

    #[test]
    fn test_unhandled_kind_falls_back_to_kind_name() {
        let kv = Expr::KeyValue {
            key: ident("k"),
            value: ident("v"),
        };
        assert_eq!(kv.to_string(), "KeyValueExpr");
        let slice = Expr::Slice {
            x: ident("s"),
            low: None,
            high: None,
            max: None,
        };
        assert_eq!(slice.to_string(), "SliceExpr");
    }
}
