//! Typed Go syntax tree
//!
//! The shapes follow go/ast closely enough that every node kind the
//! display tree needs to distinguish has its own variant. Positions are
//! not retained: labels never depend on where a node appeared.

use std::fmt;

/// A parsed source file
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub package: String,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
}

/// `import name "path"`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    /// Local name (`.`, `_` or an identifier) when one is written
    pub name: Option<String>,
    /// Path literal including its quotes
    pub path: String,
}

/// Top-level or local declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
}

/// Keyword introducing a general declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKeyword {
    Const,
    Type,
    Var,
}

/// `const (...)`, `type (...)` or `var (...)`
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub keyword: DeclKeyword,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Value(ValueSpec),
    Type(TypeSpec),
}

/// One line of a const or var declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: String,
    pub type_params: Vec<Field>,
    /// `type A = B`
    pub alias: bool,
    pub ty: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    /// Receiver list; `None` for plain functions
    pub recv: Option<Vec<Field>>,
    pub name: String,
    pub ty: FuncType,
    pub body: Option<BlockStmt>,
}

/// Parameter, result, struct field or interface element
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Empty for anonymous parameters and embedded fields
    pub names: Vec<String>,
    pub ty: Expr,
    /// Tag literal including its quotes
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub type_params: Vec<Field>,
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub list: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Expr,
    pub body: BlockStmt,
    /// Either a block or another `if`
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub post: Option<Box<Stmt>>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeStmt {
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    /// `=` or `:=`; `None` for `for range x`
    pub tok: Option<Token>,
    pub x: Expr,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub init: Option<Box<Stmt>>,
    pub tag: Option<Expr>,
    /// Holds only `Stmt::CaseClause` entries
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSwitchStmt {
    pub init: Option<Box<Stmt>>,
    /// `x := y.(type)` or `y.(type)`
    pub assign: Box<Stmt>,
    pub body: BlockStmt,
}

/// `case a, b:` in an expression or type switch; empty `list` is `default`
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub list: Vec<Expr>,
    pub body: Vec<Stmt>,
}

/// `case v := <-ch:` in a select; `None` communication is `default`
#[derive(Debug, Clone, PartialEq)]
pub struct CommClause {
    pub comm: Option<Box<Stmt>>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Decl(GenDecl),
    Empty,
    Labeled {
        label: String,
        stmt: Box<Stmt>,
    },
    Expr(Expr),
    Send {
        chan: Expr,
        value: Expr,
    },
    IncDec {
        x: Expr,
        tok: Token,
    },
    Assign {
        lhs: Vec<Expr>,
        tok: Token,
        rhs: Vec<Expr>,
    },
    Go(Expr),
    Defer(Expr),
    Return(Vec<Expr>),
    Branch {
        tok: Token,
        label: Option<String>,
    },
    Block(BlockStmt),
    If(IfStmt),
    CaseClause(CaseClause),
    Switch(SwitchStmt),
    TypeSwitch(TypeSwitchStmt),
    CommClause(CommClause),
    Select(BlockStmt),
    For(ForStmt),
    Range(RangeStmt),
}

impl Stmt {
    /// go/ast style kind name, used when a statement has no richer label
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Decl(_) => "DeclStmt",
            Stmt::Empty => "EmptyStmt",
            Stmt::Labeled { .. } => "LabeledStmt",
            Stmt::Expr(_) => "ExprStmt",
            Stmt::Send { .. } => "SendStmt",
            Stmt::IncDec { .. } => "IncDecStmt",
            Stmt::Assign { .. } => "AssignStmt",
            Stmt::Go(_) => "GoStmt",
            Stmt::Defer(_) => "DeferStmt",
            Stmt::Return(_) => "ReturnStmt",
            Stmt::Branch { .. } => "BranchStmt",
            Stmt::Block(_) => "BlockStmt",
            Stmt::If(_) => "IfStmt",
            Stmt::CaseClause(_) => "CaseClause",
            Stmt::Switch(_) => "SwitchStmt",
            Stmt::TypeSwitch(_) => "TypeSwitchStmt",
            Stmt::CommClause(_) => "CommClause",
            Stmt::Select(_) => "SelectStmt",
            Stmt::For(_) => "ForStmt",
            Stmt::Range(_) => "RangeStmt",
        }
    }
}

/// Kind of a basic literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Expressions and type expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    BasicLit {
        kind: LitKind,
        value: String,
    },
    CompositeLit {
        ty: Option<Box<Expr>>,
        elts: Vec<Expr>,
    },
    FuncLit {
        ty: FuncType,
        body: BlockStmt,
    },
    Paren(Box<Expr>),
    Selector {
        x: Box<Expr>,
        sel: String,
    },
    Index {
        x: Box<Expr>,
        index: Box<Expr>,
    },
    IndexList {
        x: Box<Expr>,
        indices: Vec<Expr>,
    },
    Slice {
        x: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        max: Option<Box<Expr>>,
    },
    /// `ty` is `None` for `x.(type)` in a type switch
    TypeAssert {
        x: Box<Expr>,
        ty: Option<Box<Expr>>,
    },
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
        /// `f(xs...)`
        ellipsis: bool,
    },
    /// Pointer type or dereference
    Star(Box<Expr>),
    Unary {
        op: Token,
        x: Box<Expr>,
    },
    Binary {
        x: Box<Expr>,
        op: Token,
        y: Box<Expr>,
    },
    KeyValue {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    ArrayType {
        /// `None` for slices; `Some(Ellipsis(None))` for `[...]T`
        len: Option<Box<Expr>>,
        elt: Box<Expr>,
    },
    StructType(Vec<Field>),
    FuncType(FuncType),
    InterfaceType(Vec<Field>),
    MapType {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    ChanType {
        dir: ChanDir,
        value: Box<Expr>,
    },
    /// `...T` in a parameter list, or the bare `...` of `[...]T`
    Ellipsis(Option<Box<Expr>>),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    /// go/ast style kind name
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Ident(_) => "Ident",
            Expr::BasicLit { .. } => "BasicLit",
            Expr::CompositeLit { .. } => "CompositeLit",
            Expr::FuncLit { .. } => "FuncLit",
            Expr::Paren(_) => "ParenExpr",
            Expr::Selector { .. } => "SelectorExpr",
            Expr::Index { .. } => "IndexExpr",
            Expr::IndexList { .. } => "IndexListExpr",
            Expr::Slice { .. } => "SliceExpr",
            Expr::TypeAssert { .. } => "TypeAssertExpr",
            Expr::Call { .. } => "CallExpr",
            Expr::Star(_) => "StarExpr",
            Expr::Unary { .. } => "UnaryExpr",
            Expr::Binary { .. } => "BinaryExpr",
            Expr::KeyValue { .. } => "KeyValueExpr",
            Expr::ArrayType { .. } => "ArrayType",
            Expr::StructType(_) => "StructType",
            Expr::FuncType(_) => "FuncType",
            Expr::InterfaceType(_) => "InterfaceType",
            Expr::MapType { .. } => "MapType",
            Expr::ChanType { .. } => "ChanType",
            Expr::Ellipsis(_) => "Ellipsis",
        }
    }
}

/// Operators and keywords that show up in labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
    LAnd,
    LOr,
    Arrow,
    Inc,
    Dec,
    Eql,
    Lss,
    Gtr,
    Assign,
    Not,
    Neq,
    Leq,
    Geq,
    Define,
    Tilde,
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl Token {
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::Add => "+",
            Token::Sub => "-",
            Token::Mul => "*",
            Token::Quo => "/",
            Token::Rem => "%",
            Token::And => "&",
            Token::Or => "|",
            Token::Xor => "^",
            Token::Shl => "<<",
            Token::Shr => ">>",
            Token::AndNot => "&^",
            Token::AddAssign => "+=",
            Token::SubAssign => "-=",
            Token::MulAssign => "*=",
            Token::QuoAssign => "/=",
            Token::RemAssign => "%=",
            Token::AndAssign => "&=",
            Token::OrAssign => "|=",
            Token::XorAssign => "^=",
            Token::ShlAssign => "<<=",
            Token::ShrAssign => ">>=",
            Token::AndNotAssign => "&^=",
            Token::LAnd => "&&",
            Token::LOr => "||",
            Token::Arrow => "<-",
            Token::Inc => "++",
            Token::Dec => "--",
            Token::Eql => "==",
            Token::Lss => "<",
            Token::Gtr => ">",
            Token::Assign => "=",
            Token::Not => "!",
            Token::Neq => "!=",
            Token::Leq => "<=",
            Token::Geq => ">=",
            Token::Define => ":=",
            Token::Tilde => "~",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Goto => "goto",
            Token::Fallthrough => "fallthrough",
        }
    }

    /// Look up an operator or keyword by its source text
    pub fn from_text(text: &str) -> Option<Token> {
        let tok = match text {
            "+" => Token::Add,
            "-" => Token::Sub,
            "*" => Token::Mul,
            "/" => Token::Quo,
            "%" => Token::Rem,
            "&" => Token::And,
            "|" => Token::Or,
            "^" => Token::Xor,
            "<<" => Token::Shl,
            ">>" => Token::Shr,
            "&^" => Token::AndNot,
            "+=" => Token::AddAssign,
            "-=" => Token::SubAssign,
            "*=" => Token::MulAssign,
            "/=" => Token::QuoAssign,
            "%=" => Token::RemAssign,
            "&=" => Token::AndAssign,
            "|=" => Token::OrAssign,
            "^=" => Token::XorAssign,
            "<<=" => Token::ShlAssign,
            ">>=" => Token::ShrAssign,
            "&^=" => Token::AndNotAssign,
            "&&" => Token::LAnd,
            "||" => Token::LOr,
            "<-" => Token::Arrow,
            "++" => Token::Inc,
            "--" => Token::Dec,
            "==" => Token::Eql,
            "<" => Token::Lss,
            ">" => Token::Gtr,
            "=" => Token::Assign,
            "!" => Token::Not,
            "!=" => Token::Neq,
            "<=" => Token::Leq,
            ">=" => Token::Geq,
            ":=" => Token::Define,
            "~" => Token::Tilde,
            "break" => Token::Break,
            "continue" => Token::Continue,
            "goto" => Token::Goto,
            "fallthrough" => Token::Fallthrough,
            _ => return None,
        };
        Some(tok)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_text_lookup() {
        for text in ["+", "&^=", "<-", ":=", "~", "fallthrough", "<<="] {
            let tok = Token::from_text(text).expect("known token");
            assert_eq!(tok.as_str(), text);
        }
        assert_eq!(Token::from_text("=>"), None);
    }

    #[test]
    fn test_kind_names_match_go_ast() {
        assert_eq!(Stmt::Empty.kind_name(), "EmptyStmt");
        let kv = Expr::KeyValue {
            key: Box::new(Expr::ident("a")),
            value: Box::new(Expr::ident("b")),
        };
        assert_eq!(kv.kind_name(), "KeyValueExpr");
    }
}
