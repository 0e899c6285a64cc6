//! Lowering from the tree-sitter concrete tree to the typed syntax tree
//!
//! Tree-sitter keeps types and expressions apart and splits some go/ast
//! nodes (generic types, qualified types, conversions) into their own
//! kinds. Lowering folds those back into the go/ast shapes in `ast`.

use tree_sitter::Node;

use super::ast::{
    BlockStmt, CaseClause, ChanDir, CommClause, Decl, DeclKeyword, Expr, Field, File, ForStmt,
    FuncDecl, FuncType, GenDecl, IfStmt, ImportSpec, LitKind, RangeStmt, Spec, Stmt, SwitchStmt,
    Token, TypeSpec, TypeSwitchStmt, ValueSpec,
};
use super::parser::{snippet, SyntaxError};

type Result<T> = std::result::Result<T, SyntaxError>;

/// Named children, skipping comments (which tree-sitter attaches anywhere)
fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// All named nodes carrying `field` (a field can span a comma list)
fn field_children<'t>(node: &Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor)
        .filter(|child| child.is_named() && child.kind() != "comment")
        .collect()
}

/// Whether an anonymous token with the given text is a direct child
fn has_token(node: &Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

pub(crate) struct Lowerer<'a> {
    file_name: &'a str,
    source: &'a str,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(file_name: &'a str, source: &'a str) -> Self {
        Self { file_name, source }
    }

    fn text(&self, node: &Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    fn error(&self, node: &Node, message: impl Into<String>) -> SyntaxError {
        SyntaxError::at(self.file_name, node, message)
    }

    fn unexpected(&self, node: &Node) -> SyntaxError {
        self.error(node, format!("unexpected {}", node.kind()))
    }

    fn required<'t>(&self, node: &Node<'t>, field: &str) -> Result<Node<'t>> {
        node.child_by_field_name(field)
            .ok_or_else(|| self.error(node, format!("missing {} in {}", field, node.kind())))
    }

    fn first_named<'t>(&self, node: &Node<'t>) -> Result<Node<'t>> {
        named_children(node)
            .into_iter()
            .next()
            .ok_or_else(|| self.error(node, format!("empty {}", node.kind())))
    }

    // =========================================================================
    // File and declarations
    // =========================================================================

    pub(crate) fn file(&self, root: Node) -> Result<File> {
        let items = named_children(&root);
        let mut items = items.into_iter();

        let package = match items.next() {
            Some(clause) if clause.kind() == "package_clause" => {
                let name = self.first_named(&clause)?;
                self.text(&name).to_string()
            }
            Some(other) => {
                return Err(self.error(
                    &other,
                    format!("expected 'package', found '{}'", snippet(self.text(&other))),
                ));
            }
            None => {
                return Err(SyntaxError::new(
                    self.file_name,
                    1,
                    1,
                    "expected 'package', found 'EOF'",
                ));
            }
        };

        let mut imports = Vec::new();
        let mut decls = Vec::new();
        for item in items {
            match item.kind() {
                "import_declaration" => {
                    if !decls.is_empty() {
                        return Err(
                            self.error(&item, "imports must appear before other declarations")
                        );
                    }
                    self.import_decl(&item, &mut imports)?;
                }
                "function_declaration" | "method_declaration" => {
                    decls.push(Decl::Func(self.func_decl(&item)?));
                }
                "const_declaration" | "var_declaration" | "type_declaration" => {
                    decls.push(Decl::Gen(self.gen_decl(&item)?));
                }
                _ => {
                    return Err(self.error(
                        &item,
                        format!("expected declaration, found '{}'", snippet(self.text(&item))),
                    ));
                }
            }
        }

        Ok(File {
            package,
            imports,
            decls,
        })
    }

    fn import_decl(&self, node: &Node, imports: &mut Vec<ImportSpec>) -> Result<()> {
        for child in named_children(node) {
            match child.kind() {
                "import_spec" => imports.push(self.import_spec(&child)?),
                "import_spec_list" => {
                    for spec in named_children(&child) {
                        imports.push(self.import_spec(&spec)?);
                    }
                }
                _ => return Err(self.unexpected(&child)),
            }
        }
        Ok(())
    }

    fn import_spec(&self, node: &Node) -> Result<ImportSpec> {
        if node.kind() != "import_spec" {
            return Err(self.unexpected(node));
        }
        let path = self.required(node, "path")?;
        Ok(ImportSpec {
            name: node
                .child_by_field_name("name")
                .map(|name| self.text(&name).to_string()),
            path: self.text(&path).to_string(),
        })
    }

    fn gen_decl(&self, node: &Node) -> Result<GenDecl> {
        let keyword = match node.kind() {
            "const_declaration" => DeclKeyword::Const,
            "var_declaration" => DeclKeyword::Var,
            "type_declaration" => DeclKeyword::Type,
            _ => return Err(self.unexpected(node)),
        };
        let mut specs = Vec::new();
        self.collect_specs(node, &mut specs)?;
        Ok(GenDecl { keyword, specs })
    }

    fn collect_specs(&self, node: &Node, specs: &mut Vec<Spec>) -> Result<()> {
        for child in named_children(node) {
            match child.kind() {
                "const_spec" | "var_spec" => specs.push(Spec::Value(self.value_spec(&child)?)),
                "type_spec" | "type_alias" => specs.push(Spec::Type(self.type_spec(&child)?)),
                "var_spec_list" | "const_spec_list" => self.collect_specs(&child, specs)?,
                _ => return Err(self.unexpected(&child)),
            }
        }
        Ok(())
    }

    fn value_spec(&self, node: &Node) -> Result<ValueSpec> {
        let names = field_children(node, "name")
            .iter()
            .map(|name| self.text(name).to_string())
            .collect();
        let ty = node
            .child_by_field_name("type")
            .map(|ty| self.expr(&ty))
            .transpose()?;
        let values = match node.child_by_field_name("value") {
            Some(list) => self.expr_list(&list)?,
            None => Vec::new(),
        };
        Ok(ValueSpec { names, ty, values })
    }

    fn type_spec(&self, node: &Node) -> Result<TypeSpec> {
        let name = self.required(node, "name")?;
        let ty = self.required(node, "type")?;
        let type_params = match node.child_by_field_name("type_parameters") {
            Some(list) => self.type_params(&list)?,
            None => Vec::new(),
        };
        Ok(TypeSpec {
            name: self.text(&name).to_string(),
            type_params,
            alias: node.kind() == "type_alias",
            ty: self.expr(&ty)?,
        })
    }

    fn type_params(&self, node: &Node) -> Result<Vec<Field>> {
        named_children(node)
            .iter()
            .map(|decl| -> Result<Field> {
                let ty = self.required(decl, "type")?;
                Ok(Field {
                    names: field_children(decl, "name")
                        .iter()
                        .map(|name| self.text(name).to_string())
                        .collect(),
                    ty: self.expr(&ty)?,
                    tag: None,
                })
            })
            .collect()
    }

    fn func_decl(&self, node: &Node) -> Result<FuncDecl> {
        let name = self.required(node, "name")?;
        let recv = node
            .child_by_field_name("receiver")
            .map(|list| self.params(&list))
            .transpose()?;
        let type_params = match node.child_by_field_name("type_parameters") {
            Some(list) => self.type_params(&list)?,
            None => Vec::new(),
        };
        let mut ty = self.signature(node)?;
        ty.type_params = type_params;
        let body = node
            .child_by_field_name("body")
            .map(|block| self.block(&block))
            .transpose()?;
        Ok(FuncDecl {
            recv,
            name: self.text(&name).to_string(),
            ty,
            body,
        })
    }

    /// `parameters` and `result` fields of a function-like node
    fn signature(&self, node: &Node) -> Result<FuncType> {
        let params = self.params(&self.required(node, "parameters")?)?;
        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self.params(&result)?,
            Some(result) => vec![Field {
                names: Vec::new(),
                ty: self.expr(&result)?,
                tag: None,
            }],
            None => Vec::new(),
        };
        Ok(FuncType {
            type_params: Vec::new(),
            params,
            results,
        })
    }

    fn params(&self, node: &Node) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        for param in named_children(node) {
            let ty = self.expr(&self.required(&param, "type")?)?;
            let names = field_children(&param, "name")
                .iter()
                .map(|name| self.text(name).to_string())
                .collect();
            let ty = match param.kind() {
                "parameter_declaration" => ty,
                "variadic_parameter_declaration" => Expr::Ellipsis(Some(Box::new(ty))),
                _ => return Err(self.unexpected(&param)),
            };
            fields.push(Field {
                names,
                ty,
                tag: None,
            });
        }
        Ok(fields)
    }

    fn struct_fields(&self, node: &Node) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        for list in named_children(node) {
            if list.kind() != "field_declaration_list" {
                return Err(self.unexpected(&list));
            }
            for decl in named_children(&list) {
                if decl.kind() != "field_declaration" {
                    return Err(self.unexpected(&decl));
                }
                let names: Vec<String> = field_children(&decl, "name")
                    .iter()
                    .map(|name| self.text(name).to_string())
                    .collect();
                let mut ty = self.expr(&self.required(&decl, "type")?)?;
                // `*T` embedding keeps the star outside the type field
                if names.is_empty() && has_token(&decl, "*") {
                    ty = Expr::Star(Box::new(ty));
                }
                let tag = decl
                    .child_by_field_name("tag")
                    .map(|tag| self.text(&tag).to_string());
                fields.push(Field { names, ty, tag });
            }
        }
        Ok(fields)
    }

    fn interface_elems(&self, node: &Node) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        for elem in named_children(node) {
            let field = match elem.kind() {
                "method_elem" | "method_spec" => {
                    let name = self.required(&elem, "name")?;
                    Field {
                        names: vec![self.text(&name).to_string()],
                        ty: Expr::FuncType(self.signature(&elem)?),
                        tag: None,
                    }
                }
                _ => Field {
                    names: Vec::new(),
                    ty: self.expr(&elem)?,
                    tag: None,
                },
            };
            fields.push(field);
        }
        Ok(fields)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn block(&self, node: &Node) -> Result<BlockStmt> {
        if node.kind() != "block" {
            return Err(self.unexpected(node));
        }
        Ok(BlockStmt {
            list: self.stmt_list(node, &[])?,
        })
    }

    /// Statements among the named children of `node`, skipping `skip` ids
    fn stmt_list(&self, node: &Node, skip: &[usize]) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        for child in named_children(node) {
            if skip.contains(&child.id()) {
                continue;
            }
            if child.kind() == "statement_list" {
                stmts.extend(self.stmt_list(&child, &[])?);
            } else {
                stmts.push(self.stmt(&child)?);
            }
        }
        Ok(stmts)
    }

    fn boxed_stmt(&self, node: Option<Node>) -> Result<Option<Box<Stmt>>> {
        node.map(|n| self.stmt(&n).map(Box::new)).transpose()
    }

    fn stmt(&self, node: &Node) -> Result<Stmt> {
        let stmt = match node.kind() {
            "expression_statement" => Stmt::Expr(self.expr(&self.first_named(node)?)?),
            "send_statement" => Stmt::Send {
                chan: self.expr(&self.required(node, "channel")?)?,
                value: self.expr(&self.required(node, "value")?)?,
            },
            "inc_statement" => Stmt::IncDec {
                x: self.expr(&self.first_named(node)?)?,
                tok: Token::Inc,
            },
            "dec_statement" => Stmt::IncDec {
                x: self.expr(&self.first_named(node)?)?,
                tok: Token::Dec,
            },
            "assignment_statement" => {
                let op = self.required(node, "operator")?;
                let tok = Token::from_text(self.text(&op))
                    .ok_or_else(|| self.error(&op, format!("unknown operator {}", self.text(&op))))?;
                Stmt::Assign {
                    lhs: self.expr_list(&self.required(node, "left")?)?,
                    tok,
                    rhs: self.expr_list(&self.required(node, "right")?)?,
                }
            }
            "short_var_declaration" => Stmt::Assign {
                lhs: self.expr_list(&self.required(node, "left")?)?,
                tok: Token::Define,
                rhs: self.expr_list(&self.required(node, "right")?)?,
            },
            "receive_statement" => self.receive(node)?,
            "labeled_statement" => {
                let label = self.required(node, "label")?;
                let inner = named_children(node)
                    .into_iter()
                    .find(|child| child.id() != label.id());
                Stmt::Labeled {
                    label: self.text(&label).to_string(),
                    stmt: Box::new(match inner {
                        Some(inner) => self.stmt(&inner)?,
                        None => Stmt::Empty,
                    }),
                }
            }
            "go_statement" => Stmt::Go(self.expr(&self.first_named(node)?)?),
            "defer_statement" => Stmt::Defer(self.expr(&self.first_named(node)?)?),
            "return_statement" => match named_children(node).first() {
                Some(list) => Stmt::Return(self.expr_list(list)?),
                None => Stmt::Return(Vec::new()),
            },
            "break_statement" => self.branch(node, Token::Break),
            "continue_statement" => self.branch(node, Token::Continue),
            "goto_statement" => self.branch(node, Token::Goto),
            "fallthrough_statement" => Stmt::Branch {
                tok: Token::Fallthrough,
                label: None,
            },
            "block" => Stmt::Block(self.block(node)?),
            "if_statement" => Stmt::If(self.if_stmt(node)?),
            "for_statement" => self.for_stmt(node)?,
            "expression_switch_statement" => Stmt::Switch(self.switch_stmt(node)?),
            "type_switch_statement" => Stmt::TypeSwitch(self.type_switch_stmt(node)?),
            "select_statement" => {
                let mut list = Vec::new();
                for case in named_children(node) {
                    list.push(Stmt::CommClause(self.comm_clause(&case)?));
                }
                Stmt::Select(BlockStmt { list })
            }
            "const_declaration" | "var_declaration" | "type_declaration" => {
                Stmt::Decl(self.gen_decl(node)?)
            }
            "empty_statement" => Stmt::Empty,
            _ => return Err(self.unexpected(node)),
        };
        Ok(stmt)
    }

    fn branch(&self, node: &Node, tok: Token) -> Stmt {
        Stmt::Branch {
            tok,
            label: named_children(node)
                .first()
                .map(|label| self.text(label).to_string()),
        }
    }

    /// `v, ok := <-ch` / `<-ch` inside a select case
    fn receive(&self, node: &Node) -> Result<Stmt> {
        let right = self.expr(&self.required(node, "right")?)?;
        let Some(left) = node.child_by_field_name("left") else {
            return Ok(Stmt::Expr(right));
        };
        let tok = if has_token(node, ":=") {
            Token::Define
        } else {
            Token::Assign
        };
        Ok(Stmt::Assign {
            lhs: self.expr_list(&left)?,
            tok,
            rhs: vec![right],
        })
    }

    fn if_stmt(&self, node: &Node) -> Result<IfStmt> {
        let else_branch = match node.child_by_field_name("alternative") {
            Some(alt) if alt.kind() == "if_statement" => {
                Some(Box::new(Stmt::If(self.if_stmt(&alt)?)))
            }
            Some(alt) => Some(Box::new(Stmt::Block(self.block(&alt)?))),
            None => None,
        };
        Ok(IfStmt {
            init: self.boxed_stmt(node.child_by_field_name("initializer"))?,
            cond: self.expr(&self.required(node, "condition")?)?,
            body: self.block(&self.required(node, "consequence")?)?,
            else_branch,
        })
    }

    fn for_stmt(&self, node: &Node) -> Result<Stmt> {
        let body_node = self.required(node, "body")?;
        let body = self.block(&body_node)?;
        let header = named_children(node)
            .into_iter()
            .find(|child| child.id() != body_node.id());

        let stmt = match header {
            None => Stmt::For(ForStmt {
                init: None,
                cond: None,
                post: None,
                body,
            }),
            Some(clause) if clause.kind() == "for_clause" => Stmt::For(ForStmt {
                init: self.boxed_stmt(clause.child_by_field_name("initializer"))?,
                cond: clause
                    .child_by_field_name("condition")
                    .map(|cond| self.expr(&cond))
                    .transpose()?,
                post: self.boxed_stmt(clause.child_by_field_name("update"))?,
                body,
            }),
            Some(clause) if clause.kind() == "range_clause" => {
                let (mut key, mut value, mut tok) = (None, None, None);
                if let Some(left) = clause.child_by_field_name("left") {
                    let mut lhs = self.expr_list(&left)?.into_iter();
                    key = lhs.next();
                    value = lhs.next();
                    tok = Some(if has_token(&clause, ":=") {
                        Token::Define
                    } else {
                        Token::Assign
                    });
                }
                Stmt::Range(RangeStmt {
                    key,
                    value,
                    tok,
                    x: self.expr(&self.required(&clause, "right")?)?,
                    body,
                })
            }
            Some(cond) => Stmt::For(ForStmt {
                init: None,
                cond: Some(self.expr(&cond)?),
                post: None,
                body,
            }),
        };
        Ok(stmt)
    }

    fn switch_stmt(&self, node: &Node) -> Result<SwitchStmt> {
        let mut list = Vec::new();
        for case in named_children(node) {
            match case.kind() {
                "expression_case" => {
                    let values = self.required(&case, "value")?;
                    list.push(Stmt::CaseClause(CaseClause {
                        list: self.expr_list(&values)?,
                        body: self.stmt_list(&case, &[values.id()])?,
                    }));
                }
                "default_case" => list.push(Stmt::CaseClause(CaseClause {
                    list: Vec::new(),
                    body: self.stmt_list(&case, &[])?,
                })),
                // header parts are fields, handled below
                _ => {}
            }
        }
        Ok(SwitchStmt {
            init: self.boxed_stmt(node.child_by_field_name("initializer"))?,
            tag: node
                .child_by_field_name("value")
                .map(|tag| self.expr(&tag))
                .transpose()?,
            body: BlockStmt { list },
        })
    }

    fn type_switch_stmt(&self, node: &Node) -> Result<TypeSwitchStmt> {
        let subject = Expr::TypeAssert {
            x: Box::new(self.expr(&self.required(node, "value")?)?),
            ty: None,
        };
        let assign = match node.child_by_field_name("alias") {
            Some(alias) => Stmt::Assign {
                lhs: self.expr_list(&alias)?,
                tok: Token::Define,
                rhs: vec![subject],
            },
            None => Stmt::Expr(subject),
        };

        let mut list = Vec::new();
        for case in named_children(node) {
            match case.kind() {
                "type_case" => {
                    let types = field_children(&case, "type");
                    let skip: Vec<usize> = types.iter().map(|ty| ty.id()).collect();
                    list.push(Stmt::CaseClause(CaseClause {
                        list: types
                            .iter()
                            .map(|ty| self.expr(ty))
                            .collect::<Result<_>>()?,
                        body: self.stmt_list(&case, &skip)?,
                    }));
                }
                "default_case" => list.push(Stmt::CaseClause(CaseClause {
                    list: Vec::new(),
                    body: self.stmt_list(&case, &[])?,
                })),
                _ => {}
            }
        }

        Ok(TypeSwitchStmt {
            init: self.boxed_stmt(node.child_by_field_name("initializer"))?,
            assign: Box::new(assign),
            body: BlockStmt { list },
        })
    }

    fn comm_clause(&self, node: &Node) -> Result<CommClause> {
        match node.kind() {
            "communication_case" => {
                let comm = self.required(node, "communication")?;
                Ok(CommClause {
                    comm: Some(Box::new(self.stmt(&comm)?)),
                    body: self.stmt_list(node, &[comm.id()])?,
                })
            }
            "default_case" => Ok(CommClause {
                comm: None,
                body: self.stmt_list(node, &[])?,
            }),
            _ => Err(self.unexpected(node)),
        }
    }

    // =========================================================================
    // Expressions and types
    // =========================================================================

    fn expr_list(&self, node: &Node) -> Result<Vec<Expr>> {
        if node.kind() != "expression_list" {
            return Ok(vec![self.expr(node)?]);
        }
        named_children(node)
            .iter()
            .map(|child| self.expr(child))
            .collect()
    }

    fn boxed(&self, node: &Node, field: &str) -> Result<Box<Expr>> {
        Ok(Box::new(self.expr(&self.required(node, field)?)?))
    }

    fn optional(&self, node: &Node, field: &str) -> Result<Option<Box<Expr>>> {
        node.child_by_field_name(field)
            .map(|child| self.expr(&child).map(Box::new))
            .transpose()
    }

    fn literal(&self, node: &Node, kind: LitKind) -> Expr {
        Expr::BasicLit {
            kind,
            value: self.text(node).to_string(),
        }
    }

    /// `X[A]` or `X[A, B]`
    fn instantiate(&self, x: Expr, args: Vec<Expr>) -> Expr {
        let mut args = args;
        if args.len() == 1 {
            Expr::Index {
                x: Box::new(x),
                index: Box::new(args.remove(0)),
            }
        } else {
            Expr::IndexList {
                x: Box::new(x),
                indices: args,
            }
        }
    }

    fn type_args(&self, node: &Node) -> Result<Vec<Expr>> {
        named_children(node)
            .iter()
            .map(|arg| self.expr(arg))
            .collect()
    }

    fn composite_elems(&self, node: &Node) -> Result<Vec<Expr>> {
        named_children(node)
            .iter()
            .map(|elem| self.expr(elem))
            .collect()
    }

    pub(crate) fn expr(&self, node: &Node) -> Result<Expr> {
        let expr = match node.kind() {
            "identifier" | "type_identifier" | "field_identifier" | "package_identifier"
            | "label_name" | "blank_identifier" | "nil" | "true" | "false" | "iota" => {
                Expr::Ident(self.text(node).to_string())
            }
            "int_literal" => self.literal(node, LitKind::Int),
            "float_literal" => self.literal(node, LitKind::Float),
            "imaginary_literal" => self.literal(node, LitKind::Imag),
            "rune_literal" => self.literal(node, LitKind::Char),
            "interpreted_string_literal" | "raw_string_literal" => {
                self.literal(node, LitKind::String)
            }
            "parenthesized_expression" | "parenthesized_type" => {
                Expr::Paren(Box::new(self.expr(&self.first_named(node)?)?))
            }
            "selector_expression" => {
                let field = self.required(node, "field")?;
                Expr::Selector {
                    x: self.boxed(node, "operand")?,
                    sel: self.text(&field).to_string(),
                }
            }
            "qualified_type" => {
                let package = self.required(node, "package")?;
                let name = self.required(node, "name")?;
                Expr::Selector {
                    x: Box::new(Expr::Ident(self.text(&package).to_string())),
                    sel: self.text(&name).to_string(),
                }
            }
            "index_expression" => Expr::Index {
                x: self.boxed(node, "operand")?,
                index: self.boxed(node, "index")?,
            },
            "slice_expression" => Expr::Slice {
                x: self.boxed(node, "operand")?,
                low: self.optional(node, "start")?,
                high: self.optional(node, "end")?,
                max: self.optional(node, "capacity")?,
            },
            "type_assertion_expression" => Expr::TypeAssert {
                x: self.boxed(node, "operand")?,
                ty: Some(self.boxed(node, "type")?),
            },
            "call_expression" => self.call(node)?,
            "type_conversion_expression" => Expr::Call {
                fun: self.boxed(node, "type")?,
                args: vec![self.expr(&self.required(node, "operand")?)?],
                ellipsis: false,
            },
            "type_instantiation_expression" => {
                let ty = self.required(node, "type")?;
                let args = named_children(node)
                    .iter()
                    .filter(|arg| arg.id() != ty.id())
                    .map(|arg| self.expr(arg))
                    .collect::<Result<Vec<_>>>()?;
                self.instantiate(self.expr(&ty)?, args)
            }
            "generic_type" => {
                let args = self.type_args(&self.required(node, "type_arguments")?)?;
                self.instantiate(self.expr(&self.required(node, "type")?)?, args)
            }
            "composite_literal" => Expr::CompositeLit {
                ty: Some(self.boxed(node, "type")?),
                elts: self.composite_elems(&self.required(node, "body")?)?,
            },
            "literal_value" => Expr::CompositeLit {
                ty: None,
                elts: self.composite_elems(node)?,
            },
            "literal_element" => self.expr(&self.first_named(node)?)?,
            "keyed_element" => {
                let parts = named_children(node);
                let (Some(key), Some(value)) = (parts.first(), parts.get(1)) else {
                    return Err(self.unexpected(node));
                };
                Expr::KeyValue {
                    key: Box::new(self.expr(key)?),
                    value: Box::new(self.expr(value)?),
                }
            }
            "func_literal" => Expr::FuncLit {
                ty: self.signature(node)?,
                body: self.block(&self.required(node, "body")?)?,
            },
            "unary_expression" => {
                let op = self.required(node, "operator")?;
                let x = self.boxed(node, "operand")?;
                match self.text(&op) {
                    "*" => Expr::Star(x),
                    text => Expr::Unary {
                        op: Token::from_text(text)
                            .ok_or_else(|| self.error(&op, format!("unknown operator {}", text)))?,
                        x,
                    },
                }
            }
            "binary_expression" => {
                let op = self.required(node, "operator")?;
                let text = self.text(&op);
                Expr::Binary {
                    x: self.boxed(node, "left")?,
                    op: Token::from_text(text)
                        .ok_or_else(|| self.error(&op, format!("unknown operator {}", text)))?,
                    y: self.boxed(node, "right")?,
                }
            }
            "variadic_argument" => self.expr(&self.first_named(node)?)?,
            "pointer_type" => Expr::Star(Box::new(self.expr(&self.first_named(node)?)?)),
            "negated_type" => Expr::Unary {
                op: Token::Tilde,
                x: Box::new(self.expr(&self.first_named(node)?)?),
            },
            "type_elem" | "type_constraint" | "constraint_elem" => {
                // `A | B | C` folds left, like go/parser's binary `|`
                let mut terms = named_children(node).into_iter();
                let first = terms.next().ok_or_else(|| self.unexpected(node))?;
                let mut acc = self.expr(&first)?;
                for term in terms {
                    acc = Expr::Binary {
                        x: Box::new(acc),
                        op: Token::Or,
                        y: Box::new(self.expr(&term)?),
                    };
                }
                acc
            }
            "slice_type" => Expr::ArrayType {
                len: None,
                elt: self.boxed(node, "element")?,
            },
            "array_type" => Expr::ArrayType {
                len: Some(self.boxed(node, "length")?),
                elt: self.boxed(node, "element")?,
            },
            "implicit_length_array_type" => Expr::ArrayType {
                len: Some(Box::new(Expr::Ellipsis(None))),
                elt: self.boxed(node, "element")?,
            },
            "map_type" => Expr::MapType {
                key: self.boxed(node, "key")?,
                value: self.boxed(node, "value")?,
            },
            "channel_type" => Expr::ChanType {
                dir: self.chan_dir(node),
                value: self.boxed(node, "value")?,
            },
            "function_type" => Expr::FuncType(self.signature(node)?),
            "struct_type" => Expr::StructType(self.struct_fields(node)?),
            "interface_type" => Expr::InterfaceType(self.interface_elems(node)?),
            _ => return Err(self.unexpected(node)),
        };
        Ok(expr)
    }

    fn call(&self, node: &Node) -> Result<Expr> {
        let mut fun = self.expr(&self.required(node, "function")?)?;
        if let Some(type_args) = node.child_by_field_name("type_arguments") {
            fun = self.instantiate(fun, self.type_args(&type_args)?);
        }

        let mut args = Vec::new();
        let mut ellipsis = false;
        for arg in named_children(&self.required(node, "arguments")?) {
            if arg.kind() == "variadic_argument" {
                ellipsis = true;
            }
            args.push(self.expr(&arg)?);
        }
        Ok(Expr::Call {
            fun: Box::new(fun),
            args,
            ellipsis,
        })
    }

    /// `chan T`, `chan<- T` or `<-chan T`, decided by token order
    fn chan_dir(&self, node: &Node) -> ChanDir {
        let mut cursor = node.walk();
        let tokens: Vec<&str> = node
            .children(&mut cursor)
            .filter(|child| !child.is_named())
            .map(|child| child.kind())
            .collect();
        match tokens.as_slice() {
            ["<-", ..] => ChanDir::Recv,
            ["chan", "<-", ..] => ChanDir::Send,
            _ => ChanDir::Both,
        }
    }
}
