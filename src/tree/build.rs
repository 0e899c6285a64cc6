//! Syntax tree → display tree
//!
//! Every declaration, statement and expression kind maps to at least one
//! labeled node. Each `match` ends in an arm that still produces a node,
//! so nothing the parser accepts disappears from the view.

use crate::syntax::ast::{
    BlockStmt, Decl, DeclKeyword, Expr, Field, File, FuncDecl, GenDecl, Spec, Stmt, TypeSpec,
};
use crate::syntax::SyntaxError;

use super::stringify::expr_to_string;
use super::DisplayNode;

/// Indent of the per-file root nodes
const FILE_LEVEL: usize = 1;

/// Root node for a successfully parsed file
pub fn file_to_node(name: &str, file: &File) -> DisplayNode {
    DisplayNode::new(format!("File: {}", name), FILE_LEVEL)
        .with_children(file_children(file, FILE_LEVEL + 1))
}

/// Leaf standing in for a file that failed to parse
pub fn syntax_error_node(name: &str, err: &SyntaxError) -> DisplayNode {
    DisplayNode::new(format!("{} (error: {})", name, err), FILE_LEVEL)
}

fn file_children(file: &File, level: usize) -> Vec<DisplayNode> {
    let mut nodes = vec![DisplayNode::new(
        format!("Package: {}", file.package),
        level,
    )];

    if !file.imports.is_empty() {
        let imports = file
            .imports
            .iter()
            .map(|imp| DisplayNode::new(format!("Import: {}", imp.path), level + 1))
            .collect();
        nodes.push(DisplayNode::new("Imports", level).with_children(imports));
    }

    for decl in &file.decls {
        nodes.extend(decl_nodes(decl, level));
    }
    nodes
}

// =============================================================================
// Declarations
// =============================================================================

fn decl_nodes(decl: &Decl, level: usize) -> Vec<DisplayNode> {
    match decl {
        Decl::Gen(gen) => gen_decl_nodes(gen, level),
        Decl::Func(func) => vec![func_decl_node(func, level)],
    }
}

fn gen_decl_nodes(decl: &GenDecl, level: usize) -> Vec<DisplayNode> {
    match decl.keyword {
        DeclKeyword::Type => decl
            .specs
            .iter()
            .filter_map(|spec| match spec {
                Spec::Type(ts) => Some(type_spec_node(ts, level)),
                Spec::Value(_) => None,
            })
            .collect(),
        DeclKeyword::Const | DeclKeyword::Var => {
            let group = if decl.keyword == DeclKeyword::Const {
                "Const"
            } else {
                "Var"
            };
            let mut children = Vec::new();
            for spec in &decl.specs {
                let Spec::Value(vs) = spec else {
                    continue;
                };
                for name in &vs.names {
                    let mut child = DisplayNode::new(format!("{}: {}", group, name), level + 1);
                    if decl.keyword == DeclKeyword::Var {
                        if let Some(ty) = &vs.ty {
                            child.children.push(DisplayNode::new(
                                format!("Type: {}", ty),
                                level + 2,
                            ));
                        }
                    }
                    children.push(child);
                }
            }
            // groups without names are dropped, not shown empty
            if children.is_empty() {
                Vec::new()
            } else {
                vec![DisplayNode::new(group, level).with_children(children)]
            }
        }
    }
}

fn type_spec_node(ts: &TypeSpec, level: usize) -> DisplayNode {
    let shape = match &ts.ty {
        Expr::StructType(fields) => DisplayNode::new("StructType", level + 1)
            .with_children(field_nodes(fields, level + 2)),
        Expr::InterfaceType(methods) => DisplayNode::new("InterfaceType", level + 1)
            .with_children(field_nodes(methods, level + 2)),
        other => DisplayNode::new(format!("TypeExpr: {}", other), level + 1),
    };
    DisplayNode::new(format!("Type: {}", ts.name), level).with_children(vec![shape])
}

fn field_nodes(fields: &[Field], level: usize) -> Vec<DisplayNode> {
    fields.iter().map(|field| field_node(field, level)).collect()
}

fn field_node(field: &Field, level: usize) -> DisplayNode {
    let name = if field.names.is_empty() {
        "(embedded)".to_string()
    } else {
        field.names.join(", ")
    };

    let mut children = vec![DisplayNode::new(format!("Type: {}", field.ty), level + 1)];
    if let Some(tag) = &field.tag {
        children.push(DisplayNode::new(format!("Tag: {}", tag), level + 1));
    }
    DisplayNode::new(format!("Field: {}", name), level).with_children(children)
}

/// Grouping node, or nothing when the group would be empty
fn group(label: &str, fields: &[Field], level: usize) -> Option<DisplayNode> {
    if fields.is_empty() {
        return None;
    }
    Some(DisplayNode::new(label, level).with_children(field_nodes(fields, level + 1)))
}

fn func_decl_node(func: &FuncDecl, level: usize) -> DisplayNode {
    let label = match func.recv.as_deref().and_then(|recv| recv.first()) {
        Some(recv) => format!("Method: ({}) {}", recv.ty, func.name),
        None => format!("Func: {}", func.name),
    };

    let mut children = Vec::new();
    children.extend(group("Params", &func.ty.params, level + 1));
    children.extend(group("Results", &func.ty.results, level + 1));
    if let Some(body) = &func.body {
        children.push(block_node(body, level + 1));
    }
    DisplayNode::new(label, level).with_children(children)
}

// =============================================================================
// Statements
// =============================================================================

fn block_node(block: &BlockStmt, level: usize) -> DisplayNode {
    DisplayNode::new("BlockStmt", level).with_children(stmt_nodes(&block.list, level + 1))
}

fn stmt_nodes(stmts: &[Stmt], level: usize) -> Vec<DisplayNode> {
    stmts.iter().map(|stmt| stmt_node(stmt, level)).collect()
}

fn expr_nodes(exprs: &[Expr], level: usize) -> Vec<DisplayNode> {
    exprs.iter().map(|expr| expr_node(expr, level)).collect()
}

fn stmt_node(stmt: &Stmt, level: usize) -> DisplayNode {
    let child = level + 1;
    let mut children = Vec::new();

    let label = match stmt {
        Stmt::Block(block) => return block_node(block, level),
        Stmt::Expr(x) => {
            children.push(expr_node(x, child));
            "ExprStmt".to_string()
        }
        Stmt::Assign { lhs, tok, rhs } => {
            children.extend(expr_nodes(lhs, child));
            children.extend(expr_nodes(rhs, child));
            format!("AssignStmt ({})", tok)
        }
        Stmt::Return(results) => {
            children.extend(expr_nodes(results, child));
            "ReturnStmt".to_string()
        }
        Stmt::If(s) => {
            if let Some(init) = &s.init {
                children.push(stmt_node(init, child));
            }
            children.push(expr_node(&s.cond, child));
            children.push(block_node(&s.body, child));
            if let Some(else_branch) = &s.else_branch {
                children.push(stmt_node(else_branch, child));
            }
            "IfStmt".to_string()
        }
        Stmt::For(s) => {
            if let Some(init) = &s.init {
                children.push(stmt_node(init, child));
            }
            if let Some(cond) = &s.cond {
                children.push(expr_node(cond, child));
            }
            if let Some(post) = &s.post {
                children.push(stmt_node(post, child));
            }
            children.push(block_node(&s.body, child));
            "ForStmt".to_string()
        }
        Stmt::Range(s) => {
            children.extend(s.key.iter().map(|key| expr_node(key, child)));
            children.extend(s.value.iter().map(|value| expr_node(value, child)));
            children.push(expr_node(&s.x, child));
            children.push(block_node(&s.body, child));
            "RangeStmt".to_string()
        }
        Stmt::Decl(decl) => {
            children.extend(gen_decl_nodes(decl, child));
            "DeclStmt".to_string()
        }
        Stmt::Defer(call) => {
            children.push(expr_node(call, child));
            "DeferStmt".to_string()
        }
        Stmt::Go(call) => {
            children.push(expr_node(call, child));
            "GoStmt".to_string()
        }
        Stmt::Switch(s) => {
            if let Some(init) = &s.init {
                children.push(stmt_node(init, child));
            }
            if let Some(tag) = &s.tag {
                children.push(expr_node(tag, child));
            }
            children.push(block_node(&s.body, child));
            "SwitchStmt".to_string()
        }
        Stmt::TypeSwitch(s) => {
            if let Some(init) = &s.init {
                children.push(stmt_node(init, child));
            }
            children.push(stmt_node(&s.assign, child));
            children.push(block_node(&s.body, child));
            "TypeSwitchStmt".to_string()
        }
        Stmt::CaseClause(clause) => {
            children.extend(expr_nodes(&clause.list, child));
            children.extend(stmt_nodes(&clause.body, child));
            if clause.list.is_empty() {
                "CaseClause (default)".to_string()
            } else {
                "CaseClause".to_string()
            }
        }
        Stmt::Select(body) => {
            children.push(block_node(body, child));
            "SelectStmt".to_string()
        }
        Stmt::CommClause(clause) => {
            if let Some(comm) = &clause.comm {
                children.push(stmt_node(comm, child));
            }
            children.extend(stmt_nodes(&clause.body, child));
            if clause.comm.is_none() {
                "CommClause (default)".to_string()
            } else {
                "CommClause".to_string()
            }
        }
        Stmt::IncDec { x, tok } => {
            children.push(expr_node(x, child));
            format!("IncDecStmt ({})", tok)
        }
        Stmt::Branch { tok, label } => match label {
            Some(name) => format!("BranchStmt ({} {})", tok, name),
            None => format!("BranchStmt ({})", tok),
        },
        Stmt::Labeled { label, stmt } => {
            children.push(stmt_node(stmt, child));
            format!("LabeledStmt ({})", label)
        }
        Stmt::Send { chan, value } => {
            children.push(expr_node(chan, child));
            children.push(expr_node(value, child));
            "SendStmt".to_string()
        }
        other => other.kind_name().to_string(),
    };

    DisplayNode::new(label, level).with_children(children)
}

// =============================================================================
// Expressions
// =============================================================================

fn expr_node(expr: &Expr, level: usize) -> DisplayNode {
    let child = level + 1;
    let mut children = Vec::new();

    let label = match expr {
        Expr::Call { fun, args, .. } => {
            children.push(DisplayNode::new(format!("Fun: {}", fun), child));
            if !args.is_empty() {
                children.push(
                    DisplayNode::new("Args", child).with_children(expr_nodes(args, child + 1)),
                );
            }
            "CallExpr".to_string()
        }
        Expr::Binary { x, op, y } => {
            children.push(expr_node(x, child));
            children.push(expr_node(y, child));
            format!("BinaryExpr ({})", op)
        }
        Expr::Unary { op, x } => {
            children.push(expr_node(x, child));
            format!("UnaryExpr ({})", op)
        }
        // kept compact: no recursion into the base
        Expr::Selector { x, sel } => format!("SelectorExpr: {}.{}", x, sel),
        Expr::Index { x, index } => {
            children.push(expr_node(x, child));
            children.push(expr_node(index, child));
            "IndexExpr".to_string()
        }
        Expr::CompositeLit { ty, elts } => {
            children.extend(expr_nodes(elts, child));
            format!("CompositeLit: {}", expr_to_string(ty.as_deref()))
        }
        Expr::FuncLit { body, .. } => {
            children.push(block_node(body, child));
            "FuncLit".to_string()
        }
        Expr::KeyValue { key, value } => {
            children.push(DisplayNode::new(format!("Key: {}", key), child));
            children.push(expr_node(value, child));
            "KeyValueExpr".to_string()
        }
        Expr::TypeAssert { x, ty } => {
            children.push(expr_node(x, child));
            if let Some(ty) = ty {
                children.push(DisplayNode::new(format!("Type: {}", ty), child));
            }
            "TypeAssertExpr".to_string()
        }
        Expr::Star(x) => {
            children.push(expr_node(x, child));
            "StarExpr".to_string()
        }
        Expr::Slice { x, low, high, .. } => {
            children.push(expr_node(x, child));
            children.extend(low.iter().map(|low| expr_node(low, child)));
            children.extend(high.iter().map(|high| expr_node(high, child)));
            "SliceExpr".to_string()
        }
        other => other.to_string(),
    };

    DisplayNode::new(label, level).with_children(children)
}
