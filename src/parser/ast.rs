// AST (Abstract Syntax Tree) definitions for VkScript

use crate::parser::lexer::Token;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// A name bound by `var` or rebound by an assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub location: SourceLocation,
}

impl Identifier {
    pub fn new(name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// Expression tree.
///
/// Leaves hold the literal or identifier token they were built from; operator
/// nodes hold the operator token so diagnostics and printers can reproduce
/// the exact source spelling.
#[derive(Debug, Clone)]
pub enum Expr {
    /// `Number`, `Identifier` or `BooleanLiteral` token
    Leaf(Token),
    /// Prefix minus
    Unary { op: Token, operand: Box<Expr> },
    Binary {
        op: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Location of the token that starts this expression
    pub fn location(&self) -> SourceLocation {
        let mut expr = self;
        loop {
            match expr {
                Expr::Leaf(token) => return token.location(),
                Expr::Unary { op, .. } => return op.location(),
                Expr::Binary { left, .. } => expr = left,
            }
        }
    }

    /// Structural equality: same shape, same operator and leaf spellings.
    /// Source locations are ignored.
    pub fn same_structure(&self, other: &Expr) -> bool {
        zip_nodes(self, other, |a, b| a.kind() == b.kind() && a.text() == b.text())
    }

    fn placeholder() -> Expr {
        Expr::Leaf(Token::end_of_input(SourceLocation::default()))
    }
}

/// Walk two trees in lockstep without recursion, comparing every token pair
/// with `same_token`. Trees of different shape are never equal.
fn zip_nodes(a: &Expr, b: &Expr, same_token: impl Fn(&Token, &Token) -> bool) -> bool {
    let mut pending = vec![(a, b)];

    while let Some(pair) = pending.pop() {
        match pair {
            (Expr::Leaf(x), Expr::Leaf(y)) => {
                if !same_token(x, y) {
                    return false;
                }
            }
            (
                Expr::Unary { op: a, operand: x },
                Expr::Unary { op: b, operand: y },
            ) => {
                if !same_token(a, b) {
                    return false;
                }
                pending.push((&**x, &**y));
            }
            (
                Expr::Binary {
                    op: a,
                    left: l1,
                    right: r1,
                },
                Expr::Binary {
                    op: b,
                    left: l2,
                    right: r2,
                },
            ) => {
                if !same_token(a, b) {
                    return false;
                }
                pending.push((&**r1, &**r2));
                pending.push((&**l1, &**l2));
            }
            _ => return false,
        }
    }

    true
}

impl PartialEq for Expr {
    fn eq(&self, other: &Expr) -> bool {
        zip_nodes(self, other, |a, b| a == b)
    }
}

impl Eq for Expr {}

// Left-associative chains grow one level per operator, so the tree is torn
// down from an explicit work list instead of the default recursive drop.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach_children(&mut expr, &mut pending);
        }
    }
}

/// Move every non-leaf child of `expr` onto `pending`, leaving leaves behind
fn detach_children(expr: &mut Expr, pending: &mut Vec<Expr>) {
    let mut detach = |child: &mut Box<Expr>| {
        if !matches!(**child, Expr::Leaf(_)) {
            pending.push(std::mem::replace(&mut **child, Expr::placeholder()));
        }
    };

    match expr {
        Expr::Leaf(_) => {}
        Expr::Unary { operand, .. } => detach(operand),
        Expr::Binary { left, right, .. } => {
            detach(left);
            detach(right);
        }
    }
}

/// Statements. Blocks are plain `Vec<Stmt>` owned by the enclosing statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    VarDecl {
        name: Identifier,
        initializer: Expr,
        location: SourceLocation,
    },
    Assign {
        name: Identifier,
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    Return {
        value: Expr,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this statement
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::VarDecl { location, .. }
            | Stmt::Assign { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::Return { location, .. } => *location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
