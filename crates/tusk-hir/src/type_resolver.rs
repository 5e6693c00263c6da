//! The context-sensitive type resolver.
//!
//! Maps a position in a document to the static type of the expression
//! there. The resolver replays the enclosing body up to the target:
//! assignments bind variables, `instanceof` refines inside positive
//! branches, if/elseif/else lists become branch groups, and `foreach`
//! binds its key and value. Member access goes through the type
//! aggregate.
//!
//! Failure is always the empty type; the resolver never errors.

use smol_str::SmolStr;
use text_size::TextSize;
use tracing::trace;

use tusk_syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

use crate::aggregate::{MergeStrategy, TypeAggregate};
use crate::cancel::CancellationToken;
use crate::nameres::{NameKind, NameResolver};
use crate::reader::{self, DocumentSymbols};
use crate::store::SymbolStore;
use crate::symbols::{Modifiers, Symbol, SymbolKind};
use crate::types::TypeString;
use crate::var_table::VariableTable;

/// Which member kind a lookup prefers when names collide across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberPrefer {
    Property,
    Method,
    Constant,
}

/// Resolves the type of the expression at `offset`.
#[must_use]
pub fn type_at(
    store: &SymbolStore,
    doc: &DocumentSymbols,
    root: &SyntaxNode,
    offset: TextSize,
    cancel: &CancellationToken,
) -> TypeString {
    let Some(token) = token_at(root, offset) else {
        return TypeString::empty();
    };
    let Some(target) = token
        .parent_ancestors()
        .find(|node| node.kind().is_expr())
    else {
        return TypeString::empty();
    };
    resolve_node(store, doc, &target, cancel)
}

/// Resolves the type of a specific expression node in its document
/// context.
#[must_use]
pub fn resolve_node(
    store: &SymbolStore,
    doc: &DocumentSymbols,
    node: &SyntaxNode,
    cancel: &CancellationToken,
) -> TypeString {
    let mut resolver = TypeResolver::at_node(store, doc, node, cancel.clone());
    resolver.replay_to(node);
    resolver.resolve_expr(node)
}

/// Picks the token at an offset, preferring the non-trivia token on the
/// left when the offset sits on a boundary.
fn token_at(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    match root.token_at_offset(offset) {
        rowan::TokenAtOffset::None => None,
        rowan::TokenAtOffset::Single(token) => Some(token),
        rowan::TokenAtOffset::Between(left, right) => {
            if left.kind().is_trivia() && !right.kind().is_trivia() {
                Some(right)
            } else {
                Some(left)
            }
        }
    }
}

/// The traversal state for one resolution request.
pub(crate) struct TypeResolver<'a> {
    store: &'a SymbolStore,
    doc: &'a DocumentSymbols,
    cancel: CancellationToken,
    names: NameResolver,
    vars: VariableTable,
    current_class: Option<std::sync::Arc<Symbol>>,
}

impl<'a> TypeResolver<'a> {
    /// Builds the resolver context for a node: name resolver at its
    /// position, enclosing class, and empty variable state.
    fn at_node(
        store: &'a SymbolStore,
        doc: &'a DocumentSymbols,
        node: &SyntaxNode,
        cancel: CancellationToken,
    ) -> Self {
        let offset = node.text_range().start();
        let names = doc.resolver_at(offset);

        let current_class = node
            .ancestors()
            .find(|ancestor| ancestor.kind().is_class_like())
            .and_then(|class_node| {
                let name_range = reader::declaration_name_range(&class_node)?;
                doc.symbols.iter().find(|symbol| {
                    symbol.kind.is_class_like() && symbol.location.range == name_range
                })
            })
            .cloned();

        Self {
            store,
            doc,
            cancel,
            names,
            vars: VariableTable::new(),
            current_class,
        }
    }

    /// Replays the enclosing bodies from the outermost callable down to
    /// the statement containing `node`, building variable state.
    fn replay_to(&mut self, node: &SyntaxNode) {
        let offset = node.text_range().start();

        let mut callables: Vec<SyntaxNode> = node
            .ancestors()
            .filter(|ancestor| {
                matches!(
                    ancestor.kind(),
                    SyntaxKind::FunctionDecl | SyntaxKind::MethodDecl | SyntaxKind::ClosureExpr
                )
            })
            .collect();
        callables.reverse(); // outermost first

        if callables.is_empty() {
            // Top-level code: replay the enclosing file or namespace body.
            if let Some(body) = node.ancestors().find(|ancestor| {
                matches!(
                    ancestor.kind(),
                    SyntaxKind::SourceFile | SyntaxKind::NamespaceDef
                )
            }) {
                self.walk_stmts(&body, offset);
            }
            return;
        }

        for callable in &callables {
            self.enter_callable(callable);
            if let Some(body) = callable
                .children()
                .find(|child| child.kind() == SyntaxKind::Block)
            {
                self.walk_stmts(&body, offset);
            }
        }
    }

    /// Pushes a scope for a callable and seeds `$this` and parameters.
    fn enter_callable(&mut self, callable: &SyntaxNode) {
        // Closure captures are evaluated in the enclosing scope.
        let mut captures: Vec<(SmolStr, TypeString)> = Vec::new();
        if callable.kind() == SyntaxKind::ClosureExpr {
            if let Some(use_clause) = callable
                .children()
                .find(|child| child.kind() == SyntaxKind::ClosureUse)
            {
                for var_ref in use_clause
                    .children()
                    .filter(|child| child.kind() == SyntaxKind::VarRef)
                {
                    let name = var_name(&var_ref);
                    captures.push((name.clone(), self.vars.get_type(&name)));
                }
            }
        }

        self.vars.push_scope();

        for (name, ty) in captures {
            self.vars.set_type(&name, ty);
        }

        let symbol = self.callable_symbol(callable);

        // `$this` inside a non-static method body.
        if callable.kind() == SyntaxKind::MethodDecl {
            let is_static = symbol
                .as_ref()
                .is_some_and(|method| method.modifiers.contains(Modifiers::STATIC));
            if !is_static {
                if let Some(class) = &self.current_class {
                    self.vars
                        .set_type("$this", TypeString::atom(class.name.as_str()));
                }
            }
        }

        match symbol {
            Some(symbol) => {
                for param in symbol
                    .children
                    .iter()
                    .filter(|child| child.kind == SymbolKind::Parameter)
                {
                    self.vars
                        .set_type(&param.name, param.type_string.clone());
                }
            }
            None => self.bind_params_from_syntax(callable),
        }
    }

    /// Finds the declared symbol of a function or method node by its name
    /// range.
    fn callable_symbol(&self, callable: &SyntaxNode) -> Option<std::sync::Arc<Symbol>> {
        let range = reader::declaration_name_range(callable)?;
        match callable.kind() {
            SyntaxKind::FunctionDecl => self
                .doc
                .symbols
                .iter()
                .find(|symbol| {
                    symbol.kind == SymbolKind::Function && symbol.location.range == range
                })
                .cloned(),
            SyntaxKind::MethodDecl => self.current_class.as_ref().and_then(|class| {
                class
                    .children
                    .iter()
                    .find(|member| {
                        member.kind == SymbolKind::Method && member.location.range == range
                    })
                    .cloned()
            }),
            _ => None,
        }
    }

    /// Binds closure parameters from their declared hints.
    fn bind_params_from_syntax(&mut self, callable: &SyntaxNode) {
        let Some(param_list) = callable
            .children()
            .find(|child| child.kind() == SyntaxKind::ParamList)
        else {
            return;
        };
        for param in param_list
            .children()
            .filter(|child| child.kind() == SyntaxKind::Param)
        {
            let Some(var_token) = param
                .children_with_tokens()
                .filter_map(|element| element.into_token())
                .find(|token| token.kind() == SyntaxKind::Variable)
            else {
                continue;
            };
            let ty = param
                .children()
                .find(|child| child.kind() == SyntaxKind::TypeHint)
                .map(|hint| {
                    reader::resolve_type_with(&reader::type_hint_to_type(&hint), &self.names)
                })
                .unwrap_or_default();
            self.vars.set_type(var_token.text(), ty);
        }
    }

    // =========================================================================
    // Statement replay
    // =========================================================================

    /// Applies statements of `parent` that end before `offset`, then
    /// descends into the one containing it.
    fn walk_stmts(&mut self, parent: &SyntaxNode, offset: TextSize) {
        for child in parent.children() {
            if !is_stmt(child.kind()) {
                continue;
            }
            if self.cancel.is_cancelled() {
                return;
            }
            if child.text_range().end() <= offset {
                self.apply_stmt(&child);
            } else if child.text_range().contains(offset) {
                self.descend_stmt(&child, offset);
                return;
            } else {
                return;
            }
        }
    }

    /// Applies the effects of a completed statement.
    fn apply_stmt(&mut self, stmt: &SyntaxNode) {
        if self.cancel.is_cancelled() {
            return;
        }
        match stmt.kind() {
            SyntaxKind::Block => {
                for child in stmt.children() {
                    if is_stmt(child.kind()) {
                        self.apply_stmt(&child);
                    }
                }
            }
            SyntaxKind::IfStmt => self.apply_if_complete(stmt),
            SyntaxKind::ForeachStmt => {
                self.bind_foreach(stmt);
                if let Some(body) = foreach_body(stmt) {
                    self.apply_stmt(&body);
                }
            }
            SyntaxKind::WhileStmt | SyntaxKind::ForStmt => {
                for child in stmt.children() {
                    if is_stmt(child.kind()) {
                        self.apply_stmt(&child);
                    } else if child.kind().is_expr() {
                        self.apply_assignments_in(&child);
                    }
                }
            }
            SyntaxKind::ExprStmt | SyntaxKind::EchoStmt | SyntaxKind::ReturnStmt => {
                self.apply_assignments_in(stmt);
            }
            _ => {}
        }
    }

    /// Applies a whole if/elseif/else list with branch-group semantics.
    fn apply_if_complete(&mut self, if_stmt: &SyntaxNode) {
        self.vars.push_branch_group();

        // Then branch.
        self.vars.push_branch();
        if let Some(cond) = if_condition(if_stmt) {
            self.apply_refinements(&cond);
        }
        if let Some(body) = if_then_body(if_stmt) {
            self.apply_stmt(&body);
        }
        self.vars.pop_branch();

        let mut has_else = false;
        for branch in if_stmt.children() {
            match branch.kind() {
                SyntaxKind::ElseIfBranch => {
                    self.vars.push_branch();
                    if let Some(cond) = branch.children().find(|child| child.kind().is_expr()) {
                        self.apply_refinements(&cond);
                    }
                    if let Some(body) = branch.children().find(|child| is_stmt(child.kind())) {
                        self.apply_stmt(&body);
                    }
                    self.vars.pop_branch();
                }
                SyntaxKind::ElseBranch => {
                    has_else = true;
                    self.vars.push_branch();
                    if let Some(body) = branch.children().find(|child| is_stmt(child.kind())) {
                        self.apply_stmt(&body);
                    }
                    self.vars.pop_branch();
                }
                _ => {}
            }
        }

        if !has_else {
            // Implicit else: an untouched path that keeps prior bindings.
            self.vars.push_branch();
            self.vars.pop_branch();
        }

        self.vars.pop_branch_group();
    }

    /// Descends into the statement containing the target offset.
    fn descend_stmt(&mut self, stmt: &SyntaxNode, offset: TextSize) {
        if self.cancel.is_cancelled() {
            return;
        }
        match stmt.kind() {
            SyntaxKind::Block => self.walk_stmts(stmt, offset),
            SyntaxKind::IfStmt => {
                if let Some(body) = if_then_body(stmt) {
                    if body.text_range().contains(offset) {
                        self.vars.push_branch_group();
                        self.vars.push_branch();
                        if let Some(cond) = if_condition(stmt) {
                            self.apply_refinements(&cond);
                        }
                        self.descend_stmt(&body, offset);
                        return;
                    }
                }
                for branch in stmt.children() {
                    if !branch.text_range().contains(offset) {
                        continue;
                    }
                    match branch.kind() {
                        SyntaxKind::ElseIfBranch => {
                            self.vars.push_branch_group();
                            self.vars.push_branch();
                            if let Some(cond) =
                                branch.children().find(|child| child.kind().is_expr())
                            {
                                self.apply_refinements(&cond);
                            }
                            if let Some(body) =
                                branch.children().find(|child| is_stmt(child.kind()))
                            {
                                if body.text_range().contains(offset) {
                                    self.descend_stmt(&body, offset);
                                }
                            }
                        }
                        SyntaxKind::ElseBranch => {
                            // Prior bindings hold; no refinement applies.
                            self.vars.push_branch_group();
                            self.vars.push_branch();
                            if let Some(body) =
                                branch.children().find(|child| is_stmt(child.kind()))
                            {
                                if body.text_range().contains(offset) {
                                    self.descend_stmt(&body, offset);
                                }
                            }
                        }
                        _ => {}
                    }
                    return;
                }
            }
            SyntaxKind::ForeachStmt => {
                if let Some(body) = foreach_body(stmt) {
                    if body.text_range().contains(offset) {
                        self.bind_foreach(stmt);
                        self.descend_stmt(&body, offset);
                    }
                }
            }
            SyntaxKind::WhileStmt | SyntaxKind::ForStmt => {
                for child in stmt.children() {
                    if is_stmt(child.kind()) && child.text_range().contains(offset) {
                        self.descend_stmt(&child, offset);
                        return;
                    }
                }
            }
            _ => {}
        }
    }

    /// Walks an expression tree and applies variable assignments. Closure
    /// bodies and nested statements are not entered.
    fn apply_assignments_in(&mut self, node: &SyntaxNode) {
        if node.kind() == SyntaxKind::AssignExpr {
            self.apply_assign(node);
        }
        for child in node.children() {
            if child.kind() == SyntaxKind::ClosureExpr || is_stmt(child.kind()) {
                continue;
            }
            self.apply_assignments_in(&child);
        }
    }

    fn apply_assign(&mut self, assign: &SyntaxNode) {
        let mut exprs = assign.children().filter(|child| child.kind().is_expr());
        let Some(lhs) = exprs.next() else {
            return;
        };
        let Some(rhs) = exprs.next() else {
            return;
        };
        if lhs.kind() == SyntaxKind::VarRef {
            let name = var_name(&lhs);
            if name != "$this" {
                let ty = self.resolve_expr(&rhs);
                trace!(var = %name, ty = %ty, "assignment binding");
                self.vars.set_type(&name, ty);
            }
        }
    }

    /// Applies `instanceof` refinements from a positive condition.
    fn apply_refinements(&mut self, cond: &SyntaxNode) {
        let mut stack = vec![cond.clone()];
        while let Some(node) = stack.pop() {
            if node.kind() == SyntaxKind::ClosureExpr {
                continue;
            }
            if node.kind() == SyntaxKind::InstanceofExpr {
                let mut children = node.children();
                let lhs = children.next();
                let rhs = children.next();
                if let (Some(lhs), Some(rhs)) = (lhs, rhs) {
                    if lhs.kind() == SyntaxKind::VarRef && rhs.kind() == SyntaxKind::NameRef {
                        let class = self.class_fqn_of_name_ref(&rhs);
                        if !class.is_empty() {
                            // Stored as replacement within the branch; the
                            // prior type re-enters through group merging.
                            self.vars
                                .set_type(&var_name(&lhs), TypeString::atom(class.as_str()));
                        }
                    }
                }
            }
            for child in node.children() {
                stack.push(child);
            }
        }
    }

    /// Binds `foreach (expr as $k => $v)` variables.
    fn bind_foreach(&mut self, stmt: &SyntaxNode) {
        let Some(subject) = stmt.children().find(|child| child.kind().is_expr()) else {
            return;
        };
        let subject_type = self.resolve_expr(&subject);

        let bindings: Vec<SyntaxNode> = stmt
            .children()
            .filter(|child| child.kind() == SyntaxKind::VarRef)
            .collect();

        let mut element = subject_type.element_types();
        if element.is_empty() && !subject_type.is_empty() {
            element = TypeString::atom("mixed");
        }

        match bindings.as_slice() {
            [value] => {
                self.vars.set_type(&var_name(value), element);
            }
            [key, value] => {
                self.vars
                    .set_type(&var_name(key), TypeString::parse("int|string"));
                self.vars.set_type(&var_name(value), element);
            }
            _ => {}
        }
    }

    // =========================================================================
    // Expression resolution
    // =========================================================================

    /// Resolves the type of an expression node against the current state.
    pub(crate) fn resolve_expr(&mut self, node: &SyntaxNode) -> TypeString {
        if self.cancel.is_cancelled() {
            return TypeString::empty();
        }
        match node.kind() {
            SyntaxKind::VarRef => {
                let name = var_name(node);
                if name == "$this" {
                    self.current_class
                        .as_ref()
                        .map(|class| TypeString::atom(class.name.as_str()))
                        .unwrap_or_default()
                } else {
                    self.vars.get_type(&name)
                }
            }
            SyntaxKind::NameRef => {
                let written = reader::name_ref_text(node);
                let fqn = self.names.resolve(&written, NameKind::Constant);
                self.store
                    .find_kind(&fqn, SymbolKind::Constant)
                    .iter()
                    .fold(TypeString::empty(), |acc, symbol| {
                        acc.merge(&symbol.type_string)
                    })
            }
            SyntaxKind::Literal => reader::literal_type_of(node),
            SyntaxKind::ArrayExpr => TypeString::atom("array"),
            SyntaxKind::ClosureExpr => TypeString::atom("callable"),
            SyntaxKind::InstanceofExpr => TypeString::atom("bool"),
            SyntaxKind::ParenExpr => node
                .children()
                .find(|child| child.kind().is_expr())
                .map(|inner| self.resolve_expr(&inner))
                .unwrap_or_default(),
            SyntaxKind::AssignExpr => {
                let mut exprs = node.children().filter(|child| child.kind().is_expr());
                let _lhs = exprs.next();
                exprs
                    .next()
                    .map(|rhs| self.resolve_expr(&rhs))
                    .unwrap_or_default()
            }
            SyntaxKind::UnaryExpr => self.resolve_unary(node),
            SyntaxKind::BinaryExpr => self.resolve_binary(node),
            SyntaxKind::NewExpr => self.resolve_new(node),
            SyntaxKind::MemberExpr => self.resolve_member(node, MemberPrefer::Property),
            SyntaxKind::ScopedExpr => self.resolve_scoped(node, MemberPrefer::Constant),
            SyntaxKind::CallExpr => self.resolve_call(node),
            SyntaxKind::IndexExpr => {
                let element = node
                    .children()
                    .find(|child| child.kind().is_expr())
                    .map(|lhs| self.resolve_expr(&lhs))
                    .unwrap_or_default()
                    .element_types();
                element
            }
            _ => TypeString::empty(),
        }
    }

    fn resolve_unary(&mut self, node: &SyntaxNode) -> TypeString {
        let op = node
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| !token.kind().is_trivia());
        match op.map(|token| token.kind()) {
            Some(SyntaxKind::Bang) => TypeString::atom("bool"),
            _ => node
                .children()
                .find(|child| child.kind().is_expr())
                .map(|inner| self.resolve_expr(&inner))
                .unwrap_or_default(),
        }
    }

    fn resolve_binary(&mut self, node: &SyntaxNode) -> TypeString {
        let op = node
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| is_binary_op(token.kind()))
            .map(|token| token.kind());

        match op {
            Some(SyntaxKind::Dot) => TypeString::atom("string"),
            Some(
                SyntaxKind::EqEq
                | SyntaxKind::EqEqEq
                | SyntaxKind::BangEq
                | SyntaxKind::BangEqEq
                | SyntaxKind::Lt
                | SyntaxKind::LtEq
                | SyntaxKind::Gt
                | SyntaxKind::GtEq
                | SyntaxKind::AmpAmp
                | SyntaxKind::PipePipe,
            ) => TypeString::atom("bool"),
            Some(SyntaxKind::QuestionQuestion) => {
                let mut exprs = node.children().filter(|child| child.kind().is_expr());
                let lhs = exprs.next().map(|e| self.resolve_expr(&e)).unwrap_or_default();
                let rhs = exprs.next().map(|e| self.resolve_expr(&e)).unwrap_or_default();
                lhs.merge(&rhs)
            }
            Some(
                SyntaxKind::Plus
                | SyntaxKind::Minus
                | SyntaxKind::Star
                | SyntaxKind::Slash
                | SyntaxKind::Percent,
            ) => {
                let mut exprs = node.children().filter(|child| child.kind().is_expr());
                let lhs = exprs.next().map(|e| self.resolve_expr(&e)).unwrap_or_default();
                let rhs = exprs.next().map(|e| self.resolve_expr(&e)).unwrap_or_default();
                let has_float = |ty: &TypeString| {
                    ty.atoms().iter().any(|atom| atom.as_str() == "float")
                };
                if has_float(&lhs) || has_float(&rhs) {
                    TypeString::atom("float")
                } else {
                    TypeString::atom("int")
                }
            }
            _ => TypeString::empty(),
        }
    }

    fn resolve_new(&mut self, node: &SyntaxNode) -> TypeString {
        for child in node.children() {
            match child.kind() {
                SyntaxKind::NameRef => {
                    let fqn = self.class_fqn_of_name_ref(&child);
                    if !fqn.is_empty() {
                        return TypeString::atom(fqn.as_str());
                    }
                }
                SyntaxKind::VarRef => return self.resolve_expr(&child),
                _ => {}
            }
        }
        TypeString::empty()
    }

    fn resolve_member(&mut self, node: &SyntaxNode, prefer: MemberPrefer) -> TypeString {
        let Some(lhs) = node.children().find(|child| child.kind().is_expr()) else {
            return TypeString::empty();
        };
        let lhs_type = self.resolve_expr(&lhs);
        let Some(member) = member_name(node) else {
            return TypeString::empty();
        };
        self.member_type(&lhs_type, &member, prefer)
    }

    fn resolve_scoped(&mut self, node: &SyntaxNode, prefer: MemberPrefer) -> TypeString {
        let lhs_type = self.scoped_lhs_type(node);

        // The member is whatever follows the `::` token: `Foo::class`
        // evaluates to a class-name string, `Foo::$prop` is a static
        // property, and a plain name is a constant or method.
        let mut after_colons = false;
        for element in node.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(token) => {
                    if token.kind() == SyntaxKind::DoubleColon {
                        after_colons = true;
                    } else if after_colons && token.kind() == SyntaxKind::KwClass {
                        return TypeString::atom("string");
                    }
                }
                rowan::NodeOrToken::Node(member) if after_colons => {
                    return match member.kind() {
                        SyntaxKind::VarRef => {
                            let name = var_name(&member);
                            self.member_type(
                                &lhs_type,
                                name.trim_start_matches('$'),
                                MemberPrefer::Property,
                            )
                        }
                        SyntaxKind::Name => {
                            let name = member.text().to_string();
                            self.member_type(&lhs_type, name.trim(), prefer)
                        }
                        _ => TypeString::empty(),
                    };
                }
                rowan::NodeOrToken::Node(_) => {}
            }
        }
        TypeString::empty()
    }

    /// Resolves the class side of a `::` expression.
    fn scoped_lhs_type(&mut self, node: &SyntaxNode) -> TypeString {
        match node.children().next() {
            Some(lhs) if lhs.kind() == SyntaxKind::NameRef => {
                let fqn = self.class_fqn_of_name_ref(&lhs);
                if fqn.is_empty() {
                    TypeString::empty()
                } else {
                    TypeString::atom(fqn.as_str())
                }
            }
            Some(lhs) if lhs.kind().is_expr() => self.resolve_expr(&lhs),
            _ => TypeString::empty(),
        }
    }

    fn resolve_call(&mut self, node: &SyntaxNode) -> TypeString {
        let Some(callee) = node.children().find(|child| child.kind().is_expr()) else {
            return TypeString::empty();
        };
        match callee.kind() {
            SyntaxKind::MemberExpr => self.resolve_member(&callee, MemberPrefer::Method),
            SyntaxKind::ScopedExpr => self.resolve_scoped(&callee, MemberPrefer::Method),
            SyntaxKind::NameRef => {
                let written = reader::name_ref_text(&callee);
                let fqn = self.names.resolve(&written, NameKind::Function);
                self.store
                    .find_kind(&fqn, SymbolKind::Function)
                    .iter()
                    .fold(TypeString::empty(), |acc, symbol| {
                        acc.merge(&symbol.type_string)
                    })
            }
            _ => TypeString::empty(),
        }
    }

    /// Looks up a member across every atomic class of a union and merges
    /// the declared types. `self`/`static`/`$this` in member types bind to
    /// the queried class.
    fn member_type(&self, lhs: &TypeString, member: &str, prefer: MemberPrefer) -> TypeString {
        let mut result = TypeString::empty();
        for class_fqn in lhs.atomic_classes() {
            if self.cancel.is_cancelled() {
                return TypeString::empty();
            }
            let Ok(aggregate) = TypeAggregate::for_fqn(self.store, &class_fqn, &self.cancel)
            else {
                continue;
            };
            let members = aggregate.members(MergeStrategy::Override);
            let found = find_member(&members, member, prefer);
            if let Some(found) = found {
                result = result.merge(&found.type_string.bind_class(&class_fqn));
            }
        }
        result
    }

    /// Resolves a class name reference, honoring `self`, `static`, and
    /// `parent`.
    fn class_fqn_of_name_ref(&self, name_ref: &SyntaxNode) -> SmolStr {
        let written = reader::name_ref_text(name_ref);
        if written.eq_ignore_ascii_case("self") || written.eq_ignore_ascii_case("static") {
            return self
                .current_class
                .as_ref()
                .map(|class| class.name.clone())
                .unwrap_or_default();
        }
        if written.eq_ignore_ascii_case("parent") {
            return self.parent_class_fqn();
        }
        self.names.resolve(&written, NameKind::Class)
    }

    /// The extends target of the enclosing class: its first associated FQN
    /// that names a class, or the first associated FQN as a fallback.
    fn parent_class_fqn(&self) -> SmolStr {
        let Some(class) = &self.current_class else {
            return SmolStr::default();
        };
        for fqn in &class.associated {
            if !self
                .store
                .find_kind(fqn, SymbolKind::Class)
                .is_empty()
            {
                return fqn.clone();
            }
        }
        class.associated.first().cloned().unwrap_or_default()
    }
}

/// Finds a member by name with kind preference, falling back to any
/// member kind.
fn find_member<'m>(
    members: &'m [std::sync::Arc<Symbol>],
    name: &str,
    prefer: MemberPrefer,
) -> Option<&'m std::sync::Arc<Symbol>> {
    let matches_name = |member: &Symbol| {
        if member.kind.case_sensitive_name() {
            member.name == name
        } else {
            member.name.eq_ignore_ascii_case(name)
        }
    };
    let preferred_kind = match prefer {
        MemberPrefer::Property => SymbolKind::Property,
        MemberPrefer::Method => SymbolKind::Method,
        MemberPrefer::Constant => SymbolKind::ClassConstant,
    };
    members
        .iter()
        .find(|member| member.kind == preferred_kind && matches_name(member))
        .or_else(|| members.iter().find(|member| matches_name(member)))
}

/// Extracts the `$name` text of a `VarRef`.
fn var_name(var_ref: &SyntaxNode) -> SmolStr {
    var_ref
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == SyntaxKind::Variable)
        .map(|token| SmolStr::new(token.text()))
        .unwrap_or_default()
}

/// Extracts the member name after `->` or `::` (a `Name` child).
fn member_name(node: &SyntaxNode) -> Option<SmolStr> {
    node.children()
        .find(|child| child.kind() == SyntaxKind::Name)
        .map(|name| SmolStr::new(name.text().to_string().trim()))
}

fn is_binary_op(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::QuestionQuestion
            | SyntaxKind::PipePipe
            | SyntaxKind::AmpAmp
            | SyntaxKind::Pipe
            | SyntaxKind::Amp
            | SyntaxKind::EqEq
            | SyntaxKind::EqEqEq
            | SyntaxKind::BangEq
            | SyntaxKind::BangEqEq
            | SyntaxKind::Lt
            | SyntaxKind::LtEq
            | SyntaxKind::Gt
            | SyntaxKind::GtEq
            | SyntaxKind::Plus
            | SyntaxKind::Minus
            | SyntaxKind::Dot
            | SyntaxKind::Star
            | SyntaxKind::Slash
            | SyntaxKind::Percent
    )
}

fn is_stmt(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Block
            | SyntaxKind::IfStmt
            | SyntaxKind::ForeachStmt
            | SyntaxKind::WhileStmt
            | SyntaxKind::ForStmt
            | SyntaxKind::ReturnStmt
            | SyntaxKind::EchoStmt
            | SyntaxKind::ExprStmt
            | SyntaxKind::EmptyStmt
    )
}

/// The condition expression of an `if` statement.
fn if_condition(if_stmt: &SyntaxNode) -> Option<SyntaxNode> {
    if_stmt.children().find(|child| child.kind().is_expr())
}

/// The then-body of an `if` statement: the first statement child.
fn if_then_body(if_stmt: &SyntaxNode) -> Option<SyntaxNode> {
    if_stmt.children().find(|child| is_stmt(child.kind()))
}

/// The loop body of a `foreach`: its only statement child.
fn foreach_body(stmt: &SyntaxNode) -> Option<SyntaxNode> {
    stmt.children().find(|child| is_stmt(child.kind()))
}
