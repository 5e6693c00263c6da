//! Signature help for call sites.

use smol_str::SmolStr;
use text_size::TextSize;

use tusk_hir::type_resolver;
use tusk_hir::{
    CancellationToken, Engine, MergeStrategy, NameKind, Symbol, SymbolKind, TypeAggregate,
};
use tusk_syntax::{LineCol, SyntaxKind, SyntaxNode};

use crate::util::{name_ref_text, static_receiver_type, token_at};

/// One parameter of a signature.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    /// Rendered parameter label, e.g. `int $id`.
    pub label: SmolStr,
}

/// A callable signature.
#[derive(Debug, Clone)]
pub struct SignatureInfo {
    /// Rendered signature label.
    pub label: SmolStr,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterInfo>,
    /// Documentation from the callable's docblock.
    pub documentation: Option<SmolStr>,
}

/// Signature help for a call site.
#[derive(Debug, Clone)]
pub struct SignatureHelp {
    /// Available signatures (usually one).
    pub signatures: Vec<SignatureInfo>,
    /// Index of the active signature.
    pub active_signature: usize,
    /// Index of the active parameter, from the comma count at the caret.
    pub active_parameter: usize,
}

/// Computes signature help at a position inside an argument list.
#[must_use]
pub fn signature_help(
    engine: &Engine,
    uri: &str,
    position: LineCol,
    cancel: &CancellationToken,
) -> Option<SignatureHelp> {
    let document = engine.document(uri)?;
    let root = document.parse().syntax();
    let offset = document.offset(position);

    let token = token_at(&root, offset)?;
    let arg_list = token
        .parent_ancestors()
        .find(|node| node.kind() == SyntaxKind::ArgList)?;
    let call = arg_list.parent()?;

    let callable = match call.kind() {
        SyntaxKind::CallExpr => {
            let callee = call.children().find(|child| child.kind().is_expr())?;
            resolve_callee(engine, document.symbols(), &callee, cancel)?
        }
        SyntaxKind::NewExpr => {
            let name_ref = call
                .children()
                .find(|child| child.kind() == SyntaxKind::NameRef)?;
            let class_type = static_receiver_type(document.symbols(), &name_ref);
            let class_fqn = class_type.atomic_classes().into_iter().next()?;
            let aggregate = TypeAggregate::for_fqn(engine.store(), &class_fqn, cancel).ok()?;
            aggregate
                .members(MergeStrategy::Override)
                .into_iter()
                .find(|member| {
                    member.kind == SymbolKind::Method
                        && member.name.eq_ignore_ascii_case("__construct")
                })?
        }
        _ => return None,
    };

    let active_parameter = comma_count_before(&arg_list, offset);
    let signature = render_signature(&callable);

    Some(SignatureHelp {
        signatures: vec![signature],
        active_signature: 0,
        active_parameter,
    })
}

/// Resolves the callable symbol a call expression targets.
fn resolve_callee(
    engine: &Engine,
    doc: &tusk_hir::DocumentSymbols,
    callee: &SyntaxNode,
    cancel: &CancellationToken,
) -> Option<std::sync::Arc<Symbol>> {
    match callee.kind() {
        SyntaxKind::NameRef => {
            let written = name_ref_text(callee);
            let resolver = doc.resolver_at(callee.text_range().start());
            let fqn = resolver.resolve(&written, NameKind::Function);
            engine
                .store()
                .find_kind(&fqn, SymbolKind::Function)
                .into_iter()
                .next()
        }
        SyntaxKind::MemberExpr | SyntaxKind::ScopedExpr => {
            let receiver = callee.children().find(|child| child.kind().is_expr())?;
            let receiver_type =
                if callee.kind() == SyntaxKind::ScopedExpr && receiver.kind() == SyntaxKind::NameRef
                {
                    static_receiver_type(doc, &receiver)
                } else {
                    type_resolver::resolve_node(engine.store(), doc, &receiver, cancel)
                };
            let member = callee
                .children()
                .find(|child| child.kind() == SyntaxKind::Name)
                .map(|name| name.text().to_string().trim().to_string())?;

            for class_fqn in receiver_type.atomic_classes() {
                let Ok(aggregate) = TypeAggregate::for_fqn(engine.store(), &class_fqn, cancel)
                else {
                    continue;
                };
                if let Some(found) = aggregate
                    .members(MergeStrategy::Override)
                    .into_iter()
                    .find(|candidate| {
                        candidate.kind == SymbolKind::Method
                            && candidate.name.eq_ignore_ascii_case(&member)
                    })
                {
                    return Some(found);
                }
            }
            None
        }
        _ => None,
    }
}

/// Renders `name(type $a, type $b): ret` with one entry per parameter.
fn render_signature(callable: &Symbol) -> SignatureInfo {
    let mut parameters = Vec::new();
    let mut rendered: Vec<String> = Vec::new();
    for param in callable
        .children
        .iter()
        .filter(|child| child.kind == SymbolKind::Parameter)
    {
        let label = if param.type_string.is_empty() {
            param.name.to_string()
        } else {
            format!("{} {}", param.type_string, param.name)
        };
        rendered.push(label.clone());
        parameters.push(ParameterInfo {
            label: SmolStr::new(label),
        });
    }

    let mut label = format!("{}({})", callable.short_name(), rendered.join(", "));
    if !callable.type_string.is_empty() {
        label.push_str(&format!(": {}", callable.type_string));
    }

    SignatureInfo {
        label: SmolStr::new(label),
        parameters,
        documentation: (!callable.description.is_empty())
            .then(|| callable.description.clone()),
    }
}

/// Counts top-level commas of the argument list before `offset`.
fn comma_count_before(arg_list: &SyntaxNode, offset: TextSize) -> usize {
    arg_list
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| {
            token.kind() == SyntaxKind::Comma && token.text_range().end() <= offset
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tusk_hir::DocumentItem;

    fn engine_with(text: &str) -> Engine {
        let mut engine = Engine::new();
        engine
            .open_document(DocumentItem {
                uri: "file:///t.php".to_string(),
                language_id: "php".to_string(),
                text: text.to_string(),
                version: 1,
            })
            .unwrap();
        engine
    }

    fn caret(text: &str, pattern: &str) -> LineCol {
        let offset = text.find(pattern).expect("pattern") + pattern.len();
        let line = text[..offset].bytes().filter(|b| *b == b'\n').count() as u32;
        let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
        LineCol {
            line,
            col: (offset - line_start) as u32,
        }
    }

    #[test]
    fn test_function_signature_and_active_parameter() {
        let text = "<?php
/** Adds two numbers. */
function add(int $a, int $b): int {}
add(1,
";
        let engine = engine_with(text);
        let help = signature_help(
            &engine,
            "file:///t.php",
            caret(text, "add(1,"),
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(help.signatures.len(), 1);
        assert_eq!(help.signatures[0].label, "add(int $a, int $b): int");
        assert_eq!(help.active_parameter, 1);
        assert_eq!(
            help.signatures[0].documentation.as_deref(),
            Some("Adds two numbers.")
        );
    }

    #[test]
    fn test_method_signature() {
        let text = "<?php
class Mailer {
    public function send(string $to, string $body): bool {}
}
$m = new Mailer();
$m->send(
";
        let engine = engine_with(text);
        let help = signature_help(
            &engine,
            "file:///t.php",
            caret(text, "$m->send("),
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(
            help.signatures[0].label,
            "send(string $to, string $body): bool"
        );
        assert_eq!(help.active_parameter, 0);
    }
}
