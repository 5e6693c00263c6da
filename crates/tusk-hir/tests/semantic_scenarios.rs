//! End-to-end semantic scenarios: documents in, answers out.

use tusk_hir::{
    CancellationToken, ContentChange, DocumentItem, Engine, MergeStrategy, Modifiers, SymbolKind,
    TypeString,
};
use tusk_syntax::LineCol;

fn item(uri: &str, text: &str) -> DocumentItem {
    DocumentItem {
        uri: uri.to_string(),
        language_id: "php".to_string(),
        text: text.to_string(),
        version: 1,
    }
}

/// Line/column of the first occurrence of `pattern` (ASCII sources only).
fn position_of(text: &str, pattern: &str) -> LineCol {
    let offset = text.find(pattern).expect("pattern present");
    let line = text[..offset].bytes().filter(|b| *b == b'\n').count() as u32;
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    LineCol {
        line,
        col: (offset - line_start) as u32,
    }
}

fn ty(text: &str) -> TypeString {
    TypeString::parse(text)
}

#[test]
fn import_alias_resolves_extends_target() {
    let mut engine = Engine::new();
    engine
        .open_document(item(
            "file:///f.php",
            "<?php\nnamespace A\\B;\nuse C\\D as E;\nclass F extends E\\G {}\n",
        ))
        .unwrap();

    let found = engine.store().find_kind("A\\B\\F", SymbolKind::Class);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].associated[0], "C\\D\\G");
}

#[test]
fn group_imports_with_kinds() {
    let mut engine = Engine::new();
    engine
        .open_document(item(
            "file:///f.php",
            "<?php\nnamespace App;\nuse Vendor\\Pkg\\{Client, Util as U, function helper};\nclass Api extends Client { }\nclass Tool extends U {}\n",
        ))
        .unwrap();

    let api = &engine.store().find_kind("App\\Api", SymbolKind::Class)[0];
    assert_eq!(api.associated[0], "Vendor\\Pkg\\Client");
    let tool = &engine.store().find_kind("App\\Tool", SymbolKind::Class)[0];
    assert_eq!(tool.associated[0], "Vendor\\Pkg\\Util");
}

#[test]
fn inherited_member_keeps_declared_type() {
    let mut engine = Engine::new();
    engine
        .open_document(item(
            "file:///f.php",
            "<?php class Base { public function m(): int {} } class Sub extends Base {}",
        ))
        .unwrap();

    let agg = engine
        .aggregate("Sub", &CancellationToken::new())
        .unwrap();
    let members = agg.members(MergeStrategy::Override);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "m");
    assert_eq!(members[0].type_string, ty("int"));
}

#[test]
fn docblock_synthesizes_magic_property() {
    let mut engine = Engine::new();
    engine
        .open_document(item(
            "file:///f.php",
            "<?php\n/** @property string $x */\nclass C {}\n",
        ))
        .unwrap();

    let agg = engine.aggregate("C", &CancellationToken::new()).unwrap();
    let members = agg.members(MergeStrategy::Override);
    assert_eq!(members.len(), 1);
    let magic = &members[0];
    assert_eq!(magic.kind, SymbolKind::Property);
    assert_eq!(magic.name, "x");
    assert_eq!(magic.type_string, ty("string"));
    assert!(magic.modifiers.contains(Modifiers::MAGIC));
    assert!(magic.modifiers.contains(Modifiers::PUBLIC));
}

#[test]
fn assignment_binds_variable_to_constructed_class() {
    let source = "<?php\nclass Foo { public function bar(): int {} }\n$a = new Foo();\n$a->bar();\n";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    let var_type = engine.resolve_type("file:///f.php", position_of(source, "$a->bar"), &cancel);
    assert_eq!(var_type, ty("Foo"));

    // Member completion pulls from the aggregate of the resolved class.
    let agg = engine.aggregate("Foo", &cancel).unwrap();
    assert!(agg.member("bar").is_some());

    let member_type =
        engine.resolve_type("file:///f.php", position_of(source, "bar();"), &cancel);
    assert_eq!(member_type, ty("int"));
}

#[test]
fn instanceof_refines_by_branch() {
    let source = "<?php
class Baz {}
class Bar {}
function f(Baz $x) {
    if ($x instanceof Bar) {
        $x; // then
    } else {
        $x; // else
    }
    $x; // after
}
";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    let then_type = engine.resolve_type("file:///f.php", position_of(source, "$x; // then"), &cancel);
    assert_eq!(then_type, ty("Bar"));

    let else_type = engine.resolve_type("file:///f.php", position_of(source, "$x; // else"), &cancel);
    assert_eq!(else_type, ty("Baz"));

    let after_type =
        engine.resolve_type("file:///f.php", position_of(source, "$x; // after"), &cancel);
    assert_eq!(after_type, ty("Baz|Bar"));
}

#[test]
fn duplicate_fqn_across_documents() {
    let mut engine = Engine::new();
    engine
        .open_document(item("file:///one.php", "<?php namespace X; class Y {}"))
        .unwrap();
    engine
        .open_document(item("file:///two.php", "<?php namespace X; class Y {}"))
        .unwrap();

    assert_eq!(engine.store().find_kind("X\\Y", SymbolKind::Class).len(), 2);

    engine.close_document("file:///one.php").unwrap();
    let left = engine.store().find_kind("X\\Y", SymbolKind::Class);
    assert_eq!(left.len(), 1);
    assert_eq!(&*left[0].location.uri, "file:///two.php");
}

#[test]
fn foreach_over_typed_property() {
    let source = "<?php
class Item { public function label(): string {} }
class Box {
    /** @var Item[] */
    public $items;
    public function first() {
        foreach ($this->items as $item) {
            $item; // caret
        }
    }
}
";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    let element =
        engine.resolve_type("file:///f.php", position_of(source, "$item; // caret"), &cancel);
    assert_eq!(element, ty("Item"));
}

#[test]
fn foreach_key_and_unknown_element() {
    let source = "<?php
function f(array $rows) {
    foreach ($rows as $k => $row) {
        $k; // key
        $row; // value
    }
}
";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    assert_eq!(
        engine.resolve_type("file:///f.php", position_of(source, "$k; // key"), &cancel),
        ty("int|string")
    );
    assert_eq!(
        engine.resolve_type("file:///f.php", position_of(source, "$row; // value"), &cancel),
        ty("mixed")
    );
}

#[test]
fn method_chain_resolves_through_aggregate() {
    let source = "<?php
class Item { public function label(): string {} }
class Factory {
    public function make(): Item {}
    public function demo() {
        $this->make()->label(); // caret
    }
}
";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    let chained =
        engine.resolve_type("file:///f.php", position_of(source, "label(); // caret"), &cancel);
    assert_eq!(chained, ty("string"));
}

#[test]
fn static_members_and_class_constants() {
    let source = "<?php
class Config {
    const LIMIT = 25;
    public static function instance(): Config {}
}
function f() {
    Config::LIMIT; // const
    Config::instance(); // call
}
";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    assert_eq!(
        engine.resolve_type("file:///f.php", position_of(source, "LIMIT; // const"), &cancel),
        ty("int")
    );
    assert_eq!(
        engine.resolve_type(
            "file:///f.php",
            position_of(source, "instance(); // call"),
            &cancel
        ),
        ty("Config")
    );
}

#[test]
fn trait_members_reach_using_class() {
    let source = "<?php
trait Greets { public function hello(): string {} }
class Host {
    use Greets;
    public function demo() {
        $this->hello(); // caret
    }
}
";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    assert_eq!(
        engine.resolve_type("file:///f.php", position_of(source, "hello(); // caret"), &cancel),
        ty("string")
    );
}

#[test]
fn cancelled_query_returns_empty() {
    let source = "<?php class Foo {} $a = new Foo();\n$a; // caret\n";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(engine
        .resolve_type("file:///f.php", position_of(source, "$a; // caret"), &cancel)
        .is_empty());
}

#[test]
fn edit_then_flush_updates_answers() {
    let mut engine = Engine::new();
    engine
        .open_document(item(
            "file:///f.php",
            "<?php class A { public function m(): int {} }",
        ))
        .unwrap();

    engine
        .edit_document(
            "file:///f.php",
            2,
            &[ContentChange {
                range: None,
                text: "<?php class A { public function m(): string {} }".to_string(),
            }],
        )
        .unwrap();
    engine.flush("file:///f.php").unwrap();

    let agg = engine.aggregate("A", &CancellationToken::new()).unwrap();
    assert_eq!(agg.member("m").unwrap().type_string, ty("string"));
}

#[test]
fn docblock_param_unions_with_hint() {
    let source = "<?php
/** @param string $mixed widens the hint */
function f(int $mixed) {
    $mixed; // caret
}
";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    assert_eq!(
        engine.resolve_type("file:///f.php", position_of(source, "$mixed; // caret"), &cancel),
        ty("int|string")
    );
}

#[test]
fn namespaced_function_call_resolves_return_type() {
    let source = "<?php
namespace App;
class Conn {}
function connect(): Conn {}
function demo() {
    $c = connect();
    $c; // caret
}
";
    let mut engine = Engine::new();
    engine.open_document(item("file:///f.php", source)).unwrap();

    let cancel = CancellationToken::new();
    assert_eq!(
        engine.resolve_type("file:///f.php", position_of(source, "$c; // caret"), &cancel),
        ty("App\\Conn")
    );
}
