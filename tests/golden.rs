//! End-to-end scenarios covering the statement, expression, declaration,
//! and builtin translators, plus their documented error boundaries
//! (dedent-below-zero, long-bracket-close rejection, range-over-non-
//! rangeable, non-identifier combined-assign LHS). Each test builds a
//! snippet's AST by hand against a stub `ProgramView`, translates it, and
//! compares the emitted text.

use lunar_go::ast::*;
use lunar_go::node::NodeId;
use lunar_go::objects::{Object, ValueCategory};
use lunar_go::testutil::FakeProgram;
use lunar_go::translate::Node;
use lunar_go::types::{BasicKind, MethodInfo, NamedType, StructField, StructType, Type};
use lunar_go::{CoreError, Translator};
use pretty_assertions::assert_eq;

fn run(program: &FakeProgram, block: &[Stmt]) -> String {
    let mut translator = Translator::new(program);
    let mut buf = Vec::new();
    translator.translate_node(&mut buf, Node::Block(block)).unwrap();
    String::from_utf8(buf).unwrap()
}

fn ident(id: NodeId, name: &str) -> Expr {
    Expr::ident(id, name)
}

fn int_lit(id: NodeId, v: &str) -> Expr {
    Expr::BasicLit { id, lit: Literal::Int(v.to_string()) }
}

#[test]
fn scenario_1_short_var_decl() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let a = p.next_id();
    let v = p.next_id();
    let block = [Stmt::Assign {
        lhs: vec![ident(a, "a")],
        rhs: vec![int_lit(v, "5")],
        op: AssignOp::Define,
    }];
    assert_eq!(run(&p, &block), "local a = 5\n");
}

#[test]
fn scenario_2_combined_assign_desugars() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let a = p.next_id();
    let b = p.next_id();
    let block = [Stmt::Assign {
        lhs: vec![ident(a, "a")],
        rhs: vec![ident(b, "b")],
        op: AssignOp::AddAssign,
    }];
    assert_eq!(run(&p, &block), "a = a + b\n");
}

#[test]
fn scenario_2b_combined_assign_uses_concat_for_strings() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let a = p.next_id();
    let b = p.next_id();
    p.set_type(a, Type::Basic(BasicKind::String), ValueCategory::Variable);
    let block = [Stmt::Assign {
        lhs: vec![ident(a, "a")],
        rhs: vec![ident(b, "b")],
        op: AssignOp::AddAssign,
    }];
    assert_eq!(run(&p, &block), "a = a .. b\n");
}

#[test]
fn scenario_3_not_equal() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let a = p.next_id();
    let b = p.next_id();
    let block = [Stmt::ExprStmt(Expr::Binary {
        op: BinaryOp::NotEq,
        x: Box::new(ident(a, "a")),
        y: Box::new(ident(b, "b")),
    })];
    assert_eq!(run(&p, &block), "a ~= b\n");
}

#[test]
fn scenario_4_return_multiple() {
    let p = FakeProgram::new("dummy", "dummy");
    let mut gen = lunar_go::NodeIdGen::new();
    let block = [Stmt::Return(Some(vec![
        int_lit(gen.next(), "3"),
        int_lit(gen.next(), "2"),
    ]))];
    assert_eq!(run(&p, &block), "return 3, 2\n");
}

#[test]
fn scenario_5_if_elseif_else() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let a1 = p.next_id();
    let three = p.next_id();
    let b1 = p.next_id();
    let five = p.next_id();
    let foo = p.next_id();
    let a2 = p.next_id();
    let a3 = p.next_id();
    let three2 = p.next_id();
    let bar = p.next_id();
    let b2 = p.next_id();
    let moo = p.next_id();

    let cond = Expr::Binary {
        op: BinaryOp::LOr,
        x: Box::new(Expr::Binary {
            op: BinaryOp::Lss,
            x: Box::new(ident(a1, "a")),
            y: Box::new(int_lit(three, "3")),
        }),
        y: Box::new(Expr::Binary {
            op: BinaryOp::Gtr,
            x: Box::new(ident(b1, "b")),
            y: Box::new(int_lit(five, "5")),
        }),
    };
    let then_body = vec![Stmt::ExprStmt(Expr::Call {
        id: p_next(&mut p),
        func: Box::new(ident(foo, "foo")),
        args: vec![ident(a2, "a")],
        ellipsis: false,
    })];
    let elif_cond = Expr::Binary {
        op: BinaryOp::Eq,
        x: Box::new(ident(a3, "a")),
        y: Box::new(int_lit(three2, "3")),
    };
    let elif_body = vec![Stmt::ExprStmt(Expr::Call {
        id: p_next(&mut p),
        func: Box::new(ident(bar, "bar")),
        args: vec![ident(b2, "b")],
        ellipsis: false,
    })];
    let else_body = Stmt::Block(vec![Stmt::ExprStmt(Expr::Call {
        id: p_next(&mut p),
        func: Box::new(ident(moo, "moo")),
        args: vec![],
        ellipsis: false,
    })]);
    let stmt = Stmt::If {
        cond,
        body: then_body,
        else_: Some(Box::new(Stmt::If {
            cond: elif_cond,
            body: elif_body,
            else_: Some(Box::new(else_body)),
        })),
    };
    assert_eq!(
        run(&p, &[stmt]),
        "if a < 3 or b > 5 then\n\tfoo(a)\nelseif a == 3 then\n\tbar(b)\nelse\n\tmoo()\nend\n"
    );
}

fn p_next(p: &mut FakeProgram) -> NodeId {
    p.next_id()
}

#[test]
fn scenario_6_range_over_slice() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let foo_decl = p.next_id();
    let elt_a = p.next_id();
    let elt_b = p.next_id();
    let foo_use = p.next_id();
    let println_id = p.next_id();
    let a_arg = p.next_id();
    let b_arg = p.next_id();
    let call_id = p.next_id();

    let string_ty = Type::Basic(BasicKind::String);
    let slice_ty = Type::Slice(Box::new(string_ty));
    p.set_type(foo_use, slice_ty.clone(), ValueCategory::Variable);

    let decl = Stmt::Assign {
        lhs: vec![ident(foo_decl, "foo")],
        rhs: vec![Expr::CompositeLit {
            id: p.next_id(),
            ty: slice_ty,
            elts: vec![
                CompositeElt::Positional(Expr::BasicLit { id: elt_a, lit: Literal::String("a".into()) }),
                CompositeElt::Positional(Expr::BasicLit { id: elt_b, lit: Literal::String("b".into()) }),
            ],
        }],
        op: AssignOp::Define,
    };
    let range = Stmt::Range {
        key: Some("a".into()),
        value: Some("b".into()),
        define: true,
        expr: ident(foo_use, "foo"),
        body: vec![Stmt::ExprStmt(Expr::Call {
            id: call_id,
            func: Box::new(ident(println_id, "println")),
            args: vec![ident(a_arg, "a"), ident(b_arg, "b")],
            ellipsis: false,
        })],
    };
    assert_eq!(
        run(&p, &[decl, range]),
        "local foo = { \"a\", \"b\" }\nfor a, b in ipairs(foo or {}) do\n\tprintln(a, b)\nend\n"
    );
}

#[test]
fn scenario_7_range_over_map() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let foo_decl = p.next_id();
    let foo_use = p.next_id();
    let println_id = p.next_id();
    let k_arg = p.next_id();
    let v_arg = p.next_id();
    let call_id = p.next_id();

    let int_ty = Type::Basic(BasicKind::Int);
    let map_ty = Type::Map(Box::new(int_ty.clone()), Box::new(int_ty));
    p.set_type(foo_use, map_ty.clone(), ValueCategory::Variable);

    let decl = Stmt::Assign {
        lhs: vec![ident(foo_decl, "foo")],
        rhs: vec![Expr::CompositeLit {
            id: p.next_id(),
            ty: map_ty,
            elts: vec![
                CompositeElt::Keyed("5".into(), int_lit(p.next_id(), "3")),
                CompositeElt::Keyed("3".into(), int_lit(p.next_id(), "2")),
            ],
        }],
        op: AssignOp::Define,
    };
    let range = Stmt::Range {
        key: Some("k".into()),
        value: Some("v".into()),
        define: true,
        expr: ident(foo_use, "foo"),
        body: vec![Stmt::ExprStmt(Expr::Call {
            id: call_id,
            func: Box::new(ident(println_id, "println")),
            args: vec![ident(k_arg, "k"), ident(v_arg, "v")],
            ellipsis: false,
        })],
    };
    assert_eq!(
        run(&p, &[decl, range]),
        "local foo = { [5] = 3, [3] = 2 }\nfor k, v in pairs(foo or {}) do\n\tprintln(k, v)\nend\n"
    );
}

#[test]
fn scenario_8_method_decl_on_struct() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let type_node = p.next_id();
    let func_node = p.next_id();
    let ret_lit = p.next_id();

    let type_decl = Decl::Type(TypeSpec {
        node: type_node,
        name: "foo".into(),
        ty: Type::Struct(StructType { fields: vec![] }),
    });
    let func_decl = Decl::Func(FuncDecl {
        node: func_node,
        name: "Bar".into(),
        receiver: Some(Receiver { name: "f".into(), type_name: "foo".into() }),
        params: vec![],
        variadic: false,
        body: vec![Stmt::Return(Some(vec![int_lit(ret_lit, "5")]))],
        doc: CommentGroup::default(),
    });

    let mut translator = Translator::new(&p).with_test_pkg_name("dummy");
    let mut buf = Vec::new();
    translator.translate_node(&mut buf, Node::Decl(&type_decl)).unwrap();
    translator.translate_node(&mut buf, Node::Decl(&func_decl)).unwrap();
    let out = String::from_utf8(buf).unwrap();

    assert!(out.starts_with("_dummy.foo = {}\n"), "got: {out}");
    assert!(out.contains("_dummy.foo._createFromTable"), "got: {out}");
    assert!(out.contains("_dummy.foo._initializeFromTable"), "got: {out}");
    assert!(out.contains("_dummy.foo.Bar = function(f)\n\treturn 5\nend\n"), "got: {out}");
}

#[test]
fn dedent_below_zero_is_fatal() {
    let result = std::panic::catch_unwind(|| {
        let mut buf = Vec::new();
        let mut w = lunar_go::writer::Writer::new(&mut buf);
        w.dedent();
    });
    assert!(result.is_err());
}

#[test]
fn long_comment_containing_close_bracket_fails() {
    let mut buf = Vec::new();
    let mut w = lunar_go::writer::Writer::new(&mut buf);
    let doc = CommentGroup(vec![Comment::Block("contains ]=] inside".into())]);
    let err = lunar_go::translate::comment::translate_comment_group(&mut w, NodeId(0), &doc).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Translate(lunar_go::TranslateError {
            kind: lunar_go::TranslateErrorKind::CommentContainsLongBracketClose,
            ..
        })
    ));
}

#[test]
fn range_over_non_rangeable_type_fails() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let x = p.next_id();
    p.set_type(x, Type::Basic(BasicKind::Int), ValueCategory::Variable);
    let range = Stmt::Range {
        key: Some("k".into()),
        value: None,
        define: true,
        expr: ident(x, "x"),
        body: vec![],
    };
    let mut translator = Translator::new(&p);
    let mut buf = Vec::new();
    let err = translator.translate_node(&mut buf, Node::Block(&[range])).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Translate(lunar_go::TranslateError {
            kind: lunar_go::TranslateErrorKind::RangeOverNonRangeable,
            ..
        })
    ));
}

#[test]
fn combined_assign_to_non_identifier_fails() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let lit = p.next_id();
    let rhs = p.next_id();
    let block = [Stmt::Assign {
        lhs: vec![int_lit(lit, "1")],
        rhs: vec![int_lit(rhs, "2")],
        op: AssignOp::AddAssign,
    }];
    let mut translator = Translator::new(&p);
    let mut buf = Vec::new();
    let err = translator.translate_node(&mut buf, Node::Block(&block)).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Translate(lunar_go::TranslateError {
            kind: lunar_go::TranslateErrorKind::InvalidAssignLhs,
            ..
        })
    ));
}

#[test]
fn struct_literal_with_pointer_method_gets_metatable_wrap() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let lit_id = p.next_id();
    let name_val = p.next_id();

    let named = Type::Named(NamedType {
        name: "Counter".into(),
        pkg_path: Some("dummy".into()),
        underlying: Box::new(Type::Struct(StructType {
            fields: vec![StructField { name: "Name".into(), ty: Type::Basic(BasicKind::String), tag: String::new() }],
        })),
        methods: vec![MethodInfo { name: "Inc".into(), pointer_receiver: true }],
    });

    let block = [Stmt::ExprStmt(Expr::CompositeLit {
        id: lit_id,
        ty: named,
        elts: vec![CompositeElt::Keyed("Name".into(), Expr::BasicLit { id: name_val, lit: Literal::String("a".into()) })],
    })];
    assert_eq!(
        run(&p, &block),
        "setmetatable({ [\"Name\"] = \"a\" }, { __index = _dummy.Counter })\n"
    );
}

#[test]
fn package_level_identifier_is_qualified() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let id = p.next_id();
    p.set_use(
        id,
        Object::Variable { pkg: Some("dummy".into()), is_field: false, package_level: true },
    );
    let block = [Stmt::ExprStmt(ident(id, "Counter"))];
    assert_eq!(run(&p, &block), "_dummy.Counter\n");
}

#[test]
fn function_local_identifier_is_not_qualified() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let id = p.next_id();
    p.set_use(
        id,
        Object::Variable { pkg: Some("dummy".into()), is_field: false, package_level: false },
    );
    let block = [Stmt::ExprStmt(ident(id, "x"))];
    assert_eq!(run(&p, &block), "x\n");
}

#[test]
fn raw_call_splices_string_args_verbatim() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let pkg_id = p.next_id();
    p.set_use(
        pkg_id,
        Object::PackageName { path: lunar_go::translate::RAW_PKG_PATH.to_string(), name: "lua".into() },
    );
    let call = Expr::Call {
        id: p.next_id(),
        func: Box::new(Expr::Selector {
            id: p.next_id(),
            x: Box::new(ident(pkg_id, "lua")),
            sel: "Raw".into(),
        }),
        args: vec![Expr::BasicLit { id: p.next_id(), lit: Literal::String("do_stuff()".into()) }],
        ellipsis: false,
    };
    let block = [Stmt::ExprStmt(call)];
    assert_eq!(run(&p, &block), "do_stuff()\n");
}

#[test]
fn append_and_delete_route_through_builtins() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let foo = p.next_id();
    let val = p.next_id();
    let append_id = p.next_id();
    p.set_type(append_id, Type::Basic(BasicKind::Int), ValueCategory::Builtin);
    let append_call = Expr::Call {
        id: p.next_id(),
        func: Box::new(ident(append_id, "append")),
        args: vec![ident(foo, "foo"), int_lit(val, "1")],
        ellipsis: false,
    };
    let block = [Stmt::ExprStmt(append_call)];
    assert_eq!(run(&p, &block), "builtins.append(foo, 1)\n");

    let mut p = FakeProgram::new("dummy", "dummy");
    let foo = p.next_id();
    let key = p.next_id();
    let delete_id = p.next_id();
    p.set_type(delete_id, Type::Basic(BasicKind::Int), ValueCategory::Builtin);
    let delete_call = Expr::Call {
        id: p.next_id(),
        func: Box::new(ident(delete_id, "delete")),
        args: vec![ident(foo, "foo"), int_lit(key, "1")],
        ellipsis: false,
    };
    let block = [Stmt::ExprStmt(delete_call)];
    assert_eq!(run(&p, &block), "builtins.delete(foo, 1)\n");
}

#[test]
fn panic_and_len_emit_runtime_calls() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let msg = p.next_id();
    let panic_id = p.next_id();
    p.set_type(panic_id, Type::Basic(BasicKind::Int), ValueCategory::Builtin);
    let panic_call = Expr::Call {
        id: p.next_id(),
        func: Box::new(ident(panic_id, "panic")),
        args: vec![Expr::BasicLit { id: msg, lit: Literal::String("boom".into()) }],
        ellipsis: false,
    };
    let block = [Stmt::ExprStmt(panic_call)];
    assert_eq!(run(&p, &block), "error(\"boom\")\n");

    let mut p = FakeProgram::new("dummy", "dummy");
    let foo = p.next_id();
    let len_id = p.next_id();
    p.set_type(foo, Type::Slice(Box::new(Type::Basic(BasicKind::Int))), ValueCategory::Variable);
    p.set_type(len_id, Type::Basic(BasicKind::Int), ValueCategory::Builtin);
    let len_call = Expr::Call {
        id: p.next_id(),
        func: Box::new(ident(len_id, "len")),
        args: vec![ident(foo, "foo")],
        ellipsis: false,
    };
    let block = [Stmt::ExprStmt(len_call)];
    assert_eq!(run(&p, &block), "builtins.length(foo)\n");

    let mut p = FakeProgram::new("dummy", "dummy");
    let foo = p.next_id();
    let len_id = p.next_id();
    p.set_type(
        foo,
        Type::Map(Box::new(Type::Basic(BasicKind::Int)), Box::new(Type::Basic(BasicKind::Int))),
        ValueCategory::Variable,
    );
    p.set_type(len_id, Type::Basic(BasicKind::Int), ValueCategory::Builtin);
    let len_call = Expr::Call {
        id: p.next_id(),
        func: Box::new(ident(len_id, "len")),
        args: vec![ident(foo, "foo")],
        ellipsis: false,
    };
    let block = [Stmt::ExprStmt(len_call)];
    assert_eq!(run(&p, &block), "builtins.mapLength(foo)\n");
}

#[test]
fn variadic_call_forwards_with_unpack() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let rest = p.next_id();
    let call = Expr::Call {
        id: p.next_id(),
        func: Box::new(ident(p.next_id(), "foo")),
        args: vec![ident(rest, "rest")],
        ellipsis: true,
    };
    let block = [Stmt::ExprStmt(call)];
    assert_eq!(run(&p, &block), "foo(unpack(rest))\n");
}

#[test]
fn import_decl_binds_local_name_from_package_table() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let import = Decl::Import(ImportSpec {
        node: p.next_id(),
        path: "example.com/other".into(),
        pkg_name: "other".into(),
        alias: None,
        anonymous: false,
        dot: false,
    });
    let mut translator = Translator::new(&p).with_test_pkg_name("dummy");
    let mut buf = Vec::new();
    translator.translate_node(&mut buf, Node::Decl(&import)).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "local _other = _G[\"example.com/other\"]\n"
    );
}

#[test]
fn value_spec_decl_emits_package_qualified_assignment() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let node = p.next_id();
    let init = p.next_id();
    let value = Decl::Value(ValueSpec {
        node,
        names: vec!["Count".into()],
        ty: None,
        values: vec![int_lit(init, "0")],
    });
    let mut translator = Translator::new(&p).with_test_pkg_name("dummy");
    let mut buf = Vec::new();
    translator.translate_node(&mut buf, Node::Decl(&value)).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "_dummy.Count = 0\n");
}

#[test]
fn init_func_registers_without_assignment() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let node = p.next_id();
    let ret = p.next_id();
    let func = Decl::Func(FuncDecl {
        node,
        name: "init".into(),
        receiver: None,
        params: vec![],
        variadic: false,
        body: vec![Stmt::ExprStmt(int_lit(ret, "1"))],
        doc: CommentGroup::default(),
    });
    let mut translator = Translator::new(&p).with_test_pkg_name("dummy");
    let mut buf = Vec::new();
    translator.translate_node(&mut buf, Node::Decl(&func)).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(out, "builtins.add_init(function()\n\t1\nend)\n");
    assert!(!out.contains("_dummy.init"), "got: {out}");
}

#[test]
fn method_expression_selector_creates_closure() {
    let mut p = FakeProgram::new("dummy", "dummy");
    let recv_id = p.next_id();
    let named = Type::Named(NamedType {
        name: "Counter".into(),
        pkg_path: Some("dummy".into()),
        underlying: Box::new(Type::Struct(StructType { fields: vec![] })),
        methods: vec![MethodInfo { name: "Inc".into(), pointer_receiver: true }],
    });
    p.set_type(recv_id, named, ValueCategory::Variable);
    let block = [Stmt::ExprStmt(Expr::Selector {
        id: p.next_id(),
        x: Box::new(ident(recv_id, "c")),
        sel: "Inc".into(),
    })];
    assert_eq!(run(&p, &block), "builtins.create_closure(c, \"Inc\")\n");
}
