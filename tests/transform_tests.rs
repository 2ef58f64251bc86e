//! Integration tests for request-time invocation of composed
//! transformers — ordering, nesting, cycles, context plumbing, and
//! fail-fast error propagation.

use std::sync::{Arc, Mutex};

use graphql_input_transform::{
    compile_sdl, CompileConfig, CompileOptions, CompiledSchema, Owner, RequestContext,
    TransformError, TransformerRegistry,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn trim_registry() -> TransformerRegistry {
    TransformerRegistry::new().register("trim", |value, _args, _ctx| async move {
        Ok(match value {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other,
        })
    })
}

fn compile(sdl: &str, registry: TransformerRegistry) -> CompiledSchema {
    compile_sdl(sdl, &CompileConfig::shared(registry)).expect("compile should succeed")
}

#[tokio::test]
async fn test_zero_directives_is_identity() {
    let compiled = compile(
        "input Foo { name: String, age: Int, tags: [String] }",
        TransformerRegistry::new(),
    );

    let input = json!({ "name": " raw ", "age": 3, "tags": ["a", "b"] });
    let out = compiled.inputs["Foo"]
        .transform(input.clone(), RequestContext::new())
        .await
        .unwrap();
    assert_eq!(out, input);
}

#[tokio::test]
async fn test_field_chain_runs_in_declared_order() {
    let log = Arc::new(Mutex::new(Vec::<String>::new()));
    let mut registry = TransformerRegistry::new();
    for name in ["a", "b", "c"] {
        let log = Arc::clone(&log);
        registry = registry.register(name, move |value, _args, _ctx| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push(name.to_string());
                match value {
                    Value::String(s) => Ok(Value::String(format!("{s}.{name}"))),
                    other => Ok(other),
                }
            }
        });
    }

    let compiled = compile("input T { f: String @a @b @c }", registry);
    let out = compiled.inputs["T"]
        .transform(json!({ "f": "x" }), RequestContext::new())
        .await
        .unwrap();

    // Each transformer received the prior one's output.
    assert_eq!(out, json!({ "f": "x.a.b.c" }));
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_trim_end_to_end() {
    let compiled = compile("input Foo { name: String @trim, age: Int }", trim_registry());

    let out = compiled.inputs["Foo"]
        .transform(json!({ "name": "  x  ", "age": 3 }), RequestContext::new())
        .await
        .unwrap();
    assert_eq!(out, json!({ "name": "x", "age": 3 }));
}

#[tokio::test]
async fn test_forward_reference_resolves() {
    // Bar references Foo before Foo is declared.
    let compiled = compile(
        "input Bar { inner: Foo } input Foo { name: String @trim, age: Int }",
        trim_registry(),
    );

    let out = compiled.inputs["Bar"]
        .transform(
            json!({ "inner": { "name": " y ", "age": 1 } }),
            RequestContext::new(),
        )
        .await
        .unwrap();
    assert_eq!(out, json!({ "inner": { "name": "y", "age": 1 } }));
}

#[tokio::test]
async fn test_mutual_reference_terminates_on_value_shape() {
    // The type graph is cyclic; recursion terminates because the data is
    // acyclic.
    let compiled = compile(
        "input A { name: String @trim, b: B } input B { note: String @trim, a: A }",
        trim_registry(),
    );

    let out = compiled.inputs["A"]
        .transform(
            json!({ "name": " x ", "b": { "note": " n ", "a": { "name": " z " } } }),
            RequestContext::new(),
        )
        .await
        .unwrap();
    assert_eq!(
        out,
        json!({ "name": "x", "b": { "note": "n", "a": { "name": "z" } } })
    );
}

#[tokio::test]
async fn test_object_validators_run_after_field_pipelines() {
    let log = Arc::new(Mutex::new(Vec::<String>::new()));

    let field_log = Arc::clone(&log);
    let object_log = Arc::clone(&log);
    let registry = TransformerRegistry::new()
        .register("trim", move |value, _args, _ctx| {
            let log = Arc::clone(&field_log);
            async move {
                log.lock().unwrap().push("field".to_string());
                Ok(match value {
                    Value::String(s) => Value::String(s.trim().to_string()),
                    other => other,
                })
            }
        })
        .register("seal", move |value, _args, _ctx| {
            let log = Arc::clone(&object_log);
            async move {
                log.lock().unwrap().push("object".to_string());
                // The field pipeline has fully settled by now.
                let mut object = match value {
                    Value::Object(entries) => entries,
                    other => return Ok(other),
                };
                object.insert("sealed".to_string(), Value::Bool(true));
                Ok(Value::Object(object))
            }
        });

    let compiled = compile("input T @seal { name: String @trim }", registry);
    let out = compiled.inputs["T"]
        .transform(json!({ "name": " x " }), RequestContext::new())
        .await
        .unwrap();

    assert_eq!(out, json!({ "name": "x", "sealed": true }));
    assert_eq!(*log.lock().unwrap(), vec!["field", "object"]);
}

#[tokio::test]
async fn test_list_of_custom_applies_per_element() {
    let compiled = compile(
        "input Team { members: [Member] } input Member { name: String @trim }",
        trim_registry(),
    );

    let out = compiled.inputs["Team"]
        .transform(
            json!({ "members": [{ "name": " a " }, { "name": " b " }] }),
            RequestContext::new(),
        )
        .await
        .unwrap();
    assert_eq!(out, json!({ "members": [{ "name": "a" }, { "name": "b" }] }));
}

#[tokio::test]
async fn test_null_nested_value_passes_through() {
    let compiled = compile(
        "input Outer { inner: Inner } input Inner { name: String @trim }",
        trim_registry(),
    );

    let out = compiled.inputs["Outer"]
        .transform(json!({ "inner": null }), RequestContext::new())
        .await
        .unwrap();
    assert_eq!(out, json!({ "inner": null }));
}

#[tokio::test]
async fn test_transformer_error_fails_fast() {
    let log = Arc::new(Mutex::new(Vec::<String>::new()));
    let after_log = Arc::clone(&log);
    let registry = TransformerRegistry::new()
        .register("boom", |_value, _args, _ctx| async move {
            Err::<Value, _>(TransformError::message("boom"))
        })
        .register("after", move |value, _args, _ctx| {
            let log = Arc::clone(&after_log);
            async move {
                log.lock().unwrap().push("after".to_string());
                Ok(value)
            }
        });

    let compiled = compile("input T { f: String @boom @after }", registry);
    let err = compiled.inputs["T"]
        .transform(json!({ "f": "x" }), RequestContext::new())
        .await
        .unwrap_err();

    // The error propagates unchanged and the rest of the chain never ran.
    match err {
        TransformError::Message(message) => assert_eq!(message, "boom"),
        other => panic!("expected Message, got: {other:?}"),
    }
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_context_carries_descriptor_request_and_config() {
    let registry = TransformerRegistry::new().register("describe", |_value, _args, ctx| {
        let rendered = match &ctx.owner {
            Owner::Field {
                object,
                field,
                type_ref,
            } => format!(
                "{}.{}:{} locale={} user={}",
                object,
                field,
                type_ref.name,
                ctx.config["locale"].as_str().unwrap_or("?"),
                ctx.request["user"].as_str().unwrap_or("?"),
            ),
            Owner::Object { object } => format!("object {object}"),
        };
        async move { Ok(Value::String(rendered)) }
    });

    let config = CompileConfig::shared(registry).with_options(CompileOptions {
        context: json!({ "locale": "en" }).as_object().unwrap().clone(),
        ..CompileOptions::default()
    });
    let compiled = compile_sdl("input T { f: String @describe }", &config).unwrap();

    let request: RequestContext = json!({ "user": "u1" }).as_object().unwrap().clone();
    let out = compiled.inputs["T"]
        .transform(json!({ "f": "ignored" }), request)
        .await
        .unwrap();
    assert_eq!(out, json!({ "f": "T.f:String locale=en user=u1" }));
}

#[tokio::test]
async fn test_static_args_reach_the_transformer() {
    let registry = TransformerRegistry::new().register("pad", |value, args, _ctx| async move {
        let width = args["width"].as_i64().unwrap_or(0) as usize;
        Ok(match value {
            Value::String(s) => Value::String(format!("{s:>width$}")),
            other => other,
        })
    });

    let compiled = compile("input T { f: String @pad(width: 5) }", registry);
    let out = compiled.inputs["T"]
        .transform(json!({ "f": "x" }), RequestContext::new())
        .await
        .unwrap();
    assert_eq!(out, json!({ "f": "    x" }));
}

#[tokio::test]
async fn test_undeclared_value_key_is_rejected() {
    let compiled = compile("input T { f: String }", TransformerRegistry::new());

    let err = compiled.inputs["T"]
        .transform(json!({ "g": 1 }), RequestContext::new())
        .await
        .unwrap_err();
    match err {
        TransformError::UnknownField { type_name, field } => {
            assert_eq!(type_name, "T");
            assert_eq!(field, "g");
        }
        other => panic!("expected UnknownField, got: {other:?}"),
    }
}
