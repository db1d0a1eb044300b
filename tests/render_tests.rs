//! Filesystem-level rendering tests.
//!
//! These drive the renderer end to end against temporary directories and
//! assert on what actually lands on disk: file layout, visiting order,
//! cancellation behavior, and byte-level determinism across reruns.

use std::fs;
use std::path::Path;

use quill::languages::typescript::TypeScriptWriter;
use quill::model::{CodeModel, MethodKind, NodeId, NodeKind, PropertyKind, TypeRef};
use quill::{CancellationToken, CodeRenderer, GenError, GenerationConfig, GenerationLanguage};

fn class_kind() -> NodeKind {
    NodeKind::Class {
        base: None,
        implements: Vec::new(),
    }
}

/// A small client surface: one interface, a base class, a derived class,
/// and an enum, all under the models namespace.
fn sample_model() -> CodeModel {
    let mut model = CodeModel::new("ApiSdk").unwrap();
    let models = model.ensure_namespace("Models").unwrap();
    model
        .add_child(models, "Parsable", NodeKind::Interface { extends: Vec::new() })
        .unwrap();
    let entity = model.add_child(models, "Entity", class_kind()).unwrap();
    let user = model.add_child(models, "User", class_kind()).unwrap();
    model.set_base(user, entity).unwrap();
    model
        .add_child(
            user,
            "id",
            NodeKind::Property {
                kind: PropertyKind::Custom,
                ty: TypeRef::named("string"),
            },
        )
        .unwrap();
    model
        .add_child(
            user,
            "constructor",
            NodeKind::Method {
                kind: MethodKind::Constructor,
                return_type: TypeRef::void(),
            },
        )
        .unwrap();
    let color = model.add_child(models, "Color", NodeKind::Enum).unwrap();
    model.add_child(color, "red", NodeKind::EnumMember).unwrap();
    model
}

fn ts_config(output: &Path) -> GenerationConfig {
    GenerationConfig::new(GenerationLanguage::TypeScript, output)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("missing {}: {}", path.display(), e))
}

#[test]
fn test_per_declaration_mode_writes_one_file_per_declaration() {
    let dir = tempfile::tempdir().unwrap();
    let model = sample_model();
    let config = ts_config(dir.path());
    let writer = TypeScriptWriter::new();
    CodeRenderer::new(&config, &writer).render(&model).unwrap();

    let models_dir = dir.path().join("apisdk/models");
    for stem in ["parsable", "entity", "user", "color"] {
        assert!(
            models_dir.join(format!("{}.ts", stem)).is_file(),
            "expected {}.ts under {}",
            stem,
            models_dir.display()
        );
    }

    let user = read(&models_dir.join("user.ts"));
    assert!(user.contains("export class User extends Entity {"));
    assert!(user.contains("public id: string;"));
}

#[test]
fn test_models_namespace_gets_a_barrel_file() {
    let dir = tempfile::tempdir().unwrap();
    let model = sample_model();
    let config = ts_config(dir.path());
    let writer = TypeScriptWriter::new();
    CodeRenderer::new(&config, &writer).render(&model).unwrap();

    let barrel = read(&dir.path().join("apisdk/models/index.ts"));
    assert!(barrel.contains("export * from './user';"));
    assert!(barrel.contains("export * from './entity';"));
    // The root namespace sits outside the models subtree, so no root barrel.
    assert!(!dir.path().join("apisdk/index.ts").exists());
}

#[test]
fn test_declaration_order_visits_base_classes_first() {
    let mut model = CodeModel::new("ApiSdk").unwrap();
    let models = model.ensure_namespace("Models").unwrap();
    // Name order would put Apple first; inheritance order must win the
    // class slots.
    let zebra = model.add_child(models, "Zebra", class_kind()).unwrap();
    let apple = model.add_child(models, "Apple", class_kind()).unwrap();
    model.set_base(apple, zebra).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let config = ts_config(dir.path());
    let writer = TypeScriptWriter::new();
    let renderer = CodeRenderer::new(&config, &writer);

    let order = renderer.declaration_order(&model, models).unwrap();
    let classes: Vec<NodeId> = order
        .into_iter()
        .filter(|&d| matches!(model.kind(d), NodeKind::Class { .. }))
        .collect();
    assert_eq!(classes, vec![zebra, apple]);
}

#[test]
fn test_file_grouping_node_renders_its_bundle() {
    let mut model = CodeModel::new("ApiSdk").unwrap();
    let models = model.ensure_namespace("Models").unwrap();
    let alpha = model.add_child(models, "Alpha", class_kind()).unwrap();
    let beta = model.add_child(models, "Beta", class_kind()).unwrap();
    let file = model
        .add_child(models, "SharedModels", NodeKind::File { bundled: Vec::new() })
        .unwrap();
    model.bundle_into_file(file, alpha).unwrap();
    model.bundle_into_file(file, beta).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let config = ts_config(dir.path());
    let writer = TypeScriptWriter::new();
    CodeRenderer::new(&config, &writer).render(&model).unwrap();

    let text = read(&dir.path().join("apisdk/models/sharedModels.ts"));
    assert_eq!(text.matches("// Generated by Quill. Do not edit.").count(), 1);
    assert!(text.contains("export class Alpha {"));
    assert!(text.contains("export class Beta {"));
    // Bundled declarations stay owned by the namespace and keep their own
    // files too.
    assert!(dir.path().join("apisdk/models/alpha.ts").is_file());
}

#[test]
fn test_cancelled_token_aborts_before_any_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let model = sample_model();
    let config = ts_config(dir.path());
    let writer = TypeScriptWriter::new();
    let token = CancellationToken::new();
    token.cancel();

    let err = CodeRenderer::new(&config, &writer)
        .with_cancellation(token)
        .render(&model)
        .unwrap_err();
    assert!(matches!(err, GenError::Cancelled));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_single_file_mode_writes_exactly_one_stream() {
    let dir = tempfile::tempdir().unwrap();
    let model = sample_model();
    let mut config = ts_config(dir.path());
    config.single_file = true;
    let writer = TypeScriptWriter::new();
    CodeRenderer::new(&config, &writer).render(&model).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "single-file mode must emit one file");

    let text = read(&dir.path().join("index.ts"));
    assert!(text.contains("export interface Parsable {"));
    assert!(text.contains("export class Entity {"));
    assert!(text.contains("export class User extends Entity {"));
    assert!(text.contains("export enum Color {"));
}

#[test]
fn test_rerun_output_is_byte_identical() {
    let model = sample_model();
    let writer = TypeScriptWriter::new();

    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    for dir in [&first, &second] {
        let config = ts_config(dir.path());
        CodeRenderer::new(&config, &writer).render(&model).unwrap();
    }

    for relative in ["apisdk/models/user.ts", "apisdk/models/index.ts"] {
        let a = fs::read(first.path().join(relative)).unwrap();
        let b = fs::read(second.path().join(relative)).unwrap();
        assert_eq!(a, b, "{} differs between reruns", relative);
    }
}
