//! Per-element TypeScript writers.

use std::fmt::Write as _;

use crate::config::GenerationConfig;
use crate::errors::Result;
use crate::model::{CodeModel, MethodKind, NodeId, NodeKind, TypeRef};
use crate::ordering::{ElementOrderComparer, FunctionPlacement, ParameterOrderComparer};
use crate::paths::PathPolicy;
use crate::render::{LanguageConventionService, LanguageWriter, default_barrel_rule};

use super::conventions::TypeScriptConventions;

/// Fixed header stamped at the top of every generated file.
const GENERATED_HEADER: &str = "// Generated by Quill. Do not edit.";

/// Serializes model elements as TypeScript source.
#[derive(Debug)]
pub struct TypeScriptWriter {
    conventions: TypeScriptConventions,
    members: ElementOrderComparer,
    parameters: ParameterOrderComparer,
}

impl TypeScriptWriter {
    pub fn new() -> Self {
        Self {
            conventions: TypeScriptConventions::new(),
            members: ElementOrderComparer::new(FunctionPlacement::BeforeTypes),
            parameters: ParameterOrderComparer::new(),
        }
    }

    fn sorted_children(&self, model: &CodeModel, element: NodeId) -> Vec<NodeId> {
        let mut children: Vec<NodeId> = model.children(element).to_vec();
        self.members.sort(model, &mut children);
        children
    }

    fn write_imports(&self, model: &CodeModel, element: NodeId, out: &mut String) -> Result<()> {
        let mut usings: Vec<NodeId> = model
            .children(element)
            .iter()
            .copied()
            .filter(|&c| matches!(model.kind(c), NodeKind::Using { .. }))
            .collect();
        usings.sort_by_key(|&u| model.name(u).to_string());
        for using in &usings {
            if let NodeKind::Using {
                source_namespace, ..
            } = model.kind(*using)
            {
                writeln!(
                    out,
                    "import {{ {} }} from '{}';",
                    model.name(*using),
                    module_specifier(source_namespace)
                )?;
            }
        }
        if !usings.is_empty() {
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_class(&self, model: &CodeModel, class: NodeId, out: &mut String) -> Result<()> {
        self.write_imports(model, class, out)?;
        let name = self.conventions.escape_identifier(model.name(class));
        let mut heading = format!("export class {}", name);
        if let Some(base) = model.base_class(class) {
            write!(
                heading,
                " extends {}",
                self.conventions.escape_identifier(model.name(base))
            )?;
        }
        let interfaces = model.implemented_interfaces(class);
        if !interfaces.is_empty() {
            let spelled: Vec<String> = interfaces
                .iter()
                .map(|&i| self.conventions.escape_identifier(model.name(i)))
                .collect();
            write!(heading, " implements {}", spelled.join(", "))?;
        }
        writeln!(out, "{} {{", heading)?;
        for member in self.sorted_children(model, class) {
            match model.kind(member) {
                NodeKind::Property { ty, .. } => {
                    writeln!(
                        out,
                        "    public {}: {};",
                        self.conventions.escape_identifier(model.name(member)),
                        self.conventions.type_string(model, ty)
                    )?;
                }
                NodeKind::Indexer {
                    index_type,
                    return_type,
                } => {
                    writeln!(
                        out,
                        "    [key: {}]: {};",
                        self.conventions.type_string(model, index_type),
                        self.conventions.type_string(model, return_type)
                    )?;
                }
                NodeKind::Method { kind, return_type } => {
                    self.write_method(model, member, *kind, return_type, out)?;
                }
                // Imports were written above; nested types get their own
                // files in per-declaration mode.
                _ => {}
            }
        }
        writeln!(out, "}}")?;
        Ok(())
    }

    fn write_method(
        &self,
        model: &CodeModel,
        method: NodeId,
        kind: MethodKind,
        return_type: &TypeRef,
        out: &mut String,
    ) -> Result<()> {
        let params = self.parameter_list(model, method);
        match kind {
            MethodKind::Constructor => {
                writeln!(out, "    public constructor({}) {{", params)?;
                writeln!(out, "    }}")?;
            }
            _ => {
                writeln!(
                    out,
                    "    public {}({}): {} {{",
                    self.conventions.escape_identifier(model.name(method)),
                    params,
                    self.conventions.type_string(model, return_type)
                )?;
                writeln!(out, "        throw new Error('not implemented');")?;
                writeln!(out, "    }}")?;
            }
        }
        Ok(())
    }

    fn write_interface(&self, model: &CodeModel, interface: NodeId, out: &mut String) -> Result<()> {
        self.write_imports(model, interface, out)?;
        let name = self.conventions.escape_identifier(model.name(interface));
        let mut heading = format!("export interface {}", name);
        let extends = model.implemented_interfaces(interface);
        if !extends.is_empty() {
            let spelled: Vec<String> = extends
                .iter()
                .map(|&i| self.conventions.escape_identifier(model.name(i)))
                .collect();
            write!(heading, " extends {}", spelled.join(", "))?;
        }
        writeln!(out, "{} {{", heading)?;
        for member in self.sorted_children(model, interface) {
            match model.kind(member) {
                NodeKind::Property { ty, .. } => {
                    writeln!(
                        out,
                        "    {}: {};",
                        self.conventions.escape_identifier(model.name(member)),
                        self.conventions.type_string(model, ty)
                    )?;
                }
                NodeKind::Method { return_type, .. } => {
                    writeln!(
                        out,
                        "    {}({}): {};",
                        self.conventions.escape_identifier(model.name(member)),
                        self.parameter_list(model, member),
                        self.conventions.type_string(model, return_type)
                    )?;
                }
                _ => {}
            }
        }
        writeln!(out, "}}")?;
        Ok(())
    }

    fn write_enum(&self, model: &CodeModel, decl: NodeId, out: &mut String) -> Result<()> {
        writeln!(
            out,
            "export enum {} {{",
            self.conventions.escape_identifier(model.name(decl))
        )?;
        for member in model.children(decl) {
            if matches!(model.kind(*member), NodeKind::EnumMember) {
                writeln!(
                    out,
                    "    {} = \"{}\",",
                    self.conventions.escape_identifier(model.name(*member)),
                    model.name(*member)
                )?;
            }
        }
        writeln!(out, "}}")?;
        Ok(())
    }

    fn write_function(&self, model: &CodeModel, func: NodeId, out: &mut String) -> Result<()> {
        let NodeKind::Function { return_type } = model.kind(func) else {
            return Ok(());
        };
        writeln!(
            out,
            "export function {}({}): {} {{",
            self.conventions.escape_identifier(model.name(func)),
            self.parameter_list(model, func),
            self.conventions.type_string(model, return_type)
        )?;
        writeln!(out, "    throw new Error('not implemented');")?;
        writeln!(out, "}}")?;
        Ok(())
    }

    /// One bundled declaration's body, without the per-file header.
    fn write_bundled(&self, model: &CodeModel, declaration: NodeId, out: &mut String) -> Result<()> {
        match model.kind(declaration) {
            NodeKind::Class { .. } => self.write_class(model, declaration, out),
            NodeKind::Interface { .. } => self.write_interface(model, declaration, out),
            NodeKind::Enum => self.write_enum(model, declaration, out),
            NodeKind::Function { .. } => self.write_function(model, declaration, out),
            // Nested file groups would re-enter the bundle; skipped.
            other => {
                tracing::debug!(kind = other.label(), "skipping non-declaration in file bundle");
                Ok(())
            }
        }
    }

    fn write_barrel(&self, model: &CodeModel, namespace: NodeId, out: &mut String) -> Result<()> {
        let mut stems: Vec<String> = model
            .children(namespace)
            .iter()
            .copied()
            .filter(|&c| model.kind(c).is_declaration())
            .map(|c| self.conventions.normalize_file_name(model.name(c)))
            .collect();
        stems.sort();
        stems.dedup();
        for stem in stems {
            writeln!(out, "export * from './{}';", stem)?;
        }
        Ok(())
    }

    fn parameter_list(&self, model: &CodeModel, callable: NodeId) -> String {
        let mut params: Vec<NodeId> = model
            .children(callable)
            .iter()
            .copied()
            .filter(|&c| matches!(model.kind(c), NodeKind::Parameter { .. }))
            .collect();
        self.parameters.sort(model, &mut params);
        params
            .iter()
            .map(|&p| {
                let NodeKind::Parameter { ty, optional, .. } = model.kind(p) else {
                    return String::new();
                };
                format!(
                    "{}{}: {}",
                    self.conventions.escape_identifier(model.name(p)),
                    if *optional { "?" } else { "" },
                    self.conventions.type_string(model, ty)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Spell the module a using imports from: scoped package names pass through,
/// model namespaces become lowercase path specifiers.
fn module_specifier(source_namespace: &str) -> String {
    if source_namespace.starts_with('@') || source_namespace.starts_with('.') {
        source_namespace.to_string()
    } else {
        let path: Vec<String> = source_namespace
            .split('.')
            .map(str::to_ascii_lowercase)
            .collect();
        format!("./{}", path.join("/"))
    }
}

impl LanguageWriter for TypeScriptWriter {
    fn path_policy(&self) -> &dyn PathPolicy {
        &self.conventions
    }

    fn function_placement(&self) -> FunctionPlacement {
        FunctionPlacement::BeforeTypes
    }

    fn write(&self, model: &CodeModel, element: NodeId, out: &mut String) -> Result<()> {
        match model.kind(element) {
            NodeKind::Namespace => {
                writeln!(out, "{}", GENERATED_HEADER)?;
                self.write_barrel(model, element, out)
            }
            NodeKind::File { bundled } => {
                writeln!(out, "{}", GENERATED_HEADER)?;
                for &declaration in bundled {
                    self.write_bundled(model, declaration, out)?;
                }
                Ok(())
            }
            NodeKind::Class { .. } => {
                writeln!(out, "{}", GENERATED_HEADER)?;
                self.write_class(model, element, out)
            }
            NodeKind::Interface { .. } => {
                writeln!(out, "{}", GENERATED_HEADER)?;
                self.write_interface(model, element, out)
            }
            NodeKind::Enum => {
                writeln!(out, "{}", GENERATED_HEADER)?;
                self.write_enum(model, element, out)
            }
            NodeKind::Function { .. } => {
                writeln!(out, "{}", GENERATED_HEADER)?;
                self.write_function(model, element, out)
            }
            NodeKind::Using {
                source_namespace, ..
            } => {
                // Namespace-level usings surface in single-file mode.
                writeln!(
                    out,
                    "import {{ {} }} from '{}';",
                    model.name(element),
                    module_specifier(source_namespace)
                )?;
                Ok(())
            }
            other => {
                tracing::debug!(kind = other.label(), "no standalone writer for element kind");
                Ok(())
            }
        }
    }

    /// TypeScript barrels are restricted to the models subtree and require
    /// at least one interface declared directly or transitively, on top of
    /// the default same-name suppression.
    fn should_render_namespace_file(
        &self,
        model: &CodeModel,
        namespace: NodeId,
        config: &GenerationConfig,
    ) -> bool {
        let Some(models) = model.find_namespace(&config.models_namespace) else {
            return false;
        };
        let in_subtree =
            namespace == models || model.ancestors(namespace).any(|a| a == models);
        if !in_subtree {
            return false;
        }
        let has_interface = model
            .descendants(namespace)
            .any(|n| matches!(model.kind(n), NodeKind::Interface { .. }));
        if !has_interface {
            return false;
        }
        default_barrel_rule(model, namespace, config)
    }
}
