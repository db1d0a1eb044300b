//! Walking the refined tree and driving per-element writers.
//!
//! Two emission modes:
//!
//! - **Single file**: the whole tree goes into one stream, in comparer
//!   order. Namespaces are traversed but never written.
//! - **Per declaration file**: every class, interface, enum, function, or
//!   file-grouping node gets its own file at the segmenter's path; nested
//!   namespaces recurse; namespace barrel files are emitted when the
//!   writer's barrel rule says so.
//!
//! Per-declaration rendering of a read-only tree is embarrassingly
//! parallel, so sibling declarations render on the rayon pool. Cancellation
//! is cooperative: checked before each file begins, never mid-write, so no
//! stream is left half-flushed.

pub mod writer;

pub use writer::{LanguageConventionService, LanguageWriter, default_barrel_rule};

use std::fs;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use rayon::prelude::*;

use crate::cancellation::CancellationToken;
use crate::config::GenerationConfig;
use crate::errors::{GenError, Result};
use crate::model::{CodeModel, NodeId, NodeKind};
use crate::ordering::{ElementOrderComparer, sort_classes_by_inheritance};
use crate::paths::PathSegmenter;

/// Orchestrates writers over the refined tree.
pub struct CodeRenderer<'a> {
    config: &'a GenerationConfig,
    writer: &'a dyn LanguageWriter,
    comparer: ElementOrderComparer,
    cancellation: CancellationToken,
}

impl<'a> CodeRenderer<'a> {
    pub fn new(config: &'a GenerationConfig, writer: &'a dyn LanguageWriter) -> Self {
        Self {
            config,
            writer,
            comparer: ElementOrderComparer::new(writer.function_placement()),
            cancellation: CancellationToken::new(),
        }
    }

    /// Observe an external cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Render the whole model per the configured mode.
    pub fn render(&self, model: &CodeModel) -> Result<()> {
        if self.config.single_file {
            let file_name = format!(
                "{}{}",
                self.writer.path_policy().barrel_file_stem(),
                self.writer.path_policy().file_suffix()
            );
            self.render_single_file(model, model.root(), Path::new(&file_name))
        } else {
            self.render_tree(model, model.root())
        }
    }

    // ========================================================================
    // Single-file mode
    // ========================================================================

    /// Serialize the subtree at `element` into one file at `relative_path`
    /// (joined onto the output root), in comparer order.
    pub fn render_single_file(
        &self,
        model: &CodeModel,
        element: NodeId,
        relative_path: &Path,
    ) -> Result<()> {
        if relative_path.as_os_str().is_empty() {
            return Err(GenError::invalid_argument("output path is required"));
        }
        self.check_cancelled()?;
        let mut out = String::new();
        self.visit_single(model, element, &mut out)?;
        self.write_file(relative_path, &out)
    }

    fn visit_single(&self, model: &CodeModel, element: NodeId, out: &mut String) -> Result<()> {
        if matches!(model.kind(element), NodeKind::Namespace) {
            // Grouping node: traversed, never written.
            let mut children: Vec<NodeId> = model.children(element).to_vec();
            self.comparer.sort(model, &mut children);
            for child in children {
                self.visit_single(model, child, out)?;
            }
            Ok(())
        } else {
            self.writer.write(model, element, out)
        }
    }

    // ========================================================================
    // Per-declaration-file mode
    // ========================================================================

    /// Render every declaration under `namespace` into its own file,
    /// recursing into nested namespaces.
    pub fn render_tree(&self, model: &CodeModel, namespace: NodeId) -> Result<()> {
        if !matches!(model.kind(namespace), NodeKind::Namespace) {
            return Err(GenError::invalid_argument(format!(
                "expected a namespace, got a {}",
                model.kind(namespace).label()
            )));
        }
        let declarations = self.declaration_order(model, namespace)?;

        // Independent files over a read-only tree: fan out on the pool.
        declarations
            .par_iter()
            .try_for_each(|&decl| self.render_declaration_file(model, namespace, decl))?;

        if self
            .writer
            .should_render_namespace_file(model, namespace, self.config)
        {
            self.check_cancelled()?;
            let segmenter =
                PathSegmenter::new(self.writer.path_policy(), self.config.max_path_length);
            let path = segmenter.get_barrel_path(model, namespace)?;
            let mut out = String::new();
            self.writer.write(model, namespace, &mut out)?;
            self.write_file(&path, &out)?;
        }

        for &child in model.children(namespace) {
            if matches!(model.kind(child), NodeKind::Namespace) {
                self.render_tree(model, child)?;
            }
        }
        Ok(())
    }

    /// The deterministic visiting order for a namespace's declarations:
    /// comparer order, with the class subsequence rearranged so every base
    /// class is visited before its derived classes.
    pub fn declaration_order(&self, model: &CodeModel, namespace: NodeId) -> Result<Vec<NodeId>> {
        let mut declarations: Vec<NodeId> = model
            .children(namespace)
            .iter()
            .copied()
            .filter(|&c| model.kind(c).is_declaration())
            .collect();
        self.comparer.sort(model, &mut declarations);

        let by_inheritance = sort_classes_by_inheritance(model, namespace)?;
        let mut next_class = by_inheritance.into_iter();
        let ordered = declarations
            .into_iter()
            .filter_map(|d| {
                if matches!(model.kind(d), NodeKind::Class { .. }) {
                    // Slots stay where the comparer put classes; occupants
                    // follow inheritance order. Duplicate names were dropped
                    // by the de-dup pass, shrinking the class count.
                    next_class.next()
                } else {
                    Some(d)
                }
            })
            .collect();
        Ok(ordered)
    }

    fn render_declaration_file(
        &self,
        model: &CodeModel,
        namespace: NodeId,
        declaration: NodeId,
    ) -> Result<()> {
        self.check_cancelled()?;
        let segmenter = PathSegmenter::new(self.writer.path_policy(), self.config.max_path_length);
        let path = segmenter.get_path(model, namespace, declaration, true)?;
        let mut out = String::new();
        self.writer.write(model, declaration, &mut out)?;
        self.write_file(&path, &out)
    }

    // ========================================================================
    // File plumbing
    // ========================================================================

    /// Create-or-truncate `relative_path` under the output root and flush
    /// the full content before returning.
    fn write_file(&self, relative_path: &Path, content: &str) -> Result<()> {
        let full = self.config.output_root.join(relative_path);
        if let Some(parent) = full.parent() {
            // Idempotent and race-safe under the worker pool.
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&full)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        tracing::debug!(path = %full.display(), bytes = content.len(), "wrote output file");
        Ok(())
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancellation.is_cancelled() {
            Err(GenError::Cancelled)
        } else {
            Ok(())
        }
    }
}
