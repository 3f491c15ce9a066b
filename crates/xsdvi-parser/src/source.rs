//! Collecting the documents that make up a schema.
//!
//! Loading starts from one document and follows its `xs:include`,
//! `xs:redefine` and `xs:import` elements that carry a local
//! `schemaLocation`, each file at most once.

use std::{
    collections::{HashSet, VecDeque},
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Label},
    span::Span,
    xsd::{self, local_name, xsd_children},
};

/// Display name of a document loaded from text.
const TEXT_SOURCE_NAME: &str = "<input>";

/// The text of one schema document.
#[derive(Debug, Clone)]
pub(crate) struct SchemaSource {
    pub name: String,
    pub path: Option<PathBuf>,
    pub text: String,
    /// Target namespace of the including document, applied when the
    /// document declares none of its own.
    pub inherited_namespace: Option<String>,
}

impl SchemaSource {
    pub fn from_text(text: &str) -> Self {
        Self {
            name: TEXT_SOURCE_NAME.to_string(),
            path: None,
            text: text.to_string(),
            inherited_namespace: None,
        }
    }

    pub fn from_file(path: &Path, text: String) -> Self {
        Self {
            name: path.display().to_string(),
            path: Some(path.to_path_buf()),
            text,
            inherited_namespace: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceKind {
    Include,
    Import,
}

/// A `schemaLocation` reference found in a document.
#[derive(Debug)]
struct Reference {
    kind: ReferenceKind,
    location: String,
    span: Span,
}

/// What a well-formed schema document contributes to loading.
struct Checked {
    target_namespace: Option<String>,
    references: Vec<Reference>,
}

/// Reads the main document and every document it references.
///
/// Problems with the main document are fatal. Problems with a referenced
/// document skip that document only.
pub(crate) fn collect_sources(
    main: SchemaSource,
    collector: &mut DiagnosticCollector,
) -> Vec<SchemaSource> {
    let mut sources = Vec::new();
    let mut seen = HashSet::new();
    if let Some(path) = &main.path {
        seen.insert(canonical(path));
    }

    let mut queue = VecDeque::from([main]);
    while let Some(source) = queue.pop_front() {
        let is_main = sources.is_empty();
        let Some(checked) = check_document(&source, is_main, collector) else {
            if is_main {
                return sources;
            }
            continue;
        };
        debug!(document = source.name, references = checked.references.len(); "Read schema document");

        let namespace = checked
            .target_namespace
            .clone()
            .or_else(|| source.inherited_namespace.clone());
        for reference in checked.references {
            let context = ReferenceContext {
                source: &source,
                is_main,
                namespace: namespace.as_ref(),
            };
            let Some(included) = read_reference(&context, &reference, &mut seen, collector) else {
                continue;
            };
            queue.push_back(included);
        }
        sources.push(source);
    }
    sources
}

/// Parses `source` and checks that it is a schema document.
fn check_document(
    source: &SchemaSource,
    is_main: bool,
    collector: &mut DiagnosticCollector,
) -> Option<Checked> {
    let located = |diagnostic: Diagnostic| {
        if is_main {
            diagnostic
        } else {
            diagnostic.in_document(&source.name)
        }
    };

    let document = match xsd::parse_document(&source.text) {
        Ok(document) => document,
        Err(err) => {
            let pos = err.pos();
            let span = Span::at_text_pos(&source.text, pos.row, pos.col);
            let diagnostic = if is_main {
                Diagnostic::fatal(format!("schema is not well-formed XML: {err}"))
            } else {
                Diagnostic::error(format!("schema is not well-formed XML: {err}"))
            };
            collector.emit(located(
                diagnostic
                    .with_code(ErrorCode::E001)
                    .with_label(span, "parsing stopped here"),
            ));
            return None;
        }
    };

    let root = document.root_element();
    if !(xsd::is_xsd_element(&root) && local_name(&root) == "schema") {
        let message = format!("root element `{}` is not `xs:schema`", local_name(&root));
        let diagnostic = if is_main {
            Diagnostic::fatal(message)
        } else {
            Diagnostic::error(message)
        };
        collector.emit(located(
            diagnostic
                .with_code(ErrorCode::E002)
                .with_label(Span::new(root.range()), "expected a schema document")
                .with_help(format!(
                    "the root element must be `schema` in the `{}` namespace",
                    xsd::XSD_NAMESPACE
                )),
        ));
        return None;
    }

    let references = xsd_children(root)
        .filter_map(|child| {
            let kind = match local_name(&child) {
                "include" | "redefine" => ReferenceKind::Include,
                "import" => ReferenceKind::Import,
                _ => return None,
            };
            let location = child.attribute("schemaLocation")?;
            Some(Reference {
                kind,
                location: location.trim().to_string(),
                span: Span::new(child.range()),
            })
        })
        .collect();

    Some(Checked {
        target_namespace: root.attribute("targetNamespace").map(str::to_string),
        references,
    })
}

/// The document a reference was found in.
struct ReferenceContext<'a> {
    source: &'a SchemaSource,
    is_main: bool,
    /// Effective target namespace of the referencing document.
    namespace: Option<&'a String>,
}

/// Reads the document a reference points to, unless it was read before.
fn read_reference(
    context: &ReferenceContext<'_>,
    reference: &Reference,
    seen: &mut HashSet<PathBuf>,
    collector: &mut DiagnosticCollector,
) -> Option<SchemaSource> {
    let source = context.source;
    let located = |diagnostic: Diagnostic| {
        let diagnostic = diagnostic.attach(Label::reference(reference.span));
        if context.is_main {
            diagnostic
        } else {
            diagnostic.in_document(&source.name)
        }
    };

    let Some(base) = source.path.as_deref() else {
        collector.emit(located(
            Diagnostic::warning(format!(
                "schema location `{}` is not followed when loading from text",
                reference.location
            ))
            .with_code(ErrorCode::E301)
            .with_help("load the schema from a file to follow its includes and imports"),
        ));
        return None;
    };

    if reference.location.contains("://") {
        collector.emit(located(
            Diagnostic::warning(format!(
                "remote schema location `{}` is not followed",
                reference.location
            ))
            .with_code(ErrorCode::E301),
        ));
        return None;
    }

    let path = base
        .parent()
        .map_or_else(|| PathBuf::from(&reference.location), |dir| {
            dir.join(&reference.location)
        });
    if !seen.insert(canonical(&path)) {
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(text) => {
            let mut included = SchemaSource::from_file(&path, text);
            if reference.kind == ReferenceKind::Include {
                included.inherited_namespace = context.namespace.cloned();
            }
            Some(included)
        }
        Err(err) => {
            let message = format!("cannot read `{}`: {err}", path.display());
            let diagnostic = match reference.kind {
                ReferenceKind::Include => Diagnostic::error(message).with_code(ErrorCode::E003),
                ReferenceKind::Import => Diagnostic::warning(message).with_code(ErrorCode::E301),
            };
            warn!(path:? = path; "Referenced schema is not readable");
            collector.emit(located(diagnostic));
            None
        }
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
