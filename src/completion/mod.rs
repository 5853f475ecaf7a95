//! Playbook completion engine.
//!
//! This module wires the pipeline together: locate the cursor in the
//! document's block structure, classify it against the DSL grammar, resolve
//! candidates against the workspace's catalog snapshot, and assemble them
//! into protocol completion items. Every failure along the way degrades to
//! an empty candidate list — a document being edited is transiently broken
//! far more often than it is well-formed.

pub mod context;
pub mod hosts;
pub mod options;
pub mod resolver;

pub use context::{CompletionContext, classify};
pub use resolver::ResolvedName;

use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Documentation, MarkupContent,
    MarkupKind, Position, Range, TextEdit,
};
use tracing::debug;

use crate::catalog::OptionSpec;
use crate::catalog::keywords::keyword_set;
use crate::document::Document;
use crate::workspace::WorkspaceContext;
use crate::yaml::{self, CursorContext};

/// Compute completion candidates for a document position.
///
/// The one entry point of the engine. Candidates come back in engine
/// order — keyword sets and catalog order, default values first — and the
/// caller (or client) narrows them against further typing.
pub async fn provide_completion(
    document: &Document,
    position: Position,
    workspace: &WorkspaceContext,
) -> Vec<CompletionItem> {
    let settings = workspace.document_settings(document.uri());
    let Some(snapshot) = workspace.snapshot(&settings).await else {
        return Vec::new();
    };
    let Some(cursor) = yaml::locate(document, position) else {
        return Vec::new();
    };

    let mut assembler = Assembler::new(&cursor);
    match classify(&cursor, &snapshot) {
        CompletionContext::PlayKeyword => {
            assembler.keywords(&keyword_set().play, &cursor.siblings);
        }
        CompletionContext::RoleKeyword => {
            assembler.keywords(&keyword_set().role, &cursor.siblings);
        }
        CompletionContext::BlockKeyword => {
            assembler.keywords(&keyword_set().block, &cursor.siblings);
        }
        CompletionContext::TaskKeyword => {
            assembler.keywords(&keyword_set().task, &cursor.siblings);
        }
        CompletionContext::ModuleName => {
            assembler.keywords(&keyword_set().task, &cursor.siblings);
            for name in resolver::resolve(&cursor.prefix, settings.use_fqcn(), &snapshot) {
                assembler.module(name);
            }
        }
        CompletionContext::ModuleOption {
            module,
            option_path,
        } => {
            for (name, spec) in options::child_options(module, &option_path, &cursor.siblings) {
                assembler.option(name, spec);
            }
        }
        CompletionContext::OptionValue {
            module,
            option_path,
        } => {
            for value in options::leaf_values(module, &option_path) {
                assembler.value(value);
            }
        }
        CompletionContext::HostValue => {
            for host in hosts::resolve_hosts(snapshot.inventory(), &cursor.prefix) {
                assembler.value(host);
            }
        }
        CompletionContext::None => {}
    }

    let items = assembler.finish();
    debug!(
        count = items.len(),
        catalog_version = snapshot.version(),
        "completion assembled"
    );
    items
}

/// Turns resolved labels into completion items.
///
/// The replacement edit spans the entire typed prefix — for dotted names
/// the whole accumulated path, not just the final segment — so accepting a
/// candidate always yields a complete token. Exact duplicates collapse;
/// entries that share a label but differ in provenance (short-name
/// collisions across collections) are all kept.
struct Assembler {
    range: Range,
    items: Vec<CompletionItem>,
    seen: FxHashSet<(String, Option<String>)>,
}

impl Assembler {
    fn new(cursor: &CursorContext) -> Self {
        Self {
            range: Range::new(
                Position::new(cursor.line, cursor.replace_start),
                Position::new(cursor.line, cursor.cursor),
            ),
            items: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    fn keywords(&mut self, keywords: &[&'static str], used: &[String]) {
        for keyword in keywords {
            if !used.iter().any(|u| u == keyword) {
                self.push(keyword.to_string(), CompletionItemKind::KEYWORD, None, None);
            }
        }
    }

    fn module(&mut self, name: ResolvedName) {
        self.push(
            name.label,
            CompletionItemKind::MODULE,
            name.detail,
            name.documentation,
        );
    }

    fn option(&mut self, name: &str, spec: &OptionSpec) {
        let detail = if spec.required {
            format!("{} (required)", spec.option_type.as_str())
        } else {
            spec.option_type.as_str().to_string()
        };
        self.push(
            name.to_string(),
            CompletionItemKind::PROPERTY,
            Some(detail),
            spec.description.clone(),
        );
    }

    fn value(&mut self, value: String) {
        self.push(value, CompletionItemKind::VALUE, None, None);
    }

    fn push(
        &mut self,
        label: String,
        kind: CompletionItemKind,
        detail: Option<String>,
        documentation: Option<String>,
    ) {
        if !self.seen.insert((label.clone(), detail.clone())) {
            return;
        }
        let index = self.items.len();
        self.items.push(CompletionItem {
            label: label.clone(),
            kind: Some(kind),
            detail,
            documentation: documentation.map(|value| {
                Documentation::MarkupContent(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value,
                })
            }),
            sort_text: Some(format!("{index:04}")),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range: self.range,
                new_text: label,
            })),
            ..CompletionItem::default()
        });
    }

    fn finish(self) -> Vec<CompletionItem> {
        self.items
    }
}
