//! Shared fixtures for the completion test suite.
//!
//! The catalog mirrors a small workspace: the built-in collection plus the
//! `org_1` collections with the nested option trees the suboption tests
//! drill into. `smart_filter` models the client-side narrowing an editor
//! applies on top of the engine's full candidate set.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use tower_lsp::lsp_types::{CompletionItem, CompletionTextEdit, Url};

use ansible_completion::catalog::collector::{CollectionDoc, StaticCollector, StaticInventory};
use ansible_completion::catalog::inventory::{RawInventory, UNGROUPED};
use ansible_completion::{Document, WorkspaceContext};

pub fn fixture_collections() -> Vec<CollectionDoc> {
    serde_json::from_value(json!([
        {
            "namespace": "ansible",
            "name": "builtin",
            "modules": [
                {
                    "name": "ping",
                    "short_description": "Try to connect to host and return pong on success",
                    "options": [
                        { "name": "data", "type": "str", "default": "pong" },
                    ],
                },
                {
                    "name": "debug",
                    "short_description": "Print statements during execution",
                    "options": [
                        { "name": "msg", "type": "str", "default": "Hello world!" },
                        { "name": "var", "type": "str" },
                        { "name": "verbosity", "type": "int", "default": 0 },
                    ],
                },
                {
                    "name": "command",
                    "short_description": "Execute commands on targets",
                    "options": [
                        { "name": "cmd", "type": "str" },
                        { "name": "chdir", "type": "path" },
                        { "name": "creates", "type": "path" },
                        { "name": "removes", "type": "path" },
                    ],
                },
                {
                    "name": "service",
                    "short_description": "Manage services",
                    "options": [
                        { "name": "name", "type": "str", "required": true },
                        {
                            "name": "state",
                            "type": "str",
                            "choices": ["reloaded", "restarted", "started", "stopped"],
                        },
                        { "name": "enabled", "type": "bool" },
                    ],
                },
            ],
        },
        {
            "namespace": "org_1",
            "name": "coll_1",
            "modules": [
                { "name": "module_1", "options": [{ "name": "opt_1", "type": "str" }] },
                { "name": "module_2", "options": [{ "name": "opt_1", "type": "str" }] },
            ],
        },
        {
            "namespace": "org_1",
            "name": "coll_2",
            "modules": [
                { "name": "module_1", "options": [{ "name": "opt_1", "type": "str" }] },
            ],
        },
        {
            "namespace": "org_1",
            "name": "coll_3",
            "modules": [
                {
                    "name": "module_3",
                    "options": [
                        {
                            "name": "opt_1",
                            "type": "dict",
                            "suboptions": [
                                { "name": "sub_opt_1", "type": "str" },
                                { "name": "sub_opt_2", "type": "str" },
                            ],
                        },
                    ],
                },
            ],
        },
        {
            "namespace": "org_1",
            "name": "coll_4",
            "modules": [
                {
                    "name": "module_1",
                    "options": [
                        {
                            "name": "opt_1",
                            "type": "dict",
                            "suboptions": [
                                {
                                    "name": "sub_opt_1",
                                    "type": "str",
                                    "choices": ["choice_1", "choice_2"],
                                },
                                {
                                    "name": "sub_opt_2",
                                    "type": "dict",
                                    "suboptions": [
                                        { "name": "sub_sub_opt_1", "type": "str" },
                                        { "name": "sub_sub_opt_2", "type": "str" },
                                        {
                                            "name": "sub_sub_opt_3",
                                            "type": "dict",
                                            "suboptions": [
                                                { "name": "sub_sub_sub_opt_1", "type": "str" },
                                                { "name": "sub_sub_sub_opt_2", "type": "str" },
                                            ],
                                        },
                                    ],
                                },
                            ],
                        },
                        { "name": "opt_2", "type": "str" },
                        {
                            "name": "opt_3",
                            "type": "str",
                            "default": "choice_4",
                            "choices": ["choice_1", "choice_2", "choice_3"],
                        },
                        { "name": "opt_4", "type": "bool" },
                    ],
                },
                { "name": "module_2", "options": [{ "name": "opt_1", "type": "str" }] },
            ],
        },
        {
            "namespace": "org_1",
            "name": "coll_5",
            "modules": [
                { "name": "sub_coll_1.module_1", "options": [{ "name": "opt_1", "type": "str" }] },
            ],
        },
    ]))
    .expect("fixture collections deserialize")
}

pub fn fixture_inventory() -> RawInventory {
    let mut raw = RawInventory::default();
    raw.group_mut("all")
        .children
        .extend(["hello-worlds".to_string(), "test-inventories".to_string()]);
    raw.group_mut("hello-worlds")
        .hosts
        .extend(["hello.world.1".to_string(), "hello.world.2".to_string()]);
    raw.group_mut("test-inventories")
        .hosts
        .extend(["test.inventory.3".to_string(), "test.inventory.4".to_string()]);
    raw.group_mut(UNGROUPED).hosts.push("localhost".to_string());
    raw
}

pub fn workspace() -> WorkspaceContext {
    WorkspaceContext::new(
        Url::parse("file:///workspace").unwrap(),
        Arc::new(StaticCollector::new(fixture_collections())),
        Arc::new(StaticInventory::new(fixture_inventory())),
    )
}

pub fn doc_uri() -> Url {
    Url::parse("file:///workspace/playbook.yml").unwrap()
}

pub fn playbook(text: &str) -> Document {
    Document::new(doc_uri(), text)
}

/// The client-side narrowing an editor applies as the user keeps typing.
/// Not part of the engine contract: the engine returns the full
/// context-correct set and this post-filter models the editor.
pub fn smart_filter(items: Vec<CompletionItem>, trigger: &str) -> Vec<CompletionItem> {
    if trigger.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.label.contains(trigger))
        .collect()
}

pub fn labels(items: &[CompletionItem]) -> Vec<String> {
    items.iter().map(|item| item.label.clone()).collect()
}

pub fn new_text(item: &CompletionItem) -> String {
    match item.text_edit.as_ref().expect("completion item carries an edit") {
        CompletionTextEdit::Edit(edit) => edit.new_text.clone(),
        CompletionTextEdit::InsertAndReplace(edit) => edit.new_text.clone(),
    }
}
