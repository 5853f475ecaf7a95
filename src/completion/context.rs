//! Context detection for playbook completion.
//!
//! Maps the structural cursor context onto the completion state machine:
//! which construct the cursor is in and therefore which candidate kind
//! applies. Classification happens once per request; everything downstream
//! dispatches on the resulting variant instead of re-inspecting key names.

use tracing::debug;

use crate::catalog::keywords::TASK_LIST_KEYS;
use crate::catalog::{CatalogSnapshot, ModuleSpec};
use crate::yaml::{CursorContext, CursorKind, PathStep};

/// The completion state chosen for one request.
#[derive(Debug)]
pub enum CompletionContext<'a> {
    /// Keys of a play (a root-level sequence item).
    PlayKeyword,
    /// Keys of an entry under `roles:`.
    RoleKeyword,
    /// Keys of a task item that declares `block`/`rescue`/`always`.
    BlockKeyword,
    /// Keys of a task item already bound to a module: keywords only.
    TaskKeyword,
    /// Keys of a task item not yet bound to a module: task keywords plus
    /// module names.
    ModuleName,
    /// Keys below a bound module key, addressed by `option_path` (empty at
    /// the first option level).
    ModuleOption {
        module: &'a ModuleSpec,
        option_path: Vec<String>,
    },
    /// Value of a leaf option; `option_path` includes the leaf itself.
    OptionValue {
        module: &'a ModuleSpec,
        option_path: Vec<String>,
    },
    /// Value of a play's `hosts` key.
    HostValue,
    /// Nothing completable here.
    None,
}

fn key_name(step: &PathStep) -> Option<&str> {
    match step {
        PathStep::Key(name) => Some(name.as_str()),
        PathStep::Item => None,
    }
}

/// True when `path[..=idx]` addresses a task item: an `Item` whose parent
/// key holds a list of tasks.
fn is_task_item(path: &[PathStep], idx: usize) -> bool {
    if path.get(idx) != Some(&PathStep::Item) || idx == 0 {
        return false;
    }
    key_name(&path[idx - 1]).is_some_and(|k| TASK_LIST_KEYS.contains(&k))
}

/// Classify the cursor against the DSL grammar.
pub fn classify<'a>(
    cursor: &CursorContext,
    snapshot: &'a CatalogSnapshot,
) -> CompletionContext<'a> {
    let context = match &cursor.kind {
        CursorKind::Key => classify_key(cursor, snapshot),
        CursorKind::Value { key } => classify_value(cursor, key, snapshot),
    };
    debug!(state = context.state_name(), "classified completion context");
    context
}

fn classify_key<'a>(
    cursor: &CursorContext,
    snapshot: &'a CatalogSnapshot,
) -> CompletionContext<'a> {
    let path = &cursor.path;
    match path.last() {
        Some(PathStep::Item) => {
            let idx = path.len() - 1;
            if idx == 0 {
                return CompletionContext::PlayKeyword;
            }
            let Some(parent) = key_name(&path[idx - 1]) else {
                return CompletionContext::None;
            };
            if parent == "roles" {
                return CompletionContext::RoleKeyword;
            }
            if TASK_LIST_KEYS.contains(&parent) {
                if cursor
                    .siblings
                    .iter()
                    .any(|k| matches!(k.as_str(), "block" | "rescue" | "always"))
                {
                    return CompletionContext::BlockKeyword;
                }
                if cursor.siblings.iter().any(|k| snapshot.find_module(k).is_some()) {
                    return CompletionContext::TaskKeyword;
                }
                return CompletionContext::ModuleName;
            }
            CompletionContext::None
        }
        Some(PathStep::Key(_)) => {
            // Keys nested below a task item resolve against a module's
            // option tree, if the first nested key binds to a module.
            let Some(item_idx) = path.iter().rposition(|s| *s == PathStep::Item) else {
                return CompletionContext::None;
            };
            if !is_task_item(path, item_idx) {
                return CompletionContext::None;
            }
            let keys: Vec<String> = path[item_idx + 1..]
                .iter()
                .filter_map(|s| key_name(s).map(str::to_string))
                .collect();
            let Some(module) = snapshot.find_module(&keys[0]) else {
                return CompletionContext::None;
            };
            CompletionContext::ModuleOption {
                module,
                option_path: keys[1..].to_vec(),
            }
        }
        None => CompletionContext::None,
    }
}

fn classify_value<'a>(
    cursor: &CursorContext,
    key: &str,
    snapshot: &'a CatalogSnapshot,
) -> CompletionContext<'a> {
    let path = &cursor.path;
    if path.len() == 1 && path[0] == PathStep::Item && key == "hosts" {
        return CompletionContext::HostValue;
    }
    let Some(item_idx) = path.iter().rposition(|s| *s == PathStep::Item) else {
        return CompletionContext::None;
    };
    if !is_task_item(path, item_idx) {
        return CompletionContext::None;
    }
    let mut keys: Vec<String> = path[item_idx + 1..]
        .iter()
        .filter_map(|s| key_name(s).map(str::to_string))
        .collect();
    keys.push(key.to_string());
    if keys.len() < 2 {
        // The module key's own value is free-form argument text.
        return CompletionContext::None;
    }
    let Some(module) = snapshot.find_module(&keys[0]) else {
        return CompletionContext::None;
    };
    CompletionContext::OptionValue {
        module,
        option_path: keys[1..].to_vec(),
    }
}

impl CompletionContext<'_> {
    fn state_name(&self) -> &'static str {
        match self {
            Self::PlayKeyword => "play_keyword",
            Self::RoleKeyword => "role_keyword",
            Self::BlockKeyword => "block_keyword",
            Self::TaskKeyword => "task_keyword",
            Self::ModuleName => "module_name",
            Self::ModuleOption { .. } => "module_option",
            Self::OptionValue { .. } => "option_value",
            Self::HostValue => "host_value",
            Self::None => "none",
        }
    }
}
