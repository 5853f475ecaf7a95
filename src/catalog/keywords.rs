//! Playbook keyword sets.
//!
//! The DSL reserves a fixed keyword vocabulary per construct (play, role,
//! block, task), independent of any module. The lists are assembled once
//! per process: a shared base applies to every construct and each construct
//! adds its own keywords, with `name` always surfaced first — the same
//! convention the option completion relies on at the task level.

use once_cell::sync::Lazy;

/// Keywords accepted by every construct.
const COMMON_KEYWORDS: &[&str] = &[
    "any_errors_fatal",
    "become",
    "become_exe",
    "become_flags",
    "become_method",
    "become_user",
    "check_mode",
    "collections",
    "connection",
    "debugger",
    "diff",
    "environment",
    "ignore_errors",
    "ignore_unreachable",
    "module_defaults",
    "no_log",
    "port",
    "remote_user",
    "run_once",
    "tags",
    "throttle",
    "timeout",
    "vars",
];

const PLAY_KEYWORDS: &[&str] = &[
    "fact_path",
    "force_handlers",
    "gather_facts",
    "gather_subset",
    "gather_timeout",
    "handlers",
    "hosts",
    "max_fail_percentage",
    "order",
    "post_tasks",
    "pre_tasks",
    "roles",
    "serial",
    "strategy",
    "tasks",
    "vars_files",
    "vars_prompt",
];

const ROLE_KEYWORDS: &[&str] = &[
    "delegate_facts",
    "delegate_to",
    "role",
    "when",
];

const BLOCK_KEYWORDS: &[&str] = &[
    "always",
    "block",
    "delegate_facts",
    "delegate_to",
    "notify",
    "rescue",
    "when",
];

const TASK_KEYWORDS: &[&str] = &[
    "action",
    "args",
    "async",
    "changed_when",
    "delay",
    "delegate_facts",
    "delegate_to",
    "failed_when",
    "local_action",
    "loop",
    "loop_control",
    "notify",
    "poll",
    "register",
    "retries",
    "until",
    "when",
];

/// Ordered keyword lists per construct, `name` first.
#[derive(Debug)]
pub struct KeywordSet {
    pub play: Vec<&'static str>,
    pub role: Vec<&'static str>,
    pub block: Vec<&'static str>,
    pub task: Vec<&'static str>,
}

fn merged(extra: &[&'static str]) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = COMMON_KEYWORDS
        .iter()
        .chain(extra.iter())
        .copied()
        .collect();
    out.sort_unstable();
    out.dedup();
    out.insert(0, "name");
    out
}

static KEYWORD_SET: Lazy<KeywordSet> = Lazy::new(|| KeywordSet {
    play: merged(PLAY_KEYWORDS),
    role: merged(ROLE_KEYWORDS),
    block: merged(BLOCK_KEYWORDS),
    task: merged(TASK_KEYWORDS),
});

pub fn keyword_set() -> &'static KeywordSet {
    &KEYWORD_SET
}

/// Keys whose value is a list of tasks. Items below them classify as tasks
/// (or blocks, when the item itself declares `block`/`rescue`/`always`).
pub const TASK_LIST_KEYS: &[&str] = &[
    "tasks",
    "pre_tasks",
    "post_tasks",
    "handlers",
    "block",
    "rescue",
    "always",
];
