//! Keyword completion across the four constructs: play, role, block, task.

mod common;

use common::{labels, new_text, playbook, smart_filter, workspace};
use indoc::indoc;
use tower_lsp::lsp_types::Position;

use ansible_completion::provide_completion;

const PLAY_DOC: &str = indoc! {r#"
    - name: Test play
      gather_facts: false
      hosts: localhost
      tasks: []
"#};

#[tokio::test]
async fn play_keywords_offer_name_first_on_empty_prefix() {
    let ws = workspace();
    let doc = playbook(PLAY_DOC);
    let items = provide_completion(&doc, Position::new(0, 2), &ws).await;
    assert_eq!(items[0].label, "name");
    assert_eq!(new_text(&items[0]), "name");
}

#[tokio::test]
async fn play_keywords_complete_hosts() {
    let ws = workspace();
    let doc = playbook(PLAY_DOC);
    let items = provide_completion(&doc, Position::new(2, 5), &ws).await;
    let filtered = smart_filter(items, "hos");
    assert_eq!(filtered[0].label, "hosts");
    assert_eq!(new_text(&filtered[0]), "hosts");
}

#[tokio::test]
async fn play_keywords_exclude_used_siblings() {
    let ws = workspace();
    let doc = playbook(PLAY_DOC);
    let items = provide_completion(&doc, Position::new(0, 2), &ws).await;
    let labels = labels(&items);
    assert!(!labels.contains(&"gather_facts".to_string()));
    assert!(!labels.contains(&"tasks".to_string()));
    // The cursor's own token is never hidden by the non-repetition rule.
    assert!(labels.contains(&"name".to_string()));
}

const ROLE_DOC: &str = indoc! {r#"
    - name: Play with roles
      hosts: all
      roles:
        - role: role_1
          when: ansible_os_family == 'Debian'
"#};

#[tokio::test]
async fn role_keywords_offer_name_first() {
    let ws = workspace();
    let doc = playbook(ROLE_DOC);
    let items = provide_completion(&doc, Position::new(4, 6), &ws).await;
    assert_eq!(items[0].label, "name");
}

#[tokio::test]
async fn role_keywords_complete_when() {
    let ws = workspace();
    let doc = playbook(ROLE_DOC);
    let items = provide_completion(&doc, Position::new(4, 8), &ws).await;
    let filtered = smart_filter(items, "wh");
    assert_eq!(filtered[0].label, "when");
}

#[tokio::test]
async fn role_keywords_exclude_used_role_key() {
    let ws = workspace();
    let doc = playbook(ROLE_DOC);
    let items = provide_completion(&doc, Position::new(4, 6), &ws).await;
    assert!(!labels(&items).contains(&"role".to_string()));
}

const BLOCK_DOC: &str = indoc! {r#"
    - name: Play with blocks
      hosts: all
      tasks:
        - name: Guarded work
          become: true
          block:
            - name: Inner task
              ansible.builtin.ping:
          rescue:
            - name: Recover
              ansible.builtin.debug:
                msg: recovered
"#};

#[tokio::test]
async fn block_keywords_complete_become() {
    let ws = workspace();
    let doc = playbook(BLOCK_DOC);
    let items = provide_completion(&doc, Position::new(4, 8), &ws).await;
    let filtered = smart_filter(items, "be");
    assert_eq!(filtered[0].label, "become");
}

#[tokio::test]
async fn block_keywords_complete_become_user() {
    let ws = workspace();
    let doc = playbook(BLOCK_DOC);
    let items = provide_completion(&doc, Position::new(4, 8), &ws).await;
    let filtered = smart_filter(items, "user");
    assert_eq!(filtered[0].label, "become_user");
}

#[tokio::test]
async fn block_keywords_offer_name_first_in_fresh_block() {
    let text = indoc! {r#"
        - name: Play with blocks
          hosts: all
          tasks:
            - block:
                - name: Inner task
                  ansible.builtin.ping:
              rescue:
                - name: Recover
    "#};
    let ws = workspace();
    // Completing on a fresh indented line inside the block item.
    let doc = playbook(&format!("{text}      \n"));
    let items = provide_completion(&doc, Position::new(8, 6), &ws).await;
    assert_eq!(items[0].label, "name");
    let labels = labels(&items);
    assert!(!labels.contains(&"block".to_string()));
    assert!(!labels.contains(&"rescue".to_string()));
    assert!(labels.contains(&"always".to_string()));
}

const TASK_DOC: &str = indoc! {r#"
    - name: Play with tasks
      hosts: localhost
      tasks:
        - name: Ping the host
          ansible.builtin.ping:
            data: pong
          loop: "{{ targets }}"
        - name: Print a message
          ansible.builtin.debug:
            msg: Hello world
          debugger: on_failed
"#};

#[tokio::test]
async fn task_keywords_complete_loop() {
    let ws = workspace();
    let doc = playbook(TASK_DOC);
    let items = provide_completion(&doc, Position::new(6, 10), &ws).await;
    let filtered = smart_filter(items, "loop");
    assert_eq!(filtered[0].label, "loop");
}

#[tokio::test]
async fn task_keywords_complete_debugger() {
    let ws = workspace();
    let doc = playbook(TASK_DOC);
    let items = provide_completion(&doc, Position::new(10, 9), &ws).await;
    let filtered = smart_filter(items, "deb");
    assert_eq!(filtered[0].label, "debugger");
}

#[tokio::test]
async fn bound_task_offers_no_module_names() {
    let ws = workspace();
    let doc = playbook(TASK_DOC);
    let items = provide_completion(&doc, Position::new(6, 10), &ws).await;
    assert!(!labels(&items).iter().any(|l| l.contains("ansible.builtin.")));
}

#[tokio::test]
async fn keyword_values_are_not_completed() {
    let ws = workspace();
    let doc = playbook(PLAY_DOC);
    // Value position of `gather_facts` — keywords have no value candidates.
    let items = provide_completion(&doc, Position::new(1, 17), &ws).await;
    assert!(items.is_empty());
}
