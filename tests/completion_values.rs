//! Option value completion: enumerated choices with default-first
//! ordering, canonical booleans, and documented defaults for free leaves.

mod common;

use common::{labels, new_text, playbook, smart_filter, workspace};
use indoc::indoc;
use tower_lsp::lsp_types::Position;

use ansible_completion::provide_completion;

fn coll_4_doc(option_line: &str) -> String {
    let mut text = String::from(indoc! {r#"
        - name: Play
          hosts: localhost
          tasks:
            - name: Use a collection module
              org_1.coll_4.module_1:
    "#});
    text.push_str(option_line);
    text.push('\n');
    text
}

#[tokio::test]
async fn default_moves_to_the_front_of_the_choices() {
    let ws = workspace();
    let doc = playbook(&coll_4_doc("        opt_3:"));
    let items = provide_completion(&doc, Position::new(5, 15), &ws).await;
    // The documented default is not itself one of the choices; it still
    // leads, and the remaining choices keep their catalog order.
    assert_eq!(
        labels(&items),
        vec!["choice_4", "choice_1", "choice_2", "choice_3"]
    );
}

#[tokio::test]
async fn choices_narrow_under_the_client_filter() {
    let ws = workspace();
    let doc = playbook(&coll_4_doc("        opt_3:"));
    let items = provide_completion(&doc, Position::new(5, 15), &ws).await;
    let filtered = smart_filter(items, "3");
    assert_eq!(labels(&filtered), vec!["choice_3"]);
}

#[tokio::test]
async fn boolean_leaves_complete_false_then_true() {
    let ws = workspace();
    let doc = playbook(&coll_4_doc("        opt_4:"));
    let items = provide_completion(&doc, Position::new(5, 15), &ws).await;
    assert_eq!(labels(&items), vec!["false", "true"]);
}

#[tokio::test]
async fn sub_option_choices_complete() {
    let ws = workspace();
    let doc = playbook(&coll_4_doc("        opt_1:\n          sub_opt_1: choice_1"));
    let items = provide_completion(&doc, Position::new(6, 29), &ws).await;
    assert_eq!(labels(&items), vec!["choice_1", "choice_2"]);
    let filtered = smart_filter(items, "1");
    assert_eq!(labels(&filtered), vec!["choice_1"]);
}

#[tokio::test]
async fn free_leaf_with_documented_default_offers_the_default() {
    let text = indoc! {r#"
        - name: Play
          hosts: localhost
          tasks:
            - name: Print a message
              ansible.builtin.debug:
                msg:
    "#};
    let ws = workspace();
    let items = provide_completion(&playbook(text), Position::new(5, 13), &ws).await;
    assert_eq!(labels(&items), vec!["Hello world!"]);
    assert_eq!(new_text(&items[0]), "Hello world!");
}

#[tokio::test]
async fn free_leaf_without_default_offers_nothing() {
    let text = indoc! {r#"
        - name: Play
          hosts: localhost
          tasks:
            - name: Run a command
              ansible.builtin.command:
                cmd:
    "#};
    let ws = workspace();
    let items = provide_completion(&playbook(text), Position::new(5, 13), &ws).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn dict_option_value_offers_nothing() {
    let ws = workspace();
    let doc = playbook(&coll_4_doc("        opt_1:"));
    let items = provide_completion(&doc, Position::new(5, 15), &ws).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn module_key_own_value_offers_nothing() {
    let text = indoc! {r#"
        - name: Play
          hosts: localhost
          tasks:
            - name: Run a command
              ansible.builtin.command: whoami
    "#};
    let ws = workspace();
    let items = provide_completion(&playbook(text), Position::new(4, 33), &ws).await;
    assert!(items.is_empty());
}
