//! Terminal output: colored status helpers and tree rendering
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use generational_arena::Index;
use termtree::Tree;

use crate::config::{DisplaySettings, TrimMode};
use crate::domain::arena::{CourseTree, TreeNode};
use crate::domain::builder::CourseLevelView;

/// Message shown when the view is empty.
pub const NO_COURSES: &str = "No courses to display";

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Truncate a display name according to the trim policy.
///
/// Nothing happens until the name exceeds the limit plus ellipsis slack;
/// counting is by character, not byte.
pub fn trim(text: &str, mode: TrimMode, length: usize) -> String {
    let count = text.chars().count();
    if count <= length + 3 {
        return text.to_string();
    }

    match mode {
        TrimMode::Right => {
            let head: String = text.chars().take(length).collect();
            format!("{head}...")
        }
        TrimMode::Left => {
            let tail: String = text.chars().skip(count - length).collect();
            format!("...{tail}")
        }
        TrimMode::Center => {
            let head: String = text.chars().take(length.div_ceil(2)).collect();
            let tail: String = text.chars().skip(count - length / 2).collect();
            format!("{head}...{tail}")
        }
    }
}

/// Render the whole view as a text forest, one tree per top-level node.
pub fn render_view(view: &CourseLevelView, display: &DisplaySettings) -> String {
    if view.tree.is_empty() {
        return format!("{NO_COURSES}\n");
    }

    let mut rendered = String::new();
    for &root in view.tree.roots() {
        rendered.push_str(&to_display_tree(&view.tree, root, display).to_string());
    }
    rendered
}

fn to_display_tree(tree: &CourseTree, idx: Index, display: &DisplaySettings) -> Tree<String> {
    let label = tree
        .node(idx)
        .map(|node| node_label(node, display))
        .unwrap_or_default();

    let leaves: Vec<Tree<String>> = tree
        .children(idx)
        .into_iter()
        .map(|child| to_display_tree(tree, child, display))
        .collect();

    Tree::new(label).with_leaves(leaves)
}

/// Short name when the feed supplies one, full name otherwise; enrolled
/// nodes are starred.
fn node_label(node: &TreeNode, display: &DisplaySettings) -> String {
    let name = if node.data.short_name.is_empty() {
        &node.data.full_name
    } else {
        &node.data.short_name
    };

    let mut label = trim(name, display.trim_mode, display.trim_length);
    if node.data.enrolled {
        label.push_str(" *");
    }
    label
}
