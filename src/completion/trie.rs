//! Prefix tree over single characters.

use std::collections::HashMap;

#[derive(Default)]
struct Node {
    children: HashMap<char, Node>,
    is_end: bool,
}

#[derive(Default)]
pub struct Trie {
    root: Node,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.is_end = true;
    }

    /// All complete words stored in the trie with the given prefix, in
    /// insertion-agnostic sorted order.
    pub fn matches(&self, prefix: &str) -> Vec<String> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => return Vec::new(),
            }
        }
        let mut out = Vec::new();
        collect(node, prefix, &mut out);
        out.sort();
        out
    }
}

fn collect(node: &Node, prefix: &str, out: &mut Vec<String>) {
    if node.is_end {
        out.push(prefix.to_string());
    }
    for (ch, child) in &node.children {
        let mut next = prefix.to_string();
        next.push(*ch);
        collect(child, &next, out);
    }
}

/// Longest common prefix of a nonempty set of strings.
pub fn longest_common_prefix(words: &[String]) -> String {
    let mut iter = words.iter();
    let first = match iter.next() {
        Some(w) => w,
        None => return String::new(),
    };
    let mut prefix_len = first.chars().count();
    for word in iter {
        let common = first
            .chars()
            .zip(word.chars())
            .take_while(|(a, b)| a == b)
            .count();
        prefix_len = prefix_len.min(common);
    }
    first.chars().take(prefix_len).collect()
}
