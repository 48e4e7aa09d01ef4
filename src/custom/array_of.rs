use super::{Context, Validator};
use crate::diagnostic::{aggregate, path, Diagnostic, Failure};
use crate::node::Node;
use crate::validate::check_array;

/// Every element must match at least one candidate (first match wins).
///
/// Candidate attempts are scratch work: only the per-element verdict is
/// recorded, one passing diagnostic naming the matched candidate or one
/// failing diagnostic listing them all.
#[derive(Debug, Clone)]
pub struct ArrayOf {
    candidates: Vec<Node>,
}

impl ArrayOf {
    pub fn new<I: IntoIterator<Item = Node>>(candidates: I) -> Self {
        Self { candidates: candidates.into_iter().collect() }
    }

    pub fn candidates(&self) -> &[Node] {
        &self.candidates
    }

    fn candidate_list(&self) -> String {
        let names = self.candidates.iter().map(Node::describe).collect::<Vec<_>>();
        format!("[{}]", names.join(", "))
    }
}

impl Validator for ArrayOf {
    fn name(&self) -> String {
        format!("array of {}", self.candidate_list())
    }

    fn validate(&self, cx: &Context<'_>) -> Vec<Diagnostic> {
        let head = check_array(cx.target, cx.path);
        let items = match cx.target.and_then(|v| v.as_array()) {
            Some(items) if head.ok => items,
            _ => return vec![head],
        };

        let mut out = Vec::with_capacity(items.len() + 1);
        out.push(head);
        for (i, item) in items.iter().enumerate() {
            let at = path::index(cx.path, i);
            let matched = self
                .candidates
                .iter()
                .find(|candidate| aggregate(&cx.check(candidate, Some(item), &at)));
            match matched {
                Some(candidate) => out.push(Diagnostic::pass(
                    &at,
                    format!("Element {i} of {} is {}", cx.path, candidate.describe()),
                )),
                None => out.push(Diagnostic::fail(
                    Failure::ArrayContentMismatch,
                    &at,
                    format!(
                        "Element {i} of {} ({item}) matches none of {}",
                        cx.path,
                        self.candidate_list()
                    ),
                )),
            }
        }
        out
    }
}
