//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::content::ContentStore;
use crate::core::state::App;

/// Two topics and a glossary. `alpha` carries every optional section,
/// `beta` none of them.
pub const MINIMAL_CONTENT: &str = r#"
initial_topic = "alpha"

[channels]
primary = "Chan A"
secondary = "Chan B"

[glossary]
title = "Terms"

[[glossary.terms]]
term = "Class"
definition = "A blueprint."

[[glossary.terms]]
term = "Object"
definition = "An instance."

[[topics]]
key = "alpha"
title = "Alpha: The First"
explanation = "Alpha **explained**."
code_sample = "class Alpha {}"
diagram = """
classDiagram
    class Alpha
"""
tips = "Remember alpha."
review_question = "Why alpha?"

[topics.comparison]
headers = ["A", "B"]
rows = [["1", "2"]]

[topics.quiz]
prompt = "Is this alpha?"
options = ["yes", "no"]
answer = "yes"

[topics.videos]
primary = "AAA"
secondary = "BBB"

[[topics]]
key = "beta"
title = "Beta"
explanation = "Beta explained."
code_sample = "class Beta {}"
diagram = "classDiagram"
"#;

pub fn minimal_store() -> Arc<ContentStore> {
    match ContentStore::parse(MINIMAL_CONTENT) {
        Ok(store) => Arc::new(store),
        Err(e) => panic!("minimal content is invalid: {e}"),
    }
}

/// An `App` over [`MINIMAL_CONTENT`], opened on `alpha`.
pub fn test_app() -> App {
    App::new(minimal_store())
}
