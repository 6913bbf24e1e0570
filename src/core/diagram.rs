//! # Diagram Parser
//!
//! Parses the Mermaid subset used by the lesson content into a small model.
//! Two diagram types are understood:
//!
//! - `classDiagram`: classes with members and annotations, plus
//!   inheritance/realization/composition/aggregation/association links.
//! - `erDiagram`: entities with attributes and cardinality relationships.
//!
//! Parsing is pure and strict: anything unrecognized is a [`DiagramError`]
//! naming the offending line, which the UI shows inside that one diagram.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Class,
    EntityRelationship,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub kind: DiagramKind,
    /// Classes (or entities) in first-mention order.
    pub classes: Vec<ClassNode>,
    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub name: String,
    pub annotation: Option<String>,
    pub fields: Vec<Member>,
    pub methods: Vec<Member>,
}

impl ClassNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            annotation: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Package,
}

impl Visibility {
    pub fn symbol(&self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classifier {
    Abstract,
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub visibility: Option<Visibility>,
    /// Member text without visibility or classifier markers.
    pub text: String,
    pub classifier: Option<Classifier>,
}

impl Member {
    fn parse(raw: &str) -> Self {
        let mut text = raw.trim();
        let visibility = text.chars().next().and_then(Visibility::from_symbol);
        if visibility.is_some() {
            text = text[1..].trim_start();
        }
        let classifier = if let Some(stripped) = text.strip_suffix('*') {
            text = stripped.trim_end();
            Some(Classifier::Abstract)
        } else if let Some(stripped) = text.strip_suffix('$') {
            text = stripped.trim_end();
            Some(Classifier::Static)
        } else {
            None
        };
        Self {
            visibility,
            text: text.to_string(),
            classifier,
        }
    }

    pub fn is_method(&self) -> bool {
        self.text.contains('(')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ZeroOrOne,
    ExactlyOne,
    ZeroOrMore,
    OneOrMore,
}

impl Cardinality {
    pub fn label(&self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "0..1",
            Cardinality::ExactlyOne => "1",
            Cardinality::ZeroOrMore => "0..*",
            Cardinality::OneOrMore => "1..*",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Inheritance,
    Realization,
    Composition,
    Aggregation,
    Association,
    Dependency,
    Link,
    DashedLink,
    Entity {
        source: Cardinality,
        target: Cardinality,
        identifying: bool,
    },
}

impl RelationKind {
    pub fn describe(&self) -> &'static str {
        match self {
            RelationKind::Inheritance => "inherits",
            RelationKind::Realization => "implements",
            RelationKind::Composition => "part of",
            RelationKind::Aggregation => "aggregated by",
            RelationKind::Association => "uses",
            RelationKind::Dependency => "depends on",
            RelationKind::Link | RelationKind::DashedLink => "linked",
            RelationKind::Entity {
                identifying: true, ..
            } => "identifying",
            RelationKind::Entity {
                identifying: false,
                ..
            } => "non-identifying",
        }
    }
}

/// A directed edge. For headed arrows `target` is the side carrying the
/// head (`Animal` in `Animal <|-- Dog`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub source: String,
    pub target: String,
    pub kind: RelationKind,
    pub label: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramError {
    /// 1-based line number in the source (0 when the whole source is at fault).
    pub line: usize,
    pub message: String,
}

impl DiagramError {
    fn at(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for DiagramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "line {}: {}", self.line, self.message)
        }
    }
}

impl std::error::Error for DiagramError {}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a diagram description.
pub fn parse(source: &str) -> Result<Diagram, DiagramError> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with("%%"));

    let Some((header_no, header)) = lines.next() else {
        return Err(DiagramError::at(0, "empty diagram"));
    };
    let kind = match header.split_whitespace().next() {
        Some("classDiagram") | Some("classDiagram-v2") => DiagramKind::Class,
        Some("erDiagram") => DiagramKind::EntityRelationship,
        _ => {
            return Err(DiagramError::at(
                header_no,
                format!("unsupported diagram type '{header}'"),
            ));
        }
    };

    let mut builder = Builder::new(kind);
    let mut open_body: Option<(usize, String)> = None;

    for (no, line) in lines {
        if let Some((_, name)) = &open_body {
            if line == "}" {
                open_body = None;
            } else {
                builder.add_body_line(name, line);
            }
            continue;
        }

        if line.starts_with("direction ") {
            continue;
        }

        let body_opened = match kind {
            DiagramKind::Class => builder.class_statement(no, line)?,
            DiagramKind::EntityRelationship => builder.er_statement(no, line)?,
        };
        if let Some(name) = body_opened {
            open_body = Some((no, name));
        }
    }

    if let Some((no, name)) = open_body {
        return Err(DiagramError::at(no, format!("'{name}' body is never closed")));
    }

    Ok(builder.finish())
}

struct Builder {
    kind: DiagramKind,
    classes: Vec<ClassNode>,
    relations: Vec<Relation>,
}

impl Builder {
    fn new(kind: DiagramKind) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            relations: Vec::new(),
        }
    }

    fn finish(self) -> Diagram {
        Diagram {
            kind: self.kind,
            classes: self.classes,
            relations: self.relations,
        }
    }

    fn class_mut(&mut self, name: &str) -> &mut ClassNode {
        let index = match self.classes.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.classes.push(ClassNode::new(name));
                self.classes.len() - 1
            }
        };
        &mut self.classes[index]
    }

    fn add_body_line(&mut self, name: &str, line: &str) {
        let is_er = self.kind == DiagramKind::EntityRelationship;
        let class = self.class_mut(name);
        if let Some(annotation) = parse_annotation(line) {
            class.annotation = Some(annotation.to_string());
            return;
        }
        if is_er {
            // `type name [PK|FK] ["comment"]`: kept as a plain field
            class.fields.push(Member {
                visibility: None,
                text: line.to_string(),
                classifier: None,
            });
            return;
        }
        let member = Member::parse(line);
        if member.is_method() {
            class.methods.push(member);
        } else {
            class.fields.push(member);
        }
    }

    /// Handle one top-level class diagram statement. Returns the class name
    /// when the statement opens a `{ ... }` body.
    fn class_statement(&mut self, no: usize, line: &str) -> Result<Option<String>, DiagramError> {
        if let Some(rest) = line.strip_prefix("class ") {
            let rest = rest.trim();
            let (name, opens) = match rest.strip_suffix('{') {
                Some(name) => (name.trim(), true),
                None => (rest, false),
            };
            let name = name.split('~').next().unwrap_or(name).trim();
            if !is_identifier(name) {
                return Err(DiagramError::at(no, format!("invalid class name '{name}'")));
            }
            self.class_mut(name);
            return Ok(opens.then(|| name.to_string()));
        }

        if let Some(annotation) = line.strip_prefix("<<") {
            let Some((annotation, name)) = annotation.split_once(">>") else {
                return Err(DiagramError::at(no, "unterminated annotation"));
            };
            let name = name.trim();
            if !is_identifier(name) {
                return Err(DiagramError::at(no, format!("invalid class name '{name}'")));
            }
            self.class_mut(name).annotation = Some(annotation.trim().to_string());
            return Ok(None);
        }

        let (head, label) = split_label(line);
        let tokens: Vec<&str> = head.split_whitespace().collect();
        match tokens.as_slice() {
            [from, arrow, to] if is_identifier(from) && is_identifier(to) => {
                let Some((kind, head_on_left)) = parse_class_arrow(arrow) else {
                    return Err(DiagramError::at(no, format!("unknown relationship '{arrow}'")));
                };
                let (source, target) = if head_on_left { (to, from) } else { (from, to) };
                self.class_mut(from);
                self.class_mut(to);
                self.relations.push(Relation {
                    source: source.to_string(),
                    target: target.to_string(),
                    kind,
                    label,
                });
                Ok(None)
            }
            // `Name : +member`
            [name] if is_identifier(name) && label.is_some() => {
                let member = Member::parse(label.as_deref().unwrap_or_default());
                let class = self.class_mut(name);
                if member.is_method() {
                    class.methods.push(member);
                } else {
                    class.fields.push(member);
                }
                Ok(None)
            }
            _ => Err(DiagramError::at(
                no,
                format!("unrecognized statement '{line}'"),
            )),
        }
    }

    fn er_statement(&mut self, no: usize, line: &str) -> Result<Option<String>, DiagramError> {
        if let Some(name) = line.strip_suffix('{') {
            let name = name.trim();
            if !is_identifier(name) {
                return Err(DiagramError::at(no, format!("invalid entity name '{name}'")));
            }
            self.class_mut(name);
            return Ok(Some(name.to_string()));
        }

        let (head, label) = split_label(line);
        let tokens: Vec<&str> = head.split_whitespace().collect();
        match tokens.as_slice() {
            [from, arrow, to] if is_identifier(from) && is_identifier(to) => {
                let Some(kind) = parse_er_arrow(arrow) else {
                    return Err(DiagramError::at(no, format!("unknown relationship '{arrow}'")));
                };
                self.class_mut(from);
                self.class_mut(to);
                self.relations.push(Relation {
                    source: from.to_string(),
                    target: to.to_string(),
                    kind,
                    label: label.map(|l| l.trim_matches('"').to_string()),
                });
                Ok(None)
            }
            [name] if is_identifier(name) && label.is_none() => {
                self.class_mut(name);
                Ok(None)
            }
            _ => Err(DiagramError::at(
                no,
                format!("unrecognized statement '{line}'"),
            )),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        && !s.starts_with('-')
}

fn parse_annotation(line: &str) -> Option<&str> {
    line.strip_prefix("<<")?.strip_suffix(">>").map(str::trim)
}

fn split_label(line: &str) -> (&str, Option<String>) {
    match line.split_once(':') {
        Some((head, label)) => {
            let label = label.trim();
            (head.trim(), (!label.is_empty()).then(|| label.to_string()))
        }
        None => (line, None),
    }
}

/// Returns the relation kind and whether the arrow head sits on the left.
fn parse_class_arrow(arrow: &str) -> Option<(RelationKind, bool)> {
    let (body, dashed) = if let Some(i) = arrow.find("--") {
        (i, false)
    } else {
        (arrow.find("..")?, true)
    };
    let left = &arrow[..body];
    let right = &arrow[body + 2..];

    let head = |h: &str, left_side: bool| -> Option<RelationKind> {
        let kind = match (h, left_side) {
            ("<|", true) | ("|>", false) if dashed => RelationKind::Realization,
            ("<|", true) | ("|>", false) => RelationKind::Inheritance,
            ("*", _) => RelationKind::Composition,
            ("o", _) => RelationKind::Aggregation,
            ("<", true) | (">", false) if dashed => RelationKind::Dependency,
            ("<", true) | (">", false) => RelationKind::Association,
            _ => return None,
        };
        Some(kind)
    };

    match (left.is_empty(), right.is_empty()) {
        (true, true) => Some((
            if dashed {
                RelationKind::DashedLink
            } else {
                RelationKind::Link
            },
            false,
        )),
        (false, true) => head(left, true).map(|k| (k, true)),
        (true, false) => head(right, false).map(|k| (k, false)),
        (false, false) => None,
    }
}

fn parse_er_arrow(arrow: &str) -> Option<RelationKind> {
    let (body, identifying) = if let Some(i) = arrow.find("--") {
        (i, true)
    } else {
        (arrow.find("..")?, false)
    };
    let source = match &arrow[..body] {
        "|o" => Cardinality::ZeroOrOne,
        "||" => Cardinality::ExactlyOne,
        "}o" => Cardinality::ZeroOrMore,
        "}|" => Cardinality::OneOrMore,
        _ => return None,
    };
    let target = match &arrow[body + 2..] {
        "o|" => Cardinality::ZeroOrOne,
        "||" => Cardinality::ExactlyOne,
        "o{" => Cardinality::ZeroOrMore,
        "|{" => Cardinality::OneOrMore,
        _ => return None,
    };
    Some(RelationKind::Entity {
        source,
        target,
        identifying,
    })
}
