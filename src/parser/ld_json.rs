use scraper::Html;
use serde_json::{Map, Value};

use super::dom::css;
use super::ExtractionError;

/// Node types the crawler knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Organization,
    Person,
    Article,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Organization => "Organization",
            NodeKind::Person => "Person",
            NodeKind::Article => "Article",
        }
    }
}

/// A JSON-LD node keyed by its declared `@type`.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphNode {
    Organization(Map<String, Value>),
    Person(Map<String, Value>),
    Article(Map<String, Value>),
    Other(Map<String, Value>),
}

impl GraphNode {
    fn from_object(fields: Map<String, Value>) -> Self {
        let kind = [NodeKind::Organization, NodeKind::Person, NodeKind::Article]
            .into_iter()
            .find(|k| declares_type(fields.get("@type"), k.as_str()));
        match kind {
            Some(NodeKind::Organization) => GraphNode::Organization(fields),
            Some(NodeKind::Person) => GraphNode::Person(fields),
            Some(NodeKind::Article) => GraphNode::Article(fields),
            None => GraphNode::Other(fields),
        }
    }

    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            GraphNode::Organization(_) => Some(NodeKind::Organization),
            GraphNode::Person(_) => Some(NodeKind::Person),
            GraphNode::Article(_) => Some(NodeKind::Article),
            GraphNode::Other(_) => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        match self {
            GraphNode::Organization(m)
            | GraphNode::Person(m)
            | GraphNode::Article(m)
            | GraphNode::Other(m) => m,
        }
    }
}

/// `@type` is either a single name or a list of names.
fn declares_type(value: Option<&Value>, name: &str) -> bool {
    match value {
        Some(Value::String(s)) => s == name,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(name)),
        _ => false,
    }
}

/// The nodes of one JSON-LD block, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LdGraph {
    pub nodes: Vec<GraphNode>,
}

impl LdGraph {
    /// Read the first `application/ld+json` script of the page.
    pub fn from_document(doc: &Html) -> Result<Self, ExtractionError> {
        let sel = css(r#"script[type="application/ld+json"]"#)?;
        let script = doc
            .select(&sel)
            .next()
            .ok_or(ExtractionError::MissingLdJson)?;
        let text: String = script.text().collect();
        Self::parse(&text)
    }

    /// Accepts an `@graph` wrapper, a bare array of nodes, or one node.
    pub fn parse(json: &str) -> Result<Self, ExtractionError> {
        let root: Value = serde_json::from_str(json.trim())?;
        let items = match root {
            Value::Object(mut obj) => match obj.remove("@graph") {
                Some(Value::Array(graph)) => graph,
                Some(_) => return Err(ExtractionError::UnexpectedShape("@graph is not a list")),
                None => vec![Value::Object(obj)],
            },
            Value::Array(items) => items,
            _ => return Err(ExtractionError::UnexpectedShape("root is not an object or list")),
        };

        let nodes = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(fields) => Some(GraphNode::from_object(fields)),
                _ => None,
            })
            .collect();
        Ok(Self { nodes })
    }

    /// First node of `kind`, if any.
    pub fn first(&self, kind: NodeKind) -> Option<&Map<String, Value>> {
        self.all(kind).next()
    }

    pub fn all(&self, kind: NodeKind) -> impl Iterator<Item = &Map<String, Value>> {
        self.nodes
            .iter()
            .filter(move |n| n.kind() == Some(kind))
            .map(GraphNode::fields)
    }
}
