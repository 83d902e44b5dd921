//! Locating the editable surface inside a host-provided tree.
//!
//! A host hands the wrapper a single child node. That node must be, or must
//! contain, exactly one editable text surface; anything else is reported when
//! mounting.

use thiserror::Error;

use crate::{binding::MarkdownArea, engine::Engine};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
  #[error("wrapper needs a child element")]
  MissingChild,
  #[error("wrapper child must be an element, not text")]
  NotTraversable,
  #[error("wrapper child does not contain an editable text surface")]
  NoEditableSurface,
  #[error("wrapper child contains {0} editable text surfaces, expected one")]
  MultipleEditableSurfaces(usize),
}

pub trait SurfaceNode: Sized {
  /// Child nodes, or `None` for leaves that cannot be traversed (text).
  fn children(&self) -> Option<&[Self]>;

  fn is_editable_surface(&self) -> bool;

  /// Text the surface starts out with.
  fn initial_value(&self) -> &str {
    ""
  }
}

/// The single editable surface under `root`.
pub fn locate_surface<N: SurfaceNode>(root: Option<&N>) -> Result<&N, SurfaceError> {
  let root = root.ok_or(SurfaceError::MissingChild)?;
  if root.is_editable_surface() {
    return Ok(root);
  }
  if root.children().is_none() {
    return Err(SurfaceError::NotTraversable);
  }

  let mut found = Vec::new();
  let mut stack = vec![root];
  while let Some(node) = stack.pop() {
    if node.is_editable_surface() {
      found.push(node);
    } else if let Some(children) = node.children() {
      stack.extend(children.iter().rev());
    }
  }

  match found.as_slice() {
    [] => Err(SurfaceError::NoEditableSurface),
    [surface] => Ok(*surface),
    many => Err(SurfaceError::MultipleEditableSurfaces(many.len())),
  }
}

/// A minimal element tree for hosts without their own node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
  Text(String),
  Node {
    tag:      String,
    value:    String,
    children: Vec<Element>,
  },
}

impl Element {
  pub fn new(tag: impl Into<String>) -> Self {
    Element::Node {
      tag:      tag.into(),
      value:    String::new(),
      children: Vec::new(),
    }
  }

  pub fn text(text: impl Into<String>) -> Self {
    Element::Text(text.into())
  }

  pub fn textarea(value: impl Into<String>) -> Self {
    Element::new("textarea").with_value(value)
  }

  pub fn with_child(mut self, child: Element) -> Self {
    if let Element::Node { children, .. } = &mut self {
      children.push(child);
    }
    self
  }

  pub fn with_value(mut self, text: impl Into<String>) -> Self {
    if let Element::Node { value, .. } = &mut self {
      *value = text.into();
    }
    self
  }

  pub fn tag(&self) -> Option<&str> {
    match self {
      Element::Node { tag, .. } => Some(tag.as_str()),
      Element::Text(_) => None,
    }
  }
}

impl SurfaceNode for Element {
  fn children(&self) -> Option<&[Self]> {
    match self {
      Element::Node { children, .. } => Some(children.as_slice()),
      Element::Text(_) => None,
    }
  }

  fn is_editable_surface(&self) -> bool {
    self.tag().is_some_and(|tag| tag.eq_ignore_ascii_case("textarea"))
  }

  fn initial_value(&self) -> &str {
    match self {
      Element::Node { value, .. } => value.as_str(),
      Element::Text(_) => "",
    }
  }
}

pub struct Wrapper;

impl Wrapper {
  /// Binds a [`MarkdownArea`] to the surface inside `child`.
  pub fn mount<N: SurfaceNode>(child: Option<&N>) -> Result<MarkdownArea, SurfaceError> {
    Self::mount_with(child, Engine::default())
  }

  pub fn mount_with<N: SurfaceNode>(child: Option<&N>, engine: Engine) -> Result<MarkdownArea, SurfaceError> {
    let surface = locate_surface(child)?;
    tracing::debug!("mounted markdown area");
    Ok(MarkdownArea::new(surface.initial_value()).with_engine(engine))
  }
}
