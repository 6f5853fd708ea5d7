use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::DomHost;
use crate::error::VizError;

/// Handle to a node of a [`MemoryDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// One element of the in-memory tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryNode {
	/// Tag name.
	pub tag: String,
	/// Attributes, including `id` and `class`.
	pub attributes: BTreeMap<String, String>,
	/// Text content.
	pub text: Option<String>,
	/// Parent while attached.
	pub parent: Option<ElementId>,
	/// Children in document order.
	pub children: Vec<ElementId>,
}

impl MemoryNode {
	fn new(tag: &str) -> Self {
		Self {
			tag: tag.into(),
			..Self::default()
		}
	}

	/// The `id` attribute.
	pub fn id(&self) -> Option<&str> {
		self.attributes.get("id").map(String::as_str)
	}

	/// Look up an attribute.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).map(String::as_str)
	}
}

#[derive(Debug)]
struct Tree {
	nodes: Vec<MemoryNode>,
}

const ROOT: ElementId = ElementId(0);

/// A headless document: an arena of elements rooted at `body`.
///
/// Clones share the same tree, so a test can keep one handle for inspection
/// while a widget owns another.
#[derive(Clone, Debug)]
pub struct MemoryDom {
	tree: Rc<RefCell<Tree>>,
}

impl Default for MemoryDom {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDom {
	/// An empty document containing only `body`.
	pub fn new() -> Self {
		Self {
			tree: Rc::new(RefCell::new(Tree {
				nodes: vec![MemoryNode::new("body")],
			})),
		}
	}

	/// The root element.
	pub fn body(&self) -> ElementId {
		ROOT
	}

	/// Append a `tag` element with the given id under `parent`.
	pub fn append_element(&self, parent: ElementId, tag: &str, id: &str) -> ElementId {
		let mut node = MemoryNode::new(tag);
		node.attributes.insert("id".into(), id.into());
		self.tree.borrow_mut().append(parent, node)
	}

	/// Snapshot of a node, attached or not.
	pub fn node(&self, element: ElementId) -> Option<MemoryNode> {
		self.tree.borrow().nodes.get(element.0).cloned()
	}

	/// Children of `element` in document order.
	pub fn children(&self, element: ElementId) -> Vec<ElementId> {
		self.tree
			.borrow()
			.nodes
			.get(element.0)
			.map(|n| n.children.clone())
			.unwrap_or_default()
	}

	/// Whether `element` is reachable from `body`.
	pub fn is_attached(&self, element: ElementId) -> bool {
		self.tree.borrow().is_attached(element)
	}

	/// Every attached element in document order, for comparing document
	/// states.
	pub fn snapshot(&self) -> Vec<(ElementId, MemoryNode)> {
		let tree = self.tree.borrow();
		let mut out = Vec::new();
		tree.collect_attached(ROOT, &mut out);
		out
	}

	/// Number of elements ever created, attached or not.
	pub fn created_count(&self) -> usize {
		self.tree.borrow().nodes.len()
	}
}

impl Tree {
	fn append(&mut self, parent: ElementId, mut node: MemoryNode) -> ElementId {
		let id = ElementId(self.nodes.len());
		node.parent = Some(parent);
		self.nodes.push(node);
		self.nodes[parent.0].children.push(id);
		id
	}

	fn contains(&self, element: ElementId) -> bool {
		element.0 < self.nodes.len()
	}

	fn is_attached(&self, element: ElementId) -> bool {
		let mut current = element;
		loop {
			if current == ROOT {
				return true;
			}
			match self.nodes.get(current.0).and_then(|n| n.parent) {
				Some(parent) => current = parent,
				None => return false,
			}
		}
	}

	fn detach(&mut self, element: ElementId) {
		if let Some(parent) = self.nodes[element.0].parent.take() {
			self.nodes[parent.0].children.retain(|&c| c != element);
		}
	}

	fn collect_attached(&self, element: ElementId, out: &mut Vec<(ElementId, MemoryNode)>) {
		let node = &self.nodes[element.0];
		out.push((element, node.clone()));
		for &child in &node.children {
			self.collect_attached(child, out);
		}
	}
}

impl DomHost for MemoryDom {
	type Element = ElementId;

	fn element_by_id(&self, id: &str) -> Option<ElementId> {
		let tree = self.tree.borrow();
		(0..tree.nodes.len())
			.map(ElementId)
			.find(|&e| tree.nodes[e.0].id() == Some(id) && tree.is_attached(e))
	}

	fn generate_div(&mut self, parent: &ElementId, name: &str) -> Result<ElementId, VizError> {
		let mut tree = self.tree.borrow_mut();
		if !tree.contains(*parent) || !tree.is_attached(*parent) {
			return Err(VizError::Dom(format!("parent of `{name}` is not in the document")));
		}
		let existing = tree.nodes[parent.0]
			.children
			.iter()
			.copied()
			.find(|&c| tree.nodes[c.0].tag == "div" && tree.nodes[c.0].id() == Some(name));
		if let Some(div) = existing {
			return Ok(div);
		}
		let mut div = MemoryNode::new("div");
		div.attributes.insert("id".into(), name.into());
		div.attributes.insert("class".into(), name.into());
		Ok(tree.append(*parent, div))
	}

	fn append_svg(&mut self, parent: &ElementId, width: f64, height: f64) -> Result<ElementId, VizError> {
		let mut tree = self.tree.borrow_mut();
		if !tree.contains(*parent) {
			return Err(VizError::Dom("svg parent is not in the document".into()));
		}
		let mut svg = MemoryNode::new("svg");
		svg.attributes.insert("width".into(), width.to_string());
		svg.attributes.insert("height".into(), height.to_string());
		Ok(tree.append(*parent, svg))
	}

	fn append_svg_child(&mut self, parent: &ElementId, tag: &str) -> Result<ElementId, VizError> {
		let mut tree = self.tree.borrow_mut();
		if !tree.contains(*parent) {
			return Err(VizError::Dom(format!("parent of `{tag}` is not in the document")));
		}
		Ok(tree.append(*parent, MemoryNode::new(tag)))
	}

	fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) -> Result<(), VizError> {
		let mut tree = self.tree.borrow_mut();
		let node = tree
			.nodes
			.get_mut(element.0)
			.ok_or_else(|| VizError::Dom(format!("no element to set `{name}` on")))?;
		node.attributes.insert(name.into(), value.into());
		Ok(())
	}

	fn set_text(&mut self, element: &ElementId, text: &str) -> Result<(), VizError> {
		let mut tree = self.tree.borrow_mut();
		let node = tree
			.nodes
			.get_mut(element.0)
			.ok_or_else(|| VizError::Dom("no element to set text on".into()))?;
		node.text = Some(text.into());
		Ok(())
	}

	fn remove_element_if_exists(&mut self, element: Option<&ElementId>) {
		let Some(&element) = element else {
			return;
		};
		let mut tree = self.tree.borrow_mut();
		if tree.contains(element) {
			tree.detach(element);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generate_div_reuses_an_existing_container() {
		let mut dom = MemoryDom::new();
		let content = dom.append_element(dom.body(), "div", "content");
		let first = dom.generate_div(&content, "chart").unwrap();
		let second = dom.generate_div(&content, "chart").unwrap();
		assert_eq!(first, second);
		assert_eq!(dom.children(content), vec![first]);
		let node = dom.node(first).unwrap();
		assert_eq!(node.attribute("class"), Some("chart"));
	}

	#[test]
	fn removed_elements_are_no_longer_found() {
		let mut dom = MemoryDom::new();
		let content = dom.append_element(dom.body(), "div", "content");
		let div = dom.generate_div(&content, "graph").unwrap();
		assert_eq!(dom.element_by_id("graph"), Some(div));

		dom.remove_element_if_exists(Some(&div));
		assert!(!dom.is_attached(div));
		assert_eq!(dom.element_by_id("graph"), None);

		dom.remove_element_if_exists(Some(&div));
		dom.remove_element_if_exists(None);
		assert_eq!(dom.children(content), Vec::new());
	}

	#[test]
	fn generate_div_rejects_a_detached_parent() {
		let mut dom = MemoryDom::new();
		let content = dom.append_element(dom.body(), "div", "content");
		dom.remove_element_if_exists(Some(&content));
		assert!(matches!(dom.generate_div(&content, "graph"), Err(VizError::Dom(_))));
	}

	#[test]
	fn attribute_updates_keep_element_identity() {
		let mut dom = MemoryDom::new();
		let body = dom.body();
		let svg = dom.append_svg(&body, 10.0, 10.0).unwrap();
		let circle = dom.append_svg_child(&svg, "circle").unwrap();
		let created = dom.created_count();

		dom.set_attribute(&circle, "cx", "1").unwrap();
		dom.set_attribute(&circle, "cx", "2").unwrap();
		dom.set_text(&circle, "label").unwrap();

		assert_eq!(dom.created_count(), created);
		assert_eq!(dom.children(svg), vec![circle]);
		let node = dom.node(circle).unwrap();
		assert_eq!(node.attribute("cx"), Some("2"));
		assert_eq!(node.text.as_deref(), Some("label"));
	}

	#[test]
	fn snapshot_lists_only_attached_elements() {
		let mut dom = MemoryDom::new();
		let content = dom.append_element(dom.body(), "div", "content");
		let div = dom.generate_div(&content, "chart").unwrap();
		assert_eq!(dom.snapshot().len(), 3);

		dom.remove_element_if_exists(Some(&div));
		let ids: Vec<_> = dom.snapshot().into_iter().map(|(id, _)| id).collect();
		assert_eq!(ids, vec![dom.body(), content]);
	}
}
