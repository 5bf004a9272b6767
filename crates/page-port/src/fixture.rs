//! In-memory document used to drive the pipeline stages in tests and demos.
//!
//! The fixture is a small element arena with just enough behavior to stand in
//! for a rendered page: tree-order queries against the parsed locator form,
//! layout-parent visibility, scripted content heights for the loader, and
//! click effects that mutate the tree the way a live page would.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::PageError;
use crate::locator::{CompoundSelector, Locator};
use crate::ports::{ElementId, PagePort};

/// Blueprint for one fixture element.
#[derive(Clone, Debug)]
pub struct NodeSpec {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    hidden: bool,
}

impl NodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            classes: Vec::new(),
            attrs: Vec::new(),
            text: None,
            hidden: false,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Excluded from layout until revealed, like `display: none` content.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Scripted reaction to a click on a fixture element.
#[derive(Clone, Debug)]
pub enum ClickEffect {
    /// Make a hidden subtree participate in layout.
    Reveal(ElementId),
    /// Detach a subtree from the document.
    Remove(ElementId),
    /// Insert a fresh element under `parent`.
    Append { parent: ElementId, spec: NodeSpec },
}

#[derive(Debug)]
struct FixtureNode {
    tag: String,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    text: Option<String>,
    hidden: bool,
    detached: bool,
    parent: Option<usize>,
    children: Vec<usize>,
    effects: Vec<ClickEffect>,
}

#[derive(Debug, Default)]
struct FixtureState {
    nodes: Vec<FixtureNode>,
    pending_heights: VecDeque<i64>,
    height: i64,
    growth_per_measure: i64,
    clicks: Vec<ElementId>,
    scrolls: u32,
    broken: Option<String>,
}

pub struct FixturePage {
    state: Mutex<FixtureState>,
}

impl FixturePage {
    pub fn new() -> Self {
        let mut state = FixtureState::default();
        state.nodes.push(FixtureNode {
            tag: "body".into(),
            classes: Vec::new(),
            attrs: HashMap::new(),
            text: None,
            hidden: false,
            detached: false,
            parent: None,
            children: Vec::new(),
            effects: Vec::new(),
        });
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    pub fn append(&self, parent: ElementId, spec: NodeSpec) -> ElementId {
        let mut state = self.state.lock();
        ElementId(state.append(parent.0 as usize, spec) as u64)
    }

    pub fn reveal(&self, el: ElementId) {
        self.state.lock().nodes[el.0 as usize].hidden = false;
    }

    pub fn on_click(&self, el: ElementId, effect: ClickEffect) {
        self.state.lock().nodes[el.0 as usize].effects.push(effect);
    }

    /// Script the next content-height measurements; the last value sticks.
    pub fn set_heights(&self, heights: impl IntoIterator<Item = i64>) {
        self.state.lock().pending_heights.extend(heights);
    }

    /// After scripted heights run out, grow by `step` per measurement.
    pub fn grow_forever(&self, step: i64) {
        self.state.lock().growth_per_measure = step;
    }

    /// Make every subsequent document read fail, as if the page went away.
    pub fn break_document(&self, message: impl Into<String>) {
        self.state.lock().broken = Some(message.into());
    }

    /// Clicks dispatched so far, in order.
    pub fn clicks(&self) -> Vec<ElementId> {
        self.state.lock().clicks.clone()
    }

    pub fn scroll_count(&self) -> u32 {
        self.state.lock().scrolls
    }
}

impl Default for FixturePage {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureState {
    fn append(&mut self, parent: usize, spec: NodeSpec) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(FixtureNode {
            tag: spec.tag,
            classes: spec.classes,
            attrs: spec.attrs.into_iter().collect(),
            text: spec.text,
            hidden: spec.hidden,
            detached: false,
            parent: Some(parent),
            children: Vec::new(),
            effects: Vec::new(),
        });
        self.nodes[parent].children.push(idx);
        idx
    }

    fn check_readable(&self) -> Result<(), PageError> {
        match &self.broken {
            Some(message) => Err(PageError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn node(&self, el: ElementId) -> Result<&FixtureNode, PageError> {
        self.nodes
            .get(el.0 as usize)
            .filter(|node| !node.detached)
            .ok_or(PageError::Stale(el))
    }

    fn matches(&self, idx: usize, compound: &CompoundSelector) -> bool {
        let node = &self.nodes[idx];
        if let Some(tag) = &compound.tag {
            if node.tag != *tag {
                return false;
            }
        }
        if !compound
            .classes
            .iter()
            .all(|class| node.classes.iter().any(|c| c == class))
        {
            return false;
        }
        compound.attrs.iter().all(|step| {
            match (node.attrs.get(&step.name), &step.value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }

    fn matches_any(&self, idx: usize, compounds: &[CompoundSelector]) -> bool {
        compounds.iter().any(|compound| self.matches(idx, compound))
    }

    /// Preorder walk of the subtree rooted at `root`, root included.
    fn preorder(&self, root: usize, out: &mut Vec<usize>) {
        if self.nodes[root].detached {
            return;
        }
        out.push(root);
        for child in self.nodes[root].children.clone() {
            self.preorder(child, out);
        }
    }

    fn select(&self, root: usize, locator: &Locator, include_root: bool) -> Vec<ElementId> {
        let compounds = locator.compounds();
        let mut order = Vec::new();
        self.preorder(root, &mut order);
        order
            .into_iter()
            .filter(|idx| include_root || *idx != root)
            .filter(|idx| self.matches_any(*idx, &compounds))
            .map(|idx| ElementId(idx as u64))
            .collect()
    }

    fn in_layout(&self, idx: usize) -> bool {
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            let node = &self.nodes[i];
            if node.hidden || node.detached {
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    fn detach(&mut self, idx: usize) {
        if let Some(parent) = self.nodes[idx].parent {
            self.nodes[parent].children.retain(|c| *c != idx);
        }
        self.nodes[idx].detached = true;
    }

    fn apply_click(&mut self, el: ElementId) {
        self.clicks.push(el);
        let effects = self.nodes[el.0 as usize].effects.clone();
        for effect in effects {
            match effect {
                ClickEffect::Reveal(target) => self.nodes[target.0 as usize].hidden = false,
                ClickEffect::Remove(target) => self.detach(target.0 as usize),
                ClickEffect::Append { parent, spec } => {
                    self.append(parent.0 as usize, spec);
                }
            }
        }
    }

    fn collect_text(&self, idx: usize, parts: &mut Vec<String>) {
        let node = &self.nodes[idx];
        if node.detached || node.hidden {
            return;
        }
        if let Some(text) = &node.text {
            parts.push(text.clone());
        }
        for child in &node.children {
            self.collect_text(*child, parts);
        }
    }

    fn measure(&mut self) -> i64 {
        if let Some(next) = self.pending_heights.pop_front() {
            self.height = next;
        } else {
            self.height += self.growth_per_measure;
        }
        self.height
    }
}

#[async_trait]
impl PagePort for FixturePage {
    async fn query(&self, locator: &Locator) -> Result<Vec<ElementId>, PageError> {
        let state = self.state.lock();
        state.check_readable()?;
        Ok(state.select(0, locator, true))
    }

    async fn query_within(
        &self,
        root: ElementId,
        locator: &Locator,
    ) -> Result<Vec<ElementId>, PageError> {
        let state = self.state.lock();
        state.check_readable()?;
        state.node(root)?;
        Ok(state.select(root.0 as usize, locator, false))
    }

    async fn text(&self, el: ElementId) -> Result<String, PageError> {
        let state = self.state.lock();
        state.check_readable()?;
        state.node(el)?;
        let mut parts = Vec::new();
        state.collect_text(el.0 as usize, &mut parts);
        Ok(parts.join("\n"))
    }

    async fn attribute(&self, el: ElementId, name: &str) -> Result<Option<String>, PageError> {
        let state = self.state.lock();
        state.check_readable()?;
        Ok(state.node(el)?.attrs.get(name).cloned())
    }

    async fn closest(
        &self,
        el: ElementId,
        locator: &Locator,
    ) -> Result<Option<ElementId>, PageError> {
        let state = self.state.lock();
        state.check_readable()?;
        state.node(el)?;
        let compounds = locator.compounds();
        let mut cursor = Some(el.0 as usize);
        while let Some(idx) = cursor {
            if state.matches_any(idx, &compounds) {
                return Ok(Some(ElementId(idx as u64)));
            }
            cursor = state.nodes[idx].parent;
        }
        Ok(None)
    }

    async fn is_visible(&self, el: ElementId) -> Result<bool, PageError> {
        let state = self.state.lock();
        state.check_readable()?;
        state.node(el)?;
        Ok(state.in_layout(el.0 as usize))
    }

    async fn click(&self, el: ElementId) -> Result<(), PageError> {
        let mut state = self.state.lock();
        state.check_readable()?;
        state.node(el)?;
        state.apply_click(el);
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> Result<(), PageError> {
        let mut state = self.state.lock();
        state.check_readable()?;
        state.scrolls += 1;
        Ok(())
    }

    async fn content_height(&self) -> Result<i64, PageError> {
        let mut state = self.state.lock();
        state.check_readable()?;
        Ok(state.measure())
    }
}
