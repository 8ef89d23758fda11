//! Ordered ladder of components.

use log::debug;

use super::types::{ComponentId, Link};
use super::validate::validate_chain;
use crate::components::{Component, Element, Unit};
use crate::dsl::LadderAst;
use crate::error::{LadderError, Result};

/// The ordered component list that every reduction is computed from.
///
/// The ladder is the single source of truth: it stores components only, never
/// an accumulated impedance. Editing operations keep the FIRST-leads
/// invariant, so any ladder obtained through this API reduces without a
/// [`LadderError::MalformedChain`].
#[derive(Debug, Clone, Default)]
pub struct Ladder {
    components: Vec<Component>,
    next_id: usize,
}

impl Ladder {
    /// Create an empty ladder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ladder from components that already carry ids.
    pub fn from_components(components: Vec<Component>) -> Result<Self> {
        validate_chain(&components)?;
        let next_id = components
            .iter()
            .map(|c| c.id.0 + 1)
            .max()
            .unwrap_or(0);
        Ok(Self {
            components,
            next_id,
        })
    }

    /// Build a ladder from a parsed description.
    pub fn from_ast(ast: &LadderAst) -> Result<Self> {
        let mut ladder = Self::new();

        for def in &ast.components {
            let unit = match &def.unit {
                Some(symbol) => Unit::parse(symbol, def.kind).map_err(|e| {
                    LadderError::invalid_component(&def.name, def.line, e.to_string())
                })?,
                None => def.kind.quantity().base_unit(),
            };
            let element = Element::new(def.kind, def.value, unit)
                .map_err(|e| LadderError::invalid_component(&def.name, def.line, e.to_string()))?;

            ladder
                .push(def.name.clone(), element, def.link)
                .map_err(|e| LadderError::invalid_component(&def.name, def.line, e.to_string()))?;
        }

        Ok(ladder)
    }

    /// All components in ladder order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Find a component by id.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Position of a component in ladder order.
    pub fn position(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id == id)
    }

    /// Append a component.
    ///
    /// The first component must be linked FIRST and no later one may be.
    pub fn push(&mut self, name: impl Into<String>, element: Element, link: Link) -> Result<ComponentId> {
        let position = self.components.len();
        check_link(position, link)?;

        let id = ComponentId(self.next_id);
        self.next_id += 1;

        let component = Component::new(id, name, element, link);
        debug!(
            "Appending {} '{}' ({} {}) as {}",
            component.kind(),
            component.name,
            element.magnitude(),
            element.unit(),
            link
        );
        self.components.push(component);
        Ok(id)
    }

    /// Replace the element of a component, keeping its id, name and link.
    pub fn set_element(&mut self, id: ComponentId, element: Element) -> Result<()> {
        let component = self.get_mut(id)?;
        component.element = element;
        Ok(())
    }

    /// Change how a component links to its predecessor.
    pub fn set_link(&mut self, id: ComponentId, link: Link) -> Result<()> {
        let position = self
            .position(id)
            .ok_or(LadderError::ComponentNotFound { id: id.0 })?;
        check_link(position, link)?;
        self.components[position].link = link;
        Ok(())
    }

    /// Rename a component.
    pub fn rename(&mut self, id: ComponentId, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Remove a component and return it.
    ///
    /// Removing the head promotes the next component to FIRST; nothing else
    /// is repaired since every reduction starts over from the full list.
    pub fn remove(&mut self, id: ComponentId) -> Result<Component> {
        let position = self
            .position(id)
            .ok_or(LadderError::ComponentNotFound { id: id.0 })?;
        let removed = self.components.remove(position);

        if position == 0 {
            if let Some(head) = self.components.first_mut() {
                debug!("Promoting '{}' from {} to first", head.name, head.link);
                head.link = Link::First;
            }
        }

        Ok(removed)
    }

    /// Remove every component. Ids keep counting up.
    pub fn clear(&mut self) {
        self.components.clear();
    }

    fn get_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
        self.components
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(LadderError::ComponentNotFound { id: id.0 })
    }
}

fn check_link(position: usize, link: Link) -> Result<()> {
    match (position, link) {
        (0, Link::First) => Ok(()),
        (0, other) => Err(LadderError::malformed(
            0,
            format!("the first component must be linked first, not {}", other),
        )),
        (_, Link::First) => Err(LadderError::malformed(
            position,
            "only the first component may be linked first",
        )),
        _ => Ok(()),
    }
}
