//! Ladder validation.

use crate::components::Component;
use crate::error::{LadderError, Result};

use super::Link;

/// Validate a component sequence for reduction.
///
/// Checks:
/// - The sequence is not empty
/// - The head is linked as FIRST
/// - No later component is linked as FIRST
/// - Every magnitude is positive and finite
pub fn validate_chain(components: &[Component]) -> Result<()> {
    let head = components.first().ok_or(LadderError::EmptyChain)?;

    if head.link != Link::First {
        return Err(LadderError::malformed(
            0,
            format!(
                "'{}' is linked {} but has no preceding block",
                head.name, head.link
            ),
        ));
    }

    for (position, component) in components.iter().enumerate() {
        if position > 0 && component.link == Link::First {
            return Err(LadderError::malformed(
                position,
                format!("'{}' is linked first but is not the head", component.name),
            ));
        }

        let magnitude = component.element.magnitude();
        if !magnitude.is_finite() || magnitude <= 0.0 {
            return Err(LadderError::InvalidMagnitude { value: magnitude });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ComponentId;
    use crate::components::Element;

    fn resistor(id: usize, link: Link) -> Component {
        Component::new(
            ComponentId(id),
            format!("R{}", id + 1),
            Element::resistor(100.0).unwrap(),
            link,
        )
    }

    #[test]
    fn test_valid_chain() {
        let chain = vec![
            resistor(0, Link::First),
            resistor(1, Link::Series),
            resistor(2, Link::Parallel),
        ];
        assert!(validate_chain(&chain).is_ok());
    }

    #[test]
    fn test_empty_chain() {
        assert!(matches!(validate_chain(&[]), Err(LadderError::EmptyChain)));
    }

    #[test]
    fn test_parallel_head_is_malformed() {
        let chain = vec![resistor(0, Link::Parallel)];
        assert!(matches!(
            validate_chain(&chain),
            Err(LadderError::MalformedChain { position: 0, .. })
        ));
    }

    #[test]
    fn test_second_first_is_malformed() {
        let chain = vec![resistor(0, Link::First), resistor(1, Link::First)];
        assert!(matches!(
            validate_chain(&chain),
            Err(LadderError::MalformedChain { position: 1, .. })
        ));
    }
}
