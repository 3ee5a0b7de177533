use crate::core::Engine;
use crate::error::{EngineError, EngineResult};

/// Validate all engine invariants. Returns an error if any is violated.
///
/// Cheap enough for debug assertions and tests; never needed on the hot
/// path, since every mutation re-establishes these by construction.
pub fn validate_invariants(engine: &Engine) -> EngineResult<()> {
    // Invariant 1: Selection clamp — the highlighted row is valid for the
    // current result set (index 0 stands for "nothing" when results are empty).
    if let Some(session) = engine.palette() {
        let bound = session.results().len().max(1);
        if session.selected() >= bound {
            return Err(EngineError::InvariantViolation(format!(
                "selected index {} out of range for {} results",
                session.selected(),
                session.results().len()
            )));
        }
    } else if !engine.palette_listeners().is_empty() {
        // Invariant 2: Listener lifecycle — a closed surface holds no guards.
        return Err(EngineError::InvariantViolation(
            "closed palette still holds listener guards".to_string(),
        ));
    }

    // Invariant 3: Active anchor validity — if set, it references an
    // attached anchor.
    if let Some(active) = engine.spy().active() {
        if engine.spy().anchor(active).is_none() {
            return Err(EngineError::InvariantViolation(format!(
                "active anchor '{active}' is not attached"
            )));
        }
    }

    // Invariant 4: Dock containment — the resting point lies inside the
    // viewport.
    let viewport = engine.viewport();
    let resting = engine.dock().resting();
    if resting.x < 0.0
        || resting.x > viewport.width
        || resting.y < 0.0
        || resting.y > viewport.height
    {
        return Err(EngineError::InvariantViolation(format!(
            "dock resting point ({}, {}) outside viewport",
            resting.x, resting.y
        )));
    }

    Ok(())
}
