// THEORY:
// The `visibility` module is the stateless geometric layer of the engine. It
// answers exactly one question per sample: given where the observer is and
// which way it faces, does the target currently fall inside its cone of
// vision and detection range? It has no memory of previous frames — temporal
// smoothing is the `perception` module's job, and pruning of dead references
// happens before this code ever runs.
//
// Key architectural principles & algorithm steps:
// 1.  **Distance gate**: The squared distance to the target is compared
//     against the squared range, avoiding a square root on the common path.
//     A non-positive `max_distance` disables the gate entirely.
// 2.  **Cone gate**: The direction to the target is normalized and compared
//     against the observer's forward vector; the angle between them must not
//     exceed the configured half-angle.
// 3.  **Degenerate geometry**: A target sitting exactly on the observer has
//     no meaningful direction, so normalization is refused and the cone gate
//     fails. The sample reports "not visible" rather than producing NaN.
// 4.  **Occlusion seam**: Physical line-of-sight is a property of the scene,
//     not of geometry, so it is an injectable strategy. The bundled
//     `NoOcclusion` query reports every line as clear; a real physics raycast
//     can be substituted without touching the tick driver.

use crate::core_modules::scene::SceneNode;
use nalgebra::Unit;

/// Strategy seam for physical line-of-sight queries.
pub trait OcclusionQuery {
    /// True if something in the scene blocks the line from observer to target.
    fn is_occluded(&self, observer: &SceneNode, target: &SceneNode) -> bool;
}

/// The default occlusion query: nothing ever blocks the line. Geometric
/// visibility is the whole answer until a physics backend is plugged in.
pub struct NoOcclusion;

impl OcclusionQuery for NoOcclusion {
    fn is_occluded(&self, _observer: &SceneNode, _target: &SceneNode) -> bool {
        false
    }
}

pub mod visibility {
    use super::*;

    /// The geometric visibility test: distance gate AND cone gate.
    ///
    /// Pure function of the current poses; no side effects.
    pub fn check_cone_visibility(
        observer: &SceneNode,
        target: &SceneNode,
        cone_angle_degrees: f32,
        max_distance: f32,
    ) -> bool {
        let to_target = target.position - observer.position;

        let in_range =
            max_distance <= 0.0 || to_target.norm_squared() < max_distance * max_distance;

        // A zero-length direction cannot be normalized; the cone gate fails.
        let Some(direction) = Unit::try_new(to_target, 1e-6) else {
            return false;
        };

        let cosine = observer.forward.dot(&direction).clamp(-1.0, 1.0);
        let angle_degrees = cosine.acos().to_degrees();

        in_range && angle_degrees <= cone_angle_degrees
    }
}
