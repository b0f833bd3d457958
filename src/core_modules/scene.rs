// THEORY:
// The `scene` module defines the engine's only view of the outside world: an
// oriented point in space. The attention engine never owns the camera or the
// props it watches — those belong to whatever scene graph embeds it — so every
// reference held across frames is a `Weak` back-reference, and liveness is a
// question asked at tick time, never assumed.
//
// Key architectural principles:
// 1.  **Narrow collaborator surface**: The engine only ever asks three things
//     of a scene object — where is it, which way is it facing, and is it still
//     alive. `SceneNode` carries exactly that and nothing else.
// 2.  **Handles vs. back-references**: Embedding code holds `SceneHandle`s
//     (strong, `Rc`) and mutates position/orientation through them between
//     ticks. The engine stores only `SceneRef`s (weak); when the last handle
//     is dropped the watch pair referencing it prunes itself on the next pass.
// 3.  **Identity is the pointer**: Two handles refer to "the same" scene node
//     iff they share an allocation. This pointer identity is the dedup key for
//     the watch registry.

use nalgebra::{Point3, Unit, Vector3};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// An oriented point in the embedding scene: everything the engine needs to
/// know about an observer or a watched target.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// World-space position.
    pub position: Point3<f32>,
    /// World-space facing direction. Only meaningful for observers; targets
    /// are treated as featureless points.
    pub forward: Unit<Vector3<f32>>,
}

/// A strong handle to a scene node, held by the embedding code.
pub type SceneHandle = Rc<RefCell<SceneNode>>;

/// A weak back-reference to a scene node, held by the engine across frames.
pub type SceneRef = Weak<RefCell<SceneNode>>;

impl SceneNode {
    pub fn new(position: Point3<f32>, forward: Vector3<f32>) -> Self {
        Self {
            position,
            forward: Unit::new_normalize(forward),
        }
    }

    /// A node that only has a position, for targets whose facing is irrelevant.
    pub fn at(position: Point3<f32>) -> Self {
        Self::new(position, Vector3::x())
    }

    /// Wraps the node in a sharable handle.
    pub fn into_handle(self) -> SceneHandle {
        Rc::new(RefCell::new(self))
    }
}

/// True if the back-reference points at the same scene node as the handle.
pub fn refers_to(back_ref: &SceneRef, handle: &SceneHandle) -> bool {
    std::ptr::eq(back_ref.as_ptr(), Rc::as_ptr(handle))
}
