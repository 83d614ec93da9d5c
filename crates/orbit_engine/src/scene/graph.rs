//! Scene graph: the registry owning every scene object
//!
//! Objects live in an id-indexed arena; parent/child relations are stored
//! as ids only, so ownership stays unambiguous and reference cycles are
//! unrepresentable. Hierarchy cycles through the parent links are rejected
//! at [`SceneGraph::set_parent`] by walking the prospective ancestor chain.

use crate::foundation::math::{Mat4, Vec3};
use crate::scene::animation::AnimationStatus;
use crate::scene::object::{PointLight, SceneObject, SceneObjectId};
use std::collections::BTreeMap;
use thiserror::Error;

/// Scene-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not name a live object in this graph
    #[error("unknown scene object {0}")]
    UnknownObject(SceneObjectId),

    /// The requested parent link would make an object its own ancestor
    #[error("parenting {child} under {parent} would create a hierarchy cycle")]
    HierarchyCycle {
        /// Object that was being re-parented
        child: SceneObjectId,
        /// Requested parent
        parent: SceneObjectId,
    },
}

/// Registry of all scene objects plus the id counter
///
/// Iteration order is ascending id order, which for a single process run
/// means creation order; light aggregation and render passes rely on it
/// being stable within a run, nothing more.
pub struct SceneGraph {
    objects: BTreeMap<SceneObjectId, SceneObject>,
    next_id: u32,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create an empty scene graph with the id counter at zero
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Create a new object with a default transform and no payloads
    ///
    /// Ids come from a monotonically increasing counter and are never
    /// reused, no matter how many objects have been removed.
    pub fn create_object(&mut self) -> SceneObjectId {
        let id = self.allocate_id();
        self.objects.insert(id, SceneObject::new(id));
        log::trace!("created scene object {id}");
        id
    }

    /// Create an object carrying a point light payload
    ///
    /// `radius` is written to `transform.scale.x` and used downstream purely
    /// as a visualization radius, not as a physical falloff driver.
    pub fn make_point_light(&mut self, intensity: f32, radius: f32, color: Vec3) -> SceneObjectId {
        let id = self.allocate_id();
        let mut object = SceneObject::new(id);
        object.color = color;
        object.transform.scale.x = radius;
        object.point_light = Some(PointLight { intensity });
        self.objects.insert(id, object);
        log::trace!("created point light {id} (intensity {intensity})");
        id
    }

    fn allocate_id(&mut self) -> SceneObjectId {
        let id = SceneObjectId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Look up an object by id
    pub fn get(&self, id: SceneObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Look up an object by id, mutably
    pub fn get_mut(&mut self, id: SceneObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Remove an object from the registry, returning it if it existed
    ///
    /// The object is detached from its parent's child list and any children
    /// it owned become unparented roots. Its id is retired, not recycled.
    pub fn remove(&mut self, id: SceneObjectId) -> Option<SceneObject> {
        let object = self.objects.remove(&id)?;
        if let Some(parent_id) = object.parent {
            if let Some(parent) = self.objects.get_mut(&parent_id) {
                parent.children.retain(|child| *child != id);
            }
        }
        for child_id in &object.children {
            if let Some(child) = self.objects.get_mut(child_id) {
                child.parent = None;
            }
        }
        log::trace!("removed scene object {id}");
        Some(object)
    }

    /// Parent `child` under `parent`
    ///
    /// Establishes the non-owning back-reference and appends the child to
    /// the parent's child list, detaching it from any previous parent
    /// first. Fails with [`SceneError::HierarchyCycle`] when the parent is
    /// the child itself or one of its descendants, since a cycle would make
    /// world-transform composition recurse forever.
    pub fn set_parent(
        &mut self,
        child: SceneObjectId,
        parent: SceneObjectId,
    ) -> Result<(), SceneError> {
        if !self.objects.contains_key(&child) {
            return Err(SceneError::UnknownObject(child));
        }
        if !self.objects.contains_key(&parent) {
            return Err(SceneError::UnknownObject(parent));
        }

        // Walk from the prospective parent toward the root; meeting the
        // child means the link would close a loop.
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(SceneError::HierarchyCycle { child, parent });
            }
            ancestor = self.objects.get(&current).and_then(SceneObject::parent);
        }

        if let Some(old_parent_id) = self.objects.get(&child).and_then(SceneObject::parent) {
            if let Some(old_parent) = self.objects.get_mut(&old_parent_id) {
                old_parent.children.retain(|c| *c != child);
            }
        }

        if let Some(parent_object) = self.objects.get_mut(&parent) {
            parent_object.children.push(child);
        }
        if let Some(child_object) = self.objects.get_mut(&child) {
            child_object.parent = Some(parent);
        }
        Ok(())
    }

    /// Compose the world transform for an object
    ///
    /// An unparented object's world transform is its local matrix; a
    /// parented object's is its parent's world transform times its local
    /// matrix. Acyclicity is guaranteed by [`SceneGraph::set_parent`], so
    /// the walk terminates.
    pub fn world_transform(&self, id: SceneObjectId) -> Result<Mat4, SceneError> {
        let object = self
            .objects
            .get(&id)
            .ok_or(SceneError::UnknownObject(id))?;

        let mut world = object.transform.local_matrix();
        let mut ancestor = object.parent;
        while let Some(current) = ancestor {
            let parent = self
                .objects
                .get(&current)
                .ok_or(SceneError::UnknownObject(current))?;
            world = parent.transform.local_matrix() * world;
            ancestor = parent.parent;
        }
        Ok(world)
    }

    /// Advance the animation on one object by `delta_time` seconds
    ///
    /// The graph holds no is-playing state of its own; the frame loop owns
    /// the trigger bookkeeping and decides whether to keep ticking an
    /// object based on the returned status.
    pub fn tick(
        &mut self,
        id: SceneObjectId,
        delta_time: f32,
    ) -> Result<AnimationStatus, SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::UnknownObject(id))?;
        Ok(object.transform.advance(delta_time))
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over all objects in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Iterate over all objects mutably, in ascending id order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut graph = SceneGraph::new();
        let first = graph.create_object();
        let second = graph.create_object();
        assert!(second > first);

        graph.remove(first);
        graph.remove(second);
        let third = graph.create_object();
        assert!(third > second);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_make_point_light_payload() {
        let mut graph = SceneGraph::new();
        let id = graph.make_point_light(10.0, 0.1, Vec3::new(1.0, 0.0, 0.0));
        let object = graph.get(id).unwrap();
        assert_relative_eq!(object.point_light.unwrap().intensity, 10.0);
        assert_relative_eq!(object.transform.scale.x, 0.1);
        assert_relative_eq!(object.color, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_unparented_world_transform_is_local() {
        let mut graph = SceneGraph::new();
        let id = graph.create_object();
        graph.get_mut(id).unwrap().transform.translation = Vec3::new(1.0, 2.0, 3.0);

        let world = graph.world_transform(id).unwrap();
        let local = graph.get(id).unwrap().transform.local_matrix();
        assert_relative_eq!(world, local, epsilon = 1e-6);
    }

    #[test]
    fn test_parented_world_transform_composes() {
        let mut graph = SceneGraph::new();
        let parent = graph.create_object();
        let child = graph.create_object();
        graph.get_mut(parent).unwrap().transform.translation = Vec3::new(10.0, 0.0, 0.0);
        graph.get_mut(child).unwrap().transform.translation = Vec3::new(0.0, 5.0, 0.0);
        graph.set_parent(child, parent).unwrap();

        let world = graph.world_transform(child).unwrap();
        assert_relative_eq!(world[(0, 3)], 10.0, epsilon = 1e-6);
        assert_relative_eq!(world[(1, 3)], 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_grandchild_world_transform() {
        let mut graph = SceneGraph::new();
        let root = graph.create_object();
        let middle = graph.create_object();
        let leaf = graph.create_object();
        graph.get_mut(root).unwrap().transform.translation = Vec3::new(1.0, 0.0, 0.0);
        graph.get_mut(middle).unwrap().transform.translation = Vec3::new(0.0, 1.0, 0.0);
        graph.get_mut(leaf).unwrap().transform.translation = Vec3::new(0.0, 0.0, 1.0);
        graph.set_parent(middle, root).unwrap();
        graph.set_parent(leaf, middle).unwrap();

        let world = graph.world_transform(leaf).unwrap();
        assert_relative_eq!(world[(0, 3)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(world[(1, 3)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(world[(2, 3)], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_set_parent_rejects_self() {
        let mut graph = SceneGraph::new();
        let id = graph.create_object();
        assert_eq!(
            graph.set_parent(id, id),
            Err(SceneError::HierarchyCycle {
                child: id,
                parent: id
            })
        );
    }

    #[test]
    fn test_set_parent_rejects_descendant() {
        let mut graph = SceneGraph::new();
        let root = graph.create_object();
        let child = graph.create_object();
        let grandchild = graph.create_object();
        graph.set_parent(child, root).unwrap();
        graph.set_parent(grandchild, child).unwrap();

        // Parenting the root under its own grandchild would close a loop.
        assert_eq!(
            graph.set_parent(root, grandchild),
            Err(SceneError::HierarchyCycle {
                child: root,
                parent: grandchild
            })
        );
    }

    #[test]
    fn test_reparent_detaches_from_old_parent() {
        let mut graph = SceneGraph::new();
        let a = graph.create_object();
        let b = graph.create_object();
        let child = graph.create_object();
        graph.set_parent(child, a).unwrap();
        graph.set_parent(child, b).unwrap();

        assert!(graph.get(a).unwrap().children().is_empty());
        assert_eq!(graph.get(b).unwrap().children(), &[child]);
        assert_eq!(graph.get(child).unwrap().parent(), Some(b));
    }

    #[test]
    fn test_remove_detaches_relatives() {
        let mut graph = SceneGraph::new();
        let parent = graph.create_object();
        let middle = graph.create_object();
        let leaf = graph.create_object();
        graph.set_parent(middle, parent).unwrap();
        graph.set_parent(leaf, middle).unwrap();

        graph.remove(middle);
        assert!(graph.get(parent).unwrap().children().is_empty());
        assert_eq!(graph.get(leaf).unwrap().parent(), None);
    }

    #[test]
    fn test_tick_unknown_object() {
        let mut graph = SceneGraph::new();
        let id = graph.create_object();
        graph.remove(id);
        assert_eq!(graph.tick(id, 0.1), Err(SceneError::UnknownObject(id)));
    }
}
