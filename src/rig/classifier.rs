use super::handle::{HandleRef, HitObjectId};
use super::layout::Rig;

/// Resolves opaque hit ids against the live handle collections.
///
/// Classification is identity only: an id either belongs to one of the
/// current rig's handles or it does not. Ids from a previous rig generation
/// never resolve.
pub struct HandleClassifier<'a> {
    rig: &'a Rig,
}

impl<'a> HandleClassifier<'a> {
    pub fn new(rig: &'a Rig) -> Self {
        Self { rig }
    }

    pub fn classify(&self, hit: HitObjectId) -> Option<HandleRef> {
        if let Some(corner) = self.rig.corners().iter().find(|h| h.id == hit) {
            return Some(corner.handle_ref());
        }
        self.rig
            .edges()
            .iter()
            .find(|h| h.id == hit)
            .map(|edge| edge.handle_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{BoundsMethod, ComputedBounds};
    use crate::math::BoundingVolume;
    use crate::rig::{RigBuilder, RigConfig};
    use crate::target::TargetTransform;
    use cgmath::Vector3;

    fn build(generation: u64) -> Rig {
        let volume = BoundingVolume::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5));
        let bounds = ComputedBounds {
            local: volume,
            world: volume,
            method: BoundsMethod::AttachedPrimitive,
            flattened_axis: None,
        };
        RigBuilder::from_config(&RigConfig::default()).build(&bounds, &TargetTransform::default(), generation)
    }

    #[test]
    fn test_classifies_every_handle() {
        let rig = build(0);
        let classifier = HandleClassifier::new(&rig);

        for (i, corner) in rig.corners().iter().enumerate() {
            assert_eq!(classifier.classify(corner.id), Some(HandleRef::Corner(i)));
        }
        for (i, edge) in rig.edges().iter().enumerate() {
            assert_eq!(classifier.classify(edge.id), Some(HandleRef::Edge(i)));
        }
    }

    #[test]
    fn test_unknown_id_is_none() {
        let rig = build(0);
        assert_eq!(HandleClassifier::new(&rig).classify(HitObjectId(9_999)), None);
    }

    #[test]
    fn test_stale_id_after_rebuild() {
        let old = build(0);
        let stale = old.corners()[3].id;

        let rebuilt = build(1);
        assert_eq!(HandleClassifier::new(&rebuilt).classify(stale), None);
    }
}
