// Copyright @yucwang 2026

use crate::core::error::ConfigError;
use crate::core::shape::{Solid, SolidKind};
use crate::math::constants::Vector3f;
use crate::math::transform::Transform;

use log::debug;

/// Translation, Euler rotation in degrees (X, then Y, then Z) and scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NodeTransform {
    pub translation: Vector3f,
    pub rotation: Vector3f,
    pub scale: Vector3f,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            translation: Vector3f::zeros(),
            rotation: Vector3f::zeros(),
            scale: Vector3f::new(1.0, 1.0, 1.0),
        }
    }
}

impl NodeTransform {
    pub fn to_transform(&self) -> Result<Transform, ConfigError> {
        Transform::from_trs(self.translation, self.rotation, self.scale)
            .ok_or(ConfigError::DegenerateTransform)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyNode {
    Inner {
        transform: NodeTransform,
        children: Vec<HierarchyNode>,
    },
    Leaf {
        transform: NodeTransform,
        primitive: String,
        material: String,
    },
}

/// A leaf with its primitive resolved and every ancestor transform applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatLeaf {
    pub solid: Solid,
    pub material: String,
    pub to_world: Transform,
}

impl HierarchyNode {
    pub fn flatten(&self) -> Result<Vec<FlatLeaf>, ConfigError> {
        let mut leaves = Vec::new();
        self.flatten_into(&Transform::default(), &mut leaves)?;
        debug!("Flattened hierarchy into {} leaves", leaves.len());
        Ok(leaves)
    }

    fn flatten_into(&self, parent: &Transform, leaves: &mut Vec<FlatLeaf>) -> Result<(), ConfigError> {
        match self {
            HierarchyNode::Inner { transform, children } => {
                let world = parent.compose(&transform.to_transform()?);
                for child in children {
                    child.flatten_into(&world, leaves)?;
                }
            }
            HierarchyNode::Leaf { transform, primitive, material } => {
                let solid = SolidKind::from_tag(primitive)?.canonical();
                let to_world = parent.compose(&transform.to_transform()?);
                leaves.push(FlatLeaf { solid, material: material.clone(), to_world });
            }
        }
        Ok(())
    }
}
