//! Skeleton topology: named limb groups built from segment names.
//!
//! A blueprint is configuration, not state. It is constructed once, validated,
//! and then shared read-only by every actor that projects data onto it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One skeletal branch: an ordered chain of segment names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimbGroup {
    pub name: String,
    pub chain: Vec<String>,
}

impl LimbGroup {
    pub fn new<I, S>(name: impl Into<String>, chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            chain: chain.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

/// Where a segment sits inside a blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentLocation {
    /// Index of the owning group in blueprint order.
    pub group: usize,
    /// Position within that group's chain.
    pub position: usize,
}

/// Ordered mapping from limb group name to segment chain.
///
/// Segments shared by several chains (the pelvis opens both legs, the neck
/// both arms) resolve to their first occurrence in blueprint order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LimbGroup>", into = "Vec<LimbGroup>")]
pub struct SkeletonBlueprint {
    groups: Vec<LimbGroup>,
    #[serde(skip)]
    index: HashMap<String, SegmentLocation>,
}

impl SkeletonBlueprint {
    /// Build and validate a blueprint.
    ///
    /// Group names must be non-empty and unique, and every chain needs at
    /// least one segment.
    pub fn new(groups: Vec<LimbGroup>) -> Result<Self, ModelError> {
        if groups.is_empty() {
            return Err(ModelError::invalid_blueprint("no limb groups"));
        }

        for (g, group) in groups.iter().enumerate() {
            if group.name.trim().is_empty() {
                return Err(ModelError::invalid_blueprint(format!(
                    "group #{g} has an empty name"
                )));
            }
            if groups[..g].iter().any(|other| other.name == group.name) {
                return Err(ModelError::invalid_blueprint(format!(
                    "duplicate group '{}'",
                    group.name
                )));
            }
            if group.chain.is_empty() {
                return Err(ModelError::invalid_blueprint(format!(
                    "group '{}' has an empty chain",
                    group.name
                )));
            }
        }

        Ok(Self::from_groups(groups))
    }

    fn from_groups(groups: Vec<LimbGroup>) -> Self {
        let mut index = HashMap::new();
        for (g, group) in groups.iter().enumerate() {
            for (p, segment) in group.chain.iter().enumerate() {
                index
                    .entry(segment.clone())
                    .or_insert(SegmentLocation {
                        group: g,
                        position: p,
                    });
            }
        }
        Self { groups, index }
    }

    /// The fixed human gait topology: spine, two legs hanging off the pelvis
    /// and two arms hanging off the neck.
    pub fn human() -> Self {
        let groups = vec![
            LimbGroup::new("Spine", ["Pelvis", "Neck", "Head"]),
            LimbGroup::new(
                "Left Leg",
                [
                    "Pelvis",
                    "Left Upper Leg",
                    "Left Lower Leg",
                    "Left Foot",
                    "Left Toe",
                ],
            ),
            LimbGroup::new(
                "Right Leg",
                [
                    "Pelvis",
                    "Right Upper Leg",
                    "Right Lower Leg",
                    "Right Foot",
                    "Right Toe",
                ],
            ),
            LimbGroup::new(
                "Left Arm",
                [
                    "Neck",
                    "Left Shoulder",
                    "Left Upper Arm",
                    "Left Forearm",
                    "Left Hand",
                ],
            ),
            LimbGroup::new(
                "Right Arm",
                [
                    "Neck",
                    "Right Shoulder",
                    "Right Upper Arm",
                    "Right Forearm",
                    "Right Hand",
                ],
            ),
        ];

        Self::from_groups(groups)
    }

    /// Parse a blueprint from JSON: `[{"name": "...", "chain": ["..."]}, ...]`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Groups in blueprint order.
    pub fn groups(&self) -> &[LimbGroup] {
        &self.groups
    }

    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&LimbGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// First `(group, position)` holding `segment`, in blueprint order.
    pub fn locate(&self, segment: &str) -> Option<SegmentLocation> {
        self.index.get(segment).copied()
    }

    /// Every distinct segment, in first-seen order.
    pub fn segments(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for segment in self.groups.iter().flat_map(|g| g.chain.iter()) {
            if !seen.contains(&segment.as_str()) {
                seen.push(segment.as_str());
            }
        }
        seen
    }

    pub fn contains_segment(&self, segment: &str) -> bool {
        self.index.contains_key(segment)
    }

    /// Number of limb groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl TryFrom<Vec<LimbGroup>> for SkeletonBlueprint {
    type Error = ModelError;

    fn try_from(groups: Vec<LimbGroup>) -> Result<Self, Self::Error> {
        Self::new(groups)
    }
}

impl From<SkeletonBlueprint> for Vec<LimbGroup> {
    fn from(blueprint: SkeletonBlueprint) -> Self {
        blueprint.groups
    }
}
