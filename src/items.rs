use serde::{Deserialize, Serialize};

/// A food choice from the host's menu. Passed through a feed action
/// untouched; only `label` comes back out in the `fed` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub label: String,
    pub icon: String,
}

impl FoodItem {
    pub fn new(id: &str, label: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToyItem {
    pub id: String,
    pub label: String,
    pub icon: String,
}

impl ToyItem {
    pub fn new(id: &str, label: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Toys with a dedicated play timeline. Anything else plays the generic one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToyKind {
    Ball,
    Yarn,
    Feather,
    Laser,
    Frisbee,
    Other,
}

impl ToyKind {
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "ball" => ToyKind::Ball,
            "yarn" => ToyKind::Yarn,
            "feather" => ToyKind::Feather,
            "laser" => ToyKind::Laser,
            "frisbee" => ToyKind::Frisbee,
            _ => ToyKind::Other,
        }
    }
}

/// Food silhouettes the feed scene knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodShape {
    Fish,
    Bone,
    Milk,
    Kibble,
    Generic,
}

impl FoodShape {
    pub fn from_id(id: &str) -> Self {
        let id = id.trim().to_ascii_lowercase();
        if id.contains("fish") || id.contains("tuna") || id.contains("salmon") {
            FoodShape::Fish
        } else if id.contains("bone") || id.contains("meat") {
            FoodShape::Bone
        } else if id.contains("milk") {
            FoodShape::Milk
        } else if id.contains("kibble") || id.contains("treat") {
            FoodShape::Kibble
        } else {
            FoodShape::Generic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toy_and_food_ids_map_case_insensitively() {
        assert_eq!(ToyKind::from_id("Laser"), ToyKind::Laser);
        assert_eq!(ToyKind::from_id("rubber-duck"), ToyKind::Other);
        assert_eq!(FoodShape::from_id("bone"), FoodShape::Bone);
        assert_eq!(FoodShape::from_id("Salmon_Bits"), FoodShape::Fish);
        assert_eq!(FoodShape::from_id("cake"), FoodShape::Generic);
    }

    #[test]
    fn food_item_serializes_with_plain_fields() {
        let food = FoodItem::new("bone", "Meaty Bone", "🍖");
        let json = serde_json::to_string(&food).unwrap();
        assert!(json.contains("\"label\":\"Meaty Bone\""));
        let back: FoodItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, food);
    }
}
