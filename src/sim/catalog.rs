//! Object catalog
//!
//! Static registry of everything that can fall: three categories, seventeen
//! concrete types, four colors. Each type carries its audio cue key and, for
//! fruits and emoji faces, the glyph used to draw it.

use serde::{Deserialize, Serialize};

/// Object families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectCategory {
    Shapes,
    Fruits,
    Emojis,
}

impl ObjectCategory {
    pub const ALL: [ObjectCategory; 3] = [
        ObjectCategory::Shapes,
        ObjectCategory::Fruits,
        ObjectCategory::Emojis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectCategory::Shapes => "shapes",
            ObjectCategory::Fruits => "fruits",
            ObjectCategory::Emojis => "emojis",
        }
    }

    /// Every concrete type in this category, in catalog order
    pub fn types(&self) -> &'static [ObjectType] {
        use ObjectType::*;
        match self {
            ObjectCategory::Shapes => &[Circle, Square, Triangle, Star, Heart],
            ObjectCategory::Fruits => &[Apple, Banana, Orange, Watermelon, Grape, Strawberry],
            ObjectCategory::Emojis => &[Smile, Sad, Angry, Cool, Love, Starface],
        }
    }

    /// The two categories that are not `self`
    pub fn others(&self) -> [ObjectCategory; 2] {
        match self {
            ObjectCategory::Shapes => [ObjectCategory::Fruits, ObjectCategory::Emojis],
            ObjectCategory::Fruits => [ObjectCategory::Shapes, ObjectCategory::Emojis],
            ObjectCategory::Emojis => [ObjectCategory::Shapes, ObjectCategory::Fruits],
        }
    }
}

/// Concrete falling object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    // Shapes
    Circle,
    Square,
    Triangle,
    Star,
    Heart,
    // Fruits
    Apple,
    Banana,
    Orange,
    Watermelon,
    Grape,
    Strawberry,
    // Emoji faces
    Smile,
    Sad,
    Angry,
    Cool,
    Love,
    Starface,
}

/// All types across all categories
pub const ALL_OBJECT_TYPES: [ObjectType; 17] = {
    use ObjectType::*;
    [
        Circle, Square, Triangle, Star, Heart, Apple, Banana, Orange, Watermelon, Grape,
        Strawberry, Smile, Sad, Angry, Cool, Love, Starface,
    ]
};

impl ObjectType {
    pub fn category(&self) -> ObjectCategory {
        use ObjectType::*;
        match self {
            Circle | Square | Triangle | Star | Heart => ObjectCategory::Shapes,
            Apple | Banana | Orange | Watermelon | Grape | Strawberry => ObjectCategory::Fruits,
            Smile | Sad | Angry | Cool | Love | Starface => ObjectCategory::Emojis,
        }
    }

    pub fn name(&self) -> &'static str {
        use ObjectType::*;
        match self {
            Circle => "circle",
            Square => "square",
            Triangle => "triangle",
            Star => "star",
            Heart => "heart",
            Apple => "apple",
            Banana => "banana",
            Orange => "orange",
            Watermelon => "watermelon",
            Grape => "grape",
            Strawberry => "strawberry",
            Smile => "smile",
            Sad => "sad",
            Angry => "angry",
            Cool => "cool",
            Love => "love",
            Starface => "starface",
        }
    }

    /// Audio cue played when this object is tapped correctly
    pub fn sound_cue(&self) -> &'static str {
        use ObjectType::*;
        match self {
            Circle | Square | Triangle | Heart | Grape => "pop",
            Star => "whoosh",
            Apple => "crunch",
            Banana | Strawberry => "squish",
            Orange | Watermelon => "splash",
            Smile => "laugh",
            Sad => "cry",
            Angry => "grunt",
            Cool => "yeah",
            Love => "kiss",
            Starface => "sparkle",
        }
    }

    /// Display glyph; shapes are drawn as flat geometry and have none
    pub fn glyph(&self) -> Option<&'static str> {
        use ObjectType::*;
        match self {
            Circle | Square | Triangle | Star | Heart => None,
            Apple => Some("🍎"),
            Banana => Some("🍌"),
            Orange => Some("🍊"),
            Watermelon => Some("🍉"),
            Grape => Some("🍇"),
            Strawberry => Some("🍓"),
            Smile => Some("😊"),
            Sad => Some("😢"),
            Angry => Some("😠"),
            Cool => Some("😎"),
            Love => Some("😍"),
            Starface => Some("🤩"),
        }
    }

    /// Whether this type spins while falling
    pub fn rotates(&self) -> bool {
        self.category() == ObjectCategory::Shapes
    }
}

/// Object colors. Skins bind these names to concrete hex values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl ObjectColor {
    pub const ALL: [ObjectColor; 4] = [
        ObjectColor::Red,
        ObjectColor::Blue,
        ObjectColor::Green,
        ObjectColor::Yellow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectColor::Red => "red",
            ObjectColor::Blue => "blue",
            ObjectColor::Green => "green",
            ObjectColor::Yellow => "yellow",
        }
    }

    /// The three colors that are not `self`
    pub fn others(&self) -> [ObjectColor; 3] {
        let mut out = [ObjectColor::Red; 3];
        let mut i = 0;
        for c in ObjectColor::ALL {
            if c != *self {
                out[i] = c;
                i += 1;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_partition_catalog() {
        let total: usize = ObjectCategory::ALL.iter().map(|c| c.types().len()).sum();
        assert_eq!(total, ALL_OBJECT_TYPES.len());

        for category in ObjectCategory::ALL {
            for ty in category.types() {
                assert_eq!(ty.category(), category, "{} misfiled", ty.name());
            }
        }
    }

    #[test]
    fn test_only_shapes_lack_glyphs() {
        for ty in ALL_OBJECT_TYPES {
            assert_eq!(ty.glyph().is_none(), ty.category() == ObjectCategory::Shapes);
        }
    }

    #[test]
    fn test_color_others_excludes_self() {
        for color in ObjectColor::ALL {
            let others = color.others();
            assert!(!others.contains(&color));
            assert_eq!(others.len(), 3);
        }
    }

    #[test]
    fn test_category_others() {
        let others = ObjectCategory::Fruits.others();
        assert!(others.contains(&ObjectCategory::Shapes));
        assert!(others.contains(&ObjectCategory::Emojis));
    }
}
