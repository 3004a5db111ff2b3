//! Animatable properties, their values and basic geometry

use std::fmt;

/// A visual property the animation engine can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Opacity,
    /// Horizontal translation
    X,
    /// Vertical translation
    Y,
    Scale,
    Rotation,
    Width,
    /// Gaussian blur radius of a `filter: blur(..)`
    Blur,
}

impl Property {
    /// The value an element has when nothing has written the property yet
    pub fn initial(self) -> PropertyValue {
        match self {
            Property::Opacity | Property::Scale => PropertyValue::Number(1.0),
            Property::X | Property::Y | Property::Width | Property::Blur => PropertyValue::Px(0.0),
            Property::Rotation => PropertyValue::Deg(0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::X => "x",
            Property::Y => "y",
            Property::Scale => "scale",
            Property::Rotation => "rotation",
            Property::Width => "width",
            Property::Blur => "blur",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value with its unit
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    /// Unitless (opacity, scale)
    Number(f32),
    Px(f32),
    /// Relative to the element's own size along the property's axis
    Percent(f32),
    Deg(f32),
}

impl PropertyValue {
    /// The numeric part, whatever the unit
    pub fn magnitude(self) -> f32 {
        match self {
            PropertyValue::Number(v)
            | PropertyValue::Px(v)
            | PropertyValue::Percent(v)
            | PropertyValue::Deg(v) => v,
        }
    }

    /// Same unit, different magnitude
    pub fn with_magnitude(self, magnitude: f32) -> Self {
        match self {
            PropertyValue::Number(_) => PropertyValue::Number(magnitude),
            PropertyValue::Px(_) => PropertyValue::Px(magnitude),
            PropertyValue::Percent(_) => PropertyValue::Percent(magnitude),
            PropertyValue::Deg(_) => PropertyValue::Deg(magnitude),
        }
    }

    pub fn same_unit(self, other: Self) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Number(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(v) => write!(f, "{v}"),
            PropertyValue::Px(v) => write!(f, "{v}px"),
            PropertyValue::Percent(v) => write!(f, "{v}%"),
            PropertyValue::Deg(v) => write!(f, "{v}deg"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Layout box in document coordinates (y grows downward from the page top)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }
}
