/// Bounds for integer and floating-point targets. Per side, at most one of
/// the inclusive and exclusive variants is set; exclusive wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericBounds {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
}

impl NumericBounds {
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none()
            && self.maximum.is_none()
            && self.exclusive_minimum.is_none()
            && self.exclusive_maximum.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringBounds {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
}

impl StringBounds {
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none() && self.max_length.is_none() && self.pattern.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayBounds {
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

impl ArrayBounds {
    pub fn is_empty(&self) -> bool {
        self.min_items.is_none() && self.max_items.is_none()
    }
}

/// A validation-constraint annotation for one field or one standalone named
/// type. The variant matches the target's resolved kind; unions and nullable
/// targets never carry one.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintDescriptor {
    Int(NumericBounds),
    Float(NumericBounds),
    String(StringBounds),
    Array(ArrayBounds),
}

impl ConstraintDescriptor {
    pub fn is_empty(&self) -> bool {
        match self {
            ConstraintDescriptor::Int(b) | ConstraintDescriptor::Float(b) => b.is_empty(),
            ConstraintDescriptor::String(b) => b.is_empty(),
            ConstraintDescriptor::Array(b) => b.is_empty(),
        }
    }
}
