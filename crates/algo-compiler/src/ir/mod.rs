//! Target-independent representation of `.algo` source lines.
//!
//! The frontend turns every source line into an [`Instruction`]. Code
//! generators only ever see instructions, never raw token lists, so the
//! arity of each keyword is checked once, before dispatch.

mod instruction;

pub use instruction::{
    ArrayParams, ConstParams, ForParams, FunctionSignature, Instruction, SectionKind,
};

/// Scalar types known to the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Bool,
    Char,
    /// Only valid as a function return type.
    Void,
}

impl ScalarType {
    /// All value types, in the order they are documented.
    pub const VALUE_TYPES: [ScalarType; 5] = [
        ScalarType::Int,
        ScalarType::Float,
        ScalarType::String,
        ScalarType::Bool,
        ScalarType::Char,
    ];

    /// Looks up a value type by its source keyword (`int`, `float`, ...).
    ///
    /// `void` is not a value type and is rejected here; see [`Self::from_return_keyword`].
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::VALUE_TYPES.into_iter().find(|typ| typ.keyword() == keyword)
    }

    /// Looks up a function return type, which may also be `void`.
    pub fn from_return_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "void" => Some(Self::Void),
            other => Self::from_keyword(other),
        }
    }

    /// The source keyword for this type.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Void => "void",
        }
    }
}

/// A function or procedure parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub typ: ScalarType,
    /// Passed by reference (`&` prefix on the type or the name in source).
    pub by_ref: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_keywords() {
        for typ in ScalarType::VALUE_TYPES {
            assert_eq!(ScalarType::from_keyword(typ.keyword()), Some(typ));
        }
        assert_eq!(ScalarType::from_keyword("double"), None);
    }

    #[test]
    fn test_void_only_as_return_type() {
        assert_eq!(ScalarType::from_keyword("void"), None);
        assert_eq!(ScalarType::from_return_keyword("void"), Some(ScalarType::Void));
        assert_eq!(ScalarType::from_return_keyword("int"), Some(ScalarType::Int));
    }
}
