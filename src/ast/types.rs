//! Syntactic type annotations.
//!
//! An [`UnresolvedType`] is a type exactly as written in source, before it is
//! checked against any symbol table. The `Display` rendering is canonical:
//! parsing the rendered text produces an equal type again.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnresolvedType {
    /// `A::B::C`
    Named { names: Vec<String> },
    /// `(a: A, B)`. Entry names are optional.
    Tuple {
        entries: Vec<(Option<String>, UnresolvedType)>,
    },
    /// `[]T`
    Array { element: Box<UnresolvedType> },
    /// `fn (A, B) -> R`
    Function {
        arg_types: Vec<UnresolvedType>,
        return_type: Option<Box<UnresolvedType>>,
    },
}

impl UnresolvedType {
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UnresolvedType::Named {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tuple(entries: Vec<(Option<String>, UnresolvedType)>) -> Self {
        UnresolvedType::Tuple { entries }
    }

    pub fn array(element: UnresolvedType) -> Self {
        UnresolvedType::Array {
            element: Box::new(element),
        }
    }

    pub fn function(arg_types: Vec<UnresolvedType>, return_type: Option<UnresolvedType>) -> Self {
        UnresolvedType::Function {
            arg_types,
            return_type: return_type.map(Box::new),
        }
    }
}

fn join<T: Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(", ")
}

impl Display for UnresolvedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedType::Named { names } => write!(f, "{}", names.join("::")),
            UnresolvedType::Tuple { entries } => {
                let rendered = join(entries.iter().map(|(name, ty)| match name {
                    Some(name) => format!("{}: {}", name, ty),
                    None => ty.to_string(),
                }));
                write!(f, "({})", rendered)
            }
            UnresolvedType::Array { element } => write!(f, "[]{}", element),
            UnresolvedType::Function {
                arg_types,
                return_type,
            } => match return_type {
                None if arg_types.is_empty() => write!(f, "fn"),
                None => write!(f, "fn ({})", join(arg_types.iter())),
                Some(return_type) => {
                    write!(f, "fn ({}) -> {}", join(arg_types.iter()), return_type)
                }
            },
        }
    }
}
