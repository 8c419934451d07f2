//! Normalized view of a trait, produced by [`inspect`](crate::inspect) and
//! consumed by the synthesizers.

use syn::{
    parse_quote, Attribute, Expr, Generics, Ident, Path, Receiver, Signature, Token, Type,
    TypeParamBound, Visibility,
};

/// Access level of the mocked trait. Only two levels are distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Internal,
}

impl Access {
    pub fn from_visibility(vis: &Visibility) -> Self {
        match vis {
            Visibility::Public(_) => Access::Public,
            _ => Access::Internal,
        }
    }

    /// Projection of the mock type and its per-instance members.
    pub fn instance(self) -> Projection {
        match self {
            Access::Public => Projection::Open,
            Access::Internal => Projection::Internal,
        }
    }

    /// Projection of recorder containers and receiver-less members.
    pub fn shared(self) -> Projection {
        match self {
            Access::Public => Projection::Public,
            Access::Internal => Projection::Internal,
        }
    }
}

/// Visibility given to a generated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Public and meant to be customized by the user
    Open,
    Public,
    Internal,
}

impl Projection {
    pub fn visibility(self) -> Visibility {
        match self {
            // no inheritance in rust, `open` collapses into `pub`
            Projection::Open | Projection::Public => parse_quote! { pub },
            Projection::Internal => parse_quote! { pub(crate) },
        }
    }
}

#[derive(Debug)]
pub struct ProtocolDescriptor {
    pub ident: Ident,
    pub access: Access,
    /// Non-helper attributes of the trait, forwarded to the trait impl
    pub attrs: Vec<Attribute>,
    pub unsafety: Option<Token![unsafe]>,
    /// The trait's own generics, lifetimes excluded
    pub generics: Generics,
    pub properties: Vec<PropertyDescriptor>,
    pub functions: Vec<FunctionDescriptor>,
    pub associated_types: Vec<AssociatedTypeDescriptor>,
    pub initializers: Vec<InitializerDescriptor>,
    pub constants: Vec<ConstantDescriptor>,
    pub inherited: Vec<Path>,
}

impl ProtocolDescriptor {
    pub fn static_functions(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.iter().filter(|f| f.is_static())
    }

    pub fn has_static_functions(&self) -> bool {
        self.static_functions().next().is_some()
    }

    /// Whether `name` is among the supertraits, compared by last path segment
    pub fn inherits(&self, name: &str) -> bool {
        self.inherited
            .iter()
            .filter_map(|path| path.segments.last())
            .any(|seg| seg.ident == name)
    }
}

#[derive(Debug)]
pub struct PropertyDescriptor {
    pub attrs: Vec<Attribute>,
    pub sig: Signature,
    pub ident: Ident,
    /// Declared type, the `Ok` type for fallible properties
    pub ty: Type,
    pub throwing: bool,
}

impl PropertyDescriptor {
    pub fn has_setter(&self) -> bool {
        !self.throwing
    }
}

#[derive(Debug)]
pub enum Recorded {
    AsDeclared,
    /// Plain reference to the contained type, recorded as its owned form
    Owned(Type),
}

#[derive(Debug)]
pub struct ParameterDescriptor {
    pub ty: Type,
    /// Positional name `arg<i>`
    pub local: Ident,
    pub recorded: Recorded,
}

impl ParameterDescriptor {
    pub fn recorded_type(&self) -> Type {
        match &self.recorded {
            Recorded::AsDeclared => self.ty.clone(),
            Recorded::Owned(referent) => {
                parse_quote! { <#referent as ::std::borrow::ToOwned>::Owned }
            }
        }
    }

    pub fn recorded_expr(&self) -> Expr {
        let local = &self.local;
        match &self.recorded {
            Recorded::AsDeclared => parse_quote! { #local },
            Recorded::Owned(_) => parse_quote! { ::std::borrow::ToOwned::to_owned(&*#local) },
        }
    }
}

#[derive(Debug)]
pub struct FunctionDescriptor {
    pub attrs: Vec<Attribute>,
    pub sig: Signature,
    pub ident: Ident,
    pub receiver: Option<Receiver>,
    pub params: Vec<ParameterDescriptor>,
    /// Declared return type, the `Ok` type for fallible functions
    pub output: Option<Type>,
    pub throwing: bool,
}

impl FunctionDescriptor {
    pub fn is_static(&self) -> bool {
        self.receiver.is_none()
    }
}

#[derive(Debug)]
pub struct AssociatedTypeDescriptor {
    pub ident: Ident,
    /// First declared bound only
    pub constraint: Option<TypeParamBound>,
}

/// How an initializer hands back `Self`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfShape {
    Plain,
    Result,
    Option,
}

#[derive(Debug)]
pub struct InitializerDescriptor {
    pub attrs: Vec<Attribute>,
    pub sig: Signature,
    pub shape: SelfShape,
}

#[derive(Debug)]
pub struct ConstantDescriptor {
    pub attrs: Vec<Attribute>,
    pub ident: Ident,
    pub ty: Type,
    pub value: Expr,
}
