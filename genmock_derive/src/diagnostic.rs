use proc_macro2::Span;
use proc_macro2_diagnostics::{Diagnostic, Level};
use syn::spanned::Spanned;
use syn::{Item, ItemTrait};

/// Diagnostic domain of every error raised by the macro itself
pub const DOMAIN: &str = "GenerateMockMacro";

#[derive(Debug, thiserror::Error)]
pub enum MacroError {
    #[error("#[generate_mock] can only be applied to traits")]
    NotATrait { span: Span },
}

impl MacroError {
    pub fn id(&self) -> &'static str {
        match self {
            MacroError::NotATrait { .. } => "notATrait",
        }
    }

    pub fn level(&self) -> Level {
        match self {
            MacroError::NotATrait { .. } => Level::Error,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            MacroError::NotATrait { span } => *span,
        }
    }

    /// `<domain>.<id>`, attached to the diagnostic as a note
    pub fn qualified_id(&self) -> String {
        format!("{}.{}", DOMAIN, self.id())
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let note = self.qualified_id();
        Diagnostic::spanned(self.span(), self.level(), self.to_string()).note(note)
    }
}

impl From<MacroError> for Diagnostic {
    fn from(err: MacroError) -> Self {
        err.into_diagnostic()
    }
}

/// Lets traits through, rejects every other kind of item
pub fn gate(item: Item) -> Result<ItemTrait, (Item, MacroError)> {
    match item {
        Item::Trait(item) => Ok(item),
        other => {
            let span = item_span(&other);
            Err((other, MacroError::NotATrait { span }))
        }
    }
}

/// Points at the item keyword rather than the whole item
fn item_span(item: &Item) -> Span {
    match item {
        Item::Struct(item) => item.struct_token.span,
        Item::Enum(item) => item.enum_token.span,
        Item::Union(item) => item.union_token.span,
        Item::Fn(item) => item.sig.fn_token.span,
        Item::Impl(item) => item.impl_token.span,
        Item::Mod(item) => item.mod_token.span,
        Item::Type(item) => item.type_token.span,
        Item::Const(item) => item.const_token.span,
        Item::Static(item) => item.static_token.span,
        other => other.span(),
    }
}
