//! The standard set of source-language types.
//!
//! This core never builds types — it only reads them off the caller-supplied
//! `ProgramView` — so a plain owned tree (`Box`/`Vec`) is enough; no arena.

use std::fmt;

/// Mirrors Go's `types.BasicInfo` bitmask, narrowed to what codegen needs:
/// is it boolean, numeric, or string shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicKind {
    Bool,
    Int,
    Float,
    String,
}

#[derive(Debug, Clone)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
    /// Raw backtick tag string, e.g. `luaname:"id" luadefault:"0"`.
    pub tag: String,
}

#[derive(Debug, Clone, Default)]
pub struct MethodInfo {
    pub name: String,
    /// Method declared on `*T` rather than `T`.
    pub pointer_receiver: bool,
}

#[derive(Debug, Clone)]
pub struct StructType {
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, Default)]
pub struct InterfaceType {
    pub methods: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NamedType {
    pub name: String,
    pub pkg_path: Option<String>,
    pub underlying: Box<Type>,
    pub methods: Vec<MethodInfo>,
}

#[derive(Debug, Clone)]
pub struct SignatureType {
    pub params: Vec<Type>,
    pub variadic: bool,
    pub results: Vec<Type>,
}

#[derive(Debug, Clone)]
pub enum Type {
    Basic(BasicKind),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array(Box<Type>, u64),
    Map(Box<Type>, Box<Type>),
    Struct(StructType),
    Interface(InterfaceType),
    Named(NamedType),
    Signature(SignatureType),
}

impl Type {
    /// Strip one level of pointer indirection, the way selector/index
    /// resolution does when looking for a type's method set.
    pub fn deref(&self) -> &Type {
        match self {
            Type::Pointer(inner) => inner,
            other => other,
        }
    }

    /// Strip named-type aliasing and pointer indirection, down to the
    /// concrete shape (struct, slice, map, ...). Receivers are frequently
    /// `*Named`, so this has to see through both layers or callers like
    /// `struct_fields` silently miss every pointer-receiver field access.
    pub fn underlying(&self) -> &Type {
        match self {
            Type::Named(n) => n.underlying.underlying(),
            Type::Pointer(inner) => inner.underlying(),
            other => other,
        }
    }

    /// Look up a method by name on this type's (or its underlying struct's)
    /// method set. Returns whether it is declared with a pointer receiver.
    pub fn method(&self, name: &str) -> Option<bool> {
        match self.deref() {
            Type::Named(n) => n
                .methods
                .iter()
                .find(|m| m.name == name)
                .map(|m| m.pointer_receiver),
            _ => None,
        }
    }

    pub fn has_any_pointer_method(&self) -> bool {
        match self.deref() {
            Type::Named(n) => n.methods.iter().any(|m| m.pointer_receiver),
            _ => false,
        }
    }

    /// The source-language zero value for this type, as Lua text.
    pub fn zero_value_lua(&self) -> String {
        match self.underlying() {
            Type::Basic(BasicKind::Bool) => "false".to_string(),
            Type::Basic(BasicKind::Int) | Type::Basic(BasicKind::Float) => "0".to_string(),
            Type::Basic(BasicKind::String) => "\"\"".to_string(),
            _ => "nil".to_string(),
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self.underlying(), Type::Map(..))
    }

    pub fn is_slice_or_array(&self) -> bool {
        matches!(self.underlying(), Type::Slice(..) | Type::Array(..))
    }

    pub fn elem(&self) -> Option<&Type> {
        match self.underlying() {
            Type::Slice(e) | Type::Array(e, _) => Some(e),
            Type::Map(_, v) => Some(v),
            Type::Pointer(e) => Some(e),
            _ => None,
        }
    }

    pub fn struct_fields(&self) -> Option<&[StructField]> {
        match self.underlying() {
            Type::Struct(s) => Some(&s.fields),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(k) => write!(f, "{k:?}"),
            Type::Pointer(t) => write!(f, "*{t}"),
            Type::Slice(t) => write!(f, "[]{t}"),
            Type::Array(t, n) => write!(f, "[{n}]{t}"),
            Type::Map(k, v) => write!(f, "map[{k}]{v}"),
            Type::Struct(_) => write!(f, "struct{{..}}"),
            Type::Interface(_) => write!(f, "interface{{..}}"),
            Type::Named(n) => write!(f, "{}", n.name),
            Type::Signature(_) => write!(f, "func(..)"),
        }
    }
}
