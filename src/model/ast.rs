//! # Domain Model AST
//!
//! The validated input graph handed to the compiler: declarations, models,
//! fields, attributes and expressions. Documents are produced by the upstream
//! parser/validator and read here through serde (YAML or JSON).
//!
//! Attribute usages carry a resolution slot that stays empty until
//! [`crate::model::resolve`] runs. Translation code only ever reads resolved
//! identities through [`Attribute::canonical_name`] and [`Attribute::arg`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scalar type names understood by the target schema language
pub const SCALAR_TYPES: &[&str] = &[
    "String", "Boolean", "Int", "BigInt", "Float", "Decimal", "DateTime", "Json", "Bytes",
];

/// A whole input document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Extra attribute declarations; same-named entries override the built-ins
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,

    /// When true, inherited fields are already present on every sub model
    #[serde(default)]
    pub flattened: bool,

    /// Declarations in source order
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

/// Top-level declaration kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    #[serde(rename = "datasource")]
    DataSource(DataSource),
    Generator(GeneratorDecl),
    Enum(EnumDecl),
    Model(Model),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::DataSource(ds) => &ds.name,
            Declaration::Generator(g) => &g.name,
            Declaration::Enum(e) => &e.name,
            Declaration::Model(m) => &m.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<ConfigField>,
}

impl DataSource {
    pub fn field(&self, name: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<ConfigField>,
}

/// `name = value` entry of a datasource or generator block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,
    pub value: ConfigExpr,
}

/// Value of a config field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigExpr {
    Invocation(Invocation),
    Array(Vec<ConfigArrayItem>),
    #[serde(untagged)]
    Literal(Literal),
}

impl ConfigExpr {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigExpr::Literal(Literal::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Item of a config array: a literal or a named-argument invocation like `fullTextIndex(sort: "asc")`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigArrayItem {
    Invocation(ConfigInvocation),
    #[serde(untagged)]
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigInvocation {
    pub name: String,
    #[serde(default)]
    pub args: Vec<ConfigInvocationArg>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigInvocationArg {
    pub name: String,
    pub value: Literal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<EnumField>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "EnumFieldRepr")]
pub struct EnumField {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub comments: Vec<String>,
}

/// Enum fields may be written as a bare name
#[derive(Deserialize)]
#[serde(untagged)]
enum EnumFieldRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        attributes: Vec<Attribute>,
        #[serde(default)]
        comments: Vec<String>,
    },
}

impl From<EnumFieldRepr> for EnumField {
    fn from(repr: EnumFieldRepr) -> Self {
        match repr {
            EnumFieldRepr::Name(name) => EnumField {
                name,
                attributes: vec![],
                comments: vec![],
            },
            EnumFieldRepr::Full {
                name,
                attributes,
                comments,
            } => EnumField {
                name,
                attributes,
                comments,
            },
        }
    }
}

/// A data model (table) or view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default, alias = "view")]
    pub is_view: bool,
    /// Participates in simulated polymorphism as a delegate base
    #[serde(default, alias = "delegate")]
    pub is_delegate: bool,
    /// Abstract models only contribute fields to their sub models
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, alias = "extends")]
    pub super_types: Vec<String>,
}

impl Model {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All usages of an attribute, matched by canonical name
    pub fn attributes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attribute> {
        self.attributes
            .iter()
            .filter(move |a| a.canonical_name() == Some(name))
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.canonical_name() == Some(name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub comments: Vec<String>,
    /// Name of the model that originally declared this field
    #[serde(default)]
    pub inherited_from: Option<String>,
}

impl Field {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.canonical_name() == Some(name))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Explicit relation name from `@relation("name")` / `@relation(name: "name")`
    pub fn relation_name(&self) -> Option<&str> {
        self.attribute("@relation")?.arg("name")?.as_str()
    }
}

/// Type of a field. Exactly one of `scalar`, `reference` or `unsupported`
/// is expected to be set; anything else is reported as unresolved during
/// translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldTypeRepr")]
pub struct FieldType {
    pub scalar: Option<String>,
    /// Name of a referenced model or enum
    pub reference: Option<String>,
    /// Provider-specific native type literal
    pub unsupported: Option<String>,
    pub array: bool,
    pub optional: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldTypeRepr {
    Short(String),
    Full {
        #[serde(default)]
        scalar: Option<String>,
        #[serde(default)]
        reference: Option<String>,
        #[serde(default)]
        unsupported: Option<String>,
        #[serde(default)]
        array: bool,
        #[serde(default)]
        optional: bool,
    },
}

impl TryFrom<FieldTypeRepr> for FieldType {
    type Error = String;

    fn try_from(repr: FieldTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            FieldTypeRepr::Short(text) => text.parse(),
            FieldTypeRepr::Full {
                scalar,
                reference,
                unsupported,
                array,
                optional,
            } => Ok(FieldType {
                scalar,
                reference,
                unsupported,
                array,
                optional,
            }),
        }
    }
}

impl FieldType {
    pub fn scalar(name: impl Into<String>) -> Self {
        FieldType {
            scalar: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        FieldType {
            reference: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }
}

impl FromStr for FieldType {
    type Err = String;

    /// Parses the shorthand form: `String`, `Post[]`, `User?`, `Unsupported("circle")`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim();
        let optional = rest.ends_with('?');
        if optional {
            rest = &rest[..rest.len() - 1];
        }
        let array = rest.ends_with("[]");
        if array {
            rest = &rest[..rest.len() - 2];
        }
        if rest.is_empty() {
            return Err(format!("empty field type in '{}'", s));
        }

        let mut ty = FieldType {
            array,
            optional,
            ..Default::default()
        };
        if let Some(inner) = rest
            .strip_prefix("Unsupported(")
            .and_then(|r| r.strip_suffix(')'))
        {
            ty.unsupported = Some(inner.trim().trim_matches('"').to_string());
        } else if SCALAR_TYPES.contains(&rest) {
            ty.scalar = Some(rest.to_string());
        } else {
            ty.reference = Some(rest.to_string());
        }
        Ok(ty)
    }
}

/// An attribute declaration (`attribute @id(...)` in the source language)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDecl {
    pub name: String,
    /// Tagged as belonging to the target schema
    #[serde(default)]
    pub prisma: bool,
    /// Parameter names in positional order
    #[serde(default)]
    pub params: Vec<String>,
    /// This declaration is an alias of another one
    #[serde(default)]
    pub alias_of: Option<String>,
}

impl AttributeDecl {
    pub fn new(name: &str, prisma: bool, params: &[&str]) -> Self {
        AttributeDecl {
            name: name.to_string(),
            prisma,
            params: params.iter().map(|p| p.to_string()).collect(),
            alias_of: None,
        }
    }
}

/// Canonical identity of an attribute usage, filled in by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    pub name: String,
    pub prisma: bool,
}

/// An attribute usage on a model, field, enum or enum field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    /// Name as written, possibly an alias
    pub name: String,
    #[serde(default)]
    pub args: Vec<AttributeArg>,
    #[serde(skip)]
    pub resolved: Option<ResolvedAttribute>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, args: Vec<AttributeArg>) -> Self {
        Attribute {
            name: name.into(),
            args,
            resolved: None,
        }
    }

    /// Canonical declaration name; `None` when the usage did not resolve
    pub fn canonical_name(&self) -> Option<&str> {
        self.resolved.as_ref().map(|r| r.name.as_str())
    }

    /// Argument bound to the given parameter, whether passed by name or position
    pub fn arg(&self, param: &str) -> Option<&Expression> {
        self.args
            .iter()
            .find(|a| a.param.as_deref() == Some(param))
            .map(|a| &a.value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeArg {
    #[serde(default)]
    pub name: Option<String>,
    pub value: Expression,
    /// Parameter this argument binds to, filled in by the resolver
    #[serde(skip)]
    pub param: Option<String>,
}

impl AttributeArg {
    pub fn positional(value: Expression) -> Self {
        AttributeArg {
            name: None,
            value,
            param: None,
        }
    }

    pub fn named(name: impl Into<String>, value: Expression) -> Self {
        AttributeArg {
            name: Some(name.into()),
            value,
            param: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{}", s),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Source-language expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Array(Vec<Expression>),
    Reference(ReferenceExpr),
    Invocation(Invocation),
    Member(MemberExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    This,
    Null,
    #[serde(untagged)]
    Literal(Literal),
}

impl Expression {
    pub fn string(s: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(s.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Expression::Literal(Literal::Boolean(b))
    }

    pub fn number(n: i64) -> Self {
        Expression::Literal(Literal::Number(n.into()))
    }

    pub fn reference(target: impl Into<String>) -> Self {
        Expression::Reference(ReferenceExpr {
            target: target.into(),
            args: vec![],
        })
    }

    pub fn call(function: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Invocation(Invocation {
            function: function.into(),
            args: args.into_iter().map(Argument::positional).collect(),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expression::Literal(Literal::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Expression kind name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Array(_) => "ArrayExpr",
            Expression::Reference(_) => "ReferenceExpr",
            Expression::Invocation(_) => "InvocationExpr",
            Expression::Member(_) => "MemberAccessExpr",
            Expression::Unary(_) => "UnaryExpr",
            Expression::Binary(_) => "BinaryExpr",
            Expression::This => "ThisExpr",
            Expression::Null => "NullExpr",
            Expression::Literal(Literal::String(_)) => "StringLiteral",
            Expression::Literal(Literal::Number(_)) => "NumberLiteral",
            Expression::Literal(Literal::Boolean(_)) => "BooleanLiteral",
        }
    }

    /// True if this expression or any sub-expression invokes `function`
    pub fn invokes(&self, function: &str) -> bool {
        match self {
            Expression::Invocation(inv) => {
                inv.function == function || inv.args.iter().any(|a| a.value.invokes(function))
            }
            Expression::Array(items) => items.iter().any(|i| i.invokes(function)),
            Expression::Reference(r) => r.args.iter().any(|a| a.value.invokes(function)),
            Expression::Member(m) => m.operand.invokes(function),
            Expression::Unary(u) => u.operand.invokes(function),
            Expression::Binary(b) => b.left.invokes(function) || b.right.invokes(function),
            Expression::This | Expression::Null | Expression::Literal(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceExpr {
    pub target: String,
    #[serde(default)]
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    #[serde(default)]
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub name: Option<String>,
    pub value: Expression,
}

impl Argument {
    pub fn positional(value: Expression) -> Self {
        Argument { name: None, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpr {
    pub operand: Box<Expression>,
    pub member: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: String,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: Box<Expression>,
    pub op: String,
    pub right: Box<Expression>,
}
