//! In-memory target schema.
//!
//! Declarations are kept in insertion order. `add_*` methods hand back typed
//! handles so the generator can come back to a block (e.g. to add auxiliary
//! relation fields) after its initial translation.
//!
//! A handle is only meaningful for the schema that issued it. The `*_mut`
//! and `model` accessors panic when given a handle from another schema;
//! [`PrismaSchema::get_model`] and [`PrismaSchema::get_model_mut`] return
//! `None` instead.

/// Handle to a datasource block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSourceHandle(usize);

/// Handle to a generator block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorHandle(usize);

/// Handle to a model or view block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelHandle(usize);

/// Handle to an enum block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumHandle(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum PrismaDeclaration {
    DataSource(ConfigBlock),
    Generator(ConfigBlock),
    Model(ModelBlock),
    Enum(EnumBlock),
}

/// Accumulated target schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrismaSchema {
    declarations: Vec<PrismaDeclaration>,
}

impl PrismaSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declarations(&self) -> &[PrismaDeclaration] {
        &self.declarations
    }

    pub fn add_data_source(&mut self, name: &str, fields: Vec<SimpleField>) -> DataSourceHandle {
        self.declarations
            .push(PrismaDeclaration::DataSource(ConfigBlock::new(name, fields)));
        DataSourceHandle(self.declarations.len() - 1)
    }

    pub fn add_generator(&mut self, name: &str, fields: Vec<SimpleField>) -> GeneratorHandle {
        self.declarations
            .push(PrismaDeclaration::Generator(ConfigBlock::new(name, fields)));
        GeneratorHandle(self.declarations.len() - 1)
    }

    pub fn add_model(&mut self, name: &str) -> ModelHandle {
        self.push_model(ModelBlock::new(name, false))
    }

    pub fn add_view(&mut self, name: &str) -> ModelHandle {
        self.push_model(ModelBlock::new(name, true))
    }

    fn push_model(&mut self, block: ModelBlock) -> ModelHandle {
        self.declarations.push(PrismaDeclaration::Model(block));
        ModelHandle(self.declarations.len() - 1)
    }

    pub fn add_enum(&mut self, name: &str) -> EnumHandle {
        self.declarations.push(PrismaDeclaration::Enum(EnumBlock {
            name: name.to_string(),
            ..Default::default()
        }));
        EnumHandle(self.declarations.len() - 1)
    }

    pub fn data_source_mut(&mut self, handle: DataSourceHandle) -> &mut ConfigBlock {
        match &mut self.declarations[handle.0] {
            PrismaDeclaration::DataSource(block) => block,
            _ => unreachable!("datasource handle points at another declaration kind"),
        }
    }

    pub fn generator_mut(&mut self, handle: GeneratorHandle) -> &mut ConfigBlock {
        match &mut self.declarations[handle.0] {
            PrismaDeclaration::Generator(block) => block,
            _ => unreachable!("generator handle points at another declaration kind"),
        }
    }

    /// # Panics
    /// If `handle` was issued by another schema and does not point at a model here.
    pub fn model(&self, handle: ModelHandle) -> &ModelBlock {
        match &self.declarations[handle.0] {
            PrismaDeclaration::Model(block) => block,
            _ => unreachable!("model handle points at another declaration kind"),
        }
    }

    /// # Panics
    /// If `handle` was issued by another schema and does not point at a model here.
    pub fn model_mut(&mut self, handle: ModelHandle) -> &mut ModelBlock {
        match &mut self.declarations[handle.0] {
            PrismaDeclaration::Model(block) => block,
            _ => unreachable!("model handle points at another declaration kind"),
        }
    }

    /// Model block behind `handle`, or `None` if it does not point at one
    pub fn get_model(&self, handle: ModelHandle) -> Option<&ModelBlock> {
        match self.declarations.get(handle.0)? {
            PrismaDeclaration::Model(block) => Some(block),
            _ => None,
        }
    }

    pub fn get_model_mut(&mut self, handle: ModelHandle) -> Option<&mut ModelBlock> {
        match self.declarations.get_mut(handle.0)? {
            PrismaDeclaration::Model(block) => Some(block),
            _ => None,
        }
    }

    pub fn enum_mut(&mut self, handle: EnumHandle) -> &mut EnumBlock {
        match &mut self.declarations[handle.0] {
            PrismaDeclaration::Enum(block) => block,
            _ => unreachable!("enum handle points at another declaration kind"),
        }
    }

    /// Look up a model or view block by name
    pub fn find_model(&self, name: &str) -> Option<&ModelBlock> {
        self.declarations.iter().find_map(|d| match d {
            PrismaDeclaration::Model(m) if m.name == name => Some(m),
            _ => None,
        })
    }
}

/// `name = text` entry of a datasource or generator block; `text` is already rendered
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleField {
    pub name: String,
    pub text: String,
}

impl SimpleField {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SimpleField {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A datasource or generator block
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBlock {
    pub name: String,
    pub fields: Vec<SimpleField>,
}

impl ConfigBlock {
    fn new(name: &str, fields: Vec<SimpleField>) -> Self {
        ConfigBlock {
            name: name.to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&SimpleField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Replace the text of `name`, appending the field if it is missing
    pub fn set_field(&mut self, name: &str, text: String) {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.text = text,
            None => self.fields.push(SimpleField::new(name, text)),
        }
    }
}

/// A `model` or `view` block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelBlock {
    pub name: String,
    pub is_view: bool,
    pub fields: Vec<ModelField>,
    pub attributes: Vec<Attribute>,
    pub documentations: Vec<String>,
}

impl ModelBlock {
    fn new(name: &str, is_view: bool) -> Self {
        ModelBlock {
            name: name.to_string(),
            is_view,
            ..Default::default()
        }
    }

    /// Append a field and return it for further editing
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        ty: ModelFieldType,
        attributes: Vec<Attribute>,
        documentations: Vec<String>,
    ) -> &mut ModelField {
        self.fields.push(ModelField {
            name: name.into(),
            ty,
            attributes,
            documentations,
        });
        let last = self.fields.len() - 1;
        &mut self.fields[last]
    }

    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut ModelField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.documentations.push(comment.into());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelField {
    pub name: String,
    pub ty: ModelFieldType,
    pub attributes: Vec<Attribute>,
    pub documentations: Vec<String>,
}

impl ModelField {
    /// First named attribute called `name`
    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut NamedAttribute> {
        self.attributes.iter_mut().find_map(|a| match a {
            Attribute::Named(named) if named.name == name => Some(named),
            _ => None,
        })
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.documentations.push(comment.into());
    }
}

/// Flat `(name, array, optional)` type record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFieldType {
    pub name: String,
    pub array: bool,
    pub optional: bool,
}

impl ModelFieldType {
    pub fn new(name: impl Into<String>, array: bool, optional: bool) -> Self {
        ModelFieldType {
            name: name.into(),
            array,
            optional,
        }
    }
}

/// A target attribute: either structured or injected verbatim
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Named(NamedAttribute),
    PassThrough(String),
}

impl Attribute {
    pub fn named(name: impl Into<String>, args: Vec<AttributeArg>) -> Self {
        Attribute::Named(NamedAttribute {
            name: name.into(),
            args,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedAttribute {
    pub name: String,
    pub args: Vec<AttributeArg>,
}

impl NamedAttribute {
    pub fn arg_mut(&mut self, name: &str) -> Option<&mut AttributeArg> {
        self.args
            .iter_mut()
            .find(|a| a.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArg {
    pub name: Option<String>,
    pub value: AttributeArgValue,
}

impl AttributeArg {
    pub fn positional(value: AttributeArgValue) -> Self {
        AttributeArg { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: AttributeArgValue) -> Self {
        AttributeArg {
            name: Some(name.into()),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeArgValue {
    String(String),
    /// Number kept in its source text form
    Number(String),
    Boolean(bool),
    FieldReference(FieldReference),
    FunctionCall(FunctionCall),
    Array(Vec<AttributeArgValue>),
}

impl AttributeArgValue {
    pub fn string(s: impl Into<String>) -> Self {
        AttributeArgValue::String(s.into())
    }

    pub fn field_ref(field: impl Into<String>) -> Self {
        AttributeArgValue::FieldReference(FieldReference::new(field))
    }

    /// `[a, b, ...]` of plain field references
    pub fn field_refs<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttributeArgValue::Array(fields.into_iter().map(Self::field_ref).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldReference {
    pub field: String,
    pub args: Vec<FieldReferenceArg>,
}

impl FieldReference {
    pub fn new(field: impl Into<String>) -> Self {
        FieldReference {
            field: field.into(),
            args: vec![],
        }
    }
}

/// Argument of a field reference, value already printed in source syntax
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReferenceArg {
    pub name: Option<String>,
    pub value: String,
}

/// Function call with pre-rendered arguments
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub func: String,
    pub args: Vec<String>,
}

impl FunctionCall {
    pub fn new(func: impl Into<String>, args: Vec<String>) -> Self {
        FunctionCall {
            func: func.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumBlock {
    pub name: String,
    pub fields: Vec<EnumField>,
    pub attributes: Vec<Attribute>,
    pub documentations: Vec<String>,
}

impl EnumBlock {
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        attributes: Vec<Attribute>,
        documentations: Vec<String>,
    ) {
        self.fields.push(EnumField {
            name: name.into(),
            attributes,
            documentations,
        });
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.documentations.push(comment.into());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumField {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub documentations: Vec<String>,
}
