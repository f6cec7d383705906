//! Structure type: an ordered sequence of named fields.

use std::rc::Rc;

use ctf_ir::Name;
use rustc_hash::FxHashMap;

use crate::{Declaration, Field, Format, Scope, TypeError};

/// A named child declaration of a struct or variant.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    name: Name,
    declaration: Declaration,
}

impl FieldSpec {
    pub fn name(&self) -> Name {
        self.name
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }
}

/// Ordered fields plus a name index, shared by struct and variant
/// declarations.
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldTable {
    fields: Vec<FieldSpec>,
    /// Keeps the index rather than a reference, so the vector may grow.
    by_name: FxHashMap<Name, usize>,
}

impl FieldTable {
    pub(crate) fn push(&mut self, name: Name, declaration: Declaration) -> Result<(), TypeError> {
        if self.by_name.contains_key(&name) {
            return Err(TypeError::DuplicateField { name });
        }
        self.by_name.insert(name, self.fields.len());
        self.fields.push(FieldSpec { name, declaration });
        Ok(())
    }

    pub(crate) fn index_of(&self, name: Name) -> Option<usize> {
        self.by_name.get(&name).copied()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    pub(crate) fn as_slice(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Structure declaration.
#[derive(Clone, Debug)]
pub struct StructDeclaration {
    fields: FieldTable,
    alignment: u32,
}

impl StructDeclaration {
    pub fn new() -> Self {
        StructDeclaration {
            fields: FieldTable::default(),
            alignment: 1,
        }
    }

    /// Append a field.
    ///
    /// The struct's alignment becomes the largest alignment of its fields.
    pub fn add_field(&mut self, name: Name, declaration: Declaration) -> Result<(), TypeError> {
        let alignment = declaration.alignment();
        self.fields.push(name, declaration)?;
        self.alignment = self.alignment.max(alignment);
        Ok(())
    }

    /// Index of the field named `name`.
    pub fn lookup_field_index(&self, name: Name) -> Option<usize> {
        self.fields.index_of(name)
    }

    pub fn field(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        self.fields.as_slice()
    }

    pub fn len(&self) -> usize {
        self.fields.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.as_slice().is_empty()
    }

    /// Alignment in bits.
    pub fn alignment(&self) -> u32 {
        self.alignment
    }
}

impl Default for StructDeclaration {
    fn default() -> Self {
        Self::new()
    }
}

/// Live structure.
#[derive(Debug)]
pub struct StructDefinition {
    declaration: Rc<StructDeclaration>,
    name: Name,
    index: usize,
    scope: Rc<Scope>,
    fields: Vec<Field>,
}

impl StructDefinition {
    /// Instantiate every field in order, binding each into the struct's scope
    /// as soon as it exists so later fields can resolve earlier ones.
    #[tracing::instrument(level = "trace", skip_all, fields(field = name.raw(), index = index))]
    pub(crate) fn instantiate(
        declaration: &Rc<StructDeclaration>,
        parent_scope: Option<&Rc<Scope>>,
        name: Name,
        index: usize,
    ) -> Result<Self, TypeError> {
        let scope = Scope::new(parent_scope, name);
        let mut fields = Vec::with_capacity(declaration.len());
        for (field_index, spec) in declaration.fields().iter().enumerate() {
            let definition = spec
                .declaration()
                .instantiate(Some(&scope), spec.name(), field_index)?;
            scope.register(spec.name(), definition.clone())?;
            fields.push(Field {
                name: spec.name(),
                definition,
            });
        }
        Ok(StructDefinition {
            declaration: Rc::clone(declaration),
            name,
            index,
            scope,
            fields,
        })
    }

    pub fn declaration(&self) -> &Rc<StructDeclaration> {
        &self.declaration
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn scope(&self) -> &Rc<Scope> {
        &self.scope
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn field_by_name(&self, name: Name) -> Option<&Field> {
        self.declaration
            .lookup_field_index(name)
            .and_then(|index| self.fields.get(index))
    }

    pub(crate) fn copy<D, S>(
        &self,
        dest: &mut D::Pos,
        fdest: &D,
        src: &mut S::Pos,
        fsrc: &S,
    ) -> Result<(), TypeError>
    where
        D: Format + ?Sized,
        S: Format + ?Sized,
    {
        fsrc.struct_begin(src, &self.declaration)?;
        fdest.struct_begin(dest, &self.declaration)?;

        for field in &self.fields {
            field.definition.copy(dest, fdest, src, fsrc)?;
        }

        fsrc.struct_end(src, &self.declaration)?;
        fdest.struct_end(dest, &self.declaration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
