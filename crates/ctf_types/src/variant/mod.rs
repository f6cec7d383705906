//! Variant types.
//!
//! An [`UntaggedVariantDeclaration`] is a bare set of named choices. A
//! [`VariantDeclaration`] pairs it with a tag path naming an enumeration
//! elsewhere in the record. When a variant is instantiated the tag is
//! resolved by walking outward from the enclosing scope, then checked
//! against the choices: the enumerator count must equal the choice count
//! and every choice name must be an enumerator.

use std::cell::Cell;
use std::rc::Rc;

use ctf_ir::{Name, ScopePath};

use crate::structure::FieldTable;
use crate::{Declaration, EnumDefinition, Field, FieldSpec, Format, Scope, TypeError};

/// Set of named choices without a selector.
#[derive(Clone, Debug, Default)]
pub struct UntaggedVariantDeclaration {
    fields: FieldTable,
}

impl UntaggedVariantDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a choice. Choice names must be unique.
    pub fn add_field(&mut self, tag: Name, declaration: Declaration) -> Result<(), TypeError> {
        self.fields.push(tag, declaration)
    }

    pub fn field_index_by_tag(&self, tag: Name) -> Option<usize> {
        self.fields.index_of(tag)
    }

    pub fn field_by_tag(&self, tag: Name) -> Option<&FieldSpec> {
        self.field_index_by_tag(tag)
            .and_then(|index| self.fields.get(index))
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
}

/// Variant bound to a tag path.
#[derive(Clone, Debug)]
pub struct VariantDeclaration {
    untagged: Rc<UntaggedVariantDeclaration>,
    tag_path: ScopePath,
}

impl VariantDeclaration {
    pub fn new(untagged: Rc<UntaggedVariantDeclaration>, tag_path: ScopePath) -> Self {
        VariantDeclaration { untagged, tag_path }
    }

    pub fn untagged(&self) -> &Rc<UntaggedVariantDeclaration> {
        &self.untagged
    }

    /// Path of the selecting enumeration, relative to the enclosing scope.
    pub fn tag_path(&self) -> &ScopePath {
        &self.tag_path
    }
}

/// Live variant.
///
/// Holds one definition per choice; which one is active follows the current
/// value of the tag enumeration.
#[derive(Debug)]
pub struct VariantDefinition {
    declaration: Rc<VariantDeclaration>,
    name: Name,
    index: usize,
    scope: Rc<Scope>,
    enum_tag: Rc<EnumDefinition>,
    fields: Box<[Field]>,
    /// Index of the choice selected by the last `current_field` call.
    current: Cell<Option<usize>>,
}

impl VariantDefinition {
    #[tracing::instrument(level = "trace", skip_all, fields(field = name.raw(), index = index))]
    pub(crate) fn instantiate(
        declaration: &Rc<VariantDeclaration>,
        parent_scope: Option<&Rc<Scope>>,
        name: Name,
        index: usize,
    ) -> Result<Self, TypeError> {
        let scope = Scope::new(parent_scope, name);
        let tag_path = declaration.tag_path();

        let resolved = parent_scope
            .and_then(|parent| parent.lookup_path(tag_path.as_slice()))
            .ok_or_else(|| TypeError::UnresolvedTag {
                path: tag_path.clone(),
                scope: scope.path().clone(),
            })?;
        let enum_tag = resolved
            .as_enum()
            .cloned()
            .ok_or_else(|| TypeError::TagNotEnumeration {
                path: tag_path.clone(),
            })?;

        if let Err(err) = check_enum_tag(declaration.untagged(), &enum_tag) {
            tracing::debug!(error = %err, "variant tag does not match its choices");
            return Err(err);
        }

        let untagged = declaration.untagged();
        let mut fields = Vec::with_capacity(untagged.len());
        for spec in untagged.fields() {
            let definition = spec.declaration().instantiate(Some(&scope), spec.name(), 0)?;
            scope.register(spec.name(), definition.clone())?;
            fields.push(Field {
                name: spec.name(),
                definition,
            });
        }

        Ok(VariantDefinition {
            declaration: Rc::clone(declaration),
            name,
            index,
            scope,
            enum_tag,
            fields: fields.into_boxed_slice(),
            current: Cell::new(None),
        })
    }

    pub fn declaration(&self) -> &Rc<VariantDeclaration> {
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

    /// The enumeration selecting the active choice.
    pub fn enum_tag(&self) -> &Rc<EnumDefinition> {
        &self.enum_tag
    }

    /// Every choice, in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The choice selected by the tag's current value.
    ///
    /// Fails with [`TypeError::TagValue`] unless the value maps to exactly
    /// one enumerator.
    pub fn current_field(&self) -> Result<&Field, TypeError> {
        let tags = self.enum_tag.tags();
        let [tag] = tags.as_slice() else {
            return Err(TypeError::TagValue {
                value: self.enum_tag.value(),
                count: tags.len(),
            });
        };
        let index = self
            .declaration
            .untagged()
            .field_index_by_tag(*tag)
            .ok_or(TypeError::UnknownChoice { choice: *tag })?;
        self.current.set(Some(index));
        Ok(&self.fields[index])
    }

    /// The choice selected by the last successful [`current_field`] call.
    ///
    /// [`current_field`]: VariantDefinition::current_field
    pub fn cached_field(&self) -> Option<&Field> {
        self.current.get().map(|index| &self.fields[index])
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
        fsrc.variant_begin(src, &self.declaration)?;
        fdest.variant_begin(dest, &self.declaration)?;

        self.current_field()?.definition.copy(dest, fdest, src, fsrc)?;

        fsrc.variant_end(src, &self.declaration)?;
        fdest.variant_end(dest, &self.declaration)?;
        Ok(())
    }
}

fn check_enum_tag(
    untagged: &UntaggedVariantDeclaration,
    enum_tag: &EnumDefinition,
) -> Result<(), TypeError> {
    let enumeration = enum_tag.declaration();
    if enumeration.enumerator_count() != untagged.len() {
        return Err(TypeError::ChoiceCountMismatch {
            choices: untagged.len(),
            enumerators: enumeration.enumerator_count(),
        });
    }
    match untagged
        .fields()
        .iter()
        .find(|spec| !enumeration.has_tag(spec.name()))
    {
        Some(spec) => Err(TypeError::UnknownChoice {
            choice: spec.name(),
        }),
        None => Ok(()),
    }
}
