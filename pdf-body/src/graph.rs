use crate::{
    pdf::{Object, Reference},
    BodyError,
};

/// Access to the indirect objects of a document.
///
/// Writers use it to turn objects into references, readers to follow
/// references back to objects.
pub trait ObjectGraph {
    /// Store `object` as a new indirect object and return its reference.
    fn allocate(&mut self, object: Object) -> Result<Reference, BodyError>;

    fn resolve(&self, reference: &Reference) -> Result<&Object, BodyError>;

    /// Follow `object` if it is a reference, return it unchanged otherwise.
    fn follow<'a>(&'a self, object: &'a Object) -> Result<&'a Object, BodyError> {
        match object {
            Object::Reference(r) => self.resolve(r),
            other => Ok(other),
        }
    }
}
