use fnv::FnvHashMap;

use crate::{
    graph::ObjectGraph,
    pdf::{Object, Reference},
    BodyError,
};

/// The indirect objects of one PDF section, keyed by object number.
///
/// Object numbers are handed out in ascending order starting at 1. A number can
/// be reserved before its object exists, e.g. for the `Length` of a stream
/// that is only known after the stream has been written.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfSection {
    pub(crate) objects: FnvHashMap<u32, Object>,
    next_index: u32,
}

impl Default for PdfSection {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSection {
    pub fn new() -> Self {
        Self {
            objects: FnvHashMap::default(),
            next_index: 1,
        }
    }

    /// Hand out the next object number without storing an object for it.
    pub fn reserve(&mut self) -> Result<Reference, BodyError> {
        let index = self.next_index;
        self.next_index = index
            .checked_add(1)
            .ok_or(BodyError::Allocation("object numbers exhausted"))?;
        Ok(Reference::new(index, 0))
    }

    /// Store `object` under a previously reserved reference.
    pub fn set(&mut self, reference: &Reference, object: Object) -> Result<(), BodyError> {
        if reference.index == 0 || reference.index >= self.next_index {
            return Err(BodyError::Allocation("reference was not handed out by this section"));
        }
        self.objects.insert(reference.index, object);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Highest object number handed out so far.
    pub fn highest_index(&self) -> u32 {
        self.next_index - 1
    }

    /// All stored objects in ascending object number order.
    pub fn objects(&self) -> impl Iterator<Item = (Reference, &Object)> {
        let mut keys: Vec<u32> = self.objects.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter()
            .filter_map(move |index| self.objects.get(&index).map(|obj| (Reference::new(index, 0), obj)))
    }
}

impl ObjectGraph for PdfSection {
    fn allocate(&mut self, object: Object) -> Result<Reference, BodyError> {
        let reference = self.reserve()?;
        log::trace!("allocate object {}", reference);
        self.objects.insert(reference.index, object);
        Ok(reference)
    }

    fn resolve(&self, reference: &Reference) -> Result<&Object, BodyError> {
        self.objects
            .get(&reference.index)
            .ok_or_else(|| BodyError::UnresolvedReference(reference.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_resolve() {
        let mut section = PdfSection::new();
        let a = section.allocate(Object::Integer(1)).unwrap();
        let b = section.allocate(Object::Null).unwrap();

        assert_eq!(a, Reference::new(1, 0));
        assert_eq!(b, Reference::new(2, 0));
        assert_eq!(section.resolve(&a).unwrap(), &Object::Integer(1));
        assert_eq!(section.highest_index(), 2);
    }

    #[test]
    fn reserved_reference_resolves_after_set() {
        let mut section = PdfSection::new();
        let r = section.reserve().unwrap();
        assert!(matches!(section.resolve(&r), Err(BodyError::UnresolvedReference(_))));

        section.set(&r, Object::Integer(42)).unwrap();
        assert_eq!(section.follow(&Object::Reference(r)).unwrap(), &Object::Integer(42));
    }

    #[test]
    fn foreign_reference_cannot_be_set() {
        let mut section = PdfSection::new();
        assert!(section.set(&Reference::new(5, 0), Object::Null).is_err());
        assert!(section.set(&Reference::new(0, 0), Object::Null).is_err());
    }

    #[test]
    fn objects_are_ordered() {
        let mut section = PdfSection::new();
        for i in 0..20 {
            section.allocate(Object::Integer(i)).unwrap();
        }
        let indices: Vec<u32> = section.objects().map(|(r, _)| r.index()).collect();
        assert_eq!(indices, (1..=20).collect::<Vec<_>>());
    }
}
