use crate::{
    pdf::{
        document::{
            dict_types::CRYPT_FILTER_DECODE_PARMS,
            filters::{CRYPT, FLATE_DECODE, STANDARD_CRYPT_FILTER},
            K_DECODE_PARMS, K_FILTER, K_NAME, K_TYPE,
        },
        Array, Dictionary, Name, Object,
    },
    BodyError,
};

/// `Filter` and `DecodeParms` of a stream as two parallel lists.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilterChain {
    filters: Vec<Name>,
    parms: Vec<Object>,
    as_array: bool,
    changed: bool,
}

impl FilterChain {
    pub(crate) fn from_dictionary(dict: &Dictionary) -> Result<Self, BodyError> {
        let (filters, as_array) = match dict.get(K_FILTER) {
            None => (Vec::new(), false),
            Some(Object::Name(n)) => (vec![n.clone()], false),
            Some(Object::Array(a)) => (
                a.iter()
                    .map(|f| f.name().cloned().ok_or(BodyError::InvalidFilter))
                    .collect::<Result<Vec<_>, _>>()?,
                true,
            ),
            Some(_) => return Err(BodyError::InvalidFilter),
        };

        let mut parms = match dict.get(K_DECODE_PARMS) {
            None => Vec::new(),
            Some(Object::Array(a)) => a.to_vec(),
            Some(p) => vec![p.clone()],
        };
        parms.resize(filters.len(), Object::Null);

        Ok(Self {
            filters,
            parms,
            as_array,
            changed: false,
        })
    }

    /// The stream handles its own encryption through a crypt filter.
    pub(crate) fn is_pre_encrypted(&self) -> bool {
        self.filters.first().map_or(false, |f| &f[..] == CRYPT)
    }

    /// The data is already deflated.
    pub(crate) fn contains_flate(&self) -> bool {
        self.filters.iter().any(|f| &f[..] == FLATE_DECODE)
    }

    pub(crate) fn push_flate(&mut self) {
        self.filters.push(Name::from(FLATE_DECODE));
        self.parms.push(Object::Null);
        self.changed = true;
    }

    /// Put the standard crypt filter in front of the chain.
    pub(crate) fn prepend_crypt_filter(&mut self) {
        let parms = Dictionary::from([
            (Name::from(K_TYPE), Object::from(Name::from(CRYPT_FILTER_DECODE_PARMS))),
            (Name::from(K_NAME), Object::from(Name::from(STANDARD_CRYPT_FILTER))),
        ]);
        self.filters.insert(0, Name::from(CRYPT));
        self.parms.insert(0, Object::from(parms));
        self.as_array = true;
        self.changed = true;
    }

    /// Write the chain into `dict`. An unchanged chain leaves `dict` as it is.
    pub(crate) fn apply(&self, dict: &mut Dictionary) {
        if !self.changed {
            return;
        }

        let has_parms = self.parms.iter().any(|p| !p.is_null());
        if self.filters.len() == 1 && !self.as_array {
            dict.insert(Name::from(K_FILTER), Object::from(self.filters[0].clone()));
            if has_parms {
                dict.insert(Name::from(K_DECODE_PARMS), self.parms[0].clone());
            } else {
                dict.remove(K_DECODE_PARMS);
            }
        } else {
            let filters: Array = self.filters.iter().cloned().map(Object::from).collect();
            dict.insert(Name::from(K_FILTER), Object::from(filters));
            if has_parms {
                dict.insert(Name::from(K_DECODE_PARMS), Object::from(self.parms.clone()));
            } else {
                dict.remove(K_DECODE_PARMS);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(n: &[u8]) -> Object {
        Object::from(Name::from(n))
    }

    fn applied(chain: &FilterChain, dict: &Dictionary) -> Dictionary {
        let mut dict = dict.clone();
        chain.apply(&mut dict);
        dict
    }

    #[test]
    fn flate_on_empty_chain_is_a_single_name() {
        let dict = Dictionary::new();
        let mut chain = FilterChain::from_dictionary(&dict).unwrap();
        chain.push_flate();

        let dict = applied(&chain, &dict);
        assert_eq!(dict.get(K_FILTER), Some(&name(FLATE_DECODE)));
        assert_eq!(dict.get(K_DECODE_PARMS), None);
    }

    #[test]
    fn flate_is_appended_and_parms_stay_aligned() {
        let predictor = Object::from(Dictionary::from([(Name::from_str("Predictor"), Object::Integer(12))]));
        let dict = Dictionary::from([
            (Name::from(K_FILTER), name(b"LZWDecode")),
            (Name::from(K_DECODE_PARMS), predictor.clone()),
        ]);
        let mut chain = FilterChain::from_dictionary(&dict).unwrap();
        chain.push_flate();

        let dict = applied(&chain, &dict);
        assert_eq!(
            dict.get(K_FILTER),
            Some(&Object::from(vec![name(b"LZWDecode"), name(FLATE_DECODE)]))
        );
        assert_eq!(
            dict.get(K_DECODE_PARMS),
            Some(&Object::from(vec![predictor, Object::Null]))
        );
    }

    #[test]
    fn existing_flate_is_detected() {
        let single = Dictionary::from([(Name::from(K_FILTER), name(FLATE_DECODE))]);
        assert!(FilterChain::from_dictionary(&single).unwrap().contains_flate());

        let chained = Dictionary::from([(
            Name::from(K_FILTER),
            Object::from(vec![name(b"ASCII85Decode"), name(FLATE_DECODE)]),
        )]);
        assert!(FilterChain::from_dictionary(&chained).unwrap().contains_flate());

        let other = Dictionary::from([(Name::from(K_FILTER), name(b"DCTDecode"))]);
        assert!(!FilterChain::from_dictionary(&other).unwrap().contains_flate());
        assert!(!FilterChain::from_dictionary(&Dictionary::new()).unwrap().contains_flate());
    }

    #[test]
    fn crypt_filter_goes_first() {
        let dict = Dictionary::new();
        let mut chain = FilterChain::from_dictionary(&dict).unwrap();
        chain.push_flate();
        chain.prepend_crypt_filter();

        let dict = applied(&chain, &dict);
        let filters = dict.get(K_FILTER).unwrap().array().unwrap();
        let parms = dict.get(K_DECODE_PARMS).unwrap().array().unwrap();
        assert_eq!(filters[..], [name(CRYPT), name(FLATE_DECODE)]);
        assert_eq!(parms.len(), filters.len());
        assert_eq!(
            parms[0].dictionary().unwrap().get(K_NAME),
            Some(&name(STANDARD_CRYPT_FILTER))
        );
        assert_eq!(parms[1], Object::Null);
    }

    #[test]
    fn crypt_filter_alone_is_still_an_array() {
        let dict = Dictionary::new();
        let mut chain = FilterChain::from_dictionary(&dict).unwrap();
        chain.prepend_crypt_filter();

        let dict = applied(&chain, &dict);
        assert_eq!(dict.get(K_FILTER), Some(&Object::from(vec![name(CRYPT)])));
        assert_eq!(dict.get(K_DECODE_PARMS).unwrap().array().unwrap().len(), 1);
    }

    #[test]
    fn pre_encrypted_detection() {
        let single = Dictionary::from([(Name::from(K_FILTER), name(CRYPT))]);
        assert!(FilterChain::from_dictionary(&single).unwrap().is_pre_encrypted());

        let first = Dictionary::from([(Name::from(K_FILTER), Object::from(vec![name(CRYPT), name(FLATE_DECODE)]))]);
        assert!(FilterChain::from_dictionary(&first).unwrap().is_pre_encrypted());

        let later = Dictionary::from([(Name::from(K_FILTER), Object::from(vec![name(FLATE_DECODE), name(CRYPT)]))]);
        assert!(!FilterChain::from_dictionary(&later).unwrap().is_pre_encrypted());
    }

    #[test]
    fn unchanged_chain_leaves_dictionary_alone() {
        let dict = Dictionary::from([(Name::from(K_FILTER), Object::from(vec![name(b"DCTDecode")]))]);
        let chain = FilterChain::from_dictionary(&dict).unwrap();
        assert_eq!(applied(&chain, &dict), dict);
    }

    #[test]
    fn invalid_filters() {
        let number = Dictionary::from([(Name::from(K_FILTER), Object::Integer(1))]);
        assert!(matches!(FilterChain::from_dictionary(&number), Err(BodyError::InvalidFilter)));

        let mixed = Dictionary::from([(Name::from(K_FILTER), Object::from(vec![name(FLATE_DECODE), Object::Null]))]);
        assert!(matches!(FilterChain::from_dictionary(&mixed), Err(BodyError::InvalidFilter)));
    }
}
