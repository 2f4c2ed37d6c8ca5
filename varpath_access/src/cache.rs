use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{PathParseError, VarPath};

/// A cache for parsed variable paths.
///
/// Graph nodes evaluate the same path string on every execution; caching the
/// split/analyze step keeps repeated accesses cheap.
#[derive(Debug, Default)]
pub struct VarPathCache {
    paths: Mutex<HashMap<String, Arc<VarPath>>>,
}

impl VarPathCache {
    /// Parse a path, returning the cached result when available.
    pub fn parse(&self, source: &str) -> Result<Arc<VarPath>, PathParseError> {
        let mut cache = self.paths.lock().unwrap();
        match cache.get(source) {
            Some(path) => Ok(Arc::clone(path)),
            None => {
                let path = Arc::new(VarPath::parse(source)?);
                cache.insert(source.to_string(), path.clone());
                Ok(path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_parse_is_shared() {
        let cache = VarPathCache::default();
        let first = cache.parse("A.B[2]").unwrap();
        let second = cache.parse("A.B[2]").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.segments.len(), 2);
    }
}
