use crate::values::ObjRef;

/// A lexical environment: an association list of (symbol, value) bindings.
/// Lookups scan from the most recent binding, so later bindings shadow
/// earlier ones. Symbols not found here fall back to their global binding.
#[derive(Debug, Clone, Default)]
pub struct Env {
    bindings: Vec<(ObjRef, ObjRef)>,
}

impl Env {
    /// create an empty environment
    pub fn new() -> Env {
        Env { bindings: Vec::new() }
    }

    /// add a binding in front of all existing ones
    pub fn bind(&mut self, sym: ObjRef, value: ObjRef) {
        self.bindings.push((sym, value));
    }

    /// find the most recent binding for a symbol, compared by identity
    pub fn lookup(&self, sym: ObjRef) -> Option<ObjRef> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| *bound == sym)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_binding_wins() {
        let mut env = Env::new();
        env.bind(ObjRef(1), ObjRef(10));
        env.bind(ObjRef(2), ObjRef(20));
        env.bind(ObjRef(1), ObjRef(11));

        assert_eq!(env.lookup(ObjRef(1)), Some(ObjRef(11)));
        assert_eq!(env.lookup(ObjRef(2)), Some(ObjRef(20)));
        assert_eq!(env.lookup(ObjRef(3)), None);
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn empty_env_finds_nothing() {
        let env = Env::new();
        assert!(env.is_empty());
        assert_eq!(env.lookup(ObjRef::NIL), None);
    }
}
