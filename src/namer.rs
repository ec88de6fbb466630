//! Unique field-name generation
//!
//! Every field of a parsed structcode carries a name. Fields declared with an
//! explicit name keep it; all others receive a synthetic name of the form
//! `f<N>`, the lowest one that is not already in use within the current scope.

/// Tracker for the field names used within one parse scope.
///
/// Every name, explicit or generated, passes through [`FieldNamer::add`],
/// which is what guarantees that generated names never collide with
/// explicitly declared ones or with each other.
#[derive(Debug, Clone, Default)]
pub struct FieldNamer {
    idx: usize,
    used: Vec<String>,
}

impl FieldNamer {
    /// Constructs a new `FieldNamer` with no names in use
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current counter value and post-increments it.
    #[inline]
    pub fn next(&mut self) -> usize {
        let ret = self.idx;
        self.idx += 1;
        ret
    }

    /// Records `name` as used.
    pub fn add(&mut self, name: impl Into<String>) {
        self.used.push(name.into());
    }

    /// Returns `true` if `name` has already been used in this scope.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.used.iter().any(|used| used == name)
    }

    /// Registers an explicit name, returning `false` without registering
    /// anything if the name is already in use.
    pub fn claim(&mut self, name: &str) -> bool {
        if self.has(name) {
            false
        } else {
            self.add(name);
            true
        }
    }

    /// Generates, registers and returns the lowest unused `f<N>` name
    /// reachable from the current counter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use structcode::namer::FieldNamer;
    /// let mut namer = FieldNamer::new();
    /// namer.add("f1");
    /// assert_eq!(namer.generate(), "f0");
    /// assert_eq!(namer.generate(), "f2");
    /// ```
    pub fn generate(&mut self) -> String {
        loop {
            let candidate = format!("f{}", self.next());
            if !self.has(&candidate) {
                self.add(candidate.clone());
                return candidate;
            }
        }
    }

    /// Returns the names used so far, in order of registration.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_generation() {
        let mut namer = FieldNamer::new();
        assert_eq!(namer.generate(), "f0");
        assert_eq!(namer.generate(), "f1");
        assert_eq!(namer.generate(), "f2");
        assert_eq!(namer.names(), ["f0", "f1", "f2"]);
    }

    #[test]
    fn skips_explicit_collisions() {
        let mut namer = FieldNamer::new();
        assert!(namer.claim("f0"));
        assert!(namer.claim("foo"));
        assert_eq!(namer.generate(), "f1");
        namer.add("f2");
        assert_eq!(namer.generate(), "f3");
        assert!(namer.has("foo"));
        assert!(!namer.has("f4"));
    }

    #[test]
    fn claim_rejects_used_names() {
        let mut namer = FieldNamer::new();
        assert_eq!(namer.generate(), "f0");
        assert!(!namer.claim("f0"));
        assert_eq!(namer.names().len(), 1);
    }

    #[test]
    fn counter_is_monotone() {
        let mut namer = FieldNamer::new();
        assert_eq!(namer.next(), 0);
        assert_eq!(namer.next(), 1);
        // counter already passed f0 and f1
        assert_eq!(namer.generate(), "f2");
    }
}
