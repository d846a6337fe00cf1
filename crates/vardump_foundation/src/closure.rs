//! Callables carrying their declaration source.

use std::fmt;
use std::rc::Rc;

/// Import table of the scope a callable was declared in.
///
/// Maps a short alias to the fully-qualified name it stands for. Qualified
/// names use `\` as the segment separator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportScope {
    /// Namespace the callable was declared in, if any.
    pub namespace: Option<Rc<str>>,
    /// Alias → fully-qualified name, in declaration order.
    imports: Vec<(Rc<str>, Rc<str>)>,
}

impl ImportScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the declaring namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.trim_matches('\\').into());
        self
    }

    /// Builder method to import `target` under its last segment.
    #[must_use]
    pub fn import(self, target: &str) -> Self {
        let target = target.trim_start_matches('\\');
        let alias = target.rsplit('\\').next().unwrap_or(target);
        self.import_as(target, alias)
    }

    /// Builder method to import `target` under an explicit alias.
    #[must_use]
    pub fn import_as(mut self, target: &str, alias: &str) -> Self {
        let target: Rc<str> = target.trim_start_matches('\\').into();
        match self.imports.iter_mut().find(|(a, _)| &**a == alias) {
            Some(entry) => entry.1 = target,
            None => self.imports.push((alias.into(), target)),
        }
        self
    }

    /// Looks up the fully-qualified name for an alias.
    #[must_use]
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|(a, _)| &**a == alias)
            .map(|(_, target)| &**target)
    }

    /// Returns the number of imports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    /// Returns true if nothing is imported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }
}

/// A function-like value.
///
/// The dumper never executes a closure; it shows the declaration source.
#[derive(Clone, PartialEq, Eq)]
pub struct Closure {
    type_name: Rc<str>,
    source: Rc<str>,
    scope: ImportScope,
}

impl Closure {
    /// Creates a closure from its declaration source.
    #[must_use]
    pub fn new(source: &str) -> Rc<Self> {
        Rc::new(Self::declare(source))
    }

    /// Creates an unshared closure value, for use with the builder methods.
    #[must_use]
    pub fn declare(source: &str) -> Self {
        Self {
            type_name: "Closure".into(),
            source: source.into(),
            scope: ImportScope::new(),
        }
    }

    /// Builder method to attach the declaring scope's import table.
    #[must_use]
    pub fn with_scope(mut self, scope: ImportScope) -> Self {
        self.scope = scope;
        self
    }

    /// Builder method to override the type name shown in dumps.
    #[must_use]
    pub fn with_type_name(mut self, name: &str) -> Self {
        self.type_name = name.into();
        self
    }

    /// Returns the type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the declaration source exactly as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the declaring scope.
    #[must_use]
    pub fn scope(&self) -> &ImportScope {
        &self.scope
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {:?}>", self.type_name, self.source)
    }
}
