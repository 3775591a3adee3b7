//! Dependency ordering of user assemblies.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    model::{simple_name, AssemblyInfo},
};

/// Orders user assemblies so that every assembly comes after the assemblies it references.
///
/// The order is a post-order walk from the entry point over references that resolve to other
/// user assemblies; references outside the set are not followed. Assemblies the entry point
/// never reaches are not part of the order.
///
/// Reference cycles do not stop the walk. Each assembly is listed once, when the walk first
/// finishes it, so a cycle yields a traversal order rather than a topological one.
///
/// Simple names are matched case-insensitively. When two assemblies share a simple name the
/// first one is used and a warning is reported.
#[derive(Debug, Clone)]
pub struct DependencyOrderer {
    diagnostics: Arc<Diagnostics>,
}

impl DependencyOrderer {
    /// Create an orderer reporting into `diagnostics`.
    pub fn new(diagnostics: Arc<Diagnostics>) -> Self {
        Self { diagnostics }
    }

    /// Assembly identities in dependency order, starting from the assembly named
    /// `entry_point`.
    ///
    /// Returns an empty order, with a diagnostic, when no entry point is given or no user
    /// assembly has that name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use portscope::diagnostics::Diagnostics;
    /// use portscope::engine::DependencyOrderer;
    /// use portscope::model::AssemblyInfo;
    /// use std::sync::Arc;
    ///
    /// let assemblies = [
    ///     AssemblyInfo::new("App, Version=1.0").with_references(["Lib, Version=1.0", "mscorlib"]),
    ///     AssemblyInfo::new("Lib, Version=1.0"),
    /// ];
    ///
    /// let orderer = DependencyOrderer::new(Arc::new(Diagnostics::new()));
    /// assert_eq!(
    ///     orderer.get_order(Some("App"), &assemblies),
    ///     vec!["Lib, Version=1.0", "App, Version=1.0"]
    /// );
    /// ```
    pub fn get_order(&self, entry_point: Option<&str>, user_assemblies: &[AssemblyInfo]) -> Vec<String> {
        let Some(entry_point) = entry_point.map(simple_name).filter(|name| !name.is_empty()) else {
            self.diagnostics
                .info(DiagnosticCategory::Ordering, "No entry point given, skipping ordering");
            return Vec::new();
        };

        let by_name = self.index_by_name(user_assemblies);

        let Some(&entry) = by_name.get(&entry_point.to_lowercase()) else {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticSeverity::Warning,
                    DiagnosticCategory::Ordering,
                    "Entry point is not one of the user assemblies",
                )
                .with_assembly(entry_point),
            );
            return Vec::new();
        };

        let mut order = Vec::new();
        let mut visited: HashSet<usize> = HashSet::from([entry]);
        // (assembly, next reference to look at)
        let mut stack: Vec<(usize, usize)> = vec![(entry, 0)];

        while let Some((current, next_reference)) = stack.last_mut() {
            let current = *current;
            let references = user_assemblies[current].assembly_references();

            if let Some(reference) = references.get(*next_reference) {
                *next_reference += 1;
                if let Some(&child) = by_name.get(&simple_name(reference).to_lowercase()) {
                    if visited.insert(child) {
                        stack.push((child, 0));
                    }
                }
            } else {
                order.push(user_assemblies[current].assembly_identity().to_string());
                stack.pop();
            }
        }

        order
    }

    fn index_by_name(&self, user_assemblies: &[AssemblyInfo]) -> HashMap<String, usize> {
        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(user_assemblies.len());

        for (index, assembly) in user_assemblies.iter().enumerate() {
            let key = assembly.simple_name().to_lowercase();
            if let Some(&first) = by_name.get(&key) {
                self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticSeverity::Warning,
                        DiagnosticCategory::Ordering,
                        format!(
                            "Duplicate assembly name, keeping '{}'",
                            user_assemblies[first].assembly_identity()
                        ),
                    )
                    .with_assembly(assembly.assembly_identity()),
                );
                continue;
            }
            by_name.insert(key, index);
        }

        by_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orderer() -> (DependencyOrderer, Arc<Diagnostics>) {
        let diagnostics = Arc::new(Diagnostics::new());
        (DependencyOrderer::new(Arc::clone(&diagnostics)), diagnostics)
    }

    fn assembly(name: &str, references: &[&str]) -> AssemblyInfo {
        AssemblyInfo::new(format!("{name}, Version=1.0")).with_references(references.iter().copied())
    }

    #[test]
    fn test_post_order() {
        let (orderer, diagnostics) = orderer();
        let assemblies = [
            assembly("App", &["Core, Version=1.0", "Ui, Version=1.0"]),
            assembly("Ui", &["Core, Version=1.0"]),
            assembly("Core", &[]),
            assembly("Unused", &[]),
        ];

        assert_eq!(
            orderer.get_order(Some("App"), &assemblies),
            vec!["Core, Version=1.0", "Ui, Version=1.0", "App, Version=1.0"]
        );
        assert!(!diagnostics.has_any());
    }

    #[test]
    fn test_cycle_is_tolerated() {
        let (orderer, _) = orderer();
        let assemblies = [
            assembly("A", &["B"]),
            assembly("B", &["C"]),
            assembly("C", &["A"]),
        ];

        assert_eq!(
            orderer.get_order(Some("a"), &assemblies),
            vec!["C, Version=1.0", "B, Version=1.0", "A, Version=1.0"]
        );
    }

    #[test]
    fn test_unresolvable_reference_is_dropped_silently() {
        let (orderer, diagnostics) = orderer();
        let assemblies = [assembly("App", &["Missing, Version=9.0", "System.Runtime"])];

        assert_eq!(
            orderer.get_order(Some("App, Version=1.0"), &assemblies),
            vec!["App, Version=1.0"]
        );
        assert!(!diagnostics.has_any());
    }

    #[test]
    fn test_missing_entry_point() {
        let (orderer, diagnostics) = orderer();
        let assemblies = [assembly("App", &[])];

        assert!(orderer.get_order(Some("Other"), &assemblies).is_empty());
        assert_eq!(diagnostics.warning_count(), 1);
        assert_eq!(
            diagnostics.warnings()[0].assembly.as_deref(),
            Some("Other")
        );

        assert!(orderer.get_order(None, &assemblies).is_empty());
        assert_eq!(diagnostics.info_count(), 1);
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let (orderer, diagnostics) = orderer();
        let assemblies = [
            assembly("App", &["Lib"]),
            AssemblyInfo::new("Lib, Version=1.0"),
            AssemblyInfo::new("Lib, Version=2.0"),
        ];

        assert_eq!(
            orderer.get_order(Some("App"), &assemblies),
            vec!["Lib, Version=1.0", "App, Version=1.0"]
        );
        assert_eq!(diagnostics.by_category(DiagnosticCategory::Ordering).len(), 1);
        assert!(diagnostics.has_warnings());
    }
}
