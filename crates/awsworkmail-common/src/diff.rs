//! Diff results and the builder shared by every resource
//!
//! No resource supports in-place update on the remote side, so the diff
//! policy only decides which changed properties force a replacement and
//! which are reported as plain changes.

use serde::Serialize;
use std::collections::BTreeMap;

/// Kind of change detected for one property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffKind {
    Add,
    AddReplace,
    Update,
    UpdateReplace,
    Delete,
    DeleteReplace,
}

impl DiffKind {
    /// Whether this change forces delete-then-recreate
    pub fn is_replace(self) -> bool {
        matches!(
            self,
            DiffKind::AddReplace | DiffKind::UpdateReplace | DiffKind::DeleteReplace
        )
    }

    fn from_options(had_old: bool, has_new: bool, replace: bool) -> Self {
        match (had_old, has_new, replace) {
            (false, true, false) => DiffKind::Add,
            (false, true, true) => DiffKind::AddReplace,
            (true, false, false) => DiffKind::Delete,
            (true, false, true) => DiffKind::DeleteReplace,
            (_, _, false) => DiffKind::Update,
            (_, _, true) => DiffKind::UpdateReplace,
        }
    }
}

/// Change recorded for a single property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDiff {
    pub kind: DiffKind,
    /// The change was computed against inputs rather than outputs
    pub input_diff: bool,
}

/// Result of comparing old state against new inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResponse {
    pub has_changes: bool,
    pub detailed_diff: BTreeMap<String, PropertyDiff>,
    /// Property paths whose change forces replacement
    pub replaces: Vec<String>,
    pub delete_before_replace: bool,
}

impl DiffResponse {
    /// Whether any recorded change forces replacement
    pub fn requires_replacement(&self) -> bool {
        !self.replaces.is_empty()
    }

    /// Look up the change recorded for a property path
    pub fn property(&self, path: &str) -> Option<&PropertyDiff> {
        self.detailed_diff.get(path)
    }
}

/// Accumulates property changes for one resource.
///
/// Replacements are always delete-before-replace: organization aliases,
/// user names and domain registrations are unique on the remote side, so a
/// new instance cannot be created while the old one still exists.
#[derive(Debug, Default)]
pub struct DiffBuilder {
    diffs: BTreeMap<String, PropertyDiff>,
}

impl DiffBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an arbitrary change for a property path
    pub fn record(&mut self, path: impl Into<String>, kind: DiffKind) -> &mut Self {
        self.diffs.insert(
            path.into(),
            PropertyDiff {
                kind,
                input_diff: true,
            },
        );
        self
    }

    /// Record a replacement when a required value changed
    pub fn replace_if_changed<T: PartialEq + ?Sized>(
        &mut self,
        path: &str,
        old: &T,
        new: &T,
    ) -> &mut Self {
        if old != new {
            self.record(path, DiffKind::UpdateReplace);
        }
        self
    }

    /// Record a soft change when a required value changed
    pub fn update_if_changed<T: PartialEq + ?Sized>(
        &mut self,
        path: &str,
        old: &T,
        new: &T,
    ) -> &mut Self {
        if old != new {
            self.record(path, DiffKind::Update);
        }
        self
    }

    /// Record a replacement when an optional value was added, removed or changed
    pub fn replace_if_changed_opt<T: PartialEq + ?Sized>(
        &mut self,
        path: &str,
        old: Option<&T>,
        new: Option<&T>,
    ) -> &mut Self {
        if old != new {
            self.record(path, DiffKind::from_options(old.is_some(), new.is_some(), true));
        }
        self
    }

    /// Record a soft change when an optional value was added, removed or changed
    pub fn update_if_changed_opt<T: PartialEq + ?Sized>(
        &mut self,
        path: &str,
        old: Option<&T>,
        new: Option<&T>,
    ) -> &mut Self {
        if old != new {
            self.record(path, DiffKind::from_options(old.is_some(), new.is_some(), false));
        }
        self
    }

    pub fn build(self) -> DiffResponse {
        let replaces: Vec<String> = self
            .diffs
            .iter()
            .filter(|(_, diff)| diff.kind.is_replace())
            .map(|(path, _)| path.clone())
            .collect();

        DiffResponse {
            has_changes: !self.diffs.is_empty(),
            delete_before_replace: !replaces.is_empty(),
            replaces,
            detailed_diff: self.diffs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_has_no_changes() {
        let diff = DiffBuilder::new().build();
        assert!(!diff.has_changes);
        assert!(!diff.requires_replacement());
        assert!(!diff.delete_before_replace);
    }

    #[test]
    fn test_unchanged_values_not_recorded() {
        let mut builder = DiffBuilder::new();
        builder
            .replace_if_changed("alias", "a", "a")
            .update_if_changed("name", "n", "n")
            .replace_if_changed_opt::<str>("token", None, None);
        assert_eq!(builder.build(), DiffResponse::default());
    }

    #[test]
    fn test_soft_update_does_not_replace() {
        let mut builder = DiffBuilder::new();
        builder.update_if_changed("displayName", "Old", "New");
        let diff = builder.build();

        assert!(diff.has_changes);
        assert!(!diff.requires_replacement());
        assert!(!diff.delete_before_replace);
        assert_eq!(diff.property("displayName").unwrap().kind, DiffKind::Update);
    }

    #[test]
    fn test_replacement_sets_delete_before_replace() {
        let mut builder = DiffBuilder::new();
        builder
            .update_if_changed("displayName", "Old", "New")
            .replace_if_changed("region", "eu-west-1", "us-east-1");
        let diff = builder.build();

        assert!(diff.delete_before_replace);
        assert_eq!(diff.replaces, vec!["region".to_string()]);
    }

    #[test]
    fn test_optional_change_kinds() {
        let mut builder = DiffBuilder::new();
        builder
            .replace_if_changed_opt("added", None, Some("x"))
            .replace_if_changed_opt("removed", Some("x"), None)
            .replace_if_changed_opt("changed", Some("x"), Some("y"))
            .update_if_changed_opt("softAdded", None, Some("x"))
            .update_if_changed_opt("softRemoved", Some("x"), None);
        let diff = builder.build();

        assert_eq!(diff.property("added").unwrap().kind, DiffKind::AddReplace);
        assert_eq!(diff.property("removed").unwrap().kind, DiffKind::DeleteReplace);
        assert_eq!(diff.property("changed").unwrap().kind, DiffKind::UpdateReplace);
        assert_eq!(diff.property("softAdded").unwrap().kind, DiffKind::Add);
        assert_eq!(diff.property("softRemoved").unwrap().kind, DiffKind::Delete);
    }

    #[test]
    fn test_serialized_shape() {
        let mut builder = DiffBuilder::new();
        builder.replace_if_changed("alias", "a", "b");
        let json = serde_json::to_value(builder.build()).unwrap();

        assert_eq!(json["hasChanges"], true);
        assert_eq!(json["deleteBeforeReplace"], true);
        assert_eq!(json["detailedDiff"]["alias"]["kind"], "update-replace");
        assert_eq!(json["detailedDiff"]["alias"]["inputDiff"], true);
        assert_eq!(json["replaces"][0], "alias");
    }
}
