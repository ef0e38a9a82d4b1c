//! Rule-table driven partial updates.
//!
//! # Responsibility
//! - Apply optional patch fields to a record one rule at a time.
//! - Report which fields were applied and which were rejected.
//!
//! # Invariants
//! - An absent field never touches the target.
//! - A present field failing its validator leaves the target unchanged and
//!   is reported as rejected, never as an error.

/// Result of applying one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The patch did not carry this field.
    Absent,
    Applied,
    /// The patch carried a value that failed validation.
    Rejected,
}

/// One entry of a merge rule table.
///
/// `apply` reads its field from the patch `P`, validates it (optionally
/// against context `C`) and writes it into the target `T` on success.
pub struct FieldRule<P, T, C: ?Sized> {
    pub field: &'static str,
    pub apply: fn(&P, &mut T, &C) -> FieldOutcome,
}

/// Fields touched by one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub applied: Vec<&'static str>,
    pub rejected: Vec<&'static str>,
}

impl MergeReport {
    /// Folds `other` into this report.
    pub fn extend(&mut self, other: MergeReport) {
        self.applied.extend(other.applied);
        self.rejected.extend(other.rejected);
    }
}

/// Applies every rule of `rules` in order.
pub fn apply_rules<P, T, C: ?Sized>(
    rules: &[FieldRule<P, T, C>],
    patch: &P,
    target: &mut T,
    context: &C,
) -> MergeReport {
    let mut report = MergeReport::default();
    for rule in rules {
        match (rule.apply)(patch, target, context) {
            FieldOutcome::Absent => {}
            FieldOutcome::Applied => report.applied.push(rule.field),
            FieldOutcome::Rejected => report.rejected.push(rule.field),
        }
    }
    report
}

/// Writes `value` into `slot` when present and `accepted`.
pub fn replace_if(value: Option<&str>, accepted: bool, slot: &mut String) -> FieldOutcome {
    match value {
        None => FieldOutcome::Absent,
        Some(_) if !accepted => FieldOutcome::Rejected,
        Some(value) => {
            value.clone_into(slot);
            FieldOutcome::Applied
        }
    }
}

/// Same as `replace_if` for optional target fields.
pub fn replace_optional_if(
    value: Option<&str>,
    accepted: bool,
    slot: &mut Option<String>,
) -> FieldOutcome {
    match value {
        None => FieldOutcome::Absent,
        Some(_) if !accepted => FieldOutcome::Rejected,
        Some(value) => {
            *slot = Some(value.to_string());
            FieldOutcome::Applied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_rules, replace_if, FieldOutcome, FieldRule, MergeReport};

    #[derive(Default)]
    struct Patch {
        title: Option<String>,
        code: Option<String>,
    }

    #[derive(Debug, PartialEq)]
    struct Target {
        title: String,
        code: String,
    }

    fn merge_title(patch: &Patch, target: &mut Target, _: &()) -> FieldOutcome {
        let value = patch.title.as_deref();
        replace_if(value, value.is_some_and(|v| !v.is_empty()), &mut target.title)
    }

    fn merge_code(patch: &Patch, target: &mut Target, _: &()) -> FieldOutcome {
        let value = patch.code.as_deref();
        replace_if(value, value.is_some_and(|v| v.len() == 3), &mut target.code)
    }

    const RULES: &[FieldRule<Patch, Target, ()>] = &[
        FieldRule {
            field: "title",
            apply: merge_title,
        },
        FieldRule {
            field: "code",
            apply: merge_code,
        },
    ];

    fn target() -> Target {
        Target {
            title: "old".to_string(),
            code: "abc".to_string(),
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut t = target();
        let report = apply_rules(RULES, &Patch::default(), &mut t, &());
        assert_eq!(report, MergeReport::default());
        assert_eq!(t, target());
    }

    #[test]
    fn valid_fields_apply_and_invalid_fields_are_reported() {
        let mut t = target();
        let patch = Patch {
            title: Some("new".to_string()),
            code: Some("toolong".to_string()),
        };

        let report = apply_rules(RULES, &patch, &mut t, &());

        assert_eq!(report.applied, vec!["title"]);
        assert_eq!(report.rejected, vec!["code"]);
        assert_eq!(t.title, "new");
        assert_eq!(t.code, "abc");
    }
}
