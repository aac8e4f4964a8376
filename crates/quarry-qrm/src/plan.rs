//! Scan-plan derivation.
//!
//! A scan plan is a pure function of (destination shape, result column
//! list): per group, the result-column index of every matched field,
//! the key slots, and the child groups. Columns matched by no group
//! are silently ignored; a group matching no columns is unselected and
//! therefore absent in every row.

use crate::shape::{FieldNode, FieldShape, RecordShape, Strategy};

#[derive(Debug, Clone)]
pub(crate) enum SlotPlan {
    Scalar {
        col: Option<usize>,
        primary_key: bool,
    },
    ScalarList {
        col: Option<usize>,
    },
    Child {
        plan: GroupPlan,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct GroupPlan {
    /// How this group attaches to its parent
    pub(crate) strategy: Strategy,
    /// One entry per shape field, in declaration order
    pub(crate) slots: Vec<SlotPlan>,
    /// Result columns owned by this group and its embedded children;
    /// drives the all-NULL absence check
    pub(crate) selected: Vec<usize>,
    /// Whether any primary-key column was matched (here or embedded)
    pub(crate) has_keys: bool,
}

/// Strip identifier quoting and lowercase for matching.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '`'))
        .collect::<String>()
        .to_ascii_lowercase()
}

/// The table name a group matches its columns under: the shape's
/// conventional table unless a group alias renames it. The `X.*` form
/// is accepted alongside the bare form.
fn effective_table(shape_table: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) => normalize(alias.strip_suffix(".*").unwrap_or(alias)),
        None => normalize(shape_table),
    }
}

/// Match one scalar field against the result columns: an alias with a
/// dot is exact; otherwise `table.name` first, then the bare name.
fn match_column(columns: &[String], table: &str, field: &FieldShape) -> Option<usize> {
    if let Some(alias) = field.alias {
        let alias = normalize(alias);
        if alias.contains('.') {
            return columns.iter().position(|c| *c == alias);
        }
        let qualified = format!("{table}.{alias}");
        return columns
            .iter()
            .position(|c| *c == qualified)
            .or_else(|| columns.iter().position(|c| *c == alias));
    }

    let name = normalize(field.name);
    let qualified = format!("{table}.{name}");
    columns
        .iter()
        .position(|c| *c == qualified)
        .or_else(|| columns.iter().position(|c| *c == name))
}

/// Derive the scan plan for a destination shape over a column list.
pub(crate) fn build_plan(shape: &RecordShape, columns: &[String]) -> GroupPlan {
    let normalized: Vec<String> = columns.iter().map(|c| normalize(c)).collect();
    build_group(shape, None, Strategy::One, &normalized)
}

fn build_group(
    shape: &RecordShape,
    alias: Option<&str>,
    strategy: Strategy,
    columns: &[String],
) -> GroupPlan {
    let table = effective_table(shape.table, alias);
    let mut slots = Vec::with_capacity(shape.fields.len());
    let mut selected = Vec::new();
    let mut has_keys = false;

    for field in &shape.fields {
        match &field.node {
            FieldNode::Scalar => {
                let col = match_column(columns, &table, field);
                if let Some(col) = col {
                    selected.push(col);
                    if field.primary_key {
                        has_keys = true;
                    }
                }
                slots.push(SlotPlan::Scalar {
                    col,
                    primary_key: field.primary_key,
                });
            }
            FieldNode::ScalarList => {
                // collection columns do not contribute to presence/keys
                let col = match_column(columns, &table, field);
                slots.push(SlotPlan::ScalarList { col });
            }
            FieldNode::Record {
                strategy: child_strategy,
                shape: child_shape,
            } => {
                let plan =
                    build_group(&child_shape(), field.alias, *child_strategy, columns);
                if *child_strategy == Strategy::Embedded {
                    selected.extend(plan.selected.iter().copied());
                    has_keys = has_keys || plan.has_keys;
                }
                slots.push(SlotPlan::Child { plan });
            }
        }
    }

    GroupPlan {
        strategy,
        slots,
        selected,
        has_keys,
    }
}
