//! The row loop.
//!
//! Walks the result rows top-down through the scan plan, building
//! [`GroupNode`] instances: a group with all selected columns NULL is
//! absent for that row; an equal key reuses the current instance and
//! descends; a new key appends a fresh instance. The mapper never
//! sorts, so output is a deterministic function of row order.

use crate::plan::{GroupPlan, SlotPlan};
use crate::shape::{GroupNode, Slot, Strategy};
use quarry_core::{Result, Row, Value};

/// Map a row stream into top-level group instances.
pub(crate) fn map_rows(plan: &GroupPlan, rows: &[Row]) -> Result<Vec<GroupNode>> {
    let mut out = Vec::new();
    for row in rows {
        append_group(plan, &mut out, row)?;
    }
    Ok(out)
}

// A group is absent when it matched no columns at all, or when every
// selected column (its own and its embedded children's) is NULL.
fn is_absent(plan: &GroupPlan, row: &Row) -> bool {
    if plan.selected.is_empty() {
        return true;
    }
    plan.selected
        .iter()
        .all(|&col| row.get(col).map_or(true, Value::is_null))
}

// The group key: primary-key column values when any were matched
// (including embedded children), otherwise every non-NULL scalar.
fn group_key(plan: &GroupPlan, row: &Row) -> Vec<Value> {
    let mut key = Vec::new();
    collect_key(plan, row, plan.has_keys, &mut key);
    key
}

fn collect_key(plan: &GroupPlan, row: &Row, use_keys: bool, key: &mut Vec<Value>) {
    for slot in &plan.slots {
        match slot {
            SlotPlan::Scalar {
                col: Some(col),
                primary_key,
            } => {
                let value = row.get(*col).cloned().unwrap_or(Value::Null);
                if use_keys {
                    if *primary_key {
                        key.push(value);
                    }
                } else if !value.is_null() {
                    key.push(value);
                }
            }
            SlotPlan::Child { plan: child } if child.strategy == Strategy::Embedded => {
                collect_key(child, row, use_keys, key);
            }
            _ => {}
        }
    }
}

fn new_node(plan: &GroupPlan, row: &Row) -> GroupNode {
    let slots = plan
        .slots
        .iter()
        .map(|slot| match slot {
            SlotPlan::Scalar { col, .. } => {
                Slot::Scalar(col.and_then(|c| row.get(c).cloned()))
            }
            SlotPlan::ScalarList { .. } => Slot::ScalarList(Vec::new()),
            SlotPlan::Child { plan: child } => match child.strategy {
                Strategy::List => Slot::ChildList(Vec::new()),
                _ => Slot::Child(None),
            },
        })
        .collect();
    GroupNode::new(slots)
}

fn append_group(plan: &GroupPlan, out: &mut Vec<GroupNode>, row: &Row) -> Result<()> {
    if is_absent(plan, row) {
        return Ok(());
    }
    let key = group_key(plan, row);
    let reuse = out.last().is_some_and(|node| node.key == key);
    if !reuse {
        let mut node = new_node(plan, row);
        node.key = key;
        out.push(node);
    }
    let node = out.last_mut().expect("group just ensured");
    advance(plan, node, row)
}

// Advance an instance with one row: collection fields append, child
// groups descend.
fn advance(plan: &GroupPlan, node: &mut GroupNode, row: &Row) -> Result<()> {
    for (index, slot_plan) in plan.slots.iter().enumerate() {
        match (slot_plan, &mut node.slots[index]) {
            (SlotPlan::ScalarList { col: Some(col) }, Slot::ScalarList(values)) => {
                if let Some(value) = row.get(*col) {
                    values.push(value.clone());
                }
            }
            (SlotPlan::Child { plan: child }, Slot::ChildList(children)) => {
                append_group(child, children, row)?;
            }
            (SlotPlan::Child { plan: child }, Slot::Child(slot)) => {
                if is_absent(child, row) {
                    continue;
                }
                let key = group_key(child, row);
                match slot {
                    Some(existing) if existing.key == key => {
                        advance(child, existing, row)?;
                    }
                    // singleton fields keep their first instance
                    Some(_) => {}
                    None => {
                        let mut fresh = new_node(child, row);
                        fresh.key = key;
                        advance(child, &mut fresh, row)?;
                        *slot = Some(Box::new(fresh));
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}
