use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cache::Record;

/// Field-level patch applicable to a record.
///
/// Derivable with `#[derive(Patch)]` from `sagip_macros`: every `Option`
/// field set to `Some` overwrites the matching record field.
pub trait PatchOf<R> {
    fn apply_to(&self, record: &mut R);
}

/// Records that carry a membership list (ids of related records).
pub trait Memberships {
    fn members(&self) -> &[String];
    fn set_members(&mut self, members: Vec<String>);
}

static NEXT_TEMP: AtomicU64 = AtomicU64::new(0);

/// Mints a process-unique placeholder id for an optimistically created
/// record. The server's canonical id replaces it at merge time.
pub fn temp_id() -> String {
    let n = NEXT_TEMP.fetch_add(1, Ordering::Relaxed) + 1;
    format!("tmp-{}", n)
}

/// Whether an id is a placeholder from [`temp_id`].
pub fn is_temp_id(id: &str) -> bool {
    id.starts_with("tmp-")
}

/// Which mutation policy a [`Plan`] packages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanKind {
    Create,
    Update,
    Delete,
    Link,
    Unlink,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Create => "create",
            PlanKind::Update => "update",
            PlanKind::Delete => "delete",
            PlanKind::Link => "link",
            PlanKind::Unlink => "unlink",
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the server reported back for a mutation.
#[derive(Debug, Clone)]
pub enum Outcome<R> {
    /// The canonical record (created or updated).
    Record(R),
    /// The record no longer exists.
    Deleted,
    /// The canonical membership list for the target record.
    Members(Vec<String>),
}

type OptimisticFn<R> = Box<dyn FnOnce(Vec<R>) -> Vec<R> + Send>;
type MergeFn<R> = Box<dyn FnOnce(Vec<R>, Outcome<R>) -> Vec<R> + Send>;

/// A packaged mutation against the collection of `R`: one closure producing
/// the optimistic state and one folding the server's [`Outcome`] into
/// whatever the collection holds once the remote operation settles.
///
/// The merge step runs against the collection as it is at merge time, not
/// the optimistic snapshot, so records the server touched are replaced
/// while everything else stays put.
pub struct Plan<R> {
    kind: PlanKind,
    target_id: String,
    optimistic: OptimisticFn<R>,
    merge: MergeFn<R>,
}

impl<R> Plan<R> {
    pub fn kind(&self) -> PlanKind {
        self.kind
    }

    /// The id the plan targets; for creates, the placeholder id.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub(crate) fn into_parts(self) -> (OptimisticFn<R>, MergeFn<R>) {
        (self.optimistic, self.merge)
    }
}

fn upsert<R: Record>(mut records: Vec<R>, canonical: R) -> Vec<R> {
    match records.iter().position(|r| r.id() == canonical.id()) {
        Some(index) => records[index] = canonical,
        None => records.push(canonical),
    }
    records
}

impl<R: Record + 'static> Plan<R> {
    /// Create: prepend the placeholder record now; at merge time swap it
    /// for the server's canonical record in place.
    pub fn create(temp: R) -> Self {
        let target_id = temp.id().to_string();
        let placeholder = target_id.clone();
        Plan {
            kind: PlanKind::Create,
            target_id,
            optimistic: Box::new(move |mut records| {
                records.insert(0, temp);
                records
            }),
            merge: Box::new(move |mut records, outcome| match outcome {
                Outcome::Record(canonical) => {
                    // a refetch may already hold the canonical record
                    records.retain(|r| r.id() != canonical.id());
                    match records.iter().position(|r| r.id() == placeholder) {
                        Some(index) => records[index] = canonical,
                        None => records.push(canonical),
                    }
                    records
                }
                _ => records,
            }),
        }
    }

    /// Update: apply the patch to the matching record now; at merge time
    /// replace it with the server's canonical record.
    pub fn update<P>(id: impl Into<String>, patch: P) -> Self
    where
        P: PatchOf<R> + Send + 'static,
    {
        let id = id.into();
        let optimistic_id = id.clone();
        let merge_id = id.clone();
        Plan {
            kind: PlanKind::Update,
            target_id: id,
            optimistic: Box::new(move |mut records| {
                if let Some(record) = records.iter_mut().find(|r| r.id() == optimistic_id) {
                    patch.apply_to(record);
                }
                records
            }),
            merge: Box::new(move |mut records, outcome| match outcome {
                Outcome::Record(canonical) => upsert(records, canonical),
                Outcome::Deleted => {
                    records.retain(|r| r.id() != merge_id);
                    records
                }
                _ => records,
            }),
        }
    }

    /// Delete: remove the record now; if the server reports it still exists,
    /// the canonical record comes back at merge time.
    pub fn delete(id: impl Into<String>) -> Self {
        let id = id.into();
        let optimistic_id = id.clone();
        Plan {
            kind: PlanKind::Delete,
            target_id: id,
            optimistic: Box::new(move |mut records| {
                records.retain(|r| r.id() != optimistic_id);
                records
            }),
            merge: Box::new(|records, outcome| match outcome {
                Outcome::Record(canonical) => upsert(records, canonical),
                _ => records,
            }),
        }
    }
}

impl<R: Record + Memberships + 'static> Plan<R> {
    /// Link: add `member` to the record's membership list now; at merge time
    /// take the server's canonical list. Linking an already-present member
    /// changes nothing.
    pub fn link(id: impl Into<String>, member: impl Into<String>) -> Self {
        let id = id.into();
        let member = member.into();
        let optimistic_id = id.clone();
        let merge_id = id.clone();
        Plan {
            kind: PlanKind::Link,
            target_id: id,
            optimistic: Box::new(move |mut records| {
                if let Some(record) = records.iter_mut().find(|r| r.id() == optimistic_id) {
                    if !record.members().contains(&member) {
                        let mut members = record.members().to_vec();
                        members.push(member);
                        record.set_members(members);
                    }
                }
                records
            }),
            merge: Box::new(move |records, outcome| merge_members(records, outcome, merge_id)),
        }
    }

    /// Unlink: remove `member` from the record's membership list now; at
    /// merge time take the server's canonical list.
    pub fn unlink(id: impl Into<String>, member: impl Into<String>) -> Self {
        let id = id.into();
        let member = member.into();
        let optimistic_id = id.clone();
        let merge_id = id.clone();
        Plan {
            kind: PlanKind::Unlink,
            target_id: id,
            optimistic: Box::new(move |mut records| {
                if let Some(record) = records.iter_mut().find(|r| r.id() == optimistic_id) {
                    let mut members = record.members().to_vec();
                    members.retain(|m| m != &member);
                    record.set_members(members);
                }
                records
            }),
            merge: Box::new(move |records, outcome| merge_members(records, outcome, merge_id)),
        }
    }
}

fn merge_members<R: Record + Memberships>(
    mut records: Vec<R>,
    outcome: Outcome<R>,
    target_id: String,
) -> Vec<R> {
    match outcome {
        Outcome::Members(canonical) => {
            if let Some(record) = records.iter_mut().find(|r| r.id() == target_id) {
                record.set_members(canonical);
            }
            records
        }
        Outcome::Record(canonical) => upsert(records, canonical),
        _ => records,
    }
}
