use tracing::{debug, warn};

use crate::{
    Error, Result,
    repository::{
        config::CoreConfig,
        entities::{LogStatus, LogbookEntry, NewLogbookEntry, NotificationKind, Student},
        store::Store,
        workflow::notifications,
    },
};

pub(crate) fn submit(store: &mut Store, new: NewLogbookEntry) -> Result<LogbookEntry> {
    let entry = store.append(LogbookEntry::from(new))?;

    notifications::add(
        store,
        NotificationKind::Logbook,
        format!("New logbook submitted by {}", entry.student_name),
    )?;

    debug!("Submitted logbook entry {} for {}", entry.id, entry.student_name);

    Ok(entry)
}

/// Approve a pending entry, advancing the owning student's progress.
///
/// Entries that have already been approved or rejected are returned unchanged and no side
/// effects are applied.
pub(crate) fn approve(store: &mut Store, cfg: &CoreConfig, id: &str) -> Result<LogbookEntry> {
    let Some(entry) = transition(store, id, LogStatus::Approved)? else {
        return find(store, id);
    };

    let owner = owner_of(&store.collection::<Student>(), &entry);

    if let Some(owner) = owner {
        store.update::<Student, _>(&owner.id, |s| {
            s.advance(cfg.progress_step);
            s.record_log_date(entry.date);
        })?;
    } else {
        warn!(
            "Approved logbook entry {} has no matching student '{}'",
            entry.id, entry.student_name
        );
    }

    notifications::add(
        store,
        NotificationKind::Approval,
        format!("Approved logbook for {}", entry.student_name),
    )?;

    Ok(entry)
}

/// Reject a pending entry with feedback for the student. Progress is never touched.
pub(crate) fn reject(store: &mut Store, id: &str, feedback: &str) -> Result<LogbookEntry> {
    let Some(entry) = transition(store, id, LogStatus::Rejected)? else {
        return find(store, id);
    };

    notifications::add(
        store,
        NotificationKind::Rejection,
        format!("Requested changes for {}: {feedback}", entry.student_name),
    )?;

    Ok(entry)
}

/// Approve each entry in turn. Not atomic: approvals before a failure stay committed.
pub(crate) fn bulk_approve<S: AsRef<str>>(
    store: &mut Store,
    cfg: &CoreConfig,
    ids: &[S],
) -> Result<Vec<LogbookEntry>> {
    ids.iter()
        .map(|id| approve(store, cfg, id.as_ref()))
        .collect()
}

pub(crate) fn entries_by_student(store: &Store, student_id: &str) -> Vec<LogbookEntry> {
    store
        .collection::<LogbookEntry>()
        .into_iter()
        .filter(|e| e.student_id == student_id)
        .collect()
}

pub(crate) fn pending(store: &Store) -> Vec<LogbookEntry> {
    store
        .collection::<LogbookEntry>()
        .into_iter()
        .filter(LogbookEntry::is_pending)
        .collect()
}

/// Move a pending entry to `status`. Returns `None` if the entry was already decided.
fn transition(store: &mut Store, id: &str, status: LogStatus) -> Result<Option<LogbookEntry>> {
    let entry = find(store, id)?;
    if !entry.is_pending() {
        warn!(
            "Ignoring {status} for logbook entry {id}: already {}",
            entry.status
        );
        return Ok(None);
    }

    let updated = store.update::<LogbookEntry, _>(id, |e| e.status = status)?;

    debug!("Logbook entry {id} is now {status}");

    Ok(updated)
}

/// The student an entry belongs to. An id match wins over a name match.
fn owner_of(students: &[Student], entry: &LogbookEntry) -> Option<Student> {
    students
        .iter()
        .find(|s| s.id == entry.student_id)
        .or_else(|| students.iter().find(|s| s.name == entry.student_name))
        .cloned()
}

fn find(store: &Store, id: &str) -> Result<LogbookEntry> {
    store
        .find::<LogbookEntry>(id)
        .ok_or_else(|| Error::UnknownLogbookEntry(id.to_string()))
}
