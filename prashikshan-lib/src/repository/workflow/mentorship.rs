use tracing::{debug, info};

use crate::{
    Error, Result,
    repository::{
        entities::{Mentor, MentorshipStatus, NotificationKind, Student},
        store::Store,
        workflow::notifications,
    },
};

/// A student bound to a mentor by [`assign`].
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub student: Student,
    pub mentor: Mentor,
}

/// Bind a student to a mentor, consuming one of the mentor's slots.
///
/// Returns `None` without changing anything if the mentor doesn't exist or has no capacity
/// left. Capacity is never given back, reassigning a student does not free the old mentor's
/// slot.
pub(crate) fn assign(
    store: &mut Store,
    student_id: &str,
    mentor_id: &str,
) -> Result<Option<Assignment>> {
    if store.find::<Student>(student_id).is_none() {
        return Err(Error::UnknownStudent(student_id.to_string()));
    }

    let mut mentors = store.collection::<Mentor>();
    let Some(mentor) = mentors.iter_mut().find(|m| m.id == mentor_id) else {
        info!("Cannot assign unknown mentor {mentor_id}");
        return Ok(None);
    };
    if !mentor.take_slot() {
        info!("Mentor {} has no capacity left", mentor.name);
        return Ok(None);
    }
    let mentor = mentor.clone();

    store.save(&mentors)?;

    let student = store
        .update::<Student, _>(student_id, |s| {
            s.mentor_id = Some(mentor.id.clone());
            s.mentorship_status = MentorshipStatus::Assigned;
        })?
        .ok_or_else(|| Error::UnknownStudent(student_id.to_string()))?;

    notifications::add(
        store,
        NotificationKind::Mentorship,
        format!("Assigned {} to {}", mentor.name, student.name),
    )?;

    debug!(
        "Assigned {} to {}, {} slots left",
        mentor.name, student.name, mentor.capacity_left
    );

    Ok(Some(Assignment { student, mentor }))
}

/// Assign the first student without a mentor to `mentor_id`.
pub(crate) fn assign_next(store: &mut Store, mentor_id: &str) -> Result<Option<Assignment>> {
    let Some(student) = store
        .collection::<Student>()
        .into_iter()
        .find(|s| s.mentor_id.is_none())
    else {
        info!("Every student already has a mentor");
        return Ok(None);
    };

    assign(store, &student.id, mentor_id)
}

/// Patch a student's mentorship status directly. No transition rules apply.
pub(crate) fn set_status(
    store: &mut Store,
    student_id: &str,
    status: MentorshipStatus,
) -> Result<Student> {
    let student = store
        .update::<Student, _>(student_id, |s| s.mentorship_status = status)?
        .ok_or_else(|| Error::UnknownStudent(student_id.to_string()))?;

    debug!("Mentorship status of {} is now {status}", student.name);

    Ok(student)
}

/// Total free slots across all mentors
pub(crate) fn slots_available(mentors: &[Mentor]) -> u32 {
    mentors
        .iter()
        .fold(0, |total, m| total.saturating_add(m.capacity_left))
}

#[cfg(test)]
mod test {
    use crate::{
        Error, Repository,
        repository::entities::{Mentor, MentorshipStatus, NotificationKind, Student},
    };

    fn repo() -> Repository {
        let mut repo = Repository::mock();
        repo.add_student(Student::new("stu-3", "Sneha Kumar", "2024", "ECE"))
            .unwrap();
        repo.add_student(Student::new("stu-4", "Aman Verma", "2023", "ME"))
            .unwrap();
        repo.add_mentor(Mentor::new("men-2", "Prof. Iyer", "IT", 1))
            .unwrap();
        repo.add_mentor(Mentor::new("men-3", "Prof. Rao", "ECE", 3))
            .unwrap();
        repo
    }

    #[test]
    fn test_assign() {
        let mut repo = repo();

        let mentor = repo.assign_mentor("stu-3", "men-3").unwrap().unwrap();

        assert_eq!(mentor.capacity_left(), 2);
        assert_eq!(repo.mentor("men-3").unwrap().capacity_left(), 2);

        let student = repo.student("stu-3").unwrap();
        assert_eq!(student.mentor_id(), Some("men-3"));
        assert_eq!(student.mentorship_status(), MentorshipStatus::Assigned);

        let newest = repo.notifications();
        let newest = newest.first().unwrap();
        assert_eq!(newest.kind(), NotificationKind::Mentorship);
        assert_eq!(newest.message(), "Assigned Prof. Rao to Sneha Kumar");
    }

    #[test]
    fn test_assign_without_capacity() {
        let mut repo = repo();

        assert!(repo.assign_mentor("stu-3", "men-2").unwrap().is_some());
        assert!(repo.assign_mentor("stu-4", "men-2").unwrap().is_none());

        assert_eq!(repo.mentor("men-2").unwrap().capacity_left(), 0);
        let student = repo.student("stu-4").unwrap();
        assert_eq!(student.mentor_id(), None);
        assert_eq!(student.mentorship_status(), MentorshipStatus::Unassigned);
    }

    #[test]
    fn test_capacity_never_negative() {
        let mut repo = repo();

        for _ in 0..10 {
            repo.assign_mentor("stu-3", "men-3").unwrap();
            repo.assign_mentor("stu-4", "men-2").unwrap();
        }

        assert!(repo.mentors().iter().all(|m| m.capacity_left() == 0));
    }

    #[test]
    fn test_assign_unknown_mentor() {
        let mut repo = repo();

        assert!(repo.assign_mentor("stu-3", "men-404").unwrap().is_none());
        assert_eq!(repo.student("stu-3").unwrap().mentor_id(), None);
    }

    #[test]
    fn test_assign_unknown_student_keeps_capacity() {
        let mut repo = repo();

        assert!(matches!(
            repo.assign_mentor("stu-404", "men-3"),
            Err(Error::UnknownStudent(_))
        ));
        assert_eq!(repo.mentor("men-3").unwrap().capacity_left(), 3);
    }

    #[test]
    fn test_assign_next() {
        let mut repo = repo();

        let first = repo.assign_next_student("men-3").unwrap().unwrap();
        let second = repo.assign_next_student("men-3").unwrap().unwrap();

        assert_eq!(first.student.id(), "stu-3");
        assert_eq!(second.student.id(), "stu-4");
        assert!(repo.assign_next_student("men-3").unwrap().is_none());
        assert_eq!(repo.mentor("men-3").unwrap().capacity_left(), 1);
    }

    #[test]
    fn test_set_status() {
        let mut repo = repo();

        let student = repo
            .set_mentorship_status("stu-4", MentorshipStatus::Completed)
            .unwrap();

        assert_eq!(student.mentorship_status(), MentorshipStatus::Completed);
        assert!(matches!(
            repo.set_mentorship_status("stu-404", MentorshipStatus::Assigned),
            Err(Error::UnknownStudent(_))
        ));
    }

    #[test]
    fn test_slots_available() {
        let mut repo = repo();
        assert_eq!(repo.mentor_slots_available(), 4);

        repo.assign_mentor("stu-3", "men-3").unwrap();

        assert_eq!(repo.mentor_slots_available(), 3);
    }
}
