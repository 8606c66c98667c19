use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use tracing::debug;

use crate::repository::{
    entities::{
        Company, CreditRecord, Internship, LogbookEntry, Mentor, Notification, Student,
    },
    store::{Error, Record, Result, Store},
};

/// Insert the demo data set into every collection that doesn't exist yet. Returns how many
/// collections were seeded.
pub(crate) fn seed(store: &mut Store) -> Result<usize> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let seeded = [
        seed_collection::<Company>(store, companies())?,
        seed_collection::<Internship>(store, internships())?,
        seed_collection::<Student>(store, students())?,
        seed_collection::<Mentor>(store, mentors())?,
        seed_collection::<LogbookEntry>(store, logbook())?,
        seed_collection::<CreditRecord>(store, credits())?,
        seed_collection::<Notification>(store, notifications(&now))?,
    ];

    Ok(seeded.into_iter().filter(|s| *s).count())
}

fn seed_collection<T: Record>(store: &mut Store, data: Value) -> Result<bool> {
    let collection = T::COLLECTION;
    if store.contains(collection) {
        return Ok(false);
    }

    let records: Vec<T> =
        serde_json::from_value(data).map_err(|source| Error::Encode { collection, source })?;
    store.save(&records)?;

    debug!("Seeded {collection} with {} records", records.len());

    Ok(true)
}

fn companies() -> Value {
    json!([
        { "id": "comp-1", "name": "TechCorp Solutions" },
        { "id": "comp-2", "name": "Analytics Pro" },
        { "id": "comp-3", "name": "Rural Connect NGO" }
    ])
}

fn internships() -> Value {
    json!([
        { "id": "int-1", "title": "Full Stack Development Internship", "companyId": "comp-1", "startDate": "2024-01-10", "endDate": "2024-04-10" },
        { "id": "int-2", "title": "Data Science Internship", "companyId": "comp-2", "startDate": "2024-01-05", "endDate": "2024-05-05" },
        { "id": "int-3", "title": "Digital Marketing Internship", "companyId": "comp-3", "startDate": "2024-02-01", "endDate": "2024-03-31" }
    ])
}

fn students() -> Value {
    json!([
        { "id": "stu-1", "name": "Priya Sharma", "batch": "2023", "department": "CSE", "internshipId": "int-1", "mentorId": "men-1", "progress": 65, "lastLogDate": "2024-01-15", "mentorshipStatus": "In-Progress" },
        { "id": "stu-2", "name": "Rahul Patel", "batch": "2022", "department": "IT", "internshipId": "int-2", "mentorId": "men-2", "progress": 80, "lastLogDate": "2024-01-14", "mentorshipStatus": "Assigned" },
        { "id": "stu-3", "name": "Sneha Kumar", "batch": "2024", "department": "ECE", "internshipId": "int-3", "mentorId": null, "progress": 40, "lastLogDate": "2024-01-13", "mentorshipStatus": "Unassigned" },
        { "id": "stu-4", "name": "Aman Verma", "batch": "2023", "department": "ME", "internshipId": "int-3", "mentorId": null, "progress": 30, "lastLogDate": "2024-01-12", "mentorshipStatus": "Unassigned" },
        { "id": "stu-5", "name": "Neha Singh", "batch": "2022", "department": "CSE", "internshipId": "int-1", "mentorId": "men-1", "progress": 55, "lastLogDate": "2024-01-13", "mentorshipStatus": "Assigned" }
    ])
}

fn mentors() -> Value {
    json!([
        { "id": "men-1", "name": "Prof. Sharma", "department": "CSE", "capacityLeft": 2 },
        { "id": "men-2", "name": "Prof. Iyer", "department": "IT", "capacityLeft": 1 },
        { "id": "men-3", "name": "Prof. Rao", "department": "ECE", "capacityLeft": 3 }
    ])
}

fn logbook() -> Value {
    json!([
        {
            "id": "1",
            "studentId": "stu-1",
            "studentName": "Priya Sharma",
            "date": "2024-01-15",
            "company": "TechCorp Solutions",
            "hours": 8,
            "description": "Worked on frontend components for the user dashboard. Implemented responsive design using React and Tailwind CSS.",
            "skills": ["React", "CSS", "JavaScript"],
            "status": "pending",
            "createdAt": "2024-01-15T10:00:00Z"
        }
    ])
}

fn credits() -> Value {
    json!([
        { "id": "cred-1", "studentId": "stu-2", "internshipId": "int-2", "credits": 6, "approvedBy": "Prof. Iyer", "date": "2024-01-14" }
    ])
}

fn notifications(now: &str) -> Value {
    json!([
        { "id": "noti-1", "type": "logbook", "message": "New logbook submitted by Priya Sharma", "read": false, "createdAt": now }
    ])
}
