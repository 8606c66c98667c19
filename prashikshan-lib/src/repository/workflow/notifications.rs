use tracing::debug;

use crate::repository::{
    entities::{Notification, NotificationKind},
    store::{Result, Store},
};

/// Put a new unread notification at the front of the log.
pub(crate) fn add(
    store: &mut Store,
    kind: NotificationKind,
    message: impl Into<String>,
) -> Result<Notification> {
    let notification = store.prepend(Notification::new(kind, message))?;

    debug!("Added {kind} notification: {}", notification.message);

    Ok(notification)
}

/// Mark a notification as read. Unknown ids and already read notifications are left alone.
pub(crate) fn mark_read(store: &mut Store, id: &str) -> Result<Option<Notification>> {
    match store.find::<Notification>(id) {
        Some(notification) if notification.read => Ok(Some(notification)),
        Some(_) => store.update::<Notification, _>(id, |n| n.read = true),
        None => Ok(None),
    }
}

pub(crate) fn unread_count(store: &Store) -> usize {
    store
        .collection::<Notification>()
        .iter()
        .filter(|n| !n.read)
        .count()
}

#[cfg(test)]
mod test {
    use crate::{
        Repository,
        repository::entities::{Notification, NotificationKind},
    };

    #[test]
    fn test_add_is_newest_first() {
        let mut repo = Repository::mock();

        repo.add_notification(NotificationKind::Logbook, "first")
            .unwrap();
        let newest = repo
            .add_notification(NotificationKind::Credits, "second")
            .unwrap();

        let notifications = repo.notifications();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications.first(), Some(&newest));
        assert!(!newest.read());
    }

    #[test]
    fn test_mark_read() {
        let mut repo = Repository::mock();
        let notification = repo
            .add_notification(NotificationKind::Approval, "Approved logbook for Priya Sharma")
            .unwrap();

        assert_eq!(repo.unread_notifications(), 1);

        let read = repo.mark_notification_read(notification.id()).unwrap();

        assert!(read.is_some_and(|n| n.read()));
        assert_eq!(repo.unread_notifications(), 0);
    }

    #[test]
    fn test_mark_read_unknown_id() {
        let mut repo = Repository::mock();
        repo.add_notification(NotificationKind::Logbook, "New logbook")
            .unwrap();
        let before: Vec<Notification> = repo.notifications();

        assert_eq!(repo.mark_notification_read("noti-missing").unwrap(), None);
        assert_eq!(repo.notifications(), before);
    }
}
