//! Reminder delivery: picks a message for a category and hands it to the
//! notifier. Shared between the polling task and the menu's "Tests" entries.

use crate::features::reminders::messages::MessagePool;
use crate::features::reminders::notifier::Notifier;
use crate::features::reminders::schedule::ScheduleTable;
use chrono::{Local, NaiveTime};
use log::{debug, info};
use std::sync::Arc;

pub struct ReminderService {
    schedule: ScheduleTable,
    pool: MessagePool,
    notifier: Arc<dyn Notifier>,
}

impl ReminderService {
    pub fn new(schedule: ScheduleTable, pool: MessagePool, notifier: Arc<dyn Notifier>) -> Self {
        ReminderService {
            schedule,
            pool,
            notifier,
        }
    }

    pub fn schedule(&self) -> &ScheduleTable {
        &self.schedule
    }

    pub fn pool(&self) -> &MessagePool {
        &self.pool
    }

    /// Show a random message for `category` stamped with the current time.
    pub fn notify(&self, category: &str) -> bool {
        self.notify_at(category, Local::now().time())
    }

    /// Returns false when the category has no messages.
    pub fn notify_at(&self, category: &str, at: NaiveTime) -> bool {
        let mut rng = rand::rng();
        let Some(message) = self.pool.pick(category, &mut rng) else {
            debug!("No messages for category '{category}', skipping notification");
            return false;
        };

        info!("🔔 {category} reminder: {}", message.message);
        self.notifier
            .show(&message.message, &format_attribution(&message.kind, at));
        true
    }
}

/// `"<type> | 3:45 PM"`
pub fn format_attribution(kind: &str, at: NaiveTime) -> String {
    format!("{} | {}", kind, at.format("%-I:%M %p"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::features::reminders::messages::ReminderMessage;
    use std::sync::Mutex;

    /// Notifier that records every call
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub shown: Mutex<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn show(&self, body: &str, attribution: &str) {
            self.shown
                .lock()
                .unwrap()
                .push((body.to_string(), attribution.to_string()));
        }
    }

    pub(crate) fn service_with(
        messages: &[(&str, &str, &str)],
    ) -> (ReminderService, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let pool = MessagePool::from_messages(
            messages
                .iter()
                .map(|(text, kind, category)| ReminderMessage {
                    message: text.to_string(),
                    kind: kind.to_string(),
                    category: category.to_string(),
                })
                .collect(),
        );
        let service = ReminderService::new(ScheduleTable::default(), pool, notifier.clone());
        (service, notifier)
    }

    #[test]
    fn test_format_attribution_twelve_hour_clock() {
        let at = NaiveTime::from_hms_opt(15, 45, 0).unwrap();
        assert_eq!(format_attribution("Reminder", at), "Reminder | 3:45 PM");

        let morning = NaiveTime::from_hms_opt(0, 5, 0).unwrap();
        assert_eq!(format_attribution("Bedtime", morning), "Bedtime | 12:05 AM");
    }

    #[test]
    fn test_notify_shows_message_with_attribution() {
        let (service, notifier) = service_with(&[("Drink water!", "Reminder", "Hydration")]);
        let at = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

        assert!(service.notify_at("Hydration", at));

        let shown = notifier.shown.lock().unwrap();
        assert_eq!(
            shown.as_slice(),
            &[("Drink water!".to_string(), "Reminder | 10:00 AM".to_string())]
        );
    }

    #[test]
    fn test_notify_without_messages_is_noop() {
        let (service, notifier) = service_with(&[("Drink water!", "Reminder", "Hydration")]);

        assert!(!service.notify("Sleep"));
        assert!(notifier.shown.lock().unwrap().is_empty());
    }

    #[test]
    fn test_notify_from_two_threads() {
        let (service, notifier) = service_with(&[("Stretch", "Tip", "Workout")]);
        let service = Arc::new(service);

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let service = service.clone();
                std::thread::spawn(move || service.notify("Workout"))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }

        assert_eq!(notifier.shown.lock().unwrap().len(), 2);
    }
}
