//! Fixture notifications shown to the demo accounts.

use chrono::{DateTime, Duration, Utc};

use crate::entities::{Notification, NotificationKind, NotificationPriority};

struct SeedEntry {
    id: &'static str,
    title: &'static str,
    message: &'static str,
    kind: NotificationKind,
    age: Duration,
    read: bool,
    recipient_id: &'static str,
    priority: NotificationPriority,
    action_url: Option<&'static str>,
}

/// The fixture, with timestamps measured back from `now`.
pub fn seed_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let entries = [
        SeedEntry {
            id: "1",
            title: "Nouveau paiement reçu",
            message: "Paiement de 450€ reçu pour Marie Dubois",
            kind: NotificationKind::Success,
            age: Duration::minutes(30),
            read: false,
            recipient_id: "1",
            priority: NotificationPriority::Medium,
            action_url: Some("/payments"),
        },
        SeedEntry {
            id: "2",
            title: "Inscription en attente",
            message: "Nouvelle demande d'inscription de Thomas Leroy",
            kind: NotificationKind::Info,
            age: Duration::hours(2),
            read: false,
            recipient_id: "1",
            priority: NotificationPriority::High,
            action_url: Some("/enrollment"),
        },
        SeedEntry {
            id: "3",
            title: "Maintenance bus",
            message: "Le bus de la ligne Sud sera en maintenance demain",
            kind: NotificationKind::Warning,
            age: Duration::hours(4),
            read: true,
            recipient_id: "1",
            priority: NotificationPriority::Medium,
            action_url: Some("/transport"),
        },
        SeedEntry {
            id: "4",
            title: "Réunion parents-professeurs",
            message: "Réunion prévue le 25 janvier à 18h00",
            kind: NotificationKind::Info,
            age: Duration::days(1),
            read: false,
            recipient_id: "2",
            priority: NotificationPriority::Low,
            action_url: None,
        },
        SeedEntry {
            id: "5",
            title: "Notes disponibles",
            message: "Les notes du contrôle de mathématiques sont disponibles",
            kind: NotificationKind::Info,
            age: Duration::hours(6),
            read: false,
            recipient_id: "3",
            priority: NotificationPriority::Medium,
            action_url: None,
        },
    ];

    entries
        .into_iter()
        .map(|entry| Notification {
            id: entry.id.to_string(),
            title: entry.title.to_string(),
            message: entry.message.to_string(),
            kind: entry.kind,
            priority: entry.priority,
            timestamp: now - entry.age,
            read: entry.read,
            recipient_id: entry.recipient_id.to_string(),
            action_url: entry.action_url.map(str::to_string),
        })
        .collect()
}
