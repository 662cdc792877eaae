use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use ecole_auth::{
    AuthService, Directory, MemoryAlerts, MemoryStore, RegisterRequest, Role, SessionStore,
    Severity, DEMO_PASSWORD,
};
use ecole_config::AuthConfig;
use ecole_notifications::{
    spawn_generator, EventSource, ManualClock, NewNotification, NotificationFeed,
    NotificationKind, NotificationPriority, RandomTrickle,
};

struct TestContext {
    auth: Arc<AuthService>,
    feed: Arc<NotificationFeed>,
    clock: Arc<ManualClock>,
    alerts: Arc<MemoryAlerts>,
}

impl TestContext {
    fn new() -> Self {
        let config = AuthConfig {
            login_latency_ms: 0,
            ..AuthConfig::default()
        };
        let alerts = Arc::new(MemoryAlerts::new());
        let auth = Arc::new(AuthService::new(
            &config,
            Directory::seeded(),
            SessionStore::new(Arc::new(MemoryStore::new()), "auth_user"),
            alerts.clone(),
        ));
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap(),
        ));
        let feed = Arc::new(NotificationFeed::new(
            auth.subscribe(),
            clock.clone(),
            alerts.clone(),
        ));

        Self {
            auth,
            feed,
            clock,
            alerts,
        }
    }

    async fn login(&self, email: &str) {
        self.auth
            .login(email, DEMO_PASSWORD)
            .await
            .expect("demo login should succeed");
        self.alerts.take();
    }
}

/// Emits a notification on every poll and counts the polls.
struct CountingSource {
    polls: Arc<AtomicUsize>,
}

impl EventSource for CountingSource {
    fn poll(&mut self) -> Option<NewNotification> {
        let n = self.polls.fetch_add(1, Ordering::SeqCst);
        Some(NewNotification::new(
            format!("event {n}"),
            "tick",
            NotificationKind::Info,
            NotificationPriority::Low,
        ))
    }
}

fn payment_notice() -> NewNotification {
    NewNotification::new(
        "Paiement en retard",
        "Le paiement de mars est en retard",
        NotificationKind::Warning,
        NotificationPriority::Medium,
    )
    .with_action_url("/payments")
}

#[tokio::test]
async fn feed_is_empty_without_session() {
    let ctx = TestContext::new();

    assert!(ctx.feed.list().await.is_empty());
    assert_eq!(ctx.feed.unread_count().await, 0);
    assert!(ctx.feed.add(payment_notice()).await.is_none());
    assert!(ctx.feed.list().await.is_empty());
}

#[tokio::test]
async fn admin_sees_only_own_seed_notifications() {
    let ctx = TestContext::new();
    ctx.login("admin@ecole.fr").await;

    let items = ctx.feed.list().await;
    let ids: Vec<&str> = items.iter().map(|n| n.id.as_str()).collect();

    assert_eq!(ids, ["1", "2", "3"]);
    assert!(items.iter().all(|n| n.recipient_id == "1"));
    assert_eq!(ctx.feed.unread_count().await, 2);
}

#[tokio::test]
async fn feed_follows_session_changes() {
    let ctx = TestContext::new();

    ctx.login("pierre.moreau@ecole.fr").await;
    assert_eq!(ctx.feed.recipient().await.as_deref(), Some("2"));
    assert_eq!(ctx.feed.list().await.len(), 1);

    ctx.login("marie.dubois@parent.fr").await;
    let items = ctx.feed.list().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "5");

    ctx.auth.logout();
    assert!(ctx.feed.list().await.is_empty());
    assert_eq!(ctx.feed.recipient().await, None);
}

#[tokio::test]
async fn registered_identity_starts_with_empty_feed() {
    let ctx = TestContext::new();
    ctx.login("admin@ecole.fr").await;

    ctx.auth
        .register(RegisterRequest {
            name: "Lucas Martin".into(),
            email: "lucas.martin@ecole.fr".into(),
            password: "secret".into(),
            role: Role::Student,
            school_id: "school-1".into(),
            class_id: Some("seconde".into()),
        })
        .await
        .unwrap();

    assert!(ctx.feed.list().await.is_empty());
}

#[tokio::test]
async fn mark_as_read_is_one_way_and_ignores_unknown_ids() {
    let ctx = TestContext::new();
    ctx.login("admin@ecole.fr").await;

    assert!(ctx.feed.mark_as_read("1").await);
    assert_eq!(ctx.feed.unread_count().await, 1);

    assert!(ctx.feed.mark_as_read("1").await);
    assert_eq!(ctx.feed.unread_count().await, 1);

    assert!(!ctx.feed.mark_as_read("does-not-exist").await);
    assert!(!ctx.feed.mark_as_read("4").await, "teacher's notification is not visible");
    assert_eq!(ctx.feed.unread_count().await, 1);
}

#[tokio::test]
async fn mark_all_as_read_is_idempotent() {
    let ctx = TestContext::new();
    ctx.login("admin@ecole.fr").await;

    assert_eq!(ctx.feed.mark_all_as_read().await, 2);
    assert_eq!(ctx.feed.unread_count().await, 0);

    assert_eq!(ctx.feed.mark_all_as_read().await, 0);
    assert_eq!(ctx.feed.unread_count().await, 0);
    assert!(ctx.feed.list().await.iter().all(|n| n.read));
}

#[tokio::test]
async fn delete_twice_is_a_no_op_the_second_time() {
    let ctx = TestContext::new();
    ctx.login("admin@ecole.fr").await;

    assert!(ctx.feed.delete("2").await);
    assert!(!ctx.feed.delete("2").await);

    let ids: Vec<String> = ctx.feed.list().await.into_iter().map(|n| n.id).collect();
    assert_eq!(ids, ["1", "3"]);
    assert_eq!(ctx.feed.unread_count().await, 1);
}

#[tokio::test]
async fn relogin_restores_fixture_state() {
    let ctx = TestContext::new();
    ctx.login("admin@ecole.fr").await;
    ctx.feed.delete("1").await;
    ctx.feed.mark_all_as_read().await;

    ctx.auth.logout();
    ctx.login("admin@ecole.fr").await;

    assert_eq!(ctx.feed.list().await.len(), 3);
    assert_eq!(ctx.feed.unread_count().await, 2);
}

#[tokio::test]
async fn add_prepends_unread_notification_for_current_user() {
    let ctx = TestContext::new();
    ctx.login("emma.rousseau@student.fr").await;
    ctx.clock.advance(chrono::Duration::minutes(5));

    let added = ctx.feed.add(payment_notice()).await.expect("session exists");

    let items = ctx.feed.list().await;
    assert_eq!(items[0], added);
    assert_eq!(added.recipient_id, "4");
    assert!(!added.read);
    assert_eq!(added.timestamp, Utc.with_ymd_and_hms(2025, 1, 20, 9, 5, 0).unwrap());
    assert_eq!(added.action_url.as_deref(), Some("/payments"));
    assert_eq!(ctx.feed.unread_count().await, 1);
    assert!(ctx.alerts.notices().is_empty(), "medium warning is not urgent");
}

#[tokio::test]
async fn urgent_additions_raise_alerts() {
    let ctx = TestContext::new();
    ctx.login("admin@ecole.fr").await;

    ctx.feed
        .add(NewNotification::new(
            "Bus en panne",
            "La ligne Nord est interrompue",
            NotificationKind::Info,
            NotificationPriority::High,
        ))
        .await;
    ctx.feed
        .add(NewNotification::new(
            "Échec de paiement",
            "Carte refusée",
            NotificationKind::Error,
            NotificationPriority::Low,
        ))
        .await;

    let notices = ctx.alerts.take();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].title, "Bus en panne");
    assert_eq!(notices[0].severity, Severity::Default);
    assert_eq!(notices[1].severity, Severity::Destructive);
}

#[tokio::test]
async fn tick_skips_polling_without_session() {
    let ctx = TestContext::new();
    let polls = Arc::new(AtomicUsize::new(0));
    let mut source = CountingSource {
        polls: polls.clone(),
    };

    assert!(ctx.feed.tick(&mut source).await.is_none());
    assert_eq!(polls.load(Ordering::SeqCst), 0);

    ctx.login("admin@ecole.fr").await;
    let generated = ctx.feed.tick(&mut source).await.expect("source always emits");
    assert_eq!(ctx.feed.list().await[0].id, generated.id);
    assert_eq!(polls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn seeded_trickle_is_deterministic() {
    let first = TestContext::new();
    let second = TestContext::new();
    first.login("admin@ecole.fr").await;
    second.login("admin@ecole.fr").await;

    let mut a = RandomTrickle::new(0.5, Some(2024));
    let mut b = RandomTrickle::new(0.5, Some(2024));
    for _ in 0..40 {
        first.feed.tick(&mut a).await;
        second.feed.tick(&mut b).await;
    }

    assert_eq!(first.feed.list().await.len(), second.feed.list().await.len());
}

#[tokio::test(start_paused = true)]
async fn generator_ticks_only_while_signed_in() {
    let ctx = TestContext::new();
    let polls = Arc::new(AtomicUsize::new(0));
    let handle = spawn_generator(
        ctx.feed.clone(),
        ctx.auth.subscribe(),
        Box::new(CountingSource {
            polls: polls.clone(),
        }),
        Duration::from_secs(30),
    );

    tokio::time::sleep(Duration::from_secs(95)).await;
    assert_eq!(polls.load(Ordering::SeqCst), 0, "no ticks while signed out");

    ctx.login("admin@ecole.fr").await;
    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(polls.load(Ordering::SeqCst), 2);
    assert_eq!(ctx.feed.list().await.len(), 5);

    ctx.auth.logout();
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(polls.load(Ordering::SeqCst), 2);

    drop(handle);
}

#[tokio::test(start_paused = true)]
async fn generator_interval_restarts_when_account_changes() {
    let ctx = TestContext::new();
    let polls = Arc::new(AtomicUsize::new(0));
    let handle = spawn_generator(
        ctx.feed.clone(),
        ctx.auth.subscribe(),
        Box::new(CountingSource {
            polls: polls.clone(),
        }),
        Duration::from_secs(30),
    );

    ctx.login("admin@ecole.fr").await;
    tokio::time::sleep(Duration::from_secs(20)).await;
    ctx.login("pierre.moreau@ecole.fr").await;

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(polls.load(Ordering::SeqCst), 0, "old interval must not fire at t=30");

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(polls.load(Ordering::SeqCst), 1);

    let items = ctx.feed.list().await;
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|n| n.recipient_id == "2"));
    assert_eq!(items[0].title, "event 0");

    drop(handle);
}

#[tokio::test(start_paused = true)]
async fn dropping_generator_handle_stops_ticks() {
    let ctx = TestContext::new();
    let polls = Arc::new(AtomicUsize::new(0));
    ctx.login("pierre.moreau@ecole.fr").await;

    let handle = spawn_generator(
        ctx.feed.clone(),
        ctx.auth.subscribe(),
        Box::new(CountingSource {
            polls: polls.clone(),
        }),
        Duration::from_secs(30),
    );
    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(polls.load(Ordering::SeqCst), 1);

    handle.stop();
    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(polls.load(Ordering::SeqCst), 1);
}
